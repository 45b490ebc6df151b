//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（`PusherChannel`）を管理
//! - クライアントへのメッセージ投入（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の受け付けと送信タスク（キューの受信側）は UI 層が持ち、
//! この実装はキューの送信側だけを保持します。
//! 投入は `try_send` で行い、キューが満杯（遅いクライアント）または閉じている接続は
//! その場で登録解除します。他の接続への送信を待たせることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, Payload, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// let (tx, rx) = mpsc::channel(64);
/// pusher.register_client(connection_id, tx).await;
/// pusher.push_to(&connection_id, Payload::from("{\"type\":\"joined\"}")).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信キュー
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

/// ロック取得済みのテーブルに対して 1 件投入する
///
/// 失敗した接続はテーブルから取り除く（送信側が drop されキューが閉じる）。
fn try_push(
    clients: &mut HashMap<ConnectionId, PusherChannel>,
    connection_id: &ConnectionId,
    payload: Payload,
) -> Result<(), MessagePushError> {
    let Some(sender) = clients.get(connection_id) else {
        return Err(MessagePushError::ClientNotFound(connection_id.to_string()));
    };

    match sender.try_send(payload) {
        Ok(()) => Ok(()),
        Err(TrySendError::Full(_)) => {
            clients.remove(connection_id);
            tracing::warn!(
                "Outbound queue of '{}' is full, disconnecting slow client",
                connection_id
            );
            Err(MessagePushError::QueueFull(connection_id.to_string()))
        }
        Err(TrySendError::Closed(_)) => {
            clients.remove(connection_id);
            tracing::debug!("Outbound queue of '{}' is already closed", connection_id);
            Err(MessagePushError::QueueClosed(connection_id.to_string()))
        }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.entry(connection_id).or_insert(sender);
        tracing::debug!("Client '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool {
        let mut clients = self.clients.lock().await;
        let removed = clients.remove(connection_id).is_some();
        if removed {
            tracing::debug!("Client '{}' unregistered from MessagePusher", connection_id);
        }
        removed
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        payload: Payload,
    ) -> Result<(), MessagePushError> {
        let mut clients = self.clients.lock().await;
        try_push(&mut clients, connection_id, payload)?;
        tracing::debug!("Pushed message to client '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(&self, targets: &[ConnectionId], payload: Payload) -> Vec<ConnectionId> {
        let mut clients = self.clients.lock().await;
        let mut failed = Vec::new();

        for target in targets {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = try_push(&mut clients, target, payload.clone()) {
                tracing::debug!("Skipped client '{}' during broadcast: {}", target, e);
                failed.push(*target);
            }
        }

        failed
    }

    async fn count_clients(&self) -> usize {
        self.clients.lock().await.len()
    }
}

//! UseCase: リレー（ブロードキャスト Hub）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase の connect / relay / disconnect / member_count
//! - relay が送信元を除外して Hub に渡すこと
//!
//! ### なぜこのテストが必要か
//! - 送信元に自分のメッセージがエコーされるとクライアントが二重表示する
//! - Hub が停止している場合もパニックせずにエラーを返すこと

use std::sync::Arc;

use crate::domain::{ConnectionHub, ConnectionId, HubError, Payload, PusherChannel};

/// リレーのユースケース
pub struct RelayMessageUseCase {
    hub: Arc<dyn ConnectionHub>,
}

impl RelayMessageUseCase {
    pub fn new(hub: Arc<dyn ConnectionHub>) -> Self {
        Self { hub }
    }

    /// 接続を Hub のメンバーに加える
    pub async fn connect(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), HubError> {
        self.hub.register(connection_id, sender).await
    }

    /// 受信したフレームを送信元以外の全メンバーへ転送する
    pub async fn relay(&self, from: ConnectionId, payload: Payload) -> Result<(), HubError> {
        tracing::trace!("relay {} bytes from '{}'", payload.len(), from);
        self.hub.broadcast(payload, Some(from)).await
    }

    /// 接続を Hub のメンバーから外す
    pub async fn disconnect(&self, connection_id: ConnectionId) -> Result<(), HubError> {
        self.hub.unregister(connection_id).await
    }

    /// 現在のメンバー数
    pub async fn member_count(&self) -> Result<usize, HubError> {
        Ok(self.hub.members().await?.len())
    }
}

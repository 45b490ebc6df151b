//! UseCase: クライアント接続処理（クイズ版）

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続の送信キューを登録する
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
    }
}

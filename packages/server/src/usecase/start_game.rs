//! UseCase: ゲーム開始処理

use std::sync::Arc;

use crate::domain::{ConnectionId, GameEvent, MessagePusher, Payload, Pin, RoomRepository};

use super::error::RoomRequestError;

/// ゲーム開始のユースケース
pub struct StartGameUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl StartGameUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ゲームを開始し、最初の問題をホストと全プレイヤーへ送る
    ///
    /// 出題は Room のロックを保持したまま行う。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        pin: String,
    ) -> Result<(), RoomRequestError> {
        let pin = Pin::new(pin)?;
        let handle = self.repository.find_room(&pin).await?;

        let mut room = handle.lock().await;
        let question = room.start(&connection_id)?;
        tracing::info!(
            "Room {} started with {} player(s)",
            pin,
            room.player_count()
        );

        self.message_pusher
            .broadcast(&room.recipients(), Payload::from(GameEvent::Question(question)))
            .await;

        Ok(())
    }
}

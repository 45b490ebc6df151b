//! UseCase: Room 作成処理

use std::sync::Arc;

use crate::domain::{ConnectionId, GameEvent, MessagePusher, Payload, Pin, RoomRepository};

use super::error::CreateRoomError;

/// Room 作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（Room Registry の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl CreateRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Room を作成し、ホストに PIN を通知する
    ///
    /// # Returns
    ///
    /// * `Ok(Pin)` - 割り当てられた PIN
    /// * `Err(CreateRoomError)` - PIN を割り当てられなかった
    pub async fn execute(&self, host: ConnectionId) -> Result<Pin, CreateRoomError> {
        let pin = self.repository.create_room(host).await?;

        let created = Payload::from(GameEvent::Created { pin: pin.clone() });
        if let Err(e) = self.message_pusher.push_to(&host, created).await {
            tracing::warn!("Failed to notify host of room {}: {}", pin, e);
        }

        Ok(pin)
    }
}

//! UseCase: 回答処理

use std::sync::Arc;

use crate::domain::{AnswerOutcome, ConnectionId, Pin, RoomRepository};

use super::error::RoomRequestError;

/// 回答のユースケース
///
/// 回答に対する返信はない。遅れて届いた回答や非プレイヤーからの回答は
/// 想定内の競合として `AnswerOutcome::Ignored` になる。
pub struct SubmitAnswerUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl SubmitAnswerUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        pin: String,
        choice: usize,
    ) -> Result<AnswerOutcome, RoomRequestError> {
        let pin = Pin::new(pin)?;
        let handle = self.repository.find_room(&pin).await?;

        let mut room = handle.lock().await;
        let outcome = room.answer(&connection_id, choice);
        tracing::debug!(
            "Room {}: answer {} from '{}' -> {:?}",
            pin,
            choice,
            connection_id,
            outcome
        );

        Ok(outcome)
    }
}

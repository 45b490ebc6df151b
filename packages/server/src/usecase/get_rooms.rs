//! UseCase: Room 一覧・詳細の取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{Pin, Room, RoomRepository};

use super::error::RoomRequestError;

/// 生存中の Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 各 Room のスナップショットを PIN 順に返す
    pub async fn execute(&self) -> Vec<Room> {
        let mut rooms = Vec::new();
        for handle in self.repository.list_rooms().await {
            rooms.push(handle.lock().await.clone());
        }
        rooms
    }
}

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, pin: String) -> Result<Room, RoomRequestError> {
        let pin = Pin::new(pin)?;
        let handle = self.repository.find_room(&pin).await?;
        let room = handle.lock().await.clone();
        Ok(room)
    }
}

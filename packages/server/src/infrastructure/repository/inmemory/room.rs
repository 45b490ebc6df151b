//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! PIN → Room の対応表を 1 つのロックで保護し、各 Room は自身のロックを持ちます。
//! Registry のロックは Room の検索・追加・削除の間だけ保持し、Room の中身には触れません。

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use hiroba_shared::time::now_millis;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Pin, PinGenerator, QuestionSet, RepositoryError, Room, RoomHandle,
    RoomRepository, Timestamp, value_object::PIN_SPACE,
};

/// Registry の 1 エントリ
///
/// ホストは作成後に変わらないため、Room のロックを取らずに参照できるよう複製して持つ。
struct RoomEntry {
    host: ConnectionId,
    room: RoomHandle,
}

/// インメモリ Room Registry 実装
pub struct InMemoryRoomRepository {
    rooms: Mutex<BTreeMap<Pin, RoomEntry>>,
    /// 新しい Room に添付する問題列
    questions: QuestionSet,
    pin_generator: Arc<dyn PinGenerator>,
}

impl InMemoryRoomRepository {
    pub fn new(questions: QuestionSet, pin_generator: Arc<dyn PinGenerator>) -> Self {
        Self {
            rooms: Mutex::new(BTreeMap::new()),
            questions,
            pin_generator,
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(&self, host: ConnectionId) -> Result<Pin, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.len() >= PIN_SPACE {
            return Err(RepositoryError::PinSpaceExhausted);
        }

        let pin = loop {
            let candidate = self.pin_generator.generate()?;
            if !rooms.contains_key(&candidate) {
                break candidate;
            }
            tracing::debug!("PIN {} is in use, regenerating", candidate);
        };

        let room = Room::new(
            pin.clone(),
            host,
            self.questions.clone(),
            Timestamp::new(now_millis()),
        );
        rooms.insert(
            pin.clone(),
            RoomEntry {
                host,
                room: Arc::new(Mutex::new(room)),
            },
        );
        tracing::info!("Room {} created by '{}' ({} live)", pin, host, rooms.len());

        Ok(pin)
    }

    async fn find_room(&self, pin: &Pin) -> Result<RoomHandle, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(pin)
            .map(|entry| entry.room.clone())
            .ok_or(RepositoryError::RoomNotFound)
    }

    async fn remove_room(&self, pin: &Pin) -> bool {
        let mut rooms = self.rooms.lock().await;
        let removed = rooms.remove(pin).is_some();
        if removed {
            tracing::info!("Room {} removed ({} live)", pin, rooms.len());
        }
        removed
    }

    async fn remove_room_if(&self, pin: &Pin, room: &RoomHandle) -> bool {
        let mut rooms = self.rooms.lock().await;
        if !rooms
            .get(pin)
            .is_some_and(|entry| Arc::ptr_eq(&entry.room, room))
        {
            return false;
        }
        rooms.remove(pin);
        tracing::info!("Room {} removed ({} live)", pin, rooms.len());
        true
    }

    async fn list_rooms(&self) -> Vec<RoomHandle> {
        let rooms = self.rooms.lock().await;
        rooms.values().map(|entry| entry.room.clone()).collect()
    }

    async fn rooms_hosted_by(&self, connection_id: &ConnectionId) -> Vec<Pin> {
        let rooms = self.rooms.lock().await;
        rooms
            .iter()
            .filter(|(_, entry)| entry.host == *connection_id)
            .map(|(pin, _)| pin.clone())
            .collect()
    }

    async fn count_rooms(&self) -> usize {
        self.rooms.lock().await.len()
    }
}

//! UseCase のテスト用ヘルパー

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionId, MessagePusher, Payload, Pin, PinGenerator, RoomRepository, ValueObjectError,
    },
    infrastructure::{
        dto::websocket::ServerMessage, message_pusher::WebSocketMessagePusher,
        question_loader::builtin_questions, repository::InMemoryRoomRepository,
    },
};

/// 常に同じ PIN を返す生成器
pub struct FixedPinGenerator(pub &'static str);

impl PinGenerator for FixedPinGenerator {
    fn generate(&self) -> Result<Pin, ValueObjectError> {
        Pin::new(self.0.to_string())
    }
}

pub struct Fixture {
    pub repository: Arc<InMemoryRoomRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
}

impl Fixture {
    /// PIN "4821" の Room が作られる Registry と空の MessagePusher
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryRoomRepository::new(
                builtin_questions(),
                Arc::new(FixedPinGenerator("4821")),
            )),
            pusher: Arc::new(WebSocketMessagePusher::new()),
        }
    }

    /// 接続を 1 つ登録し、その送信キューの受信側を返す
    pub async fn connect(&self) -> (ConnectionId, mpsc::Receiver<Payload>) {
        self.connect_with_capacity(16).await
    }

    pub async fn connect_with_capacity(
        &self,
        capacity: usize,
    ) -> (ConnectionId, mpsc::Receiver<Payload>) {
        let (tx, rx) = mpsc::channel(capacity);
        let id = ConnectionId::generate();
        self.pusher.register_client(id, tx).await;
        (id, rx)
    }

    /// Room を直接作成する
    pub async fn create_room(&self, host: ConnectionId) -> Pin {
        self.repository.create_room(host).await.unwrap()
    }
}

/// キューに溜まっているメッセージを全てデコードして取り出す
pub fn drain(rx: &mut mpsc::Receiver<Payload>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(payload) = rx.try_recv() {
        let Payload::Text(json) = payload else {
            panic!("expected a text payload");
        };
        messages.push(serde_json::from_str(&json).unwrap());
    }
    messages
}

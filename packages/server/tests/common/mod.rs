//! Helpers shared by the integration tests.
//!
//! サーバーは別プロセスではなく、テストと同じランタイム上で
//! `127.0.0.1:0` に bind して起動します。

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    infrastructure::{
        dto::websocket::ServerMessage,
        hub::ChannelHub,
        message_pusher::WebSocketMessagePusher,
        question_loader::builtin_questions,
        repository::{InMemoryRoomRepository, RandomPinGenerator},
    },
    ui::{
        QuizServer, RelayServer,
        state::{QuizState, RelayState},
    },
};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// 受信待ちのタイムアウト
pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// 「何も届かないこと」を確認するときの待ち時間
pub const QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Helper struct to manage the in-process server lifecycle
pub struct TestServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl TestServer {
    async fn start(router: axum::Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        TestServer { addr, task }
    }

    /// Start a quiz server with the built-in questions
    pub async fn quiz() -> Self {
        let repository = Arc::new(InMemoryRoomRepository::new(
            builtin_questions(),
            Arc::new(RandomPinGenerator),
        ));
        let state = QuizState::new(repository, Arc::new(WebSocketMessagePusher::new()), 16);
        Self::start(QuizServer::new(state).router()).await
    }

    /// Start a relay server
    pub async fn relay() -> Self {
        let (hub, _task) = ChannelHub::spawn();
        let state = RelayState::new(Arc::new(hub), 16);
        Self::start(RelayServer::new(state).router()).await
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn connect(&self) -> Client {
        let (client, _response) = connect_async(self.ws_url()).await.unwrap();
        client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub async fn send_text(client: &mut Client, text: &str) {
    client.send(Message::Text(text.into())).await.unwrap();
}

pub async fn send_json(client: &mut Client, value: serde_json::Value) {
    send_text(client, &value.to_string()).await;
}

/// 次のデータフレームを受信する（Close / ストリーム終了なら None）
pub async fn recv(client: &mut Client) -> Option<Message> {
    loop {
        let next = tokio::time::timeout(RECV_TIMEOUT, client.next())
            .await
            .expect("timed out waiting for a frame");
        match next {
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return None,
            Some(Ok(message)) => return Some(message),
        }
    }
}

/// 次のサーバーメッセージを受信してデコードする
pub async fn recv_message(client: &mut Client) -> ServerMessage {
    match recv(client).await {
        Some(Message::Text(text)) => serde_json::from_str(text.as_str()).unwrap(),
        other => panic!("expected a text frame, got {other:?}"),
    }
}

/// 一定時間、データフレームが届かないことを確認する
pub async fn assert_silent(client: &mut Client) {
    if let Ok(Some(Ok(message))) = tokio::time::timeout(QUIET_PERIOD, client.next()).await {
        panic!("expected no frame, got {message:?}");
    }
}

//! クイズ版の WebSocket handler
//!
//! 受信した JSON を `ClientMessage` に一度だけデコードし、対応するユースケースへ振り分けます。

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{State, ws::WebSocketUpgrade},
    response::IntoResponse,
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, GameEvent, Payload},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::QuizState,
};

use super::websocket::{ConnectionHandler, serve_connection};

pub async fn quiz_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<QuizState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        let connection_id = ConnectionId::generate();
        let (tx, rx) = mpsc::channel(state.queue_capacity);
        state.connect_client_usecase.execute(connection_id, tx).await;
        tracing::info!("Client '{}' connected", connection_id);

        serve_connection(socket, connection_id, rx, state).await;
    })
}

impl QuizState {
    /// 要求元へ error メッセージを返す
    async fn reply_error(&self, connection_id: ConnectionId, message: String) {
        tracing::warn!("Rejected request from '{}': {}", connection_id, message);
        if let Err(e) = self
            .message_pusher
            .push_to(&connection_id, Payload::from(GameEvent::error(message)))
            .await
        {
            tracing::debug!("Failed to send error to '{}': {}", connection_id, e);
        }
    }

    async fn dispatch(&self, connection_id: ConnectionId, message: ClientMessage) {
        match message {
            ClientMessage::Create => {
                if let Err(e) = self.create_room_usecase.execute(connection_id).await {
                    self.reply_error(connection_id, e.to_string()).await;
                }
            }
            ClientMessage::Join { pin, name } => {
                if let Err(e) = self
                    .join_room_usecase
                    .execute(connection_id, pin, name)
                    .await
                {
                    self.reply_error(connection_id, e.to_string()).await;
                }
            }
            ClientMessage::Start { pin } => {
                if let Err(e) = self.start_game_usecase.execute(connection_id, pin).await {
                    self.reply_error(connection_id, e.to_string()).await;
                }
            }
            // answer / next_question の失敗は返信せずに無視する
            ClientMessage::Answer { pin, answer } => {
                if let Err(e) = self
                    .submit_answer_usecase
                    .execute(connection_id, pin, answer)
                    .await
                {
                    tracing::debug!("Ignored answer from '{}': {}", connection_id, e);
                }
            }
            ClientMessage::NextQuestion { pin } => {
                if let Err(e) = self.next_question_usecase.execute(connection_id, pin).await {
                    tracing::debug!("Ignored next_question from '{}': {}", connection_id, e);
                }
            }
        }
    }
}

#[async_trait]
impl ConnectionHandler for QuizState {
    async fn on_frame(&self, connection_id: ConnectionId, payload: Payload) {
        let Payload::Text(text) = payload else {
            self.reply_error(connection_id, "binary frames are not supported".to_string())
                .await;
            return;
        };

        match serde_json::from_str::<ClientMessage>(&text) {
            Ok(message) => self.dispatch(connection_id, message).await,
            Err(e) => {
                self.reply_error(connection_id, format!("invalid message: {e}"))
                    .await;
            }
        }
    }

    async fn on_disconnect(&self, connection_id: ConnectionId) {
        let ended = self.disconnect_client_usecase.execute(connection_id).await;
        if !ended.is_empty() {
            tracing::info!(
                "Ended {} room(s) hosted by '{}'",
                ended.len(),
                connection_id
            );
        }
    }
}

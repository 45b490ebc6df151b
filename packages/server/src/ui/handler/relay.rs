//! リレー版の WebSocket handler

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{State, ws::WebSocketUpgrade},
    response::IntoResponse,
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Payload},
    ui::state::RelayState,
};

use super::websocket::{ConnectionHandler, serve_connection};

pub async fn relay_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<RelayState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        let connection_id = ConnectionId::generate();
        let (tx, rx) = mpsc::channel(state.queue_capacity);
        if let Err(e) = state.relay_message_usecase.connect(connection_id, tx).await {
            tracing::error!("Failed to register '{}': {}", connection_id, e);
            return;
        }

        serve_connection(socket, connection_id, rx, state).await;
    })
}

#[async_trait]
impl ConnectionHandler for RelayState {
    async fn on_frame(&self, connection_id: ConnectionId, payload: Payload) {
        if let Err(e) = self.relay_message_usecase.relay(connection_id, payload).await {
            tracing::error!("Failed to relay from '{}': {}", connection_id, e);
        }
    }

    async fn on_disconnect(&self, connection_id: ConnectionId) {
        if let Err(e) = self.relay_message_usecase.disconnect(connection_id).await {
            tracing::error!("Failed to unregister '{}': {}", connection_id, e);
        }
    }
}

//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RepositoryError,
    infrastructure::dto::http::{MembersDto, RoomDetailDto, RoomSummaryDto},
    ui::state::{QuizState, RelayState},
    usecase::RoomRequestError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of live rooms
pub async fn get_rooms(State(state): State<Arc<QuizState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by PIN
pub async fn get_room_detail(
    State(state): State<Arc<QuizState>>,
    Path(pin): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.get_room_detail_usecase.execute(pin).await {
        Ok(room) => Ok(Json(RoomDetailDto::from(&room))),
        Err(RoomRequestError::Repository(RepositoryError::RoomNotFound)) => {
            Err(StatusCode::NOT_FOUND)
        }
        Err(RoomRequestError::InvalidInput(_)) => Err(StatusCode::BAD_REQUEST),
        Err(e) => {
            tracing::error!("Failed to get room detail: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get the number of relay hub members
pub async fn get_members(
    State(state): State<Arc<RelayState>>,
) -> Result<Json<MembersDto>, StatusCode> {
    match state.relay_message_usecase.member_count().await {
        Ok(count) => Ok(Json(MembersDto { count })),
        Err(e) => {
            tracing::error!("Failed to get hub members: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

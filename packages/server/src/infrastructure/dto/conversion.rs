//! Conversion logic between DTOs and domain models.

use hiroba_shared::time::timestamp_to_rfc3339;

use crate::domain::{GameEvent, GamePhase, Payload, PlayerResult, Room};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → WebSocket DTO
// ========================================

impl From<PlayerResult> for dto::PlayerResultDto {
    fn from(result: PlayerResult) -> Self {
        Self {
            name: result.name,
            score: result.score,
        }
    }
}

impl From<GameEvent> for dto::ServerMessage {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Created { pin } => Self::Created {
                pin: pin.into_string(),
            },
            GameEvent::Joined => Self::Joined,
            GameEvent::PlayerJoined { name } => Self::PlayerJoined { name },
            GameEvent::Question(view) => Self::Question {
                text: view.text,
                options: view.options,
                question: view.index,
                total: view.total,
            },
            GameEvent::GameOver { results } => Self::GameOver {
                results: results.into_iter().map(Into::into).collect(),
            },
            GameEvent::Error { message } => Self::Error { message },
        }
    }
}

/// サーバーメッセージを 1 フレーム分の JSON テキストにする
pub fn encode(message: &dto::ServerMessage) -> Payload {
    match serde_json::to_string(message) {
        Ok(json) => Payload::Text(json),
        Err(e) => {
            tracing::error!("Failed to encode server message {:?}: {}", message, e);
            Payload::Text(r#"{"type":"error","message":"internal error"}"#.to_string())
        }
    }
}

impl From<GameEvent> for Payload {
    fn from(event: GameEvent) -> Self {
        encode(&dto::ServerMessage::from(event))
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<GamePhase> for http::PhaseDto {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Lobby => Self::Lobby,
            GamePhase::InProgress => Self::InProgress,
            GamePhase::Ended => Self::Ended,
        }
    }
}

impl From<&Room> for http::RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            pin: room.pin().to_string(),
            host: room.host().to_string(),
            players: room.player_count(),
            phase: room.phase().into(),
            question: room.current_question().map(|q| q.index),
            total: room.total_questions(),
            created_at: timestamp_to_rfc3339(room.created_at().value()),
        }
    }
}

impl From<&Room> for http::RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            pin: room.pin().to_string(),
            host: room.host().to_string(),
            phase: room.phase().into(),
            question: room.current_question().map(|q| q.index),
            total: room.total_questions(),
            created_at: timestamp_to_rfc3339(room.created_at().value()),
            players: room
                .results()
                .into_iter()
                .map(|r| http::PlayerDetailDto {
                    name: r.name,
                    score: r.score,
                })
                .collect(),
        }
    }
}

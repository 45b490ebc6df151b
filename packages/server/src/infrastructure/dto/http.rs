//! HTTP API のレスポンス DTO

use serde::{Deserialize, Serialize};

/// ゲームの進行状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseDto {
    Lobby,
    InProgress,
    Ended,
}

/// `GET /api/rooms` の 1 要素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub pin: String,
    pub host: String,
    pub players: usize,
    pub phase: PhaseDto,
    /// 出題中の問題番号（出題中以外は null）
    pub question: Option<usize>,
    pub total: usize,
    pub created_at: String,
}

/// `GET /api/rooms/{pin}` のプレイヤー 1 人分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDetailDto {
    pub name: String,
    pub score: u32,
}

/// `GET /api/rooms/{pin}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub pin: String,
    pub host: String,
    pub phase: PhaseDto,
    pub question: Option<usize>,
    pub total: usize,
    pub created_at: String,
    pub players: Vec<PlayerDetailDto>,
}

/// `GET /api/members`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembersDto {
    pub count: usize,
}

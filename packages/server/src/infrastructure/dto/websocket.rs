//! WebSocket プロトコルのメッセージ定義
//!
//! どのメッセージも `type` フィールドで種類を判別する JSON オブジェクトです。
//! 受信メッセージは境界で一度だけデコードし、以降は型付きの値として扱います。

use serde::{Deserialize, Serialize};

/// クライアント → サーバー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Create,
    Join { pin: String, name: String },
    Start { pin: String },
    Answer { pin: String, answer: usize },
    NextQuestion { pin: String },
}

/// サーバー → クライアント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Created {
        pin: String,
    },
    Joined,
    PlayerJoined {
        name: String,
    },
    Question {
        text: String,
        options: Vec<String>,
        /// 0 始まりの問題番号
        question: usize,
        total: usize,
    },
    GameOver {
        results: Vec<PlayerResultDto>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResultDto {
    pub name: String,
    pub score: u32,
}

//! ドメイン層のエラー型
//!
//! `Display` の文言はそのままクライアントへの `error` メッセージとして使われます。

use thiserror::Error;

/// Value Object 生成時のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    #[error("invalid room PIN '{0}': expected 4 digits")]
    InvalidPin(String),

    #[error("question set must contain at least one question")]
    EmptyQuestionSet,

    #[error("question {index} must have at least two options")]
    TooFewOptions { index: usize },

    #[error("question {index} marks option {correct} as correct but has {options} options")]
    CorrectOptionOutOfRange {
        index: usize,
        correct: usize,
        options: usize,
    },
}

/// Room の状態遷移が拒否されたときのエラー
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RoomError {
    #[error("only the host can do that")]
    NotHost,

    #[error("already joined this room")]
    AlreadyJoined,

    #[error("game has already started")]
    AlreadyStarted,

    #[error("game has not started yet")]
    NotStarted,

    #[error("game is over")]
    GameOver,
}

/// Repository 操作のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("room not found")]
    RoomNotFound,

    #[error("no free room PIN")]
    PinSpaceExhausted,

    /// PIN 生成器が範囲外の値を返した
    #[error("PIN generator failed: {0}")]
    PinGeneration(#[from] ValueObjectError),
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ClientNotFound(String),

    #[error("outbound queue of connection '{0}' is full")]
    QueueFull(String),

    #[error("outbound queue of connection '{0}' is closed")]
    QueueClosed(String),
}

/// Hub への命令送信のエラー
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum HubError {
    #[error("hub coordination task has stopped")]
    Stopped,
}

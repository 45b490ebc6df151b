//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{RepositoryError, RoomError, ValueObjectError};

/// Room 作成のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CreateRoomError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// PIN で Room を指定する操作（join / start / answer / next_question）のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoomRequestError {
    /// PIN やプレイヤー名の形式が不正
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    /// Room が存在しない
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Room の状態遷移として許可されていない
    #[error(transparent)]
    Rejected(#[from] RoomError),
}

//! Domain 層
//!
//! Value Object / Entity / エラー型と、外部へのインターフェース（trait）を定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod hub;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    Advance, AnswerOutcome, CORRECT_ANSWER_POINTS, GamePhase, IgnoreReason, Player, PlayerResult,
    Question, QuestionSet, QuestionView, Room,
};
pub use error::{HubError, MessagePushError, RepositoryError, RoomError, ValueObjectError};
pub use event::GameEvent;
pub use hub::ConnectionHub;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{PinGenerator, RoomHandle, RoomRepository};
pub use value_object::{ConnectionId, Payload, Pin, PlayerName, Timestamp};

#[cfg(test)]
pub use hub::MockConnectionHub;
#[cfg(test)]
pub use repository::MockPinGenerator;

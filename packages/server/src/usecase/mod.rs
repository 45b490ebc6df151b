//! UseCase 層
//!
//! ドメインモデルと trait を組み合わせて、クライアントからの要求 1 つ分の処理を実装します。

pub mod connect_client;
pub mod create_room;
pub mod disconnect_client;
pub mod error;
mod finish_game;
pub mod get_rooms;
pub mod join_room;
pub mod next_question;
pub mod relay_message;
pub mod start_game;
pub mod submit_answer;

#[cfg(test)]
mod test_support;

pub use connect_client::ConnectClientUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{CreateRoomError, RoomRequestError};
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase};
pub use join_room::JoinRoomUseCase;
pub use next_question::NextQuestionUseCase;
pub use relay_message::RelayMessageUseCase;
pub use start_game::StartGameUseCase;
pub use submit_answer::SubmitAnswerUseCase;

//! Server state shared by the handlers.

use std::sync::Arc;

use crate::{
    domain::{ConnectionHub, MessagePusher, RoomRepository},
    usecase::{
        ConnectClientUseCase, CreateRoomUseCase, DisconnectClientUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, JoinRoomUseCase, NextQuestionUseCase, RelayMessageUseCase,
        StartGameUseCase, SubmitAnswerUseCase,
    },
};

/// 接続ごとの送信キューの既定の容量
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// クイズサーバーの共有状態
pub struct QuizState {
    /// MessagePusher（エラー返信に使う）
    pub message_pusher: Arc<dyn MessagePusher>,
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub start_game_usecase: Arc<StartGameUseCase>,
    pub submit_answer_usecase: Arc<SubmitAnswerUseCase>,
    pub next_question_usecase: Arc<NextQuestionUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// 接続ごとの送信キューの容量
    pub queue_capacity: usize,
}

impl QuizState {
    /// Repository と MessagePusher から全てのユースケースを組み立てる
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        queue_capacity: usize,
    ) -> Self {
        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(message_pusher.clone())),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            start_game_usecase: Arc::new(StartGameUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            submit_answer_usecase: Arc::new(SubmitAnswerUseCase::new(repository.clone())),
            next_question_usecase: Arc::new(NextQuestionUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(repository.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(repository)),
            message_pusher,
            queue_capacity: queue_capacity.max(1),
        }
    }
}

/// リレーサーバーの共有状態
pub struct RelayState {
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    /// 接続ごとの送信キューの容量
    pub queue_capacity: usize,
}

impl RelayState {
    pub fn new(hub: Arc<dyn ConnectionHub>, queue_capacity: usize) -> Self {
        Self {
            relay_message_usecase: Arc::new(RelayMessageUseCase::new(hub)),
            queue_capacity: queue_capacity.max(1),
        }
    }
}

//! UseCase: 次の問題へ進める処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - NextQuestionUseCase::execute() メソッド
//! - 次の問題の出題、最後の問題の後のゲーム終了と Room の削除
//!
//! ### なぜこのテストが必要か
//! - 終了した Room の PIN が Registry に残ると、PIN が再利用できない
//! - game_over を受け取る前にプレイヤーのキューが閉じてはならない

use std::sync::Arc;

use crate::domain::{
    Advance, ConnectionId, GameEvent, MessagePusher, Payload, Pin, RoomRepository,
};

use super::{error::RoomRequestError, finish_game::announce_game_over};

/// 次の問題へ進めるユースケース
pub struct NextQuestionUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl NextQuestionUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 次の問題を出題する。問題を使い切った場合はゲームを終了して Room を削除する
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        pin: String,
    ) -> Result<Advance, RoomRequestError> {
        let pin = Pin::new(pin)?;
        let handle = self.repository.find_room(&pin).await?;

        let advance = {
            let mut room = handle.lock().await;
            let advance = room.advance(&connection_id)?;
            match &advance {
                Advance::Question(view) => {
                    tracing::info!(
                        "Room {}: question {}/{}",
                        pin,
                        view.index + 1,
                        view.total
                    );
                    self.message_pusher
                        .broadcast(
                            &room.recipients(),
                            Payload::from(GameEvent::Question(view.clone())),
                        )
                        .await;
                }
                Advance::GameOver(results) => {
                    announce_game_over(self.message_pusher.as_ref(), &room, results.clone()).await;
                }
            }
            advance
        };

        // Room のロックを解放してから Registry から削除する
        if matches!(advance, Advance::GameOver(_)) {
            self.repository.remove_room_if(&pin, &handle).await;
        }

        Ok(advance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Payload, RepositoryError, RoomError},
        infrastructure::dto::websocket::{PlayerResultDto, ServerMessage},
        usecase::{
            JoinRoomUseCase, StartGameUseCase, SubmitAnswerUseCase,
            test_support::{Fixture, drain},
        },
    };
    use tokio::sync::mpsc;

    struct Started {
        host: ConnectionId,
        host_rx: mpsc::Receiver<Payload>,
        ana: ConnectionId,
        ana_rx: mpsc::Receiver<Payload>,
    }

    async fn started_room(fixture: &Fixture) -> Started {
        let (host, mut host_rx) = fixture.connect().await;
        let (ana, mut ana_rx) = fixture.connect().await;
        fixture.create_room(host).await;
        JoinRoomUseCase::new(fixture.repository.clone(), fixture.pusher.clone())
            .execute(ana, "4821".to_string(), "Ana".to_string())
            .await
            .unwrap();
        StartGameUseCase::new(fixture.repository.clone(), fixture.pusher.clone())
            .execute(host, "4821".to_string())
            .await
            .unwrap();
        drain(&mut host_rx);
        drain(&mut ana_rx);
        Started {
            host,
            host_rx,
            ana,
            ana_rx,
        }
    }

    fn pin() -> Pin {
        Pin::new("4821".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_next_question_sends_question_one() {
        // テスト項目: ホストとプレイヤーに 1 問目が届く
        // given (前提条件):
        let fixture = Fixture::new();
        let mut started = started_room(&fixture).await;
        let usecase = NextQuestionUseCase::new(fixture.repository.clone(), fixture.pusher.clone());

        // when (操作):
        let advance = usecase.execute(started.host, "4821".to_string()).await;

        // then (期待する結果):
        assert!(matches!(advance, Ok(Advance::Question(ref view)) if view.index == 1));
        for rx in [&mut started.host_rx, &mut started.ana_rx] {
            let messages = drain(rx);
            assert!(matches!(
                messages.as_slice(),
                [ServerMessage::Question {
                    question: 1,
                    total: 2,
                    ..
                }]
            ));
        }
    }

    #[tokio::test]
    async fn test_last_advance_ends_game_and_removes_room() {
        // テスト項目: 最後の問題の後は game_over が届き、プレイヤーのキューが閉じ、Room が削除される
        // given (前提条件):
        let fixture = Fixture::new();
        let mut started = started_room(&fixture).await;
        SubmitAnswerUseCase::new(fixture.repository.clone())
            .execute(started.ana, "4821".to_string(), 2)
            .await
            .unwrap();
        let usecase = NextQuestionUseCase::new(fixture.repository.clone(), fixture.pusher.clone());
        usecase
            .execute(started.host, "4821".to_string())
            .await
            .unwrap();
        drain(&mut started.host_rx);
        drain(&mut started.ana_rx);

        // when (操作):
        let advance = usecase.execute(started.host, "4821".to_string()).await;

        // then (期待する結果):
        assert!(matches!(advance, Ok(Advance::GameOver(_))));
        let expected = ServerMessage::GameOver {
            results: vec![PlayerResultDto {
                name: "Ana".to_string(),
                score: 10,
            }],
        };
        assert_eq!(drain(&mut started.host_rx), vec![expected.clone()]);
        assert_eq!(drain(&mut started.ana_rx), vec![expected]);
        // プレイヤーのキューは閉じ、ホストのキューは開いたまま
        assert_eq!(started.ana_rx.recv().await, None);
        assert_eq!(fixture.pusher.count_clients().await, 1);
        assert!(matches!(
            fixture.repository.find_room(&pin()).await,
            Err(RepositoryError::RoomNotFound)
        ));
    }

    #[tokio::test]
    async fn test_next_question_after_game_over_reports_not_found() {
        // テスト項目: 終了後の next_question は RoomNotFound
        // given (前提条件):
        let fixture = Fixture::new();
        let started = started_room(&fixture).await;
        let usecase = NextQuestionUseCase::new(fixture.repository.clone(), fixture.pusher.clone());
        usecase.execute(started.host, "4821".to_string()).await.unwrap();
        usecase.execute(started.host, "4821".to_string()).await.unwrap();

        // when (操作):
        let result = usecase.execute(started.host, "4821".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomRequestError::Repository(RepositoryError::RoomNotFound))
        );
    }

    #[tokio::test]
    async fn test_next_question_by_player_is_rejected() {
        // テスト項目: プレイヤーからの next_question は拒否され、index は進まない
        // given (前提条件):
        let fixture = Fixture::new();
        let mut started = started_room(&fixture).await;
        let usecase = NextQuestionUseCase::new(fixture.repository.clone(), fixture.pusher.clone());

        // when (操作):
        let result = usecase.execute(started.ana, "4821".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Err(RoomRequestError::Rejected(RoomError::NotHost)));
        assert!(drain(&mut started.host_rx).is_empty());
        let handle = fixture.repository.find_room(&pin()).await.unwrap();
        assert_eq!(handle.lock().await.current_index(), 0);
    }
}

//! UseCase: Room への参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加者本人への joined とホストへの player_joined の通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：Lobby の Room への参加
//! - 正常系：ホスト自身の参加、空の名前
//! - 異常系：存在しない PIN、不正な PIN、重複参加

use std::sync::Arc;

use crate::domain::{
    ConnectionId, GameEvent, MessagePusher, Payload, Pin, PlayerName, RoomRepository,
};

use super::error::RoomRequestError;

/// Room への参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続
    /// * `pin` - クライアントが送ってきた PIN（未検証）
    /// * `name` - クライアントが送ってきた名前（未検証）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        pin: String,
        name: String,
    ) -> Result<(), RoomRequestError> {
        let pin = Pin::new(pin)?;
        let name = PlayerName::new(name);
        let handle = self.repository.find_room(&pin).await?;

        let mut room = handle.lock().await;
        room.join(connection_id, name.clone())?;
        tracing::info!(
            "'{}' joined room {} as '{}' ({} players)",
            connection_id,
            pin,
            name.as_str(),
            room.player_count()
        );

        if let Err(e) = self
            .message_pusher
            .push_to(&connection_id, Payload::from(GameEvent::Joined))
            .await
        {
            tracing::warn!("Failed to send joined to '{}': {}", connection_id, e);
        }

        let notification = Payload::from(GameEvent::PlayerJoined {
            name: name.into_string(),
        });
        if let Err(e) = self.message_pusher.push_to(&room.host(), notification).await {
            tracing::warn!("Failed to notify host of room {}: {}", pin, e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RepositoryError, RoomError, ValueObjectError},
        infrastructure::dto::websocket::ServerMessage,
        usecase::test_support::{Fixture, drain},
    };

    fn usecase(fixture: &Fixture) -> JoinRoomUseCase {
        JoinRoomUseCase::new(fixture.repository.clone(), fixture.pusher.clone())
    }

    #[tokio::test]
    async fn test_join_notifies_player_and_host() {
        // テスト項目: 参加者に joined、ホストに player_joined が届き、プレイヤーが 1 人増える
        // given (前提条件):
        let fixture = Fixture::new();
        let (host, mut host_rx) = fixture.connect().await;
        let (ana, mut ana_rx) = fixture.connect().await;
        let pin = fixture.create_room(host).await;

        // when (操作):
        let result = usecase(&fixture)
            .execute(ana, "4821".to_string(), "Ana".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        assert_eq!(drain(&mut ana_rx), vec![ServerMessage::Joined]);
        assert_eq!(
            drain(&mut host_rx),
            vec![ServerMessage::PlayerJoined {
                name: "Ana".to_string()
            }]
        );
        let handle = fixture.repository.find_room(&pin).await.unwrap();
        assert_eq!(handle.lock().await.player_count(), 1);
    }

    #[tokio::test]
    async fn test_join_unknown_room() {
        // テスト項目: 存在しない PIN への参加は RoomNotFound
        // given (前提条件):
        let fixture = Fixture::new();
        let (ana, mut ana_rx) = fixture.connect().await;

        // when (操作):
        let result = usecase(&fixture)
            .execute(ana, "1111".to_string(), "Ana".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomRequestError::Repository(RepositoryError::RoomNotFound))
        );
        assert_eq!(result.unwrap_err().to_string(), "room not found");
        assert!(drain(&mut ana_rx).is_empty());
    }

    #[tokio::test]
    async fn test_join_with_invalid_pin() {
        // テスト項目: 不正な PIN は InvalidInput、名前は空でもそのまま受け付ける
        // given (前提条件):
        let fixture = Fixture::new();
        let (host, mut host_rx) = fixture.connect().await;
        let (ana, mut ana_rx) = fixture.connect().await;
        fixture.create_room(host).await;

        // when (操作):
        let bad_pin = usecase(&fixture)
            .execute(ana, "48".to_string(), "Ana".to_string())
            .await;
        let empty_name = usecase(&fixture)
            .execute(ana, "4821".to_string(), String::new())
            .await;

        // then (期待する結果):
        assert!(matches!(
            bad_pin,
            Err(RoomRequestError::InvalidInput(ValueObjectError::InvalidPin(_)))
        ));
        assert_eq!(empty_name, Ok(()));
        assert_eq!(drain(&mut ana_rx), vec![ServerMessage::Joined]);
        assert_eq!(
            drain(&mut host_rx),
            vec![ServerMessage::PlayerJoined {
                name: String::new()
            }]
        );
    }

    #[tokio::test]
    async fn test_host_joins_own_room() {
        // テスト項目: ホストの接続も自分の Room にプレイヤーとして参加できる
        // given (前提条件):
        let fixture = Fixture::new();
        let (host, mut host_rx) = fixture.connect().await;
        let pin = fixture.create_room(host).await;

        // when (操作):
        let result = usecase(&fixture)
            .execute(host, "4821".to_string(), "Host".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        assert_eq!(
            drain(&mut host_rx),
            vec![
                ServerMessage::Joined,
                ServerMessage::PlayerJoined {
                    name: "Host".to_string()
                },
            ]
        );
        let handle = fixture.repository.find_room(&pin).await.unwrap();
        assert_eq!(handle.lock().await.player_count(), 1);
    }

    #[tokio::test]
    async fn test_join_twice_is_rejected() {
        // テスト項目: 同じ接続の二重参加は拒否され、ホストへの通知は 1 回だけ
        // given (前提条件):
        let fixture = Fixture::new();
        let (host, mut host_rx) = fixture.connect().await;
        let (ana, _ana_rx) = fixture.connect().await;
        fixture.create_room(host).await;
        let usecase = usecase(&fixture);
        usecase
            .execute(ana, "4821".to_string(), "Ana".to_string())
            .await
            .unwrap();

        // when (操作):
        let result = usecase
            .execute(ana, "4821".to_string(), "Ana".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomRequestError::Rejected(RoomError::AlreadyJoined))
        );
        assert_eq!(drain(&mut host_rx).len(), 1);
    }
}

//! UseCase: クライアント切断処理（クイズ版）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - ホストの切断で、そのホストの Room が終了・削除されること
//! - 終了処理の途中で止まった Room も、ホストの切断で片付くこと
//!
//! ### なぜこのテストが必要か
//! - ホストがいなくなった Room はゲームを進められず、PIN を占有し続ける
//! - プレイヤーの切断では Room に影響を与えない（集計には残る）

use std::sync::Arc;

use crate::domain::{ConnectionId, GamePhase, MessagePusher, Pin, RoomRepository};

use super::finish_game::announce_game_over;

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 接続の登録を解除し、その接続がホストだった Room を終了させる
    ///
    /// 既に Ended なのに Registry に残っている Room（終了処理の途中で中断された
    /// もの）は、game_over を送り直してから削除する。削除した Room の PIN を返す。
    pub async fn execute(&self, connection_id: ConnectionId) -> Vec<Pin> {
        self.message_pusher.unregister_client(&connection_id).await;

        let mut ended = Vec::new();
        for pin in self.repository.rooms_hosted_by(&connection_id).await {
            let Ok(handle) = self.repository.find_room(&pin).await else {
                continue;
            };

            {
                let mut room = handle.lock().await;
                // 検索とロックの間に PIN が別のホストの Room に再割り当てされた場合は触らない
                if !room.is_host(&connection_id) {
                    continue;
                }
                let results = if room.phase() == GamePhase::Ended {
                    tracing::warn!("Room {} ended but was never removed, cleaning up", pin);
                    room.results()
                } else {
                    tracing::info!("Host '{}' left, ending room {}", connection_id, pin);
                    room.end()
                };
                // 既に game_over を受け取ったプレイヤーは登録解除済みなので二重には届かない
                announce_game_over(self.message_pusher.as_ref(), &room, results).await;
            }

            if self.repository.remove_room_if(&pin, &handle).await {
                ended.push(pin);
            }
        }

        ended
    }
}

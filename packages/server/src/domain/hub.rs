//! ConnectionHub trait 定義
//!
//! ブロードキャスト版の Hub。register / unregister / broadcast は全体で 1 つずつ順番に
//! 処理されるため、メンバーシップの変更とブロードキャストの間に全順序が付きます。

use async_trait::async_trait;

use super::{ConnectionId, HubError, Payload, PusherChannel};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionHub: Send + Sync {
    /// 接続をメンバーに加える（冪等）
    async fn register(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), HubError>;

    /// 接続をメンバーから外し、送信キューを閉じる（未登録なら何もしない）
    async fn unregister(&self, connection_id: ConnectionId) -> Result<(), HubError>;

    /// `except` 以外の全メンバーへ送信
    ///
    /// キューが満杯のメンバーは待たずに切断します。
    async fn broadcast(
        &self,
        payload: Payload,
        except: Option<ConnectionId>,
    ) -> Result<(), HubError>;

    /// 現在のメンバー一覧
    async fn members(&self) -> Result<Vec<ConnectionId>, HubError>;
}

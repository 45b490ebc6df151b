//! MessagePusher trait 定義
//!
//! 接続ごとの送信キューへのメッセージ投入を抽象化します。
//! キューの送信側（`PusherChannel`）は MessagePusher だけが保持し、
//! 登録解除でエントリを削除することがキューのクローズになります。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, Payload};

/// 接続ごとの送信キュー（有界・FIFO）
pub type PusherChannel = mpsc::Sender<Payload>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録（既に登録済みなら何もしない）
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の登録を解除し、送信キューを閉じる（登録されていた場合は true）
    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool;

    /// 特定の接続へ送信（ブロックしない）
    ///
    /// キューが満杯または閉じている接続は登録解除されます。
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        payload: Payload,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続へ送信し、送信できなかった接続の ID を返す
    async fn broadcast(&self, targets: &[ConnectionId], payload: Payload) -> Vec<ConnectionId>;

    /// 登録中の接続数
    async fn count_clients(&self) -> usize;
}

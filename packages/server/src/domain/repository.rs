//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ConnectionId, Pin, RepositoryError, Room, ValueObjectError};

/// 個々の Room へのハンドル
///
/// Room は Registry のロックとは独立した自身のロックで保護されます。
/// Registry のロックを保持したまま Room のロックを取ってはいけません。
pub type RoomHandle = Arc<Mutex<Room>>;

/// Room Registry trait
///
/// PIN から Room への対応を管理します。UseCase 層はこの trait に依存し、
/// Infrastructure 層の具体的な実装には依存しません。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 未使用の PIN を割り当てて Lobby 状態の Room を作成
    async fn create_room(&self, host: ConnectionId) -> Result<Pin, RepositoryError>;

    /// PIN から Room を取得（存在しなければ `RoomNotFound`）
    async fn find_room(&self, pin: &Pin) -> Result<RoomHandle, RepositoryError>;

    /// Room を削除（存在した場合は true）
    async fn remove_room(&self, pin: &Pin) -> bool;

    /// PIN に登録されているのが `room` と同じ Room の場合だけ削除する
    ///
    /// 削除済みで PIN が別の Room に再割り当てされていれば何もしない（false）。
    async fn remove_room_if(&self, pin: &Pin, room: &RoomHandle) -> bool;

    /// 全 Room のスナップショット（PIN 昇順）
    async fn list_rooms(&self) -> Vec<RoomHandle>;

    /// 指定した接続がホストを務める Room の PIN 一覧
    async fn rooms_hosted_by(&self, connection_id: &ConnectionId) -> Vec<Pin>;

    /// 現在の Room 数
    async fn count_rooms(&self) -> usize;
}

/// PIN の候補を生成する
///
/// 衝突チェックは Repository 側で行うため、生成器は重複を気にしなくてよい。
/// 範囲外の値を生成した場合はエラーを返し、Room の作成は失敗する。
#[cfg_attr(test, mockall::automock)]
pub trait PinGenerator: Send + Sync {
    fn generate(&self) -> Result<Pin, ValueObjectError>;
}

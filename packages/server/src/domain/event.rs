//! サーバーからクライアントへ通知するイベント
//!
//! ワイヤ形式への変換は Infrastructure 層の DTO が担当します。

use super::{Pin, PlayerResult, QuestionView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Room 作成完了（ホストへ）
    Created { pin: Pin },
    /// 参加完了（参加者本人へ）
    Joined,
    /// プレイヤーが参加した（ホストへ）
    PlayerJoined { name: String },
    /// 出題（ホストと全プレイヤーへ）
    Question(QuestionView),
    /// ゲーム終了と集計結果
    GameOver { results: Vec<PlayerResult> },
    /// エラー（要求元へ）
    Error { message: String },
}

impl GameEvent {
    pub fn error(message: impl Into<String>) -> Self {
        GameEvent::Error {
            message: message.into(),
        }
    }
}

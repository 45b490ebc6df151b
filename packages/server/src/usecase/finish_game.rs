//! ゲーム終了時の共通処理

use crate::domain::{GameEvent, MessagePusher, Payload, PlayerResult, Room};

/// 集計結果をホストと全プレイヤーへ送り、プレイヤーの接続を閉じる
///
/// Room のロックを保持したまま呼ぶこと。Registry からの削除は呼び出し側が
/// ロックを解放してから行う。
pub(super) async fn announce_game_over(
    message_pusher: &dyn MessagePusher,
    room: &Room,
    results: Vec<PlayerResult>,
) {
    let payload = Payload::from(GameEvent::GameOver { results });
    let failed = message_pusher.broadcast(&room.recipients(), payload).await;
    if !failed.is_empty() {
        tracing::debug!(
            "Room {}: game_over not delivered to {} connection(s)",
            room.pin(),
            failed.len()
        );
    }

    // キューを閉じると送信タスクは game_over を書き出してから接続を閉じる
    // ホストとして使っている接続は、プレイヤーとして参加していても閉じない
    for player in room.player_ids() {
        if room.is_host(&player) {
            continue;
        }
        message_pusher.unregister_client(&player).await;
    }
    tracing::info!(
        "Room {} finished with {} player(s)",
        room.pin(),
        room.player_count()
    );
}

//! WebSocket connection plumbing shared by the relay and quiz variants.
//!
//! 1 接続につき 2 つのタスクを動かします。
//!
//! - 受信タスク: フレームを読み、`ConnectionHandler::on_frame` に渡す
//! - 送信タスク（`pusher_loop`）: 送信キューから取り出してソケットへ書き込む
//!
//! どちらかが終了したら `ConnectionHandler::on_disconnect` で登録を解除し、
//! その後に残ったタスクを止めます。受信タスクは中断せずに停止を通知し、
//! 処理中のフレーム（`on_frame`）が終わってから抜けるのを待ちます。

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::domain::{ConnectionId, Payload};

/// 受信フレームと切断を処理する側の抽象化
#[async_trait]
pub trait ConnectionHandler: Send + Sync + 'static {
    /// テキスト / バイナリのフレームを 1 つ受信した
    async fn on_frame(&self, connection_id: ConnectionId, payload: Payload);

    /// 接続が終了した（エラー・Close フレーム・送信キューのクローズ）
    async fn on_disconnect(&self, connection_id: ConnectionId);
}

/// Spawns a task that drains the outbound queue into the WebSocket sink.
///
/// The queue closing means the server has nothing more to say to this client,
/// so a Close frame is sent before the task ends.
fn pusher_loop(
    mut rx: mpsc::Receiver<Payload>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            let message = match payload {
                Payload::Text(text) => Message::Text(text.into()),
                Payload::Binary(bytes) => Message::Binary(bytes.into()),
            };
            if sender.send(message).await.is_err() {
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    })
}

/// 接続が終わるまで送受信を行う
///
/// `rx` は登録済みの送信キューの受信側。
pub async fn serve_connection<H: ConnectionHandler>(
    socket: WebSocket,
    connection_id: ConnectionId,
    rx: mpsc::Receiver<Payload>,
    handler: Arc<H>,
) {
    let (sender, mut receiver) = socket.split();

    let handler_for_recv = handler.clone();
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let mut recv_task = tokio::spawn(async move {
        loop {
            // 停止の通知はフレームの合間でだけ受け付ける
            let msg = tokio::select! {
                msg = receiver.next() => msg,
                _ = &mut stop_rx => break,
            };
            let Some(msg) = msg else {
                break;
            };
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id, text.as_str());
                    handler_for_recv
                        .on_frame(connection_id, Payload::Text(text.as_str().to_owned()))
                        .await;
                }
                Message::Binary(bytes) => {
                    tracing::debug!(
                        "Received {} bytes from '{}'",
                        bytes.len(),
                        connection_id
                    );
                    handler_for_recv
                        .on_frame(connection_id, Payload::Binary(bytes.to_vec()))
                        .await;
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, stop the reader
    let reader_finished = tokio::select! {
        _ = &mut recv_task => true,
        _ = &mut send_task => false,
    };
    if !reader_finished {
        let _ = stop_tx.send(());
        if let Err(e) = recv_task.await {
            tracing::warn!("Reader of '{}' ended abnormally: {}", connection_id, e);
        }
    }

    // 登録解除してから送信タスクを止め、ソケットを閉じる
    handler.on_disconnect(connection_id).await;
    send_task.abort();
    tracing::info!("Client '{}' disconnected", connection_id);
}

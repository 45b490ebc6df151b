//! コマンドキューで直列化された ConnectionHub 実装
//!
//! メンバーの集合は調整タスクだけが所有します。ロックは使わず、
//! register / unregister / broadcast / members を 1 本の mpsc キューから 1 つずつ処理します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::{
    sync::{
        mpsc::{self, error::TrySendError},
        oneshot,
    },
    task::JoinHandle,
};

use crate::domain::{ConnectionHub, ConnectionId, HubError, Payload, PusherChannel};

/// 調整タスクのコマンドキューの容量
pub const HUB_COMMAND_CAPACITY: usize = 1024;

enum HubCommand {
    Register {
        connection_id: ConnectionId,
        sender: PusherChannel,
    },
    Unregister {
        connection_id: ConnectionId,
    },
    Broadcast {
        payload: Payload,
        except: Option<ConnectionId>,
    },
    Members {
        reply: oneshot::Sender<Vec<ConnectionId>>,
    },
}

/// Hub へのハンドル（clone して各接続のタスクで共有する）
#[derive(Clone)]
pub struct ChannelHub {
    commands: mpsc::Sender<HubCommand>,
}

impl ChannelHub {
    /// 調整タスクを起動し、Hub へのハンドルを返す
    ///
    /// 全てのハンドルが drop されるとタスクは終了します。
    pub fn spawn() -> (Self, JoinHandle<()>) {
        let (commands, rx) = mpsc::channel(HUB_COMMAND_CAPACITY);
        let task = tokio::spawn(run_hub(rx));
        (Self { commands }, task)
    }

    async fn send(&self, command: HubCommand) -> Result<(), HubError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| HubError::Stopped)
    }
}

#[async_trait]
impl ConnectionHub for ChannelHub {
    async fn register(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), HubError> {
        self.send(HubCommand::Register {
            connection_id,
            sender,
        })
        .await
    }

    async fn unregister(&self, connection_id: ConnectionId) -> Result<(), HubError> {
        self.send(HubCommand::Unregister { connection_id }).await
    }

    async fn broadcast(
        &self,
        payload: Payload,
        except: Option<ConnectionId>,
    ) -> Result<(), HubError> {
        self.send(HubCommand::Broadcast { payload, except }).await
    }

    async fn members(&self) -> Result<Vec<ConnectionId>, HubError> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Members { reply }).await?;
        rx.await.map_err(|_| HubError::Stopped)
    }
}

/// Hub の調整ループ
async fn run_hub(mut rx: mpsc::Receiver<HubCommand>) {
    let mut members: HashMap<ConnectionId, PusherChannel> = HashMap::new();

    while let Some(command) = rx.recv().await {
        match command {
            HubCommand::Register {
                connection_id,
                sender,
            } => {
                members.entry(connection_id).or_insert(sender);
                tracing::info!("[hub] +client {} total={}", connection_id, members.len());
            }
            HubCommand::Unregister { connection_id } => {
                // 送信側を drop することでキューが閉じ、送信タスクが終了する
                if members.remove(&connection_id).is_some() {
                    tracing::info!("[hub] -client {} total={}", connection_id, members.len());
                }
            }
            HubCommand::Broadcast { payload, except } => {
                let mut evicted = Vec::new();
                for (connection_id, sender) in &members {
                    if Some(*connection_id) == except {
                        continue;
                    }
                    match sender.try_send(payload.clone()) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            tracing::warn!("[hub] dropped slow client {}", connection_id);
                            evicted.push(*connection_id);
                        }
                        Err(TrySendError::Closed(_)) => {
                            tracing::debug!("[hub] client {} queue already closed", connection_id);
                            evicted.push(*connection_id);
                        }
                    }
                }
                for connection_id in evicted {
                    members.remove(&connection_id);
                }
                tracing::debug!(
                    "[hub] broadcast {} bytes to {} clients",
                    payload.len(),
                    members.len()
                );
            }
            HubCommand::Members { reply } => {
                let _ = reply.send(members.keys().copied().collect());
            }
        }
    }

    tracing::info!("[hub] all handles dropped, stopping");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - register / unregister の順序列に対するメンバーシップ
    // - broadcast が各メンバーに 1 回ずつ、順序通りに届くこと
    // - キューが満杯のメンバーが切断され、以後何も受け取らないこと
    // ========================================

    async fn members_set(hub: &ChannelHub) -> HashSet<ConnectionId> {
        hub.members().await.unwrap().into_iter().collect()
    }

    #[tokio::test]
    async fn test_membership_is_registered_minus_unregistered() {
        // テスト項目: メンバーシップは「登録 − 登録解除」に等しく、二重の登録解除は何もしない
        // given (前提条件):
        let (hub, _task) = ChannelHub::spawn();
        let ids: Vec<ConnectionId> = (0..4).map(|_| ConnectionId::generate()).collect();
        let mut receivers = Vec::new();

        // when (操作):
        for id in &ids {
            let (tx, rx) = mpsc::channel(4);
            receivers.push(rx);
            hub.register(*id, tx).await.unwrap();
        }
        hub.unregister(ids[1]).await.unwrap();
        hub.unregister(ids[1]).await.unwrap();
        hub.unregister(ids[3]).await.unwrap();
        hub.unregister(ConnectionId::generate()).await.unwrap();

        // then (期待する結果):
        let expected: HashSet<ConnectionId> = [ids[0], ids[2]].into_iter().collect();
        assert_eq!(members_set(&hub).await, expected);
        assert_eq!(receivers[1].recv().await, None);
        assert_eq!(receivers[3].recv().await, None);
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        // テスト項目: 同じ接続を 2 回登録してもメンバーは 1 つで、最初のキューが使われる
        // given (前提条件):
        let (hub, _task) = ChannelHub::spawn();
        let alice = ConnectionId::generate();
        let (tx1, mut rx1) = mpsc::channel(4);
        let (tx2, mut rx2) = mpsc::channel(4);

        // when (操作):
        hub.register(alice, tx1).await.unwrap();
        hub.register(alice, tx2).await.unwrap();
        hub.broadcast(Payload::from("hi"), None).await.unwrap();

        // then (期待する結果):
        assert_eq!(hub.members().await.unwrap(), vec![alice]);
        assert_eq!(rx1.recv().await, Some(Payload::from("hi")));
        assert_eq!(rx2.recv().await, None);
    }

    #[tokio::test]
    async fn test_broadcast_delivers_once_in_order() {
        // テスト項目: 各メンバーに各ブロードキャストが 1 回ずつ、送信順に届く
        // given (前提条件):
        let (hub, _task) = ChannelHub::spawn();
        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        hub.register(ConnectionId::generate(), tx1).await.unwrap();
        hub.register(ConnectionId::generate(), tx2).await.unwrap();

        // when (操作):
        for i in 0..3 {
            hub.broadcast(Payload::from(format!("m{i}")), None)
                .await
                .unwrap();
        }
        // members() は直前のブロードキャストの処理完了を待つために使う
        hub.members().await.unwrap();

        // then (期待する結果):
        for rx in [&mut rx1, &mut rx2] {
            for i in 0..3 {
                assert_eq!(rx.try_recv().unwrap(), Payload::from(format!("m{i}")));
            }
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn test_broadcast_skips_sender() {
        // テスト項目: except に指定した送信元には届かない
        // given (前提条件):
        let (hub, _task) = ChannelHub::spawn();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        let (tx_a, mut rx_a) = mpsc::channel(4);
        let (tx_b, mut rx_b) = mpsc::channel(4);
        hub.register(alice, tx_a).await.unwrap();
        hub.register(bob, tx_b).await.unwrap();

        // when (操作):
        hub.broadcast(Payload::Binary(vec![1, 2, 3]), Some(alice))
            .await
            .unwrap();
        hub.members().await.unwrap();

        // then (期待する結果):
        assert_eq!(rx_b.try_recv().unwrap(), Payload::Binary(vec![1, 2, 3]));
        assert!(rx_a.try_recv().is_err());
        assert_eq!(members_set(&hub).await.len(), 2);
    }

    #[tokio::test]
    async fn test_saturated_member_is_evicted() {
        // テスト項目: キューが満杯のメンバーは次のブロードキャストで外され、以後何も受け取らない
        // given (前提条件):
        let (hub, _task) = ChannelHub::spawn();
        let fast = ConnectionId::generate();
        let slow = ConnectionId::generate();
        let (tx_fast, mut rx_fast) = mpsc::channel(8);
        let (tx_slow, mut rx_slow) = mpsc::channel(1);
        hub.register(fast, tx_fast).await.unwrap();
        hub.register(slow, tx_slow).await.unwrap();
        hub.broadcast(Payload::from("fills slow queue"), None)
            .await
            .unwrap();

        // when (操作):
        hub.broadcast(Payload::from("overflow"), None).await.unwrap();
        hub.broadcast(Payload::from("after"), None).await.unwrap();

        // then (期待する結果):
        assert_eq!(hub.members().await.unwrap(), vec![fast]);
        assert_eq!(rx_slow.recv().await, Some(Payload::from("fills slow queue")));
        assert_eq!(rx_slow.recv().await, None);
        assert_eq!(rx_fast.recv().await, Some(Payload::from("fills slow queue")));
        assert_eq!(rx_fast.recv().await, Some(Payload::from("overflow")));
        assert_eq!(rx_fast.recv().await, Some(Payload::from("after")));
    }

    #[tokio::test]
    async fn test_closed_queue_is_evicted() {
        // テスト項目: 受信側が終了した（送信タスクが終わった）メンバーは外される
        // given (前提条件):
        let (hub, _task) = ChannelHub::spawn();
        let gone = ConnectionId::generate();
        let (tx, rx) = mpsc::channel(4);
        hub.register(gone, tx).await.unwrap();
        drop(rx);

        // when (操作):
        hub.broadcast(Payload::from("anyone?"), None).await.unwrap();

        // then (期待する結果):
        assert!(hub.members().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_hub_stops_when_handles_dropped() {
        // テスト項目: 全てのハンドルが drop されると調整タスクが終了する
        // given (前提条件):
        let (hub, task) = ChannelHub::spawn();

        // when (操作):
        drop(hub);

        // then (期待する結果):
        assert!(task.await.is_ok());
    }
}

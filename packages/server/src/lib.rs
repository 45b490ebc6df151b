//! Hiroba: real-time WebSocket hub.
//!
//! - リレー版: 受信したフレームを送信元以外の全接続へそのまま転送する
//! - クイズ版: PIN で識別される Room でホストが出題し、プレイヤーが回答する
//!
//! レイヤー構成は `domain` → `usecase` → `infrastructure` / `ui` です。

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

//! Data Transfer Objects
//!
//! - `websocket`: WebSocket プロトコルのメッセージ
//! - `http`: HTTP API のレスポンス
//! - `conversion`: ドメインモデルとの変換

pub mod conversion;
pub mod http;
pub mod websocket;

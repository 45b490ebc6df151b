//! Infrastructure 層
//!
//! ドメイン層の trait の具体的な実装（Hub、Room Registry、MessagePusher）と、
//! ワイヤ形式の DTO・問題列の読み込みを提供します。

pub mod dto;
pub mod hub;
pub mod message_pusher;
pub mod question_loader;
pub mod repository;

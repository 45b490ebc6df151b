//! WebSocket / HTTP サーバー（UI 層）

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{QuizServer, RelayServer};

//! HTTP / WebSocket handlers.

mod http;
mod quiz;
mod relay;
mod websocket;

pub use http::{get_members, get_room_detail, get_rooms, health_check};
pub use quiz::quiz_websocket_handler;
pub use relay::relay_websocket_handler;

//! Repository 実装

pub mod inmemory;
pub mod pin_generator;

pub use inmemory::InMemoryRoomRepository;
pub use pin_generator::RandomPinGenerator;

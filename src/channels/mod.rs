//! Messaging platform channel adapters

pub mod telegram;

pub use telegram::TelegramChannel;

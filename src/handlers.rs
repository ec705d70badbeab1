pub mod chat;
pub mod events;
pub mod health;
pub mod predictions;

pub mod chat;
pub mod hunt;
pub mod market;

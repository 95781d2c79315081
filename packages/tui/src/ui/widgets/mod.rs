pub mod chat;
pub mod status_bar;

pub use chat::{ChatWidget, InputWidget};
pub use status_bar::StatusBarWidget;

pub mod chat;
pub mod editor;
pub mod explorer;

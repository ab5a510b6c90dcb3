pub mod chat;
pub mod feedback;
pub mod page;

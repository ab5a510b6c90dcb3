// Chat sessions: transcript ordering, persistence, and the generation round-trip.

pub mod handlers;
pub mod store;
pub mod transcript;

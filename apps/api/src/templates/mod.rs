// Template selection: catalog, business-type matcher, description scorer, resolver.
// Pure and synchronous: no I/O below the handlers.

pub mod catalog;
pub mod handlers;
pub mod matcher;
pub mod resolver;
pub mod scorer;

//! The in-memory catalog and the session that drives it.

pub mod session;
pub mod store;

pub use session::*;
pub use store::*;

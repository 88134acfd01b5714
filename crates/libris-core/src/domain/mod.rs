//! Domain models for libris
//!
//! The catalog entry and the inputs that create or change one.

pub mod book;

pub use book::*;

//! Catalog sources that produce book records

pub mod openlibrary;
pub mod traits;

pub use openlibrary::*;
pub use traits::*;

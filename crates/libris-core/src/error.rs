//! Crate-level error type

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::cover::CoverError;
use crate::sources::SourceError;

#[derive(Error, Debug)]
pub enum LibrisError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Cover(#[from] CoverError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, LibrisError>;

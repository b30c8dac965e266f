//! Crate error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("{kind} catalog is full (capacity {capacity})")]
    CatalogFull { kind: &'static str, capacity: usize },

    #[error("material {index} does not exist ({count} materials defined)")]
    UnknownMaterial { index: usize, count: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("bad value {value:?} for {key}: {reason}")]
    Config {
        key: &'static str,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

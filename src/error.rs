use crate::models::Role;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("no header column matches the `{0}` role")]
    MissingColumn(Role),
    #[error("failed to open input table {}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read input table")]
    InputRead(#[source] csv::Error),
    #[error("failed to write {target}")]
    OutputWrite {
        target: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to access configuration {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
    #[error("delimiter {0:?} is not a single ASCII character")]
    InvalidDelimiter(char),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Chart rendering failed: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("Invalid directory glob: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, StatsError>;

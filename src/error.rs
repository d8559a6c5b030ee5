use thiserror::Error;

#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Version resolution failed: {0}")]
    Resolution(String),

    #[error("Collection '{0}' is not listed in the manifest")]
    Lookup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, BumpError>;

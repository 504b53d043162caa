use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read workflow definition {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid JSON workflow definition: {0}")]
  Json(#[from] serde_json::Error),

  #[error("invalid YAML workflow definition: {0}")]
  Yaml(#[from] serde_yaml::Error),
}

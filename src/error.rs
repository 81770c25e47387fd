use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Failed to read server globals file: {}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("Failed to parse server globals file: {}", path.display())]
  Toml {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

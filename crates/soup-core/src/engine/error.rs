use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::pdb::PdbError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to read structure: {source}")]
    Parse {
        #[from]
        source: PdbError,
    },
}

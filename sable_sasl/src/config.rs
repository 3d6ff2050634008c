//! Configuration for the SASL relay

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::{fs::File, io::BufReader, path::Path, path::PathBuf, time::Duration};

/// Errors that could happen when loading a config
#[derive(Debug, Error)]
pub enum ConfigError
{
    #[error("I/O error on {1}: {0}")]
    IoError(std::io::Error, PathBuf),
    #[error("JSON parse error in {1}: {0}")]
    JsonError(serde_json::Error, PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SaslConfig
{
    /// Where outbound SASL messages are routed: a server name, or `*` to
    /// broadcast them to every server
    pub target: String,
    /// Seconds after which an unfinished session is aborted. Unset means
    /// sessions only end when the agent, the client or the connection ends them.
    pub session_timeout: Option<u64>,
}

impl Default for SaslConfig
{
    fn default() -> Self
    {
        Self {
            target: "*".to_string(),
            session_timeout: None,
        }
    }
}

impl SaslConfig
{
    /// Load the SASL configuration from a given file path
    pub fn load_file<P: AsRef<Path> + Copy>(filename: P) -> Result<Self, ConfigError>
    {
        let file = File::open(filename)
            .map_err(|e| ConfigError::IoError(e, filename.as_ref().to_owned()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| ConfigError::JsonError(e, filename.as_ref().to_owned()))
    }

    pub fn session_timeout(&self) -> Option<Duration>
    {
        self.session_timeout.map(Duration::from_secs)
    }
}

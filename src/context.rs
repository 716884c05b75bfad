//! Service context wiring a [`LinearClient`] to a live, recording or replaying transport.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::LiveTransport;
use crate::adapters::recording::RecordingTransport;
use crate::adapters::replaying::ReplayingTransport;
use crate::cassette::recorder::CassetteRecorder;
use crate::client::LinearClient;
use crate::config::Config;
use crate::error::Result;

/// Environment variable naming a cassette file to record the session into.
pub const RECORD_ENV: &str = "LCLI_RECORD";
/// Environment variable naming a cassette file to replay instead of calling Linear.
pub const REPLAY_ENV: &str = "LCLI_REPLAY";

/// Bundles the client with the configuration it was built from.
///
/// Constructors wire up different transport implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// Client for every Linear operation.
    pub client: LinearClient,
    /// Loaded configuration, for defaults such as the team ID.
    pub config: Config,
    /// Cassette recorder shared with the recording transport.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a context that talks to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns a config error if no API key is configured.
    pub fn live(config: Config) -> Result<Self> {
        let transport = LiveTransport::new(config.api_url(), config.api_key()?);
        let client = LinearClient::new(Box::new(transport), config.status_table());
        Ok(Self { client, config, recorder: None })
    }

    /// Creates a context that talks to the configured endpoint and records
    /// every exchange. Call [`ServiceContext::finish`] to write the cassette.
    ///
    /// # Errors
    ///
    /// Returns a config error if no API key is configured.
    pub fn recording(config: Config, path: &Path) -> Result<Self> {
        let live = LiveTransport::new(config.api_url(), config.api_key()?);
        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(path, "lcli-session", live.endpoint())));
        let transport = RecordingTransport::new(Box::new(live), Arc::clone(&recorder));
        let client = LinearClient::new(Box::new(transport), config.status_table());
        Ok(Self { client, config, recorder: Some(recorder) })
    }

    /// Creates a context served entirely from a cassette file. No API key is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(config: Config, path: &Path) -> std::result::Result<Self, String> {
        let transport = ReplayingTransport::load(path)?;
        let client = LinearClient::new(Box::new(transport), config.status_table());
        Ok(Self { client, config, recorder: None })
    }

    /// Picks the mode from `LCLI_REPLAY` / `LCLI_RECORD`, defaulting to live.
    ///
    /// # Errors
    ///
    /// Returns an error string if the selected mode cannot be set up.
    pub fn from_env(config: Config) -> std::result::Result<Self, String> {
        if let Some(path) = env_path(REPLAY_ENV) {
            log::debug!("replaying from {}", path.display());
            return Self::replaying(config, &path);
        }
        if let Some(path) = env_path(RECORD_ENV) {
            log::debug!("recording to {}", path.display());
            return Self::recording(config, &path).map_err(|e| e.to_string());
        }
        Self::live(config).map_err(|e| e.to_string())
    }

    /// Writes the cassette if this context was recording, returning its path.
    ///
    /// # Errors
    ///
    /// Returns an error string if the cassette cannot be written.
    pub fn finish(self) -> std::result::Result<Option<PathBuf>, String> {
        let Some(recorder) = self.recorder else {
            return Ok(None);
        };
        // Release the transport's handle on the recorder.
        drop(self.client);
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| "cassette recorder is still in use".to_string())?
            .into_inner()
            .map_err(|_| "cassette recorder lock poisoned".to_string())?;
        recorder
            .finish()
            .map(Some)
            .map_err(|e| format!("failed to write cassette: {e}"))
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::cassette::format::Cassette;
    use crate::error::Error;

    #[test]
    fn live_requires_api_key() {
        let err = ServiceContext::live(Config::default()).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn replaying_reports_missing_cassette() {
        let err = ServiceContext::replaying(Config::default(), Path::new("/nonexistent/x.yaml"))
            .err()
            .unwrap();
        assert!(err.contains("Failed to read cassette file"));
    }

    #[tokio::test]
    async fn recording_writes_cassette_on_finish() {
        let dir = std::env::temp_dir().join("lcli_context_recording_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("session.cassette.yaml");

        let mut config = Config::default();
        config.linear.api_key = "key".into();
        // Nothing listens on port 1, so the call fails and is recorded as an error.
        config.linear.api_url = "http://127.0.0.1:1/graphql".into();

        let ctx = ServiceContext::recording(config, &path).unwrap();
        let cancel = CancellationToken::new();
        assert!(ctx.client.teams(&cancel).await.is_err());

        let written = ctx.finish().unwrap().unwrap();
        assert_eq!(written, path);

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.endpoint, "http://127.0.0.1:1/graphql");
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].input["operation"], "Teams");
        assert!(cassette.interactions[0].output.get("Err").is_some());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn finish_without_recorder_is_a_no_op() {
        let mut config = Config::default();
        config.linear.api_key = "key".into();
        let ctx = ServiceContext::live(config).unwrap();
        assert_eq!(ctx.finish().unwrap(), None);
    }
}

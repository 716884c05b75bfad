//! Records interactions into a cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Accumulates interactions in call order and saves them as a YAML cassette.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Start a cassette named `name` for a session against `endpoint`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        let cassette = Cassette {
            name: name.into(),
            recorded_at: Utc::now(),
            endpoint: endpoint.into(),
            interactions: Vec::new(),
        };
        Self { path: path.into(), cassette }
    }

    /// Append an interaction; `seq` is its position in the cassette.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.cassette.interactions.last().map_or(0, |last| last.seq + 1);
        self.cassette.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cassette.interactions.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cassette.interactions.is_empty()
    }

    /// Save the cassette and return where it was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> std::io::Result<PathBuf> {
        self.cassette.save(&self.path)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_and_finish() {
        let dir = std::env::temp_dir().join("lcli_cassette_recorder_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("test.cassette.yaml");

        let mut recorder =
            CassetteRecorder::new(&path, "test-recording", "http://localhost/graphql");
        assert!(recorder.is_empty());
        recorder.record(
            "graphql",
            "execute",
            json!({"operation": "Teams"}),
            json!({"Ok": {"data": {}}}),
        );
        recorder.record(
            "graphql",
            "execute",
            json!({"operation": "FindTeams"}),
            json!({"Ok": {"data": {}}}),
        );
        assert_eq!(recorder.len(), 2);

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.name, "test-recording");
        assert_eq!(cassette.endpoint, "http://localhost/graphql");
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].seq, 0);
        assert_eq!(cassette.interactions[1].seq, 1);
        assert_eq!(cassette.interactions[1].input, json!({"operation": "FindTeams"}));

        let _ = std::fs::remove_dir_all(&dir);
    }
}

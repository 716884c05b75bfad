//! Replaying adapters that serve recorded interactions.

pub mod transport;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::format::Interaction;
use crate::cassette::replayer::CassetteReplayer;

pub use transport::ReplayingTransport;

/// Take the next interaction, recorded for `port`/`method`, from a shared replayer.
pub(crate) fn next_interaction(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Interaction {
    replayer.lock().expect("replayer lock poisoned").next_interaction(port, method)
}

/// Turn a recorded `{"Ok": v}` / `{"Err": e}` output back into a `Result`.
///
/// # Panics
///
/// Panics if the output follows neither convention or does not deserialize;
/// a cassette that cannot be read back is a broken fixture.
pub(crate) fn replay_result<T, E>(output: serde_json::Value) -> Result<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    if let Some(ok) = output.get("Ok") {
        return Ok(serde_json::from_value(ok.clone())
            .unwrap_or_else(|e| panic!("cassette Ok value does not deserialize: {e}")));
    }
    if let Some(err) = output.get("Err") {
        return Err(serde_json::from_value(err.clone())
            .unwrap_or_else(|e| panic!("cassette Err value does not deserialize: {e}")));
    }
    panic!("cassette output has neither Ok nor Err: {output}");
}

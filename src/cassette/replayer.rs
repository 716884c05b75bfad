//! Replays recorded interactions from a cassette.

use std::collections::VecDeque;

use super::format::{Cassette, Interaction};

/// Serves a cassette's interactions back in recorded order.
#[derive(Debug)]
pub struct CassetteReplayer {
    pending: VecDeque<Interaction>,
    served: usize,
}

impl CassetteReplayer {
    /// Create a replayer positioned at the cassette's first interaction.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        Self { pending: cassette.interactions.iter().cloned().collect(), served: 0 }
    }

    /// Take the next interaction, which must have been recorded for
    /// `port`/`method`.
    ///
    /// # Panics
    ///
    /// Panics if the cassette is exhausted or the next interaction belongs
    /// to a different port or method.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let Some(interaction) = self.pending.pop_front() else {
            panic!(
                "Cassette exhausted: {port}::{method} requested after all {} interactions \
                 were served",
                self.served
            );
        };
        assert!(
            interaction.port == port && interaction.method == method,
            "cassette out of order at seq={}: recorded {}::{}, requested {port}::{method}",
            interaction.seq,
            interaction.port,
            interaction.method,
        );
        self.served += 1;
        interaction
    }
}

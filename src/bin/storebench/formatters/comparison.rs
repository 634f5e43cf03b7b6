//! Relative speed of the two stores, as shown next to the raw timings

use std::fmt;
use storebench::BackendKind;

/// Which store finished first and by what factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    /// `winner` took `factor` times less time than the other store
    Faster { winner: BackendKind, factor: f64 },

    /// Both stores reported the same time
    Tie,

    /// One store reported zero time, so no finite factor exists
    Instant { winner: BackendKind },
}

impl Comparison {
    pub fn of(fast_ms: f64, persistent_ms: f64) -> Self {
        if fast_ms == persistent_ms {
            return Comparison::Tie;
        }

        let (winner, best, worst) = if fast_ms < persistent_ms {
            (BackendKind::Fast, fast_ms, persistent_ms)
        } else {
            (BackendKind::Persistent, persistent_ms, fast_ms)
        };

        if best <= 0.0 {
            Comparison::Instant { winner }
        } else {
            Comparison::Faster { winner, factor: worst / best }
        }
    }

    pub fn winner(&self) -> Option<BackendKind> {
        match self {
            Comparison::Faster { winner, .. } | Comparison::Instant { winner } => Some(*winner),
            Comparison::Tie => None,
        }
    }

    /// One-line description, e.g. "Fast store is 12.34x faster"
    pub fn describe(&self) -> String {
        match self {
            Comparison::Faster { winner, factor } => {
                format!("{} is {:.2}x faster", winner.label(), factor)
            }
            Comparison::Instant { winner } => {
                format!("{} finished in no measurable time", winner.label())
            }
            Comparison::Tie => "Both stores took the same time".to_string(),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

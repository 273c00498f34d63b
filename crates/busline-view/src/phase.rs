//! Result view phases and their legal transitions
//!
//! ```text
//! NoSelection ──select──▶ Loading ──resolve──▶ Empty | Populated
//!      ▲                    │  ▲                    │
//!      └──────clear─────────┘  └───select/refresh───┘
//! ```

use crate::error::ViewError;
use serde::{Deserialize, Serialize};

/// Renderable phase of the result area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultPhase {
    /// No line chosen; prompt the user
    NoSelection,
    /// Fetch for the chosen line is outstanding
    Loading,
    /// Fetch resolved with zero records
    Empty,
    /// Fetch resolved with at least one record
    Populated,
}

impl ResultPhase {
    /// All phases, for exhaustive checks
    pub const ALL: [ResultPhase; 4] = [
        ResultPhase::NoSelection,
        ResultPhase::Loading,
        ResultPhase::Empty,
        ResultPhase::Populated,
    ];
}

/// Validates a phase transition.
///
/// Illegal transitions are a bug in the caller and come back as an error.
/// The `strict-debug` feature turns them into a panic instead.
pub fn validate_transition(from: ResultPhase, to: ResultPhase) -> Result<(), ViewError> {
    if allowed(from, to) {
        Ok(())
    } else {
        #[cfg(feature = "strict-debug")]
        panic!("illegal result transition: {from:?} -> {to:?}");

        #[allow(unreachable_code)]
        Err(ViewError::IllegalTransition { from, to })
    }
}

pub fn allowed_transitions(from: ResultPhase) -> Vec<ResultPhase> {
    use ResultPhase::*;
    match from {
        NoSelection => vec![NoSelection, Loading],
        // Loading -> Loading is a category change while the previous fetch is outstanding
        Loading => vec![NoSelection, Loading, Empty, Populated],
        Empty => vec![NoSelection, Loading],
        Populated => vec![NoSelection, Loading],
    }
}

fn allowed(from: ResultPhase, to: ResultPhase) -> bool {
    allowed_transitions(from).into_iter().any(|p| p == to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn no_selection_only_moves_to_loading() {
        assert!(validate_transition(ResultPhase::NoSelection, ResultPhase::Loading).is_ok());
        assert!(!allowed(ResultPhase::NoSelection, ResultPhase::Empty));
        assert!(!allowed(ResultPhase::NoSelection, ResultPhase::Populated));
    }

    #[test]
    fn resolved_phases_restart_at_loading() {
        for from in [ResultPhase::Empty, ResultPhase::Populated] {
            assert!(allowed(from, ResultPhase::Loading));
            assert!(allowed(from, ResultPhase::NoSelection));
            assert!(!allowed(from, ResultPhase::Empty));
            assert!(!allowed(from, ResultPhase::Populated));
        }
    }

    #[test]
    fn every_phase_can_be_cleared() {
        for from in ResultPhase::ALL {
            assert!(allowed(from, ResultPhase::NoSelection), "{from:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_resolution_only_from_loading(
            from in prop::sample::select(ResultPhase::ALL.to_vec()),
            to in prop::sample::select(vec![ResultPhase::Empty, ResultPhase::Populated]),
        ) {
            prop_assert_eq!(allowed(from, to), from == ResultPhase::Loading);
        }
    }
}

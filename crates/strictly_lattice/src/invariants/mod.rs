//! First-class board invariants.
//!
//! Invariants are logical properties that must hold after every resolved
//! stroke. They are checked as stroke postconditions in debug builds and
//! can be tested independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let checks: [(fn(&S) -> bool, &'static str); 3] = [
            (I1::holds, I1::description()),
            (I2::holds, I2::description()),
            (I3::holds, I3::description()),
        ];
        let violations: Vec<InvariantViolation> = checks
            .iter()
            .filter(|(holds, _)| !holds(state))
            .map(|(_, description)| InvariantViolation::new(*description))
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod fill_consistency;
pub mod score_conservation;
pub mod shared_edge;

pub use fill_consistency::FillConsistencyInvariant;
pub use score_conservation::ScoreConservationInvariant;
pub use shared_edge::SharedEdgeInvariant;

/// All board invariants as a composable set.
pub type BoardInvariants = (
    ScoreConservationInvariant,
    FillConsistencyInvariant,
    SharedEdgeInvariant,
);

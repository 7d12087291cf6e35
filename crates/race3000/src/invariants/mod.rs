//! Properties every race must satisfy between operations.
//!
//! Each invariant is a unit type implementing [`Invariant`] for
//! [`crate::Race3000Game`]. The game checks [`RaceInvariants`] after
//! `start`, each turn, each hand-off and each removal in debug builds.

/// A property of `S` that must never be false.
pub trait Invariant<S> {
    /// True if `state` satisfies the property.
    fn holds(state: &S) -> bool;

    /// Sentence naming the property, used in violation reports.
    fn description() -> &'static str;
}

/// A broken invariant, as reported by [`InvariantSet::check_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Which property failed.
    pub description: String,
}

impl InvariantViolation {
    /// Wraps an invariant description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several invariants checked as one postcondition.
///
/// Tuples of [`Invariant`]s are sets; every member is checked even after
/// one fails so a report lists all broken properties at once.
pub trait InvariantSet<S> {
    /// Returns every violated member, or `Ok` if the whole set holds.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! tuple_invariant_set {
    ($($member:ident),+) => {
        impl<S, $($member),+> InvariantSet<S> for ($($member,)+)
        where
            $($member: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let violations: Vec<_> = [$(($member::holds(state), $member::description())),+]
                    .into_iter()
                    .filter(|(holds, _)| !holds)
                    .map(|(_, description)| InvariantViolation::new(description))
                    .collect();
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

tuple_invariant_set!(I1, I2);
tuple_invariant_set!(I1, I2, I3);

pub mod current_on_roster;
pub mod finish_means_empty;
pub mod unique_roster;

pub use current_on_roster::CurrentOnRosterInvariant;
pub use finish_means_empty::FinishMeansEmptyInvariant;
pub use unique_roster::UniqueRosterInvariant;

/// All race invariants as a composable set.
pub type RaceInvariants = (
    CurrentOnRosterInvariant,
    UniqueRosterInvariant,
    FinishMeansEmptyInvariant,
);

//! Geometry errors

use crate::float_types::Real;

/// Everything that can go wrong while generating ornament geometry.
///
/// All of these are deterministic functions of the input parameters: calling
/// again with the same arguments fails the same way.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// (ArchInfeasible) The arc radius is too small for the chord, the circles never meet above it
    #[error("(ArchInfeasible) radius {radius} is smaller than a quarter of the chord {chord}")]
    ArchInfeasible { radius: Real, chord: Real },

    /// (NegativeDomain) A square root or arccos argument fell below zero
    #[error("(NegativeDomain) {what} has a negative argument: {value}")]
    NegativeDomain { what: &'static str, value: Real },

    /// (CardinalityMismatch) Two boundary loops joined by index differ in length
    #[error("(CardinalityMismatch) cannot join loops of {outer} and {inner} points by index")]
    CardinalityMismatch { outer: usize, inner: usize },

    /// (TooFewPoints) A loop or arc has fewer than the minimal #points
    #[error("(TooFewPoints) expected at least {expected} points, found {found}")]
    TooFewPoints { expected: usize, found: usize },

    /// (InvalidParameter) A parameter is outside its valid range
    #[error("(InvalidParameter) {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: Real,
        reason: &'static str,
    },

    /// (DegenerateFoil) The foil circle is not wider than the band cut from it
    #[error("(DegenerateFoil) foil radius {foil_radius} does not exceed band width {width}")]
    DegenerateFoil { foil_radius: Real, width: Real },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GeometryError>;

impl GeometryError {
    pub(crate) const fn invalid(name: &'static str, value: Real, reason: &'static str) -> Self {
        GeometryError::InvalidParameter { name, value, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure_class() {
        let e = GeometryError::ArchInfeasible { radius: 0.1, chord: 1.0 };
        assert!(e.to_string().starts_with("(ArchInfeasible)"));

        let e = GeometryError::CardinalityMismatch { outer: 5, inner: 4 };
        assert_eq!(
            e.to_string(),
            "(CardinalityMismatch) cannot join loops of 5 and 4 points by index"
        );
    }
}

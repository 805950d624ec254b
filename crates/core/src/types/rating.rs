//! Review rating type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a rating value falls outside the 1-5 scale.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingError(pub u8);

/// A star rating on the 1-5 scale.
///
/// ## Examples
///
/// ```
/// use campus_canteen_core::Rating;
///
/// let rating = Rating::new(4).unwrap();
/// assert_eq!(rating.value(), 4);
///
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// The lowest allowed rating.
    pub const MIN: Self = Self(1);
    /// The highest allowed rating.
    pub const MAX: Self = Self(5);

    /// Create a rating, validating the 1-5 range.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError`] if `value` is 0 or greater than 5.
    pub const fn new(value: u8) -> Result<Self, RatingError> {
        if matches!(value, 1..=5) {
            Ok(Self(value))
        } else {
            Err(RatingError(value))
        }
    }

    /// Get the numeric value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_in_range() {
        for value in 1..=5 {
            assert_eq!(Rating::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn test_new_out_of_range() {
        assert_eq!(Rating::new(0), Err(RatingError(0)));
        assert_eq!(Rating::new(6), Err(RatingError(6)));
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let parsed: Result<Rating, _> = serde_json::from_str("7");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let rating = Rating::new(5).unwrap();
        let json = serde_json::to_string(&rating).unwrap();
        assert_eq!(json, "5");

        let parsed: Rating = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rating);
    }
}

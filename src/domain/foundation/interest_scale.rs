//! Interest scales used by the capture flow and the stored profile.
//!
//! The capture wizard asks for a rating on a 0-3 scale; the profile stores
//! a weight on a 0-4 scale per domain name.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Interest weight stored on the profile: 0 (none) to 4 (very strong).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct InterestWeight(u8);

impl InterestWeight {
    pub const MAX: u8 = 4;

    /// Creates a weight, returning error if above 4.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > Self::MAX {
            return Err(ValidationError::out_of_range(
                "interest_weight",
                0,
                i64::from(Self::MAX),
                i64::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the weight as a float for scoring.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<u8> for InterestWeight {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<InterestWeight> for u8 {
    fn from(w: InterestWeight) -> Self {
        w.0
    }
}

/// Rating captured by the interest wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum InterestRating {
    #[default]
    None = 0,
    Curious = 1,
    Interested = 2,
    Passionate = 3,
}

impl InterestRating {
    /// Creates a rating from an integer, returning error if out of range.
    pub fn try_from_u8(value: u8) -> Result<Self, ValidationError> {
        match value {
            0 => Ok(InterestRating::None),
            1 => Ok(InterestRating::Curious),
            2 => Ok(InterestRating::Interested),
            3 => Ok(InterestRating::Passionate),
            _ => Err(ValidationError::out_of_range(
                "interest_rating",
                0,
                3,
                i64::from(value),
            )),
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            InterestRating::None => "Not interested",
            InterestRating::Curious => "Curious",
            InterestRating::Interested => "Interested",
            InterestRating::Passionate => "Passionate",
        }
    }

    /// Profile weight for this rating. Positive ratings sit one step higher on
    /// the weight scale.
    pub fn to_weight(&self) -> InterestWeight {
        match self {
            InterestRating::None => InterestWeight(0),
            other => InterestWeight(other.value() + 1),
        }
    }
}

impl TryFrom<u8> for InterestRating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from_u8(value)
    }
}

impl From<InterestRating> for u8 {
    fn from(r: InterestRating) -> Self {
        r.value()
    }
}

impl fmt::Display for InterestRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_accepts_zero_through_four() {
        for v in 0..=4 {
            assert_eq!(InterestWeight::try_new(v).unwrap().value(), v);
        }
        assert!(InterestWeight::try_new(5).is_err());
    }

    #[test]
    fn weight_deserialization_is_validated() {
        assert!(serde_json::from_str::<InterestWeight>("3").is_ok());
        assert!(serde_json::from_str::<InterestWeight>("9").is_err());
    }

    #[test]
    fn rating_try_from_u8_rejects_invalid_values() {
        assert_eq!(InterestRating::try_from_u8(2).unwrap(), InterestRating::Interested);
        assert!(InterestRating::try_from_u8(4).is_err());
    }

    #[test]
    fn rating_to_weight_shifts_positive_ratings() {
        assert_eq!(InterestRating::None.to_weight().value(), 0);
        assert_eq!(InterestRating::Curious.to_weight().value(), 2);
        assert_eq!(InterestRating::Passionate.to_weight().value(), 4);
    }

    #[test]
    fn rating_serializes_as_number() {
        assert_eq!(serde_json::to_string(&InterestRating::Interested).unwrap(), "2");
    }
}

//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Percentage, returning error if out of range.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::out_of_range("progress", 0, 100, value));
        }
        Ok(Self(value as u8))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// True at 100%.
    pub fn is_complete(&self) -> bool {
        self.0 >= 100
    }

    /// Rounded mean of a set of percentages, halves rounding up. Zero for an empty set.
    pub fn rounded_mean<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Percentage>,
    {
        let (sum, count) = values
            .into_iter()
            .fold((0u64, 0u64), |(sum, count), p| (sum + u64::from(p.0), count + 1));
        if count == 0 {
            return Self::ZERO;
        }
        Self::new(((sum * 2 + count) / (count * 2)) as u8)
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<u32> for Percentage {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_new(i64::from(value))
    }
}

impl From<Percentage> for u32 {
    fn from(p: Percentage) -> Self {
        u32::from(p.0)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_new_clamps_to_100() {
        assert_eq!(Percentage::new(50).value(), 50);
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(255).value(), 100);
    }

    #[test]
    fn percentage_try_new_rejects_out_of_range() {
        assert!(Percentage::try_new(0).is_ok());
        assert!(Percentage::try_new(100).is_ok());
        assert!(Percentage::try_new(101).is_err());
        assert!(Percentage::try_new(-1).is_err());
    }

    #[test]
    fn rounded_mean_of_empty_is_zero() {
        assert_eq!(Percentage::rounded_mean(Vec::new()), Percentage::ZERO);
    }

    #[test]
    fn rounded_mean_rounds_half_up() {
        let values = [Percentage::new(0), Percentage::new(75)];
        // 37.5 -> 38
        assert_eq!(Percentage::rounded_mean(values).value(), 38);

        let values = [Percentage::new(10), Percentage::new(20), Percentage::new(20)];
        // 16.67 -> 17
        assert_eq!(Percentage::rounded_mean(values).value(), 17);
    }

    #[test]
    fn deserialization_rejects_values_over_100() {
        assert!(serde_json::from_str::<Percentage>("101").is_err());
        assert_eq!(serde_json::from_str::<Percentage>("42").unwrap().value(), 42);
    }

    #[test]
    fn percentage_displays_with_sign() {
        assert_eq!(format!("{}", Percentage::new(64)), "64%");
    }
}

//! Validated 1-10 pillar rating

use crate::limits::{RATING_MAX, RATING_MIN};
use crate::{Error, Result};

/// Tri-level classification of a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingBand {
    /// 1-3
    Low,
    /// 4-7
    Medium,
    /// 8-10
    High,
}

/// A pillar rating, guaranteed to be an integer in [1, 10]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(i64);

impl Rating {
    /// Validate and construct a rating
    pub fn new(value: i64) -> Result<Self> {
        if !(RATING_MIN..=RATING_MAX).contains(&value) {
            return Err(Error::InvalidInput(format!(
                "Rating must be between {} and {}",
                RATING_MIN, RATING_MAX
            )));
        }
        Ok(Rating(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_low(&self) -> bool {
        self.0 <= 3
    }

    pub fn is_medium(&self) -> bool {
        (4..=7).contains(&self.0)
    }

    pub fn is_high(&self) -> bool {
        self.0 >= 8
    }

    /// Band classification; the three bands partition [1, 10]
    pub fn band(&self) -> RatingBand {
        if self.is_low() {
            RatingBand::Low
        } else if self.is_medium() {
            RatingBand::Medium
        } else {
            RatingBand::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_one_through_ten() {
        for value in -5..=15 {
            let result = Rating::new(value);
            if (1..=10).contains(&value) {
                assert_eq!(result.unwrap().value(), value);
            } else {
                assert!(result.is_err(), "Rating {} should be rejected", value);
            }
        }
    }

    #[test]
    fn bands_partition_the_range() {
        for value in 1..=10 {
            let rating = Rating::new(value).unwrap();
            let flags = [rating.is_low(), rating.is_medium(), rating.is_high()];
            assert_eq!(
                flags.iter().filter(|&&f| f).count(),
                1,
                "Rating {} must be in exactly one band",
                value
            );
        }
        assert_eq!(Rating::new(3).unwrap().band(), RatingBand::Low);
        assert_eq!(Rating::new(4).unwrap().band(), RatingBand::Medium);
        assert_eq!(Rating::new(7).unwrap().band(), RatingBand::Medium);
        assert_eq!(Rating::new(8).unwrap().band(), RatingBand::High);
    }
}

//! Integer scores on the 0-100 scale

use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer score in `0..=100`
///
/// Used for three independent scales:
/// - verdict confidence (overall certainty in the status)
/// - per-source agreement (how strongly one source agrees or disagrees)
/// - per-source pertinence (topical relevance regardless of stance)
///
/// A highly pertinent source can have low agreement, i.e. a strong contradiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Upper bound of the scale
    pub const MAX: u8 = 100;

    /// The zero score
    pub const ZERO: Score = Score(0);

    /// Create a score, rejecting values above 100
    ///
    /// # Examples
    ///
    /// ```
    /// use factline_domain::Score;
    ///
    /// assert_eq!(Score::new(85).unwrap().value(), 85);
    /// assert!(Score::new(101).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self, String> {
        if value > Self::MAX {
            return Err(format!("score {} out of range [0, 100]", value));
        }
        Ok(Self(value))
    }

    /// Convert a model-produced number into a score
    ///
    /// Generation services frequently emit `85.0` where an integer was asked for,
    /// so integral floats are accepted. Fractional values are rounded to the
    /// nearest integer; non-finite and out-of-range values are rejected.
    pub fn from_f64(value: f64) -> Result<Self, String> {
        if !value.is_finite() {
            return Err(format!("score {} is not a finite number", value));
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(format!("score {} out of range [0, 100]", value));
        }
        Ok(Self(value.round() as u8))
    }

    /// Raw value
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Score {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(Score::new(0).is_ok());
        assert!(Score::new(100).is_ok());
        assert!(Score::new(101).is_err());
    }

    #[test]
    fn test_score_from_f64() {
        assert_eq!(Score::from_f64(85.0).unwrap().value(), 85);
        assert_eq!(Score::from_f64(72.6).unwrap().value(), 73);
        assert!(Score::from_f64(-1.0).is_err());
        assert!(Score::from_f64(100.5).is_err());
        assert!(Score::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_score_serde_rejects_out_of_range() {
        let ok: Score = serde_json::from_str("42").unwrap();
        assert_eq!(ok.value(), 42);
        assert!(serde_json::from_str::<Score>("140").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "42");
    }
}

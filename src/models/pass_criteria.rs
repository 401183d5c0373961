use std::fmt;

use thiserror::Error;

pub const DEFAULT_PASS_FRACTION: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid pass criteria: '{raw}'")]
pub struct PassCriteriaError {
    pub raw: String,
}

/// Minimum score ratio, always within `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PassCriteria(f64);

impl Default for PassCriteria {
    fn default() -> Self {
        Self(DEFAULT_PASS_FRACTION)
    }
}

impl PassCriteria {
    pub fn new(fraction: f64) -> Result<Self, PassCriteriaError> {
        if fraction.is_finite() && (0.0..=1.0).contains(&fraction) {
            Ok(Self(fraction))
        } else {
            Err(PassCriteriaError {
                raw: fraction.to_string(),
            })
        }
    }

    /// Parses what a user types at the prompt, e.g. `85`, `85%` or ` 72.5 % `.
    /// Blank input means the user backed out and yields `Ok(None)`.
    pub fn from_percent_input(raw: &str) -> Result<Option<Self>, PassCriteriaError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let number = trimmed.replacen('%', "", 1);
        let invalid = || PassCriteriaError {
            raw: trimmed.to_string(),
        };

        let percent: f64 = number.trim().parse().map_err(|_| invalid())?;
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(invalid());
        }

        Ok(Some(Self(percent / 100.0)))
    }

    pub fn from_stored(raw: &str) -> Result<Self, PassCriteriaError> {
        let fraction: f64 = raw.trim().parse().map_err(|_| PassCriteriaError {
            raw: raw.to_string(),
        })?;
        Self::new(fraction).map_err(|_| PassCriteriaError {
            raw: raw.to_string(),
        })
    }

    pub fn to_stored(self) -> String {
        self.fraction().to_string()
    }

    pub fn fraction(self) -> f64 {
        self.0
    }

    pub fn percent(self) -> f64 {
        self.fraction() * 100.0
    }

    pub fn is_met_by(self, score: f64) -> bool {
        score >= self.fraction()
    }
}

impl fmt::Display for PassCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = self.percent();
        if (percent - percent.round()).abs() < 1e-9 {
            write!(f, "{:.0}%", percent)
        } else {
            write!(f, "{:.2}%", percent)
        }
    }
}

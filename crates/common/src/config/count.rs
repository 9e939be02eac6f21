//! Optional upper bounds

use crate::errors::{Result, SapError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A limit that is either absent or a non-negative bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Count {
    #[default]
    Unlimited,
    Bounded(usize),
}

impl Count {
    /// Build a bounded count, rejecting negative values
    pub fn bounded(value: i64) -> Result<Self> {
        usize::try_from(value)
            .map(Count::Bounded)
            .map_err(|_| SapError::InvalidConfiguration {
                message: format!("bound must not be negative, got {}", value),
            })
    }

    /// Translate a user supplied value: absent, zero or negative is unlimited
    pub fn from_cli(value: Option<i64>) -> Self {
        match value {
            Some(n) if n > 0 => Count::Bounded(n as usize),
            _ => Count::Unlimited,
        }
    }

    /// The bound, if any
    pub fn limit(self) -> Option<usize> {
        match self {
            Count::Unlimited => None,
            Count::Bounded(n) => Some(n),
        }
    }

    pub fn is_unlimited(self) -> bool {
        matches!(self, Count::Unlimited)
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Unlimited => f.write_str("unlimited"),
            Count::Bounded(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_rejects_negative() {
        assert!(matches!(
            Count::bounded(-3),
            Err(SapError::InvalidConfiguration { .. })
        ));
        assert_eq!(Count::bounded(0).unwrap(), Count::Bounded(0));
        assert_eq!(Count::bounded(12).unwrap(), Count::Bounded(12));
    }

    #[test]
    fn test_from_cli_convention() {
        assert_eq!(Count::from_cli(None), Count::Unlimited);
        assert_eq!(Count::from_cli(Some(-1)), Count::Unlimited);
        assert_eq!(Count::from_cli(Some(0)), Count::Unlimited);
        assert_eq!(Count::from_cli(Some(5)), Count::Bounded(5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Count::Unlimited.to_string(), "unlimited");
        assert_eq!(Count::Bounded(3).to_string(), "3");
        assert_eq!(Count::Bounded(3).limit(), Some(3));
        assert_eq!(Count::Unlimited.limit(), None);
    }
}

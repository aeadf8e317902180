use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use crate::error::{Result, SquadOptError};

/// Player price in integer tenths of a currency unit (`now_cost` on the wire).
///
/// Budgets are converted into the same unit so the budget constraint is an
/// exact integer comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cost(i64);

const TENTHS_PER_UNIT: f64 = 10.0;

impl Cost {
    pub const ZERO: Cost = Cost(0);

    pub const fn from_tenths(tenths: i64) -> Self {
        Cost(tenths)
    }

    pub const fn tenths(&self) -> i64 {
        self.0
    }

    /// Convert a budget in currency units (e.g. 100.0) to tenths.
    /// Rounds down, so a budget is never widened by float noise.
    pub fn from_budget(budget: f64) -> Result<Self> {
        if !budget.is_finite() || budget <= 0.0 {
            return Err(SquadOptError::Range(format!(
                "Budget must be positive, got {}",
                budget
            )));
        }
        let tenths = (budget * TENTHS_PER_UNIT + 1e-9).floor();
        if tenths > i64::MAX as f64 {
            return Err(SquadOptError::Range(format!("Budget too large: {}", budget)));
        }
        Ok(Cost(tenths as i64))
    }

    /// Value in currency units
    pub fn to_units(&self) -> f64 {
        self.0 as f64 / TENTHS_PER_UNIT
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn saturating_sub(self, other: Cost) -> Cost {
        Cost(self.0.saturating_sub(other.0))
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, other: Cost) -> Cost {
        Cost(self.0 + other.0)
    }
}

impl Sub for Cost {
    type Output = Cost;

    fn sub(self, other: Cost) -> Cost {
        Cost(self.0 - other.0)
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::ZERO, |acc, c| acc + c)
    }
}

impl<'a> Sum<&'a Cost> for Cost {
    fn sum<I: Iterator<Item = &'a Cost>>(iter: I) -> Cost {
        iter.copied().sum()
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}m", self.to_units())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_conversion() {
        assert_eq!(Cost::from_budget(100.0).unwrap(), Cost::from_tenths(1000));
        assert_eq!(Cost::from_budget(83.5).unwrap(), Cost::from_tenths(835));
        // 0.1 * 3 is 0.30000000000000004 in binary; still three tenths
        assert_eq!(Cost::from_budget(0.1 * 3.0).unwrap(), Cost::from_tenths(3));
        // Partial tenths are dropped
        assert_eq!(Cost::from_budget(99.99).unwrap(), Cost::from_tenths(999));
    }

    #[test]
    fn test_invalid_budget() {
        assert!(matches!(Cost::from_budget(0.0), Err(SquadOptError::Range(_))));
        assert!(matches!(Cost::from_budget(-10.0), Err(SquadOptError::Range(_))));
        assert!(matches!(Cost::from_budget(f64::NAN), Err(SquadOptError::Range(_))));
    }

    #[test]
    fn test_sum_and_display() {
        let total: Cost = [45, 50, 125].iter().map(|t| Cost::from_tenths(*t)).sum();
        assert_eq!(total.tenths(), 220);
        assert_eq!(total.to_units(), 22.0);
        assert_eq!(total.to_string(), "22.0m");
    }
}

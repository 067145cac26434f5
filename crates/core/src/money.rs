//! Money value used for line item costs and totals.
//!
//! Costs are pound amounts held as `Decimal` at two decimal places, so totals
//! are exact sums (no float drift between the CSV and document exports).

use core::iter::Sum;
use core::ops::{Add, Sub};
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Number of decimal places kept for every cost.
pub const COST_SCALE: u32 = 2;

/// A pound amount rounded to pennies.
///
/// Serialized as a two-decimal string (`"25.50"`).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(Decimal);

impl Cost {
    pub const ZERO: Cost = Cost(Decimal::ZERO);

    /// Largest single cost accepted from input: `999999999.99`.
    ///
    /// Item counts are bounded by `u32` sequence numbers, so totals of capped
    /// costs stay far inside `Decimal` range.
    pub const MAX: Cost = Cost(Decimal::from_parts(0x4876_E7FF, 0x17, 0, false, COST_SCALE));

    /// Round to pennies (midpoint away from zero) and wrap.
    pub fn new(amount: Decimal) -> Self {
        let mut rounded =
            amount.round_dp_with_strategy(COST_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(COST_SCALE);
        Self(rounded)
    }

    /// Build from a whole number of pennies (`from_pennies(2550)` is `25.50`).
    pub fn from_pennies(pennies: i64) -> Self {
        Self(Decimal::new(pennies, COST_SCALE))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// `None` if the sum does not fit in a `Decimal`.
    pub fn checked_add(self, rhs: Cost) -> Option<Cost> {
        self.0.checked_add(rhs.0).map(Cost)
    }

    pub fn checked_sub(self, rhs: Cost) -> Option<Cost> {
        self.0.checked_sub(rhs.0).map(Cost)
    }

    /// Amount truncated toward zero to whole pounds (`25.99` becomes `25`).
    pub fn truncated(&self) -> Decimal {
        self.0.trunc().normalize()
    }
}

impl core::fmt::Display for Cost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut shown = self.0;
        shown.rescale(COST_SCALE);
        core::fmt::Display::fmt(&shown, f)
    }
}

impl FromStr for Cost {
    type Err = DomainError;

    /// Accepts `25`, `25.5`, `£25.50` (surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw.strip_prefix('£').unwrap_or(raw).trim();
        if raw.is_empty() {
            return Err(DomainError::validation("cost is required"));
        }
        let amount = Decimal::from_str(raw)
            .map_err(|e| DomainError::validation(format!("invalid cost '{raw}': {e}")))?;
        if amount.abs() > Cost::MAX.0 {
            return Err(too_large());
        }
        let cost = Self::new(amount);
        if cost.0.abs() > Cost::MAX.0 {
            return Err(too_large());
        }
        Ok(cost)
    }
}

fn too_large() -> DomainError {
    DomainError::validation(format!("cost must not exceed {}", Cost::MAX))
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::str::deserialize(deserializer).map(Cost::new)
    }
}

impl From<Decimal> for Cost {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

/// Saturates at the `Decimal` bounds; use [`Cost::checked_add`] to detect overflow.
impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        Cost(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Cost {
    type Output = Cost;

    fn sub(self, rhs: Cost) -> Cost {
        Cost(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Cost> for Cost {
    fn sum<I: Iterator<Item = &'a Cost>>(iter: I) -> Cost {
        iter.copied().sum()
    }
}

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::ClientError;

const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Largest amount a single transaction may carry, in currency units.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

/// An exact decimal amount of money.
///
/// Amounts are written to storage as plain JSON numbers (`42.15`) and read
/// back through their shortest decimal form, so a stored `12.345` stays
/// `12.345` and sums never accumulate binary floating-point error. Rounding
/// to cents happens only when formatting for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn from_minor_units(minor_units: i64) -> Self {
        Self(Decimal::new(minor_units, DISPLAY_DECIMAL_PLACES))
    }

    /// Converts a decimal amount in currency units without rounding.
    pub fn from_units(units: f64) -> Option<Self> {
        if !units.is_finite() {
            return None;
        }
        // `f64` Display is the shortest string that reads back as the same
        // value, which is the decimal the amount was written as.
        Decimal::from_str(&units.to_string()).ok().map(Self)
    }

    /// The largest amount [`Money::exceeds_limit`] accepts.
    pub fn max_amount() -> Self {
        Self(Decimal::from(MAX_AMOUNT_UNITS))
    }

    pub fn exceeds_limit(self) -> bool {
        self > Self::max_amount()
    }

    /// The nearest `f64`, parsed from the exact decimal digits.
    pub fn to_units(self) -> f64 {
        self.0.to_string().parse().unwrap_or_default()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// `$12.34`, or `-$12.34` for negative amounts.
    pub fn format_currency(self) -> String {
        if self.is_negative() {
            format!("-${}", Money(-self.0))
        } else {
            format!("${self}")
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{rounded:.2}")
    }
}

/// Saturates at the decimal range instead of overflowing.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.to_units())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let units = f64::deserialize(deserializer)?;
        Money::from_units(units)
            .ok_or_else(|| de::Error::custom(format!("amount `{units}` is out of range")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TransactionType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ClientError::invalid_transaction_type(value))
    }
}

/// Closed set of expense categories. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Shopping,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Utilities => "utilities",
            Category::Shopping => "shopping",
            Category::Other => "other",
        }
    }

    /// Capitalized name for chart labels.
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ClientError::invalid_category(value))
    }
}

/// One recorded income or expense event. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    pub date: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with the sign the ledger view shows: `+$10.00` or `-$4.50`.
    pub fn signed_display_amount(&self) -> String {
        let prefix = if self.is_income() { '+' } else { '-' };
        format!("{prefix}${}", self.amount)
    }
}

/// Input accepted by [`crate::ledger::Ledger::add`]. Built by
/// [`crate::validate::validate_new_transaction`], which guarantees a
/// non-empty description and a positive amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Money,
    pub kind: TransactionType,
    pub category: Category,
}

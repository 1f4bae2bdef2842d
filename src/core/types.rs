use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount overflow: {0}")]
    Overflow(String),
}

/// Fixed-point decimal with exactly eight fractional digits.
///
/// Always rendered zero-padded to the full scale, never in exponent form, so
/// the string that goes into a signed request is stable. Values whose
/// magnitude leaves no room for eight fractional digits are rejected, and
/// arithmetic is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(Decimal);

impl Amount {
    pub const SCALE: u32 = 8;

    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, Self::SCALE));

    /// Round half away from zero to the fixed scale; `None` if the result
    /// cannot carry all eight fractional digits.
    fn fixed(value: Decimal) -> Option<Self> {
        let mut value =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(Self::SCALE);
        (value.scale() == Self::SCALE).then_some(Self(value))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).and_then(Self::fixed)
    }

    /// Product rounded half away from zero to eight places.
    pub fn checked_mul(self, other: Self) -> Option<Self> {
        self.0.checked_mul(other.0).and_then(Self::fixed)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for Amount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let valid = !trimmed.is_empty()
            && trimmed
                .strip_prefix('-')
                .unwrap_or(trimmed)
                .chars()
                .all(|c| c.is_ascii_digit() || c == '.');
        if !valid {
            return Err(TypesError::InvalidAmount(s.to_string()));
        }
        if let Some((_, fraction)) = trimmed.split_once('.') {
            if fraction.len() > Self::SCALE as usize {
                return Err(TypesError::InvalidAmount(format!(
                    "{} has more than {} fractional digits",
                    s,
                    Self::SCALE
                )));
            }
        }
        let value = Decimal::from_str_exact(trimmed)
            .map_err(|e| TypesError::InvalidAmount(format!("{s}: {e}")))?;
        Self::fixed(value).ok_or_else(|| {
            TypesError::InvalidAmount(format!(
                "{} is too large to hold {} fractional digits",
                s,
                Self::SCALE
            ))
        })
    }
}

impl TryFrom<String> for Amount {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed enum with a static wire table; unknown strings map to the `NONE` sentinel.
pub trait WireEnum: Copy + PartialEq + Sized + 'static {
    const NONE: Self;
    const TABLE: &'static [(Self, &'static str)];

    fn as_wire(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(variant, _)| *variant == self)
            .map_or("NONE", |(_, name)| *name)
    }

    fn from_wire(s: &str) -> Self {
        Self::TABLE
            .iter()
            .find(|(_, name)| *name == s)
            .map_or(Self::NONE, |(variant, _)| *variant)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    None,
    Buy,
    Sell,
}

impl WireEnum for Side {
    const NONE: Self = Self::None;
    const TABLE: &'static [(Self, &'static str)] =
        &[(Self::None, "NONE"), (Self::Buy, "BUY"), (Self::Sell, "SELL")];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    None,
    New,
    Filled,
    Canceled,
}

impl WireEnum for OrderStatus {
    const NONE: Self = Self::None;
    const TABLE: &'static [(Self, &'static str)] = &[
        (Self::None, "NONE"),
        (Self::New, "NEW"),
        (Self::Filled, "FILLED"),
        (Self::Canceled, "CANCELED"),
    ];
}

macro_rules! wire_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_wire())
                }
            }

            impl FromStr for $ty {
                type Err = std::convert::Infallible;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Ok(Self::from_wire(s))
                }
            }
        )*
    };
}

wire_display!(Side, OrderStatus);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Order {
    pub symbol: String,
    pub order_id: u64,
    pub price: Amount,
    pub quantity: Amount,
    pub side: Side,
    pub status: OrderStatus,
    /// Milliseconds since epoch; 0 when the response carried no time field.
    pub timestamp: u64,
}

impl Order {
    /// Caller-side placeholder for a new limit order; the exchange assigns the rest.
    pub fn limit(symbol: impl Into<String>, side: Side, price: Amount, quantity: Amount) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            price,
            quantity,
            ..Self::default()
        }
    }

    pub fn notional(&self) -> Result<Amount, TypesError> {
        self.price.checked_mul(self.quantity).ok_or_else(|| {
            TypesError::Overflow(format!("{} x {}", self.price, self.quantity))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BalanceEntry {
    pub free: Amount,
    pub locked: Amount,
}

impl BalanceEntry {
    pub fn is_zero(&self) -> bool {
        self.free.is_zero() && self.locked.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Balance {
    entries: BTreeMap<String, BalanceEntry>,
}

impl Balance {
    pub fn set(&mut self, asset: impl Into<String>, entry: BalanceEntry) {
        self.entries.insert(asset.into(), entry);
    }

    /// Zeroed entry for assets the account does not hold.
    pub fn get(&self, asset: &str) -> BalanceEntry {
        self.entries.get(asset).copied().unwrap_or_default()
    }

    pub fn assets(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BalanceEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fees paid per asset, summed across every fill of an order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commission {
    entries: BTreeMap<String, Amount>,
}

impl Commission {
    /// Fails without changing the stored total if the sum overflows.
    pub fn add(&mut self, asset: impl Into<String>, amount: Amount) -> Result<(), TypesError> {
        let asset = asset.into();
        let total = self.get(&asset).checked_add(amount).ok_or_else(|| {
            TypesError::Overflow(format!("commission total for {}", asset))
        })?;
        self.entries.insert(asset, total);
        Ok(())
    }

    pub fn get(&self, asset: &str) -> Amount {
        self.entries.get(asset).copied().unwrap_or_default()
    }

    pub fn assets(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Amount)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Permissive conversions used when mapping exchange payloads.
pub mod conversion {
    use super::Amount;

    /// Absent or unparseable amounts fall back to zero.
    #[inline]
    pub fn string_to_amount(s: Option<&str>) -> Amount {
        s.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

use crate::core::types::{Amount, OrderStatus, Side, WireEnum};
use std::fmt::Write as _;

/// Renders a value in the canonical form used on the wire.
pub trait ParamValue {
    fn to_param(&self) -> String;
}

impl ParamValue for bool {
    fn to_param(&self) -> String {
        if *self { "true" } else { "false" }.to_string()
    }
}

macro_rules! integer_param {
    ($($ty:ty),*) => {
        $(
            impl ParamValue for $ty {
                fn to_param(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_param!(u16, u32, u64, i32, i64, usize);

impl ParamValue for str {
    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for String {
    fn to_param(&self) -> String {
        self.clone()
    }
}

impl ParamValue for Amount {
    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for Side {
    fn to_param(&self) -> String {
        self.as_wire().to_string()
    }
}

impl ParamValue for OrderStatus {
    fn to_param(&self) -> String {
        self.as_wire().to_string()
    }
}

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param(&self) -> String {
        (**self).to_param()
    }
}

/// Ordered `key=value` pairs joined with `&`.
///
/// Insertion order is preserved exactly: the serialized string is what gets
/// signed and what gets sent. Keys are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    serialized: String,
    len: usize,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, value: impl ParamValue) -> &mut Self {
        if !self.serialized.is_empty() {
            self.serialized.push('&');
        }
        let _ = write!(self.serialized, "{}={}", key, value.to_param());
        self.len += 1;
        self
    }

    /// Chaining form of [`ParamSet::add`].
    pub fn with(mut self, key: &str, value: impl ParamValue) -> Self {
        self.add(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    pub fn into_string(self) -> String {
        self.serialized
    }
}

/// Ordered header lines, rendered as `Name: value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, value: impl ParamValue) -> &mut Self {
        self.entries.push((name.to_string(), value.to_param()));
        self
    }

    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn lines(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("{k}: {v}")).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_preserve_order() {
        let params = ParamSet::new()
            .with("symbol", "VETUSDT")
            .with("orderId", 5_u64)
            .with("omitZeroBalances", true)
            .with("price", "0.027".parse::<Amount>().unwrap());

        assert_eq!(
            params.as_str(),
            "symbol=VETUSDT&orderId=5&omitZeroBalances=true&price=0.02700000"
        );
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_params_empty() {
        let mut params = ParamSet::new();
        assert!(params.is_empty());
        assert_eq!(params.as_str(), "");

        params.add("side", Side::Buy);
        assert!(!params.is_empty());
        assert_eq!(params.as_str(), "side=BUY");
    }

    #[test]
    fn test_duplicate_keys_are_kept() {
        let params = ParamSet::new().with("a", 1_i32).with("a", 2_i32);
        assert_eq!(params.as_str(), "a=1&a=2");
    }

    #[test]
    fn test_header_lines() {
        let mut headers = HeaderSet::new();
        headers
            .add("Accept", "application/json")
            .add("X-MBX-APIKEY", "key");
        assert_eq!(
            headers.lines(),
            vec!["Accept: application/json", "X-MBX-APIKEY: key"]
        );
        assert_eq!(headers.get("x-mbx-apikey"), Some("key"));
    }
}

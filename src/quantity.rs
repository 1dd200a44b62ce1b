//! Per-medicine quantity selector used before adding to the cart.

use std::num::IntErrorKind;

/// Bounded counter over `[1, stock]`.
///
/// A medicine with zero stock has no selector at all: [`QuantitySelector::new`] returns
/// `None`, which is how "out of stock" is represented instead of a zero quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantitySelector {
    value: u32,
    stock: u32,
}

impl QuantitySelector {
    pub fn new(stock: u32) -> Option<Self> {
        (stock > 0).then_some(Self { value: 1, stock })
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn at_max(&self) -> bool {
        self.value >= self.stock
    }

    pub fn at_min(&self) -> bool {
        self.value <= 1
    }

    /// Returns `false` when already at the stock limit.
    pub fn increment(&mut self) -> bool {
        if self.at_max() {
            return false;
        }
        self.value += 1;
        true
    }

    /// Returns `false` when already at 1.
    pub fn decrement(&mut self) -> bool {
        if self.at_min() {
            return false;
        }
        self.value -= 1;
        true
    }

    /// Applies typed input. The leading integer is used, so `"4abc"` reads as 4 and `"2.5"`
    /// as 2; it is clamped into range, and input with no leading digits becomes 1.
    pub fn set_input(&mut self, input: &str) -> u32 {
        self.value = clamp(leading_integer(input, self.stock), self.stock);
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 1;
    }

    /// Rebinds the selector to a freshly fetched stock level, keeping the chosen value
    /// when it still fits.
    pub fn with_stock(self, stock: u32) -> Option<Self> {
        let mut selector = Self::new(stock)?;
        selector.value = self.value.min(stock);
        Some(selector)
    }
}

fn leading_integer(input: &str, stock: u32) -> i64 {
    let input = input.trim_start();
    let (negative, rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow && !negative => i64::from(stock),
        Err(_) => 1,
    }
}

fn clamp(requested: i64, stock: u32) -> u32 {
    requested.clamp(1, i64::from(stock.max(1))) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_stock_has_no_selector() {
        assert!(QuantitySelector::new(0).is_none());
        assert_eq!(QuantitySelector::new(3).map(|s| s.value()), Some(1));
    }

    #[test]
    fn test_increment_stops_at_stock() {
        let mut selector = QuantitySelector::new(2).unwrap();
        assert!(selector.increment());
        assert!(!selector.increment());
        assert_eq!(selector.value(), 2);
        assert!(selector.at_max());
    }

    #[test]
    fn test_decrement_stops_at_one() {
        let mut selector = QuantitySelector::new(5).unwrap();
        assert!(!selector.decrement());
        assert_eq!(selector.value(), 1);
    }

    #[test]
    fn test_direct_input_is_clamped_or_coerced() {
        let mut selector = QuantitySelector::new(10).unwrap();

        assert_eq!(selector.set_input("7"), 7);
        assert_eq!(selector.set_input(" 42 "), 10);
        assert_eq!(selector.set_input("0"), 1);
        assert_eq!(selector.set_input("-3"), 1);
        assert_eq!(selector.set_input("abc"), 1);
        assert_eq!(selector.set_input(""), 1);
        assert_eq!(selector.set_input("99999999999999999999999"), 10);
        assert_eq!(selector.set_input("-99999999999999999999999"), 1);
    }

    #[test]
    fn test_input_uses_leading_integer() {
        let mut selector = QuantitySelector::new(10).unwrap();

        assert_eq!(selector.set_input("2.5"), 2);
        assert_eq!(selector.set_input("4abc"), 4);
        assert_eq!(selector.set_input("+6 pills"), 6);
        assert_eq!(selector.set_input("x4"), 1);
        assert_eq!(selector.set_input("0.9"), 1);
    }

    #[test]
    fn test_bounds_hold_over_any_sequence() {
        let mut selector = QuantitySelector::new(3).unwrap();
        let inputs = ["2", "x", "1000", "-1", "3"];

        for step in 0..50 {
            match step % 4 {
                0 => {
                    selector.increment();
                }
                1 => {
                    selector.decrement();
                }
                2 => {
                    selector.set_input(inputs[step % inputs.len()]);
                }
                _ => {
                    selector.increment();
                    selector.increment();
                }
            }
            assert!((1..=3).contains(&selector.value()), "step {step}: {selector:?}");
        }
    }

    #[test]
    fn test_with_stock_keeps_value_when_it_fits() {
        let mut selector = QuantitySelector::new(10).unwrap();
        selector.set_input("6");

        assert_eq!(selector.with_stock(8).map(|s| s.value()), Some(6));
        assert_eq!(selector.with_stock(4).map(|s| s.value()), Some(4));
        assert_eq!(selector.with_stock(0), None);
    }

    #[test]
    fn test_reset_returns_to_one() {
        let mut selector = QuantitySelector::new(4).unwrap();
        selector.set_input("4");
        selector.reset();
        assert_eq!(selector.value(), 1);
    }
}

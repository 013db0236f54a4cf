//! # Quantity Input
//!
//! Turning typed text into quantities is a view concern: the cart only ever
//! sees integers.
//!
//! ## Parsing Rules
//! ```text
//! "5"      → 5        leading integer is taken
//! "  12ab" → 12       trailing junk ignored, leading whitespace skipped
//! "3.7"    → 3        fraction dropped
//! "abc"    → 0        non-numeric becomes 0
//! "-4"     → 0        negatives floor to 0
//! ""       → 0
//! ```

/// Parses a typed quantity, never returning a negative value.
pub fn parse_quantity_input(raw: &str) -> i64 {
    let text = raw.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if !seen_digit || negative {
        return 0;
    }
    value
}

/// The `- [n] +` stepper on a product card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantityPicker {
    value: i64,
}

impl QuantityPicker {
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn increment(&mut self) {
        self.value = self.value.saturating_add(1);
    }

    /// Steps down, stopping at 0.
    pub fn decrement(&mut self) {
        self.value = (self.value - 1).max(0);
    }

    /// Replaces the value with parsed typed input.
    pub fn set_from_input(&mut self, raw: &str) {
        self.value = parse_quantity_input(raw);
    }
}

//! # Amount to Words
//!
//! Converts a cheque amount into the English wording printed on the
//! "amount in words" line, e.g. `12345.67 AED` becomes
//! `Twelve thousand three hundred forty five UAE Dirhams and Sixty seven Cents`.
//!
//! ## Rules
//!
//! | Input | Output |
//! |-------|--------|
//! | unparseable or negative | `""` |
//! | exactly zero | `Zero <Currency>` |
//! | whole amount | `<Words> <Currency>` |
//! | amount with cents | `<Words> <Currency> and <CentWords> Cents` |
//!
//! The fraction is read as cents: it is truncated or zero-padded to two
//! digits, never rounded. Conversion never fails; every bad input yields
//! an empty string so the words line simply renders blank.

mod currency;

pub use currency::{CURRENCIES, currency_name};

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Scale names for each group of three digits. Seven groups cover `u64::MAX`.
const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

/// An amount as handed over by a form: either a number or the raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u64> for AmountInput {
    fn from(value: u64) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i32> for AmountInput {
    fn from(value: i32) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for AmountInput {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

/// An amount split into its whole units and two-digit cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SplitAmount {
    whole: u64,
    cents: u8,
}

impl SplitAmount {
    fn is_zero(&self) -> bool {
        self.whole == 0 && self.cents == 0
    }
}

/// Parse an amount with standard decimal parsing, then split it textually
/// so the cents are truncated rather than rounded.
fn split_amount(input: &AmountInput) -> Option<SplitAmount> {
    let text = match input {
        AmountInput::Number(v) => format!("{}", v),
        AmountInput::Text(s) => s.trim().to_string(),
    };

    let value: f64 = text.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    // f64's Display never uses an exponent, so reformatting gives plain digits.
    let plain = if text.contains(['e', 'E']) {
        format!("{}", value)
    } else {
        text
    };
    let plain = plain.trim_start_matches(['+', '-']);

    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain, ""));
    let whole = if int_part.is_empty() {
        0
    } else {
        int_part.parse::<u64>().ok()?
    };
    let cents: String = frac_part
        .chars()
        .chain(std::iter::repeat('0'))
        .take(2)
        .collect();
    let cents = cents.parse::<u8>().ok()?;

    Some(SplitAmount { whole, cents })
}

/// Words for 1..=999.
fn hundreds_to_words(n: u16) -> String {
    let mut words: Vec<&str> = Vec::new();
    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;

    if hundreds > 0 {
        words.push(ONES[hundreds]);
        words.push("hundred");
    }
    if rest >= 20 {
        words.push(TENS[rest / 10]);
        if rest % 10 > 0 {
            words.push(ONES[rest % 10]);
        }
    } else if rest > 0 {
        words.push(ONES[rest]);
    }

    words.join(" ")
}

/// Convert an integer to lowercase English words without separators.
///
/// ```
/// use chequebook::words::integer_to_words;
///
/// assert_eq!(integer_to_words(0), "zero");
/// assert_eq!(integer_to_words(15000), "fifteen thousand");
/// assert_eq!(integer_to_words(1_000_021), "one million twenty one");
/// ```
pub fn integer_to_words(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    let mut scale = 0;
    while rest > 0 {
        let chunk = (rest % 1000) as u16;
        if chunk > 0 {
            let mut words = hundreds_to_words(chunk);
            if scale > 0 {
                words.push(' ');
                words.push_str(SCALES[scale]);
            }
            groups.push(words);
        }
        rest /= 1000;
        scale += 1;
    }

    groups.reverse();
    groups.join(" ")
}

fn capitalize(words: &str) -> String {
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert an amount to words with its currency name and a cents clause.
///
/// ```
/// use chequebook::words::to_words;
///
/// assert_eq!(to_words("1000", "USD"), "One thousand US Dollars");
/// assert_eq!(
///     to_words("12345.67", "AED"),
///     "Twelve thousand three hundred forty five UAE Dirhams and Sixty seven Cents"
/// );
/// assert_eq!(to_words("-5", "USD"), "");
/// ```
pub fn to_words(amount: impl Into<AmountInput>, currency: &str) -> String {
    let Some(split) = split_amount(&amount.into()) else {
        return String::new();
    };
    let name = currency_name(currency);

    if split.is_zero() {
        return format!("Zero {}", name);
    }

    let whole = capitalize(&integer_to_words(split.whole));
    if split.cents == 0 {
        format!("{} {}", whole, name)
    } else {
        let cents = capitalize(&integer_to_words(split.cents as u64));
        format!("{} {} and {} Cents", whole, name, cents)
    }
}

/// Convert only the whole part of an amount to words, with no cents clause.
///
/// ```
/// use chequebook::words::to_words_whole;
///
/// assert_eq!(to_words_whole("250.75", "KWD"), "Two hundred fifty Kuwaiti Dinars");
/// ```
pub fn to_words_whole(amount: impl Into<AmountInput>, currency: &str) -> String {
    let Some(split) = split_amount(&amount.into()) else {
        return String::new();
    };
    let name = currency_name(currency);

    if split.whole == 0 {
        return format!("Zero {}", name);
    }
    format!("{} {}", capitalize(&integer_to_words(split.whole)), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_uses_currency_name() {
        assert_eq!(to_words(0.0, "KWD"), "Zero Kuwaiti Dinars");
        assert_eq!(to_words("0.00", "XYZ"), "Zero XYZ");
    }

    #[test]
    fn test_whole_amount_has_no_cents_clause() {
        assert_eq!(to_words("1000", "USD"), "One thousand US Dollars");
        assert_eq!(to_words("15000.00", "KWD"), "Fifteen thousand Kuwaiti Dinars");
    }

    #[test]
    fn test_cents_clause() {
        assert_eq!(
            to_words("12345.67", "AED"),
            "Twelve thousand three hundred forty five UAE Dirhams and Sixty seven Cents"
        );
        assert_eq!(to_words("10.5", "USD"), "Ten US Dollars and Fifty Cents");
        assert_eq!(to_words("0.05", "USD"), "Zero US Dollars and Five Cents");
    }

    #[test]
    fn test_fraction_is_truncated_not_rounded() {
        assert_eq!(to_words("1.999", "USD"), "One US Dollars and Ninety nine Cents");
    }

    #[test]
    fn test_numeric_input() {
        assert_eq!(
            to_words(250.25, "EUR"),
            "Two hundred fifty Euros and Twenty five Cents"
        );
        assert_eq!(to_words(42u64, "GBP"), "Forty two British Pounds");
    }

    #[test]
    fn test_invalid_input_is_empty() {
        assert_eq!(to_words("-5", "USD"), "");
        assert_eq!(to_words("abc", "USD"), "");
        assert_eq!(to_words("", "USD"), "");
        assert_eq!(to_words("NaN", "USD"), "");
        assert_eq!(to_words(f64::INFINITY, "USD"), "");
        assert_eq!(to_words(-0.01, "USD"), "");
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(to_words("1e3", "USD"), "One thousand US Dollars");
    }

    #[test]
    fn test_integer_words_scales() {
        assert_eq!(integer_to_words(19), "nineteen");
        assert_eq!(integer_to_words(100), "one hundred");
        assert_eq!(integer_to_words(101), "one hundred one");
        assert_eq!(integer_to_words(2_000_000), "two million");
        assert_eq!(
            integer_to_words(1_234_567_890),
            "one billion two hundred thirty four million five hundred sixty seven thousand eight hundred ninety"
        );
        assert!(integer_to_words(u64::MAX).starts_with("eighteen quintillion"));
    }

    #[test]
    fn test_whole_entry_ignores_decimals() {
        assert_eq!(to_words_whole("99.99", "USD"), "Ninety nine US Dollars");
        assert_eq!(to_words_whole("0.99", "USD"), "Zero US Dollars");
        assert_eq!(to_words_whole("abc", "USD"), "");
    }

    #[test]
    fn test_always_capitalized() {
        for amount in ["1", "7.10", "999999", "40000.01"] {
            let words = to_words(amount, "SAR");
            assert!(words.chars().next().unwrap().is_uppercase(), "{}", words);
        }
    }
}

//! Currency codes and the names printed after the amount in words.

use std::borrow::Cow;

/// ISO 4217 codes with the plural name used on a cheque.
pub const CURRENCIES: &[(&str, &str)] = &[
    ("AED", "UAE Dirhams"),
    ("BHD", "Bahraini Dinars"),
    ("CAD", "Canadian Dollars"),
    ("CHF", "Swiss Francs"),
    ("CNY", "Chinese Yuan"),
    ("EGP", "Egyptian Pounds"),
    ("EUR", "Euros"),
    ("GBP", "British Pounds"),
    ("INR", "Indian Rupees"),
    ("JOD", "Jordanian Dinars"),
    ("JPY", "Japanese Yen"),
    ("KWD", "Kuwaiti Dinars"),
    ("OMR", "Omani Rials"),
    ("PKR", "Pakistani Rupees"),
    ("QAR", "Qatari Riyals"),
    ("SAR", "Saudi Riyals"),
    ("USD", "US Dollars"),
];

/// Look up the printed name for a currency code.
///
/// Matching ignores case and surrounding whitespace. Unknown codes are
/// returned verbatim so the amount in words still names the currency.
///
/// ```
/// use chequebook::words::currency_name;
///
/// assert_eq!(currency_name("KWD"), "Kuwaiti Dinars");
/// assert_eq!(currency_name("usd"), "US Dollars");
/// assert_eq!(currency_name("XYZ"), "XYZ");
/// ```
pub fn currency_name(code: &str) -> Cow<'_, str> {
    let wanted = code.trim();
    CURRENCIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(wanted))
        .map(|(_, name)| Cow::Borrowed(*name))
        .unwrap_or(Cow::Borrowed(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        let codes: Vec<&str> = CURRENCIES.iter().map(|(c, _)| *c).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_unknown_code_is_verbatim() {
        assert_eq!(currency_name(" xbt "), " xbt ");
    }
}

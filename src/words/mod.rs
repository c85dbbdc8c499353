//! Currency amount to words conversion using the Indian numbering scale
//!
//! Amounts decompose into crore (10^7), lakh (10^5), thousand and hundred
//! groups rather than the western million/billion grouping. The phrase
//! shape is fixed: `"Rupees <integer part> [and <paise> Paise] Only"`.

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Convert a non-negative currency amount into its long-form words
///
/// Paise are the amount's hundredths, rounded half away from zero.
/// Negative amounts are outside the contract; callers pass already
/// rounded, non-negative totals.
///
/// ```
/// use bigdecimal::BigDecimal;
/// use billing_core::words::amount_in_words;
///
/// assert_eq!(amount_in_words(&BigDecimal::from(0)), "Zero Rupees Only");
/// assert_eq!(
///     amount_in_words(&BigDecimal::from(1008)),
///     "Rupees One Thousand and Eight Only"
/// );
/// ```
pub fn amount_in_words(amount: &BigDecimal) -> String {
    if amount.is_zero() {
        return "Zero Rupees Only".to_string();
    }

    let rupees = amount
        .with_scale_round(0, RoundingMode::Down)
        .to_u64()
        .unwrap_or(0);
    let paise = ((amount - BigDecimal::from(rupees)) * BigDecimal::from(100))
        .with_scale_round(0, RoundingMode::HalfUp)
        .to_u64()
        .unwrap_or(0);

    let mut phrase = String::from("Rupees ");
    if rupees > 0 {
        phrase.push_str(&integer_words(rupees));
        phrase.push(' ');
    }
    if paise > 0 {
        phrase.push_str("and ");
        phrase.push_str(&integer_words(paise));
        phrase.push_str(" Paise ");
    }
    phrase.push_str("Only");
    phrase
}

/// Words for a positive integer under the Indian grouping scale
///
/// Returns an empty string for zero; callers guard.
fn integer_words(n: u64) -> String {
    let mut remainder = n;
    let mut parts: Vec<String> = Vec::new();

    for (scale, name) in [
        (10_000_000, "Crore"),
        (100_000, "Lakh"),
        (1_000, "Thousand"),
        (100, "Hundred"),
    ] {
        if remainder >= scale {
            parts.push(format!("{} {}", integer_words(remainder / scale), name));
            remainder %= scale;
        }
    }

    if remainder > 0 {
        let tail = two_digit_words(remainder);
        if parts.is_empty() {
            parts.push(tail);
        } else {
            parts.push(format!("and {}", tail));
        }
    }

    parts.join(" ")
}

/// Words for 1..=99, with the irregular 0-19 names and hyphenated
/// compounds above twenty
fn two_digit_words(n: u64) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else {
        let tens = TENS[(n / 10) as usize];
        match n % 10 {
            0 => tens.to_string(),
            unit => format!("{}-{}", tens, ONES[unit as usize]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn zero_is_a_fixed_phrase() {
        assert_eq!(amount_in_words(&BigDecimal::from(0)), "Zero Rupees Only");
    }

    #[test]
    fn uses_indian_grouping_names() {
        assert!(amount_in_words(&BigDecimal::from(100_000)).contains("Lakh"));
        assert!(amount_in_words(&BigDecimal::from(10_000_000)).contains("Crore"));
        assert!(!amount_in_words(&BigDecimal::from(1_000_000)).contains("Million"));
    }

    #[test]
    fn spells_out_exact_amounts() {
        assert_eq!(
            amount_in_words(&BigDecimal::from(1008)),
            "Rupees One Thousand and Eight Only"
        );
        assert_eq!(
            amount_in_words(&BigDecimal::from(1533)),
            "Rupees One Thousand Five Hundred and Thirty-Three Only"
        );
        assert_eq!(
            amount_in_words(&BigDecimal::from(100_000)),
            "Rupees One Lakh Only"
        );
        assert_eq!(
            amount_in_words(&BigDecimal::from(23_500_000)),
            "Rupees Two Crore Thirty-Five Lakh Only"
        );
    }

    #[test]
    fn fractional_amounts_gain_a_paise_phrase() {
        let amount = BigDecimal::from_str("1500.50").unwrap();
        let words = amount_in_words(&amount);
        assert!(words.starts_with("Rupees One Thousand Five Hundred"));
        assert!(words.contains("Fifty Paise"));
        assert!(words.ends_with("Only"));
    }

    #[test]
    fn whole_amounts_have_no_paise_phrase() {
        assert!(!amount_in_words(&BigDecimal::from(1533)).contains("Paise"));
    }

    #[test]
    fn paise_round_to_the_nearest_hundredth() {
        let amount = BigDecimal::from_str("10.005").unwrap();
        let words = amount_in_words(&amount);
        assert!(words.contains("One Paise"));
    }

    #[test]
    fn hyphenates_compound_tens() {
        assert_eq!(
            amount_in_words(&BigDecimal::from(42)),
            "Rupees Forty-Two Only"
        );
        assert_eq!(amount_in_words(&BigDecimal::from(90)), "Rupees Ninety Only");
    }
}

//! Money formatting used in history entries.

/// `1234567` -> `"$1,234,567"`, `-50` -> `"-$50"`.
pub fn format_money(amount: i64) -> String {
    let digits = format_with_commas(amount.unsigned_abs());
    if amount < 0 {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// Like [`format_money`] but always carries a sign.
pub fn format_money_signed(amount: i64) -> String {
    if amount >= 0 {
        format!("+{}", format_money(amount))
    } else {
        format_money(amount)
    }
}

fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_commas_strip_to_digits(n in any::<u64>()) {
            let s = format_with_commas(n);
            let stripped: String = s.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(stripped, n.to_string());
        }

        #[test]
        fn prop_negative_has_minus(n in i64::MIN..0) {
            prop_assert!(format_money(n).starts_with("-$"));
        }
    }
}

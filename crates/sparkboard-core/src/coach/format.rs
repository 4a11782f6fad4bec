//! Money formatting for coach lines.

/// Whole US dollars with thousands separators: `$1,234`, `-$56`.
///
/// Rounds half away from zero. Non-finite input prints as `$0`.
pub fn currency(amount: f64) -> String {
    let rounded = if amount.is_finite() { amount.round() } else { 0.0 };
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(currency(0.0), "$0");
        assert_eq!(currency(999.0), "$999");
        assert_eq!(currency(1_000.0), "$1,000");
        assert_eq!(currency(1_234_567.0), "$1,234,567");
    }

    #[test]
    fn rounds_to_whole_dollars() {
        assert_eq!(currency(12.5), "$13");
        assert_eq!(currency(12.49), "$12");
        assert_eq!(currency(1_999.6), "$2,000");
    }

    #[test]
    fn negatives_and_garbage() {
        assert_eq!(currency(-1_500.0), "-$1,500");
        assert_eq!(currency(-0.2), "$0");
        assert_eq!(currency(f64::NAN), "$0");
    }
}

//! Integer helpers shared by the positioning and layering passes.

/// Rounds `value` up to the next multiple of `quantum` (a positive number).
///
/// Saturates to the largest multiple of `quantum` representable in `i64`.
pub(crate) fn round_up(value: i64, quantum: i64) -> i64 {
    let rem = value.rem_euclid(quantum);
    if rem == 0 {
        return value;
    }
    value
        .checked_add(quantum - rem)
        .unwrap_or(i64::MAX - i64::MAX.rem_euclid(quantum))
}

/// `⌈value / quantum⌉` for a positive `quantum`.
pub(crate) fn ceil_div(value: i64, quantum: i64) -> i64 {
    value.div_euclid(quantum) + i64::from(value.rem_euclid(quantum) != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_up_keeps_exact_multiples() {
        assert_eq!(round_up(0, 1000), 0);
        assert_eq!(round_up(2000, 1000), 2000);
        assert_eq!(round_up(2001, 1000), 3000);
        assert_eq!(round_up(-1, 1000), 0);
    }

    #[test]
    fn round_up_saturates_to_a_multiple() {
        let top = round_up(i64::MAX - 3, 1000);
        assert_eq!(top % 1000, 0);
        assert!(top <= i64::MAX);
    }

    #[test]
    fn ceil_div_rounds_towards_positive_infinity() {
        assert_eq!(ceil_div(0, 1000), 0);
        assert_eq!(ceil_div(1, 1000), 1);
        assert_eq!(ceil_div(1000, 1000), 1);
        assert_eq!(ceil_div(-1, 1000), 0);
        assert_eq!(ceil_div(-1000, 1000), -1);
    }
}

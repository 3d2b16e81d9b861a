//! Near-milestone arithmetic for the rule of 13.
//!
//! Pure, deterministic helpers: a value qualifies when it sits exactly one
//! short of a multiple of the modulus. Raw API values are coerced leniently
//! because upstream stat blocks are sparse and occasionally stringly typed.

use serde_json::Value;

/// True iff `value` is exactly one short of a multiple of `modulus`.
#[inline]
pub fn is_near_milestone(value: u64, modulus: u64) -> bool {
    debug_assert!(modulus > 0);
    value % modulus == modulus - 1
}

/// Smallest multiple of `modulus` strictly greater than `value`.
/// An exact multiple rolls to the following one: the current value is
/// never its own target, so `next_milestone(0, 13) == 13`.
/// Saturates at `u64::MAX` when no greater multiple is representable.
#[inline]
pub fn next_milestone(value: u64, modulus: u64) -> u64 {
    debug_assert!(modulus > 0);
    value.saturating_add(modulus - value % modulus)
}

/// Coerce a raw API value to a non-negative count.
///
/// Accepts integers, floats with a zero fractional part, and numeric
/// strings. Anything else (missing, null, text) is "not evaluable" and
/// returns `None`; callers treat that as no match and skip the stat.
pub fn coerce_count(raw: &Value) -> Option<u64> {
    match raw {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Some(v);
            }
            match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 => Some(f as u64),
                _ => None,
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(v) = s.parse::<u64>() {
                return Some(v);
            }
            match s.parse::<f64>() {
                Ok(f) if f >= 0.0 && f.fract() == 0.0 => Some(f as u64),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_near_milestone_boundaries() {
        assert!(is_near_milestone(12, 13));
        assert!(is_near_milestone(25, 13));
        assert!(!is_near_milestone(13, 13));
        assert!(!is_near_milestone(0, 13));
        assert!(!is_near_milestone(26, 13));
    }

    #[test]
    fn test_next_milestone_targets() {
        assert_eq!(next_milestone(12, 13), 13);
        assert_eq!(next_milestone(25, 13), 26);
        // Exact multiples roll forward to the next one
        assert_eq!(next_milestone(26, 13), 39);
        assert_eq!(next_milestone(0, 13), 13);
    }

    #[test]
    fn test_next_milestone_saturates_at_extremes() {
        // u64::MAX % 13 == 2: no greater multiple fits, so the target clamps
        assert_eq!(next_milestone(u64::MAX, 13), u64::MAX);
        // u64::MAX - 3 has residue 12: near-milestone, target still in range
        assert!(is_near_milestone(u64::MAX - 3, 13));
        assert_eq!(next_milestone(u64::MAX - 3, 13), u64::MAX - 2);
    }

    #[test]
    fn test_extreme_numeric_string_evaluates_without_panic() {
        let raw = json!(u64::MAX.to_string());
        let value = coerce_count(&raw).unwrap();
        assert!(!is_near_milestone(value, 13));
        assert_eq!(next_milestone(value, 13), u64::MAX);
    }

    #[test]
    fn test_coerce_count_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_count(&json!(42)), Some(42));
        assert_eq!(coerce_count(&json!(42.0)), Some(42));
        assert_eq!(coerce_count(&json!("42")), Some(42));
        assert_eq!(coerce_count(&json!(" 42 ")), Some(42));
    }

    #[test]
    fn test_coerce_count_rejects_non_counts() {
        assert_eq!(coerce_count(&json!(null)), None);
        assert_eq!(coerce_count(&json!(".500")), None);
        assert_eq!(coerce_count(&json!(-3)), None);
        assert_eq!(coerce_count(&json!(12.5)), None);
        assert_eq!(coerce_count(&json!("-.--")), None);
        assert_eq!(coerce_count(&json!([1, 2])), None);
    }
}

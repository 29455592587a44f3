//! Small shared helpers.

/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Encode a non-negative integer as uppercase base36 (digits `0-9A-Z`).
///
/// Used for timestamp-derived order IDs; decodable with
/// `i64::from_str_radix(s, 36)`.
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut out = String::new();
    while n > 0 {
        let digit = (n % 36) as u32;
        let c = char::from_digit(digit, 36).unwrap_or('0').to_ascii_uppercase();
        out.insert(0, c);
        n /= 36;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(9), "9");
        assert_eq!(to_base36(10), "A");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36), "100");
    }

    #[test]
    fn test_base36_round_trip() {
        for n in [1u64, 42, 1_000, 1_700_000_000_000, u32::MAX as u64] {
            let encoded = to_base36(n);
            let decoded = u64::from_str_radix(&encoded, 36).unwrap();
            assert_eq!(decoded, n);
        }
    }

    #[test]
    fn test_now_millis_is_recent() {
        // Sanity: after 2024-01-01 and strictly positive
        assert!(now_millis() > 1_704_067_200_000);
    }
}

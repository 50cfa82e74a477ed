/// Base units (lamports) per display unit
pub const LAMPORTS_PER_UNIT: u64 = 1_000_000_000;

pub fn lamports_to_units(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_UNIT as f64
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_billion_lamports_is_five_units() {
        assert_eq!(lamports_to_units(5_000_000_000), 5.0);
        assert_eq!(lamports_to_units(5_000), 0.000005);
    }

    #[test]
    fn test_multiplying_back_recovers_lamports() {
        for lamports in [5_000_000_000u64, 123_456_789_012_345, 1] {
            let back = lamports_to_units(lamports) * LAMPORTS_PER_UNIT as f64;
            assert!((back - lamports as f64).abs() <= 1.0);
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.005 + 0.0001), 2.01);
        assert_eq!(round2(0.0), 0.0);
    }
}

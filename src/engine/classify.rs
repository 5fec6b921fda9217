// FlexSonic — Threshold Classification
//
// A channel is "in gesture range" either inside a closed band (flex sensors:
// slack and over-bend both fall outside) or strictly above a floor
// (excursion-style channels).

/// Trigger interval for one channel, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerRange {
    /// `low <= value <= high`, both ends inclusive.
    Bounded { low: i32, high: i32 },
    /// `value > threshold`, strict.
    Above(i32),
}

impl TriggerRange {
    pub fn contains(&self, value: i32) -> bool {
        match *self {
            TriggerRange::Bounded { low, high } => value >= low && value <= high,
            TriggerRange::Above(threshold) => value > threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_is_inclusive_on_both_ends() {
        let band = TriggerRange::Bounded { low: 1000, high: 3500 };
        assert!(!band.contains(999));
        assert!(band.contains(1000));
        assert!(band.contains(2200));
        assert!(band.contains(3500));
        assert!(!band.contains(3501));
    }

    #[test]
    fn above_is_strict() {
        let floor = TriggerRange::Above(1000);
        assert!(!floor.contains(999));
        assert!(!floor.contains(1000));
        assert!(floor.contains(1001));
    }

    #[test]
    fn degenerate_band_matches_single_value() {
        let band = TriggerRange::Bounded { low: 400, high: 400 };
        assert!(band.contains(400));
        assert!(!band.contains(399));
        assert!(!band.contains(401));
    }
}

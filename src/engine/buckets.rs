//! Bucket partition of classification codes and quota presets.

use std::collections::BTreeMap;
use std::fmt;

/// One of six coarse weight groups, derived from a classification code.
/// Codes outside the table fall into `Unknown` and are excluded from bucket
/// draws. Never stored on an objective; always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    A,
    B,
    C,
    D,
    E,
    F,
    Unknown,
}

impl Bucket {
    /// The six buckets that carry quotas, in label order.
    pub const QUOTA_BUCKETS: [Bucket; 6] = [
        Bucket::A,
        Bucket::B,
        Bucket::C,
        Bucket::D,
        Bucket::E,
        Bucket::F,
    ];

    /// Bucket owning a classification code. Pure: identical input always
    /// yields the identical label.
    pub fn of(classification: u32) -> Bucket {
        match classification {
            2 | 3 | 4 | 8 => Bucket::A,
            5 | 6 | 7 | 9 => Bucket::B,
            11 | 12 | 21 | 23 => Bucket::C,
            10 | 13 | 14 | 15 | 16 => Bucket::D,
            17 | 18 | 19 | 20 => Bucket::E,
            22 | 24 | 25 => Bucket::F,
            _ => Bucket::Unknown,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Bucket::A => "A",
            Bucket::B => "B",
            Bucket::C => "C",
            Bucket::D => "D",
            Bucket::E => "E",
            Bucket::F => "F",
            Bucket::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Per-bucket target counts. Both presets sum to the 25-slot board target.
pub fn quota_preset(hard_mode: bool) -> BTreeMap<Bucket, usize> {
    let quotas: [(Bucket, usize); 6] = if hard_mode {
        [
            (Bucket::A, 1),
            (Bucket::B, 4),
            (Bucket::C, 5),
            (Bucket::D, 7),
            (Bucket::E, 5),
            (Bucket::F, 3),
        ]
    } else {
        [
            (Bucket::A, 4),
            (Bucket::B, 5),
            (Bucket::C, 4),
            (Bucket::D, 7),
            (Bucket::E, 4),
            (Bucket::F, 1),
        ]
    };
    quotas.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_is_stable() {
        assert_eq!(Bucket::of(2), Bucket::A);
        assert_eq!(Bucket::of(9), Bucket::B);
        assert_eq!(Bucket::of(23), Bucket::C);
        assert_eq!(Bucket::of(16), Bucket::D);
        assert_eq!(Bucket::of(20), Bucket::E);
        assert_eq!(Bucket::of(25), Bucket::F);
        assert_eq!(Bucket::of(1), Bucket::Unknown);
        assert_eq!(Bucket::of(99), Bucket::Unknown);
        // Pure function: repeated calls agree.
        assert_eq!(Bucket::of(13), Bucket::of(13));
    }

    #[test]
    fn test_presets_sum_to_board_target() {
        for hard in [false, true] {
            let total: usize = quota_preset(hard).values().sum();
            assert_eq!(total, 25);
        }
    }
}

//! Order-number generation
//!
//! Numbers are `YYYYMMDDHHMMSS-NNN`: the creation second in UTC followed by
//! a sequence within that second. If the clock steps backwards the last
//! issued second is kept and the sequence keeps counting, so numbers never
//! repeat within a process. [`OrderNumberGenerator::observe`] carries the
//! position across restarts.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::utils::time::second_stamp;

#[derive(Debug, Default)]
struct Last {
    stamp: String,
    seq: u32,
}

/// Issues unique order numbers
#[derive(Debug, Default)]
pub struct OrderNumberGenerator {
    last: Mutex<Last>,
}

impl OrderNumberGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number for an order created at `at`
    pub fn next(&self, at: &DateTime<Utc>) -> String {
        let stamp = second_stamp(at);
        let mut last = self.last.lock();

        // Fixed-width digits, so string order is time order.
        if stamp <= last.stamp {
            last.seq += 1;
        } else {
            last.stamp = stamp;
            last.seq = 1;
        }

        format!("{}-{:03}", last.stamp, last.seq)
    }

    /// Record an already issued number so later numbers sort after it.
    /// Numbers not in `YYYYMMDDHHMMSS-NNN` form are ignored.
    pub fn observe(&self, number: &str) {
        let Some((stamp, seq)) = number.split_once('-') else {
            return;
        };
        if stamp.len() != 14 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
            return;
        }
        let Ok(seq) = seq.parse::<u32>() else {
            return;
        };

        let mut last = self.last.lock();
        if (stamp, seq) > (last.stamp.as_str(), last.seq) {
            last.stamp = stamp.to_string();
            last.seq = seq;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_same_second_gets_a_suffix_sequence() {
        let generator = OrderNumberGenerator::new();
        let at = Utc.with_ymd_and_hms(2025, 1, 10, 23, 0, 0).unwrap();

        assert_eq!(generator.next(&at), "20250110230000-001");
        assert_eq!(generator.next(&at), "20250110230000-002");
    }

    #[test]
    fn test_new_second_resets_sequence() {
        let generator = OrderNumberGenerator::new();
        let at = Utc.with_ymd_and_hms(2025, 1, 10, 23, 0, 0).unwrap();
        generator.next(&at);

        let later = at + chrono::Duration::seconds(1);
        assert_eq!(generator.next(&later), "20250110230001-001");
    }

    #[test]
    fn test_clock_going_backwards_never_repeats() {
        let generator = OrderNumberGenerator::new();
        let at = Utc.with_ymd_and_hms(2025, 1, 10, 23, 0, 5).unwrap();
        let first = generator.next(&at);

        let earlier = at - chrono::Duration::seconds(3);
        let second = generator.next(&earlier);
        assert_ne!(first, second);
        assert_eq!(second, "20250110230005-002");
    }

    #[test]
    fn test_observed_numbers_are_never_reissued() {
        let generator = OrderNumberGenerator::new();
        let at = Utc.with_ymd_and_hms(2025, 1, 10, 23, 0, 0).unwrap();

        generator.observe("20250110230000-004");
        generator.observe("20250110225959-009");
        generator.observe("legacy-17");
        assert_eq!(generator.next(&at), "20250110230000-005");
    }
}

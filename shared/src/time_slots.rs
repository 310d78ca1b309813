//! Splitting a day's slots into the morning and afternoon columns.

use serde::{Deserialize, Serialize};

use crate::api::TimeSlot;

/// Hour at which the afternoon column starts
pub const AFTERNOON_START_HOUR: u32 = 12;

/// A slot as the time grid renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySlot {
    /// `HH:MM`
    pub time: String,
    pub available: bool,
}

impl DisplaySlot {
    pub fn new(time: impl Into<String>, available: bool) -> Self {
        Self {
            time: time.into(),
            available,
        }
    }

    pub fn hour(&self) -> Option<u32> {
        slot_hour(&self.time)
    }
}

impl From<&TimeSlot> for DisplaySlot {
    fn from(slot: &TimeSlot) -> Self {
        Self {
            time: normalize_slot_time(&slot.start_time),
            available: slot.available,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionedSlots {
    pub morning: Vec<DisplaySlot>,
    pub afternoon: Vec<DisplaySlot>,
}

impl PartitionedSlots {
    pub fn is_empty(&self) -> bool {
        self.morning.is_empty() && self.afternoon.is_empty()
    }

    pub fn len(&self) -> usize {
        self.morning.len() + self.afternoon.len()
    }

    pub fn available_count(&self) -> usize {
        self.morning
            .iter()
            .chain(self.afternoon.iter())
            .filter(|slot| slot.available)
            .count()
    }
}

/// Leading hour of an `HH:MM` string
pub fn slot_hour(time: &str) -> Option<u32> {
    time.split(':').next()?.trim().parse().ok()
}

/// Reduce a backend start time (`2025-01-10T09:00:00`, `09:00:00` or `09:00`) to `HH:MM`
pub fn normalize_slot_time(raw: &str) -> String {
    let time_part = raw.rsplit('T').next().unwrap_or(raw);
    let mut parts = time_part.split(':');
    match (parts.next(), parts.next().and_then(|minutes| minutes.get(..2))) {
        (Some(hours), Some(minutes)) if !hours.is_empty() => format!("{}:{}", hours, minutes),
        _ => time_part.to_string(),
    }
}

/// Partition slots by hour, keeping input order inside each bucket.
///
/// A slot whose hour does not parse goes to the afternoon so that no slot is lost.
pub fn partition_slots<I>(slots: I) -> PartitionedSlots
where
    I: IntoIterator<Item = DisplaySlot>,
{
    let (morning, afternoon) = slots
        .into_iter()
        .partition(|slot| matches!(slot.hour(), Some(hour) if hour < AFTERNOON_START_HOUR));
    PartitionedSlots { morning, afternoon }
}

/// Convert and partition the backend's slot list in one go
pub fn partition_backend_slots(slots: &[TimeSlot]) -> PartitionedSlots {
    partition_slots(slots.iter().map(DisplaySlot::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_example() {
        let slots = vec![
            DisplaySlot::new("09:00", true),
            DisplaySlot::new("11:30", true),
            DisplaySlot::new("14:00", false),
            DisplaySlot::new("16:00", true),
        ];
        let partitioned = partition_slots(slots);

        let morning: Vec<&str> = partitioned.morning.iter().map(|s| s.time.as_str()).collect();
        let afternoon: Vec<&str> = partitioned.afternoon.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(morning, vec!["09:00", "11:30"]);
        assert_eq!(afternoon, vec!["14:00", "16:00"]);
        assert_eq!(partitioned.available_count(), 3);
    }

    #[test]
    fn test_partition_is_total_and_order_preserving() {
        let times = ["16:30", "08:00", "12:00", "11:59", "13:15", "10:00", "12:30"];
        let slots: Vec<DisplaySlot> = times.iter().map(|t| DisplaySlot::new(*t, true)).collect();
        let partitioned = partition_slots(slots.clone());

        assert_eq!(partitioned.len(), slots.len());
        for slot in &slots {
            let in_morning = partitioned.morning.iter().filter(|s| *s == slot).count();
            let in_afternoon = partitioned.afternoon.iter().filter(|s| *s == slot).count();
            assert_eq!(in_morning + in_afternoon, 1);
            assert_eq!(in_morning == 1, slot.hour().unwrap() < 12);
        }

        let morning: Vec<&str> = partitioned.morning.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(morning, vec!["08:00", "11:59", "10:00"]);
        let afternoon: Vec<&str> = partitioned.afternoon.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(afternoon, vec!["16:30", "12:00", "13:15", "12:30"]);
    }

    #[test]
    fn test_unparseable_hour_lands_in_afternoon() {
        let partitioned = partition_slots(vec![DisplaySlot::new("abends", true)]);
        assert!(partitioned.morning.is_empty());
        assert_eq!(partitioned.afternoon.len(), 1);
    }

    #[test]
    fn test_backend_slots_are_normalized() {
        let slots = vec![
            TimeSlot {
                start_time: "2025-01-10T09:30:00".to_string(),
                end_time: "2025-01-10T11:30:00".to_string(),
                available: true,
            },
            TimeSlot {
                start_time: "14:00:00".to_string(),
                end_time: "16:00:00".to_string(),
                available: false,
            },
        ];
        let partitioned = partition_backend_slots(&slots);
        assert_eq!(partitioned.morning, vec![DisplaySlot::new("09:30", true)]);
        assert_eq!(partitioned.afternoon, vec![DisplaySlot::new("14:00", false)]);
    }

    #[test]
    fn test_empty_input() {
        let partitioned = partition_slots(Vec::new());
        assert!(partitioned.is_empty());
        assert_eq!(partitioned.available_count(), 0);
    }
}

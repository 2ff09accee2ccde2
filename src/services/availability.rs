use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::BusinessHoursEntry;
use crate::services::time_math;

/// Candidate start times are walked at this granularity.
pub const SLOT_STEP_MINUTES: i32 = 30;

/// A committed span on a given date, in minutes since midnight, half-open
/// `[start, end)`. Either an active booking or a blocked interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: i32,
    pub end: i32,
}

impl TimeInterval {
    /// Half-open overlap: touching endpoints do not overlap, so back-to-back
    /// bookings are allowed.
    pub fn overlaps(&self, start: i32, end: i32) -> bool {
        start < self.end && end > self.start
    }
}

/// Compute the ordered bookable start times for one day.
///
/// A closed day (or an open day with no usable window) yields an empty list,
/// which is a valid answer rather than an error.
pub fn compute_slots(
    hours: &BusinessHoursEntry,
    duration_minutes: i32,
    committed: &[TimeInterval],
) -> Result<Vec<String>, AppError> {
    if duration_minutes <= 0 {
        return Err(AppError::InvalidDuration);
    }

    if !hours.is_open {
        return Ok(vec![]);
    }

    let (open, close) = match (&hours.open_time, &hours.close_time) {
        (Some(o), Some(c)) => (time_math::to_minutes(o)?, time_math::to_minutes(c)?),
        _ => return Ok(vec![]),
    };

    let mut slots = Vec::new();
    let mut start = open;
    while start + duration_minutes <= close {
        let end = start + duration_minutes;
        if !committed.iter().any(|c| c.overlaps(start, end)) {
            slots.push(time_math::from_minutes(start));
        }
        start += SLOT_STEP_MINUTES;
    }

    Ok(slots)
}

/// Load everything committed for `(provider, date)`: bookings still holding
/// their slot plus blocked intervals.
pub fn committed_intervals(
    conn: &Connection,
    provider_id: &str,
    date: NaiveDate,
) -> Result<Vec<TimeInterval>, AppError> {
    let mut intervals = Vec::new();

    for booking in queries::get_bookings_for_date(conn, provider_id, date)? {
        // Cancelled and no-show rows stay in the table but release the slot.
        if !booking.status.blocks_slot() {
            continue;
        }
        let start = time_math::to_minutes(&booking.start_time)?;
        intervals.push(TimeInterval {
            start,
            end: start + booking.duration_minutes,
        });
    }

    for block in queries::get_blocks_for_date(conn, provider_id, date)? {
        intervals.push(TimeInterval {
            start: time_math::to_minutes(&block.start_time)?,
            end: time_math::to_minutes(&block.end_time)?,
        });
    }

    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_day(open: &str, close: &str) -> BusinessHoursEntry {
        BusinessHoursEntry {
            provider_id: "p1".to_string(),
            day_of_week: 1,
            is_open: true,
            open_time: Some(open.to_string()),
            close_time: Some(close.to_string()),
        }
    }

    fn iv(start: i32, end: i32) -> TimeInterval {
        TimeInterval { start, end }
    }

    #[test]
    fn test_closed_day_is_empty() {
        let hours = BusinessHoursEntry {
            provider_id: "p1".to_string(),
            day_of_week: 0,
            is_open: false,
            open_time: None,
            close_time: None,
        };
        assert!(compute_slots(&hours, 60, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_full_open_day() {
        let slots = compute_slots(&open_day("09:00", "12:00"), 60, &[]).unwrap();
        assert_eq!(slots, vec!["09:00", "09:30", "10:00", "10:30", "11:00"]);
    }

    #[test]
    fn test_existing_booking_excludes_overlapping_starts() {
        // Business hours 09:00-17:00, 60-minute service, booking 10:00-11:00.
        // 09:30, 10:00, 10:30 would overlap; 09:00 and 11:00 must survive.
        let committed = [iv(600, 660)];
        let slots = compute_slots(&open_day("09:00", "17:00"), 60, &committed).unwrap();
        assert!(slots.contains(&"09:00".to_string()));
        assert!(slots.contains(&"11:00".to_string()));
        assert!(!slots.contains(&"09:30".to_string()));
        assert!(!slots.contains(&"10:00".to_string()));
        assert!(!slots.contains(&"10:30".to_string()));
    }

    #[test]
    fn test_no_returned_slot_overlaps_committed() {
        let committed = [iv(570, 630), iv(720, 780), iv(900, 990)];
        let slots = compute_slots(&open_day("08:00", "18:00"), 45, &committed).unwrap();
        for s in &slots {
            let start = time_math::to_minutes(s).unwrap();
            for c in &committed {
                assert!(
                    !c.overlaps(start, start + 45),
                    "slot {s} overlaps [{}, {})",
                    c.start,
                    c.end
                );
            }
        }
        assert!(!slots.is_empty());
    }

    #[test]
    fn test_interior_minutes_are_protected() {
        // Any minute strictly inside a committed interval must not fall
        // inside a returned slot other than as an endpoint touch.
        let committed = [iv(600, 660)];
        let slots = compute_slots(&open_day("09:00", "17:00"), 30, &committed).unwrap();
        for s in &slots {
            let start = time_math::to_minutes(s).unwrap();
            let end = start + 30;
            for m in 601..660 {
                assert!(!(start < m && m < end), "slot {s} contains minute {m}");
            }
        }
    }

    #[test]
    fn test_back_to_back_slot_allowed() {
        // Touching endpoints are not an overlap.
        let committed = [iv(600, 660)];
        let slots = compute_slots(&open_day("09:00", "17:00"), 60, &committed).unwrap();
        assert!(slots.contains(&"09:00".to_string()));
        assert!(slots.contains(&"11:00".to_string()));
    }

    #[test]
    fn test_last_slot_touches_close() {
        // close - duration is inclusive: 16:00 + 60 = 17:00 exactly.
        let slots = compute_slots(&open_day("09:00", "17:00"), 60, &[]).unwrap();
        assert_eq!(slots.last().unwrap(), "16:00");
    }

    #[test]
    fn test_duration_longer_than_window() {
        let slots = compute_slots(&open_day("09:00", "10:00"), 120, &[]).unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn test_invalid_duration_rejected() {
        assert!(matches!(
            compute_slots(&open_day("09:00", "17:00"), 0, &[]),
            Err(AppError::InvalidDuration)
        ));
        assert!(matches!(
            compute_slots(&open_day("09:00", "17:00"), -30, &[]),
            Err(AppError::InvalidDuration)
        ));
    }

    #[test]
    fn test_idempotent() {
        let committed = [iv(600, 660)];
        let hours = open_day("09:00", "17:00");
        let a = compute_slots(&hours, 60, &committed).unwrap();
        let b = compute_slots(&hours, 60, &committed).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_is_chronological() {
        let slots = compute_slots(&open_day("09:00", "17:00"), 30, &[]).unwrap();
        let minutes: Vec<i32> = slots
            .iter()
            .map(|s| time_math::to_minutes(s).unwrap())
            .collect();
        let mut sorted = minutes.clone();
        sorted.sort_unstable();
        assert_eq!(minutes, sorted);
    }

    #[test]
    fn test_fully_booked_day() {
        let committed = [iv(540, 1020)];
        let slots = compute_slots(&open_day("09:00", "17:00"), 60, &committed).unwrap();
        assert!(slots.is_empty());
    }
}

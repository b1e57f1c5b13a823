use crate::model::Assignment;
use chrono::{Datelike, NaiveDate};

/// Prochains samedis non annulés à partir de `today` (inclus), triés.
pub fn upcoming(assignments: &[Assignment], today: NaiveDate, limit: usize) -> Vec<&Assignment> {
    let mut out: Vec<&Assignment> = assignments
        .iter()
        .filter(|a| a.date >= today && !a.is_cancelled())
        .collect();
    out.sort_by_key(|a| a.date);
    out.truncate(limit);
    out
}

pub fn assignments_in_month(assignments: &[Assignment], year: i32, month: u32) -> Vec<&Assignment> {
    let mut out: Vec<&Assignment> = assignments
        .iter()
        .filter(|a| a.date.year() == year && a.date.month() == month)
        .collect();
    out.sort_by_key(|a| a.date);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssignmentStatus, MemberId, Pair};

    fn row(m: u32, day: u32) -> Assignment {
        let pair = Pair::new(MemberId::new("A"), MemberId::new("B")).unwrap();
        Assignment::planned(NaiveDate::from_ymd_opt(2026, m, day).unwrap(), &pair)
    }

    #[test]
    fn upcoming_skips_past_and_cancelled() {
        let mut cancelled = row(3, 14);
        cancelled.status = AssignmentStatus::Cancelled;
        let rows = vec![row(3, 28), row(3, 7), cancelled, row(3, 21), row(4, 4)];
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        let next: Vec<NaiveDate> = upcoming(&rows, today, 2).iter().map(|a| a.date).collect();
        assert_eq!(
            next,
            vec![
                NaiveDate::from_ymd_opt(2026, 3, 21).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 28).unwrap()
            ]
        );
    }

    #[test]
    fn month_view_filters_by_calendar_month() {
        let rows = vec![row(4, 4), row(3, 28), row(3, 7), row(5, 2)];
        let march = assignments_in_month(&rows, 2026, 3);
        assert_eq!(march.len(), 2);
        assert!(march[0].date < march[1].date);
    }
}

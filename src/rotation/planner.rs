use super::calendar::AnchorCalendar;
use crate::model::{Assignment, PairCycle};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Index du binôme attribué à `date`.
///
/// Une date hors de la séquence d'ancrage retombe sur la position 0.
pub fn cycle_index(
    date: NaiveDate,
    cycle_len: usize,
    calendar: &AnchorCalendar,
    anchor_offset: i64,
) -> Option<usize> {
    if cycle_len == 0 {
        return None;
    }
    let position = calendar.position(date).unwrap_or_else(|| {
        warn!(%date, "date outside the anchor sequence, using position 0");
        0
    });
    let len = cycle_len as i64;
    let index = (position as i64 + anchor_offset.rem_euclid(len)).rem_euclid(len);
    Some(index as usize)
}

/// Associe un binôme du cycle à chaque date (statut `planned`, sans note).
///
/// Les doublons de `dates` ne sont pas filtrés.
pub fn plan(
    dates: &[NaiveDate],
    cycle: &PairCycle,
    calendar: &AnchorCalendar,
    anchor_offset: i64,
) -> Vec<Assignment> {
    if cycle.is_empty() {
        return Vec::new();
    }

    let out: Vec<Assignment> = dates
        .iter()
        .filter_map(|date| {
            let index = cycle_index(*date, cycle.len(), calendar, anchor_offset)?;
            cycle.get(index).map(|pair| Assignment::planned(*date, pair))
        })
        .collect();

    debug!(dates = dates.len(), cycle = cycle.len(), "plan computed");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssignmentStatus, Member, MemberId};
    use crate::rotation::calendar::PlanningHorizon;
    use crate::rotation::pairs::generate_pairs;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn abcd() -> Vec<Member> {
        ["A", "B", "C", "D"]
            .into_iter()
            .map(|id| Member::with_id(MemberId::new(id), id, id, "#000000"))
            .collect()
    }

    #[test]
    fn six_dates_from_position_zero_follow_the_cycle() {
        let cycle = generate_pairs(&abcd());
        let cal = AnchorCalendar::saturdays_of(2026).unwrap();
        let dates = PlanningHorizon::new(d(2026, 1, 1), d(2026, 2, 7), Weekday::Sat).dates();
        assert_eq!(dates.len(), 6);

        let plan = plan(&dates, &cycle, &cal, 0);
        assert_eq!(plan.len(), 6);
        for (a, pair) in plan.iter().zip(cycle.iter()) {
            assert_eq!(a.pair().as_ref(), Some(pair));
            assert_eq!(a.status, AssignmentStatus::Planned);
            assert!(a.note.is_none());
        }
    }

    #[test]
    fn same_date_same_pair_whatever_the_horizon_start() {
        let cycle = generate_pairs(&abcd());
        let cal = AnchorCalendar::saturdays_of(2026).unwrap();
        let target = d(2026, 11, 21);

        let early = PlanningHorizon::new(d(2026, 1, 1), d(2026, 12, 31), Weekday::Sat).dates();
        let late = PlanningHorizon::new(d(2026, 10, 19), d(2026, 12, 31), Weekday::Sat).dates();
        let from_early = plan(&early, &cycle, &cal, 5);
        let from_late = plan(&late, &cycle, &cal, 5);

        let a = from_early.iter().find(|a| a.date == target).unwrap();
        let b = from_late.iter().find(|a| a.date == target).unwrap();
        assert_eq!(a, b);
        assert_eq!(plan(&[target], &cycle, &cal, 5)[0], *a);
    }

    #[test]
    fn never_pairs_a_member_with_themself() {
        let cal = AnchorCalendar::saturdays_of(2026).unwrap();
        let dates = PlanningHorizon::new(d(2026, 1, 1), d(2026, 12, 31), Weekday::Sat).dates();
        for n in 2..=6 {
            let roster: Vec<Member> = (0..n)
                .map(|i| Member::with_id(MemberId::new(format!("m{i}")), "x", "xx", "#fff"))
                .collect();
            let cycle = generate_pairs(&roster);
            for a in plan(&dates, &cycle, &cal, 3) {
                assert!(a.first.is_some() && a.first != a.second);
            }
        }
    }

    #[test]
    fn empty_cycle_gives_empty_plan() {
        let cal = AnchorCalendar::saturdays_of(2026).unwrap();
        assert!(plan(&[d(2026, 2, 21)], &PairCycle::default(), &cal, 5).is_empty());
    }

    #[test]
    fn offset_wraps_in_both_directions() {
        let cal = AnchorCalendar::saturdays_of(2026).unwrap();
        assert_eq!(cycle_index(d(2026, 2, 21), 6, &cal, 5), Some(0));
        assert_eq!(cycle_index(d(2026, 2, 21), 6, &cal, -1), Some(0));
        assert_eq!(cycle_index(d(2026, 2, 21), 6, &cal, 11), Some(0));
    }

    #[test]
    fn date_outside_sequence_falls_back_to_position_zero() {
        let cal = AnchorCalendar::saturdays_of(2026).unwrap();
        assert_eq!(cycle_index(d(2027, 1, 9), 6, &cal, 2), Some(2));
        assert_eq!(cycle_index(d(2027, 1, 9), 0, &cal, 2), None);
    }
}

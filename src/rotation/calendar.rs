use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Jour d'ancrage on/after `from` (peut être `from` lui-même).
pub fn next_anchor_on_or_after(from: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let delta = (i64::from(weekday.num_days_from_monday())
        - i64::from(from.weekday().num_days_from_monday()))
    .rem_euclid(7);
    from.checked_add_signed(Duration::days(delta))
}

/// Séquence fixe des jours d'ancrage sur une année de référence.
///
/// Toutes les positions de cycle sont calculées par rapport à cette séquence,
/// jamais par rapport aux dates passées au planificateur : la même date donne
/// toujours le même binôme, quel que soit le jour d'appel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorCalendar {
    weekday: Weekday,
    first: Option<NaiveDate>,
    end: NaiveDate,
}

impl AnchorCalendar {
    pub fn new(weekday: Weekday, start: NaiveDate, end: NaiveDate) -> Self {
        let first = next_anchor_on_or_after(start, weekday).filter(|d| *d <= end);
        Self {
            weekday,
            first,
            end,
        }
    }

    /// Samedis d'une année civile.
    pub fn saturdays_of(year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(Self::new(Weekday::Sat, start, end))
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.first
    }

    /// Dernier jour couvert par la séquence.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Position (base 0) de `date` dans la séquence, `None` hors séquence.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        let first = self.first?;
        if date < first || date > self.end || date.weekday() != self.weekday {
            return None;
        }
        usize::try_from(date.signed_duration_since(first).num_days() / 7).ok()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.position(date).is_some()
    }

    /// Nombre de jours d'ancrage dans la séquence.
    pub fn len(&self) -> usize {
        match self.first {
            Some(first) => (self.end.signed_duration_since(first).num_days() / 7 + 1) as usize,
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

/// Intervalle fermé [start, end] restreint aux jours d'ancrage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanningHorizon {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub weekday: Weekday,
}

impl PlanningHorizon {
    pub fn new(start: NaiveDate, end: NaiveDate, weekday: Weekday) -> Self {
        Self {
            start,
            end,
            weekday,
        }
    }

    /// Jours d'ancrage de `start` à `end` inclus, par pas de 7 jours.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut out = Vec::new();
        let mut current = next_anchor_on_or_after(self.start, self.weekday);
        while let Some(day) = current {
            if day > self.end {
                break;
            }
            out.push(day);
            current = day.checked_add_signed(Duration::days(7));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn saturdays_of_2026() {
        let cal = AnchorCalendar::saturdays_of(2026).unwrap();
        assert_eq!(cal.first(), Some(d(2026, 1, 3)));
        assert_eq!(cal.len(), 52);
        assert_eq!(cal.position(d(2026, 1, 3)), Some(0));
        assert_eq!(cal.position(d(2026, 2, 21)), Some(7));
        assert_eq!(cal.position(d(2026, 12, 26)), Some(51));
    }

    #[test]
    fn position_rejects_dates_outside_sequence() {
        let cal = AnchorCalendar::saturdays_of(2026).unwrap();
        // vendredi
        assert_eq!(cal.position(d(2026, 2, 20)), None);
        assert_eq!(cal.position(d(2025, 12, 27)), None);
        assert_eq!(cal.position(d(2027, 1, 2)), None);
    }

    #[test]
    fn horizon_starts_on_next_anchor_day() {
        // 2026-10-19 est un lundi
        let horizon = PlanningHorizon::new(d(2026, 10, 19), d(2026, 11, 14), Weekday::Sat);
        assert_eq!(
            horizon.dates(),
            vec![d(2026, 10, 24), d(2026, 10, 31), d(2026, 11, 7), d(2026, 11, 14)]
        );
    }

    #[test]
    fn horizon_includes_start_when_it_is_an_anchor_day() {
        let horizon = PlanningHorizon::new(d(2026, 2, 21), d(2026, 2, 28), Weekday::Sat);
        assert_eq!(horizon.dates(), vec![d(2026, 2, 21), d(2026, 2, 28)]);
    }

    #[test]
    fn inverted_horizon_is_empty() {
        let horizon = PlanningHorizon::new(d(2026, 3, 1), d(2026, 2, 1), Weekday::Sat);
        assert!(horizon.dates().is_empty());
    }

    #[test]
    fn calendar_without_anchor_day_is_empty() {
        // du lundi au vendredi
        let cal = AnchorCalendar::new(Weekday::Sat, d(2026, 10, 19), d(2026, 10, 23));
        assert!(cal.is_empty());
        assert_eq!(cal.len(), 0);
        assert_eq!(cal.position(d(2026, 10, 24)), None);
    }
}

mod calendar;
mod edit;
mod equity;
mod pairs;
mod planner;
mod query;
mod regenerate;
mod types;

pub use calendar::{next_anchor_on_or_after, AnchorCalendar, PlanningHorizon};
pub use equity::{back_to_back_counts, count_load, equity_report, LoadCounts, MemberLoad};
pub use pairs::generate_pairs;
pub use planner::{cycle_index, plan};
pub use query::{assignments_in_month, upcoming};
pub use regenerate::merge_plan;
pub use types::{RegenerationReport, RotaError};

use crate::model::{Assignment, Member, MemberId, PairCycle, Roster};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::warn;

/// Rota : encapsule un Roster et le calendrier d'ancrage déployé
#[derive(Debug, Clone)]
pub struct Rota {
    roster: Roster,
    calendar: AnchorCalendar,
    anchor_offset: i64,
}

impl Rota {
    pub fn new(calendar: AnchorCalendar, anchor_offset: i64) -> Self {
        Self {
            roster: Roster::default(),
            calendar,
            anchor_offset,
        }
    }

    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
    pub fn into_roster(self) -> Roster {
        self.roster
    }
    pub fn calendar(&self) -> &AnchorCalendar {
        &self.calendar
    }
    pub fn anchor_offset(&self) -> i64 {
        self.anchor_offset
    }

    /// Ajoute des membres ; le lot entier est refusé si un identifiant est déjà
    /// pris (roster ou lot) ou si une étiquette n'a pas 2 caractères.
    pub fn add_members(&mut self, members: Vec<Member>) -> Result<(), RotaError> {
        let mut seen = BTreeSet::new();
        for member in &members {
            if !member.has_valid_label() {
                return Err(RotaError::InvalidLabel(member.id.as_str().to_string()));
            }
            if self.roster.find_member(&member.id).is_some() || !seen.insert(&member.id) {
                return Err(RotaError::DuplicateMember(member.id.as_str().to_string()));
            }
        }
        self.roster.members.extend(members);
        Ok(())
    }

    pub fn set_active(&mut self, id: &MemberId, active: bool) -> Result<(), RotaError> {
        let member = self
            .roster
            .find_member_mut(id)
            .ok_or_else(|| RotaError::UnknownMember(id.as_str().to_string()))?;
        member.active = active;
        Ok(())
    }

    pub fn pair_cycle(&self) -> PairCycle {
        generate_pairs(&self.roster.members)
    }

    /// Plan calculé sur un horizon, sans toucher au roster.
    pub fn preview(&self, horizon: PlanningHorizon) -> Vec<Assignment> {
        plan(
            &horizon.dates(),
            &self.pair_cycle(),
            &self.calendar,
            self.anchor_offset,
        )
    }

    /// Régénère les samedis de `today` à `horizon_end` (lignes `planned` uniquement).
    ///
    /// L'horizon est borné à la fin de la séquence d'ancrage.
    pub fn regenerate(&mut self, today: NaiveDate, horizon_end: NaiveDate) -> RegenerationReport {
        let end = horizon_end.min(self.calendar.end());
        if end < horizon_end {
            warn!(%horizon_end, anchor_end = %end, "horizon clamped to the anchor sequence");
        }
        let horizon = PlanningHorizon::new(today, end, self.calendar.weekday());
        let fresh = self.preview(horizon);
        let (merged, report) = merge_plan(&self.roster.assignments, fresh, &horizon);
        self.roster.assignments = merged;
        report
    }

    pub fn modify_assignment(
        &mut self,
        date: NaiveDate,
        first: &MemberId,
        second: &MemberId,
        note: Option<String>,
    ) -> Result<(), RotaError> {
        edit::modify_assignment(self, date, first, second, note)
    }

    pub fn cancel_assignment(
        &mut self,
        date: NaiveDate,
        note: Option<String>,
    ) -> Result<(), RotaError> {
        edit::cancel_assignment(self, date, note)
    }

    pub fn load_counts(&self) -> LoadCounts {
        count_load(&self.roster.assignments, &self.roster.members)
    }

    pub fn equity(&self) -> Vec<MemberLoad> {
        let slots = self
            .roster
            .assignments
            .iter()
            .filter(|a| !a.is_cancelled())
            .count();
        equity_report(&self.load_counts(), &self.roster.members, slots)
    }
}

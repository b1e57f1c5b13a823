use super::calendar::PlanningHorizon;
use super::types::RegenerationReport;
use crate::model::{Assignment, AssignmentStatus};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Fusionne un plan frais dans les assignations existantes (upsert par date).
///
/// Seules les lignes `planned` sont remplacées ; `modified` et `cancelled`
/// restent intactes. Une ligne `planned` de l'horizon que le plan frais ne
/// couvre plus est supprimée ; hors horizon, rien ne bouge. Le résultat est
/// trié par date.
pub fn merge_plan(
    existing: &[Assignment],
    fresh: Vec<Assignment>,
    horizon: &PlanningHorizon,
) -> (Vec<Assignment>, RegenerationReport) {
    let mut by_date: BTreeMap<NaiveDate, Assignment> =
        existing.iter().map(|a| (a.date, a.clone())).collect();
    let mut report = RegenerationReport::default();

    let covered: BTreeSet<NaiveDate> = fresh.iter().map(|a| a.date).collect();
    by_date.retain(|date, a| {
        let stale = a.status == AssignmentStatus::Planned
            && *date >= horizon.start
            && *date <= horizon.end
            && !covered.contains(date);
        if stale {
            report.removed += 1;
        }
        !stale
    });

    for assignment in fresh {
        let current = by_date.get(&assignment.date).map(|a| a.status);
        match current {
            None => {
                report.inserted += 1;
                by_date.insert(assignment.date, assignment);
            }
            Some(AssignmentStatus::Planned) => {
                report.replaced += 1;
                by_date.insert(assignment.date, assignment);
            }
            Some(AssignmentStatus::Modified | AssignmentStatus::Cancelled) => {
                report.preserved += 1;
            }
        }
    }

    info!(
        inserted = report.inserted,
        replaced = report.replaced,
        preserved = report.preserved,
        removed = report.removed,
        "plan merged"
    );
    (by_date.into_values().collect(), report)
}

use super::{Rota, RotaError};
use crate::model::{Assignment, AssignmentStatus, MemberId, Pair};
use chrono::NaiveDate;
use tracing::info;

pub(super) fn modify_assignment(
    rota: &mut Rota,
    date: NaiveDate,
    first: &MemberId,
    second: &MemberId,
    note: Option<String>,
) -> Result<(), RotaError> {
    let pair = Pair::new(first.clone(), second.clone())?;
    for id in [first, second] {
        if rota.roster.find_member(id).is_none() {
            return Err(RotaError::UnknownMember(id.as_str().to_string()));
        }
    }
    if !rota.calendar.contains(date) {
        return Err(RotaError::NotAnchorDay(date));
    }

    match rota.roster.find_assignment_mut(date) {
        Some(existing) => {
            check_transition(existing.status, AssignmentStatus::Modified)?;
            existing.first = Some(pair.first().clone());
            existing.second = Some(pair.second().clone());
            existing.status = AssignmentStatus::Modified;
            existing.note = note;
        }
        None => {
            let mut row = Assignment::planned(date, &pair);
            row.status = AssignmentStatus::Modified;
            row.note = note;
            rota.roster.assignments.push(row);
            rota.roster.assignments.sort_by_key(|a| a.date);
        }
    }

    info!(%date, first = %first, second = %second, "assignment modified");
    Ok(())
}

pub(super) fn cancel_assignment(
    rota: &mut Rota,
    date: NaiveDate,
    note: Option<String>,
) -> Result<(), RotaError> {
    let Some(existing) = rota.roster.find_assignment_mut(date) else {
        return Err(RotaError::UnknownAssignment(date));
    };
    check_transition(existing.status, AssignmentStatus::Cancelled)?;
    existing.status = AssignmentStatus::Cancelled;
    if note.is_some() {
        existing.note = note;
    }

    info!(%date, "assignment cancelled");
    Ok(())
}

fn check_transition(from: AssignmentStatus, to: AssignmentStatus) -> Result<(), RotaError> {
    if from.can_become(to) {
        Ok(())
    } else {
        Err(RotaError::InvalidTransition { from, to })
    }
}

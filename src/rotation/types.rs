use crate::model::{AssignmentStatus, MemberId};
use chrono::NaiveDate;
use thiserror::Error;

/// Bilan d'une régénération.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegenerationReport {
    pub inserted: usize,
    pub replaced: usize,
    pub preserved: usize,
    /// Lignes `planned` de l'horizon que le nouveau plan ne couvre plus.
    pub removed: usize,
}

#[derive(Error, Debug)]
pub enum RotaError {
    #[error("the two members of a pair must differ: {0}")]
    SameMember(MemberId),
    #[error("label must be exactly 2 characters for member {0}")]
    InvalidLabel(String),
    #[error("unknown member: {0}")]
    UnknownMember(String),
    #[error("duplicate member id: {0}")]
    DuplicateMember(String),
    #[error("{0} is not an anchor day of the planning calendar")]
    NotAnchorDay(NaiveDate),
    #[error("no assignment on {0}")]
    UnknownAssignment(NaiveDate),
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: AssignmentStatus,
        to: AssignmentStatus,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

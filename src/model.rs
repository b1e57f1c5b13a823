use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::rotation::RotaError;

/// Identifiant fort pour Member (stable, jamais réutilisé)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn default_active() -> bool {
    true
}

/// Membre de l'équipe du samedi
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    /// Étiquette courte (2 caractères) pour le rendu compact.
    pub label: String,
    pub color: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Member {
    pub fn new<N: Into<String>, L: Into<String>, C: Into<String>>(
        name: N,
        label: L,
        color: C,
    ) -> Self {
        Self::with_id(MemberId::random(), name, label, color)
    }

    pub fn with_id<N: Into<String>, L: Into<String>, C: Into<String>>(
        id: MemberId,
        name: N,
        label: L,
        color: C,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            label: label.into(),
            color: color.into(),
            active: true,
        }
    }

    /// L'étiquette compacte doit faire exactement 2 caractères.
    pub fn has_valid_label(&self) -> bool {
        self.label.chars().count() == 2
    }

    /// Prénom seul, pour les affichages courts.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// Binôme non ordonné de deux membres distincts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    first: MemberId,
    second: MemberId,
}

impl Pair {
    /// Crée un binôme en validant que les deux membres diffèrent.
    pub fn new(first: MemberId, second: MemberId) -> Result<Self, RotaError> {
        if first == second {
            return Err(RotaError::SameMember(first));
        }
        Ok(Self { first, second })
    }

    pub fn first(&self) -> &MemberId {
        &self.first
    }
    pub fn second(&self) -> &MemberId {
        &self.second
    }

    pub fn contains(&self, id: &MemberId) -> bool {
        &self.first == id || &self.second == id
    }

    pub fn shares_member(&self, other: &Pair) -> bool {
        other.contains(&self.first) || other.contains(&self.second)
    }

    /// Égalité indépendante de l'ordre.
    pub fn same_members(&self, other: &Pair) -> bool {
        other.contains(&self.first) && other.contains(&self.second)
    }
}

/// Cycle ordonné de binômes utilisé pour paver l'horizon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCycle(Vec<Pair>);

impl PairCycle {
    pub fn new(pairs: Vec<Pair>) -> Self {
        Self(pairs)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&Pair> {
        self.0.get(index)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Pair> {
        self.0.iter()
    }
    pub fn as_slice(&self) -> &[Pair] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a PairCycle {
    type Item = &'a Pair;
    type IntoIter = std::slice::Iter<'a, Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Cycle de vie d'une assignation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Planned,
    Modified,
    Cancelled,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Planned => "planned",
            AssignmentStatus::Modified => "modified",
            AssignmentStatus::Cancelled => "cancelled",
        }
    }

    /// Transitions manuelles autorisées.
    pub fn can_become(self, next: AssignmentStatus) -> bool {
        matches!(
            (self, next),
            (AssignmentStatus::Planned, AssignmentStatus::Modified)
                | (AssignmentStatus::Planned, AssignmentStatus::Cancelled)
                | (AssignmentStatus::Modified, AssignmentStatus::Modified)
        )
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assignation d'un samedi. `None` représente une place vide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub date: NaiveDate,
    pub first: Option<MemberId>,
    pub second: Option<MemberId>,
    pub status: AssignmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Assignment {
    /// Assignation générée par le moteur.
    pub fn planned(date: NaiveDate, pair: &Pair) -> Self {
        Self {
            date,
            first: Some(pair.first().clone()),
            second: Some(pair.second().clone()),
            status: AssignmentStatus::Planned,
            note: None,
        }
    }

    pub fn pair(&self) -> Option<Pair> {
        match (&self.first, &self.second) {
            (Some(a), Some(b)) => Pair::new(a.clone(), b.clone()).ok(),
            _ => None,
        }
    }

    pub fn seats(&self) -> impl Iterator<Item = &MemberId> {
        self.first.iter().chain(self.second.iter())
    }

    pub fn involves(&self, id: &MemberId) -> bool {
        self.seats().any(|s| s == id)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == AssignmentStatus::Cancelled
    }
}

/// Roster complet : membres + assignations
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub members: Vec<Member>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Roster {
    pub fn find_member<'a>(&'a self, id: &MemberId) -> Option<&'a Member> {
        self.members.iter().find(|m| &m.id == id)
    }
    pub fn find_member_mut(&mut self, id: &MemberId) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| &m.id == id)
    }
    pub fn active_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.active)
    }
    pub fn find_assignment<'a>(&'a self, date: NaiveDate) -> Option<&'a Assignment> {
        self.assignments.iter().find(|a| a.date == date)
    }
    pub fn find_assignment_mut(&mut self, date: NaiveDate) -> Option<&mut Assignment> {
        self.assignments.iter_mut().find(|a| a.date == date)
    }
    /// Libellé court d'une place (`-` si vide ou inconnue).
    pub fn seat_label(&self, seat: Option<&MemberId>) -> &str {
        seat.and_then(|id| self.find_member(id))
            .map(|m| m.label.as_str())
            .unwrap_or("-")
    }
}

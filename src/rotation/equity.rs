use crate::model::{Assignment, Member, MemberId, PairCycle};
use std::collections::BTreeMap;

/// Nombre de samedis par membre.
pub type LoadCounts = BTreeMap<MemberId, u32>;

/// Compte les samedis tenus par membre (assignations annulées exclues).
///
/// Chaque membre du roster part de 0, actif ou non ; les places vides ne
/// comptent pas.
pub fn count_load(assignments: &[Assignment], roster: &[Member]) -> LoadCounts {
    let mut counts: LoadCounts = roster.iter().map(|m| (m.id.clone(), 0)).collect();

    for assignment in assignments.iter().filter(|a| !a.is_cancelled()) {
        for seat in [&assignment.first, &assignment.second] {
            match seat {
                Some(id) => *counts.entry(id.clone()).or_insert(0) += 1,
                None => {}
            }
        }
    }

    counts
}

/// Charge d'un membre actif rapportée à la cible équitable.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberLoad {
    pub id: MemberId,
    pub name: String,
    pub count: u32,
    /// Part des créneaux tenus (0.0 ..= 1.0).
    pub share: f64,
    pub target: f64,
    pub drift: f64,
}

/// Rapport d'équité sur `slots` créneaux non annulés.
///
/// La cible vaut `2 * slots / actifs` (50 % des créneaux avec 4 membres).
pub fn equity_report(counts: &LoadCounts, roster: &[Member], slots: usize) -> Vec<MemberLoad> {
    let active: Vec<&Member> = roster.iter().filter(|m| m.active).collect();
    if active.is_empty() {
        return Vec::new();
    }
    let target = 2.0 * slots as f64 / active.len() as f64;

    active
        .into_iter()
        .map(|m| {
            let count = counts.get(&m.id).copied().unwrap_or(0);
            let share = if slots == 0 {
                0.0
            } else {
                f64::from(count) / slots as f64
            };
            MemberLoad {
                id: m.id.clone(),
                name: m.name.clone(),
                count,
                share,
                target,
                drift: f64::from(count) - target,
            }
        })
        .collect()
}

/// Enchaînements dos-à-dos par membre sur un cycle bouclé (dernier -> premier inclus).
pub fn back_to_back_counts(cycle: &PairCycle) -> BTreeMap<MemberId, u32> {
    let mut out = BTreeMap::new();
    let pairs = cycle.as_slice();
    if pairs.len() < 2 {
        return out;
    }

    for pair in pairs {
        for id in [pair.first(), pair.second()] {
            out.entry(id.clone()).or_insert(0);
        }
    }

    for (i, current) in pairs.iter().enumerate() {
        let next = &pairs[(i + 1) % pairs.len()];
        for id in [current.first(), current.second()] {
            if next.contains(id) {
                *out.entry(id.clone()).or_insert(0) += 1;
            }
        }
    }
    out
}

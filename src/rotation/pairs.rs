use crate::model::{Member, Pair, PairCycle};
use tracing::debug;

/// Ordre équitable pour 4 membres actifs, indexé par rang relatif (m0..m3).
///
/// Retenu hors ligne parmi les 720 permutations des 6 binômes : il minimise la
/// variance des enchaînements dos-à-dos par membre quand le cycle boucle.
const FOUR_MEMBER_CYCLE: [(usize, usize); 6] = [(2, 3), (0, 1), (0, 3), (1, 2), (1, 3), (0, 2)];

/// Construit le cycle de binômes à partir des membres actifs (ordre fourni).
pub fn generate_pairs(roster: &[Member]) -> PairCycle {
    let active: Vec<&Member> = roster.iter().filter(|m| m.active).collect();

    let indices: Vec<(usize, usize)> = match active.len() {
        0 | 1 => Vec::new(),
        4 => FOUR_MEMBER_CYCLE.to_vec(),
        n => (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect(),
    };

    let pairs: Vec<Pair> = indices
        .into_iter()
        .filter_map(|(i, j)| Pair::new(active[i].id.clone(), active[j].id.clone()).ok())
        .collect();

    debug!(active = active.len(), pairs = pairs.len(), "pair cycle generated");
    PairCycle::new(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberId;

    fn member(id: &str) -> Member {
        Member::with_id(MemberId::new(id), id, id, "#000000")
    }

    fn ids(cycle: &PairCycle) -> Vec<(String, String)> {
        cycle
            .iter()
            .map(|p| (p.first().to_string(), p.second().to_string()))
            .collect()
    }

    fn appearances(cycle: &PairCycle, id: &str) -> usize {
        cycle.iter().filter(|p| p.contains(&MemberId::new(id))).count()
    }

    #[test]
    fn four_members_use_the_fixed_table() {
        let roster: Vec<Member> = ["A", "B", "C", "D"].into_iter().map(member).collect();
        let cycle = generate_pairs(&roster);
        let expected = [("C", "D"), ("A", "B"), ("A", "D"), ("B", "C"), ("B", "D"), ("A", "C")];
        let expected: Vec<(String, String)> = expected
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        assert_eq!(ids(&cycle), expected);
        for id in ["A", "B", "C", "D"] {
            assert_eq!(appearances(&cycle, id), 3);
        }
        let pairs = cycle.as_slice();
        let sharing = (0..pairs.len())
            .filter(|i| pairs[*i].shares_member(&pairs[(i + 1) % pairs.len()]))
            .count();
        assert_eq!(sharing, 3);
    }

    #[test]
    fn other_sizes_emit_every_combination() {
        for n in [2usize, 3, 5, 6, 7] {
            let roster: Vec<Member> = (0..n).map(|i| member(&format!("m{i}"))).collect();
            let cycle = generate_pairs(&roster);
            assert_eq!(cycle.len(), n * (n - 1) / 2, "n = {n}");
            for m in &roster {
                assert_eq!(appearances(&cycle, m.id.as_str()), n - 1);
            }
            for (i, a) in cycle.iter().enumerate() {
                assert_ne!(a.first(), a.second());
                for b in cycle.iter().skip(i + 1) {
                    assert!(!a.same_members(b));
                }
            }
        }
    }

    #[test]
    fn three_members_in_lexicographic_index_order() {
        let roster: Vec<Member> = ["X", "Y", "Z"].into_iter().map(member).collect();
        let cycle = generate_pairs(&roster);
        assert_eq!(
            ids(&cycle),
            vec![
                ("X".to_string(), "Y".to_string()),
                ("X".to_string(), "Z".to_string()),
                ("Y".to_string(), "Z".to_string()),
            ]
        );
    }

    #[test]
    fn fewer_than_two_active_yields_empty_cycle() {
        assert!(generate_pairs(&[]).is_empty());
        assert!(generate_pairs(&[member("solo")]).is_empty());

        let mut inactive = member("B");
        inactive.active = false;
        assert!(generate_pairs(&[member("A"), inactive]).is_empty());
    }

    #[test]
    fn deactivating_one_of_four_shrinks_cycle() {
        let mut roster: Vec<Member> = ["A", "B", "C", "D"].into_iter().map(member).collect();
        assert_eq!(generate_pairs(&roster).len(), 6);
        roster[1].active = false;
        let cycle = generate_pairs(&roster);
        assert_eq!(cycle.len(), 3);
        assert_eq!(appearances(&cycle, "B"), 0);
    }
}

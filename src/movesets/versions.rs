//! Which releases take part in a search and what it costs to trade between them.

use crate::costs::{Cost, CostKind, CostTable};
use crate::errors::{MovesetError, MovesetResult};
use crate::pokedex::Pokedex;
use crate::search::{AStar, Edge, SearchSpace};
use schema::VersionGroupId;
use std::collections::{BTreeMap, BTreeSet};

/// Whether anything can be traded from a game of `from` to a game of `to`.
///
/// Generations 1 and 2 only trade among themselves. Later generations only
/// transfer forward, one generation at a time.
pub fn trade_allowed(from: u8, to: u8) -> bool {
    if from == to {
        true
    } else if from <= 2 || to <= 2 {
        from <= 2 && to <= 2
    } else {
        to == from + 1
    }
}

/// The releases reachable by the goal release, with their trade distances to it.
#[derive(Debug, Clone)]
pub struct Releases {
    generations: BTreeMap<VersionGroupId, u8>,
    distances: BTreeMap<VersionGroupId, Cost>,
    trade: Cost,
    transfer: Cost,
}

impl Releases {
    /// Keep only the version groups from which a Pokemon could eventually be
    /// traded into `goal`, never passing through an excluded one.
    pub fn new(
        pokedex: &Pokedex,
        goal: VersionGroupId,
        excluded: &BTreeSet<VersionGroupId>,
        costs: &CostTable,
    ) -> MovesetResult<Self> {
        let all: BTreeMap<VersionGroupId, u8> = pokedex
            .version_groups()
            .filter(|vg| vg.id == goal || !excluded.contains(&vg.id))
            .map(|vg| (vg.id, vg.generation))
            .collect();
        if !all.contains_key(&goal) {
            return Err(MovesetError::UnknownVersionGroup(goal));
        }

        let mut releases = Releases {
            generations: all,
            distances: BTreeMap::new(),
            trade: costs.get(CostKind::Trade),
            transfer: costs.get(CostKind::Transfer),
        };
        let reverse = ReverseTrades {
            releases: &releases,
        };
        let distances: BTreeMap<VersionGroupId, Cost> = AStar::new(&reverse, goal)
            .map(|path| (path.goal().copied().unwrap_or(goal), path.cost()))
            .collect();

        releases.generations.retain(|vg, _| distances.contains_key(vg));
        releases.distances = distances;
        releases.log_trade_table(excluded);
        Ok(releases)
    }

    pub fn contains(&self, version_group: VersionGroupId) -> bool {
        self.generations.contains_key(&version_group)
    }

    pub fn generation(&self, version_group: VersionGroupId) -> Option<u8> {
        self.generations.get(&version_group).copied()
    }

    /// Participating version groups in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (VersionGroupId, u8)> + '_ {
        self.generations.iter().map(|(&vg, &gen)| (vg, gen))
    }

    pub fn ids(&self) -> BTreeSet<VersionGroupId> {
        self.generations.keys().copied().collect()
    }

    /// Cost of trading between two version groups, `None` if impossible.
    pub fn trade_cost(&self, from: VersionGroupId, to: VersionGroupId) -> Option<Cost> {
        self.trade_cost_carrying(from, to, std::iter::empty())
    }

    /// Like [`Releases::trade_cost`], but every carried thing (the Pokemon, its
    /// moves) must already exist in the destination generation.
    pub fn trade_cost_carrying(
        &self,
        from: VersionGroupId,
        to: VersionGroupId,
        mut thing_generations: impl Iterator<Item = u8>,
    ) -> Option<Cost> {
        let gen_from = self.generation(from)?;
        let gen_to = self.generation(to)?;
        if from == to || !trade_allowed(gen_from, gen_to) {
            return None;
        }
        if thing_generations.any(|gen| gen > gen_to) {
            return None;
        }
        if gen_from == gen_to || gen_to <= 2 {
            Some(self.trade)
        } else {
            Some(self.trade + self.transfer)
        }
    }

    /// Cheapest chain of trades from `version_group` to the goal release.
    pub fn distance(&self, version_group: VersionGroupId) -> Option<Cost> {
        self.distances.get(&version_group).copied()
    }

    /// Admissible estimate of the trading still needed from `version_group`.
    pub fn estimate(&self, version_group: VersionGroupId) -> Cost {
        self.distance(version_group)
            .unwrap_or_else(|| self.trade + self.trade)
    }

    fn log_trade_table(&self, excluded: &BTreeSet<VersionGroupId>) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        log::debug!("Excluded version groups: {:?}", excluded);
        let ids: Vec<VersionGroupId> = self.generations.keys().copied().collect();
        let header: String = ids.iter().map(|vg| format!("{:>5}", vg.0)).collect();
        log::debug!("Trade cost table:\n{:>5}{}", "", header);
        for &from in &ids {
            let row: String = ids
                .iter()
                .map(|&to| match self.trade_cost(from, to) {
                    Some(cost) => format!("{:>5}", cost.0),
                    None => format!("{:>5}", "---"),
                })
                .collect();
            log::debug!("{:>5}{}", from.0, row);
        }
    }
}

/// Trade graph walked backwards from the goal release.
struct ReverseTrades<'a> {
    releases: &'a Releases,
}

impl SearchSpace for ReverseTrades<'_> {
    type Node = VersionGroupId;
    type Transition = ();

    fn expand(&self, to: &VersionGroupId) -> Vec<Edge<VersionGroupId, ()>> {
        self.releases
            .generations
            .keys()
            .filter_map(|&from| {
                self.releases
                    .trade_cost(from, *to)
                    .map(|cost| Edge::new(cost, (), from))
            })
            .collect()
    }

    fn is_goal(&self, _: &VersionGroupId) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movesets::tests::common::DexBuilder;
    use ordered_float::OrderedFloat;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1, true)]
    #[case(1, 2, true)]
    #[case(2, 1, true)]
    #[case(2, 3, false)]
    #[case(3, 2, false)]
    #[case(3, 4, true)]
    #[case(4, 3, false)]
    #[case(3, 5, false)]
    #[case(5, 5, true)]
    fn test_trade_rule(#[case] from: u8, #[case] to: u8, #[case] allowed: bool) {
        assert_eq!(trade_allowed(from, to), allowed);
    }

    fn releases(goal: u8, excluded: &[u8]) -> Releases {
        let dex = DexBuilder::new()
            .version_group(1, 1)
            .version_group(3, 2)
            .version_group(5, 3)
            .version_group(6, 3)
            .version_group(8, 4)
            .build();
        let excluded = excluded.iter().map(|&id| VersionGroupId(id)).collect();
        Releases::new(&dex, VersionGroupId(goal), &excluded, &CostTable::default()).unwrap()
    }

    #[test]
    fn test_distances_to_goal() {
        let releases = releases(8, &[]);
        // Generations 1-2 can never reach generation 4.
        assert_eq!(
            releases.ids(),
            [5, 6, 8].into_iter().map(VersionGroupId).collect()
        );
        assert_eq!(releases.distance(VersionGroupId(8)), Some(OrderedFloat(0.0)));
        assert_eq!(releases.distance(VersionGroupId(5)), Some(OrderedFloat(400.0)));
        assert_eq!(releases.distance(VersionGroupId(1)), None);
        assert_eq!(releases.estimate(VersionGroupId(1)), OrderedFloat(400.0));
    }

    #[test]
    fn test_exclusions_cut_trade_paths() {
        let gen2 = releases(3, &[1]);
        assert_eq!(gen2.ids(), [3].into_iter().map(VersionGroupId).collect());

        // The goal release itself is never excluded.
        let gen1 = releases(1, &[1]);
        assert!(gen1.contains(VersionGroupId(1)));
        assert!(gen1.contains(VersionGroupId(3)));
    }

    #[test]
    fn test_carried_moves_must_exist_in_destination() {
        let releases = releases(8, &[]);
        let from = VersionGroupId(6);
        let to = VersionGroupId(8);
        assert_eq!(
            releases.trade_cost_carrying(from, to, [3, 4].into_iter()),
            Some(OrderedFloat(400.0))
        );
        assert_eq!(releases.trade_cost_carrying(to, from, std::iter::empty()), None);
        assert_eq!(
            releases.trade_cost_carrying(VersionGroupId(5), from, [4].into_iter()),
            None
        );
        assert_eq!(releases.trade_cost(from, from), None);
    }
}

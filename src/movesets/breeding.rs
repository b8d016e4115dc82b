//! Breeding feasibility: which egg groups can ever pass which goal moves on.
//!
//! The table is built backwards from the goal family. An entry
//! `(group, moves) -> hops` says that a parent in `group` knowing `moves` can
//! get them into a goal-family egg in `hops` breedings, learning some of the
//! moves afresh along the way. Groups without entries are useless for
//! breeding and never expanded.

use super::moveset::MoveSet;
use crate::costs::{CostKind, CostTable};
use crate::pokedex::{Pokedex, DITTO_GROUP, NO_EGGS_GROUP};
use schema::{EggGroupId, EvolutionChainId, LearnMethod, MoveId, SpeciesId, VersionGroupId};
use std::collections::{BTreeMap, BTreeSet};

/// How the goal family itself can pick up each goal move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilyMoves {
    /// Learnable without breeding, more cheaply than a breeding would cost.
    pub easy: MoveSet,
    /// Learnable without breeding at all.
    pub non_egg: MoveSet,
    /// Receivable from a parent when a goal-family egg hatches.
    pub inheritable: MoveSet,
}

impl FamilyMoves {
    pub fn new(
        pokedex: &Pokedex,
        family: EvolutionChainId,
        goal_moves: &MoveSet,
        releases: &BTreeMap<VersionGroupId, u8>,
        costs: &CostTable,
    ) -> Self {
        let mut easy = BTreeSet::new();
        let mut non_egg = BTreeSet::new();
        let mut inheritable = BTreeSet::new();
        for &species in pokedex.family_members(family) {
            for (&vg, &generation) in releases {
                for record in pokedex.moves_learnable(species, vg) {
                    if !goal_moves.contains(record.move_id) {
                        continue;
                    }
                    if is_inheritable(record.method) {
                        inheritable.insert(record.move_id);
                    }
                    if record.method != LearnMethod::Egg {
                        non_egg.insert(record.move_id);
                        if costs.learn_cost(record.method, generation) < costs.get(CostKind::Breed)
                        {
                            easy.insert(record.move_id);
                        }
                    }
                }
            }
        }
        let collect = |set: BTreeSet<MoveId>| MoveSet::try_collect(set).unwrap_or_default();
        FamilyMoves {
            easy: collect(easy),
            non_egg: collect(non_egg),
            inheritable: collect(inheritable),
        }
    }

    /// Goal moves that can only be had by breeding.
    pub fn egg_moves(&self, goal_moves: &MoveSet) -> MoveSet {
        goal_moves.difference(&self.non_egg)
    }

    /// Goal moves no easier to get than by breeding.
    pub fn hard_moves(&self, goal_moves: &MoveSet) -> MoveSet {
        goal_moves.difference(&self.easy)
    }
}

/// Learn methods whose moves a hatched child can receive from its parent.
pub fn is_inheritable(method: LearnMethod) -> bool {
    matches!(
        method,
        LearnMethod::Egg | LearnMethod::Machine | LearnMethod::LevelUp | LearnMethod::LightBallEgg
    )
}

/// Whether a species' egg groups let it breed at all.
pub fn can_breed(pokedex: &Pokedex, species: SpeciesId) -> bool {
    let groups = pokedex.breeding_groups(species);
    !groups.is_empty()
        && groups
            .iter()
            .all(|&g| !is_special_group(pokedex, g))
}

fn is_special_group(pokedex: &Pokedex, group: EggGroupId) -> bool {
    Some(group) == pokedex.egg_group_by_identifier(NO_EGGS_GROUP)
        || Some(group) == pokedex.egg_group_by_identifier(DITTO_GROUP)
}

#[derive(Debug, Clone, Default)]
pub struct BreedingTable {
    entries: BTreeMap<EggGroupId, BTreeMap<MoveSet, u32>>,
}

impl BreedingTable {
    /// Minimum breedings for a parent in `group` knowing `moves`.
    pub fn get(&self, group: EggGroupId, moves: &MoveSet) -> Option<u32> {
        self.entries.get(&group)?.get(moves).copied()
    }

    /// Groups that can deliver at least one useful move subset.
    pub fn useful_groups(&self) -> impl Iterator<Item = EggGroupId> + '_ {
        self.entries
            .iter()
            .filter(|(_, sets)| !sets.is_empty())
            .map(|(&group, _)| group)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&mut self, group: EggGroupId, moves: &MoveSet, hops: u32) -> bool {
        let sets = self.entries.entry(group).or_default();
        match sets.get(moves) {
            Some(&known) if known <= hops => false,
            _ => {
                sets.insert(moves.clone(), hops);
                true
            }
        }
    }
}

/// Inputs for building a [`BreedingTable`].
pub struct BreedingTableBuilder<'a> {
    pub pokedex: &'a Pokedex,
    pub goal_family: EvolutionChainId,
    pub goal_moves: &'a MoveSet,
    pub family_moves: &'a FamilyMoves,
    pub releases: &'a BTreeSet<VersionGroupId>,
    pub excluded_families: &'a BTreeSet<EvolutionChainId>,
}

/// Per-group pools and adjacency, gathered once before the walk.
struct Pools {
    /// Goal moves some non-goal member of the group can know, by any method.
    carry: BTreeMap<EggGroupId, MoveSet>,
    /// Goal moves some non-goal member of the group can learn without breeding.
    learn: BTreeMap<EggGroupId, MoveSet>,
    adjacent: BTreeMap<EggGroupId, BTreeSet<EggGroupId>>,
}

impl Pools {
    fn carry(&self, group: EggGroupId) -> MoveSet {
        self.carry.get(&group).cloned().unwrap_or_default()
    }

    fn learn(&self, group: EggGroupId) -> MoveSet {
        self.learn.get(&group).cloned().unwrap_or_default()
    }
}

impl BreedingTableBuilder<'_> {
    pub fn build(&self) -> BreedingTable {
        let pools = self.gather_pools();
        let mut table = BreedingTable::default();

        for group in self.goal_groups() {
            let candidates = self
                .goal_moves
                .intersection(&self.family_moves.inheritable)
                .intersection(&pools.carry(group));
            for moves in candidates.subsets().filter(|s| !s.is_empty()) {
                if table.record(group, &moves, 1) {
                    let mut chain = vec![group];
                    handle(&pools, &mut table, group, &moves, 1, &mut chain);
                }
            }
        }
        log::debug!("Breeding table: {} entries", table.len());
        table
    }

    fn goal_groups(&self) -> BTreeSet<EggGroupId> {
        self.pokedex
            .family_members(self.goal_family)
            .iter()
            .flat_map(|&s| self.pokedex.breeding_groups(s).iter().copied())
            .filter(|&g| !is_special_group(self.pokedex, g))
            .collect()
    }

    fn gather_pools(&self) -> Pools {
        let mut carry: BTreeMap<EggGroupId, BTreeSet<MoveId>> = BTreeMap::new();
        let mut learn: BTreeMap<EggGroupId, BTreeSet<MoveId>> = BTreeMap::new();
        let mut adjacent: BTreeMap<EggGroupId, BTreeSet<EggGroupId>> = BTreeMap::new();

        for species in self.pokedex.all_species() {
            if species.evolution_chain == self.goal_family
                || self.excluded_families.contains(&species.evolution_chain)
                || !can_breed(self.pokedex, species.id)
            {
                continue;
            }
            for &group in &species.egg_groups {
                for &other in &species.egg_groups {
                    if other != group {
                        adjacent.entry(group).or_default().insert(other);
                    }
                }
                for &vg in self.releases {
                    for record in self.pokedex.moves_learnable(species.id, vg) {
                        if !self.goal_moves.contains(record.move_id) {
                            continue;
                        }
                        carry.entry(group).or_default().insert(record.move_id);
                        if !record.method.is_breeding_only() {
                            learn.entry(group).or_default().insert(record.move_id);
                        }
                    }
                }
            }
        }

        let to_sets = |pools: BTreeMap<EggGroupId, BTreeSet<MoveId>>| -> BTreeMap<_, _> {
            pools
                .into_iter()
                .map(|(g, moves)| (g, MoveSet::try_collect(moves).unwrap_or_default()))
                .collect()
        };
        Pools {
            carry: to_sets(carry),
            learn: to_sets(learn),
            adjacent,
        }
    }
}

/// Walk one step further from the goal: a parent in a group adjacent to
/// `group` can hatch a child that is also in `group`.
fn handle(
    pools: &Pools,
    table: &mut BreedingTable,
    group: EggGroupId,
    required: &MoveSet,
    hops: u32,
    chain: &mut Vec<EggGroupId>,
) {
    let Some(neighbours) = pools.adjacent.get(&group) else {
        return;
    };
    let fresh_pool = required.intersection(&pools.learn(group));
    for &next in neighbours {
        if chain.contains(&next) {
            continue;
        }
        for fresh in fresh_pool.subsets() {
            let remainder = required.difference(&fresh);
            if remainder.is_empty() {
                // The child learns everything itself; no further breeding needed.
                continue;
            }
            if !remainder.is_subset(&pools.carry(group)) || !remainder.is_subset(&pools.carry(next))
            {
                continue;
            }
            if table.record(next, &remainder, hops + 1) {
                chain.push(next);
                handle(pools, table, next, &remainder, hops + 1, chain);
                chain.pop();
            }
        }
    }
}

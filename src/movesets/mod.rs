//! The moveset legality search.
//!
//! A [`MovesetSearch`] is one question ("can this Pokemon know these moves in
//! this game?") together with everything precomputed to answer it: the
//! participating releases, the goal family's movepool, the breeding
//! feasibility table. It implements [`SearchSpace`], so the generic A* engine
//! can walk it; each yielded path is a cheapest-first way of getting the
//! moveset, or there is none at all.

pub mod actions;
pub mod breeding;
pub mod evolution;
mod expand;
pub mod moveset;
pub mod nodes;
pub mod request;
pub mod versions;

#[cfg(test)]
mod tests;

pub use actions::Action;
pub use moveset::{MoveSet, MAX_MOVES};
pub use nodes::{Node, PokemonState};
pub use request::SearchRequest;

use crate::costs::{Cost, CostTable};
use crate::errors::{MovesetError, MovesetResult};
use crate::pokedex::{Pokedex, SKETCH_MOVE};
use crate::search::{AStar, Edge, Path, SearchSpace};
use breeding::{BreedingTable, BreedingTableBuilder, FamilyMoves};
use schema::{EvolutionChainId, MoveId, SpeciesId, VersionGroupId};
use std::collections::{BTreeMap, BTreeSet};
use versions::Releases;

pub type MovesetPath = Path<Node, Action>;

/// The target of a search, resolved against the Pokedex.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub species: SpeciesId,
    pub family: EvolutionChainId,
    pub version_group: VersionGroupId,
    pub level: u8,
    pub moves: MoveSet,
}

#[derive(Debug)]
pub struct MovesetSearch<'d> {
    pokedex: &'d Pokedex,
    goal: Goal,
    costs: CostTable,
    releases: Releases,
    excluded_families: BTreeSet<EvolutionChainId>,
    family_moves: FamilyMoves,
    egg_moves: MoveSet,
    breeding: BreedingTable,
    /// Moves worth learning at all: goal moves, evolution triggers, Sketch.
    relevant_moves: BTreeSet<MoveId>,
    sketch: Option<MoveId>,
    /// Species a search may begin with.
    starters: BTreeSet<SpeciesId>,
    debug: u8,
}

impl<'d> MovesetSearch<'d> {
    pub fn new(pokedex: &'d Pokedex, request: &SearchRequest) -> MovesetResult<Self> {
        let moves = MoveSet::from_goal(&request.moves)?;
        if !(1..=100).contains(&request.level) {
            return Err(MovesetError::InvalidLevel(request.level));
        }
        let target = pokedex
            .species(request.species)
            .ok_or(MovesetError::UnknownSpecies(request.species))?;
        if let Some(unknown) = moves.iter().find(|&m| pokedex.move_(m).is_none()) {
            return Err(MovesetError::UnknownMove(unknown));
        }
        if pokedex.version_group(request.version_group).is_none() {
            return Err(MovesetError::UnknownVersionGroup(request.version_group));
        }

        let excluded_families = request
            .excluded_species
            .iter()
            .map(|&id| {
                pokedex
                    .species(id)
                    .map(|s| s.evolution_chain)
                    .ok_or(MovesetError::UnknownSpecies(id))
            })
            .collect::<MovesetResult<BTreeSet<_>>>()?;
        if excluded_families.contains(&target.evolution_chain) {
            return Err(MovesetError::TargetExcluded(request.species));
        }
        evolution::check_parents(pokedex)?;

        log::debug!("Specified moves: {}", moves);
        let goal = Goal {
            species: target.id,
            family: target.evolution_chain,
            version_group: request.version_group,
            level: request.level,
            moves,
        };

        let releases = Releases::new(
            pokedex,
            goal.version_group,
            &request.excluded_version_groups,
            &request.costs,
        )?;
        let generations: BTreeMap<VersionGroupId, u8> = releases.iter().collect();
        let family_moves = FamilyMoves::new(
            pokedex,
            goal.family,
            &goal.moves,
            &generations,
            &request.costs,
        );
        log::debug!("Easy moves: {}", family_moves.easy);
        log::debug!("Non-egg moves: {}", family_moves.non_egg);

        let egg_moves = family_moves.egg_moves(&goal.moves);
        let hard_moves = family_moves.hard_moves(&goal.moves);
        let release_ids = releases.ids();
        let breeding = if hard_moves.is_empty() {
            BreedingTable::default()
        } else {
            log::debug!("Hard moves {} need breeding", hard_moves);
            BreedingTableBuilder {
                pokedex,
                goal_family: goal.family,
                goal_moves: &goal.moves,
                family_moves: &family_moves,
                releases: &release_ids,
                excluded_families: &excluded_families,
            }
            .build()
        };

        let sketch = pokedex.move_by_identifier(SKETCH_MOVE).ok().map(|m| m.id);
        let relevant_moves = goal
            .moves
            .iter()
            .chain(pokedex.data().evolutions.iter().filter_map(|e| e.known_move))
            .chain(sketch)
            .collect();
        let starters = Self::starters(pokedex, &goal, &breeding, &excluded_families);

        Ok(MovesetSearch {
            pokedex,
            goal,
            costs: request.costs.clone(),
            releases,
            excluded_families,
            family_moves,
            egg_moves,
            breeding,
            relevant_moves,
            sketch,
            starters,
            debug: request.debug,
        })
    }

    /// The goal family, plus every family with a member in a group that can
    /// deliver some goal moves by breeding.
    fn starters(
        pokedex: &Pokedex,
        goal: &Goal,
        breeding: &BreedingTable,
        excluded_families: &BTreeSet<EvolutionChainId>,
    ) -> BTreeSet<SpeciesId> {
        let useful_groups: BTreeSet<_> = breeding.useful_groups().collect();
        let mut families: BTreeSet<EvolutionChainId> = pokedex
            .all_species()
            .filter(|s| s.egg_groups.iter().any(|g| useful_groups.contains(g)))
            .map(|s| s.evolution_chain)
            .filter(|chain| !excluded_families.contains(chain))
            .collect();
        families.insert(goal.family);
        families
            .into_iter()
            .flat_map(|chain| pokedex.family_members(chain).iter().copied())
            .collect()
    }

    pub fn pokedex(&self) -> &'d Pokedex {
        self.pokedex
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn costs(&self) -> &CostTable {
        &self.costs
    }

    pub fn releases(&self) -> &Releases {
        &self.releases
    }

    pub fn breeding_table(&self) -> &BreedingTable {
        &self.breeding
    }

    pub fn family_moves(&self) -> &FamilyMoves {
        &self.family_moves
    }

    /// Every way of reaching the goal, cheapest first.
    pub fn paths(&self) -> AStar<'_, Self> {
        let search = AStar::new(self, Node::Initial).with_estimate_error_callback(
            |x: &Node, f: Cost, y: &Node, new_f: Cost| {
                log::warn!(
                    "Inadmissible estimate: f dropped from {} at {:?} to {} at {:?}",
                    f,
                    x,
                    new_f,
                    y
                );
            },
        );
        if self.debug >= 2 {
            search.with_notify(|f: Cost, node: &Node, live: usize, queued: usize| {
                log::trace!("f={} open={}/{} {:?}", f, live, queued, node);
            })
        } else {
            search
        }
    }

    /// The cheapest way of reaching the goal, if there is one.
    pub fn find_path(&self) -> Option<MovesetPath> {
        self.paths().next()
    }
}

impl SearchSpace for MovesetSearch<'_> {
    type Node = Node;
    type Transition = Action;

    fn expand(&self, node: &Node) -> Vec<Edge<Node, Action>> {
        match node {
            Node::Initial => self.expand_initial(),
            Node::Pokemon(state) => self.expand_pokemon(state),
            Node::Breed {
                group,
                version_group,
                moves,
            } => self.expand_breed(*group, *version_group, moves),
            Node::GoalBreed {
                version_group,
                moves,
            } => self.expand_goal_breed(*version_group, moves),
            Node::Goal(_) => Vec::new(),
        }
    }

    fn is_goal(&self, node: &Node) -> bool {
        matches!(node, Node::Goal(_))
    }

    fn estimate(&self, node: &Node) -> Cost {
        node.version_group()
            .map(|vg| self.releases.estimate(vg))
            .unwrap_or_default()
    }
}

/// Build a session for `request` and return its cheapest path.
///
/// `Ok(None)` means the request is valid but the moveset is not obtainable.
pub fn check(pokedex: &Pokedex, request: &SearchRequest) -> MovesetResult<Option<MovesetPath>> {
    Ok(MovesetSearch::new(pokedex, request)?.find_path())
}

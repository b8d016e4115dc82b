//! Expansion rules: every legal next situation of a node, with its cost.

use super::actions::Action;
use super::breeding::{can_breed, is_inheritable};
use super::evolution::evolution_options;
use super::moveset::MoveSet;
use super::nodes::{Node, PokemonState};
use super::MovesetSearch;
use crate::costs::{Cost, CostKind};
use crate::search::Edge;
use ordered_float::OrderedFloat;
use phf::phf_set;
use schema::{EggGroupId, EvolutionTrigger, LearnMethod, MoveId, SpeciesId, VersionGroupId};

type MovesetEdge = Edge<Node, Action>;

/// Moves Sketch can never copy.
static UNSKETCHABLE: phf::Set<&'static str> = phf_set! {
    "struggle",
    "chatter",
    "sketch",
};

const MAX_LEVEL: u8 = 100;

/// Level of a freshly hatched Pokemon in a game of `generation`.
pub fn hatch_level(generation: u8) -> u8 {
    if generation < 4 {
        1
    } else {
        5
    }
}

fn times(count: usize) -> Cost {
    OrderedFloat(count as f64)
}

impl MovesetSearch<'_> {
    fn cost(&self, kind: CostKind) -> Cost {
        self.costs.get(kind)
    }

    /// In the game, with no pre-evolution there to hatch from instead.
    fn is_base_in(&self, species: SpeciesId, version_group: VersionGroupId) -> bool {
        if !self.pokedex.is_available(species, version_group) {
            return false;
        }
        match self.pokedex.species(species).and_then(|s| s.evolves_from) {
            Some(parent) => !self.pokedex.is_available(parent, version_group),
            None => true,
        }
    }

    fn can_inherit(&self, species: SpeciesId, version_group: VersionGroupId, move_id: MoveId) -> bool {
        self.pokedex
            .moves_learnable(species, version_group)
            .any(|record| record.move_id == move_id && is_inheritable(record.method))
    }

    fn family_of(&self, species: SpeciesId) -> Option<schema::EvolutionChainId> {
        self.pokedex.species(species).map(|s| s.evolution_chain)
    }

    pub(super) fn expand_initial(&self) -> Vec<MovesetEdge> {
        let mut edges = Vec::new();
        for (version_group, _) in self.releases.iter() {
            for &species in &self.starters {
                if !self.is_base_in(species, version_group) {
                    continue;
                }
                let state = PokemonState::hatched(species, 1, version_group, MoveSet::new());
                edges.push(Edge::new(
                    Cost::default(),
                    Action::Start {
                        species,
                        version_group,
                    },
                    Node::Pokemon(state),
                ));
            }
        }
        edges
    }

    pub(super) fn expand_pokemon(&self, state: &PokemonState) -> Vec<MovesetEdge> {
        let Some(generation) = self.releases.generation(state.version_group) else {
            return Vec::new();
        };
        let mut edges = Vec::new();
        self.expand_grow(state, &mut edges);
        self.expand_learn(state, generation, &mut edges);
        self.expand_forget(state, &mut edges);
        self.expand_trade(state, &mut edges);
        self.expand_evolve(state, &mut edges);
        self.expand_sketch(state, generation, &mut edges);
        self.expand_breeding(state, generation, &mut edges);
        edges
    }

    fn expand_grow(&self, state: &PokemonState, edges: &mut Vec<MovesetEdge>) {
        let goal = &self.goal;
        if state.species == goal.species
            && state.version_group == goal.version_group
            && state.moves == goal.moves
            && state.level <= goal.level
        {
            let grown = PokemonState {
                level: goal.level,
                fresh: true,
                ..state.clone()
            };
            edges.push(Edge::new(
                Cost::default(),
                Action::Grow { level: goal.level },
                Node::Goal(grown),
            ));
        }
    }

    fn expand_learn(&self, state: &PokemonState, generation: u8, edges: &mut Vec<MovesetEdge>) {
        if state.moves.is_full() {
            return;
        }
        for record in self
            .pokedex
            .moves_learnable(state.species, state.version_group)
        {
            let move_id = record.move_id;
            if !self.relevant_moves.contains(&move_id)
                || state.moves.contains(move_id)
                || record.method.is_breeding_only()
            {
                continue;
            }
            let Some(moves) = state.moves.with(move_id) else {
                continue;
            };

            if record.method != LearnMethod::LevelUp {
                edges.push(Edge::new(
                    self.costs.learn_cost(record.method, generation),
                    Action::Learn {
                        move_id,
                        method: record.method,
                        level: state.level,
                    },
                    Node::Pokemon(state.with_moves(moves)),
                ));
            } else if record.level > state.level || (record.level == state.level && state.fresh) {
                let gain = record.level - state.level;
                let learned = PokemonState {
                    level: record.level,
                    moves,
                    fresh: true,
                    ..state.clone()
                };
                edges.push(Edge::new(
                    self.cost(CostKind::PerLevel) * times(usize::from(gain)),
                    Action::Learn {
                        move_id,
                        method: LearnMethod::LevelUp,
                        level: record.level,
                    },
                    Node::Pokemon(learned),
                ));
            } else {
                edges.push(Edge::new(
                    self.cost(CostKind::Relearn),
                    Action::Relearn { move_id },
                    Node::Pokemon(state.with_moves(moves)),
                ));
            }
        }
    }

    fn expand_forget(&self, state: &PokemonState, edges: &mut Vec<MovesetEdge>) {
        for move_id in state.moves.iter() {
            if self.goal.moves.contains(move_id) {
                continue;
            }
            edges.push(Edge::new(
                self.cost(CostKind::Forget),
                Action::Forget { move_id },
                Node::Pokemon(state.with_moves(state.moves.without(move_id))),
            ));
        }
    }

    fn expand_trade(&self, state: &PokemonState, edges: &mut Vec<MovesetEdge>) {
        let move_generations: Vec<u8> = state
            .moves
            .iter()
            .filter_map(|m| self.pokedex.move_(m).map(|record| record.generation))
            .collect();
        for (to, _) in self.releases.iter() {
            if !self.pokedex.is_available(state.species, to) {
                continue;
            }
            let Some(cost) = self.releases.trade_cost_carrying(
                state.version_group,
                to,
                move_generations.iter().copied(),
            ) else {
                continue;
            };
            let traded = PokemonState {
                version_group: to,
                fresh: false,
                ..state.clone()
            };
            edges.push(Edge::new(
                cost,
                Action::Trade {
                    from: state.version_group,
                    to,
                },
                Node::Pokemon(traded),
            ));
        }
    }

    fn expand_evolve(&self, state: &PokemonState, edges: &mut Vec<MovesetEdge>) {
        let Some(family) = self.family_of(state.species) else {
            return;
        };
        let gender_rate = self.pokedex.gender_rate(family);
        for option in evolution_options(self.pokedex, state.species) {
            if !self.pokedex.is_available(option.to, state.version_group) {
                continue;
            }
            if option.known_move.is_some_and(|m| !state.moves.contains(m)) {
                continue;
            }
            if option.gender.is_some_and(|g| !gender_rate.allows(g)) {
                continue;
            }

            let evolution = self.cost(CostKind::Evolution);
            let outcome = match option.trigger {
                EvolutionTrigger::LevelUp | EvolutionTrigger::Shed => {
                    self.level_evolution(state, option.minimum_level)
                }
                EvolutionTrigger::Trade => {
                    Some((evolution + self.cost(CostKind::Trade), state.level, false))
                }
                EvolutionTrigger::UseItem => Some((evolution, state.level, false)),
            };
            let Some((cost, level, fresh)) = outcome else {
                continue;
            };
            let evolved = PokemonState {
                species: option.to,
                level,
                fresh,
                ..state.clone()
            };
            edges.push(Edge::new(
                cost,
                Action::Evolve {
                    from: state.species,
                    to: option.to,
                    trigger: option.trigger,
                    level,
                },
                Node::Pokemon(evolved),
            ));
        }
    }

    /// Cost, resulting level and fresh flag of a level-triggered evolution.
    fn level_evolution(&self, state: &PokemonState, minimum: Option<u8>) -> Option<(Cost, u8, bool)> {
        let evolution = self.cost(CostKind::Evolution);
        let per_level = self.cost(CostKind::PerLevel);
        match minimum {
            Some(min) if state.level < min => {
                Some((evolution + per_level * times(usize::from(min - state.level)), min, true))
            }
            Some(min) if state.level == min && state.fresh => Some((evolution, min, true)),
            None if state.fresh => Some((evolution, state.level, true)),
            _ if state.level >= MAX_LEVEL => None,
            Some(_) => Some((
                evolution + self.cost(CostKind::EvolutionDelayed) + per_level,
                state.level + 1,
                true,
            )),
            None => Some((evolution + per_level, state.level + 1, true)),
        }
    }

    fn expand_sketch(&self, state: &PokemonState, generation: u8, edges: &mut Vec<MovesetEdge>) {
        let Some(sketch) = self.sketch else {
            return;
        };
        if !state.moves.contains(sketch) {
            return;
        }
        let remaining = state.moves.without(sketch);
        for move_id in self.goal.moves.iter() {
            let Some(record) = self.pokedex.move_(move_id) else {
                continue;
            };
            if state.moves.contains(move_id)
                || UNSKETCHABLE.contains(record.identifier.as_str())
                || record.generation > generation
            {
                continue;
            }
            if let Some(moves) = remaining.with(move_id) {
                edges.push(Edge::new(
                    self.cost(CostKind::Sketch),
                    Action::Sketch { move_id },
                    Node::Pokemon(state.with_moves(moves)),
                ));
            }
        }
    }

    fn expand_breeding(&self, state: &PokemonState, generation: u8, edges: &mut Vec<MovesetEdge>) {
        if generation < 2 || !can_breed(self.pokedex, state.species) {
            return;
        }
        let Some(family) = self.family_of(state.species) else {
            return;
        };
        let carried = state.moves.intersection(&self.goal.moves);
        let missing_egg_moves = self.egg_moves.difference(&state.moves).len();
        let cost = self.cost(CostKind::Breed)
            + self.cost(CostKind::Egg) * times(state.moves.len())
            + self.cost(CostKind::BreedPenalty) * times(missing_egg_moves);

        let mut goal_egg = family == self.goal.family;
        if self.pokedex.gender_rate(family).can_father() {
            for &group in self.pokedex.breeding_groups(state.species) {
                match self.breeding.get(group, &carried) {
                    Some(1) => goal_egg = true,
                    Some(_) => edges.push(Edge::new(
                        cost,
                        Action::Breed {
                            parent: state.species,
                            group: Some(group),
                            moves: carried.clone(),
                        },
                        Node::Breed {
                            group,
                            version_group: state.version_group,
                            moves: carried.clone(),
                        },
                    )),
                    None => {}
                }
            }
        }
        if goal_egg {
            edges.push(Edge::new(
                cost,
                Action::Breed {
                    parent: state.species,
                    group: None,
                    moves: carried.clone(),
                },
                Node::GoalBreed {
                    version_group: state.version_group,
                    moves: carried,
                },
            ));
        }
    }

    pub(super) fn expand_goal_breed(
        &self,
        version_group: VersionGroupId,
        moves: &MoveSet,
    ) -> Vec<MovesetEdge> {
        let Some(generation) = self.releases.generation(version_group) else {
            return Vec::new();
        };
        let level = hatch_level(generation);
        let mut edges = Vec::new();
        for &species in self.pokedex.family_members(self.goal.family) {
            if !self.is_base_in(species, version_group)
                || !moves.iter().all(|m| self.can_inherit(species, version_group, m))
            {
                continue;
            }
            let hatch = self.hatch_cost(species);
            edges.push(self.hatch_edge(species, level, version_group, moves.clone(), hatch));

            // Pikachu-style eggs come with their special moves for free.
            let light_ball: Vec<MoveId> = self
                .pokedex
                .moves_learnable(species, version_group)
                .filter(|r| r.method == LearnMethod::LightBallEgg)
                .map(|r| r.move_id)
                .filter(|&m| self.goal.moves.contains(m) && !moves.contains(m))
                .collect();
            if light_ball.is_empty() {
                continue;
            }
            if let Some(with_light_ball) = MoveSet::try_collect(moves.iter().chain(light_ball.iter().copied())) {
                let cost = hatch
                    + self.cost(CostKind::LightBallEgg) * times(light_ball.len());
                edges.push(self.hatch_edge(species, level, version_group, with_light_ball, cost));
            }
        }
        edges
    }

    pub(super) fn expand_breed(
        &self,
        group: EggGroupId,
        version_group: VersionGroupId,
        moves: &MoveSet,
    ) -> Vec<MovesetEdge> {
        let Some(generation) = self.releases.generation(version_group) else {
            return Vec::new();
        };
        let level = hatch_level(generation);
        let mut edges = Vec::new();
        for species in self.pokedex.all_species() {
            let family = species.evolution_chain;
            if family == self.goal.family
                || self.excluded_families.contains(&family)
                || !self.is_base_in(species.id, version_group)
            {
                continue;
            }
            let in_group = self
                .pokedex
                .family_members(family)
                .iter()
                .any(|&member| self.pokedex.breeding_groups(member).contains(&group));
            if !in_group || !moves.iter().all(|m| self.can_inherit(species.id, version_group, m)) {
                continue;
            }
            let cost = self.hatch_cost(species.id);
            edges.push(self.hatch_edge(species.id, level, version_group, moves.clone(), cost));
        }
        edges
    }

    fn hatch_cost(&self, species: SpeciesId) -> Cost {
        self.cost(CostKind::PerHatchCounter) * times(usize::from(self.pokedex.hatch_difficulty(species)))
    }

    fn hatch_edge(
        &self,
        species: SpeciesId,
        level: u8,
        version_group: VersionGroupId,
        moves: MoveSet,
        cost: Cost,
    ) -> MovesetEdge {
        Edge::new(
            cost,
            Action::Hatch {
                species,
                level,
                moves: moves.clone(),
            },
            Node::Pokemon(PokemonState::hatched(species, level, version_group, moves)),
        )
    }
}

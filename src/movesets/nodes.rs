use super::moveset::MoveSet;
use schema::{EggGroupId, SpeciesId, VersionGroupId};

/// A Pokemon's situation: what it is, where it is, what it knows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PokemonState {
    pub species: SpeciesId,
    pub level: u8,
    pub version_group: VersionGroupId,
    pub moves: MoveSet,
    /// Level-up moves of the current level can still be learned directly.
    pub fresh: bool,
}

impl PokemonState {
    pub fn hatched(species: SpeciesId, level: u8, version_group: VersionGroupId, moves: MoveSet) -> Self {
        PokemonState {
            species,
            level,
            version_group,
            moves,
            fresh: true,
        }
    }

    pub fn with_moves(&self, moves: MoveSet) -> Self {
        PokemonState {
            moves,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// Before any Pokemon has been picked.
    Initial,
    Pokemon(PokemonState),
    /// An egg that hatches into a non-goal family of `group`.
    Breed {
        group: EggGroupId,
        version_group: VersionGroupId,
        moves: MoveSet,
    },
    /// An egg that hatches into the goal family.
    GoalBreed {
        version_group: VersionGroupId,
        moves: MoveSet,
    },
    Goal(PokemonState),
}

impl Node {
    pub fn version_group(&self) -> Option<VersionGroupId> {
        match self {
            Node::Initial => None,
            Node::Pokemon(state) | Node::Goal(state) => Some(state.version_group),
            Node::Breed { version_group, .. } | Node::GoalBreed { version_group, .. } => {
                Some(*version_group)
            }
        }
    }

    pub fn moves(&self) -> Option<&MoveSet> {
        match self {
            Node::Initial => None,
            Node::Pokemon(state) | Node::Goal(state) => Some(&state.moves),
            Node::Breed { moves, .. } | Node::GoalBreed { moves, .. } => Some(moves),
        }
    }

    pub fn as_pokemon(&self) -> Option<&PokemonState> {
        match self {
            Node::Pokemon(state) | Node::Goal(state) => Some(state),
            _ => None,
        }
    }
}

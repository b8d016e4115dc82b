use super::moveset::MoveSet;
use crate::pokedex::Pokedex;
use schema::{EggGroupId, EvolutionTrigger, LearnMethod, MoveId, SpeciesId, VersionGroupId};
use strum::IntoStaticStr;

/// One step a player takes towards the goal moveset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Action {
    /// Catch (or otherwise obtain) a fresh Pokemon.
    Start {
        species: SpeciesId,
        version_group: VersionGroupId,
    },
    Learn {
        move_id: MoveId,
        method: LearnMethod,
        /// Level the Pokemon is at when it learns the move.
        level: u8,
    },
    Forget {
        move_id: MoveId,
    },
    Relearn {
        move_id: MoveId,
    },
    Trade {
        from: VersionGroupId,
        to: VersionGroupId,
    },
    Evolve {
        from: SpeciesId,
        to: SpeciesId,
        trigger: EvolutionTrigger,
        level: u8,
    },
    Grow {
        level: u8,
    },
    Sketch {
        move_id: MoveId,
    },
    Breed {
        parent: SpeciesId,
        /// `None` when the egg is of the goal family.
        group: Option<EggGroupId>,
        moves: MoveSet,
    },
    Hatch {
        species: SpeciesId,
        level: u8,
        moves: MoveSet,
    },
}

impl Action {
    /// Short keyword of the action kind, e.g. `learn` or `breed`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Human-readable rendering using names from `pokedex`.
    pub fn describe(&self, pokedex: &Pokedex) -> String {
        let moves = |set: &MoveSet| {
            if set.is_empty() {
                "no moves".to_string()
            } else {
                set.iter()
                    .map(|m| pokedex.move_name(m))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        };
        match self {
            Action::Start {
                species,
                version_group,
            } => format!(
                "Get a {} in {}",
                pokedex.species_name(*species),
                pokedex.version_group_name(*version_group)
            ),
            Action::Learn {
                move_id,
                method,
                level,
            } => format!(
                "Learn {} by {} at level {}",
                pokedex.move_name(*move_id),
                method,
                level
            ),
            Action::Forget { move_id } => format!("Forget {}", pokedex.move_name(*move_id)),
            Action::Relearn { move_id } => format!("Relearn {}", pokedex.move_name(*move_id)),
            Action::Trade { from, to } => format!(
                "Trade from {} to {}",
                pokedex.version_group_name(*from),
                pokedex.version_group_name(*to)
            ),
            Action::Evolve {
                from,
                to,
                trigger,
                level,
            } => format!(
                "Evolve {} into {} ({}, level {})",
                pokedex.species_name(*from),
                pokedex.species_name(*to),
                trigger,
                level
            ),
            Action::Grow { level } => format!("Grow to level {}", level),
            Action::Sketch { move_id } => format!("Sketch {}", pokedex.move_name(*move_id)),
            Action::Breed {
                parent,
                group,
                moves: carried,
            } => match group {
                Some(group) => format!(
                    "Breed {} for the {} egg group, passing on {}",
                    pokedex.species_name(*parent),
                    egg_group_name(pokedex, *group),
                    moves(carried)
                ),
                None => format!(
                    "Breed {} for the target family, passing on {}",
                    pokedex.species_name(*parent),
                    moves(carried)
                ),
            },
            Action::Hatch {
                species,
                level,
                moves: carried,
            } => format!(
                "Hatch a {} at level {} knowing {}",
                pokedex.species_name(*species),
                level,
                moves(carried)
            ),
        }
    }
}

fn egg_group_name(pokedex: &Pokedex, group: EggGroupId) -> String {
    pokedex
        .egg_groups()
        .find(|g| g.id == group)
        .map(|g| g.identifier.clone())
        .unwrap_or_else(|| group.to_string())
}

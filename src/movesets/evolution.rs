use crate::errors::{MovesetError, MovesetResult};
use crate::pokedex::Pokedex;
use phf::phf_map;
use schema::{EvolutionTrigger, Gender, MoveId, SpeciesId};

/// Evolutions that happen alongside another one rather than through their own
/// trigger: evolving species -> (extra species, level).
static IMPLICIT_EVOLUTIONS: phf::Map<&'static str, (&'static str, u8)> = phf_map! {
    "nincada" => ("shedinja", 20),
};

/// A way to evolve `from` into `to`, with every condition that must hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionOption {
    pub to: SpeciesId,
    pub trigger: EvolutionTrigger,
    pub minimum_level: Option<u8>,
    pub known_move: Option<MoveId>,
    pub gender: Option<Gender>,
}

/// Every evolution available to `species`, the implicit ones included.
pub fn evolution_options(pokedex: &Pokedex, species: SpeciesId) -> Vec<EvolutionOption> {
    let mut options: Vec<EvolutionOption> = pokedex
        .evolution_edges(species)
        .into_iter()
        .filter(|record| record.trigger != EvolutionTrigger::Shed)
        .map(|record| EvolutionOption {
            to: record.evolved_species,
            trigger: record.trigger,
            minimum_level: record.minimum_level,
            known_move: record.known_move,
            gender: record.gender,
        })
        .collect();

    let implicit = pokedex
        .species(species)
        .and_then(|record| IMPLICIT_EVOLUTIONS.get(record.identifier.as_str()));
    if let Some(&(identifier, level)) = implicit {
        if let Ok(extra) = pokedex.species_by_identifier(identifier) {
            options.push(EvolutionOption {
                to: extra.id,
                trigger: EvolutionTrigger::Shed,
                minimum_level: Some(level),
                known_move: None,
                gender: None,
            });
        }
    }
    options.sort_by_key(|option| (option.to, option.trigger, option.minimum_level));
    options
}

/// Every evolved species must have a pre-evolution to evolve from.
pub fn check_parents(pokedex: &Pokedex) -> MovesetResult<()> {
    for species in pokedex.all_species() {
        if species.evolves_from.is_none() && pokedex.evolutions_into(species.id).next().is_some() {
            return Err(MovesetError::NoParent {
                species: species.id,
            });
        }
    }
    Ok(())
}

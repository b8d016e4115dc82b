use crate::movesets::{Action, MovesetPath, MovesetSearch, SearchRequest};
use crate::pokedex::Pokedex;
use schema::{
    EggGroupId, EggGroupRecord, EvolutionChainId, EvolutionRecord, EvolutionTrigger, GenderRate,
    LearnMethod, LearnRecord, MoveId, MoveRecord, PokedexData, SpeciesId, SpeciesRecord,
    VersionGroupId, VersionGroupRecord,
};

/// A builder for small hand-made Pokedexes.
///
/// A species only exists in a version group it has at least one learnset
/// entry for, so every species needs a `learn` call per game it appears in.
///
/// # Example
/// ```ignore
/// let dex = DexBuilder::new()
///     .version_group(11, 5)
///     .move_(33, "tackle", 1)
///     .species(1, "tauros", 1, None, &[5])
///     .learn(1, 33, 11, LearnMethod::LevelUp, 1)
///     .build();
/// ```
#[derive(Default)]
pub struct DexBuilder {
    data: PokedexData,
}

impl DexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version_group(mut self, id: u8, generation: u8) -> Self {
        self.data.version_groups.push(VersionGroupRecord {
            id: VersionGroupId(id),
            identifier: format!("vg-{}", id),
            generation,
            versions: vec![format!("version-{}", id)],
        });
        self
    }

    pub fn egg_group(mut self, id: u8, identifier: &str) -> Self {
        self.data.egg_groups.push(EggGroupRecord {
            id: EggGroupId(id),
            identifier: identifier.to_string(),
        });
        self
    }

    pub fn move_(mut self, id: u16, identifier: &str, generation: u8) -> Self {
        self.data.moves.push(MoveRecord {
            id: MoveId(id),
            identifier: identifier.to_string(),
            name: identifier.to_string(),
            generation,
        });
        self
    }

    /// Adds a species with a 50% gender ratio and 20 egg cycles.
    pub fn species(
        mut self,
        id: u16,
        identifier: &str,
        chain: u16,
        evolves_from: Option<u16>,
        egg_groups: &[u8],
    ) -> Self {
        self.data.species.push(SpeciesRecord {
            id: SpeciesId(id),
            identifier: identifier.to_string(),
            name: identifier.to_string(),
            evolution_chain: EvolutionChainId(chain),
            evolves_from: evolves_from.map(SpeciesId),
            egg_groups: egg_groups.iter().map(|&g| EggGroupId(g)).collect(),
            gender_rate: GenderRate(4),
            hatch_counter: 20,
        });
        self
    }

    pub fn gender_rate(mut self, species: u16, rate: GenderRate) -> Self {
        if let Some(record) = self.species_mut(species) {
            record.gender_rate = rate;
        }
        self
    }

    pub fn hatch_counter(mut self, species: u16, counter: u8) -> Self {
        if let Some(record) = self.species_mut(species) {
            record.hatch_counter = counter;
        }
        self
    }

    pub fn evolution(self, evolved: u16, trigger: EvolutionTrigger, minimum_level: Option<u8>) -> Self {
        self.evolution_record(EvolutionRecord {
            evolved_species: SpeciesId(evolved),
            trigger,
            minimum_level,
            known_move: None,
            item: None,
            gender: None,
        })
    }

    pub fn evolution_record(mut self, record: EvolutionRecord) -> Self {
        self.data.evolutions.push(record);
        self
    }

    pub fn learn(mut self, species: u16, move_id: u16, version_group: u8, method: LearnMethod, level: u8) -> Self {
        self.data.learnsets.push(LearnRecord {
            species: SpeciesId(species),
            move_id: MoveId(move_id),
            version_group: VersionGroupId(version_group),
            method,
            level,
        });
        self
    }

    pub fn build(self) -> Pokedex {
        match Pokedex::new(self.data) {
            Ok(dex) => dex,
            Err(err) => panic!("Failed to build test Pokedex: {}", err),
        }
    }

    fn species_mut(&mut self, id: u16) -> Option<&mut SpeciesRecord> {
        self.data.species.iter_mut().find(|s| s.id == SpeciesId(id))
    }
}

/// Request for `moves` on `species` in `version_group`, at level 100.
pub fn request(species: u16, version_group: u8, moves: &[u16]) -> SearchRequest {
    SearchRequest::new(
        SpeciesId(species),
        VersionGroupId(version_group),
        moves.iter().map(|&m| MoveId(m)).collect(),
    )
}

/// Runs a search and returns its cheapest path, panicking on validation errors.
pub fn cheapest_path(dex: &Pokedex, request: &SearchRequest) -> Option<MovesetPath> {
    match MovesetSearch::new(dex, request) {
        Ok(search) => search.find_path(),
        Err(err) => panic!("Expected a valid request but got error: {}", err),
    }
}

pub fn actions(path: &MovesetPath) -> Vec<&Action> {
    path.steps().iter().map(|step| &step.transition).collect()
}

pub fn action_kinds(path: &MovesetPath) -> Vec<&'static str> {
    path.steps().iter().map(|step| step.transition.kind()).collect()
}

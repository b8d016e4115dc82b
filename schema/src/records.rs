use crate::{
    EggGroupId, EvolutionChainId, EvolutionTrigger, Gender, GenderRate, LearnMethod, MoveId,
    SpeciesId, VersionGroupId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionGroupRecord {
    pub id: VersionGroupId,
    pub identifier: String,
    pub generation: u8,
    pub versions: Vec<String>, // e.g. ["black", "white"]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggGroupRecord {
    pub id: EggGroupId,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: MoveId,
    pub identifier: String,
    pub name: String,
    pub generation: u8, // Generation the move was introduced in
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: SpeciesId,
    pub identifier: String,
    pub name: String,
    pub evolution_chain: EvolutionChainId,
    pub evolves_from: Option<SpeciesId>,
    pub egg_groups: Vec<EggGroupId>,
    pub gender_rate: GenderRate,
    pub hatch_counter: u8, // Egg cycles needed to hatch
}

/// One way a species evolves. The pre-evolution is not stored here; it is
/// the `evolves_from` of the evolved species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionRecord {
    pub evolved_species: SpeciesId,
    pub trigger: EvolutionTrigger,
    #[serde(default)]
    pub minimum_level: Option<u8>,
    #[serde(default)]
    pub known_move: Option<MoveId>,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnRecord {
    pub species: SpeciesId,
    pub move_id: MoveId,
    pub version_group: VersionGroupId,
    pub method: LearnMethod,
    #[serde(default)]
    pub level: u8, // Only meaningful for level-up moves
}

/// Everything the moveset search knows about the games, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokedexData {
    pub version_groups: Vec<VersionGroupRecord>,
    pub egg_groups: Vec<EggGroupRecord>,
    pub moves: Vec<MoveRecord>,
    pub species: Vec<SpeciesRecord>,
    pub evolutions: Vec<EvolutionRecord>,
    pub learnsets: Vec<LearnRecord>,
}

impl PokedexData {
    /// Encode as a compact postcard snapshot.
    pub fn to_postcard(&self) -> postcard::Result<Vec<u8>> {
        postcard::to_allocvec(self)
    }

    pub fn from_postcard(bytes: &[u8]) -> postcard::Result<Self> {
        postcard::from_bytes(bytes)
    }
}

//! The read-only fact store the moveset search runs against.
//!
//! `Pokedex` wraps the on-disk [`PokedexData`] records with the indices the
//! search needs: learnsets by species and version group, evolution records by
//! evolved species, identifier lookups for the command line. It is loaded
//! once and then only read, so a single instance can be shared between
//! searches (and threads) freely.

use crate::errors::{DataError, DataResult};
use schema::{
    EggGroupId, EggGroupRecord, EvolutionChainId, EvolutionRecord, GenderRate, LearnRecord,
    MoveId, MoveRecord, PokedexData, SpeciesId, SpeciesRecord, VersionGroupId,
    VersionGroupRecord,
};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Identifier of the egg group whose members cannot breed at all.
pub const NO_EGGS_GROUP: &str = "no-eggs";
/// Identifier of Ditto's egg group: breeds with anything, fathers nothing.
pub const DITTO_GROUP: &str = "ditto";
/// The move that copies other moves permanently.
pub const SKETCH_MOVE: &str = "sketch";

#[derive(Debug, Clone)]
pub struct Pokedex {
    data: PokedexData,
    species_index: HashMap<SpeciesId, usize>,
    move_index: HashMap<MoveId, usize>,
    version_group_index: HashMap<VersionGroupId, usize>,
    learnsets: BTreeMap<(SpeciesId, VersionGroupId), Vec<usize>>,
    evolutions: BTreeMap<SpeciesId, Vec<usize>>,
    /// Evolution records by the species they evolve *from*.
    evolutions_from: BTreeMap<SpeciesId, Vec<usize>>,
    families: BTreeMap<EvolutionChainId, Vec<SpeciesId>>,
}

impl Pokedex {
    pub fn new(data: PokedexData) -> DataResult<Self> {
        let species_index = index_by(&data.species, |s| s.id);
        let move_index = index_by(&data.moves, |m| m.id);
        let version_group_index = index_by(&data.version_groups, |vg| vg.id);

        let mut learnsets: BTreeMap<_, Vec<usize>> = BTreeMap::new();
        for (i, record) in data.learnsets.iter().enumerate() {
            if !species_index.contains_key(&record.species) {
                return Err(DataError::MalformedData(format!(
                    "learnset entry for unknown species {}",
                    record.species
                )));
            }
            if !move_index.contains_key(&record.move_id) {
                return Err(DataError::MalformedData(format!(
                    "learnset entry for unknown move {}",
                    record.move_id
                )));
            }
            if !version_group_index.contains_key(&record.version_group) {
                return Err(DataError::MalformedData(format!(
                    "learnset entry for unknown version group {}",
                    record.version_group
                )));
            }
            learnsets
                .entry((record.species, record.version_group))
                .or_default()
                .push(i);
        }
        // Lowest level first, so level-up moves come out in learning order.
        for entries in learnsets.values_mut() {
            entries.sort_by_key(|&i| {
                let record = &data.learnsets[i];
                (record.level, record.move_id, record.method)
            });
        }

        let mut evolutions: BTreeMap<_, Vec<usize>> = BTreeMap::new();
        for (i, record) in data.evolutions.iter().enumerate() {
            if !species_index.contains_key(&record.evolved_species) {
                return Err(DataError::MalformedData(format!(
                    "evolution record for unknown species {}",
                    record.evolved_species
                )));
            }
            evolutions.entry(record.evolved_species).or_default().push(i);
        }
        let mut evolutions_from: BTreeMap<_, Vec<usize>> = BTreeMap::new();
        for (i, record) in data.evolutions.iter().enumerate() {
            let parent = species_index
                .get(&record.evolved_species)
                .and_then(|&j| data.species[j].evolves_from);
            if let Some(parent) = parent {
                evolutions_from.entry(parent).or_default().push(i);
            }
        }

        let mut families: BTreeMap<_, Vec<SpeciesId>> = BTreeMap::new();
        for species in &data.species {
            families
                .entry(species.evolution_chain)
                .or_default()
                .push(species.id);
        }
        for members in families.values_mut() {
            members.sort();
        }

        Ok(Pokedex {
            data,
            species_index,
            move_index,
            version_group_index,
            learnsets,
            evolutions,
            evolutions_from,
            families,
        })
    }

    /// Load facts from a `.ron` file or a `.postcard` snapshot.
    pub fn load(path: &Path) -> DataResult<Self> {
        let io_error = |source| DataError::Io {
            path: path.display().to_string(),
            source,
        };
        let data = match path.extension().and_then(|s| s.to_str()) {
            Some("ron") => {
                let content = fs::read_to_string(path).map_err(io_error)?;
                ron::from_str(&content)?
            }
            Some("postcard") => {
                let bytes = fs::read(path).map_err(io_error)?;
                PokedexData::from_postcard(&bytes)?
            }
            other => {
                return Err(DataError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };
        log::debug!("Loaded Pokedex data from {}", path.display());
        Pokedex::new(data)
    }

    pub fn from_ron_str(content: &str) -> DataResult<Self> {
        Pokedex::new(ron::from_str(content)?)
    }

    pub fn save_postcard(&self, path: &Path) -> DataResult<()> {
        let bytes = self.data.to_postcard()?;
        fs::write(path, bytes).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn data(&self) -> &PokedexData {
        &self.data
    }

    // --- Records ---

    pub fn species(&self, id: SpeciesId) -> Option<&SpeciesRecord> {
        self.species_index.get(&id).map(|&i| &self.data.species[i])
    }

    pub fn move_(&self, id: MoveId) -> Option<&MoveRecord> {
        self.move_index.get(&id).map(|&i| &self.data.moves[i])
    }

    pub fn version_group(&self, id: VersionGroupId) -> Option<&VersionGroupRecord> {
        self.version_group_index
            .get(&id)
            .map(|&i| &self.data.version_groups[i])
    }

    pub fn all_species(&self) -> impl Iterator<Item = &SpeciesRecord> {
        self.data.species.iter()
    }

    pub fn version_groups(&self) -> impl Iterator<Item = &VersionGroupRecord> {
        self.data.version_groups.iter()
    }

    pub fn egg_groups(&self) -> impl Iterator<Item = &EggGroupRecord> {
        self.data.egg_groups.iter()
    }

    pub fn family_members(&self, chain: EvolutionChainId) -> &[SpeciesId] {
        self.families.get(&chain).map(Vec::as_slice).unwrap_or(&[])
    }

    // --- Fact queries used by the search ---

    /// Every way `species` can learn a move in `version_group`, lowest level first.
    pub fn moves_learnable(
        &self,
        species: SpeciesId,
        version_group: VersionGroupId,
    ) -> impl Iterator<Item = &LearnRecord> {
        self.learnsets
            .get(&(species, version_group))
            .into_iter()
            .flatten()
            .map(|&i| &self.data.learnsets[i])
    }

    /// Whether `species` exists in `version_group` at all.
    pub fn is_available(&self, species: SpeciesId, version_group: VersionGroupId) -> bool {
        self.learnsets.contains_key(&(species, version_group))
    }

    /// Evolution records leading *into* `evolved_species`.
    pub fn evolutions_into(&self, evolved_species: SpeciesId) -> impl Iterator<Item = &EvolutionRecord> {
        self.evolutions
            .get(&evolved_species)
            .into_iter()
            .flatten()
            .map(|&i| &self.data.evolutions[i])
    }

    /// Evolution records leading *out of* `species`, paired with the evolved species.
    pub fn evolution_edges(&self, species: SpeciesId) -> Vec<&EvolutionRecord> {
        self.evolutions_from
            .get(&species)
            .into_iter()
            .flatten()
            .map(|&i| &self.data.evolutions[i])
            .collect()
    }

    pub fn breeding_groups(&self, species: SpeciesId) -> &[EggGroupId] {
        self.species(species)
            .map(|s| s.egg_groups.as_slice())
            .unwrap_or(&[])
    }

    /// Gender ratio of a family, taken from its first stage.
    pub fn gender_rate(&self, chain: EvolutionChainId) -> GenderRate {
        self.family_members(chain)
            .iter()
            .filter_map(|&id| self.species(id))
            .find(|s| s.evolves_from.is_none())
            .or_else(|| {
                self.family_members(chain)
                    .first()
                    .and_then(|&id| self.species(id))
            })
            .map(|s| s.gender_rate)
            .unwrap_or(GenderRate::GENDERLESS)
    }

    pub fn hatch_difficulty(&self, species: SpeciesId) -> u8 {
        self.species(species).map(|s| s.hatch_counter).unwrap_or(0)
    }

    pub fn generation_of(&self, version_group: VersionGroupId) -> Option<u8> {
        self.version_group(version_group).map(|vg| vg.generation)
    }

    pub fn egg_group_by_identifier(&self, identifier: &str) -> Option<EggGroupId> {
        self.data
            .egg_groups
            .iter()
            .find(|g| g.identifier == identifier)
            .map(|g| g.id)
    }

    // --- Identifier lookups ---

    pub fn species_by_identifier(&self, identifier: &str) -> DataResult<&SpeciesRecord> {
        self.data
            .species
            .iter()
            .find(|s| s.identifier.eq_ignore_ascii_case(identifier))
            .ok_or_else(|| DataError::NotFound {
                kind: "Pokemon",
                identifier: identifier.to_string(),
            })
    }

    pub fn move_by_identifier(&self, identifier: &str) -> DataResult<&MoveRecord> {
        self.data
            .moves
            .iter()
            .find(|m| m.identifier.eq_ignore_ascii_case(identifier))
            .ok_or_else(|| DataError::NotFound {
                kind: "Move",
                identifier: identifier.to_string(),
            })
    }

    /// Resolve a version (`black`) or version group (`black-white`) identifier.
    pub fn version_group_by_identifier(&self, identifier: &str) -> DataResult<&VersionGroupRecord> {
        self.data
            .version_groups
            .iter()
            .find(|vg| {
                vg.identifier.eq_ignore_ascii_case(identifier)
                    || vg.versions.iter().any(|v| v.eq_ignore_ascii_case(identifier))
            })
            .ok_or_else(|| DataError::NotFound {
                kind: "Version",
                identifier: identifier.to_string(),
            })
    }

    // --- Display helpers ---

    pub fn species_name(&self, id: SpeciesId) -> String {
        self.species(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }

    pub fn move_name(&self, id: MoveId) -> String {
        self.move_(id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| format!("move {}", id))
    }

    pub fn version_group_name(&self, id: VersionGroupId) -> String {
        self.version_group(id)
            .map(|vg| vg.identifier.clone())
            .unwrap_or_else(|| format!("version group {}", id))
    }
}

fn index_by<T, K: std::hash::Hash + Eq>(items: &[T], key: impl Fn(&T) -> K) -> HashMap<K, usize> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (key(item), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{LearnMethod, VersionGroupId};

    const SMALL_DEX: &str = r#"
PokedexData(
    version_groups: [
        (id: 1, identifier: "red-blue", generation: 1, versions: ["red", "blue"]),
    ],
    egg_groups: [
        (id: 5, identifier: "field"),
    ],
    moves: [
        (id: 33, identifier: "tackle", name: "Tackle", generation: 1),
    ],
    species: [
        (
            id: 19,
            identifier: "rattata",
            name: "Rattata",
            evolution_chain: 8,
            evolves_from: None,
            egg_groups: [5],
            gender_rate: 4,
            hatch_counter: 15,
        ),
        (
            id: 20,
            identifier: "raticate",
            name: "Raticate",
            evolution_chain: 8,
            evolves_from: Some(19),
            egg_groups: [5],
            gender_rate: 4,
            hatch_counter: 15,
        ),
    ],
    evolutions: [
        (evolved_species: 20, trigger: LevelUp, minimum_level: Some(20)),
    ],
    learnsets: [
        (species: 19, move_id: 33, version_group: 1, method: LevelUp, level: 1),
    ],
)
"#;

    #[test]
    fn test_loads_ron_and_answers_fact_queries() {
        let dex = Pokedex::from_ron_str(SMALL_DEX).unwrap();

        let rattata = dex.species_by_identifier("Rattata").unwrap();
        assert_eq!(rattata.id, SpeciesId(19));
        assert_eq!(dex.breeding_groups(SpeciesId(19)), &[EggGroupId(5)]);
        assert_eq!(dex.hatch_difficulty(SpeciesId(19)), 15);
        assert_eq!(dex.generation_of(VersionGroupId(1)), Some(1));
        assert_eq!(dex.gender_rate(EvolutionChainId(8)), GenderRate(4));

        let learnable: Vec<_> = dex.moves_learnable(SpeciesId(19), VersionGroupId(1)).collect();
        assert_eq!(learnable.len(), 1);
        assert_eq!(learnable[0].method, LearnMethod::LevelUp);
        assert!(dex.is_available(SpeciesId(19), VersionGroupId(1)));
        assert!(!dex.is_available(SpeciesId(20), VersionGroupId(1)));

        let edges = dex.evolution_edges(SpeciesId(19));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].evolved_species, SpeciesId(20));
        assert_eq!(edges[0].minimum_level, Some(20));
        assert!(dex.evolution_edges(SpeciesId(20)).is_empty());
    }

    #[test]
    fn test_version_lookup_accepts_versions_and_groups() {
        let dex = Pokedex::from_ron_str(SMALL_DEX).unwrap();
        assert_eq!(dex.version_group_by_identifier("blue").unwrap().id, VersionGroupId(1));
        assert_eq!(dex.version_group_by_identifier("red-blue").unwrap().id, VersionGroupId(1));
        assert!(matches!(
            dex.version_group_by_identifier("gold"),
            Err(DataError::NotFound { kind: "Version", .. })
        ));
    }

    #[test]
    fn test_postcard_snapshot_matches_ron() {
        let dex = Pokedex::from_ron_str(SMALL_DEX).unwrap();
        let bytes = dex.data().to_postcard().unwrap();
        let restored = PokedexData::from_postcard(&bytes).unwrap();
        assert_eq!(&restored, dex.data());
    }

    #[test]
    fn test_rejects_learnsets_for_unknown_species() {
        let mut data = Pokedex::from_ron_str(SMALL_DEX).unwrap().data().clone();
        data.learnsets[0].species = SpeciesId(999);
        assert!(matches!(Pokedex::new(data), Err(DataError::MalformedData(_))));
    }
}

use crate::costs::CostTable;
use crate::errors::MovesetResult;
use crate::pokedex::Pokedex;
use schema::{MoveId, SpeciesId, VersionGroupId};
use std::collections::BTreeSet;

/// Everything a caller specifies about one moveset question.
///
/// # Example
/// ```
/// use pokedex_movesets::movesets::SearchRequest;
/// use schema::{MoveId, SpeciesId, VersionGroupId};
///
/// let request = SearchRequest::new(SpeciesId(25), VersionGroupId(14), vec![MoveId(344)])
///     .with_level(50)
///     .excluding_species(SpeciesId(132));
/// assert_eq!(request.level, 50);
/// ```
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub species: SpeciesId,
    pub version_group: VersionGroupId,
    pub moves: Vec<MoveId>,
    pub level: u8,
    pub costs: CostTable,
    pub excluded_version_groups: BTreeSet<VersionGroupId>,
    /// Any species here excludes its whole evolution family.
    pub excluded_species: BTreeSet<SpeciesId>,
    /// 0 = quiet, 1 = session summary, 2 = every popped node.
    pub debug: u8,
}

pub const DEFAULT_LEVEL: u8 = 100;

impl SearchRequest {
    pub fn new(species: SpeciesId, version_group: VersionGroupId, moves: Vec<MoveId>) -> Self {
        SearchRequest {
            species,
            version_group,
            moves,
            level: DEFAULT_LEVEL,
            costs: CostTable::default(),
            excluded_version_groups: BTreeSet::new(),
            excluded_species: BTreeSet::new(),
            debug: 0,
        }
    }

    /// Build a request from user-facing identifiers (`pikachu`, `platinum`, `volt-tackle`).
    pub fn from_identifiers(
        pokedex: &Pokedex,
        pokemon: &str,
        version: &str,
        moves: &[impl AsRef<str>],
    ) -> MovesetResult<Self> {
        let species = pokedex.species_by_identifier(pokemon)?.id;
        let version_group = pokedex.version_group_by_identifier(version)?.id;
        let moves = moves
            .iter()
            .map(|m| pokedex.move_by_identifier(m.as_ref()).map(|record| record.id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SearchRequest::new(species, version_group, moves))
    }

    /// Exclude versions and Pokemon given by identifier. A version excludes its
    /// whole version group; a Pokemon its whole family.
    pub fn excluding_identifiers(
        mut self,
        pokedex: &Pokedex,
        versions: &[impl AsRef<str>],
        pokemon: &[impl AsRef<str>],
    ) -> MovesetResult<Self> {
        for version in versions {
            let id = pokedex.version_group_by_identifier(version.as_ref())?.id;
            self.excluded_version_groups.insert(id);
        }
        for species in pokemon {
            let id = pokedex.species_by_identifier(species.as_ref())?.id;
            self.excluded_species.insert(id);
        }
        Ok(self)
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_costs(mut self, costs: CostTable) -> Self {
        self.costs = costs;
        self
    }

    pub fn excluding_version_group(mut self, version_group: VersionGroupId) -> Self {
        self.excluded_version_groups.insert(version_group);
        self
    }

    pub fn excluding_species(mut self, species: SpeciesId) -> Self {
        self.excluded_species.insert(species);
        self
    }

    pub fn with_debug(mut self, debug: u8) -> Self {
        self.debug = debug;
        self
    }
}

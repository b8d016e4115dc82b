use schema::{MoveId, SpeciesId, VersionGroupId};

/// A moveset request that cannot be searched at all.
///
/// These are raised before the search starts. A legal request that simply has
/// no solution is not an error: the path iterator is empty instead.
#[derive(Debug, thiserror::Error)]
pub enum MovesetError {
    #[error("No moves specified.")]
    NoMoves,
    #[error("Too many moves specified ({0}); a Pokemon knows at most 4.")]
    TooManyMoves(usize),
    #[error("Move {0} was specified more than once.")]
    DuplicateMoves(MoveId),
    #[error("The target pokemon was excluded.")]
    TargetExcluded(SpeciesId),
    /// The facts are corrupt: an evolution points at a species that has no
    /// pre-evolution to evolve from.
    #[error("Species {species} has an evolution record but no pre-evolution")]
    NoParent { species: SpeciesId },
    #[error("Level {0} is outside 1-100")]
    InvalidLevel(u8),
    #[error("Unknown species {0}")]
    UnknownSpecies(SpeciesId),
    #[error("Unknown move {0}")]
    UnknownMove(MoveId),
    #[error("Unknown version group {0}")]
    UnknownVersionGroup(VersionGroupId),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Cost(#[from] CostError),
}

/// Errors raised while loading or querying the Pokedex facts.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed RON data: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Malformed postcard snapshot: {0}")]
    Postcard(#[from] postcard::Error),
    #[error("Malformed JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported data file extension: {0}")]
    UnsupportedFormat(String),
    #[error("{kind} {identifier} not found. Please use the identifier.")]
    NotFound { kind: &'static str, identifier: String },
    #[error("Malformed Pokedex data: {0}")]
    MalformedData(String),
}

/// Errors related to cost table configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CostError {
    #[error("Unknown cost kind: {0}")]
    UnknownKind(String),
    #[error("Cost for {kind} must be a finite, non-negative number (got {value})")]
    InvalidValue { kind: String, value: f64 },
    #[error("Cost override must look like KIND=VALUE (got {0})")]
    MalformedOverride(String),
}

/// Type alias for Results using MovesetError
pub type MovesetResult<T> = Result<T, MovesetError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for Results using CostError
pub type CostResult<T> = Result<T, CostError>;

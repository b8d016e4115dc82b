// In: src/lib.rs

//! Pokedex Moveset Search
//!
//! Decides whether a Pokemon can legally know a given set of moves in a given
//! game, and if so finds the least inconvenient way of getting it: a concrete
//! sequence of catching, levelling, learning, evolving, breeding and trading.
//! The question is answered by a best-first search over the game's facts,
//! loaded once into a read-only [`Pokedex`].

// --- MODULE DECLARATIONS ---
pub mod costs;
pub mod errors;
pub mod movesets;
pub mod pokedex;
pub mod report;
pub mod search;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
// Record definitions and the small enums the search works with.
pub use schema::{
    EggGroupId, EvolutionChainId, EvolutionTrigger, Gender, GenderRate, LearnMethod, MoveId,
    PokedexData, SpeciesId, VersionGroupId,
};

// --- From this crate's modules (`src/`) ---

// The moveset search and its inputs and outputs.
pub use movesets::{check, Action, MoveSet, MovesetPath, MovesetSearch, Node, SearchRequest};

// The fact store.
pub use pokedex::Pokedex;

// The generic search engine.
pub use search::{AStar, Edge, Path, SearchSpace};

// Cost configuration.
pub use costs::{Cost, CostKind, CostTable};

// Crate-specific error and result types.
pub use errors::{
    CostError, CostResult, DataError, DataResult, MovesetError, MovesetResult,
};

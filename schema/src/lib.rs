// Pokedex Moveset Schema - Shared record definitions
// This crate contains the fact records (species, moves, version groups,
// learnsets, evolutions) loaded by the moveset search, kept separate so data
// tooling can read and write them without pulling in the search engine.

// Re-export the main types
pub use ids::*;
pub use methods::*;
pub use records::*;

pub mod ids;
pub mod methods;
pub mod records;

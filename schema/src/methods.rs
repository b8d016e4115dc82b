use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// How a species picks up a move in a given version group.
///
/// The kebab-case names match the identifiers used by the Pokedex tables
/// (`level-up`, `light-ball-egg`, ...).
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum LearnMethod {
    LevelUp,
    Egg,
    Tutor,
    Machine,
    StadiumSurfingPikachu,
    LightBallEgg,
    ColosseumPurification,
    XdShadow,
    XdPurification,
    FormChange,
}

impl LearnMethod {
    /// Moves only obtainable by hatching an egg.
    pub fn is_breeding_only(self) -> bool {
        matches!(self, LearnMethod::Egg | LearnMethod::LightBallEgg)
    }
}

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum EvolutionTrigger {
    LevelUp,
    Trade,
    UseItem,
    Shed,
}

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Gender {
    Female,
    Male,
}

/// Chance of a species being female, in eighths. `-1` means genderless.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct GenderRate(pub i8);

impl GenderRate {
    pub const GENDERLESS: GenderRate = GenderRate(-1);
    pub const ALWAYS_MALE: GenderRate = GenderRate(0);
    pub const ALWAYS_FEMALE: GenderRate = GenderRate(8);

    pub fn is_genderless(self) -> bool {
        self.0 < 0
    }

    pub fn allows(self, gender: Gender) -> bool {
        match gender {
            Gender::Female => self.0 > 0,
            Gender::Male => (0..8).contains(&self.0),
        }
    }

    /// Whether a member of this family can be the father of an egg of
    /// another species. Genderless and female-only families cannot.
    pub fn can_father(self) -> bool {
        self.allows(Gender::Male)
    }
}

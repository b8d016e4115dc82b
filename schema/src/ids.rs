use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(
            Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                $name(value)
            }
        }
    };
}

record_id!(
    /// National dex number of a species.
    SpeciesId(u16)
);
record_id!(MoveId(u16));
record_id!(
    /// A release: one or more versions sold together, e.g. Black and White.
    VersionGroupId(u8)
);
record_id!(
    /// An evolution family, e.g. Pichu/Pikachu/Raichu.
    EvolutionChainId(u16)
);
record_id!(EggGroupId(u8));

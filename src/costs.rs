//! The cost model: how inconvenient each kind of action is.
//!
//! Costs turn "game-mechanical inconvenience" into one scalar that the search
//! minimizes. The table is built once per search and never changes afterwards;
//! swapping it changes which path is preferred, never which paths are legal.

use crate::errors::{CostError, CostResult, DataError, DataResult};
use ordered_float::OrderedFloat;
use schema::LearnMethod;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Scalar cost used throughout the search.
pub type Cost = OrderedFloat<f64>;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum CostKind {
    // Costs for learning a move in various ways
    LevelUp,
    Machine,
    MachineOnce,
    Tutor,
    TutorOnce,
    Sketch,
    // Gimmick methods that must be used anyway when the move is wanted
    StadiumSurfingPikachu,
    LightBallEgg,
    ColosseumPurification,
    XdShadow,
    XdPurification,
    FormChange,
    // Other actions
    Evolution,
    EvolutionDelayed,
    Breed,
    Egg,
    BreedPenalty,
    Trade,
    Transfer,
    Forget,
    Relearn,
    PerLevel,
    PerHatchCounter,
}

impl CostKind {
    pub fn default_cost(self) -> f64 {
        match self {
            CostKind::LevelUp => 20.0,        // The normal way
            CostKind::Machine => 40.0,        // Machines are slightly inconvenient
            CostKind::MachineOnce => 2000.0,  // Before gen 5, TMs only work once
            CostKind::Tutor => 60.0,          // Can't carry tutors around
            CostKind::TutorOnce => 2100.0,    // Gen 3 tutors only work once
            CostKind::Sketch => 10.0,         // Doesn't include learning Sketch itself
            CostKind::StadiumSurfingPikachu
            | CostKind::LightBallEgg
            | CostKind::ColosseumPurification
            | CostKind::XdShadow
            | CostKind::XdPurification
            | CostKind::FormChange => 100.0,
            CostKind::Evolution => 100.0,
            CostKind::EvolutionDelayed => 50.0, // On top of evolution
            CostKind::Breed => 400.0,
            CostKind::Egg => 100.0,           // Per move carried into the egg
            CostKind::BreedPenalty => 300.0,  // Per egg move still missing
            CostKind::Trade => 200.0,
            CostKind::Transfer => 200.0,      // On top of trade, for one-way transfers
            CostKind::Forget => 300.0,
            CostKind::Relearn => 150.0,
            CostKind::PerLevel => 1.0,
            CostKind::PerHatchCounter => 1.0,
        }
    }
}

impl From<LearnMethod> for CostKind {
    fn from(method: LearnMethod) -> Self {
        match method {
            LearnMethod::LevelUp => CostKind::LevelUp,
            LearnMethod::Egg => CostKind::Breed,
            LearnMethod::Tutor => CostKind::Tutor,
            LearnMethod::Machine => CostKind::Machine,
            LearnMethod::StadiumSurfingPikachu => CostKind::StadiumSurfingPikachu,
            LearnMethod::LightBallEgg => CostKind::LightBallEgg,
            LearnMethod::ColosseumPurification => CostKind::ColosseumPurification,
            LearnMethod::XdShadow => CostKind::XdShadow,
            LearnMethod::XdPurification => CostKind::XdPurification,
            LearnMethod::FormChange => CostKind::FormChange,
        }
    }
}

/// Cost overrides as written in a config file: `{"breed": 250, ...}`.
pub type CostOverrides = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct CostTable {
    costs: HashMap<CostKind, Cost>,
}

impl Default for CostTable {
    fn default() -> Self {
        let costs = CostKind::iter()
            .map(|kind| (kind, OrderedFloat(kind.default_cost())))
            .collect();
        CostTable { costs }
    }
}

impl CostTable {
    pub fn get(&self, kind: CostKind) -> Cost {
        self.costs
            .get(&kind)
            .copied()
            .unwrap_or_else(|| OrderedFloat(kind.default_cost()))
    }

    pub fn set(&mut self, kind: CostKind, value: f64) -> CostResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(CostError::InvalidValue {
                kind: kind.to_string(),
                value,
            });
        }
        self.costs.insert(kind, OrderedFloat(value));
        Ok(())
    }

    /// Builder-style variant of [`CostTable::set`].
    pub fn with(mut self, kind: CostKind, value: f64) -> CostResult<Self> {
        self.set(kind, value)?;
        Ok(self)
    }

    /// Apply overrides keyed by the kebab-case cost keyword.
    pub fn apply_overrides(&mut self, overrides: &CostOverrides) -> CostResult<()> {
        for (key, value) in overrides {
            let kind =
                CostKind::from_str(key).map_err(|_| CostError::UnknownKind(key.clone()))?;
            self.set(kind, *value)?;
        }
        Ok(())
    }

    /// Parse a single `KIND=VALUE` override, as given on the command line.
    pub fn apply_override_str(&mut self, entry: &str) -> CostResult<()> {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| CostError::MalformedOverride(entry.to_string()))?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| CostError::MalformedOverride(entry.to_string()))?;
        let mut overrides = CostOverrides::new();
        overrides.insert(key.trim().to_string(), value);
        self.apply_overrides(&overrides)
    }

    /// Load a table from a RON or JSON file holding overrides of the defaults.
    pub fn load(path: &Path) -> DataResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let overrides: CostOverrides = match path.extension().and_then(|s| s.to_str()) {
            Some("ron") => ron::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            other => {
                return Err(DataError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };
        let mut table = CostTable::default();
        table
            .apply_overrides(&overrides)
            .map_err(|e| DataError::MalformedData(e.to_string()))?;
        Ok(table)
    }

    /// The cost of picking up a move by `method` in a game of `generation`.
    pub fn learn_cost(&self, method: LearnMethod, generation: u8) -> Cost {
        match method {
            LearnMethod::Machine if generation < 5 => self.get(CostKind::MachineOnce),
            LearnMethod::Tutor if generation == 3 => self.get(CostKind::TutorOnce),
            other => self.get(CostKind::from(other)),
        }
    }
}

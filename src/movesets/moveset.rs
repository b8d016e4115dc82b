use crate::errors::{MovesetError, MovesetResult};
use schema::MoveId;
use std::fmt;

/// Most moves a Pokemon can know at once.
pub const MAX_MOVES: usize = 4;

/// A set of at most four moves, kept sorted so equal sets hash equally.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MoveSet(Vec<MoveId>);

impl MoveSet {
    pub fn new() -> Self {
        MoveSet(Vec::new())
    }

    /// Build the goal set of a request. Duplicates and overlong lists are errors.
    pub fn from_goal(moves: &[MoveId]) -> MovesetResult<Self> {
        if moves.is_empty() {
            return Err(MovesetError::NoMoves);
        }
        if moves.len() > MAX_MOVES {
            return Err(MovesetError::TooManyMoves(moves.len()));
        }
        let mut sorted = moves.to_vec();
        sorted.sort();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(MovesetError::DuplicateMoves(pair[0]));
        }
        Ok(MoveSet(sorted))
    }

    /// Collect moves into a set, or `None` if there are more than four distinct ones.
    pub fn try_collect(moves: impl IntoIterator<Item = MoveId>) -> Option<Self> {
        let mut moves: Vec<MoveId> = moves.into_iter().collect();
        moves.sort();
        moves.dedup();
        (moves.len() <= MAX_MOVES).then_some(MoveSet(moves))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_MOVES
    }

    pub fn contains(&self, move_id: MoveId) -> bool {
        self.0.binary_search(&move_id).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = MoveId> + '_ {
        self.0.iter().copied()
    }

    /// A copy with `move_id` added, unless it is already known or the set is full.
    pub fn with(&self, move_id: MoveId) -> Option<Self> {
        match self.0.binary_search(&move_id) {
            Ok(_) => None,
            Err(_) if self.is_full() => None,
            Err(pos) => {
                let mut moves = self.0.clone();
                moves.insert(pos, move_id);
                Some(MoveSet(moves))
            }
        }
    }

    pub fn without(&self, move_id: MoveId) -> Self {
        MoveSet(self.0.iter().copied().filter(|&m| m != move_id).collect())
    }

    pub fn intersection(&self, other: &MoveSet) -> Self {
        MoveSet(self.iter().filter(|&m| other.contains(m)).collect())
    }

    pub fn difference(&self, other: &MoveSet) -> Self {
        MoveSet(self.iter().filter(|&m| !other.contains(m)).collect())
    }

    pub fn is_subset(&self, other: &MoveSet) -> bool {
        self.iter().all(|m| other.contains(m))
    }

    /// Every subset, the empty set and `self` included.
    pub fn subsets(&self) -> impl Iterator<Item = MoveSet> + '_ {
        (0u32..(1 << self.0.len())).map(move |mask| {
            MoveSet(
                self.0
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, &m)| m)
                    .collect(),
            )
        })
    }
}

impl fmt::Display for MoveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{{{}}}", ids.join(", "))
    }
}

impl<'a> IntoIterator for &'a MoveSet {
    type Item = MoveId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, MoveId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(ids: &[u16]) -> MoveSet {
        MoveSet::try_collect(ids.iter().map(|&id| MoveId(id))).unwrap()
    }

    #[test]
    fn test_goal_validation() {
        assert!(matches!(MoveSet::from_goal(&[]), Err(MovesetError::NoMoves)));
        let five: Vec<MoveId> = (1..=5).map(MoveId).collect();
        assert!(matches!(
            MoveSet::from_goal(&five),
            Err(MovesetError::TooManyMoves(5))
        ));
        assert!(matches!(
            MoveSet::from_goal(&[MoveId(3), MoveId(1), MoveId(3)]),
            Err(MovesetError::DuplicateMoves(MoveId(3)))
        ));
        assert_eq!(MoveSet::from_goal(&[MoveId(9), MoveId(2)]).unwrap(), set(&[2, 9]));
    }

    #[test]
    fn test_with_never_exceeds_four_moves() {
        let full = set(&[1, 2, 3, 4]);
        assert_eq!(full.with(MoveId(5)), None);
        assert_eq!(full.with(MoveId(2)), None);
        assert_eq!(set(&[1, 3]).with(MoveId(2)), Some(set(&[1, 2, 3])));
        assert_eq!(MoveSet::try_collect((1..=5).map(MoveId)), None);
    }

    #[test]
    fn test_set_operations() {
        let a = set(&[1, 2, 3]);
        let b = set(&[2, 3, 4]);
        assert_eq!(a.intersection(&b), set(&[2, 3]));
        assert_eq!(a.difference(&b), set(&[1]));
        assert!(set(&[2]).is_subset(&a));
        assert!(!b.is_subset(&a));
        assert_eq!(a.without(MoveId(2)), set(&[1, 3]));
    }

    #[test]
    fn test_subsets() {
        let subsets: Vec<MoveSet> = set(&[1, 2]).subsets().collect();
        assert_eq!(subsets, vec![set(&[]), set(&[1]), set(&[2]), set(&[1, 2])]);
    }
}

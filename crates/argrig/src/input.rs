//! Owned token buffer for a single parse pass.
//!
//! Every slot holds either a raw token or a tombstone. Parsers claim tokens by
//! taking them out of their slot; a taken slot stays empty until the buffer is
//! dropped, so no token can be claimed twice or reported as unknown after a
//! parser consumed it.

/// Location of a slot offered to a parser.
///
/// `slot` is the index into the underlying buffer. `rank` is the index of the
/// slot among the tokens that were still present when the current parsing
/// round started. Operand parsers match on `rank`, named parsers on `slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub slot: usize,
    pub rank: usize,
}

#[derive(Debug, Clone, Default)]
pub struct InputArgs {
    slots: Vec<Option<String>>,
}

impl InputArgs {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slots: tokens.into_iter().map(|t| Some(t.into())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The token at `slot`, unless it is out of range or already consumed.
    pub fn get(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).and_then(|s| s.as_deref())
    }

    pub fn is_consumed(&self, slot: usize) -> bool {
        self.get(slot).is_none()
    }

    /// Tombstone `slot` and hand out its token.
    pub fn take(&mut self, slot: usize) -> Option<String> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// First slot after `slot` that still holds a token.
    pub fn next_live(&self, slot: usize) -> Option<usize> {
        (slot + 1..self.slots.len()).find(|&i| self.slots[i].is_some())
    }

    /// Positions of all live tokens, ranked in order of appearance.
    pub fn live_positions(&self) -> Vec<Position> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .enumerate()
            .map(|(rank, (slot, _))| Position { slot, rank })
            .collect()
    }

    /// Tokens nobody claimed, in input order.
    pub fn remaining(&self) -> Vec<String> {
        self.slots.iter().flatten().cloned().collect()
    }

    pub fn is_exhausted(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

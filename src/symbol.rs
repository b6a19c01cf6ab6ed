//! Symbol definitions and the per-run registry that owns them.

use crate::error::GrammarError;
use serde::{Deserialize, Serialize};

/// Dense index of a [`SymbolDef`] inside its [`SymbolRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub usize);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A letter together with its ordered formal parameter names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDef {
    pub letter: char,
    pub params: Vec<char>,
}

impl SymbolDef {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Catalog of symbol definitions for one run.
///
/// Definitions are only ever appended. Once the grammar is built the registry
/// is shared by reference and never mutated again. Letters may repeat; every
/// letter lookup resolves to the earliest definition.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SymbolRegistry {
    defs: Vec<SymbolDef>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition and returns its id.
    pub fn define(&mut self, letter: char, params: Vec<char>) -> SymbolId {
        let id = SymbolId(self.defs.len());
        self.defs.push(SymbolDef {
            letter,
            params,
        });
        id
    }

    /// First definition whose letter is `letter`.
    pub fn lookup(&self, letter: char) -> Result<SymbolId, GrammarError> {
        self.defs
            .iter()
            .position(|d| d.letter == letter)
            .map(SymbolId)
            .ok_or(GrammarError::UnknownSymbol(letter))
    }

    /// Resolves an id handed out by this registry.
    ///
    /// # Panics
    ///
    /// If `id` came from a different registry and is out of range.
    pub fn get(&self, id: SymbolId) -> &SymbolDef {
        &self.defs[id.index()]
    }

    /// Resolves an id, failing if it does not belong to this registry.
    pub fn try_get(&self, id: SymbolId) -> Result<&SymbolDef, GrammarError> {
        self.defs
            .get(id.index())
            .ok_or(GrammarError::UnknownSymbolId(id))
    }

    /// Iterates over all definitions with their ids, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &SymbolDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, d)| (SymbolId(i), d))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_first_definition() {
        let mut registry = SymbolRegistry::new();
        let first = registry.define('A', vec!['x']);
        let second = registry.define('A', vec!['y', 'z']);

        assert_ne!(first, second);
        assert_eq!(registry.lookup('A'), Ok(first));
        assert_eq!(registry.get(second).arity(), 2);
    }

    #[test]
    fn ids_stay_distinct_past_u16_range() {
        let mut registry = SymbolRegistry::new();
        let first = registry.define('A', vec![]);
        for _ in 0..u16::MAX {
            registry.define('B', vec![]);
        }
        let last = registry.define('C', vec!['x', 'y']);

        assert_ne!(first, last);
        assert_eq!(registry.len(), u16::MAX as usize + 2);
        assert_eq!(registry.get(last).letter, 'C');
        assert_eq!(registry.lookup('C'), Ok(last));
    }

    #[test]
    fn try_get_rejects_foreign_id() {
        let mut registry = SymbolRegistry::new();
        registry.define('A', vec![]);
        assert_eq!(
            registry.try_get(SymbolId(7)),
            Err(GrammarError::UnknownSymbolId(SymbolId(7)))
        );
        assert_eq!(registry.try_get(SymbolId(0)).map(|d| d.letter), Ok('A'));
    }

    #[test]
    fn lookup_unknown_letter_fails() {
        let registry = SymbolRegistry::new();
        assert_eq!(registry.lookup('Q'), Err(GrammarError::UnknownSymbol('Q')));
    }
}

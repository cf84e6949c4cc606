//! Keyed reconciliation between two ordered lists.
//!
//! Identity is the key alone. Position is never used to pair items, so a
//! changed entry is reported as a change of that key and not as a reorder.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::model::{Connection, ConnectionId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit<T, K> {
    /// `item` belongs at `position` in the new list.
    Insert { item: T, position: usize },
    Remove { key: K },
    Change { key: K, item: T },
}

pub type ConnectionEdit = Edit<Connection, ConnectionId>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditSummary {
    pub inserted: usize,
    pub removed: usize,
    pub changed: usize,
}

impl EditSummary {
    pub fn of<T, K>(edits: &[Edit<T, K>]) -> Self {
        let mut out = Self::default();
        for e in edits {
            match e {
                Edit::Insert { .. } => out.inserted += 1,
                Edit::Remove { .. } => out.removed += 1,
                Edit::Change { .. } => out.changed += 1,
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.inserted + self.removed + self.changed == 0
    }
}

/// Computes the edit script turning `old` into `new`.
///
/// Removes come first, in `old` order; inserts and changes follow in `new`
/// order, with insert positions indexing into `new`.
pub fn diff_by<T, K, FK, FE>(old: &[T], new: &[T], key: FK, equals: FE) -> Vec<Edit<T, K>>
where
    T: Clone,
    K: Eq + Hash + Clone,
    FK: Fn(&T) -> K,
    FE: Fn(&T, &T) -> bool,
{
    let old_by_key: HashMap<K, &T> = old.iter().map(|t| (key(t), t)).collect();
    let new_keys: HashSet<K> = new.iter().map(&key).collect();

    let mut edits = Vec::new();
    for t in old {
        let k = key(t);
        if !new_keys.contains(&k) {
            edits.push(Edit::Remove { key: k });
        }
    }

    for (position, t) in new.iter().enumerate() {
        let k = key(t);
        match old_by_key.get(&k) {
            None => edits.push(Edit::Insert {
                item: t.clone(),
                position,
            }),
            Some(prev) if !equals(prev, t) => edits.push(Edit::Change {
                key: k,
                item: t.clone(),
            }),
            Some(_) => {}
        }
    }

    edits
}

pub fn diff(old: &[Connection], new: &[Connection]) -> Vec<ConnectionEdit> {
    diff_by(old, new, |c| c.id.clone(), |a, b| a == b)
}

/// Applies an edit script produced by [`diff_by`] to a displayed list.
///
/// Survivors keep their current relative order; see [`reorder_by`].
pub fn apply_by<T, K, FK>(displayed: &mut Vec<T>, edits: &[Edit<T, K>], key: FK)
where
    T: Clone,
    K: Eq,
    FK: Fn(&T) -> K,
{
    for e in edits {
        match e {
            Edit::Remove { key: k } => displayed.retain(|t| key(t) != *k),
            Edit::Change { key: k, item } => {
                if let Some(slot) = displayed.iter_mut().find(|t| key(t) == *k) {
                    *slot = item.clone();
                }
            }
            Edit::Insert { .. } => {}
        }
    }

    // Positions index the final list, so inserting in ascending order lands
    // every item where the new list has it.
    let mut inserts: Vec<(usize, &T)> = edits
        .iter()
        .filter_map(|e| match e {
            Edit::Insert { item, position } => Some((*position, item)),
            _ => None,
        })
        .collect();
    inserts.sort_by_key(|(position, _)| *position);
    for (position, item) in inserts {
        let at = position.min(displayed.len());
        displayed.insert(at, item.clone());
    }
}

pub fn apply(displayed: &mut Vec<Connection>, edits: &[ConnectionEdit]) {
    apply_by(displayed, edits, |c| c.id.clone())
}

/// Puts `displayed` into the order of `order`, matching items by key.
///
/// Kept items that moved produce no edits, so this runs after [`apply_by`]
/// to carry the order implied by the new sequence. Items whose key is not
/// in `order` keep their relative order at the end.
pub fn reorder_by<T, K, FK>(displayed: &mut [T], order: &[T], key: FK)
where
    K: Eq + Hash,
    FK: Fn(&T) -> K,
{
    let rank: HashMap<K, usize> = order.iter().enumerate().map(|(i, t)| (key(t), i)).collect();
    displayed.sort_by_key(|t| rank.get(&key(t)).copied().unwrap_or(usize::MAX));
}

pub fn reorder(displayed: &mut [Connection], order: &[Connection]) {
    reorder_by(displayed, order, |c| c.id.clone())
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;

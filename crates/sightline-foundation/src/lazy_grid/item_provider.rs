//! Item identity for lazy grids.

use std::fmt;
use std::rc::Rc;

/// Stable identity of a grid item, used by hosts to reconcile rendered
/// children between frames.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKey {
    /// Positional identity. Unstable when items are inserted, removed or
    /// reordered; supply a key function when that matters.
    Index(usize),
    Int(i64),
    Str(Rc<str>),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Index(index) => write!(f, "#{index}"),
            ItemKey::Int(value) => write!(f, "{value}"),
            ItemKey::Str(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ItemKey {
    fn from(value: i64) -> Self {
        ItemKey::Int(value)
    }
}

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        ItemKey::Str(Rc::from(value))
    }
}

impl From<String> for ItemKey {
    fn from(value: String) -> Self {
        ItemKey::Str(Rc::from(value))
    }
}

/// Consumer-supplied identity function over `(item, index)`.
pub type KeyFn<'a, T> = &'a dyn Fn(&T, usize) -> ItemKey;

/// Provides the item count and per-index identity of a lazy grid.
///
/// Implementations should be immutable; a changed data source is a new
/// provider.
pub trait LazyGridItemProvider {
    /// The total number of items (visible or not).
    fn item_count(&self) -> usize;

    /// Returns the key for the item at the given index.
    ///
    /// If not overridden, defaults to the index itself.
    fn get_key(&self, index: usize) -> ItemKey {
        ItemKey::Index(index)
    }

    /// Get the index for a given key, or `None` if no item has it.
    fn get_index(&self, key: &ItemKey) -> Option<usize> {
        (0..self.item_count()).find(|&i| &self.get_key(i) == key)
    }
}

/// Items borrowed from a slice, optionally keyed by a consumer function.
pub struct SliceItems<'a, T> {
    items: &'a [T],
    key_fn: Option<KeyFn<'a, T>>,
}

impl<'a, T> SliceItems<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items,
            key_fn: None,
        }
    }

    pub fn with_key_fn(items: &'a [T], key_fn: KeyFn<'a, T>) -> Self {
        Self {
            items,
            key_fn: Some(key_fn),
        }
    }

    pub fn items(&self) -> &'a [T] {
        self.items
    }

    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.items.get(index)
    }
}

impl<T> LazyGridItemProvider for SliceItems<'_, T> {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn get_key(&self, index: usize) -> ItemKey {
        match (self.key_fn, self.items.get(index)) {
            (Some(key_fn), Some(item)) => key_fn(item, index),
            _ => ItemKey::Index(index),
        }
    }
}

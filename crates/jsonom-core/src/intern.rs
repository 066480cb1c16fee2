//! Key interning for decoded documents.
//!
//! Large documents tend to repeat the same object keys thousands of times
//! (`"id"`, `"name"`, ...). Routing every decoded key through an interner
//! makes all equal keys share one `Arc<str>` allocation.

use std::collections::HashSet;
use std::sync::Arc;

/// Produces a canonical shared instance for string content.
///
/// The decoder calls this for object keys only; string values are never
/// interned.
pub trait StringInterner {
    /// Return a string equal in content to `s`. Equal content passed to the
    /// same interner yields the same allocation.
    fn intern(&mut self, s: &str) -> Arc<str>;
}

/// Set-backed interner. The default value is ready to use; the table is
/// allocated on the first call to [`intern`](StringInterner::intern) and
/// grows without eviction for the interner's lifetime.
///
/// # Example
///
/// ```
/// use jsonom_core::{MapInterner, StringInterner};
/// use std::sync::Arc;
///
/// let mut interner = MapInterner::default();
/// let a = interner.intern("name");
/// let b = interner.intern("name");
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Debug, Default)]
pub struct MapInterner {
    strings: Option<HashSet<Arc<str>>>,
}

impl MapInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.strings.as_ref().map_or(0, HashSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StringInterner for MapInterner {
    fn intern(&mut self, s: &str) -> Arc<str> {
        let strings = self
            .strings
            .get_or_insert_with(|| HashSet::with_capacity(128));
        if let Some(existing) = strings.get(s) {
            return Arc::clone(existing);
        }
        let shared: Arc<str> = Arc::from(s);
        strings.insert(Arc::clone(&shared));
        shared
    }
}

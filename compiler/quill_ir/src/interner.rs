//! String interner for identifiers.
//!
//! Interned strings are leaked so lookups can hand out `&'static str`
//! without holding the lock. Every table therefore lives until the process
//! exits. The convenience parse entry points all intern into
//! [`SharedInterner::global`], so a long-running host that renders many
//! templates grows one table bounded by its total vocabulary. A host that
//! creates a fresh table per template leaks that table's names each time.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Reserved binding holding the full argument list of a call.
pub const ARGUMENTS: &str = "arguments";

/// Reserved binding holding the delegate block of a call.
pub const DELEGATE_BLOCK: &str = "$$";

/// The table ran out of 32-bit name indices.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("string interner overflow: more than {max} distinct names", max = u32::MAX)]
pub struct InternOverflow;

#[derive(Default)]
struct InternTable {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// Thread-safe string interner.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create an interner with the empty string and reserved names pre-interned.
    pub fn new() -> Self {
        let interner = StringInterner {
            table: RwLock::new(InternTable::default()),
        };
        let empty = interner.intern("");
        debug_assert_eq!(empty, Name::EMPTY);
        interner.intern(ARGUMENTS);
        interner.intern(DELEGATE_BLOCK);
        interner
    }

    /// Intern a string, returning its [`Name`].
    pub fn try_intern(&self, s: &str) -> Result<Name, InternOverflow> {
        if let Some(&name) = self.table.read().map.get(s) {
            return Ok(name);
        }

        let mut table = self.table.write();
        if let Some(&name) = table.map.get(s) {
            return Ok(name);
        }

        let index = u32::try_from(table.strings.len()).map_err(|_| InternOverflow)?;
        let name = Name::from_raw(index);
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.strings.push(leaked);
        table.map.insert(leaked, name);
        Ok(name)
    }

    /// Intern a string, returning its [`Name`].
    ///
    /// # Panics
    /// Panics if the table already holds `u32::MAX + 1` names.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the string for a [`Name`]. Unknown names resolve to `""`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Name of the reserved `arguments` binding.
    pub fn arguments(&self) -> Name {
        self.intern(ARGUMENTS)
    }

    /// Name of the reserved `$$` binding.
    pub fn delegate_block(&self) -> Name {
        self.intern(DELEGATE_BLOCK)
    }

    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to a [`StringInterner`].
///
/// The parser, interpreter and printer of one session share the same table.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

static GLOBAL_INTERNER: OnceLock<SharedInterner> = OnceLock::new();

impl SharedInterner {
    /// A fresh, unshared table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the process-wide table.
    pub fn global() -> Self {
        GLOBAL_INTERNER.get_or_init(SharedInterner::new).clone()
    }

    /// True if both handles point at the same table.
    pub fn ptr_eq(a: &SharedInterner, b: &SharedInterner) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests;

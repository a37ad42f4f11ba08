//! Interned string identifiers.
//!
//! A `Name` is a 32-bit index into the [`StringInterner`]. Equality and
//! hashing are O(1) integer operations; the interner resolves a `Name` back
//! to its text for diagnostics.

use std::fmt;

use rustc_hash::FxHashMap;

/// Interned string identifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Pre-interned `size`, the compile-time member of stack types.
    pub const STACK_SIZE: Name = Name(1);

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Names interned before any user input, in index order.
///
/// The order here must match the `Name` constants above.
const PRE_INTERNED: &[&str] = &["", "size"];

/// String interner backing [`Name`].
///
/// Single-threaded: the folding pass and the passes around it run on one
/// thread, so there is no sharding or locking. Interned text is leaked so
/// the map can key on `&'static str` without double storage; the interner
/// lives for the whole compilation.
pub struct StringInterner {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl StringInterner {
    /// Create a new interner with the well-known names pre-interned.
    pub fn new() -> Self {
        let mut interner = StringInterner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        for s in PRE_INTERNED {
            interner.intern(s);
        }
        debug_assert_eq!(interner.resolve(Name::STACK_SIZE), "size");
        interner
    }

    /// Intern a string, returning its `Name`.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&idx) = self.map.get(s) {
            return Name(idx);
        }
        let idx = u32::try_from(self.strings.len())
            .unwrap_or_else(|_| panic!("interner capacity exceeded: {} strings", self.strings.len()));
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        self.map.insert(leaked, idx);
        self.strings.push(leaked);
        Name(idx)
    }

    /// Resolve a `Name` back to its text.
    ///
    /// # Panics
    /// Panics if `name` was not produced by this interner.
    #[inline]
    pub fn resolve(&self, name: Name) -> &str {
        self.strings[name.0 as usize]
    }

    /// Number of interned strings.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the interner holds only the pre-interned names.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.len() == PRE_INTERNED.len()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

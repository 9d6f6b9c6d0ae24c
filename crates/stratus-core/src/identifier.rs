//! Identifier management using string interning for efficient storage and comparison.
//!
//! This module provides the [`Id`] type used to name nodes and clusters in the
//! emitted graph description. Display labels are free-form and may repeat, so
//! graph identity never rests on the label itself: diagrams mint one [`Id`]
//! per element from the label plus a per-diagram ordinal.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// Reduces a free-form display label to an identifier-safe slug.
///
/// Lowercases the input, maps runs of non-alphanumeric characters to a single
/// underscore, and trims leading/trailing underscores. An input with no
/// alphanumeric characters at all slugs to `"n"` so the result is never empty.
///
/// # Examples
///
/// ```
/// use stratus_core::identifier::slug;
///
/// assert_eq!(slug("Load Balancer"), "load_balancer");
/// assert_eq!(slug("Node.js Server"), "node_js_server");
/// assert_eq!(slug("---"), "n");
/// ```
pub fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut gap = false;
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }
    if out.is_empty() {
        out.push('n');
    }
    out
}

/// Interned identifier for diagram elements.
///
/// `Id` is `Copy` and cheap to compare; the backing string lives in a global
/// interner. Identity semantics are by interned string: two `Id`s constructed
/// from the same text are equal.
///
/// # Examples
///
/// ```
/// use stratus_core::identifier::Id;
///
/// let a = Id::new("dns_0");
/// let b = Id::new("dns_0");
/// assert_eq!(a, b);
///
/// // Unique ids minted from a (possibly repeated) display label:
/// let first = Id::unique("Replica DB", 4);
/// let second = Id::unique("Replica DB", 5);
/// assert_ne!(first, second);
/// assert_eq!(first, "replica_db_4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string.
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        Self(interner.get_or_intern(name))
    }

    /// Mints a unique id from a display label and a per-diagram ordinal.
    ///
    /// Labels carry no uniqueness constraint, so the ordinal (typically the
    /// element's insertion index) is appended to the slugged label.
    pub fn unique(label: &str, ordinal: usize) -> Self {
        Self::new(&format!("{}_{}", slug(label), ordinal))
    }

    /// Creates a path-qualified id by appending a child segment.
    ///
    /// Used for cluster containment paths, e.g. `aws_cloud/vpc/public_subnet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratus_core::identifier::Id;
    ///
    /// let root = Id::new("aws_cloud");
    /// let nested = root.qualified("Public Subnet");
    /// assert_eq!(nested, "aws_cloud/public_subnet");
    /// ```
    pub fn qualified(&self, child: &str) -> Self {
        Self::new(&format!("{}/{}", self, slug(child)))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{value}")
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`.
    fn eq(&self, other: &str) -> bool {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        value == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

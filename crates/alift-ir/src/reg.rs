//! Symbolic register and flag names.

use std::borrow::Cow;
use std::fmt::{self, Display};

/// A register referred to by name.
///
/// Sub-registers name their `parent`; a write to a sub-register
/// zero-extends into the parent, so both share one storage location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reg {
    name: Cow<'static, str>,
    size: u8,
    parent: Option<Cow<'static, str>>,
}

impl Reg {
    /// Create a full-width register.
    #[must_use]
    pub const fn new(name: &'static str, size: u8) -> Self {
        Self {
            name: Cow::Borrowed(name),
            size,
            parent: None,
        }
    }

    /// Create a sub-register whose writes zero-extend into `parent`.
    #[must_use]
    pub const fn sub(name: &'static str, size: u8, parent: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            size,
            parent: Some(Cow::Borrowed(parent)),
        }
    }

    /// Create a full-width register with a runtime-built name.
    #[must_use]
    pub fn named(name: impl Into<Cow<'static, str>>, size: u8) -> Self {
        Self {
            name: name.into(),
            size,
            parent: None,
        }
    }

    /// Register name as it appears in the IR.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes.
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Storage location written by this register (parent or self).
    #[must_use]
    pub fn storage(&self) -> &str {
        self.parent.as_deref().unwrap_or(&self.name)
    }

    /// Whether this register is a zero-extending sub-register.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.parent.is_some()
    }
}

impl Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A single condition flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Flag(&'static str);

impl Flag {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

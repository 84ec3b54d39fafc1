//! Discovery of declared types and members.
//!
//! A [`Discovery`] answers one question per namespace: which types are
//! declared under it. The answer is a scoped [`ScanHandle`] that lists
//! [`TypeInfo`] metadata and realizes each entry into a [`DeclaredType`]
//! on demand. Handles are dropped as soon as the namespace is done, so
//! implementations release whatever they hold in `Drop`.
//!
//! ```text
//! namespace
//!   ↓ Discovery::scan()
//! ScanHandle (types())
//!   ↓ ScanHandle::load()
//! DeclaredType { methods, fields }
//! ```

use crate::types::BoxError;
use std::path::{Path, PathBuf};

mod memory;

pub use memory::InMemoryDiscovery;

/// Errors raised by a discovery facility.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// IO error reading sources.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file could not be parsed.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// The namespace is not a valid module path.
    #[error("Invalid namespace `{namespace}`: {reason}")]
    InvalidNamespace {
        /// The rejected namespace.
        namespace: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A discovered type could not be realized.
    #[error("Failed to load type {name}: {message}")]
    Load {
        /// Qualified name of the type.
        name: String,
        /// Failure description.
        message: String,
    },

    /// Failure from a third-party discovery implementation.
    #[error(transparent)]
    Other(BoxError),
}

/// Supplies declared types for a namespace.
pub trait Discovery {
    /// Opens a scan of every type declared under `namespace`.
    ///
    /// The returned handle is scoped to a single namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace cannot be scanned.
    fn scan(&self, namespace: &str) -> Result<Box<dyn ScanHandle + '_>, DiscoveryError>;
}

/// An open scan over one namespace.
pub trait ScanHandle {
    /// Returns the types found, in discovery order.
    fn types(&self) -> &[TypeInfo];

    /// Realizes a discovered type into its declared surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the type cannot be loaded.
    fn load(&self, info: &TypeInfo) -> Result<DeclaredType, DiscoveryError>;
}

/// Metadata about a discovered type, before it is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    name: String,
    qualified_name: String,
    origin: Option<PathBuf>,
}

impl TypeInfo {
    /// Creates type metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            origin: None,
        }
    }

    /// Sets the file the type was found in.
    #[must_use]
    pub fn with_origin(mut self, path: impl Into<PathBuf>) -> Self {
        self.origin = Some(path.into());
        self
    }

    /// Simple name of the type.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully qualified name (e.g. `crate::billing::Invoice`).
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Source file the type was discovered in, if known.
    #[must_use]
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }
}

/// A method or field declared directly for a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredMember {
    name: String,
    exempt: bool,
}

impl DeclaredMember {
    /// Creates a member that is subject to checking.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exempt: false,
        }
    }

    /// Creates a member carrying the exemption marker.
    #[must_use]
    pub fn exempt(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exempt: true,
        }
    }

    /// Declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the member is marked exempt.
    #[must_use]
    pub fn is_exempt(&self) -> bool {
        self.exempt
    }
}

/// A loaded type with its directly declared members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    name: String,
    qualified_name: String,
    exempt: bool,
    methods: Vec<DeclaredMember>,
    fields: Vec<DeclaredMember>,
}

impl DeclaredType {
    /// Creates a type with no members; the qualified name defaults to the
    /// simple name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            qualified_name: name.clone(),
            name,
            exempt: false,
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Sets the fully qualified name.
    #[must_use]
    pub fn qualified(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = qualified_name.into();
        self
    }

    /// Sets the exemption marker on the type itself.
    #[must_use]
    pub fn exempted(mut self, exempt: bool) -> Self {
        self.exempt = exempt;
        self
    }

    /// Adds a declared method.
    #[must_use]
    pub fn with_method(mut self, method: DeclaredMember) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a declared field.
    #[must_use]
    pub fn with_field(mut self, field: DeclaredMember) -> Self {
        self.fields.push(field);
        self
    }

    /// Simple name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully qualified name.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Whether the type is marked exempt.
    #[must_use]
    pub fn is_exempt(&self) -> bool {
        self.exempt
    }

    /// Directly declared methods, in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[DeclaredMember] {
        &self.methods
    }

    /// Directly declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[DeclaredMember] {
        &self.fields
    }

    /// Metadata describing this type.
    #[must_use]
    pub fn info(&self) -> TypeInfo {
        TypeInfo::new(&self.name, &self.qualified_name)
    }
}

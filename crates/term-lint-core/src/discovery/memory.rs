//! In-memory discovery over pre-built type metadata.

use super::{DeclaredType, Discovery, DiscoveryError, ScanHandle, TypeInfo};
use std::collections::{HashMap, HashSet};

/// A [`Discovery`] backed by types registered up front.
///
/// Useful in tests, and for feeding metadata produced elsewhere (for
/// instance by a build script) into a rule.
#[derive(Debug, Default)]
pub struct InMemoryDiscovery {
    namespaces: HashMap<String, Vec<DeclaredType>>,
    broken_namespaces: HashMap<String, String>,
    unloadable: HashSet<String>,
}

impl InMemoryDiscovery {
    /// Creates an empty discovery; every namespace scans as empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type under a namespace, after any already registered.
    #[must_use]
    pub fn with_type(mut self, namespace: impl Into<String>, ty: DeclaredType) -> Self {
        self.namespaces.entry(namespace.into()).or_default().push(ty);
        self
    }

    /// Makes scanning `namespace` fail with `message`.
    #[must_use]
    pub fn with_broken_namespace(
        mut self,
        namespace: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.broken_namespaces
            .insert(namespace.into(), message.into());
        self
    }

    /// Makes loading the type with this qualified name fail.
    #[must_use]
    pub fn with_unloadable(mut self, qualified_name: impl Into<String>) -> Self {
        self.unloadable.insert(qualified_name.into());
        self
    }
}

impl Discovery for InMemoryDiscovery {
    fn scan(&self, namespace: &str) -> Result<Box<dyn ScanHandle + '_>, DiscoveryError> {
        if let Some(message) = self.broken_namespaces.get(namespace) {
            return Err(DiscoveryError::Other(message.clone().into()));
        }

        let types = self.namespaces.get(namespace).map_or(&[][..], Vec::as_slice);
        Ok(Box::new(MemoryScan {
            infos: types.iter().map(DeclaredType::info).collect(),
            types,
            unloadable: &self.unloadable,
        }))
    }
}

struct MemoryScan<'a> {
    infos: Vec<TypeInfo>,
    types: &'a [DeclaredType],
    unloadable: &'a HashSet<String>,
}

impl ScanHandle for MemoryScan<'_> {
    fn types(&self) -> &[TypeInfo] {
        &self.infos
    }

    fn load(&self, info: &TypeInfo) -> Result<DeclaredType, DiscoveryError> {
        if self.unloadable.contains(info.qualified_name()) {
            return Err(DiscoveryError::Load {
                name: info.qualified_name().to_string(),
                message: "type is registered as unloadable".to_string(),
            });
        }
        self.types
            .iter()
            .find(|t| t.qualified_name() == info.qualified_name())
            .cloned()
            .ok_or_else(|| DiscoveryError::Load {
                name: info.qualified_name().to_string(),
                message: "type is not part of this scan".to_string(),
            })
    }
}

//! Namespace/name/identifier triple used by every concept in a node.

use serde::{Deserialize, Serialize};
use std::fmt;

use belgraph_common::constants::BEL_DEFAULT_NAMESPACE;
use belgraph_common::{BelError, Result};

use crate::canonical::{ensure_quotes, CanonicalTuple};
use crate::language::Function;

/// A concept reference. Compared and hashed by all three fields.
///
/// Bare cross-references may carry only a namespace and identifier; the
/// "name or identifier" requirement is enforced where nodes are built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl Entity {
    pub fn new(namespace: impl Into<String>, name: Option<&str>, identifier: Option<&str>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.map(str::to_string),
            identifier: identifier.map(str::to_string),
        }
    }

    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), name: Some(name.into()), identifier: None }
    }

    pub fn with_identifier(
        namespace: impl Into<String>,
        identifier: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: Some(name.into()),
            identifier: Some(identifier.into()),
        }
    }

    /// Build the concept of an abundance-level node, which must be identifiable.
    pub(crate) fn for_node(
        function: Function,
        namespace: &str,
        name: Option<&str>,
        identifier: Option<&str>,
    ) -> Result<Self> {
        let entity = Self::new(namespace, name, identifier);
        entity.check_identity(function)?;
        Ok(entity)
    }

    pub(crate) fn check_identity(&self, function: Function) -> Result<()> {
        if self.name.is_none() && self.identifier.is_none() {
            return Err(BelError::MissingNodeIdentity { function: function.as_str().to_string() });
        }
        Ok(())
    }

    /// Name if present, otherwise the identifier.
    pub fn name_or_identifier(&self) -> &str {
        self.name.as_deref().or(self.identifier.as_deref()).unwrap_or_default()
    }

    pub fn is_default_namespace(&self) -> bool {
        self.namespace == BEL_DEFAULT_NAMESPACE
    }

    /// `namespace:identifier`, falling back to the name.
    pub fn curie(&self) -> String {
        let local = self.identifier.as_deref().or(self.name.as_deref()).unwrap_or_default();
        format!("{}:{}", self.namespace, ensure_quotes(local))
    }

    /// `namespace:identifier ! name` when both are known, otherwise the curie.
    pub fn obo(&self) -> String {
        match (&self.identifier, &self.name) {
            (Some(identifier), Some(name)) => {
                format!("{}:{} ! {}", self.namespace, ensure_quotes(identifier), ensure_quotes(name))
            }
            (None, Some(name)) => format!("{}:{}", self.namespace, ensure_quotes(name)),
            _ => self.curie(),
        }
    }

    /// BEL rendering of the same `(namespace, name_or_identifier)` key the
    /// tuple uses, so tuple-equal concepts render identically. The default
    /// namespace renders as the bare term.
    pub fn as_bel(&self) -> String {
        let term = ensure_quotes(self.name_or_identifier());
        if self.is_default_namespace() {
            term
        } else {
            format!("{}:{}", self.namespace, term)
        }
    }

    /// `(namespace, name_or_identifier)`
    pub(crate) fn key_tuple(&self) -> CanonicalTuple {
        CanonicalTuple::tuple(vec![
            self.namespace.as_str().into(),
            self.name_or_identifier().into(),
        ])
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.obo())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curie_prefers_identifier() {
        let e = Entity::with_identifier("mesh", "D009474", "Neurons");
        assert_eq!(e.curie(), "mesh:D009474");
        assert_eq!(e.obo(), "mesh:D009474 ! Neurons");
    }

    #[test]
    fn test_name_only_rendering() {
        let e = Entity::named("SFAM", "TAP Family");
        assert_eq!(e.curie(), "SFAM:\"TAP Family\"");
        assert_eq!(e.obo(), "SFAM:\"TAP Family\"");
    }

    #[test]
    fn test_bel_rendering_follows_tuple_key() {
        let named = Entity::named("HGNC", "AKT1");
        let grounded = Entity::with_identifier("HGNC", "391", "AKT1");
        assert_eq!(named.key_tuple(), grounded.key_tuple());
        assert_eq!(grounded.as_bel(), "HGNC:AKT1");
        assert_eq!(Entity::new("uniprot", None, Some("P31749")).as_bel(), "uniprot:P31749");
    }

    #[test]
    fn test_default_namespace_renders_bare_name() {
        assert_eq!(Entity::named("bel", "Ph").as_bel(), "Ph");
        assert_eq!(Entity::named("GO", "kinase activity").as_bel(), "GO:\"kinase activity\"");
    }

    #[test]
    fn test_node_identity_required() {
        let err = Entity::for_node(Function::Protein, "HGNC", None, None).unwrap_err();
        assert!(matches!(err, BelError::MissingNodeIdentity { .. }));
        assert!(Entity::for_node(Function::Protein, "HGNC", None, Some("391")).is_ok());
    }

    #[test]
    fn test_bare_cross_reference_allowed() {
        let e = Entity::new("uniprot", None, Some("P31749"));
        assert_eq!(e.name_or_identifier(), "P31749");
    }
}

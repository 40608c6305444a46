//! Field names of the node and edge dictionary forms.
//!
//! These keys are a stable contract with every consumer of the node-link
//! JSON form, so they live in one place.

// ── Node dictionary ───────────────────────────────────────────────────────────

pub const CONCEPT: &str = "concept";
pub const NAMESPACE: &str = "namespace";
pub const NAME: &str = "name";
pub const IDENTIFIER: &str = "identifier";
pub const VARIANTS: &str = "variants";
pub const MEMBERS: &str = "members";
pub const REACTANTS: &str = "reactants";
pub const PRODUCTS: &str = "products";

// ── Variants ──────────────────────────────────────────────────────────────────

pub const KIND: &str = "kind";
pub const PMOD: &str = "pmod";
pub const GMOD: &str = "gmod";
pub const HGVS: &str = "hgvs";
pub const FRAGMENT: &str = "frag";

// ── Fusions ───────────────────────────────────────────────────────────────────

pub const FUSION: &str = "fusion";
pub const PARTNER_5P: &str = "partner_5p";
pub const PARTNER_3P: &str = "partner_3p";

// ── Edge dictionary ───────────────────────────────────────────────────────────

pub const ANNOTATIONS: &str = "annotations";
pub const SOURCE_MODIFIER: &str = "source_modifier";
pub const TARGET_MODIFIER: &str = "target_modifier";
/// Older serialisations used subject/object naming.
pub const LEGACY_SOURCE_MODIFIER_KEYS: &[&str] = &["subject", "subject_modifier"];
pub const LEGACY_TARGET_MODIFIER_KEYS: &[&str] = &["object", "object_modifier"];

pub const LOCATION: &str = "location";
pub const EFFECT: &str = "effect";
pub const FROM_LOC: &str = "fromLoc";
pub const TO_LOC: &str = "toLoc";

// ── Namespaces ────────────────────────────────────────────────────────────────

/// Namespace of the built-in BEL modification vocabulary (`Ph`, `Me`, ...).
pub const BEL_DEFAULT_NAMESPACE: &str = "bel";

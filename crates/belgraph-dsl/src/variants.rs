//! Variants carried by central dogma nodes: protein and gene modifications,
//! HGVS sequence variants and fragments.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use belgraph_common::constants::{BEL_DEFAULT_NAMESPACE, FRAGMENT, GMOD, HGVS, PMOD};

use crate::canonical::CanonicalTuple;
use crate::entity::Entity;
use crate::language::{aa1_to_aa3, normalise_aa3, normalise_residue};

/// A variant of a gene, RNA, miRNA or protein.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Variant {
    #[serde(rename = "pmod")]
    ProteinModification(ProteinModification),
    #[serde(rename = "gmod")]
    GeneModification(GeneModification),
    #[serde(rename = "hgvs")]
    Hgvs(HgvsVariant),
    #[serde(rename = "frag")]
    Fragment(Fragment),
}

impl Variant {
    /// `(KIND, <concept-or-notation>, <extra fields present>...)`
    pub fn as_tuple(&self) -> CanonicalTuple {
        match self {
            Variant::ProteinModification(v) => v.as_tuple(),
            Variant::GeneModification(v) => v.as_tuple(),
            Variant::Hgvs(v) => v.as_tuple(),
            Variant::Fragment(v) => v.as_tuple(),
        }
    }

    pub fn as_bel(&self) -> String {
        match self {
            Variant::ProteinModification(v) => v.as_bel(),
            Variant::GeneModification(v) => v.as_bel(),
            Variant::Hgvs(v) => v.as_bel(),
            Variant::Fragment(v) => v.as_bel(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Variant::ProteinModification(_) => PMOD,
            Variant::GeneModification(_) => GMOD,
            Variant::Hgvs(_) => HGVS,
            Variant::Fragment(_) => FRAGMENT,
        }
    }

    /// The modification concept, for the kinds that have one.
    pub fn concept(&self) -> Option<&Entity> {
        match self {
            Variant::ProteinModification(v) => Some(&v.concept),
            Variant::GeneModification(v) => Some(&v.concept),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_bel())
    }
}

// ── Protein modification ──────────────────────────────────────────────────────

/// `pmod(<concept>[, code[, position]])`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProteinModification {
    pub concept: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, rename = "pos", skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl ProteinModification {
    /// A modification from the default BEL vocabulary, e.g. `Ph`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_entity(Entity::named(BEL_DEFAULT_NAMESPACE, name))
    }

    pub fn from_entity(concept: Entity) -> Self {
        Self { concept, code: None, position: None }
    }

    /// Modified residue; one-letter codes are widened to three letters.
    pub fn code(mut self, code: &str) -> Self {
        self.code = Some(normalise_residue(code));
        self
    }

    pub fn position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    /// Position only counts once a residue code is present.
    fn extras(&self) -> Vec<String> {
        let mut extras = Vec::new();
        if let Some(code) = &self.code {
            extras.push(code.clone());
            if let Some(position) = self.position {
                extras.push(position.to_string());
            }
        }
        extras
    }

    pub fn as_tuple(&self) -> CanonicalTuple {
        let mut items: Vec<CanonicalTuple> = vec![PMOD.into(), self.concept.key_tuple()];
        if let Some(code) = &self.code {
            items.push(code.as_str().into());
            if let Some(position) = self.position {
                items.push(position.into());
            }
        }
        CanonicalTuple::tuple(items)
    }

    pub fn as_bel(&self) -> String {
        let extras: String = self.extras().iter().map(|x| format!(", {x}")).collect();
        format!("pmod({}{})", self.concept.as_bel(), extras)
    }
}

impl From<ProteinModification> for Variant {
    fn from(v: ProteinModification) -> Self { Variant::ProteinModification(v) }
}

// ── Gene modification ─────────────────────────────────────────────────────────

/// `gmod(<concept>)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneModification {
    pub concept: Entity,
}

impl GeneModification {
    pub fn new(name: impl Into<String>) -> Self {
        Self { concept: Entity::named(BEL_DEFAULT_NAMESPACE, name) }
    }

    pub fn from_entity(concept: Entity) -> Self {
        Self { concept }
    }

    pub fn as_tuple(&self) -> CanonicalTuple {
        CanonicalTuple::tuple(vec![GMOD.into(), self.concept.key_tuple()])
    }

    pub fn as_bel(&self) -> String {
        format!("gmod({})", self.concept.as_bel())
    }
}

impl From<GeneModification> for Variant {
    fn from(v: GeneModification) -> Self { Variant::GeneModification(v) }
}

// ── HGVS ──────────────────────────────────────────────────────────────────────

/// An opaque HGVS string such as `p.Phe508del`, `=` or `?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HgvsVariant {
    pub hgvs: String,
}

impl HgvsVariant {
    pub fn new(notation: impl Into<String>) -> Self {
        Self { hgvs: notation.into() }
    }

    /// `p.{from}{position}{to}`, e.g. `p.Gly12Asp`. Produces a plain HGVS variant.
    pub fn protein_substitution(from_aa: &str, position: u32, to_aa: &str) -> Self {
        Self::new(format!("p.{from_aa}{position}{to_aa}"))
    }

    /// Parse short missense notation (`G12D`, `p.G12D`, `Gly12Asp`) into a
    /// three-letter protein substitution. Returns `None` when the text is not
    /// a recognisable substitution.
    pub fn from_short_notation(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let caps = substitution_regex()?.captures(raw)?;
        let ref_aa = widen(caps.get(1)?.as_str())?;
        let position: u32 = caps.get(2)?.as_str().parse().ok()?;
        let alt_aa = widen(caps.get(3)?.as_str())?;
        Some(Self::protein_substitution(ref_aa, position, alt_aa))
    }

    pub fn as_tuple(&self) -> CanonicalTuple {
        CanonicalTuple::tuple(vec![HGVS.into(), self.hgvs.as_str().into()])
    }

    pub fn as_bel(&self) -> String {
        format!("var(\"{}\")", self.hgvs)
    }
}

impl From<HgvsVariant> for Variant {
    fn from(v: HgvsVariant) -> Self { Variant::Hgvs(v) }
}

fn widen(aa: &str) -> Option<&'static str> {
    if aa.len() == 1 { aa1_to_aa3(aa) } else { normalise_aa3(aa) }
}

fn substitution_regex() -> Option<&'static Regex> {
    use std::sync::OnceLock;
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        // p.Gly12Asp or p.G12D or G12D, optional "p." prefix
        Regex::new(r"^(?:p\.)?([A-Z][a-z]{0,2}|\*)(\d+)([A-Z][a-z]{0,2}|\*)$").ok()
    })
    .as_ref()
}

// ── Bounds (shared with fusion ranges) ────────────────────────────────────────

/// A sequence coordinate: a position, unknown (`?`) or open end (`*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawBound", into = "RawBound")]
pub enum Bound {
    Position(i64),
    Unknown,
    End,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawBound {
    Int(i64),
    Text(String),
}

impl TryFrom<RawBound> for Bound {
    type Error = String;

    fn try_from(raw: RawBound) -> Result<Self, Self::Error> {
        match raw {
            RawBound::Int(i) => Ok(Bound::Position(i)),
            RawBound::Text(s) => match s.as_str() {
                "?" => Ok(Bound::Unknown),
                "*" => Ok(Bound::End),
                other => other.parse().map(Bound::Position).map_err(|_| format!("invalid bound: {other}")),
            },
        }
    }
}

impl From<Bound> for RawBound {
    fn from(b: Bound) -> Self {
        match b {
            Bound::Position(i) => RawBound::Int(i),
            Bound::Unknown => RawBound::Text("?".to_string()),
            Bound::End => RawBound::Text("*".to_string()),
        }
    }
}

impl From<i64> for Bound {
    fn from(i: i64) -> Self { Bound::Position(i) }
}

impl Bound {
    pub(crate) fn as_tuple(&self) -> CanonicalTuple {
        match self {
            Bound::Position(i) => CanonicalTuple::Int(*i),
            other => other.to_string().into(),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Position(i) => write!(f, "{i}"),
            Bound::Unknown => f.write_str("?"),
            Bound::End => f.write_str("*"),
        }
    }
}

// ── Fragment ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentRange {
    Known { start: Bound, stop: Bound },
    Missing,
}

/// `frag("start_stop")` or `frag("?")`, optionally with a description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawFragment", into = "RawFragment")]
pub struct Fragment {
    range: FragmentRange,
    description: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct RawFragment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stop: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    missing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl From<RawFragment> for Fragment {
    fn from(raw: RawFragment) -> Self {
        let fragment = Fragment::new(raw.start, raw.stop);
        match raw.description {
            Some(d) => fragment.with_description(d),
            None => fragment,
        }
    }
}

impl From<Fragment> for RawFragment {
    fn from(f: Fragment) -> Self {
        let (start, stop, missing) = match f.range {
            FragmentRange::Known { start, stop } => (Some(start), Some(stop), None),
            FragmentRange::Missing => (None, None, Some("?".to_string())),
        };
        RawFragment { start, stop, missing, description: f.description }
    }
}

impl Fragment {
    /// Known range when both bounds are given; anything else is a missing
    /// fragment, including a single bound on its own.
    pub fn new(start: Option<Bound>, stop: Option<Bound>) -> Self {
        let range = match (start, stop) {
            (Some(start), Some(stop)) => FragmentRange::Known { start, stop },
            (None, None) => FragmentRange::Missing,
            (start, stop) => {
                tracing::debug!(?start, ?stop, "fragment with a single bound treated as missing");
                FragmentRange::Missing
            }
        };
        Self { range, description: None }
    }

    pub fn known(start: i64, stop: i64) -> Self {
        Self::between(Bound::Position(start), Bound::Position(stop))
    }

    pub fn between(start: Bound, stop: Bound) -> Self {
        Self { range: FragmentRange::Known { start, stop }, description: None }
    }

    pub fn missing() -> Self {
        Self { range: FragmentRange::Missing, description: None }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn range(&self) -> FragmentRange { self.range }

    pub fn description(&self) -> Option<&str> { self.description.as_deref() }

    pub fn is_missing(&self) -> bool {
        self.range == FragmentRange::Missing
    }

    pub fn as_tuple(&self) -> CanonicalTuple {
        let range = match self.range {
            FragmentRange::Known { start, stop } => CanonicalTuple::tuple(vec![start.as_tuple(), stop.as_tuple()]),
            FragmentRange::Missing => "?".into(),
        };
        let mut items = vec![FRAGMENT.into(), range];
        if let Some(description) = &self.description {
            items.push(description.as_str().into());
        }
        CanonicalTuple::tuple(items)
    }

    pub fn as_bel(&self) -> String {
        let mut res = match self.range {
            FragmentRange::Known { start, stop } => format!("\"{start}_{stop}\""),
            FragmentRange::Missing => "\"?\"".to_string(),
        };
        if let Some(description) = &self.description {
            res.push_str(&format!(", \"{description}\""));
        }
        format!("frag({res})")
    }
}

impl From<Fragment> for Variant {
    fn from(v: Fragment) -> Self { Variant::Fragment(v) }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pmod_rendering_omits_absent_fields() {
        assert_eq!(ProteinModification::new("Ph").as_bel(), "pmod(Ph)");
        assert_eq!(ProteinModification::new("Ph").code("Thr").as_bel(), "pmod(Ph, Thr)");
        assert_eq!(ProteinModification::new("Ph").code("Thr").position(308).as_bel(), "pmod(Ph, Thr, 308)");
    }

    #[test]
    fn test_pmod_position_needs_code() {
        let v = ProteinModification::new("Ph").position(308);
        assert_eq!(v.as_bel(), "pmod(Ph)");
        assert_eq!(v.as_tuple().len(), 2);
    }

    #[test]
    fn test_pmod_one_letter_code_widened() {
        assert_eq!(ProteinModification::new("Ph").code("T").position(308).as_bel(), "pmod(Ph, Thr, 308)");
    }

    #[test]
    fn test_pmod_with_ontology_concept() {
        let v = ProteinModification::from_entity(Entity::with_identifier("go", "0006468", "protein phosphorylation"));
        assert_eq!(v.as_bel(), "pmod(go:\"protein phosphorylation\")");
    }

    #[test]
    fn test_gmod_rendering() {
        assert_eq!(GeneModification::new("Me").as_bel(), "gmod(Me)");
    }

    #[test]
    fn test_substitution_is_plain_hgvs() {
        let sugar = HgvsVariant::protein_substitution("Gly", 12, "Asp");
        let raw = HgvsVariant::new("p.Gly12Asp");
        assert_eq!(sugar, raw);
        assert_eq!(Variant::from(sugar).as_tuple(), Variant::from(raw).as_tuple());
    }

    #[test]
    fn test_short_notation() {
        assert_eq!(HgvsVariant::from_short_notation("G12D").unwrap().hgvs, "p.Gly12Asp");
        assert_eq!(HgvsVariant::from_short_notation("p.Val600Glu").unwrap().hgvs, "p.Val600Glu");
        assert_eq!(HgvsVariant::from_short_notation("R213*").unwrap().hgvs, "p.Arg213Ter");
        assert!(HgvsVariant::from_short_notation("wild-type").is_none());
    }

    #[test]
    fn test_hgvs_rendering() {
        assert_eq!(HgvsVariant::new("p.Phe508del").as_bel(), "var(\"p.Phe508del\")");
    }

    #[test]
    fn test_fragment_single_bound_is_missing() {
        assert!(Fragment::new(Some(Bound::Position(5)), None).is_missing());
        assert!(Fragment::new(None, Some(Bound::Position(20))).is_missing());
        assert!(!Fragment::known(5, 20).is_missing());
    }

    #[test]
    fn test_fragment_rendering() {
        assert_eq!(Fragment::known(5, 20).as_bel(), "frag(\"5_20\")");
        assert_eq!(Fragment::between(Bound::Position(1), Bound::End).as_bel(), "frag(\"1_*\")");
        assert_eq!(Fragment::missing().with_description("55kD").as_bel(), "frag(\"?\", \"55kD\")");
    }

    #[test]
    fn test_different_kinds_never_equal() {
        let pmod: Variant = ProteinModification::new("Me").into();
        let gmod: Variant = GeneModification::new("Me").into();
        assert_ne!(pmod.as_tuple(), gmod.as_tuple());
    }

    #[test]
    fn test_variant_json_shape() {
        let v: Variant = ProteinModification::new("Ph").code("Ser").position(473).into();
        let value = serde_json::to_value(&v).unwrap();
        assert_eq!(value["kind"], "pmod");
        assert_eq!(value["concept"]["namespace"], "bel");
        assert_eq!(value["pos"], 473);

        let frag: Variant = serde_json::from_value(serde_json::json!({"kind": "frag", "missing": "?"})).unwrap();
        assert_eq!(frag, Variant::Fragment(Fragment::missing()));

        let known: Variant = serde_json::from_value(serde_json::json!({"kind": "frag", "start": 5, "stop": "*"})).unwrap();
        assert_eq!(known, Fragment::between(Bound::Position(5), Bound::End).into());
    }
}

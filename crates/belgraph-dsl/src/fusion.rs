//! Fusion breakpoint ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonical::CanonicalTuple;
use crate::variants::Bound;

/// Breakpoint range of one fusion partner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawFusionRange", into = "RawFusionRange")]
pub enum FusionRange {
    /// `reference.start_stop`, e.g. `r.1_79`
    Enumerated { reference: String, start: Bound, stop: Bound },
    /// Renders as `?`
    #[default]
    Missing,
}

#[derive(Serialize, Deserialize)]
struct RawFusionRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    left: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    right: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    missing: Option<String>,
}

impl From<RawFusionRange> for FusionRange {
    fn from(raw: RawFusionRange) -> Self {
        match (raw.reference, raw.left, raw.right) {
            (Some(reference), Some(start), Some(stop)) => FusionRange::Enumerated { reference, start, stop },
            _ => FusionRange::Missing,
        }
    }
}

impl From<FusionRange> for RawFusionRange {
    fn from(range: FusionRange) -> Self {
        match range {
            FusionRange::Enumerated { reference, start, stop } => RawFusionRange {
                reference: Some(reference),
                left: Some(start),
                right: Some(stop),
                missing: None,
            },
            FusionRange::Missing => RawFusionRange {
                reference: None,
                left: None,
                right: None,
                missing: Some("?".to_string()),
            },
        }
    }
}

impl FusionRange {
    pub fn enumerated(reference: impl Into<String>, start: Bound, stop: Bound) -> Self {
        FusionRange::Enumerated { reference: reference.into(), start, stop }
    }

    /// `(reference, start, stop)` or `('?',)`
    pub fn as_tuple(&self) -> CanonicalTuple {
        match self {
            FusionRange::Enumerated { reference, start, stop } => CanonicalTuple::tuple(vec![
                reference.as_str().into(),
                start.as_tuple(),
                stop.as_tuple(),
            ]),
            FusionRange::Missing => CanonicalTuple::tuple(vec!["?".into()]),
        }
    }

    pub fn as_bel(&self) -> String {
        match self {
            FusionRange::Enumerated { reference, start, stop } => format!("{reference}.{start}_{stop}"),
            FusionRange::Missing => "?".to_string(),
        }
    }
}

impl fmt::Display for FusionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_bel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_rendering() {
        let r = FusionRange::enumerated("r", Bound::Position(1), Bound::Position(79));
        assert_eq!(r.as_bel(), "r.1_79");
        assert_eq!(FusionRange::Missing.as_bel(), "?");
        assert_eq!(FusionRange::enumerated("p", Bound::Unknown, Bound::End).as_bel(), "p.?_*");
    }

    #[test]
    fn test_range_tuples() {
        let r = FusionRange::enumerated("r", Bound::Position(1), Bound::Position(79));
        assert_eq!(r.as_tuple().to_string(), "('r', 1, 79)");
        assert_eq!(FusionRange::Missing.as_tuple().to_string(), "('?',)");
    }

    #[test]
    fn test_range_json() {
        let r = FusionRange::enumerated("r", Bound::Position(312), Bound::Position(5034));
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value, serde_json::json!({"reference": "r", "left": 312, "right": 5034}));
        let missing: FusionRange = serde_json::from_value(serde_json::json!({"missing": "?"})).unwrap();
        assert_eq!(missing, FusionRange::Missing);
    }
}

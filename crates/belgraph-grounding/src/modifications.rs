//! Default-namespace modification codes resolved per variant kind.

use std::collections::HashMap;

use belgraph_common::constants::{GMOD, PMOD};
use belgraph_dsl::language::{gmod_mappings, pmod_mappings, ModificationInfo, XRef};

type Mappings = &'static HashMap<&'static str, &'static ModificationInfo>;

/// `pmod` and `gmod` short-code tables. `Me` means protein methylation in
/// one and DNA methylation in the other, so the kind picks the table.
#[derive(Debug, Clone, Copy)]
pub struct ModificationTables {
    pmods: Mappings,
    gmods: Mappings,
}

impl Default for ModificationTables {
    fn default() -> Self {
        Self { pmods: pmod_mappings(), gmods: gmod_mappings() }
    }
}

impl ModificationTables {
    /// Preferred cross-reference for `code` under variant `kind`.
    pub fn preferred_xref(&self, kind: &str, code: &str) -> Option<XRef> {
        let table = match kind {
            PMOD => self.pmods,
            GMOD => self.gmods,
            _ => return None,
        };
        table.get(code).and_then(|info| info.xrefs.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_selects_table() {
        let t = ModificationTables::default();
        assert_eq!(t.preferred_xref("pmod", "Me").unwrap().identifier, "0006479");
        assert_eq!(t.preferred_xref("gmod", "Me").unwrap().identifier, "0006306");
        assert!(t.preferred_xref("gmod", "Ph").is_none());
        assert!(t.preferred_xref("hgvs", "Ph").is_none());
    }
}

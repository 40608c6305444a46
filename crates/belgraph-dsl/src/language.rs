//! BEL functions, modification vocabularies and amino-acid tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The BEL function of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Function {
    Abundance,
    BiologicalProcess,
    Pathology,
    Gene,
    #[serde(rename = "RNA")]
    Rna,
    #[serde(rename = "miRNA")]
    MicroRna,
    Protein,
    Complex,
    Composite,
    Reaction,
}

impl Function {
    pub const ALL: [Function; 10] = [
        Function::Abundance,
        Function::BiologicalProcess,
        Function::Pathology,
        Function::Gene,
        Function::Rna,
        Function::MicroRna,
        Function::Protein,
        Function::Complex,
        Function::Composite,
        Function::Reaction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Function::Abundance => "Abundance",
            Function::BiologicalProcess => "BiologicalProcess",
            Function::Pathology => "Pathology",
            Function::Gene => "Gene",
            Function::Rna => "RNA",
            Function::MicroRna => "miRNA",
            Function::Protein => "Protein",
            Function::Complex => "Complex",
            Function::Composite => "Composite",
            Function::Reaction => "Reaction",
        }
    }

    /// Short form used in BEL statements.
    pub fn short(&self) -> &'static str {
        match self {
            Function::Abundance => "a",
            Function::BiologicalProcess => "bp",
            Function::Pathology => "path",
            Function::Gene => "g",
            Function::Rna => "r",
            Function::MicroRna => "m",
            Function::Protein => "p",
            Function::Complex => "complex",
            Function::Composite => "composite",
            Function::Reaction => "rxn",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == name || f.short() == name)
    }

    /// Gene, RNA, miRNA and Protein.
    pub fn is_central_dogma(&self) -> bool {
        matches!(self, Function::Gene | Function::Rna | Function::MicroRna | Function::Protein)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Function::Complex | Function::Composite)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Modification vocabularies ─────────────────────────────────────────────────

/// A cross-reference for a modification short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XRef {
    pub namespace: &'static str,
    pub identifier: &'static str,
    pub name: &'static str,
}

/// A short code of the default BEL namespace and its cross-references.
/// The first cross-reference is the preferred one.
#[derive(Debug, Clone)]
pub struct ModificationInfo {
    pub code: &'static str,
    pub synonyms: &'static [&'static str],
    pub xrefs: &'static [XRef],
}

const fn xref(namespace: &'static str, identifier: &'static str, name: &'static str) -> XRef {
    XRef { namespace, identifier, name }
}

const PMOD_TABLE: &[ModificationInfo] = &[
    ModificationInfo { code: "Ac", synonyms: &["acetylation"], xrefs: &[
        xref("go", "0006473", "protein acetylation"),
        xref("mod", "00394", "acetylated residue"),
    ] },
    ModificationInfo { code: "ADPRib", synonyms: &["ADP-ribosylation", "ADP-rybosylation", "adenosine diphosphoribosyl"], xrefs: &[
        xref("go", "0006471", "protein ADP-ribosylation"),
        xref("mod", "00752", "adenosine diphosphoribosyl (ADP-ribosyl) modified residue"),
    ] },
    ModificationInfo { code: "Farn", synonyms: &["farnesylation"], xrefs: &[
        xref("go", "0018343", "protein farnesylation"),
        xref("mod", "00437", "farnesylated residue"),
    ] },
    ModificationInfo { code: "Glyco", synonyms: &["glycosylation"], xrefs: &[
        xref("go", "0006486", "protein glycosylation"),
        xref("mod", "00693", "glycosylated residue"),
    ] },
    ModificationInfo { code: "Hy", synonyms: &["hydroxylation"], xrefs: &[
        xref("go", "0018126", "protein hydroxylation"),
        xref("mod", "00677", "hydroxylated residue"),
    ] },
    ModificationInfo { code: "ISG", synonyms: &["ISGylation", "ISG15-protein conjugation"], xrefs: &[
        xref("go", "0032020", "ISG15-protein conjugation"),
    ] },
    ModificationInfo { code: "Me", synonyms: &["methylation"], xrefs: &[
        xref("go", "0006479", "protein methylation"),
        xref("mod", "00427", "methylated residue"),
    ] },
    ModificationInfo { code: "Me1", synonyms: &["monomethylation", "mono-methylation"], xrefs: &[
        xref("mod", "00599", "monomethylated residue"),
    ] },
    ModificationInfo { code: "Me2", synonyms: &["dimethylation", "di-methylation"], xrefs: &[
        xref("mod", "00429", "dimethylated residue"),
    ] },
    ModificationInfo { code: "Me3", synonyms: &["trimethylation", "tri-methylation"], xrefs: &[
        xref("mod", "00430", "trimethylated residue"),
    ] },
    ModificationInfo { code: "Myr", synonyms: &["myristoylation"], xrefs: &[
        xref("go", "0018377", "protein myristoylation"),
        xref("mod", "00438", "myristoylated residue"),
    ] },
    ModificationInfo { code: "Nedd", synonyms: &["neddylation"], xrefs: &[
        xref("go", "0045116", "protein neddylation"),
        xref("mod", "01150", "neddylated lysine"),
    ] },
    ModificationInfo { code: "NGlyco", synonyms: &["N-linked glycosylation"], xrefs: &[
        xref("go", "0006487", "protein N-linked glycosylation"),
        xref("mod", "00006", "N-glycosylated residue"),
    ] },
    ModificationInfo { code: "NO", synonyms: &["Nitrosylation"], xrefs: &[
        xref("go", "0017014", "protein nitrosylation"),
    ] },
    ModificationInfo { code: "OGlyco", synonyms: &["O-linked glycosylation"], xrefs: &[
        xref("go", "0006493", "protein O-linked glycosylation"),
        xref("mod", "00396", "O-glycosylated residue"),
    ] },
    ModificationInfo { code: "Palm", synonyms: &["palmitoylation"], xrefs: &[
        xref("go", "0018345", "protein palmitoylation"),
        xref("mod", "00440", "palmitoylated residue"),
    ] },
    ModificationInfo { code: "Ph", synonyms: &["phosphorylation"], xrefs: &[
        xref("go", "0006468", "protein phosphorylation"),
        xref("mod", "00696", "phosphorylated residue"),
    ] },
    ModificationInfo { code: "Sulf", synonyms: &["sulfation", "sulphation", "sulfur addition", "sulphur addition"], xrefs: &[
        xref("go", "0006477", "protein sulfation"),
        xref("mod", "00695", "sulfated residue"),
    ] },
    ModificationInfo { code: "Sumo", synonyms: &["sumoylation", "SUMOylation"], xrefs: &[
        xref("go", "0016925", "protein sumoylation"),
        xref("mod", "01149", "sumoylated lysine"),
    ] },
    ModificationInfo { code: "Ub", synonyms: &["ubiquitination", "ubiquitinylation", "ubiquitylation"], xrefs: &[
        xref("go", "0016567", "protein ubiquitination"),
        xref("mod", "01148", "ubiquitinylated lysine"),
    ] },
    ModificationInfo { code: "UbK48", synonyms: &["Lysine 48-linked polyubiquitination"], xrefs: &[
        xref("go", "0070936", "protein K48-linked ubiquitination"),
    ] },
    ModificationInfo { code: "UbK63", synonyms: &["Lysine 63-linked polyubiquitination"], xrefs: &[
        xref("go", "0070534", "protein K63-linked ubiquitination"),
    ] },
    ModificationInfo { code: "UbMono", synonyms: &["monoubiquitination"], xrefs: &[
        xref("go", "0006513", "protein monoubiquitination"),
    ] },
    ModificationInfo { code: "UbPoly", synonyms: &["polyubiquitination"], xrefs: &[
        xref("go", "0000209", "protein polyubiquitination"),
    ] },
];

const GMOD_TABLE: &[ModificationInfo] = &[
    ModificationInfo { code: "Me", synonyms: &["methylation", "Methylation"], xrefs: &[
        xref("go", "0006306", "DNA methylation"),
    ] },
    ModificationInfo { code: "ADPRib", synonyms: &["ADP-ribosylation"], xrefs: &[
        xref("go", "0030592", "DNA ADP-ribosylation"),
    ] },
];

fn index(table: &'static [ModificationInfo]) -> HashMap<&'static str, &'static ModificationInfo> {
    let mut m = HashMap::new();
    for info in table {
        m.insert(info.code, info);
        for synonym in info.synonyms {
            m.entry(*synonym).or_insert(info);
        }
    }
    m
}

/// Protein modification codes and synonyms → vocabulary entry.
pub fn pmod_mappings() -> &'static HashMap<&'static str, &'static ModificationInfo> {
    use std::sync::OnceLock;
    static PMODS: OnceLock<HashMap<&'static str, &'static ModificationInfo>> = OnceLock::new();
    PMODS.get_or_init(|| index(PMOD_TABLE))
}

/// Gene modification codes and synonyms → vocabulary entry.
pub fn gmod_mappings() -> &'static HashMap<&'static str, &'static ModificationInfo> {
    use std::sync::OnceLock;
    static GMODS: OnceLock<HashMap<&'static str, &'static ModificationInfo>> = OnceLock::new();
    GMODS.get_or_init(|| index(GMOD_TABLE))
}

// ── Amino acids ───────────────────────────────────────────────────────────────

/// Single-letter → three-letter amino acid map.
pub fn aa1_to_aa3(aa: &str) -> Option<&'static str> {
    match aa.to_uppercase().as_str() {
        "A" => Some("Ala"), "C" => Some("Cys"), "D" => Some("Asp"),
        "E" => Some("Glu"), "F" => Some("Phe"), "G" => Some("Gly"),
        "H" => Some("His"), "I" => Some("Ile"), "K" => Some("Lys"),
        "L" => Some("Leu"), "M" => Some("Met"), "N" => Some("Asn"),
        "P" => Some("Pro"), "Q" => Some("Gln"), "R" => Some("Arg"),
        "S" => Some("Ser"), "T" => Some("Thr"), "V" => Some("Val"),
        "W" => Some("Trp"), "Y" => Some("Tyr"), "*" => Some("Ter"),
        _ => None,
    }
}

/// Three-letter amino acid name → three-letter (title-case) canonical form.
pub fn normalise_aa3(aa: &str) -> Option<&'static str> {
    match aa.to_lowercase().as_str() {
        "ala" => Some("Ala"), "cys" => Some("Cys"), "asp" => Some("Asp"),
        "glu" => Some("Glu"), "phe" => Some("Phe"), "gly" => Some("Gly"),
        "his" => Some("His"), "ile" => Some("Ile"), "lys" => Some("Lys"),
        "leu" => Some("Leu"), "met" => Some("Met"), "asn" => Some("Asn"),
        "pro" => Some("Pro"), "gln" => Some("Gln"), "arg" => Some("Arg"),
        "ser" => Some("Ser"), "thr" => Some("Thr"), "val" => Some("Val"),
        "trp" => Some("Trp"), "tyr" => Some("Tyr"), "ter" => Some("Ter"),
        "stop" | "*" => Some("Ter"),
        _ => None,
    }
}

/// One- or three-letter residue code → three-letter form; unknown codes pass through.
pub fn normalise_residue(code: &str) -> String {
    let resolved = if code.chars().count() == 1 { aa1_to_aa3(code) } else { normalise_aa3(code) };
    resolved.map(str::to_string).unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_names() {
        assert_eq!(Function::Rna.as_str(), "RNA");
        assert_eq!(Function::MicroRna.short(), "m");
        assert_eq!(Function::from_name("miRNA"), Some(Function::MicroRna));
        assert_eq!(Function::from_name("bp"), Some(Function::BiologicalProcess));
        assert_eq!(Function::from_name("Pathway"), None);
        assert_eq!(serde_json::to_string(&Function::Rna).unwrap(), "\"RNA\"");
    }

    #[test]
    fn test_me_differs_between_pmod_and_gmod() {
        let pmod = pmod_mappings()["Me"].xrefs[0];
        let gmod = gmod_mappings()["Me"].xrefs[0];
        assert_eq!(pmod.name, "protein methylation");
        assert_eq!(gmod.name, "DNA methylation");
    }

    #[test]
    fn test_synonyms_resolve_to_code() {
        assert_eq!(pmod_mappings()["phosphorylation"].code, "Ph");
        assert!(gmod_mappings().get("Ph").is_none());
    }

    #[test]
    fn test_normalise_residue() {
        assert_eq!(normalise_residue("T"), "Thr");
        assert_eq!(normalise_residue("thr"), "Thr");
        assert_eq!(normalise_residue("Xyz"), "Xyz");
    }
}

//! Display names for well-known molecules.

/// Returned for any SMILES not in the table.
pub const UNKNOWN_COMPOUND: &str = "Unknown Compound";

static KNOWN_NAMES: &[(&str, &str)] = &[
    ("CC(=O)OC1=CC=CC=C1C(=O)O", "Acetylsalicylic acid (Aspirin)"),
    ("CC(=O)Oc1ccccc1C(=O)O", "Acetylsalicylic acid (Aspirin)"),
    ("CN1C=NC2=C1C(=O)N(C(=O)N2C)C", "Caffeine"),
    ("CC(=O)NC1=CC=C(C=C1)O", "Paracetamol (Acetaminophen)"),
    ("CC(C)CC1=CC=C(C=C1)C(C)C(=O)O", "Ibuprofen"),
];

/// Look up the scientific name for a SMILES string.
///
/// Surrounding whitespace is ignored; anything else must match exactly.
pub fn scientific_name(smiles: &str) -> &'static str {
    let key = smiles.trim();
    KNOWN_NAMES
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_COMPOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_molecule_resolves() {
        assert_eq!(
            scientific_name("CC(=O)OC1=CC=CC=C1C(=O)O"),
            "Acetylsalicylic acid (Aspirin)"
        );
        assert_eq!(
            scientific_name("  CC(=O)OC1=CC=CC=C1C(=O)O\n"),
            "Acetylsalicylic acid (Aspirin)"
        );
    }

    #[test]
    fn unknown_returns_sentinel() {
        assert_eq!(scientific_name("CCO"), UNKNOWN_COMPOUND);
        assert_eq!(scientific_name("definitely not smiles"), UNKNOWN_COMPOUND);
        assert_eq!(scientific_name(""), UNKNOWN_COMPOUND);
    }

    #[test]
    fn table_entries_parse() {
        for (smiles, _) in KNOWN_NAMES {
            assert!(
                crate::molecule::Molecule::from_smiles(smiles).is_ok(),
                "{smiles} should parse"
            );
        }
    }
}

//! Molecule collaborators: SMILES parsing, property panel, name lookup and
//! depiction.
//!
//! None of these can fail a run. Invalid SMILES surface as
//! "Unknown Compound" and a missing image.

mod depict;
mod elements;
mod names;
mod properties;
mod smiles;

pub use depict::{
    layout, render_image, render_png, DepictionError, IMAGE_SIZE, MAX_DEPICTION_ATOMS,
};
pub use elements::Element;
pub use names::{scientific_name, UNKNOWN_COMPOUND};
pub use properties::MolecularProperties;
pub use smiles::{Atom, Bond, BondOrder, Molecule, SmilesError};

use serde::{Deserialize, Serialize};

/// Molecule showcased alongside the breakthrough banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeCard {
    pub smiles: String,
    /// Scientific name or [`UNKNOWN_COMPOUND`].
    pub name: String,
    /// PNG bytes, absent when the depiction failed.
    #[serde(skip)]
    pub image_png: Option<Vec<u8>>,
    /// Why the depiction is missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depiction_error: Option<String>,
}

impl MoleculeCard {
    /// Render and name a molecule. Never fails; a bad SMILES yields a card
    /// without an image.
    pub fn prepare(smiles: &str) -> Self {
        let name = scientific_name(smiles).to_string();
        match render_png(smiles) {
            Ok(png) => Self {
                smiles: smiles.to_string(),
                name,
                image_png: Some(png),
                depiction_error: None,
            },
            Err(e) => {
                tracing::warn!("Molecule depiction skipped for '{}': {}", smiles, e);
                Self {
                    smiles: smiles.to_string(),
                    name,
                    image_png: None,
                    depiction_error: Some(e.to_string()),
                }
            }
        }
    }

    pub fn has_image(&self) -> bool {
        self.image_png.is_some()
    }

    /// Caption shown under the image.
    pub fn caption(&self) -> String {
        format!("Scientific Name: {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_for_known_molecule() {
        let card = MoleculeCard::prepare("CC(=O)OC1=CC=CC=C1C(=O)O");
        assert!(card.has_image());
        assert_eq!(card.caption(), "Scientific Name: Acetylsalicylic acid (Aspirin)");
    }

    #[test]
    fn card_for_invalid_molecule_has_no_image() {
        let card = MoleculeCard::prepare("C1CC((");
        assert!(!card.has_image());
        assert_eq!(card.name, UNKNOWN_COMPOUND);
        assert!(card.depiction_error.is_some());
    }

    #[test]
    fn card_for_heavily_branched_molecule_skips_image() {
        let smiles = format!("C{}", "(C)".repeat(300));
        let card = MoleculeCard::prepare(&smiles);
        assert!(!card.has_image());
        assert_eq!(card.name, UNKNOWN_COMPOUND);
        assert!(card.depiction_error.unwrap().contains("301 atoms"));
        assert!(MolecularProperties::from_smiles(&smiles).is_ok());
    }

    #[test]
    fn image_bytes_are_not_serialized() {
        let card = MoleculeCard::prepare("CCO");
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"name\":\"Unknown Compound\""));
        assert!(!json.contains("image_png"));
    }
}

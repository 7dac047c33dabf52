//! Molecular property panel: weight, LogP estimate, H-bond counts and
//! rotatable bonds.

use serde::{Deserialize, Serialize};

use super::elements::HYDROGEN_WEIGHT;
use super::smiles::{BondOrder, Molecule, SmilesError};
use crate::models::round_to;

const NITROGEN: u8 = 7;
const OXYGEN: u8 = 8;
const PHOSPHORUS: u8 = 15;
const SULFUR: u8 = 16;

/// Heteroatoms that make an adjacent double bond "polar" (C=O, C=N, ...).
const POLAR_PARTNERS: &[u8] = &[NITROGEN, OXYGEN, PHOSPHORUS, SULFUR];

/// Descriptor values shown in the property panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolecularProperties {
    /// Average molecular weight in g/mol, two decimals.
    pub molecular_weight: f64,
    /// Octanol/water partition estimate, two decimals.
    pub logp: f64,
    pub h_bond_donors: u32,
    pub h_bond_acceptors: u32,
    pub rotatable_bonds: u32,
}

impl MolecularProperties {
    /// Compute the panel for a SMILES string.
    pub fn from_smiles(smiles: &str) -> Result<Self, SmilesError> {
        let molecule = Molecule::from_smiles(smiles)?;
        Ok(Self::from_molecule(&molecule))
    }

    pub fn from_molecule(molecule: &Molecule) -> Self {
        Self {
            molecular_weight: round_to(molecular_weight(molecule), 2),
            logp: round_to(logp_estimate(molecule), 2),
            h_bond_donors: h_bond_donors(molecule),
            h_bond_acceptors: h_bond_acceptors(molecule),
            rotatable_bonds: rotatable_bonds(molecule),
        }
    }

    /// Label/value rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Molecular Weight", format!("{}", self.molecular_weight)),
            ("LogP", format!("{}", self.logp)),
            ("H-Bond Donors", self.h_bond_donors.to_string()),
            ("H-Bond Acceptors", self.h_bond_acceptors.to_string()),
            ("Rotatable Bonds", self.rotatable_bonds.to_string()),
        ]
    }
}

/// Sum of average atomic weights including hydrogens.
pub fn molecular_weight(molecule: &Molecule) -> f64 {
    molecule
        .atoms()
        .iter()
        .map(|atom| atom.element.weight + atom.hydrogens as f64 * HYDROGEN_WEIGHT)
        .sum()
}

/// N, O or S atoms bearing a hydrogen.
pub fn h_bond_donors(molecule: &Molecule) -> u32 {
    (0..molecule.atom_count())
        .filter(|&i| is_donor(molecule, i))
        .count() as u32
}

fn is_donor(molecule: &Molecule, index: usize) -> bool {
    let atom = &molecule.atoms()[index];
    let hydrogens = molecule.total_hydrogens(index);
    if hydrogens == 0 {
        return false;
    }
    let valence = molecule.valence(index) + u32::from(atom.aromatic);
    match atom.element.atomic_number {
        NITROGEN if atom.aromatic => atom.charge == 0 && hydrogens == 1,
        NITROGEN => (atom.charge == 0 && valence == 3) || (atom.charge == 1 && valence == 4),
        OXYGEN | SULFUR => atom.charge == 0 && hydrogens == 1,
        _ => false,
    }
}

/// Lipinski-style acceptor count.
pub fn h_bond_acceptors(molecule: &Molecule) -> u32 {
    (0..molecule.atom_count())
        .filter(|&i| is_acceptor(molecule, i))
        .count() as u32
}

fn is_acceptor(molecule: &Molecule, index: usize) -> bool {
    let atom = &molecule.atoms()[index];
    let hydrogens = molecule.total_hydrogens(index);
    let valence = molecule.valence(index);

    match atom.element.atomic_number {
        OXYGEN | SULFUR => {
            if atom.aromatic || atom.charge < 0 {
                return true;
            }
            if atom.charge != 0 || valence != 2 {
                return false;
            }
            match hydrogens {
                0 => true,
                // Hydroxyl counts unless it belongs to an acid (O-C=O)
                1 => !molecule
                    .neighbors(index)
                    .iter()
                    .any(|&(n, _)| molecule.has_double_bond_to(n, POLAR_PARTNERS, None)),
                _ => false,
            }
        }
        NITROGEN => {
            if atom.charge != 0 {
                return false;
            }
            if atom.aromatic {
                return hydrogens == 0;
            }
            // Amide and similar nitrogens donate their lone pair
            valence == 3
                && !molecule.neighbors(index).iter().any(|&(n, bond)| {
                    molecule.bonds()[bond].order == BondOrder::Single
                        && molecule.has_double_bond_to(n, POLAR_PARTNERS, None)
                })
        }
        9 => true,
        _ => false,
    }
}

/// Acyclic single bonds between non-terminal heavy atoms.
///
/// Bonds next to a triple bond and amide C-N bonds are not counted.
pub fn rotatable_bonds(molecule: &Molecule) -> u32 {
    molecule
        .bonds()
        .iter()
        .enumerate()
        .filter(|(index, bond)| {
            bond.order == BondOrder::Single
                && !molecule.atoms()[bond.a].element.is_hydrogen()
                && !molecule.atoms()[bond.b].element.is_hydrogen()
                && molecule.heavy_degree(bond.a) > 1
                && molecule.heavy_degree(bond.b) > 1
                && !molecule.has_triple_bond(bond.a)
                && !molecule.has_triple_bond(bond.b)
                && !is_amide_bond(molecule, bond.a, bond.b, *index)
                && !molecule.is_ring_bond(*index)
        })
        .count() as u32
}

fn is_amide_bond(molecule: &Molecule, a: usize, b: usize, bond: usize) -> bool {
    let amide_nh = |n: usize, c: usize| {
        molecule.atoms()[n].element.atomic_number == NITROGEN
            && molecule.total_hydrogens(n) > 0
            && molecule.atoms()[c].element.is_carbon()
            && molecule.has_double_bond_to(c, &[OXYGEN], Some(bond))
    };
    amide_nh(a, b) || amide_nh(b, a)
}

/// Atom-contribution LogP estimate.
///
/// Each heavy atom is typed by element, aromaticity and its neighbors, and
/// each attached hydrogen by the atom it sits on. Values follow the
/// Wildman-Crippen scheme for the common types and collapse the rare ones.
pub fn logp_estimate(molecule: &Molecule) -> f64 {
    (0..molecule.atom_count())
        .filter(|&i| !molecule.atoms()[i].element.is_hydrogen())
        .map(|i| {
            atom_contribution(molecule, i)
                + molecule.total_hydrogens(i) as f64 * hydrogen_contribution(molecule, i)
        })
        .sum()
}

fn atom_contribution(molecule: &Molecule, index: usize) -> f64 {
    let atom = &molecule.atoms()[index];
    let heavy_neighbors: Vec<usize> = molecule
        .neighbors(index)
        .iter()
        .map(|&(n, _)| n)
        .filter(|&n| !molecule.atoms()[n].element.is_hydrogen())
        .collect();
    let hetero_neighbor = heavy_neighbors
        .iter()
        .any(|&n| !molecule.atoms()[n].element.is_carbon());

    match atom.element.atomic_number {
        6 if atom.aromatic => {
            let substituents: Vec<usize> = heavy_neighbors
                .iter()
                .copied()
                .filter(|&n| !molecule.atoms()[n].aromatic)
                .collect();
            if substituents.is_empty() {
                if heavy_neighbors.len() >= 3 {
                    0.2955
                } else {
                    0.1581
                }
            } else if substituents
                .iter()
                .all(|&n| molecule.atoms()[n].element.is_carbon())
            {
                0.2713
            } else {
                0.1360
            }
        }
        6 => {
            if molecule.has_double_bond_to(index, POLAR_PARTNERS, None) {
                -0.2783
            } else if molecule.has_triple_bond(index)
                || molecule.has_double_bond_to(index, &[6], None)
            {
                0.1551
            } else if hetero_neighbor {
                -0.2035
            } else if heavy_neighbors.len() <= 2 {
                0.1441
            } else {
                0.0
            }
        }
        NITROGEN => {
            if atom.charge > 0 {
                -1.9500
            } else if atom.aromatic {
                -0.4806
            } else if molecule.has_triple_bond(index) {
                -0.3239
            } else {
                match molecule.total_hydrogens(index) {
                    0 => -0.3187,
                    1 => -0.7096,
                    _ => -1.0190,
                }
            }
        }
        OXYGEN => {
            if atom.aromatic {
                0.1552
            } else if molecule
                .neighbors(index)
                .iter()
                .any(|&(_, bond)| molecule.bonds()[bond].order == BondOrder::Double)
            {
                -0.1526
            } else if molecule.total_hydrogens(index) > 0 || atom.charge < 0 {
                -0.2893
            } else if heavy_neighbors
                .iter()
                .any(|&n| molecule.atoms()[n].aromatic)
            {
                -0.4195
            } else {
                -0.0684
            }
        }
        SULFUR if atom.aromatic => 0.6237,
        SULFUR => 0.6482,
        PHOSPHORUS => 0.8612,
        9 => 0.4202,
        17 => 0.6895,
        35 => 0.8456,
        53 => 0.8857,
        _ => 0.0,
    }
}

fn hydrogen_contribution(molecule: &Molecule, index: usize) -> f64 {
    match molecule.atoms()[index].element.atomic_number {
        6 => 0.1230,
        NITROGEN => 0.2142,
        OXYGEN => {
            let acid = molecule
                .neighbors(index)
                .iter()
                .any(|&(n, _)| molecule.has_double_bond_to(n, &[OXYGEN], None));
            if acid {
                0.2980
            } else {
                -0.2677
            }
        }
        _ => 0.1230,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASPIRIN: &str = "CC(=O)OC1=CC=CC=C1C(=O)O";

    #[test]
    fn aspirin_panel() {
        let props = MolecularProperties::from_smiles(ASPIRIN).unwrap();
        assert_eq!(props.molecular_weight, 180.16);
        assert_eq!(props.h_bond_donors, 1);
        assert_eq!(props.h_bond_acceptors, 3);
        assert_eq!(props.rotatable_bonds, 3);
        assert!(props.logp > -1.0 && props.logp < 3.0, "logp {}", props.logp);
    }

    #[test]
    fn aromatic_and_kekule_forms_agree() {
        let kekule = MolecularProperties::from_smiles(ASPIRIN).unwrap();
        let aromatic = MolecularProperties::from_smiles("CC(=O)Oc1ccccc1C(=O)O").unwrap();
        assert_eq!(kekule, aromatic);
    }

    #[test]
    fn simple_weights() {
        let water = Molecule::from_smiles("O").unwrap();
        assert!((molecular_weight(&water) - 18.015).abs() < 1e-9);

        let ethanol = MolecularProperties::from_smiles("CCO").unwrap();
        assert_eq!(ethanol.molecular_weight, 46.07);
        assert_eq!(ethanol.h_bond_donors, 1);
        assert_eq!(ethanol.h_bond_acceptors, 1);
        assert_eq!(ethanol.rotatable_bonds, 0);
    }

    #[test]
    fn methane_logp_is_sum_of_contributions() {
        let methane = Molecule::from_smiles("C").unwrap();
        assert!((logp_estimate(&methane) - (0.1441 + 4.0 * 0.1230)).abs() < 1e-9);
    }

    #[test]
    fn amide_bond_is_not_rotatable() {
        // N-methylacetamide: only the amide C-N bond is between heavy
        // non-terminal atoms, and it is excluded
        let props = MolecularProperties::from_smiles("CC(=O)NC").unwrap();
        assert_eq!(props.rotatable_bonds, 0);
        assert_eq!(props.h_bond_donors, 1);
        assert_eq!(props.h_bond_acceptors, 1);
    }

    #[test]
    fn ring_bonds_are_not_rotatable() {
        let props = MolecularProperties::from_smiles("C1CCCCC1").unwrap();
        assert_eq!(props.rotatable_bonds, 0);

        let butane = MolecularProperties::from_smiles("CCCC").unwrap();
        assert_eq!(butane.rotatable_bonds, 1);
    }

    #[test]
    fn aromatic_nitrogen_acceptors() {
        let pyridine = MolecularProperties::from_smiles("c1ccncc1").unwrap();
        assert_eq!(pyridine.h_bond_acceptors, 1);
        assert_eq!(pyridine.h_bond_donors, 0);

        let pyrrole = MolecularProperties::from_smiles("c1cc[nH]c1").unwrap();
        assert_eq!(pyrrole.h_bond_acceptors, 0);
        assert_eq!(pyrrole.h_bond_donors, 1);
    }

    #[test]
    fn invalid_smiles_is_an_error() {
        assert!(MolecularProperties::from_smiles("C1CC(").is_err());
    }

    #[test]
    fn rows_use_panel_labels() {
        let props = MolecularProperties::from_smiles("CCO").unwrap();
        let rows = props.rows();
        assert_eq!(rows[0], ("Molecular Weight", "46.07".to_string()));
        assert_eq!(rows[4].0, "Rotatable Bonds");
    }
}

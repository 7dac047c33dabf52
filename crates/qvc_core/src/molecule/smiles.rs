//! SMILES parser producing a molecular graph.
//!
//! Supports the organic subset, bracket atoms (isotope, chirality marks,
//! hydrogen count, charge, atom class), branches, ring closures (`1`-`9`
//! and `%nn`), explicit bond symbols and dot-separated fragments.
//! Stereo marks are accepted and ignored.

use std::collections::{HashMap, VecDeque};
use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

use super::elements::{self, Element};

/// Failure to parse a SMILES string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmilesError {
    #[error("SMILES string is empty")]
    Empty,

    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Unknown element '{symbol}' at position {pos}")]
    UnknownElement { symbol: String, pos: usize },

    #[error("Unclosed bracket atom starting at position {pos}")]
    UnclosedBracket { pos: usize },

    #[error("Unbalanced parenthesis at position {pos}")]
    UnbalancedParen { pos: usize },

    #[error("Bond or branch at position {pos} has no preceding atom")]
    MissingAtom { pos: usize },

    #[error("Ring closure {label} was never closed")]
    UnclosedRing { label: u32 },

    #[error("Invalid ring closure {label} at position {pos}")]
    InvalidRingClosure { label: u32, pos: usize },
}

/// Bond multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Contribution to an atom's valence. Aromatic bonds count as one; the
    /// extra aromatic electron is accounted for per atom.
    pub fn valence(&self) -> u32 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }
}

/// One atom of the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: &'static Element,
    pub aromatic: bool,
    pub charge: i8,
    /// Hydrogens attached but not present as graph atoms.
    pub hydrogens: u8,
    /// Written inside brackets.
    pub bracket: bool,
}

/// One bond of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
}

impl Bond {
    /// The atom at the other end of this bond.
    pub fn other(&self, atom: usize) -> usize {
        if self.a == atom {
            self.b
        } else {
            self.a
        }
    }
}

/// Molecular graph with implicit hydrogens resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// Per atom: (neighbor, bond index).
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    /// Parse a SMILES string. Leading and trailing whitespace is ignored.
    pub fn from_smiles(smiles: &str) -> Result<Self, SmilesError> {
        let trimmed = smiles.trim();
        if trimmed.is_empty() {
            return Err(SmilesError::Empty);
        }
        let mut molecule = Parser::new(trimmed).parse()?;
        molecule.assign_implicit_hydrogens();
        molecule.perceive_aromatic_rings();
        Ok(molecule)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Neighbors of an atom as (neighbor, bond index) pairs.
    pub fn neighbors(&self, atom: usize) -> &[(usize, usize)] {
        &self.adjacency[atom]
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Number of non-hydrogen neighbors.
    pub fn heavy_degree(&self, atom: usize) -> usize {
        self.adjacency[atom]
            .iter()
            .filter(|(n, _)| !self.atoms[*n].element.is_hydrogen())
            .count()
    }

    /// Sum of bond valences plus attached hydrogens.
    ///
    /// Counted in `u32`: an atom may carry any number of bonds.
    pub fn valence(&self, atom: usize) -> u32 {
        self.bond_valence(atom) + self.total_hydrogens(atom)
    }

    /// Hydrogens on an atom, counting both implicit and graph hydrogens.
    pub fn total_hydrogens(&self, atom: usize) -> u32 {
        let graph_h = self.adjacency[atom]
            .iter()
            .filter(|(n, _)| self.atoms[*n].element.is_hydrogen())
            .count() as u32;
        u32::from(self.atoms[atom].hydrogens) + graph_h
    }

    /// Whether an atom carries a double bond to any of the given atomic numbers.
    pub fn has_double_bond_to(&self, atom: usize, targets: &[u8], skip_bond: Option<usize>) -> bool {
        self.adjacency[atom].iter().any(|&(n, bond)| {
            Some(bond) != skip_bond
                && self.bonds[bond].order == BondOrder::Double
                && targets.contains(&self.atoms[n].element.atomic_number)
        })
    }

    pub fn has_triple_bond(&self, atom: usize) -> bool {
        self.adjacency[atom]
            .iter()
            .any(|&(_, bond)| self.bonds[bond].order == BondOrder::Triple)
    }

    /// Whether a bond belongs to a ring (its ends stay connected without it).
    pub fn is_ring_bond(&self, bond: usize) -> bool {
        let Bond { a, b, .. } = self.bonds[bond];
        let mut seen = vec![false; self.atoms.len()];
        let mut queue = VecDeque::from([a]);
        seen[a] = true;
        while let Some(current) = queue.pop_front() {
            for &(next, via) in &self.adjacency[current] {
                if via == bond || seen[next] {
                    continue;
                }
                if next == b {
                    return true;
                }
                seen[next] = true;
                queue.push_back(next);
            }
        }
        false
    }

    fn bond_valence(&self, atom: usize) -> u32 {
        self.adjacency[atom]
            .iter()
            .map(|&(_, bond)| self.bonds[bond].order.valence())
            .fold(0, u32::saturating_add)
    }

    fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.adjacency.push(Vec::new());
        self.atoms.len() - 1
    }

    fn add_bond(&mut self, a: usize, b: usize, order: BondOrder) -> usize {
        let index = self.bonds.len();
        self.bonds.push(Bond { a, b, order });
        self.adjacency[a].push((b, index));
        self.adjacency[b].push((a, index));
        index
    }

    fn bonded(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].iter().any(|(n, _)| *n == b)
    }

    /// Fill in hydrogens for organic-subset atoms from their normal valences.
    fn assign_implicit_hydrogens(&mut self) {
        for index in 0..self.atoms.len() {
            let atom = &self.atoms[index];
            if atom.bracket {
                continue;
            }
            let used = self.bond_valence(index) + u32::from(atom.aromatic);
            // Over-bonded atoms get no implicit hydrogens
            let hydrogens = atom
                .element
                .valences
                .iter()
                .map(|&v| u32::from(v))
                .find(|&v| v >= used)
                .and_then(|v| u8::try_from(v - used).ok())
                .unwrap_or(0);
            self.atoms[index].hydrogens = hydrogens;
        }
    }

    /// Mark Kekulé six-membered carbon/nitrogen rings as aromatic so that
    /// `C1=CC=CC=C1` and `c1ccccc1` type the same way.
    fn perceive_aromatic_rings(&mut self) {
        for ring in self.six_membered_rings() {
            let ring_bonds: Vec<usize> = (0..6)
                .filter_map(|i| self.bond_between(ring[i], ring[(i + 1) % 6]))
                .collect();
            if ring_bonds.len() != 6 {
                continue;
            }
            let all_ring_atoms_ok = ring.iter().all(|&atom| {
                let number = self.atoms[atom].element.atomic_number;
                let doubles = self.adjacency[atom]
                    .iter()
                    .filter(|&&(_, bond)| {
                        ring_bonds.contains(&bond) && self.bonds[bond].order == BondOrder::Double
                    })
                    .count();
                (number == 6 || number == 7) && doubles == 1
            });
            if !all_ring_atoms_ok {
                continue;
            }
            for &atom in &ring {
                self.atoms[atom].aromatic = true;
            }
            for &bond in &ring_bonds {
                self.bonds[bond].order = BondOrder::Aromatic;
            }
        }
    }

    fn bond_between(&self, a: usize, b: usize) -> Option<usize> {
        self.adjacency[a]
            .iter()
            .find(|(n, _)| *n == b)
            .map(|(_, bond)| *bond)
    }

    /// All simple cycles of length six, each listed once in path order.
    fn six_membered_rings(&self) -> Vec<Vec<usize>> {
        let mut rings = Vec::new();
        let mut seen_sets: Vec<Vec<usize>> = Vec::new();
        for start in 0..self.atoms.len() {
            let mut path = vec![start];
            self.extend_ring_path(start, &mut path, &mut rings, &mut seen_sets);
        }
        rings
    }

    fn extend_ring_path(
        &self,
        start: usize,
        path: &mut Vec<usize>,
        rings: &mut Vec<Vec<usize>>,
        seen_sets: &mut Vec<Vec<usize>>,
    ) {
        let Some(&current) = path.last() else {
            return;
        };
        if path.len() == 6 {
            if self.bonded(current, start) {
                let mut key = path.clone();
                key.sort_unstable();
                if !seen_sets.contains(&key) {
                    seen_sets.push(key);
                    rings.push(path.clone());
                }
            }
            return;
        }
        for &(next, _) in &self.adjacency[current] {
            // Only walk to higher indices than the start so each ring is
            // discovered from its lowest atom.
            if next <= start || path.contains(&next) {
                continue;
            }
            path.push(next);
            self.extend_ring_path(start, path, rings, seen_sets);
            path.pop();
        }
    }
}

/// Recursive-descent style SMILES reader.
struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
    molecule: Molecule,
    /// Atom new atoms attach to.
    previous: Option<usize>,
    /// Bond symbol waiting for the next atom or ring closure.
    pending_bond: Option<(BondOrder, usize)>,
    branches: Vec<(Option<usize>, usize)>,
    open_rings: HashMap<u32, (usize, Option<BondOrder>, usize)>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            molecule: Molecule {
                atoms: Vec::new(),
                bonds: Vec::new(),
                adjacency: Vec::new(),
            },
            previous: None,
            pending_bond: None,
            branches: Vec::new(),
            open_rings: HashMap::new(),
        }
    }

    fn parse(mut self) -> Result<Molecule, SmilesError> {
        while let Some(&(pos, ch)) = self.chars.peek() {
            match ch {
                '(' => {
                    self.chars.next();
                    if self.previous.is_none() {
                        return Err(SmilesError::MissingAtom { pos });
                    }
                    self.branches.push((self.previous, pos));
                }
                ')' => {
                    self.chars.next();
                    let (atom, _) = self
                        .branches
                        .pop()
                        .ok_or(SmilesError::UnbalancedParen { pos })?;
                    if self.pending_bond.is_some() {
                        return Err(SmilesError::MissingAtom { pos });
                    }
                    self.previous = atom;
                }
                '-' | '=' | '#' | ':' | '/' | '\\' => {
                    self.chars.next();
                    if self.previous.is_none() {
                        return Err(SmilesError::MissingAtom { pos });
                    }
                    let order = match ch {
                        '=' => BondOrder::Double,
                        '#' => BondOrder::Triple,
                        ':' => BondOrder::Aromatic,
                        _ => BondOrder::Single,
                    };
                    self.pending_bond = Some((order, pos));
                }
                '.' => {
                    self.chars.next();
                    if self.pending_bond.is_some() {
                        return Err(SmilesError::UnexpectedChar { ch, pos });
                    }
                    self.previous = None;
                }
                '%' | '0'..='9' => {
                    let label = self.ring_label()?;
                    self.ring_closure(label, pos)?;
                }
                '[' => {
                    let atom = self.bracket_atom()?;
                    self.attach(atom);
                }
                c if c.is_ascii_alphabetic() => {
                    let atom = self.organic_atom()?;
                    self.attach(atom);
                }
                _ => return Err(SmilesError::UnexpectedChar { ch, pos }),
            }
        }

        if let Some((_, pos)) = self.branches.pop() {
            return Err(SmilesError::UnbalancedParen { pos });
        }
        if let Some((_, pos)) = self.pending_bond {
            return Err(SmilesError::MissingAtom { pos });
        }
        if let Some(label) = self.open_rings.keys().min() {
            return Err(SmilesError::UnclosedRing { label: *label });
        }
        Ok(self.molecule)
    }

    /// Add an atom and bond it to the previous atom, if any.
    fn attach(&mut self, atom: Atom) {
        let aromatic = atom.aromatic;
        let index = self.molecule.add_atom(atom);
        if let Some(previous) = self.previous {
            let order = match self.pending_bond.take() {
                Some((order, _)) => order,
                None => default_order(self.molecule.atoms[previous].aromatic, aromatic),
            };
            self.molecule.add_bond(previous, index, order);
        }
        self.pending_bond = None;
        self.previous = Some(index);
    }

    fn ring_label(&mut self) -> Result<u32, SmilesError> {
        let Some((pos, ch)) = self.chars.next() else {
            return Err(SmilesError::Empty);
        };
        if ch != '%' {
            return Ok(ch.to_digit(10).unwrap_or_default());
        }
        let mut label = 0;
        for _ in 0..2 {
            match self.chars.next() {
                Some((_, d)) if d.is_ascii_digit() => {
                    label = label * 10 + d.to_digit(10).unwrap_or_default();
                }
                Some((p, c)) => return Err(SmilesError::UnexpectedChar { ch: c, pos: p }),
                None => return Err(SmilesError::UnexpectedChar { ch, pos }),
            }
        }
        Ok(label)
    }

    fn ring_closure(&mut self, label: u32, pos: usize) -> Result<(), SmilesError> {
        let Some(current) = self.previous else {
            return Err(SmilesError::MissingAtom { pos });
        };
        let bond = self.pending_bond.take().map(|(order, _)| order);

        match self.open_rings.remove(&label) {
            None => {
                self.open_rings.insert(label, (current, bond, pos));
            }
            Some((partner, opened_with, _)) => {
                if partner == current || self.molecule.bonded(partner, current) {
                    return Err(SmilesError::InvalidRingClosure { label, pos });
                }
                let order = match (bond, opened_with) {
                    (Some(a), Some(b)) if a != b => {
                        return Err(SmilesError::InvalidRingClosure { label, pos });
                    }
                    (Some(order), _) | (None, Some(order)) => order,
                    (None, None) => default_order(
                        self.molecule.atoms[partner].aromatic,
                        self.molecule.atoms[current].aromatic,
                    ),
                };
                self.molecule.add_bond(partner, current, order);
            }
        }
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<Atom, SmilesError> {
        let Some((pos, first)) = self.chars.next() else {
            return Err(SmilesError::Empty);
        };

        let aromatic = first.is_ascii_lowercase();
        let mut symbol = first.to_ascii_uppercase().to_string();

        if !aromatic {
            // Cl and Br are the only two-letter organic symbols
            if let Some(&(_, second)) = self.chars.peek() {
                let candidate = format!("{}{}", first, second);
                if candidate == "Cl" || candidate == "Br" {
                    self.chars.next();
                    symbol = candidate;
                }
            }
        }

        let allowed = if aromatic {
            elements::is_organic_subset(&symbol) && elements::can_be_aromatic(&symbol)
        } else {
            elements::is_organic_subset(&symbol)
        };
        if !allowed {
            return Err(SmilesError::UnknownElement { symbol, pos });
        }
        let element =
            elements::lookup(&symbol).ok_or(SmilesError::UnknownElement { symbol, pos })?;

        Ok(Atom {
            element,
            aromatic,
            charge: 0,
            hydrogens: 0,
            bracket: false,
        })
    }

    fn bracket_atom(&mut self) -> Result<Atom, SmilesError> {
        let Some((open_pos, _)) = self.chars.next() else {
            return Err(SmilesError::Empty);
        };
        let unclosed = SmilesError::UnclosedBracket { pos: open_pos };

        // Isotope is accepted and ignored; weights are averages
        while matches!(self.chars.peek(), Some((_, c)) if c.is_ascii_digit()) {
            self.chars.next();
        }

        let (symbol_pos, first) = self.chars.next().ok_or(unclosed.clone())?;
        if !first.is_ascii_alphabetic() {
            return Err(SmilesError::UnexpectedChar {
                ch: first,
                pos: symbol_pos,
            });
        }
        let aromatic = first.is_ascii_lowercase();
        let mut symbol = first.to_ascii_uppercase().to_string();
        if let Some(&(_, second)) = self.chars.peek() {
            if second.is_ascii_lowercase() {
                let candidate = format!("{}{}", symbol, second);
                if elements::lookup(&candidate).is_some() {
                    self.chars.next();
                    symbol = candidate;
                }
            }
        }
        if aromatic && !elements::can_be_aromatic(&symbol) {
            return Err(SmilesError::UnknownElement {
                symbol,
                pos: symbol_pos,
            });
        }
        let element = elements::lookup(&symbol).ok_or(SmilesError::UnknownElement {
            symbol: symbol.clone(),
            pos: symbol_pos,
        })?;

        // Chirality marks (@, @@, @TH1, ...) carry no weight here
        if matches!(self.chars.peek(), Some((_, '@'))) {
            while matches!(self.chars.peek(), Some((_, c)) if *c == '@' || c.is_ascii_uppercase() || c.is_ascii_digit())
            {
                if matches!(self.chars.peek(), Some((_, 'H'))) {
                    break;
                }
                self.chars.next();
            }
        }

        let mut hydrogens = 0u8;
        if matches!(self.chars.peek(), Some((_, 'H'))) {
            self.chars.next();
            hydrogens = 1;
            if let Some(&(_, d)) = self.chars.peek() {
                if let Some(count) = d.to_digit(10) {
                    self.chars.next();
                    hydrogens = count as u8;
                }
            }
        }

        let mut charge = 0i8;
        while let Some(&(_, c)) = self.chars.peek() {
            let sign = match c {
                '+' => 1,
                '-' => -1,
                _ => break,
            };
            self.chars.next();
            match self.chars.peek().and_then(|&(_, d)| d.to_digit(10)) {
                Some(magnitude) => {
                    self.chars.next();
                    charge = charge.saturating_add(sign * magnitude as i8);
                }
                None => charge = charge.saturating_add(sign),
            }
        }

        // Atom class
        if matches!(self.chars.peek(), Some((_, ':'))) {
            self.chars.next();
            while matches!(self.chars.peek(), Some((_, c)) if c.is_ascii_digit()) {
                self.chars.next();
            }
        }

        match self.chars.next() {
            Some((_, ']')) => Ok(Atom {
                element,
                aromatic,
                charge,
                hydrogens,
                bracket: true,
            }),
            Some((pos, ch)) => Err(SmilesError::UnexpectedChar { ch, pos }),
            None => Err(unclosed),
        }
    }
}

fn default_order(a_aromatic: bool, b_aromatic: bool) -> BondOrder {
    if a_aromatic && b_aromatic {
        BondOrder::Aromatic
    } else {
        BondOrder::Single
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASPIRIN: &str = "CC(=O)OC1=CC=CC=C1C(=O)O";

    fn hydrogen_total(molecule: &Molecule) -> u32 {
        (0..molecule.atom_count())
            .map(|i| molecule.total_hydrogens(i))
            .sum()
    }

    #[test]
    fn parses_aspirin() {
        let mol = Molecule::from_smiles(ASPIRIN).unwrap();
        assert_eq!(mol.atom_count(), 13);
        assert_eq!(mol.bonds().len(), 13);
        assert_eq!(hydrogen_total(&mol), 8);
    }

    #[test]
    fn kekule_benzene_becomes_aromatic() {
        let mol = Molecule::from_smiles("C1=CC=CC=C1").unwrap();
        assert!(mol.atoms().iter().all(|a| a.aromatic));
        assert!(mol.bonds().iter().all(|b| b.order == BondOrder::Aromatic));
        assert_eq!(hydrogen_total(&mol), 6);
    }

    #[test]
    fn aromatic_lowercase_hydrogens() {
        let pyridine = Molecule::from_smiles("c1ccncc1").unwrap();
        assert_eq!(hydrogen_total(&pyridine), 5);

        let pyrrole = Molecule::from_smiles("c1cc[nH]c1").unwrap();
        assert_eq!(hydrogen_total(&pyrrole), 5);
    }

    #[test]
    fn bracket_atoms_with_charge_and_hydrogens() {
        let mol = Molecule::from_smiles("[NH4+].[Cl-]").unwrap();
        assert_eq!(mol.atoms()[0].charge, 1);
        assert_eq!(mol.atoms()[0].hydrogens, 4);
        assert_eq!(mol.atoms()[1].charge, -1);
        assert_eq!(mol.atoms()[1].hydrogens, 0);
        assert!(mol.bonds().is_empty());
    }

    #[test]
    fn bracket_isotope_chirality_and_class() {
        let mol = Molecule::from_smiles("N[C@@H](C)C(=O)O").unwrap();
        assert_eq!(mol.atoms()[1].hydrogens, 1);

        let mol = Molecule::from_smiles("[13CH4:2]").unwrap();
        assert_eq!(mol.atoms()[0].hydrogens, 4);
    }

    #[test]
    fn two_digit_ring_labels() {
        let mol = Molecule::from_smiles("C%10CCCCC%10").unwrap();
        assert_eq!(mol.bonds().len(), 6);
        assert!(mol.is_ring_bond(0));
    }

    #[test]
    fn ring_bond_detection() {
        let mol = Molecule::from_smiles("CC1CC1").unwrap();
        assert!(!mol.is_ring_bond(0));
        assert!(mol.is_ring_bond(1));
    }

    #[test]
    fn chlorine_and_bromine_symbols() {
        let mol = Molecule::from_smiles("ClCBr").unwrap();
        assert_eq!(mol.atoms()[0].element.symbol, "Cl");
        assert_eq!(mol.atoms()[2].element.symbol, "Br");
        assert_eq!(mol.total_hydrogens(1), 2);
    }

    #[test]
    fn triple_bond_hydrogens() {
        let mol = Molecule::from_smiles("C#N").unwrap();
        assert_eq!(mol.total_hydrogens(0), 1);
        assert_eq!(mol.total_hydrogens(1), 0);
        assert!(mol.has_triple_bond(0));
    }

    #[test]
    fn heavily_branched_atom_does_not_overflow() {
        let smiles = format!("C{}", "(C)".repeat(300));
        let mol = Molecule::from_smiles(&smiles).unwrap();
        assert_eq!(mol.atom_count(), 301);
        assert_eq!(mol.valence(0), 300);
        assert_eq!(mol.total_hydrogens(0), 0);
        assert_eq!(mol.total_hydrogens(1), 3);
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert!(Molecule::from_smiles("  CCO \n").is_ok());
    }

    #[test]
    fn reports_errors() {
        assert_eq!(Molecule::from_smiles("   "), Err(SmilesError::Empty));
        assert!(matches!(
            Molecule::from_smiles("C1CC"),
            Err(SmilesError::UnclosedRing { label: 1 })
        ));
        assert!(matches!(
            Molecule::from_smiles("C(C"),
            Err(SmilesError::UnbalancedParen { .. })
        ));
        assert!(matches!(
            Molecule::from_smiles("CC)"),
            Err(SmilesError::UnbalancedParen { pos: 2 })
        ));
        assert!(matches!(
            Molecule::from_smiles("Xe"),
            Err(SmilesError::UnknownElement { .. })
        ));
        assert!(matches!(
            Molecule::from_smiles("[CH4"),
            Err(SmilesError::UnclosedBracket { .. })
        ));
        assert!(matches!(
            Molecule::from_smiles("=C"),
            Err(SmilesError::MissingAtom { pos: 0 })
        ));
        assert!(matches!(
            Molecule::from_smiles("not a molecule"),
            Err(SmilesError::UnknownElement { .. })
        ));
    }
}

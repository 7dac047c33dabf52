//! Element table: symbols, average weights and default valences.

/// Static data for one chemical element.
#[derive(Debug, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub atomic_number: u8,
    /// Standard atomic weight (average, g/mol).
    pub weight: f64,
    /// Normal valences used for implicit hydrogens, ascending.
    /// Empty for elements that never receive implicit hydrogens.
    pub valences: &'static [u8],
}

impl Element {
    pub fn is_hydrogen(&self) -> bool {
        self.atomic_number == 1
    }

    pub fn is_carbon(&self) -> bool {
        self.atomic_number == 6
    }
}

/// Average mass of hydrogen, used for implicit hydrogens.
pub const HYDROGEN_WEIGHT: f64 = 1.008;

static ELEMENTS: &[Element] = &[
    Element { symbol: "H", atomic_number: 1, weight: HYDROGEN_WEIGHT, valences: &[1] },
    Element { symbol: "Li", atomic_number: 3, weight: 6.941, valences: &[] },
    Element { symbol: "B", atomic_number: 5, weight: 10.812, valences: &[3] },
    Element { symbol: "C", atomic_number: 6, weight: 12.011, valences: &[4] },
    Element { symbol: "N", atomic_number: 7, weight: 14.007, valences: &[3, 5] },
    Element { symbol: "O", atomic_number: 8, weight: 15.999, valences: &[2] },
    Element { symbol: "F", atomic_number: 9, weight: 18.998, valences: &[1] },
    Element { symbol: "Na", atomic_number: 11, weight: 22.990, valences: &[] },
    Element { symbol: "Mg", atomic_number: 12, weight: 24.305, valences: &[] },
    Element { symbol: "Si", atomic_number: 14, weight: 28.086, valences: &[] },
    Element { symbol: "P", atomic_number: 15, weight: 30.974, valences: &[3, 5] },
    Element { symbol: "S", atomic_number: 16, weight: 32.067, valences: &[2, 4, 6] },
    Element { symbol: "Cl", atomic_number: 17, weight: 35.453, valences: &[1] },
    Element { symbol: "K", atomic_number: 19, weight: 39.098, valences: &[] },
    Element { symbol: "Ca", atomic_number: 20, weight: 40.078, valences: &[] },
    Element { symbol: "Fe", atomic_number: 26, weight: 55.845, valences: &[] },
    Element { symbol: "Zn", atomic_number: 30, weight: 65.38, valences: &[] },
    Element { symbol: "As", atomic_number: 33, weight: 74.922, valences: &[] },
    Element { symbol: "Se", atomic_number: 34, weight: 78.971, valences: &[] },
    Element { symbol: "Br", atomic_number: 35, weight: 79.904, valences: &[1] },
    Element { symbol: "I", atomic_number: 53, weight: 126.904, valences: &[1] },
];

/// Symbols allowed outside brackets.
const ORGANIC_SUBSET: &[&str] = &["B", "C", "N", "O", "P", "S", "F", "Cl", "Br", "I"];

/// Symbols allowed in lowercase (aromatic) form.
const AROMATIC_SYMBOLS: &[&str] = &["B", "C", "N", "O", "P", "S", "Se", "As"];

/// Look up an element by its capitalized symbol.
pub fn lookup(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

pub fn is_organic_subset(symbol: &str) -> bool {
    ORGANIC_SUBSET.contains(&symbol)
}

pub fn can_be_aromatic(symbol: &str) -> bool {
    AROMATIC_SYMBOLS.contains(&symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_two_letter_symbols() {
        assert_eq!(lookup("Cl").unwrap().atomic_number, 17);
        assert_eq!(lookup("Br").unwrap().valences, &[1]);
        assert!(lookup("Xx").is_none());
    }

    #[test]
    fn organic_subset_excludes_metals() {
        assert!(is_organic_subset("Cl"));
        assert!(!is_organic_subset("Na"));
        assert!(can_be_aromatic("Se"));
        assert!(!can_be_aromatic("Cl"));
    }

    #[test]
    fn every_organic_symbol_is_known() {
        for symbol in ORGANIC_SUBSET {
            assert!(lookup(symbol).is_some(), "{symbol} missing");
        }
    }
}

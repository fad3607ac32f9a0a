use crate::core::elements;
use nalgebra::Point3;

/// Represents a single atom of a molecular structure.
///
/// The element symbol is stored in its canonical spelling and the atomic mass is
/// resolved once at construction, so centre-of-mass computations never need to
/// consult the element table again.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The canonical element symbol (e.g. "O", "Cl", "Ar").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The atomic mass in unified atomic mass units.
    pub mass: f64,
}

impl Atom {
    /// Creates an atom from an element symbol, using the standard atomic mass.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The element symbol, matched case-insensitively.
    /// * `position` - The 3D coordinates of the atom.
    ///
    /// # Return
    ///
    /// Returns `None` if the symbol is not a known element.
    pub fn new(symbol: &str, position: Point3<f64>) -> Option<Self> {
        let (canonical, mass) = elements::lookup(symbol)?;
        Some(Self {
            element: canonical.to_string(),
            position,
            mass,
        })
    }

    /// Creates an atom with an explicit mass, bypassing the element table.
    ///
    /// Useful for isotopes or pseudo-atoms whose mass differs from the standard weight.
    pub fn with_mass(symbol: &str, mass: f64, position: Point3<f64>) -> Self {
        Self {
            element: symbol.to_string(),
            position,
            mass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_resolves_canonical_symbol_and_mass() {
        let atom = Atom::new("cl", Point3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(atom.element, "Cl");
        assert_eq!(atom.mass, 35.45);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn new_atom_rejects_unknown_element() {
        assert!(Atom::new("Qx", Point3::origin()).is_none());
    }

    #[test]
    fn with_mass_keeps_symbol_verbatim() {
        let atom = Atom::with_mass("D", 2.014, Point3::origin());
        assert_eq!(atom.element, "D");
        assert_eq!(atom.mass, 2.014);
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let atom1 = Atom::new("N", Point3::new(0.0, 0.0, 0.0)).unwrap();
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}

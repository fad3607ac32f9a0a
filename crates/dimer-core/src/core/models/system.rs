use super::atom::Atom;
use crate::core::utils::geometry;
use nalgebra::{Point3, Rotation3, Vector3};

/// An ordered collection of atoms forming one molecular structure.
///
/// Atom order is significant: it is preserved by every transform and by
/// concatenation, and it is the order in which atoms are written to disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MolecularSystem {
    atoms: Vec<Atom>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    pub fn total_mass(&self) -> f64 {
        self.atoms.iter().map(|a| a.mass).sum()
    }

    /// Computes the mass-weighted mean position of all atoms.
    ///
    /// # Return
    ///
    /// Returns `None` if the system is empty or its total mass is zero.
    pub fn center_of_mass(&self) -> Option<Point3<f64>> {
        geometry::weighted_centroid(self.atoms.iter().map(|a| (a.position, a.mass)))
    }

    /// Shifts every atom by `offset`.
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for atom in &mut self.atoms {
            atom.position += *offset;
        }
    }

    /// Moves the system so that its centre of mass sits at the origin.
    ///
    /// # Return
    ///
    /// The translation that was applied, or `None` (and no change) when the
    /// system has no centre of mass.
    pub fn center_at_origin(&mut self) -> Option<Vector3<f64>> {
        let offset = -self.center_of_mass()?.coords;
        self.translate(&offset);
        Some(offset)
    }

    /// Applies a rotation about the coordinate origin to every atom.
    pub fn rotate(&mut self, rotation: &Rotation3<f64>) {
        for atom in &mut self.atoms {
            atom.position = rotation * atom.position;
        }
    }

    /// Appends the atoms of `other` after the atoms of `self`.
    pub fn extend(&mut self, other: MolecularSystem) {
        self.atoms.extend(other.atoms);
    }

    /// Consumes both systems and returns their concatenation, `self` first.
    pub fn concat(mut self, other: MolecularSystem) -> MolecularSystem {
        self.extend(other);
        self
    }
}

impl FromIterator<Atom> for MolecularSystem {
    fn from_iter<T: IntoIterator<Item = Atom>>(iter: T) -> Self {
        Self::from_atoms(iter.into_iter().collect())
    }
}

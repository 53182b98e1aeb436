use glam::Vec2;
use std::sync::Arc;

use crate::api::types::AtomId;
use crate::assets::elements::ElementSpec;
use crate::assets::molecules::Composition;
use crate::components::atom::Atom;

/// Atom storage using a flat Vec in insertion order.
/// Designed for tens of atoms; every pairwise scan is O(n²).
///
/// Atoms are never removed individually, so an atom's id doubles as its
/// index until the next `clear`.
pub struct Arena {
    atoms: Vec<Atom>,
    next_id: u32,
}

impl Arena {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            atoms: Vec::with_capacity(capacity),
            next_id: 0,
        }
    }

    /// Append an unbonded atom at rest. Returns its id.
    pub fn spawn(&mut self, element: Arc<ElementSpec>, pos: Vec2, electron_phase: f32) -> AtomId {
        let id = AtomId(self.next_id);
        self.next_id += 1;
        self.atoms
            .push(Atom::new(id, element, pos).with_electron_phase(electron_phase));
        id
    }

    pub fn index_of(&self, id: AtomId) -> Option<usize> {
        let idx = id.0 as usize;
        self.atoms.get(idx).filter(|a| a.id == id).map(|_| idx)
    }

    pub fn get(&self, id: AtomId) -> Option<&Atom> {
        self.index_of(id).map(|idx| &self.atoms[idx])
    }

    pub fn get_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        let idx = self.index_of(id)?;
        Some(&mut self.atoms[idx])
    }

    /// All atoms in arena order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub(crate) fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Remove every atom and restart id assignment.
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.next_id = 0;
    }

    /// Record a bond on both endpoints.
    ///
    /// Returns false (and changes nothing) for self-bonds, unknown ids,
    /// existing bonds, or when either side is at capacity.
    pub fn link(&mut self, a: AtomId, b: AtomId) -> bool {
        let (Some(ia), Some(ib)) = (self.index_of(a), self.index_of(b)) else {
            return false;
        };
        if ia == ib || self.atoms[ia].is_bonded_to(b) {
            return false;
        }
        if !self.atoms[ia].has_capacity() || !self.atoms[ib].has_capacity() {
            return false;
        }

        let atom_a = &mut self.atoms[ia];
        atom_a.bonds.insert(b);
        atom_a.bond_count += 1;
        let atom_b = &mut self.atoms[ib];
        atom_b.bonds.insert(a);
        atom_b.bond_count += 1;
        true
    }

    /// Remove a bond from both endpoints. Returns false if no such bond existed.
    pub fn unlink(&mut self, a: AtomId, b: AtomId) -> bool {
        let (Some(ia), Some(ib)) = (self.index_of(a), self.index_of(b)) else {
            return false;
        };
        if !self.atoms[ia].bonds.remove(&b) {
            return false;
        }
        self.atoms[ia].bond_count -= 1;
        let removed = self.atoms[ib].bonds.remove(&a);
        debug_assert!(removed, "bond {:?}-{:?} was one-sided", a, b);
        if removed {
            self.atoms[ib].bond_count -= 1;
        }
        true
    }

    /// Number of distinct bonds.
    pub fn bond_total(&self) -> usize {
        self.atoms.iter().map(|a| a.bond_count).sum::<usize>() / 2
    }

    /// Element symbol → number of atoms present, bonded or not.
    pub fn element_counts(&self) -> Composition {
        let mut counts = Composition::new();
        for atom in &self.atoms {
            *counts.entry(atom.element.symbol.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn count_of(&self, symbol: &str) -> usize {
        self.atoms.iter().filter(|a| a.element.symbol == symbol).count()
    }

    /// Verify bond symmetry, bond counts and valence capacity.
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        for atom in &self.atoms {
            if atom.bond_count != atom.bonds.len() {
                return Err(format!(
                    "atom {:?} count {} != set size {}",
                    atom.id,
                    atom.bond_count,
                    atom.bonds.len()
                ));
            }
            if atom.bond_count > atom.element.max_bonds() {
                return Err(format!(
                    "atom {:?} ({}) has {} bonds, capacity {}",
                    atom.id,
                    atom.element.symbol,
                    atom.bond_count,
                    atom.element.max_bonds()
                ));
            }
            for &other in &atom.bonds {
                match self.get(other) {
                    Some(partner) if partner.is_bonded_to(atom.id) => {}
                    Some(_) => {
                        return Err(format!("bond {:?}->{:?} is one-sided", atom.id, other))
                    }
                    None => return Err(format!("atom {:?} bonded to missing {:?}", atom.id, other)),
                }
            }
        }
        Ok(())
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

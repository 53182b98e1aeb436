//! Connected-component labeling over the bond graph.
//!
//! Recomputed from scratch every tick in O(atoms + bonds).

use std::collections::VecDeque;

use crate::api::types::AtomId;
use crate::assets::molecules::{hill_formula, Composition, MoleculeCatalog, TargetMolecule};
use crate::core::arena::Arena;

/// A connected group of two or more bonded atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    /// Members in discovery order.
    pub atoms: Vec<AtomId>,
    pub composition: Composition,
    /// Catalog name when the composition matches a known molecule.
    pub name: Option<String>,
}

impl Molecule {
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Hill-notation formula of the composition.
    pub fn formula(&self) -> String {
        hill_formula(&self.composition)
    }
}

/// Every connected component, singletons included, each listed by atom id.
pub fn components(arena: &Arena) -> Vec<Vec<AtomId>> {
    let atoms = arena.atoms();
    let mut visited = vec![false; atoms.len()];
    let mut queue = VecDeque::new();
    let mut result = Vec::new();

    for start in 0..atoms.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        queue.push_back(start);
        let mut members = Vec::new();

        while let Some(idx) = queue.pop_front() {
            let atom = &atoms[idx];
            members.push(atom.id);
            for &neighbor in atom.bonds() {
                if let Some(n) = arena.index_of(neighbor) {
                    if !visited[n] {
                        visited[n] = true;
                        queue.push_back(n);
                    }
                }
            }
        }
        result.push(members);
    }
    result
}

fn composition_of(arena: &Arena, members: &[AtomId]) -> Composition {
    let mut composition = Composition::new();
    for atom in members.iter().filter_map(|&id| arena.get(id)) {
        *composition.entry(atom.element.symbol.clone()).or_insert(0) += 1;
    }
    composition
}

/// Molecules (components with more than one atom), named from `catalog` where possible.
pub fn recognize(arena: &Arena, catalog: &MoleculeCatalog) -> Vec<Molecule> {
    components(arena)
        .into_iter()
        .filter(|members| members.len() > 1)
        .map(|atoms| {
            let composition = composition_of(arena, &atoms);
            let name = catalog.find_by_composition(&composition).map(|m| m.name.clone());
            Molecule { atoms, composition, name }
        })
        .collect()
}

/// Whether the whole arena is one component whose composition is exactly the target's.
pub fn is_fully_assembled(arena: &Arena, target: &TargetMolecule) -> bool {
    if arena.is_empty() {
        return false;
    }
    components(arena)
        .iter()
        .any(|members| members.len() == arena.len() && composition_of(arena, members) == target.composition)
}

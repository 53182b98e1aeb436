//! Bond breaking and formation.
//!
//! Each tick runs two strictly ordered phases: every over-stretched bond is
//! found from one snapshot and then removed; afterwards new bonds are formed
//! greedily in arena order, committing each one immediately.

use std::collections::BTreeSet;

use glam::Vec2;

use crate::api::types::AtomId;
use crate::components::atom::expected_bond_distance;
use crate::core::arena::Arena;
use crate::core::classify::{classify, BondKind};
use crate::core::regime::RegimeConstants;

/// A bond created during the form phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormedBond {
    /// The scanning atom.
    pub a: AtomId,
    /// The partner that was snapped into place.
    pub b: AtomId,
    pub kind: BondKind,
}

/// Bond changes produced by one tick, in commit order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BondChanges {
    /// Each broken bond once, as (lower id, higher id).
    pub broken: Vec<(AtomId, AtomId)>,
    pub formed: Vec<FormedBond>,
}

/// Remove every bond stretched past `expected distance × break factor`.
pub fn break_overstretched(arena: &mut Arena, constants: &RegimeConstants) -> Vec<(AtomId, AtomId)> {
    let mut stretched = BTreeSet::new();
    for atom in arena.iter() {
        for &other_id in atom.bonds() {
            let key = (atom.id.min(other_id), atom.id.max(other_id));
            if stretched.contains(&key) {
                continue;
            }
            let Some(other) = arena.get(other_id) else {
                continue;
            };
            let limit = expected_bond_distance(atom, other) * constants.bond_break_factor;
            if atom.pos.distance(other.pos) > limit {
                stretched.insert(key);
            }
        }
    }

    let mut broken = Vec::with_capacity(stretched.len());
    for (a, b) in stretched {
        if arena.unlink(a, b) {
            log::debug!("bond broken: {:?}-{:?}", a, b);
            broken.push((a, b));
        }
    }
    broken
}

/// Form bonds for atoms with spare capacity, first match wins.
///
/// A new bond zeroes both velocities and places the partner exactly at the
/// expected bond distance along the current connecting line.
pub fn form_bonds(arena: &mut Arena, constants: &RegimeConstants) -> Vec<FormedBond> {
    let mut formed = Vec::new();
    let n = arena.len();

    for i in 0..n {
        for j in 0..n {
            let atoms = arena.atoms();
            let (atom, other) = (&atoms[i], &atoms[j]);
            if !atom.has_capacity() {
                break;
            }
            if i == j || atom.is_bonded_to(other.id) || !other.has_capacity() {
                continue;
            }

            let delta = other.pos - atom.pos;
            let dist = delta.length();
            if dist <= 0.0 {
                continue;
            }
            let expected = expected_bond_distance(atom, other);
            if dist >= expected + constants.bond_threshold {
                continue;
            }

            let (a, b) = (atom.id, other.id);
            let kind = classify(&atom.element, &other.element);
            let anchor = atom.pos;
            if !arena.link(a, b) {
                continue;
            }

            let atoms = arena.atoms_mut();
            atoms[i].vel = Vec2::ZERO;
            atoms[j].vel = Vec2::ZERO;
            atoms[j].pos = anchor + delta * (expected / dist);

            log::debug!("bond formed: {:?}-{:?} ({:?})", a, b, kind);
            formed.push(FormedBond { a, b, kind });
        }
    }
    formed
}

/// Run the break phase, then the form phase.
pub fn resolve(arena: &mut Arena, constants: &RegimeConstants) -> BondChanges {
    let broken = break_overstretched(arena, constants);
    let formed = form_bonds(arena, constants);
    BondChanges { broken, formed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::elements::ElementCatalog;
    use crate::core::regime::EnvironmentRegime;

    fn arena_with(atoms: &[(&str, f32, f32)]) -> Arena {
        let catalog = ElementCatalog::load().unwrap();
        let mut arena = Arena::new();
        for &(symbol, x, y) in atoms {
            arena.spawn(catalog.get(symbol).unwrap().clone(), Vec2::new(x, y), 0.0);
        }
        arena
    }

    fn ideal() -> RegimeConstants {
        EnvironmentRegime::Ideal.constants()
    }

    #[test]
    fn forms_within_threshold_and_snaps() {
        // H-O expected 50.5, threshold 20 → forms below 70.5
        let mut arena = arena_with(&[("O", 100.0, 100.0), ("H", 100.0, 160.0)]);
        arena.get_mut(AtomId(0)).unwrap().vel = Vec2::new(1.0, 2.0);
        arena.get_mut(AtomId(1)).unwrap().vel = Vec2::new(-3.0, 0.5);

        let formed = form_bonds(&mut arena, &ideal());
        assert_eq!(
            formed,
            vec![FormedBond { a: AtomId(0), b: AtomId(1), kind: BondKind::PolarCovalent }]
        );

        let (o, h) = (arena.get(AtomId(0)).unwrap(), arena.get(AtomId(1)).unwrap());
        assert_eq!(o.vel, Vec2::ZERO);
        assert_eq!(h.vel, Vec2::ZERO);
        assert!((h.pos - Vec2::new(100.0, 150.5)).length() < 1e-3, "snapped to {:?}", h.pos);
        assert!(arena.check_invariants().is_ok());
    }

    #[test]
    fn no_bond_beyond_threshold() {
        let mut arena = arena_with(&[("O", 100.0, 100.0), ("H", 100.0, 171.0)]);
        assert!(form_bonds(&mut arena, &ideal()).is_empty());
        assert_eq!(arena.bond_total(), 0);
    }

    #[test]
    fn noble_gas_never_bonds() {
        let mut arena = arena_with(&[("He", 100.0, 100.0), ("H", 110.0, 100.0), ("Ne", 90.0, 100.0)]);
        form_bonds(&mut arena, &ideal());
        assert_eq!(arena.get(AtomId(0)).unwrap().bond_count(), 0);
        assert_eq!(arena.get(AtomId(2)).unwrap().bond_count(), 0);
    }

    #[test]
    fn capacity_limits_first_match_wins() {
        let mut arena = arena_with(&[
            ("O", 200.0, 200.0),
            ("H", 250.0, 200.0),
            ("H", 150.0, 200.0),
            ("H", 200.0, 250.0),
        ]);
        let formed = form_bonds(&mut arena, &ideal());
        assert_eq!(formed.len(), 2);
        let o = arena.get(AtomId(0)).unwrap();
        assert_eq!(o.bond_count(), 2);
        assert!(o.is_bonded_to(AtomId(1)));
        assert!(o.is_bonded_to(AtomId(2)));
        assert_eq!(arena.get(AtomId(3)).unwrap().bond_count(), 0);
        assert!(arena.check_invariants().is_ok());
    }

    #[test]
    fn coincident_atoms_do_not_bond() {
        let mut arena = arena_with(&[("H", 50.0, 50.0), ("H", 50.0, 50.0)]);
        assert!(form_bonds(&mut arena, &ideal()).is_empty());
    }

    #[test]
    fn breaks_overstretched_once() {
        let mut arena = arena_with(&[("O", 0.0, 0.0), ("H", 50.5, 0.0)]);
        assert!(arena.link(AtomId(0), AtomId(1)));
        // Limit is 50.5 × 1.5 = 75.75
        arena.get_mut(AtomId(1)).unwrap().pos.x = 80.0;

        let broken = break_overstretched(&mut arena, &ideal());
        assert_eq!(broken, vec![(AtomId(0), AtomId(1))]);
        assert_eq!(arena.bond_total(), 0);
        assert!(arena.check_invariants().is_ok());
    }

    #[test]
    fn keeps_bonds_within_tolerance() {
        let mut arena = arena_with(&[("O", 0.0, 0.0), ("H", 70.0, 0.0)]);
        arena.link(AtomId(0), AtomId(1));
        assert!(break_overstretched(&mut arena, &ideal()).is_empty());
        assert_eq!(arena.bond_total(), 1);
    }

    #[test]
    fn break_happens_before_form() {
        // H0 is bonded to a distant O1 while O2 sits within reach.
        let mut arena = arena_with(&[("H", 100.0, 100.0), ("O", 300.0, 100.0), ("O", 100.0, 150.0)]);
        arena.link(AtomId(0), AtomId(1));

        let changes = resolve(&mut arena, &ideal());
        assert_eq!(changes.broken, vec![(AtomId(0), AtomId(1))]);
        assert!(changes.formed.iter().any(|f| f.a == AtomId(0) && f.b == AtomId(2)));

        let h = arena.get(AtomId(0)).unwrap();
        assert!(h.is_bonded_to(AtomId(2)));
        assert!(!h.is_bonded_to(AtomId(1)));
        assert!(arena.check_invariants().is_ok());
    }
}

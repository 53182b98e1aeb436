//! Force accumulation and explicit Euler integration.
//!
//! Forces for every atom are computed from the positions at the start of the
//! tick, then all atoms are integrated. Atom order therefore never changes
//! the outcome of a tick.

use glam::Vec2;

use crate::api::types::Bounds;
use crate::components::atom::{expected_bond_distance, Atom};
use crate::core::arena::Arena;
use crate::core::classify::{electronegativity_delta, IONIC_THRESHOLD, POLAR_THRESHOLD};
use crate::core::regime::RegimeConstants;

/// Attraction multiplier for a pair, tiered by electronegativity difference.
pub fn attraction_tier(delta: f32) -> f32 {
    if delta > IONIC_THRESHOLD {
        1.5
    } else if delta > POLAR_THRESHOLD {
        1.0
    } else {
        0.5
    }
}

/// Force exerted on `atom` by `other`.
///
/// The net scalar multiplies the raw displacement, not a unit vector, so the
/// magnitude also grows with separation. Coincident atoms exert nothing.
pub fn pair_force(atom: &Atom, other: &Atom, constants: &RegimeConstants) -> Vec2 {
    let delta = other.pos - atom.pos;
    let dist = delta.length();
    if dist <= 0.0 || !dist.is_finite() {
        return Vec2::ZERO;
    }

    let mut repulsion = constants.repulsion_scale / (dist * dist);
    let mut attraction =
        constants.attraction_scale * attraction_tier(electronegativity_delta(&atom.element, &other.element));

    // Overlap: push apart regardless of bonding state.
    if dist < expected_bond_distance(atom, other) {
        repulsion *= 2.0;
        attraction = 0.0;
    }

    delta * (attraction - repulsion)
}

/// Spring pull toward the centre of the simulation area.
/// Equivalent to the unit direction scaled by distance, factor and multiplier.
pub fn central_force(atom: &Atom, center: Vec2, constants: &RegimeConstants, multiplier: f32) -> Vec2 {
    (center - atom.pos) * (constants.central_attraction * multiplier)
}

/// Total force on every atom, indexed like `atoms`.
pub fn compute_forces(
    atoms: &[Atom],
    center: Vec2,
    constants: &RegimeConstants,
    central_multiplier: f32,
) -> Vec<Vec2> {
    atoms
        .iter()
        .enumerate()
        .map(|(i, atom)| {
            let mut total = central_force(atom, center, constants, central_multiplier);
            for (j, other) in atoms.iter().enumerate() {
                if i != j {
                    total += pair_force(atom, other, constants);
                }
            }
            total
        })
        .collect()
}

/// Clamp an atom inside the walls, reversing the velocity component that crossed.
/// Walls are inset by the atom's visual radius.
pub fn reflect_at_walls(atom: &mut Atom, bounds: &Bounds) {
    let r = atom.visual_radius();
    let (lo, hi) = (bounds.min + Vec2::splat(r), bounds.max - Vec2::splat(r));

    if atom.pos.x < lo.x {
        atom.pos.x = lo.x;
        atom.vel.x = -atom.vel.x;
    } else if atom.pos.x > hi.x {
        atom.pos.x = hi.x;
        atom.vel.x = -atom.vel.x;
    }

    if atom.pos.y < lo.y {
        atom.pos.y = lo.y;
        atom.vel.y = -atom.vel.y;
    } else if atom.pos.y > hi.y {
        atom.pos.y = hi.y;
        atom.vel.y = -atom.vel.y;
    }
}

/// Apply precomputed forces: accelerate, damp, move, then bounce off walls.
pub fn integrate(atoms: &mut [Atom], forces: &[Vec2], constants: &RegimeConstants, bounds: &Bounds) {
    for (atom, &force) in atoms.iter_mut().zip(forces) {
        let mass = atom.mass();
        atom.vel = (atom.vel + force / mass) * constants.damping;
        atom.pos += atom.vel;
        reflect_at_walls(atom, bounds);
    }
}

/// Advance all atoms by one tick.
pub fn advance(arena: &mut Arena, bounds: &Bounds, constants: &RegimeConstants, central_multiplier: f32) {
    if arena.is_empty() {
        return;
    }
    let forces = compute_forces(arena.atoms(), bounds.center(), constants, central_multiplier);
    integrate(arena.atoms_mut(), &forces, constants, bounds);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::AtomId;
    use crate::assets::elements::ElementCatalog;
    use crate::core::regime::EnvironmentRegime;

    fn atom(symbol: &str, x: f32, y: f32) -> Atom {
        let catalog = ElementCatalog::load().unwrap();
        Atom::new(AtomId(0), catalog.get(symbol).unwrap().clone(), Vec2::new(x, y))
    }

    fn ideal() -> RegimeConstants {
        EnvironmentRegime::Ideal.constants()
    }

    #[test]
    fn tiers() {
        assert_eq!(attraction_tier(2.23), 1.5);
        assert_eq!(attraction_tier(1.24), 1.0);
        assert_eq!(attraction_tier(0.0), 0.5);
    }

    #[test]
    fn force_scales_raw_displacement() {
        // H-O: Δ = 1.24 → tier 1.0. At d = 100: 0.01 - 10/100² = 0.009
        let h = atom("H", 0.0, 0.0);
        let o = atom("O", 100.0, 0.0);
        let f = pair_force(&h, &o, &ideal());
        assert!((f.x - 0.9).abs() < 1e-4, "force was {:?}", f);
        assert!(f.y.abs() < 1e-6);
    }

    #[test]
    fn overlap_repels_without_attraction() {
        // Expected H-O distance is 50.5
        let h = atom("H", 0.0, 0.0);
        let o = atom("O", 40.0, 0.0);
        let f = pair_force(&h, &o, &ideal());
        let expected = 40.0 * -(2.0 * 10.0 / (40.0 * 40.0));
        assert!((f.x - expected).abs() < 1e-4, "force was {:?}", f);
        assert!(f.x < 0.0, "hydrogen should be pushed away from oxygen");
    }

    #[test]
    fn pair_forces_are_opposite() {
        let c = atom("C", 10.0, 20.0);
        let n = atom("N", 150.0, -40.0);
        let f_cn = pair_force(&c, &n, &ideal());
        let f_nc = pair_force(&n, &c, &ideal());
        assert!((f_cn + f_nc).length() < 1e-4);
    }

    #[test]
    fn coincident_atoms_exert_nothing() {
        let a = atom("H", 5.0, 5.0);
        let b = atom("H", 5.0, 5.0);
        assert_eq!(pair_force(&a, &b, &ideal()), Vec2::ZERO);
    }

    #[test]
    fn central_force_points_to_center() {
        let a = atom("C", 100.0, 300.0);
        let f = central_force(&a, Vec2::new(400.0, 300.0), &ideal(), 2.0);
        assert!((f.x - 300.0 * 0.001 * 2.0).abs() < 1e-5);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn wall_reflection_clamps_and_reverses() {
        let bounds = Bounds::from_size(800.0, 600.0);
        let mut a = atom("O", -10.0, 700.0);
        a.vel = Vec2::new(-3.0, 4.0);
        reflect_at_walls(&mut a, &bounds);
        let r = a.visual_radius();
        assert_eq!(a.pos, Vec2::new(r, 600.0 - r));
        assert_eq!(a.vel, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn lone_atom_drifts_to_center() {
        let catalog = ElementCatalog::load().unwrap();
        let mut arena = Arena::new();
        arena.spawn(catalog.get("C").unwrap().clone(), Vec2::new(100.0, 100.0), 0.0);
        let bounds = Bounds::from_size(800.0, 600.0);

        let start = (arena.atoms()[0].pos - bounds.center()).length();
        for _ in 0..50 {
            advance(&mut arena, &bounds, &ideal(), 1.0);
        }
        let end = (arena.atoms()[0].pos - bounds.center()).length();
        assert!(end < start, "distance {} should shrink from {}", end, start);
    }

    #[test]
    fn snapshot_keeps_mirror_symmetry() {
        let catalog = ElementCatalog::load().unwrap();
        let mut arena = Arena::new();
        let n = catalog.get("N").unwrap().clone();
        arena.spawn(n.clone(), Vec2::new(300.0, 300.0), 0.0);
        arena.spawn(n, Vec2::new(500.0, 300.0), 0.0);
        let bounds = Bounds::from_size(800.0, 600.0);

        for _ in 0..10 {
            advance(&mut arena, &bounds, &ideal(), 1.0);
            let (a, b) = (arena.atoms()[0].pos, arena.atoms()[1].pos);
            assert!((a.x + b.x - 800.0).abs() < 1e-2, "{:?} / {:?}", a, b);
            assert!((a.y - b.y).abs() < 1e-4);
        }
    }
}

use glam::Vec2;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::api::types::AtomId;
use crate::assets::elements::ElementSpec;

/// A point-mass atom.
///
/// Bond membership is owned by the arena: only `Arena::link` and
/// `Arena::unlink` touch `bonds` and `bond_count`, keeping both sides of
/// every bond in sync.
#[derive(Debug, Clone)]
pub struct Atom {
    /// Unique identifier.
    pub id: AtomId,
    /// Shared, immutable element data.
    pub element: Arc<ElementSpec>,
    /// Position in world space.
    pub pos: Vec2,
    /// Velocity in world units per tick.
    pub vel: Vec2,
    /// Starting angle of the drawn electron shell. Cosmetic only.
    pub electron_phase: f32,
    pub(crate) bonds: BTreeSet<AtomId>,
    pub(crate) bond_count: usize,
}

impl Atom {
    /// Create an unbonded atom at rest.
    pub fn new(id: AtomId, element: Arc<ElementSpec>, pos: Vec2) -> Self {
        Self {
            id,
            element,
            pos,
            vel: Vec2::ZERO,
            electron_phase: 0.0,
            bonds: BTreeSet::new(),
            bond_count: 0,
        }
    }

    pub fn with_electron_phase(mut self, phase: f32) -> Self {
        self.electron_phase = phase;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.element.symbol
    }

    pub fn mass(&self) -> f32 {
        self.element.mass()
    }

    pub fn visual_radius(&self) -> f32 {
        self.element.visual_radius()
    }

    /// Ids of bonded partners, ascending.
    pub fn bonds(&self) -> &BTreeSet<AtomId> {
        &self.bonds
    }

    pub fn bond_count(&self) -> usize {
        self.bond_count
    }

    pub fn is_bonded_to(&self, other: AtomId) -> bool {
        self.bonds.contains(&other)
    }

    /// Whether another bond fits within the element's largest valence.
    pub fn has_capacity(&self) -> bool {
        self.bond_count < self.element.max_bonds()
    }
}

/// Reference separation for a pair: the mean of both atomic radii.
pub fn expected_bond_distance(a: &Atom, b: &Atom) -> f32 {
    (a.element.atomic_radius + b.element.atomic_radius) * 0.5
}

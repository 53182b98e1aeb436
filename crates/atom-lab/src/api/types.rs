use glam::Vec2;
use serde::Serialize;

use crate::core::classify::BondKind;
use crate::core::regime::EnvironmentRegime;

/// Unique identifier for an atom in the arena. Stable until the arena is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AtomId(pub u32);

/// Axis-aligned simulation area in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Area anchored at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Zero, negative or non-finite area. Commands given such bounds are declined.
    pub fn is_degenerate(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0)
    }
}

/// Operating mode of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    Free,
    Guided,
}

/// Something that happened during a command or tick.
/// Accumulated until the caller drains them with `Simulation::take_events`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimEvent {
    AtomAdded { id: AtomId, symbol: String },
    BondFormed { a: AtomId, b: AtomId, kind: BondKind },
    BondBroken { a: AtomId, b: AtomId },
    RegimeChanged(EnvironmentRegime),
    TargetSelected { name: String },
    CompositionComplete,
    CompositionIncomplete,
    /// The guided target has been fully assembled.
    MoleculeFormed { name: String },
    Cleared,
}

//! Environment regimes: named bundles of force-model constants.

use serde::{Deserialize, Serialize};

/// Force-model constants for one regime. Immutable once selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeConstants {
    /// Scale applied to the electronegativity-tiered attraction.
    pub attraction_scale: f32,
    /// Numerator of the inverse-square repulsion.
    pub repulsion_scale: f32,
    /// Velocity multiplier applied every tick (0-1).
    pub damping: f32,
    /// Slack added to the expected bond distance when forming bonds.
    pub bond_threshold: f32,
    /// Spring constant pulling atoms toward the area centroid.
    pub central_attraction: f32,
    /// A bond breaks once stretched beyond expected distance times this factor.
    pub bond_break_factor: f32,
}

/// The physical "phase" of the force model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnvironmentRegime {
    #[default]
    Ideal,
    Real,
    /// Favors settling into a final bonded shape.
    Stable,
}

impl EnvironmentRegime {
    pub const ALL: [EnvironmentRegime; 3] = [Self::Ideal, Self::Real, Self::Stable];

    pub fn constants(self) -> RegimeConstants {
        match self {
            Self::Ideal => RegimeConstants {
                attraction_scale: 0.01,
                repulsion_scale: 10.0,
                damping: 0.9,
                bond_threshold: 20.0,
                central_attraction: 0.001,
                bond_break_factor: 1.5,
            },
            Self::Real => RegimeConstants {
                attraction_scale: 0.008,
                repulsion_scale: 15.0,
                damping: 0.95,
                bond_threshold: 12.0,
                central_attraction: 0.0005,
                bond_break_factor: 1.3,
            },
            Self::Stable => RegimeConstants {
                attraction_scale: 0.015,
                repulsion_scale: 6.0,
                damping: 0.85,
                bond_threshold: 25.0,
                central_attraction: 0.001,
                bond_break_factor: 2.0,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ideal => "ideal",
            Self::Real => "real",
            Self::Stable => "stable",
        }
    }

    /// Numeric code used across the wasm boundary.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u32 {
        match self {
            Self::Ideal => 0,
            Self::Real => 1,
            Self::Stable => 2,
        }
    }
}

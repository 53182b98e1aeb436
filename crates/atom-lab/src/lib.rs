pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::sim::Simulation;
pub use api::config::SimConfig;
pub use api::error::{Error, Result};
pub use api::guided::{GuidedController, GuidedState, GuidedStatus};
pub use api::types::{AtomId, Bounds, Mode, SimEvent};
pub use assets::elements::{ElementCatalog, ElementSpec};
pub use assets::molecules::{Composition, MoleculeCatalog, TargetMolecule, hill_formula, parse_formula};
pub use components::atom::Atom;
pub use core::arena::Arena;
pub use core::classify::{BondKind, ElementCategory, classify};
pub use core::regime::{EnvironmentRegime, RegimeConstants};
pub use core::rng::{RandomSource, Rng};
pub use core::time::FixedTimestep;
pub use input::commands::{CommandQueue, SimCommand};
pub use bridge::snapshot::{AtomInstance, SnapshotBuffer};
pub use systems::molecules::Molecule;

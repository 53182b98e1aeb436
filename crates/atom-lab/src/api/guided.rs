//! Guided mode: assemble a randomly chosen target molecule.
//!
//! The controller only tracks target and progress. The owning `Simulation`
//! applies its decisions (arena reset, regime switches, central bias).

use serde::Serialize;

use crate::assets::molecules::{Composition, MoleculeCatalog, TargetMolecule};
use crate::core::arena::Arena;
use crate::core::rng::RandomSource;
use crate::systems::molecules::is_fully_assembled;

/// Progress through one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GuidedState {
    SelectingTarget,
    Assembling,
    /// Every required atom is present; waiting for them to bond into one molecule.
    CompositionComplete,
    /// Terminal for the current target.
    MoleculeFormed,
}

/// Read-only progress summary for collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GuidedStatus {
    pub composition_complete: bool,
    pub formed: bool,
}

/// Change in composition completeness detected on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionChange {
    Completed,
    Lost,
}

/// Whether `counts` holds at least the required number of every element in `target`.
pub fn composition_satisfied(target: &TargetMolecule, counts: &Composition) -> bool {
    target
        .composition
        .iter()
        .all(|(symbol, &required)| counts.get(symbol).copied().unwrap_or(0) >= required)
}

pub struct GuidedController {
    target: Option<TargetMolecule>,
    state: GuidedState,
    composition_complete: bool,
    formed: bool,
}

impl GuidedController {
    pub fn new() -> Self {
        Self {
            target: None,
            state: GuidedState::SelectingTarget,
            composition_complete: false,
            formed: false,
        }
    }

    /// Draw a random target and reset progress. `None` if the catalog is empty.
    pub fn select_target(
        &mut self,
        catalog: &MoleculeCatalog,
        rng: &mut dyn RandomSource,
    ) -> Option<&TargetMolecule> {
        let picked = catalog.pick(rng).cloned();
        self.begin(picked)
    }

    /// Move to a new target, avoiding the current one when the catalog allows it.
    pub fn advance(
        &mut self,
        catalog: &MoleculeCatalog,
        rng: &mut dyn RandomSource,
    ) -> Option<&TargetMolecule> {
        let current = self.target.as_ref().map(|t| t.name.clone());
        let others: Vec<&TargetMolecule> = catalog
            .iter()
            .filter(|m| Some(&m.name) != current.as_ref())
            .collect();

        if others.is_empty() {
            return self.select_target(catalog, rng);
        }
        let idx = rng.next_int(others.len() as u32) as usize;
        let picked = others.get(idx).map(|m| (*m).clone());
        self.begin(picked)
    }

    fn begin(&mut self, target: Option<TargetMolecule>) -> Option<&TargetMolecule> {
        self.composition_complete = false;
        self.formed = false;
        self.state = if target.is_some() {
            GuidedState::Assembling
        } else {
            GuidedState::SelectingTarget
        };
        self.target = target;
        self.target.as_ref()
    }

    pub fn target(&self) -> Option<&TargetMolecule> {
        self.target.as_ref()
    }

    pub fn state(&self) -> GuidedState {
        self.state
    }

    pub fn status(&self) -> GuidedStatus {
        GuidedStatus {
            composition_complete: self.composition_complete,
            formed: self.formed,
        }
    }

    /// Whether adding one more `symbol` atom moves toward the target.
    pub fn is_needed(&self, symbol: &str, counts: &Composition) -> bool {
        match &self.target {
            Some(target) if !self.formed => {
                target.required(symbol) > counts.get(symbol).copied().unwrap_or(0)
            }
            _ => false,
        }
    }

    /// Re-evaluate completeness from current per-element counts.
    /// Reports a change only on transitions; frozen once formed.
    pub fn update_composition(&mut self, counts: &Composition) -> Option<CompositionChange> {
        let target = self.target.as_ref()?;
        if self.formed {
            return None;
        }

        let complete = composition_satisfied(target, counts);
        if complete == self.composition_complete {
            return None;
        }
        self.composition_complete = complete;
        if complete {
            self.state = GuidedState::CompositionComplete;
            Some(CompositionChange::Completed)
        } else {
            self.state = GuidedState::Assembling;
            Some(CompositionChange::Lost)
        }
    }

    /// Check for the fully assembled target. Returns true exactly once per target.
    pub fn check_formed(&mut self, arena: &Arena) -> bool {
        if !self.composition_complete || self.formed {
            return false;
        }
        let Some(target) = &self.target else {
            return false;
        };
        if !is_fully_assembled(arena, target) {
            return false;
        }
        self.formed = true;
        self.state = GuidedState::MoleculeFormed;
        true
    }
}

impl Default for GuidedController {
    fn default() -> Self {
        Self::new()
    }
}

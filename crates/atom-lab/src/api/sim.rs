//! The simulation state and its command surface.
//!
//! One owned object holds the arena, the active regime and the guided
//! controller. Every mutation goes through a method here and must happen
//! between ticks; `step` runs one full tick to completion.

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::Vec2;

use crate::api::config::SimConfig;
use crate::api::error::{Error, Result};
use crate::api::guided::{CompositionChange, GuidedController, GuidedState, GuidedStatus};
use crate::api::types::{AtomId, Bounds, Mode, SimEvent};
use crate::assets::elements::{ElementCatalog, ElementSpec};
use crate::assets::molecules::{Composition, MoleculeCatalog, TargetMolecule};
use crate::components::atom::Atom;
use crate::core::arena::Arena;
use crate::core::regime::EnvironmentRegime;
use crate::core::rng::{RandomSource, Rng};
use crate::input::commands::SimCommand;
use crate::systems::molecules::{self, Molecule};
use crate::systems::{bonding, forces};

/// The chemistry simulation state and logic.
pub struct Simulation {
    elements: ElementCatalog,
    molecule_catalog: MoleculeCatalog,
    config: SimConfig,
    arena: Arena,
    regime: EnvironmentRegime,
    /// Bias on the central attraction; raised while guided.
    central_multiplier: f32,
    rng: Box<dyn RandomSource>,
    guided: Option<GuidedController>,
    /// Result of the most recent recognition pass.
    molecules: Vec<Molecule>,
    events: Vec<SimEvent>,
    ticks: u64,
}

impl Simulation {
    pub fn new(elements: ElementCatalog, molecule_catalog: MoleculeCatalog, config: SimConfig) -> Self {
        Self {
            elements,
            molecule_catalog,
            arena: Arena::with_capacity(config.max_atoms),
            regime: config.initial_regime,
            central_multiplier: 1.0,
            rng: Box::new(Rng::new(config.seed)),
            guided: None,
            molecules: Vec::new(),
            events: Vec::new(),
            ticks: 0,
            config,
        }
    }

    /// Build a simulation over the embedded element and molecule catalogs.
    pub fn with_defaults(config: SimConfig) -> Result<Self> {
        let elements = ElementCatalog::load()?;
        let molecule_catalog = MoleculeCatalog::load(&elements)?;
        Ok(Self::new(elements, molecule_catalog, config))
    }

    /// Replace the seeded generator, e.g. with a scripted source in tests.
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    // -- Queries --

    /// Atoms in arena order. Valid until the next command or `step`.
    pub fn atoms(&self) -> &[Atom] {
        self.arena.atoms()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.arena.get(id)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Molecules found by the last `step`.
    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    pub fn molecule_count(&self) -> usize {
        self.molecules.len()
    }

    /// Number of distinct bonds in the arena.
    pub fn bond_count(&self) -> usize {
        self.arena.bond_total()
    }

    pub fn element_counts(&self) -> Composition {
        self.arena.element_counts()
    }

    pub fn regime(&self) -> EnvironmentRegime {
        self.regime
    }

    pub fn central_multiplier(&self) -> f32 {
        self.central_multiplier
    }

    pub fn mode(&self) -> Mode {
        if self.guided.is_some() {
            Mode::Guided
        } else {
            Mode::Free
        }
    }

    pub fn elements(&self) -> &ElementCatalog {
        &self.elements
    }

    pub fn molecule_catalog(&self) -> &MoleculeCatalog {
        &self.molecule_catalog
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Ticks run since construction or the last `clear`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Events recorded since the last `take_events`.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Commands --

    /// Add an atom at a uniformly random position inside `bounds`.
    ///
    /// Declined (returns `None`) for degenerate bounds, unknown symbols, a
    /// full arena, or in guided mode when the element is not needed.
    pub fn add_atom(&mut self, symbol: &str, bounds: &Bounds) -> Option<AtomId> {
        if bounds.is_degenerate() {
            log::warn!("add_atom({}): degenerate bounds {:?}", symbol, bounds);
            return None;
        }
        let element = self.admit(symbol)?;
        let pos = Vec2::new(
            self.rng.range_f32(bounds.min.x, bounds.max.x),
            self.rng.range_f32(bounds.min.y, bounds.max.y),
        );
        Some(self.insert(element, pos))
    }

    /// Add an atom at an exact position. Same admission rules as `add_atom`.
    pub fn spawn_at(&mut self, symbol: &str, pos: Vec2) -> Option<AtomId> {
        let element = self.admit(symbol)?;
        Some(self.insert(element, pos))
    }

    fn admit(&self, symbol: &str) -> Option<Arc<ElementSpec>> {
        let Some(element) = self.elements.get(symbol) else {
            log::warn!("add_atom({}): unknown element", symbol);
            return None;
        };
        if self.arena.len() >= self.config.max_atoms {
            log::warn!("add_atom({}): arena full ({} atoms)", symbol, self.arena.len());
            return None;
        }
        if let Some(controller) = &self.guided {
            if !controller.is_needed(symbol, &self.arena.element_counts()) {
                log::warn!("add_atom({}): not needed for the current target", symbol);
                return None;
            }
        }
        Some(element.clone())
    }

    fn insert(&mut self, element: Arc<ElementSpec>, pos: Vec2) -> AtomId {
        let phase = self.rng.range_f32(0.0, TAU);
        let symbol = element.symbol.clone();
        let id = self.arena.spawn(element, pos, phase);
        log::debug!("atom {:?} ({}) added at {:?}", id, symbol, pos);
        self.events.push(SimEvent::AtomAdded { id, symbol });
        id
    }

    /// Swap the active constants. Atom state is untouched.
    pub fn set_environment(&mut self, regime: EnvironmentRegime) {
        if regime == self.regime {
            return;
        }
        log::info!("environment: {} -> {}", self.regime.name(), regime.name());
        self.regime = regime;
        self.events.push(SimEvent::RegimeChanged(regime));
    }

    /// Empty the arena and reset derived state. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.molecules.clear();
        self.ticks = 0;
        log::info!("arena cleared");
        self.events.push(SimEvent::Cleared);
    }

    /// Run one tick: guided composition check, forces and integration,
    /// break then form bonds, molecule recognition, guided match check.
    ///
    /// Returns false without doing anything when `bounds` is degenerate.
    pub fn step(&mut self, bounds: &Bounds) -> bool {
        if bounds.is_degenerate() {
            log::warn!("step: degenerate bounds {:?}", bounds);
            return false;
        }

        self.update_guided_composition();

        let constants = self.regime.constants();
        forces::advance(&mut self.arena, bounds, &constants, self.central_multiplier);

        let changes = bonding::resolve(&mut self.arena, &constants);
        for (a, b) in changes.broken {
            self.events.push(SimEvent::BondBroken { a, b });
        }
        for bond in changes.formed {
            self.events.push(SimEvent::BondFormed {
                a: bond.a,
                b: bond.b,
                kind: bond.kind,
            });
        }
        debug_assert_eq!(self.arena.check_invariants(), Ok(()));

        self.molecules = molecules::recognize(&self.arena, &self.molecule_catalog);
        self.check_guided_formed();

        self.ticks += 1;
        true
    }

    /// Apply a queued command.
    pub fn apply(&mut self, command: SimCommand, bounds: &Bounds) {
        match command {
            SimCommand::AddAtom { symbol } => {
                self.add_atom(&symbol, bounds);
            }
            SimCommand::Clear => self.clear(),
            SimCommand::SetEnvironment(regime) => self.set_environment(regime),
            SimCommand::EnterGuided => {
                if let Err(e) = self.enter_guided() {
                    log::warn!("enter_guided: {}", e);
                }
            }
            SimCommand::EnterFree => self.enter_free(),
            SimCommand::SelectTarget => {
                self.select_target();
            }
            SimCommand::Advance => {
                self.advance();
            }
        }
    }

    // -- Guided mode --

    /// Switch to guided mode and draw the first target.
    pub fn enter_guided(&mut self) -> Result<()> {
        if self.molecule_catalog.is_empty() {
            return Err(Error::EmptyCatalog("molecule"));
        }
        self.guided = Some(GuidedController::new());
        self.select_target();
        Ok(())
    }

    /// Leave guided mode. Atoms stay; the central bias returns to normal.
    pub fn enter_free(&mut self) {
        if self.guided.take().is_some() {
            log::info!("guided mode off");
        }
        self.central_multiplier = 1.0;
    }

    /// Draw a random target and start over. `None` outside guided mode.
    pub fn select_target(&mut self) -> Option<&TargetMolecule> {
        self.start_target(false)
    }

    /// Move to a different target and start over. `None` outside guided mode.
    pub fn advance(&mut self) -> Option<&TargetMolecule> {
        self.start_target(true)
    }

    fn start_target(&mut self, advance: bool) -> Option<&TargetMolecule> {
        let Some(controller) = self.guided.as_mut() else {
            log::warn!("target selection ignored: not in guided mode");
            return None;
        };
        let picked = if advance {
            controller.advance(&self.molecule_catalog, self.rng.as_mut())
        } else {
            controller.select_target(&self.molecule_catalog, self.rng.as_mut())
        };
        let name = picked.map(|t| t.name.clone())?;

        self.clear();
        self.set_environment(EnvironmentRegime::Ideal);
        self.central_multiplier = self.config.guided_central_multiplier;
        log::info!("guided target: {}", name);
        self.events.push(SimEvent::TargetSelected { name });
        self.current_target()
    }

    pub fn current_target(&self) -> Option<&TargetMolecule> {
        self.guided.as_ref().and_then(|c| c.target())
    }

    /// Guided progress; all false in free mode.
    pub fn status(&self) -> GuidedStatus {
        self.guided.as_ref().map(|c| c.status()).unwrap_or_default()
    }

    pub fn guided_state(&self) -> Option<GuidedState> {
        self.guided.as_ref().map(|c| c.state())
    }

    fn update_guided_composition(&mut self) {
        let counts = self.arena.element_counts();
        let change = match self.guided.as_mut() {
            Some(controller) => controller.update_composition(&counts),
            None => return,
        };
        match change {
            Some(CompositionChange::Completed) => {
                log::info!("composition complete");
                self.events.push(SimEvent::CompositionComplete);
                self.set_environment(EnvironmentRegime::Stable);
            }
            Some(CompositionChange::Lost) => {
                log::info!("composition incomplete");
                self.events.push(SimEvent::CompositionIncomplete);
                self.set_environment(EnvironmentRegime::Ideal);
            }
            None => {}
        }
    }

    fn check_guided_formed(&mut self) {
        let arena = &self.arena;
        let formed = self
            .guided
            .as_mut()
            .is_some_and(|controller| controller.check_formed(arena));
        if !formed {
            return;
        }
        let name = self
            .current_target()
            .map(|t| t.name.clone())
            .unwrap_or_default();
        log::info!("molecule formed: {}", name);
        self.events.push(SimEvent::MoleculeFormed { name });
    }
}

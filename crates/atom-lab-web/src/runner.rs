use atom_lab::{
    Bounds, CommandQueue, FixedTimestep, GuidedStatus, Mode, SimCommand, SimConfig, SimEvent,
    Simulation, SnapshotBuffer,
};

/// Drives a `Simulation` from the host's frame loop.
///
/// Commands pushed between frames are applied before the next tick, so no
/// mutation ever lands in the middle of a tick. The snapshot buffer is
/// rebuilt once per frame for pointer reads.
pub struct SimRunner {
    sim: Simulation,
    commands: CommandQueue,
    timestep: FixedTimestep,
    bounds: Bounds,
    snapshot: SnapshotBuffer,
    /// Events produced during the last frame.
    frame_events: Vec<SimEvent>,
}

impl SimRunner {
    pub fn new(sim: Simulation) -> Self {
        let config = sim.config().clone();
        let snapshot = SnapshotBuffer::with_capacity(config.max_atoms);
        Self {
            timestep: FixedTimestep::new(config.tick_interval),
            bounds: config.world_bounds(),
            sim,
            commands: CommandQueue::new(),
            snapshot,
            frame_events: Vec::new(),
        }
    }

    /// Build a runner over the embedded catalogs.
    pub fn with_config(config: SimConfig) -> atom_lab::Result<Self> {
        Ok(Self::new(Simulation::with_defaults(config)?))
    }

    /// Queue a command for the next frame.
    pub fn push(&mut self, command: SimCommand) {
        self.commands.push(command);
    }

    /// Resize the simulation area. Takes effect on the next tick.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Run one frame: apply queued commands, run the ticks that fit in
    /// `frame_dt`, then refresh the snapshot. Returns the number of ticks run.
    pub fn tick(&mut self, frame_dt: f32) -> u32 {
        for command in self.commands.drain() {
            self.sim.apply(command, &self.bounds);
        }

        let steps = self.timestep.accumulate(frame_dt);
        let mut ran = 0;
        for _ in 0..steps {
            if self.sim.step(&self.bounds) {
                ran += 1;
            }
        }

        self.frame_events = self.sim.take_events();
        self.snapshot.rebuild(self.sim.atoms());
        self.snapshot.write_events(&self.frame_events);
        ran
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn frame_events(&self) -> &[SimEvent] {
        &self.frame_events
    }

    // ---- Pointer accessors for host reads ----

    pub fn atoms_ptr(&self) -> *const f32 {
        self.snapshot.instances_ptr()
    }

    pub fn atom_count(&self) -> u32 {
        self.snapshot.instance_count()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.snapshot.events_ptr()
    }

    pub fn event_count(&self) -> u32 {
        self.snapshot.event_count()
    }

    // ---- Scalar accessors ----

    pub fn bond_count(&self) -> u32 {
        self.sim.bond_count() as u32
    }

    pub fn molecule_count(&self) -> u32 {
        self.sim.molecule_count() as u32
    }

    pub fn regime_code(&self) -> u32 {
        self.sim.regime().code()
    }

    pub fn is_guided(&self) -> bool {
        self.sim.mode() == Mode::Guided
    }

    pub fn status(&self) -> GuidedStatus {
        self.sim.status()
    }

    pub fn target_name(&self) -> Option<String> {
        self.sim.current_target().map(|t| t.name.clone())
    }

    pub fn target_formula(&self) -> Option<String> {
        self.sim.current_target().map(|t| t.formula.clone())
    }

    /// Names of the molecules currently present, unnamed ones as formulas.
    pub fn molecule_labels(&self) -> Vec<String> {
        self.sim
            .molecules()
            .iter()
            .map(|m| m.name.clone().unwrap_or_else(|| m.formula()))
            .collect()
    }

    pub fn world_width(&self) -> f32 {
        self.bounds.width()
    }

    pub fn world_height(&self) -> f32 {
        self.bounds.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atom_lab::EnvironmentRegime;

    fn runner() -> SimRunner {
        SimRunner::with_config(SimConfig::default()).unwrap()
    }

    #[test]
    fn commands_land_before_ticks() {
        let mut r = runner();
        r.push(SimCommand::AddAtom { symbol: "H".into() });
        r.push(SimCommand::AddAtom { symbol: "O".into() });
        assert_eq!(r.atom_count(), 0);

        // Less than one tick interval: commands apply, no tick runs.
        assert_eq!(r.tick(0.05), 0);
        assert_eq!(r.atom_count(), 2);
        assert_eq!(r.sim().ticks(), 0);

        assert_eq!(r.tick(0.05), 1);
        assert_eq!(r.sim().ticks(), 1);
    }

    #[test]
    fn snapshot_tracks_atoms() {
        let mut r = runner();
        for symbol in ["C", "H", "H"] {
            r.push(SimCommand::AddAtom { symbol: symbol.into() });
        }
        r.tick(0.1);
        assert_eq!(r.atom_count(), 3);
        assert!(!r.atoms_ptr().is_null());

        r.push(SimCommand::Clear);
        r.tick(0.0);
        assert_eq!(r.atom_count(), 0);
    }

    #[test]
    fn frame_events_are_exposed() {
        let mut r = runner();
        r.push(SimCommand::SetEnvironment(EnvironmentRegime::Real));
        r.tick(0.0);
        assert_eq!(r.regime_code(), EnvironmentRegime::Real.code());
        assert_eq!(r.frame_events(), &[SimEvent::RegimeChanged(EnvironmentRegime::Real)]);
        assert_eq!(r.event_count(), 1);

        r.tick(0.0);
        assert_eq!(r.event_count(), 0);
    }

    #[test]
    fn guided_round_trip() {
        let mut r = runner();
        r.push(SimCommand::EnterGuided);
        r.tick(0.0);
        assert!(r.is_guided());
        assert!(r.target_name().is_some());
        assert!(r.target_formula().is_some());

        r.push(SimCommand::EnterFree);
        r.tick(0.0);
        assert!(!r.is_guided());
        assert!(r.target_name().is_none());
    }

    #[test]
    fn degenerate_bounds_stop_ticks() {
        let mut r = runner();
        r.push(SimCommand::AddAtom { symbol: "N".into() });
        r.tick(0.0);
        r.set_bounds(Bounds::from_size(0.0, 0.0));
        assert_eq!(r.tick(0.3), 0);
        assert_eq!(r.sim().ticks(), 0);
    }
}

use bytemuck::{Pod, Zeroable};

use crate::api::types::SimEvent;
use crate::components::atom::Atom;
use crate::core::classify::BondKind;

/// Per-atom render data exposed to the host renderer.
/// Must match the TypeScript reader: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct AtomInstance {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub atomic_number: f32,
    pub bond_count: f32,
    /// Drawn radius in world units.
    pub visual_radius: f32,
    /// Cosmetic orbit phase in radians.
    pub electron_phase: f32,
}

impl AtomInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_atom(atom: &Atom) -> Self {
        Self {
            x: atom.pos.x,
            y: atom.pos.y,
            vx: atom.vel.x,
            vy: atom.vel.y,
            atomic_number: atom.element.atomic_number as f32,
            bond_count: atom.bond_count() as f32,
            visual_radius: atom.visual_radius(),
            electron_phase: atom.electron_phase,
        }
    }
}

/// Floats per encoded event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Event kind codes written in the first float of an encoded event.
pub mod event_kind {
    pub const ATOM_ADDED: f32 = 1.0;
    pub const BOND_FORMED: f32 = 2.0;
    pub const BOND_BROKEN: f32 = 3.0;
    pub const REGIME_CHANGED: f32 = 4.0;
    pub const TARGET_SELECTED: f32 = 5.0;
    pub const COMPOSITION_COMPLETE: f32 = 6.0;
    pub const COMPOSITION_INCOMPLETE: f32 = 7.0;
    pub const MOLECULE_FORMED: f32 = 8.0;
    pub const CLEARED: f32 = 9.0;
}

fn bond_kind_code(kind: BondKind) -> f32 {
    match kind {
        BondKind::Metallic => 0.0,
        BondKind::Ionic => 1.0,
        BondKind::PolarCovalent => 2.0,
        BondKind::NonpolarCovalent => 3.0,
    }
}

/// Flatten an event into `[kind, a, b, c]`. Names travel separately through
/// the string getters, so only ids and codes are encoded here.
pub fn encode_event(event: &SimEvent) -> [f32; EVENT_FLOATS] {
    use event_kind::*;
    match event {
        SimEvent::AtomAdded { id, .. } => [ATOM_ADDED, id.0 as f32, 0.0, 0.0],
        SimEvent::BondFormed { a, b, kind } => [BOND_FORMED, a.0 as f32, b.0 as f32, bond_kind_code(*kind)],
        SimEvent::BondBroken { a, b } => [BOND_BROKEN, a.0 as f32, b.0 as f32, 0.0],
        SimEvent::RegimeChanged(regime) => [REGIME_CHANGED, regime.code() as f32, 0.0, 0.0],
        SimEvent::TargetSelected { .. } => [TARGET_SELECTED, 0.0, 0.0, 0.0],
        SimEvent::CompositionComplete => [COMPOSITION_COMPLETE, 0.0, 0.0, 0.0],
        SimEvent::CompositionIncomplete => [COMPOSITION_INCOMPLETE, 0.0, 0.0, 0.0],
        SimEvent::MoleculeFormed { .. } => [MOLECULE_FORMED, 0.0, 0.0, 0.0],
        SimEvent::Cleared => [CLEARED, 0.0, 0.0, 0.0],
    }
}

/// Flat per-frame snapshot the host reads through raw pointers.
pub struct SnapshotBuffer {
    instances: Vec<AtomInstance>,
    events: Vec<f32>,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(max_atoms: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_atoms),
            events: Vec::with_capacity(64 * EVENT_FLOATS),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.events.clear();
    }

    pub fn push(&mut self, instance: AtomInstance) {
        self.instances.push(instance);
    }

    /// Replace the instance data with the current atoms, in arena order.
    pub fn rebuild(&mut self, atoms: &[Atom]) {
        self.instances.clear();
        self.instances.extend(atoms.iter().map(AtomInstance::from_atom));
    }

    /// Replace the encoded event data.
    pub fn write_events(&mut self, events: &[SimEvent]) {
        self.events.clear();
        for event in events {
            self.events.extend_from_slice(&encode_event(event));
        }
    }

    pub fn instances(&self) -> &[AtomInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data viewed as flat floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn event_count(&self) -> u32 {
        (self.events.len() / EVENT_FLOATS) as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr()
    }
}

impl Default for SnapshotBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::AtomId;
    use crate::assets::elements::ElementCatalog;
    use crate::core::regime::EnvironmentRegime;
    use glam::Vec2;

    #[test]
    fn instance_layout() {
        assert_eq!(std::mem::size_of::<AtomInstance>(), AtomInstance::STRIDE_BYTES);
    }

    #[test]
    fn rebuild_mirrors_atoms() {
        let catalog = ElementCatalog::load().unwrap();
        let oxygen = catalog.get("O").unwrap().clone();
        let mut atom = Atom::new(AtomId(0), oxygen, Vec2::new(12.0, 34.0)).with_electron_phase(1.5);
        atom.vel = Vec2::new(-1.0, 2.0);

        let mut buffer = SnapshotBuffer::new();
        buffer.rebuild(std::slice::from_ref(&atom));
        assert_eq!(buffer.instance_count(), 1);
        assert_eq!(
            buffer.as_floats(),
            &[12.0, 34.0, -1.0, 2.0, 8.0, 0.0, atom.visual_radius(), 1.5]
        );

        buffer.rebuild(&[]);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn events_encode_ids_and_codes() {
        let mut buffer = SnapshotBuffer::new();
        buffer.write_events(&[
            SimEvent::BondFormed { a: AtomId(3), b: AtomId(5), kind: BondKind::PolarCovalent },
            SimEvent::RegimeChanged(EnvironmentRegime::Stable),
            SimEvent::Cleared,
        ]);
        assert_eq!(buffer.event_count(), 3);
        assert_eq!(encode_event(&SimEvent::BondBroken { a: AtomId(1), b: AtomId(2) }), [
            event_kind::BOND_BROKEN,
            1.0,
            2.0,
            0.0
        ]);
        assert_eq!(
            encode_event(&SimEvent::RegimeChanged(EnvironmentRegime::Stable))[1],
            EnvironmentRegime::Stable.code() as f32
        );
    }
}

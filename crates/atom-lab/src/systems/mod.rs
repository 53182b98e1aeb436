// systems/mod.rs
//
// Per-tick passes over the arena, run in order by `Simulation::step`:
// forces and integration, bond break/form, molecule recognition.

pub mod bonding;
pub mod forces;
pub mod molecules;

use crate::core::regime::EnvironmentRegime;

/// A mutation request from outside the simulation.
/// Queued while a frame is in flight and applied strictly between ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    /// Add one atom of the given element at a random position.
    AddAtom { symbol: String },
    /// Empty the arena.
    Clear,
    /// Swap the active regime constants.
    SetEnvironment(EnvironmentRegime),
    /// Switch to guided mode and pick a target.
    EnterGuided,
    /// Leave guided mode, keeping current atoms.
    EnterFree,
    /// Pick a fresh random target (guided mode only).
    SelectTarget,
    /// Move on to a different target (guided mode only).
    Advance,
}

/// A queue of pending commands.
/// The host pushes commands at any time; the driver drains them before each tick.
pub struct CommandQueue {
    commands: Vec<SimCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
        }
    }

    /// Push a new command (called from JS via wasm-bindgen).
    pub fn push(&mut self, command: SimCommand) {
        self.commands.push(command);
    }

    /// Drain all pending commands in arrival order.
    pub fn drain(&mut self) -> Vec<SimCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Iterate over pending commands without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &SimCommand> {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

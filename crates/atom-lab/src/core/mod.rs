pub mod arena;
pub mod classify;
pub mod regime;
pub mod rng;
pub mod time;

pub mod runner;

pub use runner::SimRunner;

use std::cell::RefCell;

use atom_lab::{EnvironmentRegime, SimCommand, SimConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Before `sim_init` every export is a
/// no-op returning the default value.
fn with_runner<R: Default>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            web_sys::console::warn_1(&"atom-lab: not initialized, call sim_init() first".into());
            R::default()
        }
    })
}

fn push(command: SimCommand) {
    with_runner(|r| r.push(command));
}

fn init_with(config: SimConfig) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = SimRunner::with_config(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("atom-lab: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn sim_init(seed: u32) -> Result<(), JsValue> {
    init_with(SimConfig::default().with_seed(seed as u64))
}

/// Initialize from a JSON config; missing fields take defaults.
#[wasm_bindgen]
pub fn sim_init_with_config(json: &str) -> Result<(), JsValue> {
    let config = SimConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    init_with(config)
}

/// Advance by one frame. Returns the number of ticks run.
#[wasm_bindgen]
pub fn sim_tick(dt: f32) -> u32 {
    with_runner(|r| r.tick(dt))
}

#[wasm_bindgen]
pub fn sim_set_bounds(width: f32, height: f32) {
    with_runner(|r| r.set_bounds(atom_lab::Bounds::from_size(width, height)));
}

// ---- Commands (applied before the next tick) ----

#[wasm_bindgen]
pub fn sim_add_atom(symbol: &str) {
    push(SimCommand::AddAtom { symbol: symbol.to_string() });
}

#[wasm_bindgen]
pub fn sim_clear() {
    push(SimCommand::Clear);
}

/// 0 = Ideal, 1 = Real, 2 = Stable. Unknown codes are ignored.
#[wasm_bindgen]
pub fn sim_set_environment(code: u32) {
    match EnvironmentRegime::from_code(code) {
        Some(regime) => push(SimCommand::SetEnvironment(regime)),
        None => log::warn!("sim_set_environment: unknown regime code {}", code),
    }
}

#[wasm_bindgen]
pub fn sim_enter_guided() {
    push(SimCommand::EnterGuided);
}

#[wasm_bindgen]
pub fn sim_enter_free() {
    push(SimCommand::EnterFree);
}

#[wasm_bindgen]
pub fn sim_select_target() {
    push(SimCommand::SelectTarget);
}

#[wasm_bindgen]
pub fn sim_advance() {
    push(SimCommand::Advance);
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_atoms_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.atoms_ptr())
    })
}

#[wasm_bindgen]
pub fn get_atom_count() -> u32 {
    with_runner(|r| r.atom_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.events_ptr())
    })
}

#[wasm_bindgen]
pub fn get_event_count() -> u32 {
    with_runner(|r| r.event_count())
}

#[wasm_bindgen]
pub fn get_bond_count() -> u32 {
    with_runner(|r| r.bond_count())
}

#[wasm_bindgen]
pub fn get_molecule_count() -> u32 {
    with_runner(|r| r.molecule_count())
}

#[wasm_bindgen]
pub fn get_molecule_labels() -> js_sys::Array {
    RUNNER.with(|cell| {
        cell.borrow().as_ref().map_or_else(js_sys::Array::new, |r| {
            r.molecule_labels()
                .into_iter()
                .map(|label| JsValue::from_str(&label))
                .collect::<js_sys::Array>()
        })
    })
}

#[wasm_bindgen]
pub fn get_environment() -> u32 {
    with_runner(|r| r.regime_code())
}

#[wasm_bindgen]
pub fn is_guided() -> bool {
    with_runner(|r| r.is_guided())
}

#[wasm_bindgen]
pub fn get_target_name() -> Option<String> {
    with_runner(|r| r.target_name())
}

#[wasm_bindgen]
pub fn get_target_formula() -> Option<String> {
    with_runner(|r| r.target_formula())
}

#[wasm_bindgen]
pub fn is_composition_complete() -> bool {
    with_runner(|r| r.status().composition_complete)
}

#[wasm_bindgen]
pub fn is_molecule_formed() -> bool {
    with_runner(|r| r.status().formed)
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

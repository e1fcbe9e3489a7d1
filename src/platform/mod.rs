//! Platform abstraction layer
//!
//! The simulation never touches a display or an event loop. Hosts own the
//! frame scheduler and input capture, then hand both to
//! [`crate::Simulation::step`]:
//! - `web`: wasm-bindgen wrapper driven by `requestAnimationFrame`
//! - native: see the headless runner in `main.rs`

#[cfg(target_arch = "wasm32")]
pub mod web;

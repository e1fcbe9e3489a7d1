//! Browser host binding
//!
//! JavaScript owns the canvas, the key/mouse listeners and the animation
//! frame loop. Each frame it calls `step` and draws the returned JSON
//! snapshot. When `player_died` turns true it shows game over and constructs
//! a fresh `WebSimulation` to restart.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::sim::{GameEvent, Simulation, TickInput, Viewport};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // A second module instance finds the logger already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WebSimulation {
    sim: Simulation,
    died: bool,
}

#[wasm_bindgen]
impl WebSimulation {
    /// `seed` arrives as a JS number (e.g. `Date.now()`)
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: f64, tuning_json: Option<String>) -> WebSimulation {
        let tuning = Tuning::load_or_default(tuning_json.as_deref());
        WebSimulation {
            sim: Simulation::with_tuning(Viewport::new(width, height), seed as u64, tuning),
            died: false,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.sim.resize(Viewport::new(width, height));
    }

    /// Advance one frame; returns the render snapshot as JSON
    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &mut self,
        elapsed: f32,
        up: bool,
        down: bool,
        left: bool,
        right: bool,
        fire_x: Option<f32>,
        fire_y: Option<f32>,
        select_x: Option<f32>,
        select_y: Option<f32>,
    ) -> String {
        let input = TickInput {
            up,
            down,
            left,
            right,
            fire_at: fire_x.zip(fire_y).map(|(x, y)| Vec2::new(x, y)),
            select_at: select_x.zip(select_y).map(|(x, y)| Vec2::new(x, y)),
        };
        let snapshot = self.sim.step(elapsed, &input);

        for event in self.sim.drain_events() {
            if matches!(event, GameEvent::PlayerDied { .. }) {
                self.died = true;
            }
        }

        snapshot.to_json().unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {e}");
            String::from("{}")
        })
    }

    /// Set once the run has ended; the page should restart with a new instance
    pub fn player_died(&self) -> bool {
        self.died
    }
}

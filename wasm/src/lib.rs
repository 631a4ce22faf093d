use serde::Serialize;
use wasm_bindgen::prelude::*;

use territory_core::{default_config, Intent, Match, MatchConfig};

/// Install panic hook so WASM panics show in browser console instead of silently freezing.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Standings row for the HUD.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsStanding {
    agent: usize,
    color: String,
    cells: u32,
    is_human: bool,
}

#[wasm_bindgen]
pub struct WasmMatch {
    inner: Match,
}

#[wasm_bindgen]
impl WasmMatch {
    /// Create a match from config JSON. Missing fields take their defaults:
    /// { seed, grid_size, npc_count, difficulty: "normal"|"insane", human_color: "#RRGGBB", duration_secs, cheats }
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmMatch, JsError> {
        let config: MatchConfig = serde_json::from_str(config_json)?;
        Ok(WasmMatch {
            inner: Match::new(config)?,
        })
    }

    /// Default 32×32 single-NPC match.
    pub fn with_seed(seed: u32) -> Result<WasmMatch, JsError> {
        Ok(WasmMatch {
            inner: Match::new(default_config(seed))?,
        })
    }

    /// Advance one tick with the human's movement intent; returns that tick's events.
    pub fn tick(&mut self, vx: i8, vy: i8) -> Result<JsValue, JsError> {
        let events = self.inner.tick(Intent::new(vx as i32, vy as i32));
        to_js(&events)
    }

    /// Drive from the 1 Hz match clock. True when this call ends the match.
    pub fn countdown_second(&mut self) -> bool {
        self.inner.countdown_second()
    }

    /// Full render snapshot: grid, agents, power-ups, time, scores.
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.snapshot())
    }

    /// `{ "#RRGGBB": cells }` for every colour on the board.
    pub fn flatten_score(&self) -> Result<js_sys::Object, JsError> {
        let out = js_sys::Object::new();
        for (color, cells) in self.inner.state().grid.flatten_score() {
            js_sys::Reflect::set(
                &out,
                &JsValue::from_str(&color.to_string()),
                &JsValue::from(cells),
            )
            .map_err(|_| JsError::new("failed to build score object"))?;
        }
        Ok(out)
    }

    pub fn standings(&self) -> Result<JsValue, JsError> {
        let state = self.inner.state();
        let rows: Vec<JsStanding> = state
            .standings()
            .into_iter()
            .map(|s| JsStanding {
                agent: s.agent,
                color: s.color.to_string(),
                cells: s.cells,
                is_human: state.agents[s.agent].is_human(),
            })
            .collect();
        to_js(&rows)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.inner.set_paused(paused);
    }

    pub fn restart(&mut self) -> Result<(), JsError> {
        self.inner.restart()?;
        Ok(())
    }

    /// Clone the match (for lookahead previews).
    pub fn clone_match(&self) -> WasmMatch {
        WasmMatch {
            inner: self.inner.clone(),
        }
    }

    // Quick accessors
    pub fn tick_count(&self) -> u32 { self.inner.state().tick }
    pub fn remaining_secs(&self) -> u32 { self.inner.state().remaining_secs }
    pub fn match_over(&self) -> bool { self.inner.is_over() }
    pub fn is_paused(&self) -> bool { self.inner.is_paused() }
    /// Leading agent index, or -1 for an empty match.
    pub fn winner(&self) -> i32 {
        self.inner.state().winner().map_or(-1, |w| w as i32)
    }
}

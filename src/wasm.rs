//! Browser bindings: one `Animator` object per figure.

use crate::animation::{initialize_named, AnimatorState};
use crate::error::PoseError;
use crate::style::StyleJson;
use wasm_bindgen::prelude::*;

fn to_js_error(err: PoseError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Module entry point: panic messages and `log` output go to the console
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    crate::init_logging();
}

/// A point-light figure driven by the page's animation loop
#[wasm_bindgen]
pub struct Animator {
    state: AnimatorState,
    view_yaw: f32,
}

#[wasm_bindgen]
impl Animator {
    /// `style` is `{ weight?, gender?, affect?, jitter? }` or undefined
    #[wasm_bindgen(constructor)]
    pub fn new(style: JsValue, motion_kind: &str) -> Result<Animator, JsValue> {
        let style: StyleJson = if style.is_undefined() || style.is_null() {
            StyleJson::default()
        } else {
            serde_wasm_bindgen::from_value(style)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse style: {}", e)))?
        };
        let state = initialize_named(style, motion_kind).map_err(to_js_error)?;
        Ok(Self {
            state,
            view_yaw: 0.0,
        })
    }

    /// Build from a JSON document with `style`, `motion` and `tuning`
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<Animator, JsValue> {
        let state = AnimatorState::from_config(json).map_err(to_js_error)?;
        Ok(Self {
            state,
            view_yaw: 0.0,
        })
    }

    /// Advance by `delta_ms` and return 15 projected `(x, y)` pairs
    pub fn tick(&mut self, delta_ms: f32) -> Vec<f32> {
        self.state.tick(delta_ms / 1000.0).project_flat(self.view_yaw)
    }

    /// Advance by `delta_ms` and return 15 `(x, y, z)` triples
    #[wasm_bindgen(js_name = tick3d)]
    pub fn tick_3d(&mut self, delta_ms: f32) -> Vec<f32> {
        self.state.tick(delta_ms / 1000.0).as_flat().to_vec()
    }

    /// Current projected frame without advancing
    pub fn pose(&self) -> Vec<f32> {
        self.state.pose().project_flat(self.view_yaw)
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Camera yaw in radians: 0 is a side view, PI/2 looks at the front
    #[wasm_bindgen(js_name = setViewYaw)]
    pub fn set_view_yaw(&mut self, yaw: f32) {
        self.view_yaw = if yaw.is_finite() { yaw } else { 0.0 };
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> f32 {
        self.state.phase()
    }

    #[wasm_bindgen(getter, js_name = motionKind)]
    pub fn motion_kind(&self) -> String {
        self.state.kind().to_string()
    }
}

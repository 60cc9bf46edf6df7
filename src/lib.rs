//! Point-Light Figure Engine - Wasm Core
//!
//! Generates the 15 marker positions of a biological-motion point-light
//! figure, frame by frame, for walking, running, jumping, bowing, sitting,
//! lying down, waving and rolling. Rendering is left to the caller.

pub mod animation;
pub mod assembler;
pub mod body;
pub mod config;
pub mod error;
pub mod ik;
pub mod math;
pub mod motion;
pub mod sequencer;
pub mod skeleton;
mod skeleton_constants;
pub mod style;
pub mod swing;
pub mod trajectory;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use animation::{initialize, initialize_named, initialize_with, reset, tick, AnimatorState};
pub use assembler::{assemble, PoseAssembler, ReachMemory};
pub use body::{Joint, Pose, Posture};
pub use config::{AnimatorConfig, MotionConfig};
pub use error::{PoseError, PoseResult};
pub use glam::Vec3;
pub use motion::{Motion, MotionKind, MotionStrategy};
pub use sequencer::{next_phase, FrameSequencer, Playback, SequencerState};
pub use skeleton::{Proportions, SkeletonModel};
pub use style::{Affect, Build, Gender, Style, StyleJson};

#[cfg(target_arch = "wasm32")]
pub use wasm::Animator;

/// Install a `log` backend for the current target.
///
/// Browsers get `console_log`; native hosts install their own logger.
pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_log::init_with_level(log::Level::Info).ok();
        } else {
            log::debug!("init_logging: no built-in logger on this target");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    wasm_bindgen_test_configure!(run_in_browser);

    #[test]
    #[wasm_bindgen_test]
    fn test_public_surface_produces_frames() {
        init_logging();
        for kind in motion::MotionKind::ALL {
            let mut state = initialize(Style::default(), kind).unwrap();
            for _ in 0..5 {
                let pose = tick(&mut state, 1.0 / 60.0);
                assert_eq!(pose.len(), 15);
                assert!(pose.is_finite());
            }
            reset(&mut state);
            assert_eq!(state.phase(), 0.0);
        }
    }
}

use crate::assembler::{PoseAssembler, ReachMemory};
use crate::body::Pose;
use crate::config::{AnimatorConfig, MotionConfig};
use crate::error::PoseResult;
use crate::motion::{Motion, MotionKind};
use crate::sequencer::{FrameSequencer, SequencerState};
use crate::skeleton::Proportions;
use crate::style::{Style, StyleJson};
use glam::Vec3;

/// Everything one animated figure needs between ticks.
///
/// Owned by the caller; nothing is shared between instances, so any number
/// of figures can run side by side.
#[derive(Debug)]
pub struct AnimatorState {
    style: Style,
    config: MotionConfig,
    assembler: PoseAssembler,
    motion: Motion,
    sequencer: FrameSequencer,
    /// Previous-frame elbows for reach continuity
    memory: ReachMemory,
}

/// Build an animator with default tuning
pub fn initialize(style: Style, kind: MotionKind) -> PoseResult<AnimatorState> {
    AnimatorState::new(style, kind, MotionConfig::default())
}

pub fn initialize_with(
    style: Style,
    kind: MotionKind,
    config: MotionConfig,
) -> PoseResult<AnimatorState> {
    AnimatorState::new(style, kind, config)
}

/// String-typed entry point: unknown names fail here, before any frame
pub fn initialize_named(style: StyleJson, motion_kind: &str) -> PoseResult<AnimatorState> {
    let style = Style::try_from(style)?;
    let kind = motion_kind.parse()?;
    initialize(style, kind)
}

/// Advance by `dt` seconds and return the new frame
pub fn tick(state: &mut AnimatorState, dt: f32) -> Pose {
    state.tick(dt)
}

/// Rewind to the start of the motion
pub fn reset(state: &mut AnimatorState) {
    state.reset();
}

impl AnimatorState {
    pub fn new(style: Style, kind: MotionKind, config: MotionConfig) -> PoseResult<Self> {
        let config = config.validated()?;
        let motion = Motion::new(kind, &style, &config)?;
        let assembler = PoseAssembler::new(&style);
        let timing = motion.timing();
        let sequencer = FrameSequencer::new(timing.period, timing.playback);

        log::info!(
            "Animator initialised: {} ({:?}/{:?}/{:?}), period {:.3}s, {:?}",
            kind,
            style.weight,
            style.gender,
            style.affect,
            timing.period,
            timing.playback
        );

        Ok(Self {
            style,
            config,
            assembler,
            motion,
            sequencer,
            memory: ReachMemory::new(),
        })
    }

    /// Parse a full JSON setup (`style`, `motion`, `tuning`)
    pub fn from_config(json: &str) -> PoseResult<Self> {
        let config = AnimatorConfig::from_json(json)?;
        let style = Style::try_from(config.style)?;
        let kind = config.motion.parse()?;
        Self::new(style, kind, config.tuning)
    }

    pub fn tick(&mut self, dt: f32) -> Pose {
        let phase = self.sequencer.advance(dt);
        self.assembler
            .assemble_with_memory(phase, &self.motion, &mut self.memory)
            .translated(self.travel())
    }

    pub fn reset(&mut self) {
        self.sequencer.reset();
        self.memory.clear();
        log::debug!("Animator reset: {}", self.motion.kind());
    }

    /// Current frame without advancing
    pub fn pose(&self) -> Pose {
        let mut memory = self.memory;
        self.assembler
            .assemble_with_memory(self.sequencer.phase(), &self.motion, &mut memory)
            .translated(self.travel())
    }

    /// Root displacement accumulated by completed cycles
    pub fn travel(&self) -> Vec3 {
        let travel = self.motion.strategy().travel_per_cycle() * self.sequencer.laps() as f32;
        match self.config.travel_wrap {
            Some(wrap) => Vec3::new(
                travel.x.rem_euclid(wrap),
                travel.y.rem_euclid(wrap),
                travel.z.rem_euclid(wrap),
            ),
            None => travel,
        }
    }

    pub fn phase(&self) -> f32 {
        self.sequencer.phase()
    }

    pub fn progress(&self) -> f32 {
        self.sequencer.progress()
    }

    pub fn laps(&self) -> i64 {
        self.sequencer.laps()
    }

    pub fn sequencer_state(&self) -> SequencerState {
        self.sequencer.state()
    }

    pub fn kind(&self) -> MotionKind {
        self.motion.kind()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn proportions(&self) -> &Proportions {
        self.assembler.proportions()
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }
}

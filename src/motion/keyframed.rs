use super::{Contact, JointDriver, MotionKind, MotionStrategy, Timing};
use crate::body::{Channel, Joint, Keyframe, KeyframeTrack, Posture, Window};
use crate::error::PoseResult;
use crate::math::Ease;
use crate::sequencer::Playback;
use crate::style::StyleParams;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

const BOW_DURATION: f32 = 2.5;
const SIT_DURATION: f32 = 2.0;
const LIE_DURATION: f32 = 3.0;
const ROLL_DURATION: f32 = 2.4;
/// Deepest bow regardless of style
const MAX_BOW: f32 = 1.3;

/// One-shot action played from a posture keyframe track over `[0, 1]`
#[derive(Debug, Clone)]
pub struct Keyframed {
    kind: MotionKind,
    track: KeyframeTrack<Posture>,
    period: f32,
    contact: Contact,
}

impl Keyframed {
    pub fn new(
        kind: MotionKind,
        track: KeyframeTrack<Posture>,
        period: f32,
        contact: Contact,
    ) -> Self {
        Self {
            kind,
            track,
            period,
            contact,
        }
    }

    /// Lean from the hips, head leading and arms trailing, then straighten up
    pub fn bow(params: &StyleParams, tempo: f32) -> PoseResult<Self> {
        let lean = (1.0 * params.amplitude).min(MAX_BOW);
        let bowed = Posture::neutral()
            .with(Channel::TrunkLean, lean)
            .with(Channel::HeadTilt, 0.35 + params.droop)
            .with_limbs(0.9 * lean, 0.0, 0.0, 0.05);

        let arms = Window::new(0.1, 0.9);
        let track = KeyframeTrack::new(
            vec![
                Keyframe::new(0.0, Posture::neutral()),
                Keyframe::new(0.35, bowed),
                Keyframe::new(0.65, bowed),
                Keyframe::new(1.0, Posture::neutral()),
            ],
            Ease::Cosine,
        )?
        .with_stagger(Channel::HeadTilt.index(), Window::new(0.0, 0.85))?
        .with_stagger(Channel::TrunkLean.index(), Window::new(0.05, 0.95))?
        .with_stagger(Channel::LeftShoulder.index(), arms)?
        .with_stagger(Channel::RightShoulder.index(), arms)?
        .with_stagger(Channel::LeftElbow.index(), arms)?
        .with_stagger(Channel::RightElbow.index(), arms)?;

        Ok(Self::new(
            MotionKind::Bow,
            track,
            scaled_period(BOW_DURATION, params, tempo),
            Contact::Feet,
        ))
    }

    /// Lower onto an invisible chair and stay seated
    pub fn sit_down(params: &StyleParams, tempo: f32) -> PoseResult<Self> {
        let lowering = Posture::neutral()
            .with(Channel::TrunkLean, 0.5 + 0.5 * params.droop)
            .with_limbs(0.4, 0.0, 0.5, 0.6);
        let seated = Posture::neutral()
            .with(Channel::TrunkLean, 0.1 + params.droop)
            .with(Channel::HeadTilt, params.droop)
            .with_limbs(0.2, 0.6, 1.5, 1.5);

        let track = KeyframeTrack::new(
            vec![
                Keyframe::new(0.0, Posture::neutral()),
                Keyframe::new(0.4, lowering),
                Keyframe::new(1.0, seated),
            ],
            Ease::Cosine,
        )?;

        Ok(Self::new(
            MotionKind::SitDown,
            track,
            scaled_period(SIT_DURATION, params, tempo),
            Contact::Feet,
        ))
    }

    /// Squat, sit back and roll onto the back
    pub fn lie_down(params: &StyleParams, tempo: f32) -> PoseResult<Self> {
        let squat = Posture::neutral()
            .with(Channel::TrunkLean, 0.6)
            .with_limbs(0.6, 0.0, 1.6, 2.2);
        let reclining = Posture::neutral()
            .with(Channel::BodyPitch, -0.5)
            .with(Channel::TrunkLean, 0.5)
            .with_limbs(0.3, 0.2, 1.07, 0.1);
        let lying = Posture::neutral().with(Channel::BodyPitch, -FRAC_PI_2);

        let track = KeyframeTrack::new(
            vec![
                Keyframe::new(0.0, Posture::neutral()),
                Keyframe::new(0.35, squat),
                Keyframe::new(0.65, reclining),
                Keyframe::new(1.0, lying),
            ],
            Ease::Cosine,
        )?;

        Ok(Self::new(
            MotionKind::LieDown,
            track,
            scaled_period(LIE_DURATION, params, tempo),
            Contact::Lowest,
        ))
    }

    /// Tuck, roll over the shoulders through a full turn and stand up ahead
    pub fn forward_roll(params: &StyleParams, tempo: f32) -> PoseResult<Self> {
        let tuck = Posture::neutral()
            .with(Channel::TrunkLean, 0.9)
            .with(Channel::HeadTilt, 0.5)
            .with_limbs(1.6, 0.3, 1.9, 2.4);
        let inverted = Posture::neutral()
            .with(Channel::RootX, 0.5)
            .with(Channel::BodyPitch, PI)
            .with(Channel::TrunkLean, 0.6)
            .with(Channel::HeadTilt, 0.6)
            .with_limbs(1.2, 0.3, 2.2, 2.5);
        let rising = Posture::neutral()
            .with(Channel::RootX, 0.9)
            .with(Channel::BodyPitch, 1.8 * PI)
            .with(Channel::TrunkLean, 0.7)
            .with(Channel::HeadTilt, 0.3)
            .with_limbs(1.6, 0.3, 1.9, 2.4);
        let standing = Posture::neutral()
            .with(Channel::RootX, 1.1)
            .with(Channel::BodyPitch, TAU);

        let track = KeyframeTrack::new(
            vec![
                Keyframe::new(0.0, Posture::neutral()),
                Keyframe::new(0.25, tuck),
                Keyframe::new(0.5, inverted),
                Keyframe::new(0.75, rising),
                Keyframe::new(1.0, standing),
            ],
            Ease::Cosine,
        )?;

        Ok(Self::new(
            MotionKind::ForwardRoll,
            track,
            scaled_period(ROLL_DURATION, params, tempo),
            Contact::Lowest,
        ))
    }

    pub fn with_ease(self, ease: Ease) -> Self {
        Self {
            track: self.track.with_ease(ease),
            ..self
        }
    }

    pub fn track(&self) -> &KeyframeTrack<Posture> {
        &self.track
    }
}

#[inline]
fn scaled_period(duration: f32, params: &StyleParams, tempo: f32) -> f32 {
    duration / (params.frequency * tempo)
}

impl MotionStrategy for Keyframed {
    fn kind(&self) -> MotionKind {
        self.kind
    }

    fn timing(&self) -> Timing {
        Timing {
            period: self.period,
            playback: Playback::Once,
        }
    }

    fn driver(&self, joint: Joint) -> JointDriver {
        match joint {
            Joint::Pelvis => JointDriver::Root,
            _ => JointDriver::Keyframe,
        }
    }

    fn posture(&self, cycle: f32) -> Posture {
        self.track.sample(cycle)
    }

    fn contact(&self) -> Contact {
        self.contact
    }
}

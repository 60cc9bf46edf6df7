use super::posture::{Channel, Posture};
use crate::error::{PoseError, PoseResult};
use crate::math::{lerp, Ease};
use serde::{Deserialize, Serialize};

// ============================================================================
// Keyframe interpolation
// ============================================================================

/// Values that can be blended channel by channel.
///
/// Staggered interpolation needs to blend one channel at a time, so this is
/// expressed per channel rather than as a whole-value lerp.
pub trait Blend: Clone {
    /// Number of independently timed channels
    const CHANNELS: usize;

    /// Set `channel` of `self` to the blend of `from` and `to` at `u`
    fn blend_channel(&mut self, from: &Self, to: &Self, channel: usize, u: f32);

    fn blend(from: &Self, to: &Self, u: f32) -> Self {
        let mut out = from.clone();
        for channel in 0..Self::CHANNELS {
            out.blend_channel(from, to, channel, u);
        }
        out
    }
}

impl Blend for Posture {
    const CHANNELS: usize = Channel::COUNT;

    fn blend_channel(&mut self, from: &Self, to: &Self, channel: usize, u: f32) {
        let channel = Channel::ALL[channel];
        self.set(channel, lerp(from.get(channel), to.get(channel), u));
    }
}

/// A value pinned at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    pub time: f32,
    pub value: T,
}

impl<T> Keyframe<T> {
    pub fn new(time: f32, value: T) -> Self {
        Self { time, value }
    }
}

/// Sub-schedule for one channel, as fractions of the whole track.
///
/// A channel with `delay = 0.1, span = 0.8` starts moving after 10% of the
/// track and reaches its final value at 90%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub delay: f32,
    pub span: f32,
}

impl Window {
    pub const FULL: Window = Window {
        delay: 0.0,
        span: 1.0,
    };

    pub fn new(delay: f32, span: f32) -> Self {
        Self { delay, span }
    }

    /// Map whole-track progress to this channel's local progress
    #[inline]
    pub fn remap(&self, progress: f32) -> f32 {
        ((progress - self.delay) / self.span).clamp(0.0, 1.0)
    }

    fn validate(&self) -> PoseResult<()> {
        let ok = self.delay.is_finite()
            && self.span.is_finite()
            && self.delay >= 0.0
            && self.span > 0.0
            && self.delay + self.span <= 1.0 + 1e-4;
        if ok {
            Ok(())
        } else {
            Err(PoseError::keyframes(format!(
                "stagger window must satisfy 0 <= delay, 0 < span, delay + span <= 1 (got {:?})",
                self
            )))
        }
    }
}

/// Ordered keyframes with easing and optional per-channel staggering
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T> {
    keyframes: Vec<Keyframe<T>>,
    ease: Ease,
    stagger: Vec<(usize, Window)>,
}

impl<T: Blend> KeyframeTrack<T> {
    /// Validate and build a track. Times must be finite and strictly increasing.
    pub fn new(keyframes: Vec<Keyframe<T>>, ease: Ease) -> PoseResult<Self> {
        if keyframes.is_empty() {
            return Err(PoseError::keyframes("at least one keyframe is required"));
        }
        for (i, kf) in keyframes.iter().enumerate() {
            if !kf.time.is_finite() {
                return Err(PoseError::keyframes(format!(
                    "keyframe {} has non-finite time",
                    i
                )));
            }
        }
        if let Some(i) = keyframes.windows(2).position(|w| w[1].time <= w[0].time) {
            return Err(PoseError::keyframes(format!(
                "keyframe times must be strictly increasing (keyframe {} at t={} follows t={})",
                i + 1,
                keyframes[i + 1].time,
                keyframes[i].time
            )));
        }

        Ok(Self {
            keyframes,
            ease,
            stagger: Vec::new(),
        })
    }

    /// Give one channel its own timing window
    pub fn with_stagger(mut self, channel: usize, window: Window) -> PoseResult<Self> {
        if channel >= T::CHANNELS {
            return Err(PoseError::keyframes(format!(
                "stagger channel {} out of range (0..{})",
                channel,
                T::CHANNELS
            )));
        }
        window.validate()?;
        self.stagger.retain(|(c, _)| *c != channel);
        self.stagger.push((channel, window));
        Ok(self)
    }

    /// Swap the easing curve applied between keyframes
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    pub fn start_time(&self) -> f32 {
        self.keyframes[0].time
    }

    pub fn end_time(&self) -> f32 {
        self.keyframes[self.keyframes.len() - 1].time
    }

    pub fn duration(&self) -> f32 {
        self.end_time() - self.start_time()
    }

    /// Sample the track. Times outside the keyframe range clamp to the
    /// first/last value.
    pub fn sample(&self, time: f32) -> T {
        let mut out = self.sample_plain(time);
        if self.stagger.is_empty() || self.duration() <= 0.0 {
            return out;
        }

        let progress = (time - self.start_time()) / self.duration();
        for &(channel, window) in &self.stagger {
            let local = self.start_time() + window.remap(progress) * self.duration();
            let (prev, next, u) = self.bracket(local);
            out.blend_channel(
                &self.keyframes[prev].value,
                &self.keyframes[next].value,
                channel,
                u,
            );
        }
        out
    }

    fn sample_plain(&self, time: f32) -> T {
        let (prev, next, u) = self.bracket(time);
        if prev == next {
            return self.keyframes[prev].value.clone();
        }
        T::blend(&self.keyframes[prev].value, &self.keyframes[next].value, u)
    }

    /// Bracketing keyframe indices and the eased local fraction
    fn bracket(&self, time: f32) -> (usize, usize, f32) {
        let last = self.keyframes.len() - 1;
        // NaN fails this comparison and clamps to the first keyframe
        if !(time > self.start_time()) {
            return (0, 0, 0.0);
        }

        // Binary search for keyframe (using partition_point for efficiency)
        let next_idx = self.keyframes.partition_point(|kf| kf.time <= time);
        if next_idx > last {
            return (last, last, 0.0);
        }

        let prev = &self.keyframes[next_idx - 1];
        let next = &self.keyframes[next_idx];
        let u = (time - prev.time) / (next.time - prev.time);
        (next_idx - 1, next_idx, self.ease.apply(u))
    }
}

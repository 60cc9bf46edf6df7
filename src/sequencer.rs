//! Phase bookkeeping between renderer ticks.
//!
//! Phase is kept inside `[0, period]` at all times, so long runs never
//! accumulate an ever-growing time counter.

use serde::{Deserialize, Serialize};

/// How phase behaves at the end of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    /// Wrap around and repeat forever
    Loop,
    /// Run once, then hold the final phase
    Once,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencerState {
    Looping,
    Running,
    /// Terminal until `reset`
    Holding,
}

/// Bring any phase into range for the given playback mode.
///
/// Loops map into `[0, period)`, one-shots clamp to `[0, period]`.
/// A non-finite phase or a non-positive period yields 0.
pub fn normalize_phase(phase: f32, period: f32, playback: Playback) -> f32 {
    if !phase.is_finite() || !period.is_finite() || period <= 0.0 {
        return 0.0;
    }
    match playback {
        Playback::Loop => {
            let wrapped = phase.rem_euclid(period);
            // rem_euclid can round up to exactly `period` for tiny negative input
            if wrapped >= period {
                0.0
            } else {
                wrapped
            }
        }
        Playback::Once => phase.clamp(0.0, period),
    }
}

/// Advance `previous` by `dt` seconds
pub fn next_phase(previous: f32, dt: f32, period: f32, playback: Playback) -> f32 {
    let dt = if dt.is_finite() { dt } else { 0.0 };
    normalize_phase(previous + dt, period, playback)
}

/// Whole periods separating `raw` from its wrapped phase.
///
/// Taken from the wrapped value itself so lap counting agrees with the phase
/// when rounding lands on a boundary. Saturates for enormous deltas.
fn wraps_between(raw: f32, wrapped: f32, period: f32) -> i64 {
    if !raw.is_finite() || !period.is_finite() || period <= 0.0 {
        return 0;
    }
    // `as` saturates at the i64 range
    ((raw - wrapped) / period).round() as i64
}

/// Owns the phase of one animator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSequencer {
    period: f32,
    playback: Playback,
    phase: f32,
    state: SequencerState,
    /// Completed loop wraps (negative when rewinding)
    laps: i64,
}

impl FrameSequencer {
    pub fn new(period: f32, playback: Playback) -> Self {
        let mut sequencer = Self {
            period,
            playback,
            phase: 0.0,
            state: SequencerState::Running,
            laps: 0,
        };
        sequencer.reset();
        sequencer
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.laps = 0;
        self.state = match self.playback {
            Playback::Loop => SequencerState::Looping,
            Playback::Once if self.period > 0.0 => SequencerState::Running,
            // Nothing to run through
            Playback::Once => SequencerState::Holding,
        };
    }

    /// Advance by `dt` seconds and return the new phase
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() {
            dt
        } else {
            log::warn!("Ignoring non-finite frame delta {}", dt);
            0.0
        };

        match self.state {
            SequencerState::Holding => {}
            SequencerState::Looping => {
                let raw = self.phase + dt;
                let wrapped = normalize_phase(raw, self.period, self.playback);
                self.laps = self.laps.saturating_add(wraps_between(raw, wrapped, self.period));
                self.phase = wrapped;
            }
            SequencerState::Running => {
                self.phase = next_phase(self.phase, dt, self.period, self.playback);
                if self.phase >= self.period {
                    self.state = SequencerState::Holding;
                    log::debug!("One-shot finished at phase {:.3}s, holding", self.phase);
                }
            }
        }
        self.phase
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Phase as a fraction of the period
    pub fn progress(&self) -> f32 {
        if self.period > 0.0 {
            self.phase / self.period
        } else {
            0.0
        }
    }

    #[inline]
    pub fn laps(&self) -> i64 {
        self.laps
    }

    #[inline]
    pub fn state(&self) -> SequencerState {
        self.state
    }

    #[inline]
    pub fn period(&self) -> f32 {
        self.period
    }

    #[inline]
    pub fn playback(&self) -> Playback {
        self.playback
    }
}

// FlexSonic — Deployment Profile
//
// Everything variant-specific lives here: channel calibration, the rule
// table, timing, and policy choices. The engine takes one immutable profile
// at construction and rejects it up front if it cannot work — thresholds are
// mandatory, validated input, never guessed.

use std::time::Duration;

use anyhow::{bail, ensure, Result};

use crate::engine::arbiter::Rule;
use crate::engine::classify::TriggerRange;
use crate::engine::debounce::{DebouncePolicy, IdleBehavior};

/// One flex sensor input.
#[derive(Debug, Clone)]
pub struct FlexChannel {
    pub name: &'static str,
    pub range: TriggerRange,
    /// Per-channel smoothing override; `None` uses the profile default.
    pub samples: Option<u32>,
}

impl FlexChannel {
    pub fn new(name: &'static str, range: TriggerRange) -> Self {
        Self { name, range, samples: None }
    }
}

/// Gyro-excursion calibration: raw per-axis thresholds (X, Y, Z).
///
/// Trigger and release differ to give the motion channel hysteresis: a
/// trigger needs one axis magnitude above its trigger value, while the idle
/// reset waits for every axis magnitude to drop below its release value.
#[derive(Debug, Clone, Copy)]
pub struct MotionProfile {
    pub trigger: [i32; 3],
    pub release: [i32; 3],
}

impl MotionProfile {
    /// True when any axis magnitude exceeds its trigger threshold.
    pub fn excursion(&self, axes: [i16; 3]) -> bool {
        axes.iter()
            .zip(self.trigger.iter())
            .any(|(&a, &t)| i32::from(a).abs() > t)
    }

    /// True when every axis magnitude is back below its release threshold.
    pub fn settled(&self, axes: [i16; 3]) -> bool {
        axes.iter()
            .zip(self.release.iter())
            .all(|(&a, &r)| i32::from(a).abs() < r)
    }
}

/// Complete, immutable engine configuration for one deployment.
#[derive(Debug, Clone)]
pub struct Profile {
    pub channels: Vec<FlexChannel>,
    pub motion: Option<MotionProfile>,
    /// Priority table, highest first.
    pub rules: Vec<Rule>,
    /// Default smoothing sample count per reading.
    pub samples: u32,
    pub sample_delay: Duration,
    pub cycle_delay: Duration,
    /// Extra pause after a fired command, on top of the cycle delay.
    pub cooldown: Duration,
    /// DFPlayer volume, 0–30, sent once at startup.
    pub volume: u8,
    pub debounce: DebouncePolicy,
    pub on_idle: IdleBehavior,
}

impl Profile {
    /// Number of smoothing samples for one channel.
    pub fn samples_for(&self, channel: usize) -> u32 {
        self.channels[channel].samples.unwrap_or(self.samples)
    }

    /// Reject any profile that cannot drive the engine correctly.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.channels.is_empty(), "profile has no flex channels");
        ensure!(!self.rules.is_empty(), "profile has no rules");
        ensure!(self.samples >= 1, "smoothing sample count must be at least 1");
        ensure!(self.volume <= 30, "DFPlayer volume is 0-30, got {}", self.volume);

        for channel in &self.channels {
            if let TriggerRange::Bounded { low, high } = channel.range {
                ensure!(
                    low <= high,
                    "channel '{}': trigger band low {} above high {}",
                    channel.name,
                    low,
                    high
                );
            }
            if let Some(samples) = channel.samples {
                ensure!(
                    samples >= 1,
                    "channel '{}': smoothing sample count must be at least 1",
                    channel.name
                );
            }
        }

        if let Some(motion) = &self.motion {
            for axis in 0..3 {
                ensure!(
                    motion.trigger[axis] >= 0 && motion.release[axis] >= 0,
                    "gyro axis {} threshold must be non-negative",
                    axis
                );
                ensure!(
                    motion.release[axis] <= motion.trigger[axis],
                    "gyro axis {} release {} above trigger {}",
                    axis,
                    motion.release[axis],
                    motion.trigger[axis]
                );
            }
        }

        self.validate_rules()
    }

    fn validate_rules(&self) -> Result<()> {
        // Flex channels already claimed by an earlier Single rule; a Combo
        // over such a channel could never win.
        let mut singled = vec![false; self.channels.len()];
        let mut seen_combos: Vec<(usize, usize)> = Vec::new();
        let mut seen_motion = false;

        for (position, rule) in self.rules.iter().enumerate() {
            ensure!(
                rule.track() >= 1,
                "rule {}: DFPlayer tracks are 1-based, got track 0",
                position
            );
            match *rule {
                Rule::Single { channel, .. } => {
                    self.check_channel(position, channel)?;
                    if singled[channel] {
                        bail!(
                            "rule {}: duplicate single rule for channel '{}'",
                            position,
                            self.channels[channel].name
                        );
                    }
                    singled[channel] = true;
                }
                Rule::Combo { first, second, .. } => {
                    self.check_channel(position, first)?;
                    self.check_channel(position, second)?;
                    ensure!(
                        first != second,
                        "rule {}: combo pairs channel '{}' with itself",
                        position,
                        self.channels[first].name
                    );
                    let pair = (first.min(second), first.max(second));
                    if seen_combos.contains(&pair) {
                        bail!("rule {}: duplicate combo rule for that channel pair", position);
                    }
                    seen_combos.push(pair);
                    if singled[first] || singled[second] {
                        bail!(
                            "rule {}: combo is unreachable, shadowed by an earlier \
                             single rule over one of its channels",
                            position
                        );
                    }
                }
                Rule::Motion { .. } => {
                    ensure!(
                        self.motion.is_some(),
                        "rule {}: motion rule without a motion profile",
                        position
                    );
                    ensure!(!seen_motion, "rule {}: duplicate motion rule", position);
                    seen_motion = true;
                }
            }
        }
        Ok(())
    }

    fn check_channel(&self, position: usize, channel: usize) -> Result<()> {
        ensure!(
            channel < self.channels.len(),
            "rule {}: channel index {} out of range ({} channels)",
            position,
            channel,
            self.channels.len()
        );
        Ok(())
    }
}

// FlexSonic — Gesture Engine
//
// One polling cycle: smooth every flex channel, read one gyro block,
// classify against the profile's trigger ranges, arbitrate the rule table,
// debounce against the previous output, and hand any resulting command to
// the DFPlayer. Single-threaded and synchronous — a cycle runs to completion
// before the next begins, so the cross-cycle state needs no locking.

pub mod arbiter;
pub mod classify;
pub mod debounce;
pub mod profile;
pub mod smoother;

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::Result;

use crate::dfplayer::{DfPlayer, Transport};
use arbiter::TriggerSnapshot;
use debounce::{OutputTracker, PlaybackCommand};
use profile::Profile;

/// Flex-sensor read capability. Channel indices follow the profile's channel
/// order.
pub trait FlexSensors {
    fn read_channel(&mut self, channel: usize) -> Result<i32>;
}

/// Gyro read capability: one raw (X, Y, Z) sample per call.
pub trait MotionSensor {
    fn read_axes(&mut self) -> Result<[i16; 3]>;
}

/// The trigger-decision engine. Owns only its collaborators and the
/// debounce state; peripheral handles stay with the drivers.
pub struct Engine<S, M, T>
where
    S: FlexSensors,
    M: MotionSensor,
    T: Transport,
{
    profile: Profile,
    sensors: S,
    motion: M,
    player: DfPlayer<T>,
    tracker: OutputTracker,
}

impl<S, M, T> Engine<S, M, T>
where
    S: FlexSensors,
    M: MotionSensor,
    T: Transport,
{
    /// Validate the profile and assemble the engine. A malformed profile is
    /// refused here, before any polling starts.
    pub fn new(profile: Profile, sensors: S, motion: M, player: DfPlayer<T>) -> Result<Self> {
        profile.validate()?;
        let tracker = OutputTracker::new(profile.debounce, profile.on_idle);
        Ok(Self { profile, sensors, motion, player, tracker })
    }

    /// Poll until `stop` is raised. Checked once per cycle boundary, so a
    /// shutdown request takes effect after at most one full cycle.
    pub fn run(&mut self, stop: &AtomicBool) {
        log::info!(
            "engine running: {} channels, {} rules, cycle delay {:?}",
            self.profile.channels.len(),
            self.profile.rules.len(),
            self.profile.cycle_delay
        );
        while !stop.load(Ordering::SeqCst) {
            let fired = self.cycle();
            if fired && !self.profile.cooldown.is_zero() {
                thread::sleep(self.profile.cooldown);
            }
            thread::sleep(self.profile.cycle_delay);
        }
        log::info!("engine stopped");
    }

    /// Run one full polling cycle. Returns true when a command was issued.
    pub fn cycle(&mut self) -> bool {
        // Sample & classify every flex channel.
        let mut triggered = Vec::with_capacity(self.profile.channels.len());
        for index in 0..self.profile.channels.len() {
            let value = smoother::smooth(
                &mut self.sensors,
                index,
                self.profile.samples_for(index),
                self.profile.sample_delay,
            );
            let channel = &self.profile.channels[index];
            let hit = channel.range.contains(value);
            log::debug!("{}: {} ({})", channel.name, value, if hit { "trigger" } else { "-" });
            triggered.push(hit);
        }

        // One gyro block per cycle. A failed read degrades to a zero sample,
        // which can neither trigger nor hold off the idle reset.
        let axes = match self.motion.read_axes() {
            Ok(axes) => axes,
            Err(e) => {
                log::warn!("gyro read failed, assuming still: {}", e);
                [0; 3]
            }
        };
        let (motion_hit, motion_settled) = match &self.profile.motion {
            Some(motion) => (motion.excursion(axes), motion.settled(axes)),
            None => (false, true),
        };
        log::debug!(
            "gyro: x={} y={} z={} ({})",
            axes[0],
            axes[1],
            axes[2],
            if motion_hit { "trigger" } else { "-" }
        );

        // Arbitrate and debounce.
        let snapshot = TriggerSnapshot { flex: &triggered, motion: motion_hit };
        let action = arbiter::arbitrate(&self.profile.rules, &snapshot);
        let settled = !triggered.iter().any(|&t| t) && motion_settled;

        match self.tracker.decide(action, settled) {
            Some(PlaybackCommand::Play(track)) => {
                self.player.play_track(track);
                true
            }
            Some(PlaybackCommand::Stop) => {
                self.player.stop();
                true
            }
            None => false,
        }
    }

    /// Send the profile's startup volume to the player.
    pub fn apply_volume(&mut self) {
        self.player.set_volume(self.profile.volume);
    }
}

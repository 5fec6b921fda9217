// FlexSonic — Hardware & Deployment Configuration
// Target: ESP32 (Xtensa) glove controller

use std::time::Duration;

use crate::engine::arbiter::Rule;
use crate::engine::classify::TriggerRange;
use crate::engine::debounce::{DebouncePolicy, IdleBehavior};
use crate::engine::profile::{FlexChannel, MotionProfile, Profile};

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (ESP32 DevKit pinout)
// ---------------------------------------------------------------------------
pub const PIN_I2C_SDA: i32 = 21; // MPU6050 data line
pub const PIN_I2C_SCL: i32 = 22; // MPU6050 clock line
pub const PIN_UART_TX: i32 = 25; // ESP32 TX → DFPlayer RX (via voltage divider)
pub const PIN_UART_RX: i32 = 26; // ESP32 RX ← DFPlayer TX

// ---------------------------------------------------------------------------
// Flex Sensor ADC Channels (ADC1 oneshot, thumb → pinky)
// ---------------------------------------------------------------------------
// Channel 0 = GPIO36 (VP), 6 = GPIO34, 7 = GPIO35, 4 = GPIO32, 5 = GPIO33.
pub const FLEX_ADC_CHANNELS: [u32; 5] = [0, 6, 7, 4, 5];

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_MPU6050: u8 = 0x68;
pub const I2C_FREQ_HZ: u32 = 100_000;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// DFPlayer Serial Link
// ---------------------------------------------------------------------------
pub const UART_BAUD: u32 = 9600;
pub const COMMAND_GAP_MS: u64 = 200; // DFPlayer needs a pause between commands
pub const DEFAULT_VOLUME: u8 = 25;   // out of 30

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const SMOOTH_SAMPLES: u32 = 20;      // ADC samples averaged per reading
pub const SAMPLE_DELAY_MS: u64 = 5;      // between ADC samples
pub const CYCLE_DELAY_MS: u64 = 300;     // between polling cycles
pub const COOLDOWN_MS: u64 = 0;          // extra pause after a fired command
pub const STARTUP_SETTLE_MS: u64 = 2000; // let sensors settle before polling

// ---------------------------------------------------------------------------
// Trigger Calibration
// ---------------------------------------------------------------------------
// A finger counts as "bent into gesture range" inside [FLEX_LOW, FLEX_HIGH];
// slack and over-bend both fall outside. 12-bit ADC, 11 dB attenuation.
pub const FLEX_LOW: i32 = 1000;
pub const FLEX_HIGH: i32 = 3500;

// Gyro excursion thresholds, raw LSB per axis (X, Y, Z). A hand-motion
// trigger needs one axis magnitude above its trigger value; the engine only
// returns to idle once every axis is back below its release value.
pub const GYRO_TRIGGER: [i32; 3] = [1000, 15_000, 15_000];
pub const GYRO_RELEASE: [i32; 3] = [600, 15_000, 15_000];

// ---------------------------------------------------------------------------
// Default deployment profile
// ---------------------------------------------------------------------------

/// Track numbers for the stock SD-card layout (0001.mp3 … 0010.mp3).
pub const TRACK_INDEX: u16 = 1;
pub const TRACK_THUMB: u16 = 2;
pub const TRACK_MIDDLE: u16 = 3;
pub const TRACK_RING: u16 = 4;
pub const TRACK_PINKY: u16 = 5;
pub const TRACK_THUMB_INDEX: u16 = 6;
pub const TRACK_MIDDLE_RING: u16 = 7;
pub const TRACK_INDEX_PINKY: u16 = 8;
pub const TRACK_THUMB_PINKY: u16 = 9;
pub const TRACK_MOTION: u16 = 10;

// Channel indices, matching FLEX_ADC_CHANNELS order.
pub const CH_THUMB: usize = 0;
pub const CH_INDEX: usize = 1;
pub const CH_MIDDLE: usize = 2;
pub const CH_RING: usize = 3;
pub const CH_PINKY: usize = 4;

/// Build the stock glove profile: all five fingers on the same trigger band,
/// two-finger combos ahead of single-finger rules, hand motion last.
pub fn default_profile() -> Profile {
    let band = || TriggerRange::Bounded {
        low: FLEX_LOW,
        high: FLEX_HIGH,
    };

    Profile {
        channels: vec![
            FlexChannel::new("thumb", band()),
            FlexChannel::new("index", band()),
            FlexChannel::new("middle", band()),
            FlexChannel::new("ring", band()),
            FlexChannel::new("pinky", band()),
        ],
        motion: Some(MotionProfile {
            trigger: GYRO_TRIGGER,
            release: GYRO_RELEASE,
        }),
        rules: vec![
            Rule::Combo { first: CH_THUMB, second: CH_INDEX, track: TRACK_THUMB_INDEX },
            Rule::Combo { first: CH_MIDDLE, second: CH_RING, track: TRACK_MIDDLE_RING },
            Rule::Combo { first: CH_INDEX, second: CH_PINKY, track: TRACK_INDEX_PINKY },
            Rule::Combo { first: CH_THUMB, second: CH_PINKY, track: TRACK_THUMB_PINKY },
            Rule::Single { channel: CH_INDEX, track: TRACK_INDEX },
            Rule::Single { channel: CH_THUMB, track: TRACK_THUMB },
            Rule::Single { channel: CH_MIDDLE, track: TRACK_MIDDLE },
            Rule::Single { channel: CH_RING, track: TRACK_RING },
            Rule::Single { channel: CH_PINKY, track: TRACK_PINKY },
            Rule::Motion { track: TRACK_MOTION },
        ],
        samples: SMOOTH_SAMPLES,
        sample_delay: Duration::from_millis(SAMPLE_DELAY_MS),
        cycle_delay: Duration::from_millis(CYCLE_DELAY_MS),
        cooldown: Duration::from_millis(COOLDOWN_MS),
        volume: DEFAULT_VOLUME,
        debounce: DebouncePolicy::LastAction,
        on_idle: IdleBehavior::Reset,
    }
}

// FlexSonic — Gesture Glove Firmware Library
//
// Five flex-resistive bend sensors (one per finger) and an MPU6050 gyroscope
// feed a per-cycle trigger engine; gestures map to track numbers played on a
// DFPlayer Mini audio module over UART.
//
// The engine itself holds no I/O handles — sensors and the serial link are
// injected as collaborator traits, so all decision logic is testable off
// the hardware.

pub mod config;
pub mod dfplayer;
#[cfg(target_os = "espidf")]
pub mod drivers;
pub mod engine;

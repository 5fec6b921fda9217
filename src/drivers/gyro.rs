// FlexSonic — MPU6050 Gyroscope Driver
//
// Register-level driver over a shared I2C bus; only the gyro block is used.
// Avoids external crate version conflicts with esp-idf-hal.

use std::sync::Mutex;

use anyhow::Result;
use esp_idf_hal::i2c::I2cDriver;

use crate::config::{I2C_ADDR_MPU6050, I2C_TIMEOUT_TICKS};
use crate::engine::MotionSensor;

/// Thread-safe handle to a shared I2C bus.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

// MPU6050 register addresses
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_GYRO_XOUT_H: u8 = 0x43; // Start of 6-byte gyro burst
const REG_WHO_AM_I: u8 = 0x75;
const WHO_AM_I_EXPECTED: u8 = 0x68;

pub struct Mpu6050Gyro {
    bus: SharedBus,
}

impl Mpu6050Gyro {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    /// Verify the device is reachable on the I2C bus.
    pub fn is_connected(&self) -> bool {
        let mut bus = self.bus.lock().unwrap();
        let mut buf = [0u8; 1];
        match bus.write_read(I2C_ADDR_MPU6050, &[REG_WHO_AM_I], &mut buf, I2C_TIMEOUT_TICKS) {
            Ok(()) => buf[0] == WHO_AM_I_EXPECTED,
            Err(_) => false,
        }
    }

    /// Wake the sensor (clear the SLEEP bit); default full-scale ranges are
    /// fine for excursion detection on raw LSB thresholds.
    pub fn init(&self) -> Result<()> {
        let mut bus = self.bus.lock().unwrap();
        bus.write(I2C_ADDR_MPU6050, &[REG_PWR_MGMT_1, 0x00], I2C_TIMEOUT_TICKS)?;
        log::info!("MPU6050 awake");
        Ok(())
    }
}

impl MotionSensor for Mpu6050Gyro {
    /// Burst-read the three gyro axes: high then low byte per axis, X, Y, Z.
    fn read_axes(&mut self) -> Result<[i16; 3]> {
        let mut bus = self.bus.lock().unwrap();
        let mut raw = [0u8; 6];
        bus.write_read(I2C_ADDR_MPU6050, &[REG_GYRO_XOUT_H], &mut raw, I2C_TIMEOUT_TICKS)?;

        Ok([
            i16::from_be_bytes([raw[0], raw[1]]),
            i16::from_be_bytes([raw[2], raw[3]]),
            i16::from_be_bytes([raw[4], raw[5]]),
        ])
    }
}

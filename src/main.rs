// FlexSonic — Firmware Entry Point
//
// Boot sequence:
//   1. Bring up ADC1 for the five flex sensors (thumb → pinky).
//   2. Bring up I2C, probe the MPU6050, wake its gyro.
//   3. Bring up UART1 to the DFPlayer and set the startup volume.
//   4. Let the sensors settle, then run the polling engine until shutdown.

#[cfg(target_os = "espidf")]
use std::sync::atomic::AtomicBool;
#[cfg(target_os = "espidf")]
use std::sync::Mutex;
#[cfg(target_os = "espidf")]
use std::thread;
#[cfg(target_os = "espidf")]
use std::time::Duration;

#[cfg(target_os = "espidf")]
use esp_idf_hal::gpio::AnyIOPin;
#[cfg(target_os = "espidf")]
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
#[cfg(target_os = "espidf")]
use esp_idf_hal::prelude::*;
#[cfg(target_os = "espidf")]
use esp_idf_hal::uart::{config::Config as UartConfig, UartDriver};

#[cfg(target_os = "espidf")]
use flexsonic::config::*;
#[cfg(target_os = "espidf")]
use flexsonic::dfplayer::DfPlayer;
#[cfg(target_os = "espidf")]
use flexsonic::drivers::flex::FlexArray;
#[cfg(target_os = "espidf")]
use flexsonic::drivers::gyro::Mpu6050Gyro;
#[cfg(target_os = "espidf")]
use flexsonic::drivers::serial::DfPlayerLink;
#[cfg(target_os = "espidf")]
use flexsonic::engine::Engine;

// The firmware only runs on the ESP-IDF target; host builds get an empty
// entry point so the library (and its tests) build off-hardware.
#[cfg(not(target_os = "espidf"))]
fn main() {}

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("FlexSonic firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // ---- Flex sensors (ADC1 oneshot) --------------------------------------
    let flex = FlexArray::new(&FLEX_ADC_CHANNELS)?;

    // ---- I2C bus (MPU6050) ------------------------------------------------
    let i2c_config = I2cConfig::new().baudrate(Hertz(I2C_FREQ_HZ).into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21, // SDA
        peripherals.pins.gpio22, // SCL
        &i2c_config,
    )?;
    // SAFETY: The I2C peripheral is a singleton obtained from `Peripherals::take()`.
    // It will live for the entire programme duration (embedded firmware never exits).
    let i2c_bus: &'static Mutex<I2cDriver<'static>> =
        Box::leak(Box::new(Mutex::new(unsafe { core::mem::transmute(i2c) })));

    let gyro = Mpu6050Gyro::new(i2c_bus);
    if gyro.is_connected() {
        gyro.init()?;
    } else {
        // Keep going — finger gestures still work, motion reads degrade to 0.
        log::error!("MPU6050 not responding; motion triggers will stay silent");
    }

    // ---- DFPlayer serial link (UART1, 9600 8N1) ---------------------------
    let uart_config = UartConfig::new().baudrate(Hertz(UART_BAUD));
    let uart = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio25, // TX → DFPlayer RX (via voltage divider)
        peripherals.pins.gpio26, // RX ← DFPlayer TX
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_config,
    )?;
    let player = DfPlayer::new(DfPlayerLink::new(uart, Duration::from_millis(COMMAND_GAP_MS)));

    // ---- Engine ------------------------------------------------------------
    // Profile validation happens inside Engine::new — a bad threshold table
    // stops the firmware here, before anything is played.
    let mut engine = Engine::new(default_profile(), flex, gyro, player)?;
    engine.apply_volume();

    log::info!("System ready. Monitoring sensors…");
    thread::sleep(Duration::from_millis(STARTUP_SETTLE_MS));

    // Never raised on the device; the flag is the engine's clean-shutdown hook.
    static STOP: AtomicBool = AtomicBool::new(false);
    engine.run(&STOP);
    Ok(())
}

// FlexSonic — DFPlayer Serial Link
//
// UART byte sink behind the Transport trait. The module needs a short pause
// after each frame before it will accept another command, so the gap is
// enforced here rather than in the engine.

use std::thread;
use std::time::Duration;

use esp_idf_hal::uart::UartDriver;

use crate::dfplayer::Transport;

pub struct DfPlayerLink<'d> {
    uart: UartDriver<'d>,
    command_gap: Duration,
}

impl<'d> DfPlayerLink<'d> {
    pub fn new(uart: UartDriver<'d>, command_gap: Duration) -> Self {
        Self { uart, command_gap }
    }
}

impl Transport for DfPlayerLink<'_> {
    /// Fire-and-forget: a write failure is logged and dropped — there is no
    /// ack path to the DFPlayer anyway.
    fn transmit(&mut self, bytes: &[u8]) {
        if let Err(e) = self.uart.write(bytes) {
            log::warn!("DFPlayer uart write failed: {}", e);
        }
        if !self.command_gap.is_zero() {
            thread::sleep(self.command_gap);
        }
    }
}

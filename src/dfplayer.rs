// FlexSonic — DFPlayer Mini Command Framing
//
// The DFPlayer speaks a fixed 10-byte serial frame:
//
//   7E FF 06 <cmd> 00 <param_hi> <param_lo> <chk_hi> <chk_lo> EF
//
// The checksum is the 16-bit two's-complement negation of the sum of bytes
// 1..=6, stored big-endian. A frame with a bad checksum is silently dropped
// by the module; with the feedback byte held at 0x00 there is no ack path,
// so every command is fire-and-forget.

pub const CMD_PLAY_TRACK: u8 = 0x03;
pub const CMD_SET_VOLUME: u8 = 0x06;
pub const CMD_LOOP_TRACK: u8 = 0x0F;
pub const CMD_STOP: u8 = 0x16;

pub const FRAME_LEN: usize = 10;

const START: u8 = 0x7E;
const VERSION: u8 = 0xFF;
const PAYLOAD_LEN: u8 = 0x06;
const NO_FEEDBACK: u8 = 0x00;
const END: u8 = 0xEF;

/// Build the 10-byte frame for one command.
pub fn frame(command: u8, parameter: u16) -> [u8; FRAME_LEN] {
    let mut packet = [0u8; FRAME_LEN];
    packet[0] = START;
    packet[1] = VERSION;
    packet[2] = PAYLOAD_LEN;
    packet[3] = command;
    packet[4] = NO_FEEDBACK;
    packet[5..7].copy_from_slice(&parameter.to_be_bytes());
    let chk = checksum(&packet);
    packet[7..9].copy_from_slice(&chk.to_be_bytes());
    packet[9] = END;
    packet
}

/// Checksum over bytes 1..=6 (version through parameter low byte).
/// Valid for partially built frames too — the checksum bytes themselves
/// are not part of the sum.
pub fn checksum(packet: &[u8; FRAME_LEN]) -> u16 {
    let sum: u16 = packet[1..7].iter().map(|&b| u16::from(b)).sum();
    0u16.wrapping_sub(sum)
}

/// One-way byte sink for framed commands. The hardware implementation is a
/// UART; tests substitute a recording buffer.
pub trait Transport {
    /// Hand a frame to the link. No return value: delivery is unconfirmed
    /// by design, and transport errors are the implementor's to log.
    fn transmit(&mut self, bytes: &[u8]);
}

/// Command writer for one DFPlayer module behind a [`Transport`].
pub struct DfPlayer<T: Transport> {
    link: T,
}

impl<T: Transport> DfPlayer<T> {
    pub fn new(link: T) -> Self {
        Self { link }
    }

    /// Borrow the underlying link (the glove's serial transport keeps its
    /// command-gap state there).
    pub fn transport(&self) -> &T {
        &self.link
    }

    /// Play track `NNNN.mp3` from the SD card root (1-based).
    pub fn play_track(&mut self, track: u16) {
        log::info!("DFPlayer: play track {:04}", track);
        self.send(CMD_PLAY_TRACK, track);
    }

    /// Loop a single track continuously.
    pub fn loop_track(&mut self, track: u16) {
        log::info!("DFPlayer: loop track {:04}", track);
        self.send(CMD_LOOP_TRACK, track);
    }

    /// Set output volume, 0–30.
    pub fn set_volume(&mut self, volume: u8) {
        log::info!("DFPlayer: volume {}", volume);
        self.send(CMD_SET_VOLUME, u16::from(volume));
    }

    /// Stop playback.
    pub fn stop(&mut self) {
        log::info!("DFPlayer: stop");
        self.send(CMD_STOP, 0);
    }

    fn send(&mut self, command: u8, parameter: u16) {
        let packet = frame(command, parameter);
        log::debug!("DFPlayer tx: {:02X?}", packet);
        self.link.transmit(&packet);
    }
}

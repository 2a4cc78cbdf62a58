//! Look-Up Table for the full refresh waveform
//!
//! The IL3820 drives pixel transitions from a 30-byte waveform table loaded
//! with [`WRITE_LUT_REGISTER`](crate::command::WRITE_LUT_REGISTER). The
//! table below is the vendor full-update waveform for the 2.9" panel.

/// LUT size required by the IL3820 controller
pub const LUT_SIZE: usize = 30;

/// Full update waveform
///
/// Slowest refresh, best contrast, no ghosting.
pub const LUT_FULL_UPDATE: [u8; LUT_SIZE] = [
    0x02, 0x02, 0x01, 0x11, 0x12, 0x12, 0x22, 0x22, //
    0x66, 0x69, 0x69, 0x59, 0x58, 0x99, 0x99, 0x88, //
    0x00, 0x00, 0x00, 0x00, 0xF8, 0xB4, 0x13, 0x51, //
    0x35, 0x51, 0x51, 0x19, 0x01, 0x00,
];

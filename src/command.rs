//! IL3820 command definitions
//!
//! This module defines the command bytes used to control the IL3820
//! e-paper display controller. Commands are sent over SPI with the DC pin
//! low for commands and high for data.
//!
//! ## Command Structure
//!
//! All commands follow the pattern:
//! 1. Assert CS (Chip Select)
//! 2. Set DC low (command mode)
//! 3. Send command byte
//! 4. Set DC high (data mode)
//! 5. Send data bytes (if any)
//! 6. Deassert CS

// System control commands

/// Driver output control command (0x01)
///
/// Sets the number of gate outputs (rows) and scanning direction.
/// Requires 3 bytes: [rows-1 (LSB), rows-1 (MSB), scanning mode]
pub const DRIVER_OUTPUT_CONTROL: u8 = 0x01;

/// Booster soft-start control command (0x0C)
///
/// Controls the power-on sequence of the booster circuit.
/// Requires 3 bytes of data.
pub const BOOSTER_SOFT_START_CONTROL: u8 = 0x0C;

/// Gate scan start position command (0x0F)
///
/// Selects the first gate line driven during a scan. Part of the vendor
/// command set; left at its power-on default by this driver.
pub const GATE_SCAN_START_POSITION: u8 = 0x0F;

/// Deep sleep mode command (0x10)
///
/// Enters ultra-low power mode. Only a hardware reset can wake the panel.
/// Requires 1 byte: [`DEEP_SLEEP_ENTER`]
pub const DEEP_SLEEP_MODE: u8 = 0x10;

/// Data entry mode command (0x11)
///
/// Controls the address counter auto-increment direction.
/// Requires 1 byte:
/// - Bit 0 (ID0): X direction (0=decrement, 1=increment)
/// - Bit 1 (ID1): Y direction (0=decrement, 1=increment)
/// - Bit 2 (AM): Address counter direction (0=X, 1=Y)
pub const DATA_ENTRY_MODE_SETTING: u8 = 0x11;

/// Soft reset command (0x12)
///
/// Resets the controller to default state. Must wait for BUSY low after
/// issuing.
pub const SW_RESET: u8 = 0x12;

/// Temperature sensor control command (0x1A)
///
/// Writes a temperature value used for refresh timing.
/// Part of the vendor command set; unused when a LUT is loaded explicitly.
pub const TEMPERATURE_SENSOR_CONTROL: u8 = 0x1A;

// Display update commands

/// Master activation command (0x20)
///
/// Triggers the display update sequence. BUSY goes high during update.
pub const MASTER_ACTIVATION: u8 = 0x20;

/// Display update control 1 command (0x21)
///
/// Controls which RAM sources are used for the display update.
pub const DISPLAY_UPDATE_CONTROL_1: u8 = 0x21;

/// Display update control 2 command (0x22)
///
/// Selects the update sequence stages (clock, analog, pattern display).
/// Requires 1 byte: [`DISPLAY_UPDATE_SEQUENCE`] for a full refresh.
pub const DISPLAY_UPDATE_CONTROL_2: u8 = 0x22;

// RAM and data commands

/// Write RAM command (0x24)
///
/// Writes pixel data starting at the current RAM cursor.
/// Bit=0: black, Bit=1: white.
pub const WRITE_RAM: u8 = 0x24;

/// Write VCOM register command (0x2C)
///
/// Sets the VCOM voltage for the common electrode.
/// Requires 1 byte.
pub const WRITE_VCOM_REGISTER: u8 = 0x2C;

/// Write LUT register command (0x32)
///
/// Loads the waveform Look-Up Table driving pixel transitions.
/// Requires 30 bytes on this controller.
pub const WRITE_LUT_REGISTER: u8 = 0x32;

/// Set dummy line period command (0x3A)
///
/// Number of dummy line periods per gate. Requires 1 byte.
pub const SET_DUMMY_LINE_PERIOD: u8 = 0x3A;

/// Set gate time command (0x3B)
///
/// Gate line width in TGate units. Requires 1 byte.
pub const SET_GATE_TIME: u8 = 0x3B;

/// Border waveform control command (0x3C)
///
/// Controls the border color and transition behavior.
/// Requires 1 byte.
pub const BORDER_WAVEFORM_CONTROL: u8 = 0x3C;

/// Set RAM X address range command (0x44)
///
/// Sets the X (column) address window for RAM access. X addresses are in
/// **bytes** on this controller: each value covers 8 pixels, so pixel
/// coordinates are shifted right by 3 before sending.
/// Requires 2 bytes: [start, end]
pub const SET_RAM_X_ADDRESS_START_END_POSITION: u8 = 0x44;

/// Set RAM Y address range command (0x45)
///
/// Sets the Y (row) address window for RAM access. Y addresses are full
/// 16-bit pixel values, little-endian.
/// Requires 4 bytes: [start_LSB, start_MSB, end_LSB, end_MSB]
pub const SET_RAM_Y_ADDRESS_START_END_POSITION: u8 = 0x45;

/// Set RAM X address counter command (0x4E)
///
/// Positions the RAM cursor on the X axis (byte units, pixel >> 3).
/// Requires 1 byte.
pub const SET_RAM_X_ADDRESS_COUNTER: u8 = 0x4E;

/// Set RAM Y address counter command (0x4F)
///
/// Positions the RAM cursor on the Y axis (16-bit little-endian pixels).
/// Requires 2 bytes: [address_LSB, address_MSB]
pub const SET_RAM_Y_ADDRESS_COUNTER: u8 = 0x4F;

/// Terminate frame read/write command (0xFF)
///
/// NOP that closes out a RAM access sequence after master activation.
pub const TERMINATE_FRAME_READ_WRITE: u8 = 0xFF;

// Fixed data bytes

/// Data byte for [`DEEP_SLEEP_MODE`]: enter deep sleep.
pub const DEEP_SLEEP_ENTER: u8 = 0x01;

/// Data byte for [`DISPLAY_UPDATE_CONTROL_2`]: enable clock and analog,
/// then display the pattern from RAM.
pub const DISPLAY_UPDATE_SEQUENCE: u8 = 0xC4;

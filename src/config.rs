//! Display configuration types and builder
//!
//! The register values programmed during every wake sequence, together with
//! the waveform LUT, are immutable configuration captured in a [`Config`] at
//! display creation. The defaults are the vendor values for the Waveshare
//! 2.9" module; a [`Builder`] is provided for panels of the same class that
//! need different tuning.

pub use crate::error::{BuilderError, MAX_GATE_OUTPUTS, MAX_SOURCE_OUTPUTS};
use crate::lut::{LUT_FULL_UPDATE, LUT_SIZE};

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of rows (height in pixels, corresponds to gate outputs)
    pub rows: u16,
    /// Number of columns (width in pixels, corresponds to source outputs)
    pub cols: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - rows == 0 or rows > MAX_GATE_OUTPUTS
    /// - cols == 0 or cols > MAX_SOURCE_OUTPUTS
    /// - cols % 8 != 0 (RAM addressing is byte-granular on the X axis)
    pub fn new(rows: u16, cols: u16) -> Result<Self, BuilderError> {
        if rows == 0 || rows > MAX_GATE_OUTPUTS {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        if cols == 0 || cols > MAX_SOURCE_OUTPUTS || cols % 8 != 0 {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Dimensions of the Waveshare 2.9" module (128 x 296)
    pub const fn waveshare_2in9() -> Self {
        Self { rows: 296, cols: 128 }
    }

    /// Calculate required buffer size in bytes
    pub fn buffer_size(&self) -> usize {
        (self.cols as usize).div_ceil(8) * self.rows as usize
    }
}

/// Display configuration
///
/// Holds every register value issued during the wake sequence.
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Gate scanning direction byte (third DRIVER_OUTPUT_CONTROL byte)
    pub gate_scanning: u8,
    /// Booster soft-start settings (3 bytes for command 0x0C)
    pub booster_soft_start: [u8; 3],
    /// VCOM register value
    pub vcom: u8,
    /// Dummy line period per gate
    pub dummy_line_period: u8,
    /// Gate line width
    pub gate_time: u8,
    /// Border waveform setting
    pub border_waveform: u8,
    /// Data entry mode byte
    pub data_entry_mode: u8,
    /// Waveform LUT loaded on every wake
    pub lut: [u8; LUT_SIZE],
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use il3820::{Builder, Dimensions};
///
/// let config = Builder::new()
///     .dimensions(Dimensions::waveshare_2in9())
///     .build();
/// assert!(config.is_ok());
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Gate scanning direction byte
    gate_scanning: u8,
    /// Booster soft-start settings
    booster_soft_start: [u8; 3],
    /// VCOM register value
    vcom: u8,
    /// Dummy line period per gate
    dummy_line_period: u8,
    /// Gate line width
    gate_time: u8,
    /// Border waveform setting
    border_waveform: u8,
    /// Data entry mode byte
    data_entry_mode: u8,
    /// Waveform LUT
    lut: [u8; LUT_SIZE],
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            // Default gate scanning (GD = SM = TB = 0)
            gate_scanning: 0x00,
            // Vendor booster soft-start sequence for the 2.9" module
            booster_soft_start: [0xD7, 0xD6, 0x9D],
            // 7V common electrode
            vcom: 0xA8,
            // 4 dummy lines per gate
            dummy_line_period: 0x1A,
            // 2us per line
            gate_time: 0x08,
            border_waveform: 0x03,
            // X and Y increment, counter along X
            data_entry_mode: 0x03,
            lut: LUT_FULL_UPDATE,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set gate scanning direction
    pub fn gate_scanning(mut self, value: u8) -> Self {
        self.gate_scanning = value;
        self
    }

    /// Set booster soft-start parameters
    pub fn booster_soft_start(mut self, values: [u8; 3]) -> Self {
        self.booster_soft_start = values;
        self
    }

    /// Set VCOM value
    pub fn vcom(mut self, value: u8) -> Self {
        self.vcom = value;
        self
    }

    /// Set the dummy line period
    pub fn dummy_line_period(mut self, value: u8) -> Self {
        self.dummy_line_period = value;
        self
    }

    /// Set the gate time
    pub fn gate_time(mut self, value: u8) -> Self {
        self.gate_time = value;
        self
    }

    /// Set border waveform
    pub fn border_waveform(mut self, value: u8) -> Self {
        self.border_waveform = value;
        self
    }

    /// Set data entry mode
    pub fn data_entry_mode(mut self, value: u8) -> Self {
        self.data_entry_mode = value;
        self
    }

    /// Set the waveform LUT loaded on every wake
    pub fn lut(mut self, lut: [u8; LUT_SIZE]) -> Self {
        self.lut = lut;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            gate_scanning: self.gate_scanning,
            booster_soft_start: self.booster_soft_start,
            vcom: self.vcom,
            dummy_line_period: self.dummy_line_period,
            gate_time: self.gate_time,
            border_waveform: self.border_waveform,
            data_entry_mode: self.data_entry_mode,
            lut: self.lut,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveshare_2in9_dimensions_are_valid() {
        let dims = Dimensions::waveshare_2in9();
        assert_eq!(Dimensions::new(dims.rows, dims.cols).unwrap(), dims);
        assert_eq!(dims.buffer_size(), 16 * 296);
    }

    #[test]
    fn test_dimensions_reject_zero() {
        assert!(Dimensions::new(0, 128).is_err());
        assert!(Dimensions::new(296, 0).is_err());
    }

    #[test]
    fn test_dimensions_reject_out_of_class() {
        assert!(Dimensions::new(297, 128).is_err());
        assert!(Dimensions::new(296, 136).is_err());
    }

    #[test]
    fn test_dimensions_reject_unaligned_cols() {
        assert!(Dimensions::new(296, 126).is_err());
    }

    #[test]
    fn test_builder_requires_dimensions() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingDimensions)
        ));
    }

    #[test]
    fn test_builder_defaults_match_vendor_values() {
        let config = Builder::new()
            .dimensions(Dimensions::waveshare_2in9())
            .build()
            .unwrap();
        assert_eq!(config.booster_soft_start, [0xD7, 0xD6, 0x9D]);
        assert_eq!(config.vcom, 0xA8);
        assert_eq!(config.dummy_line_period, 0x1A);
        assert_eq!(config.gate_time, 0x08);
        assert_eq!(config.border_waveform, 0x03);
        assert_eq!(config.data_entry_mode, 0x03);
        assert_eq!(config.lut, LUT_FULL_UPDATE);
    }
}

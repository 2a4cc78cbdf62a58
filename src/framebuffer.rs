//! In-memory 1-bit-per-pixel framebuffer
//!
//! The framebuffer mirrors the panel's RAM: one bit per pixel, packed
//! MSB-first into rows of `ceil(width / 8)` bytes. A pixel at (x, y) lives at
//! byte `stride * y + x / 8`, bit mask `0x80 >> (x % 8)`. Bit 1 is white and
//! bit 0 is black, matching the controller's WRITE_RAM convention, so the
//! buffer is streamed to the panel byte-for-byte.
//!
//! ## Example
//!
//! ```
//! use il3820::{Color, Framebuffer, WriteMode};
//!
//! let mut frame = Framebuffer::new(16, 4).unwrap();
//! frame.clear(Color::Black); // black foreground, white background
//!
//! frame.set_pixel(3, 1, WriteMode::Foreground, Color::Black).unwrap();
//! assert_eq!(frame.pixel(3, 1).unwrap(), Color::Black);
//! assert_eq!(frame.row(1), &[0xEF, 0xFF]);
//! ```

use alloc::vec::Vec;

use crate::color::{Color, WriteMode};
use crate::error::FramebufferError;

/// Bit-packed image buffer covering the full pixel grid
///
/// Allocated once at display creation; the dimensions never change
/// afterwards.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row length in bytes, `ceil(width / 8)`
    stride: usize,
    /// Packed pixel data, `stride * height` bytes
    buf: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a zero-filled framebuffer
    ///
    /// # Errors
    ///
    /// Returns [`FramebufferError::OutOfMemory`] if the buffer cannot be
    /// allocated.
    pub fn new(width: u32, height: u32) -> Result<Self, FramebufferError> {
        let stride = (width as usize).div_ceil(8);
        let buflen = stride * height as usize;

        let mut buf = Vec::new();
        buf.try_reserve_exact(buflen)
            .map_err(|_| FramebufferError::OutOfMemory)?;
        buf.resize(buflen, 0x00);

        Ok(Self {
            width,
            height,
            stride,
            buf,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row length in bytes
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Apply a bit update at (x, y)
    ///
    /// `WriteMode::Foreground` writes `color`, `WriteMode::Background`
    /// writes its inverse, and `WriteMode::Toggle` flips the pixel ignoring
    /// `color`.
    ///
    /// # Errors
    ///
    /// Returns [`FramebufferError::OutOfRange`] when (x, y) lies outside the
    /// pixel grid; the buffer is left untouched.
    pub fn set_pixel(
        &mut self,
        x: u32,
        y: u32,
        mode: WriteMode,
        color: Color,
    ) -> Result<(), FramebufferError> {
        if x >= self.width || y >= self.height {
            return Err(FramebufferError::OutOfRange { x, y });
        }

        let index = self.stride * y as usize + (x / 8) as usize;
        let mask = 0x80u8 >> (x % 8);

        match mode {
            WriteMode::Foreground => {
                if color == Color::White {
                    self.buf[index] |= mask;
                } else {
                    self.buf[index] &= !mask;
                }
            }
            WriteMode::Background => {
                if color == Color::White {
                    self.buf[index] &= !mask;
                } else {
                    self.buf[index] |= mask;
                }
            }
            WriteMode::Toggle => self.buf[index] ^= mask,
        }

        Ok(())
    }

    /// Read back the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns [`FramebufferError::OutOfRange`] when (x, y) lies outside the
    /// pixel grid.
    pub fn pixel(&self, x: u32, y: u32) -> Result<Color, FramebufferError> {
        if x >= self.width || y >= self.height {
            return Err(FramebufferError::OutOfRange { x, y });
        }

        let index = self.stride * y as usize + (x / 8) as usize;
        let mask = 0x80u8 >> (x % 8);

        if self.buf[index] & mask != 0 {
            Ok(Color::White)
        } else {
            Ok(Color::Black)
        }
    }

    /// Fill the whole buffer with the background of `foreground`
    ///
    /// Every byte becomes the bit-complement of the foreground color, i.e.
    /// the image is solid background.
    pub fn clear(&mut self, foreground: Color) {
        let fill = !foreground.byte();
        self.buf.fill(fill);
    }

    /// The bytes of row `y`, in increasing x order
    ///
    /// This is the unit streamed to the panel during a refresh.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.stride * y as usize;
        &self.buf[start..start + self.stride]
    }

    /// The whole packed buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Human-readable hex grid of the buffer contents
    ///
    /// Purely observational, for diagnostics:
    ///
    /// ```text
    /// byte    00 01 02 ...
    /// 0000 0x FF FF FF ...
    /// 0001 0x FF EF FF ...
    /// ```
    pub fn hex_dump(&self) -> HexDump<'_> {
        HexDump(self)
    }
}

/// Display adapter produced by [`Framebuffer::hex_dump`]
pub struct HexDump<'a>(&'a Framebuffer);

impl core::fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "byte   ")?;
        for x in 0..self.0.stride {
            write!(f, " {x:02}")?;
        }
        writeln!(f)?;

        for y in 0..self.0.height {
            write!(f, "{y:04} 0x")?;
            for byte in self.0.row(y) {
                write!(f, " {byte:02X}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_stride_rounds_up_to_whole_bytes() {
        let frame = Framebuffer::new(12, 3).unwrap();
        assert_eq!(frame.stride(), 2);
        assert_eq!(frame.as_bytes().len(), 6);

        let frame = Framebuffer::new(128, 296).unwrap();
        assert_eq!(frame.stride(), 16);
        assert_eq!(frame.as_bytes().len(), 16 * 296);
    }

    #[test]
    fn test_set_pixel_foreground_reads_back() {
        let mut frame = Framebuffer::new(16, 4).unwrap();
        frame.clear(Color::Black);

        frame
            .set_pixel(5, 2, WriteMode::Foreground, Color::Black)
            .unwrap();
        assert_eq!(frame.pixel(5, 2).unwrap(), Color::Black);
        // Neighbors keep the background
        assert_eq!(frame.pixel(4, 2).unwrap(), Color::White);
        assert_eq!(frame.pixel(6, 2).unwrap(), Color::White);
    }

    #[test]
    fn test_set_pixel_background_writes_complement() {
        let mut frame = Framebuffer::new(16, 4).unwrap();
        frame.clear(Color::Black);

        frame
            .set_pixel(5, 2, WriteMode::Foreground, Color::Black)
            .unwrap();
        frame
            .set_pixel(5, 2, WriteMode::Background, Color::Black)
            .unwrap();
        assert_eq!(frame.pixel(5, 2).unwrap(), Color::White);
    }

    #[test]
    fn test_toggle_twice_restores_pixel() {
        let mut frame = Framebuffer::new(16, 4).unwrap();
        frame.clear(Color::Black);

        frame
            .set_pixel(9, 1, WriteMode::Toggle, Color::Black)
            .unwrap();
        assert_eq!(frame.pixel(9, 1).unwrap(), Color::Black);
        frame
            .set_pixel(9, 1, WriteMode::Toggle, Color::Black)
            .unwrap();
        assert_eq!(frame.pixel(9, 1).unwrap(), Color::White);
    }

    #[test]
    fn test_set_pixel_out_of_range_has_no_side_effect() {
        let mut frame = Framebuffer::new(16, 4).unwrap();
        frame.clear(Color::Black);
        let before = frame.as_bytes().to_vec();

        assert_eq!(
            frame.set_pixel(16, 0, WriteMode::Foreground, Color::Black),
            Err(FramebufferError::OutOfRange { x: 16, y: 0 })
        );
        assert_eq!(
            frame.set_pixel(0, 4, WriteMode::Foreground, Color::Black),
            Err(FramebufferError::OutOfRange { x: 0, y: 4 })
        );
        assert_eq!(frame.as_bytes(), &before[..]);
    }

    #[test]
    fn test_clear_fills_with_background_everywhere() {
        let mut frame = Framebuffer::new(16, 4).unwrap();

        frame.clear(Color::Black);
        for y in 0..4 {
            for x in 0..16 {
                assert_eq!(frame.pixel(x, y).unwrap(), Color::White);
            }
        }

        frame.clear(Color::White);
        for y in 0..4 {
            for x in 0..16 {
                assert_eq!(frame.pixel(x, y).unwrap(), Color::Black);
            }
        }
    }

    #[test]
    fn test_msb_first_bit_order_within_byte() {
        let mut frame = Framebuffer::new(8, 1).unwrap();
        frame
            .set_pixel(0, 0, WriteMode::Foreground, Color::White)
            .unwrap();
        assert_eq!(frame.row(0), &[0x80]);

        frame
            .set_pixel(7, 0, WriteMode::Foreground, Color::White)
            .unwrap();
        assert_eq!(frame.row(0), &[0x81]);
    }

    #[test]
    fn test_row_returns_correct_slice() {
        let mut frame = Framebuffer::new(16, 3).unwrap();
        frame
            .set_pixel(0, 1, WriteMode::Foreground, Color::White)
            .unwrap();
        assert_eq!(frame.row(0), &[0x00, 0x00]);
        assert_eq!(frame.row(1), &[0x80, 0x00]);
        assert_eq!(frame.row(2), &[0x00, 0x00]);
    }

    #[test]
    fn test_hex_dump_lists_rows_and_columns() {
        let mut frame = Framebuffer::new(16, 2).unwrap();
        frame.clear(Color::Black);
        frame
            .set_pixel(0, 1, WriteMode::Foreground, Color::Black)
            .unwrap();

        let dump = frame.hex_dump().to_string();
        assert!(dump.contains("byte    00 01"));
        assert!(dump.contains("0000 0x FF FF"));
        assert!(dump.contains("0001 0x 7F FF"));
    }
}

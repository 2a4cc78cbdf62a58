//! Rasterization of points, lines, and paths into the framebuffer
//!
//! All drawing is expressed as [`Framebuffer`] mutations; nothing here
//! touches the hardware. Lines are interpolated along their dominant axis
//! (the one with the larger extent) so every step of the independent
//! variable produces exactly one pixel and the dependent coordinate never
//! jumps by more than one - no gaps, no doubled pixels.
//!
//! With the `graphics` feature this module also implements
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) for
//! [`Framebuffer`], so `embedded-graphics` primitives, text, and images can
//! be drawn into the same buffer as the native operations.
//!
//! ## Example
//!
//! ```
//! use il3820::{Color, Coordinate, Framebuffer, WriteMode};
//!
//! let mut frame = Framebuffer::new(16, 16).unwrap();
//! frame.clear(Color::Black);
//!
//! frame
//!     .draw_line(
//!         Coordinate { x: 0, y: 0 },
//!         Coordinate { x: 15, y: 15 },
//!         WriteMode::Foreground,
//!         Color::Black,
//!     )
//!     .unwrap();
//! assert_eq!(frame.pixel(8, 8).unwrap(), Color::Black);
//! ```

use crate::color::{Color, WriteMode};
use crate::error::FramebufferError;
use crate::framebuffer::Framebuffer;
use crate::path::{Coordinate, Path};

/// Round a non-negative interpolated coordinate to the nearest integer
fn round_to_nearest(value: f32) -> u32 {
    (value + 0.5) as u32
}

impl Framebuffer {
    /// Draw a single point
    ///
    /// # Errors
    ///
    /// Returns [`FramebufferError::OutOfRange`] for a coordinate outside the
    /// pixel grid; the error is local to this call.
    pub fn draw_point(
        &mut self,
        x: u32,
        y: u32,
        mode: WriteMode,
        color: Color,
    ) -> Result<(), FramebufferError> {
        self.set_pixel(x, y, mode, color)
    }

    /// Draw a line segment between two coordinates, endpoints inclusive
    ///
    /// Both endpoints are validated up front: an out-of-range endpoint
    /// leaves the buffer untouched rather than drawing a partial line.
    /// Endpoint order does not matter.
    ///
    /// # Errors
    ///
    /// Returns [`FramebufferError::OutOfRange`] for an endpoint outside the
    /// pixel grid.
    pub fn draw_line(
        &mut self,
        from: Coordinate,
        to: Coordinate,
        mode: WriteMode,
        color: Color,
    ) -> Result<(), FramebufferError> {
        self.bounds_check(from)?;
        self.bounds_check(to)?;

        // Axis-aligned lines have no slope to interpolate; step the single
        // varying axis directly.
        if from.x == to.x {
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                self.set_pixel(from.x, y, mode, color)?;
            }
            return Ok(());
        }
        if from.y == to.y {
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                self.set_pixel(x, from.y, mode, color)?;
            }
            return Ok(());
        }

        let run = from.x.abs_diff(to.x);
        let rise = from.y.abs_diff(to.y);

        if run >= rise {
            // X dominant: y = m*x + c
            let m = (to.y as f32 - from.y as f32) / (to.x as f32 - from.x as f32);
            let c = from.y as f32 - m * from.x as f32;
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                let y = round_to_nearest(m * x as f32 + c);
                self.set_pixel(x, y, mode, color)?;
            }
        } else {
            // Y dominant: x = m*y + c
            let m = (to.x as f32 - from.x as f32) / (to.y as f32 - from.y as f32);
            let c = from.x as f32 - m * from.y as f32;
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                let x = round_to_nearest(m * y as f32 + c);
                self.set_pixel(x, y, mode, color)?;
            }
        }

        Ok(())
    }

    /// Draw a line between each consecutive pair of path coordinates
    ///
    /// An empty or single-coordinate path draws nothing.
    ///
    /// # Errors
    ///
    /// Returns [`FramebufferError::OutOfRange`] if a coordinate lies outside
    /// this buffer (possible when the path was created with larger bounds).
    pub fn draw_path(
        &mut self,
        path: &Path,
        mode: WriteMode,
        color: Color,
    ) -> Result<(), FramebufferError> {
        for pair in path.coordinates().windows(2) {
            self.draw_line(pair[0], pair[1], mode, color)?;
        }
        Ok(())
    }

    fn bounds_check(&self, coordinate: Coordinate) -> Result<(), FramebufferError> {
        if coordinate.x >= self.width() || coordinate.y >= self.height() {
            return Err(FramebufferError::OutOfRange {
                x: coordinate.x,
                y: coordinate.y,
            });
        }
        Ok(())
    }
}

#[cfg(feature = "graphics")]
mod draw_target {
    use core::convert::Infallible;
    use embedded_graphics_core::{
        draw_target::DrawTarget,
        geometry::{OriginDimensions, Size},
        prelude::Pixel,
    };

    use crate::color::WriteMode;
    use crate::framebuffer::Framebuffer;

    impl DrawTarget for Framebuffer {
        type Color = crate::color::Color;
        type Error = Infallible;

        fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
        where
            Iter: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if point.x < 0 || point.y < 0 {
                    continue;
                }
                // Out-of-bounds pixels are clipped, per the DrawTarget contract
                let _ = self.set_pixel(
                    point.x as u32,
                    point.y as u32,
                    WriteMode::Foreground,
                    color,
                );
            }
            Ok(())
        }
    }

    impl OriginDimensions for Framebuffer {
        fn size(&self) -> Size {
            Size::new(self.width(), self.height())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn set_pixels(frame: &Framebuffer) -> Vec<(u32, u32)> {
        let mut pixels = Vec::new();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                if frame.pixel(x, y).unwrap() == Color::Black {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    fn black_on_white(width: u32, height: u32) -> Framebuffer {
        let mut frame = Framebuffer::new(width, height).unwrap();
        frame.clear(Color::Black);
        frame
    }

    #[test]
    fn test_zero_length_line_sets_exactly_one_pixel() {
        let mut frame = black_on_white(16, 16);
        frame
            .draw_line(
                Coordinate { x: 0, y: 0 },
                Coordinate { x: 0, y: 0 },
                WriteMode::Foreground,
                Color::Black,
            )
            .unwrap();
        assert_eq!(set_pixels(&frame), alloc::vec![(0, 0)]);
    }

    #[test]
    fn test_horizontal_line() {
        let mut frame = black_on_white(16, 4);
        frame
            .draw_line(
                Coordinate { x: 12, y: 2 },
                Coordinate { x: 3, y: 2 },
                WriteMode::Foreground,
                Color::Black,
            )
            .unwrap();
        let pixels = set_pixels(&frame);
        assert_eq!(pixels.len(), 10);
        assert!(pixels.iter().all(|&(x, y)| y == 2 && (3..=12).contains(&x)));
    }

    #[test]
    fn test_vertical_line() {
        let mut frame = black_on_white(8, 16);
        frame
            .draw_line(
                Coordinate { x: 5, y: 1 },
                Coordinate { x: 5, y: 14 },
                WriteMode::Foreground,
                Color::Black,
            )
            .unwrap();
        let pixels = set_pixels(&frame);
        assert_eq!(pixels.len(), 14);
        assert!(pixels.iter().all(|&(x, _)| x == 5));
    }

    #[test]
    fn test_diagonal_line_is_gapless_along_dominant_axis() {
        // Taller than wide: y is the dominant axis
        let mut frame = black_on_white(16, 64);
        frame
            .draw_line(
                Coordinate { x: 0, y: 0 },
                Coordinate { x: 15, y: 63 },
                WriteMode::Foreground,
                Color::Black,
            )
            .unwrap();

        let pixels = set_pixels(&frame);
        assert_eq!(pixels.len(), 64);

        let mut by_row: Vec<u32> = Vec::new();
        for y in 0..64 {
            let row: Vec<u32> = pixels
                .iter()
                .filter(|&&(_, py)| py == y)
                .map(|&(px, _)| px)
                .collect();
            // Exactly one pixel per step of the dominant axis
            assert_eq!(row.len(), 1, "row {y}");
            by_row.push(row[0]);
        }
        // Dependent coordinate is monotonic and never skips
        for step in by_row.windows(2) {
            assert!(step[1] >= step[0]);
            assert!(step[1] - step[0] <= 1);
        }
        assert_eq!(by_row[0], 0);
        assert_eq!(by_row[63], 15);
    }

    #[test]
    fn test_line_endpoint_order_does_not_matter() {
        let mut forward = black_on_white(32, 8);
        let mut backward = black_on_white(32, 8);
        let a = Coordinate { x: 2, y: 1 };
        let b = Coordinate { x: 29, y: 6 };

        forward
            .draw_line(a, b, WriteMode::Foreground, Color::Black)
            .unwrap();
        backward
            .draw_line(b, a, WriteMode::Foreground, Color::Black)
            .unwrap();
        assert_eq!(forward.as_bytes(), backward.as_bytes());
    }

    #[test]
    fn test_line_with_invalid_endpoint_draws_nothing() {
        let mut frame = black_on_white(16, 16);
        let result = frame.draw_line(
            Coordinate { x: 0, y: 0 },
            Coordinate { x: 16, y: 8 },
            WriteMode::Foreground,
            Color::Black,
        );
        assert_eq!(result, Err(FramebufferError::OutOfRange { x: 16, y: 8 }));
        assert!(set_pixels(&frame).is_empty());
    }

    #[test]
    fn test_draw_path_connects_consecutive_coordinates() {
        let mut frame = black_on_white(16, 16);
        let mut path = Path::new(16, 16);
        path.append(0, 0).unwrap();
        path.append(10, 0).unwrap();
        path.append(10, 10).unwrap();

        frame
            .draw_path(&path, WriteMode::Foreground, Color::Black)
            .unwrap();
        // Corner pixels of both segments
        assert_eq!(frame.pixel(0, 0).unwrap(), Color::Black);
        assert_eq!(frame.pixel(5, 0).unwrap(), Color::Black);
        assert_eq!(frame.pixel(10, 0).unwrap(), Color::Black);
        assert_eq!(frame.pixel(10, 5).unwrap(), Color::Black);
        assert_eq!(frame.pixel(10, 10).unwrap(), Color::Black);
    }

    #[test]
    fn test_draw_path_with_fewer_than_two_coordinates_is_empty() {
        let mut frame = black_on_white(16, 16);
        let mut path = Path::new(16, 16);

        frame
            .draw_path(&path, WriteMode::Foreground, Color::Black)
            .unwrap();
        assert!(set_pixels(&frame).is_empty());

        path.append(5, 5).unwrap();
        frame
            .draw_path(&path, WriteMode::Foreground, Color::Black)
            .unwrap();
        assert!(set_pixels(&frame).is_empty());
    }

    #[test]
    fn test_toggle_mode_line_inverts_existing_pixels() {
        let mut frame = black_on_white(16, 4);
        let a = Coordinate { x: 0, y: 1 };
        let b = Coordinate { x: 15, y: 1 };

        frame
            .draw_line(a, b, WriteMode::Toggle, Color::Black)
            .unwrap();
        assert_eq!(set_pixels(&frame).len(), 16);
        frame
            .draw_line(a, b, WriteMode::Toggle, Color::Black)
            .unwrap();
        assert!(set_pixels(&frame).is_empty());
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_draw_target_places_primitive_pixels() {
        use embedded_graphics::{
            prelude::*,
            primitives::{PrimitiveStyle, Rectangle},
        };

        let mut frame = black_on_white(16, 16);
        Rectangle::new(Point::new(2, 3), Size::new(4, 5))
            .into_styled(PrimitiveStyle::with_fill(Color::Black))
            .draw(&mut frame)
            .unwrap();

        assert_eq!(frame.pixel(2, 3).unwrap(), Color::Black);
        assert_eq!(frame.pixel(5, 7).unwrap(), Color::Black);
        assert_eq!(frame.pixel(6, 3).unwrap(), Color::White);
        assert_eq!(frame.pixel(2, 8).unwrap(), Color::White);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_draw_target_clips_out_of_bounds_pixels() {
        use embedded_graphics::{
            prelude::*,
            primitives::{PrimitiveStyle, Rectangle},
        };

        let mut frame = black_on_white(8, 8);
        Rectangle::new(Point::new(-2, -2), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(Color::Black))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(set_pixels(&frame).len(), 64);
    }
}

//! IL3820 E-Paper Display Driver
//!
//! A driver for the IL3820/SSD1608-class e-paper controller fitted to the
//! Waveshare 2.9" monochrome module (128 x 296 pixels).
//!
//! ## Features
//!
//! - `no_std` compatible (requires `alloc`)
//! - `embedded-hal` v1.0 support
//! - In-memory 1-bit framebuffer with point, line, and path rasterization
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Strict power lifecycle: the panel is returned to deep sleep on every
//!   exit path, including drop and host termination requests, because a
//!   panel left energized is permanently damaged
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use il3820::{Builder, Coordinate, Dimensions, Display, Interface};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let busy = MockPin;
//! let interface = Interface::new(spi, dc, rst, busy);
//! let config = match Builder::new().dimensions(Dimensions::waveshare_2in9()).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! // Initializes the hardware and puts the panel to sleep
//! let mut display = match Display::new(interface, MockDelay, config) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//!
//! // Draw into the framebuffer, then push it to the panel
//! let _ = display.draw_line(
//!     Coordinate { x: 0, y: 0 },
//!     Coordinate { x: 127, y: 295 },
//! );
//! let _ = display.refresh();
//! ```

#![no_std]

extern crate alloc;

/// Color and write-mode types for the monochrome panel
pub mod color;
/// IL3820 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// In-memory 1-bit framebuffer
pub mod framebuffer;
/// Point, line, and path rasterization
pub mod graphics;
/// Hardware interface abstraction
pub mod interface;
/// Look-Up Table for the refresh waveform
pub mod lut;
/// Ordered coordinate sequences for path drawing
pub mod path;
/// Power lifecycle state and the termination guard
pub mod power;

pub use color::{Color, WriteMode};
pub use config::{Builder, Config, Dimensions, MAX_GATE_OUTPUTS, MAX_SOURCE_OUTPUTS};
pub use display::Display;
pub use error::{BuilderError, Error, FramebufferError, PathError};
pub use framebuffer::{Framebuffer, HexDump};
pub use interface::{
    DisplayInterface, Interface, InterfaceError, DEFAULT_BUSY_MAX_POLLS, DEFAULT_BUSY_POLL_MS,
    RESET_PULSE_MS,
};
pub use path::{Coordinate, Path};
pub use power::{PowerState, Shutdown};

//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`]
//! struct for communicating with the IL3820 controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The IL3820 requires:
//! - SPI bus (MOSI + SCK)
//! - 3 GPIO pins:
//!   - **DC**: Data/Command select (output)
//!   - **RST**: Reset (output, active low)
//!   - **BUSY**: Busy status (input, active high)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use il3820::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! # let mut delay = MockDelay;
//! // Create interface with SPI and GPIO pins
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//!
//! // Send command
//! let _ = interface.send_command(0x12); // Soft reset
//!
//! // Send data
//! let _ = interface.send_data(&[0xFF, 0x00, 0xFF]);
//!
//! // Wait for display ready
//! let _ = interface.busy_wait(&mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to the IL3820 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need
/// custom behavior (e.g., different pin polarities, additional CS control),
/// implement this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin low (command mode)
    /// 2. Send the command byte over SPI, with CS asserted only for the
    ///    duration of that single byte
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send the data bytes over SPI
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform the hardware reset pulse
    ///
    /// The implementation must step the RST pin high, low, high, holding
    /// each level for the reset delay.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset pin cannot be driven.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Wait for the busy pin to go low, with a bounded number of polls
    ///
    /// BUSY is active high - when high, the panel is processing a command
    /// and must not be sent new ones.
    ///
    /// Returns the elapsed wait time in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::Timeout`] if BUSY does not go low within
    /// the implementation-specific poll budget. A timeout usually means the
    /// panel has no power or a loose connection.
    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<u32, Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
    /// Timeout waiting for busy pin
    Timeout,
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::Timeout => write!(f, "Timeout waiting for display"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Reset pulse hold time in milliseconds
pub const RESET_PULSE_MS: u32 = 200;

/// Default busy poll interval in milliseconds
pub const DEFAULT_BUSY_POLL_MS: u32 = 100;

/// Default maximum number of busy polls before timing out
pub const DEFAULT_BUSY_MAX_POLLS: u32 = 100;

/// Hardware interface implementation for the IL3820
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BUSY` - Busy pin implementing [`InputPin`]
pub struct Interface<SPI, DC, RST, BUSY> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    /// Busy pin (active high)
    busy: BUSY,
    /// Busy poll interval in milliseconds
    busy_poll_ms: u32,
    /// Maximum number of busy polls before timing out
    busy_max_polls: u32,
}

impl<SPI, DC, RST, BUSY> Interface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    /// * `busy` - Busy pin (input, active high)
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            busy_poll_ms: DEFAULT_BUSY_POLL_MS,
            busy_max_polls: DEFAULT_BUSY_MAX_POLLS,
        }
    }

    /// Set the busy poll interval in milliseconds
    ///
    /// Default is 100ms.
    pub fn set_busy_poll(&mut self, poll_ms: u32) -> &mut Self {
        self.busy_poll_ms = poll_ms;
        self
    }

    /// Get the current busy poll interval in milliseconds
    pub fn busy_poll(&self) -> u32 {
        self.busy_poll_ms
    }

    /// Set the maximum number of busy polls before timing out
    ///
    /// Default is 100 polls (10 seconds at the default interval).
    pub fn set_busy_max_polls(&mut self, max_polls: u32) -> &mut Self {
        self.busy_max_polls = max_polls;
        self
    }

    /// Get the maximum number of busy polls
    pub fn busy_max_polls(&self) -> u32 {
        self.busy_max_polls
    }
}

impl<SPI, DC, RST, BUSY, PinErr> DisplayInterface for Interface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        // Reset pulse: HIGH -> LOW -> HIGH, holding each level
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_PULSE_MS);
        Ok(())
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<u32, Self::Error> {
        let mut polls = 0u32;

        loop {
            let is_busy = self.busy.is_high().map_err(InterfaceError::Pin)?;
            if !is_busy {
                return Ok(polls * self.busy_poll_ms);
            }

            if polls >= self.busy_max_polls {
                return Err(InterfaceError::Timeout);
            }
            delay.delay_ms(self.busy_poll_ms);
            polls += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct MockSpi;
    #[derive(Debug, Clone, Copy)]
    struct MockError;

    impl core::fmt::Display for MockError {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            write!(f, "mock error")
        }
    }

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> embedded_hal::spi::ErrorKind {
            embedded_hal::spi::ErrorKind::Other
        }
    }

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = MockError;
    }

    impl SpiDevice for MockSpi {
        fn transaction(
            &mut self,
            _operations: &mut [embedded_hal::spi::Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    /// Output pin that accepts anything; as an input, reads busy for the
    /// first `busy_reads` polls and idle afterwards.
    #[derive(Debug)]
    struct MockPin {
        busy_reads: u32,
    }

    impl MockPin {
        fn idle() -> Self {
            Self { busy_reads: 0 }
        }

        fn busy_for(polls: u32) -> Self {
            Self { busy_reads: polls }
        }
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = MockError;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            if self.busy_reads > 0 {
                self.busy_reads -= 1;
                Ok(true)
            } else {
                Ok(false)
            }
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|high| !high)
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    #[test]
    fn test_default_poll_settings() {
        let interface = Interface::new(MockSpi, MockPin::idle(), MockPin::idle(), MockPin::idle());
        assert_eq!(interface.busy_poll(), DEFAULT_BUSY_POLL_MS);
        assert_eq!(interface.busy_max_polls(), DEFAULT_BUSY_MAX_POLLS);
    }

    #[test]
    fn test_busy_wait_reports_elapsed_time() {
        let mut interface =
            Interface::new(MockSpi, MockPin::idle(), MockPin::idle(), MockPin::busy_for(3));
        let mut delay = MockDelay;
        let elapsed = interface.busy_wait(&mut delay).unwrap();
        assert_eq!(elapsed, 3 * DEFAULT_BUSY_POLL_MS);
    }

    #[test]
    fn test_busy_wait_idle_panel_returns_zero() {
        let mut interface =
            Interface::new(MockSpi, MockPin::idle(), MockPin::idle(), MockPin::idle());
        let mut delay = MockDelay;
        assert_eq!(interface.busy_wait(&mut delay).unwrap(), 0);
    }

    #[test]
    fn test_busy_wait_times_out_after_max_polls() {
        let mut interface = Interface::new(
            MockSpi,
            MockPin::idle(),
            MockPin::idle(),
            MockPin::busy_for(u32::MAX),
        );
        interface.set_busy_max_polls(5);
        let mut delay = MockDelay;
        let result = interface.busy_wait(&mut delay);
        assert!(matches!(result, Err(InterfaceError::Timeout)));
    }

    #[test]
    fn test_busy_wait_recovers_just_before_limit() {
        let mut interface = Interface::new(
            MockSpi,
            MockPin::idle(),
            MockPin::idle(),
            MockPin::busy_for(5),
        );
        interface.set_busy_max_polls(5);
        let mut delay = MockDelay;
        assert_eq!(interface.busy_wait(&mut delay).unwrap(), 5 * DEFAULT_BUSY_POLL_MS);
    }
}

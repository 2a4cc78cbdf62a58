//! Core display operations
//!
//! [`Display`] owns the hardware interface, the delay provider, and the
//! framebuffer, and sequences the panel's strict wake / RAM load / activate /
//! sleep protocol. The panel is damaged by being left energized, so every
//! operation that powers it on ends by returning it to deep sleep - on error
//! paths too - and dropping a `Display` issues one final sleep transition.

use embedded_hal::delay::DelayNs;

use crate::color::{Color, WriteMode};
use crate::command::{
    BOOSTER_SOFT_START_CONTROL, BORDER_WAVEFORM_CONTROL, DATA_ENTRY_MODE_SETTING,
    DEEP_SLEEP_ENTER, DEEP_SLEEP_MODE, DISPLAY_UPDATE_CONTROL_2, DISPLAY_UPDATE_SEQUENCE,
    DRIVER_OUTPUT_CONTROL, MASTER_ACTIVATION, SET_DUMMY_LINE_PERIOD, SET_GATE_TIME,
    SET_RAM_X_ADDRESS_COUNTER, SET_RAM_X_ADDRESS_START_END_POSITION, SET_RAM_Y_ADDRESS_COUNTER,
    SET_RAM_Y_ADDRESS_START_END_POSITION, TERMINATE_FRAME_READ_WRITE, WRITE_LUT_REGISTER,
    WRITE_RAM, WRITE_VCOM_REGISTER,
};
use crate::config::Config;
use crate::error::Error;
use crate::framebuffer::Framebuffer;
use crate::interface::DisplayInterface;
use crate::path::{Coordinate, Path};
use crate::power::{PowerState, Shutdown};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Driver for one panel on one exclusively-owned transport
///
/// Creating a `Display` initializes the hardware, allocates and clears the
/// framebuffer, and puts the panel into deep sleep. Drawing operations
/// mutate the framebuffer only; [`refresh`](Self::refresh) wakes the panel,
/// streams the framebuffer into its RAM, activates the update, and sleeps
/// again.
///
/// A transport error anywhere in a command sequence aborts the whole
/// sequence and leaves the panel state unknown; the display should be
/// recreated after one.
pub struct Display<I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    /// Hardware interface, exclusively owned
    interface: I,
    /// Blocking delay provider
    delay: D,
    /// Register values and LUT programmed on every wake
    config: Config,
    /// The pixel buffer streamed to the panel
    frame: Framebuffer,
    /// Where the panel is in its wake/refresh/sleep cycle
    power: PowerState,
    /// Current drawing color
    foreground: Color,
    /// How drawing operations combine with existing pixels
    write_mode: WriteMode,
    /// Termination guard checked at power checkpoints
    shutdown: Shutdown,
}

impl<I, D> Display<I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    /// Create a display, initialize the panel, and put it to sleep
    ///
    /// Runs the full wake sequence once to verify the hardware responds,
    /// then enters deep sleep, so the observable power state after creation
    /// is [`PowerState::PoweredOff`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Framebuffer`] if the buffer cannot be allocated and
    /// [`Error::Interface`] if any transport exchange fails.
    pub fn new(interface: I, delay: D, config: Config) -> Result<Self, Error<I>> {
        let dims = config.dimensions;
        let frame = Framebuffer::new(u32::from(dims.cols), u32::from(dims.rows))
            .map_err(Error::Framebuffer)?;

        let mut display = Self {
            interface,
            delay,
            config,
            frame,
            power: PowerState::Uninitialized,
            foreground: Color::Black,
            write_mode: WriteMode::Foreground,
            shutdown: Shutdown::new(),
        };
        display.frame.clear(display.foreground);

        display.wake()?;
        display.sleep()?;
        log::info!("e-paper display initialised");

        Ok(display)
    }

    /// Wake the panel and program its registers
    ///
    /// Issues the hardware reset pulse followed by the fixed register
    /// sequence (driver output, booster, VCOM, dummy lines, gate time,
    /// border waveform, data entry mode, waveform LUT). Normally called
    /// through [`refresh`](Self::refresh).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyActive`] without any bus traffic when the
    /// panel is already powered on. A transport failure aborts the sequence,
    /// which is not resumable: retry from the start by calling `wake` again.
    pub fn wake(&mut self) -> DisplayResult<I> {
        match self.power {
            PowerState::PoweredOn | PowerState::Refreshing => return Err(Error::AlreadyActive),
            PowerState::Uninitialized | PowerState::PoweredOff | PowerState::Initializing => {}
        }
        self.power = PowerState::Initializing;

        self.interface
            .reset(&mut self.delay)
            .map_err(Error::Interface)?;

        let rows = self.config.dimensions.rows;
        self.send_command(DRIVER_OUTPUT_CONTROL)?;
        self.send_data(&[
            ((rows - 1) & 0xFF) as u8,
            ((rows - 1) >> 8) as u8,
            self.config.gate_scanning,
        ])?;

        let booster = self.config.booster_soft_start;
        self.send_command(BOOSTER_SOFT_START_CONTROL)?;
        self.send_data(&booster)?;

        self.send_command(WRITE_VCOM_REGISTER)?;
        self.send_data(&[self.config.vcom])?;

        self.send_command(SET_DUMMY_LINE_PERIOD)?;
        self.send_data(&[self.config.dummy_line_period])?;

        self.send_command(SET_GATE_TIME)?;
        self.send_data(&[self.config.gate_time])?;

        self.send_command(BORDER_WAVEFORM_CONTROL)?;
        self.send_data(&[self.config.border_waveform])?;

        self.send_command(DATA_ENTRY_MODE_SETTING)?;
        self.send_data(&[self.config.data_entry_mode])?;

        let lut = self.config.lut;
        self.send_command(WRITE_LUT_REGISTER)?;
        self.send_data(&lut)?;

        self.power = PowerState::PoweredOn;
        log::debug!("panel powered on and registers programmed");

        self.checkpoint()
    }

    /// Stream the framebuffer to the panel and display it
    ///
    /// Wakes the panel, sets the full-frame window, writes the framebuffer
    /// row by row, triggers master activation, waits for the busy line to
    /// clear, and returns the panel to deep sleep. The sleep transition runs
    /// on every exit path, a mid-sequence error included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] on any transport failure or busy-wait
    /// timeout and [`Error::Terminated`] when a shutdown request was
    /// observed; in both cases the panel has been sent to sleep if at all
    /// possible.
    pub fn refresh(&mut self) -> DisplayResult<I> {
        self.wake()?;
        self.power = PowerState::Refreshing;

        let streamed = self
            .set_window(0, self.width(), 0, self.height())
            .and_then(|()| self.write_frame())
            .and_then(|()| self.activate());

        let slept = self.sleep();
        streamed?;
        slept?;

        log::info!("display refreshed");
        Ok(())
    }

    /// Clear the framebuffer to the background color and refresh
    ///
    /// # Errors
    ///
    /// Same as [`refresh`](Self::refresh).
    pub fn clear_screen(&mut self) -> DisplayResult<I> {
        self.frame.clear(self.foreground);
        self.refresh()
    }

    /// Send the panel into deep sleep
    ///
    /// Deep sleep is the only state in which the panel may be left
    /// unattended. Idempotent: calling on a sleeping panel does nothing.
    /// The deep sleep command is issued even when the preceding busy-wait
    /// times out; the timeout is surfaced afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] on transport failure or busy-wait
    /// timeout.
    pub fn sleep(&mut self) -> DisplayResult<I> {
        if self.power == PowerState::PoweredOff {
            return Ok(());
        }

        let waited = self.interface.busy_wait(&mut self.delay);

        self.send_command(DEEP_SLEEP_MODE)?;
        self.send_data(&[DEEP_SLEEP_ENTER])?;
        self.power = PowerState::PoweredOff;

        waited.map_err(Error::Interface)?;
        log::info!("panel sleeping");
        Ok(())
    }

    /// Draw a single point using the current write mode and color
    ///
    /// # Errors
    ///
    /// Returns [`Error::Framebuffer`] for an out-of-range coordinate; the
    /// error is local to this call and later draws proceed normally.
    pub fn draw_point(&mut self, x: u32, y: u32) -> DisplayResult<I> {
        self.frame
            .draw_point(x, y, self.write_mode, self.foreground)
            .map_err(Error::Framebuffer)
    }

    /// Draw a line segment using the current write mode and color
    ///
    /// Both endpoints are validated before any pixel is touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Framebuffer`] for an out-of-range endpoint, in which
    /// case nothing was drawn.
    pub fn draw_line(&mut self, from: Coordinate, to: Coordinate) -> DisplayResult<I> {
        self.frame
            .draw_line(from, to, self.write_mode, self.foreground)
            .map_err(Error::Framebuffer)
    }

    /// Draw line segments between consecutive path coordinates
    ///
    /// An empty or single-coordinate path draws nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Framebuffer`] if the path contains a coordinate
    /// outside the panel (possible when the path was created with larger
    /// bounds than this display).
    pub fn draw_path(&mut self, path: &Path) -> DisplayResult<I> {
        self.frame
            .draw_path(path, self.write_mode, self.foreground)
            .map_err(Error::Framebuffer)
    }

    /// Panel width in pixels
    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    /// Panel height in pixels
    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// Current power state
    pub fn power_state(&self) -> PowerState {
        self.power
    }

    /// Current foreground color
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Set the foreground color used by drawing operations
    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
        log::info!("foreground colour set to {color:?}");
    }

    /// Current write mode
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Set how drawing operations combine with existing pixels
    pub fn set_write_mode(&mut self, mode: WriteMode) {
        self.write_mode = mode;
    }

    /// The in-memory framebuffer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.frame
    }

    /// The in-memory framebuffer, mutable
    ///
    /// Useful for drawing through `embedded-graphics` primitives (with the
    /// `graphics` feature) or for direct pixel manipulation.
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.frame
    }

    /// A clonable handle for requesting termination
    ///
    /// Hosts wire this into their signal handling; see
    /// [`Shutdown`](crate::power::Shutdown).
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Act on a recorded termination request
    ///
    /// Checked between command sequences, never inside one, so an in-flight
    /// protocol exchange is never corrupted.
    fn checkpoint(&mut self) -> DisplayResult<I> {
        if !self.shutdown.is_requested() {
            return Ok(());
        }
        log::warn!("termination requested, putting panel to sleep");
        self.sleep()?;
        Err(Error::Terminated)
    }

    /// Set the addressable RAM window
    ///
    /// X addresses are byte-granular (pixel >> 3) while Y addresses are full
    /// 16-bit little-endian pixel values; this asymmetry is how the
    /// controller addresses its RAM and must be preserved exactly.
    fn set_window(&mut self, xmin: u32, xmax: u32, ymin: u32, ymax: u32) -> DisplayResult<I> {
        self.send_command(SET_RAM_X_ADDRESS_START_END_POSITION)?;
        self.send_data(&[((xmin >> 3) & 0xFF) as u8, ((xmax >> 3) & 0xFF) as u8])?;

        self.send_command(SET_RAM_Y_ADDRESS_START_END_POSITION)?;
        self.send_data(&[
            (ymin & 0xFF) as u8,
            ((ymin >> 8) & 0xFF) as u8,
            (ymax & 0xFF) as u8,
            ((ymax >> 8) & 0xFF) as u8,
        ])?;

        Ok(())
    }

    /// Position the RAM cursor, typically before writing a row
    fn set_cursor(&mut self, x: u32, y: u32) -> DisplayResult<I> {
        self.send_command(SET_RAM_X_ADDRESS_COUNTER)?;
        self.send_data(&[((x >> 3) & 0xFF) as u8])?;

        self.send_command(SET_RAM_Y_ADDRESS_COUNTER)?;
        self.send_data(&[(y & 0xFF) as u8, ((y >> 8) & 0xFF) as u8])?;

        Ok(())
    }

    /// Stream the framebuffer into panel RAM, row by row
    fn write_frame(&mut self) -> DisplayResult<I> {
        for y in 0..self.frame.height() {
            self.set_cursor(0, y)?;
            self.interface
                .send_command(WRITE_RAM)
                .map_err(Error::Interface)?;
            self.interface
                .send_data(self.frame.row(y))
                .map_err(Error::Interface)?;
        }
        Ok(())
    }

    /// Display the RAM contents and wait for the panel to finish
    fn activate(&mut self) -> DisplayResult<I> {
        self.send_command(DISPLAY_UPDATE_CONTROL_2)?;
        self.send_data(&[DISPLAY_UPDATE_SEQUENCE])?;

        self.send_command(MASTER_ACTIVATION)?;
        self.send_command(TERMINATE_FRAME_READ_WRITE)?;

        let elapsed = self
            .interface
            .busy_wait(&mut self.delay)
            .map_err(Error::Interface)?;
        log::debug!("panel activation completed in {elapsed} ms");

        Ok(())
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}

impl<I, D> Drop for Display<I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    /// One final sleep transition, regardless of current state
    fn drop(&mut self) {
        if self.sleep().is_err() {
            log::warn!("could not put panel to sleep during teardown");
        } else {
            log::debug!("display teardown complete");
        }
    }
}

//! Bit-banged driver for the P9813 constant-current LED driver chip.
//!
//! The P9813 speaks a two-wire protocol: a data line sampled on the rising
//! edge of a clock line. One pixel is framed as four zero bytes, a control
//! byte derived from the color's top bits, the color in B/G/R order, four
//! more zero bytes, and a settle pause that latches the shift register.
//!
//! The driver is generic over [`embedded_hal::digital::OutputPin`] for both
//! lines and [`embedded_hal::delay::DelayNs`] for all pauses, so it runs on
//! any platform that can toggle two outputs with microsecond-scale holds.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::color::{self, Rgb};

/// Default logical data-line number (BCM numbering).
pub const DEFAULT_DATA_PIN: u8 = 23;
/// Default logical clock-line number (BCM numbering).
pub const DEFAULT_CLOCK_PIN: u8 = 24;

/// Logical LED count. The driver models exactly one pixel position.
const NUM_LEDS: usize = 1;

/// Zero-byte padding on both sides of the pixel payload.
const FRAME_PADDING: usize = 4;

/// Fixed `11` top bits of the control byte.
const CONTROL_FLAG: u8 = 0xC0;

/// Clock hold on each edge. The chip samples the data line inside this
/// window, so the hold must never be shortened or skipped.
const CLOCK_HOLD_US: u32 = 5;

/// Settle pause after the end frame that latches the pixel.
const LATCH_US: u32 = 1_000;

/// Label of the pin-numbering scheme used by [`PinAssignment`].
const PIN_MODE: &str = "bcm";

/// Logical numbers of the two output lines.
///
/// Purely informational: the lines themselves are the `OutputPin` values
/// handed to [`P9813::new`]. The labels are reported back by
/// [`P9813::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    pub data: u8,
    pub clock: u8,
}

impl Default for PinAssignment {
    fn default() -> Self {
        Self {
            data: DEFAULT_DATA_PIN,
            clock: DEFAULT_CLOCK_PIN,
        }
    }
}

/// Construction parameters for [`P9813`].
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    pub pins: PinAssignment,
    /// Initial brightness, clamped to `[0.0, 1.0]` on construction.
    pub brightness: f32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            pins: PinAssignment::default(),
            brightness: 1.0,
        }
    }
}

/// Read-only driver snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    pub data_pin: u8,
    pub clock_pin: u8,
    pub led_count: usize,
    pub brightness: f32,
    /// Pin-numbering scheme of `data_pin`/`clock_pin`.
    pub mode: &'static str,
}

/// Error raised by a failing output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The data line rejected a level change.
    Data(E),
    /// The clock line rejected a level change.
    Clock(E),
}

/// Driver for a single P9813-backed RGB pixel.
///
/// Owns both output lines and the delay source for its whole lifetime.
/// Construction forces the bus into a known state (both lines low, pixel
/// blanked); [`P9813::shutdown`] restores that state and is safe to call
/// any number of times, and [`P9813::release`] hands the resources back.
pub struct P9813<DIN, CIN, D> {
    din: DIN,
    cin: CIN,
    delay: D,
    pins: PinAssignment,
    brightness: f32,
    num_leds: usize,
}

/// Compute the control byte for a pixel payload.
///
/// Top two bits are fixed `11`; the remaining three 2-bit fields carry the
/// inverted top bits of the red, green and blue channels, packed into bits
/// 5-4, 3-2 and 1-0 respectively.
pub const fn control_byte(color: Rgb) -> u8 {
    CONTROL_FLAG
        | ((0x03 - ((color.r >> 6) & 0x03)) << 4)
        | ((0x03 - ((color.g >> 6) & 0x03)) << 2)
        | (0x03 - ((color.b >> 6) & 0x03))
}

impl<DIN, CIN, D, E> P9813<DIN, CIN, D>
where
    DIN: OutputPin<Error = E>,
    CIN: OutputPin<Error = E>,
    D: DelayNs,
{
    /// Create a driver and force a known bus state.
    ///
    /// Both lines are driven low and an all-zero frame is emitted, so the
    /// pixel is dark no matter what it showed before. A line that rejects
    /// the initial writes fails construction; there is no recovery path
    /// without working pins.
    pub fn new(din: DIN, cin: CIN, delay: D, config: &DriverConfig) -> Result<Self, Error<E>> {
        let mut driver = Self {
            din,
            cin,
            delay,
            pins: config.pins,
            brightness: clamp_brightness(config.brightness),
            num_leds: NUM_LEDS,
        };

        driver.din.set_low().map_err(Error::Data)?;
        driver.cin.set_low().map_err(Error::Clock)?;
        driver.clear()?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "p9813: initialized, data={} clock={}",
            driver.pins.data,
            driver.pins.clock
        );

        Ok(driver)
    }

    /// Emit one pixel on the wire.
    ///
    /// Applies the stored brightness (floor-truncating per channel), then
    /// transmits the full five-part frame and waits out the latch pause.
    pub fn write_pixel(&mut self, color: Rgb) -> Result<(), Error<E>> {
        let scaled = color::scale(color, self.brightness);

        for _ in 0..FRAME_PADDING {
            self.write_byte(0x00)?;
        }

        self.write_byte(control_byte(scaled))?;
        self.write_byte(scaled.b)?;
        self.write_byte(scaled.g)?;
        self.write_byte(scaled.r)?;

        for _ in 0..FRAME_PADDING {
            self.write_byte(0x00)?;
        }

        self.delay.delay_us(LATCH_US);
        Ok(())
    }

    /// Clock out one byte, most-significant bit first.
    fn write_byte(&mut self, mut value: u8) -> Result<(), Error<E>> {
        for _ in 0..8 {
            self.din
                .set_state(PinState::from(value & 0x80 != 0))
                .map_err(Error::Data)?;
            self.cin.set_high().map_err(Error::Clock)?;
            self.delay.delay_us(CLOCK_HOLD_US);
            self.cin.set_low().map_err(Error::Clock)?;
            self.delay.delay_us(CLOCK_HOLD_US);
            value <<= 1;
        }
        Ok(())
    }

    /// Set the brightness applied to every subsequent emission.
    ///
    /// Out-of-range input is clamped silently to `[0.0, 1.0]`. Returns the
    /// stored value. The currently displayed color is not re-emitted.
    pub fn set_brightness(&mut self, brightness: f32) -> f32 {
        self.brightness = clamp_brightness(brightness);
        self.brightness
    }

    /// Current brightness factor.
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Set the color of the single pixel (index 0).
    pub fn set_color(&mut self, color: Rgb) -> Result<(), Error<E>> {
        // Index 0 always passes validation on a one-pixel driver.
        self.set_color_at(color, 0)?;
        Ok(())
    }

    /// Set the color of the pixel at `index`.
    ///
    /// Returns `Ok(false)` without transmitting anything when `index` is
    /// outside the logical LED count.
    pub fn set_color_at(&mut self, color: Rgb, index: usize) -> Result<bool, Error<E>> {
        if index >= self.num_leds {
            return Ok(false);
        }
        self.write_pixel(color)?;
        Ok(true)
    }

    /// Set the color from an `RRGGBB` hex string (optional leading `#`).
    ///
    /// A malformed string is a deliberate no-op: nothing is transmitted and
    /// no state changes. Callers that need to distinguish can parse with
    /// [`color::rgb_from_hex`] first.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), Error<E>> {
        match color::rgb_from_hex(hex) {
            Some(color) => self.set_color(color),
            None => Ok(()),
        }
    }

    /// Blank the pixel.
    pub fn clear(&mut self) -> Result<(), Error<E>> {
        self.write_pixel(Rgb { r: 0, g: 0, b: 0 })
    }

    /// Read-only snapshot of the driver state. No side effects.
    pub fn status(&self) -> Status {
        Status {
            data_pin: self.pins.data,
            clock_pin: self.pins.clock,
            led_count: self.num_leds,
            brightness: self.brightness,
            mode: PIN_MODE,
        }
    }

    /// Block for `duration` on the driver's delay source.
    ///
    /// This is the inter-frame sleep primitive used by the effect engine.
    pub fn wait(&mut self, duration: Duration) {
        let micros = u32::try_from(duration.as_micros()).unwrap_or(u32::MAX);
        if micros > 0 {
            self.delay.delay_us(micros);
        }
    }

    /// Blank the pixel and park both lines low.
    ///
    /// Idempotent: calling this again re-blanks an already dark pixel and
    /// leaves the lines where they are.
    pub fn shutdown(&mut self) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("p9813: shutdown");

        self.clear()?;
        self.din.set_low().map_err(Error::Data)?;
        self.cin.set_low().map_err(Error::Clock)?;
        Ok(())
    }

    /// Tear down the driver and return the owned resources.
    ///
    /// Performs a best-effort [`shutdown`](Self::shutdown) first; the pins
    /// and delay source are handed back even if a line rejects the final
    /// writes.
    pub fn release(mut self) -> (DIN, CIN, D) {
        let _ = self.shutdown();
        (self.din, self.cin, self.delay)
    }
}

/// Clamp a brightness factor into `[0.0, 1.0]` without panicking.
fn clamp_brightness(value: f32) -> f32 {
    if value < 0.0 {
        0.0
    } else if value > 1.0 {
        1.0
    } else {
        value
    }
}

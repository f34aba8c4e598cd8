//! Rainbow sweep over a three-segment hue wheel.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::Effect;
use crate::color::Rgb;
use crate::driver::{Error, P9813};

const DEFAULT_CYCLES: u32 = 1;
const DEFAULT_SPEED_MS: u64 = 50;

/// Map a wheel position to a color.
///
/// The wheel is three 85-wide linear segments: green fades into red, red
/// into blue, blue back toward green, each channel ramping in steps of 3
/// over the re-based position.
pub const fn wheel(pos: u8) -> Rgb {
    if pos < 85 {
        Rgb {
            r: pos * 3,
            g: 255 - pos * 3,
            b: 0,
        }
    } else if pos < 170 {
        let pos = pos - 85;
        Rgb {
            r: 255 - pos * 3,
            g: 0,
            b: pos * 3,
        }
    } else {
        let pos = pos - 170;
        Rgb {
            r: 0,
            g: pos * 3,
            b: 255 - pos * 3,
        }
    }
}

/// Sweeps the full wheel, one position per frame.
#[derive(Debug, Clone, Copy)]
pub struct RainbowEffect {
    /// Number of full 256-position sweeps.
    pub cycles: u32,
    /// Pause between wheel positions.
    pub speed: Duration,
}

impl Default for RainbowEffect {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            speed: Duration::from_millis(DEFAULT_SPEED_MS),
        }
    }
}

impl Effect for RainbowEffect {
    fn run<DIN, CIN, D, E>(&self, strip: &mut P9813<DIN, CIN, D>) -> Result<(), Error<E>>
    where
        DIN: OutputPin<Error = E>,
        CIN: OutputPin<Error = E>,
        D: DelayNs,
    {
        for _ in 0..self.cycles {
            for pos in 0..=u8::MAX {
                strip.set_color(wheel(pos))?;
                strip.wait(self.speed);
            }
        }
        Ok(())
    }
}

//! Police-lights simulation: alternating red and blue flashes.

use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::Effect;
use crate::color::Rgb;
use crate::driver::{Error, P9813};

const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

/// Dark gap between flashes.
const BLANK_GAP: Duration = Duration::from_millis(50);

const DEFAULT_DURATION_MS: u64 = 10_000;
const DEFAULT_SPEED_MS: u64 = 200;

/// Flashes red then blue, each held for `speed` with a short dark gap,
/// until `duration` has elapsed.
///
/// Elapsed time is checked once per full red/blue pair, so the effect can
/// overshoot `duration` by up to one pair. That matches the original
/// behavior and is intentional.
#[derive(Debug, Clone, Copy)]
pub struct PoliceLightsEffect {
    /// Minimum total runtime.
    pub duration: Duration,
    /// Hold time of each colored flash.
    pub speed: Duration,
}

impl Default for PoliceLightsEffect {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
            speed: Duration::from_millis(DEFAULT_SPEED_MS),
        }
    }
}

impl Effect for PoliceLightsEffect {
    fn run<DIN, CIN, D, E>(&self, strip: &mut P9813<DIN, CIN, D>) -> Result<(), Error<E>>
    where
        DIN: OutputPin<Error = E>,
        CIN: OutputPin<Error = E>,
        D: DelayNs,
    {
        let end = Instant::now() + self.duration;

        while Instant::now() < end {
            strip.set_color(RED)?;
            strip.wait(self.speed);
            strip.clear()?;
            strip.wait(BLANK_GAP);

            strip.set_color(BLUE)?;
            strip.wait(self.speed);
            strip.clear()?;
            strip.wait(BLANK_GAP);
        }
        Ok(())
    }
}

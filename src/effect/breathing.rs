//! Breathing effect: a linear brightness ramp up and back down.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::Effect;
use crate::color::{self, Rgb};
use crate::driver::{Error, P9813};

/// Resolution of one half-cycle (rising or falling).
pub const BREATH_STEPS: u32 = 50;

const DEFAULT_CYCLES: u32 = 3;
const DEFAULT_CYCLE_MS: u64 = 3_000;

/// Brightness fractions for one full breath.
///
/// Rises `0/50 .. 49/50`, then falls `50/50 ..= 0/50`: 101 values total,
/// starting and ending dark and peaking at full scale in the middle.
#[allow(clippy::cast_precision_loss)]
pub fn breath_levels() -> impl Iterator<Item = f32> {
    let rising = (0..BREATH_STEPS).map(|i| i as f32 / BREATH_STEPS as f32);
    let falling = (0..=BREATH_STEPS).rev().map(|i| i as f32 / BREATH_STEPS as f32);
    rising.chain(falling)
}

/// Scales a base color through [`breath_levels`] once per cycle.
///
/// The driver's stored brightness is untouched; the fraction is applied
/// inline to the emitted color (and the encoder then applies the stored
/// brightness on top, as for any other emission).
#[derive(Debug, Clone, Copy)]
pub struct BreathingEffect {
    /// Base color at the peak of the breath.
    pub color: Rgb,
    /// Number of full breaths.
    pub cycles: u32,
    /// Wall time of one full breath.
    pub cycle_duration: Duration,
}

impl Default for BreathingEffect {
    fn default() -> Self {
        Self {
            color: Rgb {
                r: 255,
                g: 255,
                b: 255,
            },
            cycles: DEFAULT_CYCLES,
            cycle_duration: Duration::from_millis(DEFAULT_CYCLE_MS),
        }
    }
}

impl Effect for BreathingEffect {
    fn run<DIN, CIN, D, E>(&self, strip: &mut P9813<DIN, CIN, D>) -> Result<(), Error<E>>
    where
        DIN: OutputPin<Error = E>,
        CIN: OutputPin<Error = E>,
        D: DelayNs,
    {
        // One rising plus one falling half-cycle per breath.
        let step_delay =
            Duration::from_micros(self.cycle_duration.as_micros() / u64::from(2 * BREATH_STEPS));

        for _ in 0..self.cycles {
            for level in breath_levels() {
                strip.write_pixel(color::scale(self.color, level))?;
                strip.wait(step_delay);
            }
        }
        Ok(())
    }
}

//! Fixed demonstration color sequence.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::Effect;
use crate::color::Rgb;
use crate::driver::{Error, P9813};

const DEFAULT_DELAY_MS: u64 = 1_000;

/// The nine named colors of the demonstration sequence, in display order.
pub const PALETTE: [(&str, Rgb); 9] = [
    ("red", Rgb { r: 255, g: 0, b: 0 }),
    ("orange", Rgb { r: 255, g: 165, b: 0 }),
    ("yellow", Rgb { r: 255, g: 255, b: 0 }),
    ("green", Rgb { r: 0, g: 255, b: 0 }),
    ("cyan", Rgb { r: 0, g: 255, b: 255 }),
    ("blue", Rgb { r: 0, g: 0, b: 255 }),
    ("purple", Rgb { r: 128, g: 0, b: 128 }),
    ("pink", Rgb { r: 255, g: 192, b: 203 }),
    ("white", Rgb { r: 255, g: 255, b: 255 }),
];

/// Steps through [`PALETTE`] with a pause after each color, then blanks.
#[derive(Debug, Clone, Copy)]
pub struct DemoSequence {
    /// Pause after each palette entry.
    pub delay: Duration,
}

impl Default for DemoSequence {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

impl Effect for DemoSequence {
    fn run<DIN, CIN, D, E>(&self, strip: &mut P9813<DIN, CIN, D>) -> Result<(), Error<E>>
    where
        DIN: OutputPin<Error = E>,
        CIN: OutputPin<Error = E>,
        D: DelayNs,
    {
        for (_name, color) in PALETTE {
            strip.set_color(color)?;
            strip.wait(self.delay);
        }
        strip.clear()
    }
}

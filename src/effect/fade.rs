//! Linear crossfade between two colors.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::Effect;
use crate::color::Rgb;
use crate::driver::{Error, P9813};

const DEFAULT_STEPS: u32 = 50;
const DEFAULT_DURATION_MS: u64 = 2_000;

/// Mix of `from` and `to` at `step` out of `steps`, truncating downward
/// per channel.
#[allow(clippy::cast_precision_loss)]
pub fn mix(from: Rgb, to: Rgb, step: u32, steps: u32) -> Rgb {
    let ratio = step as f32 / steps as f32;
    Rgb {
        r: mix_channel(from.r, to.r, ratio),
        g: mix_channel(from.g, to.g, ratio),
        b: mix_channel(from.b, to.b, ratio),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mix_channel(from: u8, to: u8, ratio: f32) -> u8 {
    libm::floorf(f32::from(from) * (1.0 - ratio) + f32::from(to) * ratio).clamp(0.0, 255.0) as u8
}

/// Emits `steps + 1` frames interpolating `from` toward `to`.
#[derive(Debug, Clone, Copy)]
pub struct FadeEffect {
    pub from: Rgb,
    pub to: Rgb,
    /// Number of transition intervals; `steps + 1` frames are emitted.
    /// Zero is treated as one.
    pub steps: u32,
    /// Wall time of the whole transition.
    pub duration: Duration,
}

impl Default for FadeEffect {
    fn default() -> Self {
        Self {
            from: Rgb { r: 0, g: 0, b: 0 },
            to: Rgb {
                r: 255,
                g: 255,
                b: 255,
            },
            steps: DEFAULT_STEPS,
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
        }
    }
}

impl Effect for FadeEffect {
    fn run<DIN, CIN, D, E>(&self, strip: &mut P9813<DIN, CIN, D>) -> Result<(), Error<E>>
    where
        DIN: OutputPin<Error = E>,
        CIN: OutputPin<Error = E>,
        D: DelayNs,
    {
        let steps = self.steps.max(1);
        let step_delay = Duration::from_micros(self.duration.as_micros() / u64::from(steps));

        for step in 0..=steps {
            strip.set_color(mix(self.from, self.to, step, steps))?;
            strip.wait(step_delay);
        }
        Ok(())
    }
}

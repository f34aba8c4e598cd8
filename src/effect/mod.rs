//! Blocking light effects layered on the pixel driver.
//!
//! Every effect is a self-contained finite procedure: a deterministic,
//! restartable sequence of pixel emissions and pauses, a pure function of
//! its parameters plus the driver's current brightness. Effects block the
//! caller for their whole duration; nothing runs in the background.

mod breathing;
mod demo;
mod fade;
mod police;
mod rainbow;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

pub use breathing::{BREATH_STEPS, BreathingEffect, breath_levels};
pub use demo::{DemoSequence, PALETTE};
pub use fade::{FadeEffect, mix};
pub use police::PoliceLightsEffect;
pub use rainbow::{RainbowEffect, wheel};

use crate::driver::{Error, P9813};

const EFFECT_NAME_DEMO: &str = "demo";
const EFFECT_NAME_BREATHING: &str = "breathing";
const EFFECT_NAME_RAINBOW: &str = "rainbow";
const EFFECT_NAME_POLICE_LIGHTS: &str = "police_lights";
const EFFECT_NAME_FADE: &str = "fade";

const EFFECT_ID_DEMO: u8 = 0;
const EFFECT_ID_BREATHING: u8 = 1;
const EFFECT_ID_RAINBOW: u8 = 2;
const EFFECT_ID_POLICE_LIGHTS: u8 = 3;
const EFFECT_ID_FADE: u8 = 4;

pub trait Effect {
    /// Run the effect to completion, blocking the caller.
    ///
    /// Calling `run` again with the same parameters and the same stored
    /// brightness reproduces the identical emission sequence.
    fn run<DIN, CIN, D, E>(&self, strip: &mut P9813<DIN, CIN, D>) -> Result<(), Error<E>>
    where
        DIN: OutputPin<Error = E>,
        CIN: OutputPin<Error = E>,
        D: DelayNs;
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    /// Fixed nine-color demonstration sequence
    Demo(DemoSequence),
    /// Breathing brightness ramp on a base color
    Breathing(BreathingEffect),
    /// Three-segment hue-wheel sweep
    Rainbow(RainbowEffect),
    /// Alternating red/blue flash
    PoliceLights(PoliceLightsEffect),
    /// Linear crossfade between two colors
    Fade(FadeEffect),
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EffectId {
    Demo = EFFECT_ID_DEMO,
    Breathing = EFFECT_ID_BREATHING,
    Rainbow = EFFECT_ID_RAINBOW,
    PoliceLights = EFFECT_ID_POLICE_LIGHTS,
    Fade = EFFECT_ID_FADE,
}

impl Default for EffectSlot {
    fn default() -> Self {
        Self::Demo(DemoSequence::default())
    }
}

impl EffectId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_DEMO => Self::Demo,
            EFFECT_ID_BREATHING => Self::Breathing,
            EFFECT_ID_RAINBOW => Self::Rainbow,
            EFFECT_ID_POLICE_LIGHTS => Self::PoliceLights,
            EFFECT_ID_FADE => Self::Fade,
            _ => return None,
        })
    }

    /// Build a slot with the effect's default parameters.
    pub fn to_slot(self) -> EffectSlot {
        match self {
            Self::Demo => EffectSlot::Demo(DemoSequence::default()),
            Self::Breathing => EffectSlot::Breathing(BreathingEffect::default()),
            Self::Rainbow => EffectSlot::Rainbow(RainbowEffect::default()),
            Self::PoliceLights => EffectSlot::PoliceLights(PoliceLightsEffect::default()),
            Self::Fade => EffectSlot::Fade(FadeEffect::default()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Demo => EFFECT_NAME_DEMO,
            Self::Breathing => EFFECT_NAME_BREATHING,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
            Self::PoliceLights => EFFECT_NAME_POLICE_LIGHTS,
            Self::Fade => EFFECT_NAME_FADE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_DEMO => Some(Self::Demo),
            EFFECT_NAME_BREATHING => Some(Self::Breathing),
            EFFECT_NAME_RAINBOW => Some(Self::Rainbow),
            EFFECT_NAME_POLICE_LIGHTS => Some(Self::PoliceLights),
            EFFECT_NAME_FADE => Some(Self::Fade),
            _ => None,
        }
    }
}

impl EffectSlot {
    /// Run the held effect against a driver, blocking until it finishes.
    pub fn run<DIN, CIN, D, E>(&self, strip: &mut P9813<DIN, CIN, D>) -> Result<(), Error<E>>
    where
        DIN: OutputPin<Error = E>,
        CIN: OutputPin<Error = E>,
        D: DelayNs,
    {
        match self {
            Self::Demo(effect) => effect.run(strip),
            Self::Breathing(effect) => effect.run(strip),
            Self::Rainbow(effect) => effect.run(strip),
            Self::PoliceLights(effect) => effect.run(strip),
            Self::Fade(effect) => effect.run(strip),
        }
    }

    /// Get the effect ID for external observation
    pub fn id(&self) -> EffectId {
        match self {
            Self::Demo(_) => EffectId::Demo,
            Self::Breathing(_) => EffectId::Breathing,
            Self::Rainbow(_) => EffectId::Rainbow,
            Self::PoliceLights(_) => EffectId::PoliceLights,
            Self::Fade(_) => EffectId::Fade,
        }
    }
}

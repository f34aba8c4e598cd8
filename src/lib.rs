#![no_std]

pub mod color;
pub mod driver;
pub mod effect;

pub use driver::{
    DEFAULT_CLOCK_PIN, DEFAULT_DATA_PIN, DriverConfig, Error, P9813, PinAssignment, Status,
};
pub use effect::{
    BreathingEffect, DemoSequence, Effect, EffectId, EffectSlot, FadeEffect, PoliceLightsEffect,
    RainbowEffect,
};

pub use color::{Rgb, rgb_from_hex};
pub use embassy_time::{Duration, Instant};

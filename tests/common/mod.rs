//! Wire-level test harness.
//!
//! A pair of recording pins shares a [`Bus`]: the clock pin samples the data
//! line on every rising edge, exactly as the P9813 does, so tests can
//! reconstruct the transmitted bytes and frames.

#![allow(dead_code)]

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use p9813_bitbang::{DriverConfig, P9813, Rgb};

/// Bytes per pixel frame: 4 start + control + B/G/R + 4 end.
const FRAME_BYTES: usize = 12;

#[derive(Default)]
struct Wire {
    data_level: bool,
    bits: Vec<bool>,
}

/// Shared view of the two-wire bus.
#[derive(Clone, Default)]
pub(crate) struct Bus {
    wire: Rc<RefCell<Wire>>,
}

impl Bus {
    pub(crate) fn pins(&self) -> (DataPin, ClockPin) {
        (
            DataPin {
                wire: Rc::clone(&self.wire),
            },
            ClockPin {
                wire: Rc::clone(&self.wire),
            },
        )
    }

    /// Current level of the data line.
    pub(crate) fn data_level(&self) -> bool {
        self.wire.borrow().data_level
    }

    /// Drop everything captured so far.
    pub(crate) fn reset(&self) {
        self.wire.borrow_mut().bits.clear();
    }

    /// Bytes captured on the wire, MSB-first per byte.
    pub(crate) fn bytes(&self) -> Vec<u8> {
        let wire = self.wire.borrow();
        assert!(wire.bits.len() % 8 == 0, "partial byte on the wire");
        wire.bits
            .chunks(8)
            .map(|bits| bits.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
            .collect()
    }

    /// Pixel colors decoded from the captured frames.
    ///
    /// Panics if the capture is not a whole number of well-formed frames.
    pub(crate) fn frames(&self) -> Vec<Rgb> {
        self.framed()
            .iter()
            .map(|frame| Rgb {
                r: frame[7],
                g: frame[6],
                b: frame[5],
            })
            .collect()
    }

    /// Control byte of each captured frame.
    pub(crate) fn control_bytes(&self) -> Vec<u8> {
        self.framed().iter().map(|frame| frame[4]).collect()
    }

    fn framed(&self) -> Vec<Vec<u8>> {
        let bytes = self.bytes();
        assert!(bytes.len() % FRAME_BYTES == 0, "partial frame on the wire");
        bytes
            .chunks(FRAME_BYTES)
            .map(|frame| {
                assert!(
                    frame[..4].iter().all(|&b| b == 0),
                    "start frame must be four zero bytes"
                );
                assert!(
                    frame[8..].iter().all(|&b| b == 0),
                    "end frame must be four zero bytes"
                );
                frame.to_vec()
            })
            .collect()
    }
}

pub(crate) struct DataPin {
    wire: Rc<RefCell<Wire>>,
}

pub(crate) struct ClockPin {
    wire: Rc<RefCell<Wire>>,
}

impl ErrorType for DataPin {
    type Error = Infallible;
}

impl OutputPin for DataPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.wire.borrow_mut().data_level = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.wire.borrow_mut().data_level = true;
        Ok(())
    }
}

impl ErrorType for ClockPin {
    type Error = Infallible;
}

impl OutputPin for ClockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        // Rising edge: the chip samples the data line here.
        let mut wire = self.wire.borrow_mut();
        let level = wire.data_level;
        wire.bits.push(level);
        Ok(())
    }
}

/// Delay source that returns immediately.
pub(crate) struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Delay source that records every requested pause in nanoseconds.
#[derive(Clone, Default)]
pub(crate) struct CountingDelay {
    pub(crate) log: Rc<RefCell<Vec<u32>>>,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(ns);
    }
}

/// Delay source that really sleeps, for wall-clock-driven effects.
pub(crate) struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

/// A driver on a fresh bus, with the startup blank frame already discarded.
pub(crate) fn fresh() -> (Bus, P9813<DataPin, ClockPin, NoopDelay>) {
    let bus = Bus::default();
    let (din, cin) = bus.pins();
    let strip = P9813::new(din, cin, NoopDelay, &DriverConfig::default()).unwrap();
    bus.reset();
    (bus, strip)
}

/// Same as [`fresh`] but with a caller-provided delay source.
pub(crate) fn fresh_with_delay<D: DelayNs>(delay: D) -> (Bus, P9813<DataPin, ClockPin, D>) {
    let bus = Bus::default();
    let (din, cin) = bus.pins();
    let strip = P9813::new(din, cin, delay, &DriverConfig::default()).unwrap();
    bus.reset();
    (bus, strip)
}

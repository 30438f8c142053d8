#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::OutputPin;
use imx547_i2c::{bus_codes, FrameFormat, Imx547, RegisterBus};

/// Everything the sensor side observed, in order
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Write(u16, u8),
    BulkWrite(u16, Vec<u8>),
    BulkRead(u16, usize),
    BusFault,
    DelayMs(u32),
    DelayUs(u32),
    TrxReset(bool),
    PipeReset(bool),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BusFault;

/// Simulated register file plus a journal shared by bus, pins and delay
#[derive(Default)]
pub struct Rig {
    regs: HashMap<u16, u8>,
    pub journal: Vec<Event>,
    bus_ops: usize,
    fail_at: Option<usize>,
}

impl Rig {
    pub fn reg(&self, addr: u16) -> u8 {
        self.regs.get(&addr).copied().unwrap_or(0)
    }

    /// Little-endian value spread over `nbytes` registers
    pub fn reg_multi(&self, addr: u16, nbytes: u16) -> u32 {
        (0..nbytes).fold(0u32, |acc, i| {
            acc | (u32::from(self.reg(addr + i)) << (8 * i))
        })
    }

    pub fn regs(&self) -> HashMap<u16, u8> {
        self.regs.clone()
    }

    /// Make the bus operation `n` steps from now fail
    pub fn fail_after(&mut self, n: usize) {
        self.fail_at = Some(self.bus_ops + n);
    }

    pub fn heal(&mut self) {
        self.fail_at = None;
    }

    pub fn bus_ops(&self) -> usize {
        self.bus_ops
    }

    fn bus_op(&mut self, event: Event) -> Result<(), BusFault> {
        let op = self.bus_ops;
        self.bus_ops += 1;
        if self.fail_at == Some(op) {
            self.journal.push(Event::BusFault);
            return Err(BusFault);
        }
        self.journal.push(event);
        Ok(())
    }
}

pub type SharedRig = Arc<Mutex<Rig>>;

pub struct FakeBus(SharedRig);

impl RegisterBus for FakeBus {
    type Error = BusFault;

    fn write(&mut self, addr: u16, val: u8) -> Result<(), BusFault> {
        let mut rig = self.0.lock().unwrap();
        rig.bus_op(Event::Write(addr, val))?;
        rig.regs.insert(addr, val);
        Ok(())
    }

    fn bulk_write(&mut self, addr: u16, vals: &[u8]) -> Result<(), BusFault> {
        let mut rig = self.0.lock().unwrap();
        rig.bus_op(Event::BulkWrite(addr, vals.to_vec()))?;
        for (i, val) in vals.iter().enumerate() {
            rig.regs.insert(addr + i as u16, *val);
        }
        Ok(())
    }

    fn bulk_read(&mut self, addr: u16, buf: &mut [u8]) -> Result<(), BusFault> {
        let mut rig = self.0.lock().unwrap();
        rig.bus_op(Event::BulkRead(addr, buf.len()))?;
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = rig.reg(addr + i as u16);
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub enum Line {
    Trx,
    Pipe,
}

pub struct FakePin {
    rig: SharedRig,
    line: Line,
}

impl FakePin {
    fn record(&mut self, high: bool) -> Result<(), Infallible> {
        let event = match self.line {
            Line::Trx => Event::TrxReset(high),
            Line::Pipe => Event::PipeReset(high),
        };
        self.rig.lock().unwrap().journal.push(event);
        Ok(())
    }
}

impl OutputPin for FakePin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.record(false)
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.record(true)
    }
}

pub struct FakeDelay(SharedRig);

impl DelayMs<u32> for FakeDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.0.lock().unwrap().journal.push(Event::DelayMs(ms));
    }
}

impl DelayUs<u32> for FakeDelay {
    fn delay_us(&mut self, us: u32) {
        self.0.lock().unwrap().journal.push(Event::DelayUs(us));
    }
}

pub type TestSensor = Imx547<FakeBus, FakePin, FakePin, FakeDelay>;

/// A freshly attached sensor and a handle on what it does
pub fn sensor() -> (TestSensor, SharedRig) {
    let rig: SharedRig = Arc::new(Mutex::new(Rig::default()));
    let sensor = Imx547::new(
        FakeBus(rig.clone()),
        FakePin {
            rig: rig.clone(),
            line: Line::Trx,
        },
        FakePin {
            rig: rig.clone(),
            line: Line::Pipe,
        },
        FakeDelay(rig.clone()),
    );
    (sensor, rig)
}

/// Forget everything recorded so far
pub fn clear(rig: &SharedRig) {
    rig.lock().unwrap().journal.clear();
}

pub fn journal(rig: &SharedRig) -> Vec<Event> {
    rig.lock().unwrap().journal.clone()
}

pub const RAW10: FrameFormat =
    FrameFormat::new(2472, 2064, bus_codes::SRGGB10_1X10);
pub const RAW12: FrameFormat =
    FrameFormat::new(2472, 2064, bus_codes::SRGGB12_1X12);

/// SHS the sensor should hold for an exposure, computed independently
pub fn expected_shs(
    exposure_us: i64,
    frame_length: i64,
    line_time_ns: i64,
    min_shs: i64,
) -> u32 {
    let shs = frame_length - exposure_us * 1000 / line_time_ns;
    shs.max(min_shs).min(frame_length - 1) as u32
}

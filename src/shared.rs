/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! A sensor handle that can be driven from several contexts at once.
//!
//! Format, frame interval and exposure depend on each other, so every
//! operation runs start to finish under one lock. The lock is not
//! reentrant: calling back into the handle from inside an operation
//! panics rather than deadlocking.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::OutputPin;

use crate::{
    ControlId, ControlRange, Error, FrameFormat, FrameInterval, Imx547,
    RegisterBus, StreamState,
};

pub struct SharedImx547<M: RawMutex, BUS, TRX, PIPE, D> {
    inner: Mutex<M, RefCell<Imx547<BUS, TRX, PIPE, D>>>,
}

impl<M, BUS, TRX, PIPE, D, CommE, PinE> SharedImx547<M, BUS, TRX, PIPE, D>
where
    M: RawMutex,
    BUS: RegisterBus<Error = CommE>,
    TRX: OutputPin<Error = PinE>,
    PIPE: OutputPin<Error = PinE>,
    D: DelayMs<u32> + DelayUs<u32>,
{
    pub fn new(sensor: Imx547<BUS, TRX, PIPE, D>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(sensor)),
        }
    }

    /// Run `f` with exclusive access to the sensor
    pub fn with<R>(
        &self,
        f: impl FnOnce(&mut Imx547<BUS, TRX, PIPE, D>) -> R,
    ) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn setup(&self) -> Result<(), Error<CommE, PinE>> {
        self.with(|sensor| sensor.setup())
    }

    pub fn format(&self) -> FrameFormat {
        self.with(|sensor| sensor.format())
    }

    pub fn set_format(
        &self,
        format: FrameFormat,
    ) -> Result<FrameFormat, Error<CommE, PinE>> {
        self.with(|sensor| sensor.set_format(format))
    }

    pub fn frame_interval(&self) -> FrameInterval {
        self.with(|sensor| sensor.frame_interval())
    }

    pub fn set_frame_interval(
        &self,
        interval: FrameInterval,
    ) -> Result<FrameInterval, Error<CommE, PinE>> {
        self.with(|sensor| sensor.set_frame_interval(interval))
    }

    pub fn control(&self, id: ControlId) -> i32 {
        self.with(|sensor| sensor.control(id))
    }

    pub fn control_range(&self, id: ControlId) -> ControlRange {
        self.with(|sensor| sensor.control_range(id))
    }

    /// Every control, the test pattern included, is set under the lock
    pub fn set_control(
        &self,
        id: ControlId,
        val: i32,
    ) -> Result<i32, Error<CommE, PinE>> {
        self.with(|sensor| sensor.set_control(id, val))
    }

    pub fn set_stream(&self, on: bool) -> Result<(), Error<CommE, PinE>> {
        self.with(|sensor| sensor.set_stream(on))
    }

    pub fn stream_state(&self) -> StreamState {
        self.with(|sensor| sensor.stream_state())
    }

    /// Take the sensor back out of the handle
    pub fn into_inner(self) -> Imx547<BUS, TRX, PIPE, D> {
        self.inner.into_inner().into_inner()
    }
}

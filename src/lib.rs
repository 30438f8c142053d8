/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/
#![cfg_attr(not(test), no_std)]

//! Configuration driver for the Sony IMX547 CMOS image sensor
//! This imaging sensor has multiple interfaces:
//! - Two-wire i2c for configuration registers (i2c)
//! - SLVS-EC high speed serial pixel data out
//! - reset lines for the receiving transceiver and input pipe
//! This driver is concerned only with the i2c interface and the reset lines:
//! it turns exposure, gain, black level, test pattern, frame rate
//! and pixel format requests into register writes.

#[cfg(feature = "rttdebug")]
use panic_rtt_core::rprintln;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::OutputPin;

pub mod bus;
pub mod controls;
pub mod mode;
pub mod mode_tables;
pub mod registers;
pub mod shared;
pub mod table;
pub mod timing;

pub use bus::{I2cBus, RegisterBus, DEFAULT_I2C_ADDRESS};
pub use controls::{ControlId, ControlRange, TestPattern};
pub use mode::{bus_codes, BitDepth, FrameFormat};
pub use registers::Register;
pub use shared::SharedImx547;
pub use table::Entry;
pub use timing::FrameInterval;

use controls::{Controls, MIN_EXPOSURE_TIME};

/// Errors in this crate
#[derive(Debug)]
pub enum Error<CommE, PinE> {
    /// Sensor communication error
    Comm(CommE),
    /// Reset line error
    Pin(PinE),
    /// The media bus code does not name a supported pixel format
    InvalidFormat(u32),
    /// The request needs the sensor to be stopped first
    Busy,
}

// Array format: Active 2472 H x 2064 V
pub const MAX_FRAME_WIDTH: u32 = 2472;
pub const MAX_FRAME_HEIGHT: u32 = 2064;

/// Blanking lines added to the active height for the initial frame length
pub const MIN_FRAME_DELTA: u32 = 144;

/// "Internal regulator stabilization" time after leaving standby
const REGULATOR_SETTLE_US: u32 = 1_138_000;
/// How long the transceiver reset is held high
const TRX_RESET_PULSE_MS: u32 = 20;
/// Pause between entering standby and stopping master mode
const STANDBY_SETTLE_US: u32 = 100;

/// Whether the sensor is currently producing frames
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamState {
    Stopped,
    Streaming,
}

/// Main driver struct
pub struct Imx547<BUS, TRX, PIPE, D> {
    bus: BUS,
    /// pulsed when streaming starts to resynchronize the receiver
    trx_reset: TRX,
    pipe_reset: PIPE,
    delay: D,

    format: FrameFormat,
    bit_depth: BitDepth,
    frame_interval: FrameInterval,
    /// lines per frame (VMAX)
    frame_length: u32,
    /// ns per line
    line_time: u32,
    controls: Controls,
    state: StreamState,
}

impl<BUS, TRX, PIPE, D, CommE, PinE> Imx547<BUS, TRX, PIPE, D>
where
    BUS: RegisterBus<Error = CommE>,
    TRX: OutputPin<Error = PinE>,
    PIPE: OutputPin<Error = PinE>,
    D: DelayMs<u32> + DelayUs<u32>,
{
    /// Create a driver in its power-on state:
    /// 12-bit output at the default frame rate, not streaming.
    /// Nothing is sent to the sensor until `setup` is called.
    pub fn new(bus: BUS, trx_reset: TRX, pipe_reset: PIPE, delay: D) -> Self {
        let bit_depth = BitDepth::Raw12;
        Self {
            bus,
            trx_reset,
            pipe_reset,
            delay,
            format: FrameFormat::new(
                MAX_FRAME_WIDTH,
                MAX_FRAME_HEIGHT,
                bus_codes::SRGGB12_1X12,
            ),
            bit_depth,
            frame_interval: FrameInterval::default(),
            frame_length: MAX_FRAME_HEIGHT + MIN_FRAME_DELTA,
            line_time: bit_depth.default_line_time_ns(),
            controls: Controls::new(timing::DEF_FRAME_RATE),
            state: StreamState::Stopped,
        }
    }

    /// Second-stage configuration:
    /// put the reset lines in their idle state and push every
    /// control's current value to the sensor.
    pub fn setup(&mut self) -> Result<(), crate::Error<CommE, PinE>> {
        #[cfg(feature = "rttdebug")]
        rprintln!("imx547-i2c setup start");

        self.trx_reset.set_high().map_err(Error::Pin)?;
        self.pipe_reset.set_low().map_err(Error::Pin)?;

        let controls = self.controls;
        self.apply_test_pattern(controls.test_pattern.value)?;
        self.apply_gain(controls.gain.value)?;
        self.apply_exposure(controls.exposure.value)?;
        self.apply_black_level(controls.black_level.value)?;

        #[cfg(feature = "rttdebug")]
        rprintln!("imx547-i2c setup done");
        Ok(())
    }

    /// Format most recently accepted by `set_format`
    pub fn format(&self) -> FrameFormat {
        self.format
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Select the pixel format used from the next stream start on.
    /// Unsupported codes, and any change while streaming, are rejected
    /// without touching any state.
    /// Line time falls back to the mode's static default, and the frame
    /// interval, frame length and exposure range are brought in line
    /// with the new mode's limits.
    pub fn set_format(
        &mut self,
        format: FrameFormat,
    ) -> Result<FrameFormat, crate::Error<CommE, PinE>> {
        let bit_depth = match BitDepth::from_code(format.code) {
            Some(depth) => depth,
            None => {
                #[cfg(feature = "rttdebug")]
                rprintln!("imx547 unknown pixel format {:#x}", format.code);
                return Err(Error::InvalidFormat(format.code));
            }
        };
        // HMAX belongs to the running mode table until the next start
        if self.state == StreamState::Streaming {
            #[cfg(feature = "rttdebug")]
            rprintln!("imx547 format change refused while streaming");
            return Err(Error::Busy);
        }

        self.format = format;
        self.bit_depth = bit_depth;
        self.line_time = bit_depth.default_line_time_ns();
        self.frame_interval = timing::clamp_frame_interval(
            self.frame_interval,
            bit_depth.max_frame_interval(),
        );
        self.frame_length = self.checked_frame_length(self.frame_interval);
        self.refresh_exposure_range();

        Ok(self.format)
    }

    /// Frame interval in effect, after any clamping
    pub fn frame_interval(&self) -> FrameInterval {
        self.frame_interval
    }

    /// Change the frame rate.
    /// Requests outside what the current mode supports are replaced by
    /// the nearest supported interval, which is returned.
    /// The exposure range shrinks or grows with the new frame length and
    /// the current exposure is re-applied within it.
    pub fn set_frame_interval(
        &mut self,
        interval: FrameInterval,
    ) -> Result<FrameInterval, crate::Error<CommE, PinE>> {
        self.program_frame_length(interval)?;
        self.refresh_exposure_range();
        let exposure = self.controls.exposure.value;
        self.apply_exposure(exposure)?;

        #[cfg(feature = "rttdebug")]
        rprintln!(
            "imx547 frame interval {}/{}",
            self.frame_interval.numerator,
            self.frame_interval.denominator
        );
        Ok(self.frame_interval)
    }

    /// Current value of a control
    pub fn control(&self, id: ControlId) -> i32 {
        self.controls.get(id).value
    }

    /// Valid range of a control. The exposure range follows the frame length.
    pub fn control_range(&self, id: ControlId) -> ControlRange {
        self.controls.get(id).range
    }

    /// Set a control.
    /// The value is clamped into the control's range; the clamped value
    /// is written to the sensor and returned. The cached value only
    /// changes once the sensor accepted the write.
    pub fn set_control(
        &mut self,
        id: ControlId,
        val: i32,
    ) -> Result<i32, crate::Error<CommE, PinE>> {
        #[cfg(feature = "rttdebug")]
        rprintln!("imx547 s_ctrl {:?} = {}", id, val);

        match id {
            ControlId::Exposure => self.apply_exposure(val),
            ControlId::Gain => self.apply_gain(val),
            ControlId::BlackLevel => self.apply_black_level(val),
            ControlId::TestPattern => self.apply_test_pattern(val),
        }
    }

    pub fn stream_state(&self) -> StreamState {
        self.state
    }

    /// Duration of one line in ns
    pub fn line_time_ns(&self) -> u32 {
        self.line_time
    }

    /// Frame length in lines, as last computed
    pub fn frame_length(&self) -> u32 {
        self.frame_length
    }

    /// Start or stop streaming
    pub fn set_stream(
        &mut self,
        on: bool,
    ) -> Result<(), crate::Error<CommE, PinE>> {
        if on {
            self.start_streaming()
        } else {
            self.stop_streaming()
        }
    }

    /// Load the full register configuration and start the sensor.
    /// On failure the driver stays `Stopped` and nothing further is
    /// written; calling again restarts from the beginning.
    pub fn start_streaming(
        &mut self,
    ) -> Result<(), crate::Error<CommE, PinE>> {
        if self.state == StreamState::Streaming {
            return Ok(());
        }

        let res = self.start_sequence();
        match res {
            Ok(()) => {
                self.state = StreamState::Streaming;
                #[cfg(feature = "rttdebug")]
                rprintln!("imx547 streaming");
            }
            Err(ref _e) => {
                #[cfg(feature = "rttdebug")]
                rprintln!("imx547 stream start failed");
            }
        }
        res
    }

    /// Put the sensor in standby.
    /// Always ends `Stopped`; the first bus error, if any, is reported
    /// after the whole sequence has been attempted.
    pub fn stop_streaming(
        &mut self,
    ) -> Result<(), crate::Error<CommE, PinE>> {
        let standby = self.write_reg(Register::Standby, 0x01);
        self.delay.delay_us(STANDBY_SETTLE_US);
        let master = self.write_reg(Register::Xmsta, 0x01);
        self.state = StreamState::Stopped;

        #[cfg(feature = "rttdebug")]
        {
            if standby.is_err() || master.is_err() {
                rprintln!("imx547 stop stream write failed");
            } else {
                rprintln!("imx547 stopped");
            }
        }

        standby.and(master)
    }

    /// Stop streaming and give back the hardware resources
    pub fn release(mut self) -> (BUS, TRX, PIPE, D) {
        let _ = self.stop_streaming();
        (self.bus, self.trx_reset, self.pipe_reset, self.delay)
    }

    fn start_sequence(&mut self) -> Result<(), crate::Error<CommE, PinE>> {
        self.load_table(mode_tables::COMMON_SETTINGS)?;
        self.load_table(self.bit_depth.table())?;

        self.update_line_time()?;
        let interval = self.frame_interval;
        self.program_frame_length(interval)?;
        self.refresh_exposure_range();
        let exposure = self.controls.exposure.value;
        self.apply_exposure(exposure)?;

        self.write_reg(Register::Standby, 0x00)?;
        self.delay.delay_us(REGULATOR_SETTLE_US);
        self.trx_reset.set_high().map_err(Error::Pin)?;
        self.delay.delay_ms(TRX_RESET_PULSE_MS);
        self.trx_reset.set_low().map_err(Error::Pin)?;
        self.write_reg(Register::Xmsta, 0x00)
    }

    /// Derive the line time from the HMAX value the mode table just loaded
    fn update_line_time(&mut self) -> Result<(), crate::Error<CommE, PinE>> {
        let hmax =
            self.bus.read_multi(Register::HmaxLow.addr(), 2).map_err(|e| {
                #[cfg(feature = "rttdebug")]
                rprintln!("imx547 hmax read failed");
                Error::Comm(e)
            })?;
        let line_time = timing::line_time_from_hmax(hmax, timing::INCK_HZ);

        if line_time == 0 {
            #[cfg(feature = "rttdebug")]
            rprintln!("imx547 hmax {} unusable, using default line time", hmax);
            self.line_time = self.bit_depth.default_line_time_ns();
        } else {
            self.line_time = line_time;
        }

        #[cfg(feature = "rttdebug")]
        rprintln!("imx547 hmax {} line time {} ns", hmax, self.line_time);
        Ok(())
    }

    /// Frame length for an already clamped interval,
    /// never shorter than the shortest exposure window allows
    fn checked_frame_length(&self, interval: FrameInterval) -> u32 {
        timing::frame_length(interval, self.line_time)
            .max(self.bit_depth.min_shs() + 1)
    }

    /// Clamp the interval, write the matching VMAX and commit both
    fn program_frame_length(
        &mut self,
        requested: FrameInterval,
    ) -> Result<(), crate::Error<CommE, PinE>> {
        let interval = timing::clamp_frame_interval(
            requested,
            self.bit_depth.max_frame_interval(),
        );
        let frame_length = self.checked_frame_length(interval);

        self.write_reg_multi(Register::VmaxLow, frame_length, 3)?;

        self.frame_interval = interval;
        self.frame_length = frame_length;

        #[cfg(feature = "rttdebug")]
        rprintln!(
            "imx547 rate {} ufps line time {} frame length {}",
            interval.micro_fps(),
            self.line_time,
            frame_length
        );
        Ok(())
    }

    /// Exposure may grow until only the minimum SHS lines are left
    fn refresh_exposure_range(&mut self) {
        let max = timing::max_exposure_us(
            self.frame_length,
            self.line_time,
            self.bit_depth.min_shs(),
        );
        let max = (max.min(i32::MAX as u32) as i32).max(MIN_EXPOSURE_TIME);
        self.controls
            .exposure
            .modify_range(ControlRange::new(MIN_EXPOSURE_TIME, max, max));
    }

    fn apply_exposure(
        &mut self,
        val: i32,
    ) -> Result<i32, crate::Error<CommE, PinE>> {
        let val = self.controls.exposure.range.clamp(val);
        let shs = timing::exposure_to_shs(
            val.max(0) as u32,
            self.frame_length,
            self.line_time,
            self.bit_depth.min_shs(),
        );

        self.write_reg_multi(Register::ShsLow, shs, 3)?;
        self.controls.exposure.value = val;

        #[cfg(feature = "rttdebug")]
        rprintln!(
            "imx547 exposure {} us shs {} frame length {}",
            val,
            shs,
            self.frame_length
        );
        Ok(val)
    }

    fn apply_gain(
        &mut self,
        val: i32,
    ) -> Result<i32, crate::Error<CommE, PinE>> {
        let val = self.controls.gain.range.clamp(val);
        self.write_reg_multi(Register::GainLow, val as u32, 2)?;
        self.controls.gain.value = val;
        Ok(val)
    }

    fn apply_black_level(
        &mut self,
        val: i32,
    ) -> Result<i32, crate::Error<CommE, PinE>> {
        let val = self.controls.black_level.range.clamp(val);
        self.write_reg_multi(Register::BlkLevelLow, val as u32, 2)?;
        self.controls.black_level.value = val;
        Ok(val)
    }

    fn apply_test_pattern(
        &mut self,
        val: i32,
    ) -> Result<i32, crate::Error<CommE, PinE>> {
        let val = self.controls.test_pattern.range.clamp(val);
        match TestPattern::from_index(val) {
            Some(TestPattern::NoPattern) | None => {
                self.write_reg(Register::TestPatternCtrl, 0x06)?;
            }
            Some(pattern) => {
                self.write_reg(Register::TestPatternCtrl, 0x07)?;
                self.write_reg(Register::TestPatternSel, pattern as u8)?;
            }
        }
        self.controls.test_pattern.value = val;
        Ok(val)
    }

    fn write_reg(
        &mut self,
        reg: Register,
        val: u8,
    ) -> Result<(), crate::Error<CommE, PinE>> {
        self.bus.write(reg.addr(), val).map_err(|e| {
            #[cfg(feature = "rttdebug")]
            rprintln!("imx547 write {:#x} = {:#x} failed", reg.addr(), val);
            Error::Comm(e)
        })
    }

    /// Write a little-endian value spread over `nbytes` registers
    fn write_reg_multi(
        &mut self,
        reg: Register,
        val: u32,
        nbytes: usize,
    ) -> Result<(), crate::Error<CommE, PinE>> {
        self.bus.write_multi(reg.addr(), val, nbytes).map_err(|e| {
            #[cfg(feature = "rttdebug")]
            rprintln!("imx547 write {:#x} = {:#x} failed", reg.addr(), val);
            Error::Comm(e)
        })
    }

    fn load_table(
        &mut self,
        program: &[Entry],
    ) -> Result<(), crate::Error<CommE, PinE>> {
        let res = table::write_table(&mut self.bus, &mut self.delay, program);
        res.map_err(|e| {
            #[cfg(feature = "rttdebug")]
            rprintln!("imx547 register table write failed");
            Error::Comm(e)
        })
    }
}

/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Fixed-point conversions between user units (us, fps) and the
//! sensor's line-based timing registers (HMAX, VMAX, SHS).
//! Everything is integer arithmetic with explicit scale factors,
//! truncating exactly where the hardware-verified formulas truncate.

use core::convert::TryFrom;

pub const K_FACTOR: u64 = 1_000;
pub const M_FACTOR: u64 = 1_000_000;
pub const G_FACTOR: u64 = 1_000_000_000;

/// Sensor input clock (INCK) in Hz
pub const INCK_HZ: u64 = 74_250_000;

/// Slowest supported frame rate, in fps
pub const MIN_FRAME_RATE: u32 = 2;
/// Frame rate used when no usable interval was requested, in fps
pub const DEF_FRAME_RATE: u32 = 60;

/// Largest value the 3-byte VMAX field can hold
pub const VMAX_LIMIT: u32 = 0x00FF_FFFF;

/// Time per frame, as seconds = numerator / denominator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameInterval {
    pub numerator: u32,
    pub denominator: u32,
}

impl FrameInterval {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// One frame every `1 / fps` seconds
    pub const fn from_fps(fps: u32) -> Self {
        Self::new(1, fps)
    }

    /// Frame rate in millionths of a frame per second.
    /// A zero interval yields zero.
    pub fn micro_fps(&self) -> u64 {
        if self.numerator == 0 {
            return 0;
        }
        M_FACTOR * u64::from(self.denominator) / u64::from(self.numerator)
    }
}

impl Default for FrameInterval {
    fn default() -> Self {
        Self::from_fps(DEF_FRAME_RATE)
    }
}

/// Line time in ns for a given HMAX (in input clock periods)
pub fn line_time_from_hmax(hmax: u32, inck_hz: u64) -> u32 {
    let ns = u64::from(hmax) * G_FACTOR / inck_hz;
    u32::try_from(ns).unwrap_or(u32::MAX)
}

/// Bring a requested interval into `[MIN_FRAME_RATE, max_interval]`.
/// Out of range requests are replaced by the boundary interval itself,
/// so the caller reports back exactly what the sensor runs at.
pub fn clamp_frame_interval(
    requested: FrameInterval,
    max_interval: FrameInterval,
) -> FrameInterval {
    let requested = if requested.numerator == 0 || requested.denominator == 0
    {
        FrameInterval::default()
    } else {
        requested
    };

    let rate = requested.micro_fps();
    if rate > max_interval.micro_fps() {
        max_interval
    } else if rate < u64::from(MIN_FRAME_RATE) * M_FACTOR {
        FrameInterval::from_fps(MIN_FRAME_RATE)
    } else {
        requested
    }
}

/// Frame length in lines needed to run at `interval` with the given line time.
/// The interval is expected to be clamped already.
pub fn frame_length(interval: FrameInterval, line_time_ns: u32) -> u32 {
    let divisor = interval.micro_fps() * u64::from(line_time_ns);
    if divisor == 0 {
        return VMAX_LIMIT;
    }
    let lines = (M_FACTOR * G_FACTOR) / divisor;
    u32::try_from(lines).unwrap_or(VMAX_LIMIT).min(VMAX_LIMIT)
}

/// SHS register value for an exposure time in us.
/// The shutter opens `exposure` worth of lines before the end of the frame,
/// but never earlier than `min_shs` nor later than the last line.
pub fn exposure_to_shs(
    exposure_us: u32,
    frame_length: u32,
    line_time_ns: u32,
    min_shs: u32,
) -> u32 {
    let lines =
        u64::from(exposure_us) * K_FACTOR / u64::from(line_time_ns.max(1));
    let lines = i64::try_from(lines).unwrap_or(i64::MAX);
    let shs = i64::from(frame_length) - lines;
    let last_line = frame_length.saturating_sub(1);

    if shs < i64::from(min_shs) {
        min_shs
    } else if shs > i64::from(last_line) {
        last_line
    } else {
        shs as u32
    }
}

/// Longest exposure in us that still leaves `min_shs` lines in the frame
pub fn max_exposure_us(
    frame_length: u32,
    line_time_ns: u32,
    min_shs: u32,
) -> u32 {
    let lines = u64::from(frame_length.saturating_sub(min_shs));
    let us = lines * u64::from(line_time_ns) / K_FACTOR;
    u32::try_from(us).unwrap_or(u32::MAX)
}

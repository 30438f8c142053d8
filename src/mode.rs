/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! The two readout modes of the sensor and the media bus codes that select them

use crate::mode_tables;
use crate::table::Entry;
use crate::timing::FrameInterval;

/// Media bus pixel codes understood by the host video framework
pub mod bus_codes {
    pub const Y10_1X10: u32 = 0x200a;
    pub const Y12_1X12: u32 = 0x2013;
    pub const SRGGB10_1X10: u32 = 0x300f;
    pub const SRGGB12_1X12: u32 = 0x3012;
}

/// ADC / output bit depth.
/// Each depth has its own register program and timing limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitDepth {
    Raw10,
    Raw12,
}

impl BitDepth {
    /// Map a media bus code to a readout mode, if the sensor supports it
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            bus_codes::SRGGB10_1X10 | bus_codes::Y10_1X10 => {
                Some(BitDepth::Raw10)
            }
            bus_codes::SRGGB12_1X12 | bus_codes::Y12_1X12 => {
                Some(BitDepth::Raw12)
            }
            _ => None,
        }
    }

    /// Register program that configures this mode
    pub fn table(self) -> &'static [Entry] {
        match self {
            BitDepth::Raw10 => mode_tables::MODE_10BIT,
            BitDepth::Raw12 => mode_tables::MODE_12BIT,
        }
    }

    /// Line time in ns to assume until HMAX can be read back
    pub fn default_line_time_ns(self) -> u32 {
        match self {
            BitDepth::Raw10 => 3700,
            BitDepth::Raw12 => 5500,
        }
    }

    /// Earliest line the shutter may open on
    pub fn min_shs(self) -> u32 {
        match self {
            BitDepth::Raw10 => 54,
            BitDepth::Raw12 => 40,
        }
    }

    /// Shortest frame interval: 122.2 fps for 10-bit, 82.4 fps for 12-bit
    pub fn max_frame_interval(self) -> FrameInterval {
        match self {
            BitDepth::Raw10 => FrameInterval::new(5, 611),
            BitDepth::Raw12 => FrameInterval::new(5, 412),
        }
    }
}

/// Frame format as negotiated with the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameFormat {
    pub width: u32,
    pub height: u32,
    /// Media bus pixel code, see [`bus_codes`]
    pub code: u32,
}

impl FrameFormat {
    pub const fn new(width: u32, height: u32, code: u32) -> Self {
        Self {
            width,
            height,
            code,
        }
    }
}

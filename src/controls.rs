/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! User-facing sensor controls and their valid ranges

pub const MIN_GAIN: i32 = 0;
pub const MAX_GAIN: i32 = 480;
pub const DEF_GAIN: i32 = 0;

pub const MIN_BLACK_LEVEL: i32 = 0;
pub const MAX_BLACK_LEVEL_10BIT: i32 = 1023;
pub const MAX_BLACK_LEVEL_12BIT: i32 = 4095;
pub const DEF_BLACK_LEVEL_10BIT: i32 = 60;
pub const DEF_BLACK_LEVEL_12BIT: i32 = 240;

/// Exposure floor in us. The ceiling follows the frame length at runtime.
pub const MIN_EXPOSURE_TIME: i32 = 14;
pub const DEF_EXPOSURE_TIME: i32 = 1000;

/// Stable identifiers the host uses to address a control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlId {
    /// Integration time in us
    Exposure,
    /// Analog gain code
    Gain,
    /// Black level offset
    BlackLevel,
    /// Index into [`TestPattern`]
    TestPattern,
}

/// Built-in pattern generator selections
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestPattern {
    NoPattern = 0,
    SequencePattern1 = 1,
    SequencePattern2 = 2,
    GradationPattern = 3,
}

impl TestPattern {
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(TestPattern::NoPattern),
            1 => Some(TestPattern::SequencePattern1),
            2 => Some(TestPattern::SequencePattern2),
            3 => Some(TestPattern::GradationPattern),
            _ => None,
        }
    }
}

/// Inclusive bounds plus the value a control resets to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlRange {
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

impl ControlRange {
    pub const fn new(min: i32, max: i32, default: i32) -> Self {
        Self { min, max, default }
    }

    pub fn clamp(&self, val: i32) -> i32 {
        if val > self.max {
            self.max
        } else if val < self.min {
            self.min
        } else {
            val
        }
    }
}

/// Current value of a control together with its range
#[derive(Clone, Copy, Debug)]
pub(crate) struct Control {
    pub range: ControlRange,
    pub value: i32,
}

impl Control {
    const fn new(range: ControlRange) -> Self {
        Self {
            range,
            value: range.default,
        }
    }

    /// Replace the range, pulling the current value inside it
    pub fn modify_range(&mut self, range: ControlRange) {
        self.range = range;
        self.value = range.clamp(self.value);
    }
}

/// The full control set of one sensor
#[derive(Clone, Copy, Debug)]
pub(crate) struct Controls {
    pub exposure: Control,
    pub gain: Control,
    pub black_level: Control,
    pub test_pattern: Control,
}

impl Controls {
    pub fn new(default_frame_rate: u32) -> Self {
        let max_exposure = 1_000_000 / default_frame_rate.max(1) as i32;
        Self {
            exposure: Control::new(ControlRange::new(
                MIN_EXPOSURE_TIME,
                max_exposure,
                DEF_EXPOSURE_TIME,
            )),
            gain: Control::new(ControlRange::new(MIN_GAIN, MAX_GAIN, DEF_GAIN)),
            // Sized for 10-bit output and left alone on format changes
            black_level: Control::new(ControlRange::new(
                MIN_BLACK_LEVEL,
                MAX_BLACK_LEVEL_10BIT,
                DEF_BLACK_LEVEL_10BIT,
            )),
            test_pattern: Control::new(ControlRange::new(
                TestPattern::NoPattern as i32,
                TestPattern::GradationPattern as i32,
                TestPattern::NoPattern as i32,
            )),
        }
    }

    pub fn get(&self, id: ControlId) -> &Control {
        match id {
            ControlId::Exposure => &self.exposure,
            ControlId::Gain => &self.gain,
            ControlId::BlackLevel => &self.black_level,
            ControlId::TestPattern => &self.test_pattern,
        }
    }
}

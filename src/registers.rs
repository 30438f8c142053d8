/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! IMX547 register map.
//! Multi-byte fields are little-endian: the `Low` register holds the
//! least significant byte and the following addresses hold the rest.

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    /// 0x01 standby, 0x00 operating
    Standby = 0x3000,
    /// Master mode start: 0x00 starts, 0x01 stops
    Xmsta = 0x3010,

    InckselSt0 = 0x3014,
    InckselSt1 = 0x3015,
    InckselSt2 = 0x3016,
    InckselSt3 = 0x3018,
    InckselSt4 = 0x3019,
    InckselSt5 = 0x301B,
    RegHold = 0x3034,
    HvMode = 0x303C,
    VopbVblkHwidLow = 0x30D0,
    VopbVblkHwidHigh = 0x30D1,
    FinfoHwidthLow = 0x30D2,
    FinfoHwidthHigh = 0x30D3,

    /// Frame length in lines, 3 bytes
    VmaxLow = 0x30D4,
    VmaxMid = 0x30D5,
    VmaxHigh = 0x30D6,
    /// Line length in input clock periods, 2 bytes
    HmaxLow = 0x30D8,
    HmaxHigh = 0x30D9,
    Freq = 0x30DC,
    Gmrwt = 0x30E2,
    Gmtwt = 0x30E3,
    GainDly = 0x30E5,
    GsDly = 0x30E6,

    AdBit = 0x3200,
    HreverseVreverse = 0x3204,

    InckselN0 = 0x321C,
    InckselN1 = 0x321D,
    InckselN2 = 0x321E,
    InckselN3 = 0x321F,
    InckselS0 = 0x3220,
    InckselS1 = 0x3221,
    InckselS2 = 0x3222,
    InckselS3 = 0x3223,
    InckselD0 = 0x3224,
    InckselD1 = 0x3225,
    InckselD2 = 0x3226,
    InckselD3 = 0x3227,

    SlvsEn = 0x322B,
    LlBlankLow = 0x323C,
    LlBlankHigh = 0x323D,
    VintEn = 0x323E,

    /// Shutter start line, 3 bytes
    ShsLow = 0x3240,
    ShsMid = 0x3241,
    ShsHigh = 0x3242,

    TrigMode = 0x3400,
    OdBit = 0x3430,
    SyncSel = 0x343C,
    StbSlvs = 0x3444,

    GainRts = 0x3502,
    /// Analog gain code, 2 bytes
    GainLow = 0x3514,
    GainHigh = 0x3515,
    /// Pattern generator enable
    TestPatternCtrl = 0x3550,
    /// Pattern generator selection
    TestPatternSel = 0x3551,
    /// Black level offset, 2 bytes
    BlkLevelLow = 0x35B4,
    BlkLevelHigh = 0x35B5,

    LaneSel = 0x3904,
    IdleCode1Low = 0x3934,
    IdleCode1High = 0x3935,
    IdleCode2Low = 0x3936,
    IdleCode2High = 0x3937,
    IdleCode3Low = 0x3938,
    IdleCode3High = 0x3939,
    IdleCode4Low = 0x393A,
    IdleCode4High = 0x393B,

    CrcEccMode = 0x3A00,
}

impl Register {
    pub const fn addr(self) -> u16 {
        self as u16
    }
}

/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Register programs loaded when streaming starts.
//! The values are the sensor vendor's analog and timing calibration
//! and must be written exactly as listed.

use crate::registers::Register;
use crate::table::Entry;

/// Settle time appended to every program, in milliseconds
pub const TABLE_SETTLE_MS: u32 = 10;

const fn set(reg: Register, val: u8) -> Entry {
    Entry::Write(reg as u16, val)
}

const fn raw(addr: u16, val: u8) -> Entry {
    Entry::Write(addr, val)
}

/// Clock, lane and analog setup shared by every pixel format
pub static COMMON_SETTINGS: &[Entry] = &[
    set(Register::Freq, 0x00),
    set(Register::InckselSt0, 0x0A),
    set(Register::InckselSt1, 0x22),
    set(Register::InckselSt2, 0xB1),
    set(Register::InckselSt3, 0x40),
    set(Register::InckselSt4, 0x04),
    set(Register::InckselSt5, 0x3A),

    set(Register::InckselN0, 0x80),
    set(Register::InckselN1, 0x05),
    set(Register::InckselN2, 0xE0),
    set(Register::InckselN3, 0x00),

    set(Register::InckselS0, 0x80),
    set(Register::InckselS1, 0x05),
    set(Register::InckselS2, 0xE0),
    set(Register::InckselS3, 0x00),

    set(Register::InckselD0, 0x10),
    set(Register::InckselD1, 0x14),
    set(Register::InckselD2, 0x20),
    set(Register::InckselD3, 0xC0),

    set(Register::SlvsEn, 0x02),
    set(Register::LlBlankLow, 0x19),
    set(Register::VintEn, 0x33),
    set(Register::CrcEccMode, 0xD1),
    set(Register::VopbVblkHwidLow, 0xA8),
    set(Register::VopbVblkHwidHigh, 0x09),
    set(Register::FinfoHwidthLow, 0xA8),
    set(Register::FinfoHwidthHigh, 0x09),
    set(Register::IdleCode1Low, 0x3C),
    set(Register::IdleCode1High, 0x01),
    set(Register::IdleCode2Low, 0xBC),
    set(Register::IdleCode2High, 0x01),
    set(Register::IdleCode3Low, 0x3C),
    set(Register::IdleCode3High, 0x01),
    set(Register::IdleCode4Low, 0x3C),
    set(Register::IdleCode4High, 0x01),

    set(Register::HvMode, 0x03),
    set(Register::LaneSel, 0x03),

    set(Register::GainRts, 0x09),
    set(Register::SyncSel, 0xF0),

    raw(0x3004, 0xA8),
    raw(0x3005, 0x02),

    raw(0x3233, 0x00),

    raw(0x3521, 0x3D),
    raw(0x3535, 0x00),
    raw(0x3542, 0x27),
    raw(0x3546, 0x0F),
    raw(0x354A, 0x20),
    raw(0x359C, 0x0F),
    raw(0x359D, 0x02),
    raw(0x35A5, 0x12),
    raw(0x35A9, 0x62),
    raw(0x35CE, 0x0E),
    raw(0x35ED, 0x12),
    raw(0x35F0, 0xFB),
    raw(0x35F1, 0x0B),
    raw(0x35F2, 0xFB),
    raw(0x35F3, 0x0B),

    raw(0x3642, 0x10),
    raw(0x366A, 0x2E),
    raw(0x3670, 0xC3),
    raw(0x3672, 0x05),
    raw(0x3674, 0xB6),
    raw(0x3675, 0x01),
    raw(0x3676, 0x05),
    raw(0x3692, 0x10),
    raw(0x36F5, 0x0F),

    raw(0x3797, 0x20),

    raw(0x3E2E, 0x07),
    raw(0x3E30, 0x4E),
    raw(0x3E6E, 0x07),
    raw(0x3E70, 0x35),
    raw(0x3E96, 0x01),
    raw(0x3E9E, 0x38),
    raw(0x3EA0, 0x4C),

    raw(0x3F3A, 0x04),

    raw(0x4182, 0x00),
    raw(0x41A2, 0x03),

    raw(0x4232, 0x3C),
    raw(0x4235, 0x22),

    raw(0x4306, 0x00),
    raw(0x4307, 0x00),
    raw(0x4308, 0x00),
    raw(0x4309, 0x00),
    raw(0x4310, 0x04),
    raw(0x4311, 0x04),
    raw(0x4312, 0x04),
    raw(0x4313, 0x04),
    raw(0x431E, 0x16),
    raw(0x431F, 0x16),
    raw(0x433C, 0x8A),
    raw(0x433D, 0x02),
    raw(0x433E, 0xE8),
    raw(0x433F, 0x05),
    raw(0x4340, 0x9E),
    raw(0x4341, 0x0C),

    raw(0x446A, 0x4C),
    raw(0x446E, 0x51),
    raw(0x4472, 0x57),
    raw(0x4476, 0x79),
    raw(0x448A, 0x4C),
    raw(0x448E, 0x51),
    raw(0x4492, 0x57),
    raw(0x4496, 0x79),
    raw(0x44EC, 0x3F),
    raw(0x44F0, 0x44),
    raw(0x44F4, 0x4A),

    raw(0x4510, 0x3F),
    raw(0x4514, 0x44),
    raw(0x4518, 0x4A),
    raw(0x4576, 0xBE),
    raw(0x457A, 0xB1),
    raw(0x4580, 0xBC),
    raw(0x4584, 0xAF),

    raw(0x473C, 0x06),
    raw(0x473D, 0x06),
    raw(0x473E, 0x06),
    raw(0x473F, 0x06),
    raw(0x4749, 0x9F),
    raw(0x474A, 0x99),
    raw(0x474B, 0x09),
    raw(0x4753, 0x90),
    raw(0x4754, 0x99),
    raw(0x4755, 0x09),
    raw(0x4788, 0x04),

    raw(0x4864, 0xDC),
    raw(0x4868, 0xDC),
    raw(0x486C, 0xDC),
    raw(0x4874, 0xDC),
    raw(0x4878, 0xDC),
    raw(0x487C, 0xDC),
    raw(0x48A4, 0xF4),
    raw(0x48A8, 0xF4),
    raw(0x48AC, 0xF4),
    raw(0x48B4, 0xF4),
    raw(0x48B8, 0xF4),
    raw(0x48BC, 0xF4),

    raw(0x4901, 0x0A),
    raw(0x4902, 0x01),
    raw(0x4916, 0x00),
    raw(0x4917, 0x00),
    raw(0x4918, 0xFF),
    raw(0x4919, 0x0F),
    raw(0x491E, 0xFF),
    raw(0x491F, 0x0F),
    raw(0x4920, 0x00),
    raw(0x4921, 0x00),
    raw(0x4926, 0xFF),
    raw(0x4927, 0x0F),
    raw(0x4928, 0x00),
    raw(0x4929, 0x00),

    raw(0x4A34, 0x0A),

    Entry::Wait(TABLE_SETTLE_MS),
    Entry::End,
];

/// 10-bit readout: HMAX 274, VMAX 2216
pub static MODE_10BIT: &[Entry] = &[
    set(Register::HmaxLow, 0x12),
    set(Register::HmaxHigh, 0x01),
    set(Register::VmaxLow, 0xA8),
    set(Register::VmaxMid, 0x08),

    set(Register::Gmrwt, 0x08),
    set(Register::Gmtwt, 0x32),
    set(Register::GainDly, 0x02),
    set(Register::GsDly, 0x08),

    set(Register::AdBit, 0x05),
    set(Register::OdBit, 0x00),

    raw(0x35A4, 0x1C),
    raw(0x35A8, 0x1C),
    raw(0x35EC, 0x1C),

    raw(0x362C, 0x1C),
    raw(0x362E, 0xEB),
    raw(0x362F, 0x1F),
    raw(0x3654, 0x1C),
    raw(0x3656, 0xEB),
    raw(0x3657, 0x1F),
    raw(0x367C, 0x1C),
    raw(0x367E, 0xEB),
    raw(0x367F, 0x1F),
    raw(0x36E8, 0x11),

    raw(0x4056, 0x0F),
    raw(0x4096, 0x0F),

    raw(0x4460, 0x6C),

    raw(0x45E6, 0x53),
    raw(0x45F0, 0x90),
    raw(0x45F2, 0x8A),
    raw(0x45F8, 0x8E),
    raw(0x45FA, 0x90),

    raw(0x4604, 0x8E),
    raw(0x4606, 0x90),
    raw(0x460C, 0x8A),
    raw(0x460E, 0xBB),
    raw(0x4614, 0x90),
    raw(0x4616, 0x8A),
    raw(0x4634, 0x4A),
    raw(0x4636, 0x90),
    raw(0x463C, 0x4C),
    raw(0x463E, 0x92),
    raw(0x4644, 0x4E),
    raw(0x4646, 0x94),
    raw(0x464C, 0x47),
    raw(0x464E, 0x4D),
    raw(0x4654, 0x49),
    raw(0x4656, 0x50),
    raw(0x465C, 0x4B),
    raw(0x465E, 0x52),
    raw(0x466A, 0x9E),
    raw(0x4670, 0x98),
    raw(0x4676, 0x96),
    raw(0x4678, 0xBA),
    raw(0x4698, 0x93),
    raw(0x469A, 0xB9),

    raw(0x4728, 0xD4),
    raw(0x4729, 0x0E),
    raw(0x472E, 0x05),
    raw(0x472F, 0x04),
    raw(0x4730, 0x04),
    raw(0x4731, 0x04),

    raw(0x4900, 0x64),
    raw(0x4908, 0x6E),

    Entry::Wait(TABLE_SETTLE_MS),
    Entry::End,
];

/// 12-bit readout: HMAX 408, VMAX 2208
pub static MODE_12BIT: &[Entry] = &[
    set(Register::HmaxLow, 0x98),
    set(Register::HmaxHigh, 0x01),
    set(Register::VmaxLow, 0xA0),
    set(Register::VmaxMid, 0x08),

    set(Register::Gmrwt, 0x06),
    set(Register::Gmtwt, 0x24),
    set(Register::GainDly, 0x02),
    set(Register::GsDly, 0x10),

    set(Register::AdBit, 0x15),
    set(Register::OdBit, 0x01),

    raw(0x35A4, 0x08),
    raw(0x35A8, 0x08),
    raw(0x35EC, 0x08),

    raw(0x362C, 0x64),
    raw(0x362E, 0x00),
    raw(0x362F, 0x00),
    raw(0x3654, 0x64),
    raw(0x3656, 0x20),
    raw(0x3657, 0x00),
    raw(0x367C, 0x64),
    raw(0x367E, 0x00),
    raw(0x367F, 0x00),
    raw(0x36E8, 0x13),

    raw(0x4056, 0x23),
    raw(0x4096, 0x23),

    raw(0x4460, 0x6E),

    raw(0x45E6, 0x3F),
    raw(0x45F0, 0x95),
    raw(0x45F2, 0x8F),
    raw(0x45F8, 0x93),
    raw(0x45FA, 0x95),

    raw(0x4604, 0x93),
    raw(0x4606, 0x95),
    raw(0x460C, 0x8F),
    raw(0x460E, 0xC0),
    raw(0x4614, 0x95),
    raw(0x4616, 0x8F),
    raw(0x4634, 0x36),
    raw(0x4636, 0x95),
    raw(0x463C, 0x38),
    raw(0x463E, 0x97),
    raw(0x4644, 0x3A),
    raw(0x4646, 0x99),
    raw(0x464C, 0x33),
    raw(0x464E, 0x39),
    raw(0x4654, 0x35),
    raw(0x4656, 0x3C),
    raw(0x465C, 0x37),
    raw(0x465E, 0x3E),
    raw(0x466A, 0xA3),
    raw(0x4670, 0x9D),
    raw(0x4676, 0x9B),
    raw(0x4678, 0xBF),
    raw(0x4698, 0x98),
    raw(0x469A, 0xBE),

    raw(0x4728, 0xFB),
    raw(0x4729, 0x07),
    raw(0x472E, 0x06),
    raw(0x472F, 0x06),
    raw(0x4730, 0x06),
    raw(0x4731, 0x06),

    raw(0x4900, 0x6C),
    raw(0x4908, 0x68),

    Entry::Wait(TABLE_SETTLE_MS),
    Entry::End,
];

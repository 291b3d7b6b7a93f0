//! Temperature code tables for both wire encodings.
//!
//! Each supported setpoint maps to the payload code and checksum field
//! captured off the corresponding OEM remote. Legacy checksums occupy the
//! 17-bit tail of the frame (word 3, left-aligned); Modern codes and
//! checksums are 16-bit half-words.
//!
//! Both encoders pick entries by exact setpoint; the interpreter scans the
//! fifteen 16-30 degree codes linearly when mapping a received frame back
//! to a temperature.

/// Sentinel setpoint requesting power-off.
pub const SETPOINT_OFF: i16 = 0;

/// Legacy-only vent mode, requested as "temperature 5".
pub const SETPOINT_VENT: i16 = 5;

/// Lowest/highest real setpoints common to both encodings.
pub const SETPOINT_MIN: i16 = 16;
pub const SETPOINT_MAX: i16 = 30;

/// One captured table entry: setpoint, payload code, checksum field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempCode {
    pub celsius: i16,
    pub code: u32,
    pub check: u32,
}

/// Legacy payload/checksum table. The off and vent entries are distinct
/// commands, not setpoints, and are never matched by the interpreter.
pub const LEGACY_TEMP_CODES: [TempCode; 17] = [
    TempCode { celsius: 0, code: 0xA1F0_0812, check: 0x10291 },
    TempCode { celsius: 5, code: 0xA1F0_2C66, check: 0x1030B },
    TempCode { celsius: 16, code: 0xA10F_1C24, check: 0x102D4 },
    TempCode { celsius: 17, code: 0xA11E_1C24, check: 0x102E3 },
    TempCode { celsius: 18, code: 0xA12D_1C24, check: 0x102F2 },
    TempCode { celsius: 19, code: 0xA13C_1C24, check: 0x10301 },
    TempCode { celsius: 20, code: 0xA14B_1C24, check: 0x10310 },
    TempCode { celsius: 21, code: 0xA15A_1C24, check: 0x1031F },
    TempCode { celsius: 22, code: 0xA169_1C24, check: 0x1032E },
    TempCode { celsius: 23, code: 0xA178_1C24, check: 0x1033D },
    TempCode { celsius: 24, code: 0xA187_1C24, check: 0x1034C },
    TempCode { celsius: 25, code: 0xA196_1C24, check: 0x1035B },
    TempCode { celsius: 26, code: 0xA1A5_1C24, check: 0x1036A },
    TempCode { celsius: 27, code: 0xA1B4_1C24, check: 0x10379 },
    TempCode { celsius: 28, code: 0xA1C3_1C24, check: 0x10388 },
    TempCode { celsius: 29, code: 0xA1D2_1C24, check: 0x10397 },
    TempCode { celsius: 30, code: 0xA1E1_1C24, check: 0x103A6 },
];

/// Modern payload/checksum table. Codes and checksums are 16-bit; there is
/// no vent entry in this encoding.
pub const MODERN_TEMP_CODES: [TempCode; 16] = [
    TempCode { celsius: 0, code: 0xF17D, check: 0x7E21 },
    TempCode { celsius: 16, code: 0x00AF, check: 0x7AC4 },
    TempCode { celsius: 17, code: 0x10AF, check: 0x7AD4 },
    TempCode { celsius: 18, code: 0x20AF, check: 0x7AE4 },
    TempCode { celsius: 19, code: 0x30AF, check: 0x7AF4 },
    TempCode { celsius: 20, code: 0x40AF, check: 0x7B04 },
    TempCode { celsius: 21, code: 0x50AF, check: 0x7B14 },
    TempCode { celsius: 22, code: 0x60AF, check: 0x7B24 },
    TempCode { celsius: 23, code: 0x70AF, check: 0x7B34 },
    TempCode { celsius: 24, code: 0x80AF, check: 0x7B44 },
    TempCode { celsius: 25, code: 0x90AF, check: 0x7B54 },
    TempCode { celsius: 26, code: 0xA0AF, check: 0x7B64 },
    TempCode { celsius: 27, code: 0xB0AF, check: 0x7B74 },
    TempCode { celsius: 28, code: 0xC0AF, check: 0x7B84 },
    TempCode { celsius: 29, code: 0xD0AF, check: 0x7B94 },
    TempCode { celsius: 30, code: 0xE0AF, check: 0x7BA4 },
];

/// Look up the Legacy entry for a requested setpoint.
pub fn legacy_code(celsius: i16) -> Option<&'static TempCode> {
    LEGACY_TEMP_CODES.iter().find(|entry| entry.celsius == celsius)
}

/// Look up the Modern entry for a requested setpoint.
pub fn modern_code(celsius: i16) -> Option<&'static TempCode> {
    MODERN_TEMP_CODES.iter().find(|entry| entry.celsius == celsius)
}

/// Map a received Legacy payload word back to a setpoint. Only the fifteen
/// real setpoint codes participate; off/vent frames read as unknown.
pub fn legacy_setpoint_for(code: u32) -> Option<i16> {
    LEGACY_TEMP_CODES
        .iter()
        .filter(|entry| entry.celsius >= SETPOINT_MIN)
        .find(|entry| entry.code == code)
        .map(|entry| entry.celsius)
}

/// Map a received Modern payload half-word back to a setpoint.
pub fn modern_setpoint_for(code: u16) -> Option<i16> {
    MODERN_TEMP_CODES
        .iter()
        .filter(|entry| entry.celsius >= SETPOINT_MIN)
        .find(|entry| entry.code == code as u32)
        .map(|entry| entry.celsius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_setpoint_has_an_entry() {
        for celsius in SETPOINT_MIN..=SETPOINT_MAX {
            assert!(legacy_code(celsius).is_some(), "legacy {celsius}");
            assert!(modern_code(celsius).is_some(), "modern {celsius}");
        }
        assert!(legacy_code(SETPOINT_OFF).is_some());
        assert!(legacy_code(SETPOINT_VENT).is_some());
        assert!(modern_code(SETPOINT_OFF).is_some());
    }

    #[test]
    fn unsupported_setpoints_miss() {
        assert!(legacy_code(31).is_none());
        assert!(legacy_code(15).is_none());
        assert!(modern_code(SETPOINT_VENT).is_none());
        assert!(modern_code(-1).is_none());
    }

    #[test]
    fn codes_are_unique() {
        for (i, a) in LEGACY_TEMP_CODES.iter().enumerate() {
            for b in &LEGACY_TEMP_CODES[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
        for (i, a) in MODERN_TEMP_CODES.iter().enumerate() {
            for b in &MODERN_TEMP_CODES[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
    }

    #[test]
    fn setpoint_lookup_round_trips() {
        for celsius in SETPOINT_MIN..=SETPOINT_MAX {
            let legacy = legacy_code(celsius).unwrap();
            assert_eq!(legacy_setpoint_for(legacy.code), Some(celsius));
            let modern = modern_code(celsius).unwrap();
            assert_eq!(modern_setpoint_for(modern.code as u16), Some(celsius));
        }
    }

    #[test]
    fn off_and_vent_read_as_unknown() {
        let off = legacy_code(SETPOINT_OFF).unwrap();
        assert_eq!(legacy_setpoint_for(off.code), None);
        let vent = legacy_code(SETPOINT_VENT).unwrap();
        assert_eq!(legacy_setpoint_for(vent.code), None);
        let off = modern_code(SETPOINT_OFF).unwrap();
        assert_eq!(modern_setpoint_for(off.code as u16), None);
    }
}

//! Protocol constants for the AC infrared remote codec.
//!
//! This module defines all the constants used on the IR wire, including
//! pulse timings, classification thresholds, frame geometry, and the
//! repeat policy for both supported encodings.

use crate::types::BitTiming;

/// Minimum elapsed ticks after issuing a command before the encoder
/// reacts to a timing-interval event (suppresses spurious re-entrant
/// callbacks from the timer hardware)
pub const GUARD_TICKS: u32 = 100;

/// Inter-edge gap above which the decoder considers itself desynchronized
/// and restarts frame capture
pub const RESYNC_TICKS: u32 = 400;

/// Inter-edge gap above which (up to the resync threshold) a gap decodes
/// as a logical one
pub const ONE_TICKS: u32 = 160;

/// Inter-edge gap above which (up to the one threshold) a gap decodes as
/// a logical zero; shorter gaps also take the zero path
pub const ZERO_TICKS: u32 = 80;

/// Legacy frame length in bits
pub const LEGACY_FRAME_BITS: u16 = 113;

/// Modern frame length in bits
pub const MODERN_FRAME_BITS: u16 = 48;

/// Edges per received Legacy frame (start edge plus one per data bit)
pub const LEGACY_EDGE_COUNT: u16 = 114;

/// Edges per received Modern frame (start edge plus one per data bit)
pub const MODERN_EDGE_COUNT: u16 = 49;

/// Legacy address word (frame word 0)
pub const LEGACY_ADDRESS: u32 = 0xB24D_1FE0;

/// Modern address half-word (frame half-word 0)
pub const MODERN_ADDRESS: u16 = 0xC34A;

/// Repeat frames sent after the initial Legacy frame
pub const LEGACY_REPEATS: u8 = 5;

/// Total Modern frames per command (two per cycle, five cycles)
pub const MODERN_TOTAL_FRAMES: u8 = 10;

/// Legacy start-bit timing (period, carrier on-time) in ticks
pub const LEGACY_START: BitTiming = BitTiming::new(440, 330);

/// Legacy logical-one timing in ticks
pub const LEGACY_ONE: BitTiming = BitTiming::new(220, 165);

/// Legacy logical-zero timing in ticks
pub const LEGACY_ZERO: BitTiming = BitTiming::new(110, 55);

/// Modern start-bit timing in ticks
pub const MODERN_START: BitTiming = BitTiming::new(430, 320);

/// Modern logical-one timing in ticks
pub const MODERN_ONE: BitTiming = BitTiming::new(180, 120);

/// Modern logical-zero timing in ticks
pub const MODERN_ZERO: BitTiming = BitTiming::new(96, 48);

/// Rest gap between the two frames of a Modern pair (carrier held off)
pub const MODERN_PAIR_REST: BitTiming = BitTiming::new(512, 0);

/// Legacy feature word (frame word 2) sent with every temperature command:
/// mode auto, fan medium, blower level 0x60
pub const LEGACY_FEATURE_WORD: u32 = 0x0A40_6000;

/// Mask selecting the fan-speed field of the Legacy feature word
pub const LEGACY_FAN_MASK: u32 = 0x00FF_0000;

/// Fan-speed bit patterns within the masked field, low to high
pub const LEGACY_FAN_PATTERNS: [u32; 3] = [0x0020_0000, 0x0040_0000, 0x0080_0000];

/// Shift down to the blower-level sub-field of the Legacy feature word
pub const LEGACY_BLOWER_SHIFT: u32 = 8;

/// Blower levels at or above this value report the blower as running
pub const LEGACY_BLOWER_THRESHOLD: u8 = 0x40;

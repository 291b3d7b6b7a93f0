//! Signal decoder: reconstructs command frames from the stream of
//! timestamped edges delivered by the IR receiver, and interprets
//! completed frames.
//!
//! Each edge carries the elapsed tick count since the previous edge. Gaps
//! longer than the resync threshold discard any partial progress and
//! restart capture, which doubles as start-of-frame detection: a frame's
//! start burst is itself longer than the threshold, so the receiver is
//! perpetually ready for the next valid frame no matter how garbled the
//! channel gets.

use crate::constants::*;
use crate::tables;
use crate::types::{CommandFrame, DecodedCommand, FanSpeed, ProtocolVariant};
use log::{debug, trace};

/// Decoder state. Mutated only by [`Decoder::edge`], the edge-interrupt
/// handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    variant: ProtocolVariant,
    acc: u32,
    bit_index: u8,
    word_slot: u8,
    edge_count: u16,
    words: [u32; 4],
}

impl Decoder {
    /// A decoder for the wire encoding of the paired indoor unit.
    pub fn new(variant: ProtocolVariant) -> Self {
        Self {
            variant,
            acc: 0,
            bit_index: 0,
            word_slot: 0,
            edge_count: 0,
            words: [0; 4],
        }
    }

    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    /// Consume one edge. Returns the raw frame when this edge completes
    /// one.
    pub fn edge(&mut self, elapsed_ticks: u32) -> Option<CommandFrame> {
        if elapsed_ticks > RESYNC_TICKS {
            // Lost sync, or the start burst of a fresh frame: either way,
            // capture restarts at word 0 with this edge as the first.
            trace!("rx resync after {elapsed_ticks} ticks");
            self.acc = 0;
            self.bit_index = 0;
            self.word_slot = 0;
            self.edge_count = 1;
            return None;
        }

        let bit = if elapsed_ticks > ONE_TICKS {
            1u32
        } else {
            // Gaps above ZERO_TICKS are a logical zero; shorter gaps have
            // no classification of their own and take the zero path too.
            0u32
        };

        self.acc |= bit << (31 - self.bit_index);
        self.bit_index += 1;
        self.edge_count = self.edge_count.saturating_add(1);

        if self.bit_index == 32 || self.edge_count == self.variant.edge_count() {
            self.words[self.word_slot as usize] = self.acc;
            self.acc = 0;
            self.bit_index = 0;
            self.word_slot += 1;

            if self.word_slot == self.variant.words_per_frame() {
                let mut frame = CommandFrame::new();
                for (index, word) in self.words.iter().enumerate() {
                    frame.set_word(index, *word);
                }
                self.word_slot = 0;
                self.edge_count = 0;
                self.words = [0; 4];
                trace!("rx frame complete");
                return Some(frame);
            }
        }

        None
    }
}

/// Validate and interpret a completed frame.
///
/// Frames whose address field does not match the variant's address
/// constant are discarded silently; other traffic and noise share the
/// channel, so a mismatch is expected, not an error.
pub fn interpret(frame: &CommandFrame, variant: ProtocolVariant) -> Option<DecodedCommand> {
    match variant {
        ProtocolVariant::Legacy => {
            let address = frame.word(0);
            if address != LEGACY_ADDRESS {
                debug!("rx foreign frame, address {address:#010x}");
                return None;
            }

            let temperature = tables::legacy_setpoint_for(frame.word(1));
            let features = frame.word(2);
            let fan = match features & LEGACY_FAN_MASK {
                f if f == LEGACY_FAN_PATTERNS[0] => Some(FanSpeed::Low),
                f if f == LEGACY_FAN_PATTERNS[1] => Some(FanSpeed::Medium),
                f if f == LEGACY_FAN_PATTERNS[2] => Some(FanSpeed::High),
                _ => None,
            };
            let blower_level = ((features >> LEGACY_BLOWER_SHIFT) & 0xFF) as u8;

            Some(DecodedCommand {
                address,
                temperature,
                fan,
                blower_on: blower_level >= LEGACY_BLOWER_THRESHOLD,
            })
        }
        ProtocolVariant::Modern => {
            let address = frame.halfword(0);
            if address != MODERN_ADDRESS {
                debug!("rx foreign frame, address {address:#06x}");
                return None;
            }

            // Modern frames carry only the setpoint code; there are no
            // fan or blower fields to report.
            Some(DecodedCommand {
                address: address as u32,
                temperature: tables::modern_setpoint_for(frame.halfword(1)),
                fan: None,
                blower_on: false,
            })
        }
    }
}

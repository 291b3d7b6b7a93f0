//! Command encoder: builds a frame for a requested setpoint and sequences
//! its transmission one bit per timing-interval event.
//!
//! The state machine is pure and synchronous: each event carries the
//! current tick and each transition returns the hardware side effect the
//! caller must apply (timer reprogram, carrier toggle). This keeps the
//! machine replayable from recorded tick sequences, independent of real
//! interrupts.

use crate::constants::*;
use crate::error::{AcIrError, Result};
use crate::tables;
use crate::types::{BitTiming, CommandFrame, ProtocolVariant};
use log::trace;

/// Hardware side effect requested by one encoder transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderAction {
    /// Nothing to do: idle, or a guard-suppressed event
    None,
    /// Begin a frame: turn the carrier on and program the start-bit timing
    StartFrame { timing: BitTiming },
    /// Pulse-width measurement armed; timer left as programmed
    Armed,
    /// Program the timing for the next data bit
    Bit { timing: BitTiming },
    /// Frame finished, another transmission follows: turn the carrier off
    Retransmit,
    /// First frame of a Modern pair finished: carrier off, program the
    /// inter-pair rest gap
    PairRest { timing: BitTiming },
    /// All frames sent: carrier off, encoder idle
    Complete,
}

/// Encoder state. Mutated only by [`Encoder::request`] (foreground entry
/// point) and [`Encoder::interval_elapsed`] (timer event handler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoder {
    issued: bool,
    address_sent: bool,
    comm_ready: bool,
    repeat_frame: bool,
    variant: ProtocolVariant,
    frame_len_bits: u16,
    bit_index: u8,
    word_index: u8,
    repeat_count: u8,
    issued_at_tick: u32,
    current_temp: i16,
    frame: CommandFrame,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            issued: false,
            address_sent: false,
            comm_ready: false,
            repeat_frame: false,
            variant: ProtocolVariant::Legacy,
            frame_len_bits: 0,
            bit_index: 0,
            word_index: 0,
            repeat_count: 0,
            issued_at_tick: 0,
            current_temp: tables::SETPOINT_OFF,
            frame: CommandFrame::new(),
        }
    }

    /// Issue a temperature command.
    ///
    /// `celsius` must be in the variant's supported set (Legacy: 0, 5,
    /// 16-30; Modern: 0, 16-30); anything else fails without touching the
    /// in-flight state. A successful request while a transmission is in
    /// flight replaces it: last write wins, there is no queue and no
    /// cancellation.
    pub fn request(&mut self, celsius: i16, variant: ProtocolVariant, now: u32) -> Result<()> {
        let entry = match variant {
            ProtocolVariant::Legacy => tables::legacy_code(celsius),
            ProtocolVariant::Modern => tables::modern_code(celsius),
        }
        .ok_or(AcIrError::UnsupportedTemperature { celsius, variant })?;

        let mut frame = CommandFrame::new();
        match variant {
            ProtocolVariant::Legacy => {
                frame.set_word(0, LEGACY_ADDRESS);
                frame.set_word(1, entry.code);
                frame.set_word(2, LEGACY_FEATURE_WORD);
                // 17-bit checksum left-aligned in the tail word
                frame.set_word(3, entry.check << 15);
            }
            ProtocolVariant::Modern => {
                frame.set_halfword(0, MODERN_ADDRESS);
                frame.set_halfword(1, entry.code as u16);
                frame.set_halfword(2, entry.check as u16);
            }
        }

        self.issued = true;
        self.address_sent = false;
        self.comm_ready = false;
        self.repeat_frame = false;
        self.variant = variant;
        self.frame_len_bits = variant.frame_bits();
        self.bit_index = 0;
        self.word_index = 0;
        self.repeat_count = 0;
        self.issued_at_tick = now;
        self.current_temp = celsius;
        self.frame = frame;

        trace!("tx request: {celsius} C via {variant:?} at tick {now}");
        Ok(())
    }

    /// Advance the state machine by one timing-interval-elapsed event.
    pub fn interval_elapsed(&mut self, now: u32) -> EncoderAction {
        if !self.issued {
            return EncoderAction::None;
        }

        // Timer hardware occasionally fires a stale interval right after
        // reprogramming; anything inside the guard window is not ours.
        if now.wrapping_sub(self.issued_at_tick) < GUARD_TICKS {
            return EncoderAction::None;
        }

        if !self.address_sent {
            self.address_sent = true;
            return EncoderAction::StartFrame {
                timing: self.variant.start_timing(),
            };
        }

        if !self.comm_ready {
            self.comm_ready = true;
            return EncoderAction::Armed;
        }

        let chunk_bits = self.variant.chunk_bits();
        let bits_sent = self.word_index as u16 * chunk_bits as u16 + self.bit_index as u16;
        if bits_sent < self.frame_len_bits {
            let chunk = self.frame.chunk(self.variant, self.word_index as usize);
            let bit = (chunk >> (31 - self.bit_index)) & 1;
            trace!(
                "tx bit {bits_sent}/{}: {bit} (word {})",
                self.frame_len_bits,
                self.word_index
            );
            self.bit_index += 1;
            if self.bit_index == chunk_bits {
                self.bit_index = 0;
                self.word_index += 1;
            }
            let timing = if bit == 1 {
                self.variant.one_timing()
            } else {
                self.variant.zero_timing()
            };
            return EncoderAction::Bit { timing };
        }

        self.finish_frame(now)
    }

    fn finish_frame(&mut self, now: u32) -> EncoderAction {
        match self.variant {
            ProtocolVariant::Legacy => {
                if self.repeat_count < LEGACY_REPEATS {
                    self.repeat_count += 1;
                    self.repeat_frame = !self.repeat_frame;
                    self.rewind();
                    self.issued_at_tick = now;
                    trace!("tx frame done, repeat {}/{LEGACY_REPEATS}", self.repeat_count);
                    EncoderAction::Retransmit
                } else {
                    self.reset_idle();
                    EncoderAction::Complete
                }
            }
            ProtocolVariant::Modern => {
                // issued_at_tick is deliberately left at the original
                // request tick so the guard window stays consistent
                // across the pair.
                self.repeat_count += 1;
                if self.repeat_count >= MODERN_TOTAL_FRAMES {
                    self.reset_idle();
                    EncoderAction::Complete
                } else {
                    self.rewind();
                    if self.repeat_count % 2 == 1 {
                        trace!("tx frame {}/{MODERN_TOTAL_FRAMES}, pair rest", self.repeat_count);
                        EncoderAction::PairRest {
                            timing: MODERN_PAIR_REST,
                        }
                    } else {
                        trace!("tx frame {}/{MODERN_TOTAL_FRAMES}", self.repeat_count);
                        EncoderAction::Retransmit
                    }
                }
            }
        }
    }

    /// Rewind to the address phase for the next frame of this command.
    fn rewind(&mut self) {
        self.address_sent = false;
        self.comm_ready = false;
        self.bit_index = 0;
        self.word_index = 0;
    }

    fn reset_idle(&mut self) {
        self.issued = false;
        self.address_sent = false;
        self.comm_ready = false;
        self.bit_index = 0;
        self.word_index = 0;
        self.repeat_count = 0;
    }

    /// Whether a transmission is in flight.
    pub fn is_busy(&self) -> bool {
        self.issued
    }

    /// Setpoint of the most recent request.
    pub fn current_temp(&self) -> i16 {
        self.current_temp
    }

    /// The frame populated by the most recent request.
    pub fn frame(&self) -> &CommandFrame {
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the encoder until `Complete`, advancing the tick well past the
    /// guard window per event.
    fn run_to_completion(encoder: &mut Encoder, start: u32) -> Vec<EncoderAction> {
        let mut actions = Vec::new();
        let mut now = start;
        for _ in 0..4000 {
            now = now.wrapping_add(250);
            let action = encoder.interval_elapsed(now);
            let done = action == EncoderAction::Complete;
            actions.push(action);
            if done {
                return actions;
            }
        }
        panic!("encoder never completed");
    }

    fn count_starts(actions: &[EncoderAction]) -> usize {
        actions
            .iter()
            .filter(|a| matches!(a, EncoderAction::StartFrame { .. }))
            .count()
    }

    #[test]
    fn out_of_range_request_leaves_state_unchanged() {
        let mut encoder = Encoder::new();
        encoder.request(24, ProtocolVariant::Legacy, 1_000).unwrap();
        let snapshot = encoder.clone();

        assert_eq!(
            encoder.request(31, ProtocolVariant::Legacy, 2_000),
            Err(AcIrError::UnsupportedTemperature {
                celsius: 31,
                variant: ProtocolVariant::Legacy
            })
        );
        assert_eq!(
            encoder.request(5, ProtocolVariant::Modern, 2_000),
            Err(AcIrError::UnsupportedTemperature {
                celsius: 5,
                variant: ProtocolVariant::Modern
            })
        );
        assert_eq!(encoder, snapshot);
    }

    #[test]
    fn request_populates_frame_from_tables() {
        let mut encoder = Encoder::new();
        encoder.request(24, ProtocolVariant::Legacy, 0).unwrap();
        let entry = tables::legacy_code(24).unwrap();
        assert_eq!(encoder.frame().word(0), LEGACY_ADDRESS);
        assert_eq!(encoder.frame().word(1), entry.code);
        assert_eq!(encoder.frame().word(2), LEGACY_FEATURE_WORD);
        assert_eq!(encoder.frame().word(3), entry.check << 15);

        encoder.request(24, ProtocolVariant::Modern, 0).unwrap();
        let entry = tables::modern_code(24).unwrap();
        assert_eq!(encoder.frame().halfword(0), MODERN_ADDRESS);
        assert_eq!(encoder.frame().halfword(1), entry.code as u16);
        assert_eq!(encoder.frame().halfword(2), entry.check as u16);
    }

    #[test]
    fn events_inside_guard_window_are_ignored() {
        let mut encoder = Encoder::new();
        encoder.request(22, ProtocolVariant::Legacy, 1_000).unwrap();
        let snapshot = encoder.clone();

        assert_eq!(encoder.interval_elapsed(1_050), EncoderAction::None);
        assert_eq!(encoder.interval_elapsed(1_099), EncoderAction::None);
        assert_eq!(encoder, snapshot);

        assert!(matches!(
            encoder.interval_elapsed(1_100),
            EncoderAction::StartFrame { .. }
        ));
    }

    #[test]
    fn idle_events_are_no_ops() {
        let mut encoder = Encoder::new();
        assert_eq!(encoder.interval_elapsed(500), EncoderAction::None);
        assert_eq!(encoder, Encoder::new());
    }

    #[test]
    fn phase_sequence_starts_with_address_then_arming() {
        let mut encoder = Encoder::new();
        encoder.request(24, ProtocolVariant::Legacy, 0).unwrap();

        assert_eq!(
            encoder.interval_elapsed(200),
            EncoderAction::StartFrame {
                timing: LEGACY_START
            }
        );
        // The arming event does not advance the bit position.
        assert_eq!(encoder.interval_elapsed(640), EncoderAction::Armed);

        // First payload bit is the address MSB (1 for the Legacy address).
        assert_eq!(
            encoder.interval_elapsed(860),
            EncoderAction::Bit { timing: LEGACY_ONE }
        );
    }

    #[test]
    fn legacy_sends_one_initial_and_five_repeat_frames() {
        let mut encoder = Encoder::new();
        encoder.request(24, ProtocolVariant::Legacy, 1_000).unwrap();
        let actions = run_to_completion(&mut encoder, 1_000);

        assert_eq!(count_starts(&actions), 6);
        assert_eq!(
            actions
                .iter()
                .filter(|a| matches!(a, EncoderAction::Retransmit))
                .count(),
            5
        );
        assert!(!encoder.is_busy());
    }

    #[test]
    fn modern_sends_five_pairs_with_rest_gaps() {
        let mut encoder = Encoder::new();
        encoder.request(24, ProtocolVariant::Modern, 1_000).unwrap();
        let actions = run_to_completion(&mut encoder, 1_000);

        assert_eq!(count_starts(&actions), 10);
        assert_eq!(
            actions
                .iter()
                .filter(|a| matches!(a, EncoderAction::PairRest { .. }))
                .count(),
            5
        );
        assert_eq!(
            actions
                .iter()
                .filter(|a| matches!(a, EncoderAction::Retransmit))
                .count(),
            4
        );
        assert!(!encoder.is_busy());
    }

    #[test]
    fn second_request_overwrites_in_flight() {
        let mut encoder = Encoder::new();
        encoder.request(24, ProtocolVariant::Legacy, 1_000).unwrap();

        // Partway into the first frame...
        let mut now = 1_000;
        for _ in 0..10 {
            now += 250;
            encoder.interval_elapsed(now);
        }

        // ...a new request silently replaces it.
        encoder.request(18, ProtocolVariant::Legacy, now).unwrap();
        assert_eq!(encoder.current_temp(), 18);
        assert_eq!(
            encoder.frame().word(1),
            tables::legacy_code(18).unwrap().code
        );
        let actions = run_to_completion(&mut encoder, now);
        assert_eq!(count_starts(&actions), 6);
    }
}

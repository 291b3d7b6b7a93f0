//! # AC IR Protocol Library
//!
//! A Rust library implementing the infrared remote-control codec of
//! split-system air conditioners. This library reverse-engineers two
//! incompatible wire encodings — Legacy (113-bit frames) and Modern
//! (48-bit frames) — and provides both directions of the protocol:
//!
//! - An **encoder** that synthesizes the timer period/on-time sequence for
//!   a temperature command, one bit per timing-interval event, with each
//!   variant's reliability repeat policy
//! - A **decoder** that reconstructs frames from the inter-edge gaps
//!   reported by an IR receiver, self-healing from glitches via a resync
//!   threshold
//! - An **interpreter** that validates a frame's address and reports the
//!   commanded temperature, fan speed, and blower state
//!
//! Both state machines are pure and synchronous: events carry explicit
//! tick counts and transitions return the hardware side effects to apply,
//! so the whole codec can be replayed from recorded traces. On a real
//! board, wire [`AcRemote`] to the timer and carrier-gate interrupts.
//!
//! ## Example
//!
//! ```
//! use acir_protocol::{Encoder, EncoderAction, ProtocolVariant};
//!
//! fn main() -> acir_protocol::Result<()> {
//!     let mut encoder = Encoder::new();
//!     encoder.request(24, ProtocolVariant::Legacy, 0)?;
//!
//!     // The first timer event past the guard window begins the frame.
//!     match encoder.interval_elapsed(200) {
//!         EncoderAction::StartFrame { timing } => assert_eq!(timing.period, 440),
//!         other => panic!("expected a start burst, got {other:?}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Decoding works from inter-edge gaps in ticks:
//!
//! ```
//! use acir_protocol::{interpret, Decoder, ProtocolVariant};
//!
//! let mut decoder = Decoder::new(ProtocolVariant::Legacy);
//! for gap in [500, 220, 110, 220] {
//!     if let Some(frame) = decoder.edge(gap) {
//!         if let Some(command) = interpret(&frame, decoder.variant()) {
//!             println!("unit commanded to {:?}", command.temperature);
//!         }
//!     }
//! }
//! ```

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod protocol;
pub mod tables;
pub mod types;

pub use decoder::{interpret, Decoder};
pub use encoder::{Encoder, EncoderAction};
pub use error::{AcIrError, Result};
pub use protocol::{AcRemote, CarrierGate, TimingSource};
pub use types::*;

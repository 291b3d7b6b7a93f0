//! Decode Trace Example
//!
//! This example demonstrates the receive side of the codec:
//! - Generating a realistic edge trace (a Legacy temperature command,
//!   repeats included) with the encoder
//! - Replaying the trace into the decoder through the edge-interrupt
//!   entry point
//! - Printing the resulting unit-state snapshot as JSON
//!
//! Usage:
//!   cargo run --example decode_trace            # Defaults to 24 C
//!   cargo run --example decode_trace -- 27
//!
//! Set RUST_LOG environment variable to control logging:
//!   RUST_LOG=debug cargo run --example decode_trace

use acir_protocol::{
    AcRemote, CarrierGate, Encoder, EncoderAction, ProtocolVariant, Result, TimingSource,
};
use log::{error, info};

/// Gap preceding the first carrier-on edge of the trace.
const IDLE_GAP: u32 = 600;

struct NullTimer;

impl TimingSource for NullTimer {
    fn set_interval(&mut self, _period: u32, _on_ticks: u32) {}

    fn now_ticks(&self) -> u32 {
        0
    }
}

struct NullCarrier;

impl CarrierGate for NullCarrier {
    fn carrier_on(&mut self) {}

    fn carrier_off(&mut self) {}
}

/// Run a transmission and convert the programmed intervals into the edge
/// gaps a receiver would measure.
fn record_trace(celsius: i16) -> Result<Vec<u32>> {
    let mut encoder = Encoder::new();
    encoder.request(celsius, ProtocolVariant::Legacy, 1_000)?;

    let mut edges = Vec::new();
    let mut current: Option<u32> = None;
    let mut now = 1_000u32;
    loop {
        now = now.wrapping_add(250);
        match encoder.interval_elapsed(now) {
            EncoderAction::StartFrame { timing } => {
                edges.push(current.take().unwrap_or(IDLE_GAP));
                current = Some(timing.period);
            }
            EncoderAction::Armed => {
                if let Some(period) = current {
                    edges.push(period);
                }
            }
            EncoderAction::None => {}
            EncoderAction::Bit { timing } => {
                if let Some(period) = current {
                    edges.push(period);
                }
                current = Some(timing.period);
            }
            EncoderAction::Retransmit => {
                if let Some(period) = current.take() {
                    edges.push(period);
                }
            }
            EncoderAction::PairRest { timing } => {
                if let Some(period) = current {
                    edges.push(period);
                }
                current = Some(timing.period);
            }
            EncoderAction::Complete => {
                if let Some(period) = current.take() {
                    edges.push(period);
                }
                return Ok(edges);
            }
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger with default info level if RUST_LOG is not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let celsius: i16 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(24);

    info!("=== Recording Edge Trace ===");
    let trace = record_trace(celsius)?;
    info!("Trace length: {} edges", trace.len());

    let mut remote = AcRemote::new(Box::new(NullTimer), Box::new(NullCarrier), ProtocolVariant::Legacy);
    remote.set_debug_print(false, false);

    info!("=== Replaying Trace ===");
    for gap in trace {
        remote.edge_detected(gap);
    }

    match remote.ac_states() {
        Some(states) => {
            info!("=== Decoded Unit State ===");
            match serde_json::to_string_pretty(&states) {
                Ok(json) => println!("{json}"),
                Err(e) => error!("failed to serialize state: {e}"),
            }
        }
        None => error!("no address-valid frame in trace"),
    }

    Ok(())
}

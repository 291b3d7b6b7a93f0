//! Send Command Example
//!
//! This example demonstrates the transmit side of the codec without any
//! hardware attached:
//! - Selecting a wire encoding and setpoint interactively
//! - Driving the encoder state machine from a simulated timer
//! - Tracing every programmed pulse interval and carrier toggle
//!
//! Usage:
//!   cargo run --example send_command                  # Interactive mode
//!   cargo run --example send_command -- legacy 24     # Specify on the command line
//!
//! Set RUST_LOG environment variable to control logging:
//!   RUST_LOG=debug cargo run --example send_command
//!   RUST_LOG=trace cargo run --example send_command

use acir_protocol::{AcRemote, CarrierGate, ProtocolVariant, Result, TimingSource};
use inquire::Select;
use log::info;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct SimTimer {
    now: u32,
    programmed: Vec<(u32, u32)>,
}

struct SharedTimer(Rc<RefCell<SimTimer>>);

impl TimingSource for SharedTimer {
    fn set_interval(&mut self, period: u32, on_ticks: u32) {
        self.0.borrow_mut().programmed.push((period, on_ticks));
    }

    fn now_ticks(&self) -> u32 {
        self.0.borrow().now
    }
}

struct SharedCarrier(Rc<RefCell<Vec<bool>>>);

impl CarrierGate for SharedCarrier {
    fn carrier_on(&mut self) {
        self.0.borrow_mut().push(true);
    }

    fn carrier_off(&mut self) {
        self.0.borrow_mut().push(false);
    }
}

/// Interactive variant/setpoint selection using inquire
fn select_command() -> (ProtocolVariant, i16) {
    let variant = match Select::new("Select a wire encoding:", vec!["legacy", "modern"])
        .prompt()
        .unwrap_or("legacy")
    {
        "modern" => ProtocolVariant::Modern,
        _ => ProtocolVariant::Legacy,
    };

    let mut setpoints = vec!["off".to_string()];
    if variant == ProtocolVariant::Legacy {
        setpoints.push("vent".to_string());
    }
    setpoints.extend((16..=30).map(|t| format!("{t} C")));

    let selection = Select::new("Select a setpoint:", setpoints)
        .prompt()
        .unwrap_or_else(|_| "off".to_string());
    let celsius = match selection.as_str() {
        "off" => 0,
        "vent" => 5,
        other => other.trim_end_matches(" C").parse().unwrap_or(0),
    };

    (variant, celsius)
}

fn main() -> Result<()> {
    // Initialize logger with default info level if RUST_LOG is not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Get the command from command-line arguments or interactive selection
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (variant, celsius) = match args.as_slice() {
        [variant, celsius] => {
            let variant = if variant == "modern" {
                ProtocolVariant::Modern
            } else {
                ProtocolVariant::Legacy
            };
            (variant, celsius.parse().unwrap_or(0))
        }
        _ => select_command(),
    };

    let timer = Rc::new(RefCell::new(SimTimer::default()));
    let carrier = Rc::new(RefCell::new(Vec::new()));
    let mut remote = AcRemote::new(
        Box::new(SharedTimer(Rc::clone(&timer))),
        Box::new(SharedCarrier(Rc::clone(&carrier))),
        variant,
    );
    remote.set_debug_print(true, false);

    info!("=== Issuing Command ===");
    info!("Encoding {celsius} C via {variant:?}");
    remote.request_temperature(celsius, variant)?;

    // Simulate the timer interrupt until the transmission completes.
    let mut events = 0u32;
    while remote.is_transmitting() {
        {
            let mut timer = timer.borrow_mut();
            timer.now = timer.now.wrapping_add(250);
        }
        remote.interval_elapsed();
        events += 1;
    }

    info!("=== Transmission Complete ===");
    let timer = timer.borrow();
    let total_ticks: u32 = timer.programmed.iter().map(|(period, _)| period).sum();
    info!("Timer events handled: {events}");
    info!("Pulse intervals programmed: {}", timer.programmed.len());
    info!("Carrier toggles: {}", carrier.borrow().len());
    info!("Air time: {total_ticks} ticks");

    Ok(())
}

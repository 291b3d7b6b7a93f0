use crate::decoder::{interpret, Decoder};
use crate::encoder::{Encoder, EncoderAction};
use crate::error::Result;
use crate::types::{AcStates, ProtocolVariant};
use chrono::Utc;
use log::{debug, info};

/// Protocol timer abstraction.
///
/// `set_interval` programs the hardware timer's period and carrier
/// on-time; the timer then raises one interval-elapsed event per period,
/// which the board's interrupt handler forwards to
/// [`AcRemote::interval_elapsed`].
pub trait TimingSource {
    /// Program the timer period and duty, in ticks.
    fn set_interval(&mut self, period: u32, on_ticks: u32);

    /// Current value of the free-running tick counter.
    fn now_ticks(&self) -> u32;
}

/// Modulated-output gate driving the IR emitter.
pub trait CarrierGate {
    fn carrier_on(&mut self);
    fn carrier_off(&mut self);
}

/// Main IR remote interface.
///
/// Owns both protocol state machines and the hardware seams they drive.
/// The two interrupt-facing handlers ([`interval_elapsed`] and
/// [`edge_detected`]) each mutate only their own state machine; foreground
/// callers get the four entry points below and only ever read completed
/// snapshots.
///
/// [`interval_elapsed`]: AcRemote::interval_elapsed
/// [`edge_detected`]: AcRemote::edge_detected
pub struct AcRemote {
    timer: Box<dyn TimingSource>,
    carrier: Box<dyn CarrierGate>,
    encoder: Encoder,
    decoder: Decoder,
    last_decoded: Option<AcStates>,
    print_tx: bool,
    print_rx: bool,
}

impl AcRemote {
    /// Create a remote over the board's timer and carrier gate.
    /// `receive_variant` selects the wire encoding of the paired indoor
    /// unit for the decode side.
    pub fn new(
        timer: Box<dyn TimingSource>,
        carrier: Box<dyn CarrierGate>,
        receive_variant: ProtocolVariant,
    ) -> Self {
        Self {
            timer,
            carrier,
            encoder: Encoder::new(),
            decoder: Decoder::new(receive_variant),
            last_decoded: None,
            print_tx: false,
            print_rx: false,
        }
    }

    /// Enable/disable verbose logging for TX/RX protocol traffic.
    pub fn set_debug_print(&mut self, tx: bool, rx: bool) {
        self.print_tx = tx;
        self.print_rx = rx;
    }

    /// Issue a temperature command (0 requests power-off; Legacy also
    /// accepts 5 for vent mode). A request made while a previous command
    /// is still transmitting replaces it.
    pub fn request_temperature(&mut self, celsius: i16, variant: ProtocolVariant) -> Result<()> {
        let now = self.timer.now_ticks();
        self.encoder.request(celsius, variant, now)
    }

    /// Force the IR emitter on, bypassing the encoder (diagnostics).
    pub fn turn_led_on(&mut self) {
        debug!("emitter forced on");
        self.carrier.carrier_on();
    }

    /// Force the IR emitter off, bypassing the encoder (diagnostics).
    pub fn turn_led_off(&mut self) {
        debug!("emitter forced off");
        self.carrier.carrier_off();
    }

    /// Latest fully decoded unit state, if any frame has been accepted.
    ///
    /// Returns a snapshot taken at frame completion; concurrent decoding
    /// never shows through a returned value.
    pub fn ac_states(&self) -> Option<AcStates> {
        self.last_decoded.clone()
    }

    /// Whether a transmission is currently in flight.
    pub fn is_transmitting(&self) -> bool {
        self.encoder.is_busy()
    }

    /// Timer interval-elapsed interrupt entry point.
    pub fn interval_elapsed(&mut self) {
        let now = self.timer.now_ticks();
        match self.encoder.interval_elapsed(now) {
            EncoderAction::None | EncoderAction::Armed => {}
            EncoderAction::StartFrame { timing } => {
                if self.print_tx {
                    debug!("tx start burst ({}/{} ticks)", timing.period, timing.on_ticks);
                }
                self.carrier.carrier_on();
                self.timer.set_interval(timing.period, timing.on_ticks);
            }
            EncoderAction::Bit { timing } => {
                if self.print_tx {
                    debug!("tx bit interval ({}/{} ticks)", timing.period, timing.on_ticks);
                }
                self.timer.set_interval(timing.period, timing.on_ticks);
            }
            EncoderAction::Retransmit => {
                self.carrier.carrier_off();
            }
            EncoderAction::PairRest { timing } => {
                self.carrier.carrier_off();
                self.timer.set_interval(timing.period, timing.on_ticks);
            }
            EncoderAction::Complete => {
                self.carrier.carrier_off();
                info!("tx complete: {} C", self.encoder.current_temp());
            }
        }
    }

    /// Edge-detect interrupt entry point. `elapsed_ticks` is the gap
    /// since the previous edge.
    pub fn edge_detected(&mut self, elapsed_ticks: u32) {
        if self.print_rx {
            debug!("rx edge after {elapsed_ticks} ticks");
        }

        let Some(frame) = self.decoder.edge(elapsed_ticks) else {
            return;
        };
        let Some(command) = interpret(&frame, self.decoder.variant()) else {
            return;
        };

        let temperature = match command.temperature {
            Some(celsius) => celsius.to_string(),
            None => "unknown".to_string(),
        };
        let fan = command.fan.map(|f| f.label()).unwrap_or("-");
        info!(
            "decoded command: temp {temperature}, fan {fan}, blower {}",
            command.blower_on
        );

        self.last_decoded = Some(AcStates {
            variant: self.decoder.variant(),
            temperature: command.temperature,
            fan: command.fan,
            blower_on: command.blower_on,
            decoded_at: Utc::now(),
        });
    }
}

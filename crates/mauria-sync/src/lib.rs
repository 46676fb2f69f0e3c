//! # mauria-sync
//!
//! The bootstrap synchronizer: before the app renders anything, it reconciles
//! local state with a possible embedding host.  Embedded, the host owns the
//! authoritative copy of server-derived data and must be polled over window
//! messaging; standalone, the app proceeds immediately and pages fetch for
//! themselves later.
//!
//! The handshake is an explicit finite state machine ([`machine::Machine`])
//! whose inputs are tagged events (timer fired, host message received) and
//! whose outputs are effects.  A tokio driver ([`runner::run_bootstrap`])
//! wires the machine to real timers and mpsc channels and applies its effects
//! against the durable store.  Settlement is bounded: at most six requests on
//! a linear backoff, under a five-second global ceiling.

pub mod machine;
pub mod runner;

pub use machine::{BootstrapConfig, Effect, Event, Machine, SettleReason, State, Timer};
pub use runner::{announce_beta, run_bootstrap, BootstrapOutcome, HostLink};

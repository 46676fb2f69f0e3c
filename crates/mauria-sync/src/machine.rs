//! The handshake state machine, free of timers and I/O.
//!
//! The machine consumes [`Event`]s and emits [`Effect`]s; the driver owns the
//! clock and the channels.  This keeps the retry/backoff/timeout logic fully
//! unit-testable.

use std::collections::BTreeMap;
use std::time::Duration;

use mauria_shared::HostMessage;

/// Handshake phases.  `Settled` is terminal and is entered by success, by
/// exhausting retries, or by the global timeout, whichever comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    AwaitingParentReady,
    RequestingData,
    Settled,
}

/// Timer slots the driver maintains on the machine's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Short grace period for an embedded host to announce itself.
    ParentWait,
    /// Per-attempt timeout; also reused as the backoff before a resend.
    Retry,
    /// Absolute ceiling on the whole handshake.
    Global,
}

/// Inputs to the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TimerFired(Timer),
    Message(HostMessage),
}

/// What settled the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleReason {
    /// A valid bulk payload was committed.
    AllDataReceived,
    /// The attempt ceiling was reached; proceed with whatever is cached.
    AttemptsExhausted,
    /// The global ceiling fired; proceed with whatever is cached.
    GlobalTimeout,
}

/// Outputs the driver must apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send `REQUEST_ALL_DATA` to the host.
    SendRequest,
    /// (Re)arm a timer slot; arming replaces any pending deadline.
    ArmTimer(Timer, Duration),
    /// Merge one host-pushed key/value with bootstrap provenance.
    CommitKey { key: String, value: String },
    /// Commit a full host payload in one override.
    CommitAll(BTreeMap<String, String>),
    /// Terminal: unblock rendering.
    Settle(SettleReason),
}

/// Handshake timing knobs.  Tests shrink these; production uses the defaults.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// How long an embedded app waits for `PARENT_READY` before polling
    /// anyway.
    pub parent_wait: Duration,
    /// Backoff unit: attempt `n` waits `n * backoff_step`.
    pub backoff_step: Duration,
    /// Maximum number of requests per bootstrap cycle.
    pub max_attempts: u32,
    /// Absolute bound on time-to-interactive.
    pub global_timeout: Duration,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            parent_wait: Duration::from_millis(600),
            backoff_step: Duration::from_millis(200),
            max_attempts: 6,
            global_timeout: Duration::from_secs(5),
        }
    }
}

/// The bootstrap handshake state machine.
#[derive(Debug)]
pub struct Machine {
    config: BootstrapConfig,
    state: State,
    attempts: u32,
}

impl Machine {
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            config,
            state: State::Idle,
            attempts: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Requests sent so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn settled(&self) -> bool {
        self.state == State::Settled
    }

    /// Begin the handshake.  Unembedded contexts poll immediately; embedded
    /// ones give the host a short window to announce readiness first.
    pub fn start(&mut self, embedded: bool) -> Vec<Effect> {
        if self.state != State::Idle {
            return Vec::new();
        }

        let mut effects = vec![Effect::ArmTimer(Timer::Global, self.config.global_timeout)];
        if embedded {
            self.state = State::AwaitingParentReady;
            effects.push(Effect::ArmTimer(Timer::ParentWait, self.config.parent_wait));
        } else {
            effects.extend(self.send_request());
        }
        effects
    }

    /// Feed one event.  A settled machine ignores everything.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        if self.settled() {
            return Vec::new();
        }

        match event {
            Event::TimerFired(Timer::ParentWait) => {
                // The host never announced itself; poll it anyway.  If the
                // handshake already moved on, the stale timer is harmless.
                if self.state == State::AwaitingParentReady {
                    self.send_request()
                } else {
                    Vec::new()
                }
            }

            Event::TimerFired(Timer::Retry) => {
                if self.state != State::RequestingData {
                    return Vec::new();
                }
                if self.attempts < self.config.max_attempts {
                    self.send_request()
                } else {
                    self.settle(SettleReason::AttemptsExhausted)
                }
            }

            Event::TimerFired(Timer::Global) => self.settle(SettleReason::GlobalTimeout),

            Event::Message(HostMessage::ParentReady) => {
                // Guard against double-sending when both the announcement and
                // the fallback timer land.
                if self.state == State::AwaitingParentReady {
                    self.send_request()
                } else {
                    Vec::new()
                }
            }

            Event::Message(HostMessage::DataResponse { key, payload }) => {
                // A single-key push merges but never settles the machine.
                vec![Effect::CommitKey {
                    key,
                    value: payload,
                }]
            }

            Event::Message(HostMessage::AllDataResponse { payload }) => {
                let valid = payload.get("email").is_some_and(|email| !email.is_empty());
                if valid {
                    let mut effects = vec![Effect::CommitAll(payload)];
                    effects.extend(self.settle(SettleReason::AllDataReceived));
                    effects
                } else if self.attempts < self.config.max_attempts {
                    // Malformed payload counts as a non-response: retry on
                    // the same linear backoff.
                    vec![Effect::ArmTimer(Timer::Retry, self.backoff())]
                } else {
                    self.settle(SettleReason::AttemptsExhausted)
                }
            }

            // Outbound-only message types echoed back by a confused host.
            Event::Message(HostMessage::RequestAllData)
            | Event::Message(HostMessage::ModeBeta { .. }) => Vec::new(),
        }
    }

    fn send_request(&mut self) -> Vec<Effect> {
        self.attempts += 1;
        self.state = State::RequestingData;
        vec![
            Effect::SendRequest,
            Effect::ArmTimer(Timer::Retry, self.backoff()),
        ]
    }

    /// 200 ms, 400 ms, 600 ms, ... for attempts 1, 2, 3, ...
    fn backoff(&self) -> Duration {
        self.config.backoff_step * self.attempts
    }

    fn settle(&mut self, reason: SettleReason) -> Vec<Effect> {
        self.state = State::Settled;
        vec![Effect::Settle(reason)]
    }
}

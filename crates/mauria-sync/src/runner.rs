//! Tokio driver for the handshake machine.
//!
//! Owns real timers and the mpsc pair connecting the app to its host, feeds
//! the resulting events to [`Machine`], and applies the effects against the
//! durable store.  Dropping the returned future tears everything down: all
//! timers are cancelled and no effect is applied afterwards.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};

use mauria_shared::HostMessage;
use mauria_store::Store;

use crate::machine::{BootstrapConfig, Effect, Event, Machine, SettleReason, Timer};

/// Channel pair connecting the app to its embedding host.
///
/// Standalone contexts still carry a (dead) pair; `embedded = false` makes
/// the machine skip the parent-ready wait.
pub struct HostLink {
    pub embedded: bool,
    pub to_host: mpsc::Sender<HostMessage>,
    pub from_host: mpsc::Receiver<HostMessage>,
}

/// How the handshake ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub reason: SettleReason,
    pub requests_sent: u32,
}

/// Pending timer deadlines, one slot per [`Timer`].  Arming a slot replaces
/// its previous deadline.
#[derive(Default)]
struct TimerSlots {
    parent_wait: Option<Instant>,
    retry: Option<Instant>,
    global: Option<Instant>,
}

impl TimerSlots {
    fn arm(&mut self, timer: Timer, after: Duration) {
        let at = Instant::now() + after;
        match timer {
            Timer::ParentWait => self.parent_wait = Some(at),
            Timer::Retry => self.retry = Some(at),
            Timer::Global => self.global = Some(at),
        }
    }
}

/// Run the bootstrap handshake to settlement.
///
/// Sends requests over `link.to_host`, merges host responses into `store`,
/// and returns once the machine settles -- by success, by exhausting the six
/// attempts, or by the five-second global ceiling.
pub async fn run_bootstrap(
    store: &mut Store,
    link: &mut HostLink,
    config: BootstrapConfig,
) -> BootstrapOutcome {
    let mut machine = Machine::new(config);
    let mut timers = TimerSlots::default();
    let mut host_closed = false;
    let mut requests_sent = 0u32;

    tracing::info!(embedded = link.embedded, "bootstrap handshake starting");

    let mut pending = machine.start(link.embedded);
    loop {
        for effect in pending.drain(..) {
            match effect {
                Effect::SendRequest => {
                    requests_sent += 1;
                    tracing::debug!(attempt = requests_sent, "requesting host data");
                    if link.to_host.send(HostMessage::RequestAllData).await.is_err() {
                        tracing::debug!("host request channel closed");
                    }
                }
                Effect::ArmTimer(timer, after) => timers.arm(timer, after),
                Effect::CommitKey { key, value } => {
                    store.write_from_remote_bootstrap(&key, &value)
                }
                Effect::CommitAll(map) => store.override_many(&map),
                Effect::Settle(reason) => {
                    tracing::info!(?reason, requests_sent, "bootstrap settled");
                    return BootstrapOutcome {
                        reason,
                        requests_sent,
                    };
                }
            }
        }

        let event = next_event(&mut link.from_host, &mut host_closed, &mut timers).await;
        pending = machine.handle(event);
    }
}

/// Wait for the next host message or timer expiry.
///
/// The global timer is always armed while the machine is unsettled, so this
/// future always completes.
async fn next_event(
    from_host: &mut mpsc::Receiver<HostMessage>,
    host_closed: &mut bool,
    timers: &mut TimerSlots,
) -> Event {
    loop {
        tokio::select! {
            msg = from_host.recv(), if !*host_closed => {
                match msg {
                    Some(msg) => return Event::Message(msg),
                    // Host went away; timers drive the rest of the handshake.
                    None => *host_closed = true,
                }
            }
            _ = sleep_until(deadline(timers.parent_wait)), if timers.parent_wait.is_some() => {
                timers.parent_wait = None;
                return Event::TimerFired(Timer::ParentWait);
            }
            _ = sleep_until(deadline(timers.retry)), if timers.retry.is_some() => {
                timers.retry = None;
                return Event::TimerFired(Timer::Retry);
            }
            _ = sleep_until(deadline(timers.global)), if timers.global.is_some() => {
                timers.global = None;
                return Event::TimerFired(Timer::Global);
            }
        }
    }
}

/// `select!` evaluates every branch expression even when its precondition is
/// false, so disarmed slots need a placeholder deadline.
fn deadline(at: Option<Instant>) -> Instant {
    at.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600))
}

/// Tell the host to switch to the preprod environment.
pub async fn announce_beta(to_host: &mpsc::Sender<HostMessage>, preprod_url: &str) {
    let msg = HostMessage::ModeBeta {
        payload: preprod_url.to_string(),
    };
    if to_host.send(msg).await.is_err() {
        tracing::debug!("host channel closed, beta announcement dropped");
    } else {
        tracing::info!(url = %preprod_url, "announced beta mode to host");
    }
}

//! Status polling for one submission.
//!
//! [`SubmissionPoller`] is a synchronous state machine. It never performs I/O:
//! every call returns the [`PollEffect`] the host has to carry out (issue a
//! fetch, arm a timer), stamped with a [`PollTicket`]. Outcomes are handed back
//! with that ticket, and anything carrying a superseded ticket is dropped
//! before it can touch the state. [`drive`] runs the machine against an
//! [`ApiGateway`] and a [`Sleeper`].

use std::time::Duration;

use async_trait::async_trait;

use crate::{
    error::ApiError,
    gateway::{ApiGateway, HttpTransport},
    model::{Status, Submission},
};

/// What the reviewer currently sees for the watched submission.
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    /// Nothing watched.
    Idle,
    /// First fetch for the watched id is in flight.
    Loading,
    /// Server still processing; another fetch is scheduled.
    Pending(Submission),
    /// Terminal: AI response available.
    Completed(Submission),
    /// Terminal: processing failed.
    Failed(Submission),
    /// The last fetch failed; polling stopped until the caller retries.
    Errored(ApiError),
}

impl PollState {
    /// Latest submission snapshot, if one was received.
    pub fn submission(&self) -> Option<&Submission> {
        match self {
            PollState::Pending(submission)
            | PollState::Completed(submission)
            | PollState::Failed(submission) => Some(submission),
            PollState::Idle | PollState::Loading | PollState::Errored(_) => None,
        }
    }

    /// No further fetch will happen without caller action.
    pub fn is_settled(&self) -> bool {
        match self {
            PollState::Completed(_) | PollState::Failed(_) | PollState::Errored(_) => true,
            PollState::Idle | PollState::Loading | PollState::Pending(_) => false,
        }
    }
}

/// Identifies one fetch or one timer of one watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTicket {
    id: String,
    seq: u64,
}

impl PollTicket {
    /// Submission id this ticket belongs to.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Work the host must perform on behalf of the poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEffect {
    /// Fetch the submission now and report back via [`SubmissionPoller::apply`].
    Fetch(PollTicket),
    /// Wait `after`, then call [`SubmissionPoller::timer_fired`].
    Schedule {
        /// Timer identity.
        ticket: PollTicket,
        /// Delay before the next fetch.
        after: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outstanding {
    None,
    Fetch(u64),
    Timer(u64),
}

/// Watches one submission until it reaches a terminal status.
///
/// At any time there is at most one fetch in flight or one timer armed,
/// never both.
#[derive(Debug)]
pub struct SubmissionPoller {
    interval: Duration,
    watched: Option<String>,
    state: PollState,
    outstanding: Outstanding,
    next_seq: u64,
}

impl SubmissionPoller {
    /// Idle poller that waits `interval` between fetches.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            watched: None,
            state: PollState::Idle,
            outstanding: Outstanding::None,
            next_seq: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Id currently watched.
    pub fn watched(&self) -> Option<&str> {
        self.watched.as_deref()
    }

    /// Whether a timer is armed.
    pub fn timer_armed(&self) -> bool {
        matches!(self.outstanding, Outstanding::Timer(_))
    }

    /// Whether a fetch is in flight.
    pub fn fetch_in_flight(&self) -> bool {
        matches!(self.outstanding, Outstanding::Fetch(_))
    }

    /// Starts watching `id`, abandoning any previous watch.
    ///
    /// Watching the id already watched does nothing, unless the last fetch
    /// errored, in which case this is a manual retry.
    pub fn watch(&mut self, id: &str) -> Option<PollEffect> {
        if self.watched.as_deref() == Some(id) {
            return match self.state {
                PollState::Errored(_) => self.retry(),
                _ => None,
            };
        }

        tracing::debug!(id, "watching submission");
        self.watched = Some(id.to_string());
        self.state = PollState::Loading;
        Some(self.issue_fetch())
    }

    /// Re-fetches after an error. Does nothing in any other state.
    pub fn retry(&mut self) -> Option<PollEffect> {
        if !matches!(self.state, PollState::Errored(_)) || self.watched.is_none() {
            return None;
        }
        self.state = PollState::Loading;
        Some(self.issue_fetch())
    }

    /// Stops watching. Later outcomes for earlier tickets are ignored.
    pub fn dispose(&mut self) {
        if let Some(id) = self.watched.take() {
            tracing::debug!(id = %id, "stopped watching submission");
        }
        self.outstanding = Outstanding::None;
        self.state = PollState::Idle;
    }

    /// Feeds back the outcome of a [`PollEffect::Fetch`].
    ///
    /// Returns the next timer to arm while the submission is still pending.
    pub fn apply(
        &mut self,
        ticket: &PollTicket,
        result: Result<Submission, ApiError>,
    ) -> Option<PollEffect> {
        if !self.is_current(ticket, Outstanding::Fetch(ticket.seq)) {
            tracing::warn!(id = %ticket.id, seq = ticket.seq, "discarding stale poll result");
            return None;
        }
        self.outstanding = Outstanding::None;

        let submission = match result {
            Ok(submission) => submission,
            Err(err) => {
                tracing::debug!(id = %ticket.id, error = %err, "poll failed");
                self.state = PollState::Errored(err);
                return None;
            },
        };

        match submission.status {
            Status::Pending => {
                self.state = PollState::Pending(submission);
                Some(self.arm_timer())
            },
            Status::Completed => {
                self.state = PollState::Completed(submission);
                None
            },
            Status::Failed => {
                self.state = PollState::Failed(submission);
                None
            },
        }
    }

    /// Called by the host when a [`PollEffect::Schedule`] timer elapses.
    pub fn timer_fired(&mut self, ticket: &PollTicket) -> Option<PollEffect> {
        if !self.is_current(ticket, Outstanding::Timer(ticket.seq)) {
            return None;
        }
        Some(self.issue_fetch())
    }

    fn is_current(&self, ticket: &PollTicket, expected: Outstanding) -> bool {
        self.watched.as_deref() == Some(ticket.id.as_str()) && self.outstanding == expected
    }

    fn next_ticket(&mut self) -> PollTicket {
        self.next_seq += 1;
        PollTicket {
            id: self.watched.clone().unwrap_or_default(),
            seq: self.next_seq,
        }
    }

    fn issue_fetch(&mut self) -> PollEffect {
        let ticket = self.next_ticket();
        self.outstanding = Outstanding::Fetch(ticket.seq);
        PollEffect::Fetch(ticket)
    }

    fn arm_timer(&mut self) -> PollEffect {
        let ticket = self.next_ticket();
        self.outstanding = Outstanding::Timer(ticket.seq);
        PollEffect::Schedule {
            ticket,
            after: self.interval,
        }
    }
}

/// Async delay used between polls.
#[async_trait(?Send)]
pub trait Sleeper {
    /// Completes after `duration`.
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by the tokio timer.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Carries out `effect` and every effect that follows until the poller
/// settles. `observe` sees the state after each applied fetch.
pub async fn drive<T, S, F>(
    poller: &mut SubmissionPoller,
    gateway: &ApiGateway<T>,
    sleeper: &S,
    effect: Option<PollEffect>,
    mut observe: F,
) where
    T: HttpTransport,
    S: Sleeper,
    F: FnMut(&PollState),
{
    let mut next = effect;
    while let Some(effect) = next.take() {
        next = match effect {
            PollEffect::Fetch(ticket) => {
                let result = gateway.fetch_submission_status(ticket.id()).await;
                let follow_up = poller.apply(&ticket, result);
                observe(poller.state());
                follow_up
            },
            PollEffect::Schedule {
                ticket,
                after,
            } => {
                sleeper.sleep(after).await;
                poller.timer_fired(&ticket)
            },
        };
    }
}

/// Polls `id` until it completes, fails or a fetch errors.
pub async fn watch_until_settled<T, S, F>(
    gateway: &ApiGateway<T>,
    sleeper: &S,
    interval: Duration,
    id: &str,
    observe: F,
) -> PollState
where
    T: HttpTransport,
    S: Sleeper,
    F: FnMut(&PollState),
{
    let mut poller = SubmissionPoller::new(interval);
    let effect = poller.watch(id);
    drive(&mut poller, gateway, sleeper, effect, observe).await;
    poller.state().clone()
}

// ABOUTME: Cancellable one-shot transitions owned by the navigation controller
// Fired from the UI tick with an explicit Instant so tests never sleep

use std::time::{Duration, Instant};

/// What happens when a scheduled transition fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Run the promotion engine for the analysis screen
    Analyze,
    /// Leave an analysis screen that produced no offers
    AutoAdvance,
}

/// A transition due at a fixed instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTransition {
    pub kind: TransitionKind,
    pub due: Instant,
}

impl ScheduledTransition {
    pub fn after(kind: TransitionKind, delay: Duration, now: Instant) -> Self {
        Self {
            kind,
            due: now + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Time left before firing, zero once due
    pub fn remaining(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}

/// Holds at most one pending transition
#[derive(Debug, Default)]
pub struct TransitionTimer {
    pending: Option<ScheduledTransition>,
}

impl TransitionTimer {
    /// Schedule `kind`, replacing anything pending
    pub fn schedule(&mut self, kind: TransitionKind, delay: Duration, now: Instant) {
        self.pending = Some(ScheduledTransition::after(kind, delay, now));
    }

    /// Drop the pending transition; returns what was cancelled
    pub fn cancel(&mut self) -> Option<ScheduledTransition> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&ScheduledTransition> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self, kind: TransitionKind) -> bool {
        self.pending.is_some_and(|p| p.kind == kind)
    }

    /// Take the transition if it is due at `now`
    pub fn take_due(&mut self, now: Instant) -> Option<TransitionKind> {
        if self.pending.is_some_and(|p| p.is_due(now)) {
            self.pending.take().map(|p| p.kind)
        } else {
            None
        }
    }
}

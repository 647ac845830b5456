// crates/stackflow-runtime/src/transition.rs
use crate::item::StackItem;
use stackflow_core::ItemId;
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Push,
    Pop,
}

/// Observable state of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackState {
    Empty,
    Settled(usize),
    Transitioning(TransitionKind),
}

impl fmt::Display for StackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackState::Empty => write!(f, "empty"),
            StackState::Settled(depth) => write!(f, "settled({})", depth),
            StackState::Transitioning(TransitionKind::Push) => write!(f, "transitioning(push)"),
            StackState::Transitioning(TransitionKind::Pop) => write!(f, "transitioning(pop)"),
        }
    }
}

pub(crate) enum Phase<C> {
    /// New head sliding from its entry frame into place.
    Push { id: ItemId },
    /// Popped item fading out. It is already off the list; the phase keeps
    /// it alive until removal.
    PopExit { item: StackItem<C> },
    /// Remaining items re-laying out after a removal.
    PopSettle,
}

impl<C> Phase<C> {
    pub(crate) fn kind(&self) -> TransitionKind {
        match self {
            Phase::Push { .. } => TransitionKind::Push,
            Phase::PopExit { .. } | Phase::PopSettle => TransitionKind::Pop,
        }
    }
}

/// The single structural transition in flight.
pub(crate) struct Transition<C> {
    pub(crate) phase: Phase<C>,
    duration: Duration,
    elapsed: Duration,
}

impl<C> Transition<C> {
    pub(crate) fn new(phase: Phase<C>, duration: Duration) -> Self {
        Self {
            phase,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    pub(crate) fn advance(&mut self, delta: Duration) {
        self.elapsed = (self.elapsed + delta).min(self.duration);
    }

    pub(crate) fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32
        }
    }
}

/// Structural request waiting for the in-flight transition to finish.
pub(crate) enum PendingRequest<C> {
    /// The item is built at request time so its id can be handed out.
    Push(StackItem<C>),
    /// Pops this many items, one transition at a time.
    Pop(usize),
}

/// FIFO of structural requests. Multi-pops are expanded lazily so the depth
/// clamp is evaluated when each single pop actually runs.
pub(crate) struct RequestQueue<C> {
    requests: VecDeque<PendingRequest<C>>,
}

impl<C> RequestQueue<C> {
    pub(crate) fn new() -> Self {
        Self {
            requests: VecDeque::new(),
        }
    }

    pub(crate) fn enqueue(&mut self, request: PendingRequest<C>) {
        self.requests.push_back(request);
    }

    /// Puts the rest of a partially executed multi-pop back in front.
    pub(crate) fn resume_pop(&mut self, remaining: usize) {
        if remaining > 0 {
            self.requests.push_front(PendingRequest::Pop(remaining));
        }
    }

    pub(crate) fn dequeue(&mut self) -> Option<PendingRequest<C>> {
        self.requests.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.requests.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

// crates/stackflow-runtime/src/delegate.rs

/// Implemented by whoever embeds a stack. Requests are suggestions: the
/// stack never pushes or pops on its own, the delegate decides whether to
/// call back into it.
pub trait StackFlowDelegate<C> {
    fn did_request_push(&mut self) {}
    fn did_request_pop(&mut self, _count: usize) {}

    fn will_pop(&mut self) {}
    fn did_pop(&mut self) {}

    fn will_push(&mut self, _content: &C) {}
    fn did_push(&mut self, _content: &C) {}
}

/// Lifecycle and request notifications as plain values, for delegates that
/// only want to record what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateEvent {
    PushRequested,
    PopRequested(usize),
    WillPop,
    DidPop,
    WillPush,
    DidPush,
}

/// Delegate that appends every notification to a shared log.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: std::rc::Rc<std::cell::RefCell<Vec<DelegateEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DelegateEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<DelegateEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn record(&self, event: DelegateEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl<C> StackFlowDelegate<C> for EventLog {
    fn did_request_push(&mut self) {
        self.record(DelegateEvent::PushRequested);
    }

    fn did_request_pop(&mut self, count: usize) {
        self.record(DelegateEvent::PopRequested(count));
    }

    fn will_pop(&mut self) {
        self.record(DelegateEvent::WillPop);
    }

    fn did_pop(&mut self) {
        self.record(DelegateEvent::DidPop);
    }

    fn will_push(&mut self, _content: &C) {
        self.record(DelegateEvent::WillPush);
    }

    fn did_push(&mut self, _content: &C) {
        self.record(DelegateEvent::DidPush);
    }
}

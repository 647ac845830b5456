use glam::Vec2;
use stackflow::{
    DelegateEvent, EventLog, HeaderButton, NavigationRequest, Rect, RecordingRenderer, RenderCommand, StackConfiguration,
    StackFlow, StackState, TransitionKind,
};
use std::time::Duration;

fn timed_stack(millis: u64) -> (StackFlow<Vec2, RecordingRenderer>, EventLog) {
    let log = EventLog::new();
    let config = StackConfiguration::default().with_transition_duration(Duration::from_millis(millis));
    let mut stack = StackFlow::with_configuration(config, RecordingRenderer::new()).with_delegate(log.clone());
    stack.set_bounds(Rect::new(0.0, 0.0, 320.0, 480.0));
    (stack, log)
}

fn card() -> Vec2 {
    Vec2::new(320.0, 120.0)
}

#[test]
fn test_requests_are_drained_in_order() {
    let (mut stack, log) = timed_stack(200);
    stack.push(card(), None, None);
    stack.push(card(), None, None);
    stack.pop(1);
    let c = stack.push(card(), None, None);

    assert_eq!(stack.state(), StackState::Transitioning(TransitionKind::Push));
    assert_eq!(stack.pending_requests(), 3);
    assert!(!stack.owns(c), "queued pushes are not on the stack yet");

    stack.settle();
    assert_eq!(stack.item_count(), 2);
    assert_eq!(stack.top_item().map(|item| item.id()), Some(c));
    assert_eq!(
        log.events(),
        vec![
            DelegateEvent::WillPush,
            DelegateEvent::DidPush,
            DelegateEvent::WillPush,
            DelegateEvent::DidPush,
            DelegateEvent::WillPop,
            DelegateEvent::DidPop,
            DelegateEvent::WillPush,
            DelegateEvent::DidPush,
        ]
    );
}

#[test]
fn test_multi_pop_clamps_when_each_pop_runs() {
    let (mut stack, log) = timed_stack(100);
    for _ in 0..3 {
        stack.push(card(), None, None);
    }
    stack.settle();
    log.take();

    // pop(5) queued behind a push: four pops run, the fifth finds nothing
    stack.push(card(), None, None);
    stack.pop(5);
    stack.settle();

    assert_eq!(stack.state(), StackState::Empty);
    let events = log.events();
    assert_eq!(events.iter().filter(|e| **e == DelegateEvent::WillPop).count(), 4);
    assert_eq!(events.iter().filter(|e| **e == DelegateEvent::DidPop).count(), 4);
}

#[test]
fn test_one_pop_at_a_time() {
    let (mut stack, log) = timed_stack(100);
    for _ in 0..3 {
        stack.push(card(), None, None);
    }
    stack.settle();
    log.take();

    stack.pop(2);
    assert_eq!(stack.item_count(), 2);
    assert_eq!(stack.pending_requests(), 1);

    // Exit fade and settle re-layout take half the duration each
    stack.advance(Duration::from_millis(50));
    assert_eq!(log.events(), vec![DelegateEvent::WillPop, DelegateEvent::DidPop]);
    stack.advance(Duration::from_millis(50));
    assert_eq!(stack.item_count(), 1);
    assert_eq!(stack.pending_requests(), 0);

    stack.advance(Duration::from_millis(100));
    assert_eq!(stack.state(), StackState::Settled(1));
    assert_eq!(log.events().len(), 4);
}

#[test]
fn test_pop_sends_fade_out_then_remove() {
    let (mut stack, _log) = timed_stack(100);
    stack.push(card(), None, None);
    let top = stack.push(card(), None, None);
    stack.settle();
    stack.renderer_mut().clear();

    stack.pop(1);
    stack.settle();

    let fade_out = stack
        .renderer()
        .commands()
        .position(|c| *c == RenderCommand::FadeOutItem {
            id: top,
            duration: Duration::from_millis(50),
        });
    let remove = stack
        .renderer()
        .commands()
        .position(|c| *c == RenderCommand::RemoveItem { id: top });
    assert!(fade_out.is_some(), "missing fade out");
    assert!(remove.is_some(), "missing removal");
    assert!(fade_out < remove);
}

#[test]
fn test_items_belong_to_one_stack() {
    let (mut first, _) = timed_stack(0);
    let (mut second, _) = timed_stack(0);
    first.push(card(), None, None);
    let a = first.push(card(), None, None);
    let b = second.push(card(), None, None);

    assert_ne!(first.id(), second.id());
    assert!(first.owns(a));
    assert!(!second.owns(a));
    assert!(second.item(a).is_none());
    assert_eq!(first.item(a).and_then(|item| item.membership()), Some(first.id()));
    assert_eq!(second.item(b).and_then(|item| item.membership()), Some(second.id()));

    // A change on the second stack leaves the first one's items alone
    second.push(card(), None, None);
    assert!(first.item(a).map(|item| item.is_last()).unwrap_or(false));
    assert!(!second.item(b).map(|item| item.is_last()).unwrap_or(true));
}

#[test]
fn test_header_buttons_are_scoped_to_their_stack() {
    let (mut first, first_log) = timed_stack(0);
    let (mut second, second_log) = timed_stack(0);
    let root = first.push(card(), Some("Root".to_string()), None);
    let detail = first.push(card(), Some("Detail".to_string()), None);
    first_log.take();

    // Not the top any more
    assert_eq!(first.header_button_tapped(root, HeaderButton::Push), None);
    // Not an item of this stack
    assert_eq!(second.header_button_tapped(detail, HeaderButton::Pop), None);
    assert!(second_log.events().is_empty());

    assert_eq!(
        first.header_button_tapped(detail, HeaderButton::Pop),
        Some(NavigationRequest::Pop(1))
    );
    assert_eq!(
        first.header_button_tapped(detail, HeaderButton::Push),
        Some(NavigationRequest::Push)
    );
    assert_eq!(
        first_log.events(),
        vec![DelegateEvent::PopRequested(1), DelegateEvent::PushRequested]
    );
    assert_eq!(first.item_count(), 2, "requests are left to the delegate");
}

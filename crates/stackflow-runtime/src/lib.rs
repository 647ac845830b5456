// crates/stackflow-runtime/src/lib.rs

use stackflow_core::{
    Direction, EdgeInsets, FadingStyle, ItemId, NavigationOptions, Rect, SeparationStyle, StackConfiguration,
    StackContent, StackId, StackItemAppearance,
};
use stackflow_layout::{
    content_bounds, entry_frames, ContainerGeometry, LayoutEngine, LayoutInput, LayoutItem, StackLayout,
    StackLayoutEngine,
};
use stackflow_render::{
    compute_fade, FadeInput, FadeState, GestureEvent, HeaderButton, NullRenderer, RenderCommand, Renderer,
    SimpleTextShaper, TextShaper,
};
use std::time::Duration;
use tracing::{debug, trace, warn};

pub mod delegate;
pub mod item;
pub mod navigation;
pub mod transition;

pub use delegate::*;
pub use item::*;
pub use navigation::*;
pub use transition::{StackState, TransitionKind};

use transition::{PendingRequest, Phase, RequestQueue, Transition};

/// Stack controller: owns the ordered items and keeps layout, fading, headers
/// and the renderer in step with them.
///
/// Every structural change runs to completion before the next one starts.
/// Requests arriving while a transition is in flight are queued and replayed
/// in order once it finishes. Time only moves through [`StackFlow::advance`]
/// or [`StackFlow::finish_transition`], so a zero transition duration makes
/// every operation synchronous.
pub struct StackFlow<C, R: Renderer = NullRenderer> {
    id: StackId,
    config: StackConfiguration,
    bounds: Rect,
    safe_area_insets: EdgeInsets,
    items: Vec<StackItem<C>>,
    layout_engine: StackLayoutEngine,
    layout: StackLayout,
    fade: FadeState,
    navigation: NavigationInputMapper,
    transition: Option<Transition<C>>,
    pending: RequestQueue<C>,
    renderer: R,
    text_shaper: Box<dyn TextShaper>,
    delegate: Option<Box<dyn StackFlowDelegate<C>>>,
}

impl<C: StackContent, R: Renderer> StackFlow<C, R> {
    pub fn new(renderer: R) -> Self {
        Self::with_configuration(StackConfiguration::default(), renderer)
    }

    pub fn with_configuration(config: StackConfiguration, renderer: R) -> Self {
        let navigation = NavigationInputMapper::new(config.navigation_options, config.growth_direction);
        let mut stack = Self {
            id: StackId::next(),
            config,
            bounds: Rect::ZERO,
            safe_area_insets: EdgeInsets::ZERO,
            items: Vec::new(),
            layout_engine: StackLayoutEngine::new(),
            layout: StackLayout::default(),
            fade: FadeState::default(),
            navigation,
            transition: None,
            pending: RequestQueue::new(),
            renderer,
            text_shaper: Box::new(SimpleTextShaper::new()),
            delegate: None,
        };
        let mut commands = Vec::new();
        stack.recompute(&mut commands, Duration::ZERO);
        debug!("Created {} growing {}", stack.id, stack.config.growth_direction.name());
        stack
    }

    pub fn with_delegate(mut self, delegate: impl StackFlowDelegate<C> + 'static) -> Self {
        self.delegate = Some(Box::new(delegate));
        self
    }

    pub fn with_text_shaper(mut self, shaper: impl TextShaper + 'static) -> Self {
        self.text_shaper = Box::new(shaper);
        self.relayout("text shaper");
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.layout_engine = StackLayoutEngine::new().with_debug(debug);
        self
    }

    pub fn set_delegate(&mut self, delegate: Option<Box<dyn StackFlowDelegate<C>>>) {
        self.delegate = delegate;
    }

    // ---- structural operations ----

    /// Pushes `content` on top of the stack and returns the new item's id.
    /// Without an appearance the default preset is used.
    pub fn push(&mut self, content: C, title: Option<String>, appearance: Option<StackItemAppearance>) -> ItemId {
        let item = StackItem::new(content, title, appearance);
        let id = item.id();

        if self.is_busy() {
            debug!("Queued push of {} ({} request(s) ahead)", id, self.pending.len() + 1);
            self.pending.enqueue(PendingRequest::Push(item));
            return id;
        }

        self.start_push(item);
        self.run_pending();
        id
    }

    /// Pops up to `count` items, one transition at a time. Popping more than
    /// the stack holds stops at empty.
    pub fn pop(&mut self, count: usize) {
        if count == 0 {
            return;
        }

        if self.is_busy() {
            debug!("Queued pop({})", count);
            self.pending.enqueue(PendingRequest::Pop(count));
            return;
        }

        self.run_pop(count);
        self.run_pending();
    }

    /// Pops everything, including items whose push is still queued. The
    /// depth is taken when the pops run, not when this is called.
    pub fn clean(&mut self) {
        debug!("Cleaning {} ({} items, {} queued)", self.id, self.items.len(), self.pending.len());
        self.pop(usize::MAX);
    }

    // ---- transition clock ----

    /// Moves the in-flight transition forward. Time left over after one
    /// transition completes is spent on the queued ones.
    pub fn advance(&mut self, delta: Duration) {
        let mut remaining = delta;
        while let Some(transition) = self.transition.as_mut() {
            let left = transition.remaining();
            if remaining < left {
                transition.advance(remaining);
                break;
            }
            remaining -= left;
            if let Some(transition) = self.transition.take() {
                self.complete(transition.phase);
            }
            self.run_pending();
        }
    }

    /// Completes the in-flight transition right away, then starts whatever
    /// was queued behind it.
    pub fn finish_transition(&mut self) {
        while let Some(transition) = self.transition.take() {
            self.complete(transition.phase);
        }
        self.run_pending();
    }

    /// Runs every queued request to completion.
    pub fn settle(&mut self) {
        while self.transition.is_some() {
            self.finish_transition();
        }
    }

    pub fn transition_progress(&self) -> Option<f32> {
        self.transition.as_ref().map(Transition::progress)
    }

    // ---- input ----

    /// Maps a gesture to a request and forwards it to the delegate. The stack
    /// itself is left untouched.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Option<NavigationRequest> {
        let live: Vec<ItemId> = self.items.iter().map(StackItem::id).collect();
        let request = self.navigation.map(&event, &self.layout, &live)?;
        debug!("{:?} -> {:?}", event, request);
        self.forward_request(request);
        Some(request)
    }

    /// A header button of `item` was tapped. Only items of this stack that
    /// currently show the button produce a request.
    pub fn header_button_tapped(&mut self, item: ItemId, button: HeaderButton) -> Option<NavigationRequest> {
        let stack = self.id;
        let item = self.item(item)?;
        if item.membership() != Some(stack) || !item.shows(button) {
            trace!("{:?} button of {} is not active", button, item.id());
            return None;
        }

        let request = match button {
            HeaderButton::Pop => NavigationRequest::Pop(1),
            HeaderButton::Push => NavigationRequest::Push,
        };
        self.forward_request(request);
        Some(request)
    }

    // ---- configuration ----

    pub fn configuration(&self) -> &StackConfiguration {
        &self.config
    }

    pub fn set_configuration(&mut self, config: StackConfiguration) -> stackflow_core::Result<()> {
        config.validate()?;
        self.navigation = NavigationInputMapper::new(config.navigation_options, config.growth_direction);
        self.config = config;
        self.relayout("configuration");
        Ok(())
    }

    pub fn set_growth_direction(&mut self, direction: Direction) {
        self.config.growth_direction = direction;
        self.navigation.set_direction(direction);
        self.relayout("growth direction");
    }

    pub fn set_separation_style(&mut self, style: SeparationStyle) {
        self.config.separation_style = style;
        self.relayout("separation style");
    }

    pub fn set_fading_style(&mut self, style: FadingStyle) {
        self.config.fading_style = style;
        self.relayout("fading style");
    }

    pub fn set_navigation_options(&mut self, options: NavigationOptions) {
        self.config.navigation_options = options;
        self.navigation.set_options(options);
        self.relayout("navigation options");
    }

    /// Applies to transitions started from now on.
    pub fn set_transition_duration(&mut self, duration: Duration) {
        self.config.transition_duration = duration.as_secs_f64();
        self.relayout("transition duration");
    }

    pub fn set_head_padding(&mut self, padding: f32) {
        self.config.head_padding = padding.max(0.0);
        self.relayout("head padding");
    }

    pub fn set_autoresize_items(&mut self, autoresize: bool) {
        self.config.autoresize_items = autoresize;
        self.relayout("autoresize");
    }

    pub fn set_seek_safe_area(&mut self, seek: bool) {
        self.config.seek_safe_area = seek;
        self.relayout("safe area");
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.relayout("bounds");
    }

    pub fn set_safe_area_insets(&mut self, insets: EdgeInsets) {
        self.safe_area_insets = insets;
        self.relayout("safe area insets");
    }

    /// Returns `false` when the item is not on this stack.
    pub fn set_item_appearance(&mut self, id: ItemId, appearance: StackItemAppearance) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        item.set_appearance(appearance);
        self.relayout("item appearance");
        true
    }

    // ---- queries ----

    pub fn id(&self) -> StackId {
        self.id
    }

    pub fn owns(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bottom first.
    pub fn items(&self) -> &[StackItem<C>] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&StackItem<C>> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn top_item(&self) -> Option<&StackItem<C>> {
        self.items.last()
    }

    pub fn top_content(&self) -> Option<&C> {
        self.items.last().map(StackItem::content)
    }

    /// Area available to items, in the stack's own coordinates.
    pub fn content_bounds(&self) -> Rect {
        content_bounds(&self.geometry(), self.config.growth_direction)
    }

    pub fn layout(&self) -> &StackLayout {
        &self.layout
    }

    pub fn fade(&self) -> &FadeState {
        &self.fade
    }

    /// Requests waiting behind the in-flight transition. The unfinished part
    /// of a multi-pop counts as one.
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    pub fn state(&self) -> StackState {
        match &self.transition {
            Some(transition) => StackState::Transitioning(transition.phase.kind()),
            None if self.items.is_empty() => StackState::Empty,
            None => StackState::Settled(self.items.len()),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    // ---- internals ----

    fn is_busy(&self) -> bool {
        self.transition.is_some() || !self.pending.is_empty()
    }

    fn geometry(&self) -> ContainerGeometry {
        ContainerGeometry {
            bounds: self.bounds,
            safe_area_insets: self.safe_area_insets,
            seek_safe_area: self.config.seek_safe_area,
            head_padding: self.config.head_padding,
        }
    }

    fn run_pending(&mut self) {
        while self.transition.is_none() {
            match self.pending.dequeue() {
                Some(PendingRequest::Push(item)) => self.start_push(item),
                Some(PendingRequest::Pop(count)) => self.run_pop(count),
                None => break,
            }
        }
    }

    fn run_pop(&mut self, count: usize) {
        if self.start_pop() {
            self.pending.resume_pop(count - 1);
        } else {
            trace!("Nothing left to pop, dropping pop({})", count);
        }
    }

    fn start_push(&mut self, mut item: StackItem<C>) {
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.will_push(item.content());
        }

        let id = item.id();
        let is_first = self.items.is_empty();
        item.join(self.id, is_first);
        let size = item.intrinsic_size();
        let background = item.appearance().background_color;
        self.items.push(item);
        self.broadcast(NoticeKind::ItemPushed);

        let container = self.content_bounds().size;
        let (thickness, separator_color) = self.config.separation_style.size_and_color();
        let separator_thickness = if is_first { None } else { Some(thickness.max(0.0)) };
        let (entry, separator_entry) = entry_frames(
            container,
            self.config.growth_direction,
            size,
            separator_thickness,
            self.config.autoresize_items,
        );

        let mut commands = Vec::new();
        if let Some(frame) = separator_entry {
            commands.push(RenderCommand::InsertSeparator {
                id,
                frame,
                color: separator_color,
            });
        }

        let header = self
            .items
            .last_mut()
            .and_then(|item| {
                let header = item.resolve_header(entry.width(), self.text_shaper.as_ref());
                item.update_header(header.clone());
                header
            });
        commands.push(RenderCommand::InsertItem {
            id,
            frame: entry,
            background,
            header,
        });

        let duration = self.config.transition_duration();
        self.recompute(&mut commands, duration);
        self.render(commands);

        debug!("Pushed {} onto {} (depth {})", id, self.id, self.items.len());
        self.begin(Transition::new(Phase::Push { id }, duration));
    }

    fn start_pop(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }

        if let Some(delegate) = self.delegate.as_mut() {
            delegate.will_pop();
        }

        let Some(item) = self.items.pop() else {
            return false;
        };

        let id = item.id();
        let half = self.config.transition_duration() / 2;
        self.render(vec![RenderCommand::FadeOutItem { id, duration: half }]);

        debug!("Popping {} from {} (depth {})", id, self.id, self.items.len());
        self.begin(Transition::new(Phase::PopExit { item }, half));
        true
    }

    fn begin(&mut self, transition: Transition<C>) {
        if transition.remaining().is_zero() {
            self.complete(transition.phase);
        } else {
            self.transition = Some(transition);
        }
    }

    fn complete(&mut self, phase: Phase<C>) {
        match phase {
            Phase::Push { id } => {
                debug!("Push of {} settled", id);
                if let (Some(delegate), Some(item)) =
                    (self.delegate.as_mut(), self.items.iter().find(|item| item.id() == id))
                {
                    delegate.did_push(item.content());
                }
            }
            Phase::PopExit { mut item } => {
                let id = item.id();
                item.leave();
                drop(item);

                let half = self.config.transition_duration() / 2;
                let mut commands = vec![RenderCommand::RemoveItem { id }];
                self.broadcast(NoticeKind::ItemPopped);
                self.recompute(&mut commands, half);
                self.render(commands);

                debug!("Removed {} from {}", id, self.id);
                if let Some(delegate) = self.delegate.as_mut() {
                    delegate.did_pop();
                }
                self.begin(Transition::new(Phase::PopSettle, half));
            }
            Phase::PopSettle => {
                debug!("Pop settled at depth {}", self.items.len());
            }
        }
    }

    fn broadcast(&mut self, kind: NoticeKind) {
        let notice = StackNotice {
            stack: self.id,
            kind,
            top: self.items.last().map(StackItem::id),
        };
        for item in &mut self.items {
            item.handle_notice(&notice);
        }
    }

    fn forward_request(&mut self, request: NavigationRequest) {
        if let Some(delegate) = self.delegate.as_mut() {
            match request {
                NavigationRequest::Push => delegate.did_request_push(),
                NavigationRequest::Pop(count) => delegate.did_request_pop(count),
            }
        }
    }

    fn relayout(&mut self, reason: &str) {
        let mut commands = Vec::new();
        self.recompute(&mut commands, Duration::ZERO);
        debug!("Recomputed {} after {} change", self.id, reason);
        self.render(commands);
    }

    /// Rebuilds layout, fading and headers from the current item list.
    fn recompute(&mut self, commands: &mut Vec<RenderCommand>, duration: Duration) {
        let layout_items: Vec<LayoutItem> = self
            .items
            .iter()
            .map(|item| LayoutItem {
                id: item.id(),
                size: item.intrinsic_size(),
            })
            .collect();

        self.layout = self.layout_engine.compute_layout(&LayoutInput {
            items: &layout_items,
            direction: self.config.growth_direction,
            separation: self.config.separation_style,
            autoresize: self.config.autoresize_items,
            geometry: self.geometry(),
        });

        let ids: Vec<ItemId> = layout_items.iter().map(|item| item.id).collect();
        self.fade = compute_fade(&FadeInput {
            items: &ids,
            direction: self.config.growth_direction,
            style: &self.config.fading_style,
            head_extent: self.layout.head_extent(),
            container_extent: self.layout.container_extent(),
        });
        trace!(
            "{}: {} constraints, mask={}",
            self.id,
            self.layout.constraints.len(),
            self.fade.mask.is_some()
        );

        commands.push(RenderCommand::ApplyLayout {
            layout: self.layout.clone(),
            duration,
        });
        commands.push(RenderCommand::ApplyFade {
            fade: self.fade.clone(),
            duration,
        });

        let shaper = self.text_shaper.as_ref();
        for item in self.items.iter_mut() {
            let width = self.layout.item_frame(item.id()).map(|frame| frame.width()).unwrap_or(0.0);
            let header = item.resolve_header(width, shaper);
            if item.update_header(header.clone()) {
                commands.push(RenderCommand::UpdateHeader { id: item.id(), header });
            }
        }
    }

    fn render(&mut self, commands: Vec<RenderCommand>) {
        if commands.is_empty() {
            return;
        }
        if let Err(e) = self.renderer.execute_commands(&commands) {
            warn!("Renderer rejected {} command(s): {}", commands.len(), e);
        }
    }
}

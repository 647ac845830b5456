// crates/stackflow-runtime/src/item.rs
use glam::Vec2;
use stackflow_core::{ItemId, StackContent, StackId, StackItemAppearance, HEADER_HEIGHT};
use stackflow_render::{resolve_header, HeaderButton, ResolvedHeader, TextShaper};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    ItemPushed,
    ItemPopped,
}

/// Lifecycle notification a stack sends to its items after every structural
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackNotice {
    pub stack: StackId,
    pub kind: NoticeKind,
    /// Head of the stack after the change.
    pub top: Option<ItemId>,
}

/// One pushed piece of content plus its optional header.
#[derive(Debug)]
pub struct StackItem<C> {
    id: ItemId,
    content: C,
    title: Option<String>,
    appearance: StackItemAppearance,
    is_first_in_stack: bool,
    is_last: bool,
    membership: Option<StackId>,
    header: Option<ResolvedHeader>,
}

impl<C: StackContent> StackItem<C> {
    pub(crate) fn new(content: C, title: Option<String>, appearance: Option<StackItemAppearance>) -> Self {
        Self {
            id: ItemId::next(),
            content,
            title,
            appearance: appearance.unwrap_or_default(),
            is_first_in_stack: false,
            is_last: false,
            membership: None,
            header: None,
        }
    }

    /// Content size plus the header band when the item has a title.
    pub fn intrinsic_size(&self) -> Vec2 {
        let size = self.content.preferred_size();
        if self.title.is_some() {
            size + Vec2::new(0.0, HEADER_HEIGHT)
        } else {
            size
        }
    }
}

impl<C> StackItem<C> {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn into_content(self) -> C {
        self.content
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn appearance(&self) -> &StackItemAppearance {
        &self.appearance
    }

    pub fn is_first_in_stack(&self) -> bool {
        self.is_first_in_stack
    }

    pub fn is_last(&self) -> bool {
        self.is_last
    }

    pub fn has_pop_affordance(&self) -> bool {
        !self.is_first_in_stack && self.is_last
    }

    pub fn has_push_affordance(&self) -> bool {
        self.is_last
    }

    pub fn shows(&self, button: HeaderButton) -> bool {
        match button {
            HeaderButton::Pop => self.has_pop_affordance(),
            HeaderButton::Push => self.has_push_affordance(),
        }
    }

    /// Stack this item currently belongs to, if any.
    pub fn membership(&self) -> Option<StackId> {
        self.membership
    }

    pub fn header(&self) -> Option<&ResolvedHeader> {
        self.header.as_ref()
    }

    /// Reacts to a lifecycle notice. Notices from a stack the item does not
    /// belong to are dropped; returns whether the notice was accepted.
    pub fn handle_notice(&mut self, notice: &StackNotice) -> bool {
        if self.membership != Some(notice.stack) {
            trace!("{} ignored {:?} from {}", self.id, notice.kind, notice.stack);
            return false;
        }
        self.is_last = notice.top == Some(self.id);
        true
    }

    pub(crate) fn join(&mut self, stack: StackId, is_first_in_stack: bool) {
        self.membership = Some(stack);
        self.is_first_in_stack = is_first_in_stack;
    }

    pub(crate) fn leave(&mut self) {
        self.membership = None;
        self.is_last = false;
    }

    pub(crate) fn set_appearance(&mut self, appearance: StackItemAppearance) {
        self.appearance = appearance;
    }

    /// Header for an item `width` wide, or `None` for untitled items.
    pub(crate) fn resolve_header(&self, width: f32, shaper: &dyn TextShaper) -> Option<ResolvedHeader> {
        let title = self.title.as_deref()?;
        Some(resolve_header(
            title,
            &self.appearance.top_bar,
            width,
            self.has_pop_affordance(),
            self.has_push_affordance(),
            shaper,
        ))
    }

    /// Stores a freshly resolved header; returns whether it changed.
    pub(crate) fn update_header(&mut self, header: Option<ResolvedHeader>) -> bool {
        if self.header == header {
            return false;
        }
        self.header = header;
        true
    }
}

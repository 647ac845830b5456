// crates/stackflow-layout/src/constraints.rs
use stackflow_core::ItemId;
use std::fmt;

/// Something a positioning relationship can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutNode {
    /// The content container every item lives in.
    Container,
    Item(ItemId),
    /// The separator keyed to the item it precedes in growth order.
    Separator(ItemId),
}

impl fmt::Display for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutNode::Container => write!(f, "container"),
            LayoutNode::Item(id) => write!(f, "{}", id),
            LayoutNode::Separator(id) => write!(f, "separator({})", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Top,
    Bottom,
    Leading,
    Trailing,
    Width,
    Height,
    CenterX,
    CenterY,
}

/// `node.attribute == target.attribute + constant`, or `node.attribute == constant`
/// when there is no target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub node: LayoutNode,
    pub attribute: Attribute,
    pub target: Option<(LayoutNode, Attribute)>,
    pub constant: f32,
}

impl Constraint {
    pub fn equal(node: LayoutNode, attribute: Attribute, target: LayoutNode, target_attribute: Attribute) -> Self {
        Self {
            node,
            attribute,
            target: Some((target, target_attribute)),
            constant: 0.0,
        }
    }

    pub fn fixed(node: LayoutNode, attribute: Attribute, constant: f32) -> Self {
        Self {
            node,
            attribute,
            target: None,
            constant,
        }
    }

    pub fn involves(&self, node: LayoutNode) -> bool {
        self.node == node || self.target.map(|(target, _)| target == node).unwrap_or(false)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Some((target, attribute)) if self.constant == 0.0 => {
                write!(f, "{}.{:?} == {}.{:?}", self.node, self.attribute, target, attribute)
            }
            Some((target, attribute)) => write!(
                f,
                "{}.{:?} == {}.{:?} + {}",
                self.node, self.attribute, target, attribute, self.constant
            ),
            None => write!(f, "{}.{:?} == {}", self.node, self.attribute, self.constant),
        }
    }
}

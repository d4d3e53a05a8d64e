//! The polymorphic node tree of a design file.
//!
//! A file's content is a tree of nodes. Every node has an id, a name, a
//! `type` tag and an optional visibility flag; everything else depends on
//! the tag. [Node] is the sum over all known tags, plus [Node::Unknown] for
//! tags this crate doesn't know about yet, so clients keep working when the
//! API grows new node kinds.
//!
//! Decoding goes through a [Decoder], which looks at the tag of each JSON
//! object first and then decodes the whole object into the shape that tag
//! selects. Containers decode their `children` the same way, recursively.

mod decode;
mod node_type;
mod shapes;


use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub use decode::{DecodeError, Decoder};
pub use node_type::NodeType;
pub use shapes::{
    BooleanNode, CanvasNode, DocumentNode, FrameNode, InstanceNode, NodeBase, RectangleNode,
    SliceNode, TextNode, UnknownNode, VectorNode,
};

/// One node of a file's document tree.
///
/// Variants sharing a field layout share a shape type, the variant itself
/// carries the tag. Containers own their children, in the order they were
/// received, which is back-to-front paint order.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Document(DocumentNode),
    Canvas(CanvasNode),
    Frame(FrameNode),
    Group(FrameNode),
    Vector(VectorNode),
    Boolean(BooleanNode),
    Star(VectorNode),
    Line(VectorNode),
    Ellipse(VectorNode),
    RegularPolygon(VectorNode),
    Rectangle(RectangleNode),
    Text(TextNode),
    Slice(SliceNode),
    Component(FrameNode),
    Instance(InstanceNode),
    Unknown(UnknownNode),
}

impl Node {
    pub fn base(&self) -> &NodeBase {
        match self {
            Node::Document(n) => n.base(),
            Node::Canvas(n) => n.base(),
            Node::Frame(n) | Node::Group(n) | Node::Component(n) => n.base(),
            Node::Vector(n)
            | Node::Star(n)
            | Node::Line(n)
            | Node::Ellipse(n)
            | Node::RegularPolygon(n) => n.base(),
            Node::Boolean(n) => n.base(),
            Node::Rectangle(n) => n.base(),
            Node::Text(n) => n.base(),
            Node::Slice(n) => n.base(),
            Node::Instance(n) => n.base(),
            Node::Unknown(n) => n.base(),
        }
    }

    pub fn id(&self) -> &str {
        self.base().id()
    }

    pub fn name(&self) -> &str {
        self.base().name()
    }

    /// The tag this node was decoded from. For [Node::Unknown] this is the
    /// unrecognized tag itself (or [NodeType::Missing]).
    pub fn node_type(&self) -> &NodeType {
        self.base().node_type()
    }

    pub fn visible(&self) -> Option<bool> {
        self.base().visible()
    }

    /// The children of a container node, `None` for leaf nodes.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Document(n) => Some(n.children()),
            Node::Canvas(n) => Some(n.children()),
            Node::Frame(n) | Node::Group(n) | Node::Component(n) => Some(n.children()),
            Node::Instance(n) => Some(n.children()),
            Node::Boolean(n) => Some(n.children()),
            Node::Vector(_)
            | Node::Star(_)
            | Node::Line(_)
            | Node::Ellipse(_)
            | Node::RegularPolygon(_)
            | Node::Rectangle(_)
            | Node::Text(_)
            | Node::Slice(_)
            | Node::Unknown(_) => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.children().is_some()
    }

    /// Iterates over this node and all of its descendants, depth-first,
    /// parents before their children, siblings in paint order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Looks up a node by id in the subtree rooted at this node.
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.iter().find(|node| node.id() == id)
    }
}

/// Depth-first, pre-order iterator over a subtree, see [Node::iter].
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = node.children() {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}

/// Writes the node back in wire form, with every key it was decoded from.
///
/// Two things don't survive byte for byte: typed numeric fields are `f64`,
/// so an integer `1` comes back as `1.0`, and `"visible": null` is read as
/// absent and therefore omitted. Keys kept in `extra` are written verbatim.
impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Document(n) => n.serialize(serializer),
            Node::Canvas(n) => n.serialize(serializer),
            Node::Frame(n) | Node::Group(n) | Node::Component(n) => n.serialize(serializer),
            Node::Vector(n)
            | Node::Star(n)
            | Node::Line(n)
            | Node::Ellipse(n)
            | Node::RegularPolygon(n) => n.serialize(serializer),
            Node::Boolean(n) => n.serialize(serializer),
            Node::Rectangle(n) => n.serialize(serializer),
            Node::Text(n) => n.serialize(serializer),
            Node::Slice(n) => n.serialize(serializer),
            Node::Instance(n) => n.serialize(serializer),
            Node::Unknown(n) => n.serialize(serializer),
        }
    }
}

/// Goes through [Decoder::default], so deserializing a [Node] (or anything
/// containing one) with serde dispatches exactly like the decoder does.
impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Decoder::default()
            .node_from_value(value)
            .map_err(serde::de::Error::custom)
    }
}

/// Decodes a JSON array of sibling nodes with the default [Decoder].
pub fn decode_node_sequence(buf: &[u8]) -> Result<Vec<Node>, DecodeError> {
    Decoder::default().decode_node_sequence(buf)
}

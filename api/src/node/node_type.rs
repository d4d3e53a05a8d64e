use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The discriminant of a [super::Node], carried in the `type` key on the wire.
///
/// Tags outside the known set are kept verbatim in [NodeType::Unknown], so a
/// node of a kind introduced after this crate was written still re-encodes
/// with its original tag.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum NodeType {
    Document,
    Canvas,
    Frame,
    Group,
    Vector,
    Boolean,
    Star,
    Line,
    Ellipse,
    RegularPolygon,
    Rectangle,
    Text,
    Slice,
    Component,
    Instance,
    /// Any other tag, kept as received.
    Unknown(String),
    /// The node carried no `type` key at all.
    #[default]
    Missing,
}

impl NodeType {
    /// All node types the decoder dispatches to a dedicated shape.
    pub const KNOWN: [NodeType; 15] = [
        NodeType::Document,
        NodeType::Canvas,
        NodeType::Frame,
        NodeType::Group,
        NodeType::Vector,
        NodeType::Boolean,
        NodeType::Star,
        NodeType::Line,
        NodeType::Ellipse,
        NodeType::RegularPolygon,
        NodeType::Rectangle,
        NodeType::Text,
        NodeType::Slice,
        NodeType::Component,
        NodeType::Instance,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Document => "DOCUMENT",
            NodeType::Canvas => "CANVAS",
            NodeType::Frame => "FRAME",
            NodeType::Group => "GROUP",
            NodeType::Vector => "VECTOR",
            NodeType::Boolean => "BOOLEAN",
            NodeType::Star => "STAR",
            NodeType::Line => "LINE",
            NodeType::Ellipse => "ELLIPSE",
            NodeType::RegularPolygon => "REGULAR_POLYGON",
            NodeType::Rectangle => "RECTANGLE",
            NodeType::Text => "TEXT",
            NodeType::Slice => "SLICE",
            NodeType::Component => "COMPONENT",
            NodeType::Instance => "INSTANCE",
            NodeType::Unknown(tag) => tag,
            NodeType::Missing => "",
        }
    }

    /// Whether nodes of this type own an ordered list of children.
    /// Containment is a property of the type, never of the payload.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeType::Document
                | NodeType::Canvas
                | NodeType::Frame
                | NodeType::Group
                | NodeType::Component
                | NodeType::Instance
                | NodeType::Boolean
        )
    }

    /// Whether the tag was recognized. False for [NodeType::Unknown] and for
    /// nodes without a `type` key.
    pub fn is_known(&self) -> bool {
        !matches!(self, NodeType::Unknown(_) | NodeType::Missing)
    }

    pub(crate) fn is_missing(&self) -> bool {
        matches!(self, NodeType::Missing)
    }
}

impl From<&str> for NodeType {
    fn from(s: &str) -> Self {
        match s {
            "DOCUMENT" => NodeType::Document,
            "CANVAS" => NodeType::Canvas,
            "FRAME" => NodeType::Frame,
            "GROUP" => NodeType::Group,
            "VECTOR" => NodeType::Vector,
            "BOOLEAN" => NodeType::Boolean,
            "STAR" => NodeType::Star,
            "LINE" => NodeType::Line,
            "ELLIPSE" => NodeType::Ellipse,
            "REGULAR_POLYGON" => NodeType::RegularPolygon,
            "RECTANGLE" => NodeType::Rectangle,
            "TEXT" => NodeType::Text,
            "SLICE" => NodeType::Slice,
            "COMPONENT" => NodeType::Component,
            "INSTANCE" => NodeType::Instance,
            other => NodeType::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Missing => f.write_str("<missing>"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl Serialize for NodeType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(NodeType::from(s.as_str()))
    }
}

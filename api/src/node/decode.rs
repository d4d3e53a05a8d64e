use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::shapes::{
    BooleanNode, CanvasNode, DocumentNode, FrameNode, InstanceNode, RectangleNode, SliceNode,
    TextNode, UnknownNode, VectorNode,
};
use super::{Node, NodeType};

/// JSON nesting a single node level may add on top of its parent: the node
/// object and its `children` array.
const NESTING_PER_NODE: usize = 2;

/// JSON nesting the raw prescan allows on top of the node levels, for the
/// file envelope and payload values, including unmodelled ones. Matches
/// serde_json's own default recursion limit. Node levels themselves are
/// enforced exactly, per node, while decoding.
const PAYLOAD_NESTING: usize = 128;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a sequence of nodes, found {found}")]
    NotASequence { found: &'static str },

    #[error("element {index} is not a node object, found {found}")]
    NotAnObject { index: usize, found: &'static str },

    #[error("node type must be a string, found {found}")]
    InvalidDiscriminant { found: String },

    #[error("unable to decode {node_type} node '{id}': {source}")]
    Shape {
        node_type: NodeType,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("the document root must be a DOCUMENT node, found {found}")]
    NotADocument { found: NodeType },

    #[error("node tree exceeds the maximum depth of {max_depth}")]
    TooDeep { max_depth: usize },
}

/// Turns raw JSON into [Node] trees.
///
/// A [Decoder] holds no state besides its configuration, so one value can be
/// shared freely across threads and decode calls.
///
/// The default decoder puts no bound on the tree depth. Payloads from
/// untrusted sources should be decoded with [Decoder::with_max_depth], which
/// rejects over-deep input before building any tree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Decoder {
    max_depth: Option<usize>,
}

impl Decoder {
    /// Limits trees to `max_depth` node levels below the outermost node (or
    /// sequence) being decoded.
    ///
    /// Before parsing, the raw nesting of the buffer is bounded by two levels
    /// per node plus 128 for payload values, so a node's payload may nest up
    /// to that deep whatever `max_depth` is.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Decodes a JSON array of sibling nodes.
    #[instrument(skip_all, err, fields(buf.len = buf.len()))]
    pub fn decode_node_sequence(&self, buf: &[u8]) -> Result<Vec<Node>, DecodeError> {
        let value = self.parse(buf)?;
        self.node_sequence_from_value(value)
    }

    /// Decodes a single JSON node object, including its subtree.
    #[instrument(skip_all, err, fields(buf.len = buf.len()))]
    pub fn decode_node(&self, buf: &[u8]) -> Result<Node, DecodeError> {
        let value = self.parse(buf)?;
        self.node_from_value(value)
    }

    pub fn node_sequence_from_value(&self, value: Value) -> Result<Vec<Node>, DecodeError> {
        self.sequence(value, 0)
    }

    pub fn node_from_value(&self, value: Value) -> Result<Node, DecodeError> {
        self.node(value, 0, 0)
    }

    /// Decodes a node that has to be the DOCUMENT root of a file.
    pub(crate) fn document_from_value(&self, value: Value) -> Result<DocumentNode, DecodeError> {
        match self.node_from_value(value)? {
            Node::Document(document) => Ok(document),
            other => Err(DecodeError::NotADocument {
                found: other.node_type().clone(),
            }),
        }
    }

    /// Parses the buffer into a generic JSON value.
    ///
    /// serde_json's own recursion limit is lifted, trees may legitimately be
    /// deeper than it allows. If a maximum depth is configured, the nesting of
    /// the raw buffer is checked first, so hostile input is rejected before
    /// the parser recurses into it.
    pub(crate) fn parse(&self, buf: &[u8]) -> Result<Value, DecodeError> {
        if let Some(max_depth) = self.max_depth {
            let limit = max_depth
                .saturating_add(1)
                .saturating_mul(NESTING_PER_NODE)
                .saturating_add(PAYLOAD_NESTING);
            if nesting_depth(buf) > limit {
                return Err(DecodeError::TooDeep { max_depth });
            }
        }

        let mut de = serde_json::Deserializer::from_slice(buf);
        de.disable_recursion_limit();
        let value = Value::deserialize(&mut de)?;
        de.end()?;

        Ok(value)
    }

    fn check_depth(&self, depth: usize) -> Result<(), DecodeError> {
        match self.max_depth {
            Some(max_depth) if depth > max_depth => Err(DecodeError::TooDeep { max_depth }),
            _ => Ok(()),
        }
    }

    /// Decodes a list of siblings at the given depth, preserving their order.
    /// The first element that fails to decode fails the whole sequence.
    fn sequence(&self, value: Value, depth: usize) -> Result<Vec<Node>, DecodeError> {
        let Value::Array(elems) = value else {
            return Err(DecodeError::NotASequence {
                found: kind(&value),
            });
        };

        elems
            .into_iter()
            .enumerate()
            .map(|(index, elem)| self.node(elem, index, depth))
            .collect()
    }

    /// Decodes one node, dispatching on its `type` key.
    ///
    /// The tag is looked at first, then the remaining object is decoded into
    /// the shape the tag selects. For container types, the `children` key is
    /// taken out beforehand and decoded one level deeper with the same
    /// dispatch.
    fn node(&self, value: Value, index: usize, depth: usize) -> Result<Node, DecodeError> {
        self.check_depth(depth)?;

        let Value::Object(mut fields) = value else {
            return Err(DecodeError::NotAnObject {
                index,
                found: kind(&value),
            });
        };

        let node_type = match fields.get("type") {
            None => NodeType::Missing,
            Some(Value::String(tag)) => NodeType::from(tag.as_str()),
            Some(other) => {
                return Err(DecodeError::InvalidDiscriminant {
                    found: other.to_string(),
                })
            }
        };

        let children = if node_type.is_container() {
            fields.remove("children")
        } else {
            None
        };

        let node = match node_type {
            NodeType::Document => {
                let mut document: DocumentNode = shape(&node_type, fields)?;
                document.children = self.children(children, depth)?;
                Node::Document(document)
            }
            NodeType::Canvas => {
                let mut canvas: CanvasNode = shape(&node_type, fields)?;
                canvas.children = self.children(children, depth)?;
                Node::Canvas(canvas)
            }
            NodeType::Frame | NodeType::Group | NodeType::Component => {
                let mut frame: FrameNode = shape(&node_type, fields)?;
                frame.children = self.children(children, depth)?;
                match node_type {
                    NodeType::Frame => Node::Frame(frame),
                    NodeType::Group => Node::Group(frame),
                    _ => Node::Component(frame),
                }
            }
            NodeType::Instance => {
                let mut instance: InstanceNode = shape(&node_type, fields)?;
                instance.frame.children = self.children(children, depth)?;
                Node::Instance(instance)
            }
            NodeType::Boolean => {
                let mut boolean: BooleanNode = shape(&node_type, fields)?;
                boolean.children = self.children(children, depth)?;
                Node::Boolean(boolean)
            }
            NodeType::Vector => Node::Vector(shape::<VectorNode>(&node_type, fields)?),
            NodeType::Star => Node::Star(shape(&node_type, fields)?),
            NodeType::Line => Node::Line(shape(&node_type, fields)?),
            NodeType::Ellipse => Node::Ellipse(shape(&node_type, fields)?),
            NodeType::RegularPolygon => Node::RegularPolygon(shape(&node_type, fields)?),
            NodeType::Rectangle => Node::Rectangle(shape::<RectangleNode>(&node_type, fields)?),
            NodeType::Text => Node::Text(shape::<TextNode>(&node_type, fields)?),
            NodeType::Slice => Node::Slice(shape::<SliceNode>(&node_type, fields)?),
            NodeType::Unknown(_) | NodeType::Missing => {
                let unknown: UnknownNode = shape(&node_type, fields)?;
                debug!(
                    node.id = %unknown.base.id,
                    node.type = %node_type,
                    "unrecognized node type, keeping base fields only"
                );
                Node::Unknown(unknown)
            }
        };

        Ok(node)
    }

    /// Decodes the `children` value of a container at `depth`.
    /// A container without the key has no children.
    fn children(&self, children: Option<Value>, depth: usize) -> Result<Vec<Node>, DecodeError> {
        match children {
            None => Ok(Vec::new()),
            Some(value) => self.sequence(value, depth + 1),
        }
    }
}

/// Decodes the fields of one node object into the selected shape.
fn shape<T: DeserializeOwned>(
    node_type: &NodeType,
    fields: Map<String, Value>,
) -> Result<T, DecodeError> {
    let id = match fields.get("id") {
        Some(Value::String(id)) => id.clone(),
        _ => String::new(),
    };

    serde_json::from_value(Value::Object(fields)).map_err(|source| DecodeError::Shape {
        node_type: node_type.clone(),
        id,
        source,
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Returns the maximum nesting of arrays and objects in a JSON buffer,
/// without parsing it. Brackets inside strings are skipped.
/// The result is meaningless for invalid JSON, which the parser rejects
/// afterwards anyway.
fn nesting_depth(buf: &[u8]) -> usize {
    let mut depth: usize = 0;
    let mut max = 0;
    let mut in_string = false;
    let mut escaped = false;

    for &b in buf {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                max = max.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    max
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::nesting_depth;

    #[rstest]
    #[case::scalar(b"42", 0)]
    #[case::empty_array(b"[]", 1)]
    #[case::nested(br#"{"a": [{"b": []}]}"#, 4)]
    #[case::siblings(br#"[[1], [2], [[3]]]"#, 3)]
    #[case::brackets_in_strings(br#"["[[[{{{", "\"]]"]"#, 1)]
    fn nesting(#[case] buf: &[u8], #[case] expected: usize) {
        assert_eq!(expected, nesting_depth(buf));
    }
}

//! A whole design file: its metadata, the document tree and the tables the
//! tree refers into.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::node::{CanvasNode, DecodeError, Decoder, DocumentNode, Node, NodeType};
use crate::style::StyleType;

/// The id of the DOCUMENT node at the root of every file.
pub const DOCUMENT_ID: &str = "0:0";

/// Descriptive metadata for a component, keyed by component id in
/// [File::components].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentReference {
    pub name: String,
    pub description: String,
}

/// The response to a `GET files/:key` request.
///
/// The file owns its document tree. Nodes refer to entries of
/// [File::styles] and [File::components] by id, these references are kept
/// as they are received and never resolved.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct File {
    pub name: String,

    #[serde(rename = "lastModified")]
    pub last_modified: String,

    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub document: DocumentNode,

    #[serde(rename = "schemaVersion")]
    pub schema_version: i64,

    pub styles: BTreeMap<StyleType, String>,

    pub components: BTreeMap<String, ComponentReference>,

    /// Top-level keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Everything of a file besides its document, decoded in one go.
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    name: String,

    #[serde(rename = "lastModified", default)]
    last_modified: String,

    #[serde(rename = "thumbnailUrl", default)]
    thumbnail_url: String,

    #[serde(default)]
    version: Option<String>,

    #[serde(default)]
    document: Option<Value>,

    #[serde(rename = "schemaVersion", default)]
    schema_version: i64,

    #[serde(default)]
    styles: BTreeMap<StyleType, String>,

    #[serde(default)]
    components: BTreeMap<String, ComponentReference>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl File {
    /// Looks up a node anywhere below the document root.
    /// The root itself is not a [Node], use [File::document] for it.
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.document
            .children()
            .iter()
            .find_map(|child| child.find(id))
    }

    /// The pages of the file, in order.
    pub fn canvases(&self) -> impl Iterator<Item = &CanvasNode> {
        self.document.children().iter().filter_map(|child| match child {
            Node::Canvas(canvas) => Some(canvas),
            _ => None,
        })
    }
}

impl Decoder {
    /// Decodes the body of a `GET files/:key` response.
    #[instrument(skip_all, err, fields(buf.len = buf.len()))]
    pub fn decode_file(&self, buf: &[u8]) -> Result<File, DecodeError> {
        let value = self.parse(buf)?;
        self.file_from_value(value)
    }

    /// The metadata and tables are decoded on their own, the `document`
    /// goes through the node dispatch and has to be a DOCUMENT node.
    pub fn file_from_value(&self, value: Value) -> Result<File, DecodeError> {
        let envelope: Envelope = serde_json::from_value(value)?;

        let document = match envelope.document {
            Some(document) => self.document_from_value(document)?,
            None => {
                return Err(DecodeError::NotADocument {
                    found: NodeType::Missing,
                })
            }
        };

        Ok(File {
            name: envelope.name,
            last_modified: envelope.last_modified,
            thumbnail_url: envelope.thumbnail_url,
            version: envelope.version,
            document,
            schema_version: envelope.schema_version,
            styles: envelope.styles,
            components: envelope.components,
            extra: envelope.extra,
        })
    }
}

impl<'de> Deserialize<'de> for File {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Decoder::default()
            .file_from_value(value)
            .map_err(serde::de::Error::custom)
    }
}

/// Decodes a whole file with the default [Decoder].
pub fn decode(buf: &[u8]) -> Result<File, DecodeError> {
    Decoder::default().decode_file(buf)
}

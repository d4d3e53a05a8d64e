//! The concrete shapes a [Node] decodes into.
//!
//! Several node kinds share one field layout and only differ by their tag:
//! FRAME, GROUP and COMPONENT are all [FrameNode]s, and VECTOR, STAR, LINE,
//! ELLIPSE and REGULAR_POLYGON are all [VectorNode]s. Shapes that extend a
//! shared layout embed it with `#[serde(flatten)]`.
//!
//! Every shape has an `extra` map that collects the keys it doesn't model,
//! so a decoded node re-encodes to the object it was decoded from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Node, NodeType};
use crate::geometry::{Path, Rectangle, Transform, Vector};
use crate::style::{
    BlendMode, Color, Effect, ExportSetting, LayoutConstraint, LayoutGrid, Paint, StrokeAlign,
    TypeStyle,
};

/// Fields every node carries, whatever its type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeBase {
    #[serde(default)]
    pub(crate) id: String,

    #[serde(default)]
    pub(crate) name: String,

    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "NodeType::is_missing"
    )]
    pub(crate) node_type: NodeType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) visible: Option<bool>,
}

impl NodeBase {
    /// Unique within a file, and stable across requests for the same node.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    /// `None` if the key was absent, which the API treats as visible.
    pub fn visible(&self) -> Option<bool> {
        self.visible
    }
}

/// The root node of a file. Its children are canvases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    #[serde(flatten)]
    pub(crate) base: NodeBase,

    #[serde(default)]
    pub(crate) children: Vec<Node>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentNode {
    pub fn base(&self) -> &NodeBase {
        &self.base
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// A single page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    #[serde(flatten)]
    pub(crate) base: NodeBase,

    #[serde(default)]
    pub(crate) children: Vec<Node>,

    #[serde(
        rename = "backgroundColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub background_color: Option<Color>,

    #[serde(
        rename = "exportSettings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub export_settings: Option<Vec<ExportSetting>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CanvasNode {
    pub fn base(&self) -> &NodeBase {
        &self.base
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// A node of fixed size containing other nodes.
/// Shared by FRAME, GROUP and COMPONENT nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameNode {
    #[serde(flatten)]
    pub(crate) base: NodeBase,

    #[serde(default)]
    pub(crate) children: Vec<Node>,

    #[serde(
        rename = "backgroundColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub background_color: Option<Color>,

    #[serde(
        rename = "exportSettings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub export_settings: Option<Vec<ExportSetting>>,

    #[serde(rename = "blendMode", default, skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<BlendMode>,

    /// Keep height and width constrained to the same ratio.
    #[serde(
        rename = "preserveRatio",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub preserve_ratio: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<LayoutConstraint>,

    /// Node to transition to when prototyping.
    #[serde(
        rename = "transitionNodeID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transition_node_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(
        rename = "absoluteBoundingBox",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub absolute_bounding_box: Option<Rectangle>,

    /// Only present if the file was requested with `geometry=paths`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Vector>,

    /// Only present if the file was requested with `geometry=paths`.
    #[serde(
        rename = "relativeTransform",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub relative_transform: Option<Transform>,

    #[serde(
        rename = "clipsContent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub clips_content: Option<bool>,

    /// GROUP nodes never carry layout grids.
    #[serde(
        rename = "layoutGrids",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub layout_grids: Option<Vec<LayoutGrid>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<Effect>>,

    #[serde(rename = "isMask", default, skip_serializing_if = "Option::is_none")]
    pub is_mask: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FrameNode {
    pub fn base(&self) -> &NodeBase {
        &self.base
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// A vector network.
/// Shared by VECTOR, STAR, LINE, ELLIPSE and REGULAR_POLYGON nodes, and
/// embedded in BOOLEAN, RECTANGLE and TEXT nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorNode {
    #[serde(flatten)]
    pub(crate) base: NodeBase,

    #[serde(
        rename = "exportSettings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub export_settings: Option<Vec<ExportSetting>>,

    #[serde(rename = "blendMode", default, skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<BlendMode>,

    #[serde(
        rename = "preserveRatio",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub preserve_ratio: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<LayoutConstraint>,

    #[serde(
        rename = "transitionNodeID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transition_node_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(
        rename = "absoluteBoundingBox",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub absolute_bounding_box: Option<Rectangle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Vector>,

    #[serde(
        rename = "relativeTransform",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub relative_transform: Option<Transform>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<Effect>>,

    #[serde(rename = "isMask", default, skip_serializing_if = "Option::is_none")]
    pub is_mask: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,

    /// Only present if the file was requested with `geometry=paths`.
    #[serde(
        rename = "fillGeometry",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fill_geometry: Option<Vec<Path>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<Paint>>,

    #[serde(
        rename = "strokeWeight",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stroke_weight: Option<f64>,

    /// Only present if the file was requested with `geometry=paths`.
    #[serde(
        rename = "strokeGeometry",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stroke_geometry: Option<Vec<Path>>,

    #[serde(
        rename = "strokeAlign",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stroke_align: Option<StrokeAlign>,

    /// Style ids applied to this node, keyed by what they style (`fill`,
    /// `stroke`, `text`, ...). The ids refer to the file-level style table
    /// but are not resolved here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<BTreeMap<String, String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VectorNode {
    pub fn base(&self) -> &NodeBase {
        &self.base
    }
}

/// A group with a boolean operation applied to its children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BooleanNode {
    #[serde(flatten)]
    pub vector: VectorNode,

    #[serde(default)]
    pub(crate) children: Vec<Node>,
}

impl BooleanNode {
    pub fn base(&self) -> &NodeBase {
        &self.vector.base
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectangleNode {
    #[serde(flatten)]
    pub vector: VectorNode,

    #[serde(
        rename = "cornerRadius",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub corner_radius: Option<f64>,
}

impl RectangleNode {
    pub fn base(&self) -> &NodeBase {
        &self.vector.base
    }
}

/// A text box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    #[serde(flatten)]
    pub vector: VectorNode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TypeStyle>,

    /// One entry per character, each a key into `style_override_table`.
    /// 0 means the default style.
    #[serde(
        rename = "characterStyleOverrides",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub character_style_overrides: Option<Vec<i64>>,

    #[serde(
        rename = "styleOverrideTable",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub style_override_table: Option<BTreeMap<String, TypeStyle>>,
}

impl TextNode {
    pub fn base(&self) -> &NodeBase {
        &self.vector.base
    }
}

/// A rectangular region of the canvas that can be exported.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliceNode {
    #[serde(flatten)]
    pub(crate) base: NodeBase,

    #[serde(
        rename = "exportSettings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub export_settings: Option<Vec<ExportSetting>>,

    #[serde(
        rename = "absoluteBoundingBox",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub absolute_bounding_box: Option<Rectangle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Vector>,

    #[serde(
        rename = "relativeTransform",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub relative_transform: Option<Transform>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SliceNode {
    pub fn base(&self) -> &NodeBase {
        &self.base
    }
}

/// An instance of a component. Changes to the component are applied to
/// the instance as well.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceNode {
    #[serde(flatten)]
    pub frame: FrameNode,

    /// Key into the file-level component table. Not resolved here.
    #[serde(
        rename = "componentId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub component_id: Option<String>,
}

impl InstanceNode {
    pub fn base(&self) -> &NodeBase {
        &self.frame.base
    }

    pub fn children(&self) -> &[Node] {
        &self.frame.children
    }
}

/// A node whose `type` isn't one of [NodeType::KNOWN].
/// Only the base fields are typed, everything else (including a `children`
/// key, if any) is kept as raw JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnknownNode {
    #[serde(flatten)]
    pub(crate) base: NodeBase,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UnknownNode {
    pub fn base(&self) -> &NodeBase {
        &self.base
    }
}

//! Coordinates, bounding boxes and transforms.

use serde::{Deserialize, Serialize};

/// A 2d vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

/// A bounding box in absolute coordinates. Absent coordinates are 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The top two rows of a 2d affine transform matrix.
/// The bottom row is implicitly `[0, 0, 1]`.
pub type Transform = Vec<Vec<f64>>;

/// An SVG path together with its winding rule.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Path {
    pub path: String,
    #[serde(rename = "windingRule", alias = "winding_rule")]
    pub winding_rule: String,
}

/// A position relative to the top left corner of a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameOffset {
    pub node_id: String,
    pub node_offset: Vector,
}

/// Where a comment is pinned: either an absolute canvas position or an
/// offset inside a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientMeta {
    FrameOffset(FrameOffset),
    Vector(Vector),
}

impl From<Vector> for ClientMeta {
    fn from(value: Vector) -> Self {
        ClientMeta::Vector(value)
    }
}

impl From<FrameOffset> for ClientMeta {
    fn from(value: FrameOffset) -> Self {
        ClientMeta::FrameOffset(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn client_meta_frame_offset() {
        let meta: ClientMeta = serde_json::from_value(json!({
            "node_id": "1:2",
            "node_offset": {"x": 10, "y": 20}
        }))
        .expect("must parse");

        assert_eq!(
            ClientMeta::FrameOffset(FrameOffset {
                node_id: "1:2".to_string(),
                node_offset: Vector { x: 10.0, y: 20.0 },
            }),
            meta
        );
    }

    #[test]
    fn client_meta_vector() {
        let meta: ClientMeta =
            serde_json::from_value(json!({"x": 1.5, "y": 2.5})).expect("must parse");

        assert_eq!(ClientMeta::Vector(Vector { x: 1.5, y: 2.5 }), meta);
    }

    #[test]
    fn sparse_geometry() {
        let bounds: Rectangle =
            serde_json::from_value(json!({"width": 10, "height": 20})).expect("must parse");
        assert_eq!(
            Rectangle {
                width: 10.0,
                height: 20.0,
                ..Default::default()
            },
            bounds
        );

        let path: Path = serde_json::from_value(json!({"path": "M 0 0"})).expect("must parse");
        assert_eq!("", path.winding_rule);
    }
}

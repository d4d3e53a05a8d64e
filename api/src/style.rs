//! Paint, effect, typography and layout attributes attached to nodes.
//!
//! These are payload types: the decoder carries them through verbatim and
//! never interprets them. Records the API is known to extend over time keep
//! unmodelled keys in an `extra` map, so re-encoding reproduces the input.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::geometry::Vector;

/// Generates string-valued enums whose set of values the API may grow.
///
/// Each enum gets an `Other` variant holding any string outside the listed
/// ones, verbatim, so payloads carrying values introduced later still decode
/// and re-encode unchanged.
macro_rules! wire_enums {
    (
        $(
            $(#[doc = $doc:expr])*
            $vis:vis enum $Enum:ident {
                $(
                    $(#[doc = $var_doc:expr])*
                    $Var:ident = $wire:literal,
                )+
            }
        )*
    ) => {
        $(
            $(#[doc = $doc])*
            #[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
            $vis enum $Enum {
                $(
                    $(#[doc = $var_doc])*
                    $Var,
                )+
                /// Any other value, kept as received.
                Other(String),
            }

            impl $Enum {
                pub fn as_str(&self) -> &str {
                    match self {
                        $($Enum::$Var => $wire,)+
                        $Enum::Other(s) => s.as_str(),
                    }
                }

                /// Whether the value is one of the listed ones.
                pub fn is_known(&self) -> bool {
                    !matches!(self, $Enum::Other(_))
                }
            }

            impl From<&str> for $Enum {
                fn from(s: &str) -> Self {
                    match s {
                        $($wire => $Enum::$Var,)+
                        other => $Enum::Other(other.to_string()),
                    }
                }
            }

            impl fmt::Display for $Enum {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl Serialize for $Enum {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    serializer.serialize_str(self.as_str())
                }
            }

            impl<'de> Deserialize<'de> for $Enum {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    let s = String::deserialize(deserializer)?;
                    Ok($Enum::from(s.as_str()))
                }
            }
        )*
    };
}

wire_enums! {
    /// How a layer blends with the layers below it.
    pub enum BlendMode {
        PassThrough = "PASS_THROUGH",
        Normal = "NORMAL",
        Darken = "DARKEN",
        Multiply = "MULTIPLY",
        LinearBurn = "LINEAR_BURN",
        ColorBurn = "COLOR_BURN",
        Lighten = "LIGHTEN",
        Screen = "SCREEN",
        LinearDodge = "LINEAR_DODGE",
        ColorDodge = "COLOR_DODGE",
        Overlay = "OVERLAY",
        SoftLight = "SOFT_LIGHT",
        HardLight = "HARD_LIGHT",
        Difference = "DIFFERENCE",
        Exclusion = "EXCLUSION",
        Hue = "HUE",
        Saturation = "SATURATION",
        Color = "COLOR",
        Luminosity = "LUMINOSITY",
    }

    pub enum PaintType {
        Solid = "SOLID",
        GradientLinear = "GRADIENT_LINEAR",
        GradientRadial = "GRADIENT_RADIAL",
        GradientAngular = "GRADIENT_ANGULAR",
        GradientDiamond = "GRADIENT_DIAMOND",
        Image = "IMAGE",
        Emoji = "EMOJI",
    }

    /// Image scaling mode of an [PaintType::Image] paint.
    pub enum ScaleMode {
        Fill = "FILL",
        Fit = "FIT",
        Tile = "TILE",
        Stretch = "STRETCH",
    }

    pub enum EffectType {
        InnerShadow = "INNER_SHADOW",
        DropShadow = "DROP_SHADOW",
        LayerBlur = "LAYER_BLUR",
        BackgroundBlur = "BACKGROUND_BLUR",
    }

    /// Image format of an export setting.
    pub enum ImageFormat {
        Jpg = "JPG",
        Png = "PNG",
        Svg = "SVG",
        Pdf = "PDF",
    }

    pub enum ConstraintType {
        Scale = "SCALE",
        Width = "WIDTH",
        Height = "HEIGHT",
    }

    pub enum LayoutConstraintVertical {
        Top = "TOP",
        Bottom = "BOTTOM",
        Center = "CENTER",
        TopBottom = "TOP_BOTTOM",
        Scale = "SCALE",
    }

    pub enum LayoutConstraintHorizontal {
        Left = "LEFT",
        Right = "RIGHT",
        Center = "CENTER",
        LeftRight = "LEFT_RIGHT",
        Scale = "SCALE",
    }

    pub enum LayoutGridPattern {
        Columns = "COLUMNS",
        Rows = "ROWS",
        Grid = "GRID",
    }

    pub enum LayoutGridAlignment {
        Min = "MIN",
        Max = "MAX",
        Center = "CENTER",
        Stretch = "STRETCH",
    }

    /// Where a stroke is drawn relative to the vector outline.
    pub enum StrokeAlign {
        Inside = "INSIDE",
        Outside = "OUTSIDE",
        Center = "CENTER",
    }

    /// The kind of a shared style. Keys the file-level style table.
    pub enum StyleType {
        Fill = "FILL",
        Stroke = "STROKE",
        Text = "TEXT",
        Effect = "EFFECT",
        Grid = "GRID",
    }
}

/// An RGBA color, every channel in `0.0..=1.0`. Absent channels are 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// A position on a gradient with the color anchored there.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorStop {
    pub position: f64,
    pub color: Color,
}

/// A solid color, gradient, or image texture applied as a fill or stroke.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub paint_type: Option<PaintType>,

    /// Whether the paint is enabled. Absent means enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,

    /// Overall opacity of the paint. Absent means 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    /// Start, end and width handle of a gradient, in normalized object space.
    #[serde(
        rename = "gradientHandlePositions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub gradient_handle_positions: Option<Vec<Vector>>,

    #[serde(
        rename = "gradientStops",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub gradient_stops: Option<Vec<ColorStop>>,

    #[serde(rename = "scaleMode", default, skip_serializing_if = "Option::is_none")]
    pub scale_mode: Option<ScaleMode>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A shadow or blur applied to a node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub effect_type: Option<EffectType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    #[serde(rename = "blendMode", default, skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<BlendMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Vector>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sizing constraint for exports.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub constraint_type: Option<ConstraintType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Describes one image to export from a node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ImageFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
}

/// Horizontal and vertical resizing behaviour of a node inside its parent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<LayoutConstraintVertical>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<LayoutConstraintHorizontal>,
}

/// A layout grid attached to a frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutGrid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<LayoutGridPattern>,

    #[serde(rename = "sectionSize", default, skip_serializing_if = "Option::is_none")]
    pub section_size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<LayoutGridAlignment>,

    #[serde(rename = "gutterSize", default, skip_serializing_if = "Option::is_none")]
    pub gutter_size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Font and paragraph attributes of a run of text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeStyle {
    #[serde(rename = "fontFamily", default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(
        rename = "fontPostScriptName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub font_post_script_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    #[serde(rename = "fontWeight", default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,

    #[serde(rename = "fontSize", default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,

    #[serde(
        rename = "textAlignHorizontal",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub text_align_horizontal: Option<String>,

    #[serde(
        rename = "textAlignVertical",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub text_align_vertical: Option<String>,

    #[serde(
        rename = "letterSpacing",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub letter_spacing: Option<f64>,

    #[serde(
        rename = "lineHeightPercent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub line_height_percent: Option<f64>,

    #[serde(rename = "lineHeightPx", default, skip_serializing_if = "Option::is_none")]
    pub line_height_px: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde::de::DeserializeOwned;
    use serde_json::json;

    use super::*;

    /// Decodes a value the enum doesn't list and re-encodes it.
    fn decode_unlisted<T>(wire: &str) -> (String, Value)
    where
        T: DeserializeOwned + Serialize + fmt::Debug,
    {
        let decoded: T = serde_json::from_value(json!(wire)).expect("must parse");
        let encoded = serde_json::to_value(&decoded).expect("must serialize");
        (format!("{decoded:?}"), encoded)
    }

    #[rstest]
    #[case::blend_mode(decode_unlisted::<BlendMode>)]
    #[case::paint_type(decode_unlisted::<PaintType>)]
    #[case::scale_mode(decode_unlisted::<ScaleMode>)]
    #[case::effect_type(decode_unlisted::<EffectType>)]
    #[case::image_format(decode_unlisted::<ImageFormat>)]
    #[case::constraint_type(decode_unlisted::<ConstraintType>)]
    #[case::vertical(decode_unlisted::<LayoutConstraintVertical>)]
    #[case::horizontal(decode_unlisted::<LayoutConstraintHorizontal>)]
    #[case::grid_pattern(decode_unlisted::<LayoutGridPattern>)]
    #[case::grid_alignment(decode_unlisted::<LayoutGridAlignment>)]
    #[case::stroke_align(decode_unlisted::<StrokeAlign>)]
    #[case::style_type(decode_unlisted::<StyleType>)]
    fn unlisted_values_are_kept(#[case] decode: fn(&str) -> (String, Value)) {
        let (decoded, encoded) = decode("SOMETHING_NEW");

        assert_eq!(r#"Other("SOMETHING_NEW")"#, decoded);
        assert_eq!(json!("SOMETHING_NEW"), encoded);
    }

    #[rstest]
    #[case::fill("FILL", StyleType::Fill)]
    #[case::stroke("STROKE", StyleType::Stroke)]
    #[case::text("TEXT", StyleType::Text)]
    #[case::effect("EFFECT", StyleType::Effect)]
    #[case::grid("GRID", StyleType::Grid)]
    #[case::unlisted("SHADOW", StyleType::Other("SHADOW".to_string()))]
    fn style_type_as_map_key(#[case] key: &str, #[case] expected: StyleType) {
        let styles: BTreeMap<StyleType, String> =
            serde_json::from_value(json!({ key: "1:2" })).expect("must parse");

        assert_eq!(Some(&"1:2".to_string()), styles.get(&expected));
        assert_eq!(expected.is_known(), key != "SHADOW");
        assert_eq!(json!({ key: "1:2" }), serde_json::to_value(&styles).unwrap());
    }

    /// Keys the API adds to paints must survive a decode/encode cycle.
    #[test]
    fn paint_keeps_unmodelled_keys() {
        let paint_json = json!({
            "type": "IMAGE",
            "scaleMode": "FILL",
            "imageRef": "abcdef",
            "blendMode": "NORMAL"
        });
        let paint: Paint = serde_json::from_value(paint_json.clone()).expect("must parse");

        assert_eq!(Some(PaintType::Image), paint.paint_type);
        assert_eq!(Some(ScaleMode::Fill), paint.scale_mode);
        assert_eq!(Some(&json!("abcdef")), paint.extra.get("imageRef"));
        assert_eq!(paint_json, serde_json::to_value(&paint).unwrap());
    }

    #[test]
    fn sparse_records() {
        let paint: Paint = serde_json::from_value(json!({"opacity": 0.5})).expect("must parse");
        assert_eq!(None, paint.paint_type);
        assert_eq!(Some(0.5), paint.opacity);
        assert_eq!(json!({"opacity": 0.5}), serde_json::to_value(&paint).unwrap());

        let effect: Effect = serde_json::from_value(json!({"radius": 4.0})).expect("must parse");
        assert_eq!(None, effect.effect_type);

        let setting: ExportSetting =
            serde_json::from_value(json!({"constraint": {"type": "SCALE"}})).expect("must parse");
        assert_eq!(
            ExportSetting {
                constraint: Some(Constraint {
                    constraint_type: Some(ConstraintType::Scale),
                    value: None,
                }),
                ..Default::default()
            },
            setting
        );

        let grid: LayoutGrid = serde_json::from_value(json!({})).expect("must parse");
        assert_eq!(LayoutGrid::default(), grid);

        let color: Color = serde_json::from_value(json!({"r": 1.0})).expect("must parse");
        assert_eq!(
            Color {
                r: 1.0,
                ..Default::default()
            },
            color
        );

        let stop: ColorStop = serde_json::from_value(json!({"position": 0.5})).expect("must parse");
        assert_eq!(Color::default(), stop.color);
    }

    #[test]
    fn blend_mode_wire_names() {
        assert_eq!(
            json!("PASS_THROUGH"),
            serde_json::to_value(BlendMode::PassThrough).unwrap()
        );
        assert_eq!(
            BlendMode::LinearDodge,
            serde_json::from_value(json!("LINEAR_DODGE")).unwrap()
        );
        assert_eq!("LINEAR_DODGE", BlendMode::LinearDodge.to_string());
    }
}

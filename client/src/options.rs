use figma_api::style::ImageFormat;

/// Optional parameters of a `GET files/:key` request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileOptions {
    /// Fetch this version instead of the current one.
    pub version: Option<String>,

    /// Ask for vector data (`fillGeometry`, `strokeGeometry`, `size`,
    /// `relativeTransform`) to be included.
    pub geometry_paths: bool,
}

impl FileOptions {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(version) = &self.version {
            pairs.push(("version", version.clone()));
        }
        if self.geometry_paths {
            pairs.push(("geometry", "paths".to_string()));
        }
        pairs
    }
}

/// Parameters of a `GET images/:key` request, which renders nodes of a file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageOptions {
    /// Ids of the nodes to render.
    pub ids: Vec<String>,

    /// Between 0.01 and 4.
    pub scale: Option<f64>,

    /// Sent in lowercase, the render endpoint doesn't take the uppercase
    /// names used in export settings.
    pub format: Option<ImageFormat>,

    /// Add an id attribute to every SVG element.
    pub svg_include_id: bool,

    /// Set to `Some(false)` to keep inside and outside strokes as masks
    /// instead of simplifying them into stroke attributes.
    pub svg_simplify_stroke: Option<bool>,

    /// Render this version instead of the current one.
    pub version: Option<String>,
}

impl ImageOptions {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("ids", self.ids.join(","))];
        if let Some(scale) = self.scale {
            pairs.push(("scale", scale.to_string()));
        }
        if let Some(format) = &self.format {
            pairs.push(("format", format.as_str().to_ascii_lowercase()));
        }
        pairs.push(("svg_include_id", self.svg_include_id.to_string()));
        if let Some(simplify) = self.svg_simplify_stroke {
            pairs.push(("svg_simplify_stroke", simplify.to_string()));
        }
        if let Some(version) = &self.version {
            pairs.push(("version", version.clone()));
        }
        pairs
    }
}

//! Per-instance render configuration.
//!
//! A single [`RenderConfig`] covers both the styled default view and the
//! pluggable [`NodeRenderer`] override. It is immutable for a render pass and
//! can be built in code or loaded from JSON with [`RenderConfig::from_json`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use leptos::prelude::AnyView;
use serde::Deserialize;

use super::error::ConfigError;
use super::types::{NodeData, NodeSize};

/// Tree layout direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Orientation {
	/// Left-to-right; layout axes are swapped on screen.
	Horizontal,
	/// Top-to-bottom.
	Vertical,
}

impl FromStr for Orientation {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"horizontal" => Ok(Self::Horizontal),
			"vertical" => Ok(Self::Vertical),
			other => Err(ConfigError::InvalidOrientation(other.to_string())),
		}
	}
}

impl TryFrom<String> for Orientation {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// SVG `text-anchor` for the node labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum TextAnchor {
	/// `start`
	#[default]
	Start,
	/// `middle`
	Middle,
	/// `end`
	End,
}

impl TextAnchor {
	/// The attribute value.
	pub fn as_str(&self) -> &'static str {
		match self {
			TextAnchor::Start => "start",
			TextAnchor::Middle => "middle",
			TextAnchor::End => "end",
		}
	}
}

impl FromStr for TextAnchor {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"start" => Ok(Self::Start),
			"middle" => Ok(Self::Middle),
			"end" => Ok(Self::End),
			other => Err(ConfigError::InvalidTextAnchor(other.to_string())),
		}
	}
}

impl TryFrom<String> for TextAnchor {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Inline CSS declarations, kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(pub IndexMap<String, String>);

impl StyleMap {
	/// An empty style.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds (or replaces) one declaration.
	pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
		self.0.insert(property.into(), value.into());
		self
	}

	/// Renders as an inline `style` attribute value.
	pub fn to_css(&self) -> String {
		self.0
			.iter()
			.map(|(k, v)| format!("{k}: {v};"))
			.collect::<Vec<_>>()
			.join(" ")
	}
}

/// Styles for the three visual parts of one node variant.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VariantStyle {
	/// The circle marker.
	pub circle: StyleMap,
	/// The primary label.
	pub name: StyleMap,
	/// The secondary label block.
	pub attributes: StyleMap,
}

/// Styles for nodes with children and for leaves.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeStyles {
	/// Applied while the node has rendered children.
	pub node: VariantStyle,
	/// Applied to leaves.
	pub leaf_node: VariantStyle,
}

impl NodeStyles {
	/// Picks the variant for a node.
	pub fn for_node(&self, has_children: bool) -> &VariantStyle {
		if has_children { &self.node } else { &self.leaf_node }
	}
}

/// CSS class of the node group.
pub fn node_class(has_children: bool) -> &'static str {
	if has_children { "nodeBase" } else { "leafNodeBase" }
}

/// Replaces the default label/circle content of a node.
///
/// The animated group wrapper (transform, opacity, click) is kept.
#[derive(Clone)]
pub struct NodeRenderer(Arc<dyn Fn(&NodeData) -> AnyView + Send + Sync>);

impl NodeRenderer {
	/// Wraps a render function.
	pub fn new(f: impl Fn(&NodeData) -> AnyView + Send + Sync + 'static) -> Self {
		Self(Arc::new(f))
	}

	/// Renders the content for `node`.
	pub fn render(&self, node: &NodeData) -> AnyView {
		(self.0)(node)
	}
}

impl fmt::Debug for NodeRenderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("NodeRenderer(..)")
	}
}

/// Configuration of one `TreeNode` instance.
#[derive(Clone, Debug, Deserialize)]
pub struct RenderConfig {
	/// Axis mapping.
	pub orientation: Orientation,
	/// Length of every transition, in milliseconds.
	pub transition_duration: f64,
	/// Radius of the circle marker.
	pub circle_radius: f64,
	/// Anchor for both label blocks.
	#[serde(default)]
	pub text_anchor: TextAnchor,
	/// Node and leaf styles.
	#[serde(default)]
	pub styles: NodeStyles,
	/// Slot size; when set, x is shifted back by a quarter of its width.
	#[serde(default)]
	pub node_size: Option<NodeSize>,
	/// Optional replacement for the default visuals.
	#[serde(skip)]
	pub renderer: Option<NodeRenderer>,
}

impl RenderConfig {
	/// Builds a validated configuration with default styles.
	pub fn new(
		orientation: Orientation,
		transition_duration: f64,
		circle_radius: f64,
	) -> Result<Self, ConfigError> {
		let config = Self {
			orientation,
			transition_duration,
			circle_radius,
			text_anchor: TextAnchor::default(),
			styles: NodeStyles::default(),
			node_size: None,
			renderer: None,
		};
		config.validate()?;
		Ok(config)
	}

	/// Parses and validates a JSON configuration document.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks the numeric fields.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !self.transition_duration.is_finite() || self.transition_duration < 0.0 {
			return Err(ConfigError::InvalidDuration(self.transition_duration));
		}
		if !self.circle_radius.is_finite() || self.circle_radius < 0.0 {
			return Err(ConfigError::InvalidRadius(self.circle_radius));
		}
		if let Some(NodeSize { x, y }) = self.node_size {
			if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
				return Err(ConfigError::InvalidNodeSize { x, y });
			}
		}
		Ok(())
	}

	/// Sets the text anchor.
	pub fn with_text_anchor(mut self, text_anchor: TextAnchor) -> Self {
		self.text_anchor = text_anchor;
		self
	}

	/// Sets the node and leaf styles.
	pub fn with_styles(mut self, styles: NodeStyles) -> Self {
		self.styles = styles;
		self
	}

	/// Sets the slot size, re-validating it.
	pub fn with_node_size(mut self, node_size: NodeSize) -> Result<Self, ConfigError> {
		self.node_size = Some(node_size);
		self.validate()?;
		Ok(self)
	}

	/// Installs a content override.
	pub fn with_renderer(mut self, renderer: NodeRenderer) -> Self {
		self.renderer = Some(renderer);
		self
	}
}

#[cfg(test)]
mod tests {
	use leptos::prelude::IntoAny;

	use super::*;

	#[test]
	fn parses_minimal_config() {
		let config = RenderConfig::from_json(
			r#"{ "orientation": "horizontal", "transition_duration": 500, "circle_radius": 10 }"#,
		)
		.unwrap();
		assert_eq!(config.orientation, Orientation::Horizontal);
		assert_eq!(config.transition_duration, 500.0);
		assert_eq!(config.text_anchor, TextAnchor::Start);
		assert!(config.node_size.is_none());
		assert!(config.renderer.is_none());
	}

	#[test]
	fn parses_styles_and_node_size() {
		let config = RenderConfig::from_json(
			r#"{
				"orientation": "vertical",
				"transition_duration": 0,
				"circle_radius": 4.5,
				"text_anchor": "middle",
				"node_size": { "x": 140, "y": 80 },
				"styles": {
					"leaf_node": { "circle": { "fill": "none", "stroke": "steelblue" } }
				}
			}"#,
		)
		.unwrap();
		assert_eq!(config.text_anchor, TextAnchor::Middle);
		assert_eq!(config.node_size, Some(NodeSize { x: 140.0, y: 80.0 }));
		assert_eq!(
			config.styles.leaf_node.circle.to_css(),
			"fill: none; stroke: steelblue;"
		);
		assert_eq!(config.styles.node.circle.to_css(), "");
	}

	#[test]
	fn rejects_unknown_orientation() {
		let err = RenderConfig::from_json(
			r#"{ "orientation": "diagonal", "transition_duration": 500, "circle_radius": 10 }"#,
		)
		.unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
		assert!(err.to_string().contains("diagonal"));

		assert!(matches!(
			"diagonal".parse::<Orientation>(),
			Err(ConfigError::InvalidOrientation(s)) if s == "diagonal"
		));
	}

	#[test]
	fn rejects_missing_required_fields() {
		let err = RenderConfig::from_json(r#"{ "orientation": "vertical", "circle_radius": 10 }"#)
			.unwrap_err();
		assert!(err.to_string().contains("transition_duration"));
	}

	#[test]
	fn accepts_fractional_duration() {
		let config = RenderConfig::from_json(
			r#"{ "orientation": "vertical", "transition_duration": 250.5, "circle_radius": 10 }"#,
		)
		.unwrap();
		assert_eq!(config.transition_duration, 250.5);
	}

	#[test]
	fn rejects_negative_duration() {
		let err = RenderConfig::from_json(
			r#"{ "orientation": "vertical", "transition_duration": -5, "circle_radius": 10 }"#,
		);
		assert!(matches!(err, Err(ConfigError::InvalidDuration(d)) if d == -5.0));
		assert!(matches!(
			RenderConfig::new(Orientation::Vertical, f64::INFINITY, 10.0),
			Err(ConfigError::InvalidDuration(_))
		));
	}

	#[test]
	fn rejects_bad_radius_and_node_size() {
		assert!(matches!(
			RenderConfig::new(Orientation::Vertical, 500.0, -1.0),
			Err(ConfigError::InvalidRadius(_))
		));
		assert!(matches!(
			RenderConfig::new(Orientation::Vertical, 500.0, f64::NAN),
			Err(ConfigError::InvalidRadius(_))
		));
		let config = RenderConfig::new(Orientation::Vertical, 500.0, 10.0).unwrap();
		assert!(matches!(
			config.with_node_size(NodeSize { x: -4.0, y: 10.0 }),
			Err(ConfigError::InvalidNodeSize { .. })
		));
	}

	#[test]
	fn selects_variant_by_children() {
		let styles = NodeStyles {
			node: VariantStyle {
				circle: StyleMap::new().with("fill", "#777"),
				..Default::default()
			},
			leaf_node: VariantStyle {
				circle: StyleMap::new().with("fill", "none"),
				..Default::default()
			},
		};
		assert_eq!(styles.for_node(true).circle.to_css(), "fill: #777;");
		assert_eq!(styles.for_node(false).circle.to_css(), "fill: none;");
		assert_eq!(node_class(true), "nodeBase");
		assert_eq!(node_class(false), "leafNodeBase");
	}

	#[test]
	fn renderer_is_code_only() {
		let config = RenderConfig::new(Orientation::Horizontal, 300.0, 8.0)
			.unwrap()
			.with_text_anchor(TextAnchor::End)
			.with_renderer(NodeRenderer::new(|_| ().into_any()));
		assert!(config.renderer.is_some());
		assert_eq!(format!("{:?}", config.renderer), "Some(NodeRenderer(..))");

		let err = RenderConfig::from_json(
			r#"{ "orientation": "vertical", "transition_duration": 1, "circle_radius": 1, "text_anchor": "left" }"#,
		)
		.unwrap_err();
		assert!(err.to_string().contains("left"));
	}
}

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;

/// A 2-D coordinate in tree-layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Point {
	/// Horizontal layout coordinate.
	pub x: f64,
	/// Vertical layout coordinate.
	pub y: f64,
}

impl Point {
	/// Creates a point from its coordinates.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Size of a laid-out node slot, used for the horizontal centering shift.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct NodeSize {
	/// Slot width.
	pub x: f64,
	/// Slot height.
	pub y: f64,
}

/// One laid-out tree entry, as computed by the external layout engine.
///
/// The component only reads it. `parent` is shared so a whole layout pass can
/// hand out the same parent record to every child.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NodeData {
	/// Identity, reported back on click and on exit.
	pub id: String,
	/// Primary label.
	#[serde(default)]
	pub name: String,
	/// Horizontal layout coordinate.
	pub x: f64,
	/// Vertical layout coordinate.
	pub y: f64,
	/// Parent record; transitions originate and terminate at its position.
	#[serde(default)]
	pub parent: Option<Arc<NodeData>>,
	/// Whether the node currently has rendered children.
	#[serde(default)]
	pub has_children: bool,
	/// Secondary key/value labels, displayed in insertion order.
	#[serde(default)]
	pub attributes: IndexMap<String, String>,
}

impl NodeData {
	/// Creates a childless, parentless node at `(x, y)`.
	pub fn new(id: impl Into<String>, name: impl Into<String>, x: f64, y: f64) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			x,
			y,
			..Default::default()
		}
	}

	/// Sets the parent record.
	pub fn with_parent(mut self, parent: Arc<NodeData>) -> Self {
		self.parent = Some(parent);
		self
	}

	/// Sets the children flag.
	pub fn with_children(mut self, has_children: bool) -> Self {
		self.has_children = has_children;
		self
	}

	/// Appends a secondary label.
	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(key.into(), value.into());
		self
	}

	/// The node's own position.
	pub fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}

	/// Where entry transitions start and exit transitions end: the parent's
	/// position, or the origin for a root.
	pub fn origin(&self) -> Point {
		self.parent
			.as_ref()
			.map(|p| p.position())
			.unwrap_or_default()
	}
}

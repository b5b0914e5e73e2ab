use super::types::NodeData;

/// Horizontal offset of every secondary label line.
pub const LABEL_X: &str = "10";
/// Vertical step between secondary label lines.
pub const LABEL_DY: &str = "1.2em";

/// One rendered `key: value` line of the secondary label block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelLine {
	/// List key, unique within the node. Includes the value so a changed
	/// value re-renders its line.
	pub key: String,
	/// Display text.
	pub text: String,
}

/// Lines for a node's attributes, in insertion order.
pub fn label_lines(node: &NodeData) -> Vec<LabelLine> {
	node.attributes
		.iter()
		.map(|(key, value)| LabelLine {
			key: format!("{}-{}-{}", node.id, key, value),
			text: format!("{key}: {value}"),
		})
		.collect()
}

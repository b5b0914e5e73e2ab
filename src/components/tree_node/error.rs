/// Rejected tree node configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Orientation was not `horizontal` or `vertical`.
	#[error("Invalid orientation: {0:?} (expected \"horizontal\" or \"vertical\")")]
	InvalidOrientation(String),

	/// Text anchor was not `start`, `middle` or `end`.
	#[error("Invalid text anchor: {0:?}")]
	InvalidTextAnchor(String),

	/// Transition duration was negative or not finite.
	#[error("Invalid transition duration: {0}ms")]
	InvalidDuration(f64),

	/// Circle radius was negative or not finite.
	#[error("Invalid circle radius: {0}")]
	InvalidRadius(f64),

	/// Node size had a negative or non-finite dimension.
	#[error("Invalid node size: {x}x{y}")]
	InvalidNodeSize {
		/// Offending width.
		x: f64,
		/// Offending height.
		y: f64,
	},

	/// Configuration document could not be parsed.
	#[error("Failed to parse render config: {0}")]
	Parse(#[from] serde_json::Error),
}

use std::fmt;

use super::config::Orientation;
use super::types::{NodeSize, Point};

/// An SVG `translate(x,y)` in screen axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Translate {
	/// Screen x.
	pub x: f64,
	/// Screen y.
	pub y: f64,
}

impl Translate {
	/// Linear interpolation, `t` in `[0, 1]`.
	pub fn lerp(self, to: Translate, t: f64) -> Translate {
		Translate {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
		}
	}
}

impl fmt::Display for Translate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "translate({},{})", self.x, self.y)
	}
}

/// Maps a layout position to its on-screen translation.
///
/// With a node size, x is pulled back by a quarter of the slot width. y is
/// not adjusted.
pub fn translate_for(
	point: Point,
	orientation: Orientation,
	node_size: Option<NodeSize>,
) -> Translate {
	let mut x = point.x;
	if let Some(size) = node_size {
		x -= size.x / 4.0;
	}
	match orientation {
		Orientation::Horizontal => Translate { x: point.y, y: x },
		Orientation::Vertical => Translate { x, y: point.y },
	}
}

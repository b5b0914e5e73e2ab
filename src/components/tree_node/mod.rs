mod animation;
mod component;
mod config;
mod driver;
mod error;
mod labels;
mod transform;
mod types;

pub use animation::{Completion, Frame, NodeAnimator, Step};
pub use component::{TreeNode, TreeNodeProps};
pub use config::{
	NodeRenderer, NodeStyles, Orientation, RenderConfig, StyleMap, TextAnchor, VariantStyle,
	node_class,
};
pub use error::ConfigError;
pub use labels::{LABEL_DY, LABEL_X, LabelLine, label_lines};
pub use transform::{Translate, translate_for};
pub use types::{NodeData, NodeSize, Point};

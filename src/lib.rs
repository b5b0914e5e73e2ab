//! Animated SVG tree-diagram node for Leptos, plus a demo app.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
mod pages;

// Top-Level pages
use crate::pages::custom::Custom;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

pub use crate::components::tree_node::{
	Completion, ConfigError, Frame, LABEL_DY, LABEL_X, LabelLine, NodeAnimator, NodeData,
	NodeRenderer, NodeSize, NodeStyles, Orientation, Point, RenderConfig, Step, StyleMap, TextAnchor,
	Translate, TreeNode, TreeNodeProps, VariantStyle, label_lines, node_class, translate_for,
};

/// Default classes used by [`TreeNode`].
pub const TREE_NODE_CSS: &str = include_str!("../style/tree_node.css");

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the tree demo and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Tree Node" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Style>{TREE_NODE_CSS}</Style>

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/custom") view=Custom />
			</Routes>
		</Router>
	}
}

use leptos::prelude::*;

use crate::components::tree_node::{NodeData, NodeRenderer};
use crate::pages::home::{DemoTree, demo_config};

/// Draws a node as a labelled card instead of circle and text.
fn card(node: &NodeData) -> AnyView {
	let fill = if node.has_children { "#4f7fbf" } else { "#ffffff" };
	let lines = node.attributes.len();
	view! {
		<rect x="-12" y="-12" width="120" height=(28 + 14 * lines).to_string() rx="4" fill=fill stroke="#2c4a73" />
		<text x="0" y="4" class="nodeNameBase">{node.name.clone()}</text>
	}
	.into_any()
}

/// Same demo tree, drawn through a custom renderer.
#[component]
pub fn Custom() -> impl IntoView {
	let config = demo_config().map(|config| config.with_renderer(NodeRenderer::new(card)));

	view! {
		<div class="tree-demo">
			<h1>"Custom node renderer"</h1>
			{config.map(|config| view! { <DemoTree config=config /> })}
		</div>
	}
}

use std::collections::HashSet;
use std::sync::Arc;

use leptos::prelude::*;
use log::info;

use crate::components::tree_node::{ConfigError, NodeData, RenderConfig, TreeNode};

/// One entry of the sample tree, with fixed layout coordinates.
struct SampleNode {
	id: &'static str,
	name: &'static str,
	x: f64,
	y: f64,
	parent: Option<&'static str>,
	attributes: &'static [(&'static str, &'static str)],
}

const SAMPLE_TREE: &[SampleNode] = &[
	SampleNode {
		id: "root",
		name: "CEO",
		x: 300.0,
		y: 40.0,
		parent: None,
		attributes: &[("department", "Board")],
	},
	SampleNode {
		id: "eng",
		name: "Engineering",
		x: 150.0,
		y: 170.0,
		parent: Some("root"),
		attributes: &[("headcount", "42"), ("floor", "3")],
	},
	SampleNode {
		id: "ops",
		name: "Operations",
		x: 450.0,
		y: 170.0,
		parent: Some("root"),
		attributes: &[("headcount", "12")],
	},
	SampleNode {
		id: "web",
		name: "Web",
		x: 75.0,
		y: 300.0,
		parent: Some("eng"),
		attributes: &[("lead", "Kim")],
	},
	SampleNode {
		id: "infra",
		name: "Infrastructure",
		x: 225.0,
		y: 300.0,
		parent: Some("eng"),
		attributes: &[],
	},
	SampleNode {
		id: "support",
		name: "Support",
		x: 450.0,
		y: 300.0,
		parent: Some("ops"),
		attributes: &[("shift", "24/7")],
	},
];

fn sample(id: &str) -> Option<&'static SampleNode> {
	SAMPLE_TREE.iter().find(|n| n.id == id)
}

fn children_of(id: &str) -> impl Iterator<Item = &'static SampleNode> + '_ {
	SAMPLE_TREE.iter().filter(move |n| n.parent == Some(id))
}

/// Ids of the nodes shown when `collapsed` nodes hide their subtrees,
/// parents before children.
fn visible_ids(collapsed: &HashSet<String>) -> Vec<String> {
	let mut out = Vec::new();
	let mut stack = vec!["root"];
	while let Some(id) = stack.pop() {
		out.push(id.to_string());
		if !collapsed.contains(id) {
			let kids: Vec<_> = children_of(id).map(|n| n.id).collect();
			stack.extend(kids.into_iter().rev());
		}
	}
	out
}

/// Layout record for `id`, shifted right by `offset`.
fn node_data(id: &str, collapsed: &HashSet<String>, offset: f64) -> NodeData {
	let Some(entry) = sample(id) else {
		return NodeData::default();
	};
	let mut data = NodeData::new(entry.id, entry.name, entry.x + offset, entry.y)
		.with_children(!collapsed.contains(id) && children_of(id).next().is_some());
	for &(k, v) in entry.attributes {
		data = data.with_attribute(k, v);
	}
	if let Some(parent) = entry.parent {
		data = data.with_parent(Arc::new(node_data(parent, collapsed, offset)));
	}
	data
}

pub(crate) fn demo_config() -> Result<RenderConfig, ConfigError> {
	RenderConfig::from_json(include_str!("../../assets/demo_config.json"))
}

/// A mounted node; `key` changes when the same id is mounted again.
#[derive(Clone, Debug, PartialEq)]
struct Mounted {
	id: String,
	key: u64,
}

#[component]
pub(crate) fn DemoTree(config: RenderConfig) -> impl IntoView {
	let next_key = StoredValue::new(0_u64);
	let mount = move |id: String| {
		let key = next_key.get_value();
		next_key.set_value(key + 1);
		Mounted { id, key }
	};

	let collapsed = RwSignal::new(HashSet::<String>::new());
	let mounted = RwSignal::new(
		visible_ids(&HashSet::new())
			.into_iter()
			.map(mount)
			.collect::<Vec<_>>(),
	);
	let leaving = RwSignal::new(HashSet::<String>::new());
	let offset = RwSignal::new(0.0_f64);

	let toggle = move |id: String| {
		if children_of(&id).next().is_none() {
			return;
		}
		collapsed.update(|c| {
			if !c.remove(&id) {
				c.insert(id.clone());
			}
		});
		let visible = collapsed.with_untracked(visible_ids);
		info!("Toggled {}; {} nodes visible", id, visible.len());

		leaving.update(|l| {
			mounted.with_untracked(|m| {
				for entry in m.iter().filter(|e| !visible.contains(&e.id)) {
					l.insert(entry.id.clone());
				}
			})
		});
		mounted.update(|m| {
			for v in visible {
				if !m.iter().any(|e| e.id == v) {
					m.push(mount(v));
				}
			}
		});
	};

	let on_exit = move |id: String| {
		leaving.update(|l| {
			l.remove(&id);
		});
		mounted.update(|m| {
			m.retain(|e| e.id != id);
			// Expanded again while it was leaving.
			if collapsed.with_untracked(visible_ids).contains(&id) {
				m.push(mount(id));
			}
		});
	};

	view! {
		<div class="tree-demo-toolbar">
			<button on:click=move |_| offset.update(|o| *o += 40.0)>"Shift right"</button>
			<button on:click=move |_| offset.set(0.0)>"Reset"</button>
		</div>
		<svg width="100%" height="440">
			<g transform="translate(40,20)">
				<For
					each=move || mounted.get()
					key=|entry: &Mounted| (entry.id.clone(), entry.key)
					children=move |entry: Mounted| {
						let (node_id, leave_id) = (entry.id.clone(), entry.id);
						let node = Signal::derive(move || {
							collapsed.with(|c| node_data(&node_id, c, offset.get()))
						});
						let is_leaving =
							Signal::derive(move || Some(leaving.with(|l| l.contains(&leave_id))));
						view! {
							<TreeNode
								node=node
								config=config.clone()
								on_click=toggle
								leaving=is_leaving
								on_exit=on_exit
							/>
						}
					}
				/>
			</g>
		</svg>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="tree-demo">
				<h1>"Tree Node"</h1>
				<p class="subtitle">"Click a node to collapse or expand it. Shift moves every node."</p>
				{demo_config().map(|config| view! { <DemoTree config=config /> })}
			</div>
		</ErrorBoundary>
	}
}

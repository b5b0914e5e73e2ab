use std::sync::atomic::Ordering;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, SvgElement};

use super::animation::{Completion, NodeAnimator};
use super::config::{RenderConfig, StyleMap, VariantStyle, node_class};
use super::driver::AnimationDriver;
use super::labels::{LABEL_X, LABEL_DY, LabelLine, label_lines};
use super::transform::translate_for;
use super::types::{NodeData, Point};

/// Hands the node's id to a click handler.
pub(crate) fn dispatch_click(node: &NodeData, handler: impl FnOnce(String)) {
	debug!("Node {} clicked", node.id);
	handler(node.id.clone());
}

/// One tree node rendered as an animated SVG group.
///
/// On mount the group appears at its parent's position, invisible, and
/// moves to its own position while fading in. Later coordinate changes move
/// it again; a change that arrives mid-transition takes over from the current
/// frame. Setting `leaving` moves it back to the parent while fading out,
/// and `on_exit` is called with the node id once that has finished.
#[component]
pub fn TreeNode(
	/// The laid-out node.
	#[prop(into)]
	node: Signal<NodeData>,
	/// Orientation, timing and styles.
	config: RenderConfig,
	/// Called with the node id when the group is clicked.
	#[prop(into)]
	on_click: Callback<String>,
	/// Starts the exit transition when it becomes true.
	#[prop(optional, into)]
	leaving: MaybeProp<bool>,
	/// Called with the node id after the exit transition has ended.
	#[prop(optional, into)]
	on_exit: Option<Callback<String>>,
) -> impl IntoView {
	let node_ref = NodeRef::<leptos::svg::G>::new();
	let (orientation, node_size) = (config.orientation, config.node_size);
	let to_screen = move |p: Point| translate_for(p, orientation, node_size);

	let origin = node.with_untracked(|n| to_screen(n.origin()));
	let driver = AnimationDriver::new(NodeAnimator::new(origin, config.transition_duration));
	let disposed = driver.disposed_flag();
	on_cleanup(move || disposed.store(true, Ordering::Relaxed));

	// Entry and coordinate updates.
	let driver_move = driver.clone();
	Effect::new(move |_| {
		let (id, target) = node.with(|n| (n.id.clone(), to_screen(n.position())));
		let Some(g) = node_ref.get() else {
			return;
		};
		driver_move.attach(g.unchecked_into::<SvgElement>());
		if driver_move.animate_to(target) {
			debug!("Node {} moving to {}", id, target);
		}
	});

	// Exit.
	let driver_exit = driver.clone();
	Effect::new(move |_| {
		if !leaving.get().unwrap_or(false) {
			return;
		}
		let (id, target) = node.with_untracked(|n| (n.id.clone(), to_screen(n.origin())));
		let exit_id = id.clone();
		let done: Completion = Box::new(move || {
			debug!("Node {} exit finished", exit_id);
			if let Some(on_exit) = on_exit {
				on_exit.run(exit_id);
			}
		});
		if driver_exit.leave(target, done) {
			debug!("Node {} leaving toward {}", id, target);
		}
	});

	let handle_click =
		move |_: MouseEvent| node.with_untracked(|n| dispatch_click(n, |id| on_click.run(id)));

	let content = match config.renderer.clone() {
		Some(renderer) => (move || renderer.render(&node.get())).into_any(),
		None => view! { <NodeContent node=node config=config /> }.into_any(),
	};

	view! {
		<g
			node_ref=node_ref
			id=move || node.with(|n| n.id.clone())
			class=move || node_class(node.with(|n| n.has_children))
			transform=origin.to_string()
			style="opacity: 0;"
			on:click=handle_click
		>
			{content}
		</g>
	}
}

#[component]
fn NodeContent(node: Signal<NodeData>, config: RenderConfig) -> impl IntoView {
	let anchor = config.text_anchor.as_str();
	let radius = config.circle_radius.to_string();
	let styles = StoredValue::new(config.styles);
	let part_css = move |part: fn(&VariantStyle) -> &StyleMap| {
		let has_children = node.with(|n| n.has_children);
		styles.with_value(|s| part(s.for_node(has_children)).to_css())
	};

	view! {
		<text
			class="nodeNameBase primaryLabelBase"
			text-anchor=anchor
			style=move || part_css(|v| &v.name)
			x="10"
			y="-10"
			dy=".35em"
		>
			{move || node.with(|n| n.name.clone())}
		</text>

		<circle r=radius style=move || part_css(|v| &v.circle) />

		<text
			class="nodeAttributesBase secondaryLabelsBase"
			y="0"
			text-anchor=anchor
			style=move || part_css(|v| &v.attributes)
		>
			<For
				each=move || node.with(label_lines)
				key=|line: &LabelLine| line.key.clone()
				children=|line: LabelLine| {
					view! {
						<tspan x=LABEL_X dy=LABEL_DY>
							{line.text}
						</tspan>
					}
				}
			/>
		</text>
	}
}


#[cfg(all(test, target_arch = "wasm32"))]
mod web_tests {
	use std::sync::{Arc, Mutex};

	use gloo_timers::future::TimeoutFuture;
	use leptos::mount::mount_to;
	use wasm_bindgen_test::*;
	use web_sys::{Element, HtmlElement, MouseEventInit};

	use super::*;
	use crate::components::tree_node::config::Orientation;

	wasm_bindgen_test_configure!(run_in_browser);

	type Calls = Arc<Mutex<Vec<String>>>;

	fn recorder(calls: &Calls) -> Callback<String> {
		let calls = calls.clone();
		Callback::new(move |id: String| calls.lock().unwrap().push(id))
	}

	fn sample_node() -> NodeData {
		let parent = Arc::new(NodeData::new("root", "Root", 10.0, 20.0));
		NodeData::new("n1", "Child", 100.0, 50.0)
			.with_parent(parent)
			.with_attribute("age", "5")
			.with_attribute("size", "large")
	}

	/// Mounts one node inside an `<svg>` in a fresh container.
	fn mount_node(
		node: RwSignal<NodeData>,
		leaving: RwSignal<bool>,
		duration_ms: f64,
		clicks: &Calls,
		exits: &Calls,
	) -> HtmlElement {
		let document = web_sys::window().unwrap().document().unwrap();
		let root: HtmlElement = document.create_element("div").unwrap().unchecked_into();
		document.body().unwrap().append_child(&root).unwrap();

		let config = RenderConfig::new(Orientation::Vertical, duration_ms, 6.0).unwrap();
		let (on_click, on_exit) = (recorder(clicks), recorder(exits));
		let handle = mount_to(root.clone(), move || {
			view! {
				<svg>
					<TreeNode
						node=node
						config=config
						on_click=on_click
						leaving=Signal::derive(move || Some(leaving.get()))
						on_exit=on_exit
					/>
				</svg>
			}
		});
		std::mem::forget(handle);
		root
	}

	fn group(root: &HtmlElement) -> SvgElement {
		root.query_selector("g#n1")
			.unwrap()
			.expect("node group")
			.unchecked_into()
	}

	fn opacity(root: &HtmlElement) -> String {
		group(root).style().get_property_value("opacity").unwrap()
	}

	fn label_spans(root: &HtmlElement) -> Vec<Element> {
		let list = root.query_selector_all("tspan").unwrap();
		(0..list.length())
			.filter_map(|i| list.get(i))
			.map(|n| n.unchecked_into())
			.collect()
	}

	#[wasm_bindgen_test]
	fn mounts_hidden_at_parent_with_labels() {
		let (clicks, exits) = (Calls::default(), Calls::default());
		let node = RwSignal::new(sample_node());
		let root = mount_node(node, RwSignal::new(false), 200.0, &clicks, &exits);

		let g = group(&root);
		assert_eq!(g.get_attribute("transform").as_deref(), Some("translate(10,20)"));
		assert_eq!(opacity(&root), "0");
		assert_eq!(g.get_attribute("class").as_deref(), Some("leafNodeBase"));

		let spans = label_spans(&root);
		assert_eq!(spans.len(), 2);
		for span in &spans {
			assert_eq!(span.get_attribute("x").as_deref(), Some("10"));
			assert_eq!(span.get_attribute("dy").as_deref(), Some("1.2em"));
		}
		assert_eq!(spans[0].text_content().as_deref(), Some("age: 5"));
		assert_eq!(spans[1].text_content().as_deref(), Some("size: large"));
	}

	#[wasm_bindgen_test]
	fn click_on_group_reports_id_once() {
		let (clicks, exits) = (Calls::default(), Calls::default());
		let root = mount_node(
			RwSignal::new(sample_node()),
			RwSignal::new(false),
			200.0,
			&clicks,
			&exits,
		);

		let init = MouseEventInit::new();
		init.set_bubbles(true);
		let click = MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap();
		group(&root).dispatch_event(&click).unwrap();

		assert_eq!(*clicks.lock().unwrap(), vec!["n1".to_string()]);
		assert!(exits.lock().unwrap().is_empty());
	}

	#[wasm_bindgen_test]
	async fn settles_then_exits_before_reporting() {
		let (clicks, exits) = (Calls::default(), Calls::default());
		let leaving = RwSignal::new(false);
		let root = mount_node(RwSignal::new(sample_node()), leaving, 200.0, &clicks, &exits);

		TimeoutFuture::new(500).await;
		assert_eq!(
			group(&root).get_attribute("transform").as_deref(),
			Some("translate(100,50)")
		);
		assert_eq!(opacity(&root), "1");

		leaving.set(true);
		TimeoutFuture::new(50).await;
		assert!(exits.lock().unwrap().is_empty());
		let mid: f64 = opacity(&root).parse().unwrap();
		assert!(mid > 0.0);

		TimeoutFuture::new(500).await;
		assert_eq!(*exits.lock().unwrap(), vec!["n1".to_string()]);
		assert_eq!(
			group(&root).get_attribute("transform").as_deref(),
			Some("translate(10,20)")
		);
		assert_eq!(opacity(&root), "0");
	}

	#[wasm_bindgen_test]
	async fn changed_label_value_rerenders_line() {
		let (clicks, exits) = (Calls::default(), Calls::default());
		let node = RwSignal::new(sample_node());
		let root = mount_node(node, RwSignal::new(false), 0.0, &clicks, &exits);

		node.update(|n| {
			n.attributes.insert("age".into(), "6".into());
		});
		TimeoutFuture::new(50).await;

		let spans = label_spans(&root);
		assert_eq!(spans.len(), 2);
		assert_eq!(spans[0].text_content().as_deref(), Some("age: 6"));
		assert_eq!(spans[1].text_content().as_deref(), Some("size: large"));
	}
}

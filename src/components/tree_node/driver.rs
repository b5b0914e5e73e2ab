use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{trace, warn};
use wasm_bindgen::prelude::*;
use web_sys::SvgElement;

use super::animation::{Completion, Frame, NodeAnimator};
use super::transform::Translate;

/// Drives a [`NodeAnimator`] from `requestAnimationFrame` and writes its
/// frames to the node's `<g>` element.
///
/// The loop only runs while a transition is in flight. While a frame is
/// pending the driver keeps itself alive, so the callback is never invoked
/// after being dropped.
pub struct AnimationDriver {
	animator: RefCell<NodeAnimator>,
	element: RefCell<Option<SvgElement>>,
	callback: Closure<dyn FnMut(f64)>,
	pending: RefCell<Option<Rc<AnimationDriver>>>,
	last_ts: Cell<Option<f64>>,
	disposed: Arc<AtomicBool>,
}

impl AnimationDriver {
	pub fn new(animator: NodeAnimator) -> Rc<Self> {
		Rc::new_cyclic(|weak: &Weak<Self>| {
			let weak = weak.clone();
			Self {
				animator: RefCell::new(animator),
				element: RefCell::new(None),
				callback: Closure::new(move |ts: f64| {
					if let Some(driver) = weak.upgrade() {
						driver.on_frame(ts);
					}
				}),
				pending: RefCell::new(None),
				last_ts: Cell::new(None),
				disposed: Arc::new(AtomicBool::new(false)),
			}
		})
	}

	/// Flag that stops the loop at its next frame. Safe to set from a cleanup
	/// hook.
	pub fn disposed_flag(&self) -> Arc<AtomicBool> {
		self.disposed.clone()
	}

	pub fn attach(&self, element: SvgElement) {
		let mut slot = self.element.borrow_mut();
		if slot.is_none() {
			*slot = Some(element);
		}
	}

	pub fn animate_to(self: &Rc<Self>, transform: Translate) -> bool {
		let started = self.animator.borrow_mut().animate_to(transform);
		if started {
			self.schedule();
		}
		started
	}

	pub fn leave(self: &Rc<Self>, transform: Translate, done: Completion) -> bool {
		let started = self.animator.borrow_mut().leave(transform, done);
		if started {
			self.schedule();
		}
		started
	}

	fn schedule(self: &Rc<Self>) {
		if self.pending.borrow().is_some() || self.disposed.load(Ordering::Relaxed) {
			return;
		}
		let Some(window) = web_sys::window() else {
			warn!("No window; transition frames cannot be scheduled");
			return;
		};
		match window.request_animation_frame(self.callback.as_ref().unchecked_ref::<js_sys::Function>()) {
			Ok(_) => *self.pending.borrow_mut() = Some(self.clone()),
			Err(err) => warn!("requestAnimationFrame failed: {:?}", err),
		}
	}

	fn on_frame(&self, ts: f64) {
		// Held until this frame is done; dropped if nothing reschedules.
		let Some(this) = self.pending.borrow_mut().take() else {
			return;
		};
		if self.disposed.load(Ordering::Relaxed) {
			self.animator.borrow_mut().cancel();
			return;
		}

		let dt = self.last_ts.get().map_or(0.0, |last| ts - last);
		let step = self.animator.borrow_mut().advance(dt);
		trace!("node frame {} opacity {:.3}", step.frame.transform, step.frame.opacity);
		self.apply(step.frame);

		if step.running {
			self.last_ts.set(Some(ts));
			this.schedule();
		} else {
			self.last_ts.set(None);
		}
		if let Some(done) = step.finished {
			done();
		}
	}

	fn apply(&self, frame: Frame) {
		let element = self.element.borrow();
		let Some(el) = element.as_ref() else {
			return;
		};
		if let Err(err) = el.set_attribute("transform", &frame.transform.to_string()) {
			warn!("Failed to set node transform: {:?}", err);
		}
		if let Err(err) = el.style().set_property("opacity", &frame.opacity.to_string()) {
			warn!("Failed to set node opacity: {:?}", err);
		}
	}
}

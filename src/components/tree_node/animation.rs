//! Per-node transition state.
//!
//! [`NodeAnimator`] owns at most one running [`Transition`]. Starting a new one
//! replaces the old from wherever it had got to, so the last target wins. It
//! does not know about the DOM: the caller feeds it elapsed time and applies
//! the returned frame.

use super::transform::Translate;

/// Fired once when an exit transition ends.
pub type Completion = Box<dyn FnOnce()>;

/// What gets written to the node group on each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
	/// Group transform.
	pub transform: Translate,
	/// Group opacity.
	pub opacity: f64,
}

impl Frame {
	/// Fully visible at `transform`.
	pub const fn visible(transform: Translate) -> Self {
		Self {
			transform,
			opacity: 1.0,
		}
	}

	/// Invisible at `transform`.
	pub const fn hidden(transform: Translate) -> Self {
		Self {
			transform,
			opacity: 0.0,
		}
	}

	fn lerp(self, to: Frame, t: f64) -> Frame {
		Frame {
			transform: self.transform.lerp(to.transform, t),
			opacity: self.opacity + (to.opacity - self.opacity) * t,
		}
	}
}

fn ease_in_out_cubic(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// One timed move from `from` to `to`.
pub struct Transition {
	from: Frame,
	to: Frame,
	duration_ms: f64,
	elapsed_ms: f64,
	on_end: Option<Completion>,
}

impl Transition {
	fn new(from: Frame, to: Frame, duration_ms: f64, on_end: Option<Completion>) -> Self {
		Self {
			from,
			to,
			duration_ms,
			elapsed_ms: 0.0,
			on_end,
		}
	}

	fn progress(&self) -> f64 {
		if self.duration_ms <= 0.0 {
			1.0
		} else {
			(self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
		}
	}

	fn sample(&self) -> Frame {
		let t = self.progress();
		if t >= 1.0 {
			self.to
		} else {
			self.from.lerp(self.to, ease_in_out_cubic(t))
		}
	}
}

/// Result of [`NodeAnimator::advance`].
pub struct Step {
	/// Frame to render.
	pub frame: Frame,
	/// Whether another frame is needed.
	pub running: bool,
	/// Completion of a transition that ended on this step. The caller runs it
	/// after it is done with the animator.
	pub finished: Option<Completion>,
}

/// The animation task owned by one node instance.
pub struct NodeAnimator {
	frame: Frame,
	target: Frame,
	duration_ms: f64,
	active: Option<Transition>,
	leaving: bool,
}

impl NodeAnimator {
	/// Starts hidden at `origin`.
	pub fn new(origin: Translate, duration_ms: f64) -> Self {
		let frame = Frame::hidden(origin);
		Self {
			frame,
			target: frame,
			duration_ms,
			active: None,
			leaving: false,
		}
	}

	/// The frame last produced.
	pub fn frame(&self) -> Frame {
		self.frame
	}

	/// Whether a transition is in flight.
	pub fn is_running(&self) -> bool {
		self.active.is_some()
	}

	/// Whether the exit transition has been started.
	pub fn is_leaving(&self) -> bool {
		self.leaving
	}

	/// Moves to `transform` at full opacity.
	///
	/// Returns `false` when nothing changed: the node is already at (or
	/// heading to) that target, or it is leaving.
	pub fn animate_to(&mut self, transform: Translate) -> bool {
		if self.leaving {
			return false;
		}
		let to = Frame::visible(transform);
		if to == self.target {
			return false;
		}
		self.start(to, None);
		true
	}

	/// Moves to `transform` while fading out, then runs `done`.
	///
	/// Only the first call has an effect.
	pub fn leave(&mut self, transform: Translate, done: Completion) -> bool {
		if self.leaving {
			return false;
		}
		self.leaving = true;
		self.start(Frame::hidden(transform), Some(done));
		true
	}

	fn start(&mut self, to: Frame, on_end: Option<Completion>) {
		self.target = to;
		self.active = Some(Transition::new(self.frame, to, self.duration_ms, on_end));
	}

	/// Drops the running transition without running its completion.
	pub fn cancel(&mut self) -> bool {
		self.active.take().is_some()
	}

	/// Advances the running transition by `dt_ms`.
	pub fn advance(&mut self, dt_ms: f64) -> Step {
		let Some(transition) = self.active.as_mut() else {
			return Step {
				frame: self.frame,
				running: false,
				finished: None,
			};
		};
		transition.elapsed_ms += dt_ms.max(0.0);
		self.frame = transition.sample();

		if transition.progress() < 1.0 {
			return Step {
				frame: self.frame,
				running: true,
				finished: None,
			};
		}
		let finished = self.active.take().and_then(|t| t.on_end);
		Step {
			frame: self.frame,
			running: false,
			finished,
		}
	}
}

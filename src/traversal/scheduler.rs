//! Timed, cancellable replay of a [`VisitRecord`].
//!
//! A replay is a chain of deferred steps on a single-threaded event loop.
//! Step `i` is only scheduled once step `i - 1` has returned, and every step
//! re-checks the shared [`ReplayPhase`] before doing anything, so a cancelled
//! replay stops at its next pending step.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use log::trace;

use super::engine::VisitRecord;

/// Delay between highlight steps when nothing else is configured.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(500);

/// A deferred task.
pub type Task = Box<dyn FnOnce()>;

/// Something that can run a task later on the current thread.
pub trait Timer {
	/// Runs `task` after roughly `delay`.
	fn defer(&self, delay: Duration, task: Task);
}

/// Browser timer backed by `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
	fn defer(&self, delay: Duration, task: Task) {
		leptos::prelude::set_timeout(task, delay);
	}
}

/// Replay pacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayConfig {
	/// Pause after each highlighted vertex.
	pub step_delay: Duration,
}

impl Default for ReplayConfig {
	fn default() -> Self {
		Self {
			step_delay: DEFAULT_STEP_DELAY,
		}
	}
}

/// Lifecycle of one replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReplayPhase {
	/// Created, nothing scheduled yet.
	#[default]
	Idle,
	/// The step for this record index is pending.
	Running(usize),
	/// Stopped before completion.
	Cancelled,
	/// Every vertex was visited and the completion callback ran.
	Completed,
}

/// Shared view of a replay; cancelling any clone cancels the replay.
#[derive(Clone, Debug, Default)]
pub struct ReplayHandle {
	phase: Rc<Cell<ReplayPhase>>,
}

impl ReplayHandle {
	/// Where the replay is now.
	pub fn phase(&self) -> ReplayPhase {
		self.phase.get()
	}

	/// Still has steps to deliver.
	pub fn is_active(&self) -> bool {
		matches!(self.phase(), ReplayPhase::Idle | ReplayPhase::Running(_))
	}

	/// Prevents every pending step from firing. No-op once finished.
	pub fn cancel(&self) {
		if self.is_active() {
			self.phase.set(ReplayPhase::Cancelled);
		}
	}
}

struct Replay<T> {
	record: VisitRecord,
	handle: ReplayHandle,
	timer: Rc<T>,
	step_delay: Duration,
	on_visit: RefCell<Box<dyn FnMut(&str)>>,
	on_complete: RefCell<Option<Box<dyn FnOnce(VisitRecord)>>>,
}

fn schedule_step<T: Timer + 'static>(replay: Rc<Replay<T>>, index: usize, delay: Duration) {
	let timer = replay.timer.clone();
	timer.defer(delay, Box::new(move || run_step(&replay, index)));
}

fn run_step<T: Timer + 'static>(replay: &Rc<Replay<T>>, index: usize) {
	if replay.handle.phase() != ReplayPhase::Running(index) {
		trace!("stale replay step {index} skipped ({:?})", replay.handle.phase());
		return;
	}

	let Some(vertex) = replay.record.get(index) else {
		replay.handle.phase.set(ReplayPhase::Completed);
		if let Some(on_complete) = replay.on_complete.borrow_mut().take() {
			on_complete(replay.record.clone());
		}
		return;
	};

	{
		let mut on_visit = replay.on_visit.borrow_mut();
		(*on_visit)(vertex.as_str());
	}

	// The callback may have cancelled us.
	if replay.handle.phase() == ReplayPhase::Running(index) {
		replay.handle.phase.set(ReplayPhase::Running(index + 1));
		schedule_step(replay.clone(), index + 1, replay.step_delay);
	}
}

/// Owns the replay in flight; starting a new one cancels the old one.
pub struct StepScheduler<T> {
	timer: Rc<T>,
	config: ReplayConfig,
	current: Option<ReplayHandle>,
}

impl<T: Timer + 'static> StepScheduler<T> {
	/// Scheduler with nothing in flight.
	pub fn new(timer: T, config: ReplayConfig) -> Self {
		Self {
			timer: Rc::new(timer),
			config,
			current: None,
		}
	}

	/// Cancels the current replay, then schedules `record` from its first
	/// vertex. The first step is deferred with no delay; each later step and
	/// the completion callback follow `step_delay` after the previous step.
	pub fn start(
		&mut self,
		record: VisitRecord,
		on_visit: impl FnMut(&str) + 'static,
		on_complete: impl FnOnce(VisitRecord) + 'static,
	) -> ReplayHandle {
		self.cancel();

		let handle = ReplayHandle::default();
		handle.phase.set(ReplayPhase::Running(0));
		let replay = Rc::new(Replay {
			record,
			handle: handle.clone(),
			timer: self.timer.clone(),
			step_delay: self.config.step_delay,
			on_visit: RefCell::new(Box::new(on_visit)),
			on_complete: RefCell::new(Some(Box::new(on_complete))),
		});
		schedule_step(replay, 0, Duration::ZERO);

		self.current = Some(handle.clone());
		handle
	}

	/// Cancels the replay in flight, if any.
	pub fn cancel(&mut self) {
		if let Some(handle) = self.current.take() {
			handle.cancel();
		}
	}

	/// Whether the latest replay still has steps to deliver.
	pub fn is_active(&self) -> bool {
		self.current.as_ref().is_some_and(ReplayHandle::is_active)
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use std::cell::RefCell;
	use std::collections::VecDeque;
	use std::rc::Rc;
	use std::time::Duration;

	use super::{Task, Timer};

	/// Timer that queues tasks until the test fires them.
	#[derive(Clone, Default)]
	pub(crate) struct ManualTimer {
		queue: Rc<RefCell<VecDeque<(Duration, Task)>>>,
	}

	impl ManualTimer {
		pub(crate) fn pending(&self) -> usize {
			self.queue.borrow().len()
		}

		/// Delays of the queued tasks, oldest first.
		pub(crate) fn delays(&self) -> Vec<Duration> {
			self.queue.borrow().iter().map(|(delay, _)| *delay).collect()
		}

		/// Runs the oldest queued task. Returns false when idle.
		pub(crate) fn fire_next(&self) -> bool {
			let task = self.queue.borrow_mut().pop_front();
			match task {
				Some((_, task)) => {
					task();
					true
				}
				None => false,
			}
		}

		pub(crate) fn fire(&self, steps: usize) {
			for _ in 0..steps {
				self.fire_next();
			}
		}

		pub(crate) fn run_until_idle(&self) {
			while self.fire_next() {}
		}
	}

	impl Timer for ManualTimer {
		fn defer(&self, delay: Duration, task: Task) {
			self.queue.borrow_mut().push_back((delay, task));
		}
	}
}

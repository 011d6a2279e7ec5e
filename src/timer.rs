//! Cancellable handles for scheduled poll work.

// self
use crate::_prelude::*;
#[cfg(feature = "tokio")]
use tokio::task::{AbortHandle, JoinHandle};

/// Cancellation guard for one scheduled piece of poll work.
///
/// The wrapped action runs exactly once: through an explicit
/// [`cancel`](Self::cancel), or on drop if the guard was never cancelled. A
/// timer handed to the gate therefore cannot outlive the registration it was
/// attached to.
pub struct PollTimer {
	action: Option<Box<dyn FnOnce() + Send>>,
}
impl PollTimer {
	/// Wraps a cancellation action.
	pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
		Self { action: Some(Box::new(action)) }
	}

	/// Runs the cancellation action now.
	pub fn cancel(mut self) {
		self.fire();
	}

	/// Returns `true` while the cancellation action has not run yet.
	pub fn is_armed(&self) -> bool {
		self.action.is_some()
	}

	fn fire(&mut self) {
		if let Some(action) = self.action.take() {
			action();
		}
	}
}
impl Drop for PollTimer {
	fn drop(&mut self) {
		self.fire();
	}
}
impl Debug for PollTimer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let state = if self.is_armed() { "armed" } else { "spent" };

		f.debug_struct("PollTimer").field("state", &state).finish()
	}
}
#[cfg(feature = "tokio")]
impl From<AbortHandle> for PollTimer {
	fn from(handle: AbortHandle) -> Self {
		Self::new(move || handle.abort())
	}
}
#[cfg(feature = "tokio")]
impl<T> From<JoinHandle<T>> for PollTimer {
	fn from(handle: JoinHandle<T>) -> Self {
		Self::from(handle.abort_handle())
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::{
		Arc,
		atomic::{AtomicU32, Ordering},
	};
	// self
	use super::*;

	fn tracked(cancellations: &Arc<AtomicU32>) -> PollTimer {
		let cancellations = cancellations.clone();

		PollTimer::new(move || {
			cancellations.fetch_add(1, Ordering::SeqCst);
		})
	}

	#[test]
	fn cancel_runs_the_action_exactly_once() {
		let cancellations = Arc::new(AtomicU32::new(0));
		let timer = tracked(&cancellations);

		assert!(timer.is_armed());

		timer.cancel();

		assert_eq!(cancellations.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn dropping_an_armed_timer_fires_it() {
		let cancellations = Arc::new(AtomicU32::new(0));

		drop(tracked(&cancellations));

		assert_eq!(cancellations.load(Ordering::SeqCst), 1);
	}

	#[cfg(feature = "tokio")]
	#[tokio::test]
	async fn abort_handles_cancel_their_task() {
		let handle = tokio::spawn(async {
			loop {
				tokio::time::sleep(std::time::Duration::from_secs(60)).await;
			}
		});
		let timer = PollTimer::from(handle.abort_handle());

		timer.cancel();

		let joined = handle.await;

		assert!(joined.expect_err("Aborted task should report cancellation.").is_cancelled());
	}
}

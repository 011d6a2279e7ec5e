//! Per-instance registration records and their poll accounting.

// self
use crate::{
	_prelude::*,
	pairing::ComponentId,
	policy::{RetryDirective, ThrottleCause, ThrottlePolicy},
	timer::PollTimer,
};

/// Poll counter anchored at the first poll it admitted.
///
/// A window is never advanced in place. Once `started_at + window` has passed
/// the whole counter is considered expired and the next recorded poll opens a
/// new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollWindow {
	/// Instant of the first poll counted by this window.
	pub started_at: OffsetDateTime,
	/// Polls recorded since the window opened.
	pub count: u32,
}
impl PollWindow {
	fn opened(instant: OffsetDateTime) -> Self {
		Self { started_at: instant, count: 1 }
	}

	fn charged(self) -> Self {
		Self { started_at: self.started_at, count: self.count.saturating_add(1) }
	}

	fn expires_at(self, policy: &ThrottlePolicy) -> OffsetDateTime {
		self.started_at + policy.window
	}

	fn is_open_at(self, policy: &ThrottlePolicy, instant: OffsetDateTime) -> bool {
		instant < self.expires_at(policy)
	}
}

/// Mutable state tracked for one registered instance.
pub struct Registration {
	/// Component currently holding the polling rights.
	pub owner: ComponentId,
	/// Instant the current grant was issued or last renewed.
	pub granted_at: OffsetDateTime,
	/// Instant of the most recent recorded poll.
	pub last_poll_at: Option<OffsetDateTime>,
	/// Open or expired poll window, absent until the first recorded poll.
	pub window: Option<PollWindow>,
	pub(crate) timer: Option<PollTimer>,
}
impl Registration {
	/// Creates a fresh record owned by `owner` with empty poll accounting.
	pub fn new(owner: ComponentId, granted_at: OffsetDateTime) -> Self {
		Self { owner, granted_at, last_poll_at: None, window: None, timer: None }
	}

	/// Returns `true` when `component` holds this registration.
	pub fn is_owned_by(&self, component: &ComponentId) -> bool {
		&self.owner == component
	}

	/// Evaluates the throttle limits at a given instant.
	///
	/// The window budget is consulted before the minimum interval, so a caller
	/// that trips both limits is told to wait out the window instead of
	/// retrying into another denial.
	pub fn throttle_at(
		&self,
		policy: &ThrottlePolicy,
		instant: OffsetDateTime,
	) -> Option<RetryDirective> {
		let exhausted = self
			.open_window_at(policy, instant)
			.filter(|window| window.count >= policy.window_budget);

		if let Some(window) = exhausted {
			let resumes_at = window.expires_at(policy);

			return Some(RetryDirective::new(
				resumes_at,
				resumes_at - instant,
				ThrottleCause::WindowBudget,
			));
		}
		if let Some(last) = self.last_poll_at {
			let resumes_at = last + policy.min_interval;

			if instant < resumes_at {
				return Some(RetryDirective::new(
					resumes_at,
					resumes_at - instant,
					ThrottleCause::MinInterval,
				));
			}
		}

		None
	}

	/// Charges a poll against the record at a given instant.
	///
	/// Opens a fresh window when none is open, otherwise increments the open
	/// window's count. Recording never consults the limits; callers check
	/// first and charge afterwards.
	pub fn record_poll_at(&mut self, policy: &ThrottlePolicy, instant: OffsetDateTime) {
		self.window = Some(match self.open_window_at(policy, instant) {
			Some(window) => window.charged(),
			None => PollWindow::opened(instant),
		});
		self.last_poll_at = Some(instant);
	}

	/// How long the current grant has been held as of `instant`.
	pub fn held_for_at(&self, instant: OffsetDateTime) -> Duration {
		instant - self.granted_at
	}

	/// Time since the most recent recorded poll, if any.
	pub fn idle_at(&self, instant: OffsetDateTime) -> Option<Duration> {
		self.last_poll_at.map(|last| instant - last)
	}

	/// Polls recorded in the window open at `instant`; zero when none is open.
	pub fn window_count_at(&self, policy: &ThrottlePolicy, instant: OffsetDateTime) -> u32 {
		self.open_window_at(policy, instant).map_or(0, |window| window.count)
	}

	/// Time until the window open at `instant` expires.
	pub fn window_remaining_at(
		&self,
		policy: &ThrottlePolicy,
		instant: OffsetDateTime,
	) -> Option<Duration> {
		self.open_window_at(policy, instant).map(|window| window.expires_at(policy) - instant)
	}

	fn open_window_at(
		&self,
		policy: &ThrottlePolicy,
		instant: OffsetDateTime,
	) -> Option<PollWindow> {
		self.window.filter(|window| window.is_open_at(policy, instant))
	}
}
impl Debug for Registration {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Registration")
			.field("owner", &self.owner)
			.field("granted_at", &self.granted_at)
			.field("last_poll_at", &self.last_poll_at)
			.field("window", &self.window)
			.field("timer_armed", &self.timer.is_some())
			.finish()
	}
}

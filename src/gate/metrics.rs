// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for gate decisions.
#[derive(Debug, Default)]
pub struct GateMetrics {
	grants: AtomicU64,
	conflicts: AtomicU64,
	polls_allowed: AtomicU64,
	polls_throttled: AtomicU64,
	polls_recorded: AtomicU64,
	releases: AtomicU64,
	emergency_stops: AtomicU64,
}
impl GateMetrics {
	/// Returns the number of accepted registrations (grants and renewals).
	pub fn grants(&self) -> u64 {
		self.grants.load(Ordering::Relaxed)
	}

	/// Returns the number of registrations rejected because another component held the instance.
	pub fn conflicts(&self) -> u64 {
		self.conflicts.load(Ordering::Relaxed)
	}

	/// Returns the number of poll checks that came back allowed.
	pub fn polls_allowed(&self) -> u64 {
		self.polls_allowed.load(Ordering::Relaxed)
	}

	/// Returns the number of poll checks denied by a throttle limit.
	pub fn polls_throttled(&self) -> u64 {
		self.polls_throttled.load(Ordering::Relaxed)
	}

	/// Returns the number of polls charged via record calls.
	pub fn polls_recorded(&self) -> u64 {
		self.polls_recorded.load(Ordering::Relaxed)
	}

	/// Returns the number of voluntary releases by an owner.
	pub fn releases(&self) -> u64 {
		self.releases.load(Ordering::Relaxed)
	}

	/// Returns the number of emergency stops performed.
	pub fn emergency_stops(&self) -> u64 {
		self.emergency_stops.load(Ordering::Relaxed)
	}

	pub(crate) fn record_grant(&self) {
		self.grants.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_conflict(&self) {
		self.conflicts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_poll_allowed(&self) {
		self.polls_allowed.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_poll_throttled(&self) {
		self.polls_throttled.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_poll_recorded(&self) {
		self.polls_recorded.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_release(&self) {
		self.releases.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_emergency_stop(&self) {
		self.emergency_stops.fetch_add(1, Ordering::Relaxed);
	}
}

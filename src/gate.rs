//! The poll gate: admission, throttling, timer custody, and diagnostics.

pub mod admission;
pub mod throttle;

mod metrics;
mod timers;

pub use admission::*;
pub use metrics::GateMetrics;
pub use throttle::*;

// self
use crate::{
	_prelude::*,
	diag::{GateStats, InstanceStats},
	pairing::{InstanceId, Registration},
	policy::ThrottlePolicy,
};

/// Coordinates QR polling for every messaging instance in the process.
///
/// The gate owns the registration map, the throttle policy, and the metrics
/// recorder so the operation implementations can focus on decision logic.
/// Clones share one registry; hand each polling component its own clone
/// instead of reaching for a global.
///
/// Every operation is advisory. Denials come back as ordinary return values,
/// never panics or errors, because the callers are UI surfaces that must keep
/// rendering whatever the gate decides.
///
/// Timer cancellation actions run after the registry lock has been released,
/// so an action may call back into the gate without deadlocking.
#[derive(Clone)]
pub struct PollGate {
	policy: ThrottlePolicy,
	metrics: Arc<GateMetrics>,
	registry: Arc<Mutex<HashMap<InstanceId, Registration>>>,
}
impl PollGate {
	/// Creates a gate with the default [`ThrottlePolicy`].
	pub fn new() -> Self {
		Self {
			policy: ThrottlePolicy::default(),
			metrics: Default::default(),
			registry: Default::default(),
		}
	}

	/// Creates a gate with a caller-provided policy, validating it first.
	pub fn with_policy(policy: ThrottlePolicy) -> Result<Self> {
		policy.validate()?;

		Ok(Self { policy, metrics: Default::default(), registry: Default::default() })
	}

	/// Returns the throttle policy the gate was built with.
	pub fn policy(&self) -> ThrottlePolicy {
		self.policy
	}

	/// Returns the shared metrics recorder.
	pub fn metrics(&self) -> Arc<GateMetrics> {
		self.metrics.clone()
	}

	/// Captures a diagnostics snapshot at a given instant.
	///
	/// Instances are reported in identifier order so repeated snapshots diff
	/// cleanly.
	pub fn stats_at(&self, instant: OffsetDateTime) -> GateStats {
		let registry = self.registry.lock();
		let mut instances: Vec<InstanceStats> = registry
			.iter()
			.map(|(instance, record)| InstanceStats {
				instance: instance.clone(),
				owner: record.owner.clone(),
				held_for: record.held_for_at(instant),
				last_poll_at: record.last_poll_at,
				idle_for: record.idle_at(instant),
				window_count: record.window_count_at(&self.policy, instant),
				window_remaining: record.window_remaining_at(&self.policy, instant),
				timer_armed: record.timer.is_some(),
			})
			.collect();

		drop(registry);

		instances.sort_by(|lhs, rhs| lhs.instance.cmp(&rhs.instance));

		GateStats { taken_at: instant, registrations: instances.len(), instances }
	}

	/// Convenience helper that snapshots using the current UTC instant.
	pub fn stats(&self) -> GateStats {
		self.stats_at(OffsetDateTime::now_utc())
	}
}
impl Default for PollGate {
	fn default() -> Self {
		Self::new()
	}
}
impl Debug for PollGate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PollGate")
			.field("policy", &self.policy)
			.field("registrations", &self.registry.lock().len())
			.finish()
	}
}

//! Poll throttling: whether the owner may poll right now.
//!
//! Checking and recording are deliberately split. A check is read-only and
//! can be retried freely; the caller performs the actual QR request only on
//! an allow, then charges it with a record call. The gate never executes the
//! request itself.

// self
use crate::{
	_prelude::*,
	gate::{PollGate, StandingDenial},
	obs::{self, GateOp, OpOutcome, OpSpan},
	pairing::{ComponentId, InstanceId},
	policy::RetryDirective,
};

/// Verdict for one poll attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollVerdict {
	/// The poll may proceed; charge it afterwards with a record call.
	Allow,
	/// A throttle limit denied the poll for now.
	Throttled(RetryDirective),
	/// The caller has no standing to poll this instance.
	Forbidden(StandingDenial),
}
impl PollVerdict {
	/// Returns `true` when the poll may proceed.
	pub const fn is_allowed(&self) -> bool {
		matches!(self, PollVerdict::Allow)
	}

	/// Remaining wait when the verdict is [`Throttled`](Self::Throttled).
	pub fn wait(&self) -> Option<Duration> {
		match self {
			PollVerdict::Throttled(directive) => Some(directive.wait),
			_ => None,
		}
	}
}

impl PollGate {
	/// Consults the throttle limits for `instance` at a given instant.
	///
	/// Checking never mutates the record. The window budget is evaluated
	/// before the minimum interval, and a denial carries a [`RetryDirective`]
	/// naming the limit and the earliest retry instant. Callers that are not
	/// the registered owner receive [`PollVerdict::Forbidden`] instead.
	pub fn check_poll_at(
		&self,
		instance: &InstanceId,
		component: &ComponentId,
		instant: OffsetDateTime,
	) -> PollVerdict {
		const OP: GateOp = GateOp::CheckPoll;

		let _span = OpSpan::new(OP, "check_poll").entered();
		let verdict = {
			let registry = self.registry.lock();

			match registry.get(instance) {
				None => PollVerdict::Forbidden(StandingDenial::NotRegistered),
				Some(held) if !held.is_owned_by(component) => {
					PollVerdict::Forbidden(StandingDenial::OwnedBy(held.owner.clone()))
				},
				Some(held) => match held.throttle_at(&self.policy, instant) {
					Some(directive) => PollVerdict::Throttled(directive),
					None => PollVerdict::Allow,
				},
			}
		};

		match &verdict {
			PollVerdict::Allow => {
				self.metrics.record_poll_allowed();
				obs::record_op_outcome(OP, OpOutcome::Accepted);
			},
			PollVerdict::Throttled(_) => {
				self.metrics.record_poll_throttled();
				obs::record_op_outcome(OP, OpOutcome::Throttled);
			},
			PollVerdict::Forbidden(_) => obs::record_op_outcome(OP, OpOutcome::Denied),
		}

		verdict
	}

	/// Convenience helper that checks using the current UTC instant.
	pub fn check_poll(&self, instance: &InstanceId, component: &ComponentId) -> PollVerdict {
		self.check_poll_at(instance, component, OffsetDateTime::now_utc())
	}

	/// Charges a performed poll against `instance` at a given instant, owner only.
	///
	/// Recording stamps the poll and advances the window accounting without
	/// consulting the limits; callers check first and charge afterwards.
	/// Returns `false` when the caller had no standing, in which case nothing
	/// is charged.
	pub fn record_poll_at(
		&self,
		instance: &InstanceId,
		component: &ComponentId,
		instant: OffsetDateTime,
	) -> bool {
		const OP: GateOp = GateOp::RecordPoll;

		let _span = OpSpan::new(OP, "record_poll").entered();
		let charged = {
			let mut registry = self.registry.lock();

			match registry.get_mut(instance) {
				Some(held) if held.is_owned_by(component) => {
					held.record_poll_at(&self.policy, instant);

					true
				},
				_ => false,
			}
		};

		if charged {
			self.metrics.record_poll_recorded();
			obs::record_op_outcome(OP, OpOutcome::Accepted);
		} else {
			obs::record_op_outcome(OP, OpOutcome::Denied);
		}

		charged
	}

	/// Convenience helper that charges a poll using the current UTC instant.
	pub fn record_poll(&self, instance: &InstanceId, component: &ComponentId) -> bool {
		self.record_poll_at(instance, component, OffsetDateTime::now_utc())
	}
}

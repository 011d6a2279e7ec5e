//! Admission control: who may poll a given instance.
//!
//! A registration is exclusive. The first component to register an instance
//! owns it until it unregisters or an emergency stop clears the registry.
//! Competing components are told who holds the instance and back off on their
//! own schedule; there is no queueing and no fairness.

// self
use crate::{
	_prelude::*,
	gate::PollGate,
	obs::{self, GateOp, OpOutcome, OpSpan},
	pairing::{ComponentId, InstanceId, Registration},
};

/// Result of a registration attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantOutcome {
	/// The instance was unowned and now belongs to the caller.
	Granted,
	/// The caller already owned the instance; the record was rebuilt.
	Renewed,
	/// Another component holds the instance; nothing changed.
	Conflict {
		/// Component currently holding the registration.
		holder: ComponentId,
		/// How long the holder had been registered at the decision instant.
		held_for: Duration,
	},
}
impl GrantOutcome {
	/// Returns `true` when the caller now holds the polling rights.
	pub const fn is_accepted(&self) -> bool {
		matches!(self, GrantOutcome::Granted | GrantOutcome::Renewed)
	}
}

/// Why a caller has no standing to act on an instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandingDenial {
	/// No registration exists for the instance.
	NotRegistered,
	/// Another component holds the registration.
	OwnedBy(ComponentId),
}

impl PollGate {
	/// Claims or renews exclusive polling rights for `instance` at a given instant.
	///
	/// Granting and renewing both install a fresh [`Registration`], so a
	/// renewal clears the poll accounting and releases any previously attached
	/// timer. A conflict leaves the holder's record untouched.
	pub fn register_at(
		&self,
		instance: &InstanceId,
		component: &ComponentId,
		instant: OffsetDateTime,
	) -> GrantOutcome {
		const OP: GateOp = GateOp::Register;

		let _span = OpSpan::new(OP, "register").entered();
		let mut displaced = None;
		let outcome = {
			let mut registry = self.registry.lock();
			let decision = match registry.get(instance) {
				Some(held) if !held.is_owned_by(component) => GrantOutcome::Conflict {
					holder: held.owner.clone(),
					held_for: held.held_for_at(instant),
				},
				Some(_) => GrantOutcome::Renewed,
				None => GrantOutcome::Granted,
			};

			if decision.is_accepted() {
				displaced = registry
					.insert(instance.clone(), Registration::new(component.clone(), instant));
			}

			decision
		};

		// Cancel outside the lock; the action may reenter the gate.
		if let Some(timer) = displaced.and_then(|mut old| old.timer.take()) {
			timer.cancel();
		}
		if outcome.is_accepted() {
			self.metrics.record_grant();
			obs::record_op_outcome(OP, OpOutcome::Accepted);
		} else {
			self.metrics.record_conflict();
			obs::record_op_outcome(OP, OpOutcome::Denied);
		}

		outcome
	}

	/// Convenience helper that registers using the current UTC instant.
	pub fn register(&self, instance: &InstanceId, component: &ComponentId) -> GrantOutcome {
		self.register_at(instance, component, OffsetDateTime::now_utc())
	}

	/// Releases `instance` and cancels its attached timer, owner only.
	///
	/// Returns `false` without touching the record when no registration exists
	/// or the caller is not the current owner.
	pub fn unregister(&self, instance: &InstanceId, component: &ComponentId) -> bool {
		const OP: GateOp = GateOp::Unregister;

		let _span = OpSpan::new(OP, "unregister").entered();
		let removed = {
			let mut registry = self.registry.lock();

			if registry.get(instance).is_some_and(|record| record.is_owned_by(component)) {
				registry.remove(instance)
			} else {
				None
			}
		};
		let released = removed.is_some();

		if let Some(timer) = removed.and_then(|mut record| record.timer.take()) {
			timer.cancel();
		}
		if released {
			self.metrics.record_release();
			obs::record_op_outcome(OP, OpOutcome::Accepted);
		} else {
			obs::record_op_outcome(OP, OpOutcome::Denied);
		}

		released
	}

	/// Clears every registration at once, cancelling all attached timers.
	///
	/// This is the incident lever. It ignores ownership entirely and returns
	/// how many registrations were dropped; components discover the reset on
	/// their next call and may re-register immediately.
	pub fn emergency_stop(&self) -> usize {
		const OP: GateOp = GateOp::EmergencyStop;

		let _span = OpSpan::new(OP, "emergency_stop").entered();
		let drained: Vec<Registration> = {
			let mut registry = self.registry.lock();

			registry.drain().map(|(_, record)| record).collect()
		};
		let cleared = drained.len();

		for mut record in drained {
			if let Some(timer) = record.timer.take() {
				timer.cancel();
			}
		}

		self.metrics.record_emergency_stop();
		obs::record_op_outcome(OP, OpOutcome::Accepted);

		cleared
	}
}

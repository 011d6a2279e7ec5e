// self
use crate::{
	gate::PollGate,
	obs::{self, GateOp, OpOutcome, OpSpan},
	pairing::{ComponentId, InstanceId},
	timer::PollTimer,
};

impl PollGate {
	/// Places `timer` in the custody of `instance`'s registration, owner only.
	///
	/// The previously attached timer, if any, is cancelled. When the caller
	/// has no standing the handed-in timer is cancelled immediately instead of
	/// stored, so a rejected caller cannot keep background work alive through
	/// the gate. Returns `true` when the timer was stored.
	pub fn attach_timer(
		&self,
		instance: &InstanceId,
		component: &ComponentId,
		timer: PollTimer,
	) -> bool {
		const OP: GateOp = GateOp::AttachTimer;

		let _span = OpSpan::new(OP, "attach_timer").entered();
		let mut rejected = None;
		let replaced = {
			let mut registry = self.registry.lock();

			match registry.get_mut(instance) {
				Some(held) if held.is_owned_by(component) => held.timer.replace(timer),
				_ => {
					rejected = Some(timer);

					None
				},
			}
		};
		let stored = rejected.is_none();

		// Cancel outside the lock; the action may reenter the gate.
		if let Some(previous) = replaced {
			previous.cancel();
		}
		if let Some(unstored) = rejected {
			unstored.cancel();
		}
		if stored {
			obs::record_op_outcome(OP, OpOutcome::Accepted);
		} else {
			obs::record_op_outcome(OP, OpOutcome::Denied);
		}

		stored
	}
}

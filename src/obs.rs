//! Optional observability helpers for gate operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `qr_gate.op` with the `op` (operation) and
//!   `stage` (call site) fields.
//! - Enable `metrics` to increment the `qr_gate_op_total` counter for every operation, labeled by
//!   `op` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Gate operations observed by spans and counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateOp {
	/// Claiming or renewing polling rights.
	Register,
	/// Consulting the throttle limits.
	CheckPoll,
	/// Charging a performed poll.
	RecordPoll,
	/// Attaching a cancellation timer.
	AttachTimer,
	/// Releasing polling rights.
	Unregister,
	/// Clearing the whole registry.
	EmergencyStop,
}
impl GateOp {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			GateOp::Register => "register",
			GateOp::CheckPoll => "check_poll",
			GateOp::RecordPoll => "record_poll",
			GateOp::AttachTimer => "attach_timer",
			GateOp::Unregister => "unregister",
			GateOp::EmergencyStop => "emergency_stop",
		}
	}
}
impl Display for GateOp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// The operation took effect.
	Accepted,
	/// A poll was denied by a throttle limit.
	Throttled,
	/// The caller lacked standing and nothing changed.
	Denied,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Accepted => "accepted",
			OpOutcome::Throttled => "throttled",
			OpOutcome::Denied => "denied",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

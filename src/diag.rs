//! Diagnostics snapshots exposed by the gate.
//!
//! Snapshots are plain serializable values captured under the registry lock
//! and detached from it, so support tooling can render or ship them without
//! touching live gate state.

// self
use crate::{
	_prelude::*,
	pairing::{ComponentId, InstanceId},
};

/// Point-in-time view of the whole registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateStats {
	/// Instant the snapshot was captured.
	pub taken_at: OffsetDateTime,
	/// Number of registered instances.
	pub registrations: usize,
	/// Per-instance details, ordered by instance identifier.
	pub instances: Vec<InstanceStats>,
}
impl GateStats {
	/// Renders the snapshot as pretty-printed JSON.
	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string_pretty(self).map_err(|source| Error::Snapshot { source })
	}
}

/// Point-in-time view of a single registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStats {
	/// Registered instance.
	pub instance: InstanceId,
	/// Component holding the polling rights.
	pub owner: ComponentId,
	/// How long the current grant has been held.
	pub held_for: Duration,
	/// Instant of the most recent recorded poll.
	pub last_poll_at: Option<OffsetDateTime>,
	/// Time since the most recent recorded poll.
	pub idle_for: Option<Duration>,
	/// Polls recorded in the currently open window, zero when none is open.
	pub window_count: u32,
	/// Time until the open window expires.
	pub window_remaining: Option<Duration>,
	/// Whether a cancellation timer is attached.
	pub timer_armed: bool,
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn snapshots_render_and_round_trip_as_json() {
		let taken_at = macros::datetime!(2025-06-01 08:00 UTC);
		let stats = GateStats {
			taken_at,
			registrations: 1,
			instances: vec![InstanceStats {
				instance: InstanceId::new("wa-main").expect("Instance fixture should be valid."),
				owner: ComponentId::new("qr-panel").expect("Component fixture should be valid."),
				held_for: Duration::seconds(90),
				last_poll_at: Some(taken_at - Duration::seconds(12)),
				idle_for: Some(Duration::seconds(12)),
				window_count: 1,
				window_remaining: Some(Duration::seconds(18)),
				timer_armed: true,
			}],
		};
		let json = stats.to_json().expect("Snapshot should render as JSON.");

		assert!(json.contains("\"registrations\": 1"));
		assert!(json.contains("\"window_count\": 1"));

		let round_trip: GateStats =
			serde_json::from_str(&json).expect("Rendered snapshot should deserialize.");

		assert_eq!(round_trip, stats);
	}
}

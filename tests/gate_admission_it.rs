// crates.io
use time::{Duration, macros};
// self
use qr_gate::{
	gate::{GrantOutcome, PollGate},
	pairing::{ComponentId, InstanceId},
};

fn make_instance(raw: &str) -> InstanceId {
	InstanceId::new(raw).expect("Failed to build instance identifier for admission tests.")
}

fn make_component(raw: &str) -> ComponentId {
	ComponentId::new(raw).expect("Failed to build component identifier for admission tests.")
}

#[test]
fn ownership_is_exclusive_until_released() {
	let gate = PollGate::new();
	let instance = make_instance("wa-clinic-front");
	let panel = make_component("qr-panel");
	let modal = make_component("qr-modal");
	let start = macros::datetime!(2025-06-01 08:00 UTC);

	assert_eq!(gate.register_at(&instance, &panel, start), GrantOutcome::Granted);
	assert_eq!(
		gate.register_at(&instance, &modal, start + Duration::seconds(5)),
		GrantOutcome::Conflict { holder: panel.clone(), held_for: Duration::seconds(5) }
	);
	assert!(!gate.unregister(&instance, &modal), "A non-owner must not release the instance.");
	assert_eq!(gate.stats().registrations, 1);
	assert!(gate.unregister(&instance, &panel));
	assert_eq!(gate.stats().registrations, 0);
	assert_eq!(
		gate.register_at(&instance, &modal, start + Duration::seconds(6)),
		GrantOutcome::Granted
	);
}

#[test]
fn renewal_by_the_owner_resets_poll_accounting() {
	let gate = PollGate::new();
	let instance = make_instance("wa-clinic-front");
	let panel = make_component("qr-panel");
	let start = macros::datetime!(2025-06-01 08:00 UTC);

	assert_eq!(gate.register_at(&instance, &panel, start), GrantOutcome::Granted);
	assert!(gate.record_poll_at(&instance, &panel, start));
	assert!(gate.record_poll_at(&instance, &panel, start + Duration::seconds(11)));

	let renewed_at = start + Duration::seconds(12);

	assert_eq!(gate.register_at(&instance, &panel, renewed_at), GrantOutcome::Renewed);

	let snapshot = gate.stats_at(renewed_at);

	assert_eq!(snapshot.instances[0].window_count, 0);
	assert_eq!(snapshot.instances[0].last_poll_at, None);
	assert_eq!(snapshot.instances[0].held_for, Duration::ZERO);
	assert!(
		gate.check_poll_at(&instance, &panel, renewed_at).is_allowed(),
		"Renewal must clear the throttle accounting."
	);
}

#[test]
fn emergency_stop_clears_the_registry_unconditionally() {
	let gate = PollGate::new();
	let reception = make_instance("wa-reception");
	let pharmacy = make_instance("wa-pharmacy");
	let panel = make_component("qr-panel");
	let dashboard = make_component("qr-dashboard");

	assert!(gate.register(&reception, &panel).is_accepted());
	assert!(gate.register(&pharmacy, &dashboard).is_accepted());
	assert!(gate.record_poll(&reception, &panel));
	assert_eq!(gate.emergency_stop(), 2);
	assert_eq!(gate.stats().registrations, 0);

	// Ownership is wiped with everything else, so a former loser may claim
	// any instance right away.
	assert_eq!(gate.register(&reception, &dashboard), GrantOutcome::Granted);
	assert_eq!(gate.emergency_stop(), 1);
	assert_eq!(gate.emergency_stop(), 0);
}

#[test]
fn clones_share_one_registry() {
	let gate = PollGate::new();
	let clone = gate.clone();
	let instance = make_instance("wa-shared");
	let panel = make_component("qr-panel");

	assert!(clone.register(&instance, &panel).is_accepted());
	assert_eq!(gate.stats().registrations, 1);
	assert!(gate.unregister(&instance, &panel));
	assert_eq!(clone.stats().registrations, 0);
}

#[test]
fn gate_is_shared_across_threads() {
	let gate = PollGate::new();
	let instance = make_instance("wa-threaded");
	let worker = {
		let gate = gate.clone();
		let instance = instance.clone();

		std::thread::spawn(move || {
			let component = make_component("background-panel");

			gate.register(&instance, &component).is_accepted()
		})
	};

	assert!(worker.join().expect("Worker thread should not panic."));
	assert_eq!(gate.stats().registrations, 1);
}

#[test]
fn metrics_count_the_admission_lifecycle() {
	let gate = PollGate::new();
	let instance = make_instance("wa-metrics");
	let panel = make_component("qr-panel");
	let modal = make_component("qr-modal");

	assert!(gate.register(&instance, &panel).is_accepted());
	assert!(!gate.register(&instance, &modal).is_accepted());
	assert!(gate.register(&instance, &panel).is_accepted());
	assert!(gate.unregister(&instance, &panel));
	assert!(gate.register(&instance, &modal).is_accepted());
	assert_eq!(gate.emergency_stop(), 1);

	let metrics = gate.metrics();

	assert_eq!(metrics.grants(), 3);
	assert_eq!(metrics.conflicts(), 1);
	assert_eq!(metrics.releases(), 1);
	assert_eq!(metrics.emergency_stops(), 1);
}

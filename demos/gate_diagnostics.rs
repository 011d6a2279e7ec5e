//! Walks the diagnostics surface: a couple of registrations, a JSON snapshot,
//! the process-wide counters, and an emergency stop clearing the registry.

// crates.io
use color_eyre::Result;
// self
use qr_gate::{
	gate::PollGate,
	pairing::{ComponentId, InstanceId},
	timer::PollTimer,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let gate = PollGate::new();
	let reception = InstanceId::new("wa-reception")?;
	let pharmacy = InstanceId::new("wa-pharmacy")?;
	let reception_panel = ComponentId::new("reception-panel")?;
	let pharmacy_panel = ComponentId::new("pharmacy-panel")?;

	for (instance, component) in
		[(&reception, &reception_panel), (&pharmacy, &pharmacy_panel)]
	{
		gate.register(instance, component);

		if gate.check_poll(instance, component).is_allowed() {
			gate.record_poll(instance, component);
		}
	}

	// Park a keepalive task on the reception instance so the snapshot shows
	// an armed timer.
	let keepalive = tokio::spawn(async {
		loop {
			tokio::time::sleep(std::time::Duration::from_secs(60)).await;
		}
	});

	gate.attach_timer(&reception, &reception_panel, PollTimer::from(keepalive));

	println!("{}", gate.stats().to_json()?);

	let metrics = gate.metrics();

	println!(
		"Counters: grants={} conflicts={} allowed={} throttled={} recorded={} releases={} stops={}.",
		metrics.grants(),
		metrics.conflicts(),
		metrics.polls_allowed(),
		metrics.polls_throttled(),
		metrics.polls_recorded(),
		metrics.releases(),
		metrics.emergency_stops(),
	);
	println!("Emergency stop cleared {} registration(s).", gate.emergency_stop());
	println!("Registry now tracks {} instance(s).", gate.stats().registrations);

	Ok(())
}

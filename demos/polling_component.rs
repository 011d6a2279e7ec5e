//! Demonstrates two components contending for one instance's polling rights and
//! the winner's poll loop backing off under the gate's throttle verdicts.

// std
use std::time::Duration as StdDuration;
// crates.io
use color_eyre::Result;
// self
use qr_gate::{
	gate::PollGate,
	pairing::{ComponentId, InstanceId},
	policy::ThrottlePolicy,
	time::Duration,
	timer::PollTimer,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	// Compressed thresholds so the walkthrough finishes quickly; production
	// callers keep the defaults (one poll per 10s, two per 30s window).
	let policy = ThrottlePolicy::default()
		.with_min_interval(Duration::milliseconds(150))
		.with_window(Duration::milliseconds(600))
		.with_window_budget(2);
	let gate = PollGate::with_policy(policy)?;
	let instance = InstanceId::new("wa-clinic-main")?;
	let panel = ComponentId::new("qr-panel")?;
	let modal = ComponentId::new("qr-modal")?;

	println!("qr-panel registers: {:?}.", gate.register(&instance, &panel));
	println!("qr-modal registers: {:?}.", gate.register(&instance, &modal));

	let poller = {
		let gate = gate.clone();
		let instance = instance.clone();
		let panel = panel.clone();

		tokio::spawn(async move {
			for attempt in 1..=6 {
				let verdict = gate.check_poll(&instance, &panel);

				if verdict.is_allowed() {
					gate.record_poll(&instance, &panel);
					println!("Attempt {attempt}: polled the QR endpoint.");
				} else if let Some(wait) = verdict.wait() {
					println!("Attempt {attempt}: throttled, waiting {wait}.");
					tokio::time::sleep(
						wait.try_into().unwrap_or(StdDuration::from_millis(1)),
					)
					.await;
				}
			}
		})
	};

	gate.attach_timer(&instance, &panel, PollTimer::from(poller.abort_handle()));
	poller.await?;

	println!("Poll loop finished; qr-panel releases: {}.", gate.unregister(&instance, &panel));
	println!("qr-modal registers again: {:?}.", gate.register(&instance, &modal));
	println!("Emergency stop cleared {} registration(s).", gate.emergency_stop());

	Ok(())
}

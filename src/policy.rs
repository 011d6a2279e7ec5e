//! Throttle policy knobs and the retry directives issued when a poll is denied.

// self
use crate::_prelude::*;

/// Coarse throttle thresholds applied to every registered instance.
///
/// The defaults encode the shipped behavior of the pairing UI: at most one
/// poll every ten seconds, and at most two polls per thirty-second window.
/// The window is a reset-on-expiry counter anchored at the first poll it
/// admits, so short bursts around a window boundary can briefly reach twice
/// the nominal rate. The gate smooths poll traffic rather than metering it
/// precisely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottlePolicy {
	/// Minimum spacing between two accepted polls.
	pub min_interval: Duration,
	/// Length of the poll-count window.
	pub window: Duration,
	/// Number of polls admitted per window.
	pub window_budget: u32,
}
impl ThrottlePolicy {
	const DEFAULT_MIN_INTERVAL: Duration = Duration::seconds(10);
	const DEFAULT_WINDOW: Duration = Duration::seconds(30);
	const DEFAULT_WINDOW_BUDGET: u32 = 2;

	/// Overrides the minimum spacing between accepted polls.
	pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
		self.min_interval = min_interval;

		self
	}

	/// Overrides the window length.
	pub fn with_window(mut self, window: Duration) -> Self {
		self.window = window;

		self
	}

	/// Overrides the number of polls admitted per window.
	pub fn with_window_budget(mut self, window_budget: u32) -> Self {
		self.window_budget = window_budget;

		self
	}

	pub(crate) fn validate(&self) -> Result<(), PolicyError> {
		if self.min_interval.is_negative() {
			return Err(PolicyError::NegativeMinInterval);
		}
		if !self.window.is_positive() {
			return Err(PolicyError::NonPositiveWindow);
		}
		if self.window_budget == 0 {
			return Err(PolicyError::ZeroWindowBudget);
		}

		Ok(())
	}
}
impl Default for ThrottlePolicy {
	fn default() -> Self {
		Self {
			min_interval: Self::DEFAULT_MIN_INTERVAL,
			window: Self::DEFAULT_WINDOW,
			window_budget: Self::DEFAULT_WINDOW_BUDGET,
		}
	}
}

/// Error returned when throttle policy validation fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum PolicyError {
	/// The minimum poll interval was negative.
	#[error("Minimum poll interval cannot be negative.")]
	NegativeMinInterval,
	/// The window length was zero or negative.
	#[error("Poll window length must be positive.")]
	NonPositiveWindow,
	/// The window budget was zero, which would deny every poll.
	#[error("Poll window budget must admit at least one poll.")]
	ZeroWindowBudget,
}

/// Which throttle limit denied a poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrottleCause {
	/// The per-window poll budget is exhausted.
	WindowBudget,
	/// The minimum spacing since the last poll has not elapsed.
	MinInterval,
}
impl ThrottleCause {
	/// Stable label used in logs and metric tags.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::WindowBudget => "window_budget",
			Self::MinInterval => "min_interval",
		}
	}
}
impl Display for ThrottleCause {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Advises a throttled caller when polling may resume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryDirective {
	/// Instant when it is safe to poll again.
	pub earliest_retry_at: OffsetDateTime,
	/// Remaining wait as seen from the evaluated instant.
	pub wait: Duration,
	/// Limit that produced the denial.
	pub cause: ThrottleCause,
}
impl RetryDirective {
	/// Creates a new directive with the provided timing metadata.
	pub fn new(earliest_retry_at: OffsetDateTime, wait: Duration, cause: ThrottleCause) -> Self {
		Self { earliest_retry_at, wait, cause }
	}
}

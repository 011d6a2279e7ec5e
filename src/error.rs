//! Gate-level error types shared across admission, policy, and diagnostics.

// self
use crate::_prelude::*;

/// Gate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical gate error exposed by public APIs.
///
/// Only construction and diagnostics rendering can fail. The gate operations
/// themselves never error; a denial is an ordinary return value so a rejected
/// caller cannot crash the component driving its poll loop.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Identifier validation failure.
	#[error(transparent)]
	Identifier(#[from] crate::pairing::IdentifierError),
	/// Throttle policy validation failure.
	#[error(transparent)]
	Policy(#[from] crate::policy::PolicyError),
	/// Diagnostics snapshot could not be rendered as JSON.
	#[error("Gate snapshot could not be rendered as JSON.")]
	Snapshot {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}

//! Strongly typed identifiers enforced across the pairing domain.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let raw = value.as_ref();

				validate($kind, raw)?;

				Ok(Self(raw.to_owned()))
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (instance, component).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (instance, component).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (instance, component).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! { InstanceId, "Stable key for a messaging-channel instance awaiting QR pairing.", "Instance" }
def_id! { ComponentId, "Identifier for a client component contending for polling rights.", "Component" }

fn validate(kind: &'static str, raw: &str) -> Result<(), IdentifierError> {
	if raw.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if raw.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if raw.chars().count() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_empty_and_whitespace() {
		assert_eq!(InstanceId::new(""), Err(IdentifierError::Empty { kind: "Instance" }));
		assert_eq!(
			ComponentId::new("qr modal"),
			Err(IdentifierError::ContainsWhitespace { kind: "Component" })
		);
		assert!(InstanceId::new("wa\u{00A0}main").is_err(), "Unicode whitespace must be rejected.");
		assert!(InstanceId::new("\tqr-panel").is_err(), "Leading whitespace must be rejected.");

		let instance =
			InstanceId::new("wa-clinic-main").expect("Instance fixture should be considered valid.");

		assert_eq!(instance.as_ref(), "wa-clinic-main");
	}

	#[test]
	fn length_limit_counts_characters() {
		let exact = "я".repeat(IDENTIFIER_MAX_LEN);

		InstanceId::new(&exact).expect("Exact character count should succeed.");

		let too_long = "я".repeat(IDENTIFIER_MAX_LEN + 1);

		assert_eq!(
			InstanceId::new(&too_long),
			Err(IdentifierError::TooLong { kind: "Instance", max: IDENTIFIER_MAX_LEN })
		);
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let component: ComponentId =
			serde_json::from_str("\"qr-panel\"").expect("Component should deserialize.");

		assert_eq!(component.as_ref(), "qr-panel");
		assert_eq!(
			serde_json::to_string(&component).expect("Component should serialize."),
			"\"qr-panel\""
		);
		assert!(serde_json::from_str::<ComponentId>("\"qr panel\"").is_err());
		assert!(serde_json::from_str::<ComponentId>("\"\"").is_err());
	}

	#[test]
	fn borrow_supports_str_keyed_lookup() {
		let map: HashMap<InstanceId, u8> = HashMap::from_iter([(
			InstanceId::new("wa-reception").expect("Instance used for lookup should be valid."),
			3_u8,
		)]);

		assert_eq!(map.get("wa-reception"), Some(&3));
	}

	#[test]
	fn instances_order_lexicographically() {
		let mut ids = ["wa-c", "wa-a", "wa-b"]
			.map(|raw| InstanceId::new(raw).expect("Ordering fixture should be valid."));

		ids.sort();

		assert_eq!(ids.map(String::from), ["wa-a", "wa-b", "wa-c"].map(str::to_owned));
	}
}

//! In-process coordinator that grants exclusive QR polling rights per messaging
//! instance and throttles how often the owner may poll, with deterministic
//! cleanup of abandoned polling timers.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod diag;
pub mod error;
pub mod gate;
pub mod obs;
pub mod pairing;
pub mod policy;
pub mod timer;

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};

	pub use crate::error::{Error, Result};
}

pub use time;
#[cfg(feature = "tokio")] pub use tokio;
#[cfg(test)] use {color_eyre as _, tokio as _};

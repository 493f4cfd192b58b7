//! Service-account OAuth 2.0 client: signs JWT-bearer assertions, caches the issued bearer
//! token until shortly before expiry, and issues authenticated JSON requests with a bounded
//! POST retry loop.
//!
//! ```no_run
//! # async fn demo() -> oauth2_jwt_client::error::Result<()> {
//! use oauth2_jwt_client::client::ServiceAccountClient;
//!
//! let client = ServiceAccountClient::from_file(
//! 	"service-account.json",
//! 	["https://www.googleapis.com/auth/cloud-platform"],
//! )?;
//! let value = client.get("https://example.googleapis.com/v1/items").await?;
//!
//! println!("{value}");
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod manager;
pub mod obs;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};

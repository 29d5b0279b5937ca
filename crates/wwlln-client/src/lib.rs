//! Async client for the World Wide Lightning Location Network strike feed.
//!
//! ```no_run
//! # async fn run() -> Result<(), wwlln_client::WwllnError> {
//! use wwlln_client::{ClientConfig, WwllnClient};
//!
//! let client = WwllnClient::new(&ClientConfig::default())?;
//! let nearby = client
//!     .within_radius(56.1621538, 92.2333561, 50.0, "metric", None)
//!     .await?;
//! for (id, strike) in &nearby {
//!     println!("{id}: {:.1} km", strike.distance);
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
pub mod client;
pub mod error;
mod fetch;
mod retry;

pub use client::WwllnClient;
pub use error::{FetchCause, WwllnError};
pub use fetch::FetchOptions;
pub use wwlln_core::{ClientConfig, NearbyStrike, Strike, StrikeSnapshot, Unit};

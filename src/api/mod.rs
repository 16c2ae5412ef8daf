//! CaseLink API interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Main client holding the transport and base endpoint
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use caselink::{CaseLink, Resource};
//!
//! async fn example() -> caselink::Result<()> {
//!     let client = CaseLink::from_config()?;
//!     let mut case = client.autocase("TC001");
//!     for bug in case.bugs().await? {
//!         println!("{}", bug);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;

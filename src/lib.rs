//! CaseLink client
//!
//! Lazy, cached object mapping over the CaseLink REST API, which tracks how
//! automated test cases, manual work items, bugs, failure signatures and
//! blacklist entries relate to each other.
//!
//! Handles are free to create. The first field read fetches the resource,
//! later reads reuse the cached representation until `refresh()`:
//!
//! ```ignore
//! use caselink::{CaseLink, Linkage, Resource};
//!
//! async fn example() -> caselink::Result<()> {
//!     let client = CaseLink::from_config()?;
//!
//!     let mut case = client.autocase("TC001");
//!     let bugs = case.bugs().await?.to_vec();
//!
//!     let linkage = Linkage::create_for(&client, "WI1", "virsh.*", Default::default()).await?;
//!     println!("{} {:?} {}", case, bugs, linkage);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod resource;

pub use api::client::CaseLink;
pub use config::Settings;
pub use error::{Error, Result};
pub use resource::{
    AutoCase, AutoCaseFailure, BlackListEntry, Bug, Fields, Linkage, Resource, WorkItem,
};

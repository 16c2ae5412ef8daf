//! CaseLink Client
//!
//! Main client for the CaseLink API, combining the HTTP transport with the
//! configured base endpoint.

use super::http::CaseLinkHttp;
use crate::config::{parse_base_url, Settings};
use crate::error::Result;
use crate::resource::{
    AutoCase, AutoCaseFailure, BlackListEntry, Bug, Linkage, Resource, WorkItem,
};
use serde_json::Value;
use std::fmt::Display;
use url::Url;

/// Main CaseLink client
///
/// Cheap to clone; every entity handle carries one.
#[derive(Clone, Debug)]
pub struct CaseLink {
    pub http: CaseLinkHttp,
    base_url: Url,
}

impl CaseLink {
    /// Create a client from resolved settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = CaseLinkHttp::new(settings.timeout)?;
        Ok(Self {
            http,
            base_url: settings.caselink_url.clone(),
        })
    }

    /// Create a client from the layered config files
    pub fn from_config() -> Result<Self> {
        let settings = Settings::load()?;
        Self::new(&settings)
    }

    /// Create a client for an explicit endpoint with default settings otherwise
    pub fn with_url(base_url: &str) -> Result<Self> {
        let settings = Settings {
            caselink_url: parse_base_url(base_url)?,
            ..Settings::default()
        };
        Self::new(&settings)
    }

    /// Base endpoint, always ending in `/`
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Build a collection URL, e.g. `<base>/autocase/`
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}{}/", self.base_url, collection)
    }

    /// Build a resource URL, e.g. `<base>/autocase/TC001/`
    pub fn resource_url(&self, collection: &str, id: &str) -> String {
        format!("{}{}/{}/", self.base_url, collection, id)
    }

    // =========================================================================
    // Transport passthrough
    // =========================================================================

    pub async fn get(&self, url: &str) -> Result<Value> {
        self.http.get(url).await
    }

    pub async fn post(&self, url: &str, body: &Value) -> Result<Value> {
        self.http.post(url, body).await
    }

    pub async fn put(&self, url: &str, body: &Value) -> Result<Value> {
        self.http.put(url, body).await
    }

    pub async fn delete(&self, url: &str) -> Result<Value> {
        self.http.delete(url).await
    }

    // =========================================================================
    // Entity handles (no network)
    // =========================================================================

    pub fn autocase(&self, case_id: impl Display) -> AutoCase {
        AutoCase::new(self, case_id)
    }

    pub fn workitem(&self, workitem_id: impl Display) -> WorkItem {
        WorkItem::new(self, workitem_id)
    }

    pub fn bug(&self, bug_id: impl Display) -> Bug {
        Bug::new(self, bug_id)
    }

    pub fn linkage(&self, id: impl Display) -> Linkage {
        Linkage::new(self, id)
    }

    pub fn autocase_failure(&self, id: impl Display) -> AutoCaseFailure {
        AutoCaseFailure::new(self, id)
    }

    pub fn blacklist_entry(&self, id: impl Display) -> BlackListEntry {
        BlackListEntry::new(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = CaseLink::with_url("http://caselink.example.com:8888").unwrap();
        assert_eq!(client.base_url(), "http://caselink.example.com:8888/");
        assert_eq!(
            client.collection_url("linkage"),
            "http://caselink.example.com:8888/linkage/"
        );
        assert_eq!(
            client.resource_url("autocase", "TC001"),
            "http://caselink.example.com:8888/autocase/TC001/"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let client = CaseLink::with_url("http://example.com/caselink/").unwrap();
        assert_eq!(
            client.resource_url("bug", "1234"),
            "http://example.com/caselink/bug/1234/"
        );
    }

    #[test]
    fn test_handles_use_type_collections() {
        let client = CaseLink::with_url("http://localhost:8888/").unwrap();
        assert_eq!(client.autocase("TC001").url(), "http://localhost:8888/autocase/TC001/");
        assert_eq!(client.workitem("WI1").url(), "http://localhost:8888/workitem/WI1/");
        assert_eq!(client.bug(1234).url(), "http://localhost:8888/bug/1234/");
        assert_eq!(client.linkage(42).url(), "http://localhost:8888/linkage/42/");
        assert_eq!(
            client.autocase_failure(7).url(),
            "http://localhost:8888/autocase_failure/7/"
        );
        assert_eq!(client.blacklist_entry(5).url(), "http://localhost:8888/blacklist/5/");
    }
}

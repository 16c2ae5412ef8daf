//! Failure signatures: a regex over failure output plus the autocase pattern
//! it applies to. Surrogate key; (`failure_regex`, `autocase_pattern`) is
//! unique server-side.

use super::{AutoCase, BlackListEntry, Bug, Fields, Memo, ReadOnlyField, Record, Resource};
use crate::api::client::CaseLink;
use crate::error::Result;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone)]
pub struct AutoCaseFailure {
    record: Record,
    bug: Memo<Option<Bug>>,
    autocases: Memo<Vec<AutoCase>>,
    blacklist_entries: Memo<Vec<BlackListEntry>>,
}

impl Resource for AutoCaseFailure {
    const COLLECTION: &'static str = "autocase_failure";
    const KIND: &'static str = "Failure";
    const UNIQUE_TOGETHER: &'static [&'static str] = &["failure_regex", "autocase_pattern"];
    const REQUIRED_ON_CREATE: &'static [&'static str] = &["failure_regex", "autocase_pattern"];
    const READ_ONLY: &'static [ReadOnlyField] = &[
        ("bug", "the bug is assigned on the server"),
        (
            "autocases",
            "autocases follow autocase_pattern; change the pattern instead",
        ),
        (
            "blacklist_entries",
            "use BlackListEntry::create_for to blacklist a failure",
        ),
    ];

    fn from_record(record: Record) -> Self {
        Self {
            record,
            bug: Memo::default(),
            autocases: Memo::default(),
            blacklist_entries: Memo::default(),
        }
    }

    fn record(&self) -> &Record {
        &self.record
    }

    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    fn invalidate(&mut self) {
        self.bug.clear();
        self.autocases.clear();
        self.blacklist_entries.clear();
    }
}

impl AutoCaseFailure {
    pub async fn create_for(
        client: &CaseLink,
        failure_regex: &str,
        autocase_pattern: &str,
        extra: Fields,
    ) -> Result<Self> {
        let mut fields = extra;
        fields.insert("failure_regex".to_string(), Value::from(failure_regex));
        fields.insert("autocase_pattern".to_string(), Value::from(autocase_pattern));
        Self::create(client, fields).await
    }

    pub async fn failure_regex(&mut self) -> Result<String> {
        self.str_field("failure_regex").await
    }

    pub async fn autocase_pattern(&mut self) -> Result<String> {
        self.str_field("autocase_pattern").await
    }

    /// The bug this failure is filed against, if any
    pub async fn bug(&mut self) -> Result<Option<&Bug>> {
        if !self.bug.is_set() {
            let bug = self.related_one("bug").await?;
            self.bug.set(bug);
        }
        Ok(self.bug.get().and_then(Option::as_ref))
    }

    /// Autocases matching `autocase_pattern`
    pub async fn autocases(&mut self) -> Result<&[AutoCase]> {
        if !self.autocases.is_set() {
            let autocases = self.related("autocases").await?;
            self.autocases.set(autocases);
        }
        Ok(self.autocases.as_slice())
    }

    pub async fn blacklist_entries(&mut self) -> Result<&[BlackListEntry]> {
        if !self.blacklist_entries.is_set() {
            let entries = self.related("blacklist_entries").await?;
            self.blacklist_entries.set(entries);
        }
        Ok(self.blacklist_entries.as_slice())
    }
}

impl_identity!(AutoCaseFailure);

impl fmt::Display for AutoCaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Failure {}>", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_requires_regex() {
        let client = CaseLink::with_url("http://localhost:8888/").unwrap();
        let mut fields = Fields::new();
        fields.insert("autocase_pattern".to_string(), json!("virsh.*"));

        let err = AutoCaseFailure::create(&client, fields).await.unwrap_err();
        assert!(matches!(err, Error::MissingField("failure_regex")));
    }

    #[test]
    fn test_metadata() {
        assert_eq!(
            AutoCaseFailure::UNIQUE_TOGETHER,
            &["failure_regex", "autocase_pattern"]
        );
        assert_eq!(AutoCaseFailure::COLLECTION, "autocase_failure");
    }
}

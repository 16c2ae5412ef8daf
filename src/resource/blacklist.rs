//! Blacklist entries: a status applied to a set of failure signatures for a
//! set of work items. Surrogate key.
//!
//! `workitems` is the only relationship that may be assigned locally; the
//! change is staged and sent with the next `save()`.

use super::{AutoCase, AutoCaseFailure, Fields, Memo, ReadOnlyField, Record, Resource, WorkItem};
use crate::api::client::CaseLink;
use crate::error::Result;
use serde_json::Value;
use std::fmt::{self, Display};

#[derive(Debug, Clone)]
pub struct BlackListEntry {
    record: Record,
    autocase_failures: Memo<Vec<AutoCaseFailure>>,
    workitems: Memo<Vec<WorkItem>>,
    autocases: Memo<Vec<AutoCase>>,
}

impl Resource for BlackListEntry {
    const COLLECTION: &'static str = "blacklist";
    const KIND: &'static str = "BlackListEntry";
    const REQUIRED_ON_CREATE: &'static [&'static str] =
        &["status", "workitems", "autocase_failures"];
    const READ_ONLY: &'static [ReadOnlyField] = &[
        (
            "autocase_failures",
            "use BlackListEntry::create_for to blacklist other failures",
        ),
        (
            "autocases",
            "autocases are derived from failures; use BlackListEntry::create_for",
        ),
    ];

    fn from_record(record: Record) -> Self {
        Self {
            record,
            autocase_failures: Memo::default(),
            workitems: Memo::default(),
            autocases: Memo::default(),
        }
    }

    fn record(&self) -> &Record {
        &self.record
    }

    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    fn invalidate(&mut self) {
        self.autocase_failures.clear();
        self.workitems.clear();
        self.autocases.clear();
    }
}

/// JSON array of identifiers
fn id_array<I>(ids: I) -> Value
where
    I: IntoIterator,
    I::Item: Display,
{
    Value::Array(ids.into_iter().map(|id| Value::String(id.to_string())).collect())
}

impl BlackListEntry {
    pub async fn create_for<W, F>(
        client: &CaseLink,
        status: &str,
        workitems: W,
        autocase_failures: F,
        extra: Fields,
    ) -> Result<Self>
    where
        W: IntoIterator,
        W::Item: Display,
        F: IntoIterator,
        F::Item: Display,
    {
        let mut fields = extra;
        fields.insert("status".to_string(), Value::from(status));
        fields.insert("workitems".to_string(), id_array(workitems));
        fields.insert("autocase_failures".to_string(), id_array(autocase_failures));
        Self::create(client, fields).await
    }

    pub async fn status(&mut self) -> Result<String> {
        self.str_field("status").await
    }

    pub async fn autocase_failures(&mut self) -> Result<&[AutoCaseFailure]> {
        if !self.autocase_failures.is_set() {
            let failures = self.related("autocase_failures").await?;
            self.autocase_failures.set(failures);
        }
        Ok(self.autocase_failures.as_slice())
    }

    pub async fn workitems(&mut self) -> Result<&[WorkItem]> {
        if !self.workitems.is_set() {
            let workitems = self.related("workitems").await?;
            self.workitems.set(workitems);
        }
        Ok(self.workitems.as_slice())
    }

    /// Replace the blacklisted work items. Staged only; no network until `save()`.
    pub fn set_workitems<I>(&mut self, workitems: I)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.record.stage("workitems", id_array(workitems));
        self.workitems.clear();
    }

    /// Autocases of every blacklisted failure, flattened in failure order.
    /// Fetches each failure on first access.
    pub async fn autocases(&mut self) -> Result<&[AutoCase]> {
        if !self.autocases.is_set() {
            self.autocase_failures().await?;
            let mut autocases = Vec::new();
            for failure in self.autocase_failures.as_mut_slice() {
                autocases.extend_from_slice(failure.autocases().await?);
            }
            self.autocases.set(autocases);
        }
        Ok(self.autocases.as_slice())
    }
}

impl_identity!(BlackListEntry);

impl fmt::Display for BlackListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record.get("status") {
            Some(Value::String(status)) => {
                write!(f, "<BlackListEntry:{}, id: {}>", status, self.id())
            }
            _ => write!(f, "<BlackListEntry id: {}>", self.id()),
        }
    }
}

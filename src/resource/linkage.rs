//! Links between a work item and an autocase name pattern.
//!
//! Linkages use a surrogate key assigned by the server. The pair
//! (`workitem`, `autocase_pattern`) is unique server-side.

use super::record::id_string;
use super::{AutoCase, Fields, Memo, ReadOnlyField, Record, Resource, WorkItem};
use crate::api::client::CaseLink;
use crate::error::Result;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Linkage {
    record: Record,
    autocases: Memo<Vec<AutoCase>>,
}

impl Resource for Linkage {
    const COLLECTION: &'static str = "linkage";
    const KIND: &'static str = "Linkage";
    const UNIQUE_TOGETHER: &'static [&'static str] = &["workitem", "autocase_pattern"];
    const REQUIRED_ON_CREATE: &'static [&'static str] = &["workitem", "autocase_pattern"];
    const READ_ONLY: &'static [ReadOnlyField] = &[(
        "autocases",
        "autocases follow autocase_pattern; change the pattern instead",
    )];

    fn from_record(record: Record) -> Self {
        Self {
            record,
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
        self.autocases.clear();
    }
}

impl Linkage {
    /// Link `workitem` to every autocase matching `autocase_pattern`
    pub async fn create_for(
        client: &CaseLink,
        workitem: &str,
        autocase_pattern: &str,
        extra: Fields,
    ) -> Result<Self> {
        let mut fields = extra;
        fields.insert("workitem".to_string(), Value::from(workitem));
        fields.insert("autocase_pattern".to_string(), Value::from(autocase_pattern));
        Self::create(client, fields).await
    }

    pub async fn workitem(&mut self) -> Result<WorkItem> {
        let id = id_string("workitem", self.field("workitem").await?)?;
        Ok(WorkItem::new(self.client(), id))
    }

    pub async fn autocase_pattern(&mut self) -> Result<String> {
        self.str_field("autocase_pattern").await
    }

    pub async fn autocases(&mut self) -> Result<&[AutoCase]> {
        if !self.autocases.is_set() {
            let autocases = self.related("autocases").await?;
            self.autocases.set(autocases);
        }
        Ok(self.autocases.as_slice())
    }
}

impl_identity!(Linkage);

/// Shows the work item and pattern once they are cached
impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let workitem = self.record.get("workitem");
        let pattern = self.record.get("autocase_pattern");
        match (workitem, pattern) {
            (Some(workitem), Some(Value::String(pattern))) => {
                let workitem =
                    id_string("workitem", workitem).unwrap_or_else(|_| workitem.to_string());
                write!(f, "<Linkage workitem:{} pattern: {}>", workitem, pattern)
            }
            _ => write!(f, "<Linkage {}>", self.id()),
        }
    }
}

//! Manual work items, keyed by their tracker id.

use super::{AutoCase, Bug, Linkage, Memo, ReadOnlyField, Record, Resource};
use crate::error::Result;
use std::fmt;

#[derive(Debug, Clone)]
pub struct WorkItem {
    record: Record,
    linkages: Memo<Vec<Linkage>>,
    autocases: Memo<Vec<AutoCase>>,
    bugs: Memo<Vec<Bug>>,
}

impl Resource for WorkItem {
    const COLLECTION: &'static str = "workitem";
    const KIND: &'static str = "WorkItem";
    const READ_ONLY: &'static [ReadOnlyField] = &[
        ("linkages", "use Linkage::create_for to create a linkage"),
        ("autocases", "use Linkage::create_for to link autocases"),
        ("bugs", "bugs are attached on the server"),
    ];

    fn from_record(record: Record) -> Self {
        Self {
            record,
            linkages: Memo::default(),
            autocases: Memo::default(),
            bugs: Memo::default(),
        }
    }

    fn record(&self) -> &Record {
        &self.record
    }

    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    fn invalidate(&mut self) {
        self.linkages.clear();
        self.autocases.clear();
        self.bugs.clear();
    }
}

impl WorkItem {
    pub async fn linkages(&mut self) -> Result<&[Linkage]> {
        if !self.linkages.is_set() {
            let linkages = self.related("linkages").await?;
            self.linkages.set(linkages);
        }
        Ok(self.linkages.as_slice())
    }

    /// Autocases matched by any of this work item's linkages, in linkage order
    pub async fn autocases(&mut self) -> Result<&[AutoCase]> {
        if !self.autocases.is_set() {
            self.linkages().await?;
            let mut autocases = Vec::new();
            for linkage in self.linkages.as_mut_slice() {
                autocases.extend_from_slice(linkage.autocases().await?);
            }
            self.autocases.set(autocases);
        }
        Ok(self.autocases.as_slice())
    }

    pub async fn bugs(&mut self) -> Result<&[Bug]> {
        if !self.bugs.is_set() {
            let bugs = self.related("bugs").await?;
            self.bugs.set(bugs);
        }
        Ok(self.bugs.as_slice())
    }
}

impl_identity!(WorkItem);

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<WorkItem {}>", self.id())
    }
}

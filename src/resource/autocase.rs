//! Automated test cases, keyed by case id.

use super::{
    AutoCaseFailure, Bug, Linkage, Memo, ReadOnlyField, Record, Resource, WorkItem,
};
use crate::error::Result;
use std::fmt;

/// An automated test case
#[derive(Debug, Clone)]
pub struct AutoCase {
    record: Record,
    linkages: Memo<Vec<Linkage>>,
    workitems: Memo<Vec<WorkItem>>,
    bugs: Memo<Vec<Bug>>,
    autocase_failures: Memo<Vec<AutoCaseFailure>>,
}

impl Resource for AutoCase {
    const COLLECTION: &'static str = "autocase";
    const KIND: &'static str = "AutoCase";
    const READ_ONLY: &'static [ReadOnlyField] = &[
        ("linkages", "use Linkage::create_for to create a linkage"),
        ("workitems", "use Linkage::create_for to create a linkage"),
        ("bugs", "link autocases through an AutoCaseFailure pattern"),
        ("autocase_failures", "link autocases through an AutoCaseFailure pattern"),
    ];

    fn from_record(record: Record) -> Self {
        Self {
            record,
            linkages: Memo::default(),
            workitems: Memo::default(),
            bugs: Memo::default(),
            autocase_failures: Memo::default(),
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
        self.workitems.clear();
        self.bugs.clear();
        self.autocase_failures.clear();
    }
}

impl AutoCase {
    /// Linkages whose pattern matches this case
    pub async fn linkages(&mut self) -> Result<&[Linkage]> {
        if !self.linkages.is_set() {
            let linkages = self.related("linkages").await?;
            self.linkages.set(linkages);
        }
        Ok(self.linkages.as_slice())
    }

    /// Work items reached through each linkage. Fetches every linkage.
    pub async fn workitems(&mut self) -> Result<&[WorkItem]> {
        if !self.workitems.is_set() {
            self.linkages().await?;
            let mut workitems = Vec::new();
            for linkage in self.linkages.as_mut_slice() {
                workitems.push(linkage.workitem().await?);
            }
            self.workitems.set(workitems);
        }
        Ok(self.workitems.as_slice())
    }

    pub async fn bugs(&mut self) -> Result<&[Bug]> {
        if !self.bugs.is_set() {
            let bugs = self.related("bugs").await?;
            self.bugs.set(bugs);
        }
        Ok(self.bugs.as_slice())
    }

    pub async fn autocase_failures(&mut self) -> Result<&[AutoCaseFailure]> {
        if !self.autocase_failures.is_set() {
            let failures = self.related("autocase_failures").await?;
            self.autocase_failures.set(failures);
        }
        Ok(self.autocase_failures.as_slice())
    }
}

impl_identity!(AutoCase);

impl fmt::Display for AutoCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<AutoCase {}>", self.id())
    }
}

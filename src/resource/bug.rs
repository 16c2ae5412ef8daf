//! Bugs, keyed by tracker id. Leaf resource: nothing to traverse.

use super::{Record, Resource};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Bug {
    record: Record,
}

impl Resource for Bug {
    const COLLECTION: &'static str = "bug";
    const KIND: &'static str = "Bug";

    fn from_record(record: Record) -> Self {
        Self { record }
    }

    fn record(&self) -> &Record {
        &self.record
    }

    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    fn invalidate(&mut self) {}
}

impl_identity!(Bug);

impl fmt::Display for Bug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Bug {}>", self.id())
    }
}

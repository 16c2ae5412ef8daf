//! Resource Module
//!
//! Lazy, cached handles over CaseLink resources. A handle is created without
//! touching the network; the first field read fetches the representation,
//! later reads are served from the cache until `refresh()`.

use crate::api::client::CaseLink;
use crate::error::{Error, Result};
use serde_json::Value;
use std::fmt::Display;

pub mod memo;
pub mod record;

/// Equality, ordering and hashing by resource URL
macro_rules! impl_identity {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.url() == other.url()
            }
        }

        impl Eq for $ty {}

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.url().cmp(other.url())
            }
        }

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.url().hash(state)
            }
        }
    };
}

mod autocase;
mod blacklist;
mod bug;
mod failure;
mod linkage;
mod workitem;

pub use autocase::AutoCase;
pub use blacklist::BlackListEntry;
pub use bug::Bug;
pub use failure::AutoCaseFailure;
pub use linkage::Linkage;
pub use memo::Memo;
pub use record::{Fields, Record};
pub use workitem::WorkItem;

/// A relationship the server derives; assigning it locally is refused
pub type ReadOnlyField = (&'static str, &'static str);

/// Names starting with `_` are internal and never resolve to fields
fn is_reserved(name: &str) -> bool {
    name.starts_with('_')
}

/// Common behaviour of every CaseLink entity.
///
/// Implementors supply their collection segment, metadata and access to their
/// [`Record`]; everything touching the network is provided here.
#[allow(async_fn_in_trait)]
pub trait Resource: Sized {
    /// Collection path segment, e.g. `autocase`
    const COLLECTION: &'static str;
    /// Name used in `Display` and error messages
    const KIND: &'static str;
    /// Fields the server keeps unique together (informational)
    const UNIQUE_TOGETHER: &'static [&'static str] = &[];
    /// Fields `create` refuses to go without
    const REQUIRED_ON_CREATE: &'static [&'static str] = &[];
    /// Relationship fields rejected by `set_field`, with a hint on what to do instead
    const READ_ONLY: &'static [ReadOnlyField] = &[];

    fn from_record(record: Record) -> Self;

    fn record(&self) -> &Record;

    fn record_mut(&mut self) -> &mut Record;

    /// Drop every memoized relationship
    fn invalidate(&mut self);

    /// Build a handle. No network.
    fn new(client: &CaseLink, id: impl Display) -> Self {
        Self::from_record(Record::new(client, Self::COLLECTION, id.to_string()))
    }

    fn id(&self) -> &str {
        self.record().id()
    }

    fn url(&self) -> &str {
        self.record().url()
    }

    fn client(&self) -> &CaseLink {
        self.record().client()
    }

    /// True if cached; otherwise fetch and report whether the server has it.
    ///
    /// Only a 404 maps to `false`, every other failure propagates.
    async fn exists(&mut self) -> Result<bool> {
        if self.record().is_loaded() {
            return Ok(true);
        }
        match self.record_mut().fetch().await {
            Ok(()) => {
                self.invalidate();
                Ok(true)
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("{} {} not found", Self::KIND, self.id());
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Make sure a representation is cached, if the resource exists at all
    async fn load(&mut self) -> Result<()> {
        if !self.record().is_loaded() {
            self.exists().await?;
        }
        Ok(())
    }

    /// Read a raw field of the representation
    async fn field(&mut self, name: &str) -> Result<&Value> {
        if is_reserved(name) {
            return Err(Error::NoAttribute(name.to_string()));
        }
        self.load().await?;
        self.record()
            .get(name)
            .ok_or_else(|| Error::NoAttribute(name.to_string()))
    }

    /// Read a string field
    async fn str_field(&mut self, name: &str) -> Result<String> {
        match self.field(name).await? {
            Value::String(s) => Ok(s.clone()),
            other => Err(Error::InvalidField {
                field: name.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Stage a field locally; sent on the next `save()`
    fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        if is_reserved(name) {
            return Err(Error::NoAttribute(name.to_string()));
        }
        if let Some((field, hint)) = Self::READ_ONLY.iter().find(|(field, _)| *field == name) {
            return Err(Error::ReadOnly {
                field: field.to_string(),
                hint: *hint,
            });
        }
        self.record_mut().stage(name, value);
        self.invalidate();
        Ok(())
    }

    /// Handles for an ID list field. Not memoized.
    async fn related<R: Resource>(&mut self, name: &str) -> Result<Vec<R>> {
        let ids = record::id_list(name, self.field(name).await?)?;
        let client = self.client();
        Ok(ids.iter().map(|id| R::new(client, id)).collect())
    }

    /// Handle for a single ID field; `null` means no relation
    async fn related_one<R: Resource>(&mut self, name: &str) -> Result<Option<R>> {
        let value = self.field(name).await?;
        if value.is_null() {
            return Ok(None);
        }
        let id = record::id_string(name, value)?;
        Ok(Some(R::new(self.client(), id)))
    }

    /// Re-fetch unconditionally, dropping staged edits and memoized relationships
    async fn refresh(&mut self) -> Result<&mut Self> {
        self.record_mut().fetch().await?;
        self.record_mut().discard_staged();
        self.invalidate();
        Ok(self)
    }

    /// PUT the current representation if the resource exists, otherwise POST
    /// staged edits to the collection; then refresh.
    ///
    /// The existence check and the write are separate round trips.
    async fn save(&mut self) -> Result<()> {
        if self.exists().await? {
            let body = Value::Object(self.record().representation());
            self.client().put(self.url(), &body).await?;
        } else if self.record().has_staged() {
            let body = Value::Object(self.record().staged().clone());
            let url = self.client().collection_url(Self::COLLECTION);
            self.client().post(&url, &body).await?;
        }
        self.refresh().await?;
        Ok(())
    }

    /// DELETE the resource. Fails locally if the server doesn't have it.
    async fn delete(&mut self) -> Result<()> {
        if !self.exists().await? {
            return Err(Error::DoesNotExist(format!("{} {}", Self::KIND, self.id())));
        }
        self.client().delete(self.url()).await?;
        self.record_mut().forget();
        self.invalidate();
        Ok(())
    }

    /// POST `fields` to the collection and return a handle for the new resource
    async fn create(client: &CaseLink, fields: Fields) -> Result<Self> {
        if let Some(missing) = Self::REQUIRED_ON_CREATE
            .iter()
            .find(|name| !fields.contains_key(**name))
        {
            return Err(Error::MissingField(*missing));
        }

        let url = client.collection_url(Self::COLLECTION);
        let response = client.post(&url, &Value::Object(fields)).await?;
        let Some(id) = response.get("id") else {
            return Err(Error::MalformedResponse {
                url,
                reason: "response has no id",
            });
        };
        let id = record::id_string("id", id)?;

        tracing::debug!("Created {} {}", Self::KIND, id);
        Ok(Self::new(client, id))
    }
}

//! Cached representation store shared by every entity type.

use crate::api::client::CaseLink;
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// JSON object fields of a representation
pub type Fields = Map<String, Value>;

/// Handle state for one remote resource: where it lives, what the server last
/// said about it, and what has been assigned locally since.
#[derive(Debug, Clone)]
pub struct Record {
    client: CaseLink,
    id: String,
    url: String,
    remote: Option<Fields>,
    staged: Fields,
}

impl Record {
    pub fn new(client: &CaseLink, collection: &str, id: String) -> Self {
        let url = client.resource_url(collection, &id);
        Self {
            client: client.clone(),
            id,
            url,
            remote: None,
            staged: Fields::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn client(&self) -> &CaseLink {
        &self.client
    }

    /// True once a representation has been fetched from the server
    pub fn is_loaded(&self) -> bool {
        self.remote.is_some()
    }

    pub fn has_staged(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Locally assigned fields awaiting `save()`
    pub fn staged(&self) -> &Fields {
        &self.staged
    }

    /// Look up a field, staged edits first
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.staged
            .get(name)
            .or_else(|| self.remote.as_ref().and_then(|fields| fields.get(name)))
    }

    /// Full current representation: remote fields overlaid with staged edits
    pub fn representation(&self) -> Fields {
        let mut fields = self.remote.clone().unwrap_or_default();
        for (name, value) in &self.staged {
            fields.insert(name.clone(), value.clone());
        }
        fields
    }

    pub fn stage(&mut self, name: &str, value: Value) {
        self.staged.insert(name.to_string(), value);
    }

    /// GET the resource and replace the cached representation.
    /// Staged edits survive.
    pub(crate) async fn fetch(&mut self) -> Result<()> {
        let response = self.client.get(&self.url).await?;
        match response {
            Value::Object(fields) => {
                self.remote = Some(fields);
                Ok(())
            }
            _ => Err(Error::MalformedResponse {
                url: self.url.clone(),
                reason: "representation is not a JSON object",
            }),
        }
    }

    pub(crate) fn discard_staged(&mut self) {
        self.staged.clear();
    }

    /// Drop everything known about the resource
    pub(crate) fn forget(&mut self) {
        self.remote = None;
        self.staged.clear();
    }
}

/// Coerce a JSON identifier (string or number) into its string form
pub fn id_string(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::InvalidField {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Coerce a JSON array of identifiers
pub fn id_list(field: &str, value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Array(items) => items.iter().map(|item| id_string(field, item)).collect(),
        other => Err(Error::InvalidField {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

//! Response envelopes.
//!
//! Every body the API returns is wrapped in an envelope with a `type`
//! discriminator (`"success"` or `"error"`) and the HTTP `statusCode`.
//! Success envelopes carry the payload under the resource's singular name
//! (`author`) or, for collections, its plural name (`authors`) next to a
//! `count`.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fabula_core::links::Linked;
use fabula_core::resource::Resource;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Classified;

/// Envelope for a single linked resource.
pub type ResourceResponse<R> = Envelope<Linked<R>>;

/// Envelope for a list of linked resources.
pub type CollectionResponse<R> = Envelope<Vec<Linked<R>>>;

/// A success envelope: `{type, statusCode, message?, count?, <key>: payload}`.
///
/// A `Location` header is attached when the envelope describes a newly
/// created resource.
#[derive(Debug)]
pub struct Envelope<T> {
    status: StatusCode,
    message: Option<String>,
    count: Option<usize>,
    key: &'static str,
    payload: T,
    location: Option<String>,
}

impl<R: Resource> Envelope<Linked<R>> {
    /// A 200 envelope around one record, with its links attached.
    pub fn resource(record: R, prefix: &str) -> Self {
        Self {
            status: StatusCode::OK,
            message: None,
            count: None,
            key: R::SINGULAR,
            payload: Linked::new(record, prefix),
            location: None,
        }
    }

    /// A 201 envelope for a freshly inserted record; `Location` is its `href`.
    pub fn created(record: R, prefix: &str) -> Self {
        let mut envelope = Self::resource(record, prefix);
        envelope.status = StatusCode::CREATED;
        envelope.location = Some(envelope.payload.href.clone());
        envelope
    }
}

impl<R: Resource> Envelope<Vec<Linked<R>>> {
    /// A 200 envelope around a collection; `count` is the number of records.
    pub fn collection(records: Vec<R>, prefix: &str) -> Self {
        Self {
            status: StatusCode::OK,
            message: None,
            count: Some(records.len()),
            key: R::COLLECTION,
            payload: Linked::all(records, prefix),
            location: None,
        }
    }
}

impl<T> Envelope<T> {
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "success")?;
        map.serialize_entry("statusCode", &self.status.as_u16())?;
        if let Some(message) = &self.message {
            map.serialize_entry("message", message)?;
        }
        if let Some(count) = self.count {
            map.serialize_entry("count", &count)?;
        }
        map.serialize_entry(self.key, &self.payload)?;
        map.end()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(mut self) -> Response {
        let status = self.status;
        match self.location.take() {
            Some(location) => (status, [(header::LOCATION, location)], Json(self)).into_response(),
            None => (status, Json(self)).into_response(),
        }
    }
}

/// An error envelope: `{type: "error", statusCode, message, fields?}`.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl From<Classified> for ErrorBody {
    fn from(classified: Classified) -> Self {
        Self {
            kind: "error",
            status_code: classified.status().as_u16(),
            message: classified.message,
            fields: classified.fields,
        }
    }
}

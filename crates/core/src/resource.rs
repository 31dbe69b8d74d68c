//! The [`Resource`] trait describes how an entity is addressed over HTTP.

use crate::types::DbId;

/// A CRUD-managed entity exposed under `<prefix>/<COLLECTION>/<id>`.
pub trait Resource {
    /// Human-readable entity name used in logs and `NotFound` errors.
    const ENTITY: &'static str;
    /// Envelope key for single-resource responses (`author`).
    const SINGULAR: &'static str;
    /// Path segment and envelope key for collections (`authors`).
    const COLLECTION: &'static str;
    /// Child collections reachable at `<self>/<child>`.
    const CHILDREN: &'static [&'static str] = &[];

    fn id(&self) -> DbId;

    /// Links to the owning resources, if any are set on this record.
    fn parents(&self) -> Vec<ParentLink> {
        Vec::new()
    }
}

/// A link from a record to the resource that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLink {
    /// Key the link is rendered under (`author`).
    pub rel: &'static str,
    /// Collection the parent lives in (`authors`).
    pub collection: &'static str,
    pub id: DbId,
}

//! Hypermedia link construction.
//!
//! Links are derived from the mount prefix and record ids at response time;
//! they are never stored.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::resource::Resource;
use crate::types::DbId;

/// Prefix the resource routers are mounted under unless configured otherwise.
pub const DEFAULT_API_PREFIX: &str = "/api";

/// `<prefix>/<collection>/<id>`
pub fn self_uri(prefix: &str, collection: &str, id: DbId) -> String {
    format!("{}/{collection}/{id}", prefix.trim_end_matches('/'))
}

/// `<prefix>/<collection>/<id>/<related>`
pub fn related_uri(prefix: &str, collection: &str, id: DbId, related: &str) -> String {
    format!("{}/{related}", self_uri(prefix, collection, id))
}

/// A record together with its computed links.
///
/// Serializes as the record's own fields plus `href` and one key per
/// related collection or parent.
#[derive(Debug, Clone, Serialize)]
pub struct Linked<T> {
    #[serde(flatten)]
    pub record: T,
    pub href: String,
    #[serde(flatten)]
    pub links: BTreeMap<&'static str, String>,
}

impl<T: Resource> Linked<T> {
    pub fn new(record: T, prefix: &str) -> Self {
        let id = record.id();
        let href = self_uri(prefix, T::COLLECTION, id);

        let mut links = BTreeMap::new();
        for child in T::CHILDREN {
            links.insert(*child, related_uri(prefix, T::COLLECTION, id, child));
        }
        for parent in record.parents() {
            links.insert(parent.rel, self_uri(prefix, parent.collection, parent.id));
        }

        Self {
            record,
            href,
            links,
        }
    }

    /// Attach links to every record of a collection, preserving order.
    pub fn all(records: Vec<T>, prefix: &str) -> Vec<Self> {
        records
            .into_iter()
            .map(|record| Self::new(record, prefix))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::resource::ParentLink;

    #[derive(Serialize)]
    struct Book {
        id: DbId,
        title: &'static str,
        shelf_id: Option<DbId>,
    }

    impl Resource for Book {
        const ENTITY: &'static str = "Book";
        const SINGULAR: &'static str = "book";
        const COLLECTION: &'static str = "books";
        const CHILDREN: &'static [&'static str] = &["pages"];

        fn id(&self) -> DbId {
            self.id
        }

        fn parents(&self) -> Vec<ParentLink> {
            self.shelf_id
                .map(|id| ParentLink {
                    rel: "shelf",
                    collection: "shelves",
                    id,
                })
                .into_iter()
                .collect()
        }
    }

    #[test]
    fn self_uri_joins_segments() {
        assert_eq!(self_uri("/api", "authors", 3), "/api/authors/3");
    }

    #[test]
    fn trailing_slash_in_prefix_is_ignored() {
        assert_eq!(self_uri("/api/", "novels", 1), "/api/novels/1");
        assert_eq!(
            related_uri("/api/", "novels", 1, "characters"),
            "/api/novels/1/characters"
        );
    }

    #[test]
    fn linked_record_flattens_fields_and_links() {
        let book = Book {
            id: 4,
            title: "Idoru",
            shelf_id: Some(2),
        };
        let value = serde_json::to_value(Linked::new(book, "/api")).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 4,
                "title": "Idoru",
                "shelf_id": 2,
                "href": "/api/books/4",
                "pages": "/api/books/4/pages",
                "shelf": "/api/shelves/2",
            })
        );
    }

    #[test]
    fn parent_link_omitted_when_unset() {
        let book = Book {
            id: 1,
            title: "Neuromancer",
            shelf_id: None,
        };
        let value = serde_json::to_value(Linked::new(book, "/api")).unwrap();
        assert!(value.get("shelf").is_none());
        assert_eq!(value["pages"], "/api/books/1/pages");
    }

    #[test]
    fn all_preserves_order() {
        let books = vec![
            Book {
                id: 2,
                title: "b",
                shelf_id: None,
            },
            Book {
                id: 1,
                title: "a",
                shelf_id: None,
            },
        ];
        let linked = Linked::all(books, "/api");
        let hrefs: Vec<_> = linked.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, ["/api/books/2", "/api/books/1"]);
    }
}

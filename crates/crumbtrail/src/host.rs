//! The collaborators a content-management host provides to the trail generator.
//!
//! Every lookup is synchronous and expected to be cheap. Failures are reported as
//! [`HostError`] and absorbed by the generator, never surfaced to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::Condition;

/// The identifier of a post, page, attachment, term or author.
pub type Id = u64;

pub const POST: &str = "post";
pub const PAGE: &str = "page";
pub const PRODUCT: &str = "product";
pub const CATEGORY: &str = "category";
pub const PRODUCT_CATEGORY: &str = "product_cat";

/// Machine-name prefix of commerce attribute taxonomies.
pub const ATTRIBUTE_TAXONOMY_PREFIX: &str = "pa_";

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum HostError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Id },

    #[error("{kind} {id} has no link")]
    NoLink { kind: &'static str, id: Id },

    #[error("{0}")]
    Other(String),
}

/// A taxonomy term.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Term {
    pub id: Id,
    pub name: String,
    pub slug: String,
    pub taxonomy: String,
    pub parent: Option<Id>,
}

/// A registered taxonomy.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    pub name: String,
    pub label: String,
    pub rewrite_slug: Option<String>,
}

impl Taxonomy {
    /// Whether this is a commerce attribute taxonomy (e.g. `pa_color`).
    pub fn is_attribute(&self) -> bool {
        self.name.starts_with(ATTRIBUTE_TAXONOMY_PREFIX)
    }
}

/// A registered post type.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct PostType {
    pub name: String,
    /// The plural label, used as the archive title and on single items.
    pub label: String,
    pub archive_link: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: Id,
    pub display_name: String,
}

/// The date a date archive is scoped to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct ArchiveDate {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// Which parent chain to walk.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Hierarchy<'a> {
    /// A hierarchical taxonomy, by machine name.
    Taxonomy(&'a str),

    /// A hierarchical post type, by machine name.
    PostType(&'a str),
}

/// Describes the page currently being displayed.
pub trait QueryContext {
    /// Whether the current page satisfies `condition`.
    fn is(&self, condition: Condition) -> bool;

    /// The classic pagination page number. `0` and `1` mean "not paginated".
    fn page_number(&self) -> u32 {
        0
    }

    /// The product-listing page number. `0` and `1` mean "not paginated".
    fn product_page_number(&self) -> u32 {
        0
    }

    /// The post, page, attachment or term being displayed.
    fn queried_id(&self) -> Option<Id>;

    fn post_type(&self) -> Option<String>;

    fn archive_date(&self) -> Option<ArchiveDate> {
        None
    }

    fn author(&self) -> Option<Author> {
        None
    }

    fn search_query(&self) -> String {
        String::new()
    }
}

pub trait ContentProvider {
    fn home_url(&self) -> String;

    fn title(&self, id: Id) -> Option<String>;

    fn slug(&self, id: Id) -> Option<String>;

    fn permalink(&self, id: Id) -> Result<String, HostError>;

    /// The immediate parent, or `None` for top-level content.
    fn parent(&self, id: Id) -> Option<Id>;

    fn post_type_object(&self, name: &str) -> Option<PostType>;

    fn year_link(&self, year: i32) -> String;

    fn month_link(&self, year: i32, month: u32) -> String;

    /// The page configured as the static front page, if any.
    fn front_page(&self) -> Option<Id> {
        None
    }
}

pub trait TaxonomyProvider {
    fn term(&self, id: Id) -> Result<Term, HostError>;

    fn term_link(&self, term: &Term) -> Result<String, HostError>;

    fn taxonomy(&self, name: &str) -> Option<Taxonomy>;

    /// The terms of `taxonomy` assigned to `object`, parents first.
    fn object_terms(&self, object: Id, taxonomy: &str) -> Vec<Term>;
}

pub trait HierarchyProvider {
    /// The ancestors of `id`, nearest first, excluding `id` itself.
    fn ancestors(&self, id: Id, hierarchy: Hierarchy<'_>) -> Result<Vec<Id>, HostError>;
}

/// The commerce layer. Hosts without one can rely on the defaults.
pub trait ShopProvider {
    fn shop_page(&self) -> Option<Id> {
        None
    }

    /// The permalink base of single products (e.g. `/shop/%product_cat%`).
    fn product_base(&self) -> Option<String> {
        None
    }
}

/// Everything the generator needs to know about the site.
pub trait Host: ContentProvider + TaxonomyProvider + HierarchyProvider + ShopProvider {}

impl<T> Host for T where
    T: ContentProvider + TaxonomyProvider + HierarchyProvider + ShopProvider + ?Sized
{
}

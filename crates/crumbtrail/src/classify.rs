use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::host::QueryContext;

/// A predicate the host can answer about the current page.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The site front page.
    FrontPage,
    /// The blog posts index.
    Home,
    NotFound,
    Attachment,
    /// A single post of any type other than `page`.
    Single,
    ProductCategory,
    ProductTag,
    Shop,
    Page,
    PostTypeArchive,
    Category,
    Tag,
    Author,
    Date,
    Tax,
    Search,
}

/// The kind of page being displayed, which selects the crumb builder.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    PostsIndex,
    NotFound,
    Attachment,
    Single,
    ProductCategory,
    ProductTag,
    Shop,
    Page,
    PostTypeArchive,
    Category,
    Tag,
    Author,
    Date,
    Taxonomy,
    Search,
}

impl PageKind {
    /// All page kinds, in the order they are tested. The first match wins.
    pub const ALL: [PageKind; 15] = [
        PageKind::PostsIndex,
        PageKind::NotFound,
        PageKind::Attachment,
        PageKind::Single,
        PageKind::ProductCategory,
        PageKind::ProductTag,
        PageKind::Shop,
        PageKind::Page,
        PageKind::PostTypeArchive,
        PageKind::Category,
        PageKind::Tag,
        PageKind::Author,
        PageKind::Date,
        PageKind::Taxonomy,
        PageKind::Search,
    ];

    /// The condition that selects this page kind.
    pub fn condition(self) -> Condition {
        match self {
            PageKind::PostsIndex => Condition::Home,
            PageKind::NotFound => Condition::NotFound,
            PageKind::Attachment => Condition::Attachment,
            PageKind::Single => Condition::Single,
            PageKind::ProductCategory => Condition::ProductCategory,
            PageKind::ProductTag => Condition::ProductTag,
            PageKind::Shop => Condition::Shop,
            PageKind::Page => Condition::Page,
            PageKind::PostTypeArchive => Condition::PostTypeArchive,
            PageKind::Category => Condition::Category,
            PageKind::Tag => Condition::Tag,
            PageKind::Author => Condition::Author,
            PageKind::Date => Condition::Date,
            PageKind::Taxonomy => Condition::Tax,
            PageKind::Search => Condition::Search,
        }
    }
}

/// Classifies the current page.
///
/// Returns `None` for the front page, which never gets a trail, and for pages that match no
/// condition at all.
pub fn classify(query: &(impl QueryContext + ?Sized)) -> Option<PageKind> {
    if query.is(Condition::FrontPage) {
        trace!("front page, skipping classification");
        return None;
    }

    PageKind::ALL
        .into_iter()
        .find(|kind| query.is(kind.condition()))
}

//! An in-memory host, loadable from TOML.

use std::collections::HashSet;

use serde::Deserialize;
use slug::slugify;

use crate::classify::Condition;
use crate::host::{
    ArchiveDate, Author, ContentProvider, Hierarchy, HierarchyProvider, HostError, Id, PostType,
    QueryContext, ShopProvider, Taxonomy, TaxonomyProvider, Term,
};

#[derive(Debug, Deserialize)]
pub struct PostRecord {
    pub id: Id,
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    pub parent: Option<Id>,
    pub link: Option<String>,
    /// Assigned term ids, from any taxonomy.
    #[serde(default)]
    pub terms: Vec<Id>,
}

fn default_post_type() -> String {
    crate::host::POST.to_string()
}

#[derive(Debug, Deserialize)]
pub struct TermRecord {
    pub id: Id,
    pub name: String,
    pub slug: Option<String>,
    pub taxonomy: String,
    pub parent: Option<Id>,
    pub link: Option<String>,
}

impl TermRecord {
    fn to_term(&self) -> Term {
        Term {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone().unwrap_or_else(|| slugify(&self.name)),
            taxonomy: self.taxonomy.clone(),
            parent: self.parent.filter(|parent| *parent != 0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ShopSettings {
    pub page: Option<Id>,
    pub product_base: Option<String>,
}

/// A site whose content lives entirely in memory.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MemorySite {
    pub home_url: String,
    pub front_page: Option<Id>,
    pub shop: ShopSettings,
    pub posts: Vec<PostRecord>,
    pub terms: Vec<TermRecord>,
    pub taxonomies: Vec<Taxonomy>,
    pub post_types: Vec<PostType>,
}

impl MemorySite {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    fn post(&self, id: Id) -> Result<&PostRecord, HostError> {
        self.posts
            .iter()
            .find(|post| post.id == id)
            .ok_or(HostError::NotFound { kind: "post", id })
    }

    fn term_record(&self, id: Id) -> Result<&TermRecord, HostError> {
        self.terms
            .iter()
            .find(|term| term.id == id)
            .ok_or(HostError::NotFound { kind: "term", id })
    }

    fn base_url(&self) -> &str {
        self.home_url.trim_end_matches('/')
    }

    /// Follows `parent` links from `id`, nearest first. Stops at the first repeated id.
    fn walk_parents(&self, id: Id, parent_of: impl Fn(Id) -> Option<Id>) -> Vec<Id> {
        let mut seen = HashSet::from([id]);
        let mut ancestors = Vec::new();
        let mut current = id;

        while let Some(parent) = parent_of(current) {
            if !seen.insert(parent) {
                break;
            }

            ancestors.push(parent);
            current = parent;
        }

        ancestors
    }
}

impl ContentProvider for MemorySite {
    fn home_url(&self) -> String {
        self.home_url.clone()
    }

    fn title(&self, id: Id) -> Option<String> {
        self.post(id).ok().and_then(|post| post.title.clone())
    }

    fn slug(&self, id: Id) -> Option<String> {
        let post = self.post(id).ok()?;

        post.slug
            .clone()
            .or_else(|| post.title.as_deref().map(slugify))
    }

    fn permalink(&self, id: Id) -> Result<String, HostError> {
        self.post(id)?
            .link
            .clone()
            .ok_or(HostError::NoLink { kind: "post", id })
    }

    fn parent(&self, id: Id) -> Option<Id> {
        self.post(id)
            .ok()
            .and_then(|post| post.parent)
            .filter(|parent| *parent != 0)
    }

    fn post_type_object(&self, name: &str) -> Option<PostType> {
        self.post_types
            .iter()
            .find(|post_type| post_type.name == name)
            .cloned()
    }

    fn year_link(&self, year: i32) -> String {
        format!("{}/{year}/", self.base_url())
    }

    fn month_link(&self, year: i32, month: u32) -> String {
        format!("{}/{year}/{month:02}/", self.base_url())
    }

    fn front_page(&self) -> Option<Id> {
        self.front_page
    }
}

impl TaxonomyProvider for MemorySite {
    fn term(&self, id: Id) -> Result<Term, HostError> {
        self.term_record(id).map(TermRecord::to_term)
    }

    fn term_link(&self, term: &Term) -> Result<String, HostError> {
        self.term_record(term.id)?
            .link
            .clone()
            .ok_or(HostError::NoLink {
                kind: "term",
                id: term.id,
            })
    }

    fn taxonomy(&self, name: &str) -> Option<Taxonomy> {
        self.taxonomies
            .iter()
            .find(|taxonomy| taxonomy.name == name)
            .cloned()
    }

    /// Ordered by parent id, descending, so nested terms come before top-level ones.
    fn object_terms(&self, object: Id, taxonomy: &str) -> Vec<Term> {
        let Ok(post) = self.post(object) else {
            return Vec::new();
        };

        let mut terms = post
            .terms
            .iter()
            .filter_map(|id| self.term_record(*id).ok())
            .filter(|term| term.taxonomy == taxonomy)
            .map(TermRecord::to_term)
            .collect::<Vec<_>>();

        terms.sort_by(|a, b| b.parent.unwrap_or(0).cmp(&a.parent.unwrap_or(0)));
        terms
    }
}

impl HierarchyProvider for MemorySite {
    fn ancestors(&self, id: Id, hierarchy: Hierarchy<'_>) -> Result<Vec<Id>, HostError> {
        match hierarchy {
            Hierarchy::Taxonomy(taxonomy) => {
                let term = self.term_record(id)?;
                if term.taxonomy != taxonomy {
                    return Err(HostError::Other(format!(
                        "term {id} is not in taxonomy '{taxonomy}'"
                    )));
                }

                Ok(self.walk_parents(id, |current| {
                    self.term_record(current)
                        .ok()
                        .and_then(|term| term.parent)
                        .filter(|parent| *parent != 0)
                }))
            }
            Hierarchy::PostType(_) => {
                self.post(id)?;

                Ok(self.walk_parents(id, |current| self.parent(current)))
            }
        }
    }
}

impl ShopProvider for MemorySite {
    fn shop_page(&self) -> Option<Id> {
        self.shop.page
    }

    fn product_base(&self) -> Option<String> {
        self.shop.product_base.clone()
    }
}

/// A request for a single page, loadable from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MemoryQuery {
    pub conditions: Vec<Condition>,
    pub paged: u32,
    pub product_page: u32,
    pub queried_id: Option<Id>,
    pub post_type: Option<String>,
    pub date: Option<ArchiveDate>,
    pub author: Option<Author>,
    pub search: String,
}

impl MemoryQuery {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

impl QueryContext for MemoryQuery {
    fn is(&self, condition: Condition) -> bool {
        self.conditions.contains(&condition)
    }

    fn page_number(&self) -> u32 {
        self.paged
    }

    fn product_page_number(&self) -> u32 {
        self.product_page
    }

    fn queried_id(&self) -> Option<Id> {
        self.queried_id
    }

    fn post_type(&self) -> Option<String> {
        self.post_type.clone()
    }

    fn archive_date(&self) -> Option<ArchiveDate> {
        self.date
    }

    fn author(&self) -> Option<Author> {
        self.author.clone()
    }

    fn search_query(&self) -> String {
        self.search.clone()
    }
}

//! Crumb builders, one per [`PageKind`].

use chrono::Month;
use tracing::debug;

use crate::ancestors::push_ancestors;
use crate::classify::{classify, PageKind};
use crate::config::Labels;
use crate::hooks::Hooks;
use crate::host::{
    Hierarchy, Host, Id, QueryContext, Term, CATEGORY, PAGE, POST, PRODUCT, PRODUCT_CATEGORY,
};
use crate::permalink::join_url;
use crate::trail::{Trail, TrailBuilder};

/// Classifies the current page and builds its trail, including the pagination crumb.
///
/// Returns the page kind that was selected alongside the trail. The trail is empty when no
/// kind matched, including on the front page.
pub fn generate_trail<Q, H>(
    query: &Q,
    host: &H,
    hooks: &Hooks,
    labels: &Labels,
) -> (Option<PageKind>, Trail)
where
    Q: QueryContext + ?Sized,
    H: Host + ?Sized,
{
    let trail = TrailBuilder::new(hooks);

    let Some(kind) = classify(query) else {
        debug!("no page kind matched");
        return (None, trail.finish());
    };

    debug!(?kind, "classified page");

    let context = Context {
        query,
        host,
        labels,
    };

    let trail = context.build(kind, trail);
    let trail = context.paginate(trail);

    (Some(kind), trail.finish())
}

struct Context<'a, Q: ?Sized, H: ?Sized> {
    query: &'a Q,
    host: &'a H,
    labels: &'a Labels,
}

impl<'a, Q, H> Context<'a, Q, H>
where
    Q: QueryContext + ?Sized,
    H: Host + ?Sized,
{
    fn build<'h>(&self, kind: PageKind, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        match kind {
            PageKind::PostsIndex => self.posts_index(trail),
            PageKind::NotFound => self.not_found(trail),
            PageKind::Attachment => self.attachment(trail),
            PageKind::Single => self.single(trail),
            PageKind::ProductCategory => self.product_category(trail),
            PageKind::ProductTag => self.product_tag(trail),
            PageKind::Shop => self.shop(trail),
            PageKind::Page => self.page(trail),
            PageKind::PostTypeArchive => self.post_type_archive(trail),
            PageKind::Category => self.category(trail),
            PageKind::Tag => self.tag(trail),
            PageKind::Author => self.author(trail),
            PageKind::Date => self.date(trail),
            PageKind::Taxonomy => self.taxonomy(trail),
            PageKind::Search => self.search(trail),
        }
    }

    fn page_number(&self) -> Option<u32> {
        [self.query.page_number(), self.query.product_page_number()]
            .into_iter()
            .find(|number| *number > 1)
    }

    fn is_paginated(&self) -> bool {
        self.page_number().is_some()
    }

    /// Appends a "Page N" crumb on paginated listings. It takes over the active slot.
    fn paginate<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        match self.page_number() {
            Some(number) => {
                debug!(number, "appending pagination crumb");

                trail.deactivate_last().crumb(
                    &format!("{} {number}", self.labels.page),
                    "",
                    true,
                    None,
                )
            }
            None => trail,
        }
    }

    fn queried_term(&self) -> Option<Term> {
        let id = self.query.queried_id()?;

        self.host
            .term(id)
            .map_err(|err| debug!(id, %err, "failed to resolve queried term"))
            .ok()
    }

    fn term_link(&self, term: &Term) -> String {
        self.host.term_link(term).unwrap_or_else(|err| {
            debug!(term = term.id, %err, "term has no link");
            String::new()
        })
    }

    fn permalink(&self, id: Id) -> String {
        self.host.permalink(id).unwrap_or_else(|err| {
            debug!(id, %err, "post has no link");
            String::new()
        })
    }

    /// Prepends the shop page, but only when the product permalinks are nested under it.
    fn prepend_shop_page<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let Some(shop_page) = self.host.shop_page() else {
            return trail;
        };

        let Some(slug) = self.host.slug(shop_page) else {
            debug!(shop_page, "shop page does not exist");
            return trail;
        };

        let nested = self
            .host
            .product_base()
            .is_some_and(|base| base.contains(&format!("/{slug}")));

        if !nested || self.host.front_page() == Some(shop_page) {
            return trail;
        }

        let Some(title) = self.host.title(shop_page) else {
            debug!(shop_page, "skipping shop page without title");
            return trail;
        };

        match self.host.permalink(shop_page) {
            Ok(link) => trail.crumb(&title, link, false, Some(shop_page)),
            Err(err) => {
                debug!(shop_page, %err, "skipping shop page without link");
                trail
            }
        }
    }

    fn posts_index<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let id = self.query.queried_id();

        match id.and_then(|id| self.host.title(id)) {
            Some(title) => trail.crumb(&title, self.host.home_url(), !self.is_paginated(), id),
            None => trail,
        }
    }

    fn not_found<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        trail.crumb(&self.labels.not_found, "", true, None)
    }

    fn attachment<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let Some(id) = self.query.queried_id() else {
            return trail;
        };

        match self.host.title(id) {
            Some(title) => trail.crumb(&title, self.permalink(id), true, Some(id)),
            None => trail,
        }
    }

    fn single<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let Some(id) = self.query.queried_id() else {
            return trail;
        };

        let post_type = self.query.post_type().unwrap_or_else(|| POST.to_string());

        let mut trail = match post_type.as_str() {
            PRODUCT => self.product_category_chain(id, self.prepend_shop_page(trail)),
            POST => self
                .host
                .object_terms(id, CATEGORY)
                .into_iter()
                .fold(trail, |trail, category| {
                    let link = self.term_link(&category);
                    trail.crumb(&category.name, link, false, Some(category.id))
                }),
            other => match self.host.post_type_object(other) {
                Some(object) => {
                    let link = object.archive_link.unwrap_or_default();
                    let trail = trail.crumb(&object.label, link, false, None);
                    push_ancestors(self.host, id, Hierarchy::PostType(other), trail)
                }
                None => trail,
            },
        };

        if let Some(title) = self.host.title(id) {
            trail = trail.crumb(&title, "", true, Some(id));
        }

        trail
    }

    /// The primary category of a product, preceded by its ancestors.
    fn product_category_chain<'h>(&self, id: Id, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let terms = self.host.object_terms(id, PRODUCT_CATEGORY);

        let Some(primary) = trail.hooks().primary_term(&terms) else {
            return trail;
        };

        let trail = push_ancestors(
            self.host,
            primary.id,
            Hierarchy::Taxonomy(&primary.taxonomy),
            trail,
        );

        let link = self.term_link(&primary);
        trail.crumb(&primary.name, link, false, Some(primary.id))
    }

    fn product_category<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let Some(term) = self.queried_term() else {
            return trail;
        };

        let trail = self.prepend_shop_page(trail);
        let trail = push_ancestors(self.host, term.id, Hierarchy::Taxonomy(&term.taxonomy), trail);

        let link = self.term_link(&term);
        trail.crumb(&term.name, link, !self.is_paginated(), Some(term.id))
    }

    fn product_tag<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let Some(term) = self.queried_term() else {
            return trail;
        };

        let trail = self.prepend_shop_page(trail);

        let name = format!("{}: {}", self.labels.tagged_products, term.name);
        let link = self.term_link(&term);
        trail.crumb(&name, link, !self.is_paginated(), Some(term.id))
    }

    fn shop<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let products = self.host.post_type_object(PRODUCT);

        let name = self
            .host
            .shop_page()
            .and_then(|id| self.host.title(id))
            .filter(|title| !title.is_empty())
            .or_else(|| products.as_ref().map(|products| products.label.clone()));

        let Some(name) = name else {
            return trail;
        };

        let link = products
            .and_then(|products| products.archive_link)
            .unwrap_or_default();

        trail.crumb(&name, link, !self.is_paginated(), None)
    }

    fn page<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let Some(id) = self.query.queried_id() else {
            return trail;
        };

        let post_type = self.query.post_type().unwrap_or_else(|| PAGE.to_string());

        let trail = if self.host.parent(id).is_some() {
            push_ancestors(self.host, id, Hierarchy::PostType(&post_type), trail)
        } else {
            trail
        };

        match self.host.title(id) {
            Some(title) => trail.crumb(&title, self.permalink(id), true, Some(id)),
            None => trail,
        }
    }

    fn post_type_archive<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let object = self
            .query
            .post_type()
            .and_then(|post_type| self.host.post_type_object(&post_type));

        match object {
            Some(object) => trail.crumb(
                &object.label,
                object.archive_link.unwrap_or_default(),
                !self.is_paginated(),
                None,
            ),
            None => trail,
        }
    }

    fn category<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let Some(term) = self.queried_term() else {
            return trail;
        };

        let trail = if term.parent.is_some() {
            push_ancestors(self.host, term.id, Hierarchy::Taxonomy(&term.taxonomy), trail)
        } else {
            trail
        };

        let link = self.term_link(&term);
        trail.crumb(&term.name, link, !self.is_paginated(), Some(term.id))
    }

    fn tag<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let Some(term) = self.queried_term() else {
            return trail;
        };

        let name = format!("{}: {}", self.labels.tagged_posts, term.name);
        let link = self.term_link(&term);
        trail.crumb(&name, link, !self.is_paginated(), Some(term.id))
    }

    fn author<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        match self.query.author() {
            Some(author) => trail.crumb(
                &format!("{}: {}", self.labels.author, author.display_name),
                "",
                true,
                Some(author.id),
            ),
            None => trail,
        }
    }

    fn date<'h>(&self, mut trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let Some(date) = self.query.archive_date() else {
            return trail;
        };

        let listing_active = !self.is_paginated();

        trail = trail.crumb(
            &date.year.to_string(),
            self.host.year_link(date.year),
            date.month.is_none() && listing_active,
            None,
        );

        let Some(month) = date.month else {
            return trail;
        };

        trail = trail.crumb(
            &month_name(month),
            self.host.month_link(date.year, month),
            date.day.is_none() && listing_active,
            None,
        );

        match date.day {
            Some(day) => trail.crumb(&format!("{day:02}"), "", true, None),
            None => trail,
        }
    }

    /// Generic taxonomy archives: the taxonomy label, the term's ancestors, then the term.
    fn taxonomy<'h>(&self, mut trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let Some(term) = self.queried_term() else {
            return trail;
        };

        if let Some(taxonomy) = self.host.taxonomy(&term.taxonomy) {
            let link = if taxonomy.is_attribute() {
                let slug = taxonomy.rewrite_slug.as_deref().unwrap_or(&taxonomy.name);
                join_url(&self.host.home_url(), slug)
            } else {
                String::new()
            };

            trail = trail.crumb(&taxonomy.label, link, false, None);
        }

        if term.parent.is_some() {
            trail = push_ancestors(self.host, term.id, Hierarchy::Taxonomy(&term.taxonomy), trail);
        }

        let link = self.term_link(&term);
        trail.crumb(&term.name, link, !self.is_paginated(), Some(term.id))
    }

    fn search<'h>(&self, trail: TrailBuilder<'h>) -> TrailBuilder<'h> {
        let name = format!("{}: {}", self.labels.search, self.query.search_query());
        trail.crumb(&name, "", true, None)
    }
}

fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|month| Month::try_from(month).ok())
        .map(|month| month.name().to_string())
        .unwrap_or_else(|| format!("{month:02}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "13");
        assert_eq!(month_name(0), "00");
    }
}

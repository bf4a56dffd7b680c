use derive_more::Deref;
use serde::Serialize;

use crate::crumb::Crumb;
use crate::hooks::Hooks;
use crate::host::Id;

/// An ordered breadcrumb trail, from the site root to the current resource.
#[derive(Debug, Default, PartialEq, Eq, Clone, Deref, Serialize)]
pub struct Trail(Vec<Crumb>);

impl Trail {
    /// Returns the index of the active crumb, if any.
    pub fn active_position(&self) -> Option<usize> {
        self.0.iter().rposition(|crumb| crumb.active)
    }

    pub fn into_crumbs(self) -> Vec<Crumb> {
        self.0
    }
}

impl FromIterator<Crumb> for Trail {
    fn from_iter<T: IntoIterator<Item = Crumb>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Accumulates crumbs for a single generation pass.
///
/// The builder is threaded by value through the page-kind builder, the ancestor resolver and
/// the pagination step. Crumbs are only ever appended.
pub struct TrailBuilder<'h> {
    crumbs: Vec<Crumb>,
    hooks: &'h Hooks,
}

impl<'h> TrailBuilder<'h> {
    /// Returns a new, empty [`TrailBuilder`].
    pub fn new(hooks: &'h Hooks) -> Self {
        Self {
            crumbs: Vec::new(),
            hooks,
        }
    }

    /// Appends a crumb, passing it through the crumb hook first.
    pub fn crumb(self, name: &str, link: impl Into<String>, active: bool, id: Option<Id>) -> Self {
        self.push(Crumb::new(name, link, active, id))
    }

    pub fn push(mut self, crumb: Crumb) -> Self {
        self.crumbs.push(self.hooks.transform_crumb(crumb));
        self
    }

    /// Clears the `active` flag on the last crumb so that a following crumb can take it over.
    pub fn deactivate_last(mut self) -> Self {
        if let Some(last) = self.crumbs.last_mut() {
            last.active = false;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    pub fn hooks(&self) -> &'h Hooks {
        self.hooks
    }

    pub fn finish(self) -> Trail {
        Trail(self.crumbs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_insertion_order_is_display_order() {
        let hooks = Hooks::default();
        let trail = TrailBuilder::new(&hooks)
            .crumb("Media", "/media/", false, Some(1))
            .crumb("Books", "/media/books/", true, Some(2))
            .finish();

        let names = trail.iter().map(|crumb| crumb.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Media", "Books"]);
        assert_eq!(trail.active_position(), Some(1));
    }

    #[test]
    fn test_deactivate_last() {
        let hooks = Hooks::default();
        let builder = TrailBuilder::new(&hooks)
            .crumb("Books", "/books/", true, Some(2))
            .deactivate_last()
            .crumb("Page 2", "", true, None);

        assert_eq!(builder.len(), 2);

        let trail = builder.finish();
        assert_eq!(trail[0].active, false);
        assert_eq!(trail.active_position(), Some(1));
    }

    #[test]
    fn test_deactivate_last_on_empty_builder() {
        let hooks = Hooks::default();
        let builder = TrailBuilder::new(&hooks).deactivate_last();

        assert!(builder.is_empty());
        assert_eq!(builder.finish(), Trail::default());
    }

    #[test]
    fn test_crumb_hook_runs_before_append() {
        let hooks = Hooks::new().on_crumb(|mut crumb| {
            crumb.name = crumb.name.to_uppercase();
            crumb
        });

        let trail = TrailBuilder::new(&hooks)
            .crumb("<i>shoes</i>", "/shoes/", true, Some(9))
            .finish();

        assert_eq!(
            trail.into_crumbs(),
            vec![Crumb {
                name: "SHOES".to_string(),
                link: "/shoes/".to_string(),
                active: true,
                id: Some(9),
            }]
        );
    }
}

use std::fmt;
use std::sync::Arc;

use crate::crumb::Crumb;
use crate::host::Term;

pub type CrumbTransform = Arc<dyn Fn(Crumb) -> Crumb + Send + Sync>;

/// Picks the main category of a product. Receives the default choice and all candidates.
pub type PrimaryTermSelector = Arc<dyn Fn(&Term, &[Term]) -> Term + Send + Sync>;

/// Extension points that a host can hook into during generation.
#[derive(Default, Clone)]
pub struct Hooks {
    crumb_transform: Option<CrumbTransform>,
    primary_term_selector: Option<PrimaryTermSelector>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transform that runs on every crumb before it is appended to the trail.
    pub fn on_crumb(mut self, transform: impl Fn(Crumb) -> Crumb + Send + Sync + 'static) -> Self {
        self.crumb_transform = Some(Arc::new(transform));
        self
    }

    /// Registers a selector that overrides which category represents a product.
    pub fn select_primary_term(
        mut self,
        selector: impl Fn(&Term, &[Term]) -> Term + Send + Sync + 'static,
    ) -> Self {
        self.primary_term_selector = Some(Arc::new(selector));
        self
    }

    pub(crate) fn transform_crumb(&self, crumb: Crumb) -> Crumb {
        match self.crumb_transform.as_ref() {
            Some(transform) => transform(crumb),
            None => crumb,
        }
    }

    /// Returns the primary term out of `terms`, which the host orders parent-first.
    pub(crate) fn primary_term(&self, terms: &[Term]) -> Option<Term> {
        let first = terms.first()?;

        match self.primary_term_selector.as_ref() {
            Some(selector) => Some(selector(first, terms)),
            None => Some(first.clone()),
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("crumb_transform", &self.crumb_transform.is_some())
            .field("primary_term_selector", &self.primary_term_selector.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn term(id: u64, name: &str) -> Term {
        Term {
            id,
            name: name.to_string(),
            slug: name.to_lowercase(),
            taxonomy: "product_cat".to_string(),
            parent: None,
        }
    }

    #[test]
    fn test_primary_term_defaults_to_first() {
        let terms = vec![term(1, "Phones"), term(2, "Sale")];

        assert_eq!(Hooks::new().primary_term(&terms), Some(term(1, "Phones")));
        assert_eq!(Hooks::new().primary_term(&[]), None);
    }

    #[test]
    fn test_primary_term_selector() {
        let hooks = Hooks::new().select_primary_term(|default, terms| {
            terms
                .iter()
                .find(|term| term.name == "Sale")
                .unwrap_or(default)
                .clone()
        });

        let terms = vec![term(1, "Phones"), term(2, "Sale")];
        assert_eq!(hooks.primary_term(&terms), Some(term(2, "Sale")));
    }
}

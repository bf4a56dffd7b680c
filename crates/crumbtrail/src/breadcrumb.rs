use std::io;

use tracing::instrument;

use crate::builders::generate_trail;
use crate::classify::PageKind;
use crate::config::{OutputMode, RenderConfig, RenderConfigOverride};
use crate::hooks::Hooks;
use crate::host::{Host, QueryContext};
use crate::render::{render_trail, RenderError};
use crate::trail::Trail;

/// A breadcrumb that has not been generated yet.
pub struct Pending {
    hooks: Hooks,
}

/// A breadcrumb whose trail has been generated and can be rendered.
pub struct Generated {
    kind: Option<PageKind>,
    trail: Trail,
}

/// The breadcrumb for a single page view.
///
/// ```
/// use crumbtrail::memory::{MemoryQuery, MemorySite};
/// use crumbtrail::{Breadcrumb, Condition, RenderConfig};
///
/// let site = MemorySite::default();
/// let query = MemoryQuery {
///     conditions: vec![Condition::NotFound],
///     ..Default::default()
/// };
///
/// let breadcrumb = Breadcrumb::new(RenderConfig::default()).generate(&query, &site);
///
/// assert_eq!(breadcrumb.trail().len(), 1);
/// assert!(breadcrumb.render_to_string().unwrap().contains("Page not found"));
/// ```
pub struct Breadcrumb<S = Pending> {
    config: RenderConfig,
    state: S,
}

impl<S> Breadcrumb<S> {
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl Breadcrumb<Pending> {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            state: Pending {
                hooks: Hooks::default(),
            },
        }
    }

    /// Returns a new [`Breadcrumb`] using the default config with `overrides` applied.
    pub fn with_overrides(overrides: RenderConfigOverride) -> Self {
        Self::new(RenderConfig::default().merge(overrides))
    }

    pub fn hooks(mut self, hooks: Hooks) -> Self {
        self.state.hooks = hooks;
        self
    }

    /// Classifies the current page, builds its trail and appends pagination.
    #[instrument(skip_all)]
    pub fn generate<Q, H>(self, query: &Q, host: &H) -> Breadcrumb<Generated>
    where
        Q: QueryContext + ?Sized,
        H: Host + ?Sized,
    {
        let (kind, trail) = generate_trail(query, host, &self.state.hooks, &self.config.labels);

        Breadcrumb {
            config: self.config,
            state: Generated { kind, trail },
        }
    }
}

impl Breadcrumb<Generated> {
    pub fn trail(&self) -> &Trail {
        &self.state.trail
    }

    /// The page kind whose builder produced the trail, if any matched.
    pub fn page_kind(&self) -> Option<PageKind> {
        self.state.kind
    }

    pub fn render_to_string(&self) -> Result<String, RenderError> {
        render_trail(&self.config, &self.state.trail)
    }

    /// Renders according to the configured [`OutputMode`].
    ///
    /// In [`OutputMode::Echo`] the markup is written to `out` and `None` is returned. In
    /// [`OutputMode::Return`] nothing is written and the markup is returned.
    pub fn render(&self, out: &mut impl io::Write) -> Result<Option<String>, RenderError> {
        let html = self.render_to_string()?;

        match self.config.output {
            OutputMode::Echo => {
                out.write_all(html.as_bytes())?;
                Ok(None)
            }
            OutputMode::Return => Ok(Some(html)),
        }
    }

    pub fn into_trail(self) -> Trail {
        self.state.trail
    }
}

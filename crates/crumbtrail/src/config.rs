use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid container element '{0}'")]
    InvalidElement(String),
}

/// Whether rendering writes the markup out or hands it back.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    Echo,
    #[default]
    Return,
}

/// Localizable labels for crumbs that have no name of their own.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub not_found: String,
    pub page: String,
    pub search: String,
    pub author: String,
    pub tagged_posts: String,
    pub tagged_products: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            not_found: "Page not found".to_string(),
            page: "Page".to_string(),
            search: "Search".to_string(),
            author: "Author".to_string(),
            tagged_posts: "Posts tagged".to_string(),
            tagged_products: "Products tagged".to_string(),
        }
    }
}

/// Presentation options for a rendered trail.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub container_element: String,
    pub container_class: String,
    pub container_id: String,
    pub container_attributes: IndexMap<String, String>,
    pub before_html: String,
    pub after_html: String,
    pub list_class: String,
    pub list_attributes: IndexMap<String, String>,
    pub item_class: String,
    pub active_item_class: String,
    pub link_class: String,
    pub home_label: String,
    pub home_url: String,
    pub output: OutputMode,
    pub labels: Labels,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            container_element: "nav".to_string(),
            container_class: String::new(),
            container_id: String::new(),
            container_attributes: IndexMap::from([(
                "aria-label".to_string(),
                "Breadcrumb".to_string(),
            )]),
            before_html: String::new(),
            after_html: String::new(),
            list_class: "breadcrumb".to_string(),
            list_attributes: IndexMap::new(),
            item_class: "breadcrumb-item".to_string(),
            active_item_class: "active".to_string(),
            link_class: String::new(),
            home_label: "Home".to_string(),
            home_url: "/".to_string(),
            output: OutputMode::default(),
            labels: Labels::default(),
        }
    }
}

/// A partial [`RenderConfig`]. Every field that is set replaces the corresponding default.
#[derive(Debug, Default, PartialEq, Eq, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfigOverride {
    pub container_element: Option<String>,
    pub container_class: Option<String>,
    pub container_id: Option<String>,
    pub container_attributes: Option<IndexMap<String, String>>,
    pub before_html: Option<String>,
    pub after_html: Option<String>,
    pub list_class: Option<String>,
    pub list_attributes: Option<IndexMap<String, String>>,
    pub item_class: Option<String>,
    pub active_item_class: Option<String>,
    pub link_class: Option<String>,
    pub home_label: Option<String>,
    pub home_url: Option<String>,
    pub output: Option<OutputMode>,
    pub labels: Option<Labels>,
}

impl RenderConfigOverride {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

macro_rules! merge_fields {
    ($target:ident, $overrides:ident, $($field:ident),*) => {
        $(
            if let Some(value) = $overrides.$field {
                $target.$field = value;
            }
        )*
    };
}

impl RenderConfig {
    /// Parses a complete config, falling back to the defaults for missing fields.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Replaces every field that `overrides` sets.
    pub fn merge(mut self, overrides: RenderConfigOverride) -> Self {
        merge_fields!(
            self,
            overrides,
            container_element,
            container_class,
            container_id,
            container_attributes,
            before_html,
            after_html,
            list_class,
            list_attributes,
            item_class,
            active_item_class,
            link_class,
            home_label,
            home_url,
            output,
            labels
        );

        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_valid_name(&self.container_element) {
            Ok(())
        } else {
            Err(ConfigError::InvalidElement(self.container_element.clone()))
        }
    }
}

/// Whether `name` can be used as an element or attribute name verbatim.
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();

    matches!(chars.next(), Some(first) if first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

use std::io;

use thiserror::Error;
use tracing::warn;

use crate::config::{is_valid_name, RenderConfig};
use crate::html::{a, li, meta, ol, span, HtmlElement};
use crate::trail::Trail;

const BREADCRUMB_LIST: &str = "https://schema.org/BreadcrumbList";
const LIST_ITEM: &str = "https://schema.org/ListItem";

/// The position of the home item. Crumbs follow it.
pub const HOME_POSITION: usize = 1;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("render error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|value| !value.is_empty())
}

/// Renders the home item followed by every crumb in `trail`.
///
/// Returns an empty string for an empty trail; the container is never emitted on its own.
pub fn render_trail(config: &RenderConfig, trail: &Trail) -> Result<String, RenderError> {
    if trail.is_empty() {
        return Ok(String::new());
    }

    let container_element = if is_valid_name(&config.container_element) {
        config.container_element.as_str()
    } else {
        warn!(
            element = %config.container_element,
            "invalid container element, falling back to 'nav'"
        );
        "nav"
    };

    let home = item(
        config,
        &config.home_label,
        non_empty(&config.home_url),
        false,
        HOME_POSITION,
    );

    let crumbs = trail.iter().enumerate().map(|(index, crumb)| {
        let link = non_empty(&crumb.link).filter(|_| !crumb.active);
        item(config, &crumb.name, link, crumb.active, HOME_POSITION + index + 1)
    });

    let list = ol()
        .class::<&str>(non_empty(&config.list_class))
        .attrs(&config.list_attributes)
        .itemscope(BREADCRUMB_LIST)
        .child(home)
        .children(crumbs);

    let container = HtmlElement::new(container_element)
        .id::<&str>(non_empty(&config.container_id))
        .class::<&str>(non_empty(&config.container_class))
        .attrs(&config.container_attributes)
        .child(list);

    Ok(format!(
        "{}{}{}",
        config.before_html,
        container.render_to_string()?,
        config.after_html
    ))
}

/// A single list item. Linked items wrap their name in an anchor; active items never do.
fn item(
    config: &RenderConfig,
    name: &str,
    link: Option<&str>,
    active: bool,
    position: usize,
) -> HtmlElement {
    let class = if active {
        [config.item_class.as_str(), config.active_item_class.as_str()]
            .into_iter()
            .filter(|class| !class.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        config.item_class.clone()
    };

    let name = span().itemprop("name").child(name);
    let position = meta()
        .itemprop("position")
        .attr("content", position.to_string());

    let item = li()
        .class::<&str>(non_empty(&class))
        .itemprop("itemListElement")
        .itemscope(LIST_ITEM);

    match link {
        Some(link) => item.child(
            a().class::<&str>(non_empty(&config.link_class))
                .itemprop("item")
                .attr("itemid", link)
                .href(link)
                .child(name)
                .child(position),
        ),
        None => item.child(name).child(position),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use regex::Regex;

    use crate::config::RenderConfigOverride;
    use crate::crumb::Crumb;

    use super::*;

    fn positions(html: &str) -> Vec<usize> {
        static POSITION_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = POSITION_REGEX
            .get_or_init(|| Regex::new(r#"itemprop="position" content="(\d+)""#).unwrap());

        regex
            .captures_iter(html)
            .map(|captures| captures[1].parse().unwrap())
            .collect()
    }

    fn minimal_config() -> RenderConfig {
        RenderConfig::default().merge(RenderConfigOverride {
            container_attributes: Some(IndexMap::new()),
            list_class: Some(String::new()),
            item_class: Some(String::new()),
            home_url: Some("/".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_trail_renders_nothing() {
        let config = RenderConfig {
            before_html: "<div>".to_string(),
            after_html: "</div>".to_string(),
            ..Default::default()
        };

        assert_eq!(render_trail(&config, &Trail::default()).unwrap(), "");
    }

    #[test]
    fn test_render_snapshot() {
        let trail = Trail::from_iter([
            Crumb::new("Media", "/media/", false, Some(1)),
            Crumb::new("Books", "/media/books/", true, Some(2)),
        ]);

        let rendered = render_trail(&minimal_config(), &trail).unwrap();

        insta::assert_snapshot!(rendered, @r#"<nav><ol itemscope="" itemtype="https://schema.org/BreadcrumbList"><li itemprop="itemListElement" itemscope="" itemtype="https://schema.org/ListItem"><a itemprop="item" itemid="/" href="/"><span itemprop="name">Home</span><meta itemprop="position" content="1" /></a></li><li itemprop="itemListElement" itemscope="" itemtype="https://schema.org/ListItem"><a itemprop="item" itemid="/media/" href="/media/"><span itemprop="name">Media</span><meta itemprop="position" content="2" /></a></li><li class="active" itemprop="itemListElement" itemscope="" itemtype="https://schema.org/ListItem"><span itemprop="name">Books</span><meta itemprop="position" content="3" /></li></ol></nav>"#);
    }

    #[test]
    fn test_positions_are_dense() {
        let trail = (0..5)
            .map(|index| Crumb::new(&format!("Level {index}"), "/x/", index == 4, None))
            .collect::<Trail>();

        let rendered = render_trail(&RenderConfig::default(), &trail).unwrap();

        assert_eq!(positions(&rendered), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_active_crumb_is_never_linked() {
        let trail = Trail::from_iter([Crumb::new("Here", "/here/", true, None)]);

        let rendered = render_trail(&RenderConfig::default(), &trail).unwrap();

        assert!(!rendered.contains("/here/"));
        assert!(rendered.contains(
            r#"<li class="breadcrumb-item active" itemprop="itemListElement" itemscope="" itemtype="https://schema.org/ListItem"><span itemprop="name">Here</span>"#
        ));
    }

    #[test]
    fn test_unlinked_inactive_crumb() {
        let trail = Trail::from_iter([
            Crumb::new("Colors", "", false, None),
            Crumb::new("Blue", "/color/blue/", true, Some(3)),
        ]);

        let rendered = render_trail(&RenderConfig::default(), &trail).unwrap();

        assert!(rendered.contains(
            r#"<li class="breadcrumb-item" itemprop="itemListElement" itemscope="" itemtype="https://schema.org/ListItem"><span itemprop="name">Colors</span><meta itemprop="position" content="2" /></li>"#
        ));
    }

    #[test]
    fn test_container_options() {
        let config = RenderConfig {
            container_element: "div".to_string(),
            container_id: "crumbs".to_string(),
            container_class: "container my-4".to_string(),
            link_class: "link".to_string(),
            list_attributes: IndexMap::from([("data-depth".to_string(), "1".to_string())]),
            before_html: "<!-- trail -->".to_string(),
            after_html: "<hr>".to_string(),
            ..Default::default()
        };

        let trail = Trail::from_iter([Crumb::new("Shop", "/shop/", true, None)]);
        let rendered = render_trail(&config, &trail).unwrap();

        assert!(rendered.starts_with(
            r#"<!-- trail --><div id="crumbs" class="container my-4" aria-label="Breadcrumb"><ol class="breadcrumb" data-depth="1" itemscope="""#
        ));
        assert!(rendered.contains(r#"<a class="link" itemprop="item" itemid="/" href="/">"#));
        assert!(rendered.ends_with("</ol></div><hr>"));
    }

    #[test]
    fn test_names_are_escaped() {
        let trail = Trail::from_iter([Crumb {
            name: "Fish & <Chips>".to_string(),
            link: String::new(),
            active: true,
            id: None,
        }]);

        let rendered = render_trail(&RenderConfig::default(), &trail).unwrap();

        assert!(rendered.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(!rendered.contains("<Chips>"));
    }

    #[test]
    fn test_invalid_container_element_falls_back_to_nav() {
        let config = RenderConfig {
            container_element: "nav onclick=x".to_string(),
            ..Default::default()
        };
        let trail = Trail::from_iter([Crumb::new("Here", "", true, None)]);

        let rendered = render_trail(&config, &trail).unwrap();

        assert!(rendered.starts_with("<nav "));
        assert!(rendered.ends_with("</nav>"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let trail = Trail::from_iter([Crumb::new("Here", "", true, None)]);
        let config = RenderConfig::default();

        assert_eq!(
            render_trail(&config, &trail).unwrap(),
            render_trail(&config, &trail).unwrap()
        );
    }
}

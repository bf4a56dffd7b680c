use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::host::Id;

static SCRIPT_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn script_regex() -> &'static Regex {
    SCRIPT_REGEX.get_or_init(|| {
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
            .expect("failed to compile regex for script and style elements")
    })
}

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| {
        Regex::new(r"(?s)<[/!?]?[A-Za-z][^>]*>").expect("failed to compile regex for tags")
    })
}

/// Removes all markup from `text`, leaving plain text.
///
/// `<script>` and `<style>` elements are dropped together with their contents. A `<` that
/// does not start a tag name is kept as text.
pub fn strip_tags(text: &str) -> String {
    let text = script_regex().replace_all(text, "");
    let text = tag_regex().replace_all(&text, "");

    text.trim().to_string()
}

/// A single entry in a breadcrumb trail.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Crumb {
    /// The plain-text label.
    pub name: String,

    /// The target URL. Empty when the crumb is not linked.
    pub link: String,

    /// Whether this crumb represents the resource being displayed.
    pub active: bool,

    /// The identifier of the underlying post, page or term, if any.
    pub id: Option<Id>,
}

impl Crumb {
    /// Returns a new [`Crumb`] with the markup stripped from `name`.
    pub fn new(name: &str, link: impl Into<String>, active: bool, id: Option<Id>) -> Self {
        Self {
            name: strip_tags(name),
            link: link.into(),
            active,
            id,
        }
    }

    pub fn is_linked(&self) -> bool {
        !self.link.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("Plain"), "Plain");
        assert_eq!(strip_tags("<b>Bold</b> move"), "Bold move");
        assert_eq!(strip_tags("  <em>padded</em>  "), "padded");
        assert_eq!(
            strip_tags("Title<script type=\"text/javascript\">alert('<x>')</script>"),
            "Title"
        );
        assert_eq!(strip_tags("<STYLE>p { color: red }</STYLE>Styled"), "Styled");
        assert_eq!(strip_tags("a <br/>\nb"), "a \nb");
    }

    #[test]
    fn test_strip_tags_keeps_bare_angle_brackets() {
        assert_eq!(strip_tags("Sizes 5 < 6 and 7 > 3"), "Sizes 5 < 6 and 7 > 3");
        assert_eq!(strip_tags("a <= b"), "a <= b");
        assert_eq!(strip_tags("1 < 2 <b>bold</b>"), "1 < 2 bold");
        assert_eq!(strip_tags("<!DOCTYPE html>Doc</p>"), "Doc");
    }

    #[test]
    fn test_crumb_name_is_stripped_on_construction() {
        let crumb = Crumb::new("<span class=\"x\">Phones</span>", "/phones/", false, Some(4));

        assert_eq!(crumb.name, "Phones");
        assert!(crumb.is_linked());
        assert!(!Crumb::new("Here", "", true, None).is_linked());
    }
}

use std::fmt::Write;

use indexmap::IndexMap;

use crate::config::is_valid_name;

#[derive(Debug)]
pub enum HtmlNode {
    Element(HtmlElement),
    Text(String),
}

impl From<HtmlElement> for HtmlNode {
    fn from(value: HtmlElement) -> Self {
        Self::Element(value)
    }
}

impl From<&str> for HtmlNode {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for HtmlNode {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug)]
pub struct HtmlElement {
    pub tag_name: String,
    pub children: Vec<HtmlNode>,
    pub attrs: IndexMap<String, String>,
}

impl HtmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag_name: tag.into(),
            children: Vec::new(),
            attrs: IndexMap::new(),
        }
    }

    /// Sets `name` to `value`, or removes it when `value` is `None`.
    pub fn attr<V>(mut self, name: impl Into<String>, value: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        let name = name.into();
        match value.into() {
            Some(value) => {
                *self.attrs.entry(name).or_default() = value.into();
            }
            None => {
                self.attrs.shift_remove(&name);
            }
        }

        self
    }

    /// Sets every attribute in `attrs`, except `class` and `id` which have dedicated setters.
    pub fn attrs<'a>(mut self, attrs: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        for (name, value) in attrs {
            if name == "class" || name == "id" {
                continue;
            }

            self = self.attr(name.as_str(), value.as_str());
        }

        self
    }

    pub fn child(mut self, child: impl Into<HtmlNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = HtmlElement>) -> Self {
        self.children
            .extend(children.into_iter().map(HtmlNode::Element));
        self
    }

    pub fn render_to_string(&self) -> Result<String, std::fmt::Error> {
        let mut html = String::new();
        self.write_to(&mut html)?;

        Ok(html)
    }

    fn write_to(&self, html: &mut String) -> std::fmt::Result {
        write!(html, "<{}", self.tag_name)?;

        for (name, value) in &self.attrs {
            // Configured attribute names are written verbatim, so anything that could break
            // out of the tag is dropped.
            if !is_valid_name(name) {
                continue;
            }

            write!(html, r#" {name}="{}""#, escape_html(value))?;
        }

        if is_void(self) {
            write!(html, " />")?;
            return Ok(());
        }

        write!(html, ">")?;

        for child in &self.children {
            match child {
                HtmlNode::Element(element) => element.write_to(html)?,
                HtmlNode::Text(text) => write!(html, "{}", escape_html(text))?,
            }
        }

        write!(html, "</{}>", self.tag_name)
    }
}

impl HtmlElement {
    pub fn id<V>(self, id: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        self.attr("id", id)
    }

    pub fn class<V>(self, class: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        self.attr("class", class)
    }

    pub fn href<V>(self, href: impl Into<Option<V>>) -> Self
    where
        V: Into<String>,
    {
        self.attr("href", href)
    }

    pub fn itemprop(self, itemprop: &str) -> Self {
        self.attr("itemprop", itemprop)
    }

    /// Marks the element as a schema.org item of the given type.
    pub fn itemscope(self, itemtype: &str) -> Self {
        self.attr("itemscope", "").attr("itemtype", itemtype)
    }
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());

    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }

    escaped
}

fn is_void(element: &HtmlElement) -> bool {
    matches!(
        element.tag_name.as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

pub fn ol() -> HtmlElement {
    HtmlElement::new("ol")
}

pub fn li() -> HtmlElement {
    HtmlElement::new("li")
}

pub fn a() -> HtmlElement {
    HtmlElement::new("a")
}

pub fn span() -> HtmlElement {
    HtmlElement::new("span")
}

pub fn meta() -> HtmlElement {
    HtmlElement::new("meta")
}

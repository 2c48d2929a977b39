//! Full HTML document shell

use crate::render::{escape, nodes_to_html, Node};
use crate::style::StyleSheet;

/// A complete page: head styles, body nodes and trailing scripts
#[derive(Debug, Clone)]
pub struct Document {
    title: String,
    styles: Vec<(String, StyleSheet)>,
    body: Vec<Node>,
    scripts: Vec<String>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            styles: Vec::new(),
            body: Vec::new(),
            scripts: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Add a named stylesheet to the head. A name is injected at most once;
    /// returns false when it was already present.
    pub fn inject_style(&mut self, name: impl Into<String>, sheet: StyleSheet) -> bool {
        let name = name.into();
        if self.has_style(&name) {
            return false;
        }
        self.styles.push((name, sheet));
        true
    }

    pub fn has_style(&self, name: &str) -> bool {
        self.styles.iter().any(|(existing, _)| existing == name)
    }

    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|(name, _)| name.as_str())
    }

    pub fn push_body(&mut self, node: impl Into<Node>) {
        self.body.push(node.into());
    }

    /// Append an inline script after the body content
    pub fn push_script(&mut self, source: impl Into<String>) {
        self.scripts.push(source.into());
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"UTF-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape(&self.title)));

        for (name, sheet) in &self.styles {
            out.push_str(&format!("<style data-sheet=\"{}\">\n{}</style>\n", escape(name), sheet.to_css()));
        }

        out.push_str("</head>\n<body>\n");
        out.push_str(&nodes_to_html(&self.body));
        out.push('\n');

        for script in &self.scripts {
            out.push_str(&format!("<script>\n{}\n</script>\n", script));
        }

        out.push_str("</body>\n</html>\n");
        out
    }
}

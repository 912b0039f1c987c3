#![forbid(unsafe_code)]

//! In-memory element tree.
//!
//! Elements live in an arena indexed by [`NodeId`] and are never freed;
//! detaching only unlinks them. Index `0` is `<html>`, `1` is `<head>`,
//! `2` is `<body>`.

use mtoast_core::NodeId;

/// What an element holds besides child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    /// Only child elements (possibly none).
    #[default]
    Elements,
    /// A single text node.
    Text(String),
    /// Trusted markup, stored verbatim.
    Markup(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) classes: Vec<String>,
    pub(crate) styles: Vec<(String, String)>,
    pub(crate) content: Content,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            classes: Vec::new(),
            styles: Vec::new(),
            content: Content::Elements,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Arena of elements forming one document.
#[derive(Debug, Clone)]
pub struct ElementTree {
    elements: Vec<Element>,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    pub(crate) const HTML: NodeId = NodeId::from_raw(0);
    pub(crate) const HEAD: NodeId = NodeId::from_raw(1);
    pub(crate) const BODY: NodeId = NodeId::from_raw(2);

    /// A document with `<html>`, `<head>` and `<body>`.
    #[must_use]
    pub fn new() -> Self {
        let mut tree = Self {
            elements: Vec::new(),
        };
        let html = tree.create("html");
        let head = tree.create("head");
        let body = tree.create("body");
        tree.append(html, head);
        tree.append(html, body);
        tree
    }

    pub(crate) fn create(&mut self, tag: &str) -> NodeId {
        let id = NodeId::from_raw(self.elements.len() as u32);
        self.elements.push(Element::new(tag));
        id
    }

    pub(crate) fn get(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.raw() as usize)
    }

    pub(crate) fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.raw() as usize)
    }

    /// Number of elements ever created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false: the document skeleton exists from the start.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub(crate) fn unlink(&mut self, node: NodeId) {
        let Some(parent) = self.get(node).and_then(|el| el.parent) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        if let Some(el) = self.get_mut(node) {
            el.parent = None;
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(n) = cursor {
            if n == ancestor {
                return true;
            }
            cursor = self.get(n).and_then(|el| el.parent);
        }
        false
    }

    pub(crate) fn append(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        // Refuse cycles.
        if self.is_ancestor_or_self(child, parent) {
            return;
        }
        self.unlink(child);
        if let Some(p) = self.get_mut(parent) {
            if !matches!(p.content, Content::Elements) {
                p.content = Content::Elements;
            }
            p.children.push(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    pub(crate) fn replace_content(&mut self, node: NodeId, content: Content) {
        let children = self
            .get(node)
            .map(|el| el.children.clone())
            .unwrap_or_default();
        for child in children {
            self.unlink(child);
        }
        if let Some(el) = self.get_mut(node) {
            el.content = content;
        }
    }

    pub(crate) fn is_connected(&self, node: NodeId) -> bool {
        self.get(node).is_some() && self.is_ancestor_or_self(Self::HTML, node)
    }

    /// Descendants of `root` (excluding `root`) in document order.
    pub(crate) fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .get(root)
            .map(|el| el.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Some(el) = self.get(node) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    /// Serialize `node` and its subtree the way a browser's `outerHTML` would.
    #[must_use]
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(el) = self.get(node) else {
            return;
        };
        out.push('<');
        out.push_str(&el.tag);
        for (name, value) in &el.attributes {
            push_attr(out, name, value);
        }
        if !el.classes.is_empty() {
            push_attr(out, "class", &el.classes.join(" "));
        }
        if !el.styles.is_empty() {
            push_attr(out, "style", &serialize_styles(&el.styles));
        }
        out.push('>');
        match &el.content {
            Content::Text(text) => {
                for ch in text.chars() {
                    match ch {
                        '&' => out.push_str("&amp;"),
                        '<' => out.push_str("&lt;"),
                        '>' => out.push_str("&gt;"),
                        other => out.push(other),
                    }
                }
            }
            Content::Markup(markup) => out.push_str(markup),
            Content::Elements => {
                for &child in &el.children {
                    self.write_html(child, out);
                }
            }
        }
        out.push_str("</");
        out.push_str(&el.tag);
        out.push('>');
    }
}

pub(crate) fn serialize_styles(styles: &[(String, String)]) -> String {
    styles
        .iter()
        .map(|(k, v)| format!("{k}: {v};"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out.push('"');
}

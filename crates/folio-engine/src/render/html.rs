use folio_syntax::{ArticleRef, Node, parse_with};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::articles::ArticleSource;
use crate::context::RenderContext;
use crate::render::{ReferenceProblem, RenderOptions, Rendered};

/// Renders a document tree to HTML.
///
/// One renderer is used per top-level render; it collects the problems met
/// along the way, across every transcluded article.
pub struct HtmlRenderer<'s, S: ArticleSource + ?Sized> {
    articles: &'s S,
    options: RenderOptions,
    problems: Vec<ReferenceProblem>,
    /// Inside a paragraph, heading, emphasis or link label.
    phrasing: bool,
}

impl<'s, S: ArticleSource + ?Sized> HtmlRenderer<'s, S> {
    pub fn new(articles: &'s S, options: RenderOptions) -> Self {
        Self {
            articles,
            options,
            problems: Vec::new(),
            phrasing: false,
        }
    }

    /// Render `node` as seen from `context`.
    pub fn render(mut self, node: &Node, context: &RenderContext) -> Rendered {
        let mut html = String::new();
        self.node(node, context, &mut html);
        Rendered {
            html,
            problems: self.problems,
        }
    }

    fn node(&mut self, node: &Node, context: &RenderContext, out: &mut String) {
        match node {
            Node::Document { children } => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    self.node(child, context, out);
                }
            }
            Node::Paragraph { children } => {
                self.in_phrasing(|r| r.element("p", children, context, out));
            }
            Node::Text { text } => out.push_str(&encode_text(text)),
            Node::Emphasis { strong, children } => {
                let tag = if *strong { "strong" } else { "em" };
                self.in_phrasing(|r| r.element(tag, children, context, out));
            }
            Node::Heading { level, children } => {
                let tag = format!("h{level}");
                self.in_phrasing(|r| r.element(&tag, children, context, out));
            }
            Node::ListBlock { ordered, children } => {
                let tag = if *ordered { "ol" } else { "ul" };
                self.element(tag, children, context, out);
            }
            Node::ListItem { children } => self.element("li", children, context, out),
            Node::Table { children } => {
                out.push_str(r#"<table class="wiki-content-table">"#);
                self.children(children, context, out);
                out.push_str("</table>");
            }
            Node::TableRow { children } => self.element("tr", children, context, out),
            Node::TableCell { children } => self.element("td", children, context, out),
            Node::Link { target, children } => {
                out.push_str(r#"<a href=""#);
                out.push_str(&encode_double_quoted_attribute(&target.href()));
                out.push_str(r#"">"#);
                self.in_phrasing(|r| r.children(children, context, out));
                out.push_str("</a>");
            }
            Node::Transclusion { target } => self.transclusion(target, context, out),
        }
    }

    fn in_phrasing(&mut self, render: impl FnOnce(&mut Self)) {
        let outer = std::mem::replace(&mut self.phrasing, true);
        render(self);
        self.phrasing = outer;
    }

    fn element(&mut self, tag: &str, children: &[Node], context: &RenderContext, out: &mut String) {
        out.push('<');
        out.push_str(tag);
        out.push('>');
        self.children(children, context, out);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }

    fn children(&mut self, children: &[Node], context: &RenderContext, out: &mut String) {
        for child in children {
            self.node(child, context, out);
        }
    }

    fn transclusion(&mut self, target: &ArticleRef, context: &RenderContext, out: &mut String) {
        if context.is_ancestor(target) {
            log::debug!("Transclusion cycle: {target} is already being rendered");
            return self.placeholder(ReferenceProblem::Cycle(target.clone()), out);
        }

        if context.depth() >= self.options.max_transclusion_depth {
            log::debug!(
                "Transclusion of {target} exceeds depth {}",
                self.options.max_transclusion_depth
            );
            return self.placeholder(ReferenceProblem::TooDeep(target.clone()), out);
        }

        match self.articles.resolve(target) {
            Ok(Some(source)) => {
                log::trace!("Transcluding {target} at depth {}", context.depth());
                let inner = context.enter(target);
                let document = parse_with(&source, self.options.parse_options());
                if self.phrasing
                    && let Some(content) = single_paragraph(&document)
                {
                    self.children(content, &inner, out);
                } else {
                    let outer = std::mem::replace(&mut self.phrasing, false);
                    self.node(&document, &inner, out);
                    self.phrasing = outer;
                }
            }
            Ok(None) => self.placeholder(ReferenceProblem::NotFound(target.clone()), out),
            Err(error) => {
                log::warn!("Lookup of {target} failed: {error}");
                self.placeholder(
                    ReferenceProblem::LookupFailed {
                        article: target.clone(),
                        error,
                    },
                    out,
                );
            }
        }
    }

    fn placeholder(&mut self, problem: ReferenceProblem, out: &mut String) {
        out.push_str(r#"<span class="error-inline">"#);
        out.push_str(&encode_text(&problem.to_string()));
        out.push_str("</span>");
        self.problems.push(problem);
    }
}

/// The inline content of a document made of exactly one paragraph.
fn single_paragraph(document: &Node) -> Option<&[Node]> {
    let Node::Document { children } = document else {
        return None;
    };
    match children.as_slice() {
        [Node::Paragraph { children }] => Some(children),
        _ => None,
    }
}

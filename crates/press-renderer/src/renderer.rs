//! Article rendering orchestrator.

use press_media::{MediaCatalog, UrlResolver};

use crate::block;
use crate::html;
use crate::placeholder::Resolver;

/// Result of rendering an article.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Warnings generated during rendering (unresolved image references).
    /// Every warning also has a visible counterpart in the HTML.
    pub warnings: Vec<String>,
}

/// Placeholder-aware markdown renderer.
///
/// Composes the pipeline in fixed order: block lexing, placeholder
/// resolution, HTML emission. `render` is a pure function of the article
/// text and the catalog, so one renderer can serve concurrent calls from
/// `&self` without locking; the only per-call state is the placeholder
/// table, which never outlives the call.
///
/// Rendering never fails: unresolved `{{image:…}}` references degrade to
/// visible warning fragments, and malformed markdown degrades to literal
/// text.
///
/// # Example
///
/// ```
/// use press_media::{MediaCatalog, MediaItem, PrefixUrlResolver};
/// use press_renderer::ArticleRenderer;
///
/// let catalog = MediaCatalog::new(vec![MediaItem {
///     id: 5,
///     filename: "a.png".to_owned(),
///     original_name: "A".to_owned(),
///     path: "u/a.png".to_owned(),
/// }]);
///
/// let renderer = ArticleRenderer::new(PrefixUrlResolver::new("/media"));
/// let result = renderer.render("# Hello\n\n{{image:5}}", &catalog);
/// assert!(result.html.contains("<h1>Hello</h1>"));
/// assert!(result.html.contains(r#"src="/media/u/a.png""#));
/// ```
pub struct ArticleRenderer<R: UrlResolver> {
    urls: R,
}

impl<R: UrlResolver> ArticleRenderer<R> {
    /// Create a renderer with the injected URL resolver.
    #[must_use]
    pub fn new(urls: R) -> Self {
        Self { urls }
    }

    /// Render article text against a media catalog into one HTML fragment.
    ///
    /// The returned markup is built for trusted editor input; callers must
    /// insert it through a trusted-content API and must not feed it
    /// attacker-controlled text.
    #[must_use]
    pub fn render(&self, text: &str, catalog: &MediaCatalog) -> RenderResult {
        let mut blocks = block::lex(text);

        let mut resolver = Resolver::new(catalog);
        resolver.resolve_blocks(&mut blocks);
        let (table, warnings) = resolver.finish();

        let html = html::emit(&blocks, &table, catalog, &self.urls);

        tracing::debug!(
            blocks = blocks.len(),
            placeholders = table.len(),
            warnings = warnings.len(),
            "article rendered"
        );

        RenderResult { html, warnings }
    }
}

/// Render in one call, discarding warnings.
///
/// Convenience wrapper for callers that surface misses only through the
/// warning fragments already embedded in the HTML.
#[must_use]
pub fn render_article(text: &str, catalog: &MediaCatalog, urls: impl UrlResolver) -> String {
    ArticleRenderer::new(urls).render(text, catalog).html
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_media::MediaItem;
    use pretty_assertions::assert_eq;

    fn renderer() -> ArticleRenderer<impl UrlResolver> {
        ArticleRenderer::new(|path: &str| format!("/media/{path}"))
    }

    fn catalog() -> MediaCatalog {
        MediaCatalog::new(vec![
            MediaItem {
                id: 5,
                filename: "a.png".to_owned(),
                original_name: "A".to_owned(),
                path: "u/a.png".to_owned(),
            },
            MediaItem {
                id: 9,
                filename: "b.png".to_owned(),
                original_name: "B".to_owned(),
                path: "u/b.png".to_owned(),
            },
        ])
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = renderer();
        let catalog = catalog();
        let text = "# T\n\n{{image:5}} and {{image:zzz}}\n\n- a\n- b";
        let first = renderer.render(text, &catalog);
        let second = renderer.render(text, &catalog);
        assert_eq!(first.html, second.html);
        assert_eq!(first.warnings, second.warnings);
    }

    #[test]
    fn test_warnings_mirror_html_fragments() {
        let renderer = renderer();
        let result = renderer.render("{{image:404}}", &catalog());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("404"));
        assert!(result.html.contains("media-warning"));
    }

    #[test]
    fn test_render_article_convenience() {
        let html = render_article("plain", &MediaCatalog::empty(), |p: &str| p.to_owned());
        assert_eq!(html, "<p>plain</p>");
    }

    #[test]
    fn test_renderer_is_reusable_across_catalogs() {
        let renderer = renderer();
        let with_media = renderer.render("{{image}}", &catalog());
        let without = renderer.render("{{image}}", &MediaCatalog::empty());
        assert!(with_media.html.contains("<img"));
        assert_eq!(without.html, "<p>{{image}}</p>");
    }
}

//! URL resolution seam between the renderer and the upload store.

/// Builds an absolute URL from a storage-relative media path.
///
/// Implementations must be pure: the renderer may call `resolve` any number
/// of times for the same path and expects the same answer.
///
/// A blanket implementation exists for closures, so tests and callers can
/// inject a plain function:
///
/// ```
/// use press_media::UrlResolver;
///
/// let resolver = |path: &str| format!("https://cdn.example.com/{path}");
/// assert_eq!(
///     resolver.resolve("uploads/a.png"),
///     "https://cdn.example.com/uploads/a.png"
/// );
/// ```
pub trait UrlResolver {
    /// Resolve a storage-relative path to an absolute URL.
    fn resolve(&self, relative_path: &str) -> String;
}

impl<F> UrlResolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve(&self, relative_path: &str) -> String {
        self(relative_path)
    }
}

/// Resolver that joins a fixed base URL with the relative path.
///
/// Normalizes the joint so exactly one slash separates base and path.
#[derive(Clone, Debug)]
pub struct PrefixUrlResolver {
    base: String,
}

impl PrefixUrlResolver {
    /// Create a resolver with the given base URL.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl UrlResolver for PrefixUrlResolver {
    fn resolve(&self, relative_path: &str) -> String {
        let base = self.base.trim_end_matches('/');
        let path = relative_path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_resolver_joins_with_single_slash() {
        let resolver = PrefixUrlResolver::new("https://cdn.example.com/");
        assert_eq!(
            resolver.resolve("/uploads/a.png"),
            "https://cdn.example.com/uploads/a.png"
        );
    }

    #[test]
    fn test_prefix_resolver_without_trailing_slash() {
        let resolver = PrefixUrlResolver::new("https://cdn.example.com");
        assert_eq!(
            resolver.resolve("uploads/a.png"),
            "https://cdn.example.com/uploads/a.png"
        );
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |path: &str| format!("/media/{path}");
        assert_eq!(resolver.resolve("a.png"), "/media/a.png");
    }
}

use url::Url;

/// Joins `path` onto `base_url`, which may be absolute (`https://example.com/blog`) or
/// site-relative (`/`).
pub fn join_url(base_url: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');

    if let Ok(mut base) = Url::parse(base_url) {
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }

        if let Ok(joined) = base.join(path) {
            return joined.into();
        }
    }

    let base_url = base_url.trim_end_matches('/');
    format!("{base_url}/{path}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_join_absolute() {
        assert_eq!(
            join_url("https://example.com", "color"),
            "https://example.com/color"
        );
        assert_eq!(
            join_url("https://example.com/", "/color"),
            "https://example.com/color"
        );
        assert_eq!(
            join_url("https://example.com/store", "color/"),
            "https://example.com/store/color/"
        );
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(join_url("/", "color"), "/color");
        assert_eq!(join_url("", "color"), "/color");
        assert_eq!(join_url("/store/", "/color"), "/store/color");
    }
}

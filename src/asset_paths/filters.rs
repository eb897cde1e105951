/// Name a bundle file is matched against the exclude list with.
///
/// Minified and plain variants share one exclude entry: `jquery.min.js` and
/// `jquery.js` are both excluded by `jquery.js`. Every `.min` occurrence is
/// removed, not only the one before the extension.
pub fn exclude_key(file_name: &str) -> String {
    file_name.replace(".min", "")
}

/// Determine whether a bundle file is excluded for the current task.
pub fn is_file_excluded(file_name: &str, exclude: &[String]) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let key = exclude_key(file_name);
    exclude.iter().any(|entry| *entry == key)
}

#[cfg(test)]
mod tests {
    use super::{exclude_key, is_file_excluded};

    #[test]
    fn strips_min_infix() {
        assert_eq!(exclude_key("b.min.css"), "b.css");
        assert_eq!(exclude_key("js/jquery.min.js"), "js/jquery.js");
        assert_eq!(exclude_key("site.css"), "site.css");
    }

    #[test]
    fn matches_plain_and_minified_names() {
        let exclude = vec!["b.css".to_string()];
        assert!(is_file_excluded("b.css", &exclude));
        assert!(is_file_excluded("b.min.css", &exclude));
        assert!(!is_file_excluded("a.css", &exclude));
        assert!(!is_file_excluded("css/b.css", &exclude));
    }

    #[test]
    fn empty_exclude_list_keeps_everything() {
        assert!(!is_file_excluded("b.min.css", &[]));
    }
}

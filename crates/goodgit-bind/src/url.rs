/// How [`qualify_url`] treated a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteKind {
    /// `<alias>.` was inserted before the canonical host.
    Rewritten,
    /// The URL already routes through the alias-qualified host.
    AlreadyQualified,
    /// The canonical host does not appear in the URL; it was left as is.
    HostMissing,
}

/// A repository URL after alias qualification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRewrite {
    pub url: String,
    pub kind: RewriteKind,
}

/// Hostname routed through the key of `alias`, e.g. `work.github.com`.
pub fn qualified_host(alias: &str, host: &str) -> String {
    format!("{alias}.{host}")
}

/// Insert `<alias>.` before the first literal occurrence of `host` in `url`.
///
/// This is plain text substitution: `git@github.com:org/repo.git` and
/// `https://github.com/org/repo.git` are both handled, but a URL spelling the
/// host differently (other case, IP address) is returned unchanged.
pub fn qualify_url(url: &str, alias: &str, host: &str) -> UrlRewrite {
    if is_qualified(url, alias, host) {
        return UrlRewrite {
            url: url.to_string(),
            kind: RewriteKind::AlreadyQualified,
        };
    }
    if !url.contains(host) {
        return UrlRewrite {
            url: url.to_string(),
            kind: RewriteKind::HostMissing,
        };
    }
    UrlRewrite {
        url: url.replacen(host, &qualified_host(alias, host), 1),
        kind: RewriteKind::Rewritten,
    }
}

/// Whether the host name in `url` is exactly `<alias>.<host>`.
///
/// `personal.github.com` is not qualified by `al`, and `homework.github.com`
/// is not qualified by `work`.
pub fn is_qualified(url: &str, alias: &str, host: &str) -> bool {
    find_qualified(url, alias, host).is_some()
}

/// Undo the qualification of `url` with `alias`, if present.
pub fn unqualify_url(url: &str, alias: &str, host: &str) -> Option<String> {
    let start = find_qualified(url, alias, host)?;
    let end = start + qualified_host(alias, host).len();
    Some(format!("{}{host}{}", &url[..start], &url[end..]))
}

/// Byte offset of `<alias>.<host>` where it spans a whole host name: it starts
/// the URL or follows `@` or `/`, and is not followed by more host characters.
fn find_qualified(url: &str, alias: &str, host: &str) -> Option<usize> {
    let qualified = qualified_host(alias, host);
    url.match_indices(&qualified)
        .map(|(start, _)| start)
        .find(|&start| {
            let before = url[..start].chars().next_back();
            let after = url[start + qualified.len()..].chars().next();
            matches!(before, None | Some('@' | '/')) && !after.is_some_and(is_host_char)
        })
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_url() {
        let rewrite = qualify_url("https://github.com/org/repo.git", "work", "github.com");
        assert_eq!(rewrite.url, "https://work.github.com/org/repo.git");
        assert_eq!(rewrite.kind, RewriteKind::Rewritten);
    }

    #[test]
    fn test_scp_style_url() {
        let rewrite = qualify_url("git@github.com:org/repo.git", "personal", "github.com");
        assert_eq!(rewrite.url, "git@personal.github.com:org/repo.git");
    }

    #[test]
    fn test_only_first_occurrence_is_rewritten() {
        let rewrite = qualify_url(
            "git@github.com:org/github.com-mirror.git",
            "work",
            "github.com",
        );
        assert_eq!(rewrite.url, "git@work.github.com:org/github.com-mirror.git");
    }

    #[test]
    fn test_url_without_host_is_unchanged() {
        let rewrite = qualify_url("https://gitlab.com/org/repo.git", "work", "github.com");
        assert_eq!(rewrite.url, "https://gitlab.com/org/repo.git");
        assert_eq!(rewrite.kind, RewriteKind::HostMissing);
    }

    #[test]
    fn test_already_qualified_is_unchanged() {
        let rewrite = qualify_url("git@work.github.com:org/repo.git", "work", "github.com");
        assert_eq!(rewrite.url, "git@work.github.com:org/repo.git");
        assert_eq!(rewrite.kind, RewriteKind::AlreadyQualified);
    }

    #[test]
    fn test_suffix_alias_is_not_a_qualification() {
        let url = "git@personal.github.com:org/repo.git";
        assert!(is_qualified(url, "personal", "github.com"));
        assert!(!is_qualified(url, "al", "github.com"));
        assert_eq!(unqualify_url(url, "al", "github.com"), None);

        let rewrite = qualify_url("https://homework.github.com/o/r.git", "work", "github.com");
        assert_ne!(rewrite.kind, RewriteKind::AlreadyQualified);
    }

    #[test]
    fn test_qualified_host_must_end_the_host_name() {
        assert!(!is_qualified(
            "https://work.github.com.example.org/o/r.git",
            "work",
            "github.com"
        ));
        assert!(is_qualified("work.github.com:o/r.git", "work", "github.com"));
    }

    #[test]
    fn test_unqualify_only_touches_the_host() {
        assert_eq!(
            unqualify_url(
                "ssh://git@work.github.com/work.github.com/r.git",
                "work",
                "github.com"
            ),
            Some("ssh://git@github.com/work.github.com/r.git".to_string())
        );
    }

    #[test]
    fn test_unqualify() {
        assert_eq!(
            unqualify_url("git@work.github.com:org/repo.git", "work", "github.com"),
            Some("git@github.com:org/repo.git".to_string())
        );
        assert_eq!(
            unqualify_url("git@github.com:org/repo.git", "work", "github.com"),
            None
        );
    }
}

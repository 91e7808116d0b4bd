/// A parsed hostname match, distinguishing an exact name from a
/// single-label wildcard prefix. The `Wildcard { reverse_labels }` shape
/// makes wildcard comparison a label-wise walk instead of string
/// gymnastics.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Hostname {
    Any,
    Exact(String),
    /// `*.example.com` is stored as `["com", "example"]` — labels reversed
    /// so matching starts from the most-specific (rightmost) label.
    Wildcard { reverse_labels: Vec<String> },
}

impl Hostname {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == "*" {
            return Hostname::Any;
        }
        if let Some(rest) = raw.strip_prefix("*.") {
            return Hostname::Wildcard {
                reverse_labels: rest.rsplit('.').map(str::to_ascii_lowercase).collect(),
            };
        }
        Hostname::Exact(raw.to_ascii_lowercase())
    }
}

/// `*` and empty match anything;
/// `*.x.y` matches `a.x.y` when label counts align and non-wildcard labels
/// are case-insensitively equal. Symmetric by construction.
pub fn hostnames_match(a: &str, b: &str) -> bool {
    let a = Hostname::parse(a);
    let b = Hostname::parse(b);
    match (&a, &b) {
        (Hostname::Any, _) | (_, Hostname::Any) => true,
        (Hostname::Exact(x), Hostname::Exact(y)) => x == y,
        (Hostname::Exact(x), Hostname::Wildcard { reverse_labels })
        | (Hostname::Wildcard { reverse_labels }, Hostname::Exact(x)) => {
            wildcard_matches_exact(reverse_labels, x)
        }
        (Hostname::Wildcard { reverse_labels: rl_a }, Hostname::Wildcard { reverse_labels: rl_b }) => {
            rl_a == rl_b
        }
    }
}

fn wildcard_matches_exact(wildcard_reverse_labels: &[String], exact: &str) -> bool {
    let exact_reverse: Vec<&str> = exact.rsplit('.').collect();
    // The wildcard label itself consumes exactly one label of `exact`, so
    // `exact` must have one more label than the wildcard's suffix.
    if exact_reverse.len() != wildcard_reverse_labels.len() + 1 {
        return false;
    }
    wildcard_reverse_labels
        .iter()
        .zip(exact_reverse.iter().skip(1))
        .all(|(w, e)| w.eq_ignore_ascii_case(e))
}

/// True iff the route declares hostnames and none intersect the listener's
/// hostname.
pub fn route_hostnames_match_listener(route_hostnames: &[String], listener_hostname: &str) -> bool {
    if route_hostnames.is_empty() {
        return true;
    }
    route_hostnames
        .iter()
        .any(|h| hostnames_match(h, listener_hostname))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_star_match_anything() {
        assert!(hostnames_match("", "whatever.example.com"));
        assert!(hostnames_match("*", "whatever.example.com"));
    }

    #[test]
    fn wildcard_matches_single_label() {
        assert!(hostnames_match("*.foo.com", "a.foo.com"));
        assert!(!hostnames_match("*.foo.com", "a.b.foo.com"));
        assert!(!hostnames_match("*.foo.com", "foo.com"));
    }

    #[test]
    fn case_insensitive() {
        assert!(hostnames_match("*.Foo.com", "a.foo.COM"));
    }

    #[test]
    fn symmetric_property() {
        use pretty_assertions::assert_eq;

        let pairs = [
            ("*.foo.com", "a.foo.com"),
            ("a.bar", "*.foo"),
            ("exact.com", "exact.com"),
            ("", "anything"),
        ];
        for (a, b) in pairs {
            assert_eq!(hostnames_match(a, b), hostnames_match(b, a));
        }
    }

    #[test]
    fn route_hostname_mismatch() {
        assert!(!route_hostnames_match_listener(
            &["a.bar".to_string()],
            "*.foo"
        ));
    }

    #[test]
    fn route_with_no_hostnames_matches_anything() {
        assert!(route_hostnames_match_listener(&[], "*.foo"));
    }
}

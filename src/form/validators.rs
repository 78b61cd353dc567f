//! Field validators.
//!
//! A validator maps a field's current value to `Ok(())` or an error message
//! shown under the field.

/// Validation rule for a single field value.
pub type Validator = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Reject empty (or whitespace-only) values.
pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value| {
        if value.trim().is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// Reject values that are not a valid domain name.
///
/// Empty values pass so the rule composes with [`required`].
pub fn domain_name(allow_wildcard: bool, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value| {
        if value.is_empty() || is_valid_domain_name(value, allow_wildcard) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

/// Check a domain name: dot-separated labels of ASCII letters, digits and
/// hyphens, no label starting or ending with a hyphen. With `allow_wildcard`
/// the first label may be `*`.
pub fn is_valid_domain_name(value: &str, allow_wildcard: bool) -> bool {
    let name = match value.strip_prefix("*.") {
        Some(rest) if allow_wildcard => rest,
        Some(_) => return false,
        None => value,
    };

    if name.is_empty() || value.len() > MAX_DOMAIN_LEN {
        return false;
    }

    name.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_names() {
        assert!(is_valid_domain_name("example.com", false));
        assert!(is_valid_domain_name("cdn-1.example.com", false));
        assert!(is_valid_domain_name("localhost", false));

        assert!(!is_valid_domain_name("-cdn.example.com", false));
        assert!(!is_valid_domain_name("cdn-.example.com", false));
        assert!(!is_valid_domain_name("cdn..example.com", false));
        assert!(!is_valid_domain_name("example.com.", false));
        assert!(!is_valid_domain_name("exa mple.com", false));
        assert!(!is_valid_domain_name(&"a".repeat(64), false));
    }

    #[test]
    fn test_wildcard_domains() {
        assert!(is_valid_domain_name("*.example.com", true));
        assert!(!is_valid_domain_name("*.example.com", false));
        assert!(!is_valid_domain_name("*", true));
        assert!(!is_valid_domain_name("cdn.*.example.com", true));
    }

    #[test]
    fn test_required() {
        let rule = required("Please enter a domain");
        assert_eq!(rule("  "), Err("Please enter a domain".to_string()));
        assert_eq!(rule("x"), Ok(()));
    }

    #[test]
    fn test_domain_rule_allows_empty() {
        let rule = domain_name(true, "Invalid domain");
        assert_eq!(rule(""), Ok(()));
        assert_eq!(rule("bad_domain"), Err("Invalid domain".to_string()));
    }
}

/// Turn a user-facing configuration label into a filesystem-safe name.
///
/// Alphanumerics, spaces, `_` and `-` are kept, anything else becomes `_`,
/// and surrounding whitespace is trimmed. Returns `None` when nothing is left.
pub fn sanitize_config_name(name: &str) -> Option<String> {
    let slug: String = name
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || matches!(ch, ' ' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = slug.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// True when `name` can only refer to a file directly inside the store directory.
pub fn is_plain_stem(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_unsafe_characters() {
        assert_eq!(
            sanitize_config_name("inv@lid/name").as_deref(),
            Some("inv_lid_name")
        );
        assert_eq!(
            sanitize_config_name("../../etc/passwd").as_deref(),
            Some("______etc_passwd")
        );
    }

    #[test]
    fn keeps_spaces_hyphens_and_unicode_letters() {
        assert_eq!(
            sanitize_config_name("  studio-lighting v2_final ").as_deref(),
            Some("studio-lighting v2_final")
        );
        assert_eq!(sanitize_config_name("café noir").as_deref(), Some("café noir"));
    }

    #[test]
    fn blank_names_have_no_slug() {
        assert_eq!(sanitize_config_name(""), None);
        assert_eq!(sanitize_config_name("   "), None);
        assert_eq!(sanitize_config_name("\t\n"), None);
    }

    #[test]
    fn plain_stems_stay_inside_the_store() {
        assert!(is_plain_stem("studio-lighting"));
        assert!(is_plain_stem("v1.2"));
        assert!(is_plain_stem(" padded"));
        assert!(!is_plain_stem("a/b"));
        assert!(!is_plain_stem("..\\outside"));
        assert!(!is_plain_stem(".."));
        assert!(!is_plain_stem(""));
    }
}

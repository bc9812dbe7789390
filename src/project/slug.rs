use regex::Regex;
use std::sync::LazyLock;

/// Directory name used when an idea has no usable characters.
pub const FALLBACK_SLUG: &str = "project";

static INVALID_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]+").expect("slug pattern is a valid static regex"));
static DASH_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("dash pattern is a valid static regex"));

/// Turn free text into a directory name of lowercase letters, digits and single hyphens.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced = INVALID_RUN.replace_all(&lowered, "-");
    let collapsed = DASH_RUN.replace_all(&replaced, "-");
    let slug = collapsed.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_examples() {
        assert_eq!(slugify("build a web dashboard"), "build-a-web-dashboard");
        assert_eq!(slugify("  Chat-App!!  v2 "), "chat-app-v2");
        assert_eq!(slugify("---a---b---"), "a-b");
        assert_eq!(slugify("Übersicht für Kunden"), "bersicht-f-r-kunden");
        assert_eq!(slugify(""), FALLBACK_SLUG);
        assert_eq!(slugify("!!!"), FALLBACK_SLUG);
    }

    proptest! {
        #[test]
        fn slug_is_well_formed(input in ".*") {
            let slug = slugify(&input);
            prop_assert!(!slug.is_empty());
            prop_assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            );
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn slug_is_idempotent(input in ".*") {
            let once = slugify(&input);
            prop_assert_eq!(slugify(&once), once);
        }
    }
}

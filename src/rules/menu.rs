//! `menuPackage` rules.

use super::helpers::{group, normalize_phrase};
use crate::{BucketMask, Extracted, FieldPath, FieldRule, FieldValue};

/// Package letters become "Buffet A".."Buffet C"; free-form menus pass
/// through lowercased.
fn normalize_menu(raw: &str) -> Option<String> {
    let menu = normalize_phrase(raw);
    if menu.starts_with("buffet") {
        let letter = menu.chars().last()?.to_ascii_uppercase();
        Some(format!("Buffet {letter}"))
    } else {
        Some(menu)
    }
}

fn rule_menu_package() -> FieldRule {
    rule! {
        name: "menu package (buffet a-c | vegetarian [menu|option] | plated [dinner|service])",
        field: FieldPath::MenuPackage,
        pattern: r"(?i)(buffet\s*[a-c]\b|vegetarian\s*(?:menu|option)?|plated\s*(?:dinner|service)?)",
        buckets: BucketMask::MENUISH,
        confidence: 0.85,
        extract: |caps| {
            Some(Extracted::Absolute(FieldValue::Text(normalize_menu(group(caps, 1)?)?)))
        },
    }
}

pub(super) fn rules() -> Vec<FieldRule> {
    vec![rule_menu_package()]
}

#[cfg(test)]
mod tests {
    use super::normalize_menu;

    #[test]
    fn menu_normalization() {
        assert_eq!(normalize_menu("BUFFET b").as_deref(), Some("Buffet B"));
        assert_eq!(normalize_menu("buffetc").as_deref(), Some("Buffet C"));
        assert_eq!(normalize_menu("Vegetarian Menu").as_deref(), Some("vegetarian menu"));
        assert_eq!(normalize_menu("plated ").as_deref(), Some("plated"));
    }
}

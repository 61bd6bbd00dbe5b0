use regex::Regex;
use std::sync::OnceLock;

fn sub_part_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\((\d+)\)").ok()).as_ref()
}

/// Rewrites `(N)` enhancement markers as `.N` and lowercases the result,
/// so `AC-2(1)` becomes `ac-2.1`.
pub fn normalize_control_id(input: &str) -> String {
    match sub_part_pattern() {
        Some(pattern) => pattern.replace_all(input, ".$1").to_lowercase(),
        None => input.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_control_id;

    #[test]
    fn rewrites_every_enhancement_marker() {
        assert_eq!(normalize_control_id("SC-7(4)(2)"), "sc-7.4.2");
    }

    #[test]
    fn leaves_non_numeric_parentheses_alone() {
        assert_eq!(normalize_control_id("AC-2(a)"), "ac-2(a)");
    }
}

/// Returns true when `input`, after trimming, is a plausible city name:
/// 2 to 100 characters, letters, spaces, hyphens, apostrophes and
/// periods only. Pure and total.
pub fn is_valid_city_name(input: &str) -> bool {
    let trimmed = input.trim();

    if trimmed.len() < 2 || trimmed.len() > 100 {
        return false;
    }

    trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || matches!(c, ' ' | '-' | '\'' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_city_names() {
        for name in [
            "Kyiv",
            "New York",
            "Val-d'Or",
            "St. Louis",
            "  Lviv  ",
            "s-Hertogenbosch",
        ] {
            assert!(is_valid_city_name(name), "expected valid: {name:?}");
        }
    }

    #[test]
    fn rejects_empty_and_too_short() {
        assert!(!is_valid_city_name(""));
        assert!(!is_valid_city_name("   "));
        assert!(!is_valid_city_name("A"));
        assert!(!is_valid_city_name(" A "));
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "a".repeat(101);
        assert!(!is_valid_city_name(&long));
        assert!(is_valid_city_name(&"a".repeat(100)));
    }

    #[test]
    fn rejects_digits_and_symbols() {
        for name in ["Area 51", "Köln?", "London!", "a_b", "Tokyo3"] {
            assert!(!is_valid_city_name(name), "expected invalid: {name:?}");
        }
    }

    #[test]
    fn boundary_lengths_after_trimming() {
        assert!(is_valid_city_name("ab"));
        let padded = format!("  {}  ", "a".repeat(100));
        assert!(is_valid_city_name(&padded));
    }
}

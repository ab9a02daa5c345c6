pub mod auth;
pub mod companies;
pub mod tasks;
pub mod users;

/// Turns a text filter into a `LIKE` prefix pattern, escaping the wildcards
/// the caller may have typed.
pub(crate) fn prefix_pattern(value: Option<&str>) -> Option<String> {
    value.map(|v| {
        let escaped = v
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("{}%", escaped)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_pattern() {
        assert_eq!(prefix_pattern(None), None);
        assert_eq!(prefix_pattern(Some("acme")), Some("acme%".to_string()));
        assert_eq!(
            prefix_pattern(Some("50%_off")),
            Some("50\\%\\_off%".to_string())
        );
    }
}

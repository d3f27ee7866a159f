//! Email shape check
//!
//! `local@domain`: one `@`, non-empty local part, a domain of at least two
//! non-empty dot-separated labels, no whitespace anywhere. Accepts exactly
//! what the `user` schema's email pattern accepts.

/// Returns true if `email` has the shape `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let mut labels = domain.split('.');
    let first_ok = labels.next().is_some_and(|label| !label.is_empty());
    let mut rest = 0;
    for label in labels {
        if label.is_empty() {
            return false;
        }
        rest += 1;
    }
    first_ok && rest > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EMAIL_PATTERN;
    use regex::Regex;
    use rstest::rstest;

    #[rstest]
    #[case("test@test.com")]
    #[case("a@b.se")]
    #[case("first.last@mail.example.org")]
    #[case("x+tag@sub.domain.io")]
    fn test_valid(#[case] email: &str) {
        assert!(is_valid_email(email));
    }

    #[rstest]
    #[case("invalid")]
    #[case("")]
    #[case("@test.com")]
    #[case("test@")]
    #[case("test@test")]
    #[case("test@.com")]
    #[case("test@test.")]
    #[case("test@test..com")]
    #[case("a@b@c.com")]
    #[case("te st@test.com")]
    #[case("test@test.com ")]
    #[case("test()test,se")]
    fn test_invalid(#[case] email: &str) {
        assert!(!is_valid_email(email));
    }

    #[test]
    fn test_agrees_with_schema_pattern() {
        let re = Regex::new(&format!("^(?:{})$", EMAIL_PATTERN)).unwrap();
        for email in [
            "test@test.com",
            "a@b.se",
            "invalid",
            "@x.y",
            "x@y",
            "x@.y",
            "x@y.",
            "x@y..z",
            "a@b@c.d",
            "a b@c.d",
            "test()test,se",
            "ä@ö.se",
        ] {
            assert_eq!(is_valid_email(email), re.is_match(email), "{}", email);
        }
    }
}

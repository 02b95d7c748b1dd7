//! Field validators for the student editor.
//!
//! Pure and deterministic; callers (and tests) key off the exact message
//! strings, so these must not change casually.

pub fn validate_name(value: &str) -> Result<(), &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Name is required");
    }
    if trimmed.chars().count() < 2 {
        return Err("Name must be at least 2 characters");
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Email is required");
    }
    if !email_shape_matches(value) {
        return Err("Please enter a valid email address");
    }
    Ok(())
}

/// Phone is optional; only a present value is checked.
pub fn validate_phone(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Ok(());
    }
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')'));
    if allowed {
        Ok(())
    } else {
        Err("Please enter a valid phone number")
    }
}

/// `local@domain.tld` shape: no whitespace anywhere, exactly one `@` with a
/// non-empty local part, and a `.` in the domain that is neither its first
/// nor its last character.
fn email_shape_matches(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_requires_non_blank_value() {
        assert_eq!(validate_name(""), Err("Name is required"));
        assert_eq!(validate_name("   "), Err("Name is required"));
        assert_eq!(validate_name("\t\n"), Err("Name is required"));
    }

    #[test]
    fn name_requires_two_trimmed_characters() {
        assert_eq!(validate_name("A"), Err("Name must be at least 2 characters"));
        assert_eq!(
            validate_name("  B  "),
            Err("Name must be at least 2 characters")
        );
        assert_eq!(validate_name("Al"), Ok(()));
        assert_eq!(validate_name("  Al  "), Ok(()));
    }

    #[test]
    fn email_requires_non_blank_value() {
        assert_eq!(validate_email(""), Err("Email is required"));
        assert_eq!(validate_email("   "), Err("Email is required"));
    }

    #[test]
    fn email_accepts_local_at_domain_tld_shape() {
        assert_eq!(validate_email("a@b.co"), Ok(()));
        assert_eq!(validate_email("first.last@school.edu"), Ok(()));
        assert_eq!(validate_email("a+b@sub.domain.org"), Ok(()));
    }

    #[test]
    fn email_rejects_malformed_shapes() {
        let invalid = Err("Please enter a valid email address");
        assert_eq!(validate_email("bad"), invalid);
        assert_eq!(validate_email("no-at.example.com"), invalid);
        assert_eq!(validate_email("@missing-local.com"), invalid);
        assert_eq!(validate_email("missing-domain@"), invalid);
        assert_eq!(validate_email("no-tld@domain"), invalid);
        assert_eq!(validate_email("dot-at-end@domain."), invalid);
        assert_eq!(validate_email("dot-at-start@.domain"), invalid);
        assert_eq!(validate_email("two@@signs.com"), invalid);
        assert_eq!(validate_email("spaces in@local.com"), invalid);
        assert_eq!(validate_email("a@b.co "), invalid);
    }

    #[test]
    fn phone_is_optional() {
        assert_eq!(validate_phone(""), Ok(()));
    }

    #[test]
    fn phone_accepts_digits_spacing_and_punctuation() {
        assert_eq!(validate_phone("+1 (555) 123-4567"), Ok(()));
        assert_eq!(validate_phone("5551234567"), Ok(()));
        assert_eq!(validate_phone("555 123 4567"), Ok(()));
    }

    #[test]
    fn phone_rejects_other_characters() {
        let invalid = Err("Please enter a valid phone number");
        assert_eq!(validate_phone("call-me"), invalid);
        assert_eq!(validate_phone("555.1234"), invalid);
        assert_eq!(validate_phone("+1 555 ext4"), invalid);
    }
}

//! Address shape check: `local@domain.tld`.
//!
//! Local part uses `[a-zA-Z0-9._%+-]`, the domain `[a-zA-Z0-9.-]`, and the
//! label after the final dot must be two or more ASCII letters. Quoted local
//! parts and internationalized addresses are rejected.

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

pub fn is_valid_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };

    if local.is_empty() || !local.chars().all(is_local_char) {
        return false;
    }

    // The TLD has no dots, so it always follows the last one.
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !host.is_empty()
        && host.chars().all(is_domain_char)
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "john.doe@example.com",
            "a@b.co",
            "first+tag@mail.example.org",
            "under_score%pct@sub-domain.example.io",
            "UPPER@EXAMPLE.COM",
            "dots..twice@example..com",
        ] {
            assert!(is_valid_email(email), "{email} should be accepted");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "invalid-email",
            "@example.com",
            "user@",
            "user@example",
            "user@.com",
            "user@example.c",
            "user@example.c0m",
            "user@@example.com",
            "user@exa@mple.com",
            "us er@example.com",
            "\"quoted\"@example.com",
            "jöhn@example.com",
            "user@exämple.com",
            "user@example.com.",
            "",
        ] {
            assert!(!is_valid_email(email), "{email} should be rejected");
        }
    }
}

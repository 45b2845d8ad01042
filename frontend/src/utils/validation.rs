//! Pre-submission form checks. These exist to keep obviously bad input off
//! the wire; the backend remains authoritative and its rejections are still
//! surfaced to the user.

pub fn required(value: &str, field: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn positive_number(value: &str, field: &str) -> Result<i64, String> {
    let trimmed = value.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(format!("{field} must be a positive number")),
        Err(_) => Err(format!("{field} must be a number")),
    }
}

pub fn experience_level(value: &str) -> Result<i32, String> {
    match value.trim().parse::<i32>() {
        Ok(level) if (1..=5).contains(&level) => Ok(level),
        _ => Err("Experience level must be between 1 and 5".to_string()),
    }
}

pub fn email(value: &str) -> Result<String, String> {
    let trimmed = required(value, "Email")?;
    let looks_like_email = trimmed
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
        .unwrap_or(false);
    if looks_like_email {
        Ok(trimmed)
    } else {
        Err("Email does not look valid".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_empty() {
        assert_eq!(required("  bob ", "Username").unwrap(), "bob");
        assert!(required("   ", "Username").is_err());
    }

    #[test]
    fn positive_number_rejects_zero_negative_and_garbage() {
        assert_eq!(positive_number("12", "Route number").unwrap(), 12);
        assert!(positive_number("0", "Route number").is_err());
        assert!(positive_number("-3", "Route number").is_err());
        assert!(positive_number("abc", "Route number").is_err());
    }

    #[test]
    fn experience_level_bounds() {
        assert_eq!(experience_level("1").unwrap(), 1);
        assert_eq!(experience_level("5").unwrap(), 5);
        assert!(experience_level("0").is_err());
        assert!(experience_level("6").is_err());
        assert!(experience_level("x").is_err());
    }

    #[test]
    fn email_needs_local_part_and_dotted_domain() {
        assert!(email("rider@go-card.dk").is_ok());
        assert!(email("@go-card.dk").is_err());
        assert!(email("rider@localhost").is_err());
        assert!(email("").is_err());
    }
}

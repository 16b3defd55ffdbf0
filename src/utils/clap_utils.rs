///////////////////////////////
/// Parse a boolean toggle given as 0/1 or true/false
pub fn parse_toggle(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(format!("Invalid toggle '{}', expected 0, 1, true or false", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles() {
        assert_eq!(parse_toggle("1"), Ok(true));
        assert_eq!(parse_toggle("FALSE"), Ok(false));
        assert!(parse_toggle("yes").is_err());
    }
}

use crate::runtime::{Error, Result};

///////////////////////////////
/// Parse a numeric field, naming the field and target type on failure
pub fn parse_number<T: std::str::FromStr>(field: &str, value: &str, target: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| Error::conversion(field, value, target))
}

///////////////////////////////
/// Split `text` on `sep` and require exactly `n` parts
pub fn split_exact<'a>(text: &'a str, sep: char, n: usize, context: &str) -> Result<Vec<&'a str>> {
    let parts: Vec<&str> = text.split(sep).collect();
    if parts.len() != n {
        return Err(Error::malformed(
            context,
            text,
            format!("{} fields separated by '{}'", n, sep.escape_default()),
        ));
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_number::<u64>("lane", "7", "u64").unwrap(), 7);
        let err = parse_number::<u64>("lane", "-1", "u64").unwrap_err();
        assert_eq!(err.to_string(), "Failed to convert lane '-1' to u64 type");
    }

    #[test]
    fn exact_split() {
        assert_eq!(split_exact("a:b", ':', 2, "pair").unwrap(), vec!["a", "b"]);
        assert!(split_exact("a:b:c", ':', 2, "pair").is_err());
    }
}

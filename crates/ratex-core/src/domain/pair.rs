use crate::error::ValidationError;

/// Normalizes a caller-supplied trading pair into the stored form:
/// trimmed, uppercased, slash separators removed (`btc/eur` -> `BTCEUR`).
pub fn normalize(raw: &str) -> Result<String, ValidationError> {
    let pair = raw
        .trim()
        .chars()
        .filter(|c| *c != '/')
        .map(|c| c.to_ascii_uppercase())
        .collect::<String>();

    if pair.is_empty() {
        return Err(ValidationError::EmptyPair);
    }

    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_and_strips_separators() {
        assert_eq!(normalize("btc/eur").expect("valid"), "BTCEUR");
        assert_eq!(normalize("  ETH/EUR  ").expect("valid"), "ETHEUR");
        assert_eq!(normalize("ADAEUR").expect("valid"), "ADAEUR");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(normalize("   "), Err(ValidationError::EmptyPair));
        assert_eq!(normalize("/"), Err(ValidationError::EmptyPair));
    }
}

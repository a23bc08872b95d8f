//! Parsing of the single-line mining request.

use pow_core::InputError;
use serde::Deserialize;

/// The request as read from stdin. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MineRequest {
    /// Miner account name
    #[serde(default)]
    pub account: Option<String>,
    /// Hex hash of the last mining transaction
    #[serde(default, rename = "lastMineTx")]
    pub last_mine_tx: Option<String>,
}

/// Parse the first non-blank line of `input`.
pub fn parse_request(input: &str) -> Result<MineRequest, InputError> {
    let line = input
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or(InputError::Empty)?;

    serde_json::from_str(line).map_err(|e| InputError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_request() {
        let request =
            parse_request(r#"{"account":"abc.1234","lastMineTx":"00112233445566778899aabbccddeeff"}"#)
                .unwrap();
        assert_eq!(request.account.as_deref(), Some("abc.1234"));
        assert_eq!(
            request.last_mine_tx.as_deref(),
            Some("00112233445566778899aabbccddeeff")
        );
    }

    #[test]
    fn test_missing_and_null_fields_are_none() {
        let request = parse_request(r#"{"lastMineTx":"00","extra":1}"#).unwrap();
        assert_eq!(request.account, None);

        let request = parse_request(r#"{"account":null,"lastMineTx":null}"#).unwrap();
        assert_eq!(request, MineRequest::default());
    }

    #[test]
    fn test_skips_blank_lines() {
        let request = parse_request("\n  \n{\"account\":\"eosio\"}\n").unwrap();
        assert_eq!(request.account.as_deref(), Some("eosio"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_request(""), Err(InputError::Empty));
        assert_eq!(parse_request(" \n\t\n"), Err(InputError::Empty));
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(parse_request("not json"), Err(InputError::Malformed(_))));
        assert!(matches!(parse_request("[1,2]"), Err(InputError::Malformed(_))));
        assert!(matches!(parse_request(r#"{"account":7}"#), Err(InputError::Malformed(_))));
    }
}

use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use steward_core::enums::IssueStatus;
    use steward_lineage::TraversalDirection;

    use super::parse_enum;
    use crate::cli::OutputFormat;

    #[test]
    fn parses_snake_case_enum() {
        let direction: TraversalDirection =
            parse_enum("upstream", "direction").expect("direction should parse");
        assert_eq!(direction, TraversalDirection::Upstream);
    }

    #[test]
    fn parses_hyphenated_and_uppercase_alias() {
        let status: IssueStatus =
            parse_enum("Pending-Verification", "status").expect("status should parse");
        assert_eq!(status, IssueStatus::PendingVerification);
        let format: OutputFormat = parse_enum("TABLE", "format").expect("format should parse");
        assert_eq!(format, OutputFormat::Table);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<TraversalDirection>("sideways", "direction").expect_err("should fail");
        assert!(err.to_string().contains("invalid direction 'sideways'"));
    }
}

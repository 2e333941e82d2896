use crate::domain::model::SourceKey;
use crate::domain::ports::Storage;
use crate::utils::error::{MigrationError, Result};

/// Reads a paginated export and flattens it into one sequence of keys.
pub async fn load_keys<S: Storage>(storage: &S, path: &str) -> Result<Vec<SourceKey>> {
    let bytes = storage.read_file(path).await?;
    let content = String::from_utf8(bytes).map_err(|e| {
        MigrationError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    let keys = parse_export(&content)?;
    tracing::info!("Loaded {} keys from {}", keys.len(), path);
    Ok(keys)
}

/// Each non-blank line must be a JSON array of key records. Lines are
/// concatenated in file order.
pub fn parse_export(content: &str) -> Result<Vec<SourceKey>> {
    let mut keys = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let value: serde_json::Value =
            serde_json::from_str(line).map_err(|e| MigrationError::ParseError {
                line: line_number,
                reason: e.to_string(),
            })?;

        let serde_json::Value::Array(items) = value else {
            return Err(MigrationError::ParseError {
                line: line_number,
                reason: "expected a JSON array of key records".to_string(),
            });
        };

        tracing::debug!("Line {}: {} keys", line_number, items.len());

        for (position, item) in items.into_iter().enumerate() {
            let key: SourceKey =
                serde_json::from_value(item).map_err(|e| MigrationError::ParseError {
                    line: line_number,
                    reason: format!("record {}: {}", position, e),
                })?;
            keys.push(key);
        }
    }

    Ok(keys)
}

use crate::utils::error::{PokedexError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PokedexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PokedexError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PokedexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PokedexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PokedexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(PokedexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(PokedexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(PokedexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PokedexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 解析請求參數中的正整數，失敗時回傳 `InvalidParameter`
pub fn parse_positive_int(field_name: &str, raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    let value = trimmed.parse::<usize>().map_err(|e| {
        PokedexError::invalid_parameter(field_name, raw, format!("not a valid integer ({})", e))
    })?;

    if value == 0 {
        return Err(PokedexError::invalid_parameter(
            field_name,
            raw,
            "must be at least 1",
        ));
    }

    Ok(value)
}

/// Query-string value with surrounding whitespace removed; blank means absent.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Longest record field name accepted as a sort key.
pub const MAX_FIELD_NAME_LEN: usize = 64;

/// A record field name from the request: bounded length, no control characters.
/// Whether the field exists is left to the caller.
pub fn parse_field_name<'a>(field_name: &str, raw: &'a str) -> Result<&'a str> {
    if raw.chars().count() > MAX_FIELD_NAME_LEN {
        return Err(PokedexError::invalid_parameter(
            field_name,
            raw,
            format!("must be at most {} characters", MAX_FIELD_NAME_LEN),
        ));
    }

    if raw.chars().any(char::is_control) {
        return Err(PokedexError::invalid_parameter(
            field_name,
            raw.escape_default().to_string(),
            "contains control characters",
        ));
    }

    Ok(raw)
}

use std::collections::HashMap;

use winazure_core::{Error, Result};

use crate::Config;

/// Parses a storage connection string.
///
/// Keys are matched exactly; unknown keys such as `DefaultEndpointsProtocol`
/// are accepted and ignored.
pub(crate) fn parse(conn_str: &str) -> Result<Config> {
    let key_values = parse_into_key_values(conn_str)?;

    if key_values.get("UseDevelopmentStorage").map(String::as_str) == Some("true") {
        return Ok(Config::development());
    }

    Ok(Config {
        account_name: key_values.get("AccountName").cloned(),
        account_key: key_values.get("AccountKey").cloned(),
        ..Default::default()
    })
}

/// Renders `DefaultEndpointsProtocol=https;AccountName=..;AccountKey=..`.
pub(crate) fn render(config: &Config) -> String {
    format!(
        "DefaultEndpointsProtocol=https;AccountName={};AccountKey={}",
        config.account_name.as_deref().unwrap_or_default(),
        config.account_key.as_deref().unwrap_or_default()
    )
}

fn parse_into_key_values(conn_str: &str) -> Result<HashMap<String, String>> {
    conn_str
        .trim()
        .replace('\n', "")
        .split(';')
        .filter(|field| !field.trim().is_empty())
        .map(|field| {
            // Account keys end with `=` padding, split on the first one only.
            let (key, value) = field.trim().split_once('=').ok_or_else(|| {
                Error::config_invalid("invalid connection string, expected '=' in field")
                    .with_context(format!("field: {field}"))
            })?;
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

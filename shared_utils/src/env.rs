use thiserror::Error;

/// None of the environment variables consulted for a setting are set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {}", .0.join(" or "))]
pub struct MissingEnvVarError(pub Vec<String>);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// An empty value counts as missing.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    first_env_var(&[name])
}

/// Returns the value of the first set, non-empty variable in `names`.
///
/// Useful when a credential is published under more than one conventional
/// name (e.g. `APCA_API_KEY_ID` and `ALPACA_API_KEY`).
pub fn first_env_var(names: &[&str]) -> Result<String, MissingEnvVarError> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| MissingEnvVarError(names.iter().map(|n| n.to_string()).collect()))
}

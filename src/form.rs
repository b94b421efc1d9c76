use thiserror::Error;

/// Validation failures on the account forms. The message is shown to the visitor as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Name is required")]
    EmptyName,
    #[error("Email is required")]
    EmptyEmail,
}

/// Splits a comma separated skill list, dropping blanks.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_owned)
        .collect()
}

// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password acquisition via TTY prompt or `TAGFLOW_PASSWORD`.

use secrecy::{ExposeSecret, SecretString};
use tagflow_core::TagflowError;

/// Read by `login` when set, for scripted use.
pub const PASSWORD_ENV_VAR: &str = "TAGFLOW_PASSWORD";

/// Password for `login`: the environment variable first, then the terminal.
pub fn login_password() -> Result<SecretString, TagflowError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }
    prompt("Password: ")
}

/// Current and new password for `passwd`. Only works interactively.
pub fn password_change() -> Result<(SecretString, SecretString), TagflowError> {
    let old = prompt("Current password: ")?;
    let new = prompt("New password: ")?;
    let confirm = prompt("Confirm new password: ")?;
    Ok((old, confirmed(new, &confirm)?))
}

fn confirmed(new: SecretString, confirm: &SecretString) -> Result<SecretString, TagflowError> {
    if new.expose_secret() != confirm.expose_secret() {
        return Err(TagflowError::Input("passwords do not match".to_string()));
    }
    Ok(new)
}

fn prompt(label: &str) -> Result<SecretString, TagflowError> {
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Err(TagflowError::Input(format!(
            "no terminal to read the password from; set {PASSWORD_ENV_VAR} or run interactively"
        )));
    }
    eprint!("{label}");
    let password = rpassword::read_password()
        .map_err(|e| TagflowError::Internal(format!("failed to read password: {e}")))?;
    if password.is_empty() {
        return Err(TagflowError::Input("empty password not allowed".to_string()));
    }
    Ok(SecretString::from(password))
}

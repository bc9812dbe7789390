//! Thin dialoguer wrappers shared by the interactive menus.

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

/// Pick one of `items`; returns its index.
pub fn select<T: std::fmt::Display>(prompt: &str, items: &[T]) -> Result<usize> {
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .context("Failed to read selection")
}

/// Required text; empty input is rejected by the prompt itself.
pub fn text(prompt: &str) -> Result<String> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(false)
        .interact_text()
        .context("Failed to read user input")?;
    Ok(value.trim().to_string())
}

/// Text with a pre-filled default.
pub fn text_or(prompt: &str, default: &str) -> Result<String> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()
        .context("Failed to read user input")?;
    Ok(value.trim().to_string())
}

/// Optional text; blank input becomes `None`.
pub fn optional(prompt: &str) -> Result<Option<String>> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{} {}", prompt, style("(optional)").dim()))
        .allow_empty(true)
        .interact_text()
        .context("Failed to read user input")?;
    Ok(non_empty(&value))
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()
        .context("Failed to read confirmation")
}

/// Print captured output under a bold header.
pub fn print_section(title: &str, body: &str) {
    println!();
    println!("{}", style(title).bold().cyan());
    if body.trim().is_empty() {
        println!("{}", style("(no output)").dim());
    } else {
        println!("{}", body);
    }
}

pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Split free-form parameters on whitespace.
pub fn split_params(value: &str) -> Vec<String> {
    value.split_whitespace().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  x "), Some("x".to_string()));
        assert_eq!(non_empty("   "), None);
    }

    #[test]
    fn test_split_params() {
        assert_eq!(split_params(" --a  b "), vec!["--a", "b"]);
        assert!(split_params("").is_empty());
    }
}

// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Each command first navigates to the view it belongs to, so the
//! navigation guard decides whether it may run at all.

use colored::Colorize;
use secrecy::{ExposeSecret, SecretString};
use tagflow_config::model::SessionBackend;
use tagflow_core::{FileItem, ResourceQuery, TagNode, TagflowError};
use tagflow_router::{GuardDecision, Route};
use tracing::info;

use crate::app::App;

/// Outcome of `tagflow login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn { username: String },
    /// A session already exists; the login view redirected away.
    AlreadyLoggedIn { username: String },
}

pub async fn login(
    app: &App,
    username: &str,
    password: &SecretString,
) -> Result<LoginOutcome, TagflowError> {
    if let GuardDecision::Redirect(_) = app.navigator.navigate(Route::Login) {
        return Ok(LoginOutcome::AlreadyLoggedIn {
            username: app.session.username().unwrap_or_default(),
        });
    }

    app.gateway.login(username, password.expose_secret()).await?;
    app.navigator.navigate(Route::HOME);
    Ok(LoginOutcome::LoggedIn {
        username: username.to_string(),
    })
}

/// Returns whether a session was open.
pub fn logout(app: &App) -> bool {
    let was_logged_in = app.session.is_logged_in();
    app.session.logout();
    app.cache.clear();
    app.navigator.navigate(Route::LOGIN);
    was_logged_in
}

pub fn status(app: &App, color: bool) -> String {
    let backend = match app.config.session.backend {
        SessionBackend::File => format!("file ({})", app.config.session.path),
        SessionBackend::Memory => "memory".to_string(),
    };
    let user = match app.session.username() {
        Some(name) if color => format!("{} {}", "logged in as".green(), name.bold()),
        Some(name) => format!("logged in as {name}"),
        None if color => "not logged in".yellow().to_string(),
        None => "not logged in".to_string(),
    };

    let mut out = String::new();
    out.push_str("tagflow status\n");
    out.push_str(&format!("  {}\n", "-".repeat(35)));
    out.push_str(&format!("  Backend:  {}\n", app.gateway.base_url()));
    out.push_str(&format!("  Session:  {user}\n"));
    out.push_str(&format!("  Storage:  {backend}\n"));
    out
}

/// Refreshes and renders the tag tree.
pub async fn tags(app: &App) -> Result<String, TagflowError> {
    enter(app, Route::Home)?;
    app.cache.fetch_tag_tree().await?;
    Ok(render_tree(&app.cache.tags()))
}

/// Lists one page of files for `tag_id` (every file when `None`).
pub async fn files(
    app: &App,
    tag_id: Option<i64>,
    page: Option<u32>,
    limit: Option<u32>,
    color: bool,
) -> Result<String, TagflowError> {
    enter(app, Route::Home)?;
    if tag_id.is_some() {
        // Needed to resolve the selected tag's name.
        app.cache.fetch_tag_tree().await?;
    }

    let mut query = ResourceQuery::for_tag(tag_id);
    if let Some(page) = page {
        query = query.with_page(page);
    }
    if let Some(limit) = limit {
        query = query.with_limit(limit);
    }
    app.cache.fetch_page(query).await?;

    let state = app.cache.snapshot();
    let title = match (state.selected_tag_id, state.selected_tag_name.as_str()) {
        (None, _) => "All files".to_string(),
        (Some(id), "") => format!("Tag #{id}"),
        (Some(_), name) => name.to_string(),
    };
    let title = if color { title.bold().to_string() } else { title };

    let mut out = format!("{title} ({} of {})\n", state.files.len(), state.total);
    out.push_str(&render_files(&state.files));
    Ok(out)
}

pub async fn change_password(
    app: &App,
    old: &SecretString,
    new: &SecretString,
) -> Result<(), TagflowError> {
    enter(app, Route::SecuritySettings)?;
    app.gateway
        .change_password(old.expose_secret(), new.expose_secret())
        .await
}

fn enter(app: &App, route: Route) -> Result<(), TagflowError> {
    match app.navigator.navigate(route) {
        GuardDecision::Allow(_) => Ok(()),
        GuardDecision::Redirect(to) => {
            info!(?route, ?to, "navigation redirected");
            Err(TagflowError::LoginRequired {
                path: route.path().to_string(),
            })
        }
    }
}

/// Indented tree, one tag per line.
pub fn render_tree(tree: &[TagNode]) -> String {
    let mut out = String::new();
    let mut stack: Vec<(&TagNode, usize)> = tree.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        out.push_str(&format!(
            "{}{} [{}] #{}\n",
            "  ".repeat(depth),
            node.name,
            node.category,
            node.id
        ));
        stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }
    out
}

pub fn render_files(files: &[FileItem]) -> String {
    let mut out = String::new();
    for file in files {
        out.push_str(&format!(
            "  {:>8}  {:>9}  {}/{}\n",
            file.id,
            format_size(file.size),
            file.parent_path.trim_end_matches('/'),
            file.filename
        ));
        out.push_str(&format!("  {:>8}  {:>9}  modified {}\n", "", "", format_mtime(file.mtime)));
    }
    out
}

/// Human-readable byte count.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Epoch seconds as UTC `YYYY-MM-DD HH:MM`.
pub fn format_mtime(epoch_secs: i64) -> String {
    chrono::DateTime::from_timestamp(epoch_secs, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

//! Rendering of users and groups for the command line.
//!
//! Renderers take the raw resource payloads returned by
//! [`ScimClient`](crate::ScimClient) and write to any [`io::Write`]. JSON
//! output is the payload as returned; tables and CSV read the typed
//! [`User`] and [`Group`] views. Missing attributes show as `N/A` in tables
//! and as empty cells in CSV.

use crate::admin::MemberSummary;
use crate::resource::{Group, Name, User};
use log::warn;
use serde::Serialize;
use serde_json::Value;
use std::io;

const NOT_AVAILABLE: &str = "N/A";
const FIELD_WIDTH: usize = 15;

/// Format for resource listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// Format for a single resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DetailFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type OutputResult = Result<(), OutputError>;

struct Column {
    header: &'static str,
    width: usize,
}

const USER_COLUMNS: [Column; 5] = [
    Column { header: "ID", width: 25 },
    Column { header: "Username", width: 30 },
    Column { header: "Given Name", width: 15 },
    Column { header: "Family Name", width: 15 },
    Column { header: "Active", width: 8 },
];

const GROUP_COLUMNS: [Column; 4] = [
    Column { header: "ID", width: 25 },
    Column { header: "Display Name", width: 30 },
    Column { header: "External ID", width: 20 },
    Column { header: "Members", width: 8 },
];

pub const USER_CSV_HEADER: [&str; 7] = [
    "id",
    "externalId",
    "userName",
    "givenName",
    "familyName",
    "created",
    "active",
];

pub const GROUP_CSV_HEADER: [&str; 4] = ["id", "displayName", "externalId", "member_count"];

/// Render a user listing.
pub fn render_users(out: &mut impl io::Write, users: &[Value], format: OutputFormat) -> OutputResult {
    match format {
        OutputFormat::Table => users_table(out, users),
        OutputFormat::Csv => users_csv(out, users),
        OutputFormat::Json => write_json(out, users),
    }
}

/// Render a group listing.
pub fn render_groups(out: &mut impl io::Write, groups: &[Value], format: OutputFormat) -> OutputResult {
    match format {
        OutputFormat::Table => groups_table(out, groups),
        OutputFormat::Csv => groups_csv(out, groups),
        OutputFormat::Json => write_json(out, groups),
    }
}

/// Render one user as a Field/Value table or as JSON.
pub fn render_user_detail(out: &mut impl io::Write, user: &Value, format: DetailFormat) -> OutputResult {
    if format == DetailFormat::Json {
        return write_json(out, user);
    }

    let view = user_view(user);
    detail_header(out, 50)?;
    field_line(out, "ID", or_na(view.id.as_deref()))?;
    field_line(out, "Username", or_na(view.user_name.as_deref()))?;
    field_line(out, "External ID", or_na(view.external_id.as_deref()))?;

    if view.name.as_ref().is_some_and(|name| *name != Name::default()) {
        field_line(out, "Given Name", or_na(view.given_name()))?;
        field_line(out, "Family Name", or_na(view.family_name()))?;
    }

    for (i, email) in view.emails.iter().enumerate() {
        let label = if i == 0 {
            "Email".to_string()
        } else {
            format!("Email {}", i + 1)
        };
        let kind = if email.is_primary() { "Primary" } else { "Secondary" };
        field_line(out, &label, &format!("{} ({kind})", email.value))?;
    }

    field_line(out, "Active", or_na(flag(view.active)))?;
    field_line(out, "Created", or_na(view.created()))?;
    field_line(out, "Last Modified", or_na(view.last_modified()))?;
    Ok(())
}

/// Render one group with its resolved members.
///
/// JSON output is the group payload as returned; `members` only feeds the
/// table's member tree.
pub fn render_group_detail(
    out: &mut impl io::Write,
    group: &Value,
    members: &[MemberSummary],
    format: DetailFormat,
) -> OutputResult {
    if format == DetailFormat::Json {
        return write_json(out, group);
    }

    let view = group_view(group);
    detail_header(out, 60)?;
    field_line(out, "ID", or_na(view.id.as_deref()))?;
    field_line(out, "Display Name", or_na(view.display_name.as_deref()))?;
    field_line(out, "External ID", or_na(view.external_id.as_deref()))?;
    field_line(out, "Created", or_na(view.created()))?;
    field_line(out, "Last Modified", or_na(view.last_modified()))?;
    field_line(out, "Member Count", &members.len().to_string())?;

    if members.is_empty() {
        return Ok(());
    }
    writeln!(out, "{:<FIELD_WIDTH$}", "Members")?;
    for (i, member) in members.iter().enumerate() {
        let branch = if i + 1 < members.len() { "  ├─" } else { "  └─" };
        if member.display == member.id {
            field_line(out, branch, &member.display)?;
        } else {
            field_line(out, branch, &format!("{} (ID: {})", member.display, member.id))?;
        }
    }
    Ok(())
}

/// Render the member listing of `group-membership list`.
pub fn render_member_list(out: &mut impl io::Write, group: &str, members: &[MemberSummary]) -> OutputResult {
    writeln!(out, "Members of group '{group}':")?;
    for member in members {
        writeln!(out, "  - {} (ID: {})", member.display, member.id)?;
    }
    Ok(())
}

fn users_table(out: &mut impl io::Write, users: &[Value]) -> OutputResult {
    if users.is_empty() {
        writeln!(out, "No users found.")?;
        return Ok(());
    }

    table_header(out, &USER_COLUMNS)?;
    for user in users.iter().map(user_view) {
        let cells = [
            or_na(user.id.as_deref()),
            or_na(user.user_name.as_deref()),
            or_na(user.given_name()),
            or_na(user.family_name()),
            or_na(flag(user.active)),
        ];
        table_row(out, &USER_COLUMNS, &cells)?;
    }
    Ok(())
}

fn groups_table(out: &mut impl io::Write, groups: &[Value]) -> OutputResult {
    if groups.is_empty() {
        writeln!(out, "No groups found.")?;
        return Ok(());
    }

    table_header(out, &GROUP_COLUMNS)?;
    for group in groups.iter().map(group_view) {
        let member_count = group.members.len().to_string();
        let cells = [
            or_na(group.id.as_deref()),
            or_na(group.display_name.as_deref()),
            or_na(group.external_id.as_deref()),
            member_count.as_str(),
        ];
        table_row(out, &GROUP_COLUMNS, &cells)?;
    }
    Ok(())
}

fn users_csv(out: &mut impl io::Write, users: &[Value]) -> OutputResult {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(USER_CSV_HEADER)?;
    for user in users.iter().map(user_view) {
        writer.write_record([
            user.id.as_deref().unwrap_or_default(),
            user.external_id.as_deref().unwrap_or_default(),
            user.user_name.as_deref().unwrap_or_default(),
            user.given_name().unwrap_or_default(),
            user.family_name().unwrap_or_default(),
            user.created().unwrap_or_default(),
            flag(user.active).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn groups_csv(out: &mut impl io::Write, groups: &[Value]) -> OutputResult {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(GROUP_CSV_HEADER)?;
    for group in groups.iter().map(group_view) {
        let member_count = group.members.len().to_string();
        writer.write_record([
            group.id.as_deref().unwrap_or_default(),
            group.display_name.as_deref().unwrap_or_default(),
            group.external_id.as_deref().unwrap_or_default(),
            member_count.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl io::Write, payload: &T) -> OutputResult {
    serde_json::to_writer_pretty(&mut *out, payload)?;
    writeln!(out)?;
    Ok(())
}

fn table_header(out: &mut impl io::Write, columns: &[Column]) -> OutputResult {
    let headers: Vec<&str> = columns.iter().map(|c| c.header).collect();
    write_cells(out, columns, &headers)?;
    let rule = columns.iter().map(|c| c.width).sum::<usize>();
    writeln!(out, "{}", "-".repeat(rule))?;
    Ok(())
}

fn table_row(out: &mut impl io::Write, columns: &[Column], cells: &[&str]) -> OutputResult {
    let truncated: Vec<&str> = columns
        .iter()
        .zip(cells)
        .map(|(column, cell)| truncate(cell, column.width - 1))
        .collect();
    write_cells(out, columns, &truncated)
}

fn write_cells(out: &mut impl io::Write, columns: &[Column], cells: &[&str]) -> OutputResult {
    let line = columns
        .iter()
        .zip(cells)
        .map(|(column, cell)| format!("{cell:<width$}", width = column.width))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}

fn detail_header(out: &mut impl io::Write, rule: usize) -> OutputResult {
    writeln!(out, "{:<FIELD_WIDTH$} Value", "Field")?;
    writeln!(out, "{}", "-".repeat(rule))?;
    Ok(())
}

fn field_line(out: &mut impl io::Write, field: &str, value: &str) -> OutputResult {
    writeln!(out, "{field:<FIELD_WIDTH$} {value}")?;
    Ok(())
}

/// First `max` characters of `text`.
fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Typed view of a returned user. A payload that does not decode renders as
/// an empty user.
fn user_view(value: &Value) -> User {
    User::from_value(value).unwrap_or_else(|e| {
        warn!("Could not decode user {}: {e}", value.get("id").unwrap_or(&Value::Null));
        User::default()
    })
}

fn group_view(value: &Value) -> Group {
    Group::from_value(value).unwrap_or_else(|e| {
        warn!("Could not decode group {}: {e}", value.get("id").unwrap_or(&Value::Null));
        Group::default()
    })
}

fn flag(value: Option<bool>) -> Option<&'static str> {
    value.map(|active| if active { "true" } else { "false" })
}

fn or_na(text: Option<&str>) -> &str {
    text.unwrap_or(NOT_AVAILABLE)
}

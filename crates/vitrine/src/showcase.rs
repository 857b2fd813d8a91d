//! Demo dataset and prebuilt widgets for the component showcase.
//!
//! The showcase exercises every `InputField` variant and a selectable,
//! sortable user table against a small fixed dataset.

use vitrine_core::Color;
use vitrine_widgets::{
    CellValue, ControlSize, DataTable, InputField, InputType, RowIdentity, TableColumn, TableRow,
    TextAlign, Variant,
};

/// Error message shown while the demo password is too short.
pub const PASSWORD_ERROR: &str = "Password must be at least 8 characters.";

/// Error message for a malformed email address.
pub const EMAIL_ERROR: &str = "Please enter a valid email address.";

/// The five demo users rendered by the showcase table.
#[must_use]
pub fn sample_users() -> Vec<TableRow> {
    fn user(
        id: &str,
        name: &str,
        email: &str,
        username: &str,
        role: &str,
        status: &str,
    ) -> TableRow {
        TableRow::new()
            .cell("id", id)
            .cell("name", name)
            .cell("email", email)
            .cell("username", username)
            .cell("role", role)
            .cell("status", status)
    }

    vec![
        user("1", "John Doe", "john@example.com", "@johndoe", "Admin", "Active"),
        user("2", "Jane Smith", "jane@example.com", "@janesmith", "Editor", "Active"),
        user("3", "Mike Brown", "mike@example.com", "@mikebrown", "Viewer", "Pending"),
        user("4", "Sarah Wilson", "sarah@example.com", "@sarahwilson", "Editor", "Inactive"),
        user("5", "David Johnson", "david@example.com", "@davidjohnson", "Viewer", "Active"),
    ]
}

fn render_name(_: &CellValue, row: &TableRow, _: usize) -> String {
    let name = row.value_or_empty("name").display();
    let username = row.value_or_empty("username").display();
    if username.is_empty() {
        name
    } else {
        format!("{name} ({username})")
    }
}

/// Column definitions for the user table.
///
/// Name, email, and status sort; role and actions do not.
#[must_use]
pub fn user_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("name", "Name")
            .sortable()
            .width(180.0)
            .render(render_name),
        TableColumn::new("email", "Email").sortable().width(180.0),
        TableColumn::new("role", "Role").width(100.0),
        TableColumn::new("status", "Status").sortable().width(100.0),
        TableColumn::new("actions", "Actions")
            .data_index("id")
            .width(120.0)
            .align(TextAlign::Right),
    ]
}

/// The showcase user table: selectable, striped, keyed by user id.
#[must_use]
pub fn user_table() -> DataTable {
    DataTable::new()
        .columns(user_columns())
        .rows(sample_users())
        .selectable(true)
        .striped(true)
        .row_key("id")
        .accessible_name("Users")
        .test_id("data-table-users")
}

/// Minimal email shape check: something@something.something, no whitespace.
#[must_use]
pub fn email_is_valid(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Email error for the current value, or `None` when acceptable.
///
/// Empty input is acceptable; validation only fires on entered text.
#[must_use]
pub fn validate_email(value: &str) -> Option<&'static str> {
    if value.is_empty() || email_is_valid(value) {
        None
    } else {
        Some(EMAIL_ERROR)
    }
}

/// Outlined email input with live validation applied.
#[must_use]
pub fn email_field(value: &str) -> InputField {
    let error = validate_email(value);
    InputField::new()
        .value(value)
        .label("Email address")
        .placeholder("you@example.com")
        .helper_text("We'll never share your email.")
        .input_type(InputType::Email)
        .variant(Variant::Outlined)
        .invalid(error.is_some())
        .error_message(error.unwrap_or_default())
        .show_clear_button(true)
        .test_id("input-email-outlined")
}

/// Password input with a visibility toggle, shown in its error state.
#[must_use]
pub fn password_field(value: &str) -> InputField {
    let too_short = value.chars().count() < 8;
    InputField::new()
        .value(value)
        .label("Password")
        .placeholder("Enter your password")
        .input_type(InputType::Password)
        .show_password_toggle(true)
        .invalid(too_short)
        .error_message(PASSWORD_ERROR)
        .test_id("input-password")
}

/// Filled phone input; `loading` mimics async validation in flight.
#[must_use]
pub fn phone_field(value: &str, loading: bool) -> InputField {
    InputField::new()
        .value(value)
        .label("Phone number")
        .placeholder("+1 (555) 000-0000")
        .input_type(InputType::Tel)
        .variant(Variant::Filled)
        .loading(loading)
        .test_id("input-phone")
}

/// Ghost-variant search input with a leading icon and clear button.
#[must_use]
pub fn search_field(value: &str) -> InputField {
    InputField::new()
        .value(value)
        .placeholder("Search users...")
        .input_type(InputType::Search)
        .variant(Variant::Ghost)
        .size(ControlSize::Sm)
        .show_clear_button(true)
        .test_id("input-search")
}

/// Accent color used by showcase headers.
#[must_use]
pub fn accent_color() -> Color {
    Color::new(0.2, 0.5, 0.95, 1.0)
}

/// Filter rows whose name, email, or username contains the query.
///
/// Matching is case-insensitive; an empty query keeps everything.
#[must_use]
pub fn filter_users(rows: &[TableRow], query: &str) -> Vec<TableRow> {
    if query.is_empty() {
        return rows.to_vec();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            ["name", "email", "username"].iter().any(|key| {
                row.value_or_empty(key)
                    .display()
                    .to_lowercase()
                    .contains(&needle)
            })
        })
        .cloned()
        .collect()
}

/// Identity used by the showcase table.
#[must_use]
pub fn user_identity() -> RowIdentity {
    RowIdentity::ByKey("id".to_string())
}

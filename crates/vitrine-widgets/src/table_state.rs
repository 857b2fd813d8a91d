//! Sort and selection state management for tabular data.
//!
//! [`TableState`] owns the behavior behind the `DataTable` widget: it decides
//! whether sort and selection state are caller-owned (controlled) or
//! widget-owned (uncontrolled), computes the next state for each user action,
//! and derives the rendered row order and selection membership. The two
//! concerns pick their mode independently, once, at construction.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Short wire name, `"asc"` or `"desc"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Current sort state. An absent field means insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Field name currently sorted by, if any
    pub field: Option<String>,
    /// Sort direction
    pub direction: SortDirection,
}

/// A cell value in a table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Empty cell
    Empty,
}

impl CellValue {
    /// Get display text for the cell. Empty cells render as an empty string.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format!("{n}"),
            Self::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
            Self::Empty => String::new(),
        }
    }

    /// Compare two cell values for sorting.
    ///
    /// Like-kinded values order naturally. Mixed kinds, empty cells, and NaN
    /// are incomparable and report `Equal`, so a stable sort leaves them in
    /// their original relative positions.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A row of data: an ordered mapping from field name to value.
///
/// Equality is deep value equality over all fields, which is what selection
/// membership uses by default (see [`RowIdentity`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    /// Cell values by field name
    cells: BTreeMap<String, CellValue>,
}

impl TableRow {
    /// Create a new empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell value.
    #[must_use]
    pub fn cell(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(field.into(), value.into());
        self
    }

    /// Get a cell value by field name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.cells.get(field)
    }

    /// Get a cell value, treating missing fields as [`CellValue::Empty`].
    #[must_use]
    pub fn value_or_empty(&self, field: &str) -> CellValue {
        self.cells.get(field).cloned().unwrap_or(CellValue::Empty)
    }

    /// Number of fields in this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Text alignment within a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Custom cell renderer: `(value, row, row index)` to display text.
pub type CellRenderer = fn(&CellValue, &TableRow, usize) -> String;

/// Column descriptor for a data table.
///
/// `key` must be unique within a table instance; `data_index` (the field
/// read from each row) need not be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique column key
    pub key: String,
    /// Display label
    pub title: String,
    /// Field name to read from each row
    pub data_index: String,
    /// Whether clicking the header sorts by this column
    pub sortable: bool,
    /// Column width hint (None = auto)
    pub width: Option<f32>,
    /// Text alignment
    pub align: TextAlign,
    /// Custom cell renderer (falls back to [`CellValue::display`])
    #[serde(skip)]
    pub render: Option<CellRenderer>,
}

impl TableColumn {
    /// Create a new column. The data index defaults to the key.
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            data_index: key.clone(),
            key,
            title: title.into(),
            sortable: false,
            width: None,
            align: TextAlign::Left,
            render: None,
        }
    }

    /// Read a different field than the column key.
    #[must_use]
    pub fn data_index(mut self, field: impl Into<String>) -> Self {
        self.data_index = field.into();
        self
    }

    /// Make this column sortable.
    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set a width hint.
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width.max(20.0));
        self
    }

    /// Set text alignment.
    #[must_use]
    pub const fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Set a custom cell renderer.
    #[must_use]
    pub const fn render(mut self, renderer: CellRenderer) -> Self {
        self.render = Some(renderer);
        self
    }
}

/// How rows are matched for selection membership.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowIdentity {
    /// Deep value equality over the whole row
    #[default]
    ByValue,
    /// Equality of a single identifier field; rows missing the field fall
    /// back to whole-row equality
    ByKey(String),
}

impl RowIdentity {
    /// Check whether two rows refer to the same logical row.
    #[must_use]
    pub fn same_row(&self, a: &TableRow, b: &TableRow) -> bool {
        match self {
            Self::ByValue => a == b,
            Self::ByKey(field) => match (a.get(field), b.get(field)) {
                (Some(x), Some(y)) => x == y,
                _ => a == b,
            },
        }
    }
}

/// Policy for checking a row that is already selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectPolicy {
    /// Append unconditionally; duplicate entries are possible
    #[default]
    AppendOnly,
    /// Skip the append when an identity-equal row is already selected
    Dedupe,
}

/// A piece of state that is either caller-owned or widget-owned.
///
/// The variant is chosen once at construction and never switched. An
/// `External` cell holds the latest caller-supplied snapshot and refuses
/// commits; an `Internal` cell owns its value and absorbs commits.
#[derive(Debug, Clone, PartialEq)]
pub enum StateCell<T> {
    /// Caller-owned: reads come from the prop snapshot, writes are dropped
    External(T),
    /// Widget-owned mutable cell
    Internal(T),
}

impl<T> StateCell<T> {
    /// Check whether this cell is caller-owned.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// Read the effective value.
    #[must_use]
    pub const fn get(&self) -> &T {
        match self {
            Self::External(value) | Self::Internal(value) => value,
        }
    }

    /// Commit a next value. Returns false (dropping the value) when the
    /// cell is caller-owned.
    pub fn commit(&mut self, next: T) -> bool {
        match self {
            Self::External(_) => false,
            Self::Internal(value) => {
                *value = next;
                true
            }
        }
    }

    /// Replace the caller-supplied snapshot. No-op for internal cells;
    /// an internal cell is seeded once and never re-absorbs props.
    pub fn sync(&mut self, snapshot: T) {
        if let Self::External(value) = self {
            *value = snapshot;
        }
    }
}

/// Message describing a sort change: the field and next direction.
///
/// In controlled mode the caller is responsible for reordering the dataset
/// and re-supplying it; the message carries no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSortChanged {
    /// Field name to sort by
    pub field: String,
    /// New sort direction
    pub direction: SortDirection,
}

/// Message carrying the full next selection (not a delta).
#[derive(Debug, Clone, PartialEq)]
pub struct TableRowsSelected {
    /// The complete next selection, in selection order
    pub rows: Vec<TableRow>,
}

/// Controller for a table's sort and selection state.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    sort: StateCell<SortState>,
    selection: StateCell<Vec<TableRow>>,
    identity: RowIdentity,
    policy: SelectPolicy,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new()
    }
}

impl TableState {
    /// Create a controller with both concerns uncontrolled and empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sort: StateCell::Internal(SortState::default()),
            selection: StateCell::Internal(Vec::new()),
            identity: RowIdentity::ByValue,
            policy: SelectPolicy::AppendOnly,
        }
    }

    /// Put sorting under caller control with the given current state.
    ///
    /// In this mode the controller never reorders data; ordering is assumed
    /// already applied by the caller to the dataset it passes in.
    #[must_use]
    pub fn with_controlled_sort(mut self, field: Option<String>, direction: SortDirection) -> Self {
        self.sort = StateCell::External(SortState { field, direction });
        self
    }

    /// Seed the uncontrolled selection. Later prop changes are not
    /// re-absorbed.
    #[must_use]
    pub fn with_initial_selection(mut self, rows: Vec<TableRow>) -> Self {
        self.selection = StateCell::Internal(rows);
        self
    }

    /// Put selection under caller control with the given current set.
    #[must_use]
    pub fn with_controlled_selection(mut self, rows: Vec<TableRow>) -> Self {
        self.selection = StateCell::External(rows);
        self
    }

    /// Set how rows are matched for selection membership.
    #[must_use]
    pub fn with_identity(mut self, identity: RowIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Set the policy for re-checking an already-selected row.
    #[must_use]
    pub const fn with_select_policy(mut self, policy: SelectPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Update the controlled sort snapshot (no-op when uncontrolled).
    pub fn sync_controlled_sort(&mut self, field: Option<String>, direction: SortDirection) {
        self.sort.sync(SortState { field, direction });
    }

    /// Update the controlled selection snapshot (no-op when uncontrolled).
    pub fn sync_controlled_selection(&mut self, rows: Vec<TableRow>) {
        self.selection.sync(rows);
    }

    /// The effective sort state.
    #[must_use]
    pub fn sort_state(&self) -> &SortState {
        self.sort.get()
    }

    /// The effective selection, in selection order.
    #[must_use]
    pub fn selected_rows(&self) -> &[TableRow] {
        self.selection.get()
    }

    /// Whether sorting is caller-owned.
    #[must_use]
    pub const fn is_sort_controlled(&self) -> bool {
        self.sort.is_external()
    }

    /// Whether selection is caller-owned.
    #[must_use]
    pub const fn is_selection_controlled(&self) -> bool {
        self.selection.is_external()
    }

    /// Handle a header click on `column`.
    ///
    /// Returns `None` (no state change, no message) for non-sortable
    /// columns. Otherwise the next direction is descending only when the
    /// column's field is already the active field and currently ascending;
    /// every other case resets to ascending. Repeated clicks cycle
    /// ascending/descending and never return to unsorted.
    pub fn sort(&mut self, column: &TableColumn) -> Option<TableSortChanged> {
        if !column.sortable {
            return None;
        }

        let current = self.sort.get();
        let direction = if current.field.as_deref() == Some(column.data_index.as_str())
            && current.direction == SortDirection::Ascending
        {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };

        self.sort.commit(SortState {
            field: Some(column.data_index.clone()),
            direction,
        });

        Some(TableSortChanged {
            field: column.data_index.clone(),
            direction,
        })
    }

    /// Handle a row checkbox toggle.
    ///
    /// Checking appends to the selection sequence (subject to
    /// [`SelectPolicy`]); unchecking removes every identity-equal entry.
    pub fn toggle_row(&mut self, row: &TableRow, checked: bool) -> TableRowsSelected {
        let current = self.selection.get();
        let next = if checked {
            let mut next = current.clone();
            let already = matches!(self.policy, SelectPolicy::Dedupe)
                && current.iter().any(|r| self.identity.same_row(r, row));
            if !already {
                next.push(row.clone());
            }
            next
        } else {
            current
                .iter()
                .filter(|r| !self.identity.same_row(r, row))
                .cloned()
                .collect()
        };

        self.selection.commit(next.clone());
        TableRowsSelected { rows: next }
    }

    /// Handle the select-all checkbox.
    ///
    /// Checking selects the entire dataset in dataset order, regardless of
    /// any prior partial selection; unchecking clears the selection.
    pub fn toggle_all(&mut self, data: &[TableRow], checked: bool) -> TableRowsSelected {
        let next = if checked { data.to_vec() } else { Vec::new() };
        self.selection.commit(next.clone());
        TableRowsSelected { rows: next }
    }

    /// Whether some selected entry matches `row`.
    #[must_use]
    pub fn is_row_selected(&self, row: &TableRow) -> bool {
        self.selection
            .get()
            .iter()
            .any(|r| self.identity.same_row(r, row))
    }

    /// Whether the dataset is non-empty and fully selected.
    #[must_use]
    pub fn is_all_selected(&self, data: &[TableRow]) -> bool {
        !data.is_empty() && self.selection.get().len() == data.len()
    }

    /// Whether the selection is a proper non-empty subset of the dataset.
    #[must_use]
    pub fn is_indeterminate(&self, data: &[TableRow]) -> bool {
        let count = self.selection.get().len();
        count > 0 && count < data.len()
    }

    /// Derive the row order to render.
    ///
    /// Controlled sort returns the dataset untouched (the caller already
    /// ordered it). Uncontrolled sort applies a stable sort by the active
    /// field; descending negates the comparison rather than reversing the
    /// sequence, so equal-key runs keep their original relative order.
    #[must_use]
    pub fn ordered(&self, data: &[TableRow]) -> Vec<TableRow> {
        let mut rows = data.to_vec();
        if self.sort.is_external() {
            return rows;
        }

        let state = self.sort.get();
        let Some(field) = state.field.as_deref() else {
            return rows;
        };

        let direction = state.direction;
        rows.sort_by(|a, b| {
            let ord = a.value_or_empty(field).compare(&b.value_or_empty(field));
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn user(name: &str, email: &str) -> TableRow {
        TableRow::new().cell("name", name).cell("email", email)
    }

    fn sample_rows() -> Vec<TableRow> {
        vec![
            user("John", "john@example.com"),
            user("Jane", "jane@example.com"),
        ]
    }

    fn name_column() -> TableColumn {
        TableColumn::new("name", "Name").sortable()
    }

    // ===== CellValue Tests =====

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Text("hi".into()).display(), "hi");
        assert_eq!(CellValue::Number(42.5).display(), "42.5");
        assert_eq!(CellValue::Bool(true).display(), "Yes");
        assert_eq!(CellValue::Bool(false).display(), "No");
        assert_eq!(CellValue::Empty.display(), "");
    }

    #[test]
    fn test_cell_value_compare_same_kind() {
        assert_eq!(
            CellValue::Text("a".into()).compare(&CellValue::Text("b".into())),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Number(2.0).compare(&CellValue::Number(1.0)),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Bool(false).compare(&CellValue::Bool(true)),
            Ordering::Less
        );
    }

    #[test]
    fn test_cell_value_compare_mixed_kinds_equal() {
        assert_eq!(
            CellValue::Text("1".into()).compare(&CellValue::Number(1.0)),
            Ordering::Equal
        );
        assert_eq!(
            CellValue::Empty.compare(&CellValue::Text("x".into())),
            Ordering::Equal
        );
    }

    #[test]
    fn test_cell_value_compare_nan_equal() {
        assert_eq!(
            CellValue::Number(f64::NAN).compare(&CellValue::Number(1.0)),
            Ordering::Equal
        );
    }

    // ===== TableRow Tests =====

    #[test]
    fn test_table_row_deep_equality() {
        assert_eq!(user("John", "john@example.com"), user("John", "john@example.com"));
        assert_ne!(user("John", "john@example.com"), user("John", "jane@example.com"));
    }

    #[test]
    fn test_table_row_value_or_empty() {
        let row = user("John", "john@example.com");
        assert_eq!(row.value_or_empty("name"), CellValue::Text("John".into()));
        assert_eq!(row.value_or_empty("missing"), CellValue::Empty);
    }

    // ===== TableColumn Tests =====

    #[test]
    fn test_table_column_defaults() {
        let col = TableColumn::new("name", "Name");
        assert_eq!(col.key, "name");
        assert_eq!(col.title, "Name");
        assert_eq!(col.data_index, "name");
        assert!(!col.sortable);
        assert!(col.width.is_none());
    }

    #[test]
    fn test_table_column_data_index_override() {
        let col = TableColumn::new("display-name", "Name").data_index("name");
        assert_eq!(col.data_index, "name");
    }

    #[test]
    fn test_table_column_width_min() {
        let col = TableColumn::new("id", "ID").width(5.0);
        assert_eq!(col.width, Some(20.0));
    }

    #[test]
    fn test_sort_state_serde_round_trip() {
        let state = SortState {
            field: Some("name".to_string()),
            direction: SortDirection::Descending,
        };
        let json = serde_json::to_string(&state).expect("serialize");
        let back: SortState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(state, back);
    }

    #[test]
    fn test_row_serde_round_trip() {
        let row = user("John", "john@example.com").cell("age", 42);
        let json = serde_json::to_string(&row).expect("serialize");
        let back: TableRow = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(row, back);
    }

    // ===== StateCell Tests =====

    #[test]
    fn test_state_cell_internal_commits() {
        let mut cell = StateCell::Internal(1);
        assert!(cell.commit(2));
        assert_eq!(*cell.get(), 2);
    }

    #[test]
    fn test_state_cell_external_refuses_commit() {
        let mut cell = StateCell::External(1);
        assert!(!cell.commit(2));
        assert_eq!(*cell.get(), 1);
    }

    #[test]
    fn test_state_cell_sync_only_updates_external() {
        let mut external = StateCell::External(1);
        external.sync(5);
        assert_eq!(*external.get(), 5);

        let mut internal = StateCell::Internal(1);
        internal.sync(5);
        assert_eq!(*internal.get(), 1);
    }

    // ===== Sort Tests =====

    #[test]
    fn test_sort_non_sortable_is_silent_noop() {
        let mut state = TableState::new();
        let col = TableColumn::new("name", "Name");
        assert!(state.sort(&col).is_none());
        assert!(state.sort_state().field.is_none());
    }

    #[test]
    fn test_sort_first_click_ascending() {
        let mut state = TableState::new();
        let change = state.sort(&name_column()).unwrap();
        assert_eq!(change.field, "name");
        assert_eq!(change.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_cycles_and_never_returns_to_unsorted() {
        let mut state = TableState::new();
        let col = name_column();
        assert_eq!(state.sort(&col).unwrap().direction, SortDirection::Ascending);
        assert_eq!(state.sort(&col).unwrap().direction, SortDirection::Descending);
        assert_eq!(state.sort(&col).unwrap().direction, SortDirection::Ascending);
        assert!(state.sort_state().field.is_some());
    }

    #[test]
    fn test_sort_other_column_resets_to_ascending() {
        let mut state = TableState::new();
        state.sort(&name_column());
        // name is now ascending; clicking email must start ascending too
        let email = TableColumn::new("email", "Email").sortable();
        assert_eq!(state.sort(&email).unwrap().direction, SortDirection::Ascending);
        // and back on name: ascending again, not descending
        assert_eq!(
            state.sort(&name_column()).unwrap().direction,
            SortDirection::Ascending
        );
    }

    #[test]
    fn test_sort_uses_data_index_not_key() {
        let mut state = TableState::new();
        let col = TableColumn::new("col-1", "Name").data_index("name").sortable();
        let change = state.sort(&col).unwrap();
        assert_eq!(change.field, "name");
    }

    #[test]
    fn test_controlled_sort_emits_without_committing() {
        let mut state =
            TableState::new().with_controlled_sort(Some("name".into()), SortDirection::Ascending);
        let change = state.sort(&name_column()).unwrap();
        assert_eq!(change.direction, SortDirection::Descending);
        // Effective state is still the caller's snapshot
        assert_eq!(state.sort_state().direction, SortDirection::Ascending);
    }

    #[test]
    fn test_controlled_sort_does_not_reorder() {
        let state =
            TableState::new().with_controlled_sort(Some("name".into()), SortDirection::Ascending);
        let rows = sample_rows();
        assert_eq!(state.ordered(&rows), rows);
    }

    #[test]
    fn test_uncontrolled_sort_reorders() {
        let mut state = TableState::new();
        state.sort(&name_column());
        let ordered = state.ordered(&sample_rows());
        assert_eq!(ordered[0].value_or_empty("name").display(), "Jane");
        assert_eq!(ordered[1].value_or_empty("name").display(), "John");

        state.sort(&name_column());
        let ordered = state.ordered(&sample_rows());
        assert_eq!(ordered[0].value_or_empty("name").display(), "John");
        assert_eq!(ordered[1].value_or_empty("name").display(), "Jane");
    }

    #[test]
    fn test_ordered_without_active_field_keeps_insertion_order() {
        let state = TableState::new();
        let rows = sample_rows();
        assert_eq!(state.ordered(&rows), rows);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let rows = vec![
            TableRow::new().cell("group", "a").cell("n", 1),
            TableRow::new().cell("group", "b").cell("n", 2),
            TableRow::new().cell("group", "a").cell("n", 3),
            TableRow::new().cell("group", "a").cell("n", 4),
        ];
        let mut state = TableState::new();
        state.sort(&TableColumn::new("group", "Group").sortable());

        let ordered = state.ordered(&rows);
        let ns: Vec<String> = ordered
            .iter()
            .map(|r| r.value_or_empty("n").display())
            .collect();
        // Equal "a" keys keep original relative order 1, 3, 4
        assert_eq!(ns, vec!["1", "3", "4", "2"]);
    }

    #[test]
    fn test_descending_preserves_equal_key_runs() {
        let rows = vec![
            TableRow::new().cell("group", "a").cell("n", 1),
            TableRow::new().cell("group", "a").cell("n", 2),
            TableRow::new().cell("group", "b").cell("n", 3),
        ];
        let mut state = TableState::new();
        let col = TableColumn::new("group", "Group").sortable();
        state.sort(&col);
        state.sort(&col); // descending

        let ns: Vec<String> = state
            .ordered(&rows)
            .iter()
            .map(|r| r.value_or_empty("n").display())
            .collect();
        // "b" first, then the "a" run still in 1, 2 order
        assert_eq!(ns, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_sort_missing_fields_stay_in_place() {
        let rows = vec![
            TableRow::new().cell("n", 1),
            TableRow::new().cell("name", "Ann").cell("n", 2),
            TableRow::new().cell("n", 3),
        ];
        let mut state = TableState::new();
        state.sort(&name_column());
        let ns: Vec<String> = state
            .ordered(&rows)
            .iter()
            .map(|r| r.value_or_empty("n").display())
            .collect();
        // Missing values compare equal to everything; order unchanged
        assert_eq!(ns, vec!["1", "2", "3"]);
    }

    // ===== Selection Tests =====

    #[test]
    fn test_toggle_row_check_appends() {
        let mut state = TableState::new();
        let rows = sample_rows();
        let msg = state.toggle_row(&rows[0], true);
        assert_eq!(msg.rows, vec![rows[0].clone()]);
        assert!(state.is_row_selected(&rows[0]));
        assert!(!state.is_row_selected(&rows[1]));
    }

    #[test]
    fn test_toggle_row_uncheck_removes_by_value() {
        let mut state = TableState::new();
        let rows = sample_rows();
        state.toggle_row(&rows[0], true);
        state.toggle_row(&rows[1], true);

        let msg = state.toggle_row(&rows[0], false);
        assert_eq!(msg.rows, vec![rows[1].clone()]);
        assert!(!state.is_row_selected(&rows[0]));
    }

    #[test]
    fn test_toggle_row_uncheck_removes_all_duplicates() {
        let mut state = TableState::new();
        let row = user("John", "john@example.com");
        state.toggle_row(&row, true);
        state.toggle_row(&row, true);
        assert_eq!(state.selected_rows().len(), 2);

        let msg = state.toggle_row(&row, false);
        assert!(msg.rows.is_empty());
    }

    #[test]
    fn test_append_only_policy_allows_duplicates() {
        let mut state = TableState::new();
        let row = user("John", "john@example.com");
        state.toggle_row(&row, true);
        state.toggle_row(&row, true);
        assert_eq!(state.selected_rows().len(), 2);
    }

    #[test]
    fn test_dedupe_policy_is_idempotent() {
        let mut state = TableState::new().with_select_policy(SelectPolicy::Dedupe);
        let row = user("John", "john@example.com");
        state.toggle_row(&row, true);
        state.toggle_row(&row, true);
        assert_eq!(state.selected_rows().len(), 1);
    }

    #[test]
    fn test_toggle_all_selects_in_dataset_order() {
        let mut state = TableState::new();
        let rows = sample_rows();
        // Prior partial selection must not influence the result
        state.toggle_row(&rows[1], true);

        let msg = state.toggle_all(&rows, true);
        assert_eq!(msg.rows, rows);
        assert!(state.is_all_selected(&rows));
    }

    #[test]
    fn test_toggle_all_unchecked_clears() {
        let mut state = TableState::new();
        let rows = sample_rows();
        state.toggle_all(&rows, true);
        let msg = state.toggle_all(&rows, false);
        assert!(msg.rows.is_empty());
        assert!(!state.is_indeterminate(&rows));
        assert!(!state.is_all_selected(&rows));
    }

    #[test]
    fn test_is_all_selected_empty_dataset_false() {
        let state = TableState::new();
        assert!(!state.is_all_selected(&[]));
    }

    #[test]
    fn test_is_indeterminate_strictly_between() {
        let mut state = TableState::new();
        let rows = sample_rows();
        assert!(!state.is_indeterminate(&rows));

        state.toggle_row(&rows[0], true);
        assert!(state.is_indeterminate(&rows));
        assert!(!state.is_all_selected(&rows));

        state.toggle_row(&rows[1], true);
        assert!(!state.is_indeterminate(&rows));
        assert!(state.is_all_selected(&rows));
    }

    #[test]
    fn test_controlled_selection_emits_without_committing() {
        let rows = sample_rows();
        let mut state = TableState::new().with_controlled_selection(Vec::new());

        let msg = state.toggle_row(&rows[0], true);
        assert_eq!(msg.rows, vec![rows[0].clone()]);
        // Effective selection is still the caller's snapshot
        assert!(state.selected_rows().is_empty());

        state.sync_controlled_selection(msg.rows);
        assert!(state.is_row_selected(&rows[0]));
    }

    #[test]
    fn test_initial_selection_seeds_uncontrolled_state() {
        let rows = sample_rows();
        let state = TableState::new().with_initial_selection(vec![rows[0].clone()]);
        assert!(state.is_row_selected(&rows[0]));
        assert!(!state.is_selection_controlled());
    }

    #[test]
    fn test_initial_selection_not_reabsorbed() {
        let rows = sample_rows();
        let mut state = TableState::new().with_initial_selection(vec![rows[0].clone()]);
        state.sync_controlled_selection(Vec::new());
        assert!(state.is_row_selected(&rows[0]));
    }

    #[test]
    fn test_identity_by_key_matches_on_id() {
        let mut state = TableState::new().with_identity(RowIdentity::ByKey("id".into()));
        let stored = TableRow::new().cell("id", "1").cell("name", "John");
        let probe = TableRow::new().cell("id", "1").cell("name", "Renamed");
        state.toggle_row(&stored, true);
        assert!(state.is_row_selected(&probe));

        let msg = state.toggle_row(&probe, false);
        assert!(msg.rows.is_empty());
    }

    #[test]
    fn test_identity_by_key_falls_back_to_value() {
        let identity = RowIdentity::ByKey("id".into());
        let a = user("John", "john@example.com");
        let b = user("John", "john@example.com");
        assert!(identity.same_row(&a, &b));
        assert!(!identity.same_row(&a, &user("Jane", "jane@example.com")));
    }

    // ===== End-to-End Scenario Tests =====

    #[test]
    fn test_scenario_name_sort_round_trip() {
        let rows = vec![
            TableRow::new().cell("id", "1").cell("name", "John"),
            TableRow::new().cell("id", "2").cell("name", "Jane"),
        ];
        let mut state = TableState::new();
        let col = name_column();

        let change = state.sort(&col).unwrap();
        assert_eq!((change.field.as_str(), change.direction), ("name", SortDirection::Ascending));
        let names: Vec<String> = state
            .ordered(&rows)
            .iter()
            .map(|r| r.value_or_empty("name").display())
            .collect();
        assert_eq!(names, vec!["Jane", "John"]);

        let change = state.sort(&col).unwrap();
        assert_eq!(change.direction, SortDirection::Descending);
        let names: Vec<String> = state
            .ordered(&rows)
            .iter()
            .map(|r| r.value_or_empty("name").display())
            .collect();
        assert_eq!(names, vec!["John", "Jane"]);
    }

    #[test]
    fn test_scenario_partial_then_select_all() {
        let rows = sample_rows();
        let mut state = TableState::new();

        let msg = state.toggle_row(&rows[0], true);
        assert_eq!(msg.rows, vec![rows[0].clone()]);

        let msg = state.toggle_all(&rows, true);
        assert_eq!(msg.rows, rows);
    }

    // ===== Property Tests =====

    fn arb_rows() -> impl Strategy<Value = Vec<TableRow>> {
        prop::collection::vec(("[a-e]{1,3}", 0..100i32), 1..20).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(k, n)| TableRow::new().cell("k", k).cell("n", n))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_sort_is_stable(rows in arb_rows()) {
            let mut state = TableState::new();
            state.sort(&TableColumn::new("k", "K").sortable());
            let ordered = state.ordered(&rows);

            // Same multiset of rows
            prop_assert_eq!(ordered.len(), rows.len());

            // Non-decreasing keys, and equal keys keep original order
            for pair in ordered.windows(2) {
                let cmp = pair[0].value_or_empty("k").compare(&pair[1].value_or_empty("k"));
                prop_assert_ne!(cmp, Ordering::Greater);
            }
            for key in rows.iter().map(|r| r.value_or_empty("k")) {
                let original: Vec<&TableRow> =
                    rows.iter().filter(|r| r.value_or_empty("k") == key).collect();
                let sorted: Vec<&TableRow> =
                    ordered.iter().filter(|r| r.value_or_empty("k") == key).collect();
                prop_assert_eq!(original, sorted);
            }
        }

        #[test]
        fn prop_select_all_then_all_selected(rows in arb_rows()) {
            let mut state = TableState::new();
            state.toggle_all(&rows, true);
            prop_assert!(state.is_all_selected(&rows));
            prop_assert!(!state.is_indeterminate(&rows));

            state.toggle_all(&rows, false);
            prop_assert!(state.selected_rows().is_empty());
            prop_assert!(!state.is_indeterminate(&rows));
        }

        #[test]
        fn prop_uncheck_round_trip(rows in arb_rows(), index in 0usize..20) {
            let index = index % rows.len();
            let mut state = TableState::new();
            state.toggle_row(&rows[index], true);
            prop_assert!(state.is_row_selected(&rows[index]));

            state.toggle_row(&rows[index], false);
            prop_assert!(!state.is_row_selected(&rows[index]));
        }
    }
}

//! `DataTable` widget for displaying tabular data.
//!
//! Rendering resolves to exactly one of three body states: loading skeleton
//! rows (highest priority), an empty-state marker, or the data rows. Sort
//! and selection behavior live in [`TableState`]; this widget adds hit
//! testing, painting, and message emission.

use crate::table_state::{
    RowIdentity, SelectPolicy, SortDirection, SortState, TableColumn, TableRow, TableRowsSelected,
    TableSortChanged, TableState,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use vitrine_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Color, Constraints, Event, FontWeight, Point, Rect, Size, TextStyle, TypeId, Widget,
};

const DEFAULT_COLUMN_WIDTH: f32 = 100.0;
const CHECKBOX_COLUMN_WIDTH: f32 = 40.0;
const CHECKBOX_SIZE: f32 = 16.0;
const SKELETON_ROWS: usize = 3;
const EMPTY_STATE_HEIGHT: f32 = 120.0;
const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

/// `DataTable` widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTable {
    /// Column definitions
    columns: Vec<TableColumn>,
    /// Row data, in dataset order
    rows: Vec<TableRow>,
    /// Sort/selection controller
    #[serde(skip)]
    state: TableState,
    /// Show skeleton rows instead of data
    loading: bool,
    /// Show the selection column
    selectable: bool,
    /// Empty-state detail message
    empty_message: String,
    /// Row height
    row_height: f32,
    /// Header height
    header_height: f32,
    /// Striped rows
    striped: bool,
    /// Show outer border
    bordered: bool,
    header_bg: Color,
    row_bg: Color,
    row_alt_bg: Color,
    selected_bg: Color,
    border_color: Color,
    text_color: Color,
    header_text_color: Color,
    skeleton_color: Color,
    /// Accessible name
    accessible_name_value: Option<String>,
    /// Test ID
    test_id_value: Option<String>,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
}

impl Default for DataTable {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            state: TableState::new(),
            loading: false,
            selectable: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            row_height: 40.0,
            header_height: 44.0,
            striped: true,
            bordered: true,
            header_bg: Color::new(0.95, 0.95, 0.95, 1.0),
            row_bg: Color::WHITE,
            row_alt_bg: Color::new(0.98, 0.98, 0.98, 1.0),
            selected_bg: Color::new(0.9, 0.95, 1.0, 1.0),
            border_color: Color::new(0.85, 0.85, 0.85, 1.0),
            text_color: Color::BLACK,
            header_text_color: Color::new(0.2, 0.2, 0.2, 1.0),
            skeleton_color: Color::new(0.9, 0.9, 0.9, 1.0),
            accessible_name_value: None,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }
}

impl DataTable {
    /// Create a new empty data table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add multiple columns.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = TableColumn>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Add a row.
    #[must_use]
    pub fn row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Add multiple rows.
    #[must_use]
    pub fn rows(mut self, rows: impl IntoIterator<Item = TableRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Show skeleton rows instead of data.
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Enable the row-selection column.
    #[must_use]
    pub const fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Set the empty-state detail message.
    #[must_use]
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Put sorting under caller control; the dataset is rendered as
    /// supplied and sort clicks only emit [`TableSortChanged`].
    #[must_use]
    pub fn controlled_sort(mut self, field: Option<String>, direction: SortDirection) -> Self {
        self.state = std::mem::take(&mut self.state).with_controlled_sort(field, direction);
        self
    }

    /// Put selection under caller control; toggles only emit
    /// [`TableRowsSelected`].
    #[must_use]
    pub fn controlled_selection(mut self, rows: Vec<TableRow>) -> Self {
        self.state = std::mem::take(&mut self.state).with_controlled_selection(rows);
        self
    }

    /// Seed the uncontrolled selection once.
    #[must_use]
    pub fn initial_selection(mut self, rows: Vec<TableRow>) -> Self {
        self.state = std::mem::take(&mut self.state).with_initial_selection(rows);
        self
    }

    /// Match selection membership on an identifier field instead of deep
    /// row equality.
    #[must_use]
    pub fn row_key(mut self, field: impl Into<String>) -> Self {
        self.state = std::mem::take(&mut self.state).with_identity(RowIdentity::ByKey(field.into()));
        self
    }

    /// Set the policy for re-checking an already-selected row.
    #[must_use]
    pub fn select_policy(mut self, policy: SelectPolicy) -> Self {
        self.state = std::mem::take(&mut self.state).with_select_policy(policy);
        self
    }

    /// Set row height.
    #[must_use]
    pub fn row_height(mut self, height: f32) -> Self {
        self.row_height = height.max(20.0);
        self
    }

    /// Set header height.
    #[must_use]
    pub fn header_height(mut self, height: f32) -> Self {
        self.header_height = height.max(20.0);
        self
    }

    /// Enable striped rows.
    #[must_use]
    pub const fn striped(mut self, striped: bool) -> Self {
        self.striped = striped;
        self
    }

    /// Enable the outer border.
    #[must_use]
    pub const fn bordered(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Update the controlled sort snapshot for this render.
    pub fn sync_sort(&mut self, field: Option<String>, direction: SortDirection) {
        self.state.sync_controlled_sort(field, direction);
    }

    /// Update the controlled selection snapshot for this render.
    pub fn sync_selection(&mut self, rows: Vec<TableRow>) {
        self.state.sync_controlled_selection(rows);
    }

    /// Get columns.
    #[must_use]
    pub fn get_columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Get rows in dataset order.
    #[must_use]
    pub fn get_rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Rows in render order (sorted when uncontrolled sort is active).
    #[must_use]
    pub fn visible_rows(&self) -> Vec<TableRow> {
        self.state.ordered(&self.rows)
    }

    /// The effective sort state.
    #[must_use]
    pub fn sort_state(&self) -> &SortState {
        self.state.sort_state()
    }

    /// The effective selection.
    #[must_use]
    pub fn selected_rows(&self) -> &[TableRow] {
        self.state.selected_rows()
    }

    /// Whether some selected entry matches `row`.
    #[must_use]
    pub fn is_row_selected(&self, row: &TableRow) -> bool {
        self.state.is_row_selected(row)
    }

    /// Whether the dataset is non-empty and fully selected.
    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        self.state.is_all_selected(&self.rows)
    }

    /// Whether the selection is a proper non-empty subset.
    #[must_use]
    pub fn is_indeterminate(&self) -> bool {
        self.state.is_indeterminate(&self.rows)
    }

    /// Check if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of cells a full-width spanning row covers: the data columns
    /// plus one when selection is enabled.
    #[must_use]
    pub fn span_columns(&self) -> usize {
        self.columns.len() + usize::from(self.selectable)
    }

    fn column_width(column: &TableColumn) -> f32 {
        column.width.unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    fn checkbox_offset(&self) -> f32 {
        if self.selectable {
            CHECKBOX_COLUMN_WIDTH
        } else {
            0.0
        }
    }

    fn total_width(&self) -> f32 {
        let columns: f32 = self.columns.iter().map(Self::column_width).sum();
        (columns + self.checkbox_offset()).max(DEFAULT_COLUMN_WIDTH)
    }

    fn body_height(&self) -> f32 {
        if self.loading {
            SKELETON_ROWS as f32 * self.row_height
        } else if self.rows.is_empty() {
            EMPTY_STATE_HEIGHT
        } else {
            self.rows.len() as f32 * self.row_height
        }
    }

    fn row_y(&self, index: usize) -> f32 {
        (index as f32).mul_add(self.row_height, self.bounds.y + self.header_height)
    }

    /// The column whose header/cell band contains `x`, with its left edge.
    fn column_at(&self, x: f32) -> Option<(&TableColumn, f32)> {
        let mut left = self.bounds.x + self.checkbox_offset();
        for column in &self.columns {
            let right = left + Self::column_width(column);
            if x >= left && x < right {
                return Some((column, left));
            }
            left = right;
        }
        None
    }

    fn in_checkbox_band(&self, x: f32) -> bool {
        self.selectable && x >= self.bounds.x && x < self.bounds.x + CHECKBOX_COLUMN_WIDTH
    }

    fn sort_indicator(&self, column: &TableColumn) -> Option<&'static str> {
        if !column.sortable {
            return None;
        }
        let state = self.state.sort_state();
        if state.field.as_deref() == Some(column.data_index.as_str()) {
            Some(match state.direction {
                SortDirection::Ascending => "\u{25b2}",
                SortDirection::Descending => "\u{25bc}",
            })
        } else {
            Some("\u{21c5}")
        }
    }

    fn paint_checkbox(&self, canvas: &mut dyn Canvas, x: f32, row_y: f32, row_h: f32, filled: bool) {
        let box_rect = Rect::new(
            x + (CHECKBOX_COLUMN_WIDTH - CHECKBOX_SIZE) / 2.0,
            row_y + (row_h - CHECKBOX_SIZE) / 2.0,
            CHECKBOX_SIZE,
            CHECKBOX_SIZE,
        );
        if filled {
            canvas.fill_rect(box_rect, self.selected_bg);
        }
        canvas.stroke_rect(box_rect, self.border_color, 1.0);
    }

    fn paint_header(&self, canvas: &mut dyn Canvas) {
        let header_rect = Rect::new(
            self.bounds.x,
            self.bounds.y,
            self.bounds.width,
            self.header_height,
        );
        canvas.fill_rect(header_rect, self.header_bg);

        if self.selectable {
            self.paint_checkbox(
                canvas,
                self.bounds.x,
                self.bounds.y,
                self.header_height,
                self.is_all_selected(),
            );
            if self.is_indeterminate() {
                let mid_y = self.bounds.y + self.header_height / 2.0;
                let left = self.bounds.x + (CHECKBOX_COLUMN_WIDTH - CHECKBOX_SIZE) / 2.0 + 3.0;
                canvas.draw_line(
                    Point::new(left, mid_y),
                    Point::new(left + CHECKBOX_SIZE - 6.0, mid_y),
                    self.header_text_color,
                    2.0,
                );
            }
        }

        let style = TextStyle {
            size: 14.0,
            color: self.header_text_color,
            weight: FontWeight::Bold,
        };
        let mut x = self.bounds.x + self.checkbox_offset();
        for column in &self.columns {
            let width = Self::column_width(column);
            let baseline = Point::new(x + 8.0, self.bounds.y + self.header_height / 2.0);
            canvas.draw_text(&column.title, baseline, &style);
            if let Some(indicator) = self.sort_indicator(column) {
                let glyph_x = x + width - 16.0;
                canvas.draw_text(
                    indicator,
                    Point::new(glyph_x, self.bounds.y + self.header_height / 2.0),
                    &style,
                );
            }
            x += width;
        }
    }

    fn paint_skeleton(&self, canvas: &mut dyn Canvas) {
        for index in 0..SKELETON_ROWS {
            let row_y = self.row_y(index);
            let mut x = self.bounds.x;
            if self.selectable {
                let block = Rect::new(
                    x + (CHECKBOX_COLUMN_WIDTH - CHECKBOX_SIZE) / 2.0,
                    row_y + (self.row_height - CHECKBOX_SIZE) / 2.0,
                    CHECKBOX_SIZE,
                    CHECKBOX_SIZE,
                );
                canvas.fill_rect(block, self.skeleton_color);
                x += CHECKBOX_COLUMN_WIDTH;
            }
            for column in &self.columns {
                let width = Self::column_width(column);
                let block = Rect::new(
                    x + 8.0,
                    row_y + self.row_height / 2.0 - 6.0,
                    (width - 16.0).max(8.0),
                    12.0,
                );
                canvas.fill_rect(block, self.skeleton_color);
                x += width;
            }
        }
    }

    fn paint_empty_state(&self, canvas: &mut dyn Canvas) {
        // Spans all data columns plus the selection column when enabled
        let top = self.bounds.y + self.header_height;
        let center_x = self.bounds.x + self.total_width() / 2.0;
        canvas.fill_circle(
            Point::new(center_x, top + EMPTY_STATE_HEIGHT / 2.0 - 18.0),
            10.0,
            self.skeleton_color,
        );
        let style = TextStyle {
            size: 14.0,
            color: self.header_text_color,
            weight: FontWeight::Normal,
        };
        canvas.draw_text(
            &self.empty_message,
            Point::new(center_x, top + EMPTY_STATE_HEIGHT / 2.0 + 12.0),
            &style,
        );
    }

    fn paint_rows(&self, canvas: &mut dyn Canvas, visible: &[TableRow]) {
        let style = TextStyle {
            size: 14.0,
            color: self.text_color,
            weight: FontWeight::Normal,
        };
        for (index, row) in visible.iter().enumerate() {
            let row_y = self.row_y(index);
            let selected = self.is_row_selected(row);
            let bg = if selected {
                self.selected_bg
            } else if self.striped && index % 2 == 1 {
                self.row_alt_bg
            } else {
                self.row_bg
            };
            canvas.fill_rect(
                Rect::new(self.bounds.x, row_y, self.bounds.width, self.row_height),
                bg,
            );

            let mut x = self.bounds.x;
            if self.selectable {
                self.paint_checkbox(canvas, x, row_y, self.row_height, selected);
                x += CHECKBOX_COLUMN_WIDTH;
            }
            for column in &self.columns {
                let width = Self::column_width(column);
                let value = row.value_or_empty(&column.data_index);
                let text = column
                    .render
                    .map_or_else(|| value.display(), |render| render(&value, row, index));
                canvas.draw_text(
                    &text,
                    Point::new(x + 8.0, row_y + self.row_height / 2.0),
                    &style,
                );
                x += width;
            }
        }
    }

    fn handle_mouse_down(&mut self, position: &Point) -> Option<Box<dyn Any + Send>> {
        if !self.bounds.contains_point(position) {
            return None;
        }

        let in_header = position.y < self.bounds.y + self.header_height;
        if in_header {
            if self.in_checkbox_band(position.x) {
                let checked = !self.is_all_selected();
                let msg: TableRowsSelected = self.state.toggle_all(&self.rows, checked);
                return Some(Box::new(msg));
            }
            if let Some((column, _)) = self.column_at(position.x) {
                let column = column.clone();
                return self
                    .state
                    .sort(&column)
                    .map(|msg: TableSortChanged| Box::new(msg) as Box<dyn Any + Send>);
            }
            return None;
        }

        if self.loading {
            return None;
        }

        let visible = self.visible_rows();
        let index = ((position.y - self.bounds.y - self.header_height) / self.row_height) as usize;
        if index >= visible.len() {
            return None;
        }

        if self.in_checkbox_band(position.x) {
            let row = &visible[index];
            let checked = !self.state.is_row_selected(row);
            let msg: TableRowsSelected = self.state.toggle_row(row, checked);
            return Some(Box::new(msg));
        }

        None
    }
}

impl Widget for DataTable {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let preferred = Size::new(self.total_width(), self.header_height + self.body_height());
        constraints.constrain(preferred)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.paint_header(canvas);

        // Exactly one body state: loading wins, then empty, then data
        if self.loading {
            self.paint_skeleton(canvas);
        } else {
            let visible = self.visible_rows();
            if visible.is_empty() {
                self.paint_empty_state(canvas);
            } else {
                self.paint_rows(canvas, &visible);
            }
        }

        if self.bordered {
            let border = Rect::new(
                self.bounds.x,
                self.bounds.y,
                self.bounds.width,
                (self.header_height + self.body_height()).min(self.bounds.height),
            );
            canvas.stroke_rect(border, self.border_color, 1.0);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseDown { position, .. } => self.handle_mouse_down(position),
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn is_focusable(&self) -> bool {
        self.selectable
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Table
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}

//! Vitrine: a component showcase toolkit.
//!
//! Re-exports the core widget machinery and bundles a demo showcase with
//! sample data, prebuilt input fields, and a selectable user table.
//!
//! ```
//! use vitrine::showcase;
//!
//! let table = showcase::user_table();
//! assert_eq!(table.get_rows().len(), 5);
//! ```

pub use vitrine_core::*;
pub use vitrine_widgets as widgets;
pub use vitrine_widgets::{
    CellRenderer, CellValue, ControlSize, DataTable, InputField, InputType,
    PasswordVisibilityChanged, RowIdentity, SelectPolicy, SortDirection, SortState, StateCell,
    TableColumn, TableRow, TableRowsSelected, TableSortChanged, TableState, TextAlign, TextChanged,
    TextSubmitted, Variant,
};

pub mod showcase;

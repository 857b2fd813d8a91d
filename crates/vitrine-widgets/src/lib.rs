//! Widget implementations for the Vitrine UI toolkit.

pub mod data_table;
pub mod input_field;
pub mod table_state;

pub use data_table::DataTable;
pub use input_field::{
    ControlSize, InputField, InputType, PasswordVisibilityChanged, TextChanged, TextSubmitted,
    Variant,
};
pub use table_state::{
    CellRenderer, CellValue, RowIdentity, SelectPolicy, SortDirection, SortState, StateCell,
    TableColumn, TableRow, TableRowsSelected, TableSortChanged, TableState, TextAlign,
};

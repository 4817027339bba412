// Tally Board - Core Library
// Counting model behind the terminal board: slots, matrices, strokes, totals, summary

pub mod slots;      // Time-slot column labels per shift
pub mod matrix;     // Mode zones + binary tally matrices
pub mod gesture;    // Drag stroke -> straight run of toggles
pub mod aggregate;  // Zone subtotals, car totals, motorbikes
pub mod summary;    // Copy/paste text report
pub mod session;    // Session context (state + persistence)
pub mod db;         // SQLite key-value snapshot store
pub mod config;
pub mod error;

// Re-export commonly used types
pub use slots::{column_headers, Shift, SLOT_COUNT};
pub use matrix::{CellPos, Mode, TallyMatrix, TallyStore};
pub use gesture::{GestureInterpreter, StrokeState};
pub use aggregate::{aggregate, column_totals, ColumnTotals};
pub use summary::{format_summary, render_summary};
pub use session::Session;
pub use db::{CounterData, Database, Snapshot};
pub use config::Config;
pub use error::{TallyError, TallyResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

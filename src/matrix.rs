// 🧮 Tally Matrix - one binary grid per counting mode
// Rows = counters grouped in zones, plus a final motorbike row. Columns = time slots.

use crate::error::{TallyError, TallyResult};
use crate::slots::SLOT_COUNT;
use serde::{Deserialize, Serialize};
use std::ops::Range;

// ============================================================================
// MODE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Arrival,
    Departure,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Arrival, Mode::Departure];

    /// Counter rows per zone, top to bottom
    pub fn zone_sizes(&self) -> &'static [usize] {
        match self {
            Mode::Arrival => &[10, 10, 10, 10],
            Mode::Departure => &[8, 10, 10, 8],
        }
    }

    /// Row ranges of every zone (motor row excluded)
    pub fn zone_ranges(&self) -> Vec<Range<usize>> {
        let mut start = 0;
        self.zone_sizes()
            .iter()
            .map(|size| {
                let range = start..start + size;
                start += size;
                range
            })
            .collect()
    }

    pub fn counter_rows(&self) -> usize {
        self.zone_sizes().iter().sum()
    }

    /// Counter rows + motor row
    pub fn total_rows(&self) -> usize {
        self.counter_rows() + 1
    }

    pub fn motor_row(&self) -> usize {
        self.counter_rows()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Arrival => "arrival",
            Mode::Departure => "departure",
        }
    }

    pub fn parse(value: &str) -> Option<Mode> {
        match value {
            "arrival" => Some(Mode::Arrival),
            "departure" => Some(Mode::Departure),
            _ => None,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Mode::Arrival => "Arrival",
            Mode::Departure => "Departure",
        }
    }

    /// Tag opening the copied summary
    pub fn summary_prefix(&self) -> &str {
        match self {
            Mode::Arrival => "ACar",
            Mode::Departure => "DCar",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Mode::Arrival => Mode::Departure,
            Mode::Departure => Mode::Arrival,
        }
    }
}

/// A single cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

// ============================================================================
// MATRIX
// ============================================================================

/// Binary grid for one mode. Every cell is 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyMatrix {
    mode: Mode,
    cells: Vec<Vec<u8>>,
}

impl TallyMatrix {
    pub fn zeroed(mode: Mode) -> Self {
        Self {
            mode,
            cells: vec![vec![0; SLOT_COUNT]; mode.total_rows()],
        }
    }

    /// Rebuild a matrix from persisted rows, rejecting anything that
    /// does not have the mode's shape or holds a non-binary cell.
    pub fn from_rows(mode: Mode, rows: Vec<Vec<u8>>) -> TallyResult<Self> {
        if rows.len() != mode.total_rows() {
            return Err(TallyError::malformed(format!(
                "{} matrix has {} rows, expected {}",
                mode.as_str(),
                rows.len(),
                mode.total_rows()
            )));
        }

        for (r, row) in rows.iter().enumerate() {
            if row.len() != SLOT_COUNT {
                return Err(TallyError::malformed(format!(
                    "{} row {} has {} columns, expected {}",
                    mode.as_str(),
                    r,
                    row.len(),
                    SLOT_COUNT
                )));
            }
            if let Some(bad) = row.iter().find(|v| **v > 1) {
                return Err(TallyError::malformed(format!(
                    "{} row {} holds non-binary value {}",
                    mode.as_str(),
                    r,
                    bad
                )));
            }
        }

        Ok(Self { mode, cells: rows })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.check_bounds(row, col);
        self.cells[row][col]
    }

    /// Flip one cell and return its new value
    pub fn toggle(&mut self, row: usize, col: usize) -> u8 {
        self.check_bounds(row, col);
        let cell = &mut self.cells[row][col];
        *cell ^= 1;
        *cell
    }

    pub fn motor_value(&self, col: usize) -> u8 {
        self.get(self.mode.motor_row(), col)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|v| *v == 0)
    }

    fn check_bounds(&self, row: usize, col: usize) {
        assert!(
            row < self.cells.len() && col < SLOT_COUNT,
            "cell ({}, {}) out of range for {} grid ({}x{})",
            row,
            col,
            self.mode.as_str(),
            self.cells.len(),
            SLOT_COUNT
        );
    }
}

// ============================================================================
// STORE
// ============================================================================

/// Both modes' matrices, created on first access
#[derive(Debug, Clone, Default)]
pub struct TallyStore {
    arrival: Option<TallyMatrix>,
    departure: Option<TallyMatrix>,
}

impl TallyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with already-loaded matrices. A matrix whose mode does not
    /// match its slot is dropped.
    pub fn with_matrices(arrival: Option<TallyMatrix>, departure: Option<TallyMatrix>) -> Self {
        Self {
            arrival: arrival.filter(|m| m.mode() == Mode::Arrival),
            departure: departure.filter(|m| m.mode() == Mode::Departure),
        }
    }

    fn slot(&mut self, mode: Mode) -> &mut Option<TallyMatrix> {
        match mode {
            Mode::Arrival => &mut self.arrival,
            Mode::Departure => &mut self.departure,
        }
    }

    /// Matrix for a mode, zero-filled on first access
    pub fn get(&mut self, mode: Mode) -> &TallyMatrix {
        self.get_mut(mode)
    }

    fn get_mut(&mut self, mode: Mode) -> &mut TallyMatrix {
        self.slot(mode).get_or_insert_with(|| TallyMatrix::zeroed(mode))
    }

    /// Matrix for a mode without creating it
    pub fn peek(&self, mode: Mode) -> Option<&TallyMatrix> {
        match mode {
            Mode::Arrival => self.arrival.as_ref(),
            Mode::Departure => self.departure.as_ref(),
        }
    }

    pub fn toggle(&mut self, mode: Mode, row: usize, col: usize) -> u8 {
        self.get_mut(mode).toggle(row, col)
    }

    pub fn reset(&mut self, mode: Mode) {
        *self.slot(mode) = Some(TallyMatrix::zeroed(mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_dimensions() {
        assert_eq!(Mode::Arrival.total_rows(), 41);
        assert_eq!(Mode::Departure.total_rows(), 37);
        assert_eq!(Mode::Departure.motor_row(), 36);
        assert_eq!(
            Mode::Departure.zone_ranges(),
            vec![0..8, 8..18, 18..28, 28..36]
        );
    }

    #[test]
    fn test_lazy_creation() {
        let mut store = TallyStore::new();
        assert!(store.peek(Mode::Arrival).is_none());

        let matrix = store.get(Mode::Arrival);
        assert_eq!(matrix.rows().len(), 41);
        assert!(matrix.rows().iter().all(|r| r.len() == SLOT_COUNT));
        assert!(matrix.is_empty());
        assert!(store.peek(Mode::Arrival).is_some());
        assert!(store.peek(Mode::Departure).is_none());
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut store = TallyStore::new();
        for mode in Mode::ALL {
            for (row, col) in [(0, 0), (5, 23), (mode.motor_row(), 11)] {
                assert_eq!(store.toggle(mode, row, col), 1);
                assert_eq!(store.toggle(mode, row, col), 0);
                assert_eq!(store.get(mode).get(row, col), 0);
            }
        }
    }

    #[test]
    fn test_reset_leaves_other_mode() {
        let mut store = TallyStore::new();
        store.toggle(Mode::Arrival, 3, 4);
        store.toggle(Mode::Arrival, Mode::Arrival.motor_row(), 4);
        store.toggle(Mode::Departure, 7, 9);

        store.reset(Mode::Arrival);

        assert!(store.get(Mode::Arrival).is_empty());
        assert_eq!(store.get(Mode::Departure).get(7, 9), 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_panics() {
        let mut store = TallyStore::new();
        store.toggle(Mode::Departure, 37, 0);
    }

    #[test]
    fn test_from_rows_rejects_bad_shape() {
        let short = vec![vec![0u8; SLOT_COUNT]; 40];
        assert!(TallyMatrix::from_rows(Mode::Arrival, short).is_err());

        let mut bad_value = vec![vec![0u8; SLOT_COUNT]; 37];
        bad_value[2][2] = 2;
        assert!(TallyMatrix::from_rows(Mode::Departure, bad_value).is_err());

        let good = vec![vec![1u8; SLOT_COUNT]; 37];
        assert!(TallyMatrix::from_rows(Mode::Departure, good).is_ok());
    }
}

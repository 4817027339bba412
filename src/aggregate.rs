// ➕ Aggregator - per-column zone subtotals, car totals and motorbikes
// Recomputed from scratch on every call; the grid is at most 41x24.

use crate::matrix::TallyMatrix;
use crate::slots::SLOT_COUNT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTotals {
    /// One subtotal per zone, top to bottom
    pub zone_subtotals: Vec<u32>,
    /// Sum of all counter rows (motor row excluded)
    pub cars: u32,
    /// The motor-row cell
    pub motor: u8,
}

impl ColumnTotals {
    /// "a/b/c/d" line used by the summary
    pub fn subtotals_line(&self) -> String {
        self.zone_subtotals
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

pub fn column_totals(matrix: &TallyMatrix, col: usize) -> ColumnTotals {
    let rows = matrix.rows();
    let zone_subtotals: Vec<u32> = matrix
        .mode()
        .zone_ranges()
        .into_iter()
        .map(|range| rows[range].iter().map(|row| u32::from(row[col])).sum())
        .collect();

    ColumnTotals {
        cars: zone_subtotals.iter().sum(),
        motor: matrix.motor_value(col),
        zone_subtotals,
    }
}

/// Totals for every column, left to right
pub fn aggregate(matrix: &TallyMatrix) -> Vec<ColumnTotals> {
    (0..SLOT_COUNT).map(|col| column_totals(matrix, col)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Mode, TallyStore};

    #[test]
    fn test_empty_matrix() {
        let mut store = TallyStore::new();
        let totals = aggregate(store.get(Mode::Arrival));
        assert_eq!(totals.len(), SLOT_COUNT);
        assert!(totals
            .iter()
            .all(|t| t.cars == 0 && t.motor == 0 && t.zone_subtotals == vec![0, 0, 0, 0]));
    }

    #[test]
    fn test_zone_subtotals_departure() {
        let mut store = TallyStore::new();
        let mode = Mode::Departure;
        // zone 1 = rows 0..8, zone 2 = 8..18
        store.toggle(mode, 0, 3);
        store.toggle(mode, 7, 3);
        store.toggle(mode, 8, 3);
        store.toggle(mode, 35, 3);
        store.toggle(mode, mode.motor_row(), 3);

        let totals = column_totals(store.get(mode), 3);
        assert_eq!(totals.zone_subtotals, vec![2, 1, 0, 1]);
        assert_eq!(totals.cars, 4);
        assert_eq!(totals.motor, 1);
        assert_eq!(totals.subtotals_line(), "2/1/0/1");

        let untouched = column_totals(store.get(mode), 4);
        assert_eq!(untouched.cars, 0);
    }

    #[test]
    fn test_grand_total_matches_subtotals() {
        let mut store = TallyStore::new();
        let mode = Mode::Arrival;
        for (i, col) in (0..SLOT_COUNT).enumerate() {
            for row in (0..mode.total_rows()).filter(|r| (r * 7 + i) % 3 == 0) {
                store.toggle(mode, row, col);
            }
        }

        for totals in aggregate(store.get(mode)) {
            assert_eq!(totals.cars, totals.zone_subtotals.iter().sum::<u32>());
        }
    }
}

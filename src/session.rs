// 🎛️ Session - the single context object behind the board
// Owns mode, shift, both matrices, the stroke in progress and the persistence handle.
// Every mutation is followed by a full snapshot write.

use crate::aggregate::{aggregate, ColumnTotals};
use crate::db::Database;
use crate::gesture::{GestureInterpreter, StrokeState};
use crate::matrix::{CellPos, Mode, TallyMatrix, TallyStore};
use crate::slots::{column_headers, Shift};
use crate::summary::format_summary;
use tracing::{error, info};

pub struct Session {
    store: TallyStore,
    mode: Mode,
    shift: Shift,
    headers: Vec<String>,
    gesture: GestureInterpreter,
    db: Option<Database>,
}

impl Session {
    /// Session restored from the database (defaults for anything unreadable)
    pub fn load(db: Database) -> Self {
        let snapshot = db.load_snapshot();
        info!(
            mode = snapshot.mode.as_str(),
            shift = snapshot.shift.as_str(),
            "Session loaded"
        );

        Self {
            store: snapshot.store,
            mode: snapshot.mode,
            shift: snapshot.shift,
            headers: column_headers(snapshot.shift),
            gesture: GestureInterpreter::new(),
            db: Some(db),
        }
    }

    /// Session without persistence
    pub fn in_memory() -> Self {
        Self {
            store: TallyStore::new(),
            mode: Mode::default(),
            shift: Shift::default(),
            headers: column_headers(Shift::default()),
            gesture: GestureInterpreter::new(),
            db: None,
        }
    }

    // ========================================================================
    // STATE ACCESS
    // ========================================================================

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn shift(&self) -> Shift {
        self.shift
    }

    pub fn column_headers(&self) -> &[String] {
        &self.headers
    }

    pub fn current_matrix(&mut self) -> &TallyMatrix {
        self.store.get(self.mode)
    }

    pub fn totals(&mut self) -> Vec<ColumnTotals> {
        aggregate(self.store.get(self.mode))
    }

    pub fn summary(&mut self) -> String {
        let totals = self.totals();
        format_summary(self.mode.summary_prefix(), &totals, &self.headers)
    }

    pub fn is_stroke_active(&self) -> bool {
        self.gesture.is_active()
    }

    pub fn stroke_state(&self) -> StrokeState {
        self.gesture.state()
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        self.gesture.end();
        self.mode = mode;
        self.persist();
    }

    pub fn set_shift(&mut self, shift: Shift) {
        if self.shift == shift {
            return;
        }
        self.shift = shift;
        self.headers = column_headers(shift);
        self.persist();
    }

    /// Flip a single cell in the current mode, returning its new value
    pub fn toggle_cell(&mut self, at: CellPos) -> u8 {
        let value = self.store.toggle(self.mode, at.row, at.col);
        self.persist();
        value
    }

    /// Pointer down on a cell
    pub fn begin_stroke(&mut self, at: CellPos) {
        let cells = self.gesture.begin(at);
        self.apply(&cells);
    }

    /// Pointer dragged onto a cell
    pub fn extend_stroke(&mut self, at: CellPos) {
        let cells = self.gesture.extend(at);
        self.apply(&cells);
    }

    /// Pointer released or stroke cancelled
    pub fn end_stroke(&mut self) {
        self.gesture.end();
    }

    /// Zero every cell of the current mode, motor row included
    pub fn clear_current(&mut self) {
        self.gesture.end();
        self.store.reset(self.mode);
        info!(mode = self.mode.as_str(), "Mode cleared");
        self.persist();
    }

    fn apply(&mut self, cells: &[CellPos]) {
        if cells.is_empty() {
            return;
        }
        for cell in cells {
            self.store.toggle(self.mode, cell.row, cell.col);
        }
        self.persist();
    }

    /// Snapshot to disk. Failures are logged; memory stays authoritative.
    fn persist(&mut self) {
        if let Some(db) = self.db.as_mut() {
            if let Err(e) = db.save_snapshot(&self.store, self.mode, self.shift) {
                error!(error = %e, "Failed to persist session");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::KEY_CURRENT_SHIFT;

    #[test]
    fn test_stroke_paints_run() {
        let mut session = Session::in_memory();
        session.begin_stroke(CellPos::new(2, 5));
        session.extend_stroke(CellPos::new(2, 9));
        session.extend_stroke(CellPos::new(2, 5));
        assert!(session.is_stroke_active());
        session.end_stroke();
        assert!(!session.is_stroke_active());

        let matrix = session.current_matrix();
        let row: Vec<u8> = (0..24).map(|c| matrix.get(2, c)).collect();
        assert_eq!(&row[4..11], &[0, 1, 1, 1, 1, 1, 0]);
    }

    #[test]
    fn test_stroke_state_keeps_origin() {
        let mut session = Session::in_memory();
        assert_eq!(session.stroke_state().origin(), None);

        session.begin_stroke(CellPos::new(4, 2));
        assert_eq!(
            session.stroke_state(),
            StrokeState::Undetermined { origin: CellPos::new(4, 2) }
        );

        session.extend_stroke(CellPos::new(7, 2));
        assert_eq!(
            session.stroke_state(),
            StrokeState::Vertical { origin: CellPos::new(4, 2) }
        );
        assert_eq!(session.stroke_state().origin(), Some(CellPos::new(4, 2)));

        session.end_stroke();
        assert_eq!(session.stroke_state(), StrokeState::Idle);
    }

    #[test]
    fn test_stroke_toggles_back_to_zero() {
        let mut session = Session::in_memory();
        session.toggle_cell(CellPos::new(0, 1));

        session.begin_stroke(CellPos::new(0, 0));
        session.extend_stroke(CellPos::new(0, 2));
        session.end_stroke();

        let matrix = session.current_matrix();
        assert_eq!(matrix.get(0, 0), 1);
        assert_eq!(matrix.get(0, 1), 0);
        assert_eq!(matrix.get(0, 2), 1);
    }

    #[test]
    fn test_clear_only_current_mode() {
        let mut session = Session::in_memory();
        session.toggle_cell(CellPos::new(1, 1));
        session.toggle_cell(CellPos::new(Mode::Arrival.motor_row(), 1));
        session.set_mode(Mode::Departure);
        session.toggle_cell(CellPos::new(2, 2));

        session.set_mode(Mode::Arrival);
        session.clear_current();
        assert!(session.current_matrix().is_empty());

        session.set_mode(Mode::Departure);
        assert_eq!(session.current_matrix().get(2, 2), 1);
    }

    #[test]
    fn test_shift_changes_headers_and_summary() {
        let mut session = Session::in_memory();
        assert_eq!(session.column_headers()[0], "1000");

        session.set_shift(Shift::Evening);
        assert_eq!(session.column_headers()[0], "2200");
        assert!(session.summary().starts_with("ACar\n\n2200:00/00\n"));

        session.set_mode(Mode::Departure);
        assert!(session.summary().starts_with("DCar\n\n"));
    }

    #[test]
    fn test_persist_and_reload() {
        let db = Database::open_in_memory().unwrap();
        let mut session = Session::load(db);
        session.set_shift(Shift::Evening);
        session.set_mode(Mode::Departure);
        session.begin_stroke(CellPos::new(3, 0));
        session.extend_stroke(CellPos::new(6, 0));
        session.end_stroke();

        // reuse the same connection for the reload
        let db = session.db.take().unwrap();
        assert_eq!(db.get(KEY_CURRENT_SHIFT).unwrap().as_deref(), Some("evening"));

        let mut reloaded = Session::load(db);
        assert_eq!(reloaded.mode(), Mode::Departure);
        assert_eq!(reloaded.shift(), Shift::Evening);
        assert_eq!(reloaded.totals()[0].zone_subtotals, vec![4, 0, 0, 0]);
        assert_eq!(reloaded.current_matrix(), session.current_matrix());
    }
}

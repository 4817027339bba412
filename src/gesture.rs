// ✍️ Gesture Interpreter - turns a drag stroke into a straight run of toggles
// A stroke commits to one axis: no diagonal smearing, no double toggles.

use crate::matrix::CellPos;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    /// Pointer is down, axis not chosen yet
    Undetermined { origin: CellPos },
    Horizontal { origin: CellPos },
    Vertical { origin: CellPos },
}

impl StrokeState {
    pub fn origin(&self) -> Option<CellPos> {
        match self {
            StrokeState::Idle => None,
            StrokeState::Undetermined { origin }
            | StrokeState::Horizontal { origin }
            | StrokeState::Vertical { origin } => Some(*origin),
        }
    }
}

/// Stroke state plus the cells already painted by it.
///
/// The interpreter never touches a matrix: every call returns the cells the
/// caller has to toggle, in order.
#[derive(Debug, Default)]
pub struct GestureInterpreter {
    state: StrokeState,
    painted: HashSet<CellPos>,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != StrokeState::Idle
    }

    /// Pointer down. Any stroke still open is dropped first.
    pub fn begin(&mut self, at: CellPos) -> Vec<CellPos> {
        self.end();
        self.state = StrokeState::Undetermined { origin: at };
        self.painted.insert(at);
        vec![at]
    }

    /// Pointer moved onto `at`
    pub fn extend(&mut self, at: CellPos) -> Vec<CellPos> {
        let state = match self.state {
            StrokeState::Idle => return Vec::new(),
            StrokeState::Undetermined { origin } => {
                let same_row = at.row == origin.row;
                let same_col = at.col == origin.col;
                match (same_row, same_col) {
                    (false, true) => StrokeState::Vertical { origin },
                    (true, false) => StrokeState::Horizontal { origin },
                    // diagonal or no movement: wait for a clearer move
                    _ => return Vec::new(),
                }
            }
            locked => locked,
        };
        self.state = state;

        let run: Vec<CellPos> = match state {
            StrokeState::Horizontal { origin } => span(origin.col, at.col)
                .map(|col| CellPos::new(origin.row, col))
                .collect(),
            StrokeState::Vertical { origin } => span(origin.row, at.row)
                .map(|row| CellPos::new(row, origin.col))
                .collect(),
            _ => Vec::new(),
        };

        run.into_iter()
            .filter(|cell| self.painted.insert(*cell))
            .collect()
    }

    /// Pointer released or stroke cancelled
    pub fn end(&mut self) {
        self.state = StrokeState::Idle;
        self.painted.clear();
    }
}

/// Indices from `from` to `to` inclusive, walking away from `from`
fn span(from: usize, to: usize) -> Box<dyn Iterator<Item = usize>> {
    if to >= from {
        Box::new(from..=to)
    } else {
        Box::new((to..=from).rev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(list: &[(usize, usize)]) -> Vec<CellPos> {
        list.iter().map(|(r, c)| CellPos::new(*r, *c)).collect()
    }

    #[test]
    fn test_begin_paints_origin() {
        let mut g = GestureInterpreter::new();
        assert_eq!(g.begin(CellPos::new(2, 5)), cells(&[(2, 5)]));
        assert_eq!(
            g.state(),
            StrokeState::Undetermined { origin: CellPos::new(2, 5) }
        );
    }

    #[test]
    fn test_horizontal_run_fills_gap() {
        let mut g = GestureInterpreter::new();
        g.begin(CellPos::new(2, 5));

        let painted = g.extend(CellPos::new(2, 9));
        assert_eq!(painted, cells(&[(2, 6), (2, 7), (2, 8), (2, 9)]));
        assert!(matches!(g.state(), StrokeState::Horizontal { .. }));

        // back over already painted cells
        assert!(g.extend(CellPos::new(2, 5)).is_empty());
        assert!(g.extend(CellPos::new(2, 7)).is_empty());

        // past the origin the other way
        assert_eq!(g.extend(CellPos::new(2, 3)), cells(&[(2, 4), (2, 3)]));

        g.end();
        assert_eq!(g.state(), StrokeState::Idle);
        assert!(!g.is_active());
    }

    #[test]
    fn test_vertical_lock_projects_onto_origin_column() {
        let mut g = GestureInterpreter::new();
        g.begin(CellPos::new(4, 1));

        assert_eq!(g.extend(CellPos::new(5, 1)), cells(&[(5, 1)]));
        // drifting sideways keeps the column
        assert_eq!(g.extend(CellPos::new(7, 3)), cells(&[(6, 1), (7, 1)]));
        assert!(matches!(g.state(), StrokeState::Vertical { .. }));
    }

    #[test]
    fn test_diagonal_move_waits() {
        let mut g = GestureInterpreter::new();
        g.begin(CellPos::new(2, 2));

        assert!(g.extend(CellPos::new(3, 3)).is_empty());
        assert!(g.extend(CellPos::new(2, 2)).is_empty());
        assert!(matches!(g.state(), StrokeState::Undetermined { .. }));

        assert_eq!(g.extend(CellPos::new(2, 3)), cells(&[(2, 3)]));
        assert!(matches!(g.state(), StrokeState::Horizontal { .. }));
    }

    #[test]
    fn test_extend_when_idle_is_noop() {
        let mut g = GestureInterpreter::new();
        assert!(g.extend(CellPos::new(1, 1)).is_empty());
    }

    #[test]
    fn test_new_begin_resets_previous_stroke() {
        let mut g = GestureInterpreter::new();
        g.begin(CellPos::new(0, 0));
        g.extend(CellPos::new(0, 3));

        // no release delivered, new stroke starts fresh
        assert_eq!(g.begin(CellPos::new(0, 1)), cells(&[(0, 1)]));
        assert_eq!(g.extend(CellPos::new(0, 3)), cells(&[(0, 2), (0, 3)]));
    }
}

// 📋 Summary Formatter - compact text report for copy/paste
//
// ACar
//
// 1000:03/01
// 1/0/2/0
//
// Odd columns identical to the even column before them are left out.

use crate::aggregate::{aggregate, ColumnTotals};
use crate::matrix::TallyMatrix;

pub fn render_summary(matrix: &TallyMatrix, headers: &[String]) -> String {
    format_summary(matrix.mode().summary_prefix(), &aggregate(matrix), headers)
}

pub fn format_summary(prefix: &str, totals: &[ColumnTotals], headers: &[String]) -> String {
    let mut text = format!("{}\n\n", prefix);
    let mut previous_even: Option<(String, u8)> = None;

    for (col, (column, header)) in totals.iter().zip(headers).enumerate() {
        let subs = column.subtotals_line();

        if col % 2 == 0 {
            push_section(&mut text, header, column, &subs);
            previous_even = Some((subs, column.motor));
        } else {
            let same = previous_even
                .as_ref()
                .is_some_and(|(prev_subs, prev_motor)| *prev_subs == subs && *prev_motor == column.motor);
            if !same {
                push_section(&mut text, header, column, &subs);
            }
        }
    }

    text
}

fn push_section(text: &mut String, header: &str, column: &ColumnTotals, subs: &str) {
    text.push_str(&format!(
        "{}:{:02}/{:02}\n{}\n\n",
        header, column.cars, column.motor, subs
    ));
}

//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `exam_core` linkage.
//! - Print a deterministic sample table for quick local sanity checks.

use exam_core::{ExamInput, ExamRow, ExamService, ROW_HEADINGS};

const SAMPLE_EXAMS: [[&str; 4]; 3] = [
    ["Calculus", "2024-05-10", "09:00", "Room A"],
    ["Physics", "2024-05-09", "14:00", "Room B"],
    ["Chemistry", "2024-05-09", "09:30", "Lab 2"],
];

fn main() {
    println!("exam_core ping={}", exam_core::ping());
    println!("exam_core version={}", exam_core::core_version());

    let mut service = ExamService::in_memory();
    for [name, date, time, room] in SAMPLE_EXAMS {
        if let Err(err) = service.add(&ExamInput::new(name, date, time, room)) {
            eprintln!("exam_core sample add failed: {err}");
            std::process::exit(1);
        }
    }

    print!("{}", render_table(&service.sorted_view().rows()));
}

fn render_table(rows: &[ExamRow]) -> String {
    let mut widths = ROW_HEADINGS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &ROW_HEADINGS, &widths);
    for row in rows {
        push_line(&mut out, &row.cells(), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

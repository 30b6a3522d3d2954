use std::fmt::Write as _;

use crate::dom::markup::escape_text;
use crate::view::{Renderer, ViewError};

use super::matrix::{DayCell, Matrix};

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Renders a [`Matrix`] as one `<table class="calendar">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridRenderer;

impl<'a> Renderer<Matrix<'a>> for GridRenderer {
    fn render_item(&self, matrix: &Matrix<'a>) -> Result<String, ViewError> {
        let mut out = String::new();
        write_grid(&mut out, matrix).map_err(|err| ViewError::Render(err.to_string()))?;
        Ok(out)
    }
}

fn write_grid(out: &mut String, matrix: &Matrix<'_>) -> std::fmt::Result {
    write!(
        out,
        r#"<table class="calendar" data-year="{}" data-month="{}"><thead><tr>"#,
        matrix.year,
        matrix.month + 1
    )?;
    for label in WEEKDAY_LABELS {
        write!(out, "<th>{label}</th>")?;
    }
    out.push_str("</tr></thead><tbody>");
    for week in &matrix.weeks {
        out.push_str("<tr>");
        for cell in week {
            write_cell(out, cell)?;
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    Ok(())
}

fn write_cell(out: &mut String, cell: &DayCell<'_>) -> std::fmt::Result {
    let mut class = String::from("day");
    if !cell.in_current_month {
        class.push_str(" other-month");
    }
    if cell.is_today {
        class.push_str(" today");
    }
    write!(out, r#"<td class="{class}"><span class="date">{}</span>"#, cell.date)?;

    if !cell.events.is_empty() {
        out.push_str(r#"<ul class="events">"#);
        for event in &cell.events {
            let title = event.title().unwrap_or("(untitled)");
            write!(
                out,
                r#"<li class="event">{} <time>{}</time></li>"#,
                escape_text(title),
                event.start.format("%H:%M")
            )?;
        }
        out.push_str("</ul>");
    }
    out.push_str("</td>");
    Ok(())
}

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate};
use log::warn;
use regex::Regex;

use crate::session_extractor::Session;
use crate::week_partition::{SLOT_MINUTES, TimeAxis, minutes_of_day, round_up_to_slot};

const WEEKDAY_HEADERS: [&str; 5] = ["Lu", "Ma", "Mi", "Ju", "Vi"];
const COLUMNS: usize = WEEKDAY_HEADERS.len();

const BOILERPLATE: &str = "Planificación de la asignatura";

/// Role of one (slot, weekday) position in a week's table.
#[derive(Debug)]
pub enum Cell<'a> {
    Empty,
    /// Covered by an earlier anchor's rowspan; renders nothing.
    Continuation,
    Anchor { session: &'a Session, span: usize },
}

/// The per-week slot layout: 5 weekday columns by `axis.slot_count()` rows.
pub struct WeekGrid<'a> {
    cells: Vec<Cell<'a>>,
    slots: usize,
}

impl<'a> WeekGrid<'a> {
    pub fn build(sessions: &[&'a Session], axis: &TimeAxis) -> Self {
        let slots = axis.slot_count();
        let mut grid = WeekGrid {
            cells: (0..slots * COLUMNS).map(|_| Cell::Empty).collect(),
            slots,
        };
        for session in sessions {
            // Placement trusts the parsed date, never the source label.
            let weekday = session.start.date().weekday().num_days_from_monday() as usize;
            if weekday >= COLUMNS {
                warn!(
                    "{} on {} falls on a weekend; the grid only has Monday-Friday columns",
                    session.subject,
                    session.start.date()
                );
                continue;
            }
            let start_min = minutes_of_day(session.start.time());
            let end_min = round_up_to_slot(minutes_of_day(session.end.time()));
            let start_slot = ((start_min.max(axis.min_time) - axis.min_time) / SLOT_MINUTES) as usize;
            let end_slot = ((end_min.min(axis.max_time) - axis.min_time) / SLOT_MINUTES) as usize;
            let span = end_slot.saturating_sub(start_slot).max(1);

            match grid.cell(start_slot, weekday) {
                Cell::Anchor { session: earlier, .. } => {
                    // Two sessions sharing a start slot: last write wins.
                    warn!(
                        "{} and {} overlap on {} at slot {}; keeping the later entry",
                        earlier.subject,
                        session.subject,
                        session.start.date(),
                        start_slot
                    );
                }
                Cell::Continuation => {
                    // A cell inside an earlier anchor's rowspan has nowhere
                    // to render without shifting the row's columns.
                    warn!(
                        "{} on {} starts inside another session's span; not rendered",
                        session.subject,
                        session.start.date()
                    );
                    continue;
                }
                Cell::Empty => {}
            }
            grid.cells[start_slot * COLUMNS + weekday] = Cell::Anchor { session, span };
            for slot in start_slot + 1..end_slot.min(slots) {
                grid.cells[slot * COLUMNS + weekday] = Cell::Continuation;
            }
        }
        grid
    }

    pub fn cell(&self, slot: usize, weekday: usize) -> &Cell<'a> {
        &self.cells[slot * COLUMNS + weekday]
    }

    pub fn slot_count(&self) -> usize {
        self.slots
    }
}

pub struct CalendarRenderer {
    // Subject codes look like DS.T.2; anything else renders verbatim.
    code_pattern: Regex,
}

impl CalendarRenderer {
    pub fn new() -> anyhow::Result<Self> {
        let code_pattern = Regex::new(r"^([A-Z]+)\.([A-Z]+)\.([0-9]+)")?;
        Ok(Self { code_pattern })
    }

    /// Emits the whole document: one heading, then per week a sub-heading and
    /// a table sharing the common time axis.
    pub fn render_document(
        &self,
        weeks: &BTreeMap<NaiveDate, Vec<&Session>>,
        axis: &TimeAxis,
    ) -> String {
        let mut out = vec![
            "<html><head><title>Calendario Semanal de Clases</title><link rel='stylesheet' href='calendar.css'></head><body>".to_string(),
            "<h1>Calendario Semanal de Clases</h1>".to_string(),
        ];
        for (monday, sessions) in weeks {
            out.push(self.render_week(*monday, sessions, axis));
        }
        out.push("</body></html>".to_string());
        out.join("\n")
    }

    pub fn render_week(&self, monday: NaiveDate, sessions: &[&Session], axis: &TimeAxis) -> String {
        let mut out = vec![format!("<h2>Semana del {}</h2>", monday.format("%d/%m/%Y"))];
        out.push("<table>".to_string());

        let days_with_classes: HashSet<usize> = sessions
            .iter()
            .map(|s| s.start.date().weekday().num_days_from_monday() as usize)
            .filter(|&d| d < COLUMNS)
            .collect();

        let mut header = "<tr><th>Hora</th>".to_string();
        for (day, name) in WEEKDAY_HEADERS.iter().enumerate() {
            let date = monday + Duration::days(day as i64);
            let class_attr = if days_with_classes.contains(&day) {
                ""
            } else {
                " class='no-class'"
            };
            header.push_str(&format!(
                "<th{}>{}<br/>{}</th>",
                class_attr,
                name,
                date.format("%d/%m/%Y")
            ));
        }
        header.push_str("</tr>");
        out.push(header);

        let grid = WeekGrid::build(sessions, axis);
        for slot in 0..grid.slot_count() {
            let slot_start = axis.min_time + slot as u32 * SLOT_MINUTES;
            let slot_end = slot_start + SLOT_MINUTES;
            let mut row = format!(
                "<tr><td>{} - {}</td>",
                format_clock(slot_start),
                format_clock(slot_end)
            );
            for day in 0..COLUMNS {
                match grid.cell(slot, day) {
                    Cell::Empty => row.push_str("<td></td>"),
                    // The anchor's rowspan already covers this position.
                    Cell::Continuation => {}
                    Cell::Anchor { session, span } => {
                        row.push_str(&format!(
                            "<td class='event' rowspan='{}'>{}<br/>({})</td>",
                            span,
                            self.clean_subject(&session.subject),
                            session.room
                        ));
                    }
                }
            }
            row.push_str("</tr>");
            out.push(row);
        }
        out.push("</table>".to_string());
        out.join("\n")
    }

    /// Strips the planning boilerplate and compacts course codes:
    /// `DS.T.2` renders as `DS T.2`.
    fn clean_subject(&self, subject: &str) -> String {
        let cleaned = subject.replace(BOILERPLATE, "");
        let cleaned = cleaned.trim();
        match self.code_pattern.captures(cleaned) {
            Some(caps) => format!("{} {}.{}", &caps[1], &caps[2], &caps[3]),
            None => cleaned.to_string(),
        }
    }
}

fn format_clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use scraper::{ElementRef, Html, Selector};

use crate::text_manipulators::extract_text;

/// One scheduled class occurrence. Built once per matched listing line,
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct Session {
    pub subject: String,
    pub room: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

pub struct SessionExtractor {
    heading_selector: Selector,
    item_selector: Selector,
}

impl SessionExtractor {
    pub fn new() -> Self {
        Self {
            heading_selector: Selector::parse("h2").unwrap(),
            item_selector: Selector::parse("li").unwrap(),
        }
    }

    /// Walks every subject heading and its following ordered list, turning
    /// each listing line into a `Session`. Lines outside the fixed grammar
    /// (annotation rows in the source listing) are dropped without comment.
    /// Output order is document order; callers must not assume sortedness.
    pub fn extract(&self, html: &str) -> Vec<Session> {
        let document = Html::parse_document(html);
        let mut sessions = Vec::new();
        for heading in document.select(&self.heading_selector) {
            let subject = extract_text(heading);
            let Some(list) = heading
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .take_while(|el| el.value().name() != "h2")
                .find(|el| el.value().name() == "ol")
            else {
                continue;
            };
            for item in list.select(&self.item_selector) {
                let text = extract_text(item);
                if let Some(session) = parse_session_line(&subject, &text) {
                    sessions.push(session);
                }
            }
        }
        sessions
    }
}

impl Default for SessionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses one listing line, e.g.
/// `Jueves, 11/09/2025, 13.30-15.30, A-2-02, (2)`.
/// The grammar is fixed: weekday label, date, start-end, room, and at least
/// one trailing field after the room. The weekday label is deliberately
/// ignored for placement; the parsed date decides the column later, which
/// tolerates mislabeled source lines.
fn parse_session_line(subject: &str, text: &str) -> Option<Session> {
    let mut fields = text.split(',').map(str::trim);

    let label = fields.next()?;
    if label.is_empty() || !label.chars().all(char::is_alphanumeric) {
        return None;
    }

    let date = NaiveDate::parse_from_str(fields.next()?, "%d/%m/%Y").ok()?;

    let (start_raw, end_raw) = fields.next()?.split_once('-')?;
    let start = NaiveTime::parse_from_str(start_raw.trim(), "%H.%M").ok()?;
    let end = NaiveTime::parse_from_str(end_raw.trim(), "%H.%M").ok()?;
    // A reversed or empty range has no valid slot geometry; treat the line
    // as noise like any other malformed entry.
    if start >= end {
        return None;
    }

    let room = fields.next()?;
    if room.is_empty() {
        return None;
    }
    // The source grammar terminates the room with a comma.
    fields.next()?;

    Some(Session {
        subject: subject.to_string(),
        room: room.to_string(),
        start: date.and_time(start),
        end: date.and_time(end),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike, Weekday};

    const SAMPLE: &str = r#"<html><body>
        <h2>DS.T.2</h2>
        <ol>
            <li>Jueves, 11/09/2025, 13.30-15.30, A-2-02, (2)</li>
            <li>Planificación de la asignatura</li>
        </ol>
        <h2>CVVS.L.1</h2>
        <ol>
            <li>Lunes, 15/09/2025, 9.00-11.00, B-1-11, (1)</li>
        </ol>
        <h2>Sin sesiones</h2>
        <p>No hay clases.</p>
    </body></html>"#;

    #[test]
    fn extracts_sessions_under_each_heading() {
        let sessions = SessionExtractor::new().extract(SAMPLE);
        assert_eq!(sessions.len(), 2);

        assert_eq!(sessions[0].subject, "DS.T.2");
        assert_eq!(sessions[0].room, "A-2-02");
        assert_eq!(
            sessions[0].start,
            NaiveDate::from_ymd_opt(2025, 9, 11)
                .unwrap()
                .and_hms_opt(13, 30, 0)
                .unwrap()
        );
        assert_eq!(
            sessions[0].end,
            NaiveDate::from_ymd_opt(2025, 9, 11)
                .unwrap()
                .and_hms_opt(15, 30, 0)
                .unwrap()
        );

        assert_eq!(sessions[1].subject, "CVVS.L.1");
        assert_eq!(sessions[1].start.hour(), 9);
    }

    #[test]
    fn skips_lines_outside_the_grammar() {
        for bad in [
            "Planificación de la asignatura",
            "Jueves, 11/09/2025",
            "Jueves, 11/09/2025, 13.30-15.30, A-2-02",
            "Jueves, 32/09/2025, 13.30-15.30, A-2-02, (2)",
            "Jueves, 11/09/2025, 13.30 a 15.30, A-2-02, (2)",
            "",
        ] {
            assert!(parse_session_line("DS.T.2", bad).is_none(), "{bad:?}");
        }
    }

    #[test]
    fn reversed_time_ranges_are_rejected() {
        assert!(
            parse_session_line("DS.T.2", "Jueves, 11/09/2025, 21.30-9.00, A-2-02, (2)").is_none()
        );
        assert!(
            parse_session_line("DS.T.2", "Jueves, 11/09/2025, 13.30-13.30, A-2-02, (2)").is_none()
        );
    }

    #[test]
    fn start_and_end_share_the_line_date() {
        let session =
            parse_session_line("DS.T.2", "Jueves, 11/09/2025, 13.30-15.30, A-2-02, (2)").unwrap();
        assert_eq!(session.start.date(), session.end.date());
        assert!(session.start < session.end);
    }

    #[test]
    fn single_digit_hours_parse() {
        let session =
            parse_session_line("IR.L.1", "Lunes, 15/09/2025, 9.00-11.00, B-1-11, (1)").unwrap();
        assert_eq!(session.start.time().hour(), 9);
        assert_eq!(session.end.time().hour(), 11);
    }

    #[test]
    fn date_wins_over_weekday_label() {
        // 11/09/2025 is a Thursday; the lying label changes nothing.
        let session =
            parse_session_line("DS.T.2", "Lunes, 11/09/2025, 13.30-15.30, A-2-02, (2)").unwrap();
        assert_eq!(session.start.date().weekday(), Weekday::Thu);
    }
}

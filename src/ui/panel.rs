//! Text rendering of section panels and the activity log.

use console::style;

use crate::activity::LogLine;
use crate::section::Section;

const CURSOR: &str = ">";

/// Render one section: a heading, numbered items and the cursor label.
///
/// `key` is the number the operator types to address the panel.
#[must_use]
pub fn render_section(key: usize, section: &Section) -> String {
    let mut out = format!(
        "{} {}\n",
        style(format!("[{key}]")).cyan(),
        style(section.title()).bold()
    );

    if section.items().is_empty() {
        out.push_str(&format!("    {}\n", style("(empty)").dim()));
        return out;
    }

    for (i, item) in section.items().iter().enumerate() {
        let marker = if section.index() == Some(i) { CURSOR } else { " " };
        out.push_str(&format!("  {marker} {:>2}. {item}\n", i + 1));
    }

    if let Some(current) = section.current_text() {
        out.push_str(&format!("    {} {current}\n", style("current:").dim()));
    }

    out
}

/// Render the last lines of the activity log.
#[must_use]
pub fn render_log(lines: &[LogLine]) -> String {
    if lines.is_empty() {
        return format!("  {}\n", style("(no activity yet)").dim());
    }
    lines.iter().map(|line| format!("  {}", line.render())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityLog;
    use crate::section::{SectionId, SectionSpec};
    use crate::store::ColumnStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn plain(text: &str) -> String {
        console::strip_ansi_codes(text).into_owned()
    }

    #[test]
    fn empty_section_says_so() {
        let section = Section::new(SectionSpec::new(SectionId::Weirdo, "Weirdo", "W", 1, 1));
        assert_eq!(plain(&render_section(7, &section)), "[7] Weirdo\n    (empty)\n");
    }

    #[test]
    fn cursor_marks_the_current_item() {
        let store = ColumnStore::from_columns([("W", vec!["only"])]);
        let mut section = Section::new(SectionSpec::new(SectionId::Weirdo, "Weirdo", "W", 2, 2));
        section.regenerate(&store, &mut StdRng::seed_from_u64(0), &mut ActivityLog::new());
        section.advance_cursor();

        assert_eq!(
            plain(&render_section(1, &section)),
            "[1] Weirdo\n     1. only\n  >  2. only\n    current: only\n"
        );
    }

    #[test]
    fn log_lines_are_indented() {
        let mut log = ActivityLog::new();
        assert!(plain(&render_log(log.lines())).contains("no activity"));
        crate::activity::LogSink::log(&mut log, "hello");
        assert!(plain(&render_log(log.lines())).trim_end().ends_with("] hello"));
    }
}

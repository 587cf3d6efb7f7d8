//! Daily summary of operator activity, read back from the mirrored log.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

use crate::activity::MIRROR_TIME_FORMAT;
use crate::clipboard::COPY_FAILED_SUFFIX;

/// Copy counts for one section title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub title: String,
    pub item_copies: usize,
    pub section_copies: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub rows: Vec<ReportRow>,
    pub line_copies: usize,
    pub generations: usize,
}

impl DailyReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.line_copies == 0 && self.generations == 0
    }
}

/// Summarise the mirror file for `date`. A missing file is an empty report.
pub fn load(path: &Path, date: NaiveDate) -> Result<DailyReport> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };
    Ok(summarize(&contents, date))
}

/// Summarise mirror-formatted lines stamped on `date`.
#[must_use]
pub fn summarize(contents: &str, date: NaiveDate) -> DailyReport {
    let mut per_title: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    let mut line_copies = 0;
    let mut generations = 0;

    for line in contents.lines() {
        let Some((stamp, text)) = line.split_once('\t') else {
            continue;
        };
        let Ok(stamp) = NaiveDateTime::parse_from_str(stamp, MIRROR_TIME_FORMAT) else {
            continue;
        };
        if stamp.date() != date {
            continue;
        }

        if let Some(title) = text.strip_prefix("Copied section: ") {
            let title = title.trim_end_matches(COPY_FAILED_SUFFIX);
            per_title.entry(title.to_string()).or_default().1 += 1;
        } else if text.starts_with("Copied: ") {
            line_copies += 1;
        } else if let Some((title, _)) = text.split_once(": Copied -> ") {
            per_title.entry(title.to_string()).or_default().0 += 1;
        } else if text.starts_with("Generated ") {
            generations += 1;
        }
    }

    DailyReport {
        date,
        rows: per_title
            .into_iter()
            .map(|(title, (item_copies, section_copies))| ReportRow {
                title,
                item_copies,
                section_copies,
            })
            .collect(),
        line_copies,
        generations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LOG: &str = "\
2026-03-13 23:59:59\tPrompts: Copied -> yesterday
2026-03-14 09:00:00\tGenerated 8 of 8 sections
2026-03-14 09:00:05\tPrompts: Copied -> write a poem
2026-03-14 09:00:06\tPrompts: Copied -> another: one
2026-03-14 09:00:07\tCopied section: Google Alerts (copy failed)
2026-03-14 09:00:08\tCopied: loose line
2026-03-14 09:00:09\tGoogle Alerts: Copied -> weather (copy failed)
not a log line
2026-03-14 09:01:00\tGenerated 7 of 8 sections
";

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn counts_todays_activity() {
        let report = summarize(LOG, day());

        assert_eq!(report.date, day());
        assert_eq!(report.generations, 2);
        assert_eq!(report.line_copies, 1);
        assert_eq!(
            report.rows,
            vec![
                ReportRow {
                    title: "Google Alerts".to_string(),
                    item_copies: 1,
                    section_copies: 1,
                },
                ReportRow {
                    title: "Prompts".to_string(),
                    item_copies: 2,
                    section_copies: 0,
                },
            ]
        );
    }

    #[test]
    fn other_days_are_ignored() {
        let report = summarize(LOG, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert!(report.is_empty());
    }

    #[test]
    fn missing_file_is_an_empty_report() {
        let dir = TempDir::new().unwrap();
        let report = load(&dir.path().join("activity.log"), day()).unwrap();
        assert!(report.is_empty());
    }
}

//! Themed sections: what each panel samples and the runtime state it holds.

use rand::Rng;

use crate::activity::LogSink;
use crate::clipboard::{Clipboard, copy_logged};
use crate::sampler;
use crate::store::ColumnStore;
use crate::transform::{append_decorate, inject_typos};

/// Stable identity of a generator section.
///
/// Behaviour that depends on the kind of section keys on this, never on the
/// display title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    GoogleAlerts,
    GoogleSign,
    EmailSubscription,
    GmailAnswer,
    Prompts,
    YoutubeCommentary,
    Weirdo,
    EmailForMail,
}

impl SectionId {
    pub const ALL: [Self; 8] = [
        Self::GoogleAlerts,
        Self::GoogleSign,
        Self::EmailSubscription,
        Self::GmailAnswer,
        Self::Prompts,
        Self::YoutubeCommentary,
        Self::Weirdo,
        Self::EmailForMail,
    ];

    /// Key under the `generators` feature category.
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::GoogleAlerts => "google_alerts",
            Self::GoogleSign => "google_sign",
            Self::EmailSubscription => "email_subscription",
            Self::GmailAnswer => "gmail_answer",
            Self::Prompts => "prompts",
            Self::YoutubeCommentary => "youtube_commentary",
            Self::Weirdo => "weirdo",
            Self::EmailForMail => "email_for_mail",
        }
    }

    #[must_use]
    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.config_key() == key)
    }

    /// Whether sampled items may be decorated with appender words.
    ///
    /// Email subscriptions are pasted as a plain link list.
    #[must_use]
    pub const fn accepts_appender(self) -> bool {
        !matches!(self, Self::EmailSubscription)
    }
}

/// Static description of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpec {
    pub id: SectionId,
    pub title: String,
    pub source_column: String,
    pub min_items: usize,
    pub max_items: usize,
    pub append_column: Option<String>,
    pub apply_typos: bool,
}

impl SectionSpec {
    /// Bounds are normalised so that `1 <= min_items <= max_items`.
    #[must_use]
    pub fn new(
        id: SectionId,
        title: impl Into<String>,
        source_column: impl Into<String>,
        min_items: usize,
        max_items: usize,
    ) -> Self {
        let min_items = min_items.max(1);
        Self {
            id,
            title: title.into(),
            source_column: source_column.into(),
            min_items,
            max_items: max_items.max(min_items),
            append_column: None,
            apply_typos: false,
        }
    }

    #[must_use]
    pub fn with_appender(mut self, column: impl Into<String>) -> Self {
        self.append_column = Some(column.into());
        self
    }

    #[must_use]
    pub const fn with_typos(mut self) -> Self {
        self.apply_typos = true;
        self
    }
}

/// Column every decorated section draws its appender words from.
pub const APPENDER_COLUMN: &str = "Appender";

/// The generator sections, in panel order.
#[must_use]
pub fn catalog() -> Vec<SectionSpec> {
    vec![
        SectionSpec::new(SectionId::GoogleAlerts, "Google Alerts", "Alerts", 3, 5)
            .with_appender(APPENDER_COLUMN),
        SectionSpec::new(SectionId::GoogleSign, "Google Sign", "Sign", 2, 4),
        SectionSpec::new(
            SectionId::EmailSubscription,
            "Email Subscription",
            "Subscriptions",
            5,
            10,
        )
        .with_appender(APPENDER_COLUMN),
        SectionSpec::new(SectionId::GmailAnswer, "Gmail Answer", "Answers", 1, 3),
        SectionSpec::new(SectionId::Prompts, "Prompts", "Prompts", 3, 5).with_typos(),
        SectionSpec::new(
            SectionId::YoutubeCommentary,
            "YouTube Commentary",
            "Commentary",
            2,
            4,
        ),
        SectionSpec::new(SectionId::Weirdo, "Weirdo", "Weirdo", 1, 3)
            .with_appender(APPENDER_COLUMN),
        SectionSpec::new(SectionId::EmailForMail, "Email For Mail", "Emails", 1, 2),
    ]
}

/// One themed panel: its spec, the current sample and a cursor into it.
///
/// The section is `Empty` while `items` is empty; the cursor is only
/// defined when it is populated.
#[derive(Debug, Clone)]
pub struct Section {
    spec: SectionSpec,
    items: Vec<String>,
    cursor: Option<usize>,
    warned_columns: Vec<String>,
}

impl Section {
    #[must_use]
    pub const fn new(spec: SectionSpec) -> Self {
        Self {
            spec,
            items: Vec::new(),
            cursor: None,
            warned_columns: Vec::new(),
        }
    }

    #[cfg(test)]
    pub const fn spec(&self) -> &SectionSpec {
        &self.spec
    }

    #[must_use]
    pub const fn id(&self) -> SectionId {
        self.spec.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.spec.title
    }

    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub const fn is_populated(&self) -> bool {
        self.cursor.is_some()
    }

    #[must_use]
    pub fn current_text(&self) -> Option<&str> {
        self.cursor
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    /// Replace the items with a fresh sample and reset the cursor.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        store: &ColumnStore,
        rng: &mut R,
        log: &mut dyn LogSink,
    ) {
        let values = match store.values(&self.spec.source_column) {
            Ok(values) => values,
            Err(e) => {
                self.warn_once(&self.spec.source_column.clone(), &e.to_string(), log);
                self.items.clear();
                self.cursor = None;
                return;
            }
        };

        let mut items = sampler::sample(rng, values, self.spec.min_items, self.spec.max_items);

        if let Some(column) = self.spec.append_column.clone()
            && self.spec.id.accepts_appender()
        {
            match store.values(&column) {
                Ok(words) => items = append_decorate(rng, self.spec.id, items, words),
                Err(e) => self.warn_once(&column, &e.to_string(), log),
            }
        }

        if self.spec.apply_typos {
            items = items
                .iter()
                .map(|item| inject_typos(rng, item))
                .collect();
        }

        self.cursor = if items.is_empty() { None } else { Some(0) };
        self.items = items;
    }

    /// Move the cursor to the next item, wrapping around.
    pub fn advance_cursor(&mut self) {
        if let Some(i) = self.cursor {
            self.cursor = Some((i + 1) % self.items.len());
        }
    }

    /// Copy the item under the cursor. Does nothing while empty.
    pub fn copy_current(&self, clipboard: &dyn Clipboard, log: &mut dyn LogSink) {
        if let Some(text) = self.current_text() {
            let line = format!("{}: Copied -> {text}", self.spec.title);
            emit(clipboard, log, text, &line);
        }
    }

    /// Copy an arbitrary rendered line of this section.
    pub fn copy_line(&self, text: &str, clipboard: &dyn Clipboard, log: &mut dyn LogSink) {
        emit(clipboard, log, text, &format!("Copied: {text}"));
    }

    /// Copy every item, one per line.
    pub fn copy_all(&self, clipboard: &dyn Clipboard, log: &mut dyn LogSink) {
        let text = self.items.join("\n");
        let line = format!("Copied section: {}", self.spec.title);
        emit(clipboard, log, &text, &line);
    }

    fn warn_once(&mut self, column: &str, reason: &str, log: &mut dyn LogSink) {
        if self.warned_columns.iter().any(|c| c == column) {
            return;
        }
        tracing::warn!("Section '{}': {reason}", self.spec.title);
        log.log(&format!("{}: {reason}", self.spec.title));
        self.warned_columns.push(column.to_string());
    }
}

/// Failures are already in the activity log; the section stays usable.
fn emit(clipboard: &dyn Clipboard, log: &mut dyn LogSink, text: &str, line: &str) {
    if let Err(e) = copy_logged(clipboard, log, text, line) {
        tracing::debug!("Clipboard write failed: {e}");
    }
}

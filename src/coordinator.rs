//! Owner of every section and the single entry point for the host.
//!
//! The host enumerates panels through [`Coordinator::sections`], binds its
//! "generate" action to [`Coordinator::generate_all`] and drives a single
//! panel through the [`SectionView`] returned by [`Coordinator::view_mut`].

use std::rc::Rc;
use std::sync::Arc;

use rand::rngs::StdRng;

use crate::activity::{ActivityLog, LogSink};
use crate::clipboard::Clipboard;
use crate::config::{FeatureGate, GENERATORS};
use crate::section::{Section, SectionId, SectionSpec};
use crate::store::ColumnStore;

pub struct Coordinator {
    store: Arc<ColumnStore>,
    sections: Vec<Section>,
    rng: StdRng,
    clipboard: Rc<dyn Clipboard>,
    log: ActivityLog,
}

impl Coordinator {
    /// Instantiate the sections the feature gate enables, in catalog order.
    ///
    /// The gate is read once here; toggling a generator later takes effect
    /// on the next start.
    pub fn new(
        store: Arc<ColumnStore>,
        specs: Vec<SectionSpec>,
        gate: &FeatureGate,
        clipboard: Rc<dyn Clipboard>,
        log: ActivityLog,
        rng: StdRng,
    ) -> Self {
        let sections: Vec<Section> = specs
            .into_iter()
            .filter(|spec| gate.is_enabled(GENERATORS, spec.id.config_key()))
            .map(Section::new)
            .collect();

        tracing::debug!("Coordinator started with {} sections", sections.len());

        Self {
            store,
            sections,
            rng,
            clipboard,
            log,
        }
    }

    /// Regenerate every section in declaration order.
    pub fn generate_all(&mut self) {
        for section in &mut self.sections {
            section.regenerate(&self.store, &mut self.rng, &mut self.log);
        }

        let populated = self.sections.iter().filter(|s| s.is_populated()).count();
        self.log.log(&format!(
            "Generated {populated} of {} sections",
            self.sections.len()
        ));
    }

    /// Read-only views of every section, in panel order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id() == id)
    }

    /// Mutable operations for one section.
    pub fn view_mut(&mut self, id: SectionId) -> Option<SectionView<'_>> {
        let section = self.sections.iter_mut().find(|s| s.id() == id)?;
        Some(SectionView {
            section,
            store: &self.store,
            rng: &mut self.rng,
            clipboard: self.clipboard.as_ref(),
            log: &mut self.log,
        })
    }

    /// Record a host-level event in the activity log.
    pub fn note(&mut self, text: &str) {
        self.log.log(text);
    }

    #[must_use]
    pub const fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub const fn log_mut(&mut self) -> &mut ActivityLog {
        &mut self.log
    }
}

/// The operations a panel exposes to the host.
pub struct SectionView<'a> {
    section: &'a mut Section,
    store: &'a ColumnStore,
    rng: &'a mut StdRng,
    clipboard: &'a dyn Clipboard,
    log: &'a mut ActivityLog,
}

impl SectionView<'_> {
    pub fn regenerate(&mut self) {
        self.section.regenerate(self.store, &mut *self.rng, &mut *self.log);
    }

    pub fn advance_cursor(&mut self) {
        self.section.advance_cursor();
    }

    pub fn copy_current(&mut self) {
        self.section.copy_current(self.clipboard, &mut *self.log);
    }

    pub fn copy_line(&mut self, text: &str) {
        self.section.copy_line(text, self.clipboard, &mut *self.log);
    }

    pub fn copy_all(&mut self) {
        self.section.copy_all(self.clipboard, &mut *self.log);
    }

    #[must_use]
    pub fn section(&self) -> &Section {
        &*self.section
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClipboardError, MemoryClipboard, UnavailableClipboard};
    use crate::section::catalog;
    use rand::SeedableRng;

    fn coordinator(store: ColumnStore, gate: &FeatureGate) -> (Coordinator, Rc<MemoryClipboard>) {
        let clipboard = Rc::new(MemoryClipboard::new());
        let coordinator = Coordinator::new(
            Arc::new(store),
            catalog(),
            gate,
            clipboard.clone(),
            ActivityLog::new(),
            StdRng::seed_from_u64(12),
        );
        (coordinator, clipboard)
    }

    fn full_store() -> ColumnStore {
        ColumnStore::from_columns([
            ("Alerts", vec!["cheap flights", "weather", "stock news", "recipes"]),
            ("Appender", vec!["today", "online"]),
            ("Sign", vec!["hello", "hi", "hey"]),
            ("Subscriptions", vec!["a.com", "b.com", "c.com"]),
            ("Answers", vec!["Thanks!", "Sounds good"]),
            (
                "Prompts",
                vec!["describe a quiet morning by the lake in spring"],
            ),
            ("Commentary", vec!["great video", "love this"]),
            ("Weirdo", vec!["banana phone"]),
            ("Emails", vec!["me@example.com"]),
        ])
    }

    #[test]
    fn empty_source_leaves_every_section_empty() {
        let store = ColumnStore::from_rows(vec!["Prompts".into(), "Alerts".into()], Vec::new());
        let (mut coordinator, clipboard) = coordinator(store, &FeatureGate::default());

        coordinator.generate_all();
        assert!(coordinator.sections().iter().all(|s| !s.is_populated()));

        for id in SectionId::ALL {
            coordinator.view_mut(id).unwrap().copy_current();
        }
        assert!(clipboard.get().is_err());
    }

    #[test]
    fn generate_all_populates_in_catalog_order() {
        let (mut coordinator, _) = coordinator(full_store(), &FeatureGate::default());
        coordinator.generate_all();

        let ids: Vec<SectionId> = coordinator.sections().iter().map(Section::id).collect();
        assert_eq!(ids, SectionId::ALL);
        for section in coordinator.sections() {
            let spec = section.spec();
            let len = section.items().len();
            assert!(
                (spec.min_items..=spec.max_items).contains(&len),
                "{}: {len}",
                spec.title
            );
        }

        let last = coordinator.log().lines().last().unwrap();
        assert_eq!(last.text, "Generated 8 of 8 sections");
    }

    #[test]
    fn subscriptions_are_never_decorated() {
        let (mut coordinator, _) = coordinator(full_store(), &FeatureGate::default());
        for _ in 0..20 {
            coordinator.generate_all();
            let section = coordinator.section(SectionId::EmailSubscription).unwrap();
            assert!(section.items().iter().all(|i| !i.contains(' ')));
        }
    }

    #[test]
    fn disabled_generators_are_not_instantiated() {
        let mut gate = FeatureGate::default();
        gate.set(GENERATORS, "weirdo", false);
        gate.set(GENERATORS, "prompts", false);

        let (coordinator, _) = coordinator(full_store(), &gate);
        assert_eq!(coordinator.sections().len(), 6);
        assert!(coordinator.section(SectionId::Weirdo).is_none());
        assert!(coordinator.section(SectionId::Prompts).is_none());
    }

    #[test]
    fn view_drives_a_single_section() {
        let (mut coordinator, clipboard) = coordinator(full_store(), &FeatureGate::default());
        coordinator.generate_all();

        let mut view = coordinator.view_mut(SectionId::GoogleSign).unwrap();
        view.advance_cursor();
        let expected = view.section().current_text().unwrap().to_string();
        view.copy_current();
        assert_eq!(clipboard.get().unwrap(), expected);

        view.copy_all();
        let all = view.section().items().join("\n");
        assert_eq!(clipboard.get().unwrap(), all);

        view.regenerate();
        assert_eq!(view.section().index(), Some(0));

        let last = coordinator.log().lines().last().unwrap();
        assert_eq!(last.text, "Copied section: Google Sign");
    }

    #[test]
    fn same_seed_same_generation() {
        let (mut first, _) = coordinator(full_store(), &FeatureGate::default());
        let (mut second, _) = coordinator(full_store(), &FeatureGate::default());
        first.generate_all();
        second.generate_all();

        for (a, b) in first.sections().iter().zip(second.sections()) {
            assert_eq!(a.items(), b.items());
        }
    }

    #[test]
    fn missing_clipboard_tool_marks_every_copy_failed() {
        let clipboard = Rc::new(UnavailableClipboard::new(ClipboardError::Unavailable(
            "xclip, xsel".to_string(),
        )));
        let mut coordinator = Coordinator::new(
            Arc::new(full_store()),
            catalog(),
            &FeatureGate::default(),
            clipboard,
            ActivityLog::new(),
            StdRng::seed_from_u64(4),
        );
        coordinator.generate_all();

        let mut view = coordinator.view_mut(SectionId::GmailAnswer).unwrap();
        view.copy_current();
        view.copy_all();
        view.copy_line("hello");

        let texts: Vec<&str> = coordinator
            .log()
            .lines()
            .iter()
            .map(|l| l.text.as_str())
            .skip(1)
            .collect();
        assert_eq!(texts.len(), 3);
        assert!(texts[0].starts_with("Gmail Answer: Copied -> "));
        assert!(texts.iter().all(|t| t.ends_with(" (copy failed)")), "{texts:?}");
        assert_eq!(texts[2], "Copied: hello (copy failed)");
    }
}

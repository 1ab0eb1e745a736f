// src/session.rs
//
// Single source of truth for everything the workspace shows: the two
// stores, the active selection, per-document in-flight translation
// tracking, and the highlight coordinator. All mutation happens on the UI
// thread through these methods; the async translation call re-enters
// through `complete_translation` / `fail_translation`, which re-check the
// selection so a late result is never applied to the wrong document.

use crate::annotation::{HistoryItem, LanguageMode, RepositoryItem, TranslationItem};
use crate::highlight::HighlightCoordinator;
use crate::store::{HistoryStore, RepositoryStore};

/// What the workspace currently displays.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A repository page whose translation has not been displayed yet
    /// (in flight, failed, or never started).
    Source { repo_id: String },
    /// A completed run, fresh or reselected from history.
    Run { history_id: String },
}

/// Everything the collaborator call needs, captured at initiation time.
/// The language mode is frozen here so a mode change while the call is in
/// flight does not relabel the run.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub document_id: String,
    pub image: String,
    pub mode: LanguageMode,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingRun {
    document_id: String,
    mode: LanguageMode,
}

#[derive(Debug, Default)]
pub struct Session {
    repository: RepositoryStore,
    history: HistoryStore,
    highlight: HighlightCoordinator,
    language_mode: LanguageMode,
    selection: Option<Selection>,
    pending: Vec<PendingRun>,
    error: Option<String>,
}

impl Session {
    pub fn repository(&self) -> &RepositoryStore {
        &self.repository
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn language_mode(&self) -> LanguageMode {
        self.language_mode
    }

    pub fn set_language_mode(&mut self, mode: LanguageMode) {
        self.language_mode = mode;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) -> bool {
        self.error.take().is_some()
    }

    pub fn import(&mut self, item: RepositoryItem) -> bool {
        self.repository.add(item)
    }

    pub fn is_pending(&self, document_id: &str) -> bool {
        self.pending
            .iter()
            .any(|run| run.document_id == document_id)
    }

    fn take_pending(&mut self, document_id: &str) -> Option<PendingRun> {
        let idx = self
            .pending
            .iter()
            .position(|run| run.document_id == document_id)?;
        Some(self.pending.remove(idx))
    }

    fn is_active_source(&self, document_id: &str) -> bool {
        matches!(&self.selection, Some(Selection::Source { repo_id }) if repo_id == document_id)
    }

    /// Select a repository page and, unless a translation for it is
    /// already in flight, initiate one. Returns the request the caller
    /// must hand to the collaborator; `None` means nothing to start
    /// (unknown id, or the in-flight call was coalesced).
    pub fn select_repository(&mut self, id: &str) -> Option<TranslationRequest> {
        let image = self.repository.get(id)?.source_image.clone();
        self.selection = Some(Selection::Source {
            repo_id: id.to_string(),
        });
        self.highlight.reset();
        self.error = None;

        if self.is_pending(id) {
            log::info!("translation for {id} already in flight, coalescing");
            return None;
        }

        let mode = self.language_mode;
        self.pending.push(PendingRun {
            document_id: id.to_string(),
            mode,
        });
        Some(TranslationRequest {
            document_id: id.to_string(),
            image,
            mode,
        })
    }

    /// Record a successful run. The result is applied only when the
    /// originating page is still the active selection; otherwise it is
    /// discarded and nothing is written to the history store. Returns
    /// whether the displayed state changed.
    pub fn complete_translation(
        &mut self,
        document_id: &str,
        run_id: String,
        timestamp: f64,
        items: Vec<TranslationItem>,
    ) -> bool {
        let Some(run) = self.take_pending(document_id) else {
            log::warn!("translation finished for {document_id} with no pending run");
            return false;
        };
        if !self.is_active_source(document_id) {
            log::info!("discarding translation result for {document_id}: selection moved on");
            return false;
        }
        let Some(source) = self.repository.get(document_id) else {
            return false;
        };

        let entry = HistoryItem {
            id: run_id.clone(),
            thumbnail: source.thumbnail.clone(),
            timestamp,
            language_mode: run.mode,
            items,
            source_image: source.source_image.clone(),
        };
        if !self.history.add(entry) {
            return false;
        }
        self.selection = Some(Selection::Run { history_id: run_id });
        self.highlight.reset();
        true
    }

    /// Record a failed run. The source page stays selected and the message
    /// is surfaced only when that page is still what the user is looking
    /// at; a stale failure is dropped silently.
    pub fn fail_translation(&mut self, document_id: &str, message: String) -> bool {
        if self.take_pending(document_id).is_none() {
            return false;
        }
        if !self.is_active_source(document_id) {
            log::info!("discarding translation failure for {document_id}: selection moved on");
            return false;
        }
        self.error = Some(message);
        true
    }

    /// Redisplay a completed run. Pure cache read: the stored items are
    /// served as-is and the collaborator is never involved.
    pub fn select_history(&mut self, id: &str) -> bool {
        if !self.history.contains(id) {
            return false;
        }
        self.selection = Some(Selection::Run {
            history_id: id.to_string(),
        });
        self.highlight.reset();
        self.error = None;
        true
    }

    /// The annotation list both renderers display. Borrowed from the
    /// history store; empty while a source page awaits its first result.
    pub fn displayed_items(&self) -> &[TranslationItem] {
        match &self.selection {
            Some(Selection::Run { history_id }) => self
                .history
                .get(history_id)
                .map(|run| run.items.as_slice())
                .unwrap_or(&[]),
            _ => &[],
        }
    }

    pub fn displayed_image(&self) -> Option<&str> {
        match &self.selection {
            Some(Selection::Source { repo_id }) => self
                .repository
                .get(repo_id)
                .map(|page| page.source_image.as_str()),
            Some(Selection::Run { history_id }) => self
                .history
                .get(history_id)
                .map(|run| run.source_image.as_str()),
            None => None,
        }
    }

    /// Mode shown alongside the displayed document: the run's recorded
    /// mode for cached results, the configured mode otherwise.
    pub fn displayed_mode(&self) -> LanguageMode {
        match &self.selection {
            Some(Selection::Run { history_id }) => self
                .history
                .get(history_id)
                .map(|run| run.language_mode)
                .unwrap_or(self.language_mode),
            _ => self.language_mode,
        }
    }

    /// Whether the displayed document has a translation in flight.
    pub fn loading(&self) -> bool {
        matches!(&self.selection, Some(Selection::Source { repo_id }) if self.is_pending(repo_id))
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlight.current()
    }

    /// Route a hover enter. Ids outside the displayed list are ignored,
    /// which covers transient events during a list swap.
    pub fn hover(&mut self, id: &str) -> bool {
        if !self.displayed_items().iter().any(|item| item.id == id) {
            return false;
        }
        self.highlight.set(id)
    }

    /// Route a hover leave through the coordinator's enter-wins guard.
    pub fn leave(&mut self, id: &str) -> bool {
        self.highlight.clear(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{RegionBox, RegionKind};

    fn page(id: &str) -> RepositoryItem {
        RepositoryItem {
            id: id.to_string(),
            name: format!("{id}.png"),
            thumbnail: format!("thumb:{id}"),
            source_image: format!("image:{id}"),
            timestamp: 1.0,
        }
    }

    fn region(id: &str) -> TranslationItem {
        TranslationItem {
            id: id.to_string(),
            bbox: RegionBox::new(0.1, 0.2, 0.3, 0.4),
            kind: RegionKind::Dialogue,
            original: "ドン".to_string(),
            translation: "BOOM".to_string(),
            background: None,
        }
    }

    fn session_with_pages(ids: &[&str]) -> Session {
        let mut session = Session::default();
        for id in ids {
            session.import(page(id));
        }
        session
    }

    #[test]
    fn test_select_repository_initiates_translation() {
        let mut session = session_with_pages(&["p1"]);
        let request = session.select_repository("p1").unwrap();
        assert_eq!(request.document_id, "p1");
        assert_eq!(request.image, "image:p1");
        assert!(session.loading());
        assert!(session.displayed_items().is_empty());
    }

    #[test]
    fn test_duplicate_initiation_is_coalesced() {
        let mut session = session_with_pages(&["p1"]);
        assert!(session.select_repository("p1").is_some());
        assert!(session.select_repository("p1").is_none());
        assert!(session.is_pending("p1"));
    }

    #[test]
    fn test_unknown_repository_id_is_noop() {
        let mut session = session_with_pages(&["p1"]);
        assert!(session.select_repository("nope").is_none());
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn test_successful_run_is_recorded_and_displayed() {
        let mut session = session_with_pages(&["p1"]);
        let request = session.select_repository("p1").unwrap();
        let changed = session.complete_translation(
            &request.document_id,
            "r1".to_string(),
            2.0,
            vec![region("a"), region("b")],
        );
        assert!(changed);
        assert!(!session.loading());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.displayed_items().len(), 2);
        assert_eq!(session.displayed_image(), Some("image:p1"));
    }

    #[test]
    fn test_run_captures_mode_at_initiation() {
        let mut session = session_with_pages(&["p1"]);
        session.set_language_mode(LanguageMode::JaToZh);
        let request = session.select_repository("p1").unwrap();
        session.set_language_mode(LanguageMode::JaToEn);
        session.complete_translation(&request.document_id, "r1".to_string(), 2.0, vec![]);
        assert_eq!(
            session.history().get("r1").unwrap().language_mode,
            LanguageMode::JaToZh
        );
        assert_eq!(session.displayed_mode(), LanguageMode::JaToZh);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut session = session_with_pages(&["p1", "p2"]);
        session.select_repository("p1").unwrap();
        session.select_repository("p2").unwrap();

        // p1's result arrives while p2 is displayed: it must not touch the
        // history store or the displayed state.
        let changed =
            session.complete_translation("p1", "r1".to_string(), 2.0, vec![region("a")]);
        assert!(!changed);
        assert!(session.history().is_empty());
        assert_eq!(
            session.selection(),
            Some(&Selection::Source {
                repo_id: "p2".to_string()
            })
        );

        // p2's own result still lands normally.
        assert!(session.complete_translation("p2", "r2".to_string(), 3.0, vec![region("a")]));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_reselecting_history_never_recomputes() {
        let mut session = session_with_pages(&["p1"]);
        session.select_repository("p1").unwrap();
        session.complete_translation("p1", "r1".to_string(), 2.0, vec![region("a")]);

        // Reselecting the cached run twice: no TranslationRequest exists on
        // this path at all, and the stored items come back identical.
        assert!(session.select_history("r1"));
        let first: Vec<_> = session.displayed_items().to_vec();
        assert!(session.select_history("r1"));
        assert_eq!(session.displayed_items(), first.as_slice());
        assert_eq!(session.history().len(), 1);
        assert!(!session.loading());
    }

    #[test]
    fn test_failure_keeps_source_selected() {
        let mut session = session_with_pages(&["p1"]);
        session.select_repository("p1").unwrap();
        let changed = session.fail_translation("p1", "service unavailable".to_string());
        assert!(changed);
        assert_eq!(session.error(), Some("service unavailable"));
        assert!(session.history().is_empty());
        assert_eq!(
            session.selection(),
            Some(&Selection::Source {
                repo_id: "p1".to_string()
            })
        );
        assert!(session.dismiss_error());
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_stale_failure_is_dropped() {
        let mut session = session_with_pages(&["p1", "p2"]);
        session.select_repository("p1").unwrap();
        session.select_repository("p2").unwrap();
        assert!(!session.fail_translation("p1", "boom".to_string()));
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_retranslating_after_failure_is_allowed() {
        let mut session = session_with_pages(&["p1"]);
        session.select_repository("p1").unwrap();
        session.fail_translation("p1", "boom".to_string());
        assert!(session.select_repository("p1").is_some());
    }

    #[test]
    fn test_hover_requires_displayed_membership() {
        let mut session = session_with_pages(&["p1"]);
        session.select_repository("p1").unwrap();
        session.complete_translation("p1", "r1".to_string(), 2.0, vec![region("a")]);

        assert!(session.hover("a"));
        assert_eq!(session.highlighted(), Some("a"));
        // An id from a previously displayed list is a no-op, not an error.
        assert!(!session.hover("ghost"));
        assert_eq!(session.highlighted(), Some("a"));
    }

    #[test]
    fn test_hover_enter_wins_over_stale_leave() {
        let mut session = session_with_pages(&["p1"]);
        session.select_repository("p1").unwrap();
        session.complete_translation(
            "p1",
            "r1".to_string(),
            2.0,
            vec![region("a"), region("b")],
        );

        session.hover("a");
        session.hover("b");
        assert!(!session.leave("a"));
        assert_eq!(session.highlighted(), Some("b"));
    }

    #[test]
    fn test_selection_change_resets_highlight() {
        let mut session = session_with_pages(&["p1"]);
        session.select_repository("p1").unwrap();
        session.complete_translation("p1", "r1".to_string(), 2.0, vec![region("a")]);
        session.hover("a");
        session.select_history("r1");
        assert_eq!(session.highlighted(), None);
    }
}

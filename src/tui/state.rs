//! Application state for the TUI.

use ratatui::widgets::TableState as RatatuiTableState;

use crate::auth::Identity;
use crate::editor::Form;
use crate::inventory::Inventory;
use crate::model::Record;
use crate::prefs::ThemeMode;
use crate::view::{CategoryFilter, Stats, category_set, filter_records};

/// Input mode. Form input is modal through `AppState::form` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Incremental search editing (`/`).
    Search,
}

/// Active popup. Only one popup can be open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Popup {
    #[default]
    None,
    /// Keybinding help with scroll offset.
    Help { scroll: usize },
    QuitConfirm,
    /// Delete confirmation for one record. The delete request is only
    /// sent after explicit confirmation.
    DeleteConfirm { id: String, name: String },
}

/// Inline, dismissible status message. Expires after `ttl` ticks or on
/// Esc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub ttl: u8,
}

/// Cached derived view. Recomputed only when the inventory revision or
/// the filter inputs change — the explicit subscription that replaces
/// implicit re-render-on-state-change.
#[derive(Debug, Default)]
pub struct ViewCache {
    key: Option<(u64, String, CategoryFilter)>,
    /// Distinct categories, sorted ascending.
    pub categories: Vec<String>,
    /// Indices into the inventory's record slice, filtered.
    pub filtered: Vec<usize>,
    /// Statistics over the full record set.
    pub stats: Stats,
}

impl ViewCache {
    /// Recomputes the projections when any input changed.
    pub fn ensure(&mut self, inventory: &Inventory, query: &str, filter: &CategoryFilter) {
        let key = (inventory.revision(), query.to_string(), filter.clone());
        if self.key.as_ref() == Some(&key) {
            return;
        }
        let records = inventory.records();
        self.categories = category_set(records);
        self.filtered = filter_records(records, query, filter);
        self.stats = Stats::compute(records);
        self.key = Some(key);
    }
}

/// Main application state. Touched only from the UI thread.
#[derive(Debug)]
pub struct AppState {
    pub inventory: Inventory,
    /// Resolved identity; `None` before resolution or after sign-out.
    pub identity: Option<Identity>,
    /// True until the first identity reply arrives.
    pub resolving_identity: bool,
    pub signed_out: bool,
    pub input_mode: InputMode,
    /// Live search text; applied incrementally while typing.
    pub search_input: String,
    pub category_filter: CategoryFilter,
    /// The single form slot (creator or editor). `None` means Viewing.
    pub form: Option<Form>,
    pub popup: Popup,
    /// Selected row index within the filtered view.
    pub selected: usize,
    pub theme: ThemeMode,
    pub status: Option<StatusMessage>,
    pub view: ViewCache,
    /// Ratatui table state (enables auto-scrolling to the selection).
    pub table_state: RatatuiTableState,
}

impl AppState {
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            inventory: Inventory::new(),
            identity: None,
            resolving_identity: true,
            signed_out: false,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            category_filter: CategoryFilter::All,
            form: None,
            popup: Popup::None,
            selected: 0,
            theme,
            status: None,
            view: ViewCache::default(),
            table_state: RatatuiTableState::default(),
        }
    }

    /// Brings the derived view up to date and clamps the selection to the
    /// filtered length. Called once per event-loop iteration.
    pub fn refresh_view(&mut self) {
        self.view
            .ensure(&self.inventory, &self.search_input, &self.category_filter);
        let len = self.view.filtered.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// The record currently selected in the filtered view.
    pub fn selected_record(&self) -> Option<&Record> {
        let index = *self.view.filtered.get(self.selected)?;
        self.inventory.records().get(index)
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        let len = self.view.filtered.len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn page_down(&mut self, n: usize) {
        let len = self.view.filtered.len();
        if len > 0 {
            self.selected = (self.selected + n).min(len - 1);
        }
    }

    pub fn select_home(&mut self) {
        self.selected = 0;
    }

    pub fn select_end(&mut self) {
        let len = self.view.filtered.len();
        if len > 0 {
            self.selected = len - 1;
        }
    }

    /// Cycles the category selector: All, then each known category in
    /// sorted order, then back to All. A vanished category resets to All.
    pub fn cycle_category(&mut self) {
        let categories = &self.view.categories;
        self.category_filter = match &self.category_filter {
            CategoryFilter::All => match categories.first() {
                Some(first) => CategoryFilter::Is(first.clone()),
                None => CategoryFilter::All,
            },
            CategoryFilter::Is(current) => {
                match categories.iter().position(|c| c == current) {
                    Some(i) if i + 1 < categories.len() => {
                        CategoryFilter::Is(categories[i + 1].clone())
                    }
                    _ => CategoryFilter::All,
                }
            }
        };
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
            // Roughly 8 seconds at the 2s tick rate; errors stay longer.
            ttl: if is_error { 8 } else { 4 },
        });
    }

    pub fn dismiss_status(&mut self) {
        self.status = None;
    }

    /// Timer tick: expires the status message.
    pub fn tick(&mut self) {
        if let Some(status) = &mut self.status {
            status.ttl = status.ttl.saturating_sub(1);
            if status.ttl == 0 {
                self.status = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, category: Option<&str>) -> Record {
        Record {
            id: id.to_string(),
            owner: "alice".to_string(),
            name: name.to_string(),
            brewery: None,
            category: category.map(|c| c.to_string()),
            abv: None,
            ibu: None,
            notes: None,
            created_at: 0,
        }
    }

    fn state_with(records: Vec<Record>) -> AppState {
        let mut state = AppState::new(ThemeMode::Dark);
        state.inventory.apply_fetch(Ok(records));
        state.refresh_view();
        state
    }

    #[test]
    fn test_view_cache_recomputes_only_on_input_change() {
        let mut state = state_with(vec![record("1", "Pale Ale", Some("IPA"))]);
        let key_before = state.view.filtered.clone();
        // Same inputs: ensure is a no-op.
        state.refresh_view();
        assert_eq!(state.view.filtered, key_before);

        // New revision invalidates the cache.
        state.inventory.apply_fetch(Ok(vec![]));
        state.refresh_view();
        assert!(state.view.filtered.is_empty());
    }

    #[test]
    fn test_selection_clamps_when_filter_shrinks() {
        let mut state = state_with(vec![
            record("1", "Pale Ale", Some("IPA")),
            record("2", "Stout Night", Some("Stout")),
        ]);
        state.selected = 1;
        state.search_input = "pale".to_string();
        state.refresh_view();
        assert_eq!(state.view.filtered.len(), 1);
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_record().unwrap().id, "1");
    }

    #[test]
    fn test_cycle_category_walks_set_and_wraps() {
        let mut state = state_with(vec![
            record("1", "a", Some("Stout")),
            record("2", "b", Some("IPA")),
        ]);
        assert_eq!(state.category_filter, CategoryFilter::All);
        state.cycle_category();
        assert_eq!(state.category_filter, CategoryFilter::Is("IPA".to_string()));
        state.cycle_category();
        assert_eq!(
            state.category_filter,
            CategoryFilter::Is("Stout".to_string())
        );
        state.cycle_category();
        assert_eq!(state.category_filter, CategoryFilter::All);
    }

    #[test]
    fn test_cycle_category_with_empty_set_stays_all() {
        let mut state = state_with(vec![record("1", "a", None)]);
        state.cycle_category();
        assert_eq!(state.category_filter, CategoryFilter::All);
    }

    #[test]
    fn test_status_expires_after_ttl_ticks() {
        let mut state = state_with(vec![]);
        state.set_status("Saved", false);
        for _ in 0..4 {
            assert!(state.status.is_some());
            state.tick();
        }
        assert!(state.status.is_none());
    }

    #[test]
    fn test_navigation_bounds() {
        let mut state = state_with(vec![
            record("1", "a", None),
            record("2", "b", None),
            record("3", "c", None),
        ]);
        state.select_up();
        assert_eq!(state.selected, 0);
        state.select_down();
        state.select_down();
        state.select_down();
        assert_eq!(state.selected, 2);
        state.select_home();
        assert_eq!(state.selected, 0);
        state.select_end();
        assert_eq!(state.selected, 2);
        state.page_up(10);
        assert_eq!(state.selected, 0);
        state.page_down(10);
        assert_eq!(state.selected, 2);
    }
}

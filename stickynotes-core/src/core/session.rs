//! The application session: store, open note windows and the preview grid.

use crate::core::reconcile::{plan, ReconcilePlan};
use crate::{
    AppConfig, Debouncer, GridState, LiveNote, NoteButton, NoteColor, NoteEvents, NoteRecord,
    NoteStore, NoteWindow, PreviewGrid, Result, StickyNotesError, WindowHost,
};
use indexmap::IndexMap;
use std::time::Instant;

/// A running Sticky Notes session.
///
/// `StickyNotes` owns the [`NoteStore`] and is the only thing that mutates
/// it. It keeps three collections consistent: persisted records, open note
/// windows (through the toolkit's [`WindowHost`]) and the main window's
/// [`PreviewGrid`].
///
/// All methods run on the UI thread. Autosave is driven by the host calling
/// [`poll_autosave`](Self::poll_autosave) once
/// [`next_autosave_deadline`](Self::next_autosave_deadline) has passed.
pub struct StickyNotes<H: WindowHost> {
    config: AppConfig,
    store: NoteStore,
    host: H,
    notes: IndexMap<String, LiveNote<H::Window>>,
    grid: PreviewGrid,
    autosave: Debouncer,
}

impl<H: WindowHost> StickyNotes<H> {
    /// Creates a session over an already opened store.
    pub fn new(store: NoteStore, host: H, config: AppConfig) -> Self {
        let autosave = Debouncer::new(config.autosave_delay);
        Self {
            config,
            store,
            host,
            notes: IndexMap::new(),
            grid: PreviewGrid::new(),
            autosave,
        }
    }

    /// Opens the store at `config.data_file` and creates a session over it.
    pub fn open(config: AppConfig, host: H) -> Self {
        let store = NoteStore::open(&config.data_file);
        Self::new(store, host, config)
    }

    /// Brings the application on screen.
    ///
    /// With an empty store a single fresh note is created. Otherwise every
    /// stored note without an open window is restored. The main window is
    /// presented and its grid rebuilt before the restored notes are shown.
    ///
    /// Returns the ids of the notes that were created or restored.
    pub fn activate(&mut self) -> Vec<String> {
        self.log_state();

        if self.store.is_empty() {
            log::info!("no stored notes, creating a new one");
            let id = self.create_new_note();
            self.host.present_main_window();
            self.load_notes();
            return vec![id];
        }

        let pending: Vec<NoteRecord> = self
            .store
            .notes()
            .values()
            .filter(|record| !self.notes.contains_key(&record.id))
            .cloned()
            .collect();
        log::info!("restoring {} notes", pending.len());

        for record in &pending {
            self.restore_note(record, false);
        }

        self.host.present_main_window();
        self.load_notes();

        let restored: Vec<String> = pending.into_iter().map(|r| r.id).collect();
        for id in &restored {
            if let Some(note) = self.notes.get_mut(id) {
                note.window_mut().present();
            }
        }
        restored
    }

    /// Opens a new empty note at the default position, persists it and
    /// presents its window. Returns the new note's id.
    pub fn create_new_note(&mut self) -> String {
        let mut record = NoteRecord::new(self.config.default_position);
        record.touch();
        let id = record.id.clone();

        let window = self.host.open_note_window(&record);
        let mut note = LiveNote::new(&record, window);
        note.window_mut().present();
        self.notes.insert(id.clone(), note);

        self.grid.upsert(&record);
        self.store.upsert(record);
        log::info!("created note {id}");
        id
    }

    /// Ensures a window exists for `record`, presenting it when `visible`.
    ///
    /// An already open window is reused and keeps its live content. Returns
    /// whether a new window was created. Nothing is written to the store.
    pub fn restore_note(&mut self, record: &NoteRecord, visible: bool) -> bool {
        if let Some(note) = self.notes.get_mut(&record.id) {
            if visible {
                note.window_mut().present();
            }
            return false;
        }

        log::debug!("restoring note {} (visible: {visible})", record.id);
        let window = self.host.open_note_window(record);
        let mut note = LiveNote::new(record, window);
        if visible {
            note.window_mut().present();
        }
        self.notes.insert(record.id.clone(), note);
        self.grid.upsert(record);
        true
    }

    /// Persists the live state of note `id` and refreshes its card.
    ///
    /// # Errors
    ///
    /// Returns [`StickyNotesError::NoteNotFound`] if no window is open for `id`.
    pub fn save_note(&mut self, id: &str) -> Result<NoteRecord> {
        let record = self.live_mut(id)?.snapshot_for_save();
        self.grid.upsert(&record);
        self.store.upsert(record.clone());
        Ok(record)
    }

    /// Deletes note `id` and closes its window.
    ///
    /// Any pending autosave is cancelled so the record cannot be written
    /// back after removal.
    ///
    /// # Errors
    ///
    /// Returns [`StickyNotesError::NoteNotFound`] if no window is open for `id`.
    pub fn close_note(&mut self, id: &str) -> Result<()> {
        let note = self
            .notes
            .shift_remove(id)
            .ok_or_else(|| StickyNotesError::NoteNotFound(id.to_string()))?;
        self.autosave.cancel(id);
        self.store.remove(id);
        self.grid.remove(id);
        note.close();
        log::info!("closed note {id}");
        Ok(())
    }

    /// Recolours note `id` from a colour-menu value and saves it.
    ///
    /// Values outside the palette fall back to yellow.
    ///
    /// # Errors
    ///
    /// Returns [`StickyNotesError::NoteNotFound`] if no window is open for `id`.
    pub fn set_color(&mut self, id: &str, value: &str) -> Result<NoteColor> {
        let color = NoteColor::from_menu_value(value);
        self.live_mut(id)?.set_color(color);
        self.save_note(id)?;
        Ok(color)
    }

    /// Presents the window behind a clicked preview card.
    ///
    /// # Errors
    ///
    /// Returns [`StickyNotesError::NoteNotFound`] if no window is open for `id`.
    pub fn activate_preview(&mut self, id: &str) -> Result<()> {
        self.live_mut(id)?.window_mut().present();
        Ok(())
    }

    /// Saves every note whose autosave delay has elapsed by `now`.
    ///
    /// Returns the ids that were saved.
    pub fn poll_autosave(&mut self, now: Instant) -> Vec<String> {
        let mut saved = Vec::new();
        for id in self.autosave.take_due(now) {
            match self.save_note(&id) {
                Ok(_) => saved.push(id),
                Err(e) => log::warn!("autosave skipped: {e}"),
            }
        }
        saved
    }

    /// When the host should next call [`poll_autosave`](Self::poll_autosave).
    pub fn next_autosave_deadline(&self) -> Option<Instant> {
        self.autosave.next_deadline()
    }

    /// Filters the grid to notes whose content contains `query`, ignoring case.
    ///
    /// Cards of open notes are refreshed first so unsaved edits are searchable.
    pub fn set_search_query(&mut self, query: &str) {
        self.refresh_live_cards();
        self.grid.set_query(query);
    }

    pub fn search_query(&self) -> &str {
        self.grid.query()
    }

    /// Hides the main window if it is showing; otherwise brings the grid up
    /// to date and presents it.
    pub fn toggle_main_window(&mut self) {
        if self.host.is_main_window_visible() {
            self.host.hide_main_window();
        } else {
            self.update_notes_grid();
            self.host.present_main_window();
        }
    }

    /// Rebuilds the grid from scratch.
    pub fn load_notes(&mut self) -> ReconcilePlan {
        self.grid.clear();
        self.reconcile()
    }

    /// Brings the existing grid in line with open windows and the store.
    pub fn update_notes_grid(&mut self) -> ReconcilePlan {
        self.reconcile()
    }

    fn reconcile(&mut self) -> ReconcilePlan {
        let plan = plan(
            self.notes.keys().map(String::as_str),
            self.store.ids(),
            self.grid.ids(),
        );

        for id in &plan.drop {
            self.grid.remove(id);
            log::debug!("dropped card for vanished note {id}");
        }

        self.refresh_live_cards();

        for id in &plan.restore {
            if let Some(record) = self.store.get(id).cloned() {
                self.restore_note(&record, false);
            }
        }

        log::debug!(
            "reconciled grid: {} live, {} restored, {} dropped, {} cards",
            plan.refresh.len(),
            plan.restore.len(),
            plan.drop.len(),
            self.grid.len()
        );
        plan
    }

    fn refresh_live_cards(&mut self) {
        for note in self.notes.values() {
            self.grid.upsert(&note.snapshot());
        }
    }

    pub fn grid_state(&self) -> GridState {
        self.grid.state()
    }

    pub fn grid(&self) -> &PreviewGrid {
        &self.grid
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn live_ids(&self) -> impl Iterator<Item = &str> {
        self.notes.keys().map(String::as_str)
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.notes.contains_key(id)
    }

    pub fn window(&self, id: &str) -> Option<&H::Window> {
        self.notes.get(id).map(LiveNote::window)
    }

    pub fn window_mut(&mut self, id: &str) -> Option<&mut H::Window> {
        self.notes.get_mut(id).map(LiveNote::window_mut)
    }

    fn live(&self, id: &str) -> Result<&LiveNote<H::Window>> {
        self.notes
            .get(id)
            .ok_or_else(|| StickyNotesError::NoteNotFound(id.to_string()))
    }

    fn live_mut(&mut self, id: &str) -> Result<&mut LiveNote<H::Window>> {
        self.notes
            .get_mut(id)
            .ok_or_else(|| StickyNotesError::NoteNotFound(id.to_string()))
    }

    fn log_state(&self) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        log::debug!("stored notes: {}", self.store.len());
        for record in self.store.notes().values() {
            let head: String = record.content.chars().take(30).collect();
            log::debug!("  stored {}: {head:?}", record.id);
        }
        log::debug!("open notes: {}", self.notes.len());
        for note in self.notes.values() {
            let head: String = note.window().text().chars().take(30).collect();
            log::debug!("  open {}: {head:?}", note.id());
        }
    }
}

impl<H: WindowHost> NoteEvents for StickyNotes<H> {
    fn on_text_changed(&mut self, id: &str, now: Instant) -> Result<()> {
        self.live(id)?;
        self.autosave.schedule(id, now);
        Ok(())
    }

    fn on_drag_begin(&mut self, id: &str) -> Result<()> {
        self.live_mut(id)?.begin_drag();
        Ok(())
    }

    fn on_drag_update(&mut self, id: &str, offset_x: f64, offset_y: f64) -> Result<()> {
        self.live_mut(id)?.update_drag(offset_x, offset_y);
        Ok(())
    }

    fn on_drag_end(&mut self, id: &str) -> Result<()> {
        self.live_mut(id)?.end_drag();
        self.save_note(id)?;
        Ok(())
    }

    fn on_clicked(&mut self, id: &str, button: NoteButton) -> Result<()> {
        match button {
            NoteButton::Close => self.close_note(id),
            NoteButton::NewNote => {
                self.create_new_note();
                Ok(())
            }
            NoteButton::Color(value) => self.set_color(id, &value).map(|_| ()),
        }
    }
}

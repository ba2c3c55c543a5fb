use crate::annotation::{Annotation, AnnotationId, AnnotationType};
use crate::config::Config;
use crate::document::DocumentModel;
use crate::error::{AppError, AppResult};
use crate::history::NavigationHistory;
use crate::notify::{NoopDelegate, Notification, NotificationCenter, SubscriptionId, ViewerDelegate};
use crate::pacer::PacerTimer;
use crate::reading_bar::{ReadingBarChange, ReadingBarModel};

use super::flags::{SharedUiFlags, UiFlagsSnapshot};
use super::mode::{EditStateKind, InteractionMode, TemporaryToolMode, ToolMode};
use super::pointer::Gesture;
use super::selection::SelectionRect;
use super::view::ViewState;

/// Tool-mode state machine of the page view.
///
/// Every operation runs on the event thread and takes the document it acts on
/// as an argument; the controller itself never owns notes. Operations return
/// `CommandOutcome::Noop` when nothing changed and an `AppError` when the
/// request referenced a page or note it may not touch, leaving state as it was.
pub struct PageInteractionController {
    pub(crate) config: Config,
    pub(crate) tool_mode: ToolMode,
    pub(crate) temporary_mode: TemporaryToolMode,
    pub(crate) annotation_mode: AnnotationType,
    pub(crate) interaction_mode: InteractionMode,
    pub(crate) current: Option<AnnotationId>,
    pub(crate) editing: Option<AnnotationId>,
    pub(crate) selection: Option<SelectionRect>,
    pub(crate) gesture: Gesture,
    pub(crate) reading_bar: ReadingBarModel,
    pub(crate) pacer: PacerTimer,
    pub(crate) history: NavigationHistory,
    pub(crate) view: ViewState,
    pub(crate) hide_notes: bool,
    pub(crate) notifications: NotificationCenter,
    pub(crate) delegate: Box<dyn ViewerDelegate>,
    pub(crate) flags: SharedUiFlags,
}

impl std::fmt::Debug for PageInteractionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageInteractionController")
            .field("tool_mode", &self.tool_mode)
            .field("temporary_mode", &self.temporary_mode)
            .field("annotation_mode", &self.annotation_mode)
            .field("interaction_mode", &self.interaction_mode)
            .field("current", &self.current)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}

impl PageInteractionController {
    pub fn new(config: Config) -> Self {
        let config = config.sanitized();
        Self {
            tool_mode: ToolMode::default(),
            temporary_mode: TemporaryToolMode::None,
            annotation_mode: AnnotationType::FreeText,
            interaction_mode: InteractionMode::Normal,
            current: None,
            editing: None,
            selection: None,
            gesture: Gesture::Idle,
            reading_bar: ReadingBarModel::new(config.reading_bar.lines),
            pacer: PacerTimer::new(&config.pacer),
            history: NavigationHistory::with_capacity(config.history.capacity),
            view: ViewState::new(&config.view),
            hide_notes: false,
            notifications: NotificationCenter::new(),
            delegate: Box::new(NoopDelegate),
            flags: SharedUiFlags::default(),
            config,
        }
    }

    pub fn with_delegate(mut self, delegate: Box<dyn ViewerDelegate>) -> Self {
        self.delegate = delegate;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tool_mode(&self) -> ToolMode {
        self.tool_mode
    }

    pub fn temporary_mode(&self) -> TemporaryToolMode {
        self.temporary_mode
    }

    pub fn annotation_mode(&self) -> AnnotationType {
        self.annotation_mode
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction_mode
    }

    pub fn current_annotation(&self) -> Option<AnnotationId> {
        self.current
    }

    pub fn editing_annotation(&self) -> Option<AnnotationId> {
        self.editing
    }

    pub fn selection(&self) -> Option<SelectionRect> {
        self.selection
    }

    pub fn edit_state(&self) -> EditStateKind {
        match self.gesture {
            Gesture::Creating { .. } => EditStateKind::Creating,
            Gesture::Resizing { .. } => EditStateKind::Resizing,
            Gesture::Moving { .. } => EditStateKind::Moving,
            _ if self.editing.is_some() => EditStateKind::EditingText,
            _ => EditStateKind::None,
        }
    }

    /// Annotation being created, resized or moved, with its working geometry.
    pub fn pending_annotation(&self) -> Option<&Annotation> {
        match &self.gesture {
            Gesture::Creating { draft, .. } => Some(draft),
            Gesture::Resizing { working, .. } | Gesture::Moving { working, .. } => Some(working),
            _ => None,
        }
    }

    pub fn reading_bar(&self) -> &ReadingBarModel {
        &self.reading_bar
    }

    pub fn pacer(&self) -> &PacerTimer {
        &self.pacer
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn hides_notes(&self) -> bool {
        self.hide_notes
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&Notification) + 'static) -> SubscriptionId {
        self.notifications.subscribe(callback)
    }

    pub fn subscribe_channel(&mut self) -> (SubscriptionId, flume::Receiver<Notification>) {
        self.notifications.subscribe_channel()
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifications.unsubscribe(id)
    }

    /// Handle readable from any thread.
    pub fn shared_flags(&self) -> SharedUiFlags {
        self.flags.clone()
    }

    pub fn ui_flags(&self) -> UiFlagsSnapshot {
        self.flags.snapshot()
    }

    pub fn set_key_window(&mut self, in_key_window: bool) -> bool {
        self.flags.set_in_key_window(in_key_window)
    }

    pub(crate) fn post(&mut self, notification: Notification) {
        self.notifications.post(notification);
    }

    pub(crate) fn post_reading_bar(&mut self, change: Option<ReadingBarChange>) -> bool {
        match change {
            Some(ReadingBarChange { old, new }) => {
                self.post(Notification::ReadingBarChanged { old, new });
                true
            }
            None => false,
        }
    }

    /// The current annotation if it lives on `page`.
    pub(crate) fn current_annotation_on<'d>(
        &self,
        doc: &'d dyn DocumentModel,
        page: usize,
    ) -> Option<&'d Annotation> {
        let id = self.current?;
        doc.note(id).filter(|note| note.page == page)
    }

    /// Looks up `id`, rejecting notes that are not on the displayed page.
    pub(crate) fn displayed_note(
        &self,
        doc: &dyn DocumentModel,
        id: AnnotationId,
    ) -> AppResult<Annotation> {
        let note = doc.note(id).ok_or(AppError::UnknownAnnotation(id))?;
        let displayed = doc.current_page();
        if note.page != displayed {
            return Err(AppError::NotOnDisplayedPage {
                id,
                page: displayed,
            });
        }
        Ok(note.clone())
    }

    pub(crate) fn set_current(&mut self, id: Option<AnnotationId>) -> bool {
        if self.current == id {
            return false;
        }
        if let Some(editing) = self.editing
            && Some(editing) != id
        {
            self.editing = None;
            self.delegate.did_end_editing(editing);
        }
        let old = self.current;
        self.current = id;
        self.post(Notification::CurrentAnnotationChanged { old, new: id });
        true
    }

    pub(crate) fn set_selection(&mut self, selection: Option<SelectionRect>, page: usize) -> bool {
        if self.selection == selection {
            return false;
        }
        self.selection = selection;
        self.post(Notification::SelectionChanged { selection, page });
        true
    }

    pub(crate) fn clear_selection(&mut self) -> bool {
        match self.selection {
            Some(selection) => self.set_selection(None, selection.page()),
            None => false,
        }
    }

    /// Drops the in-progress gesture without touching the document.
    pub(crate) fn cancel_gesture(&mut self) -> bool {
        let had_gesture = !matches!(self.gesture, Gesture::Idle);
        if had_gesture {
            log::debug!("canceling gesture {:?}", self.gesture);
        }
        self.gesture = Gesture::Idle;
        had_gesture
    }
}

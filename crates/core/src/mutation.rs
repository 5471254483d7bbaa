//! Create / edit / delete dialog state for one panel.
//!
//! Each operation has its own in-flight guard. `begin_*` hands out the
//! payload to send (or `None` if that operation is already running) and the
//! matching `finish_*` applies the outcome. On success the dialog closes and
//! the caller is told how to re-fetch the list; on failure the dialog stays
//! open with the message and the list is left alone.

use crate::resource::MutableResource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal<Id> {
    Closed,
    Create,
    Edit(Id),
}

/// How the list should be re-fetched after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refetch {
    /// New rows go back to page 1, filters kept.
    FirstPage,
    CurrentPage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Succeeded(Refetch),
    Failed(String),
}

pub struct MutationFlow<R: MutableResource> {
    modal: Modal<R::Id>,
    create_form: R::Create,
    edit_form: Option<R::Update>,
    pending_delete: Option<R::Id>,
    create_in_flight: bool,
    update_in_flight: bool,
    delete_in_flight: bool,
    create_error: Option<String>,
    update_error: Option<String>,
    delete_error: Option<String>,
}

impl<R: MutableResource> Default for MutationFlow<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: MutableResource> MutationFlow<R> {
    pub fn new() -> Self {
        Self {
            modal: Modal::Closed,
            create_form: R::Create::default(),
            edit_form: None,
            pending_delete: None,
            create_in_flight: false,
            update_in_flight: false,
            delete_in_flight: false,
            create_error: None,
            update_error: None,
            delete_error: None,
        }
    }

    pub fn modal(&self) -> &Modal<R::Id> {
        &self.modal
    }

    pub fn create_form(&self) -> &R::Create {
        &self.create_form
    }

    pub fn create_form_mut(&mut self) -> &mut R::Create {
        &mut self.create_form
    }

    pub fn edit_form(&self) -> Option<&R::Update> {
        self.edit_form.as_ref()
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut R::Update> {
        self.edit_form.as_mut()
    }

    pub fn pending_delete(&self) -> Option<&R::Id> {
        self.pending_delete.as_ref()
    }

    pub fn create_error(&self) -> Option<&str> {
        self.create_error.as_deref()
    }

    pub fn update_error(&self) -> Option<&str> {
        self.update_error.as_deref()
    }

    pub fn delete_error(&self) -> Option<&str> {
        self.delete_error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.create_in_flight || self.update_in_flight || self.delete_in_flight
    }

    // -- create -------------------------------------------------------------

    pub fn open_create(&mut self) {
        self.modal = Modal::Create;
        self.create_error = None;
    }

    pub fn begin_create(&mut self) -> Option<R::Create> {
        if self.create_in_flight {
            return None;
        }
        self.create_in_flight = true;
        self.create_error = None;
        Some(self.create_form.clone())
    }

    pub fn finish_create(&mut self, result: Result<(), String>) -> MutationOutcome {
        self.create_in_flight = false;
        match result {
            Ok(()) => {
                self.create_form = R::Create::default();
                self.close_if(|m| matches!(m, Modal::Create));
                MutationOutcome::Succeeded(Refetch::FirstPage)
            }
            Err(message) => {
                self.create_error = Some(message.clone());
                MutationOutcome::Failed(message)
            }
        }
    }

    // -- update -------------------------------------------------------------

    pub fn open_edit(&mut self, id: R::Id, form: R::Update) {
        self.modal = Modal::Edit(id);
        self.edit_form = Some(form);
        self.update_error = None;
    }

    /// The id being edited and its form, unless an update is already running
    /// or no edit dialog is open.
    pub fn begin_update(&mut self) -> Option<(R::Id, R::Update)> {
        if self.update_in_flight {
            return None;
        }
        let Modal::Edit(id) = &self.modal else {
            return None;
        };
        let form = self.edit_form.clone()?;
        let id = id.clone();
        self.update_in_flight = true;
        self.update_error = None;
        Some((id, form))
    }

    pub fn finish_update(&mut self, result: Result<(), String>) -> MutationOutcome {
        self.update_in_flight = false;
        match result {
            Ok(()) => {
                self.edit_form = None;
                self.close_if(|m| matches!(m, Modal::Edit(_)));
                MutationOutcome::Succeeded(Refetch::CurrentPage)
            }
            Err(message) => {
                self.update_error = Some(message.clone());
                MutationOutcome::Failed(message)
            }
        }
    }

    /// Dismiss whichever dialog is open. The create form keeps its contents.
    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.edit_form = None;
        self.create_error = None;
        self.update_error = None;
    }

    // -- delete -------------------------------------------------------------

    /// Ask for confirmation before deleting `id`. Replaces any earlier
    /// pending delete; refused while a delete is running.
    pub fn request_delete(&mut self, id: R::Id) -> bool {
        if self.delete_in_flight {
            return false;
        }
        self.pending_delete = Some(id);
        self.delete_error = None;
        true
    }

    pub fn cancel_delete(&mut self) {
        if self.delete_in_flight {
            return;
        }
        self.pending_delete = None;
        self.delete_error = None;
    }

    /// The id to delete, once. `None` if nothing is pending or the delete
    /// is already running.
    pub fn confirm_delete(&mut self) -> Option<R::Id> {
        if self.delete_in_flight {
            return None;
        }
        let id = self.pending_delete.clone()?;
        self.delete_in_flight = true;
        self.delete_error = None;
        Some(id)
    }

    /// On failure the confirmation stays open with the message.
    pub fn finish_delete(&mut self, result: Result<(), String>) -> MutationOutcome {
        self.delete_in_flight = false;
        match result {
            Ok(()) => {
                self.pending_delete = None;
                MutationOutcome::Succeeded(Refetch::CurrentPage)
            }
            Err(message) => {
                self.delete_error = Some(message.clone());
                MutationOutcome::Failed(message)
            }
        }
    }

    /// Release every in-flight guard without recording an error. Used when
    /// the session ends mid-operation.
    pub fn abort_in_flight(&mut self) {
        self.create_in_flight = false;
        self.update_in_flight = false;
        self.delete_in_flight = false;
    }

    fn close_if(&mut self, pred: impl FnOnce(&Modal<R::Id>) -> bool) {
        if pred(&self.modal) {
            self.modal = Modal::Closed;
        }
    }
}

//! List panels: a [`ListController`] and a [`MutationFlow`] driven by a
//! [`ResourceClient`].
//!
//! State lives behind short-lived `std::sync::Mutex` locks that are never
//! held across an await, so several fetches may be in flight at once; the
//! controller's generation check decides which result lands.

use std::sync::{Mutex, MutexGuard};

use backoffice_core::filters::FilterSet;
use backoffice_core::list_controller::{Completion, FetchRequest, ListController};
use backoffice_core::mutation::{Modal, MutationFlow, MutationOutcome, Refetch};
use backoffice_core::resource::{MutableResource, Resource};

use crate::error::ClientError;
use crate::resource_client::ResourceClient;

/// How a fetch ended from the panel's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result (success or error) is now the panel state.
    Applied,
    /// A newer fetch superseded this one.
    Stale,
    /// The session ended; the panel was left as it was.
    SessionExpired,
}

pub struct ListPanel<R: Resource> {
    client: ResourceClient<R>,
    state: Mutex<ListController<R>>,
}

impl<R: Resource> ListPanel<R> {
    pub fn new(client: ResourceClient<R>) -> Self {
        Self {
            client,
            state: Mutex::new(ListController::new()),
        }
    }

    pub fn client(&self) -> &ResourceClient<R> {
        &self.client
    }

    /// Read the current list state.
    pub fn view<T>(&self, f: impl FnOnce(&ListController<R>) -> T) -> T {
        f(&*self.lock())
    }

    pub async fn load(&self) -> Result<FetchOutcome, ClientError> {
        let request = self.lock().refresh()?;
        Ok(self.run(request).await)
    }

    pub async fn set_filter(&self, name: &str, value: &str) -> Result<FetchOutcome, ClientError> {
        let request = self.lock().set_filter(name, value)?;
        Ok(self.run(request).await)
    }

    pub async fn apply_filters(&self, filters: FilterSet) -> Result<FetchOutcome, ClientError> {
        let request = self.lock().apply_filters(filters)?;
        Ok(self.run(request).await)
    }

    pub async fn clear_filters(&self) -> Result<FetchOutcome, ClientError> {
        let request = self.lock().clear_filters()?;
        Ok(self.run(request).await)
    }

    pub async fn set_page(&self, page: u32) -> Result<FetchOutcome, ClientError> {
        let request = self.lock().set_page(page)?;
        Ok(self.run(request).await)
    }

    pub async fn set_page_size(&self, page_size: u32) -> Result<FetchOutcome, ClientError> {
        let request = self.lock().set_page_size(page_size)?;
        Ok(self.run(request).await)
    }

    /// `None` when already on the last page.
    pub async fn next_page(&self) -> Option<FetchOutcome> {
        let request = self.lock().next_page()?;
        Some(self.run(request).await)
    }

    pub async fn previous_page(&self) -> Option<FetchOutcome> {
        let request = self.lock().previous_page()?;
        Some(self.run(request).await)
    }

    async fn run(&self, request: FetchRequest) -> FetchOutcome {
        let result = self.client.list(&request.filters, request.page).await;

        let mut state = self.lock();
        match result {
            Err(ClientError::SessionExpired) => {
                state.abandon(request.generation);
                FetchOutcome::SessionExpired
            }
            other => {
                let completion = state.complete(request.generation, other.map_err(|e| e.to_string()));
                match completion {
                    Completion::Applied => FetchOutcome::Applied,
                    Completion::Stale => FetchOutcome::Stale,
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListController<R>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Result of a submit/confirm in a [`CrudPanel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved and the list re-fetched.
    Completed,
    /// Rejected; the message is shown in the open dialog.
    Failed(String),
    /// The same operation is already running.
    Busy,
    /// No dialog open or no delete pending.
    NothingToSubmit,
    SessionExpired,
}

pub struct CrudPanel<R: MutableResource> {
    list: ListPanel<R>,
    flow: Mutex<MutationFlow<R>>,
}

impl<R: MutableResource> CrudPanel<R> {
    pub fn new(client: ResourceClient<R>) -> Self {
        Self {
            list: ListPanel::new(client),
            flow: Mutex::new(MutationFlow::new()),
        }
    }

    pub fn list(&self) -> &ListPanel<R> {
        &self.list
    }

    /// Read the dialog state.
    pub fn dialogs<T>(&self, f: impl FnOnce(&MutationFlow<R>) -> T) -> T {
        f(&*self.lock_flow())
    }

    // -- create -------------------------------------------------------------

    pub fn open_create(&self) {
        self.lock_flow().open_create();
    }

    pub fn edit_create_form(&self, f: impl FnOnce(&mut R::Create)) {
        f(self.lock_flow().create_form_mut());
    }

    pub async fn submit_create(&self) -> SubmitOutcome {
        let begun = {
            let mut flow = self.lock_flow();
            if !matches!(flow.modal(), Modal::Create) {
                return SubmitOutcome::NothingToSubmit;
            }
            flow.begin_create()
        };
        let Some(payload) = begun else {
            return SubmitOutcome::Busy;
        };
        let result = self.list.client().create(&payload).await.map(|_| ());
        let outcome = self.settle(result, |flow, r| flow.finish_create(r));
        self.after(outcome).await
    }

    // -- update -------------------------------------------------------------

    pub fn open_edit(&self, id: R::Id, form: R::Update) {
        self.lock_flow().open_edit(id, form);
    }

    pub fn edit_update_form(&self, f: impl FnOnce(&mut R::Update)) {
        if let Some(form) = self.lock_flow().edit_form_mut() {
            f(form);
        }
    }

    pub async fn submit_update(&self) -> SubmitOutcome {
        let begun = {
            let mut flow = self.lock_flow();
            if !matches!(flow.modal(), Modal::Edit(_)) {
                return SubmitOutcome::NothingToSubmit;
            }
            flow.begin_update()
        };
        let Some((id, payload)) = begun else {
            return SubmitOutcome::Busy;
        };
        let result = self.list.client().update(&id, &payload).await.map(|_| ());
        let outcome = self.settle(result, |flow, r| flow.finish_update(r));
        self.after(outcome).await
    }

    pub fn close_modal(&self) {
        self.lock_flow().close_modal();
    }

    // -- delete -------------------------------------------------------------

    pub fn request_delete(&self, id: R::Id) -> bool {
        self.lock_flow().request_delete(id)
    }

    /// Ask to delete a row as listed.
    pub fn request_delete_item(&self, item: &R::Item) -> bool {
        self.request_delete(R::id_of(item))
    }

    pub fn cancel_delete(&self) {
        self.lock_flow().cancel_delete();
    }

    /// Perform the pending delete with exactly one call.
    pub async fn confirm_delete(&self) -> SubmitOutcome {
        let begun = {
            let mut flow = self.lock_flow();
            if flow.pending_delete().is_none() {
                return SubmitOutcome::NothingToSubmit;
            }
            flow.confirm_delete()
        };
        let Some(id) = begun else {
            return SubmitOutcome::Busy;
        };
        let result = self.list.client().delete(&id).await;
        let outcome = self.settle(result, |flow, r| flow.finish_delete(r));
        self.after(outcome).await
    }

    // -- internals ----------------------------------------------------------

    /// Feed a client result into the flow. Session expiry releases the
    /// guards without an inline error.
    fn settle(
        &self,
        result: Result<(), ClientError>,
        finish: impl FnOnce(&mut MutationFlow<R>, Result<(), String>) -> MutationOutcome,
    ) -> Option<MutationOutcome> {
        let mut flow = self.lock_flow();
        match result {
            Err(ClientError::SessionExpired) => {
                flow.abort_in_flight();
                None
            }
            other => Some(finish(&mut *flow, other.map_err(|e| e.to_string()))),
        }
    }

    async fn after(&self, outcome: Option<MutationOutcome>) -> SubmitOutcome {
        match outcome {
            None => SubmitOutcome::SessionExpired,
            Some(MutationOutcome::Failed(message)) => SubmitOutcome::Failed(message),
            Some(MutationOutcome::Succeeded(refetch)) => {
                let fetched = match refetch {
                    Refetch::FirstPage => self.list.set_page(1).await,
                    Refetch::CurrentPage => self.list.load().await,
                };
                if let Err(e) = fetched {
                    tracing::warn!(resource = R::PLURAL, error = %e, "Re-fetch after mutation failed");
                }
                SubmitOutcome::Completed
            }
        }
    }

    fn lock_flow(&self) -> MutexGuard<'_, MutationFlow<R>> {
        self.flow.lock().unwrap_or_else(|e| e.into_inner())
    }
}

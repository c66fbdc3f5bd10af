//! Per-page state of one resource collection
//!
//! [`CollectionState`] is plain data plus the rules for applying outcomes, so
//! the web front-end can keep it in a signal. [`ResourcePage`] drives the
//! async fetch/mutate/refetch cycle on top of it.

use crate::api::ApiError;
use crate::client::{MutationResult, ResourceClient};
use crate::confirm::ConfirmDialog;
use crate::entity::{Entity, ListQuery};
use crate::form::FormState;
use crate::listing::{ListView, PageSlice};
use crate::notice::NoticeChannel;
use crate::transport::Transport;

pub struct CollectionState<E: Entity> {
    pub items: Vec<E>,
    /// Set until the first load finishes
    pub loading: bool,
    /// A mutation is in flight
    pub busy: bool,
    /// Bumped by every reload; only the newest one may apply its result
    pub load_generation: u64,
    pub view: ListView,
    pub notice: NoticeChannel,
    pub delete_dialog: ConfirmDialog<u64>,
    pub form: E::Form,
    /// Id of the record being edited
    pub editing: Option<u64>,
    pub edit_form: E::Form,
}

impl<E: Entity> Default for CollectionState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            busy: false,
            load_generation: 0,
            view: ListView::for_entity::<E>(),
            notice: NoticeChannel::default(),
            delete_dialog: ConfirmDialog::default(),
            form: E::Form::default(),
            editing: None,
            edit_form: E::Form::default(),
        }
    }
}

impl<E: Entity> CollectionState<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a call as started; `false` if one is already running
    pub fn begin(&mut self) -> bool {
        if self.busy {
            tracing::debug!(endpoint = E::ENDPOINT, "ignored duplicate submission");
            return false;
        }
        self.busy = true;
        true
    }

    /// Start a reload and return its generation for [`finish_load`](Self::finish_load)
    pub fn begin_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.load_generation
    }

    /// Apply a reload result; returns `false` and drops it when a newer reload was started
    pub fn finish_load(&mut self, generation: u64, result: Result<Vec<E>, ApiError>) -> bool {
        if generation != self.load_generation {
            tracing::debug!(endpoint = E::ENDPOINT, generation, "dropped stale reload");
            return false;
        }
        self.loading = false;
        match result {
            Ok(items) => self.set_items(items),
            Err(err) => self.notice.error(err.message),
        }
        true
    }

    fn set_items(&mut self, items: Vec<E>) {
        self.items = items;
        self.view.clamp_to(&self.items);
    }

    /// Apply a mutation outcome; returns whether the server committed it
    pub fn finish_mutation(&mut self, result: MutationResult<E>, success: &str) -> bool {
        self.busy = false;
        match result {
            Ok(Ok(items)) => {
                self.set_items(items);
                self.notice.success(success);
                true
            }
            Ok(Err(refetch)) => {
                self.notice.error(refetch.message);
                true
            }
            Err(err) => {
                self.notice.error(err.message);
                false
            }
        }
    }

    /// Current page after filtering
    pub fn visible(&self) -> PageSlice<'_, E> {
        self.view.render(&self.items)
    }

    pub fn find(&self, id: u64) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Load a record into the edit form; `false` if it is not in the list
    pub fn start_edit(&mut self, id: u64) -> bool {
        let Some(form) = self.find(id).map(Entity::to_form) else {
            return false;
        };
        self.edit_form = form;
        self.editing = Some(id);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.edit_form.reset();
    }

    /// List query for a reload; the search term only goes to endpoints that search server-side
    pub fn query(&self, recent: usize) -> ListQuery {
        ListQuery {
            search: if E::SERVER_SEARCH {
                self.view.search.clone()
            } else {
                String::new()
            },
            recent,
        }
    }
}

/// Async driver of one collection page
pub struct ResourcePage<'c, T, E: Entity> {
    client: &'c ResourceClient<T>,
    pub state: CollectionState<E>,
    recent: usize,
}

impl<'c, T: Transport, E: Entity> ResourcePage<'c, T, E> {
    pub fn new(client: &'c ResourceClient<T>) -> Self {
        Self {
            client,
            state: CollectionState::new(),
            recent: ListQuery::default().recent,
        }
    }

    pub fn with_recent(mut self, recent: usize) -> Self {
        self.recent = recent;
        self
    }

    pub async fn load(&mut self) {
        let query = self.state.query(self.recent);
        let generation = self.state.begin_load();
        let result = self.client.list::<E>(&query).await;
        self.state.finish_load(generation, result);
    }

    /// Change the search term; server-searched collections are reloaded
    pub async fn search(&mut self, term: &str) {
        if self.state.view.set_search(term) && E::SERVER_SEARCH {
            self.load().await;
        }
    }

    pub async fn submit_create(&mut self) -> bool {
        if !self.state.begin() {
            return false;
        }
        let query = self.state.query(self.recent);
        let result = self.client.create::<E>(&self.state.form, &query).await;
        let committed = self.state.finish_mutation(result, E::LABELS.created);
        if committed {
            self.state.form.reset();
        }
        committed
    }

    pub async fn submit_update(&mut self) -> bool {
        let Some(id) = self.state.editing else {
            return false;
        };
        if !self.state.begin() {
            return false;
        }
        let query = self.state.query(self.recent);
        let result = self
            .client
            .update::<E>(id, &self.state.edit_form, &query)
            .await;
        let committed = self.state.finish_mutation(result, E::LABELS.updated);
        if committed {
            self.state.cancel_edit();
        }
        committed
    }

    pub fn request_delete(&mut self, id: u64) -> bool {
        self.state.delete_dialog.request(id)
    }

    pub fn cancel_delete(&mut self) {
        self.state.delete_dialog.cancel();
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.state.delete_dialog.confirm() else {
            return false;
        };
        if !self.state.begin() {
            self.state.delete_dialog.reset();
            return false;
        }
        let query = self.state.query(self.recent);
        let result = self.client.delete::<E>(id, &query).await;
        self.state.delete_dialog.reset();
        self.state.finish_mutation(result, E::LABELS.deleted)
    }
}

//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Every mutation the
//! UI can make goes through one of the `store_*` entry points below, which
//! delegate to the pure transitions in [`crate::reconcile`].

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::{ApiError, CreateOutcome};
use crate::models::{GroupRow, ItemId, ProjectDto, ProjectGroupSummary};
use crate::reconcile::{self, CreateFollowUp};

/// Global application state
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All project groups on the board
    pub groups: Vec<GroupRow>,
    /// True while a create request is in flight (submit guard)
    pub creating: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Entry Points
// ========================

/// Replace the group list with a fresh fetch, keeping expansion state.
pub fn store_refresh_groups(store: &AppStore, fetched: Vec<ProjectGroupSummary>) {
    reconcile::refresh_groups(&mut store.groups().write(), fetched);
}

/// Overwrite a group's item cache with a fetched detail and expand it.
pub fn store_set_group_items(store: &AppStore, group_id: u64, projects: Vec<ProjectDto>) {
    reconcile::set_group_items(&mut store.groups().write(), group_id, projects);
}

pub fn store_collapse_group(store: &AppStore, group_id: u64) {
    reconcile::collapse_group(&mut store.groups().write(), group_id);
}

/// Optimistic completion flip; the same call reverts it on failure.
pub fn store_flip_completed(store: &AppStore, id: ItemId) -> Option<bool> {
    reconcile::flip_completed(&mut store.groups().write(), id)
}

pub fn store_insert_pending(
    store: &AppStore,
    group_id: u64,
    temp_id: u64,
    title: &str,
    prev: Option<u64>,
) {
    reconcile::insert_pending(&mut store.groups().write(), group_id, temp_id, title, prev);
}

pub fn store_settle_create(
    store: &AppStore,
    group_id: u64,
    temp_id: u64,
    outcome: Result<CreateOutcome, ApiError>,
) -> CreateFollowUp {
    reconcile::settle_create(&mut store.groups().write(), group_id, temp_id, outcome)
}

/// Optimistic rename; returns the previous title for the revert path.
pub fn store_rename_item(store: &AppStore, id: ItemId, new_title: &str) -> Option<String> {
    reconcile::rename_item(&mut store.groups().write(), id, new_title)
}

pub fn store_remove_item(store: &AppStore, id: ItemId) -> bool {
    reconcile::remove_item(&mut store.groups().write(), id)
}

/// Returns false while an earlier create is still in flight.
pub fn store_begin_create(store: &AppStore) -> bool {
    reconcile::begin_create(&mut store.creating().write())
}

pub fn store_finish_create(store: &AppStore) {
    reconcile::finish_create(&mut store.creating().write());
}

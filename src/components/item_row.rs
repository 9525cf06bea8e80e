//! Item Row Component
//!
//! One project inside an expanded group: completion toggle, inline title
//! edit, and a two-step delete. Edit and delete-confirm share one mode state,
//! so entering either leaves the other, and an abandoned edit draft simply
//! drops with its mode — display always renders the store title.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::alert_failure;
use crate::models::WorkItem;
use crate::store::{
    store_flip_completed, store_remove_item, store_rename_item, store_set_group_items,
    use_app_store,
};

/// What the row is doing besides displaying itself.
#[derive(Clone, PartialEq)]
enum RowMode {
    View,
    /// Inline title edit; the draft lives here and nowhere else.
    Editing(String),
    ConfirmingDelete,
}

#[component]
pub fn ItemRow(group_id: u64, item: WorkItem) -> impl IntoView {
    let store = use_app_store();
    let id = item.id;
    let title = item.title.clone();
    let (mode, set_mode) = signal(RowMode::View);

    // Optimistic flip, flipped back if the PATCH fails. Toggle failures stay
    // out of the user's face; the console gets the details.
    let on_toggle = move |_| {
        let Some(project_id) = id.confirmed() else {
            return;
        };
        let Some(new_value) = store_flip_completed(&store, id) else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = api::set_complete_status(project_id, new_value).await {
                web_sys::console::warn_1(
                    &format!("[Board] Toggle of #{project_id} failed, reverting: {e}").into(),
                );
                store_flip_completed(&store, id);
            }
        });
    };

    let commit_edit = move || {
        let RowMode::Editing(draft) = mode.get() else {
            return;
        };
        set_mode.set(RowMode::View);
        let Some(project_id) = id.confirmed() else {
            return;
        };
        let new_title = draft.trim().to_string();
        if new_title.is_empty() {
            return;
        }
        let Some(previous) = store_rename_item(&store, id, &new_title) else {
            return;
        };
        if previous == new_title {
            return;
        }
        spawn_local(async move {
            if let Err(e) = api::rename_project(project_id, &new_title).await {
                store_rename_item(&store, id, &previous);
                alert_failure("Failed to update project", &e);
            }
        });
    };

    let on_delete = move || {
        set_mode.set(RowMode::View);
        if !store_remove_item(&store, id) {
            return;
        }
        // A pending item only exists locally; nothing to delete upstream.
        let Some(project_id) = id.confirmed() else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = api::delete_project(project_id).await {
                alert_failure("Failed to delete project", &e);
                // The surviving item set is unknown; re-fetch the whole group.
                match api::group_detail(group_id).await {
                    Ok(detail) => store_set_group_items(&store, group_id, detail.projects),
                    Err(e) => web_sys::console::error_1(
                        &format!("[Board] Recovery fetch for group {group_id} failed: {e}").into(),
                    ),
                }
            }
        });
    };

    view! {
        <div class="item-row" class:item-done=item.completed class:item-pending=id.is_pending()>
            <input
                type="checkbox"
                prop:checked=item.completed
                prop:disabled=id.is_pending()
                on:change=on_toggle
            />
            {
                let title = title.clone();
                move || {
                    if let RowMode::Editing(draft) = mode.get() {
                        view! {
                            <input
                                type="text"
                                class="item-title-input"
                                prop:value=draft
                                on:input=move |ev| {
                                    set_mode.set(RowMode::Editing(event_target_value(&ev)));
                                }
                                on:keydown=move |ev| {
                                    if ev.is_composing() {
                                        return;
                                    }
                                    match ev.key().as_str() {
                                        "Enter" => {
                                            ev.prevent_default();
                                            commit_edit();
                                        }
                                        "Escape" => set_mode.set(RowMode::View),
                                        _ => {}
                                    }
                                }
                                on:blur=move |_| commit_edit()
                            />
                        }
                        .into_any()
                    } else {
                        let draft_seed = title.clone();
                        view! {
                            <span
                                class="item-title"
                                on:dblclick=move |_| {
                                    if !id.is_pending() {
                                        set_mode.set(RowMode::Editing(draft_seed.clone()));
                                    }
                                }
                            >
                                {title.clone()}
                            </span>
                        }
                        .into_any()
                    }
                }
            }
            {id.is_pending().then(|| view! { <span class="item-saving">"saving…"</span> })}
            {move || {
                if mode.get() == RowMode::ConfirmingDelete {
                    view! {
                        <span class="delete-confirm">
                            <span class="delete-confirm-text">"Delete?"</span>
                            <button
                                class="confirm-btn"
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    on_delete();
                                }
                            >
                                "✓"
                            </button>
                            <button
                                class="cancel-btn"
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    set_mode.set(RowMode::View);
                                }
                            >
                                "✗"
                            </button>
                        </span>
                    }
                    .into_any()
                } else {
                    view! {
                        <button
                            class="delete-btn"
                            prop:disabled=id.is_pending()
                            on:click=move |ev| {
                                ev.stop_propagation();
                                if !id.is_pending() {
                                    set_mode.set(RowMode::ConfirmingDelete);
                                }
                            }
                        >
                            "×"
                        </button>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

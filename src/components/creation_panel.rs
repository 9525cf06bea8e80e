//! Creation Panel Component
//!
//! Form for creating a project inside the open group, either as a root or
//! linked under the currently selected map node. The submit action is guarded
//! against double-submission while a create is in flight, and against IME
//! composition confirms that would otherwise fire it twice.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::alert_failure;
use crate::context::AppContext;
use crate::models::CreateProjectRequest;
use crate::reconcile::CreateFollowUp;
use crate::store::{
    store_begin_create, store_finish_create, store_insert_pending, store_set_group_items,
    store_settle_create, use_app_store, AppStateStoreFields,
};

#[component]
pub fn CreationPanel(group_id: u64) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (draft, set_draft) = signal(String::new());

    let submit = move || {
        let title = draft.get().trim().to_string();
        if title.is_empty() {
            return;
        }
        if !store_begin_create(&store) {
            return;
        }
        let prev = ctx.link_parent.get();
        // Clock token, locally unique until the server hands out the real id.
        let temp_id = js_sys::Date::now() as u64;
        store_insert_pending(&store, group_id, temp_id, &title, prev);
        set_draft.set(String::new());

        spawn_local(async move {
            let outcome = api::create_project(&CreateProjectRequest {
                content: &title,
                project_group_id: group_id,
                prev_project_id: prev,
            })
            .await;
            let failure = outcome.as_ref().err().cloned();

            match store_settle_create(&store, group_id, temp_id, outcome) {
                CreateFollowUp::Confirmed => ctx.set_link_parent(None),
                CreateFollowUp::RefetchGroup => {
                    // The acknowledgement carried no id, so the temporary row
                    // is already gone; one extra round trip brings in the
                    // authoritative one.
                    match api::group_detail(group_id).await {
                        Ok(detail) => store_set_group_items(&store, group_id, detail.projects),
                        Err(e) => alert_failure("Project was created but the group failed to refresh", &e),
                    }
                    ctx.set_link_parent(None);
                }
                CreateFollowUp::Failed => {
                    if let Some(e) = failure {
                        alert_failure("Failed to create project", &e);
                    }
                }
            }
            store_finish_create(&store);
        });
    };

    view! {
        <div class="creation-panel" on:click=|ev| ev.stop_propagation()>
            <span class="panel-label">
                {move || match ctx.link_parent.get() {
                    Some(parent_id) => format!("New project after #{parent_id}"),
                    None => "New root project".to_string(),
                }}
            </span>
            <input
                type="text"
                class="creation-input"
                placeholder="Enter project name..."
                prop:value=move || draft.get()
                on:input=move |ev| set_draft.set(event_target_value(&ev))
                on:keydown=move |ev| {
                    if ev.is_composing() {
                        return;
                    }
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        submit();
                    }
                }
            />
            <button
                class="creation-submit-btn"
                prop:disabled=move || store.creating().get()
                on:click=move |_| submit()
            >
                "Save"
            </button>
        </div>
    }
}

//! Project Board Component
//!
//! Group rows with status and progress bars. Expanding a row fetches its
//! items; expanding again re-fetches, so the cache never goes stale.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::ItemRow;
use crate::context::AppContext;
use crate::store::{
    store_collapse_group, store_set_group_items, use_app_store, AppStateStoreFields,
};

#[component]
pub fn ProjectBoard() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let toggle_row = move |group_id: u64, expanded: bool| {
        if expanded {
            store_collapse_group(&store, group_id);
            return;
        }
        spawn_local(async move {
            match api::group_detail(group_id).await {
                Ok(detail) => store_set_group_items(&store, group_id, detail.projects),
                Err(e) => web_sys::console::error_1(
                    &format!("[Board] Failed to fetch group {group_id}: {e}").into(),
                ),
            }
        });
    };

    view! {
        <div class="project-board">
            <div class="board-header">
                <h1>"Projects"</h1>
                <button class="control-btn" on:click=move |_| ctx.reload()>"Refresh"</button>
            </div>
            {move || {
                store
                    .groups()
                    .get()
                    .into_iter()
                    .map(|group| {
                        let group_id = group.id;
                        let expanded = group.expanded;
                        let pct = group.progress_percentage();
                        let color = group.progress_tone().color();
                        let items = if expanded {
                            group.items.clone().unwrap_or_default()
                        } else {
                            Vec::new()
                        };
                        view! {
                            <div class="group-block">
                                <div class="group-row" on:click=move |_| toggle_row(group_id, expanded)>
                                    <span class="chevron">{if expanded { "▾" } else { "▸" }}</span>
                                    <span class="group-name">{group.name.clone()}</span>
                                    <span class="group-status">{group.status.label()}</span>
                                    <span class="progress-track">
                                        <span
                                            class="progress-fill"
                                            style=format!("width:{pct}%;background:{color}")
                                        ></span>
                                    </span>
                                    <span class="progress-label">{format!("{pct}%")}</span>
                                    <button
                                        class="map-btn"
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            ctx.open_group_map(Some(group_id));
                                        }
                                    >
                                        "Map"
                                    </button>
                                </div>
                                {expanded
                                    .then(|| {
                                        view! {
                                            <div class="group-items">
                                                {items
                                                    .into_iter()
                                                    .map(|item| {
                                                        view! { <ItemRow group_id=group_id item=item /> }
                                                    })
                                                    .collect_view()}
                                            </div>
                                        }
                                    })}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

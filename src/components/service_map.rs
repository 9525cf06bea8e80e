//! Service Map Component
//!
//! Dependency map of one group: positioned node boxes plus SVG edges,
//! rebuilt wholesale from the current item list on every change. Clicking a
//! node selects it as the parent for the next created project; clicking the
//! canvas clears the selection back to root mode.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::CreationPanel;
use crate::context::AppContext;
use crate::graph::{build_graph, NODE_HEIGHT, NODE_WIDTH};
use crate::models::{ItemId, WorkItem};
use crate::store::{
    store_flip_completed, store_set_group_items, use_app_store, AppStateStoreFields,
};

#[component]
pub fn ServiceMap(group_id: u64) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    // Load the group detail when the map opens and on every reload trigger.
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        web_sys::console::log_1(
            &format!("[Map] Loading group {group_id}, trigger={trigger}").into(),
        );
        spawn_local(async move {
            match api::group_detail(group_id).await {
                Ok(detail) => store_set_group_items(&store, group_id, detail.projects),
                Err(e) => web_sys::console::error_1(
                    &format!("[Map] Failed to fetch group {group_id}: {e}").into(),
                ),
            }
        });
    });

    // The graph is always re-derived from the authoritative item list.
    let graph = Memo::new(move |_| {
        let groups = store.groups().get();
        let items = groups
            .iter()
            .find(|g| g.id == group_id)
            .and_then(|g| g.items.clone())
            .unwrap_or_default();
        build_graph(&items)
    });

    let group_name = move || {
        store
            .groups()
            .get()
            .iter()
            .find(|g| g.id == group_id)
            .map(|g| g.name.clone())
            .unwrap_or_else(|| "Loading...".to_string())
    };

    let selected_item = Memo::new(move |_| -> Option<WorkItem> {
        let parent_id = ctx.link_parent.get()?;
        store
            .groups()
            .get()
            .iter()
            .find(|g| g.id == group_id)
            .and_then(|g| g.items.as_ref())
            .and_then(|items| {
                items
                    .iter()
                    .find(|i| i.id == ItemId::Confirmed(parent_id))
            })
            .cloned()
    });

    // Same optimistic flip as the board checkbox, but through the dedicated
    // complete/undo-complete endpoints.
    let mark_selected = move |id: ItemId, currently_done: bool| {
        let Some(project_id) = id.confirmed() else {
            return;
        };
        if store_flip_completed(&store, id).is_none() {
            return;
        }
        spawn_local(async move {
            let result = if currently_done {
                api::undo_complete_project(project_id).await
            } else {
                api::complete_project(project_id).await
            };
            if let Err(e) = result {
                web_sys::console::warn_1(
                    &format!("[Map] Complete toggle of #{project_id} failed, reverting: {e}")
                        .into(),
                );
                store_flip_completed(&store, id);
            }
        });
    };

    view! {
        <div class="service-map" on:click=move |_| ctx.set_link_parent(None)>
            <div class="map-header">
                <button
                    class="map-back-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        ctx.open_group_map(None);
                        ctx.reload();
                    }
                >
                    "← Back"
                </button>
                <h1>{group_name}</h1>
                <span class="map-badge">"SERVICE MAP"</span>
            </div>

            {move || {
                let (nodes, edges) = graph.get();
                let positions: HashMap<ItemId, (f64, f64)> =
                    nodes.iter().map(|n| (n.id, (n.x, n.y))).collect();
                let width = nodes.iter().map(|n| n.x + NODE_WIDTH).fold(0.0, f64::max) + 40.0;
                let height = nodes.iter().map(|n| n.y + NODE_HEIGHT).fold(0.0, f64::max) + 40.0;
                view! {
                    <div
                        class="map-canvas"
                        style=format!("position:relative;width:{width}px;height:{height}px")
                    >
                        <svg class="map-edges" width=width.to_string() height=height.to_string()>
                            {edges
                                .iter()
                                .filter_map(|edge| {
                                    let (fx, fy) = positions.get(&edge.from)?;
                                    let (tx, ty) = positions.get(&edge.to)?;
                                    Some(view! {
                                        <line
                                            x1=(fx + NODE_WIDTH).to_string()
                                            y1=(fy + NODE_HEIGHT / 2.0).to_string()
                                            x2=tx.to_string()
                                            y2=(ty + NODE_HEIGHT / 2.0).to_string()
                                            stroke="#6e8efb"
                                            stroke-width="2"
                                        ></line>
                                    })
                                })
                                .collect_view()}
                        </svg>
                        {nodes
                            .into_iter()
                            .map(|node| {
                                let node_id = node.id;
                                let is_selected = move || {
                                    node_id.confirmed().is_some()
                                        && ctx.link_parent.get() == node_id.confirmed()
                                };
                                view! {
                                    <div
                                        class="map-node"
                                        class:node-done=node.done
                                        class:node-progress=!node.done
                                        class:node-pending=node_id.is_pending()
                                        class:node-selected=is_selected
                                        style=format!(
                                            "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px",
                                            node.x,
                                            node.y,
                                            NODE_WIDTH,
                                            NODE_HEIGHT,
                                        )
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            ctx.set_link_parent(node_id.confirmed());
                                        }
                                    >
                                        <div class="node-label">{node.label.clone()}</div>
                                        <div class="node-sub">{format!("Project ID: {node_id}")}</div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
            }}

            {move || {
                selected_item
                    .get()
                    .map(|item| {
                        let id = item.id;
                        let done = item.completed;
                        view! {
                            <div class="node-panel" on:click=|ev| ev.stop_propagation()>
                                <span class="panel-label">{format!("Linked to: {}", item.title)}</span>
                                <button
                                    class="complete-btn"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        mark_selected(id, done);
                                    }
                                >
                                    {if done { "Undo complete" } else { "Mark complete" }}
                                </button>
                            </div>
                        }
                    })
            }}

            <CreationPanel group_id=group_id />
        </div>
    }
}

//! Personal Life Frontend App
//!
//! Project board plus the per-group service map.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{ProjectBoard, ServiceMap};
use crate::context::AppContext;
use crate::store::{store_refresh_groups, AppState, AppStore};

#[component]
pub fn App() -> impl IntoView {
    let store: AppStore = Store::new(AppState::default());
    provide_context(store);

    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (open_group, set_open_group) = signal::<Option<u64>>(None);
    let (link_parent, set_link_parent) = signal::<Option<u64>>(None);

    provide_context(AppContext::new(
        (reload_trigger, set_reload_trigger),
        (open_group, set_open_group),
        (link_parent, set_link_parent),
    ));

    // Load the group list on mount and on every reload trigger.
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        web_sys::console::log_1(
            &format!("[App] Loading project groups, trigger={trigger}").into(),
        );
        spawn_local(async move {
            match api::list_groups().await {
                Ok(fetched) => {
                    web_sys::console::log_1(
                        &format!("[App] Loaded {} project groups", fetched.len()).into(),
                    );
                    store_refresh_groups(&store, fetched);
                }
                Err(e) => web_sys::console::error_1(
                    &format!("[App] Failed to load project groups: {e}").into(),
                ),
            }
        });
    });

    view! {
        <div class="app-layout">
            <main class="main-content">
                {move || match open_group.get() {
                    Some(group_id) => view! { <ServiceMap group_id=group_id /> }.into_any(),
                    None => view! { <ProjectBoard /> }.into_any(),
                }}
            </main>
        </div>
    }
}

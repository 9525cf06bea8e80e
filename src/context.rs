//! Application Context
//!
//! Shared signals provided via Leptos Context API.

use leptos::prelude::*;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload the group list from the backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload the group list from the backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Group whose service map is open (None = project board) - read
    pub open_group: ReadSignal<Option<u64>>,
    set_open_group: WriteSignal<Option<u64>>,
    /// Selected map node acting as parent for the next create (None = root) - read
    pub link_parent: ReadSignal<Option<u64>>,
    set_link_parent: WriteSignal<Option<u64>>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        open_group: (ReadSignal<Option<u64>>, WriteSignal<Option<u64>>),
        link_parent: (ReadSignal<Option<u64>>, WriteSignal<Option<u64>>),
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            open_group: open_group.0,
            set_open_group: open_group.1,
            link_parent: link_parent.0,
            set_link_parent: link_parent.1,
        }
    }

    /// Trigger a reload of the group list
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Open a group's service map, or go back to the board with `None`.
    /// Selection does not survive the switch.
    pub fn open_group_map(&self, group_id: Option<u64>) {
        self.set_open_group.set(group_id);
        self.set_link_parent.set(None);
    }

    /// Select the parent node for the next created project
    pub fn set_link_parent(&self, id: Option<u64>) {
        self.set_link_parent.set(id);
    }
}

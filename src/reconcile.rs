//! Optimistic Mutation Reconciliation
//!
//! Pure transitions over the board state. Every user action applies its local
//! change through one of these before its request goes out, and settles or
//! reverts through another when the response lands. Nothing here touches the
//! network or the DOM, so the reconciliation policy is testable on its own.

use crate::api::{ApiError, CreateOutcome};
use crate::models::{GroupRow, ItemId, ProjectDto, ProjectGroupSummary, WorkItem};

/// What the caller still has to do after a create request settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateFollowUp {
    /// Temporary item was replaced in place with the server row.
    Confirmed,
    /// Server acknowledged without a usable body; re-fetch the group detail
    /// to pick up the authoritative id.
    RefetchGroup,
    /// Create failed; the temporary item was dropped.
    Failed,
}

/// Merge a fresh group listing into the current rows, preserving each group's
/// expanded flag and cached item list across the refresh.
pub fn refresh_groups(groups: &mut Vec<GroupRow>, fetched: Vec<ProjectGroupSummary>) {
    let old = std::mem::take(groups);
    *groups = fetched
        .into_iter()
        .map(|summary| {
            let mut row = GroupRow::from_summary(summary);
            if let Some(prev) = old.iter().find(|g| g.id == row.id) {
                row.expanded = prev.expanded;
                row.items = prev.items.clone();
            }
            row
        })
        .collect();
}

/// Overwrite a group's cached item list with a fetched detail and expand it.
/// Creates still in flight survive the overwrite: a fetch that started before
/// (or races with) a create knows nothing about the temporary row, and only
/// the create's own settle transition may decide its fate.
pub fn set_group_items(groups: &mut [GroupRow], group_id: u64, projects: Vec<ProjectDto>) {
    if let Some(group) = groups.iter_mut().find(|g| g.id == group_id) {
        let mut items: Vec<WorkItem> = projects.into_iter().map(WorkItem::from).collect();
        if let Some(old) = group.items.take() {
            items.extend(old.into_iter().filter(|i| i.id.is_pending()));
        }
        group.items = Some(items);
        group.expanded = true;
    }
}

pub fn collapse_group(groups: &mut [GroupRow], group_id: u64) {
    if let Some(group) = groups.iter_mut().find(|g| g.id == group_id) {
        group.expanded = false;
    }
}

/// Flip an item's completion flag, wherever it currently lives. Returns the
/// new value so the caller can send it; calling again with the same id is the
/// revert path.
pub fn flip_completed(groups: &mut [GroupRow], id: ItemId) -> Option<bool> {
    find_item_mut(groups, id).map(|item| {
        item.completed = !item.completed;
        item.completed
    })
}

/// Insert a temporary item ahead of the create request. The group is expanded
/// so the new row is visible, and an optional `prev → temp` dependency edge is
/// recorded immediately.
pub fn insert_pending(
    groups: &mut [GroupRow],
    group_id: u64,
    temp_id: u64,
    title: &str,
    prev: Option<u64>,
) {
    let Some(group) = groups.iter_mut().find(|g| g.id == group_id) else {
        return;
    };
    let items = group.items.get_or_insert_with(Vec::new);
    if let Some(prev_id) = prev {
        if let Some(parent) = items.iter_mut().find(|i| i.id == ItemId::Confirmed(prev_id)) {
            parent.next_ids.push(ItemId::Pending(temp_id));
        }
    }
    items.push(WorkItem {
        id: ItemId::Pending(temp_id),
        title: title.to_string(),
        completed: false,
        next_ids: Vec::new(),
    });
    group.expanded = true;
}

/// Settle a create request against its outcome. Exactly one of the three
/// follow-ups results:
///
/// - structured response: the pending item becomes the server row in place and
///   every `Pending(temp)` edge reference is rewritten to the server id,
/// - plain acknowledgement: the pending item cannot be trusted and is dropped
///   right away; the caller must re-fetch the group to pick up the real row,
/// - error: the pending item and its edge references are dropped.
pub fn settle_create(
    groups: &mut [GroupRow],
    group_id: u64,
    temp_id: u64,
    outcome: Result<CreateOutcome, ApiError>,
) -> CreateFollowUp {
    match outcome {
        Ok(CreateOutcome::Created(dto)) => {
            confirm_pending(groups, group_id, temp_id, dto);
            CreateFollowUp::Confirmed
        }
        Ok(CreateOutcome::Acknowledged) => {
            drop_pending(groups, group_id, temp_id);
            CreateFollowUp::RefetchGroup
        }
        Err(_) => {
            drop_pending(groups, group_id, temp_id);
            CreateFollowUp::Failed
        }
    }
}

/// `pending → confirmed`: replace the temporary item with the server row and
/// rewrite dangling pending references to the authoritative id.
pub fn confirm_pending(groups: &mut [GroupRow], group_id: u64, temp_id: u64, dto: ProjectDto) {
    let Some(items) = groups
        .iter_mut()
        .find(|g| g.id == group_id)
        .and_then(|g| g.items.as_mut())
    else {
        return;
    };
    let confirmed = ItemId::Confirmed(dto.project_id);
    if items.iter().any(|i| i.id == confirmed) {
        // An overlapping fetch already brought the server row in.
        items.retain(|i| i.id != ItemId::Pending(temp_id));
    } else if let Some(item) = items.iter_mut().find(|i| i.id == ItemId::Pending(temp_id)) {
        *item = WorkItem::from(dto);
    }
    for item in items.iter_mut() {
        for next in item.next_ids.iter_mut() {
            if *next == ItemId::Pending(temp_id) {
                *next = confirmed;
            }
        }
    }
}

/// `pending → removed`: the create failed, take the temporary item back out.
pub fn drop_pending(groups: &mut [GroupRow], group_id: u64, temp_id: u64) {
    let Some(items) = groups
        .iter_mut()
        .find(|g| g.id == group_id)
        .and_then(|g| g.items.as_mut())
    else {
        return;
    };
    items.retain(|i| i.id != ItemId::Pending(temp_id));
    strip_references(items, ItemId::Pending(temp_id));
}

/// Optimistically rewrite an item's title. Returns the previous title so a
/// failed request can restore it.
pub fn rename_item(groups: &mut [GroupRow], id: ItemId, new_title: &str) -> Option<String> {
    find_item_mut(groups, id).map(|item| std::mem::replace(&mut item.title, new_title.to_string()))
}

/// Optimistically remove an item, along with every dependency edge pointing at
/// it. Restoration after a failed delete goes through a full group re-fetch.
pub fn remove_item(groups: &mut [GroupRow], id: ItemId) -> bool {
    for group in groups.iter_mut() {
        if let Some(items) = group.items.as_mut() {
            let before = items.len();
            items.retain(|i| i.id != id);
            if items.len() != before {
                strip_references(items, id);
                return true;
            }
        }
    }
    false
}

/// Double-submission guard for the create action. Returns false while an
/// earlier create is still in flight.
pub fn begin_create(creating: &mut bool) -> bool {
    if *creating {
        false
    } else {
        *creating = true;
        true
    }
}

pub fn finish_create(creating: &mut bool) {
    *creating = false;
}

fn find_item_mut(groups: &mut [GroupRow], id: ItemId) -> Option<&mut WorkItem> {
    groups
        .iter_mut()
        .filter_map(|g| g.items.as_mut())
        .flat_map(|items| items.iter_mut())
        .find(|item| item.id == id)
}

fn strip_references(items: &mut [WorkItem], id: ItemId) {
    for item in items.iter_mut() {
        item.next_ids.retain(|next| *next != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupStatus;

    fn group(id: u64, items: Option<Vec<WorkItem>>) -> GroupRow {
        GroupRow {
            id,
            name: format!("Group {id}"),
            status: GroupStatus::InProgress,
            total_count: 0,
            completed_count: 0,
            expanded: items.is_some(),
            items,
        }
    }

    fn item(id: u64, title: &str, completed: bool, next: &[ItemId]) -> WorkItem {
        WorkItem {
            id: ItemId::Confirmed(id),
            title: title.to_string(),
            completed,
            next_ids: next.to_vec(),
        }
    }

    fn summary(id: u64, name: &str) -> ProjectGroupSummary {
        ProjectGroupSummary {
            project_group_id: id,
            group_name: name.to_string(),
            status: GroupStatus::Todo,
            total_project_count: 0,
            completed_project_count: 0,
        }
    }

    #[test]
    fn toggle_then_revert_is_a_net_noop() {
        let mut groups = vec![group(1, Some(vec![item(10, "A", false, &[])]))];

        assert_eq!(flip_completed(&mut groups, ItemId::Confirmed(10)), Some(true));
        // Request failed: flip back.
        assert_eq!(flip_completed(&mut groups, ItemId::Confirmed(10)), Some(false));

        assert!(!groups[0].items.as_ref().unwrap()[0].completed);
    }

    #[test]
    fn toggle_of_unknown_item_is_ignored() {
        let mut groups = vec![group(1, Some(vec![item(10, "A", false, &[])]))];
        assert_eq!(flip_completed(&mut groups, ItemId::Confirmed(99)), None);
    }

    #[test]
    fn structured_create_response_replaces_the_temp_item() {
        let mut groups = vec![group(1, Some(vec![item(10, "A", false, &[])]))];
        insert_pending(&mut groups, 1, 777, "B", Some(10));

        let follow_up = settle_create(
            &mut groups,
            1,
            777,
            Ok(CreateOutcome::Created(ProjectDto {
                project_id: 42,
                content: "B".into(),
                complete_status: false,
                next_project_ids: vec![],
            })),
        );
        assert_eq!(follow_up, CreateFollowUp::Confirmed);

        let items = groups[0].items.as_ref().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().any(|i| i.id == ItemId::Confirmed(42)));
        assert!(!items.iter().any(|i| i.id.is_pending()));
        // The optimistic prev → temp edge now points at the server id.
        assert_eq!(items[0].next_ids, vec![ItemId::Confirmed(42)]);
    }

    #[test]
    fn plain_text_create_response_requests_a_refetch() {
        let mut groups = vec![group(1, Some(vec![]))];
        insert_pending(&mut groups, 1, 777, "B", None);

        let follow_up = settle_create(&mut groups, 1, 777, Ok(CreateOutcome::Acknowledged));
        assert_eq!(follow_up, CreateFollowUp::RefetchGroup);
        // The untrusted temporary row is gone even before the follow-up read,
        // so a failed read cannot leave it dangling.
        assert!(groups[0].items.as_ref().unwrap().is_empty());

        // The follow-up read owns the final state; simulate it.
        set_group_items(
            &mut groups,
            1,
            vec![ProjectDto {
                project_id: 42,
                content: "B".into(),
                complete_status: false,
                next_project_ids: vec![],
            }],
        );
        let items = groups[0].items.as_ref().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ItemId::Confirmed(42));
    }

    #[test]
    fn failed_create_drops_the_temp_item_and_its_edge() {
        let mut groups = vec![group(1, Some(vec![item(10, "A", false, &[])]))];
        insert_pending(&mut groups, 1, 777, "B", Some(10));

        let follow_up = settle_create(&mut groups, 1, 777, Err(ApiError::Status(500)));
        assert_eq!(follow_up, CreateFollowUp::Failed);

        let items = groups[0].items.as_ref().unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].next_ids.is_empty());
    }

    #[test]
    fn failed_delete_restores_state_through_refetch() {
        let mut groups = vec![group(
            1,
            Some(vec![item(10, "A", false, &[ItemId::Confirmed(11)]), item(11, "B", true, &[])]),
        )];

        assert!(remove_item(&mut groups, ItemId::Confirmed(11)));
        // Optimistic removal also dropped the edge into the removed item.
        assert!(groups[0].items.as_ref().unwrap()[0].next_ids.is_empty());

        // Backend still has the item; the recovery re-fetch brings it back.
        set_group_items(
            &mut groups,
            1,
            vec![
                ProjectDto {
                    project_id: 10,
                    content: "A".into(),
                    complete_status: false,
                    next_project_ids: vec![11],
                },
                ProjectDto {
                    project_id: 11,
                    content: "B".into(),
                    complete_status: true,
                    next_project_ids: vec![],
                },
            ],
        );

        let items = groups[0].items.as_ref().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].next_ids, vec![ItemId::Confirmed(11)]);
    }

    #[test]
    fn overlapping_fetch_keeps_an_in_flight_pending_item() {
        // Create fired before the group's first detail fetch resolved.
        let mut groups = vec![group(1, None)];
        insert_pending(&mut groups, 1, 777, "B", None);

        // The late fetch knows nothing about the temp row and must not eat it.
        set_group_items(
            &mut groups,
            1,
            vec![ProjectDto {
                project_id: 10,
                content: "A".into(),
                complete_status: false,
                next_project_ids: vec![],
            }],
        );
        let items = groups[0].items.as_ref().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().any(|i| i.id == ItemId::Pending(777)));

        // The create's own settle still lands normally afterwards.
        let follow_up = settle_create(
            &mut groups,
            1,
            777,
            Ok(CreateOutcome::Created(ProjectDto {
                project_id: 42,
                content: "B".into(),
                complete_status: false,
                next_project_ids: vec![],
            })),
        );
        assert_eq!(follow_up, CreateFollowUp::Confirmed);
        let items = groups[0].items.as_ref().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().any(|i| i.id == ItemId::Confirmed(42)));
        assert!(!items.iter().any(|i| i.id.is_pending()));
    }

    #[test]
    fn confirm_after_overlapping_fetch_does_not_duplicate_the_row() {
        let mut groups = vec![group(1, Some(vec![]))];
        insert_pending(&mut groups, 1, 777, "B", None);

        // A refresh that raced the create already delivered the server row.
        set_group_items(
            &mut groups,
            1,
            vec![ProjectDto {
                project_id: 42,
                content: "B".into(),
                complete_status: false,
                next_project_ids: vec![],
            }],
        );

        settle_create(
            &mut groups,
            1,
            777,
            Ok(CreateOutcome::Created(ProjectDto {
                project_id: 42,
                content: "B".into(),
                complete_status: false,
                next_project_ids: vec![],
            })),
        );
        let items = groups[0].items.as_ref().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ItemId::Confirmed(42));
    }

    #[test]
    fn rename_returns_previous_title_for_revert() {
        let mut groups = vec![group(1, Some(vec![item(10, "Old", false, &[])]))];

        let previous = rename_item(&mut groups, ItemId::Confirmed(10), "New").unwrap();
        assert_eq!(previous, "Old");
        assert_eq!(groups[0].items.as_ref().unwrap()[0].title, "New");

        // Failure path: put the old title back.
        rename_item(&mut groups, ItemId::Confirmed(10), &previous);
        assert_eq!(groups[0].items.as_ref().unwrap()[0].title, "Old");
    }

    #[test]
    fn refresh_preserves_expanded_flag_and_cached_items() {
        let mut groups = vec![
            group(1, Some(vec![item(10, "A", false, &[])])),
            group(2, None),
        ];

        refresh_groups(&mut groups, vec![summary(2, "Second"), summary(1, "First"), summary(3, "Third")]);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].id, 2);
        let first = groups.iter().find(|g| g.id == 1).unwrap();
        assert!(first.expanded);
        assert_eq!(first.items.as_ref().unwrap().len(), 1);
        assert_eq!(first.name, "First");
        assert!(groups.iter().find(|g| g.id == 3).unwrap().items.is_none());
    }

    #[test]
    fn create_guard_rejects_a_second_submission() {
        let mut creating = false;
        assert!(begin_create(&mut creating));
        assert!(!begin_create(&mut creating));
        finish_create(&mut creating);
        assert!(begin_create(&mut creating));
    }
}

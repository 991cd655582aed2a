//! Diffing open note windows against stored records and existing preview cards.
//!
//! [`plan`] only computes id sets; the session applies them. An id that is
//! both open and stored lands in `refresh` only, which means its card is
//! rendered from the live window and any unsaved edits win over the stored
//! copy.

use std::collections::HashSet;

/// What has to happen to bring windows, store and grid back in line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Open windows whose cards must exist and show live content.
    pub refresh: Vec<String>,
    /// Stored notes without a window: materialise a hidden window and a card.
    pub restore: Vec<String>,
    /// Cards whose note is neither open nor stored any more.
    pub drop: Vec<String>,
}

impl ReconcilePlan {
    /// Ids that will have a card once the plan is applied.
    pub fn preview_ids(&self) -> impl Iterator<Item = &str> {
        self.refresh.iter().chain(&self.restore).map(String::as_str)
    }

    pub fn is_noop(&self) -> bool {
        self.restore.is_empty() && self.drop.is_empty()
    }
}

/// Computes the reconciliation of `active` window ids, `stored` record ids and
/// the ids that currently have `previews`.
///
/// Output order follows input order: refreshed ids in window order, restored
/// ids in store order, dropped ids in grid order.
pub fn plan<'a, A, S, P>(active: A, stored: S, previews: P) -> ReconcilePlan
where
    A: IntoIterator<Item = &'a str>,
    S: IntoIterator<Item = &'a str>,
    P: IntoIterator<Item = &'a str>,
{
    let refresh: Vec<String> = active.into_iter().map(str::to_string).collect();
    let active_set: HashSet<&str> = refresh.iter().map(String::as_str).collect();

    let stored: Vec<&str> = stored.into_iter().collect();
    let stored_set: HashSet<&str> = stored.iter().copied().collect();

    let restore = stored
        .iter()
        .filter(|id| !active_set.contains(*id))
        .map(|id| id.to_string())
        .collect();

    let drop = previews
        .into_iter()
        .filter(|id| !active_set.contains(id) && !stored_set.contains(id))
        .map(str::to_string)
        .collect();

    ReconcilePlan { refresh, restore, drop }
}

// Upcoming-event filtering and date ordering

use chrono::{DateTime, Utc};

use crate::event::EventDocument;
use crate::join::JoinDocument;

/// Keeps only events dated strictly after `now`, earliest first.
///
/// Events whose `eventDate` is missing or unparseable have no position on
/// the timeline and are dropped. Ties keep their incoming order.
pub fn upcoming_events(events: Vec<EventDocument>, now: DateTime<Utc>) -> Vec<EventDocument> {
    let mut dated: Vec<(DateTime<Utc>, EventDocument)> = events
        .into_iter()
        .filter_map(|event| {
            let ts = event.timestamp()?;
            (ts > now).then_some((ts, event))
        })
        .collect();
    dated.sort_by_key(|(ts, _)| *ts);
    dated.into_iter().map(|(_, event)| event).collect()
}

/// Orders joins by their event-date snapshot, earliest first.
///
/// Joins without an interpretable date sink to the end rather than being
/// dropped; a user's registration list must stay complete.
pub fn sort_joins_by_event_date(joins: &mut [JoinDocument]) {
    joins.sort_by_key(|join| {
        let ts = join.timestamp();
        (ts.is_none(), ts)
    });
}

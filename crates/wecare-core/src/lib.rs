// Core domain types and logic for the weCare event service
//
// This crate has no I/O. It defines the open document models for the two
// collections, the wire shapes of store acknowledgments, and the pure logic
// the API applies after fetching documents:
// - interpreting client-supplied `eventDate` values as timestamps
// - the strictly-after-now "upcoming" filter with ascending date sort
// - the whitespace-tolerant, case-insensitive title search pattern

pub mod dates;
pub mod event;
pub mod ids;
pub mod join;
pub mod results;
pub mod search;
pub mod upcoming;

pub use dates::event_timestamp;
pub use event::EventDocument;
pub use join::JoinDocument;
pub use results::{DeleteAck, InsertAck, UpdateAck};
pub use search::title_pattern;
pub use upcoming::{sort_joins_by_event_date, upcoming_events};

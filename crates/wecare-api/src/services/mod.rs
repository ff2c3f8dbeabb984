// Services layer for business logic
// Services own filtering and ordering semantics, calling storage directly

pub mod event;
pub mod join;

pub use event::EventService;
pub use join::JoinService;

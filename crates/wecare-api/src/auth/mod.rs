// Authentication module
// Decision: token verification is delegated to the identity provider; every
// failure mode produces the same fixed 401 response

pub mod guard;
pub mod identity;

pub use guard::Principal;
pub use identity::{HttpVerifier, IdentityVerifier, InsecureVerifier};

//! In-memory session storage for the membership portal.
//!
//! A session carries exactly one piece of state: the registration id the
//! caller has proven ownership of via the OTP dance. Verifying a second
//! registration overwrites the first — there is never more than one
//! verified id per session.

mod store;

pub use store::{mint_token, SessionStore};

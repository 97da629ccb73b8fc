//! Identity domain: the mocked signed-in user.

pub mod profile;

pub use profile::{ProfileUpdate, UserProfile};

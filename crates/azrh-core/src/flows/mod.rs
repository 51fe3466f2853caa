//! Operator-facing flows, one per CLI operation, written against the
//! capability ports so they run identically over the real collaborators and
//! the scripted fakes.

pub mod compare;
pub mod create;

pub use compare::{compare_releases, compare_with_defaults, currently_deployed};
pub use create::{create_release, CreateOptions};

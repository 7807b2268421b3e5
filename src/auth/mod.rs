//! Authorization module.
//!
//! Permission strings are carried through the tree untouched; whether a
//! source holds one is the host's decision. The dispatcher never calls
//! into this module.

mod permissions;

pub use permissions::{is_permitted, AllowAll, Authorizer, StaticPermissions};

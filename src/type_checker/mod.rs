//! Type resolution and semantic analysis module.
//!
//! This module resolves the types of a parsed compilation unit in place.
//! It walks the tree in textual order while:
//!
//! - Registering imported types and members
//! - Resolving type names, including unions and intersections
//! - Inferring expression types and binding references to definitions
//! - Checking invocations, member access and assignments
//!
//! Every resolved slot is filled once. Failures are reported and replaced
//! by an error type, so one mistake is reported once.

pub mod context;
pub mod members;
pub mod type_checker;
pub mod types;

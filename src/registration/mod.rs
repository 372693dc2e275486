//! Argument registration
//!
//! The [`Registrar`] walks a callable's inspected parameters, classifies each
//! annotation and lets the resulting handler add its [`ArgumentSpec`]s. Flags
//! of callable-typed parameters cannot be known yet; those handlers enqueue a
//! [`DelayedRegistration`] that the resolver runs once the selector's value
//! has been parsed.

pub mod naming;
pub mod registrar;
pub mod spec;

pub use naming::{flag_name, is_flattened, DomainPath};
pub use registrar::Registrar;
pub use spec::{ArgumentSpec, DelayedRegistration, SpecKind};

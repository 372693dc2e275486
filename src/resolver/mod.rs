//! Delay resolver
//!
//! Flags of a callable-typed parameter's candidates cannot be registered until
//! the selector flag has been parsed. The resolver runs a fixed-point loop:
//!
//! 1. parse the tokens addressed to currently known flags into the namespace,
//!    carrying unrecognized tokens into the next pass;
//! 2. stop when no delayed registration is pending;
//! 3. otherwise run every pending registration (which may enqueue deeper
//!    ones) and go back to 1.
//!
//! Intermediate passes never enforce required flags. The pass count is
//! bounded; a callable that keeps requiring itself fails with
//! `RegistrationCycle` instead of looping.

pub mod builder;
pub mod tokens;

pub use builder::CliBuilder;
pub use tokens::{split_known, TokenSplit};

use crate::config::AppSettings;
use crate::error::{ArgtreeError, ArgtreeResult};
use crate::namespace::{Binding, FlatNamespace};
use crate::registration::{ArgumentSpec, DomainPath, Registrar, SpecKind};
use crate::signature::Callable;
use crate::value::Value;
use clap::ArgMatches;
use std::sync::Arc;
use tracing::{debug, trace};

/// Drives registration and partial parsing until no registration is pending
pub struct DelayResolver<'a> {
    settings: &'a AppSettings,
    registrar: Registrar,
    namespace: FlatNamespace,
    passes: usize,
}

impl<'a> DelayResolver<'a> {
    /// Register `root`'s parameters and bind it as the namespace root
    pub fn new(settings: &'a AppSettings, root: &Arc<Callable>) -> ArgtreeResult<Self> {
        let domain = DomainPath::root(root.name());
        let mut registrar = Registrar::new();
        if settings.version.is_some() {
            registrar = registrar.reserve("version");
        }
        registrar.register_callable(root, &domain)?;

        let mut namespace = FlatNamespace::new();
        namespace.insert(domain, Binding::Selected(Arc::clone(root)));

        Ok(Self {
            settings,
            registrar,
            namespace,
            passes: 0,
        })
    }

    /// Run the fixed-point loop over `tokens`, returning the tokens no pass recognized
    pub fn resolve(&mut self, tokens: Vec<String>) -> ArgtreeResult<Vec<String>> {
        let cli = CliBuilder::new(self.settings);
        let mut input = tokens;

        loop {
            if self.passes >= self.settings.max_passes {
                let pending = self
                    .registrar
                    .pending()
                    .iter()
                    .map(|d| d.key.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(ArgtreeError::RegistrationCycle {
                    passes: self.passes,
                    pending,
                });
            }
            self.passes += 1;

            let split = split_known(&input, self.registrar.specs());
            trace!(pass = self.passes, known = ?split.known, leftover = ?split.leftover, "parsing pass");

            let matches = cli
                .pass_command(self.registrar.specs())
                .try_get_matches_from(&split.known)?;
            collect_matches(&matches, self.registrar.specs(), &mut self.namespace);
            input = split.leftover;

            if !self.registrar.has_pending() {
                break;
            }

            for delayed in self.registrar.take_pending() {
                match self.namespace.selected(&delayed.selector) {
                    Some(callable) => {
                        debug!(key = %delayed.key, selected = callable.name(), "running delayed registration");
                        self.registrar.register_callable(&callable, &delayed.selector)?;
                    }
                    None => trace!(key = %delayed.key, "selector unset, dropping delayed registration"),
                }
            }
        }

        debug!(passes = self.passes, flags = self.registrar.specs().len(), "resolution settled");
        Ok(input)
    }

    /// Parse passes executed so far
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Registered flags
    pub fn registrar(&self) -> &Registrar {
        &self.registrar
    }

    /// Namespace accumulated across passes
    pub fn namespace(&self) -> &FlatNamespace {
        &self.namespace
    }
}

/// Copy parsed values for `specs` out of `matches` into `namespace`.
///
/// Omitted flags fall back to their default unless an earlier pass already
/// bound them. Selector values name a candidate; the value parser has already
/// rejected anything else.
pub fn collect_matches(
    matches: &ArgMatches,
    specs: &[ArgumentSpec],
    namespace: &mut FlatNamespace,
) {
    for spec in specs {
        let provided = if matches.contains_id(&spec.flag) {
            match spec.kind {
                SpecKind::Multi { tuple } => {
                    let items: Vec<Value> = matches
                        .get_many::<Value>(&spec.flag)
                        .map(|values| values.cloned().collect())
                        .unwrap_or_default();
                    Some(if tuple { Value::Tuple(items) } else { Value::List(items) })
                }
                _ => matches.get_one::<Value>(&spec.flag).cloned(),
            }
        } else {
            None
        };

        let value = match provided {
            Some(value) => value,
            None if namespace.contains(&spec.dest) => continue,
            None => match spec.default.value() {
                Some(default) => default.clone(),
                None => continue,
            },
        };

        let binding = match (&spec.kind, &value) {
            (SpecKind::Selector { .. }, Value::Str(name)) => match spec.select(name) {
                Some(callable) => Binding::Selected(callable),
                None => Binding::Literal(value),
            },
            _ => Binding::Literal(value),
        };
        namespace.insert(spec.dest.clone(), binding);
    }
}

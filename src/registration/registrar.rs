//! Argument registration engine

use super::naming::DomainPath;
use super::spec::{ArgumentSpec, DelayedRegistration};
use crate::error::{ArgtreeError, ArgtreeResult};
use crate::signature::{inspect, Callable, PAYLOAD_KEY};
use crate::types::classify;
use tracing::{debug, trace};

/// Flag names the flag parser always claims for itself
const BUILTIN_FLAGS: [&str; 1] = ["help"];

/// Accumulates argument specs and pending delayed registrations
#[derive(Debug)]
pub struct Registrar {
    specs: Vec<ArgumentSpec>,
    pending: Vec<DelayedRegistration>,
    reserved: Vec<String>,
}

impl Default for Registrar {
    fn default() -> Self {
        Self {
            specs: Vec::new(),
            pending: Vec::new(),
            reserved: BUILTIN_FLAGS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Registrar {
    /// Create an empty registrar
    pub fn new() -> Self {
        Self::default()
    }

    /// Also refuse `flag`, e.g. `version` when the command prints a version
    pub fn reserve(mut self, flag: impl Into<String>) -> Self {
        let flag = flag.into();
        if !self.reserved.contains(&flag) {
            self.reserved.push(flag);
        }
        self
    }

    /// Register every parameter of `callable` under `domain`
    pub fn register_callable(&mut self, callable: &Callable, domain: &DomainPath) -> ArgtreeResult<()> {
        debug!(callable = callable.name(), domain = %domain, "registering parameters");
        for param in inspect(callable) {
            if param.name == PAYLOAD_KEY {
                return Err(ArgtreeError::collision(format!(
                    "`{}` declares a parameter named `{}`, which is reserved for the keyword payload",
                    callable.name(),
                    PAYLOAD_KEY
                )));
            }
            let node = classify(&param.annotation)?;
            node.register(self, domain.child(&param.name), param.default)?;
        }
        Ok(())
    }

    /// Add a flag; flag names and namespace keys must be unique
    pub fn add_spec(&mut self, spec: ArgumentSpec) -> ArgtreeResult<()> {
        if spec.flag.is_empty() {
            return Err(ArgtreeError::collision(format!(
                "`{}` resolves to an empty flag name",
                spec.dest
            )));
        }
        if self.reserved.contains(&spec.flag) {
            return Err(ArgtreeError::collision(format!(
                "`{}` resolves to --{}, which the flag parser reserves",
                spec.dest, spec.flag
            )));
        }
        if let Some(existing) = self.specs.iter().find(|s| s.flag == spec.flag) {
            return Err(ArgtreeError::collision(format!(
                "--{} is claimed by both `{}` and `{}`",
                spec.flag, existing.dest, spec.dest
            )));
        }
        if self.specs.iter().any(|s| s.dest == spec.dest) {
            return Err(ArgtreeError::collision(format!(
                "`{}` is registered twice",
                spec.dest
            )));
        }
        trace!(flag = %spec.flag, metavar = %spec.metavar, "added argument");
        self.specs.push(spec);
        Ok(())
    }

    /// Enqueue a delayed registration
    pub fn defer(&mut self, delayed: DelayedRegistration) -> ArgtreeResult<()> {
        if self.pending.iter().any(|d| d.key == delayed.key) {
            return Err(ArgtreeError::collision(format!(
                "delayed registration `{}` is already pending",
                delayed.key
            )));
        }
        trace!(key = %delayed.key, "deferred registration");
        self.pending.push(delayed);
        Ok(())
    }

    /// Remove and return every pending registration in enqueue order
    pub fn take_pending(&mut self) -> Vec<DelayedRegistration> {
        std::mem::take(&mut self.pending)
    }

    /// Whether any registration is pending
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Pending registrations
    pub fn pending(&self) -> &[DelayedRegistration] {
        &self.pending
    }

    /// Registered flags in registration order
    pub fn specs(&self) -> &[ArgumentSpec] {
        &self.specs
    }

    /// Look up a flag by name
    pub fn find(&self, flag: &str) -> Option<&ArgumentSpec> {
        self.specs.iter().find(|s| s.flag == flag)
    }
}

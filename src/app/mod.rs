//! Application façade
//!
//! Owns the registry of top-level callables. With a single callable its
//! parameters become the top-level flags; with several (or when
//! `always_subcommands` is set) the first token names the callable to run.
//!
//! # Example
//!
//! ```no_run
//! use argtree::prelude::*;
//!
//! let mut app = App::new("greet");
//! app.register(
//!     Callable::new("greet", |args| {
//!         let name: String = args.get("name")?;
//!         Ok(Value::from(format!("hello {}", name)))
//!     })
//!     .param("name", Annotation::string())
//!     .build(),
//! )?;
//! let result = app.run_from(["--name", "world"])?;
//! assert_eq!(result, Value::from("hello world"));
//! # Ok::<(), argtree::error::ArgtreeError>(())
//! ```

pub mod registry;

pub use registry::Registry;

use crate::config::AppSettings;
use crate::error::{ArgtreeError, ArgtreeResult};
use crate::namespace::{reconstruct, Binding, CallTree, FlatNamespace};
use crate::registration::DomainPath;
use crate::resolver::{collect_matches, split_known, CliBuilder, DelayResolver};
use crate::signature::Callable;
use crate::value::Value;
use std::sync::Arc;
use tracing::debug;

/// Outcome of a successful parse, ready to invoke
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Final flat namespace, keyed by domain path
    pub namespace: FlatNamespace,
    /// Reconstructed call tree
    pub tree: CallTree,
}

impl Resolution {
    /// Invoke the root call
    pub fn invoke(&self) -> ArgtreeResult<Value> {
        self.tree.invoke()
    }
}

/// Registry of callables plus the settings that shape the generated CLI
pub struct App {
    settings: AppSettings,
    registry: Registry,
}

impl App {
    /// Create an application with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_settings(AppSettings::named(name))
    }

    /// Create an application from explicit settings
    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            settings,
            registry: Registry::new(),
        }
    }

    /// Create an application from a TOML settings file
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> ArgtreeResult<Self> {
        Ok(Self::with_settings(AppSettings::from_toml_file(path)?))
    }

    /// Application settings
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Registered callables
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register a top-level callable
    pub fn register(&mut self, callable: impl Into<Arc<Callable>>) -> ArgtreeResult<Arc<Callable>> {
        self.registry.register(callable.into())
    }

    /// Whether the first token selects the callable
    pub fn subcommand_mode(&self) -> bool {
        self.settings.always_subcommands || self.registry.len() > 1
    }

    /// Parse `args` strictly; unrecognized tokens are an error
    pub fn parse_from<I, T>(&self, args: I) -> ArgtreeResult<Resolution>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let (resolution, _) = self.resolve(args.into_iter().map(Into::into).collect(), true)?;
        Ok(resolution)
    }

    /// Parse `args`, returning unrecognized tokens instead of failing on them
    pub fn parse_known_from<I, T>(&self, args: I) -> ArgtreeResult<(Resolution, Vec<String>)>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.resolve(args.into_iter().map(Into::into).collect(), false)
    }

    /// Parse the process arguments and invoke the resolved call
    pub fn run(&self) -> ArgtreeResult<Value> {
        self.run_from(std::env::args().skip(1))
    }

    /// Parse `args` and invoke the resolved call
    pub fn run_from<I, T>(&self, args: I) -> ArgtreeResult<Value>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.parse_from(args)?.invoke()
    }

    /// Like [`App::run`], but report errors and exit the process.
    ///
    /// Parse errors (including help and version output) go through clap and
    /// exit with its code; anything else exits with 1.
    pub fn run_or_exit(&self) -> Value {
        match self.run() {
            Ok(value) => value,
            Err(ArgtreeError::ArgumentParse(err)) => err.exit(),
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(err.exit_code());
            }
        }
    }

    fn resolve(&self, tokens: Vec<String>, strict: bool) -> ArgtreeResult<(Resolution, Vec<String>)> {
        if self.registry.is_empty() {
            return Err(ArgtreeError::config("no callables registered"));
        }
        let cli = CliBuilder::new(&self.settings);
        let subcommands = self.subcommand_mode();

        let (root, rest) = if subcommands {
            match tokens.first().and_then(|t| self.registry.get(t)) {
                Some(root) => (Arc::clone(root), tokens[1..].to_vec()),
                None => {
                    // Let clap report the missing or unknown sub-command
                    cli.final_subcommands(self.registry.callables(), None, &[])
                        .try_get_matches_from(&tokens)?;
                    return Err(ArgtreeError::config("no sub-command selected"));
                }
            }
        } else {
            match self.registry.callables().first() {
                Some(root) => (Arc::clone(root), tokens),
                None => return Err(ArgtreeError::config("no callables registered")),
            }
        };

        let mut resolver = DelayResolver::new(&self.settings, &root)?;
        let unresolved = resolver.resolve(rest.clone())?;
        debug!(
            callable = root.name(),
            passes = resolver.passes(),
            unresolved = unresolved.len(),
            "delay resolution finished"
        );
        let specs = resolver.registrar().specs();

        let (final_tokens, leftover) = if strict {
            (rest, Vec::new())
        } else {
            let split = split_known(&rest, specs);
            (split.known, split.leftover)
        };

        let mut namespace = FlatNamespace::new();
        namespace.insert(DomainPath::root(root.name()), Binding::Selected(Arc::clone(&root)));

        if subcommands {
            let args = std::iter::once(root.name().to_string()).chain(final_tokens);
            let matches = cli
                .final_subcommands(self.registry.callables(), Some(root.name()), specs)
                .try_get_matches_from(args)?;
            let sub = matches.subcommand_matches(root.name()).ok_or_else(|| {
                ArgtreeError::config(format!("sub-command `{}` was not matched", root.name()))
            })?;
            collect_matches(sub, specs, &mut namespace);
        } else {
            let matches = cli.final_command(specs).try_get_matches_from(final_tokens)?;
            collect_matches(&matches, specs, &mut namespace);
        }

        let tree = reconstruct(&namespace)?;
        Ok((Resolution { namespace, tree }, leftover))
    }
}

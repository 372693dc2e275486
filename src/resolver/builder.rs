//! CLI builder - converts argument specs to a clap Command

use crate::config::AppSettings;
use crate::registration::{ArgumentSpec, SpecKind};
use crate::signature::Callable;
use clap::builder::ValueParser;
use clap::{Arg, ArgAction, Command};
use std::sync::Arc;

/// Builds clap commands from registered argument specs
pub struct CliBuilder<'a> {
    settings: &'a AppSettings,
}

impl<'a> CliBuilder<'a> {
    /// Create a builder for the given application settings
    pub fn new(settings: &'a AppSettings) -> Self {
        Self { settings }
    }

    /// Top-level command without arguments
    pub fn base(&self) -> Command {
        let mut app = Command::new(self.settings.name.clone()).no_binary_name(true);

        if let Some(about) = &self.settings.about {
            app = app.about(about.clone());
        }

        if let Some(version) = &self.settings.version {
            app = app.version(version.clone());
        }

        app
    }

    /// Command for one resolver pass: every flag optional
    pub fn pass_command(&self, specs: &[ArgumentSpec]) -> Command {
        self.base().args(specs.iter().map(|s| Self::build_arg(s, false)))
    }

    /// Command for the final parse: flags without defaults required
    pub fn final_command(&self, specs: &[ArgumentSpec]) -> Command {
        self.base().args(specs.iter().map(|s| Self::build_arg(s, true)))
    }

    /// Final command in sub-command mode.
    ///
    /// Every registered callable becomes a sub-command; only `selected`
    /// carries the resolved flags.
    pub fn final_subcommands(
        &self,
        registry: &[Arc<Callable>],
        selected: Option<&str>,
        specs: &[ArgumentSpec],
    ) -> Command {
        let mut app = self
            .base()
            .subcommand_required(true)
            .arg_required_else_help(true)
            .disable_help_subcommand(true);

        for callable in registry {
            let mut cmd = Command::new(callable.name().to_string());

            if let Some(about) = callable.description() {
                cmd = cmd.about(about.to_string());
            }

            if selected == Some(callable.name()) {
                cmd = cmd.args(specs.iter().map(|s| Self::build_arg(s, true)));
            }

            app = app.subcommand(cmd);
        }

        app
    }

    /// Build a single argument
    pub fn build_arg(spec: &ArgumentSpec, enforce_required: bool) -> Arg {
        let node = Arc::clone(&spec.node);
        let parser = move |token: &str| node.parse(token);

        let mut arg = Arg::new(spec.flag.clone())
            .long(spec.flag.clone())
            .value_name(spec.metavar.clone())
            .help(spec.help())
            .value_parser(ValueParser::new(parser))
            .allow_negative_numbers(true)
            .required(enforce_required && spec.is_required());

        // Set argument action based on shape
        arg = match spec.kind {
            SpecKind::Multi { .. } => arg.action(ArgAction::Append).num_args(0..),
            SpecKind::Scalar | SpecKind::Selector { .. } => arg
                .action(ArgAction::Set)
                .num_args(1)
                .overrides_with(spec.flag.clone()),
        };

        arg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{DomainPath, Registrar};
    use crate::signature::Annotation;
    use crate::value::Value;

    fn registrar() -> Registrar {
        let f = Callable::new("f", |_| Ok(Value::None))
            .param("x", Annotation::int())
            .param_with_default("y", Annotation::string(), Value::None)
            .param("xs", Annotation::list(Annotation::int()));
        let mut registrar = Registrar::new();
        registrar.register_callable(&f, &DomainPath::root("f")).unwrap();
        registrar
    }

    fn settings() -> AppSettings {
        AppSettings {
            name: "test".to_string(),
            version: Some("1.0.0".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_base() {
        let settings = settings();
        let app = CliBuilder::new(&settings).base();
        assert_eq!(app.get_name(), "test");
        assert_eq!(app.get_version(), Some("1.0.0"));
    }

    #[test]
    fn test_build_arg_required_only_when_enforced() {
        let registrar = registrar();
        let x = registrar.find("x").unwrap();
        assert!(!CliBuilder::build_arg(x, false).is_required_set());
        assert!(CliBuilder::build_arg(x, true).is_required_set());

        let y = registrar.find("y").unwrap();
        assert!(!CliBuilder::build_arg(y, true).is_required_set());
    }

    #[test]
    fn test_build_arg_value_name() {
        let registrar = registrar();
        let arg = CliBuilder::build_arg(registrar.find("xs").unwrap(), true);
        assert_eq!(arg.get_id(), "xs");
        assert_eq!(arg.get_long(), Some("xs"));
        assert_eq!(arg.get_value_names(), Some(vec!["[int]".into()].as_slice()));
    }

    #[test]
    fn test_final_command_parses_typed_values() {
        let settings = settings();
        let registrar = registrar();
        let matches = CliBuilder::new(&settings)
            .final_command(registrar.specs())
            .try_get_matches_from(["--x", "5", "--xs", "1", "2", "--xs", "3"])
            .unwrap();

        assert_eq!(matches.get_one::<Value>("x"), Some(&Value::Int(5)));
        let xs: Vec<_> = matches.get_many::<Value>("xs").unwrap().cloned().collect();
        assert_eq!(xs, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_final_command_rejects_bad_token() {
        let settings = settings();
        let registrar = registrar();
        let err = CliBuilder::new(&settings)
            .final_command(registrar.specs())
            .try_get_matches_from(["--x", "five", "--xs"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_final_command_requires_missing() {
        let settings = settings();
        let registrar = registrar();
        let err = CliBuilder::new(&settings)
            .final_command(registrar.specs())
            .try_get_matches_from(["--xs"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_repeated_scalar_overrides() {
        let settings = settings();
        let registrar = registrar();
        let matches = CliBuilder::new(&settings)
            .pass_command(registrar.specs())
            .try_get_matches_from(["--x", "1", "--x", "2"])
            .unwrap();
        assert_eq!(matches.get_one::<Value>("x"), Some(&Value::Int(2)));
    }
}

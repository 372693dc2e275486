//! Integration tests for the application façade
//!
//! Drives complete command lines through registration, resolution,
//! reconstruction and invocation.

use argtree::prelude::*;
use clap::error::ErrorKind;
use std::sync::{Arc, Mutex};

fn parse_kind(err: ArgtreeError) -> ErrorKind {
    match err {
        ArgtreeError::ArgumentParse(e) => e.kind(),
        other => panic!("Expected parse error, got {:?}", other),
    }
}

fn single(callable: Arc<Callable>) -> App {
    let mut app = App::new("test");
    app.register(callable).unwrap();
    app
}

fn f() -> Arc<Callable> {
    Callable::new("f", |args| {
        let x: i64 = args.get("x")?;
        let y: Option<String> = args.opt("y")?;
        Ok(Value::Map(
            [
                ("x".to_string(), Value::Int(x)),
                ("y".to_string(), Value::from(y)),
            ]
            .into_iter()
            .collect(),
        ))
    })
    .param("x", Annotation::int())
    .param("y", Annotation::optional(Annotation::string()))
    .build()
}

fn xy(x: i64, y: Option<&str>) -> Value {
    Value::Map(
        [
            ("x".to_string(), Value::Int(x)),
            ("y".to_string(), Value::from(y)),
        ]
        .into_iter()
        .collect(),
    )
}

#[test]
fn test_optional_omitted_defaults_to_none() {
    let app = single(f());
    assert_eq!(app.run_from(["--x", "5"]).unwrap(), xy(5, None));
}

#[test]
fn test_optional_supplied_behaves_as_inner() {
    let app = single(f());
    assert_eq!(app.run_from(["--x", "5", "--y", "hi"]).unwrap(), xy(5, Some("hi")));
    assert_eq!(app.run_from(["--y=hi", "--x=-2"]).unwrap(), xy(-2, Some("hi")));
}

#[test]
fn test_missing_required_flag_exits_nonzero() {
    let app = single(f());
    let err = app.run_from(["--y", "hi"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert_eq!(parse_kind(err), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_invalid_primitive_token() {
    let app = single(f());
    let err = app.run_from(["--x", "five"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert_eq!(parse_kind(err), ErrorKind::ValueValidation);
}

#[test]
fn test_subcommand_dispatch_invokes_only_selected() {
    let calls = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&calls);
    let alpha = Callable::new("alpha", move |args| {
        let n: i64 = args.get("n")?;
        log.lock().unwrap().push(format!("alpha {}", n));
        Ok(Value::Int(n))
    })
    .param("n", Annotation::int())
    .build();

    let log = Arc::clone(&calls);
    let beta = Callable::new("beta", move |args| {
        let m: String = args.get("m")?;
        log.lock().unwrap().push(format!("beta {}", m));
        Ok(Value::from(m))
    })
    .param("m", Annotation::string())
    .build();

    let mut app = App::new("test");
    app.register(alpha).unwrap();
    app.register(beta).unwrap();
    assert!(app.subcommand_mode());

    assert_eq!(app.run_from(["beta", "--m", "hi"]).unwrap(), Value::from("hi"));
    assert_eq!(*calls.lock().unwrap(), vec!["beta hi".to_string()]);

    // alpha's flags are not visible under beta
    let err = app.run_from(["beta", "--m", "hi", "--n", "1"]).unwrap_err();
    assert_eq!(parse_kind(err), ErrorKind::UnknownArgument);
}

#[test]
fn test_unknown_subcommand_fails() {
    let mut app = App::new("test");
    app.register(Callable::new("alpha", |_| Ok(Value::None)).build()).unwrap();
    app.register(Callable::new("beta", |_| Ok(Value::None)).build()).unwrap();

    let err = app.run_from(["gamma"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert_eq!(parse_kind(err), ErrorKind::InvalidSubcommand);
}

fn vowels() -> Arc<Callable> {
    Callable::new("vowels", |args| Ok(args.value("x").cloned().unwrap_or(Value::None)))
        .param("x", Annotation::list(Annotation::literal(["a", "i", "u", "e", "o"])))
        .build()
}

#[test]
fn test_value_set_list_repeated_and_multi_token() {
    let app = single(vowels());
    let expected = Value::List(vec![Value::from("a"), Value::from("e")]);
    assert_eq!(app.run_from(["--x", "a", "--x", "e"]).unwrap(), expected);
    assert_eq!(app.run_from(["--x", "a", "e"]).unwrap(), expected);
}

#[test]
fn test_value_set_rejects_non_member() {
    let app = single(vowels());
    let err = app.run_from(["--x", "z"]).unwrap_err();
    assert_eq!(parse_kind(err), ErrorKind::ValueValidation);
}

#[test]
fn test_sequences_keep_input_order_for_any_length() {
    let app = single(
        Callable::new("seq", |args| {
            let xs = args.value("xs").cloned().unwrap_or(Value::None);
            let ts = args.value("ts").cloned().unwrap_or(Value::None);
            Ok(Value::List(vec![xs, ts]))
        })
        .param("xs", Annotation::list(Annotation::int()))
        .param_with_default("ts", Annotation::tuple_of(Annotation::float()), Value::None)
        .build(),
    );

    let run = |args: &[&str]| app.run_from(args.iter().copied()).unwrap();

    assert_eq!(run(&["--xs"]), Value::List(vec![Value::List(vec![]), Value::None]));
    assert_eq!(
        run(&["--xs", "7"]),
        Value::List(vec![Value::List(vec![Value::Int(7)]), Value::None])
    );
    assert_eq!(
        run(&["--xs", "3", "1", "2", "--ts", "0.5", "-1.5"]),
        Value::List(vec![
            Value::List(vec![Value::Int(3), Value::Int(1), Value::Int(2)]),
            Value::Tuple(vec![Value::Float(0.5), Value::Float(-1.5)]),
        ])
    );
}

#[test]
fn test_union_first_parser_wins() {
    let app = single(
        Callable::new("u", |args| Ok(args.value("v").cloned().unwrap_or(Value::None)))
            .param("v", Annotation::union(vec![Annotation::int(), Annotation::string()]))
            .build(),
    );
    assert_eq!(app.run_from(["--v", "12"]).unwrap(), Value::Int(12));
    assert_eq!(app.run_from(["--v", "twelve"]).unwrap(), Value::from("twelve"));
}

#[test]
fn test_boolean_words() {
    let app = single(
        Callable::new("b", |args| Ok(Value::Bool(args.get("flag")?)))
            .param("flag", Annotation::boolean())
            .build(),
    );
    assert_eq!(app.run_from(["--flag", "YES"]).unwrap(), Value::Bool(true));
    assert_eq!(app.run_from(["--flag", "f"]).unwrap(), Value::Bool(false));
    assert!(app.run_from(["--flag", "maybe"]).is_err());
}

#[test]
fn test_path_flag_creates_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let target = dir.path().join("out");
    let app = single(
        Callable::new("p", |args| {
            let out: std::path::PathBuf = args.get("out")?;
            Ok(Value::Bool(out.is_dir()))
        })
        .param(
            "out",
            Annotation::path_with(PathOptions {
                ensure: true,
                mkdir: true,
                ..PathOptions::default()
            }),
        )
        .build(),
    );

    let token = target.to_string_lossy().to_string();
    assert_eq!(app.run_from(["--out", token.as_str()]).unwrap(), Value::Bool(true));
}

#[test]
fn test_payload_receives_literal_view() {
    let app = single(
        Callable::new("report", |args| {
            Ok(Value::Map(args.payload().cloned().unwrap_or_default()))
        })
        .param("x", Annotation::int())
        .param_with_default("tags", Annotation::list(Annotation::string()), Value::List(vec![]))
        .with_payload()
        .build(),
    );

    let Value::Map(payload) = app.run_from(["--x", "3", "--tags", "a", "b"]).unwrap() else {
        panic!("Expected payload map");
    };
    assert_eq!(payload.get("x"), Some(&Value::Int(3)));
    assert_eq!(
        payload.get("tags"),
        Some(&Value::List(vec![Value::from("a"), Value::from("b")]))
    );
    assert_eq!(payload.len(), 2);
}

#[test]
fn test_registration_errors_surface_at_parse() {
    let mixed = single(
        Callable::new("m", |_| Ok(Value::None))
            .param(
                "v",
                Annotation::literal(vec![Value::Int(1), Value::from("a")]),
            )
            .build(),
    );
    assert!(matches!(
        mixed.parse_from(Vec::<String>::new()),
        Err(ArgtreeError::ValueSetTypeMismatch { .. })
    ));

    let fixed_tuple = single(
        Callable::new("t", |_| Ok(Value::None))
            .param("v", Annotation::Tuple(vec![Annotation::int(), Annotation::string()]))
            .build(),
    );
    let err = fixed_tuple.parse_from(Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, ArgtreeError::UnsupportedType(_)));
    assert_eq!(err.exit_code(), 1);

    let clash = single(
        Callable::new("c", |_| Ok(Value::None))
            .param("x", Annotation::int())
            .param("x_", Annotation::int())
            .build(),
    );
    assert!(matches!(
        clash.parse_from(["--x", "1"]),
        Err(ArgtreeError::NameCollision(_))
    ));

    let help = single(
        Callable::new("h", |_| Ok(Value::None))
            .param("help", Annotation::string())
            .build(),
    );
    assert!(matches!(
        help.run_from(["--help", "x"]),
        Err(ArgtreeError::NameCollision(_))
    ));

    let reserved = single(
        Callable::new("r", |_| Ok(Value::None))
            .param(PAYLOAD_KEY, Annotation::int())
            .build(),
    );
    assert!(matches!(
        reserved.parse_from(Vec::<String>::new()),
        Err(ArgtreeError::NameCollision(_))
    ));
}

#[test]
fn test_body_error_is_invocation_error() {
    let app = single(
        Callable::new("fails", |_| anyhow::bail!("boom"))
            .build(),
    );
    let err = app.run_from(Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, ArgtreeError::Invocation { .. }));
    assert!(err.to_string().contains("boom"));
}

#[cfg(feature = "config")]
#[test]
fn test_app_from_settings_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("app.toml");
    std::fs::write(&path, "name = \"tool\"\nalways_subcommands = true\n").unwrap();

    let mut app = App::from_toml_file(&path).unwrap();
    app.register(f()).unwrap();
    assert_eq!(app.settings().name, "tool");
    assert_eq!(app.run_from(["f", "--x", "1"]).unwrap(), xy(1, None));
}

//! Demo CLI built from typed callables
//!
//! ```text
//! argtree-demo f --x 5 --y hi
//! argtree-demo vowels --x a e
//! argtree-demo train --model lstm --model-hidden 64 --opt adam --beta1 0.8
//! argtree-demo report --model gru --epochs 3
//! ```
//!
//! Set `RUST_LOG=argtree=debug` to watch registration and resolver passes.

use argtree::prelude::*;
use std::sync::Arc;

fn models() -> Vec<Arc<Callable>> {
    let lstm = Callable::new("lstm", |args| {
        let hidden: i64 = args.get("hidden")?;
        let bidirectional: bool = args.get("bidirectional")?;
        Ok(Value::from(format!("lstm(hidden={}, bidirectional={})", hidden, bidirectional)))
    })
    .about("Long short-term memory network")
    .param_with_default("hidden", Annotation::int(), 128i64)
    .param_with_default("bidirectional", Annotation::boolean(), false)
    .build();

    let gru = Callable::new("gru", |args| {
        let layers: i64 = args.get("layers")?;
        Ok(Value::from(format!("gru(layers={})", layers)))
    })
    .about("Gated recurrent unit network")
    .param_with_default("layers", Annotation::int(), 1i64)
    .build();

    vec![lstm, gru]
}

fn optimizers() -> Vec<Arc<Callable>> {
    let sgd = Callable::new("sgd", |args| {
        let momentum: f64 = args.get("momentum")?;
        Ok(Value::from(format!("sgd(momentum={})", momentum)))
    })
    .param_with_default("momentum", Annotation::float(), 0.9)
    .build();

    let adam = Callable::new("adam", |args| {
        let beta1: f64 = args.get("beta1")?;
        Ok(Value::from(format!("adam(beta1={})", beta1)))
    })
    .param_with_default("beta1", Annotation::float(), 0.9)
    .build();

    vec![sgd, adam]
}

fn train() -> Arc<Callable> {
    Callable::new("train", |args| {
        let model: String = args.get("model")?;
        let optimizer: String = args.get("opt_")?;
        let lr: f64 = args.get("learning_rate")?;
        let epochs: i64 = args.get("epochs")?;
        let checkpoint: Option<std::path::PathBuf> = args.opt("checkpoint")?;
        Ok(Value::Map(
            [
                ("model".to_string(), Value::from(model)),
                ("optimizer".to_string(), Value::from(optimizer)),
                ("learning_rate".to_string(), Value::Float(lr)),
                ("epochs".to_string(), Value::Int(epochs)),
                ("checkpoint".to_string(), Value::from(checkpoint)),
            ]
            .into_iter()
            .collect(),
        ))
    })
    .about("Train a model")
    .param("model", Annotation::one_of(&models()))
    .param_with_default("opt_", Annotation::one_of(&optimizers()), "sgd")
    .param_with_default("learning_rate", Annotation::float(), 0.01)
    .param_with_default("epochs", Annotation::int(), 10i64)
    .param_with_default(
        "checkpoint",
        Annotation::path_with(PathOptions {
            expanduser: true,
            ..PathOptions::default()
        }),
        Value::None,
    )
    .build()
}

fn report() -> Arc<Callable> {
    Callable::new("report", |args| {
        Ok(Value::Map(args.payload().cloned().unwrap_or_default()))
    })
    .about("Print every parsed flag")
    .param("model", Annotation::one_of(&models()))
    .param_with_default("epochs", Annotation::int(), 10i64)
    .with_payload()
    .build()
}

fn vowels() -> Arc<Callable> {
    Callable::new("vowels", |args| {
        let x: Vec<String> = args.get("x")?;
        Ok(Value::from(x.join("")))
    })
    .about("Join the given vowels")
    .param("x", Annotation::list(Annotation::literal(["a", "i", "u", "e", "o"])))
    .build()
}

fn f() -> Arc<Callable> {
    Callable::new("f", |args| {
        let x: i64 = args.get("x")?;
        let y: Option<String> = args.opt("y")?;
        Ok(Value::from(format!("f(x={}, y={:?})", x, y)))
    })
    .param("x", Annotation::int())
    .param("y", Annotation::optional(Annotation::string()))
    .build()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut app = App::with_settings(AppSettings {
        about: Some("Typed callables as a command line".to_string()),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        ..AppSettings::named("argtree-demo")
    });

    for callable in [train(), report(), vowels(), f()] {
        if let Err(err) = app.register(callable) {
            eprintln!("Error: {}", err);
            std::process::exit(err.exit_code());
        }
    }

    let result = app.run_or_exit();
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("Error: failed to render result: {}", err);
            std::process::exit(1);
        }
    }
}

//! argtree - derive a command-line interface from typed callable signatures
//!
//! Callables declare their parameters with type annotations. argtree turns
//! every parameter into a `--flag`, parses the command line, and invokes the
//! call tree the flags describe:
//!
//! - **`types`** - annotation classifier and the per-shape handlers
//! - **`registration`** - flag naming and argument registration
//! - **`resolver`** - fixed-point loop for flags that depend on earlier flags
//! - **`namespace`** - call-tree reconstruction and invocation
//! - **`app`** - registry of top-level callables and sub-command dispatch
//! - **`config`** - application settings, loadable from TOML (`config` feature)
//!
//! A parameter annotated with a choice of callables becomes a selector flag;
//! the selected callable's own parameters appear under the selector's name.
//!
//! # Example
//!
//! ```no_run
//! use argtree::prelude::*;
//!
//! let lstm = Callable::new("lstm", |args| {
//!     let hidden: i64 = args.get("hidden")?;
//!     Ok(Value::from(format!("lstm({})", hidden)))
//! })
//! .param_with_default("hidden", Annotation::int(), 128i64)
//! .build();
//!
//! let gru = Callable::new("gru", |_| Ok(Value::from("gru")))
//!     .param_with_default("layers", Annotation::int(), 1i64)
//!     .build();
//!
//! let train = Callable::new("train", |args| {
//!     let model: String = args.get("model")?;
//!     let lr: f64 = args.get("lr")?;
//!     Ok(Value::from(format!("{} @ {}", model, lr)))
//! })
//! .param("model", Annotation::one_of(&[lstm, gru]))
//! .param_with_default("lr", Annotation::float(), 0.01)
//! .build();
//!
//! let mut app = App::new("train");
//! app.register(train)?;
//!
//! // --model lstm --model-hidden 64 --lr 0.1
//! let result = app.run()?;
//! println!("{}", result);
//! # Ok::<(), argtree::error::ArgtreeError>(())
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod error;
pub mod namespace;
pub mod registration;
pub mod resolver;
pub mod signature;
pub mod types;
pub mod value;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::{App, Resolution};
    pub use crate::config::AppSettings;
    pub use crate::error::{ArgtreeError, ArgtreeResult};
    pub use crate::signature::{Annotation, Arguments, Callable, PAYLOAD_KEY};
    pub use crate::types::PathOptions;
    pub use crate::value::{FromValue, Value};
}

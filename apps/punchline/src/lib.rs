//! Punchline: turns a comic's life story into a tight 10 via Gemini.
//!
//! A presentation layer drives a `Session`: it renders whatever `Session::view` says, feeds
//! edits into `Session::form_mut`, and awaits `Session::submit`.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use punchline::config::Config;
//! use punchline::generation::GeminiRoutineGenerator;
//! use punchline::llm_client::LlmClient;
//! use punchline::session::Session;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! punchline::telemetry::init_tracing(&config)?;
//!
//! let generator = GeminiRoutineGenerator::new(LlmClient::new(), Arc::new(config));
//! let mut session = Session::new(generator);
//! session.start()?;
//! session.form_mut().load_demo(0)?;
//! if session.submit().await.is_ok() {
//!     println!("{}", punchline::render::render_routine(session.routine().unwrap()));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod form;
pub mod generation;
pub mod llm_client;
pub mod models;
pub mod render;
pub mod session;
pub mod telemetry;

pub use errors::AppError;

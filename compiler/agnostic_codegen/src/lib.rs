//! Agnostic Code Generation
//!
//! Lowers the agnostic IR into source text. A generator drives a [`Builder`]:
//! it declares models, enums, and methods, then fills method bodies through
//! block handles. A [`Backend`] is a builder that finalizes into one file.
//!
//! # Architecture
//!
//! ```text
//! generator ──► Builder calls ──► CodeArena (blocks of lines)
//!                                      │
//!                 OrphanRegistry ──────┤  (splice methods into models)
//!                                      ▼
//!                               render ──► StringEmitter ──► file
//! ```
//!
//! Builder calls can also be recorded into an [`agnostic_ir::Program`] and
//! replayed into several backends with [`replay`].
//!
//! # Backends
//!
//! - [`TypeScriptBackend`]: classes with member methods; needs orphan splicing.
//! - [`GoBackend`]: structs with receiver methods; width-sensitive numerics.

mod arena;
mod config;
mod contract;
mod emitter;
pub mod golang;
mod literal;
mod orphan;
mod recorder;
mod replay;
mod stack;
pub mod typescript;

use std::sync::Once;

pub use arena::{Code, CodeArena};
pub use config::{BackendArgs, BackendKind};
pub use contract::{Backend, BodyBuilder, Builder};
pub use emitter::{output_path, write_document, Emitter, FileEmitter, Indent, StringEmitter};
pub use golang::GoBackend;
pub use literal::{finite_float, quote};
pub use orphan::OrphanRegistry;
pub use replay::replay;
pub use stack::ensure_sufficient_stack;
pub use typescript::TypeScriptBackend;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`, e.g. `RUST_LOG=agnostic_codegen=debug`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

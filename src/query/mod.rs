//! Statement compilation
//!
//! Turns edge entities into parameterized statements:
//! - single create, update and delete ([`compiler`])
//! - batched create with collision-free naming ([`batch`])
//!
//! Output is always a [`CompiledStatement`]: statement text where user
//! supplied names are backtick-quoted and values are `$` parameters, plus the
//! parameter values.

pub mod batch;
pub mod compiler;
pub mod cypher;
pub mod options;
pub mod statement;

pub use batch::{batch_alias, compile_batch_create};
pub use compiler::{compile, compile_create, compile_delete, compile_update};
pub use options::{CompileOptions, Operation};
pub use statement::CompiledStatement;

//! # Chef VM
//!
//! The execution engine: runs a parsed program's main recipe to
//! completion, producing the rendered dish strings (spec §4.4, §4.5).
//! Everything upstream of this crate — lexing, parsing, instruction
//! decoding — is pure; this is the only crate that owns mutable state.

pub mod config;
mod dispatch_table;
mod engine;
pub mod error;

pub use config::ExecutionConfig;
pub use engine::{CookingState, Engine};
pub use error::ChefError;

/// Run a full Chef source text with the default execution configuration.
pub fn execute(source: &str) -> Result<Vec<String>, ChefError> {
    execute_with_config(source, &ExecutionConfig::default())
}

/// Run a full Chef source text, returning the rendered dishes in serving
/// order (spec §4.4 "Serves").
pub fn execute_with_config(source: &str, config: &ExecutionConfig) -> Result<Vec<String>, ChefError> {
    let statements = chef_lexer::normalize(source);
    let program = chef_parser::parse_program(&statements)?;
    let mut engine = Engine::new(&program, program.main(), config);
    engine.run()?;
    Ok(engine.into_diners())
}

pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::{CompileError, CompileResult, LexError, SemanticError, SyntaxError};

use emitter::CEmitter;
use lexer::Lexer;
use parser::Translator;

#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Print each grammar rule entered to stderr.
    pub trace: bool,
}

/// Transpile Teeny Tiny source code to C
pub fn transpile(source: &str) -> CompileResult<String> {
    transpile_with(source, &Options::default())
}

pub fn transpile_with(source: &str, options: &Options) -> CompileResult<String> {
    translate(source, options).map(|emitter| emitter.output())
}

/// Run the whole translation and hand back the filled emitter, ready to be
/// written out. Nothing is returned on error, so no partial output escapes.
pub fn translate(source: &str, options: &Options) -> CompileResult<CEmitter> {
    let mut emitter = CEmitter::new();
    Translator::new(Lexer::new(source), &mut emitter)?
        .with_trace(options.trace)
        .program()?;
    Ok(emitter)
}

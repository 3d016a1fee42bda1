// teeny-c: Teeny Tiny BASIC → C transpiler
// Reads one source file and writes the generated C program.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use teeny_c::lexer::Lexer;
use teeny_c::{translate, Options};

/// Translate a Teeny Tiny BASIC program into a single C source file
#[derive(Parser)]
#[command(name = "teeny-c")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Source file to translate
    source: PathBuf,

    /// Where to write the generated C
    #[arg(short, long, default_value = "out.c")]
    output: PathBuf,

    /// Print the generated C to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Dump the token stream and exit
    #[arg(long)]
    tokens: bool,

    /// Trace grammar rules on stderr and report the written file
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(&cli) {
        eprintln!("{}", error);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let path = cli.source.display();
    let source = fs::read_to_string(&cli.source)
        .map_err(|e| format!("Could not open file: {}: {}", path, e))?;

    if cli.tokens {
        for token in Lexer::new(&source) {
            let token = token.map_err(|e| format!("{}: {}", path, e))?;
            println!("{} '{}'", token.kind, token.lexeme.escape_default());
        }
        return Ok(());
    }

    let options = Options {
        trace: cli.verbose,
    };
    let emitter = translate(&source, &options).map_err(|e| format!("{}: {}", path, e))?;

    if cli.stdout {
        print!("{}", emitter.output());
    } else {
        emitter.write_file(&cli.output).map_err(|e| {
            format!("Could not write file: {}: {}", cli.output.display(), e)
        })?;
        if cli.verbose {
            eprintln!("Wrote {}", cli.output.display());
        }
    }

    Ok(())
}

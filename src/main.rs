use clap::{Parser as ClapParser, Subcommand};
use morph_expr::cli::{self, CliError, EvalOptions, EvalOutcome};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "morph")]
#[command(about = "Morph - evaluate rule and formula expressions against JSON")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile and evaluate an expression
    Eval {
        /// The expression to evaluate
        expression: String,

        /// JSON scope (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only check syntax and print the referenced identifiers
        #[arg(long)]
        syntax_only: bool,

        /// Evaluate without the standard functions
        #[arg(long)]
        no_stdlib: bool,
    },

    /// List the scope paths an expression reads
    Identifiers {
        /// The expression to inspect
        expression: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'morph docs' to list categories)
        category: String,
    },
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            expression,
            input,
            pretty,
            syntax_only,
            no_stdlib,
        } => run_eval(EvalOptions {
            expression,
            input,
            pretty,
            syntax_only,
            no_stdlib,
        }),
        Commands::Identifiers { expression } => {
            cli::list_identifiers(&expression).map(|paths| {
                for path in paths {
                    println!("{}", path);
                }
            })
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_eval(mut options: EvalOptions) -> Result<(), CliError> {
    if options.input.is_none() && !options.syntax_only && !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        options.input = Some(buffer);
    }

    let output = match cli::execute_eval(&options)? {
        EvalOutcome::SyntaxValid(identifiers) => serde_json::Value::from(identifiers),
        EvalOutcome::Success(output) => output,
    };
    let json = if options.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);
    Ok(())
}

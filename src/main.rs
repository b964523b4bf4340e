use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use ir_compare::cmd;
use std::path::PathBuf;
use std::process;

/// Optimized vs unoptimized compiler IR comparison
///
/// ir-compare compiles each module twice, once with optimizations disabled
/// and once enabled, saves both IR dumps and reports how many lines the
/// optimizer removed.
#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare optimized and unoptimized IR for a list of modules
    Compare {
        /// Modules to compare (defaults to `modules` in .ir-compare.toml)
        #[arg(value_name = "MODULE")]
        modules: Vec<PathBuf>,

        /// Compiler executable
        #[arg(short, long)]
        compiler: Option<String>,

        /// Directory receiving the IR artifacts
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Kill a compiler run after this many seconds
        #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Characters of IR shown per preview
        #[arg(short, long, value_name = "N")]
        preview_limit: Option<usize>,

        /// Config file to use instead of ./.ir-compare.toml
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a starter .ir-compare.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Compare {
            modules,
            compiler,
            output_dir,
            timeout,
            preview_limit,
            config,
            json,
        }) => cmd::cmd_compare(&cmd::CompareOptions {
            modules,
            compiler,
            output_dir,
            timeout_secs: timeout,
            preview_limit,
            config,
            json,
        }),
        Some(Commands::Init { force }) => cmd::cmd_init(force),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell, &mut Cli::command());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("ir-compare v{}", env!("CARGO_PKG_VERSION"));
            println!("Optimized vs unoptimized compiler IR comparison\n");
            println!("Usage: ir-compare <COMMAND>\n");
            println!("Commands:");
            println!("  compare      Compare optimized and unoptimized IR");
            println!("  init         Write a starter .ir-compare.toml");
            println!("  completions  Generate shell completions");
            println!("\nRun 'ir-compare <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use ir_compare::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}

use clap::{Parser, Subcommand};
use langcache::I18n;
use langcache_cli::{DumpFormat, TranslateRequest, open_backends, render_dump, run_translate};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every loaded translation.
    Dump {
        /// Translation files or YAML directories, highest priority first
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = DumpFormat::Json)]
        format: DumpFormat,
    },

    /// Resolve one key and print the formatted text.
    Translate {
        /// Translation files or YAML directories, highest priority first
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<String>,

        /// Locale to translate into
        #[arg(short, long)]
        locale: String,

        /// Translation key
        #[arg(short, long)]
        key: String,

        /// Text used when no locale has the key
        #[arg(short, long)]
        default: Option<String>,

        /// Prefix for keys created on a miss
        #[arg(short, long)]
        scope: Option<String>,

        /// Extra locales probed before the default locale
        #[arg(long = "fallback")]
        fallbacks: Vec<String>,

        /// Save keys created on a miss to the first writable input
        #[arg(long)]
        persist: bool,

        /// Positional arguments for the message
        #[arg(last = true)]
        args: Vec<String>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), String> {
    match args.commands {
        Commands::Dump { input, format } => {
            let backends = open_backends(&input)?;
            let i18n = I18n::new(backends).map_err(|e| e.to_string())?;
            let dump = i18n.dump_all().map_err(|e| e.to_string())?;
            print!("{}", render_dump(&dump, format)?);
            if format == DumpFormat::Json {
                println!();
            }
        }
        Commands::Translate {
            input,
            locale,
            key,
            default,
            scope,
            fallbacks,
            persist,
            args,
        } => {
            let request = TranslateRequest {
                inputs: input,
                locale,
                key,
                default,
                scope,
                fallbacks,
                args,
                persist,
            };
            println!("{}", run_translate(&request)?);
        }
    }
    Ok(())
}

fn main() {
    init_logging();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use anyhow::Result;
use effortmap::cli::{self, Commands};
use effortmap::commands::{self, AnalyzeConfig};
use effortmap::observability::init_tracing;

fn main() -> Result<()> {
    let cli = cli::parse_args();

    match cli.command {
        Commands::Analyze {
            tickets,
            events,
            config,
            format,
            output,
            jobs,
            verbosity,
        } => {
            init_tracing(verbosity);
            commands::handle_analyze(AnalyzeConfig {
                tickets,
                events,
                config,
                format,
                output,
                jobs,
            })
        }
        Commands::Init { force } => {
            init_tracing(0);
            commands::init_config(force)
        }
        Commands::ValidateConfig { path, verbosity } => {
            init_tracing(verbosity);
            commands::validate_config_file(&path)
        }
    }
}

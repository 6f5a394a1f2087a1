mod classify_cmd;
mod config;
mod generate_cmd;
mod serve_cmd;
mod themes_cmd;
#[cfg(test)]
mod test_util;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use director_core::OutputFormat;

#[derive(Parser)]
#[command(
    name = "director",
    version,
    about = "Turn a story idea into a 15-minute viral video production plan"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a director config file with the default settings
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate a production plan from a story idea
    Generate {
        /// Story idea text (or use --file)
        idea: Option<String>,
        /// Read the story idea from a file
        #[arg(long, conflicts_with = "idea")]
        file: Option<String>,
        /// Output format: json, markdown, or html (default from config)
        #[arg(long)]
        format: Option<OutputFormat>,
        /// Write to a file instead of stdout (a directory gets plan-<fingerprint>.<ext>)
        #[arg(long, short)]
        output: Option<String>,
    },
    /// Show which theme category an idea falls into, with keyword scores
    Classify {
        /// Story idea text
        idea: String,
    },
    /// List theme categories and their keywords
    Themes {
        /// Show theme, setting and cast for each category
        #[arg(long)]
        verbose: bool,
    },
    /// Start the web server with the interactive plan page and JSON API
    Serve {
        /// Address to bind (overrides DIRECTOR_BIND and config)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (overrides DIRECTOR_PORT and config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print shell completions to stdout
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Execute the `director init` command: write config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile::default();
    config::save_config_to(&path, &cfg)?;

    println!("Config written to {}", path.display());
    println!("  server.bind = {}", cfg.server.bind);
    println!("  server.port = {}", cfg.server.port);
    println!("  output.format = {}", cfg.output.format);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(force)?;
        }
        Commands::Generate {
            idea,
            file,
            format,
            output,
        } => {
            let file_config = config::load_config()?;
            let format = config::resolve_format(format, file_config.as_ref())?;
            generate_cmd::run_generate(
                idea.as_deref(),
                file.as_deref(),
                format,
                output.as_deref(),
            )?;
        }
        Commands::Classify { idea } => {
            classify_cmd::run_classify(&idea)?;
        }
        Commands::Themes { verbose } => {
            themes_cmd::run_themes(verbose)?;
        }
        Commands::Serve { bind, port } => {
            let file_config = config::load_config()?;
            let settings = config::resolve_serve(bind.as_deref(), port, file_config.as_ref())?;
            serve_cmd::run_serve(&settings.bind, settings.port).await?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "director", &mut std::io::stdout());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_parses_format_and_output() {
        let cli = Cli::try_parse_from([
            "director", "generate", "A hero rises", "--format", "md", "-o", "plan.md",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                idea,
                file,
                format,
                output,
            } => {
                assert_eq!(idea.as_deref(), Some("A hero rises"));
                assert!(file.is_none());
                assert_eq!(format, Some(OutputFormat::Markdown));
                assert_eq!(output.as_deref(), Some("plan.md"));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn generate_rejects_idea_with_file() {
        let result = Cli::try_parse_from(["director", "generate", "idea", "--file", "idea.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn generate_rejects_unknown_format() {
        let result = Cli::try_parse_from(["director", "generate", "idea", "--format", "pdf"]);
        assert!(result.is_err());
    }

    #[test]
    fn serve_flags_are_optional() {
        let cli = Cli::try_parse_from(["director", "serve", "--port", "3000"]).unwrap();
        match cli.command {
            Commands::Serve { bind, port } => {
                assert!(bind.is_none());
                assert_eq!(port, Some(3000));
            }
            _ => panic!("expected serve"),
        }
    }
}

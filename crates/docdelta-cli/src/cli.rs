use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docdelta",
    about = "Render word diffs of markdown documents into reviewable HTML",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./docdelta.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a diff file and print the rendered documents
    Render(FileArgs),
    /// Parse a diff file and print its heading outline
    Outline(FileArgs),
    /// Look up and render the stored diff for a version pair
    Show(ShowArgs),
    /// List known versions, newest first
    Versions,
    /// Show which versions may be selected on each side
    Allowed(AllowedArgs),
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct FileArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub target: Option<String>,
    /// Read from the combined diff directory
    #[arg(long)]
    pub combined: bool,
}

#[derive(Args)]
pub struct AllowedArgs {
    pub source: String,
    pub target: String,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Overrides the configured bind address
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Answer cross-origin requests from any origin
    #[arg(long)]
    pub cors: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_render() {
        let cli = Cli::try_parse_from(["docdelta", "render", "changes.diff"]).unwrap();
        if let Command::Render(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("changes.diff"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn render_requires_file() {
        assert!(Cli::try_parse_from(["docdelta", "render"]).is_err());
    }

    #[test]
    fn parse_outline() {
        let cli = Cli::try_parse_from(["docdelta", "outline", "x.diff"]).unwrap();
        assert!(matches!(cli.command, Command::Outline(_)));
    }

    #[test]
    fn parse_show_defaults() {
        let cli = Cli::try_parse_from(["docdelta", "show"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert!(args.source.is_none());
            assert!(args.target.is_none());
            assert!(!args.combined);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_show_combined() {
        let cli = Cli::try_parse_from(["docdelta", "show", "--source", "v6.1", "--target", "v6.2", "--combined"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.source.as_deref(), Some("v6.1"));
            assert_eq!(args.target.as_deref(), Some("v6.2"));
            assert!(args.combined);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_versions() {
        let cli = Cli::try_parse_from(["docdelta", "versions"]).unwrap();
        assert!(matches!(cli.command, Command::Versions));
    }

    #[test]
    fn parse_allowed() {
        let cli = Cli::try_parse_from(["docdelta", "allowed", "v6.1", "v6.5"]).unwrap();
        if let Command::Allowed(args) = cli.command {
            assert_eq!(args.source, "v6.1");
            assert_eq!(args.target, "v6.5");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["docdelta", "serve", "--bind", "0.0.0.0:8080", "--cors"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".parse().unwrap()));
            assert!(args.cors);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn serve_rejects_bad_bind() {
        assert!(Cli::try_parse_from(["docdelta", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn parse_globals() {
        let cli = Cli::try_parse_from(["docdelta", "versions", "--verbose", "--format", "json", "-c", "dd.toml"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(cli.config, Some(PathBuf::from("dd.toml")));
    }
}

use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for bookner-server
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config_file: Option<PathBuf>,
    pub max_request_size: Option<usize>,
    pub enable_cors: Option<bool>,
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        Self::parse_from(std::env::args_os())
    }

    /// Parse arguments from an explicit iterator (first item is the binary name)
    pub fn parse_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command().get_matches_from(args);

        // Handle special help for environment variables
        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self {
            host: matches.get_one::<String>("host").cloned(),
            port: matches.get_one::<u16>("port").copied(),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            max_request_size: matches.get_one::<usize>("max_request_size").copied(),
            enable_cors: if matches.get_flag("no_cors") {
                Some(false)
            } else {
                None
            },
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }

    fn command() -> Command {
        Command::new("bookner-server")
            .version(bookner::VERSION)
            .about("HTTP API server for bookner entity extraction")
            .long_about(
                r#"Bookner Server runs a domain-specific and a general-purpose NER model
over submitted text and returns one merged list of title, edition, volume,
ISBN and author spans.

Model backends and the merge policy are set in the configuration file
(bookner.toml / .yaml / .json) or through BOOKNER_EXTRACTION__* environment
variables. Command line arguments take precedence over environment variables.

Examples:
  bookner-server --port 8000
  bookner-server --config bookner.toml --log-level debug"#,
            )
            .arg(
                Arg::new("host")
                    .long("host")
                    .value_name("ADDR")
                    .help("Address to bind to")
                    .long_help(
                        "IP address for the HTTP server to bind to.
Environment variable: BOOKNER_HOST",
                    )
                    .value_hint(ValueHint::Hostname),
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: BOOKNER_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .long_help(
                        "Path to a TOML, YAML or JSON file with model and merge
settings. Without it the default locations (bookner.toml, .bookner/config.toml, ...)
are searched.
Environment variable: BOOKNER_CONFIG_FILE",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("max_request_size")
                    .long("max-request-size")
                    .value_name("BYTES")
                    .help("Maximum request body size in bytes")
                    .long_help(
                        "Maximum size allowed for HTTP request bodies.
Larger requests will be rejected.
Environment variable: BOOKNER_MAX_REQUEST_SIZE",
                    )
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("no_cors")
                    .long("no-cors")
                    .help("Disable the permissive CORS layer")
                    .long_help(
                        "Do not add CORS headers to responses.
Environment variable: BOOKNER_ENABLE_CORS",
                    )
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: RUST_LOG",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .long_help(
                        "Display a comprehensive list of all environment variables
that can be used to configure the server.",
                    )
                    .action(ArgAction::SetTrue),
            )
    }

    /// Print comprehensive environment variable help
    fn print_env_help() {
        println!("Bookner Server Environment Variables");
        println!("====================================");
        println!();
        println!("Server Configuration:");
        println!("  BOOKNER_HOST                      - Bind address (default: 0.0.0.0)");
        println!("  BOOKNER_PORT                      - Server port (default: 8000)");
        println!(
            "  BOOKNER_MAX_REQUEST_SIZE          - Max request body size in bytes (default: 2MB)"
        );
        println!("  BOOKNER_CONFIG_FILE               - Path to config file");
        println!("  BOOKNER_ENABLE_CORS               - Add permissive CORS headers (default: true)");
        println!();
        println!("Models (nested keys use a double underscore):");
        println!("  BOOKNER_EXTRACTION__DOMAIN__NAME");
        println!("  BOOKNER_EXTRACTION__DOMAIN__BACKEND__TYPE      - remote | pattern");
        println!("  BOOKNER_EXTRACTION__DOMAIN__BACKEND__ENDPOINT  - Model URL (remote)");
        println!("  BOOKNER_EXTRACTION__GENERAL__BACKEND__TYPE     - remote | pattern");
        println!("  BOOKNER_EXTRACTION__GENERAL__BACKEND__ENDPOINT - Model URL (remote)");
        println!();
        println!("Merge Policy:");
        println!("  BOOKNER_EXTRACTION__MERGE__CONTEXT_WINDOW      - Characters per side (default: 20)");
        println!("  BOOKNER_EXTRACTION__MERGE__ORPHAN_POLICY       - drop | append (default: drop)");
        println!();
        println!("Logging:");
        println!(
            "  RUST_LOG                          - Logging level (error, warn, info, debug, trace)"
        );
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
        println!("Use --help for CLI argument documentation.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_arguments() {
        let args = CliArgs::parse_from([
            "bookner-server",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
            "--config",
            "bookner.toml",
            "--max-request-size",
            "1024",
            "--no-cors",
            "--log-level",
            "debug",
        ]);

        assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(args.port, Some(9000));
        assert_eq!(args.config_file, Some(PathBuf::from("bookner.toml")));
        assert_eq!(args.max_request_size, Some(1024));
        assert_eq!(args.enable_cors, Some(false));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_no_arguments() {
        let args = CliArgs::parse_from(["bookner-server"]);
        assert!(args.port.is_none());
        assert!(args.enable_cors.is_none());
    }
}

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};

pub const ARG_SESSION_SECRET: &str = "session-secret";
pub const ARG_TOKEN_TTL_SECONDS: &str = "token-ttl-seconds";
pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";
pub const ARG_FRONTEND_BASE_URL: &str = "frontend-base-url";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_SECRET)
                .long(ARG_SESSION_SECRET)
                .help("Secret key used to sign session tokens")
                .env("SESAMO_SESSION_SECRET")
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOKEN_TTL_SECONDS)
                .long(ARG_TOKEN_TTL_SECONDS)
                .help("Email verification token TTL in seconds")
                .env("SESAMO_TOKEN_TTL_SECONDS")
                .default_value("86400")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long(ARG_SESSION_TTL_SECONDS)
                .help("Session token TTL in seconds")
                .env("SESAMO_SESSION_TTL_SECONDS")
                .default_value("86400")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_FRONTEND_BASE_URL)
                .long(ARG_FRONTEND_BASE_URL)
                .help("Frontend base URL used for verification links")
                .env("SESAMO_FRONTEND_BASE_URL")
                .default_value("http://localhost:3000"),
        )
}

pub struct Options {
    pub session_secret: String,
    pub token_ttl_seconds: i64,
    pub session_ttl_seconds: i64,
    pub frontend_base_url: String,
}

impl Options {
    /// Read the auth arguments out of validated matches.
    ///
    /// # Errors
    /// Returns an error if a required argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let session_secret = matches
            .get_one::<String>(ARG_SESSION_SECRET)
            .cloned()
            .context("missing required argument: --session-secret")?;
        let token_ttl_seconds = matches
            .get_one::<i64>(ARG_TOKEN_TTL_SECONDS)
            .copied()
            .context("missing required argument: --token-ttl-seconds")?;
        let session_ttl_seconds = matches
            .get_one::<i64>(ARG_SESSION_TTL_SECONDS)
            .copied()
            .context("missing required argument: --session-ttl-seconds")?;
        let frontend_base_url = matches
            .get_one::<String>(ARG_FRONTEND_BASE_URL)
            .cloned()
            .context("missing required argument: --frontend-base-url")?;

        Ok(Self {
            session_secret,
            token_ttl_seconds,
            session_ttl_seconds,
            frontend_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_defaults() {
        let command = crate::cli::commands::new();
        let matches = command.get_matches_from(vec![
            "sesamo",
            "--dsn",
            "postgres://localhost/sesamo",
            "--session-secret",
            "not-a-real-secret",
        ]);
        let options = Options::parse(&matches).expect("options");
        assert_eq!(options.session_secret, "not-a-real-secret");
        assert_eq!(options.token_ttl_seconds, 86400);
        assert_eq!(options.session_ttl_seconds, 86400);
        assert_eq!(options.frontend_base_url, "http://localhost:3000");
    }

    #[test]
    fn parse_reads_overrides() {
        let command = crate::cli::commands::new();
        let matches = command.get_matches_from(vec![
            "sesamo",
            "--dsn",
            "postgres://localhost/sesamo",
            "--session-secret",
            "not-a-real-secret",
            "--token-ttl-seconds",
            "600",
            "--session-ttl-seconds",
            "1200",
            "--frontend-base-url",
            "https://accounts.example.com",
        ]);
        let options = Options::parse(&matches).expect("options");
        assert_eq!(options.token_ttl_seconds, 600);
        assert_eq!(options.session_ttl_seconds, 1200);
        assert_eq!(options.frontend_base_url, "https://accounts.example.com");
    }
}

//! `routefind interactive`: a line-driven session over stdin.
//!
//! A plain line searches that domain. Lines starting with `:` are session
//! commands:
//!
//! ```text
//! routefind> example.com
//! routefind> :next
//! routefind> :page 3
//! routefind> :theme light
//! routefind> :export routes.txt
//! routefind> :quit
//! ```

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use is_terminal::IsTerminal;
use routefind_core::export::{export_file_name, write_routes};
use routefind_core::{Config, Phase, RouteSearch, RouteStore, Theme, paginate};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use super::common::{emit_notices, export_summary, run_search};
use crate::cli::InteractiveArgs;
use crate::output::{HintStyle, OutputFormat, Palette, RouteListFormatter, RouteListing, TextFormatter};

const PROMPT: &str = "routefind> ";

const HELP: &str = "\
Enter a domain (e.g. example.com) to map its routes.

Commands:
  :next              next page
  :prev              previous page
  :page N            jump to page N
  :reset             clear results
  :export [PATH]     write routes to a text file
  :theme MODE        light, dark or system
  :help              show this help
  :quit              leave the session
";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Search a domain.
    Search(String),
    /// Show the next page.
    Next,
    /// Show the previous page.
    Prev,
    /// Jump to a page.
    Page(usize),
    /// Reset the store.
    Reset,
    /// Write the export, optionally to an explicit path.
    Export(Option<PathBuf>),
    /// Switch the card palette.
    Theme(Theme),
    /// Print the command list.
    Help,
    /// Leave the session.
    Quit,
}

impl SessionCommand {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Some(Self::Search(line.to_string())));
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest.trim()).filter(|rest| !rest.is_empty())),
            None => (command, None),
        };
        let parsed = match (name, arg) {
            ("next" | "n", None) => Self::Next,
            ("prev" | "p", None) => Self::Prev,
            ("page", Some(n)) => match n.parse::<usize>() {
                Ok(page) if page > 0 => Self::Page(page),
                _ => return Err(format!("'{n}' is not a valid page number")),
            },
            ("page", None) => return Err("usage: :page N".to_string()),
            ("reset", None) => Self::Reset,
            ("export", path) => Self::Export(path.map(PathBuf::from)),
            ("theme", Some(mode)) => Self::Theme(Theme::from_str(mode).map_err(|e| e.to_string())?),
            ("theme", None) => return Err("usage: :theme light|dark|system".to_string()),
            ("help" | "h" | "?", None) => Self::Help,
            ("quit" | "q" | "exit", None) => Self::Quit,
            ("next" | "n" | "prev" | "p" | "reset" | "help" | "h" | "?" | "quit" | "q" | "exit", Some(extra)) => {
                return Err(format!("':{name}' takes no arguments (got '{extra}')"));
            },
            _ => return Err(format!("unknown command ':{command}' (try :help)")),
        };
        Ok(Some(parsed))
    }
}

/// Presentation settings for a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Routes per page.
    pub page_size: usize,
    /// Card palette selection.
    pub theme: Theme,
    /// Show the spinner while searching.
    pub spinner: bool,
    /// Print the prompt before each line.
    pub prompt: bool,
    /// Suppress toasts.
    pub quiet: bool,
}

/// Interactive session state: the store plus the current page and theme.
pub struct Session<S> {
    store: RouteStore<S>,
    page: usize,
    options: SessionOptions,
    palette: Palette,
}

impl<S: RouteSearch> Session<S> {
    /// Start a session around `store`.
    pub fn new(store: RouteStore<S>, options: SessionOptions) -> Self {
        Self {
            store,
            page: 1,
            palette: Palette::detect(options.theme),
            options,
        }
    }

    /// Read lines from `input` until EOF or `:quit`.
    pub async fn run<R, W, E>(&mut self, input: R, out: &mut W, err: &mut E) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        E: Write,
    {
        let mut lines = input.lines();
        if self.options.prompt {
            writeln!(out, "Enter a domain to map its routes, or :help for commands.")?;
        }
        loop {
            if self.options.prompt {
                write!(out, "{PROMPT}")?;
                out.flush()?;
            }
            let Some(line) = lines.next_line().await? else {
                break;
            };
            match SessionCommand::parse(&line) {
                Ok(None) => {},
                Ok(Some(SessionCommand::Quit)) => break,
                Ok(Some(command)) => self.handle(command, out, err).await?,
                Err(message) => writeln!(err, "{} {message}", "✗".red())?,
            }
        }
        debug!("interactive session ended");
        Ok(())
    }

    /// Apply one command.
    pub async fn handle<W: Write, E: Write>(
        &mut self,
        command: SessionCommand,
        out: &mut W,
        err: &mut E,
    ) -> Result<()> {
        match command {
            SessionCommand::Search(domain) => {
                run_search(&mut self.store, &domain, self.options.spinner).await;
                self.page = 1;
                emit_notices(&mut self.store, &self.palette, err, self.options.quiet)?;
                self.render(out)?;
            },
            SessionCommand::Next => self.turn_page(self.page.saturating_add(1), out, err)?,
            SessionCommand::Prev => self.turn_page(self.page.saturating_sub(1), out, err)?,
            SessionCommand::Page(page) => self.turn_page(page, out, err)?,
            SessionCommand::Reset => {
                self.store.reset_state();
                self.page = 1;
                writeln!(out, "Session reset.")?;
            },
            SessionCommand::Export(path) => self.export(path, out, err)?,
            SessionCommand::Theme(theme) => {
                self.options.theme = theme;
                self.palette = Palette::detect(theme);
                writeln!(out, "Theme set to {theme}.")?;
            },
            SessionCommand::Help => write!(out, "{HELP}")?,
            SessionCommand::Quit => {},
        }
        Ok(())
    }

    /// The underlying store.
    pub const fn store(&self) -> &RouteStore<S> {
        &self.store
    }

    /// Current 1-based page.
    pub const fn page(&self) -> usize {
        self.page
    }

    fn turn_page<W: Write, E: Write>(&mut self, page: usize, out: &mut W, err: &mut E) -> Result<()> {
        if self.store.phase() != Phase::Success {
            writeln!(err, "{} No routes to page through; search a domain first.", "✗".red())?;
            return Ok(());
        }
        let view = paginate(self.store.routes(), page, self.options.page_size);
        if view.page == self.page && page != self.page {
            let edge = if page > self.page { "last" } else { "first" };
            writeln!(err, "Already on the {edge} page.")?;
            return Ok(());
        }
        self.page = view.page;
        self.render(out)
    }

    fn export<W: Write, E: Write>(
        &mut self,
        path: Option<PathBuf>,
        out: &mut W,
        err: &mut E,
    ) -> Result<()> {
        let (Some(source_url), false) = (self.store.last_searched_url(), self.store.routes().is_empty())
        else {
            writeln!(err, "{} Nothing to export yet; search a domain first.", "✗".red())?;
            return Ok(());
        };

        let now = Utc::now();
        let path = path.unwrap_or_else(|| PathBuf::from(export_file_name(source_url, now)));
        match write_routes(&path, self.store.routes(), source_url, now) {
            Ok(()) => writeln!(out, "{}", export_summary(self.store.routes().len(), &path))?,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "export failed");
                writeln!(err, "{} Export failed: {e}", "✗".red())?;
            },
        }
        Ok(())
    }

    fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.store.phase() {
            Phase::Success => {
                let listing = RouteListing {
                    source_url: self.store.last_searched_url().unwrap_or_default(),
                    view: paginate(self.store.routes(), self.page, self.options.page_size),
                    page_size: self.options.page_size,
                };
                let rendered = RouteListFormatter::new(OutputFormat::Text).format(
                    &listing,
                    &self.palette,
                    HintStyle::Commands,
                )?;
                write!(out, "{rendered}")?;
            },
            Phase::Failed(kind) => {
                let message = self.store.error().unwrap_or("Search failed");
                write!(out, "{}", TextFormatter::render_failure(kind, message))?;
            },
            Phase::Idle | Phase::Searching => {},
        }
        Ok(())
    }
}

/// Run the interactive command on stdin/stdout.
pub async fn execute(args: InteractiveArgs, mut config: Config, quiet: bool) -> Result<()> {
    args.query.apply(&mut config.search);
    let store = super::build_store(&config)?;
    let interactive = std::io::stdin().is_terminal();
    let options = SessionOptions {
        page_size: args
            .page_size
            .map_or(config.display.page_size, usize::from),
        theme: args.theme.map_or(config.display.theme, Theme::from),
        spinner: !quiet && std::io::stderr().is_terminal(),
        prompt: interactive,
        quiet,
    };

    let mut session = Session::new(store, options);
    session
        .run(
            BufReader::new(tokio::io::stdin()),
            &mut std::io::stdout(),
            &mut std::io::stderr(),
        )
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use routefind_core::{
        FailureKind, ProviderEnvelope, RawResult, SearchFailure, SearchOutcome, SearchRequest,
        StoreSettings,
    };

    struct Fake;

    #[async_trait]
    impl RouteSearch for Fake {
        async fn search(&self, request: &SearchRequest) -> SearchOutcome {
            match request.domain.as_str() {
                "denied.com" => SearchOutcome::Failure(SearchFailure {
                    error: "Authentication failed (HTTP 403): Forbidden".into(),
                    is_api_key_error: true,
                    is_recoverable: false,
                }),
                "empty.com" => SearchOutcome::Success(ProviderEnvelope::default()),
                domain => SearchOutcome::Success(ProviderEnvelope::new(
                    (1..=5)
                        .map(|i| RawResult::with_url(format!("https://{domain}/page-{i}")))
                        .collect(),
                )),
            }
        }
    }

    fn session() -> Session<Fake> {
        colored::control::set_override(false);
        let store = RouteStore::new(
            Fake,
            StoreSettings {
                api_key: Some("k".into()),
                ..StoreSettings::default()
            },
        );
        Session::new(
            store,
            SessionOptions {
                page_size: 2,
                theme: Theme::Dark,
                spinner: false,
                prompt: false,
                quiet: false,
            },
        )
    }

    async fn drive(session: &mut Session<Fake>, script: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        session
            .run(script.as_bytes(), &mut out, &mut err)
            .await
            .unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(SessionCommand::parse("   "), Ok(None));
        assert_eq!(
            SessionCommand::parse(" example.com "),
            Ok(Some(SessionCommand::Search("example.com".into())))
        );
        assert_eq!(SessionCommand::parse(":next"), Ok(Some(SessionCommand::Next)));
        assert_eq!(SessionCommand::parse(":page 4"), Ok(Some(SessionCommand::Page(4))));
        assert_eq!(
            SessionCommand::parse(":export out.txt"),
            Ok(Some(SessionCommand::Export(Some(PathBuf::from("out.txt")))))
        );
        assert_eq!(SessionCommand::parse(":export"), Ok(Some(SessionCommand::Export(None))));
        assert_eq!(
            SessionCommand::parse(":theme LIGHT"),
            Ok(Some(SessionCommand::Theme(Theme::Light)))
        );
        assert_eq!(SessionCommand::parse(":q"), Ok(Some(SessionCommand::Quit)));
        assert!(SessionCommand::parse(":page 0").is_err());
        assert!(SessionCommand::parse(":page").is_err());
        assert!(SessionCommand::parse(":theme neon").is_err());
        assert!(SessionCommand::parse(":bogus").is_err());
    }

    #[test]
    fn test_parse_arguments_strictly() {
        assert_eq!(
            SessionCommand::parse(":export  My Routes/site map.txt "),
            Ok(Some(SessionCommand::Export(Some(PathBuf::from("My Routes/site map.txt")))))
        );
        assert_eq!(SessionCommand::parse(":export   "), Ok(Some(SessionCommand::Export(None))));
        assert_eq!(SessionCommand::parse(":page  2 "), Ok(Some(SessionCommand::Page(2))));

        let err = SessionCommand::parse(":next 2").unwrap_err();
        assert!(err.contains("takes no arguments"));
        assert!(SessionCommand::parse(":quit now").is_err());
        assert!(SessionCommand::parse(":reset all").is_err());
        assert!(SessionCommand::parse(":page 4 5").is_err());
        assert!(SessionCommand::parse(":theme light dark").is_err());
    }

    #[tokio::test]
    async fn test_search_and_page_through() {
        let mut session = session();
        let (out, err) = drive(&mut session, "example.com\n:next\n:next\n:next\n:prev\n").await;

        assert!(out.contains("  1. /page-1"));
        assert!(out.contains("  3. /page-3"));
        assert!(out.contains("  5. /page-5"));
        assert!(err.contains("Found 5 routes"));
        assert!(err.contains("Already on the last page."));
        assert_eq!(session.page(), 2);
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let mut session = session();
        let (out, _) = drive(&mut session, ":quit\nexample.com\n").await;
        assert!(out.is_empty());
        assert_eq!(session.store().phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_failures_render_in_session() {
        let mut session = session();
        let (out, err) = drive(&mut session, "denied.com\nempty.com\n").await;
        assert!(out.contains("Error"));
        assert!(out.contains("check your API key"));
        assert!(out.contains("No Routes Found"));
        assert!(err.contains("No routes found for empty.com"));
        assert_eq!(
            session.store().phase(),
            Phase::Failed(FailureKind::NoRoutes)
        );
    }

    #[tokio::test]
    async fn test_paging_without_results() {
        let mut session = session();
        let (_, err) = drive(&mut session, ":next\n:export\n").await;
        assert!(err.contains("No routes to page through"));
        assert!(err.contains("Nothing to export yet"));
    }

    #[tokio::test]
    async fn test_reset_theme_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.txt");
        let mut session = session();
        let script = format!(
            "example.com\n:theme light\n:export {}\n:reset\n",
            path.display()
        );
        let (out, _) = drive(&mut session, &script).await;

        assert!(out.contains("Theme set to light."));
        assert!(out.contains("Exported 5 routes"));
        assert!(out.contains("Session reset."));
        assert_eq!(session.store().phase(), Phase::Idle);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Routes for https://example.com\n"));
        assert!(written.contains("Total routes: 5"));
    }
}

// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   deepwiki-export [OPTIONS] URL [OUTPUT_PATH]
//
// We use the "derive" API: the struct below *is* the CLI definition, and
// clap generates parsing, --help and --version from it.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use encoding_rs::Encoding;

use crate::export::ExportRequest;
use crate::markdown::unescape_separator;

#[derive(Parser, Debug)]
#[command(
    name = "deepwiki-export",
    version,
    about = "Download a DeepWiki (or GitHub) page and save it as Markdown",
    long_about = "deepwiki-export downloads a DeepWiki page, extracts its main content and writes it \
                  as a Markdown file. GitHub repository URLs are rewritten to their DeepWiki \
                  equivalent (github.com/owner/repo -> deepwiki.com/owner/repo)."
)]
pub struct Cli {
    /// The GitHub or DeepWiki URL to export
    ///
    /// Example: https://github.com/rust-lang/rust
    pub url: String,

    /// Output file or directory
    ///
    /// If a directory, the file name is derived from the URL. If omitted,
    /// the file is saved in the current directory with a URL-derived name.
    pub output_path: Option<PathBuf>,

    /// Also save the downloaded HTML
    #[arg(long)]
    pub keep_html: bool,

    /// Output file or directory for the HTML (only used with --keep-html)
    ///
    /// Defaults to <markdown stem>_original.html next to the Markdown file.
    #[arg(long, value_name = "PATH")]
    pub html_output: Option<PathBuf>,

    /// Separator placed between content blocks ('\n' means newline)
    #[arg(long, visible_alias = "sep", value_name = "STRING", default_value = "\\n---\\n")]
    pub separator: String,

    /// Encoding of the downloaded HTML
    #[arg(long, value_name = "ENCODING", default_value = "utf-8", value_parser = parse_encoding)]
    pub html_encoding: &'static Encoding,

    /// Encoding of the Markdown file [default: same as --html-encoding]
    #[arg(long, value_name = "ENCODING", value_parser = parse_encoding)]
    pub md_encoding: Option<&'static Encoding>,

    /// Custom User-Agent for the HTTP request
    #[arg(long, value_name = "STRING")]
    pub user_agent: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Also save each section as its own file in this directory
    #[arg(long, value_name = "DIR")]
    pub split_dir: Option<PathBuf>,

    /// Enable verbose output (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Converts the parsed arguments into a pipeline request
    pub fn into_request(self) -> ExportRequest {
        ExportRequest {
            url: self.url,
            output: self.output_path,
            keep_html: self.keep_html,
            html_output: self.html_output,
            separator: unescape_separator(&self.separator),
            html_encoding: self.html_encoding,
            md_encoding: self.md_encoding,
            user_agent: self.user_agent,
            timeout: Duration::from_secs(self.timeout),
            split_dir: self.split_dir,
        }
    }
}

// Looks up a WHATWG encoding label ("utf-8", "latin1", "shift_jis", ...)
fn parse_encoding(label: &str) -> Result<&'static Encoding, String> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| format!("unknown encoding '{}'", label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1252};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("deepwiki-export").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["https://github.com/o/r"]).unwrap();
        assert_eq!(cli.url, "https://github.com/o/r");
        assert_eq!(cli.output_path, None);
        assert!(!cli.keep_html);
        assert!(!cli.verbose);
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.html_encoding, UTF_8);
        assert_eq!(cli.md_encoding, None);

        let request = cli.into_request();
        assert_eq!(request.separator, "\n---\n");
        assert_eq!(request.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_all_options() {
        let cli = parse(&[
            "-v",
            "--keep-html",
            "--html-output",
            "raw/",
            "--sep",
            "\\n\\n",
            "--html-encoding",
            "latin1",
            "--md-encoding",
            "UTF-8",
            "--user-agent",
            "bot/1.0",
            "--timeout",
            "5",
            "--split-dir",
            "chapters",
            "https://deepwiki.com/o/r",
            "out.md",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.html_encoding, WINDOWS_1252);
        assert_eq!(cli.md_encoding, Some(UTF_8));

        let request = cli.into_request();
        assert_eq!(request.output, Some(PathBuf::from("out.md")));
        assert!(request.keep_html);
        assert_eq!(request.html_output, Some(PathBuf::from("raw/")));
        assert_eq!(request.separator, "\n\n");
        assert_eq!(request.user_agent.as_deref(), Some("bot/1.0"));
        assert_eq!(request.timeout, Duration::from_secs(5));
        assert_eq!(request.split_dir, Some(PathBuf::from("chapters")));
    }

    #[test]
    fn test_separator_long_name() {
        let cli = parse(&["--separator", "***", "https://deepwiki.com/o/r"]).unwrap();
        assert_eq!(cli.into_request().separator, "***");
    }

    #[test]
    fn test_rejects_unknown_encoding() {
        assert!(parse(&["--html-encoding", "klingon", "https://deepwiki.com/o/r"]).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(parse(&["--timeout", "0", "https://deepwiki.com/o/r"]).is_err());
    }

    #[test]
    fn test_url_is_required() {
        assert!(parse(&[]).is_err());
    }
}

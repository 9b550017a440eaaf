use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, Parser, ValueEnum,
	builder::{
		BoolishValueParser, Styles,
		styling::{AnsiColor, Effects},
	},
};

use crate::app_dirs::AppDir;

/// Version banner including the directories glint reads and writes.
fn long_version() -> &'static str {
	let mut details = format!("glint {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	for (label, dir) in [
		("config", AppDir::Config),
		("data", AppDir::Data),
		("log", AppDir::Cache),
	] {
		let _ = writeln!(details, "{label} directory: {}", dir.describe());
	}

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
	name = "glint",
	version,
	long_version = long_version(),
	about = "Paged fuzzy finder for files and file contents",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `glint` binary.
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "GLINT_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip the default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'r',
		long,
		value_name = "PATH",
		help = "Directory to search (default: current directory)"
	)]
	pub(crate) root: Option<PathBuf>,
	#[arg(
		short = 'q',
		long = "query",
		value_name = "QUERY",
		help = "Initial query (default: empty)"
	)]
	pub(crate) initial_query: Option<String>,
	#[arg(
		short = 'm',
		long,
		value_enum,
		help = "Backend to start in (default: files)"
	)]
	pub(crate) mode: Option<ModeArg>,
	#[arg(long, value_name = "THEME", help = "Select a theme by name (default: slate)")]
	pub(crate) theme: Option<String>,
	#[arg(
		long = "page-size",
		value_name = "NUM",
		help = "Items per page (default: list height)"
	)]
	pub(crate) page_size: Option<usize>,
	#[arg(
		long = "preview-position",
		value_name = "POSITION",
		help = "left, right, top, bottom or auto (default: auto)"
	)]
	pub(crate) preview_position: Option<String>,
	#[arg(
		long = "prompt-position",
		value_name = "POSITION",
		help = "top or bottom (default: bottom)"
	)]
	pub(crate) prompt_position: Option<String>,
	#[arg(
		long,
		value_name = "STYLE",
		help = "single, rounded, double or thick (default: single)"
	)]
	pub(crate) border: Option<String>,
	#[arg(
		long,
		value_parser = BoolishValueParser::new(),
		help = "Show the preview panel (default: enabled)"
	)]
	pub(crate) preview: Option<bool>,
	#[arg(
		long = "preview-delay",
		value_name = "MS",
		help = "Preview debounce in milliseconds (default: 100)"
	)]
	pub(crate) preview_delay: Option<u64>,
	#[arg(long, help = "Show the debug panel and ranking scores (default: disabled)")]
	pub(crate) debug: bool,
	#[arg(
		short = 'H',
		long = "hidden",
		value_parser = BoolishValueParser::new(),
		help = "Include hidden files (default: disabled)"
	)]
	pub(crate) hidden: Option<bool>,
	#[arg(
		short = 's',
		long = "follow-symlinks",
		value_parser = BoolishValueParser::new(),
		help = "Follow symbolic links while scanning (default: disabled)"
	)]
	pub(crate) follow_symlinks: Option<bool>,
	#[arg(
		short = 'j',
		long,
		value_name = "NUM",
		help = "Limit the number of indexing threads (default: automatic)"
	)]
	pub(crate) threads: Option<usize>,
	#[arg(
		short = 'd',
		long = "max-depth",
		value_name = "NUM",
		help = "Limit directory traversal depth (default: unlimited)"
	)]
	pub(crate) max_depth: Option<usize>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(
		short = 'v',
		long,
		action = ArgAction::Count,
		help = "Log more detail to the log file (repeatable)"
	)]
	pub(crate) verbose: u8,
	#[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print the result")]
	pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum ModeArg {
	Files,
	Grep,
}

impl ModeArg {
	/// Name understood by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			ModeArg::Files => "files",
			ModeArg::Grep => "grep",
		}
	}
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
/// Output formats supported by the binary.
pub(crate) enum OutputFormat {
	Plain,
	Json,
}

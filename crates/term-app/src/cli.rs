//! Command-line flags: two booleans plus a shell override, parsed with
//! `clap`'s derive API.

use clap::Parser;

/// A terminal emulator: PTY-backed shell, rendered onto a GPU window.
#[derive(Parser, Debug)]
#[command(name = "term", version, about)]
pub struct Args {
    /// Exit on any unsupported escape sequence instead of ignoring it (§7).
    #[arg(short = 'e', long = "exit-on-unknown")]
    pub exit_on_unknown: bool,

    /// Log every byte read from the child to stderr.
    #[arg(short = 'p', long = "print-child")]
    pub print_child: bool,

    /// Override the detected shell instead of using `$SHELL`/`$COMSPEC`.
    #[arg(long)]
    pub shell: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

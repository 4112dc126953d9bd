//! Minimal command line option scanner.
//!
//! Options are registered on a [`Parser`] together with the closure to run
//! when they are seen. Scanning recognizes short options (`-x`), clusters of
//! short options (`-abc`), long options (`--xyz`) and option values, either
//! attached (`-oVALUE`, `--opt=VALUE`) or given as the next argument
//! (`-o VALUE`, `--opt VALUE`).
//!
//! ```
//! let mut flag = false;
//! let mut filename = String::new();
//!
//! let mut parser = optscan::Parser::new();
//! parser
//!     .add(optscan::OptionSpec::switch(('f', "flag"), "Set flag", || flag = true))?
//!     .add(optscan::OptionSpec::value("filename", "Specify filename", |v| {
//!         filename = v.to_string()
//!     }))?
//!     .add_help("example [args]");
//!
//! parser.parse(["example", "-f", "--filename=a.out"])?;
//! drop(parser);
//!
//! assert!(flag);
//! assert_eq!(filename, "a.out");
//! # Ok::<(), optscan::Error>(())
//! ```
//!
//! Tokens that are neither short nor long options are skipped. There is no
//! support for positional arguments, repeated values or subcommands.
//!
//! Errors are returned as [`Error`] values. Command line programs usually
//! want [`Parser::parse_or_exit`] instead, which prints the help page or the
//! error message and terminates the process.

mod help;
mod registry;
mod scan;

use std::{ffi::OsString, io::Write};

pub use crate::{
    registry::{Names, OptionSpec},
    scan::Parser,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while registering options or scanning
/// arguments.
///
/// Option names in the payloads are spelled the way they appear on the
/// command line, with their leading dashes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown option: '{0}'")]
    UnknownOption(String),
    #[error("option '{0}' requires an argument")]
    MissingArgument(String),
    #[error("option '{0}' doesn't allow an argument")]
    UnexpectedValue(String),
    #[error("invalid argument for option '{option}': {reason}")]
    InvalidValue { option: String, reason: String },
    #[error("invalid utf8 in argument for option '{option}': {arg:?}")]
    InvalidUtf8 { option: String, arg: OsString },
    #[error("invalid option spec: {0}")]
    InvalidSpec(String),
    /// `-h` or `--help` was given; carries the rendered help page.
    #[error("{0}")]
    HelpRequested(String),
}

impl Error {
    pub fn is_help(&self) -> bool {
        matches!(self, Error::HelpRequested(_))
    }

    /// Reports the error the way command line tools do and terminates the
    /// process with exit status 1.
    ///
    /// The help page goes to stdout, everything else goes to stderr prefixed
    /// with `program`.
    pub fn exit(self, program: &str) -> ! {
        match self {
            Error::HelpRequested(page) => {
                let mut stdout = std::io::stdout().lock();
                drop(stdout.write_all(page.as_bytes()));
                drop(stdout.flush());
            }
            err => eprintln!("{program}: {err}"),
        }
        std::process::exit(1)
    }
}

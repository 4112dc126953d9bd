use std::ffi::OsString;

use crate::{
    help,
    registry::{Action, Registry},
    Error, OptionSpec, Result,
};

/// Registered options plus the scanning settings.
///
/// Build it once, then call one of the `parse` methods. Scanning borrows the
/// parser mutably, so options can't be added while a scan is running.
#[derive(Debug, Default)]
pub struct Parser<'a> {
    registry: Registry<'a>,
    strict: bool,
}

impl<'a> Parser<'a> {
    pub fn new() -> Parser<'a> {
        Parser::default()
    }

    /// In strict mode `--switch=value` is an error for options that don't
    /// take a value. By default the attached value is ignored.
    pub fn strict(&mut self, yes: bool) -> &mut Parser<'a> {
        self.strict = yes;
        self
    }

    pub fn add(&mut self, spec: OptionSpec<'a>) -> Result<&mut Parser<'a>> {
        self.registry.register(spec)?;
        Ok(self)
    }

    /// Registers `-h, --help`, which stops scanning with
    /// [`Error::HelpRequested`] carrying the help page.
    pub fn add_help(&mut self, usage: impl Into<String>) -> &mut Parser<'a> {
        self.registry.push(OptionSpec::help(usage.into()));
        self
    }

    pub fn options(&self) -> impl Iterator<Item = &OptionSpec<'a>> {
        self.registry.iter()
    }

    /// Renders the help page for all registered options.
    pub fn help(&self, usage: &str) -> String {
        help::render(usage, self.registry.iter())
    }

    /// Scans `args` and runs the action of every option found in it.
    ///
    /// `args[0]` is the program name and is skipped. Returns the number of
    /// actions invoked. The first error stops the scan; actions invoked
    /// before it are not undone.
    pub fn parse<I>(&mut self, args: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<_>>();
        self.scan(&args)
    }

    pub fn parse_or_exit<I>(&mut self, args: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<_>>();
        match self.scan(&args) {
            Ok(invoked) => invoked,
            Err(err) => err.exit(&program_name(&args)),
        }
    }

    pub fn parse_env(&mut self) -> Result<usize> {
        self.parse(std::env::args_os())
    }

    pub fn parse_env_or_exit(&mut self) -> usize {
        self.parse_or_exit(std::env::args_os())
    }

    fn scan(&mut self, args: &[OsString]) -> Result<usize> {
        let mut invoked = 0;
        let mut i = 1;
        while i < args.len() {
            let arg = match args[i].to_str() {
                Some(it) => it,
                None => {
                    let lossy = args[i].to_string_lossy();
                    if !matches!(classify(&lossy), Token::Free) {
                        let option = lossy.split('=').next().unwrap_or_default().to_string();
                        return Err(Error::InvalidUtf8 { option, arg: args[i].clone() });
                    }
                    log::trace!("skipping non-utf8 argument {:?}", args[i]);
                    i += 1;
                    continue;
                }
            };

            match classify(arg) {
                Token::Long { name, attached } => {
                    let option = format!("--{name}");
                    let idx = self
                        .registry
                        .find_by_long(name)
                        .ok_or_else(|| Error::UnknownOption(option.clone()))?;
                    let value = if self.registry[idx].expects_value() {
                        match attached {
                            Some("") => return Err(Error::MissingArgument(option)),
                            Some(value) => value,
                            None => next_value(args, &mut i, &option)?,
                        }
                    } else {
                        if let Some(value) = attached {
                            if self.strict {
                                return Err(Error::UnexpectedValue(option));
                            }
                            log::debug!("ignoring {value:?} attached to `{option}`");
                        }
                        ""
                    };
                    self.invoke(idx, &option, value)?;
                    invoked += 1;
                }
                Token::Short(cluster) => {
                    for (pos, short) in cluster.char_indices() {
                        let option = format!("-{short}");
                        let idx = self
                            .registry
                            .find_by_short(short)
                            .ok_or_else(|| Error::UnknownOption(option.clone()))?;
                        if !self.registry[idx].expects_value() {
                            self.invoke(idx, &option, "")?;
                            invoked += 1;
                            continue;
                        }
                        // The value swallows the rest of the cluster.
                        let value = match &cluster[pos + short.len_utf8()..] {
                            "" => next_value(args, &mut i, &option)?,
                            rest => rest,
                        };
                        self.invoke(idx, &option, value)?;
                        invoked += 1;
                        break;
                    }
                }
                Token::Free => log::trace!("skipping argument {arg:?}"),
            }
            i += 1;
        }
        Ok(invoked)
    }

    fn invoke(&mut self, idx: usize, option: &str, value: &str) -> Result<()> {
        log::debug!("matched `{option}` with value {value:?}");
        let usage = match &mut self.registry[idx].action {
            Action::Switch(action) => {
                action();
                return Ok(());
            }
            Action::Value(action) => {
                return action(value)
                    .map_err(|reason| Error::InvalidValue { option: option.to_string(), reason });
            }
            Action::Help(usage) => usage.clone(),
        };
        Err(Error::HelpRequested(self.help(&usage)))
    }
}

/// Takes the argument after `i` as the value of `option`.
fn next_value<'t>(args: &'t [OsString], i: &mut usize, option: &str) -> Result<&'t str> {
    let arg = args.get(*i + 1).ok_or_else(|| Error::MissingArgument(option.to_string()))?;
    *i += 1;
    arg.to_str()
        .ok_or_else(|| Error::InvalidUtf8 { option: option.to_string(), arg: arg.clone() })
}

fn program_name(args: &[OsString]) -> String {
    args.first().map(|it| it.to_string_lossy().into_owned()).unwrap_or_default()
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'t> {
    /// `--name` or `--name=value`.
    Long { name: &'t str, attached: Option<&'t str> },
    /// Characters following a single `-`.
    Short(&'t str),
    Free,
}

fn classify(arg: &str) -> Token<'_> {
    if arg.len() >= 3 && arg.starts_with("--") {
        let (name, attached) = match arg[2..].split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (&arg[2..], None),
        };
        return Token::Long { name, attached };
    }
    if arg.len() >= 2 && arg.starts_with('-') && arg != "--" {
        return Token::Short(&arg[1..]);
    }
    Token::Free
}

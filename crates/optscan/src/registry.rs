use std::{fmt, ops};

use crate::{Error, Result};

/// Short and/or long name of an option.
///
/// Converts from a `char` (short only), a string (long only) or a
/// `(char, &str)` pair (both).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    short: Option<char>,
    long: Option<String>,
}

impl From<char> for Names {
    fn from(short: char) -> Names {
        Names { short: Some(short), long: None }
    }
}

impl From<&str> for Names {
    fn from(long: &str) -> Names {
        Names { short: None, long: Some(long.to_string()) }
    }
}

impl From<String> for Names {
    fn from(long: String) -> Names {
        Names { short: None, long: Some(long) }
    }
}

impl<S: Into<String>> From<(char, S)> for Names {
    fn from((short, long): (char, S)) -> Names {
        Names { short: Some(short), long: Some(long.into()) }
    }
}

pub(crate) enum Action<'a> {
    Switch(Box<dyn FnMut() + 'a>),
    Value(Box<dyn FnMut(&str) -> Result<(), String> + 'a>),
    Help(String),
}

/// A single registered option: its names, its help text and what to do when
/// it is seen.
pub struct OptionSpec<'a> {
    short: Option<char>,
    long: Option<String>,
    description: String,
    pub(crate) action: Action<'a>,
}

impl<'a> OptionSpec<'a> {
    /// An option without a value, like `-v` or `--verbose`.
    pub fn switch(
        names: impl Into<Names>,
        description: impl Into<String>,
        action: impl FnMut() + 'a,
    ) -> OptionSpec<'a> {
        OptionSpec::new(names.into(), description.into(), Action::Switch(Box::new(action)))
    }

    /// An option taking a value: `-oVALUE`, `-o VALUE`, `--opt=VALUE` or
    /// `--opt VALUE`.
    pub fn value(
        names: impl Into<Names>,
        description: impl Into<String>,
        mut action: impl FnMut(&str) + 'a,
    ) -> OptionSpec<'a> {
        let action = move |value: &str| {
            action(value);
            Ok(())
        };
        OptionSpec::new(names.into(), description.into(), Action::Value(Box::new(action)))
    }

    /// Like [`OptionSpec::value`], but the action may reject the value. The
    /// rejection aborts scanning with [`Error::InvalidValue`].
    pub fn try_value<E: fmt::Display>(
        names: impl Into<Names>,
        description: impl Into<String>,
        mut action: impl FnMut(&str) -> Result<(), E> + 'a,
    ) -> OptionSpec<'a> {
        let action = move |value: &str| action(value).map_err(|err| err.to_string());
        OptionSpec::new(names.into(), description.into(), Action::Value(Box::new(action)))
    }

    pub(crate) fn help(usage: String) -> OptionSpec<'a> {
        OptionSpec::new(('h', "help").into(), "Print help".to_string(), Action::Help(usage))
    }

    fn new(names: Names, description: String, action: Action<'a>) -> OptionSpec<'a> {
        OptionSpec { short: names.short, long: names.long, description, action }
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn expects_value(&self) -> bool {
        matches!(self.action, Action::Value(_))
    }

    fn validate(&self) -> Result<()> {
        match (self.short, self.long.as_deref()) {
            (None, None) => Err(Error::InvalidSpec(format!(
                "option {:?} has neither a short nor a long name",
                self.description
            ))),
            (_, Some("")) => Err(Error::InvalidSpec("long name is empty".to_string())),
            (_, Some(long)) if long.contains('=') => {
                Err(Error::InvalidSpec(format!("long name `{long}` contains `=`")))
            }
            (Some('-'), _) => Err(Error::InvalidSpec("`-` can't be a short name".to_string())),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for OptionSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("description", &self.description)
            .field("expects_value", &self.expects_value())
            .finish()
    }
}

/// Registered options, in registration order.
#[derive(Debug, Default)]
pub(crate) struct Registry<'a> {
    specs: Vec<OptionSpec<'a>>,
}

impl<'a> Registry<'a> {
    pub(crate) fn register(&mut self, spec: OptionSpec<'a>) -> Result<()> {
        spec.validate()?;
        self.push(spec);
        Ok(())
    }

    // Duplicates are kept; lookups resolve to whichever came first.
    pub(crate) fn push(&mut self, spec: OptionSpec<'a>) {
        if let Some(short) = spec.short.filter(|&c| self.find_by_short(c).is_some()) {
            log::warn!("option `-{short}` registered more than once, later ones are unreachable");
        }
        if let Some(long) = spec.long().filter(|long| self.find_by_long(long).is_some()) {
            log::warn!("option `--{long}` registered more than once, later ones are unreachable");
        }
        self.specs.push(spec);
    }

    /// Index of the first option whose long name is exactly `name`.
    pub(crate) fn find_by_long(&self, name: &str) -> Option<usize> {
        self.specs.iter().position(|spec| spec.long() == Some(name))
    }

    /// Index of the first option whose short name is exactly `short`.
    pub(crate) fn find_by_short(&self, short: char) -> Option<usize> {
        self.specs.iter().position(|spec| spec.short == Some(short))
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, OptionSpec<'a>> {
        self.specs.iter()
    }
}

impl<'a> ops::Index<usize> for Registry<'a> {
    type Output = OptionSpec<'a>;

    fn index(&self, idx: usize) -> &OptionSpec<'a> {
        &self.specs[idx]
    }
}

impl<'a> ops::IndexMut<usize> for Registry<'a> {
    fn index_mut(&mut self, idx: usize) -> &mut OptionSpec<'a> {
        &mut self.specs[idx]
    }
}

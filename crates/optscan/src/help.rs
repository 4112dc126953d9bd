use std::fmt::Write;

use crate::OptionSpec;

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

/// Width of the option column, margin included.
const LHS_MAX: usize = 32;

pub(crate) fn render<'s, 'a: 's>(
    usage: &str,
    specs: impl IntoIterator<Item = &'s OptionSpec<'a>>,
) -> String {
    let mut buf = String::new();
    w!(buf, "Usage: {usage}\n");
    for spec in specs {
        let lhs = lhs(spec);
        let width = lhs.chars().count();
        if width <= LHS_MAX {
            w!(buf, "{lhs}{:pad$} {}\n", "", spec.description(), pad = LHS_MAX - width);
        } else {
            w!(buf, "{lhs}\n{:pad$} {}\n", "", spec.description(), pad = LHS_MAX);
        }
    }
    buf
}

fn lhs(spec: &OptionSpec<'_>) -> String {
    let mut buf = String::from("  ");
    if let Some(short) = spec.short() {
        w!(buf, "-{short}");
    }
    if spec.short().is_some() && spec.long().is_some() {
        buf.push_str(", ");
    }
    if let Some(long) = spec.long() {
        w!(buf, "--{long}");
    }
    if spec.expects_value() {
        buf.push_str(" ARG");
    }
    buf
}

use std::ffi::OsString;

use optscan::{OptionSpec, Parser};

fn scan(args: Vec<OsString>) {
    let mut parser = Parser::new();
    let added = parser.add(OptionSpec::value(('o', "output"), "Output file", |v| {
        println!("output = {v:?}")
    }));
    if let Err(err) = added {
        err.exit("non-utf8")
    }
    let res = parser.parse(args);
    eprintln!("res = {res:?}");
}

#[cfg(unix)]
fn main() {
    use std::os::unix::ffi::OsStringExt;

    // Skipped: not an option.
    scan(vec!["non-utf8".into(), OsString::from_vec(vec![254]), "-outf8".into()]);
    // Rejected: the value of `-o` is not utf8.
    scan(vec!["non-utf8".into(), "-o".into(), OsString::from_vec(vec![255])]);
}

#[cfg(windows)]
fn main() {
    use std::os::windows::ffi::OsStringExt;

    scan(vec!["non-utf8".into(), OsString::from_wide(&[0xD800]), "-outf8".into()]);
    scan(vec!["non-utf8".into(), "-o".into(), OsString::from_wide(&[0xDC00])]);
}

#[cfg(not(any(unix, windows)))]
fn main() {}


use std::{cell::RefCell, fmt::Write};

use expect_test::{expect, Expect};
use optscan::{OptionSpec, Parser};

type Log = RefCell<Vec<String>>;

fn switch<'a>(log: &'a Log, name: &'static str) -> impl FnMut() + 'a {
    move || log.borrow_mut().push(name.to_string())
}

fn value<'a>(log: &'a Log, name: &'static str) -> impl FnMut(&str) + 'a {
    move |value| log.borrow_mut().push(format!("{name} {value:?}"))
}

fn example(log: &Log) -> Parser<'_> {
    let number = move |v: &str| {
        let n = v.parse::<u32>()?;
        log.borrow_mut().push(format!("number {n}"));
        Ok::<(), std::num::ParseIntError>(())
    };
    let specs = [
        OptionSpec::switch(('f', "flag"), "Set flag", switch(log, "flag")),
        OptionSpec::value("filename", "Specify filename", value(log, "filename")),
        OptionSpec::value('p', "Print something", value(log, "p")),
        OptionSpec::switch(('a', "ay"), "A option", switch(log, "a")),
        OptionSpec::switch("bee", "B option", switch(log, "bee")),
        OptionSpec::switch('c', "C option", switch(log, "c")),
        OptionSpec::value(('d', "dee"), "D option", value(log, "d")),
        OptionSpec::try_value(('n', "number"), "Pick a number", number),
    ];
    let mut p = parser(specs);
    p.add_help("example [args]");
    p
}

fn parser<'a>(specs: impl IntoIterator<Item = OptionSpec<'a>>) -> Parser<'a> {
    let mut p = Parser::new();
    for spec in specs {
        p.add(spec).unwrap();
    }
    p
}

fn render(log: Log, res: optscan::Result<usize>) -> String {
    let mut buf = String::new();
    for event in log.into_inner() {
        writeln!(buf, "{event}").unwrap();
    }
    match res {
        Ok(invoked) => writeln!(buf, "ok: {invoked}").unwrap(),
        Err(err) => writeln!(buf, "error: {err}").unwrap(),
    }
    buf
}

fn check(args: &[&str], expect: Expect) {
    let log = Log::default();
    let mut p = example(&log);
    let res = p.parse(std::iter::once("prog").chain(args.iter().copied()));
    drop(p);
    expect.assert_eq(&render(log, res));
}

#[test]
fn end_to_end() {
    check(
        &["-f", "--filename=a.out"],
        expect![[r#"
            flag
            filename "a.out"
            ok: 2
        "#]],
    );
    check(
        &["-fp", "something"],
        expect![[r#"
            flag
            p "something"
            ok: 2
        "#]],
    );
    check(&[], expect!["ok: 0\n"]);
}

#[test]
fn value_forms() {
    for args in [&["-dVALUE"][..], &["-d", "VALUE"], &["--dee=VALUE"], &["--dee", "VALUE"]] {
        check(
            args,
            expect![[r#"
                d "VALUE"
                ok: 1
            "#]],
        );
    }
    check(
        &["--dee=", "x"],
        expect![[r#"
            error: option '--dee' requires an argument
        "#]],
    );
    check(
        &["--dee=a=b", "-d", " spaced "],
        expect![[r#"
            d "a=b"
            d " spaced "
            ok: 2
        "#]],
    );
}

#[test]
fn clusters() {
    check(
        &["-ac"],
        expect![[r#"
            a
            c
            ok: 2
        "#]],
    );
    check(
        &["-acd", "VALUE", "-c"],
        expect![[r#"
            a
            c
            d "VALUE"
            c
            ok: 4
        "#]],
    );
    check(
        &["-dVALUEc"],
        expect![[r#"
            d "VALUEc"
            ok: 1
        "#]],
    );
    check(
        &["-adz"],
        expect![[r#"
            a
            d "z"
            ok: 2
        "#]],
    );
}

#[test]
fn separate_value_is_taken_verbatim() {
    check(
        &["--filename", "-f", "-p", "--bee"],
        expect![[r#"
            filename "-f"
            p "--bee"
            ok: 2
        "#]],
    );
}

#[test]
fn free_arguments_are_skipped() {
    check(
        &["input.txt", "-", "--", "-c", "output.txt"],
        expect![[r#"
            c
            ok: 1
        "#]],
    );
}

#[test]
fn unknown_options() {
    check(
        &["--unknown"],
        expect![[r#"
            error: unknown option: '--unknown'
        "#]],
    );
    check(
        &["-f", "-z", "-a"],
        expect![[r#"
            flag
            error: unknown option: '-z'
        "#]],
    );
    check(
        &["-azc"],
        expect![[r#"
            a
            error: unknown option: '-z'
        "#]],
    );
    check(
        &["--=x"],
        expect![[r#"
            error: unknown option: '--'
        "#]],
    );
    check(
        &["--Flag"],
        expect![[r#"
            error: unknown option: '--Flag'
        "#]],
    );
    check(
        &["--fla"],
        expect![[r#"
            error: unknown option: '--fla'
        "#]],
    );
}

#[test]
fn missing_arguments() {
    check(
        &["--filename"],
        expect![[r#"
            error: option '--filename' requires an argument
        "#]],
    );
    check(
        &["-f", "-p"],
        expect![[r#"
            flag
            error: option '-p' requires an argument
        "#]],
    );
    check(
        &["-ad"],
        expect![[r#"
            a
            error: option '-d' requires an argument
        "#]],
    );
}

#[test]
fn invalid_value() {
    check(
        &["-n", "92", "--number=7"],
        expect![[r#"
            number 92
            number 7
            ok: 2
        "#]],
    );
    check(
        &["-nlol"],
        expect![[r#"
            error: invalid argument for option '-n': invalid digit found in string
        "#]],
    );
}

#[test]
fn switch_ignores_attached_value() {
    check(
        &["--flag=yes", "--bee="],
        expect![[r#"
            flag
            bee
            ok: 2
        "#]],
    );
}

#[test]
fn strict_rejects_attached_value() {
    let log = Log::default();
    let mut p = example(&log);
    p.strict(true);
    let res = p.parse(["prog", "--flag", "--flag=yes"]);
    drop(p);
    expect![[r#"
        flag
        error: option '--flag' doesn't allow an argument
    "#]]
    .assert_eq(&render(log, res));
}

#[test]
fn duplicates_resolve_to_first() {
    let log = Log::default();
    let mut p = parser([
        OptionSpec::switch(('x', "first"), "", switch(&log, "first")),
        OptionSpec::switch(('x', "second"), "", switch(&log, "second")),
        OptionSpec::value("first", "", value(&log, "shadowed")),
    ]);
    let res = p.parse(["prog", "-x", "--second", "--first"]);
    drop(p);
    expect![[r#"
        first
        second
        first
        ok: 3
    "#]]
    .assert_eq(&render(log, res));
}

#[test]
fn unicode_cluster() {
    let log = Log::default();
    let mut p = parser([
        OptionSpec::switch('é', "", switch(&log, "é")),
        OptionSpec::value('ß', "", value(&log, "ß")),
    ]);
    let res = p.parse(["prog", "-éßñ"]);
    drop(p);
    expect![[r#"
        é
        ß "ñ"
        ok: 2
    "#]]
    .assert_eq(&render(log, res));
}

#[test]
fn registration_errors() {
    let mut p = Parser::new();
    let err = p.add(OptionSpec::switch("", "Nameless", || ())).unwrap_err();
    expect!["invalid option spec: long name is empty"].assert_eq(&err.to_string());
    let err = p.add(OptionSpec::value("key=value", "", |_| ())).unwrap_err();
    expect!["invalid option spec: long name `key=value` contains `=`"].assert_eq(&err.to_string());
    assert_eq!(p.options().count(), 0);
}

#[cfg(unix)]
#[test]
fn non_utf8() {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt};

    let bad = || OsString::from_vec(vec![b'x', 0xff]);
    let dashed = || OsString::from_vec(vec![b'-', b'-', b'f', b'=', 0xff]);

    let log = Log::default();
    let mut p = example(&log);
    let skipped = p.parse([OsString::from("prog"), bad(), OsString::from("-c")]);
    let as_value = p.parse([OsString::from("prog"), OsString::from("-p"), bad()]);
    let as_option = p.parse([OsString::from("prog"), dashed()]);
    drop(p);

    assert_eq!(skipped.unwrap(), 1);
    expect![[r#"invalid utf8 in argument for option '-p': "x\xFF""#]]
        .assert_eq(&as_value.unwrap_err().to_string());
    expect![[r#"invalid utf8 in argument for option '--f': "--f=\xFF""#]]
        .assert_eq(&as_option.unwrap_err().to_string());
}

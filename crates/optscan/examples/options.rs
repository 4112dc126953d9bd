use optscan::{OptionSpec, Parser};

fn main() {
    let mut a_flag = false;
    let mut level = 0u8;

    let specs = [
        OptionSpec::switch(('a', "ay"), "A option", || {
            a_flag = true;
            println!("a");
        }),
        OptionSpec::switch("bee", "B option", || println!("b")),
        OptionSpec::switch('c', "C option", || println!("c")),
        OptionSpec::value(('d', "dee"), "D option", |v| println!("d: {v}")),
        OptionSpec::value("ee", "E option", |v| println!("e: {v}")),
        OptionSpec::value('f', "F option", |v| println!("f: {v}")),
        OptionSpec::try_value(('l', "level"), "Level, 0 to 255", |v| {
            level = v.parse()?;
            Ok::<(), std::num::ParseIntError>(())
        }),
    ];

    let mut parser = Parser::new();
    for spec in specs {
        if let Err(err) = parser.add(spec) {
            err.exit("options")
        }
    }
    parser.strict(true).add_help("options [-abc] [-def ARG] [-l LEVEL]");

    let invoked = parser.parse_env_or_exit();
    drop(parser);

    println!("a_flag: {a_flag}");
    println!("level: {level}");
    println!("{invoked} option(s) handled");
}

use optscan::{OptionSpec, Parser};

fn main() {
    let mut flag = false;
    let mut filename = String::new();

    let specs = [
        // -f, --flag
        OptionSpec::switch(('f', "flag"), "Set flag", || flag = true),
        // --filename a.out, --filename=a.out
        OptionSpec::value("filename", "Specify filename", |v| filename = v.to_string()),
        // -psomething, -p something
        OptionSpec::value('p', "Print something", |v| println!("{v}")),
    ];

    let mut parser = Parser::new();
    for spec in specs {
        if let Err(err) = parser.add(spec) {
            err.exit("flags")
        }
    }
    parser.add_help("flags [args]");

    parser.parse_env_or_exit();
    drop(parser);

    println!("flag: {flag}");
    println!("filename: {filename}");
}

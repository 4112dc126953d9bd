use std::path::{Path, PathBuf};

use xshell::Shell;

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).ancestors().nth(1).unwrap().to_path_buf()
}

// Only `Error::exit` talks to the terminal; everything else reports through
// return values or `log`.
#[test]
fn library_does_not_print() {
    let sh = Shell::new().unwrap();
    let src = project_root().join("crates/optscan/src");
    for path in sh.read_dir(&src).unwrap() {
        let text = sh.read_file(&path).unwrap();
        let text = text.split("#[cfg(test)]").next().unwrap();
        for (line_no, line) in text.lines().enumerate() {
            let prints = ["println!(", "print!(", "dbg!("].iter().any(|it| line.contains(it));
            let allowed = path.ends_with("lib.rs") && line.contains("eprintln!(\"{program}: {err}\")");
            if prints && !allowed {
                panic!("{}:{}: library code prints: {}", path.display(), line_no + 1, line.trim());
            }
        }
    }
}

// Example reading JSON from stdin (or a built-in sample) and printing it indented

use std::io::{self, IsTerminal, Read};

use jsonvalue::{parse_reader, write_with_config, WriterConfig};

const SAMPLE: &str = r#"{"service":"api","ports":[80,443],"limits":{"rps":1.5e3,"burst":null},"tags":[]}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let stdin = io::stdin();
    let value = if stdin.is_terminal() {
        println!("No input on stdin, using the built-in sample");
        parse_reader(SAMPLE.as_bytes())?
    } else {
        let mut input = Vec::new();
        stdin.lock().read_to_end(&mut input)?;
        parse_reader(input.as_slice())?
    };

    let indent = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_with_config(&mut out, &value, WriterConfig::compact().with_indent(indent))?;
    println!();
    Ok(())
}

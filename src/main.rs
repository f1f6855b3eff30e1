//! Scrapline -- a grid-territory contest bot.
//!
//! This binary reads one board snapshot per turn from stdin and writes a
//! single semicolon-joined command line to stdout, following the host's
//! turn-loop convention.

use std::io::{self, BufWriter, Write};

use scrapline::agent::Agent;
use scrapline::protocol::{format_turn, read_header, read_snapshot};

/// Runs the main turn loop until the host closes the input stream.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = BufWriter::new(stdout.lock());

    let (width, height) = match read_header(&mut input) {
        Ok(dims) => dims,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let mut agent = Agent::new(width, height);

    loop {
        let snapshot = match read_snapshot(&mut input, width, height) {
            Ok(Some(s)) => s,
            Ok(None) => break,
            Err(e) => {
                eprintln!("{}", e);
                break;
            }
        };

        let actions = agent.play_turn(&snapshot);
        let line = match format_turn(&actions) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("{}", e);
                "WAIT".to_string()
            }
        };

        if writeln!(out, "{}", line).and_then(|_| out.flush()).is_err() {
            break;
        }
    }
}

//! Stdio-backed [`minic_core::Platform`] implementation used by the
//! `minic` binary outside of tests.

use std::io::{self, Read, Write};

use minic_core::Platform;
use tracing::warn;

#[derive(Default)]
pub struct StdioPlatform;

impl Platform for StdioPlatform {
    fn putc(&mut self, c: u8) {
        let mut stdout = io::stdout();
        if stdout.write_all(&[c]).is_ok() {
            let _ = stdout.flush();
        }
    }

    fn get_character(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match io::stdin().read_exact(&mut byte) {
            Ok(()) => Some(byte[0]),
            Err(_) => None,
        }
    }

    fn get_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        if io::stdout().flush().is_err() {
            warn!("failed to flush prompt to stdout");
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => None, // EOF
            Ok(_) => Some(line),
            Err(_) => None,
        }
    }

    fn exit(&mut self, code: i32) -> ! {
        std::process::exit(code)
    }

    fn read_file(&mut self, path: &str) -> Option<Vec<u8>> {
        std::fs::read(path).ok()
    }
}

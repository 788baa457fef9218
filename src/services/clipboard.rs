use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// OSC 52 "set clipboard" sequence for `text`. Terminals that understand it
/// put the text on the system clipboard; the rest ignore it.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

/// Fire-and-forget clipboard write. Errors are not reported.
pub fn write_text<W: Write>(out: &mut W, text: &str) {
    let _ = out.write_all(osc52_sequence(text).as_bytes());
    let _ = out.flush();
}

pub fn write_text_stdout(text: &str) {
    write_text(&mut io::stdout(), text);
}

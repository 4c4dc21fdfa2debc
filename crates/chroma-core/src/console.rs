use std::io::{self, BufRead, Write};

/// Prints `message` and reads one trimmed line from stdin. `None` on EOF,
/// read failure or an empty answer.
pub fn prompt(message: &str) -> Option<String> {
    print!("{message}");
    if let Err(e) = io::stdout().flush() {
        tracing::warn!(error = %e, "failed to flush prompt");
    }

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => {
            let answer = line.trim();
            (!answer.is_empty()).then(|| answer.to_string())
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to read from stdin");
            None
        }
    }
}

//! Serve command handler: a JSON-lines render channel over stdio

use pinpoint::serve_lines;
use std::io;

use crate::error::CliResult;
use crate::output::Reporter;

/// Answer render requests from stdin until it closes
pub fn execute_serve(reporter: &Reporter) -> CliResult<()> {
    reporter.info("Reading render requests from stdin (one JSON object per line)");
    let stdin = io::stdin();
    let stdout = io::stdout();
    let answered = serve_lines(stdin.lock(), stdout.lock())?;
    reporter.success(&format!("Answered {answered} request(s)"));
    Ok(())
}

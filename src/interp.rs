//! Line-oriented directive interpreter. Recoverable errors are logged
//! and processing continues; only an unopenable input source is fatal.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use crate::client_error::{ClientError, Result};
use crate::update::context::UpdateContext;
use crate::update::directive::{COMMANDS, find};
use crate::update::handlers;

/// Process a single input line: strip trailing whitespace, skip blank
/// lines and `;` comments, then dispatch the directive.
pub async fn process_line(line: &str, ctx: &mut UpdateContext) -> Result<()> {
    let line = line.trim_end();

    if line.is_empty() || line.starts_with(';') {
        return Ok(());
    }

    let Some((directive, arg)) = find(line, COMMANDS) else {
        return Err(ClientError::Parse(format!("unknown directive: '{}'", line)));
    };

    handlers::handle(directive, arg, ctx).await
}

async fn process_lines<I>(lines: I, ctx: &mut UpdateContext)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for line in lines {
        let line = line.as_ref();
        if let Err(e) = process_line(line, ctx).await {
            error!("operation failed ({}) on line '{}'", e, line.trim_end());
        }
    }
}

/// Run every directive in an input file. Failing to open the file is
/// the only fatal condition.
pub async fn process_file(path: &str, ctx: &mut UpdateContext) -> Result<()> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        error!("failed to open '{}': {}", path, e);
        ClientError::from(e)
    })?;

    process_lines(contents.lines(), ctx).await;
    Ok(())
}

/// Interactive mode: read directives from standard input line by line.
pub async fn process_stdin(ctx: &mut UpdateContext) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Err(e) = process_line(&line, ctx).await {
            error!("operation failed ({}) on line '{}'", e, line.trim_end());
        }
    }
    Ok(())
}

/// Convenience entry used by tests: feed a whole script at once.
pub async fn process_script(script: &str, ctx: &mut UpdateContext) {
    process_lines(script.lines(), ctx).await;
}

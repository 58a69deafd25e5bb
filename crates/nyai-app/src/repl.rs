//! Line-oriented chat loop over stdin.

use std::collections::HashMap;
use std::path::PathBuf;

use futures_util::StreamExt;
use nyai_common::{path_to_base64, safe_format, NyaiError};
use nyai_llm::{ChatOptions, Session};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Per-run settings taken from the command line.
#[derive(Debug, Default)]
pub struct ReplOptions {
    pub author: Option<String>,
    pub attachments: Vec<PathBuf>,
    pub vars: HashMap<String, String>,
    pub strict_vars: bool,
    pub stream: bool,
}

/// Encode every attachment as a data URI.
pub fn encode_attachments(paths: &[PathBuf]) -> Result<Vec<String>, NyaiError> {
    paths
        .iter()
        .map(|path| path_to_base64(path).map_err(NyaiError::from))
        .collect()
}

/// Send each non-empty input line to `session` and write the reply to `out`.
/// Attachments ride along with the first message only.
pub async fn run<R, W>(
    session: &mut Session,
    options: &ReplOptions,
    input: R,
    out: &mut W,
) -> Result<(), NyaiError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut pending = encode_attachments(&options.attachments)?;
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let message = safe_format(line, &options.vars, options.strict_vars)?;

        let mut call = ChatOptions::new();
        if let Some(author) = &options.author {
            call = call.with_author(author.clone());
        }
        if !pending.is_empty() {
            call = call.with_attachments(std::mem::take(&mut pending));
        }

        if options.stream {
            let mut stream = session.stream(message, call).await?;
            while let Some(item) = stream.next().await {
                out.write_all(item?.increment().as_bytes()).await?;
                out.flush().await?;
            }
        } else {
            let reply = session.chat(message, call).await?;
            if let Some(text) = reply.into_output().as_ref().and_then(|o| o.as_text()) {
                out.write_all(text.as_bytes()).await?;
            }
        }
        out.write_all(b"\n").await?;
        out.flush().await?;
    }

    tracing::debug!(messages = session.message_count(), "input closed");
    Ok(())
}

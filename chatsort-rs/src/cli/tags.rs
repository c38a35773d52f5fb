//! `tags` command: show or replace a document's tags.

use crate::cli::args::TagsArgs;
use crate::cli::output::Output;
use crate::error::{ArchiveError, Result};
use crate::session::EngineSession;
use crate::tags::{canonical_list, render_buffer};
use serde::Serialize;
use std::io::{self, Read};
use std::path::PathBuf;

/// Current tags of a document, ready to edit.
#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub path: PathBuf,
    pub tags: Vec<String>,
    pub buffer: String,
}

pub async fn run(session: &EngineSession, args: &TagsArgs, output: &Output) -> Result<()> {
    let buffer = if args.stdin {
        Some(read_stdin()?)
    } else {
        args.set.clone()
    };

    let Some(buffer) = buffer else {
        let doc = session
            .document(&args.path)
            .ok_or_else(|| ArchiveError::DocumentNotFound(args.path.clone()))?;
        let tags = canonical_list(&doc.tags, session.rules());
        let response = TagsResponse {
            path: doc.path,
            buffer: render_buffer(&tags),
            tags,
        };
        return output.print(&response);
    };

    if buffer.trim().is_empty() {
        output.warn("empty tag buffer; all tags will be removed");
    }

    let outcome = session.commit_tags(&args.path, &buffer).await?;
    if outcome.changed {
        output.info(&format!("Updated tags on {}", outcome.path.display()));
    } else {
        output.info("Tags unchanged; nothing written.");
    }
    output.print(&outcome)
}

fn read_stdin() -> Result<String> {
    if !stdin_is_tty() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Err(ArchiveError::Other(
            "--stdin given but nothing is piped in".to_string(),
        ))
    }
}

fn stdin_is_tty() -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::io::AsRawFd;
        unsafe { libc::isatty(io::stdin().as_raw_fd()) == 1 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

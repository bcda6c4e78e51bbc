//! feed-inspect — list the operations of a document feed.
//!
//! Reads a feed (JSON array or line-delimited objects) from stdin and prints
//! one line per operation to stdout. Set `RUST_LOG=debug` to see framing
//! detection and decoder progress.
//!
//! ```text
//! $ feed-inspect < feed.json
//! put id:music:album::a-head-full-of-dreams
//! update id:music:album::hardwired, create=true
//! ```

mod summary;

use feed_decode::{DecodeError, Decoder};
use log::{error, info};
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;
use thiserror::Error;

use summary::FeedSummary;

#[derive(Error, Debug)]
enum InspectError {
    #[error("{0}")]
    Decode(#[from] DecodeError),
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Decode `input` to the end, writing each operation to `output`.
fn run<R: Read, W: Write>(input: R, mut output: W) -> Result<FeedSummary, InspectError> {
    let mut summary = FeedSummary::default();
    for doc in Decoder::new(input) {
        let doc = doc?;
        writeln!(output, "{doc}")?;
        summary.record(&doc);
    }
    output.flush()?;
    Ok(summary)
}

fn main() -> ExitCode {
    env_logger::init();

    let stdout = BufWriter::new(io::stdout().lock());
    match run(io::stdin().lock(), stdout) {
        Ok(summary) => {
            info!("Feed complete: {summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

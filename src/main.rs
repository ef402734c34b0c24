use anyhow::{bail, Error};
use std::env::args;
use std::path::PathBuf;

use voiceline_renamer::relocate_all;

fn main() -> Result<(), Error> {
    // $ cargo run -- ./lines.csv ./extracted ./sorted

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut argv = args().skip(1);
    let (transcript, source_dir, dest_root) = match (argv.next(), argv.next(), argv.next()) {
        (Some(transcript), Some(source), Some(dest)) => (
            PathBuf::from(transcript),
            PathBuf::from(source),
            PathBuf::from(dest),
        ),
        _ => bail!("usage: voiceline_renamer <transcript.csv> <source_dir> <dest_root>"),
    };

    let moved = relocate_all(&transcript, &source_dir, &dest_root)?;
    println!("Relocated {} voice lines.", moved.len());

    Ok(())
}

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Error};

use crate::lineparser::{parse_line, VoiceLine};
use crate::pathresolver::{resolve, shared_extension};

/// Moves every audio file named in the transcript into a per-character
/// folder under `dest_root`, renamed after its spoken line. Returns the
/// records that were actually moved, in transcript order.
///
/// Fails only during pre-flight validation; once the line loop starts,
/// per-line problems are reported and the run continues.
pub fn relocate_all(
    transcript: &Path,
    source_dir: &Path,
    dest_root: &Path,
) -> Result<Vec<VoiceLine>, Error> {
    if !transcript.is_file() {
        bail!("transcript file {} does not exist", transcript.display());
    }
    if transcript.extension().map_or(true, |ext| ext != "csv") {
        bail!(
            "transcript should be a .csv export, got {}",
            transcript.display()
        );
    }
    if !source_dir.is_dir() {
        bail!("source directory {} does not exist", source_dir.display());
    }
    if !dest_root.is_dir() {
        bail!("destination directory {} does not exist", dest_root.display());
    }

    // Extraction leaves every file with the same extension, so one look at
    // the source directory settles it for the whole run.
    let extension = shared_extension(source_dir).with_context(|| {
        format!(
            "unable to infer the audio extension in {}",
            source_dir.display()
        )
    })?;

    let text = fs::read_to_string(transcript)
        .with_context(|| format!("unable to read {}", transcript.display()))?;

    let mut moved = Vec::new();
    for line in text.lines() {
        if line.is_empty() || line.split(' ').count() < 2 {
            continue;
        }

        let Some(record) = parse_line(line) else {
            log::debug!("skipping non-data line: {}", line);
            continue;
        };

        let source = source_dir.join(format!("{}{}", record.hex_code, extension));
        if !source.is_file() {
            log::warn!("can't find file {}", source.display());
            continue;
        }

        let character_dir = dest_root.join(&record.character);
        if let Err(err) = fs::create_dir_all(&character_dir) {
            log::error!("unable to create {}: {}", character_dir.display(), err);
            continue;
        }

        let destination = match resolve(&record.file_name, &character_dir, &extension) {
            Ok(path) => path,
            Err(err) => {
                log::warn!("skipping {}: {}", record.hex_code, err);
                continue;
            }
        };

        // Two lines with identical text collide; the first one moved wins.
        if destination.exists() {
            log::debug!("already occupied: {}", destination.display());
            continue;
        }

        match fs::rename(&source, &destination) {
            Ok(()) => {
                log::info!("created voice line file \"{}\"", record.file_name);
                moved.push(record);
            }
            Err(err) => {
                log::error!("error saving {}: {}", destination.display(), err);
            }
        }
    }

    Ok(moved)
}

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::keyframes::KeyframeTrack;

/// Write tracks as CSV: a `frame` column followed by one column per track,
/// one row per animation frame.
///
/// All tracks coming out of one rig share a frame range; rows are driven
/// by the first track and missing values in shorter tracks are left empty.
pub fn write_csv<W: Write>(writer: &mut W, tracks: &[KeyframeTrack]) -> io::Result<()> {
    let Some(first) = tracks.first() else {
        return Ok(());
    };

    write!(writer, "frame")?;
    for track in tracks {
        write!(writer, ",{}", track.target)?;
    }
    writeln!(writer)?;

    for (row, keyframe) in first.keyframes.iter().enumerate() {
        write!(writer, "{}", keyframe.frame)?;
        for track in tracks {
            match track.keyframes.get(row) {
                Some(key) => write!(writer, ",{}", key.value)?,
                None => write!(writer, ",")?,
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

pub fn write_csv_file<P: AsRef<Path>>(path: P, tracks: &[KeyframeTrack]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_csv(&mut writer, tracks)?;
    writer.flush()
}

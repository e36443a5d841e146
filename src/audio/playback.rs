use std::io::Cursor;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink};

/// Decode an encoded clip (MP3, WAV, ...) held in memory and block until it
/// has finished playing on the default output device.
pub fn play_encoded(bytes: Vec<u8>) -> Result<()> {
    let decoder = Decoder::new(Cursor::new(bytes)).context("unsupported audio format")?;
    let (_stream, handle) = OutputStream::try_default().context("failed to open output stream")?;
    let sink = Sink::try_new(&handle).context("failed to create sink")?;
    sink.append(decoder);
    sink.set_volume(1.0);
    sink.sleep_until_end();
    Ok(())
}

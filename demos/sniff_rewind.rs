//! Sniff a stream's header, then rewind and consume it in full.
//!
//! Run with:
//!     cargo run --example sniff_rewind

use std::io::SeekFrom;

use bufseek::ReaderFactory;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A stream with a tiny header in front of the payload
    let mut data = b"BSK1".to_vec();
    data.extend((0..64 * 1024).map(|i| (i * 7 + 13) as u8));

    let factory = ReaderFactory::with_chunk_size(16 * 1024);
    let reader = factory.reader(&data[..]);

    // Peek at the magic
    let mut magic = [0u8; 4];
    reader.read(&mut magic)?;
    println!("magic: {}", String::from_utf8_lossy(&magic));

    if &magic != b"BSK1" {
        println!("not our format, bailing out");
        return Ok(());
    }

    // Rewind and stream the whole thing, header included
    reader.seek(SeekFrom::Start(0))?;
    reader.disable_seeker();

    let mut total = 0usize;
    let mut buf = vec![0u8; 8 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        total += n;
    }

    println!("consumed {} bytes (position {})", total, reader.position());
    reader.close()?;
    Ok(())
}

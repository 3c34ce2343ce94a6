//! Several readers drawing chunks from one bounded pool.
//!
//! Run with:
//!     cargo run --example shared_pool

use std::io::SeekFrom;
use std::sync::Arc;
use std::thread;

use bufseek::{BoundedPool, ReaderFactory};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // At most 8 chunks of 4 KB in flight across every reader
    let pool = Arc::new(BoundedPool::new(4 * 1024, 8));
    let factory = ReaderFactory::with_pool(pool.clone());

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let factory = factory.clone();
            thread::spawn(move || {
                let data: Vec<u8> = (0..32 * 1024)
                    .map(|i| (i * 7 + worker + 13) as u8)
                    .collect();
                let reader = factory.reader(&data[..]);

                // Look at the head twice, then stream without retaining
                let mut head = [0u8; 16];
                reader.read(&mut head).unwrap();
                reader.seek(SeekFrom::Start(0)).unwrap();
                reader.disable_seeker();

                let mut buf = vec![0u8; 4 * 1024];
                let mut total = 0usize;
                loop {
                    let n = reader.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    total += n;
                }
                reader.close().unwrap();
                total
            })
        })
        .collect();

    for (worker, handle) in handles.into_iter().enumerate() {
        let total = handle.join().expect("worker panicked");
        println!("worker {worker}: {total} bytes");
    }

    println!("chunks still out: {}", pool.outstanding());
    Ok(())
}

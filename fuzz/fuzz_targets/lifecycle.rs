#![no_main]

use std::io::SeekFrom;

use arbitrary::Arbitrary;
use bufseek::{Error, ReaderFactory};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Read(u8),
    SeekStart(u8),
    DisableSeeker,
    Close,
}

// Drives a reader through arbitrary lifecycle transitions and checks that
// every call answers according to the state it was made in.
fuzz_target!(|input: (u8, Vec<u8>, Vec<Op>)| {
    let (chunk_size, data, ops) = input;
    let factory = ReaderFactory::with_chunk_size(usize::from(chunk_size).clamp(1, 32));
    let reader = factory.reader(&data[..]);
    let len = data.len() as u64;

    let mut closed = false;
    let mut seekable = true;

    for op in ops {
        match op {
            Op::Read(n) => {
                let result = reader.read(&mut vec![0u8; usize::from(n)]);
                if closed {
                    assert!(matches!(result, Err(Error::Closed)));
                } else {
                    result.unwrap();
                }
            }
            Op::SeekStart(p) => {
                let target = u64::from(p);
                let result = reader.seek(SeekFrom::Start(target));
                if closed {
                    assert!(matches!(result, Err(Error::Closed)));
                } else if !seekable {
                    assert!(matches!(result, Err(Error::SeekerDisabled)));
                } else if target <= len {
                    assert_eq!(result.unwrap(), target);
                } else {
                    assert!(matches!(result, Err(Error::OutOfRange)));
                }
            }
            Op::DisableSeeker => {
                reader.disable_seeker();
                if !closed {
                    seekable = false;
                }
            }
            Op::Close => {
                let result = reader.close();
                if closed {
                    assert!(matches!(result, Err(Error::Closed)));
                } else {
                    result.unwrap();
                    closed = true;
                }
            }
        }

        assert!(reader.position() <= len, "cursor can never pass the end");
    }
});

#![no_main]

use std::io::{Cursor, Read, Seek, SeekFrom};

use arbitrary::Arbitrary;
use bufseek::{Error, ReaderFactory};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    chunk_size: u8,
    data: Vec<u8>,
    ops: Vec<Op>,
}

#[derive(Arbitrary, Debug)]
enum Op {
    Read(u8),
    SeekStart(u16),
    SeekCurrent(i16),
    SeekEnd(i16),
}

// The buffered reader over a forward-only slice must behave exactly like a
// cursor over the same bytes, except that it rejects positions past the end.
fuzz_target!(|input: Input| {
    let chunk_size = usize::from(input.chunk_size).clamp(1, 64);
    let factory = ReaderFactory::with_chunk_size(chunk_size);
    let reader = factory.reader(&input.data[..]);
    let mut model = Cursor::new(&input.data[..]);
    let len = input.data.len() as u64;

    for op in &input.ops {
        match *op {
            Op::Read(n) => {
                let n = usize::from(n);
                let mut got = vec![0u8; n];
                let mut want = vec![0u8; n];

                let got_n = reader.read(&mut got).unwrap();
                let want_n = model.read(&mut want).unwrap();
                assert_eq!(got_n, want_n, "read size must match the model");
                assert_eq!(&got[..got_n], &want[..want_n], "read bytes must match the model");
            }
            Op::SeekStart(p) => {
                let target = u64::from(p);
                match reader.seek(SeekFrom::Start(target)) {
                    Ok(pos) => {
                        assert!(target <= len);
                        assert_eq!(pos, target);
                        model.seek(SeekFrom::Start(target)).unwrap();
                    }
                    Err(Error::OutOfRange) => assert!(target > len),
                    Err(e) => panic!("unexpected seek error: {e}"),
                }
            }
            Op::SeekCurrent(delta) => {
                let before = reader.position();
                let target = i128::from(before) + i128::from(delta);
                match reader.seek(SeekFrom::Current(i64::from(delta))) {
                    Ok(pos) => {
                        assert!(target >= 0 && target <= i128::from(len));
                        assert_eq!(i128::from(pos), target);
                        model.seek(SeekFrom::Start(pos)).unwrap();
                    }
                    Err(Error::OutOfRange) => {
                        assert!(target < 0 || target > i128::from(len));
                        assert_eq!(reader.position(), before, "failed seek must not move the cursor");
                    }
                    Err(e) => panic!("unexpected seek error: {e}"),
                }
            }
            Op::SeekEnd(delta) => {
                let before = reader.position();
                let target = i128::from(len) + i128::from(delta);
                match reader.seek(SeekFrom::End(i64::from(delta))) {
                    Ok(pos) => {
                        assert!(delta <= 0 && target >= 0);
                        assert_eq!(i128::from(pos), target);
                        model.seek(SeekFrom::Start(pos)).unwrap();
                    }
                    Err(Error::OutOfRange) => {
                        assert!(delta > 0 || target < 0);
                        assert_eq!(reader.position(), before, "failed seek must not move the cursor");
                    }
                    Err(e) => panic!("unexpected seek error: {e}"),
                }
            }
        }

        assert_eq!(reader.position(), model.position(), "cursors must stay in sync");
    }

    // Both sides drain identically from wherever the ops left them.
    let mut tail = Vec::new();
    let mut buf = [0u8; 64];
    loop {
        let n = reader.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        tail.extend_from_slice(&buf[..n]);
    }
    let mut model_tail = Vec::new();
    model.read_to_end(&mut model_tail).unwrap();
    assert_eq!(tail, model_tail, "tails must match the model");
    assert_eq!(reader.position(), len);

    reader.close().unwrap();
});

//! Fuzz target for snapshot parsing.
//!
//! Arbitrary bytes must either be rejected with an error or parse into a
//! snapshot that survives a serialize/parse round trip unchanged.

#![no_main]

use machine6502::snapshot::SNAPSHOT_SIZE;
use machine6502::Snapshot;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(snapshot) = Snapshot::from_bytes(data) {
        let bytes = snapshot.to_bytes();
        assert_eq!(bytes.len(), SNAPSHOT_SIZE);
        assert_eq!(Snapshot::from_bytes(&bytes), Ok(snapshot));
    }
});

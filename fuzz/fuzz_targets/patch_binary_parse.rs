#![no_main]

use libfuzzer_sys::fuzz_target;
use patchfold_decode::decode_binary;
use patchfold_types::Provenance;

fuzz_target!(|data: &[u8]| {
    if let Ok(cached) = decode_binary(data, "fuzz.dat") {
        assert_eq!(cached.patch.provenance, Provenance::Local);
    }
});

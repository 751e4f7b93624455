#![no_main]

use libfuzzer_sys::fuzz_target;
use patchfold_decode::decode_text_as;
use patchfold_domain::{Whitelist, filter_patch};
use patchfold_types::Provenance;

fuzz_target!(|data: &[u8]| {
    let Some((&flag, body)) = data.split_first() else {
        return;
    };
    let require_order = flag & 1 == 1;

    if let Ok(patch) = decode_text_as(body, "fuzz.json", require_order, Provenance::Custom) {
        assert!(!patch.identifier.is_empty());
        let whitelist = Whitelist::lwjgl();
        let once = filter_patch(&patch, &whitelist);
        assert_eq!(filter_patch(&once, &whitelist), once);
    }
});

#![no_main]

use camino::Utf8Path;
use libfuzzer_sys::fuzz_target;
use patchfold_domain::{OrderStore, PatchSet};
use patchfold_runtime::{InMemoryStorage, RecordingDiagnostics, Storage};
use patchfold_types::{Patch, Provenance};

fuzz_target!(|data: &[u8]| {
    let path = Utf8Path::new("profile/patches.order");
    let storage = InMemoryStorage::new().with_file(path, data);
    let diagnostics = RecordingDiagnostics::new();
    let store = OrderStore::new(&storage, &diagnostics);

    let set: PatchSet = ["a", "b", "c"]
        .into_iter()
        .enumerate()
        .map(|(i, id)| {
            let mut patch = Patch::new(id, Provenance::Custom);
            patch.order_index = i as i64;
            patch
        })
        .collect();

    let loaded = store.load(path).into_override();
    let resolved = set.resolve_order(loaded.as_ref(), &diagnostics);

    // Always a permutation of the set, whatever the file said.
    let mut ids = resolved.into_vec();
    ids.sort();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert!(storage.exists(path));
});

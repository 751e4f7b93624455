#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use patchfold_domain::compose;
use patchfold_types::{Patch, Provenance};

#[derive(Debug, Arbitrary)]
struct FuzzPatch {
    id: u8,
    remote: bool,
    main_class: Option<String>,
    launch_arguments: Option<String>,
    launch_arguments_append: Option<String>,
    traits: Vec<String>,
    tweakers: Option<Vec<String>>,
    tweakers_to_add: Vec<String>,
    tweakers_to_remove: Vec<String>,
    minimum_launcher_version: Option<u8>,
}

impl FuzzPatch {
    fn into_patch(self) -> Patch {
        let provenance = if self.remote {
            Provenance::Remote
        } else {
            Provenance::Custom
        };
        let mut patch = Patch::new(format!("p{}", self.id), provenance);
        patch.main_class = self.main_class;
        patch.launch_arguments = self.launch_arguments;
        patch.launch_arguments_append = self.launch_arguments_append;
        patch.traits = self.traits.into_iter().collect();
        patch.tweakers = self.tweakers;
        patch.tweakers_to_add = self.tweakers_to_add;
        patch.tweakers_to_remove = self.tweakers_to_remove;
        patch.minimum_launcher_version = self.minimum_launcher_version.map(u32::from);
        patch
    }
}

fuzz_target!(|input: Vec<FuzzPatch>| {
    let patches: Vec<Patch> = input.into_iter().map(FuzzPatch::into_patch).collect();
    let any_remote = patches.iter().any(|p| p.provenance == Provenance::Remote);

    match compose(&patches) {
        Ok(profile) => {
            assert!(!any_remote);
            assert_eq!(profile.applied.len(), patches.len());
            for patch in &patches {
                assert!(patch.traits.is_subset(&profile.traits));
            }
        }
        Err(_) => assert!(!patches.is_empty()),
    }
});

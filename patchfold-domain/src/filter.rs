use patchfold_types::{Library, Patch};
use std::collections::BTreeSet;

/// Artifact prefixes (`group:name`) the host supplies itself.
///
/// Libraries matching one of these are dropped from patches before composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    prefixes: BTreeSet<String>,
}

impl Whitelist {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Display and input libraries bundled with the launcher.
    pub fn lwjgl() -> Self {
        Self::new([
            "net.java.jinput:jinput",
            "net.java.jinput:jinput-platform",
            "net.java.jutils:jutils",
            "org.lwjgl.lwjgl:lwjgl",
            "org.lwjgl.lwjgl:lwjgl_util",
            "org.lwjgl.lwjgl:lwjgl-platform",
        ])
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.prefixes.contains(prefix)
    }

    pub fn covers(&self, library: &Library) -> bool {
        self.contains(&library.artifact_prefix())
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }
}

pub fn filter_libraries(libraries: &[Library], whitelist: &Whitelist) -> Vec<Library> {
    libraries
        .iter()
        .filter(|lib| !whitelist.covers(lib))
        .cloned()
        .collect()
}

/// A copy of `patch` without whitelisted libraries in its add and overwrite lists.
///
/// Remove matchers are kept as-is.
pub fn filter_patch(patch: &Patch, whitelist: &Whitelist) -> Patch {
    let mut out = patch.clone();
    if whitelist.is_empty() {
        return out;
    }
    out.libraries_to_add = filter_libraries(&patch.libraries_to_add, whitelist);
    out.libraries_to_overwrite = filter_libraries(&patch.libraries_to_overwrite, whitelist);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchfold_types::Provenance;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn lib(coord: &str) -> Library {
        Library::new(coord.parse().expect("coordinate"))
    }

    fn coords(libs: &[Library]) -> Vec<String> {
        libs.iter().map(|l| l.coordinate.to_string()).collect()
    }

    #[test]
    fn lwjgl_whitelist_drops_bundled_libraries() {
        let libs = vec![
            lib("org.lwjgl.lwjgl:lwjgl:2.9.1"),
            lib("com.mojang:realms:1.3.5"),
            lib("net.java.jinput:jinput-platform:2.0.5:natives-linux"),
        ];
        let kept = filter_libraries(&libs, &Whitelist::lwjgl());
        assert_eq!(coords(&kept), vec!["com.mojang:realms:1.3.5"]);
    }

    #[test]
    fn remove_matchers_survive_filtering() {
        let mut patch = Patch::new("org.example", Provenance::Custom);
        patch.libraries_to_add = vec![lib("org.lwjgl.lwjgl:lwjgl:2.9.1")];
        patch.libraries_to_remove = vec!["org.lwjgl.lwjgl:lwjgl".parse().unwrap()];

        let filtered = filter_patch(&patch, &Whitelist::lwjgl());
        assert!(filtered.libraries_to_add.is_empty());
        assert_eq!(filtered.libraries_to_remove, patch.libraries_to_remove);
    }

    #[test]
    fn empty_whitelist_keeps_everything() {
        let mut patch = Patch::new("org.example", Provenance::Custom);
        patch.libraries_to_overwrite = vec![lib("org.lwjgl.lwjgl:lwjgl:2.9.1")];
        assert_eq!(filter_patch(&patch, &Whitelist::default()), patch);
    }

    fn arb_library() -> impl Strategy<Value = Library> {
        (
            prop::sample::select(vec!["org.lwjgl.lwjgl", "net.java.jinput", "com.mojang"]),
            prop::sample::select(vec!["lwjgl", "jinput", "realms", "lwjgl_util"]),
            "[0-9]\\.[0-9]",
        )
            .prop_map(|(g, n, v)| lib(&format!("{g}:{n}:{v}")))
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(libs in prop::collection::vec(arb_library(), 0..12)) {
            let whitelist = Whitelist::lwjgl();
            let once = filter_libraries(&libs, &whitelist);
            let twice = filter_libraries(&once, &whitelist);
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.iter().all(|l| !whitelist.covers(l)));
        }
    }
}

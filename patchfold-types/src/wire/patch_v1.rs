use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::library::{Library, OsRule};
use crate::patch::Patch;

/// Schema-exact version descriptor document.
///
/// Every key is optional at this layer; required-ness (`order`, coordinate syntax,
/// timestamp syntax) is enforced by the decoder. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchDocumentV1 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(rename = "fileId", skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,

    #[serde(rename = "mainClass", skip_serializing_if = "Option::is_none")]
    pub main_class: Option<String>,

    #[serde(rename = "appletClass", skip_serializing_if = "Option::is_none")]
    pub applet_class: Option<String>,

    #[serde(rename = "processArguments", skip_serializing_if = "Option::is_none")]
    pub process_arguments: Option<String>,

    #[serde(rename = "minecraftArguments", skip_serializing_if = "Option::is_none")]
    pub launch_arguments: Option<String>,

    #[serde(rename = "+minecraftArguments", skip_serializing_if = "Option::is_none")]
    pub add_launch_arguments: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub release_type: Option<String>,

    #[serde(rename = "releaseTime", skip_serializing_if = "Option::is_none")]
    pub release_time: Option<String>,

    #[serde(rename = "time", skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<String>,

    #[serde(
        rename = "minimumLauncherVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub minimum_launcher_version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweakers: Option<Vec<String>>,

    #[serde(rename = "+tweakers", skip_serializing_if = "Vec::is_empty")]
    pub add_tweakers: Vec<String>,

    #[serde(rename = "-tweakers", skip_serializing_if = "Vec::is_empty")]
    pub remove_tweakers: Vec<String>,

    #[serde(rename = "traits", skip_serializing_if = "Vec::is_empty")]
    pub traits: Vec<String>,

    #[serde(rename = "+traits", skip_serializing_if = "Vec::is_empty")]
    pub add_traits: Vec<String>,

    #[serde(rename = "libraries", skip_serializing_if = "Vec::is_empty")]
    pub overwrite_libraries: Vec<LibraryV1>,

    #[serde(rename = "+libraries", skip_serializing_if = "Vec::is_empty")]
    pub add_libraries: Vec<LibraryV1>,

    #[serde(rename = "-libraries", skip_serializing_if = "Vec::is_empty")]
    pub remove_libraries: Vec<LibraryRefV1>,

    #[serde(rename = "+jarMods", skip_serializing_if = "Vec::is_empty")]
    pub add_jar_mods: Vec<JarModV1>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryV1 {
    /// `group:name:version[:classifier]`
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<OsRule>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub natives: BTreeMap<String, String>,
}

/// A `-libraries` entry: `group:name[:version]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryRefV1 {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JarModV1 {
    pub name: String,
}

impl From<&Library> for LibraryV1 {
    fn from(lib: &Library) -> Self {
        Self {
            name: lib.coordinate.to_string(),
            url: lib.url.clone(),
            rules: lib.rules.clone(),
            natives: lib.natives.clone(),
        }
    }
}

impl From<&Patch> for PatchDocumentV1 {
    fn from(patch: &Patch) -> Self {
        Self {
            id: patch.version_id.clone(),
            order: Some(patch.order_index),
            name: patch.name.clone(),
            version: patch.version.clone(),
            file_id: Some(patch.identifier.clone()),
            main_class: patch.main_class.clone(),
            applet_class: patch.applet_class.clone(),
            process_arguments: patch.process_arguments.clone(),
            launch_arguments: patch.launch_arguments.clone(),
            add_launch_arguments: patch.launch_arguments_append.clone(),
            release_type: patch.release_type.clone(),
            release_time: patch.release_time.as_ref().map(|t| t.raw.clone()),
            update_time: patch.update_time.as_ref().map(|t| t.raw.clone()),
            assets: patch.assets.clone(),
            minimum_launcher_version: patch.minimum_launcher_version,
            tweakers: patch.tweakers.clone(),
            add_tweakers: patch.tweakers_to_add.clone(),
            remove_tweakers: patch.tweakers_to_remove.clone(),
            traits: Vec::new(),
            add_traits: patch.traits.iter().cloned().collect(),
            overwrite_libraries: patch.libraries_to_overwrite.iter().map(Into::into).collect(),
            add_libraries: patch.libraries_to_add.iter().map(Into::into).collect(),
            remove_libraries: patch
                .libraries_to_remove
                .iter()
                .map(|m| LibraryRefV1 {
                    name: m.to_string(),
                })
                .collect(),
            add_jar_mods: patch
                .jar_mods
                .iter()
                .map(|j| JarModV1 {
                    name: j.name.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provenance::Provenance;

    #[test]
    fn plus_and_minus_keys_use_document_names() {
        let doc: PatchDocumentV1 = serde_json::from_str(
            r#"{
                "fileId": "org.example.mod",
                "+traits": ["texturepacks"],
                "+libraries": [{"name": "org.example:lib:1.0"}],
                "-libraries": [{"name": "org.example:old"}],
                "+tweakers": ["org.example.Tweaker"]
            }"#,
        )
        .expect("parse");
        assert_eq!(doc.file_id.as_deref(), Some("org.example.mod"));
        assert_eq!(doc.add_traits, vec!["texturepacks"]);
        assert!(doc.traits.is_empty());
        assert_eq!(doc.add_libraries[0].name, "org.example:lib:1.0");
        assert_eq!(doc.remove_libraries[0].name, "org.example:old");
        assert_eq!(doc.add_tweakers, vec!["org.example.Tweaker"]);
    }

    #[test]
    fn plain_traits_key_is_read() {
        let doc: PatchDocumentV1 =
            serde_json::from_str(r#"{"fileId": "a", "traits": ["legacyLaunch"]}"#).expect("parse");
        assert_eq!(doc.traits, vec!["legacyLaunch"]);
        assert!(doc.add_traits.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let doc: PatchDocumentV1 =
            serde_json::from_str(r#"{"id": "1.7.10", "downloads": {"client": {}}}"#)
                .expect("parse");
        assert_eq!(doc.id.as_deref(), Some("1.7.10"));
    }

    #[test]
    fn from_patch_omits_empty_lists() {
        let patch = Patch::new("net.minecraft", Provenance::Local);
        let json = serde_json::to_value(PatchDocumentV1::from(&patch)).expect("serialize");
        assert_eq!(json["fileId"], "net.minecraft");
        assert!(json.get("+libraries").is_none());
        assert!(json.get("mainClass").is_none());
    }
}

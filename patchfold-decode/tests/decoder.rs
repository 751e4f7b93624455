//! Decoder behavior over realistic descriptor documents.

use camino::Utf8Path;
use patchfold_decode::{
    PatchLoadError, decode_binary, decode_text, decode_text_as, encode_binary, load_patches,
    parse_text_document, source_digest,
};
use patchfold_runtime::InMemoryStorage;
use patchfold_types::Provenance;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const VANILLA: &str = r#"{
    "id": "1.7.10",
    "fileId": "net.minecraft",
    "name": "Minecraft",
    "order": -2,
    "mainClass": "net.minecraft.client.main.Main",
    "minecraftArguments": "--username ${auth_player_name} --version ${version_name}",
    "type": "release",
    "releaseTime": "2014-05-14T19:29:23+00:00",
    "time": "2014-05-14T19:29:23+00:00",
    "assets": "1.7.10",
    "minimumLauncherVersion": 13,
    "libraries": [
        {"name": "org.lwjgl.lwjgl:lwjgl:2.9.1"},
        {"name": "org.lwjgl.lwjgl:lwjgl-platform:2.9.1", "natives": {"linux": "natives-linux"}},
        {"name": "com.mojang:realms:1.3.5"}
    ]
}"#;

const FORGE: &str = r#"{
    "fileId": "net.minecraftforge",
    "name": "Forge",
    "order": 5,
    "mainClass": "net.minecraft.launchwrapper.Launch",
    "+tweakers": ["cpw.mods.fml.common.launcher.FMLTweaker"],
    "+libraries": [{"name": "net.minecraftforge:forge:1.7.10-10.13.4.1614:universal"}],
    "-libraries": [{"name": "com.mojang:realms"}],
    "+traits": ["legacyFML"]
}"#;

#[test]
fn vanilla_document_decodes_every_known_key() {
    let patch = decode_text_as(VANILLA.as_bytes(), "1.7.10.json", false, Provenance::Local)
        .expect("decode");

    assert_eq!(patch.identifier, "net.minecraft");
    assert_eq!(patch.version_id.as_deref(), Some("1.7.10"));
    assert_eq!(patch.order_index, -2);
    assert_eq!(patch.provenance, Provenance::Local);
    assert_eq!(patch.minimum_launcher_version, Some(13));
    assert_eq!(patch.libraries_to_overwrite.len(), 3);
    assert!(patch.libraries_to_overwrite[1].is_native());
    assert_eq!(
        patch.release_time.as_ref().map(|t| t.raw.as_str()),
        Some("2014-05-14T19:29:23+00:00")
    );
}

#[test]
fn forge_document_decodes_plus_and_minus_keys() {
    let patch = decode_text(FORGE.as_bytes(), "forge.json", true).expect("decode");

    assert_eq!(patch.provenance, Provenance::Custom);
    assert!(patch.requires_explicit_order);
    assert_eq!(patch.tweakers_to_add, vec!["cpw.mods.fml.common.launcher.FMLTweaker"]);
    assert_eq!(
        patch.libraries_to_add[0].coordinate.classifier.as_deref(),
        Some("universal")
    );
    assert_eq!(patch.libraries_to_remove[0].to_string(), "com.mojang:realms");
    assert!(patch.traits.contains("legacyFML"));
}

#[test]
fn plain_traits_key_decodes_into_trait_set() {
    let patch = decode_text(
        br#"{"fileId": "a", "order": 1, "traits": ["legacyLaunch"]}"#,
        "a.json",
        true,
    )
    .expect("decode");
    assert!(patch.traits.contains("legacyLaunch"));
}

#[test]
fn custom_document_without_order_is_rejected() {
    let err = decode_text(br#"{"fileId": "org.example"}"#, "example.json", true)
        .expect_err("order required");
    assert_eq!(err.source_name, "example.json");
    assert!(err.to_string().contains("missing 'order' field"));
}

#[test]
fn malformed_coordinate_is_rejected() {
    let err = decode_text(
        br#"{"fileId": "x", "order": 1, "+libraries": [{"name": "only-one-part"}]}"#,
        "x.json",
        true,
    )
    .expect_err("bad coordinate");
    assert!(err.message.contains("+libraries"));
}

#[test]
fn binary_cache_of_text_document_decodes_to_same_content() {
    let doc = parse_text_document(VANILLA.as_bytes(), "1.7.10.json").expect("parse");
    let digest = source_digest(VANILLA.as_bytes());
    let bytes = encode_binary(&doc, Some(digest.clone())).expect("encode");

    let text = decode_text_as(VANILLA.as_bytes(), "1.7.10.json", false, Provenance::Local)
        .expect("text");
    let cached = decode_binary(&bytes, "1.7.10.dat").expect("binary");

    assert_eq!(cached.patch, text);
    assert_eq!(cached.source_sha256.as_deref(), Some(digest.as_str()));
}

#[test]
fn loader_reports_each_document_in_its_slot() {
    let storage = InMemoryStorage::new()
        .with_file("profile/patches/b-forge.json", FORGE)
        .with_file("profile/patches/a-broken.json", "{ not json")
        .with_file("profile/patches/notes.txt", "ignored");

    let loaded = load_patches(
        &storage,
        Utf8Path::new("profile/patches"),
        true,
        Provenance::Custom,
    )
    .expect("scan");

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].stem(), "a-broken");
    assert!(matches!(loaded[0].patch, Err(PatchLoadError::Format(_))));
    assert_eq!(
        loaded[1].patch.as_ref().map(|p| p.identifier.as_str()).ok(),
        Some("net.minecraftforge")
    );
}

#[test]
fn loader_on_missing_dir_is_empty() {
    let storage = InMemoryStorage::new();
    let loaded = load_patches(&storage, Utf8Path::new("nowhere"), false, Provenance::Local)
        .expect("scan");
    assert!(loaded.is_empty());
}

proptest! {
    /// Arbitrary input never panics the text decoder; it either decodes or errors.
    #[test]
    fn text_decoder_is_total(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_text(&bytes, "fuzz.json", true);
    }

    /// Arbitrary bytes behind a valid header never panic the binary decoder.
    #[test]
    fn binary_decoder_is_total(body in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut bytes = b"PFBC".to_vec();
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&body);
        let _ = decode_binary(&bytes, "fuzz.dat");
    }
}

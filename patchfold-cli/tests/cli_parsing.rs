//! CLI behavior against throwaway profile directories.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn patchfold() -> Command {
    Command::cargo_bin("patchfold").expect("patchfold binary")
}

fn create_temp_profile() -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    let root = td.path();

    fs::create_dir_all(root.join("versions")).unwrap();
    fs::create_dir_all(root.join("patches")).unwrap();
    fs::write(
        root.join("versions").join("1.7.10.json"),
        r#"{
    "id": "1.7.10",
    "fileId": "net.minecraft",
    "order": -2,
    "mainClass": "net.minecraft.client.main.Main",
    "libraries": [
        {"name": "org.lwjgl.lwjgl:lwjgl:2.9.1"},
        {"name": "com.mojang:realms:1.3.5"}
    ]
}"#,
    )
    .unwrap();
    fs::write(
        root.join("patches").join("forge.json"),
        r#"{
    "fileId": "net.minecraftforge",
    "name": "Forge",
    "order": 5,
    "mainClass": "net.minecraft.launchwrapper.Launch",
    "+traits": ["FirstThreadOnMacOS"]
}"#,
    )
    .unwrap();

    td
}

fn read_order(root: &Path) -> serde_json::Value {
    let text = fs::read_to_string(root.join("patches.order")).expect("order file");
    serde_json::from_str(&text).expect("order json")
}

#[test]
fn test_compose_no_args_uses_current_dir() {
    let temp = create_temp_profile();

    patchfold()
        .current_dir(temp.path())
        .arg("compose")
        .assert()
        .success()
        .stdout(predicate::str::contains("# profile 1.7.10"))
        .stdout(predicate::str::contains("net.minecraft.launchwrapper.Launch"))
        .stdout(predicate::str::contains("org.lwjgl.lwjgl:lwjgl").not());
}

#[test]
fn test_compose_no_filter_keeps_lwjgl() {
    let temp = create_temp_profile();

    patchfold()
        .current_dir(temp.path())
        .args(["compose", "--no-filter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("org.lwjgl.lwjgl:lwjgl:2.9.1"));
}

#[test]
fn test_compose_config_file_disables_filter() {
    let temp = create_temp_profile();
    fs::write(temp.path().join("patchfold.toml"), "[filter]\nenabled = false\n").unwrap();

    patchfold()
        .current_dir(temp.path())
        .arg("compose")
        .assert()
        .success()
        .stdout(predicate::str::contains("org.lwjgl.lwjgl:lwjgl:2.9.1"));
}

#[test]
fn test_compose_os_filter_and_natives() {
    let temp = create_temp_profile();
    fs::write(
        temp.path().join("patches").join("natives.json"),
        r#"{
    "fileId": "org.example.natives",
    "order": 6,
    "type": "release",
    "+libraries": [
        {"name": "ca.weblite:java-objc-bridge:1.0.0", "rules": [{"action": "allow", "os": {"name": "osx"}}]},
        {"name": "org.example:jinput-natives:2.0.5", "natives": {"linux": "natives-linux", "osx": "natives-osx"}}
    ]
}"#,
    )
    .unwrap();

    patchfold()
        .current_dir(temp.path())
        .args(["compose", "--os", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Type: `Regular release`"))
        .stdout(predicate::str::contains("java-objc-bridge").not())
        .stdout(predicate::str::contains(
            "- `org.example:jinput-natives:2.0.5` (natives-linux)",
        ));
}

#[test]
fn test_compose_json_format() {
    let temp = create_temp_profile();

    let out = patchfold()
        .current_dir(temp.path())
        .args(["compose", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(value["identifier"], "1.7.10");
    assert_eq!(value["applied"], serde_json::json!(["net.minecraft", "net.minecraftforge"]));
}

#[test]
fn test_compose_with_remote_stub_exits_2() {
    let temp = create_temp_profile();
    fs::write(
        temp.path().join("remote.json"),
        r#"[{"id": "com.mumfrey.liteloader", "order": 10}]"#,
    )
    .unwrap();

    patchfold()
        .current_dir(temp.path())
        .arg("compose")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("com.mumfrey.liteloader"));
}

#[test]
fn test_compose_with_future_launcher_exits_2() {
    let temp = create_temp_profile();
    fs::write(
        temp.path().join("patches").join("future.json"),
        r#"{"fileId": "future", "order": 9, "minimumLauncherVersion": 99}"#,
    )
    .unwrap();

    patchfold()
        .current_dir(temp.path())
        .arg("compose")
        .assert()
        .code(2);
}

#[test]
fn test_list_shows_table() {
    let temp = create_temp_profile();

    patchfold()
        .args(["list", "--profile"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("| 1 | `net.minecraft` |"))
        .stdout(predicate::str::contains("| 2 | `net.minecraftforge` | Forge | custom | 5 | ok |"));
}

#[test]
fn test_order_show_defaults_to_natural_order() {
    let temp = create_temp_profile();

    patchfold()
        .current_dir(temp.path())
        .args(["order", "show"])
        .assert()
        .success()
        .stdout("net.minecraft\nnet.minecraftforge\n");
    assert!(!temp.path().join("patches.order").exists());
}

#[test]
fn test_order_move_persists_file() {
    let temp = create_temp_profile();

    patchfold()
        .current_dir(temp.path())
        .args(["order", "move", "net.minecraftforge", "--direction", "up"])
        .assert()
        .success()
        .stdout("net.minecraftforge\nnet.minecraft\n");

    assert_eq!(
        read_order(temp.path()),
        serde_json::json!({"version": 1, "order": ["net.minecraftforge", "net.minecraft"]})
    );
}

#[test]
fn test_order_move_at_boundary_fails() {
    let temp = create_temp_profile();

    patchfold()
        .current_dir(temp.path())
        .args(["order", "move", "net.minecraft", "--direction", "up"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("boundary"));
}

#[test]
fn test_order_set_then_reset() {
    let temp = create_temp_profile();

    patchfold()
        .current_dir(temp.path())
        .args(["order", "set", "net.minecraftforge"])
        .assert()
        .success()
        .stdout("net.minecraftforge\nnet.minecraft\n");

    patchfold()
        .current_dir(temp.path())
        .args(["order", "reset"])
        .assert()
        .success()
        .stdout("net.minecraft\nnet.minecraftforge\n");
    assert!(!temp.path().join("patches.order").exists());
}

#[test]
fn test_order_set_requires_ids() {
    let temp = create_temp_profile();

    patchfold()
        .current_dir(temp.path())
        .args(["order", "set"])
        .assert()
        .failure();
}

#[test]
fn test_mismatched_order_file_is_ignored() {
    let temp = create_temp_profile();
    fs::write(
        temp.path().join("patches.order"),
        r#"{"version": 2, "order": ["net.minecraftforge", "net.minecraft"]}"#,
    )
    .unwrap();

    patchfold()
        .current_dir(temp.path())
        .args(["order", "show"])
        .assert()
        .success()
        .stdout("net.minecraft\nnet.minecraftforge\n");
    // never deleted
    assert!(temp.path().join("patches.order").exists());
}

#[test]
fn test_decode_prints_patch_json() {
    let temp = create_temp_profile();

    patchfold()
        .current_dir(temp.path())
        .args(["decode", "patches/forge.json", "--require-order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"identifier\": \"net.minecraftforge\""));
}

#[test]
fn test_decode_missing_order_fails() {
    let temp = create_temp_profile();
    fs::write(temp.path().join("loose.json"), r#"{"fileId": "loose"}"#).unwrap();

    patchfold()
        .current_dir(temp.path())
        .args(["decode", "loose.json", "--require-order"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing 'order' field"));
}

#[test]
fn test_cache_then_decode_binary() {
    let temp = create_temp_profile();

    patchfold()
        .current_dir(temp.path())
        .arg("cache")
        .assert()
        .success()
        .stdout("cached 1 version(s), 0 failed\n");
    assert!(temp.path().join("cache").join("1.7.10.dat").exists());

    patchfold()
        .current_dir(temp.path())
        .args(["decode", "--binary", "cache/1.7.10.dat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"provenance\": \"local\""));
}

#[test]
fn test_unknown_subcommand_fails() {
    patchfold().arg("explode").assert().failure();
}

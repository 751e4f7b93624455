//! The pipeline against a real profile directory.

use camino::Utf8PathBuf;
use fs_err as fs;
use patchfold_core::adapters::ProfileDirSource;
use patchfold_core::pipeline::{run_compose, write_caches};
use patchfold_core::session::ProfileSession;
use patchfold_core::settings::ProfileSettings;
use patchfold_core::{FsStorage, RecordingDiagnostics};
use patchfold_types::Direction;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn profile_dir(temp: &TempDir) -> Utf8PathBuf {
    let root = Utf8PathBuf::from_path_buf(temp.path().join("profile")).expect("utf8");
    fs::create_dir_all(root.join("versions")).unwrap();
    fs::create_dir_all(root.join("patches")).unwrap();
    fs::write(
        root.join("versions/1.7.10.json"),
        r#"{"id": "1.7.10", "fileId": "net.minecraft", "order": -2,
            "mainClass": "net.minecraft.client.main.Main",
            "libraries": [{"name": "org.lwjgl.lwjgl:lwjgl:2.9.1"}, {"name": "com.mojang:realms:1.3.5"}]}"#,
    )
    .unwrap();
    fs::write(
        root.join("patches/forge.json"),
        r#"{"fileId": "net.minecraftforge", "order": 5, "mainClass": "net.minecraft.launchwrapper.Launch"}"#,
    )
    .unwrap();
    root
}

fn settings(root: &Utf8PathBuf) -> ProfileSettings {
    ProfileSettings {
        root: root.clone(),
        ..ProfileSettings::default()
    }
}

#[test]
fn composes_profile_from_disk() {
    let temp = TempDir::new().unwrap();
    let root = profile_dir(&temp);
    let diag = RecordingDiagnostics::new();
    let settings = settings(&root);
    let source = ProfileDirSource::new(&FsStorage, settings.layout());

    let outcome = run_compose(&settings, &source, &FsStorage, &diag).expect("compose");
    assert_eq!(outcome.profile.identifier.as_deref(), Some("1.7.10"));
    assert_eq!(
        outcome.profile.main_class.as_deref(),
        Some("net.minecraft.launchwrapper.Launch")
    );
    let libs: Vec<String> = outcome
        .profile
        .flattened_libraries()
        .iter()
        .map(|l| l.coordinate.to_string())
        .collect();
    assert_eq!(libs, vec!["com.mojang:realms:1.3.5"]);
}

#[test]
fn cached_profile_composes_identically() {
    let temp = TempDir::new().unwrap();
    let root = profile_dir(&temp);
    let diag = RecordingDiagnostics::new();
    let settings = settings(&root);

    let before = {
        let source = ProfileDirSource::new(&FsStorage, settings.layout());
        run_compose(&settings, &source, &FsStorage, &diag).expect("compose").profile
    };

    let summary = write_caches(&FsStorage, &settings.layout(), &diag).expect("caches");
    assert_eq!(summary.written, 1);
    assert!(root.join("cache/1.7.10.dat").exists());

    let source = ProfileDirSource::new(&FsStorage, settings.layout());
    let after = run_compose(&settings, &source, &FsStorage, &diag).expect("compose").profile;
    assert_eq!(before, after);
}

#[test]
fn reorder_writes_order_file() {
    let temp = TempDir::new().unwrap();
    let root = profile_dir(&temp);
    let diag = RecordingDiagnostics::new();
    let settings = settings(&root);
    let source = ProfileDirSource::new(&FsStorage, settings.layout());

    let mut session = ProfileSession::open(settings, &source, &FsStorage, &diag).expect("open");
    session
        .move_patch("net.minecraftforge", Direction::Up)
        .expect("move");

    let text = fs::read_to_string(root.join("patches.order")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"version": 1, "order": ["net.minecraftforge", "net.minecraft"]})
    );
    assert_eq!(
        session.profile().expect("compose").main_class.as_deref(),
        Some("net.minecraft.client.main.Main")
    );
}

//! Rendering helpers (markdown) for human-readable output.

use patchfold_domain::PatchSet;
use patchfold_types::{Patch, PatchOrder, Profile};

pub fn render_profile_md(profile: &Profile) -> String {
    render_profile_md_for(profile, None)
}

/// Like [`render_profile_md`], listing only libraries active on `os` when given.
pub fn render_profile_md_for(profile: &Profile, os: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# profile {}\n\n",
        profile.identifier.as_deref().unwrap_or("(unnamed)")
    ));

    push_field(&mut out, "Main class", profile.main_class.as_deref());
    push_field(&mut out, "Applet class", profile.applet_class.as_deref());
    push_field(
        &mut out,
        "Type",
        profile.type_label().or(profile.release_type.as_deref()),
    );
    push_field(&mut out, "Assets", profile.assets.as_deref());
    push_field(
        &mut out,
        "Released",
        profile.release_time.as_ref().map(|t| t.raw.as_str()),
    );
    push_field(
        &mut out,
        "Updated",
        profile.update_time.as_ref().map(|t| t.raw.as_str()),
    );
    push_field(&mut out, "Arguments", profile.launch_arguments.as_deref());
    if let Some(effective) = profile.process_arguments.effective.as_deref() {
        let marker = if profile.process_arguments.is_customized() {
            " (customized)"
        } else {
            ""
        };
        out.push_str(&format!("- Process arguments: `{}`{}\n", effective, marker));
    }
    if profile.uses_legacy_launcher() {
        out.push_str("- Legacy launcher: yes\n");
    }
    out.push_str(&format!("- Patches applied: {}\n\n", profile.applied.join(", ")));

    if !profile.traits.is_empty() {
        out.push_str("## Traits\n\n");
        for t in &profile.traits {
            out.push_str(&format!("- `{}`\n", t));
        }
        out.push('\n');
    }

    if !profile.tweakers.is_empty() {
        out.push_str("## Tweakers\n\n");
        for t in &profile.tweakers {
            out.push_str(&format!("- `{}`\n", t));
        }
        out.push('\n');
    }

    if !profile.jar_mods.is_empty() {
        out.push_str("## Jar mods\n\n");
        for j in &profile.jar_mods {
            out.push_str(&format!("- `{}`\n", j.name));
        }
        out.push('\n');
    }

    out.push_str("## Libraries\n\n");
    let libraries = match os {
        Some(os) => profile.libraries_for_os(os),
        None => profile.flattened_libraries(),
    };
    let natives: Vec<_> = profile
        .native_libraries()
        .into_iter()
        .filter(|lib| libraries.contains(lib))
        .collect();
    let regular: Vec<_> = libraries.iter().filter(|lib| !lib.is_native()).collect();
    if regular.is_empty() && natives.is_empty() {
        out.push_str("_No libraries._\n");
        return out;
    }
    for lib in &regular {
        out.push_str(&format!("- `{}`\n", lib.coordinate));
    }

    if !natives.is_empty() {
        out.push_str("\n## Native libraries\n\n");
        for lib in &natives {
            let classifiers: Vec<&str> = match os {
                Some(os) => lib.natives.get(os).map(String::as_str).into_iter().collect(),
                None => lib.natives.values().map(String::as_str).collect(),
            };
            out.push_str(&format!("- `{}` ({})\n", lib.coordinate, classifiers.join(", ")));
        }
    }

    out
}

/// Table of every patch in the order in effect.
pub fn render_patch_list_md(set: &PatchSet, order: &PatchOrder) -> String {
    let mut out = String::new();
    out.push_str("# patches\n\n");
    if order.is_empty() {
        out.push_str("_No patches._\n");
        return out;
    }

    out.push_str("| # | Identifier | Name | Provenance | Order | Status |\n");
    out.push_str("|---|---|---|---|---|---|\n");
    for (i, patch) in set.ordered(order).enumerate() {
        out.push_str(&format!(
            "| {} | `{}` | {} | {} | {} | {} |\n",
            i + 1,
            patch.identifier,
            patch.display_name(),
            patch.provenance,
            patch.order_index,
            status_label(patch)
        ));
    }
    out
}

fn status_label(patch: &Patch) -> &'static str {
    if !patch.is_applicable() {
        "needs download"
    } else if patch.has_update() {
        "update available"
    } else {
        "ok"
    }
}

fn push_field(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(v) = value {
        out.push_str(&format!("- {}: `{}`\n", label, v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchfold_types::{
        Library, LibraryContribution, OsConstraint, OsRule, Provenance, RuleAction,
    };
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn profile_md_lists_fields_and_libraries() {
        let mut native = Library::new("org.lwjgl.lwjgl:lwjgl-platform:2.9.1".parse().unwrap());
        native.natives = BTreeMap::from([("linux".to_string(), "natives-linux".to_string())]);
        let mut profile = Profile {
            identifier: Some("1.7.10".to_string()),
            main_class: Some("net.minecraft.client.main.Main".to_string()),
            applied: vec!["net.minecraft".to_string()],
            contributions: vec![LibraryContribution {
                patch_id: "net.minecraft".to_string(),
                add: vec![],
                overwrite: vec![native],
            }],
            ..Profile::default()
        };
        profile.process_arguments.set_from_patch("legacy");
        profile.process_arguments.override_with("custom");

        let md = render_profile_md(&profile);
        assert!(md.starts_with("# profile 1.7.10\n"));
        assert!(md.contains("- Main class: `net.minecraft.client.main.Main`\n"));
        assert!(md.contains("- Process arguments: `custom` (customized)\n"));
        assert!(md.contains("## Native libraries\n\n- `org.lwjgl.lwjgl:lwjgl-platform:2.9.1` (natives-linux)\n"));
    }

    #[test]
    fn release_type_rendered_as_label() {
        let profile = Profile {
            release_type: Some("old_beta".to_string()),
            ..Profile::default()
        };
        assert!(render_profile_md(&profile).contains("- Type: `Beta`\n"));

        let unknown = Profile {
            release_type: Some("experiment".to_string()),
            ..Profile::default()
        };
        assert!(render_profile_md(&unknown).contains("- Type: `experiment`\n"));
    }

    #[test]
    fn os_filter_drops_libraries_ruled_out_elsewhere() {
        let mut mac_only = Library::new("ca.weblite:java-objc-bridge:1.0.0".parse().unwrap());
        mac_only.rules = vec![OsRule {
            action: RuleAction::Allow,
            os: Some(OsConstraint {
                name: "osx".to_string(),
                version: None,
            }),
        }];
        let mut native = Library::new("org.lwjgl.lwjgl:lwjgl-platform:2.9.1".parse().unwrap());
        native.natives = BTreeMap::from([
            ("linux".to_string(), "natives-linux".to_string()),
            ("osx".to_string(), "natives-osx".to_string()),
        ]);
        let profile = Profile {
            contributions: vec![LibraryContribution {
                patch_id: "net.minecraft".to_string(),
                add: vec![Library::new("com.mojang:realms:1.3.5".parse().unwrap()), mac_only],
                overwrite: vec![native],
            }],
            ..Profile::default()
        };

        let linux = render_profile_md_for(&profile, Some("linux"));
        assert!(linux.contains("- `com.mojang:realms:1.3.5`\n"));
        assert!(!linux.contains("java-objc-bridge"));
        assert!(linux.contains("- `org.lwjgl.lwjgl:lwjgl-platform:2.9.1` (natives-linux)\n"));

        let all = render_profile_md(&profile);
        assert!(all.contains("- `ca.weblite:java-objc-bridge:1.0.0`\n"));
        assert!(all.contains("(natives-linux, natives-osx)"));
    }

    #[test]
    fn empty_profile_has_no_libraries_marker() {
        let md = render_profile_md(&Profile::default());
        assert!(md.contains("# profile (unnamed)"));
        assert!(md.ends_with("_No libraries._\n"));
    }

    #[test]
    fn patch_list_shows_status() {
        let mut set = PatchSet::new();
        set.insert(Patch::remote_stub("net.minecraft", -2));
        let mut forge = Patch::new("net.minecraftforge", Provenance::Custom);
        forge.name = Some("Forge".to_string());
        forge.order_index = 5;
        set.insert(forge);

        let md = render_patch_list_md(&set, &set.natural_order());
        let rows: Vec<&str> = md.lines().filter(|l| l.starts_with("| 1") || l.starts_with("| 2")).collect();
        assert_eq!(
            rows,
            vec![
                "| 1 | `net.minecraft` | net.minecraft | remote | -2 | needs download |",
                "| 2 | `net.minecraftforge` | Forge | custom | 5 | ok |",
            ]
        );
    }
}

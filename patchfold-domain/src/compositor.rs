use crate::error::CompositionError;
use patchfold_types::schema::CURRENT_LAUNCHER_VERSION;
use patchfold_types::{LibraryContribution, Patch, Profile};
use tracing::debug;

/// Apply `patches` in order to an empty profile.
///
/// All-or-nothing: the first patch that cannot be applied aborts the whole
/// composition and no partial profile escapes.
pub fn compose<'a, I>(patches: I) -> Result<Profile, CompositionError>
where
    I: IntoIterator<Item = &'a Patch>,
{
    compose_with(patches, CURRENT_LAUNCHER_VERSION)
}

/// Like [`compose`], against an explicit supported launcher version.
pub fn compose_with<'a, I>(patches: I, supported_launcher: u32) -> Result<Profile, CompositionError>
where
    I: IntoIterator<Item = &'a Patch>,
{
    let mut profile = Profile::default();
    for patch in patches {
        apply(&mut profile, patch, supported_launcher)?;
    }
    debug!(
        identifier = profile.identifier.as_deref().unwrap_or("<unset>"),
        applied = profile.applied.len(),
        traits = profile.traits.len(),
        "composed profile"
    );
    Ok(profile)
}

fn apply(profile: &mut Profile, patch: &Patch, supported_launcher: u32) -> Result<(), CompositionError> {
    if !patch.is_applicable() {
        return Err(CompositionError::VersionIncomplete {
            identifier: patch.identifier.clone(),
        });
    }
    if let Some(required) = patch.minimum_launcher_version
        && required > supported_launcher
    {
        return Err(CompositionError::LauncherTooOld {
            identifier: patch.identifier.clone(),
            required,
            supported: supported_launcher,
        });
    }

    debug!(identifier = %patch.identifier, provenance = %patch.provenance, "applying patch");

    set_if_present(&mut profile.identifier, &patch.version_id);
    set_if_present(&mut profile.main_class, &patch.main_class);
    set_if_present(&mut profile.applet_class, &patch.applet_class);
    set_if_present(&mut profile.release_type, &patch.release_type);
    set_if_present(&mut profile.assets, &patch.assets);
    set_if_present(&mut profile.release_time, &patch.release_time);
    set_if_present(&mut profile.update_time, &patch.update_time);

    if let Some(args) = &patch.process_arguments {
        profile.process_arguments.set_from_patch(args);
    }

    set_if_present(&mut profile.launch_arguments, &patch.launch_arguments);
    if let Some(extra) = &patch.launch_arguments_append {
        profile.launch_arguments = Some(match profile.launch_arguments.take() {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, extra),
            _ => extra.clone(),
        });
    }

    profile.traits.extend(patch.traits.iter().cloned());

    if let Some(tweakers) = &patch.tweakers {
        profile.tweakers = tweakers.clone();
    }
    for tweaker in &patch.tweakers_to_add {
        if !profile.tweakers.contains(tweaker) {
            profile.tweakers.push(tweaker.clone());
        }
    }
    profile
        .tweakers
        .retain(|t| !patch.tweakers_to_remove.contains(t));

    profile.jar_mods.extend(patch.jar_mods.iter().cloned());

    // Removals reach back into earlier patches' additions only.
    if !patch.libraries_to_remove.is_empty() {
        for earlier in &mut profile.contributions {
            earlier
                .add
                .retain(|lib| !patch.libraries_to_remove.iter().any(|m| m.matches(lib)));
        }
    }
    profile.contributions.push(LibraryContribution {
        patch_id: patch.identifier.clone(),
        add: patch.libraries_to_add.clone(),
        overwrite: patch.libraries_to_overwrite.clone(),
    });

    profile.applied.push(patch.identifier.clone());
    Ok(())
}

fn set_if_present<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if let Some(v) = value {
        *slot = Some(v.clone());
    }
}

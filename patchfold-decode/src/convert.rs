use crate::error::FormatError;
use camino::Utf8Path;
use patchfold_types::wire::{LibraryV1, PatchDocumentV1};
use patchfold_types::{JarMod, Library, LibraryMatcher, Patch, Provenance, Timestamp};

/// Validate a wire document and turn it into a domain patch.
///
/// The identifier is `fileId`, falling back to `id`, falling back to the file stem
/// of `source_name`.
pub fn document_to_patch(
    doc: PatchDocumentV1,
    source_name: &str,
    require_order: bool,
    provenance: Provenance,
) -> Result<Patch, FormatError> {
    let identifier = doc
        .file_id
        .clone()
        .or_else(|| doc.id.clone())
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            Utf8Path::new(source_name)
                .file_stem()
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .ok_or_else(|| FormatError::new(source_name, "patch has no identifier"))?;

    let order_index = match (doc.order, require_order) {
        (Some(order), _) => order,
        (None, true) => return Err(FormatError::new(source_name, "missing 'order' field")),
        (None, false) => 0,
    };

    let mut patch = Patch::new(identifier, provenance);
    patch.order_index = order_index;
    patch.requires_explicit_order = require_order;
    patch.version_id = doc.id;
    patch.name = doc.name;
    patch.version = doc.version;
    patch.main_class = doc.main_class;
    patch.applet_class = doc.applet_class;
    patch.process_arguments = doc.process_arguments;
    patch.launch_arguments = doc.launch_arguments;
    patch.launch_arguments_append = doc.add_launch_arguments;
    patch.release_type = doc.release_type;
    patch.assets = doc.assets;
    patch.minimum_launcher_version = doc.minimum_launcher_version;

    patch.release_time = parse_time(source_name, "releaseTime", doc.release_time)?;
    patch.update_time = parse_time(source_name, "time", doc.update_time)?;

    patch.traits = doc.traits.into_iter().chain(doc.add_traits).collect();
    patch.tweakers = doc.tweakers;
    patch.tweakers_to_add = doc.add_tweakers;
    patch.tweakers_to_remove = doc.remove_tweakers;

    patch.libraries_to_overwrite = parse_libraries(source_name, "libraries", doc.overwrite_libraries)?;
    patch.libraries_to_add = parse_libraries(source_name, "+libraries", doc.add_libraries)?;
    patch.libraries_to_remove = doc
        .remove_libraries
        .into_iter()
        .map(|r| {
            r.name.parse::<LibraryMatcher>().map_err(|e| {
                FormatError::new(source_name, format!("in '-libraries': {}", e))
            })
        })
        .collect::<Result<_, _>>()?;

    patch.jar_mods = doc
        .add_jar_mods
        .into_iter()
        .map(|j| JarMod { name: j.name })
        .collect();

    Ok(patch)
}

fn parse_time(
    source_name: &str,
    key: &str,
    raw: Option<String>,
) -> Result<Option<Timestamp>, FormatError> {
    raw.map(|s| {
        Timestamp::parse(&s).map_err(|e| {
            FormatError::new(source_name, format!("invalid '{}' timestamp '{}': {}", key, s, e))
        })
    })
    .transpose()
}

fn parse_libraries(
    source_name: &str,
    key: &str,
    libs: Vec<LibraryV1>,
) -> Result<Vec<Library>, FormatError> {
    libs.into_iter()
        .map(|lib| {
            let coordinate = lib
                .name
                .parse()
                .map_err(|e| FormatError::new(source_name, format!("in '{}': {}", key, e)))?;
            Ok(Library {
                coordinate,
                url: lib.url,
                rules: lib.rules,
                natives: lib.natives,
            })
        })
        .collect()
}

//! Checks run on an assembled target set before anything is emitted.

use crate::error::{GenError, Result};
use crate::target::TargetSet;

/// Every library an executable links must be a declared static library.
///
/// Without this check a bad reference only surfaces later as ninja's
/// "missing and no known rule to make it".
pub fn check_library_references(targets: &TargetSet) -> Result<()> {
    let missing: Vec<String> = targets
        .executables
        .values()
        .flat_map(|exe| {
            exe.libs
                .iter()
                .filter(|lib| !targets.static_libraries.contains_key(lib.as_str()))
                .map(move |lib| format!("'{}' (linked by '{}')", lib, exe.name))
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(GenError::config(format!(
            "undeclared static libraries: {}",
            missing.join(", ")
        )))
    }
}

//! Generated headers.
//!
//! Each declared buildflag header becomes a C header defining one
//! `BUILDFLAG_INTERNAL_<NAME>()` macro per flag, consumed through
//! `BUILDFLAG(NAME)` from `build/buildflag.h`. An optional build-date
//! header defines `BUILD_DATE`.

use crate::config::{BuildDateConfig, BuildflagHeaderConfig, FlagValue, overlays_for};
use crate::error::{GenError, Result};
use crate::toolchain::Platform;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A header ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildflagHeader {
    /// Relative to the generated-sources directory.
    pub path: String,
    pub flags: BTreeMap<String, String>,
}

impl BuildflagHeader {
    pub fn resolve(config: &BuildflagHeaderConfig, platform: Platform) -> Result<Self> {
        let owner = format!("buildflag header '{}'", config.header);
        let mut raw = config.flags.clone();
        for overlay in overlays_for(&config.platform, platform, &owner)? {
            raw.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let mut flags = BTreeMap::new();
        for (name, value) in raw {
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(GenError::config(format!(
                    "{}: invalid flag name '{}'",
                    owner, name
                )));
            }
            flags.insert(name, render_value(&value));
        }

        Ok(Self {
            path: config.header.clone(),
            flags,
        })
    }

    pub fn render(&self) -> String {
        let guard = include_guard(&self.path);
        let mut out = format!(
            "// Generated by bootninja. Do not edit.\n// From \"{}\"\n\n#ifndef {guard}\n#define {guard}\n\n#include \"build/buildflag.h\"\n\n",
            self.path
        );
        for (name, value) in &self.flags {
            out.push_str(&format!("#define BUILDFLAG_INTERNAL_{}() ({})\n", name, value));
        }
        out.push_str(&format!("\n#endif  // {}\n", guard));
        out
    }

    /// Write the header below `gen_dir`, creating directories as needed.
    pub fn write(&self, gen_dir: &Path) -> Result<PathBuf> {
        let path = write_header(gen_dir, &self.path, &self.render())?;
        debug!(header = %path.display(), flags = self.flags.len(), "wrote buildflag header");
        Ok(path)
    }
}

/// The `BUILD_DATE` header, with a date already checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDateHeader {
    pub path: String,
    pub date: String,
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl BuildDateHeader {
    pub fn resolve(config: &BuildDateConfig) -> Result<Self> {
        if !is_build_date(&config.date) {
            return Err(GenError::config(format!(
                "build date header '{}': date '{}' is not in 'Mmm dd yyyy hh:mm:ss' form",
                config.header, config.date
            )));
        }
        Ok(Self {
            path: config.header.clone(),
            date: config.date.clone(),
        })
    }

    pub fn render(&self) -> String {
        let guard = include_guard(&self.path);
        format!(
            "// Generated by bootninja. Do not edit.\n\n#ifndef {guard}\n#define {guard}\n\n#define BUILD_DATE \"{}\"\n\n#endif  // {guard}\n",
            self.date
        )
    }

    pub fn write(&self, gen_dir: &Path) -> Result<PathBuf> {
        let path = write_header(gen_dir, &self.path, &self.render())?;
        debug!(header = %path.display(), date = %self.date, "wrote build date header");
        Ok(path)
    }
}

/// `Jan 01 2000 00:00:00`: month name, two-digit day and clock fields.
fn is_build_date(date: &str) -> bool {
    let parts: Vec<&str> = date.split(' ').collect();
    let [month, day, year, time] = parts[..] else {
        return false;
    };
    let clock: Vec<&str> = time.split(':').collect();
    let [hh, mm, ss] = clock[..] else {
        return false;
    };

    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    let at_most = |s: &str, max: u32| s.parse::<u32>().is_ok_and(|n| n <= max);

    MONTHS.contains(&month)
        && digits(day, 2)
        && day != "00"
        && at_most(day, 31)
        && digits(year, 4)
        && [hh, mm, ss].into_iter().all(|f| digits(f, 2))
        && at_most(hh, 23)
        && at_most(mm, 59)
        && at_most(ss, 59)
}

fn include_guard(path: &str) -> String {
    let mut guard: String = path
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    guard.push('_');
    guard
}

/// Write `text` to `gen_dir/relative`, creating directories as needed.
fn write_header(gen_dir: &Path, relative: &str, text: &str) -> Result<PathBuf> {
    let path = gen_dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| GenError::io(parent, e))?;
    }
    fs::write(&path, text).map_err(|e| GenError::io(&path, e))?;
    Ok(path)
}

fn render_value(value: &FlagValue) -> String {
    match value {
        FlagValue::Bool(true) => "1".to_string(),
        FlagValue::Bool(false) => "0".to_string(),
        FlagValue::Int(n) => n.to_string(),
        FlagValue::Text(s) if s == "true" => "1".to_string(),
        FlagValue::Text(s) if s == "false" => "0".to_string(),
        FlagValue::Text(s) => s.clone(),
    }
}

/// Resolve and write every declared header for `platform`.
pub fn write_all(
    configs: &[BuildflagHeaderConfig],
    platform: Platform,
    gen_dir: &Path,
) -> Result<Vec<PathBuf>> {
    // Resolve everything first so a bad declaration writes nothing.
    let headers = configs
        .iter()
        .map(|c| BuildflagHeader::resolve(c, platform))
        .collect::<Result<Vec<_>>>()?;
    headers.iter().map(|h| h.write(gen_dir)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(flags: &[(&str, FlagValue)]) -> BuildflagHeaderConfig {
        BuildflagHeaderConfig {
            header: "base/allocator/buildflags.h".to_string(),
            flags: flags
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            platform: BTreeMap::new(),
        }
    }

    #[test]
    fn test_render() {
        let cfg = config(&[
            ("USE_ALLOCATOR_SHIM", FlagValue::Bool(true)),
            ("CFI_CAST_CHECK", FlagValue::Text("false".into())),
            ("PAGE_SIZE", FlagValue::Int(4096)),
        ]);
        let header = BuildflagHeader::resolve(&cfg, Platform::Linux).unwrap();
        let text = header.render();

        assert!(text.contains("#ifndef BASE_ALLOCATOR_BUILDFLAGS_H_\n"));
        assert!(text.contains("#define BUILDFLAG_INTERNAL_USE_ALLOCATOR_SHIM() (1)\n"));
        assert!(text.contains("#define BUILDFLAG_INTERNAL_CFI_CAST_CHECK() (0)\n"));
        assert!(text.contains("#define BUILDFLAG_INTERNAL_PAGE_SIZE() (4096)\n"));
        assert!(text.ends_with("#endif  // BASE_ALLOCATOR_BUILDFLAGS_H_\n"));
    }

    #[test]
    fn test_platform_overlay_wins() {
        let mut cfg = config(&[("USE_ALLOCATOR_SHIM", FlagValue::Bool(false))]);
        cfg.platform.insert(
            "linux".into(),
            [("USE_ALLOCATOR_SHIM".to_string(), FlagValue::Bool(true))].into(),
        );

        let linux = BuildflagHeader::resolve(&cfg, Platform::Linux).unwrap();
        let mac = BuildflagHeader::resolve(&cfg, Platform::Mac).unwrap();
        assert_eq!(linux.flags["USE_ALLOCATOR_SHIM"], "1");
        assert_eq!(mac.flags["USE_ALLOCATOR_SHIM"], "0");
    }

    #[test]
    fn test_invalid_flag_name() {
        let cfg = config(&[("NOT-VALID", FlagValue::Bool(true))]);
        assert!(matches!(
            BuildflagHeader::resolve(&cfg, Platform::Linux),
            Err(GenError::Configuration(_))
        ));
    }

    fn build_date(date: &str) -> BuildDateConfig {
        BuildDateConfig {
            header: "base/generated_build_date.h".to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_build_date_header() {
        let header = BuildDateHeader::resolve(&build_date("Mar 07 2021 05:00:00")).unwrap();
        let text = header.render();

        assert!(text.contains("#ifndef BASE_GENERATED_BUILD_DATE_H_\n"));
        assert!(text.contains("#define BUILD_DATE \"Mar 07 2021 05:00:00\"\n"));
        assert!(text.ends_with("#endif  // BASE_GENERATED_BUILD_DATE_H_\n"));
        assert_eq!(text, header.render());
    }

    #[test]
    fn test_build_date_rejects_bad_dates() {
        for date in [
            "",
            "2021-03-07 05:00:00",
            "March 07 2021 05:00:00",
            "Mar 7 2021 05:00:00",
            "Mar 00 2021 05:00:00",
            "Mar 07 2021 24:00:00",
            "Mar 07 2021 05:00",
            "Mar  07 2021 05:00:00",
        ] {
            assert!(
                matches!(
                    BuildDateHeader::resolve(&build_date(date)),
                    Err(GenError::Configuration(_))
                ),
                "accepted {date:?}"
            );
        }
    }

    #[test]
    fn test_build_date_write() {
        let dir = tempfile::tempdir().unwrap();
        let header = BuildDateHeader::resolve(&build_date("Jan 01 2000 00:00:00")).unwrap();

        let path = header.write(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("base/generated_build_date.h"));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("#define BUILD_DATE \"Jan 01 2000 00:00:00\""));
    }

    #[test]
    fn test_write_all() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&[("ENABLE_PROFILING", FlagValue::Bool(false))]);

        let written = write_all(&[cfg], Platform::Linux, dir.path()).unwrap();
        assert_eq!(written.len(), 1);
        let text = std::fs::read_to_string(&written[0]).unwrap();
        assert!(text.contains("BUILDFLAG_INTERNAL_ENABLE_PROFILING() (0)"));
    }
}

// src/stamp.rs
//! Writes the build descriptor that the loader reads back.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::errors::BuildInfoError;
use crate::info::{escape::escape, filetime::datetime_to_ticks};

#[derive(Debug, Clone)]
pub struct Stamp {
    pub id: String,
    pub built_at: DateTime<Utc>,
    pub bundle_version: String,
    pub tag: String,
    pub branch: String,
}

impl Stamp {
    pub fn new(id: impl Into<String>, bundle_version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            built_at: Utc::now(),
            bundle_version: bundle_version.into(),
            tag: String::new(),
            branch: String::new(),
        }
    }
}

/// Renders the five descriptor lines. Id and bundle version are written
/// verbatim, so they must stay on one line.
pub fn render_descriptor(stamp: &Stamp) -> Result<String, BuildInfoError> {
    for (name, value) in [("id", &stamp.id), ("bundle version", &stamp.bundle_version)] {
        if value.contains('\n') {
            return Err(BuildInfoError::StampError(format!(
                "{} must not contain a newline",
                name
            )));
        }
    }

    let ticks = datetime_to_ticks(&stamp.built_at).ok_or_else(|| {
        BuildInfoError::StampError(format!(
            "build time {} is before 1601",
            stamp.built_at
        ))
    })?;

    Ok(format!(
        "{}\n{}\n{}\n{}\n{}",
        stamp.id,
        ticks,
        stamp.bundle_version,
        escape(&stamp.tag),
        escape(&stamp.branch)
    ))
}

pub fn write_descriptor(path: &Path, stamp: &Stamp) -> Result<(), BuildInfoError> {
    let content = render_descriptor(stamp)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    log::info!("Build descriptor written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::parse_build_info;
    use chrono::TimeZone;

    fn stamp() -> Stamp {
        Stamp {
            id: "B100".into(),
            built_at: Utc.with_ymd_and_hms(2019, 4, 17, 18, 40, 0).unwrap(),
            bundle_version: "1.2.3".into(),
            tag: "rc\n1".into(),
            branch: "release\\2019".into(),
        }
    }

    #[test]
    fn renders_five_lines() {
        let text = render_descriptor(&stamp()).unwrap();
        assert_eq!(
            text,
            "B100\n132000000000000000\n1.2.3\nrc\\n1\nrelease\\\\2019"
        );
    }

    #[test]
    fn loader_reads_back_what_was_stamped() {
        let meta = parse_build_info(&render_descriptor(&stamp()).unwrap()).unwrap();
        assert_eq!(meta.id, "B100");
        assert_eq!(meta.date, "2019 Apr 17 @ 18:40:00");
        assert_eq!(meta.tag, "rc\n1");
        assert_eq!(meta.branch, "release\\2019");
    }

    #[test]
    fn multiline_id_is_rejected() {
        let mut stamp = stamp();
        stamp.id = "B\n100".into();
        assert!(matches!(
            render_descriptor(&stamp),
            Err(BuildInfoError::StampError(_))
        ));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta").join("build_info.txt");
        write_descriptor(&path, &Stamp::new("B7", "0.1.0")).unwrap();

        let meta = parse_build_info(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(meta.id, "B7");
        assert_eq!(meta.bundle_version, "0.1.0");
        assert_eq!(meta.tag, "");
    }
}

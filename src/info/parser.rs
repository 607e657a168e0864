// src/info/parser.rs
use super::escape::unescape;
use super::filetime::{format_timestamp, ticks_to_datetime};
use super::BuildMetadata;
use crate::errors::LoadFailure;

/// Id, file-time ticks and bundle version are required; tag and branch are not.
pub const MIN_FIELDS: usize = 3;

const ID_FIELD: usize = 0;
const TICKS_FIELD: usize = 1;
const BUNDLE_VERSION_FIELD: usize = 2;
const TAG_FIELD: usize = 3;
const BRANCH_FIELD: usize = 4;

/// Parses the newline separated build descriptor.
///
/// Lines past the branch are ignored. A descriptor with a tag but no branch is
/// accepted and leaves `branch` empty.
pub fn parse_build_info(content: &str) -> Result<BuildMetadata, LoadFailure> {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    if content.is_empty() {
        return Err(LoadFailure::EmptyContent);
    }

    let fields: Vec<&str> = content.split('\n').collect();
    if fields.len() < MIN_FIELDS {
        return Err(LoadFailure::InsufficientFields {
            expected: MIN_FIELDS,
            found: fields.len(),
        });
    }

    let ticks: i64 = fields[TICKS_FIELD].trim().parse()?;
    let date = format_timestamp(&ticks_to_datetime(ticks)?);

    let optional = |index: usize| fields.get(index).map(|f| unescape(f)).unwrap_or_default();

    Ok(BuildMetadata {
        id: fields[ID_FIELD].to_string(),
        date,
        bundle_version: fields[BUNDLE_VERSION_FIELD].to_string(),
        tag: optional(TAG_FIELD),
        branch: optional(BRANCH_FIELD),
    })
}

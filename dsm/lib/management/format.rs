//! Display formatting applied to runtime data before it is shown.
//!
//! Every function here is pure so the same runtime data always renders the same way.

use chrono::{DateTime, Utc};

use crate::{
    runtime::{RuntimeContainer, RuntimeImage},
    ContainerRecord, ImageRecord,
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Number of identifier characters kept in listings.
pub const ID_PREFIX_LEN: usize = 12;

/// Shown in place of a missing repository or tag.
pub const NONE_SENTINEL: &str = "<none>";

/// Bytes per megabyte, as the docker CLI counts them.
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Layout of creation timestamps in listings.
const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Truncates an identifier to [`ID_PREFIX_LEN`] characters, dropping any `algorithm:` prefix.
pub fn short_id(id: &str) -> String {
    let digest = id.split_once(':').map(|(_, hex)| hex).unwrap_or(id);
    digest.chars().take(ID_PREFIX_LEN).collect()
}

/// Renders a byte count as megabytes (1024 * 1024 bytes) with one fractional digit, e.g.
/// `133.0MB`.
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.1}MB", bytes as f64 / BYTES_PER_MB)
}

/// Renders an RFC 3339 timestamp in UTC at second precision. Anything else is kept verbatim.
pub fn format_created(created: &str) -> String {
    match DateTime::parse_from_rfc3339(created) {
        Ok(timestamp) => timestamp
            .with_timezone(&Utc)
            .format(CREATED_FORMAT)
            .to_string(),
        Err(_) => created.to_string(),
    }
}

/// Splits a `repository:tag` reference. A colon that belongs to a registry port is not a tag
/// separator.
pub fn split_repo_tag(reference: &str) -> (String, String) {
    match reference.rsplit_once(':') {
        Some((repository, tag)) if !tag.contains('/') => (repository.to_string(), tag.to_string()),
        _ => (reference.to_string(), NONE_SENTINEL.to_string()),
    }
}

/// Converts a runtime container into its display record.
pub fn container_record(container: &RuntimeContainer) -> ContainerRecord {
    ContainerRecord::builder()
        .id(short_id(&container.id))
        .name(container.name.trim_start_matches('/'))
        .status(container.state.as_str())
        .image(container.image.as_str())
        .created(format_created(&container.created))
        .build()
}

/// Converts a runtime image into its display record, using the first tag if there is one.
pub fn image_record(image: &RuntimeImage) -> ImageRecord {
    let (repository, tag) = match image.repo_tags.first() {
        Some(reference) => split_repo_tag(reference),
        None => (NONE_SENTINEL.to_string(), NONE_SENTINEL.to_string()),
    };

    ImageRecord::builder()
        .id(short_id(&image.id))
        .repository(repository)
        .tag(tag)
        .size(format_size_mb(image.size))
        .created(format_created(&image.created))
        .build()
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

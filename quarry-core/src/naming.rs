//! Job name generation
//!
//! Generated names are `<base>-<timestamp>` where the timestamp is the UTC
//! submission time down to milliseconds (`2024-05-01-12-30-05-123`). The base
//! is truncated so the full name never exceeds [`MAX_JOB_NAME_LEN`].

use chrono::{DateTime, Utc};

/// Longest job name the processing service accepts
pub const MAX_JOB_NAME_LEN: usize = 63;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S-%3f";

/// Derives a base job name from a container image reference
///
/// Registry host, repository path, tag and digest are dropped:
/// `123.dkr.ecr.local/team/sklearn-processing:0.20` becomes `sklearn-processing`.
pub fn base_name_from_image(image_uri: &str) -> String {
    let without_digest = image_uri.split('@').next().unwrap_or(image_uri);
    let repository = without_digest.rsplit('/').next().unwrap_or(without_digest);
    let name = repository.split(':').next().unwrap_or(repository);

    if name.is_empty() {
        image_uri.to_string()
    } else {
        name.to_string()
    }
}

/// Appends the current timestamp to `base`
pub fn name_from_base(base: &str) -> String {
    name_from_base_at(base, Utc::now())
}

/// Appends the timestamp of `at` to `base`
pub fn name_from_base_at(base: &str, at: DateTime<Utc>) -> String {
    let timestamp = at.format(TIMESTAMP_FORMAT).to_string();
    let budget = MAX_JOB_NAME_LEN.saturating_sub(timestamp.len() + 1);
    let trimmed: String = base.chars().take(budget).collect();
    format!("{}-{}", trimmed, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_base_name_from_image() {
        assert_eq!(
            base_name_from_image("123456789012.dkr.ecr.us-west-2.amazonaws.com/sklearn:0.20"),
            "sklearn"
        );
        assert_eq!(base_name_from_image("team/spark-processing"), "spark-processing");
        assert_eq!(base_name_from_image("busybox"), "busybox");
        assert_eq!(
            base_name_from_image("registry.local:5000/tools/prep@sha256:abcdef"),
            "prep"
        );
    }

    #[test]
    fn test_name_from_base_appends_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();
        assert_eq!(
            name_from_base_at("sklearn", at),
            "sklearn-2024-05-01-12-30-05-000"
        );
    }

    #[test]
    fn test_name_from_base_truncates_long_base() {
        let base = "x".repeat(100);
        let name = name_from_base(&base);
        assert_eq!(name.len(), MAX_JOB_NAME_LEN);
        assert!(name.starts_with("xxxx"));
    }
}

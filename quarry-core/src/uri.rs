//! Remote storage URI helpers
//!
//! Remote addresses look like `s3://<bucket>/<key>`. Anything else is treated
//! as a path on the local filesystem.

/// Scheme used by the object store backing the processing service
pub const REMOTE_SCHEME: &str = "s3";

/// Returns true when `source` already points at remote storage
pub fn is_remote_uri(source: &str) -> bool {
    match source.split_once("://") {
        Some((scheme, _)) => scheme.eq_ignore_ascii_case(REMOTE_SCHEME),
        None => false,
    }
}

/// Builds `s3://<bucket>/<segment>/<segment>...`
///
/// Empty segments are skipped and stray slashes at the joins are collapsed,
/// so `remote_uri("bucket", &["job/", "input-1"])` is `s3://bucket/job/input-1`.
pub fn remote_uri(bucket: &str, segments: &[&str]) -> String {
    let mut uri = format!("{}://{}", REMOTE_SCHEME, bucket.trim_matches('/'));
    for segment in segments {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        uri.push('/');
        uri.push_str(segment);
    }
    uri
}

/// Splits a remote URI into `(bucket, key)`
///
/// The key is returned without a leading or trailing slash and may be empty.
/// Returns `None` when the URI is not a remote storage URI or has no bucket.
pub fn split_remote_uri(uri: &str) -> Option<(&str, &str)> {
    if !is_remote_uri(uri) {
        return None;
    }
    let (_, rest) = uri.split_once("://")?;
    let (bucket, key) = match rest.split_once('/') {
        Some((bucket, key)) => (bucket, key.trim_matches('/')),
        None => (rest, ""),
    };
    if bucket.is_empty() {
        return None;
    }
    Some((bucket, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote_uri() {
        assert!(is_remote_uri("s3://bucket/key"));
        assert!(is_remote_uri("S3://bucket"));
        assert!(!is_remote_uri("/data/train.csv"));
        assert!(!is_remote_uri("data/train.csv"));
        assert!(!is_remote_uri("https://example.com/file"));
        assert!(!is_remote_uri("file:///tmp/x"));
    }

    #[test]
    fn test_remote_uri_joins_segments() {
        assert_eq!(
            remote_uri("bucket", &["my-job", "input-1"]),
            "s3://bucket/my-job/input-1"
        );
        assert_eq!(
            remote_uri("bucket/", &["/my-job/", "", "output"]),
            "s3://bucket/my-job/output"
        );
        assert_eq!(remote_uri("bucket", &[]), "s3://bucket");
    }

    #[test]
    fn test_split_remote_uri() {
        assert_eq!(
            split_remote_uri("s3://bucket/job/source/"),
            Some(("bucket", "job/source"))
        );
        assert_eq!(split_remote_uri("s3://bucket"), Some(("bucket", "")));
        assert_eq!(split_remote_uri("s3:///key"), None);
        assert_eq!(split_remote_uri("/local/path"), None);
    }
}

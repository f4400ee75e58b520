//! Object-store path splitting

/// Bucket/key pair split out of an `s3://` path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPath {
    /// Bucket name
    pub bucket: String,

    /// Key within the bucket
    pub key: String,
}

/// Path splitting failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("object path is expected to start with 's3://', but was '{0}'")]
    MissingScheme(String),

    #[error("object path '{0}' has no bucket/key component")]
    MissingKey(String),
}

impl ObjectPath {
    /// Split an s3-style path into bucket and key
    ///
    /// ```
    /// use tabledrift_store::ObjectPath;
    ///
    /// let path = ObjectPath::parse("s3://my-bucket/foo/bar.sql").unwrap();
    /// assert_eq!(path.bucket, "my-bucket");
    /// assert_eq!(path.key, "foo/bar.sql");
    /// ```
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let rest = path
            .strip_prefix("s3://")
            .ok_or_else(|| PathError::MissingScheme(path.to_string()))?;
        let (bucket, key) = rest
            .split_once('/')
            .ok_or_else(|| PathError::MissingKey(path.to_string()))?;

        if bucket.is_empty() || key.is_empty() {
            return Err(PathError::MissingKey(path.to_string()));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

impl std::fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_bucket_and_key() {
        let path = ObjectPath::parse("s3://my-bucket/foo/bar.jpg").unwrap();
        assert_eq!(path.bucket, "my-bucket");
        assert_eq!(path.key, "foo/bar.jpg");
        assert_eq!(path.to_string(), "s3://my-bucket/foo/bar.jpg");
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(matches!(
            ObjectPath::parse("gs://bucket/key"),
            Err(PathError::MissingScheme(_))
        ));
    }

    #[test]
    fn rejects_bucket_only_path() {
        assert!(matches!(
            ObjectPath::parse("s3://bucket"),
            Err(PathError::MissingKey(_))
        ));
        assert!(matches!(
            ObjectPath::parse("s3://bucket/"),
            Err(PathError::MissingKey(_))
        ));
    }
}

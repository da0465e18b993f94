//! Process-fatal failure semantics: one `401 General Failure`, everything
//! abandoned, non-zero exit (the binary maps the returned error to exit
//! status 1).

#[cfg(test)]
mod tests {
    use apt_s3_core::MethodError;

    use crate::{
        InMemoryStore, RecordingProvider, acquire_block, configuration_block, run_method,
    };

    #[tokio::test]
    async fn test_should_fail_fatally_when_uri_field_is_missing() {
        let provider = RecordingProvider::new(InMemoryStore::new());
        let input = format!(
            "{}600 URI Acquire\nFilename: /tmp/pkg.deb\n\n",
            configuration_block("us-east-1")
        );
        let run = run_method(provider.clone(), &input).await;

        assert!(matches!(run.result, Err(MethodError::MissingField("URI"))));

        let failures = run.with_status(401);
        assert_eq!(failures.len(), 1);
        let text = failures[0].field("Message").unwrap();
        assert!(text.contains("missing required field: URI"));

        assert!(run.with_status(200).is_empty());
        assert!(provider.connections().is_empty());
    }

    #[tokio::test]
    async fn test_should_fail_fatally_when_filename_field_is_missing() {
        let provider = RecordingProvider::new(
            InMemoryStore::new().with_object("bucket", "pkg.deb", b"data"),
        );
        let input = format!(
            "{}600 URI Acquire\nURI: s3://s3.amazonaws.com/bucket/pkg.deb\n\n",
            configuration_block("us-east-1")
        );
        let run = run_method(provider, &input).await;

        assert!(matches!(
            run.result,
            Err(MethodError::MissingField("Filename"))
        ));
        assert_eq!(run.with_status(401).len(), 1);
        // The object exists, but URI Start must not precede the Filename
        // check.
        assert!(run.with_status(200).is_empty());
    }

    #[tokio::test]
    async fn test_should_fail_fatally_on_unparseable_locator() {
        let provider = RecordingProvider::new(InMemoryStore::new());
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("pkg.deb");

        let input = format!(
            "{}{}",
            configuration_block("us-east-1"),
            acquire_block("s3://s3.amazonaws.com/only-bucket", &dest)
        );
        let run = run_method(provider, &input).await;

        assert!(matches!(run.result, Err(MethodError::Location(_))));
        assert_eq!(run.with_status(401).len(), 1);
    }

    #[tokio::test]
    async fn test_should_fail_fatally_on_malformed_inbound_message() {
        let provider = RecordingProvider::new(InMemoryStore::new());
        let run = run_method(provider, "this is not a protocol message\n\n").await;

        assert!(matches!(run.result, Err(MethodError::Protocol(_))));
        assert_eq!(run.with_status(401).len(), 1);
    }

    #[tokio::test]
    async fn test_should_fail_fatally_on_non_not_found_store_error() {
        let provider = RecordingProvider::new(
            InMemoryStore::new().with_broken_object("bucket", "pkg.deb"),
        );
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("pkg.deb");

        let input = format!(
            "{}{}",
            configuration_block("us-east-1"),
            acquire_block("s3://s3.amazonaws.com/bucket/pkg.deb", &dest)
        );
        let run = run_method(provider, &input).await;

        assert!(matches!(run.result, Err(MethodError::Store(_))));
        assert_eq!(run.with_status(401).len(), 1);
        // A broken store is not a missing object.
        assert!(run.with_status(400).is_empty());
    }

    #[tokio::test]
    async fn test_should_abandon_other_requests_after_fatal_error() {
        // One good request and one missing its URI field: the fatal error
        // wins and exactly one 401 is emitted, whatever happened to the
        // sibling request before the process died.
        let provider = RecordingProvider::new(
            InMemoryStore::new().with_object("bucket", "good.deb", b"data"),
        );
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("good.deb");

        let input = format!(
            "{}{}600 URI Acquire\nFilename: /tmp/bad.deb\n\n",
            configuration_block("us-east-1"),
            acquire_block("s3://s3.amazonaws.com/bucket/good.deb", &dest)
        );
        let run = run_method(provider, &input).await;

        assert!(run.result.is_err());
        assert_eq!(run.with_status(401).len(), 1);
    }
}

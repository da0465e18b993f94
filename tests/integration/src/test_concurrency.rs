//! Pipelined fetches: many in-flight requests, whole-message output
//! atomicity, completion in any order.

#[cfg(test)]
mod tests {
    use apt_s3_core::FileDigests;

    use crate::{
        InMemoryStore, RecordingProvider, acquire_block, configuration_block, run_method,
    };

    const REQUESTS: usize = 8;

    fn object_body(i: usize) -> Vec<u8> {
        format!("payload of object number {i}").into_bytes()
    }

    #[tokio::test]
    async fn test_should_complete_every_pipelined_request_exactly_once() {
        let mut store = InMemoryStore::new();
        for i in 0..REQUESTS {
            store = store.with_object("bucket", &format!("pool/pkg-{i}.deb"), &object_body(i));
        }
        let provider = RecordingProvider::new(store);
        let dir = tempfile::tempdir().unwrap();

        // All acquire messages are pipelined before any response is read.
        let mut input = configuration_block("us-east-1");
        for i in 0..REQUESTS {
            let uri = format!("s3://s3.amazonaws.com/bucket/pool/pkg-{i}.deb");
            input.push_str(&acquire_block(&uri, &dir.path().join(format!("pkg-{i}.deb"))));
        }
        let run = run_method(provider.clone(), &input).await;

        assert!(run.result.is_ok());

        // The output stream reparsed cleanly (run_method panics on
        // interleaved blocks), and every request produced exactly one
        // URI Done with the digests of its own object.
        let done = run.with_status(201);
        assert_eq!(done.len(), REQUESTS);
        for i in 0..REQUESTS {
            let uri = format!("s3://s3.amazonaws.com/bucket/pool/pkg-{i}.deb");
            let matching: Vec<_> = done
                .iter()
                .filter(|m| m.field("URI") == Some(uri.as_str()))
                .collect();
            assert_eq!(matching.len(), 1, "expected one URI Done for {uri}");

            let body = object_body(i);
            let expected = FileDigests::compute(&body);
            assert_eq!(matching[0].field("Size"), Some(body.len().to_string().as_str()));
            assert_eq!(matching[0].field("SHA256-Hash"), Some(expected.sha256.as_str()));

            let dest = dir.path().join(format!("pkg-{i}.deb"));
            assert_eq!(std::fs::read(&dest).unwrap(), body);
        }

        // One store connection per request.
        assert_eq!(provider.connections().len(), REQUESTS);
    }

    #[tokio::test]
    async fn test_should_mix_found_and_missing_objects_independently() {
        let provider = RecordingProvider::new(
            InMemoryStore::new().with_object("bucket", "present.deb", b"here"),
        );
        let dir = tempfile::tempdir().unwrap();

        let input = format!(
            "{}{}{}",
            configuration_block("us-east-1"),
            acquire_block(
                "s3://s3.amazonaws.com/bucket/present.deb",
                &dir.path().join("present.deb")
            ),
            acquire_block(
                "s3://s3.amazonaws.com/bucket/absent.deb",
                &dir.path().join("absent.deb")
            )
        );
        let run = run_method(provider, &input).await;

        assert!(run.result.is_ok());

        let done = run.single(201);
        assert_eq!(
            done.field("URI"),
            Some("s3://s3.amazonaws.com/bucket/present.deb")
        );
        let failure = run.single(400);
        assert_eq!(
            failure.field("URI"),
            Some("s3://s3.amazonaws.com/bucket/absent.deb")
        );
    }
}

//! Index Module Tests
//!
//! ## Test Scopes
//! - **Protocol**: Decoding `_search` responses from old and new backends.
//! - **Tokenizer**: Word splitting used by the in-memory `match` emulation.
//! - **InMemoryIndex**: Matching, ranking and from/size handling.
//! - **ElasticsearchBackend**: Request shape and error handling against a stub server.

#[cfg(test)]
mod tests {
    use crate::index::backend::IndexBackend;
    use crate::index::http::ElasticsearchBackend;
    use crate::index::memory::InMemoryIndex;
    use crate::index::protocol::*;
    use crate::index::tokenizer::{token_set, tokenize};
    use crate::search::query;
    use crate::search::types::{RawHit, SearchHits};
    use crate::transport::RetryingClient;

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Extension, Json, Router};
    use serde_json::{Map, Value, json};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    fn request(name: &str, from: u64, size: u32) -> SearchRequest {
        SearchRequest {
            query: query::build(name),
            from,
            size,
        }
    }

    fn partitions(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    // ============================================================
    // PROTOCOL TESTS
    // ============================================================

    #[test]
    fn test_decode_numeric_total() {
        let raw = json!({
            "took": 3,
            "hits": {
                "total": 12,
                "max_score": 1.2,
                "hits": [
                    {
                        "_index": "artists",
                        "_type": "artist",
                        "_id": "ar-1",
                        "_score": 1.2,
                        "_source": { "name": "The Beatles" }
                    }
                ]
            }
        });

        let body: SearchResponseBody = serde_json::from_value(raw).unwrap();
        let hits = SearchHits::from(body);

        assert_eq!(hits.total, 12);
        assert_eq!(
            hits.hits,
            vec![RawHit {
                partition: "artists".to_string(),
                type_tag: "artist".to_string(),
                id: "ar-1".to_string(),
                source: object(json!({ "name": "The Beatles" })),
            }]
        );
    }

    #[test]
    fn test_decode_object_total_and_missing_type() {
        let raw = json!({
            "hits": {
                "total": { "value": 40, "relation": "eq" },
                "hits": [ { "_index": "albums", "_id": "al-1" } ]
            }
        });

        let body: SearchResponseBody = serde_json::from_value(raw).unwrap();
        let hits = SearchHits::from(body);

        assert_eq!(hits.total, 40);
        assert_eq!(hits.hits[0].type_tag, DEFAULT_TYPE_TAG);
        assert!(hits.hits[0].source.is_empty());
    }

    #[test]
    fn test_decode_rejects_hit_without_id() {
        let raw = json!({
            "hits": { "total": 1, "hits": [ { "_index": "albums", "_type": "album" } ] }
        });

        assert!(serde_json::from_value::<SearchResponseBody>(raw).is_err());
    }

    #[test]
    fn test_decode_rejects_missing_hits_envelope() {
        let raw = json!({ "error": { "type": "index_not_found_exception" }, "status": 404 });

        assert!(serde_json::from_value::<SearchResponseBody>(raw).is_err());
    }

    // ============================================================
    // TOKENIZER TESTS
    // ============================================================

    #[test]
    fn test_tokenize_lowercases_and_strips_punctuation() {
        assert_eq!(tokenize("Help! (Remastered)"), vec!["help", "remastered"]);
    }

    #[test]
    fn test_tokenize_keeps_short_words_and_digits() {
        assert_eq!(tokenize("U2 - War"), vec!["u2", "war"]);
    }

    #[test]
    fn test_tokenize_unicode_letters() {
        let tokens = token_set("Björk Guðmundsdóttir");

        assert!(tokens.contains("björk"));
        assert!(tokens.contains("guðmundsdóttir"));
    }

    // ============================================================
    // IN-MEMORY INDEX TESTS
    // ============================================================

    fn sample_index() -> InMemoryIndex {
        let index = InMemoryIndex::new();
        index.insert("artists", "artist", "ar-1", object(json!({ "name": "The Beatles" })));
        index.insert("artists", "artist", "ar-2", object(json!({ "name": "The Rolling Stones" })));
        index.insert("albums", "album", "al-1", object(json!({ "name": "Meet the Beatles!" })));
        index.insert("albums", "album", "al-2", object(json!({ "name": "Abbey Road" })));
        index
    }

    #[tokio::test]
    async fn test_memory_index_matches_any_token() {
        let index = sample_index();

        let hits = index
            .search(&partitions(&["artists", "albums"]), &request("beatles", 0, 10))
            .await
            .unwrap();

        assert_eq!(hits.total, 2);
        let ids: Vec<_> = hits.hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["ar-1", "al-1"]);
    }

    #[tokio::test]
    async fn test_memory_index_ranks_by_shared_tokens() {
        let index = sample_index();

        let hits = index
            .search(&partitions(&["artists", "albums"]), &request("meet the beatles", 0, 10))
            .await
            .unwrap();

        // al-1 shares three tokens, ar-1 two, ar-2 only "the"
        let ids: Vec<_> = hits.hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["al-1", "ar-1", "ar-2"]);
    }

    #[tokio::test]
    async fn test_memory_index_respects_partitions() {
        let index = sample_index();

        let hits = index
            .search(&partitions(&["albums"]), &request("beatles", 0, 10))
            .await
            .unwrap();

        assert_eq!(hits.total, 1);
        assert_eq!(hits.hits[0].partition, "albums");
        assert_eq!(hits.hits[0].type_tag, "album");
    }

    #[tokio::test]
    async fn test_memory_index_from_and_size() {
        let index = InMemoryIndex::new();
        for i in 0..7 {
            index.insert("artists", "artist", &format!("ar-{}", i), object(json!({ "name": "Queen" })));
        }

        let hits = index
            .search(&partitions(&["artists"]), &request("queen", 5, 5))
            .await
            .unwrap();

        assert_eq!(hits.total, 7);
        assert_eq!(hits.hits.len(), 2);
        assert_eq!(hits.hits[0].id, "ar-5");
    }

    #[tokio::test]
    async fn test_memory_index_insert_replaces_same_id() {
        let index = sample_index();
        index.insert("artists", "artist", "ar-1", object(json!({ "name": "Wings" })));

        assert_eq!(index.document_count("artists"), 2);
        let hits = index
            .search(&partitions(&["artists"]), &request("beatles", 0, 10))
            .await
            .unwrap();
        assert_eq!(hits.total, 0);
    }

    // ============================================================
    // ELASTICSEARCH BACKEND TESTS
    // ============================================================

    type Captured = Arc<Mutex<Vec<(String, Value)>>>;

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn stub_search(
        Path(indices): Path<String>,
        Extension(captured): Extension<Captured>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        captured.lock().unwrap().push((indices, body));
        Json(json!({
            "hits": {
                "total": 12,
                "hits": [
                    { "_index": "artists", "_type": "artist", "_id": "ar-1", "_source": { "name": "The Beatles" } },
                    { "_index": "albums", "_type": "album", "_id": "al-1", "_source": { "name": "Beatles for Sale" } }
                ]
            }
        }))
    }

    fn client() -> RetryingClient {
        RetryingClient::new(Duration::from_millis(500), 1)
    }

    #[tokio::test]
    async fn test_elasticsearch_backend_posts_query_to_joined_partitions() {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/:indices/_search", post(stub_search))
            .layer(Extension(captured.clone()));
        let base = spawn_stub(app).await;
        let backend = ElasticsearchBackend::new(client(), &format!("{}/", base));

        let hits = backend
            .search(&partitions(&["artists", "albums"]), &request("Beatles", 0, 5))
            .await
            .unwrap();

        assert_eq!(hits.total, 12);
        assert_eq!(hits.hits.len(), 2);
        assert_eq!(hits.hits[1].partition, "albums");

        let calls = captured.lock().unwrap();
        assert_eq!(calls[0].0, "artists,albums");
        assert_eq!(
            calls[0].1,
            json!({ "query": { "match": { "name": "Beatles" } }, "from": 0, "size": 5 })
        );
    }

    #[tokio::test]
    async fn test_elasticsearch_backend_fails_on_error_status() {
        let app = Router::new().route(
            "/:indices/_search",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "shard failure") }),
        );
        let base = spawn_stub(app).await;
        let backend = ElasticsearchBackend::new(client(), &base);

        let err = backend
            .search(&partitions(&["artists"]), &request("x", 0, 5))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_elasticsearch_backend_fails_on_malformed_body() {
        let app = Router::new().route(
            "/:indices/_search",
            post(|| async { Json(json!({ "unexpected": true })) }),
        );
        let base = spawn_stub(app).await;
        let backend = ElasticsearchBackend::new(client(), &base);

        let result = backend
            .search(&partitions(&["artists"]), &request("x", 0, 5))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_elasticsearch_backend_fails_when_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let backend = ElasticsearchBackend::new(client(), &format!("http://{}", addr));

        let result = backend
            .search(&partitions(&["artists"]), &request("x", 0, 5))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_elasticsearch_backend_refuses_empty_partition_list() {
        let backend = ElasticsearchBackend::new(client(), "http://127.0.0.1:9");

        let result = backend.search(&[], &request("x", 0, 5)).await;

        assert!(result.is_err());
    }

    #[test]
    fn test_search_url_trims_trailing_slash() {
        let backend = ElasticsearchBackend::new(client(), "http://es:9200///");

        assert_eq!(
            backend.search_url(&partitions(&["artists", "albums"])),
            "http://es:9200/artists,albums/_search"
        );
    }
}

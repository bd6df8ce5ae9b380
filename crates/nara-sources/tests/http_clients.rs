//! Client tests against a local mockito server.

use mockito::{Matcher, Server, ServerGuard};
use nara_config::NaraConfig;
use nara_core::enums::Language;
use nara_sources::download::PdfCandidate;
use nara_sources::{SourceClient, SourceError};

fn client_for(server: &ServerGuard) -> SourceClient {
    let mut config = NaraConfig::default();
    config.core.api_url = server.url();
    config.core.api_key = "core-test-key".into();
    config.core.limit = 2;
    config.core.max_retries = 2;
    config.core.retry_delay_ms = 1;
    config.archive.base_url = server.url();
    config.gemini.base_url = server.url();
    config.gemini.api_key = "gemini-test-key".into();
    config.gemini.chunk_delay_ms = 0;
    SourceClient::new(&config).unwrap()
}

fn fake_pdf(len: usize) -> Vec<u8> {
    let mut body = b"%PDF-1.4\n".to_vec();
    body.resize(len, b'x');
    body
}

#[tokio::test]
async fn core_search_sends_query_and_bearer() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/works")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "marine biodiversity Sri Lanka".into()),
            Matcher::UrlEncoded("limit".into(), "2".into()),
            Matcher::UrlEncoded("sort".into(), "datePublished:desc".into()),
        ]))
        .match_header("authorization", "Bearer core-test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results":[{"id":1,"title":"Reef fish census"},{"id":2}]}"#)
        .expect(1)
        .create();

    let works = client_for(&server)
        .search_core("marine biodiversity Sri Lanka")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(works.len(), 2);
    assert_eq!(works[0].to_metadata().title, "Reef fish census");
}

#[tokio::test]
async fn core_search_retries_rate_limits_then_gives_up() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/works")
        .match_query(Matcher::Any)
        .with_status(429)
        .expect(3)
        .create();

    let err = client_for(&server)
        .search_core_with_retry("fisheries")
        .await
        .unwrap_err();

    mock.assert();
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn core_search_does_not_retry_client_errors() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search/works")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("invalid key")
        .expect(1)
        .create();

    let err = client_for(&server)
        .search_core_with_retry("fisheries")
        .await
        .unwrap_err();

    mock.assert();
    assert!(matches!(err, SourceError::Api { status: 401, .. }));
}

#[tokio::test]
async fn archive_pdf_resolves_from_metadata() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/metadata/bobp-42")
        .with_status(200)
        .with_body(
            r#"{"files":[
                {"name":"bobp-42.xml","format":"Metadata"},
                {"name":"bobp-42 scan.pdf","format":"Image Container PDF"},
                {"name":"bobp-42_text.pdf","format":"Text PDF"}
            ]}"#,
        )
        .create();

    let client = client_for(&server);
    let url = client
        .resolve_archive_pdf("https://archive.org/details/bobp-42")
        .await
        .unwrap();

    assert_eq!(url, format!("{}/download/bobp-42/bobp-42_text.pdf", server.url()));
}

#[tokio::test]
async fn archive_item_without_pdf_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/metadata/empty-item")
        .with_status(200)
        .with_body("{}")
        .create();

    let err = client_for(&server)
        .resolve_archive_pdf("https://archive.org/details/empty-item")
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::NotFound(_)));
}

#[tokio::test]
async fn tiny_download_is_rejected() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/tiny.pdf")
        .with_status(200)
        .with_body("<html>moved</html>")
        .create();

    let err = client_for(&server)
        .download_pdf(&format!("{}/tiny.pdf", server.url()))
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::InvalidPdf { size: 18 }));
}

#[tokio::test]
async fn first_working_candidate_wins() {
    let mut server = Server::new_async().await;
    server.mock("GET", "/details/x").with_status(404).create();
    server
        .mock("GET", "/download/x/X.pdf")
        .with_status(200)
        .with_body(fake_pdf(4096))
        .create();

    let client = client_for(&server);
    let candidates = vec![
        PdfCandidate {
            kind: "source_url",
            url: format!("{}/details/x", server.url()),
        },
        PdfCandidate {
            kind: "internet_archive",
            url: format!("{}/download/x/X.pdf", server.url()),
        },
    ];

    let (bytes, kind) = client.download_first(&candidates).await.unwrap();
    assert_eq!(kind, "internet_archive");
    assert_eq!(bytes.len(), 4096);

    let err = client.download_first(&candidates[..1]).await.unwrap_err();
    assert!(matches!(err, SourceError::AllSourcesFailed));
}

#[tokio::test]
async fn download_to_file_creates_parent_dirs() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/core/99.pdf")
        .with_status(200)
        .with_body(fake_pdf(2048))
        .create();
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("temp/pdfs/99.pdf");

    let written = client_for(&server)
        .download_pdf_to(&format!("{}/core/99.pdf", server.url()), &dest)
        .await
        .unwrap();

    assert_eq!(written, 2048);
    assert_eq!(std::fs::metadata(&dest).unwrap().len(), 2048);
}

#[tokio::test]
async fn gemini_translation_posts_prompt() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.5-flash:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "gemini-test-key".into()))
        .match_body(Matcher::Regex("to Sinhala \\(si\\)".into()))
        .with_status(200)
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":" පරිවර්තනය \n"}]}}]}"#)
        .expect(1)
        .create();

    let translated = client_for(&server)
        .translate_text("Coastal erosion survey.", Language::Sinhala)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(translated, "පරිවර්තනය");
}

#[tokio::test]
async fn gemini_error_status_surfaces() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/models/gemini-2.5-flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error":{"message":"API key not valid"}}"#)
        .create();

    let err = client_for(&server)
        .translate_text("Text", Language::Tamil)
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Api { status: 400, .. }));
    assert_eq!(err.to_string(), "Gemini returned HTTP 400: API key not valid");
}

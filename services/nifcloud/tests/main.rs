use std::collections::HashMap;

use anyhow::Result;
use http::Request;
use nifsign_core::time::parse_iso8601;
use nifsign_core::{Context, Signer, StaticEnv};
use nifsign_nifcloud::{DefaultCredentialProvider, RequestSigner, StaticCredentialProvider};
use pretty_assertions::assert_eq;

fn test_context() -> Context {
    let _ = env_logger::builder().is_test(true).try_init();

    Context::new().with_env(StaticEnv {
        envs: HashMap::from_iter([
            (
                "NIFCLOUD_ACCESS_KEY_ID".to_string(),
                "test_access_key".to_string(),
            ),
            (
                "NIFCLOUD_SECRET_ACCESS_KEY".to_string(),
                "test_secret_key".to_string(),
            ),
        ]),
    })
}

fn test_parts() -> http::request::Parts {
    Request::builder()
        .method(http::Method::GET)
        .uri("https://jp-east-1.computing.api.nifcloud.com/api/?Action=DescribeInstances&Version=1")
        .body(())
        .expect("request must be valid")
        .into_parts()
        .0
}

fn query_map(parts: &http::request::Parts) -> HashMap<String, String> {
    form_urlencoded::parse(parts.uri.query().unwrap_or("").as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[tokio::test]
async fn test_sign_with_env_credentials() -> Result<()> {
    let signer = Signer::new(
        test_context(),
        DefaultCredentialProvider::new(),
        RequestSigner::new(),
    );

    let mut parts = test_parts();
    signer.sign(&mut parts, None).await?;

    let query = query_map(&parts);
    assert_eq!(query.get("AccessKeyId").map(String::as_str), Some("test_access_key"));
    assert_eq!(query.get("SignatureVersion").map(String::as_str), Some("2"));
    assert_eq!(
        query.get("SignatureMethod").map(String::as_str),
        Some("HmacSHA256")
    );
    assert_eq!(query.get("Action").map(String::as_str), Some("DescribeInstances"));
    assert!(!query.get("Signature").expect("signature must exist").is_empty());
    parse_iso8601(query.get("Timestamp").expect("timestamp must exist"))
        .expect("timestamp must be well formed");

    Ok(())
}

#[tokio::test]
async fn test_sign_without_credentials_fails() {
    let ctx = Context::new().with_env(StaticEnv::default());
    let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());

    let mut parts = test_parts();
    let err = signer.sign(&mut parts, None).await.unwrap_err();

    assert!(err.is_credential_error());
}

#[tokio::test]
async fn test_sign_with_static_provider_override() -> Result<()> {
    let signer = Signer::new(
        test_context(),
        DefaultCredentialProvider::new(),
        RequestSigner::new(),
    )
    .with_credential_provider(StaticCredentialProvider::new(
        "static_access_key",
        "static_secret_key",
    ));

    let mut parts = test_parts();
    signer.sign(&mut parts, None).await?;

    let query = query_map(&parts);
    assert_eq!(
        query.get("AccessKeyId").map(String::as_str),
        Some("static_access_key")
    );

    Ok(())
}

#[tokio::test]
async fn test_signed_url_keeps_host_and_path() -> Result<()> {
    let signer = Signer::new(
        test_context(),
        DefaultCredentialProvider::new(),
        RequestSigner::new(),
    );

    let mut parts = test_parts();
    signer.sign(&mut parts, None).await?;

    let url = parts.uri.to_string();
    assert!(url.starts_with("https://jp-east-1.computing.api.nifcloud.com/api/?"));

    Ok(())
}

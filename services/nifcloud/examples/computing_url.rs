//! Build a signed request URL for the NIFCLOUD computing API.
//!
//! Reads a JSON object of request parameters from `request.json`, signs it
//! with credentials from `NIFCLOUD_ACCESS_KEY_ID` / `NIFCLOUD_SECRET_ACCESS_KEY`
//! and prints the finished URL.
//!
//! ```shell
//! cargo run --example computing_url -- jp-east-1
//! ```

use std::collections::HashMap;

use anyhow::{Context as _, Result};
use nifsign_core::{Context, OsEnv, Signer};
use nifsign_nifcloud::{DefaultCredentialProvider, RequestSigner};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let region = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "jp-east-1".to_string());

    let raw = tokio::fs::read_to_string("request.json")
        .await
        .context("read request.json")?;
    let params: HashMap<String, String> =
        serde_json::from_str(&raw).context("request.json must be a flat string map")?;

    let mut url = format!("https://{region}.computing.api.nifcloud.com/api/");
    if !params.is_empty() {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter())
            .finish();
        url.push('?');
        url.push_str(&query);
    }

    let mut parts = http::Request::builder()
        .method(http::Method::GET)
        .uri(url)
        .body(())
        .expect("request must be valid")
        .into_parts()
        .0;

    let ctx = Context::new().with_env(OsEnv);
    let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
    signer.sign(&mut parts, None).await?;

    println!("{}", parts.uri);
    Ok(())
}

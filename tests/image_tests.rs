mod common;

use common::fixtures::{self, ORG, PIXEL_PNG, REPORT};
use common::pdf_assertions::GeneratedPdf;
use common::{TestEnv, TestResult};
use folio::GenerationRequest;
use serde_json::json;

fn image_report(source: &str) -> serde_json::Value {
    json!({
        "content": [
            "Before",
            { "image": source, "width": 50 },
            "After"
        ]
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_image_is_fetched_and_embedded() -> TestResult {
    let addr = common::http::serve_image(PIXEL_PNG, "image/png").await;
    let env = TestEnv::new().with_config(|c| c.document.page_decorations = false);
    env.write_report(ORG, REPORT, &image_report(&format!("http://{}/ok", addr)));

    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, json!({}))?)
        .await?;
    let pdf = GeneratedPdf::from_bytes(artifact.bytes)?;
    assert_eq!(pdf.image_count(), 1);
    assert!(pdf.contains_text("After"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn image_url_can_come_from_the_payload() -> TestResult {
    let addr = common::http::serve_image(PIXEL_PNG, "image/png; charset=binary").await;
    let env = TestEnv::new().with_config(|c| c.document.page_decorations = false);
    env.write_report(ORG, REPORT, &image_report("{{photo}}"));

    let payload = json!({ "photo": format!("http://{}/ok", addr) });
    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, payload)?)
        .await?;
    assert_eq!(GeneratedPdf::from_bytes(artifact.bytes)?.image_count(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_fetch_leaves_the_document_intact() -> TestResult {
    let addr = common::http::serve_image(PIXEL_PNG, "image/png").await;
    let env = TestEnv::new().with_config(|c| c.document.page_decorations = false);
    env.write_report(ORG, REPORT, &image_report(&format!("http://{}/missing.png", addr)));

    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, json!({}))?)
        .await?;
    let pdf = GeneratedPdf::from_bytes(artifact.bytes)?;
    assert_eq!(pdf.image_count(), 0);
    assert!(pdf.contains_text("Before"));
    assert!(pdf.contains_text("After"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unreadable_asset_is_skipped() -> TestResult {
    let env = TestEnv::new().with_config(|c| c.document.page_decorations = false);
    env.write_asset("broken.png", b"not an image");
    env.write_report(ORG, REPORT, &image_report("broken.png"));

    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, json!({}))?)
        .await?;
    let pdf = GeneratedPdf::from_bytes(artifact.bytes)?;
    assert_eq!(pdf.image_count(), 0);
    assert!(pdf.contains_text("After"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn local_asset_is_embedded() -> TestResult {
    let env = TestEnv::new().with_config(|c| c.document.page_decorations = false);
    env.write_asset("pixel.png", PIXEL_PNG);
    env.write_report(ORG, REPORT, &image_report("pixel.png"));

    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, json!({}))?)
        .await?;
    assert_eq!(GeneratedPdf::from_bytes(artifact.bytes)?.image_count(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn default_logo_heads_the_shared_header() -> TestResult {
    let env = TestEnv::new().with_config(|c| c.assets.default_logo = Some("logo.png".to_string()));
    env.write_asset("logo.png", PIXEL_PNG);
    env.write_report(ORG, REPORT, &fixtures::greeting_template());

    let payload = json!({ "companyInfo": { "name": "Acme Ltd" }, "customer": { "name": "Acme" } });
    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, payload)?)
        .await?;
    let pdf = GeneratedPdf::from_bytes(artifact.bytes)?;
    assert_eq!(pdf.image_count(), 1);
    assert!(!pdf.contains_text("Acme Ltd"));
    assert!(pdf.contains_text("Page 1"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn builtin_logo_reference_uses_the_default_logo() -> TestResult {
    let env = TestEnv::new().with_config(|c| c.assets.default_logo = Some("logo.png".to_string()));
    env.write_asset("logo.png", PIXEL_PNG);

    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_template(
            "purchaseOrder",
            fixtures::purchase_order_payload(),
        )?)
        .await?;
    let pdf = GeneratedPdf::from_bytes(artifact.bytes)?;
    assert!(pdf.image_count() >= 1);
    assert!(pdf.contains_text("PURCHASE ORDER"));
    Ok(())
}

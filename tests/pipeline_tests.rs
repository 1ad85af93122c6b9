mod common;

use common::fixtures::{self, ORG, REPORT};
use common::pdf_assertions::GeneratedPdf;
use common::{TestEnv, TestResult};
use folio::{ErrorKind, GenerationError, GenerationRequest};
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn stored_report_is_filled_rendered_and_stored() -> TestResult {
    let env = TestEnv::new();
    env.write_report(ORG, REPORT, &fixtures::greeting_template());

    let payload = json!({ "customer": { "name": "Acme" }, "account": { "number": "42" } });
    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, payload)?)
        .await?;

    assert!(artifact.bytes.starts_with(b"%PDF-"));
    assert_eq!(
        artifact.path,
        env.storage_dir()
            .join(ORG)
            .join(REPORT)
            .join(format!("{}.pdf", artifact.id))
    );
    assert_eq!(std::fs::read(&artifact.path)?, artifact.bytes);

    let pdf = GeneratedPdf::from_bytes(artifact.bytes.clone())?;
    assert_eq!(pdf.page_count(), 1);
    assert!(pdf.contains_text("Hello Acme"));
    assert!(pdf.contains_text("Account 42"));
    assert!(!pdf.contains_text("{{"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_fields_render_as_empty_text() -> TestResult {
    let env = TestEnv::new();
    env.write_report(ORG, REPORT, &fixtures::greeting_template());

    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, json!({}))?)
        .await?;
    let pdf = GeneratedPdf::from_bytes(artifact.bytes)?;
    assert!(pdf.all_texts().iter().any(|t| t.trim_end() == "Hello"));
    assert!(!pdf.contains_text("customer.name"));
    Ok(())
}

#[tokio::test]
async fn missing_template_is_not_found_and_stores_nothing() -> TestResult {
    let env = TestEnv::new();
    let err = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, json!({}))?)
        .await
        .unwrap_err();

    assert!(err.is_template_not_found());
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.caller_message(), "report not found");
    assert!(env.stored_files().is_empty());
    Ok(())
}

#[test]
fn malformed_ids_are_rejected_before_loading() {
    let err = GenerationRequest::for_report("acme", REPORT, json!({})).unwrap_err();
    assert!(matches!(err, GenerationError::InvalidSelector(_)));
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert_eq!(err.caller_message(), "invalid input");

    let err = GenerationRequest::for_template("../invoice", json!({})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

#[tokio::test]
async fn non_object_payload_is_a_bad_request() -> TestResult {
    let env = TestEnv::new();
    env.write_report(ORG, REPORT, &fixtures::greeting_template());

    for payload in [json!(null), json!([1, 2]), json!("text")] {
        let err = env
            .pipeline()
            .generate(GenerationRequest::for_report(ORG, REPORT, payload)?)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidPayload(_)));
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }
    assert!(env.stored_files().is_empty());
    Ok(())
}

#[tokio::test]
async fn structurally_invalid_definition_is_internal() -> TestResult {
    let env = TestEnv::new();
    env.write_report(ORG, REPORT, &json!({ "content": "not a list" }));

    let err = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, json!({}))?)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(err.caller_message(), "Failed to generate PDF");
    assert!(env.stored_files().is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_items_give_a_header_only_table() -> TestResult {
    let env = TestEnv::new();
    let pipeline = env.pipeline();

    let with_items = pipeline
        .generate(GenerationRequest::for_template("invoice", fixtures::invoice_payload(2))?)
        .await?;
    let with_items = GeneratedPdf::from_bytes(with_items.bytes)?;
    assert!(with_items.contains_text("Widget 2"));

    let mut payload = fixtures::invoice_payload(2);
    payload["items"] = json!([]);
    let empty = pipeline
        .generate(GenerationRequest::for_template("invoice", payload)?)
        .await?;
    let empty = GeneratedPdf::from_bytes(empty.bytes)?;
    for header in ["Description", "Quantity", "Unit Price", "Amount"] {
        assert!(empty.contains_text(header), "missing {:?}", header);
    }
    assert!(!empty.contains_text("Widget"));
    assert!(!empty.contains_text("$2.50"));
    assert!(empty.contains_text("Globex"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn template_values_win_over_defaults() -> TestResult {
    let env = TestEnv::new();
    env.write_report(
        ORG,
        REPORT,
        &json!({
            "pageSize": "LETTER",
            "info": { "title": "Quarterly Summary" },
            "content": ["Summary"]
        }),
    );

    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, json!({}))?)
        .await?;
    let pdf = GeneratedPdf::from_bytes(artifact.bytes)?;
    let (width, height) = pdf.page_size(1).expect("media box");
    assert!((width - 612.0).abs() < 0.5);
    assert!((height - 792.0).abs() < 0.5);
    assert_eq!(pdf.info("Title").as_deref(), Some("Quarterly Summary"));
    assert_eq!(pdf.info("Author").as_deref(), Some("Folio"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn defaults_fill_page_size_and_info() -> TestResult {
    let env = TestEnv::new().with_config(|c| c.document.author = "Acme Reports".to_string());
    env.write_named("summary", &json!({ "content": ["Summary"] }));

    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_template("summary", json!({}))?)
        .await?;
    assert!(artifact.path.starts_with(env.storage_dir().join("templates").join("summary")));

    let pdf = GeneratedPdf::from_bytes(artifact.bytes)?;
    let (width, height) = pdf.page_size(1).expect("media box");
    assert!((width - 595.28).abs() < 0.5);
    assert!((height - 841.89).abs() < 0.5);
    assert_eq!(pdf.info("Title").as_deref(), Some("summary"));
    assert_eq!(pdf.info("Author").as_deref(), Some("Acme Reports"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn undecorated_templates_get_the_shared_header_and_footer() -> TestResult {
    let env = TestEnv::new();
    env.write_report(ORG, REPORT, &fixtures::greeting_template());

    let payload = json!({ "companyInfo": { "name": "Acme Ltd" }, "customer": { "name": "Acme" } });
    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, payload)?)
        .await?;
    let texts = GeneratedPdf::from_bytes(artifact.bytes)?.page_texts(1);

    assert!(texts.iter().any(|t| t == "Acme Ltd"));
    assert!(texts.iter().any(|t| t == "Page 1"));
    assert!(texts.iter().any(|t| t == "Page 1 of 1"));
    assert!(texts.iter().any(|t| t.starts_with("Authorized Signature")));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn shared_decorations_can_be_switched_off() -> TestResult {
    let env = TestEnv::new().with_config(|c| c.document.page_decorations = false);
    env.write_report(ORG, REPORT, &fixtures::greeting_template());

    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(
            ORG,
            REPORT,
            json!({ "customer": { "name": "Acme" } }),
        )?)
        .await?;
    let pdf = GeneratedPdf::from_bytes(artifact.bytes)?;
    assert!(pdf.contains_text("Hello Acme"));
    assert!(!pdf.contains_text("Page 1"));
    assert!(!pdf.contains_text("Authorized Signature"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn own_footer_is_kept() -> TestResult {
    let env = TestEnv::new();
    env.write_report(
        ORG,
        REPORT,
        &json!({
            "footer": { "text": "Confidential", "margin": [40, 20] },
            "content": ["Body"]
        }),
    );

    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, json!({}))?)
        .await?;
    let pdf = GeneratedPdf::from_bytes(artifact.bytes)?;
    assert!(pdf.contains_text("Confidential"));
    assert!(!pdf.contains_text("Authorized Signature"));
    assert!(pdf.contains_text("Page 1"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn stored_template_can_name_a_style_pack() -> TestResult {
    let env = TestEnv::new();
    env.write_named(
        "styled",
        &json!({
            "stylePack": "invoice",
            "styles": { "note": { "italics": true } },
            "content": [
                { "text": "Styled {{invoiceNumber}}", "style": "invoiceHeader" },
                { "text": "Noted", "style": "note" }
            ]
        }),
    );

    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_template(
            "styled",
            json!({ "invoiceNumber": "INV-9" }),
        )?)
        .await?;
    let pdf = GeneratedPdf::from_bytes(artifact.bytes)?;
    assert!(pdf.contains_text("Styled INV-9"));
    assert!(pdf.contains_text("Noted"));
    assert_eq!(pdf.info("Title").as_deref(), Some("invoice"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn summary_reports_id_and_path() -> TestResult {
    let env = TestEnv::new();
    env.write_report(ORG, REPORT, &fixtures::greeting_template());

    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_report(ORG, REPORT, json!({}))?)
        .await?;
    let summary = serde_json::to_value(artifact.summary(true))?;
    assert_eq!(summary["status"], "success");
    assert_eq!(summary["pdfId"], artifact.id.to_string());
    assert_eq!(summary["pdfPath"], artifact.path.display().to_string());
    assert_eq!(summary["base64"], artifact.base64);

    let summary = serde_json::to_value(artifact.summary(false))?;
    assert!(summary.get("base64").is_none());
    Ok(())
}

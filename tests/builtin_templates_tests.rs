mod common;

use common::fixtures;
use common::pdf_assertions::GeneratedPdf;
use common::{TestEnv, TestResult};
use folio::GenerationRequest;
use serde_json::{Value, json};

async fn render(env: &TestEnv, template: &str, payload: Value) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let artifact = env
        .pipeline()
        .generate(GenerationRequest::for_template(template, payload)?)
        .await?;
    GeneratedPdf::from_bytes(artifact.bytes)
}

#[tokio::test(flavor = "multi_thread")]
async fn invoice_renders_items_and_totals() -> TestResult {
    let env = TestEnv::new();
    let pdf = render(&env, "invoice", fixtures::invoice_payload(3)).await?;

    assert_eq!(pdf.page_count(), 1);
    for text in ["INVOICE", "Acme Ltd", "Invoice #: INV-1001", "Widget 3", "$7.50", "$27.50", "Globex"] {
        assert!(pdf.contains_text(text), "missing {:?} in {:?}", text, pdf.all_texts());
    }
    assert!(pdf.contains_text("Page 1 of 1"));
    assert_eq!(pdf.info("Title").as_deref(), Some("invoice"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn long_invoice_repeats_the_table_header() -> TestResult {
    let env = TestEnv::new();
    let pdf = render(&env, "invoice", fixtures::invoice_payload(120)).await?;

    let pages = pdf.page_count();
    assert!(pages >= 2, "expected several pages, got {}", pages);
    for page in 1..=pages as u32 {
        let texts = pdf.page_texts(page);
        assert!(
            texts.iter().any(|t| t == "Description"),
            "page {} lacks the header row",
            page
        );
        let numbering = format!("Page {} of {}", page, pages);
        assert!(texts.contains(&numbering), "page {} lacks {:?}", page, numbering);
    }
    assert!(pdf.contains_text("Widget 120"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn invoice_without_items_keeps_its_header_row() -> TestResult {
    let env = TestEnv::new();
    let pdf = render(&env, "invoice", json!({ "invoiceNumber": "INV-0" })).await?;
    assert!(pdf.contains_text("Description"));
    assert!(pdf.contains_text("Your Company Name"));
    assert!(!pdf.contains_text("Widget"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn purchase_order_renders() -> TestResult {
    let env = TestEnv::new();
    let pdf = render(&env, "purchaseOrder", fixtures::purchase_order_payload()).await?;
    for text in ["PURCHASE ORDER", "Towels", "Sheets", "Linen Co"] {
        assert!(pdf.contains_text(text), "missing {:?} in {:?}", text, pdf.all_texts());
    }
    assert!(!pdf.contains_text("Authorized Signature"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn quotation_renders() -> TestResult {
    let env = TestEnv::new();
    let pdf = render(&env, "quotation", fixtures::quotation_payload()).await?;
    for text in ["QUOTATION", "Chair", "Desk", "Globex", "Valid for 30 days"] {
        assert!(pdf.contains_text(text), "missing {:?} in {:?}", text, pdf.all_texts());
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn quotation_title_can_be_overridden() -> TestResult {
    let env = TestEnv::new();
    let mut payload = fixtures::quotation_payload();
    payload["documentTitle"] = json!("PROFORMA");
    let pdf = render(&env, "quotation", payload).await?;
    assert!(pdf.contains_text("PROFORMA"));
    assert!(!pdf.contains_text("QUOTATION"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn statement_of_account_renders() -> TestResult {
    let env = TestEnv::new();
    let pdf = render(&env, "statementOfAccount", fixtures::statement_payload()).await?;
    for text in ["Globex", "INV-1"] {
        assert!(pdf.contains_text(text), "missing {:?} in {:?}", text, pdf.all_texts());
    }
    assert!(!pdf.contains_text("Authorized Signature"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn stored_template_shadows_a_builtin() -> TestResult {
    let env = TestEnv::new();
    env.write_named("invoice", &json!({ "content": ["Custom invoice {{invoiceNumber}}"] }));
    let pdf = render(&env, "invoice", json!({ "invoiceNumber": "INV-5" })).await?;
    assert!(pdf.contains_text("Custom invoice INV-5"));
    assert!(!pdf.contains_text("Bill To:"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn braces_in_payload_text_are_printed_verbatim() -> TestResult {
    let env = TestEnv::new();
    let mut payload = fixtures::invoice_payload(1);
    payload["notes"] = json!("Quote code {{PROMO}} at checkout");
    payload["internal"] = json!({ "secret": "S3CRET" });
    payload["items"][0]["description"] = json!("Widget {{internal.secret}}");

    let pdf = render(&env, "invoice", payload).await?;
    assert!(pdf.contains_text("Quote code {{PROMO}} at checkout"), "{:?}", pdf.all_texts());
    assert!(pdf.contains_text("Widget {{internal.secret}}"));
    assert!(!pdf.contains_text("S3CRET"));
    Ok(())
}

mod common;

use common::fixtures::{self, ORG, REPORT};
use common::pdf_assertions::GeneratedPdf;
use common::{TestEnv, TestResult};
use folio::{GenerationRequest, StorageLocation};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_get_distinct_artifacts() -> TestResult {
    const REQUESTS: usize = 12;
    let env = TestEnv::new();
    env.write_report(ORG, REPORT, &fixtures::greeting_template());
    let pipeline = Arc::new(env.pipeline());

    let handles: Vec<_> = (0..REQUESTS)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move {
                let payload = json!({ "customer": { "name": format!("Customer {}", i) } });
                let request = GenerationRequest::for_report(ORG, REPORT, payload)?;
                let artifact = pipeline.generate(request).await?;
                Ok::<_, folio::GenerationError>((i, artifact))
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let (i, artifact) = handle.await??;
        assert!(ids.insert(artifact.id));
        let pdf = GeneratedPdf::from_bytes(std::fs::read(&artifact.path)?)?;
        assert!(pdf.contains_text(&format!("Hello Customer {}", i)));
    }

    assert_eq!(ids.len(), REQUESTS);
    assert_eq!(env.stored_files().len(), REQUESTS);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failures_do_not_disturb_other_requests() -> TestResult {
    let env = TestEnv::new();
    env.write_report(ORG, REPORT, &fixtures::greeting_template());
    let pipeline = Arc::new(env.pipeline());
    let missing_report = "9b2e1f0c-3c57-4f51-a5a4-3f1e2d8c7b6a";

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            let report = if i % 2 == 0 { REPORT } else { missing_report };
            tokio::spawn(async move {
                let request = GenerationRequest::for_report(ORG, report, json!({}))?;
                pipeline.generate(request).await
            })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => succeeded += 1,
            Err(e) => assert!(e.is_template_not_found()),
        }
    }
    assert_eq!(succeeded, 4);
    assert_eq!(env.stored_files().len(), 4);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_selectors_store_under_their_own_directories() -> TestResult {
    const ROUNDS: usize = 4;
    let second_report = "3f2504e0-4f89-41d3-9a0c-0305e82c3301";
    let env = TestEnv::new();
    env.write_report(ORG, REPORT, &json!({ "content": ["First report for {{customer.name}}"] }));
    env.write_report(ORG, second_report, &json!({ "content": ["Second report for {{customer.name}}"] }));
    env.write_named("letter", &json!({ "content": ["Letter for {{customer.name}}"] }));
    let pipeline = Arc::new(env.pipeline());

    let mut requests = Vec::new();
    for round in 0..ROUNDS {
        let customer = |kind: &str| json!({ "customer": { "name": format!("{} {}", kind, round) } });
        requests.push(("First report", GenerationRequest::for_report(ORG, REPORT, customer("north"))?));
        requests.push(("Second report", GenerationRequest::for_report(ORG, second_report, customer("south"))?));
        requests.push(("Letter", GenerationRequest::for_template("letter", customer("west"))?));
    }

    let handles: Vec<_> = requests
        .into_iter()
        .map(|(heading, request)| {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move {
                let expected_dir = StorageLocation::from(&request.selector).relative_dir();
                let customer = request.payload["customer"]["name"].as_str().unwrap_or_default().to_string();
                let artifact = pipeline.generate(request).await?;
                Ok::<_, folio::GenerationError>((heading, customer, expected_dir, artifact))
            })
        })
        .collect();

    let headings = ["First report", "Second report", "Letter"];
    for handle in handles {
        let (heading, customer, expected_dir, artifact) = handle.await??;
        assert_eq!(
            artifact.path.parent(),
            Some(env.storage_dir().join(&expected_dir).as_path()),
            "{} stored in the wrong place",
            heading
        );

        let pdf = GeneratedPdf::from_bytes(std::fs::read(&artifact.path)?)?;
        let own = format!("{} for {}", heading, customer);
        assert!(pdf.contains_text(&own), "missing {:?} in {:?}", own, pdf.all_texts());
        for other in headings.iter().filter(|h| **h != heading) {
            assert!(!pdf.contains_text(&format!("{} for", other)), "{} leaked into {}", other, heading);
        }
        let kind = customer.split(' ').next().unwrap_or_default();
        for round in 0..ROUNDS {
            let other = format!("{} {}", kind, round);
            if other != customer {
                assert!(!pdf.contains_text(&format!("for {}", other)), "{} leaked into {}", other, own);
            }
        }
    }

    assert_eq!(env.stored_files().len(), ROUNDS * headings.len());
    Ok(())
}

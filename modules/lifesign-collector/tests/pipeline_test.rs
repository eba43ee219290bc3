// End-to-end run of the web collection pipeline against mock collaborators:
// load → collect/classify/insert → trim → save → reload, checking the
// dataset invariants on the persisted file.

use std::time::Duration;

use lifesign_collector::classifier::Classifier;
use lifesign_collector::dataset::DatasetStore;
use lifesign_collector::fetch::WebCollector;
use lifesign_collector::testing::{sample_record, MockSearch, ScriptedGenerator, SearchHit};
use lifesign_common::{Record, Severity};

fn hit(url: &str, excerpt: &str) -> SearchHit {
    SearchHit {
        title: format!("Post at {url}"),
        url: url.to_string(),
        excerpt: excerpt.to_string(),
    }
}

#[tokio::test]
async fn full_run_enforces_dataset_invariants() {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("data.json");
    let backup = dir.path().join("data.backup.json");

    // Seed a store near the cap, with one URL the collector will see again.
    let mut store = DatasetStore::new(&primary, &backup, 100);
    store.insert(sample_record("https://example.com/already-seen"));
    for i in 0..98 {
        store.insert(sample_record(&format!("https://example.com/old/{i}")));
    }
    store.save().unwrap();

    let search = MockSearch::new()
        .on_query(
            "site:reddit.com self-harm personal story",
            vec![
                hit("https://example.com/fresh/1", "a long first-person account"),
                hit("https://example.com/already-seen", "duplicate content"),
                hit("https://example.com/fresh/2", &"x".repeat(800)),
            ],
        )
        .on_query(
            "site:twitter.com self-harm help",
            vec![
                hit("https://example.com/fresh/3", "asking where to get help"),
                hit("https://example.com/no-text", ""),
            ],
        );

    // Real classifier over a scripted model: two parsable replies, one
    // refusal that must degrade instead of dropping the record.
    let generator = ScriptedGenerator::new()
        .reply(r#"{"severity": "high", "reason": "explicit ideation", "category": "self-harm"}"#)
        .reply("```json\n{\"severity\": \"medium\", \"reason\": \"distress\", \"category\": \"self-harm\"}\n```")
        .reply("I'm sorry, I can't help with that.");

    let mut store = DatasetStore::new(&primary, &backup, 100);
    store.load();
    assert_eq!(store.len(), 99);

    let collector = WebCollector::new(search, Classifier::new(generator), 20, 5, Duration::ZERO);
    let stats = collector.run(&mut store).await;

    assert_eq!(stats.records_added, 3);
    assert_eq!(stats.duplicates_skipped, 1);
    assert_eq!(stats.empty_excerpts_skipped, 1);
    assert_eq!(stats.degraded_classifications, 1);

    store.trim();
    store.save().unwrap();

    // Reload from disk and check every invariant on the persisted sequence.
    let raw = std::fs::read_to_string(&primary).unwrap();
    let persisted: Vec<Record> = serde_json::from_str(&raw).unwrap();

    assert_eq!(persisted.len(), 100);

    let urls: Vec<&str> = persisted
        .iter()
        .map(|r| r.url.as_str())
        .filter(|u| !u.is_empty())
        .collect();
    let unique: std::collections::HashSet<&str> = urls.iter().copied().collect();
    assert_eq!(urls.len(), unique.len());

    assert!(persisted.iter().all(|r| r.content.chars().count() <= 303));

    // Newest first: the three fresh records lead the file.
    assert_eq!(persisted[0].url, "https://example.com/fresh/3");
    assert_eq!(persisted[1].url, "https://example.com/fresh/2");
    assert_eq!(persisted[2].url, "https://example.com/fresh/1");

    // The long excerpt was capped with an ellipsis; the refusal degraded.
    assert!(persisted[1].content.ends_with("..."));
    assert_eq!(persisted[2].severity, Severity::High);
    assert_eq!(persisted[0].severity, Severity::Unknown);
    assert!(!persisted[0].reason.is_empty());

    // Oldest records beyond the cap fell off the back.
    assert!(!persisted.iter().any(|r| r.url == "https://example.com/old/0"));

    // Backup is a byte-for-byte duplicate.
    assert_eq!(raw, std::fs::read_to_string(&backup).unwrap());
}

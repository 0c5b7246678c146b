mod common;

use egx_insights::application::insights::InsightsUseCase;
use egx_insights::domain::ports::stock_provider::{ProviderError, StockProvider};
use egx_insights::infrastructure::providers::FileProvider;
use std::io::Write;

fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(body.as_bytes()).unwrap();
    path
}

#[tokio::test]
async fn test_csv_export_feeds_insights() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "egx.csv",
        "Symbol,Name,Change %,Volume,Sector\n\
         AAA,Alpha,1.5,100,Banks\n\
         BBB,Beta,-0.5,300,Banks\n\
         CCC,Gamma,,200,\n",
    );

    let table = FileProvider::new(&path).fetch().await.unwrap();
    assert_eq!(table.len(), 3);

    let snapshot = InsightsUseCase::default().compute(&table);
    let leaders: Vec<&str> = snapshot.volume_leaders.iter().filter_map(|s| s.symbol()).collect();
    assert_eq!(leaders, vec!["BBB", "CCC", "AAA"]);
    assert_eq!(snapshot.top_sectors_change.len(), 1);
    assert_eq!(snapshot.top_sectors_change[0].change, 0.5);
}

#[tokio::test]
async fn test_json_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "egx.JSON",
        r#"[{"Symbol": "AAA", "Price": 10.5}, {"Symbol": "BBB", "Price": null, "Sector": "Banks"}]"#,
    );

    let table = FileProvider::new(&path).fetch().await.unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.has_column("Sector"));
    assert_eq!(table.numeric("Price").unwrap(), vec![Some(10.5), None]);
}

#[tokio::test]
async fn test_unsupported_or_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "egx.txt", "Symbol\nAAA\n");
    assert!(matches!(FileProvider::new(&path).fetch().await, Err(ProviderError::Unsupported(_))));

    let missing = dir.path().join("nope.csv");
    let err = FileProvider::new(&missing).fetch().await.unwrap_err();
    assert!(matches!(err, ProviderError::Source { ref path, .. } if path.ends_with("nope.csv")));
    assert!(err.to_string().starts_with("cannot read "));
}

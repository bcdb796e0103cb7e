//! Integration tests for mounting charts from a host page

use std::{cell::RefCell, fs};

use dendra::{
    ChartBuilder, DendraError, FetchResponse, FileSystemFetcher, HostError, SourceFetcher, host,
};

const HIERARCHY: &str = r#"{
    "id": "root", "name": "root",
    "children": [
        {"id": "A", "name": "A", "children": [{"id": "a1", "name": "a1", "category": "x"}]}
    ]
}"#;

fn page(uuid: &str, source: &str) -> String {
    format!(
        r#"<html xmlns="http://www.w3.org/1999/xhtml">
  <body>
    <div id="{container}">
      <div id="{marker}" d3-json-path="{source}"></div>
    </div>
  </body>
</html>"#,
        container = host::container_id(uuid),
        marker = host::DATA_MARKER_ID,
    )
}

/// Records requested paths and answers from a fixed body.
struct RecordingFetcher {
    body: Option<&'static str>,
    requests: RefCell<Vec<String>>,
}

impl RecordingFetcher {
    fn new(body: Option<&'static str>) -> Self {
        Self {
            body,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl SourceFetcher for RecordingFetcher {
    fn fetch(&self, path: &str) -> FetchResponse {
        self.requests.borrow_mut().push(path.to_string());
        match self.body {
            Some(body) => FetchResponse::ok(body),
            None => FetchResponse::not_found(),
        }
    }
}

#[test]
fn test_load_requests_prefixed_path() {
    let fetcher = RecordingFetcher::new(Some(HIERARCHY));
    let controller = ChartBuilder::default()
        .load(
            &page("42", "charts/tree.json"),
            &host::container_id("42"),
            "https://hub.example/user/ana/doc/tree/notebook.ipynb",
            &fetcher,
        )
        .expect("Failed to load chart");

    assert_eq!(
        fetcher.requests.borrow().as_slice(),
        ["/user/ana/files/charts/tree.json"]
    );
    assert_eq!(controller.chart().nodes().len(), 3);
    assert!(controller.transform().is_identity());
}

#[test]
fn test_load_from_file_system() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tree.json"), HIERARCHY).unwrap();
    let fetcher = FileSystemFetcher::new(dir.path());

    let controller = ChartBuilder::default()
        .load(
            &page("abc", "tree.json"),
            "container-abc",
            "http://localhost:8888/lab/tree/notebook.ipynb",
            &fetcher,
        )
        .expect("Failed to load chart");

    assert!(controller.chart().find("a1").is_some());
}

#[test]
fn test_fetch_failure_reports_status() {
    let fetcher = RecordingFetcher::new(None);
    let err = ChartBuilder::default()
        .load(&page("1", "gone.json"), "container-1", "/doc/x", &fetcher)
        .unwrap_err();

    assert!(matches!(
        err,
        DendraError::Host(HostError::SourceFetchFailed { status: 404, .. })
    ));
}

#[test]
fn test_missing_container_fetches_nothing() {
    let fetcher = RecordingFetcher::new(Some(HIERARCHY));
    let err = ChartBuilder::default()
        .load(&page("1", "tree.json"), "container-2", "/doc/x", &fetcher)
        .unwrap_err();

    assert!(matches!(
        err,
        DendraError::Host(HostError::MissingConfigurationElement(_))
    ));
    assert!(fetcher.requests.borrow().is_empty());
}

#[test]
fn test_malformed_source_is_parse_error() {
    let fetcher = RecordingFetcher::new(Some("{ not json"));
    let err = ChartBuilder::default()
        .load(&page("1", "tree.json"), "container-1", "/doc/x", &fetcher)
        .unwrap_err();

    assert!(matches!(err, DendraError::Parse { .. }));
}

#[test]
fn test_mount_yields_no_partial_chart() {
    let builder = ChartBuilder::default();

    let failed = builder.mount(
        &page("1", "tree.json"),
        "container-1",
        "/doc/x",
        &RecordingFetcher::new(None),
    );
    assert!(failed.is_none());

    let mounted = builder.mount(
        &page("1", "tree.json"),
        "container-1",
        "/doc/x",
        &RecordingFetcher::new(Some(HIERARCHY)),
    );
    assert!(mounted.is_some());
}

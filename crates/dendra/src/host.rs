//! Host page contract.
//!
//! A chart is embedded in an (X)HTML page that carries a container element
//! (`id="container-<uuid>"` by convention) with a direct child marker
//! `id="_py_data"`. The marker's `d3-json-path` attribute names the
//! hierarchy file, which is fetched from the notebook server's `/files/`
//! route relative to the page URL:
//!
//! ```text
//! page  https://hub.example/user/ana/doc/tree/notebook.ipynb
//! fetch /user/ana/files/<d3-json-path>
//!
//! page  http://localhost:8888/lab/tree/notebook.ipynb
//! fetch /files/<d3-json-path>
//! ```
//!
//! Fetching goes through [`SourceFetcher`] so callers can serve files from
//! disk ([`FileSystemFetcher`]) or anywhere else.

use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use log::{debug, trace};
use thiserror::Error;
use url::Url;

/// Id of the marker element inside the container.
pub const DATA_MARKER_ID: &str = "_py_data";
/// Attribute on the marker naming the hierarchy file.
pub const SOURCE_ATTRIBUTE: &str = "d3-json-path";

const FILES_ROUTE: &str = "/files/";

/// Errors raised while locating or fetching the chart's source document.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Missing configuration element: {0}")]
    MissingConfigurationElement(String),

    #[error("Missing 'd3-json-path' attribute in {0}")]
    MissingSourceAttribute(String),

    #[error("Failed to fetch '{path}' (status {status})")]
    SourceFetchFailed { path: String, status: u16 },

    #[error("Invalid host document: {0}")]
    InvalidDocument(String),

    #[error("Invalid document URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Builds the conventional container id for a chart instance.
pub fn container_id(uuid: &str) -> String {
    format!("container-{uuid}")
}

/// Reads the source file name from the marker inside `container_id`.
///
/// # Errors
///
/// - [`HostError::InvalidDocument`] if `page` is not well-formed XML
/// - [`HostError::MissingConfigurationElement`] if the container or its
///   direct marker child is absent
/// - [`HostError::MissingSourceAttribute`] if the marker has no source attribute
pub fn locate_source(page: &str, container_id: &str) -> Result<String, HostError> {
    let document = roxmltree::Document::parse(page)
        .map_err(|err| HostError::InvalidDocument(err.to_string()))?;

    let container = document
        .descendants()
        .find(|node| node.is_element() && node.attribute("id") == Some(container_id))
        .ok_or_else(|| {
            HostError::MissingConfigurationElement(format!("#{container_id} not found in page"))
        })?;

    let marker = container
        .children()
        .find(|node| node.is_element() && node.attribute("id") == Some(DATA_MARKER_ID))
        .ok_or_else(|| {
            HostError::MissingConfigurationElement(format!(
                "missing {DATA_MARKER_ID} from within #{container_id}"
            ))
        })?;

    let source = marker
        .attribute(SOURCE_ATTRIBUTE)
        .ok_or_else(|| HostError::MissingSourceAttribute(DATA_MARKER_ID.to_string()))?;

    trace!(container = container_id, source = source; "Source located");
    Ok(source.to_string())
}

/// Computes the server path of `source` for a page served at `document_url`.
///
/// The prefix is the page path up to the first `/doc`; when there is none, or
/// it starts the path, the prefix is empty. Relative URLs (a bare path) are
/// accepted.
///
/// ```
/// # use dendra::host::resolve_fetch_path;
/// let page = "https://hub.example/user/ana/doc/tree/x.ipynb";
/// let path = resolve_fetch_path(page, "tree.json").unwrap();
/// assert_eq!(path, "/user/ana/files/tree.json");
///
/// let local = resolve_fetch_path("http://localhost:8888/lab/tree/x.ipynb", "tree.json").unwrap();
/// assert_eq!(local, "/files/tree.json");
/// ```
///
/// # Errors
///
/// Returns [`HostError::InvalidUrl`] if the URL cannot be parsed.
pub fn resolve_fetch_path(document_url: &str, source: &str) -> Result<String, HostError> {
    let url = match Url::parse(document_url) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("http://localhost/")?.join(document_url)?
        }
        Err(err) => return Err(err.into()),
    };

    let path = url.path();
    let prefix = &path[..path.find("/doc").unwrap_or(0)];
    Ok(format!("{prefix}{FILES_ROUTE}{source}"))
}

/// Response to a source fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    status: u16,
    body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn not_found() -> Self {
        Self::new(404, String::new())
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the body when the status is 200.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::SourceFetchFailed`] for any other status.
    pub fn into_body(self, path: &str) -> Result<String, HostError> {
        if self.status == 200 {
            Ok(self.body)
        } else {
            Err(HostError::SourceFetchFailed {
                path: path.to_string(),
                status: self.status,
            })
        }
    }
}

/// Retrieves a document by server path.
pub trait SourceFetcher {
    fn fetch(&self, path: &str) -> FetchResponse;
}

/// Serves the `/files/` route from a directory on disk.
///
/// Anything before `/files/` in the requested path is ignored. Paths that
/// escape the root or do not go through `/files/` answer 404.
#[derive(Debug, Clone)]
pub struct FileSystemFetcher {
    root: PathBuf,
}

impl FileSystemFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let start = path.find(FILES_ROUTE)? + FILES_ROUTE.len();
        let relative = Path::new(&path[start..]);
        let is_contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        (is_contained && !path[start..].is_empty()).then(|| self.root.join(relative))
    }
}

impl SourceFetcher for FileSystemFetcher {
    fn fetch(&self, path: &str) -> FetchResponse {
        let Some(file) = self.resolve(path) else {
            debug!(path = path; "Rejected fetch path");
            return FetchResponse::not_found();
        };

        match fs::read_to_string(&file) {
            Ok(body) => FetchResponse::ok(body),
            Err(err) if err.kind() == io::ErrorKind::NotFound => FetchResponse::not_found(),
            Err(err) => {
                debug!(path = file.display().to_string(), err = err.to_string(); "Fetch failed");
                FetchResponse::new(500, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html xmlns="http://www.w3.org/1999/xhtml">
  <body>
    <div id="container-1234">
      <div id="_py_data" d3-json-path="out/tree.json"></div>
    </div>
    <div id="container-5678">
      <section><div id="_py_data" d3-json-path="nested.json"></div></section>
    </div>
    <div id="container-9999">
      <div id="_py_data"></div>
    </div>
  </body>
</html>"#;

    #[test]
    fn test_locate_source() {
        assert_eq!(locate_source(PAGE, &container_id("1234")).unwrap(), "out/tree.json");
    }

    #[test]
    fn test_marker_must_be_direct_child() {
        let err = locate_source(PAGE, "container-5678").unwrap_err();
        assert!(matches!(err, HostError::MissingConfigurationElement(_)));
    }

    #[test]
    fn test_missing_container() {
        let err = locate_source(PAGE, "container-0000").unwrap_err();
        assert!(matches!(err, HostError::MissingConfigurationElement(_)));
    }

    #[test]
    fn test_missing_attribute() {
        let err = locate_source(PAGE, "container-9999").unwrap_err();
        assert!(matches!(err, HostError::MissingSourceAttribute(_)));
        assert!(err.to_string().contains("d3-json-path"));
    }

    #[test]
    fn test_malformed_page() {
        let err = locate_source("<div><p></div>", "x").unwrap_err();
        assert!(matches!(err, HostError::InvalidDocument(_)));
    }

    #[test]
    fn test_resolve_fetch_path_variants() {
        assert_eq!(
            resolve_fetch_path("https://hub.example/user/ana/doc/tree/nb.ipynb", "t.json").unwrap(),
            "/user/ana/files/t.json"
        );
        assert_eq!(
            resolve_fetch_path("http://localhost:8888/doc/tree/nb.ipynb", "t.json").unwrap(),
            "/files/t.json"
        );
        assert_eq!(
            resolve_fetch_path("http://localhost:8888/", "t.json").unwrap(),
            "/files/t.json"
        );
        assert_eq!(
            resolve_fetch_path("/user/bo/doc/x", "t.json").unwrap(),
            "/user/bo/files/t.json"
        );
        assert!(matches!(
            resolve_fetch_path("http://[bad", "t.json"),
            Err(HostError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_fetch_response_status() {
        assert_eq!(FetchResponse::ok("{}").into_body("/files/a").unwrap(), "{}");
        let err = FetchResponse::not_found().into_body("/files/a").unwrap_err();
        assert!(matches!(err, HostError::SourceFetchFailed { status: 404, .. }));
    }

    #[test]
    fn test_file_system_fetcher() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("out")).unwrap();
        fs::write(dir.path().join("out/tree.json"), "{}").unwrap();
        let fetcher = FileSystemFetcher::new(dir.path());

        assert_eq!(fetcher.fetch("/prefix/files/out/tree.json").status(), 200);
        assert_eq!(fetcher.fetch("/files/out/tree.json").body(), "{}");
        assert_eq!(fetcher.fetch("/files/missing.json").status(), 404);
        assert_eq!(fetcher.fetch("/files/../secret").status(), 404);
        assert_eq!(fetcher.fetch("/elsewhere/tree.json").status(), 404);
    }
}

#![allow(dead_code)]

use std::{
    collections::HashMap,
    io::Write,
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use launcher_core::{
    configs::LauncherConfig,
    downloads::{fetcher::Fetcher, DownloadError, LauncherEvent},
    instance::natives::Platform,
    store::FsStore,
    Launcher,
};
use tokio::sync::mpsc::UnboundedReceiver;

pub const MANIFEST_URL: &str = "https://meta.test/version_manifest.json";
pub const RESOURCES_URL: &str = "https://resources.test";
pub const INDEX_BASE_URL: &str = "https://meta.test/packages";

#[derive(Clone)]
enum Response {
    Body(Vec<u8>),
    NotFound,
    Broken,
}

/// In-memory remote. Unknown urls answer not-found.
#[derive(Default)]
pub struct FakeFetcher {
    responses: Mutex<HashMap<String, Response>>,
    requests: Mutex<Vec<String>>,
    latency: Mutex<Option<Duration>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn serve(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.responses.lock().unwrap().insert(url.into(), Response::Body(body.into()));
    }

    pub fn serve_json(&self, url: impl Into<String>, value: &serde_json::Value) {
        self.serve(url, serde_json::to_vec(value).unwrap());
    }

    pub fn not_found(&self, url: impl Into<String>) {
        self.responses.lock().unwrap().insert(url.into(), Response::NotFound);
    }

    pub fn broken(&self, url: impl Into<String>) {
        self.responses.lock().unwrap().insert(url.into(), Response::Broken);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested(&self, url: &str) -> bool {
        self.requests.lock().unwrap().iter().any(|r| r == url)
    }

    /// Every fetch holds its slot for `latency` before answering.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    /// Highest number of fetches that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        self.requests.lock().unwrap().push(url.to_string());

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        let latency = *self.latency.lock().unwrap();
        match latency {
            Some(latency) => tokio::time::sleep(latency).await,
            None => tokio::task::yield_now().await,
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let response = self.responses.lock().unwrap().get(url).cloned();
        match response {
            Some(Response::Body(body)) => Ok(body),
            Some(Response::Broken) => Err(DownloadError::Transport {
                url: url.to_string(),
                error: "connection reset".to_string(),
            }),
            Some(Response::NotFound) | None => Err(DownloadError::NotFound {
                url: url.to_string(),
            }),
        }
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn config(base: &Path, platform: Platform) -> LauncherConfig {
    LauncherConfig {
        base_dir: base.to_path_buf(),
        manifest_url: MANIFEST_URL.to_string(),
        resources_url: RESOURCES_URL.to_string(),
        asset_index_base_url: INDEX_BASE_URL.to_string(),
        concurrency: 4,
        timeout_secs: 1,
        platform,
        java: None,
        jvm_args: vec![],
    }
}

pub fn launcher(
    base: &Path,
    platform: Platform,
    fetcher: Arc<FakeFetcher>,
) -> (Launcher, UnboundedReceiver<LauncherEvent>) {
    launcher_with(&config(base, platform), fetcher)
}

pub fn launcher_with(
    config: &LauncherConfig,
    fetcher: Arc<FakeFetcher>,
) -> (Launcher, UnboundedReceiver<LauncherEvent>) {
    init_tracing();
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let launcher = Launcher::with_parts(config, fetcher, Arc::new(FsStore), Arc::new(tx));
    (launcher, rx)
}

pub fn drain(rx: &mut UnboundedReceiver<LauncherEvent>) -> Vec<LauncherEvent> {
    let mut events = vec![];
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn progress(events: &[LauncherEvent]) -> Vec<(u32, u32)> {
    events
        .iter()
        .filter_map(|event| match event {
            LauncherEvent::Progress { done, total } => Some((*done, *total)),
            _ => None,
        })
        .collect()
}

pub fn zip_bytes(members: &[&str]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for member in members {
        zip.start_file(*member, zip::write::FileOptions::default()).unwrap();
        zip.write_all(member.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Manifest listing `ids`, each descriptor at `https://meta.test/v/<id>.json`.
pub fn serve_manifest(fetcher: &FakeFetcher, ids: &[&str]) {
    let versions = ids
        .iter()
        .map(|id| serde_json::json!({ "id": id, "type": "release", "url": descriptor_url(id) }))
        .collect::<Vec<_>>();

    fetcher.serve_json(
        MANIFEST_URL,
        &serde_json::json!({
            "latest": { "release": ids[0], "snapshot": ids[0] },
            "versions": versions
        }),
    );
}

pub fn descriptor_url(id: &str) -> String {
    format!("https://meta.test/v/{id}.json")
}

pub fn client_url(id: &str) -> String {
    format!("https://cdn.test/{id}/client.jar")
}

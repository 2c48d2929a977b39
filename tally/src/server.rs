//! Development server
//!
//! Serves the page over HTTP and keeps one live session. The browser posts
//! widget events and swaps in the re-rendered markup it gets back; it also
//! polls for patches produced by timers and for config reloads.

use crate::ansi::{BOLD, CYAN, DIM, GREEN, RED, RESET, YELLOW};
use crate::config::{ConfigError, TallyConfig};
use crate::hot_reload::HotReloader;
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};
use tally_ui::{Page, PageEvent, Patch};
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, Server};
use tracing::{debug, error, info, warn};

const WATCH_INTERVAL: Duration = Duration::from_millis(100);
/// Page events are a few hundred bytes; anything past this is refused
const MAX_BODY: u64 = 64 * 1024;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to start HTTP server on {addr}: {message}")]
    Bind { addr: String, message: String },
    #[error("failed to watch config: {0}")]
    Watch(#[from] notify::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The live page plus the instant its clock started
pub struct Session {
    page: Page,
    started: Instant,
}

impl Session {
    pub fn new(page: Page) -> Self {
        Self { page, started: Instant::now() }
    }

    /// Fire every timer that is due by wall-clock time
    fn sync(&mut self) {
        self.page.advance_to(self.started.elapsed());
    }

    fn replace(&mut self, page: Page) {
        *self = Self::new(page);
    }

    pub fn page(&self) -> &Page {
        &self.page
    }
}

/// Shared state between the HTTP thread and the watch loop
pub struct DevState {
    session: Mutex<Session>,
    version: AtomicU64,
    poll_interval: u64,
}

impl DevState {
    pub fn new(page: Page, poll_interval: u64) -> Self {
        Self {
            session: Mutex::new(Session::new(page)),
            version: AtomicU64::new(0),
            poll_interval,
        }
    }

    fn session(&self) -> std::sync::MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Relaxed)
    }

    /// Swap in a freshly built page and tell clients to reload
    pub fn reload(&self, page: Page) -> u64 {
        self.session().replace(page);
        self.version.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// A response before it is handed to tiny_http
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self { status: 200, content_type: "text/html; charset=utf-8", body }
    }

    fn json(status: u16, value: serde_json::Value) -> Self {
        Self { status, content_type: "application/json", body: value.to_string() }
    }

    fn patches(patches: Vec<Patch>) -> Self {
        Self::json(200, json!({ "patches": patches }))
    }

    fn bad_request(message: impl std::fmt::Display) -> Self {
        Self::json(400, json!({ "error": message.to_string() }))
    }

    fn too_large() -> Self {
        Self::json(413, json!({ "error": format!("request body exceeds {} bytes", MAX_BODY) }))
    }

    fn not_found() -> Self {
        Self { status: 404, content_type: "text/plain", body: "Not Found".to_string() }
    }
}

/// Route one request
pub fn handle(state: &DevState, method: &Method, url: &str, body: &str) -> Reply {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (Method::Get, "/") | (Method::Get, "/index.html") => {
            let mut session = state.session();
            session.sync();
            let mut document = session.page.document();
            document.push_script(client_script(state.version(), state.poll_interval));
            Reply::html(document.to_html())
        }
        (Method::Post, "/__tally/event") => {
            let event: PageEvent = match serde_json::from_str(body) {
                Ok(event) => event,
                Err(err) => {
                    warn!(%err, "malformed page event");
                    return Reply::bad_request(err);
                }
            };

            let mut session = state.session();
            session.sync();
            match session.page.dispatch(event) {
                Ok(()) => Reply::patches(session.page.take_patches()),
                Err(err) => Reply::bad_request(err),
            }
        }
        (Method::Get, "/__tally/patches") => {
            let mut session = state.session();
            session.sync();
            Reply::patches(session.page.take_patches())
        }
        (Method::Get, "/__tally/reload") => Reply::json(200, json!({ "version": state.version() })),
        _ => Reply::not_found(),
    }
}

/// Read at most `MAX_BODY` bytes of a request body
fn read_body(reader: impl Read) -> Result<String, Reply> {
    let mut body = String::new();
    if let Err(err) = reader.take(MAX_BODY + 1).read_to_string(&mut body) {
        warn!(%err, "failed to read request body");
        return Err(Reply::bad_request(err));
    }
    if body.len() as u64 > MAX_BODY {
        warn!(limit = MAX_BODY, "request body too large");
        return Err(Reply::too_large());
    }
    Ok(body)
}

fn respond(mut request: Request, state: &DevState) {
    let reply = match read_body(request.as_reader()) {
        Ok(body) => handle(state, request.method(), request.url(), &body),
        Err(reply) => reply,
    };
    debug!(method = %request.method(), url = request.url(), status = reply.status, "request");

    let mut response = Response::from_string(reply.body).with_status_code(reply.status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        response.add_header(header);
    }
    if let Err(err) = request.respond(response) {
        warn!(%err, "failed to send response");
    }
}

/// Run the dev server until the process is interrupted
pub fn run(config_path: &Path, port: Option<u16>) -> Result<(), ServerError> {
    let config = TallyConfig::load(config_path)?;
    let port = port.unwrap_or(config.dev.port);
    let addr = format!("0.0.0.0:{}", port);

    let server = Server::http(&addr).map_err(|err| ServerError::Bind {
        addr: addr.clone(),
        message: err.to_string(),
    })?;
    let state = Arc::new(DevState::new(config.build_page(), config.dev.poll_interval));

    println!();
    println!("  {}TALLY{} v{}  {}dev server{}", CYAN, RESET, env!("CARGO_PKG_VERSION"), DIM, RESET);
    println!();
    println!("  {}>{} Local:   {}http://localhost:{}{}", GREEN, RESET, CYAN, port, RESET);
    println!("  {}>{} Config:  {}{}{}", DIM, RESET, DIM, config_path.display(), RESET);
    println!();
    info!(%addr, counters = config.counters.len(), "dev server listening");

    let http_state = Arc::clone(&state);
    thread::spawn(move || {
        for request in server.incoming_requests() {
            respond(request, &http_state);
        }
    });

    let watch_dir = watch_dir(config_path);
    let reloader = HotReloader::new(&watch_dir)?;
    let config_name = config_path.file_name().map(|name| name.to_os_string());

    loop {
        thread::sleep(WATCH_INTERVAL);

        let changed = reloader.check_changes();
        if !changed.iter().any(|path| path.file_name().map(|n| n.to_os_string()) == config_name) {
            continue;
        }

        let start = Instant::now();
        match TallyConfig::load(config_path) {
            Ok(config) => {
                let version = state.reload(config.build_page());
                println!(
                    "  {}reload{} {} {}({}ms){}",
                    YELLOW,
                    RESET,
                    config_path.display(),
                    DIM,
                    start.elapsed().as_millis(),
                    RESET
                );
                info!(version, "page rebuilt from config");
            }
            Err(err) => {
                println!("  {}error{}: {}", RED, RESET, err);
                error!(%err, "keeping previous page");
            }
        }
        println!("  {}{} counter(s) mounted{}", BOLD, state.session().page().counters().len(), RESET);
    }
}

fn watch_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Browser side of the session: delegated event handlers, patch application
/// and reload polling
fn client_script(version: u64, poll_interval: u64) -> String {
    format!(
        r#"(function() {{
  let version = {version};
  function apply(patches) {{
    for (const p of patches || []) {{
      const el = document.querySelector(`[data-widget="${{p.widget}}"]`);
      if (el) el.outerHTML = p.html;
    }}
  }}
  async function send(payload) {{
    try {{
      const r = await fetch('/__tally/event', {{ method: 'POST', headers: {{ 'Content-Type': 'application/json' }}, body: JSON.stringify(payload) }});
      apply((await r.json()).patches);
    }} catch (e) {{}}
  }}
  document.addEventListener('click', (e) => {{
    const theme = e.target.closest('.theme-btn');
    if (theme) {{ send({{ kind: 'select_theme', theme: theme.dataset.theme }}); return; }}
    const button = e.target.closest('button[data-action]');
    const widget = e.target.closest('[data-widget]');
    if (button && widget && !button.disabled) {{
      send({{ kind: 'widget', widget: Number(widget.dataset.widget), event: {{ type: 'click', action: button.dataset.action }} }});
    }}
  }});
  document.addEventListener('change', (e) => {{
    const widget = e.target.closest('[data-widget]');
    if (widget && e.target.matches('input')) {{
      send({{ kind: 'widget', widget: Number(widget.dataset.widget), event: {{ type: 'change', value: e.target.value }} }});
    }}
  }});
  async function poll() {{
    if (!document.hidden) {{
      try {{
        apply((await (await fetch('/__tally/patches')).json()).patches);
        const d = await (await fetch('/__tally/reload')).json();
        if (d.version > version) {{ version = d.version; location.reload(); }}
      }} catch (e) {{}}
    }}
    setTimeout(poll, {poll_interval});
  }}
  poll();
}})();"#,
        version = version,
        poll_interval = poll_interval
    )
}

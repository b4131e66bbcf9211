use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP server for tests. Every request is answered
/// with a small JSON body and status 200.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// Like [`spawn_http_server`], but treats a failed bind as "skip this test"
/// so sandboxed environments without sockets stay green.
///
/// # Errors
///
/// Never fails; bind failures map to `Ok(None)`.
pub fn spawn_http_server_or_skip() -> Result<Option<(String, ServerHandle)>, String> {
    match spawn_http_server() {
        Ok(server) => Ok(Some(server)),
        Err(_) => Ok(None),
    }
}

fn handle_client(mut stream: TcpStream) {
    let mut buffer = [0u8; 4096];
    if stream.read(&mut buffer).is_err() {
        return;
    }
    let body = r#"{"ok":true}"#;
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// A local URL whose port is closed, for exercising connection failures.
///
/// # Errors
///
/// Returns an error if no ephemeral port can be reserved.
pub fn refused_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("listener addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

/// Write a petstore-style OpenAPI document pointing at `server_url`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_petstore_spec(
    dir: &std::path::Path,
    server_url: &str,
) -> Result<std::path::PathBuf, String> {
    let path = dir.join("petstore.yaml");
    let content = format!(
        r#"openapi: 3.0.0
info:
  title: Petstore
  version: 1.0.0
servers:
  - url: {server_url}
paths:
  /v1/pets:
    get: {{}}
    post:
      requestBody:
        required: true
        content:
          application/json:
            schema:
              type: object
              properties:
                id:
                  type: integer
                name:
                  type: string
  "/v1/pets/{{petId}}":
    get:
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: string
"#
    );
    std::fs::write(&path, content).map_err(|err| format!("write spec failed: {}", err))?;
    Ok(path)
}

/// Run the `apihit` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_apihit<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = apihit_bin()?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run apihit failed: {}", err))
}

fn apihit_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_apihit").map_or_else(
        || Err("CARGO_BIN_EXE_apihit missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

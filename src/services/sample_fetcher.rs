use reqwest::{Client, Response, Url};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::config::FetchConfig;
use crate::error::FetchError;

/// A note that could not be saved, with the reason.
#[derive(Debug)]
pub struct FailedNote {
    pub note: String,
    pub error: FetchError,
}

/// Outcome of one pass over the note list.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub saved: Vec<String>,
    pub failed: Vec<FailedNote>,
}

impl FetchReport {
    pub fn num_ok(&self) -> usize {
        self.saved.len()
    }

    pub fn num_failed(&self) -> usize {
        self.failed.len()
    }
}

/// Downloads `<base_url><note>.mp3` into `<output_dir>/<note>.mp3` for every
/// note, one after the other.
///
/// A note that fails (transport error, non-2xx status, write error) is
/// recorded in the report and the loop moves on. Only invalid settings or an
/// output directory that cannot be created end the run early.
pub async fn fetch_samples(
    client: &Client,
    config: &FetchConfig,
) -> Result<FetchReport, FetchError> {
    // 1) Validate settings before touching the disk
    if let Some(index) = config.notes.iter().position(|note| note.is_empty()) {
        return Err(FetchError::EmptyNote { index });
    }
    validate_base_url(&config.base_url)?;

    // 2) Create the output directory; no-op when it already exists
    fs::create_dir_all(&config.output_dir).map_err(|source| FetchError::CreateDir {
        path: config.output_dir.clone(),
        source,
    })?;

    // 3) Fetch every note in order
    let mut report = FetchReport::default();
    for note in &config.notes {
        let file_name = format!("{note}.mp3");
        let url = format!("{}{}", config.base_url, file_name);
        let output_path = config.output_dir.join(&file_name);

        info!("Downloading {file_name}...");
        match download_to_file(client, &url, &output_path).await {
            Ok(bytes) => {
                info!("Saved {file_name} ({bytes} bytes)");
                report.saved.push(note.clone());
            }
            Err(error) => {
                warn!("Failed to download {file_name}: {error}");
                report.failed.push(FailedNote {
                    note: note.clone(),
                    error,
                });
            }
        }
    }

    Ok(report)
}

fn validate_base_url(base_url: &str) -> Result<(), FetchError> {
    let invalid = |reason: String| FetchError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

/// GETs `url` and streams the body into `path`, returning the byte count.
/// The file is only created once the server answered with a success status,
/// and is removed again if streaming fails halfway.
async fn download_to_file(client: &Client, url: &str, path: &Path) -> Result<u64, FetchError> {
    let mut resp = client.get(url).send().await?;

    if !resp.status().is_success() {
        return Err(FetchError::Status {
            status: resp.status(),
            url: url.to_string(),
        });
    }

    let file = File::create(path).map_err(|source| FetchError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    let result = stream_body(&mut resp, &mut out, path).await;
    if result.is_err() {
        drop(out);
        if let Err(e) = fs::remove_file(path) {
            warn!("Could not remove partial file {}: {e}", path.display());
        }
    }
    result
}

async fn stream_body<W: Write>(
    resp: &mut Response,
    out: &mut W,
    path: &Path,
) -> Result<u64, FetchError> {
    let write_err = |source| FetchError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut written = 0u64;
    while let Some(chunk) = resp.chunk().await? {
        out.write_all(&chunk).map_err(write_err)?;
        written += chunk.len() as u64;
    }
    out.flush().map_err(write_err)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpResponse, HttpServer};
    use std::io::Read;
    use std::net::TcpListener;
    use std::path::PathBuf;
    use std::thread;

    const MISSING_NOTE: &str = "Eb4";
    const LARGE_NOTE: &str = "B4";

    fn sample_bytes(file_name: &str) -> Vec<u8> {
        if file_name == format!("{LARGE_NOTE}.mp3") {
            return (0..300_000u32).map(|i| (i % 251) as u8).collect();
        }
        let mut bytes = vec![0xFF, 0xFB, 0x90, 0x00];
        bytes.extend_from_slice(file_name.as_bytes());
        bytes
    }

    async fn serve_sample(path: web::Path<String>) -> HttpResponse {
        let file_name = path.into_inner();
        if file_name == format!("{MISSING_NOTE}.mp3") {
            return HttpResponse::NotFound().finish();
        }
        HttpResponse::Ok()
            .content_type("audio/mpeg")
            .body(sample_bytes(&file_name))
    }

    /// Starts a local sound font host and returns its base url.
    fn spawn_host() -> String {
        let server = HttpServer::new(|| {
            App::new().route("/soundfont/{name}", web::get().to(serve_sample))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{addr}/soundfont/")
    }

    /// Answers one request with a header promising far more body than it
    /// sends, then closes the connection.
    fn spawn_truncating_host() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Length: 100000\r\nConnection: close\r\n\r\n\xFF\xFB\x90\x00\x00",
            );
        });
        format!("http://{addr}/")
    }

    fn unreachable_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/")
    }

    fn config(base_url: String, output_dir: PathBuf, notes: &[&str]) -> FetchConfig {
        FetchConfig {
            base_url,
            output_dir,
            notes: notes.iter().map(|n| n.to_string()).collect(),
        }
    }

    #[actix_web::test]
    async fn saves_every_note_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let notes = ["C4", "Db4", "A4", LARGE_NOTE];
        let config = config(spawn_host(), dir.path().to_path_buf(), &notes);

        let report = fetch_samples(&Client::new(), &config).await.unwrap();

        assert_eq!(report.num_ok(), notes.len());
        assert_eq!(report.num_failed(), 0);
        for note in notes {
            let file_name = format!("{note}.mp3");
            let saved = fs::read(dir.path().join(&file_name)).unwrap();
            assert_eq!(saved, sample_bytes(&file_name), "{file_name}");
        }
    }

    #[actix_web::test]
    async fn failing_note_does_not_stop_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(
            spawn_host(),
            dir.path().to_path_buf(),
            &["C4", MISSING_NOTE, "E4"],
        );

        let report = fetch_samples(&Client::new(), &config).await.unwrap();

        assert_eq!(report.saved, vec!["C4".to_string(), "E4".to_string()]);
        assert_eq!(report.num_failed(), 1);
        assert_eq!(report.failed[0].note, MISSING_NOTE);
        assert!(matches!(
            report.failed[0].error,
            FetchError::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND
        ));
        assert!(!dir.path().join(format!("{MISSING_NOTE}.mp3")).exists());
    }

    #[actix_web::test]
    async fn unreachable_host_counts_every_note_as_failed() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(unreachable_base_url(), dir.path().to_path_buf(), &["C4", "D4"]);

        let report = fetch_samples(&Client::new(), &config).await.unwrap();

        assert_eq!(report.num_ok(), 0);
        assert_eq!(report.num_failed(), 2);
        assert!(report
            .failed
            .iter()
            .all(|f| matches!(f.error, FetchError::Request(_))));
    }

    #[actix_web::test]
    async fn creates_output_dir_and_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("nested").join("samples");
        let config = config(spawn_host(), output_dir.clone(), &["A4"]);

        let report = fetch_samples(&Client::new(), &config).await.unwrap();
        assert_eq!(report.num_ok(), 1);

        fs::write(output_dir.join("A4.mp3"), vec![0u8; 4096]).unwrap();
        let report = fetch_samples(&Client::new(), &config).await.unwrap();
        assert_eq!(report.num_ok(), 1);
        assert_eq!(
            fs::read(output_dir.join("A4.mp3")).unwrap(),
            sample_bytes("A4.mp3")
        );
    }

    #[actix_web::test]
    async fn not_found_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let previous = dir.path().join(format!("{MISSING_NOTE}.mp3"));
        fs::write(&previous, b"previous sample").unwrap();
        let config = config(spawn_host(), dir.path().to_path_buf(), &[MISSING_NOTE]);

        let report = fetch_samples(&Client::new(), &config).await.unwrap();

        assert_eq!(report.num_failed(), 1);
        assert_eq!(fs::read(&previous).unwrap(), b"previous sample");
    }

    #[actix_web::test]
    async fn truncated_body_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(spawn_truncating_host(), dir.path().to_path_buf(), &["C4"]);

        let report = fetch_samples(&Client::new(), &config).await.unwrap();

        assert_eq!(report.num_ok(), 0);
        assert_eq!(report.num_failed(), 1);
        assert!(matches!(report.failed[0].error, FetchError::Request(_)));
        assert!(!dir.path().join("C4.mp3").exists());
    }

    #[actix_web::test]
    async fn unwritable_target_fails_only_that_note() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("C4.mp3")).unwrap();
        let config = config(spawn_host(), dir.path().to_path_buf(), &["C4", "D4"]);

        let report = fetch_samples(&Client::new(), &config).await.unwrap();

        assert_eq!(report.saved, vec!["D4".to_string()]);
        assert_eq!(report.num_failed(), 1);
        assert_eq!(report.failed[0].note, "C4");
        assert!(matches!(report.failed[0].error, FetchError::Write { .. }));
        assert_eq!(
            fs::read(dir.path().join("D4.mp3")).unwrap(),
            sample_bytes("D4.mp3")
        );
    }

    #[actix_web::test]
    async fn empty_note_is_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("samples");
        let config = config(spawn_host(), output_dir.clone(), &["C4", ""]);

        let err = fetch_samples(&Client::new(), &config).await.unwrap_err();

        assert!(matches!(err, FetchError::EmptyNote { index: 1 }));
        assert!(!output_dir.exists());
    }

    #[test]
    fn base_url_must_be_http() {
        assert!(validate_base_url("https://example.com/piano/").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8080/").is_ok());
        assert!(matches!(
            validate_base_url("ftp://example.com/"),
            Err(FetchError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            validate_base_url("samples/"),
            Err(FetchError::InvalidBaseUrl { .. })
        ));
    }
}

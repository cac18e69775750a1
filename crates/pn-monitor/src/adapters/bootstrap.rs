//! grpcurl bootstrap: find the tool, or fetch a release build of it.

use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use flate2::read::GzDecoder;
use tracing::{debug, info, warn};

use crate::error::{BootstrapError, MonitorError};
use crate::ports::ExecutableLocator;

use super::grpcurl::GrpcurlClient;

/// grpcurl release installed by the bootstrap.
pub const GRPCURL_VERSION: &str = "1.9.1";

const BINARY_NAME: &str = "grpcurl";
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Release asset URL for a Rust `std::env::consts` OS/arch pair.
pub fn release_url(version: &str, os: &str, arch: &str) -> Result<String, BootstrapError> {
    let unsupported = || BootstrapError::UnsupportedPlatform {
        os: os.to_string(),
        arch: arch.to_string(),
    };

    let os_name = match os {
        "linux" => "linux",
        "macos" => "osx",
        _ => return Err(unsupported()),
    };
    let arch_name = match arch {
        "x86_64" => "x86_64",
        "aarch64" => "arm64",
        "x86" => "x86_32",
        _ => return Err(unsupported()),
    };

    Ok(format!(
        "https://github.com/fullstorydev/grpcurl/releases/download/v{version}/grpcurl_{version}_{os_name}_{arch_name}.tar.gz"
    ))
}

/// Downloads and installs a grpcurl release into a private directory.
#[derive(Debug, Clone)]
pub struct GrpcurlBootstrap {
    version: String,
    install_dir: PathBuf,
    http: reqwest::Client,
}

impl GrpcurlBootstrap {
    /// Fails only if the TLS backend of the HTTP client cannot initialize.
    pub fn new(install_dir: impl Into<PathBuf>) -> Result<Self, BootstrapError> {
        let http = reqwest::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .user_agent(concat!("public-nodes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(BootstrapError::HttpClient)?;

        Ok(Self {
            version: GRPCURL_VERSION.to_string(),
            install_dir: install_dir.into(),
            http,
        })
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Where the installed binary lives.
    pub fn binary_path(&self) -> PathBuf {
        self.install_dir
            .join(format!("{BINARY_NAME}{}", std::env::consts::EXE_SUFFIX))
    }

    /// Download the release for this host and install it.
    pub async fn install(&self) -> Result<PathBuf, BootstrapError> {
        let url = release_url(&self.version, std::env::consts::OS, std::env::consts::ARCH)?;

        tokio::fs::create_dir_all(&self.install_dir)
            .await
            .map_err(|source| BootstrapError::Io {
                path: self.install_dir.clone(),
                source,
            })?;

        info!(url = %url, "Downloading grpcurl {}", self.version);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| BootstrapError::Download {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(BootstrapError::HttpStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| BootstrapError::Download {
                url: url.clone(),
                source,
            })?;

        let archive = self
            .install_dir
            .join(format!("grpcurl_{}.tar.gz", self.version));
        tokio::fs::write(&archive, &bytes)
            .await
            .map_err(|source| BootstrapError::Io {
                path: archive.clone(),
                source,
            })?;

        let installed = self.install_from_archive(&archive).await;
        if let Err(e) = tokio::fs::remove_file(&archive).await {
            warn!(path = %archive.display(), error = %e, "Could not remove downloaded archive");
        }
        installed
    }

    /// Extract the binary from a release archive and check that it runs.
    pub async fn install_from_archive(&self, archive: &Path) -> Result<PathBuf, BootstrapError> {
        info!(archive = %archive.display(), dir = %self.install_dir.display(), "Extracting grpcurl");

        let binary = self.binary_path();
        let (source, target) = (archive.to_path_buf(), binary.clone());
        tokio::task::spawn_blocking(move || unpack_binary(&source, &target))
            .await
            .map_err(|e| BootstrapError::Extract {
                archive: archive.to_path_buf(),
                message: e.to_string(),
            })??;

        let banner = GrpcurlClient::new(&binary)
            .probe()
            .await
            .map_err(|e| BootstrapError::Probe {
                binary: binary.clone(),
                message: e.to_string(),
            })?;
        info!(path = %binary.display(), version = %banner, "grpcurl installed");

        Ok(binary)
    }
}

/// Copy the grpcurl entry of a `.tar.gz` release to `target`.
///
/// Only the binary is written; every other entry is skipped.
fn unpack_binary(archive: &Path, target: &Path) -> Result<(), BootstrapError> {
    let extract = |e: std::io::Error| BootstrapError::Extract {
        archive: archive.to_path_buf(),
        message: e.to_string(),
    };

    let file = File::open(archive).map_err(|source| BootstrapError::Io {
        path: archive.to_path_buf(),
        source,
    })?;
    let mut tarball = tar::Archive::new(GzDecoder::new(file));

    let wanted = target.file_name().unwrap_or_else(|| OsStr::new(BINARY_NAME));
    for entry in tarball.entries().map_err(extract)? {
        let mut entry = entry.map_err(extract)?;
        let is_binary = entry.header().entry_type().is_file()
            && entry
                .path()
                .map(|p| p.file_name() == Some(wanted))
                .unwrap_or(false);
        if is_binary {
            entry.unpack(target).map_err(extract)?;
            return Ok(());
        }
    }

    Err(BootstrapError::MissingBinary(target.to_path_buf()))
}

/// Pick the grpcurl binary to use.
///
/// An explicit path wins, then whatever the locator finds, then a
/// bootstrap install. Without a bootstrap the tool is unavailable.
pub async fn resolve_grpcurl(
    explicit: Option<&Path>,
    locator: &dyn ExecutableLocator,
    bootstrap: Option<&GrpcurlBootstrap>,
) -> Result<PathBuf, MonitorError> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "Using configured grpcurl");
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(MonitorError::ToolUnavailable)
        };
    }

    if let Some(path) = locator.locate(BINARY_NAME) {
        return Ok(path);
    }

    match bootstrap {
        Some(bootstrap) => {
            // A previous bootstrap may already have installed it.
            let cached = bootstrap.binary_path();
            if cached.is_file() {
                debug!(path = %cached.display(), "Using bootstrapped grpcurl");
                return Ok(cached);
            }
            Ok(bootstrap.install().await?)
        }
        None => Err(MonitorError::ToolUnavailable),
    }
}

//! Sandboxed install roots, package builders and a loopback HTTP server.

#![allow(clippy::expect_used, dead_code)]

use std::fs::File;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

/// A throwaway device: packages, download dir and install dir all live in
/// one temp directory, wired together by a generated config file.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let sandbox = Self {
            dir: tempfile::tempdir().expect("tempdir"),
        };
        std::fs::create_dir_all(sandbox.packages()).expect("packages dir");
        let config = format!(
            "paths:\n  download_dir: \"{}\"\n  install_dir: \"{}\"\n",
            sandbox.download_dir().display(),
            sandbox.install_dir().display()
        );
        std::fs::write(sandbox.config_path(), config).expect("write config");
        sandbox
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("bootstrap.yaml")
    }

    pub fn packages(&self) -> PathBuf {
        self.root().join("packages")
    }

    pub fn download_dir(&self) -> PathBuf {
        self.root().join("tmp")
    }

    pub fn install_dir(&self) -> PathBuf {
        self.root().join("opt")
    }

    pub fn install_root(&self) -> PathBuf {
        self.install_dir().join("nightswatch-ranger")
    }

    pub fn certs_dir(&self) -> PathBuf {
        self.install_root().join("certs/p1")
    }

    /// Write a credentials zip into the package dir and return its URL.
    pub fn credentials_package(&self, name: &str, entries: &[(&str, &[u8])]) -> String {
        let path = self.packages().join(name);
        write_zip(&path, entries);
        file_url(&path)
    }

    /// Write a Ranger tarball into the package dir and return its URL.
    pub fn ranger_package(&self, entries: &[(&str, &[u8], u32)]) -> String {
        let path = self.packages().join("nightswatch-ranger.tar.gz");
        write_tar_gz(&path, entries);
        file_url(&path)
    }

    /// The binary, pointed at this sandbox's config, with no ambient URLs.
    pub fn bootstrap(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ranger-bootstrap"));
        cmd.env("NO_COLOR", "1")
            .env_remove("CREDENTIALS_PKG_URL")
            .env_remove("NW_RANGER_PKG_URL")
            .env("RANGER_BOOTSTRAP_CONFIG", self.config_path());
        cmd
    }
}

pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Shell script that records its `$0` and argument count next to itself.
pub const RECORDING_RANGER: &[u8] =
    b"#!/bin/sh\nprintf '%s|%s' \"$0\" \"$#\" > \"$(dirname \"$0\")/launched\"\n";

pub fn write_tar_gz(path: &Path, entries: &[(&str, &[u8], u32)]) {
    let file = File::create(path).expect("create tarball");
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (name, data, mode) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(*mode);
        header.set_uid(4242);
        header.set_gid(4242);
        builder
            .append_data(&mut header, name, *data)
            .expect("append tar entry");
    }
    builder
        .into_inner()
        .expect("finish tar")
        .finish()
        .expect("finish gzip");
}

pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("create zip");
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    for (name, data) in entries {
        zip.start_file(*name, options).expect("start zip entry");
        zip.write_all(data).expect("write zip entry");
    }
    zip.finish().expect("finish zip");
}

/// Answer one HTTP request with `status` and an empty body.
pub fn serve_status_once(status: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let response =
        format!("HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}/credentials.zip?X-Amz-Signature=s3cr3t")
}

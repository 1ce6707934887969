use regex::Regex;
use std::{
    io,
    process::{Command, Output, Stdio},
};
use thiserror::Error;

const MINIMUM_FFMPEG_MAJOR_VERSION: u32 = 4;

#[derive(Debug)]
pub struct FFmpegVersionInfo {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub is_compatible: bool,
}

#[derive(Debug)]
pub struct FFmpegCheckResult {
    pub ffmpeg_available: bool,
    pub ffmpeg_version: Option<FFmpegVersionInfo>,
    pub mp3_muxer_available: bool,
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum FFmpegError {
    #[error(
        "FFmpeg v{found_major}.{found_minor} is too old, v{minimum_major}.0 or newer is required. Use --ignore-ffmpeg-version to bypass."
    )]
    VersionTooOld {
        minimum_major: u32,
        found_major: u32,
        found_minor: u32,
    },
    #[error("Could not parse ffmpeg version from output. Use --ignore-ffmpeg-version to bypass.")]
    VersionParseError,
    #[error("Could not run `ffmpeg -version` to check version.")]
    FFmpegVersionCheckFailed,
    #[error("`{0}` command not found. Please ensure it is installed and in your PATH.")]
    CommandNotFound(String),
    #[error("Failed to run `{0}`: {1}")]
    CommandFailed(String, String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// Run ffmpeg with the given arguments, hiding its output unless `debug` is
/// set. The tag commands carry no `-y`, so stdin is closed along with the
/// output streams: an already-existing output file then makes ffmpeg exit
/// non-zero instead of waiting on an overwrite prompt nobody can see.
pub fn run_ffmpeg(args: &[&str], debug: bool) -> Result<(), FFmpegError> {
    let mut command = Command::new("ffmpeg");
    command.args(args);

    if !debug {
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
    }

    let status = command.status()?;
    if !status.success() {
        return Err(FFmpegError::CommandFailed(
            format!("ffmpeg {}", args.join(" ")),
            status.to_string(),
        ));
    }
    Ok(())
}

/// Parse `major.minor[.patch]` out of `ffmpeg -version` output.
fn parse_version(version_output: &str) -> Result<Option<(u32, u32, u32)>, FFmpegError> {
    let re = Regex::new(r"ffmpeg version (\d+)\.(\d+)(?:\.(\d+))?")?;
    Ok(re.captures(version_output).map(|caps| {
        let major: u32 = caps
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let minor: u32 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let patch: u32 = caps.get(3).map_or(0, |m| m.as_str().parse().unwrap_or(0));
        (major, minor, patch)
    }))
}

pub fn check_ffmpeg_version(ignore_check: bool) -> Result<(), FFmpegError> {
    if ignore_check {
        return Ok(());
    }

    let output = Command::new("ffmpeg").arg("-version").output()?;
    if !output.status.success() {
        return Err(FFmpegError::FFmpegVersionCheckFailed);
    }

    let version_info = String::from_utf8_lossy(&output.stdout);
    match parse_version(&version_info)? {
        Some((major, minor, _)) => {
            if major >= MINIMUM_FFMPEG_MAJOR_VERSION {
                Ok(())
            } else {
                Err(FFmpegError::VersionTooOld {
                    minimum_major: MINIMUM_FFMPEG_MAJOR_VERSION,
                    found_major: major,
                    found_minor: minor,
                })
            }
        }
        None => Err(FFmpegError::VersionParseError),
    }
}

pub fn check_dependency(cmd: &str) -> Result<(), FFmpegError> {
    match Command::new(cmd)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(_) => Ok(()),
        Err(e) => {
            if e.kind() == io::ErrorKind::NotFound {
                Err(FFmpegError::CommandNotFound(cmd.to_string()))
            } else {
                Err(FFmpegError::CommandFailed(cmd.to_string(), e.to_string()))
            }
        }
    }
}

pub fn check_ffmpeg_installation() -> FFmpegCheckResult {
    let version = Command::new("ffmpeg").arg("-version").output();
    let muxers = Command::new("ffmpeg")
        .args(["-hide_banner", "-muxers"])
        .output();
    build_check_result(version, muxers)
}

/// Fold the raw command outputs into the report. Whenever `ffmpeg_available`
/// stays false, `error` carries the reason, including a `-version` call that
/// spawns but exits non-zero.
fn build_check_result(
    version: io::Result<Output>,
    muxers: io::Result<Output>,
) -> FFmpegCheckResult {
    let mut result = FFmpegCheckResult {
        ffmpeg_available: false,
        ffmpeg_version: None,
        mp3_muxer_available: false,
        error: None,
    };

    match version {
        Ok(output) => {
            if output.status.success() {
                result.ffmpeg_available = true;

                let version_info = String::from_utf8_lossy(&output.stdout);
                if let Ok(Some((major, minor, patch))) = parse_version(&version_info) {
                    result.ffmpeg_version = Some(FFmpegVersionInfo {
                        major,
                        minor,
                        patch,
                        is_compatible: major >= MINIMUM_FFMPEG_MAJOR_VERSION,
                    });
                }
            } else {
                result.error = Some(format!("`ffmpeg -version` failed ({})", output.status));
            }
        }
        Err(e) => {
            if e.kind() == io::ErrorKind::NotFound {
                result.error = Some("FFmpeg not found in PATH".to_string());
            } else {
                result.error = Some(format!("Failed to check FFmpeg: {}", e));
            }
        }
    }

    // Every tagged copy is written through the mp3 muxer
    if let Ok(output) = muxers {
        let muxer_list = String::from_utf8_lossy(&output.stdout);
        result.mp3_muxer_available = muxer_list
            .lines()
            .any(|line| line.split_whitespace().any(|word| word == "mp3"));
    }

    result
}

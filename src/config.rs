use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::cli::Args;
use crate::job::Job;

pub const DEFAULT_FILE_PATTERN: &str = "*.mp3";

/// The five supported tag fields, in the order they are written.
#[derive(Debug, Clone, Default)]
pub struct TagSet {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub track: Option<String>,
    pub album: Option<String>,
}

impl TagSet {
    /// `-metadata key=value` argument pairs for every set field, in the fixed
    /// order title, artist, genre, track, album.
    pub fn metadata_args(&self) -> Vec<String> {
        let fields = [
            ("title", &self.title),
            ("artist", &self.artist),
            ("genre", &self.genre),
            ("track", &self.track),
            ("album", &self.album),
        ];
        let mut args = Vec::new();
        for (key, value) in fields {
            if let Some(value) = value {
                args.push("-metadata".to_string());
                args.push(format!("{}={}", key, value));
            }
        }
        args
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.genre.is_none()
            && self.track.is_none()
            && self.album.is_none()
    }
}

/// Resolved configuration for one run, built from the CLI arguments merged
/// over an optional job file.
#[derive(Debug)]
pub struct Config {
    pub dir: PathBuf,
    pub filename: String,
    pub img: Option<String>,
    pub tags: TagSet,
    pub ask_title: bool,
    pub trim_names: bool,
    pub cleanup: bool,
    pub yes: bool,
    pub debug: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn pick(cli: &Option<String>, job: Option<String>) -> Option<String> {
    non_empty(cli.clone()).or_else(|| non_empty(job))
}

impl Config {
    /// Merge CLI arguments with the job file (CLI values win, empty strings
    /// count as not supplied) and validate the result.
    pub fn resolve(args: &Args) -> Result<Self> {
        let job = Job::load(args.job.as_deref())?.unwrap_or_default();

        let dir = pick(&args.dir, job.dir)
            .ok_or_else(|| anyhow::anyhow!("--dir is required"))?;
        let filename = pick(&args.filename, job.filename)
            .unwrap_or_else(|| DEFAULT_FILE_PATTERN.to_string());
        let img = pick(&args.img, job.img);
        let tags = TagSet {
            title: pick(&args.title, job.title),
            artist: pick(&args.artist, job.artist),
            genre: pick(&args.genre, job.genre),
            track: pick(&args.track, job.track),
            album: pick(&args.album, job.album),
        };
        let ask_title = args.ask_title || job.ask_title.unwrap_or(false);
        let trim_names = args.trim_names || job.trim_names.unwrap_or(false);
        let cleanup = args.cleanup || job.cleanup.unwrap_or(false);

        if img.is_none() && tags.is_empty() {
            bail!("Nothing to do: provide at least one tag value or --img.");
        }
        if tags.title.is_none() && !ask_title {
            bail!("A title is required: pass --title or use --ask-title.");
        }

        Ok(Config {
            dir: PathBuf::from(dir),
            filename,
            img,
            tags,
            ask_title,
            trim_names,
            cleanup,
            yes: args.yes,
            debug: args.debug,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScratchDir;
    use clap::Parser;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["tag-stamper"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn requires_a_directory() {
        let err = Config::resolve(&parse(&["--title", "Demo"])).unwrap_err();
        assert!(err.to_string().contains("--dir is required"));
    }

    #[test]
    fn requires_something_to_tag() {
        let err = Config::resolve(&parse(&["--dir", "songs"])).unwrap_err();
        assert!(err.to_string().contains("Nothing to do"));
    }

    #[test]
    fn ask_title_alone_is_not_enough() {
        let err = Config::resolve(&parse(&["--dir", "songs", "--ask-title"])).unwrap_err();
        assert!(err.to_string().contains("Nothing to do"));
    }

    #[test]
    fn requires_a_title_source() {
        let err = Config::resolve(&parse(&["--dir", "songs", "--artist", "Someone"])).unwrap_err();
        assert!(err.to_string().contains("A title is required"));
    }

    #[test]
    fn ask_title_satisfies_the_title_requirement() {
        let config =
            Config::resolve(&parse(&["--dir", "songs", "--artist", "Someone", "--ask-title"]))
                .unwrap();
        assert!(config.ask_title);
        assert_eq!(config.tags.title, None);
    }

    #[test]
    fn empty_values_count_as_absent() {
        let err = Config::resolve(&parse(&[
            "--dir", "songs", "--title", "", "--artist", "Someone",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("A title is required"));
    }

    #[test]
    fn filename_defaults_to_mp3_glob() {
        let config = Config::resolve(&parse(&["--dir", "songs", "--title", "Demo"])).unwrap();
        assert_eq!(config.filename, "*.mp3");
        assert_eq!(config.dir, PathBuf::from("songs"));
        assert!(!config.cleanup);
    }

    #[test]
    fn cli_values_override_the_job_file() {
        let dir = ScratchDir::new();
        let job_path = dir.path().join("job.json");
        std::fs::write(
            &job_path,
            r#"{ "dir": "from-file", "title": "File Title", "artist": "File Artist", "cleanup": true }"#,
        )
        .unwrap();

        let config = Config::resolve(&parse(&[
            "--dir",
            "from-cli",
            "--title",
            "CLI Title",
            "--job",
            job_path.to_str().unwrap(),
        ]))
        .unwrap();

        assert_eq!(config.dir, PathBuf::from("from-cli"));
        assert_eq!(config.tags.title.as_deref(), Some("CLI Title"));
        assert_eq!(config.tags.artist.as_deref(), Some("File Artist"));
        assert!(config.cleanup);
    }

    #[test]
    fn metadata_args_keep_the_fixed_order() {
        let tags = TagSet {
            album: Some("Album".to_string()),
            title: Some("Title".to_string()),
            track: Some("7".to_string()),
            ..TagSet::default()
        };
        assert_eq!(
            tags.metadata_args(),
            vec![
                "-metadata",
                "title=Title",
                "-metadata",
                "track=7",
                "-metadata",
                "album=Album",
            ]
        );
    }

    #[test]
    fn metadata_args_skip_unset_fields() {
        assert!(TagSet::default().metadata_args().is_empty());
        assert!(TagSet::default().is_empty());
    }
}

use crate::config::{Config, TagSet};
use crate::ffmpeg::run_ffmpeg;
use crate::naming::{copy_target, path_to_str, replacement_target};
use anyhow::Result;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

const ID3V2_VERSION: &str = "3";

/// Build the ffmpeg argument vector for tagging one file: the input, the
/// cover mapping when a cover is present, one `-metadata key=value` pair per
/// set tag field, then the fixed `-id3v2_version 3 -c copy <output>` tail.
/// Streams are copied, never re-encoded.
pub fn tag_command_args(
    input: &Path,
    tags: &TagSet,
    cover: Option<&Path>,
    output: &Path,
) -> Result<Vec<String>> {
    let mut args: Vec<String> = vec!["-i".to_string(), path_to_str(input)?.to_string()];
    if let Some(cover) = cover {
        args.push("-i".to_string());
        args.push(path_to_str(cover)?.to_string());
        args.push("-map".to_string());
        args.push("0:0".to_string());
        args.push("-map".to_string());
        args.push("1:0".to_string());
    }
    args.extend(tags.metadata_args());
    args.push("-id3v2_version".to_string());
    args.push(ID3V2_VERSION.to_string());
    args.push("-c".to_string());
    args.push("copy".to_string());
    args.push(path_to_str(output)?.to_string());
    Ok(args)
}

/// Tag one file: write the tagged copy next to the source, then replace the
/// original with it when cleanup is enabled. Returns the path the tagged
/// file ends up at.
pub fn process_file(file: &Path, cover: Option<&Path>, config: &Config) -> Result<PathBuf> {
    let output = copy_target(file, config.trim_names)?;
    let ffmpeg_args = tag_command_args(file, &config.tags, cover, &output)?;
    let args_slice: Vec<&str> = ffmpeg_args.iter().map(|s| s.as_str()).collect();
    run_ffmpeg(&args_slice, config.debug)?;

    if config.cleanup {
        return cleanup_file(file, &output, config.trim_names);
    }
    Ok(output)
}

/// Delete the original file and move its tagged copy to the original's name.
pub fn cleanup_file(original: &Path, copy: &Path, trim: bool) -> Result<PathBuf> {
    let target = replacement_target(original, trim)?;
    fs::remove_file(original)?;
    fs::rename(copy, &target)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::resolve_targets;
    use crate::testutil::ScratchDir;

    #[test]
    fn full_command_with_cover_and_tags() {
        let tags = TagSet {
            title: Some("Demo".to_string()),
            artist: Some("Someone".to_string()),
            ..TagSet::default()
        };
        let args = tag_command_args(
            Path::new("songs/a.mp3"),
            &tags,
            Some(Path::new("songs/cover.png")),
            Path::new("songs/copy_a.mp3"),
        )
        .unwrap();

        assert_eq!(
            args,
            vec![
                "-i",
                "songs/a.mp3",
                "-i",
                "songs/cover.png",
                "-map",
                "0:0",
                "-map",
                "1:0",
                "-metadata",
                "title=Demo",
                "-metadata",
                "artist=Someone",
                "-id3v2_version",
                "3",
                "-c",
                "copy",
                "songs/copy_a.mp3",
            ]
        );
    }

    #[test]
    fn no_cover_means_no_stream_mapping() {
        let args = tag_command_args(
            Path::new("a.mp3"),
            &TagSet::default(),
            None,
            Path::new("copy_a.mp3"),
        )
        .unwrap();

        assert_eq!(
            args,
            vec!["-i", "a.mp3", "-id3v2_version", "3", "-c", "copy", "copy_a.mp3"]
        );
    }

    #[test]
    fn title_only_batch_over_a_directory() {
        let dir = ScratchDir::new();
        dir.touch("b.mp3");
        dir.touch("a.mp3");

        let files = resolve_targets(dir.path(), "*.mp3").unwrap();
        let tags = TagSet {
            title: Some("Demo".to_string()),
            ..TagSet::default()
        };

        let mut commands = Vec::new();
        for file in &files {
            let output = copy_target(file, false).unwrap();
            commands.push(tag_command_args(file, &tags, None, &output).unwrap());
        }

        let root = dir.path().display();
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0],
            vec![
                "-i".to_string(),
                format!("{}/a.mp3", root),
                "-metadata".to_string(),
                "title=Demo".to_string(),
                "-id3v2_version".to_string(),
                "3".to_string(),
                "-c".to_string(),
                "copy".to_string(),
                format!("{}/copy_a.mp3", root),
            ]
        );
        assert_eq!(commands[1][1], format!("{}/b.mp3", root));
        assert_eq!(
            commands[1].last().unwrap(),
            &format!("{}/copy_b.mp3", root)
        );

        // Nothing ran, so the originals are untouched.
        assert!(files.iter().all(|f| f.exists()));
    }

    #[test]
    fn cleanup_replaces_the_original() {
        let dir = ScratchDir::new();
        let original = dir.touch("song.mp3");
        let copy = dir.touch("copy_song.mp3");

        let final_path = cleanup_file(&original, &copy, false).unwrap();

        assert_eq!(final_path, original);
        assert!(original.exists());
        assert!(!copy.exists());
    }

    #[test]
    fn cleanup_trims_the_replacement_name() {
        let dir = ScratchDir::new();
        let original = dir.touch("my song.mp3");
        let copy = dir.touch("copy_my_song.mp3");

        let final_path = cleanup_file(&original, &copy, true).unwrap();

        assert_eq!(final_path, dir.path().join("my_song.mp3"));
        assert!(final_path.exists());
        assert!(!original.exists());
        assert!(!copy.exists());
    }
}

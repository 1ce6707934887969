use clap::Parser;

/// Batch-apply metadata tags to audio files with ffmpeg
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Directory containing the target audio files
    #[arg(short = 'd', long)]
    pub dir: Option<String>,

    /// Filename or wildcard pattern of the files to tag inside the directory. Defaults to *.mp3.
    #[arg(short = 'f', long)]
    pub filename: Option<String>,

    /// Pattern of the cover image inside the directory; the first match is embedded as cover art.
    #[arg(short = 'i', long)]
    pub img: Option<String>,

    /// Title of the song.
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Artist of the song.
    #[arg(short = 'a', long)]
    pub artist: Option<String>,

    /// Genre of the song.
    #[arg(short = 'g', long)]
    pub genre: Option<String>,

    /// Track number of the song.
    #[arg(short = 'n', long)]
    pub track: Option<String>,

    /// Album the song belongs to.
    #[arg(short = 'A', long)]
    pub album: Option<String>,

    /// Ask for the title on the terminal before processing starts (overrides --title).
    #[arg(long)]
    pub ask_title: bool,

    /// Replace whitespace with underscores and drop apostrophes in produced filenames.
    #[arg(long)]
    pub trim_names: bool,

    /// Delete each original after tagging and move its tagged copy into place.
    #[arg(short = 'c', long)]
    pub cleanup: bool,

    /// Path to a JSON file describing the full job (directory, tags, flags). CLI arguments override values in the job file.
    #[arg(long = "job", value_name = "FILE")]
    pub job: Option<String>,

    /// Write the resolved job to this file as JSON. If no file is provided, tag-job.json inside the target directory is used.
    #[arg(short = 'w', long = "write-job-file", num_args = 0..=1, value_name = "FILE")]
    pub write_job_file: Option<Option<String>>,

    /// Automatically confirm the tagging plan and proceed without prompting
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Show ffmpeg logs.
    #[arg(long)]
    pub debug: bool,

    /// Ignore ffmpeg version check.
    #[arg(long)]
    pub ignore_ffmpeg_version: bool,

    /// Check FFmpeg installation and version compatibility.
    #[arg(long)]
    pub check_ffmpeg: bool,
}

use crate::discovery::{resolve_cover, resolve_targets};
use crate::naming::copy_target;
use crate::tagging::process_file;
use crate::{
    cli::Args,
    config::Config,
    ffmpeg::{check_dependency, check_ffmpeg_installation, check_ffmpeg_version},
    job::Job,
};
use anyhow::{Result, bail};
use comfy_table::{Table, presets::UTF8_FULL};
use serde_json;
use std::{
    fs,
    io,
    io::Write,
    path::PathBuf,
};

pub fn run(args: Args) -> Result<()> {
    // Handle --check-ffmpeg command
    if args.check_ffmpeg {
        return handle_ffmpeg_check();
    }

    // Merge CLI args with the job file (if provided) and validate
    let mut config = Config::resolve(&args)?;

    check_dependency("ffmpeg")?;
    check_ffmpeg_version(args.ignore_ffmpeg_version)?;

    // Resolve the target files and the cover image
    let files = resolve_targets(&config.dir, &config.filename)?;
    println!("ℹ️ Found {} file(s) to tag", files.len());
    let cover = match &config.img {
        Some(pattern) => {
            let cover = resolve_cover(&config.dir, pattern)?;
            println!("ℹ️ Using cover image: {}", cover.display());
            Some(cover)
        }
        None => None,
    };

    // Ask for the title once, before any file is processed
    if config.ask_title {
        config.tags.title = prompt_title()?;
    }

    // --- User Confirmation ---
    let mut table = Table::new();
    table
        .set_header(vec!["File", "Tagged Copy"])
        .load_preset(UTF8_FULL);
    for file in &files {
        let output = copy_target(file, config.trim_names)?;
        table.add_row(vec![
            file.display().to_string(),
            output.display().to_string(),
        ]);
    }

    println!("\n▶️ Proposed Tagging Plan:");
    println!("{table}");

    let mut info_table = Table::new();
    info_table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Parameter", "Value"]);

    info_table
        .add_row(vec!["Directory", &config.dir.display().to_string()])
        .add_row(vec!["File Pattern", &config.filename])
        .add_row(vec![
            "Cover Image",
            &cover
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string()),
        ]);

    info_table
        .add_row(vec!["Title", config.tags.title.as_deref().unwrap_or("-")])
        .add_row(vec!["Artist", config.tags.artist.as_deref().unwrap_or("-")])
        .add_row(vec!["Genre", config.tags.genre.as_deref().unwrap_or("-")])
        .add_row(vec!["Track", config.tags.track.as_deref().unwrap_or("-")])
        .add_row(vec!["Album", config.tags.album.as_deref().unwrap_or("-")])
        .add_row(vec!["Trim Names", if config.trim_names { "yes" } else { "no" }])
        .add_row(vec!["Cleanup", if config.cleanup { "yes" } else { "no" }]);

    println!("\n▶️ Job Details:");
    println!("{info_table}");

    if config.yes {
        println!("\n--yes flag provided, proceeding without confirmation.");
    } else {
        println!("\nProceed with this plan? [y/N]");
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborting operation.");
            return Ok(());
        }
    }

    // Optionally write the job to a file (after confirmation)
    if let Some(write_job_file) = &args.write_job_file {
        let out_path = if let Some(path) = write_job_file {
            PathBuf::from(path)
        } else {
            config.dir.join("tag-job.json")
        };
        let job = Job {
            dir: Some(config.dir.display().to_string()),
            filename: Some(config.filename.clone()),
            img: config.img.clone(),
            title: config.tags.title.clone(),
            artist: config.tags.artist.clone(),
            genre: config.tags.genre.clone(),
            track: config.tags.track.clone(),
            album: config.tags.album.clone(),
            // The prompted title is already resolved above
            ask_title: None,
            trim_names: Some(config.trim_names),
            cleanup: Some(config.cleanup),
        };
        let json = serde_json::to_string_pretty(&job)?;
        let mut file = fs::File::create(&out_path)?;
        file.write_all(json.as_bytes())?;
        println!("✅ Wrote job to {}", out_path.display());
    }

    // Tag each file; a failure is reported and the run moves on
    println!("\n▶️ Tagging Files...");
    let mut failures = 0usize;
    for file in &files {
        println!("ℹ️ Adding metadata to {}", file.display());
        match process_file(file, cover.as_deref(), &config) {
            Ok(path) => println!("  ✅ Wrote {}", path.display()),
            Err(e) => {
                println!("  ❌ {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} file(s) failed.", failures, files.len());
    }
    println!("\n✅ Tagged {} file(s).", files.len());
    Ok(())
}

fn prompt_title() -> Result<Option<String>> {
    print!("Please provide a title for the song: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let title = input.trim();
    if title.is_empty() {
        Ok(None)
    } else {
        Ok(Some(title.to_string()))
    }
}

fn handle_ffmpeg_check() -> Result<()> {
    println!("🔍 Checking FFmpeg installation...\n");

    let check_result = check_ffmpeg_installation();

    // Display FFmpeg status
    if check_result.ffmpeg_available {
        if let Some(version_info) = &check_result.ffmpeg_version {
            println!("✅ FFmpeg found:");
            println!(
                "   Version: {}.{}.{}",
                version_info.major, version_info.minor, version_info.patch
            );

            if version_info.is_compatible {
                println!("   Status: ✅ Compatible (minimum required: 4.0.0)");
            } else {
                println!("   Status: ❌ Too old (minimum required: 4.0.0)");
            }
        } else {
            println!("⚠️  Could not parse FFmpeg version from output");
        }
    } else {
        let error = check_result
            .error
            .as_deref()
            .unwrap_or("FFmpeg not found in PATH");
        println!("❌ {}", error);
        println!("   Please install FFmpeg and ensure it's accessible from the command line");
        bail!("FFmpeg is required but not working: {}", error);
    }

    println!();

    // Display muxer availability
    if check_result.mp3_muxer_available {
        println!("✅ Required muxer 'mp3' is available");
    } else {
        println!("❌ Required muxer 'mp3' not found");
        println!("   This muxer is needed to write the tagged copies");
    }

    println!("\n🎉 FFmpeg check complete!");
    Ok(())
}

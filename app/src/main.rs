/*
 * // Copyright (c) Radzivon Bartoshyk 2/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
mod config;
mod error;
mod export;
mod load;
mod wall;

use crate::config::AppConfig;
use crate::export::{encode, output_file_name, safe_title, thumbnail, to_rgba_image, ExportFormat};
use crate::load::{decode_image, format_bytes, load_image, LoadedImage};
use crate::wall::{format_time, CommentDraft, NewPost, Wall};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tintforge::{
    colorize, format_hex_color, parse_hex_color, ColorScheme, PaletteColor, Rgb, TintConfig,
    ToneStyle,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Recolor photos toward a base color and keep a local wall of results.
#[derive(Parser, Debug)]
#[command(name = "tintforge")]
#[command(version, about, long_about = None)]
struct Cli {
    /// YAML config file, defaults to ./tintforge.yml when present.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Wall directory, overrides the config file.
    #[arg(long, global = true, value_name = "DIR")]
    wall_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Colorize an image and write the result next to it.
    Apply {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output path, defaults to `<name>-colorized.<ext>` beside the input.
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        tint: TintArgs,
    },
    /// Colorize an image and publish it to the wall.
    Publish {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[command(flatten)]
        tint: TintArgs,

        /// Replace an existing post instead of creating a new one.
        #[arg(long, value_name = "POST_ID")]
        id: Option<String>,

        #[command(flatten)]
        caption: CaptionArgs,
    },
    /// Colorize a published post again and replace it.
    ///
    /// Settings not given on the command line are taken from the post.
    Edit {
        #[arg(value_name = "POST_ID")]
        post_id: String,

        #[command(flatten)]
        tint: TintArgs,

        #[command(flatten)]
        caption: CaptionArgs,
    },
    /// List posts on the wall, newest first.
    Posts {
        /// Keep running and list again whenever the wall changes.
        #[arg(short, long)]
        watch: bool,

        /// How often --watch checks the wall, in milliseconds.
        #[arg(long, default_value = "1000", value_name = "MS")]
        interval: u64,
    },
    /// Comment on a post.
    Comment {
        #[arg(value_name = "POST_ID")]
        post_id: String,

        #[arg(value_name = "TEXT")]
        text: String,

        #[arg(long, value_name = "NAME", default_value = "")]
        name: String,
    },
    /// Show comments of a post, newest first.
    Comments {
        #[arg(value_name = "POST_ID")]
        post_id: String,
    },
    /// Save the full resolution image of a post.
    Export {
        #[arg(value_name = "POST_ID")]
        post_id: String,

        /// Target directory.
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },
    /// Delete a post with its images and comments.
    Remove {
        #[arg(value_name = "POST_ID")]
        post_id: String,
    },
    /// List available schemes, tones and palette colors.
    Schemes,
}

#[derive(Args, Debug, Default)]
struct TintArgs {
    /// Base color as #rrggbb, takes precedence over --palette.
    #[arg(short, long, value_name = "HEX")]
    color: Option<String>,

    /// Named base color from the palette [default: teal].
    #[arg(short, long, value_name = "NAME")]
    palette: Option<String>,

    /// Color scheme [default: single], unknown names fall back to `single`.
    #[arg(short, long, value_name = "SCHEME")]
    scheme: Option<String>,

    /// Tone [default: normal], unknown names fall back to `normal`.
    #[arg(short, long, value_name = "TONE")]
    tone: Option<String>,

    /// Blend strength in percent [default: 70].
    #[arg(short, long, value_name = "PERCENT",
        value_parser = clap::value_parser!(u8).range(0..=100))]
    intensity: Option<u8>,
}

impl TintArgs {
    fn to_config(&self) -> Result<TintConfig> {
        self.resolve(&TintConfig::default())
    }

    /// Given arguments win, everything else comes from `defaults`.
    fn resolve(&self, defaults: &TintConfig) -> Result<TintConfig> {
        let base: Rgb<u8> = match (&self.color, &self.palette) {
            (Some(hex), _) => parse_hex_color(hex)?,
            (None, Some(name)) => name.parse::<PaletteColor>()?.rgb(),
            (None, None) => defaults.base,
        };
        let scheme = match &self.scheme {
            Some(id) => {
                let scheme = ColorScheme::from_id_or_default(id);
                if scheme.id() != id.trim().to_ascii_lowercase() {
                    tracing::warn!("unknown scheme '{}', using '{}'", id, scheme);
                }
                scheme
            }
            None => defaults.scheme,
        };
        let tone = match &self.tone {
            Some(id) => {
                let tone = ToneStyle::from_id_or_default(id);
                if tone.id() != id.trim().to_ascii_lowercase() {
                    tracing::warn!("unknown tone '{}', using '{}'", id, tone);
                }
                tone
            }
            None => defaults.tone,
        };
        let intensity = self
            .intensity
            .map_or(defaults.intensity, |percent| percent as f64 / 100f64);
        Ok(TintConfig::new(base, intensity, scheme, tone)?)
    }
}

#[derive(Args, Debug, Default)]
struct CaptionArgs {
    /// Caption posted as the first comment.
    #[arg(long, value_name = "TEXT")]
    caption: Option<String>,

    /// Name shown with the caption.
    #[arg(long, value_name = "NAME", default_value = "")]
    caption_name: String,
}

impl CaptionArgs {
    fn into_draft(self) -> Option<CommentDraft> {
        let name = self.caption_name;
        self.caption.map(|text| CommentDraft { name, text })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tintforge={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    let (mut config, source) = AppConfig::load(cli.config.as_deref(), Path::new("."))
        .context("Failed to load configuration")?;
    if let Some(source) = source {
        tracing::debug!("using config {}", source.display());
    }
    if let Some(wall_dir) = cli.wall_dir {
        config.wall_dir = wall_dir;
    }

    match cli.command {
        Command::Apply {
            input,
            output,
            tint,
        } => apply(&config, &input, output, &tint),
        Command::Publish {
            input,
            tint,
            id,
            caption,
        } => publish(&config, &input, &tint, id, caption.into_draft()),
        Command::Edit {
            post_id,
            tint,
            caption,
        } => edit(&config, &post_id, &tint, caption.into_draft()),
        Command::Posts { watch, interval } => {
            list_posts(&config, watch, Duration::from_millis(interval.max(1)))
        }
        Command::Comment {
            post_id,
            text,
            name,
        } => {
            let wall = open_wall(&config)?;
            let comment = wall.add_comment(&post_id, &name, &text)?;
            println!("{} commented on {}", comment.name, post_id);
            Ok(())
        }
        Command::Comments { post_id } => {
            let wall = open_wall(&config)?;
            let post = wall
                .post(&post_id)
                .with_context(|| format!("No post with id {post_id}"))?;
            println!("{}", safe_title(&post.original_name));
            let comments = wall.comments(&post_id);
            if comments.is_empty() {
                println!("  no comments yet");
            }
            for comment in comments {
                println!(
                    "  {} [{}]: {}",
                    comment.name,
                    format_time(comment.ts),
                    comment.text
                );
            }
            Ok(())
        }
        Command::Export { post_id, output } => {
            let wall = open_wall(&config)?;
            let target = wall
                .export_post(&post_id, &output)
                .context("Failed to export post")?;
            println!("Saved {}", target.display());
            Ok(())
        }
        Command::Remove { post_id } => {
            let wall = open_wall(&config)?;
            let post = wall.remove(&post_id)?;
            println!("Removed {} ({})", post.id, safe_title(&post.original_name));
            Ok(())
        }
        Command::Schemes => {
            println!("schemes:");
            for scheme in ColorScheme::ALL {
                let p = scheme.parameters();
                println!(
                    "  {:<8} {:<10} hue {:+}, saturation x{}, contrast x{}, gamma {}, lift {}",
                    scheme.id(),
                    scheme.label(),
                    p.hue_shift,
                    p.saturation,
                    p.contrast,
                    p.gamma,
                    p.lift
                );
            }
            println!("tones:");
            for tone in ToneStyle::ALL {
                let p = tone.parameters();
                println!(
                    "  {:<8} {:<10} saturation x{}, contrast x{}",
                    tone.id(),
                    tone.label(),
                    p.saturation,
                    p.contrast
                );
            }
            println!("palette:");
            for color in PaletteColor::ALL {
                println!("  {:<8} {}", color.id(), format_hex_color(color.rgb()));
            }
            Ok(())
        }
    }
}

fn open_wall(config: &AppConfig) -> Result<Wall> {
    Wall::open(&config.wall_dir)
        .with_context(|| format!("Failed to open wall at {}", config.wall_dir.display()))
}

/// Decodes `input` and colorizes it, returns the source with the result.
fn render(
    config: &AppConfig,
    input: &Path,
    tint: &TintConfig,
) -> Result<(LoadedImage, RgbaImage)> {
    let loaded = load_image(input, config)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    tracing::info!(
        "loaded {} ({}, {}x{})",
        loaded.file_name,
        format_bytes(loaded.file_size),
        loaded.source_width,
        loaded.source_height
    );
    let rgba = render_loaded(&loaded, tint)?;
    Ok((loaded, rgba))
}

fn render_loaded(loaded: &LoadedImage, tint: &TintConfig) -> Result<RgbaImage> {
    let instant = Instant::now();
    let colorized = colorize(&loaded.pixels, tint).context("Failed to colorize")?;
    tracing::info!(
        "colorized {}x{} with {} / {} / {} / {}% in {:?}",
        colorized.width,
        colorized.height,
        format_hex_color(tint.base),
        tint.scheme.label(),
        tint.tone.label(),
        (tint.intensity * 100f64).round(),
        instant.elapsed()
    );
    Ok(to_rgba_image(colorized)?)
}

fn apply(
    config: &AppConfig,
    input: &Path,
    output: Option<PathBuf>,
    tint: &TintArgs,
) -> Result<()> {
    let tint = tint.to_config()?;
    let (loaded, rgba) = render(config, input, &tint)?;

    let format = match &output {
        Some(path) => path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(ExportFormat::from_extension)
            .unwrap_or_else(|| ExportFormat::from_source(loaded.format)),
        None => ExportFormat::from_source(loaded.format),
    };
    let target = output.unwrap_or_else(|| {
        input.with_file_name(output_file_name(&loaded.file_name, "colorized", format))
    });

    let bytes = encode(&rgba, format, config.jpeg_quality)?;
    std::fs::write(&target, bytes)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    println!("Saved {}", target.display());
    Ok(())
}

fn publish(
    config: &AppConfig,
    input: &Path,
    tint: &TintArgs,
    id: Option<String>,
    caption: Option<CommentDraft>,
) -> Result<()> {
    let tint = tint.to_config()?;
    let wall = open_wall(config)?;
    let (loaded, rgba) = render(config, input, &tint)?;
    store_post(config, &wall, &loaded, &rgba, &tint, id, caption)
}

/// Recolors the stored image of a post, keeping its id and original name.
fn edit(
    config: &AppConfig,
    post_id: &str,
    tint: &TintArgs,
    caption: Option<CommentDraft>,
) -> Result<()> {
    let wall = open_wall(config)?;
    let (post, bytes) = wall
        .load_full(post_id)
        .with_context(|| format!("Failed to load post {post_id}"))?;
    let tint = tint.resolve(&post.tint_config())?;

    let mut loaded = decode_image(&bytes, &wall.full_image_path(&post), config)
        .with_context(|| format!("Failed to decode post {post_id}"))?;
    loaded.file_name = post.original_name;
    let rgba = render_loaded(&loaded, &tint)?;
    store_post(config, &wall, &loaded, &rgba, &tint, Some(post.id), caption)
}

fn store_post(
    config: &AppConfig,
    wall: &Wall,
    loaded: &LoadedImage,
    rgba: &RgbaImage,
    tint: &TintConfig,
    id: Option<String>,
    caption: Option<CommentDraft>,
) -> Result<()> {
    let format = ExportFormat::from_source(loaded.format);
    let full = encode(rgba, format, config.jpeg_quality)?;
    let thumb = encode(
        &thumbnail(rgba, config.thumb_max_width, config.thumb_max_height),
        format,
        config.jpeg_quality,
    )?;

    let post = wall
        .publish(NewPost {
            id,
            original_name: &loaded.file_name,
            width: rgba.width(),
            height: rgba.height(),
            config: tint,
            format,
            full,
            thumb,
            caption,
        })
        .context("Failed to publish")?;
    println!("Published {} as {}", safe_title(&post.original_name), post.id);
    Ok(())
}

fn list_posts(config: &AppConfig, watch: bool, interval: Duration) -> Result<()> {
    let wall = open_wall(config)?;
    let mut revision = wall.revision();
    print_posts(&wall);
    if !watch {
        return Ok(());
    }
    while let Some(next) = wall.wait_for_change(revision, interval, None) {
        tracing::debug!("wall changed, revision {} -> {}", revision, next);
        revision = next;
        println!();
        print_posts(&wall);
    }
    Ok(())
}

fn print_posts(wall: &Wall) {
    let posts = wall.posts();
    if posts.is_empty() {
        println!("The wall is empty.");
        return;
    }
    for post in posts {
        let comments = wall.comments(&post.id).len();
        println!(
            "{}  {}  {} | {}x{} | {} {} {} {}% | {} comment(s)",
            post.id,
            safe_title(&post.original_name),
            format_time(post.created_at),
            post.width,
            post.height,
            post.color_hex,
            post.scheme,
            post.tone,
            post.intensity,
            comments
        );
        tracing::debug!("thumbnail {}", wall.thumbnail_path(&post).display());
    }
}

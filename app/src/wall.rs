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
use crate::error::{AppError, Result};
use crate::export::{output_file_name, ExportFormat};
use chrono::{Local, TimeZone, Utc};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tintforge::{
    format_hex_color, parse_hex_color, ColorScheme, PaletteColor, TintConfig, ToneStyle,
};

const INDEX_FILE: &str = "posts.json";
const IMAGES_DIR: &str = "images";
const COMMENTS_DIR: &str = "comments";

pub const MAX_COMMENT_NAME_CHARS: usize = 24;
pub const MAX_COMMENT_TEXT_CHARS: usize = 280;
pub const ANONYMOUS: &str = "anonymous";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    /// Unix time, milliseconds
    pub created_at: i64,
    pub original_name: String,
    pub width: u32,
    pub height: u32,
    pub scheme: ColorScheme,
    pub tone: ToneStyle,
    /// Percent, `0..=100`
    pub intensity: u8,
    pub color_hex: String,
    pub full_ext: String,
}

impl Post {
    /// Settings the post was published with.
    ///
    /// An unreadable stored color falls back to the default palette color.
    pub fn tint_config(&self) -> TintConfig {
        let base = parse_hex_color(&self.color_hex).unwrap_or_else(|_| {
            tracing::warn!("post {} has unreadable color '{}'", self.id, self.color_hex);
            PaletteColor::default().rgb()
        });
        TintConfig {
            base,
            intensity: (self.intensity.min(100) as f64) / 100f64,
            scheme: self.scheme,
            tone: self.tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub text: String,
    pub ts: i64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct WallIndex {
    revision: u64,
    posts: Vec<Post>,
}

/// Everything needed to publish a colorized image
pub struct NewPost<'a> {
    /// Replaces the post with this id, if any
    pub id: Option<String>,
    pub original_name: &'a str,
    pub width: u32,
    pub height: u32,
    pub config: &'a TintConfig,
    pub format: ExportFormat,
    pub full: Vec<u8>,
    pub thumb: Vec<u8>,
    /// Posted as the first comment
    pub caption: Option<CommentDraft>,
}

#[derive(Debug, Clone, Default)]
pub struct CommentDraft {
    pub name: String,
    pub text: String,
}

/// File backed wall of published images and their comments.
///
/// Layout under `root`: `posts.json`, `images/{id}.{ext}`,
/// `images/{id}-thumb.{ext}`, `comments/{id}.json`. Lists are kept newest first.
pub struct Wall {
    root: PathBuf,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn random_suffix() -> String {
    format!("{:x}", rand::thread_rng().gen::<u64>())
}

/// Post ids name files under the wall, so only `[A-Za-z0-9_-]+` is accepted.
pub fn is_valid_post_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn check_post_id(id: &str) -> Result<()> {
    if is_valid_post_id(id) {
        Ok(())
    } else {
        Err(AppError::InvalidPostId(id.to_string()))
    }
}

/// `YYYY-MM-DD HH:MM` in local time
pub fn format_time(ts: i64) -> String {
    match Local.timestamp_millis_opt(ts).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn read_list<T: DeserializeOwned + Default>(path: &Path) -> T {
    match fs::read(path) {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("ignoring unreadable {}: {}", path.display(), e);
                T::default()
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => T::default(),
        Err(e) => {
            tracing::warn!("ignoring unreadable {}: {}", path.display(), e);
            T::default()
        }
    }
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(AppError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
        _ => Ok(()),
    }
}

impl Wall {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for dir in [root.join(IMAGES_DIR), root.join(COMMENTS_DIR)] {
            fs::create_dir_all(&dir).map_err(AppError::io(&dir))?;
        }
        Ok(Self { root })
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    fn comments_path(&self, post_id: &str) -> PathBuf {
        self.root.join(COMMENTS_DIR).join(format!("{post_id}.json"))
    }

    fn image_path(&self, post_id: &str, ext: &str) -> PathBuf {
        self.root.join(IMAGES_DIR).join(format!("{post_id}.{ext}"))
    }

    fn thumb_path(&self, post_id: &str, ext: &str) -> PathBuf {
        self.root
            .join(IMAGES_DIR)
            .join(format!("{post_id}-thumb.{ext}"))
    }

    fn read_index(&self) -> WallIndex {
        read_list(&self.index_path())
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_vec_pretty(value)?;
        fs::write(path, json).map_err(AppError::io(path))
    }

    /// Bumps the revision and stores the index, returns the new revision
    fn write_index(&self, mut index: WallIndex) -> Result<u64> {
        index.revision += 1;
        Self::write_json(&self.index_path(), &index)?;
        Ok(index.revision)
    }

    /// Bumped by every publish, removal and comment, from any process.
    pub fn revision(&self) -> u64 {
        self.read_index().revision
    }

    /// Polls the stored revision until it differs from `seen`.
    ///
    /// Returns the new revision, or `None` once `timeout` passes without a change.
    pub fn wait_for_change(
        &self,
        seen: u64,
        interval: Duration,
        timeout: Option<Duration>,
    ) -> Option<u64> {
        let started = Instant::now();
        loop {
            let revision = self.revision();
            if revision != seen {
                return Some(revision);
            }
            if timeout.is_some_and(|timeout| started.elapsed() >= timeout) {
                return None;
            }
            thread::sleep(interval);
        }
    }

    pub fn posts(&self) -> Vec<Post> {
        self.read_index().posts
    }

    pub fn post(&self, post_id: &str) -> Option<Post> {
        self.posts().into_iter().find(|post| post.id == post_id)
    }

    /// Stores images and metadata, the post moves to the front of the wall.
    pub fn publish(&self, new_post: NewPost<'_>) -> Result<Post> {
        let id = new_post
            .id
            .unwrap_or_else(|| format!("p_{}_{}", now_millis(), random_suffix()));
        check_post_id(&id)?;
        let ext = new_post.format.extension();

        let mut index = self.read_index();
        if let Some(previous) = index.posts.iter().find(|post| post.id == id) {
            if previous.full_ext != ext {
                remove_if_present(&self.image_path(&id, &previous.full_ext))?;
                remove_if_present(&self.thumb_path(&id, &previous.full_ext))?;
            }
        }

        let full_path = self.image_path(&id, ext);
        fs::write(&full_path, &new_post.full).map_err(AppError::io(&full_path))?;
        let thumb_path = self.thumb_path(&id, ext);
        fs::write(&thumb_path, &new_post.thumb).map_err(AppError::io(&thumb_path))?;

        let post = Post {
            id: id.clone(),
            created_at: now_millis(),
            original_name: new_post.original_name.to_string(),
            width: new_post.width,
            height: new_post.height,
            scheme: new_post.config.scheme,
            tone: new_post.config.tone,
            intensity: (new_post.config.intensity * 100f64).round() as u8,
            color_hex: format_hex_color(new_post.config.base),
            full_ext: ext.to_string(),
        };
        index.posts.retain(|existing| existing.id != id);
        index.posts.insert(0, post.clone());
        let revision = self.write_index(index)?;
        tracing::info!("published {} (revision {})", id, revision);

        if let Some(caption) = new_post.caption {
            if !caption.text.trim().is_empty() {
                self.add_comment(&id, &caption.name, &caption.text)?;
            }
        }
        Ok(post)
    }

    /// Full resolution encoding of a post
    pub fn load_full(&self, post_id: &str) -> Result<(Post, Vec<u8>)> {
        check_post_id(post_id)?;
        let post = self
            .post(post_id)
            .ok_or_else(|| AppError::UnknownPost(post_id.to_string()))?;
        let path = self.image_path(post_id, &post.full_ext);
        match fs::read(&path) {
            Ok(bytes) => Ok((post, bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::MissingPostImage(post_id.to_string()))
            }
            Err(e) => Err(AppError::Io { path, source: e }),
        }
    }

    pub fn full_image_path(&self, post: &Post) -> PathBuf {
        self.image_path(&post.id, &post.full_ext)
    }

    pub fn thumbnail_path(&self, post: &Post) -> PathBuf {
        self.thumb_path(&post.id, &post.full_ext)
    }

    /// Copies the full image into `dir` as `{base}-posted.{ext}`
    pub fn export_post(&self, post_id: &str, dir: &Path) -> Result<PathBuf> {
        let (post, bytes) = self.load_full(post_id)?;
        let name = output_file_name(
            &post.original_name,
            "posted",
            ExportFormat::from_extension(&post.full_ext),
        );
        let target = dir.join(name);
        fs::write(&target, bytes).map_err(AppError::io(&target))?;
        Ok(target)
    }

    pub fn remove(&self, post_id: &str) -> Result<Post> {
        check_post_id(post_id)?;
        let mut index = self.read_index();
        let position = index
            .posts
            .iter()
            .position(|post| post.id == post_id)
            .ok_or_else(|| AppError::UnknownPost(post_id.to_string()))?;
        let post = index.posts.remove(position);
        let revision = self.write_index(index)?;

        remove_if_present(&self.image_path(post_id, &post.full_ext))?;
        remove_if_present(&self.thumb_path(post_id, &post.full_ext))?;
        remove_if_present(&self.comments_path(post_id))?;

        tracing::info!("removed {} (revision {})", post_id, revision);
        Ok(post)
    }

    /// Newest first
    pub fn comments(&self, post_id: &str) -> Vec<Comment> {
        if !is_valid_post_id(post_id) {
            return Vec::new();
        }
        read_list(&self.comments_path(post_id))
    }

    pub fn add_comment(&self, post_id: &str, name: &str, text: &str) -> Result<Comment> {
        check_post_id(post_id)?;
        if self.post(post_id).is_none() {
            return Err(AppError::UnknownPost(post_id.to_string()));
        }
        let text: String = text.trim().chars().take(MAX_COMMENT_TEXT_CHARS).collect();
        if text.is_empty() {
            return Err(AppError::EmptyComment);
        }
        let name: String = name.trim().chars().take(MAX_COMMENT_NAME_CHARS).collect();
        let name = if name.is_empty() {
            ANONYMOUS.to_string()
        } else {
            name
        };

        let ts = now_millis();
        let comment = Comment {
            id: format!("{}-{}", ts, random_suffix()),
            name,
            text,
            ts,
        };
        let mut comments = self.comments(post_id);
        comments.insert(0, comment.clone());
        Self::write_json(&self.comments_path(post_id), &comments)?;

        let revision = self.write_index(self.read_index())?;
        tracing::debug!("comment on {} (revision {})", post_id, revision);
        Ok(comment)
    }
}

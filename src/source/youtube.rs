//! YouTube transcript source.
//!
//! Reads the caption tracks a video offers through yt-dlp, picks one in the preferred
//! languages and downloads it in json3 format. Uploaded captions win over automatic ones, and
//! machine-translated automatic tracks are never used. The transcript is flattened into plain
//! text, one caption entry per line.

use super::{ContentSource, SourceKind, SourceText};
use crate::config::SourceSettings;
use crate::error::{RestyleError, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Caption formats yt-dlp reports for one language.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionFormat {
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub url: String,
}

/// The parts of yt-dlp's video metadata used to pick a transcript.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub title: Option<String>,
    /// Captions uploaded by the channel, keyed by language code.
    #[serde(default)]
    pub subtitles: HashMap<String, Vec<CaptionFormat>>,
    /// Speech-recognition captions and their machine translations, keyed by language code.
    #[serde(default)]
    pub automatic_captions: HashMap<String, Vec<CaptionFormat>>,
}

/// A caption track chosen for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    pub language: String,
    pub automatic: bool,
    pub url: String,
}

/// Transcript source for YouTube videos.
pub struct YoutubeTranscriptSource {
    video_id_regex: Regex,
    /// Preferred transcript languages, most preferred first.
    languages: Vec<String>,
    timeout: Duration,
    user_agent: String,
}

impl YoutubeTranscriptSource {
    pub fn new(settings: &SourceSettings) -> Self {
        // Matches various YouTube URL formats and bare video IDs
        let video_id_regex = Regex::new(
            r"(?x)
            (?:
                # Full YouTube URLs
                (?:https?://)?
                (?:www\.|m\.)?
                (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/|youtube\.com/v/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            # Bare video ID (11 characters)
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex");

        Self {
            video_id_regex,
            languages: settings.transcript_languages.clone(),
            timeout: Duration::from_secs(settings.request_timeout_seconds),
            user_agent: settings.user_agent.clone(),
        }
    }

    /// Extract video ID from a YouTube URL or bare ID.
    pub fn extract_video_id(&self, input: &str) -> Option<String> {
        let caps = self.video_id_regex.captures(input.trim())?;

        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }

    /// Ask yt-dlp for the video's metadata, including its caption tracks.
    #[instrument(skip(self))]
    async fn fetch_video_info(&self, video_id: &str) -> Result<VideoInfo> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        info!("Fetching caption tracks for {}", video_id);

        let output = tokio::process::Command::new("yt-dlp")
            .arg("--skip-download")
            .arg("--dump-single-json")
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg(&url)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RestyleError::ToolNotFound("yt-dlp".to_string())
                } else {
                    RestyleError::ToolFailed(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RestyleError::Fetch(format!(
                "Video {} not found or unavailable: {}",
                video_id,
                stderr.trim()
            )));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }

    /// Download a caption track and flatten it into text.
    #[instrument(skip(self, track), fields(language = %track.language, automatic = track.automatic))]
    pub async fn fetch_track(&self, track: &CaptionTrack) -> Result<String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| RestyleError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        let response = client
            .get(&track.url)
            .send()
            .await
            .map_err(|e| RestyleError::Fetch(format!("Could not download captions: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RestyleError::Fetch(format!(
                "HTTP {} while downloading '{}' captions",
                status, track.language
            )));
        }

        let content = response.text().await?;
        parse_json3_transcript(&content)
    }
}

impl Default for YoutubeTranscriptSource {
    fn default() -> Self {
        Self::new(&SourceSettings::default())
    }
}

#[async_trait]
impl ContentSource for YoutubeTranscriptSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Transcript
    }

    fn can_handle(&self, url: &url::Url) -> bool {
        url.host_str()
            .map(|host| is_host_or_subdomain(host, "youtube.com") || is_host_or_subdomain(host, "youtu.be"))
            .unwrap_or(false)
    }

    async fn fetch(&self, url: &url::Url) -> Result<SourceText> {
        let video_id = self.extract_video_id(url.as_str()).ok_or_else(|| {
            RestyleError::UnsupportedSource(format!("No YouTube video ID in {}", url))
        })?;

        let info = self.fetch_video_info(&video_id).await?;
        let track = select_track(&info, &self.languages).ok_or_else(|| {
            RestyleError::ContentEmpty(format!(
                "no transcript in [{}] for video {}",
                self.languages.join(", "),
                video_id
            ))
        })?;

        let text = self.fetch_track(&track).await?;
        info!(
            "Using '{}' {} transcript ({} chars)",
            track.language,
            if track.automatic { "automatic" } else { "uploaded" },
            text.chars().count()
        );

        SourceText::new(SourceKind::Transcript, text)
            .with_title(info.title)
            .ensure_not_empty(url.as_str())
    }
}

fn is_host_or_subdomain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Pick the caption track to use for the first preferred language that has one.
///
/// For each language, an uploaded track is preferred over an automatic one. Automatic tracks
/// that are machine translations of another language are skipped; yt-dlp may list the
/// untranslated speech-recognition track under `<lang>-orig`.
pub fn select_track(info: &VideoInfo, languages: &[String]) -> Option<CaptionTrack> {
    for lang in languages {
        if let Some(url) = info.subtitles.get(lang).and_then(|f| json3_url(f, false)) {
            return Some(CaptionTrack {
                language: lang.clone(),
                automatic: false,
                url,
            });
        }

        let orig = format!("{}-orig", lang);
        let automatic = [lang.as_str(), orig.as_str()]
            .into_iter()
            .filter_map(|key| info.automatic_captions.get(key))
            .find_map(|f| json3_url(f, true));
        if let Some(url) = automatic {
            return Some(CaptionTrack {
                language: lang.clone(),
                automatic: true,
                url,
            });
        }

        debug!("No usable '{}' transcript", lang);
    }
    None
}

/// URL of the json3 format, optionally rejecting translated tracks.
fn json3_url(formats: &[CaptionFormat], skip_translated: bool) -> Option<String> {
    formats
        .iter()
        .filter(|f| f.ext == "json3" && !f.url.is_empty())
        .find(|f| !(skip_translated && is_translated(&f.url)))
        .map(|f| f.url.clone())
}

fn is_translated(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| u.query_pairs().any(|(key, _)| key == "tlang"))
        .unwrap_or_else(|_| url.contains("tlang="))
}

#[derive(Debug, Deserialize)]
struct Json3Transcript {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(default)]
    segs: Vec<Json3Segment>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

/// Flatten a json3 subtitle file into text, one non-empty caption entry per line.
pub fn parse_json3_transcript(json: &str) -> Result<String> {
    let transcript: Json3Transcript = serde_json::from_str(json)?;

    let lines: Vec<String> = transcript
        .events
        .iter()
        .map(|event| {
            event
                .segs
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>()
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect();

    Ok(lines.join("\n"))
}

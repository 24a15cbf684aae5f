use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Top-level folder inside the public bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFolder {
    Profile,
    Resume,
    Experience,
    Education,
    Projects,
}

impl AssetFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetFolder::Profile => "profile",
            AssetFolder::Resume => "resume",
            AssetFolder::Experience => "experience",
            AssetFolder::Education => "education",
            AssetFolder::Projects => "projects",
        }
    }

    /// Only the résumé slot takes documents; everything else is an image.
    pub fn accepts_documents(&self) -> bool {
        matches!(self, AssetFolder::Resume)
    }
}

impl fmt::Display for AssetFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown asset folder: {0}")]
pub struct UnknownFolder(pub String);

impl FromStr for AssetFolder {
    type Err = UnknownFolder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "profile" => Ok(AssetFolder::Profile),
            "resume" => Ok(AssetFolder::Resume),
            "experience" => Ok(AssetFolder::Experience),
            "education" => Ok(AssetFolder::Education),
            "projects" => Ok(AssetFolder::Projects),
            other => Err(UnknownFolder(other.to_string())),
        }
    }
}

static KEY_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// `{folder}/{millis}-{seq}-{rand6}.{ext}`. The process-wide sequence keeps
/// two uploads in the same millisecond apart even if the random parts collide.
pub fn storage_key(folder: AssetFolder, extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let seq = KEY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();

    format!("{}/{}-{}-{}.{}", folder, millis, seq, suffix, extension)
}

pub fn public_url_marker(bucket: &str) -> String {
    format!("/storage/v1/object/public/{}/", bucket)
}

pub fn public_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}{}{}",
        base_url.trim_end_matches('/'),
        public_url_marker(bucket),
        key
    )
}

/// Maps a public URL issued by `base_url` for `bucket` back to its storage
/// key. Anything else (external hosts, other projects, other buckets) yields
/// `None`.
pub fn key_from_public_url(url: &str, base_url: &str, bucket: &str) -> Option<String> {
    let prefix = public_url(base_url, bucket, "");
    let rest = url.strip_prefix(&prefix)?;
    let key = rest.split(['?', '#']).next().unwrap_or_default();

    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

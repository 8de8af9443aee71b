//! Media kind classification.

/// Kind of media content, derived from the file extension.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum MediaKind {
    /// Still image (JPEG, PNG, HEIC, GIF)
    #[display("image")]
    Image,
    /// Video clip (MP4, MOV, M4V)
    #[display("video")]
    Video,
    /// Anything the viewers do not recognize
    #[display("other")]
    Other,
}

impl MediaKind {
    /// Classify a file extension, case-insensitively.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "heic" | "gif" => MediaKind::Image,
            "mp4" | "mov" | "m4v" => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }

    /// Classify a file name by its extension.
    pub fn from_file_name(file_name: &str) -> Self {
        file_name
            .rsplit_once('.')
            .map(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(MediaKind::Other)
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Other => "other",
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            "other" => Ok(MediaKind::Other),
            _ => Err(format!("Unknown media kind: {}", s)),
        }
    }
}

//! The explicit application state behind the form.

use std::fmt;

use super::gallery::GalleryImage;
use super::request::AspectRatio;

/// One uploaded image, held in memory until the slot is cleared. Bytes stay
/// raw here; base64 happens at the wire boundary.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Identity of an upload slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    Single,
    FaceSource,
    FaceTarget,
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Single => "an uploaded image",
            Self::FaceSource => "a source face image",
            Self::FaceTarget => "a target image",
        };
        f.write_str(name)
    }
}

/// A single-image holding area. The preview/drop-zone toggle is derived:
/// preview is shown exactly when the slot is occupied.
#[derive(Debug, Default)]
pub struct UploadSlot {
    image: Option<UploadedImage>,
}

impl UploadSlot {
    /// Store a replacement image wholesale.
    pub fn set(&mut self, image: UploadedImage) {
        self.image = Some(image);
    }

    /// Discard the stored image, returning to the drop-zone state.
    pub fn clear(&mut self) {
        self.image = None;
    }

    #[must_use]
    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }
}

/// The exclusive operation the form is configured to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudioMode {
    #[default]
    TextToImage,
    ImageEdit,
    ImageUpscale,
    FaceSwap,
}

/// Form sections that show or hide with the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Prompt,
    NegativePrompt,
    AspectRatio,
    Style,
    SingleUpload,
    FaceSwapUploads,
}

impl StudioMode {
    pub const ALL: [Self; 4] = [
        Self::TextToImage,
        Self::ImageEdit,
        Self::ImageUpscale,
        Self::FaceSwap,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TextToImage => "Text to Image",
            Self::ImageEdit => "Edit Image",
            Self::ImageUpscale => "Upscale",
            Self::FaceSwap => "Face Swap",
        }
    }

    /// The fixed table of sections visible in this mode.
    #[must_use]
    pub const fn sections(&self) -> &'static [Section] {
        match self {
            Self::TextToImage => &[
                Section::Prompt,
                Section::NegativePrompt,
                Section::AspectRatio,
                Section::Style,
            ],
            Self::ImageEdit => &[Section::Prompt, Section::SingleUpload],
            Self::ImageUpscale => &[Section::SingleUpload],
            Self::FaceSwap => &[Section::FaceSwapUploads],
        }
    }

    #[must_use]
    pub fn shows(&self, section: Section) -> bool {
        self.sections().contains(&section)
    }
}

/// All mutable state of the studio. Mutation goes through the operations
/// below; nothing here is process-global.
#[derive(Debug, Default)]
pub struct StudioState {
    mode: StudioMode,
    single: UploadSlot,
    face_source: UploadSlot,
    face_target: UploadSlot,
    pub prompt: String,
    pub negative_prompt: String,
    pub aspect_ratio: AspectRatio,
    pub style: Option<String>,
    pub gallery: Vec<GalleryImage>,
    in_flight: bool,
}

impl StudioState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn mode(&self) -> StudioMode {
        self.mode
    }

    /// Switch the form to a new mode and invalidate slots that are not
    /// relevant to it, so a stale upload is never silently reused.
    pub fn set_mode(&mut self, mode: StudioMode) {
        self.mode = mode;
        match mode {
            StudioMode::TextToImage => {
                self.single.clear();
                self.face_source.clear();
                self.face_target.clear();
            }
            StudioMode::ImageEdit | StudioMode::ImageUpscale => {
                self.face_source.clear();
                self.face_target.clear();
            }
            StudioMode::FaceSwap => {
                self.single.clear();
            }
        }
    }

    #[must_use]
    pub fn slot(&self, id: SlotId) -> &UploadSlot {
        match id {
            SlotId::Single => &self.single,
            SlotId::FaceSource => &self.face_source,
            SlotId::FaceTarget => &self.face_target,
        }
    }

    pub fn slot_mut(&mut self, id: SlotId) -> &mut UploadSlot {
        match id {
            SlotId::Single => &mut self.single,
            SlotId::FaceSource => &mut self.face_source,
            SlotId::FaceTarget => &mut self.face_target,
        }
    }

    /// Whether a generation cycle is currently pending. A second submission
    /// is rejected while this is set.
    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Mark the start of a generation cycle. Returns false when one is
    /// already pending.
    pub fn begin_cycle(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Mark the end of a generation cycle. Called on every exit path.
    pub fn finish_cycle(&mut self) {
        self.in_flight = false;
    }

    /// Reset the whole form: gallery, all three slots, both prompt fields.
    pub fn clear_all(&mut self) {
        self.gallery.clear();
        self.single.clear();
        self.face_source.clear();
        self.face_target.clear();
        self.prompt.clear();
        self.negative_prompt.clear();
    }
}

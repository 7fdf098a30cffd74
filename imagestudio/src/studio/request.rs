//! Request building: pure validation of the form state into a
//! [`GenerationRequest`] ready for dispatch.

use super::state::{SlotId, StudioMode, StudioState, UploadedImage};
use super::StudioError;

/// The four aspect ratios offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    Portrait,
    Landscape,
    Widescreen,
}

impl AspectRatio {
    pub const ALL: [Self; 4] = [
        Self::Square,
        Self::Portrait,
        Self::Landscape,
        Self::Widescreen,
    ];

    /// The wire value, e.g. `"1:1"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "3:4",
            Self::Landscape => "4:3",
            Self::Widescreen => "16:9",
        }
    }
}

/// Style tags selectable for text-to-image generation.
pub const STYLE_PRESETS: &[&str] = &[
    "Photorealistic",
    "Anime",
    "Oil painting",
    "Watercolor",
    "Cyberpunk",
    "Pixel art",
    "3D render",
    "Minimalist",
];

/// Number of images requested per text-to-image cycle.
pub const IMAGE_COUNT: i32 = 4;

/// Canonical instruction substituted for the prompt in upscale mode.
pub const UPSCALE_INSTRUCTION: &str = "Upscale this image to a significantly higher resolution, \
enhancing detail and sharpness without altering its content or style.";

/// Fixed instruction used for face swapping; the prompt input is ignored in
/// that mode.
pub const FACE_SWAP_INSTRUCTION: &str = "Extract the face from the first image and composite it \
onto the most prominent subject of the second image. Match the lighting, skin tone and angle of \
the target scene so the result looks natural.";

/// One validated, ready-to-dispatch request, keyed by mode.
#[derive(Debug)]
pub enum GenerationRequest {
    TextToImage {
        prompt: String,
        negative_prompt: String,
        aspect_ratio: AspectRatio,
    },
    ImageEdit {
        image: UploadedImage,
        prompt: String,
    },
    ImageUpscale {
        image: UploadedImage,
    },
    FaceSwap {
        source: UploadedImage,
        target: UploadedImage,
    },
}

/// Compose the final text-to-image prompt: the style tag is prefixed with a
/// comma when one is selected, otherwise the prompt is used verbatim.
#[must_use]
pub fn final_prompt(style: Option<&str>, prompt: &str) -> String {
    match style {
        Some(style) if !style.is_empty() => format!("{style}, {prompt}"),
        _ => prompt.to_string(),
    }
}

/// Validate the current form state and build the request for its mode.
/// Fails without any side effect when a required image or prompt is missing,
/// so no remote call can happen on invalid input.
///
/// # Errors
/// `MissingImage` for an empty required slot, `EmptyPrompt` for a blank
/// required prompt.
pub fn build_request(state: &StudioState) -> Result<GenerationRequest, StudioError> {
    match state.mode() {
        StudioMode::TextToImage => {
            let prompt = state.prompt.trim();
            if prompt.is_empty() {
                return Err(StudioError::EmptyPrompt);
            }
            Ok(GenerationRequest::TextToImage {
                prompt: final_prompt(state.style.as_deref(), prompt),
                negative_prompt: state.negative_prompt.trim().to_string(),
                aspect_ratio: state.aspect_ratio,
            })
        }
        StudioMode::ImageEdit => {
            let image = require_image(state, SlotId::Single)?;
            let prompt = state.prompt.trim();
            if prompt.is_empty() {
                return Err(StudioError::EmptyPrompt);
            }
            Ok(GenerationRequest::ImageEdit {
                image,
                prompt: prompt.to_string(),
            })
        }
        StudioMode::ImageUpscale => {
            let image = require_image(state, SlotId::Single)?;
            Ok(GenerationRequest::ImageUpscale { image })
        }
        StudioMode::FaceSwap => {
            let source = require_image(state, SlotId::FaceSource)?;
            let target = require_image(state, SlotId::FaceTarget)?;
            Ok(GenerationRequest::FaceSwap { source, target })
        }
    }
}

fn require_image(state: &StudioState, id: SlotId) -> Result<UploadedImage, StudioError> {
    state
        .slot(id)
        .image()
        .cloned()
        .ok_or(StudioError::MissingImage(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(state: &mut StudioState, id: SlotId) {
        state.slot_mut(id).set(UploadedImage {
            data: vec![7, 8, 9],
            mime_type: "image/png".into(),
        });
    }

    #[test]
    fn final_prompt_with_and_without_style() {
        assert_eq!(final_prompt(None, "a red bicycle"), "a red bicycle");
        assert_eq!(
            final_prompt(Some("Oil painting"), "a red bicycle"),
            "Oil painting, a red bicycle"
        );
    }

    #[test]
    fn blank_prompt_fails_text_to_image() {
        let mut state = StudioState::new();
        state.prompt = "   ".into();
        let err = build_request(&state).unwrap_err();
        assert!(matches!(err, StudioError::EmptyPrompt));
    }

    #[test]
    fn text_to_image_carries_form_fields() {
        let mut state = StudioState::new();
        state.prompt = " a red bicycle ".into();
        state.negative_prompt = "blurry".into();
        state.aspect_ratio = AspectRatio::Widescreen;
        match build_request(&state).unwrap() {
            GenerationRequest::TextToImage {
                prompt,
                negative_prompt,
                aspect_ratio,
            } => {
                assert_eq!(prompt, "a red bicycle");
                assert_eq!(negative_prompt, "blurry");
                assert_eq!(aspect_ratio, AspectRatio::Widescreen);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn edit_requires_image_then_prompt() {
        let mut state = StudioState::new();
        state.set_mode(StudioMode::ImageEdit);
        state.prompt = "make the sky purple".into();
        let err = build_request(&state).unwrap_err();
        assert!(matches!(err, StudioError::MissingImage(SlotId::Single)));

        png(&mut state, SlotId::Single);
        state.prompt = "  ".into();
        let err = build_request(&state).unwrap_err();
        assert!(matches!(err, StudioError::EmptyPrompt));
    }

    #[test]
    fn upscale_ignores_prompt() {
        let mut state = StudioState::new();
        state.set_mode(StudioMode::ImageUpscale);
        png(&mut state, SlotId::Single);
        assert!(matches!(
            build_request(&state).unwrap(),
            GenerationRequest::ImageUpscale { .. }
        ));
    }

    #[test]
    fn face_swap_requires_both_slots() {
        let mut state = StudioState::new();
        state.set_mode(StudioMode::FaceSwap);
        let err = build_request(&state).unwrap_err();
        assert!(matches!(err, StudioError::MissingImage(SlotId::FaceSource)));

        png(&mut state, SlotId::FaceSource);
        let err = build_request(&state).unwrap_err();
        assert!(matches!(err, StudioError::MissingImage(SlotId::FaceTarget)));

        png(&mut state, SlotId::FaceTarget);
        assert!(matches!(
            build_request(&state).unwrap(),
            GenerationRequest::FaceSwap { .. }
        ));
    }

    #[test]
    fn style_presets_include_oil_painting() {
        assert!(STYLE_PRESETS.contains(&"Oil painting"));
    }
}

//! The egui single-page form. All remote work runs on a tokio runtime owned
//! by the app; results come back over a channel and are applied on the next
//! frame.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::client::Client;
use crate::studio::dispatch::{run_cycle, StudioConfig};
use crate::studio::encode::encode_image_file;
use crate::studio::gallery::{download_filename, GalleryImage};
use crate::studio::request::{build_request, AspectRatio, STYLE_PRESETS};
use crate::studio::state::{Section, SlotId, StudioMode, StudioState, UploadedImage};
use crate::studio::StudioError;

/// Messages sent from background tasks back to the UI thread.
enum WorkerEvent {
    SlotLoaded { slot: SlotId, image: UploadedImage },
    SlotFailed { message: String },
    CycleFinished(Result<Vec<GalleryImage>, StudioError>),
}

pub struct StudioApp {
    state: StudioState,
    client: Option<Client>,
    config: StudioConfig,
    runtime: tokio::runtime::Runtime,
    tx: Sender<WorkerEvent>,
    rx: Receiver<WorkerEvent>,
    error_banner: Option<String>,
    // Preview URIs change on every load so egui's image cache never shows a
    // stale texture for a replaced upload.
    slot_seq: HashMap<SlotId, u64>,
    gallery_seq: u64,
    next_seq: u64,
}

impl StudioApp {
    /// Build the app. A missing credential is not fatal here; the form opens
    /// with a banner and generation stays disabled until one is configured.
    ///
    /// # Errors
    /// Returns an error when the tokio runtime cannot be started.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self, crate::Error> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (tx, rx) = channel();

        let (client, error_banner) = match Client::from_env() {
            Ok(client) => (Some(client), None),
            Err(err) => {
                tracing::warn!(error = %err, "no API credential configured");
                (
                    None,
                    Some("Set GEMINI_API_KEY or GOOGLE_API_KEY and restart.".to_string()),
                )
            }
        };

        Ok(Self {
            state: StudioState::new(),
            client,
            config: StudioConfig::from_env(),
            runtime,
            tx,
            rx,
            error_banner,
            slot_seq: HashMap::new(),
            gallery_seq: 0,
            next_seq: 0,
        })
    }

    fn apply_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                WorkerEvent::SlotLoaded { slot, image } => {
                    self.next_seq += 1;
                    self.slot_seq.insert(slot, self.next_seq);
                    self.state.slot_mut(slot).set(image);
                    self.error_banner = None;
                }
                WorkerEvent::SlotFailed { message } => {
                    self.error_banner = Some(message);
                }
                WorkerEvent::CycleFinished(result) => {
                    self.state.finish_cycle();
                    match result {
                        Ok(images) => {
                            self.gallery_seq += 1;
                            self.state.gallery = images;
                            self.error_banner = None;
                        }
                        Err(err) => {
                            tracing::error!(error = %err, "generation cycle failed");
                            self.error_banner = Some(err.user_message());
                        }
                    }
                }
            }
        }
    }

    /// Route files dropped onto the window to the slot the current mode
    /// expects. Text-to-image has no upload target, so drops are ignored.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        for path in dropped {
            let target = match self.state.mode() {
                StudioMode::TextToImage => None,
                StudioMode::ImageEdit | StudioMode::ImageUpscale => Some(SlotId::Single),
                StudioMode::FaceSwap => {
                    if self.state.slot(SlotId::FaceSource).is_empty() {
                        Some(SlotId::FaceSource)
                    } else {
                        Some(SlotId::FaceTarget)
                    }
                }
            };
            if let Some(slot) = target {
                self.load_slot(ctx, slot, path);
            }
        }
    }

    fn load_slot(&self, ctx: &egui::Context, slot: SlotId, path: PathBuf) {
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let event = match encode_image_file(&path).await {
                Ok(image) => WorkerEvent::SlotLoaded { slot, image },
                Err(err) => WorkerEvent::SlotFailed {
                    message: err.user_message(),
                },
            };
            let _ = tx.send(event);
            ctx.request_repaint();
        });
    }

    fn start_generation(&mut self, ctx: &egui::Context) {
        let request = match build_request(&self.state) {
            Ok(request) => request,
            Err(err) => {
                self.error_banner = Some(err.user_message());
                return;
            }
        };
        let Some(client) = self.client.clone() else {
            self.error_banner =
                Some("Set GEMINI_API_KEY or GOOGLE_API_KEY and restart.".to_string());
            return;
        };
        if !self.state.begin_cycle() {
            return;
        }
        self.state.gallery.clear();
        self.error_banner = None;

        let config = self.config.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = run_cycle(&client, &config, request).await;
            let _ = tx.send(WorkerEvent::CycleFinished(result));
            ctx.request_repaint();
        });
    }

    fn slot_ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, slot: SlotId, title: &str) {
        ui.group(|ui| {
            ui.set_min_size(egui::vec2(200.0, 160.0));
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(title).strong());
                if let Some(image) = self.state.slot(slot).image() {
                    let seq = self.slot_seq.get(&slot).copied().unwrap_or_default();
                    let uri = format!("bytes://slot-{slot:?}-{seq}");
                    ui.add(
                        egui::Image::from_bytes(uri, image.data.clone())
                            .max_size(egui::vec2(180.0, 120.0)),
                    );
                    if ui.small_button("Remove").clicked() {
                        self.state.slot_mut(slot).clear();
                    }
                } else {
                    ui.label("Drop an image here");
                    if ui.button("Choose file").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "webp", "gif", "bmp"])
                            .pick_file()
                        {
                            self.load_slot(ctx, slot, path);
                        }
                    }
                }
            });
        });
    }

    fn form_ui(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let mode = self.state.mode();

        if mode.shows(Section::Prompt) {
            ui.label("Prompt");
            ui.add(
                egui::TextEdit::multiline(&mut self.state.prompt)
                    .hint_text("Describe the image")
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );
        }
        if mode.shows(Section::NegativePrompt) {
            ui.label("Negative prompt");
            ui.add(
                egui::TextEdit::singleline(&mut self.state.negative_prompt)
                    .hint_text("What to avoid")
                    .desired_width(f32::INFINITY),
            );
        }
        if mode.shows(Section::AspectRatio) {
            ui.horizontal(|ui| {
                ui.label("Aspect ratio:");
                for ratio in AspectRatio::ALL {
                    ui.selectable_value(&mut self.state.aspect_ratio, ratio, ratio.as_str());
                }
            });
        }
        if mode.shows(Section::Style) {
            ui.horizontal(|ui| {
                ui.label("Style:");
                let selected = self.state.style.as_deref().unwrap_or("None");
                egui::ComboBox::from_id_salt("style-preset")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.state.style, None, "None");
                        for preset in STYLE_PRESETS {
                            ui.selectable_value(
                                &mut self.state.style,
                                Some((*preset).to_string()),
                                *preset,
                            );
                        }
                    });
            });
        }
        if mode.shows(Section::SingleUpload) {
            self.slot_ui(ui, ctx, SlotId::Single, "Image");
        }
        if mode.shows(Section::FaceSwapUploads) {
            ui.horizontal(|ui| {
                self.slot_ui(ui, ctx, SlotId::FaceSource, "Source face");
                self.slot_ui(ui, ctx, SlotId::FaceTarget, "Target image");
            });
        }
    }

    fn gallery_ui(&mut self, ui: &mut egui::Ui) {
        if self.state.gallery.is_empty() {
            return;
        }
        ui.separator();
        ui.heading("Results");
        let gallery = self.state.gallery.clone();
        ui.horizontal_wrapped(|ui| {
            for (index, image) in gallery.iter().enumerate() {
                ui.vertical(|ui| {
                    let uri = format!("bytes://gallery-{}-{index}", self.gallery_seq);
                    ui.add(
                        egui::Image::from_bytes(uri, image.bytes.clone())
                            .max_size(egui::vec2(240.0, 240.0)),
                    );
                    if ui.small_button("Save").clicked() {
                        self.save_image(image);
                    }
                });
            }
        });
    }

    fn save_image(&mut self, image: &GalleryImage) {
        let suggested = download_filename(chrono::Utc::now().timestamp_millis());
        if let Some(path) = rfd::FileDialog::new().set_file_name(suggested).save_file() {
            if let Err(err) = std::fs::write(&path, &image.bytes) {
                tracing::error!(error = %err, path = %path.display(), "failed to save image");
                self.error_banner = Some(format!("Could not save the image: {err}"));
            }
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_events();
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("mode-bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Image Studio");
                ui.separator();
                let mut mode = self.state.mode();
                let previous = mode;
                for candidate in StudioMode::ALL {
                    ui.selectable_value(&mut mode, candidate, candidate.label());
                }
                if mode != previous {
                    self.state.set_mode(mode);
                    self.error_banner = None;
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Some(message) = self.error_banner.clone() {
                    ui.colored_label(egui::Color32::LIGHT_RED, message);
                    ui.separator();
                }

                self.form_ui(ui, ctx);
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let busy = self.state.in_flight();
                    let generate = ui.add_enabled(!busy, egui::Button::new("Generate"));
                    if generate.clicked() {
                        self.start_generation(ctx);
                    }
                    if busy {
                        ui.add(egui::Spinner::new());
                        ui.label("Generating...");
                    }
                    if ui.add_enabled(!busy, egui::Button::new("Clear all")).clicked() {
                        self.state.clear_all();
                        self.error_banner = None;
                    }
                });

                self.gallery_ui(ui);
            });
        });
    }
}

use crate::config::Config;
use crate::identifier::main::Identifier;
use crate::identifier::render::{render, View};
use crate::library::logger::interface::Logger;
use eframe::egui;
use std::sync::Arc;

const PREVIEW_MAX_SIZE: f32 = 320.0;

struct Preview {
    image_id: u64,
    texture: Option<egui::TextureHandle>,
}

pub struct IdentifierWindow {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    identifier: Identifier,
    preview: Option<Preview>,
}

impl IdentifierWindow {
    pub fn new(config: Config, logger: Arc<dyn Logger + Send + Sync>, identifier: Identifier) -> Self {
        Self {
            config,
            logger: logger.with_namespace("gui"),
            identifier,
            preview: None,
        }
    }

    fn preview_texture(&mut self, ctx: &egui::Context, image_id: u64) -> Option<egui::TextureHandle> {
        if let Some(preview) = &self.preview {
            if preview.image_id == image_id {
                return preview.texture.clone();
            }
        }

        let texture = self.identifier.image().and_then(|image| {
            match image::load_from_memory(&image.bytes) {
                Ok(decoded) => {
                    let rgba = decoded.to_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                    Some(ctx.load_texture(&image.name, color_image, egui::TextureOptions::LINEAR))
                }
                Err(e) => {
                    let _ = self
                        .logger
                        .error(&format!("No preview for {}: {}", image.name, e));
                    None
                }
            }
        });

        self.preview = Some(Preview {
            image_id,
            texture: texture.clone(),
        });
        texture
    }

    fn show(&mut self, ctx: &egui::Context, view: &View) {
        let texture = if view.show_image {
            self.preview_texture(ctx, view.image_id)
        } else {
            self.preview = None;
            None
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(&self.config.window_title);
                ui.add_space(8.0);
                ui.label(&view.status);
                ui.add_space(12.0);

                if let Some(texture) = &texture {
                    let size = texture.size_vec2();
                    let scale = (PREVIEW_MAX_SIZE / size.x.max(size.y)).min(1.0);
                    let size = size * scale;
                    ui.add(egui::Image::new(egui::load::SizedTexture::new(texture.id(), size)));
                    ui.add_space(12.0);
                }

                if !view.rows.is_empty() {
                    egui::Grid::new("results")
                        .striped(true)
                        .num_columns(2)
                        .show(ui, |ui| {
                            for row in &view.rows {
                                ui.label(&row.label);
                                ui.label(egui::RichText::new(&row.percentage).monospace());
                                ui.end_row();
                            }
                        });
                    ui.add_space(12.0);
                }

                if let Some(error) = &view.error {
                    let color = if view.failed {
                        ui.visuals().error_fg_color
                    } else {
                        ui.visuals().warn_fg_color
                    };
                    ui.colored_label(color, error);
                    ui.add_space(12.0);
                }

                ui.horizontal(|ui| {
                    let clicked = ui
                        .add_enabled(view.button.enabled, egui::Button::new(&view.button.label))
                        .clicked();
                    if view.button.busy {
                        ui.spinner();
                    }
                    if clicked {
                        self.identifier.press();
                    }
                });
            });
        });
    }
}

impl eframe::App for IdentifierWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.identifier.update();

        let view = render(&self.identifier, &self.config.ui_text);
        self.show(ctx, &view);

        if view.button.busy {
            ctx.request_repaint_after(self.config.poll_rate);
        }
    }
}

pub fn run(
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    identifier: Identifier,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.window_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    let dark_mode = config.dark_mode;
    let window = IdentifierWindow::new(config, logger, identifier);

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Box::new(window)
        }),
    )?;

    Ok(())
}

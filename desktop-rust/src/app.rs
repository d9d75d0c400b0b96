use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use anyhow::Result;
use eframe::egui::{self, Color32, RichText};
use futures::executor::block_on;

use crate::io::{decode_rgba, image_root_for, load_catalog, FileProbe};
use crate::model::{kiosk_fade, AppState, DecodedImage, GalleryProbed, ImageSize, TextureSlot};
use mineral_catalog_common::layout::{CARD_PLACEHOLDER, DETAIL_PLACEHOLDER};
use mineral_catalog_common::{
    probe_gallery, CardView, CatalogSession, FilterDimension, ProbeRequest, LOAD_ERROR_STATUS,
};

const CARD_SIZE: egui::Vec2 = egui::vec2(240.0, 300.0);
const CARD_IMAGE_SIZE: egui::Vec2 = egui::vec2(220.0, 165.0);
const MAIN_IMAGE_SIZE: egui::Vec2 = egui::vec2(520.0, 390.0);
const THUMB_SIZE: egui::Vec2 = egui::vec2(72.0, 72.0);

pub struct DesktopApp {
    state: AppState,
    status: String,
    textures: HashMap<(String, ImageSize), TextureSlot>,
    decode_rx: Receiver<DecodedImage>,
    decode_tx: Sender<DecodedImage>,
    pending_decoded: Vec<DecodedImage>,
    gallery_rx: Receiver<GalleryProbed>,
    gallery_tx: Sender<GalleryProbed>,
    probes_inflight: usize,
}

impl Default for DesktopApp {
    fn default() -> Self {
        let (decode_tx, decode_rx) = mpsc::channel();
        let (gallery_tx, gallery_rx) = mpsc::channel();
        Self {
            state: AppState::default(),
            status: String::new(),
            textures: HashMap::new(),
            decode_rx,
            decode_tx,
            pending_decoded: Vec::new(),
            gallery_rx,
            gallery_tx,
            probes_inflight: 0,
        }
    }
}

impl DesktopApp {
    pub fn with_dataset(path: &Path) -> Self {
        let mut app = Self::default();
        app.load_or_report(path);
        app
    }

    fn open_json(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            self.load_or_report(&path);
        }
    }

    /// 読み込み失敗は致命的。状態行にエラーを出し、操作系は無効のまま
    fn load_or_report(&mut self, path: &Path) {
        match self.load_from_path(path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "catalog loaded");
                self.status = self.state.session.status_text();
            }
            Err(err) => {
                tracing::error!("Error cargando los datos: {err:#}");
                self.state.load_error = Some(format!("{err:#}"));
                self.status = LOAD_ERROR_STATUS.to_string();
            }
        }
    }

    fn load_from_path(&mut self, path: &Path) -> Result<()> {
        let records = load_catalog(path)?;
        let image_root = image_root_for(path);

        // 古いセッションのタイマーはセッションと一緒に破棄される
        self.state = AppState {
            session: CatalogSession::new(records, image_root.to_string_lossy().to_string()),
            source_path: Some(path.to_path_buf()),
            load_error: None,
            pending_open: None,
        };
        self.textures.clear();
        self.pending_decoded.clear();
        Ok(())
    }

    // --- 画像 ---

    fn texture(&mut self, path: &str, size: ImageSize) -> Option<&TextureSlot> {
        let key = (path.to_string(), size);
        if !self.textures.contains_key(&key) {
            self.textures.insert(key.clone(), TextureSlot::Loading);
            let sender = self.decode_tx.clone();
            let path_owned = path.to_string();
            std::thread::spawn(move || {
                let pixels = decode_rgba(&path_owned, size.max_side());
                let _ = sender.send(DecodedImage {
                    path: path_owned,
                    size,
                    pixels,
                });
            });
        }
        self.textures.get(&key)
    }

    fn ready_texture(&mut self, path: &str, size: ImageSize) -> Option<egui::TextureHandle> {
        match self.texture(path, size) {
            Some(TextureSlot::Ready(texture)) => Some(texture.clone()),
            _ => None,
        }
    }

    fn texture_failed(&mut self, path: &str, size: ImageSize) -> bool {
        matches!(self.texture(path, size), Some(TextureSlot::Failed))
    }

    fn process_decoded(&mut self, ctx: &egui::Context) {
        let pending = std::mem::take(&mut self.pending_decoded);
        for msg in pending {
            let slot = match msg.pixels {
                Some((size, pixels)) if size[0] > 0 && size[1] > 0 => {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
                    TextureSlot::Ready(ctx.load_texture(
                        &msg.path,
                        color_image,
                        egui::TextureOptions::default(),
                    ))
                }
                _ => TextureSlot::Failed,
            };
            self.textures.insert((msg.path, msg.size), slot);
        }
    }

    fn spawn_probes(&mut self, request: ProbeRequest) {
        self.probes_inflight += 1;
        let sender = self.gallery_tx.clone();
        std::thread::spawn(move || {
            let outcomes = block_on(probe_gallery(&FileProbe, &request));
            let _ = sender.send(GalleryProbed {
                generation: request.generation,
                outcomes,
            });
        });
    }

    fn poll_messages(&mut self) {
        while let Ok(msg) = self.decode_rx.try_recv() {
            self.pending_decoded.push(msg);
        }
        while let Ok(msg) = self.gallery_rx.try_recv() {
            self.probes_inflight = self.probes_inflight.saturating_sub(1);
            self.state.session.apply_probes(msg.generation, msg.outcomes);
        }
    }

    // --- 操作 ---

    fn open_record(&mut self, position: usize) {
        if let Some(request) = self.state.session.open_record(position) {
            self.spawn_probes(request);
        }
    }

    fn toggle_kiosk(&mut self) {
        if let Some(request) = self.state.toggle_kiosk(Instant::now()) {
            self.spawn_probes(request);
        }
    }

    /// 期限を確認して展示モードを進める
    fn drive_kiosk(&mut self, ctx: &egui::Context, now: Instant) {
        let advance = self.state.advance_kiosk(now);
        if let Some(request) = advance.opened {
            self.spawn_probes(request);
        }
        if let Some(wait) = advance.wake_in {
            ctx.request_repaint_after(wait);
        }
    }

    // --- 描画 ---

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        let ready = self.state.is_ready();

        ui.horizontal_wrapped(|ui| {
            let mut query = self.state.session.filter().query.clone();
            let response = ui.add_enabled(
                ready,
                egui::TextEdit::singleline(&mut query)
                    .hint_text("Buscar por nombre, yacimiento, país o nº de inventario...")
                    .desired_width(320.0),
            );
            if response.changed() {
                self.state.session.set_query(&query);
            }

            for dimension in FilterDimension::ALL {
                let options = self.state.session.options().for_dimension(dimension).to_vec();
                let selected = self
                    .state
                    .session
                    .filter()
                    .selection(dimension)
                    .unwrap_or(dimension.any_label())
                    .to_string();

                let mut choice: Option<String> = None;
                ui.add_enabled_ui(ready, |ui| {
                    egui::ComboBox::from_id_source(("filter", dimension))
                        .selected_text(selected)
                        .width(180.0)
                        .show_ui(ui, |ui| {
                            if ui.selectable_label(false, dimension.any_label()).clicked() {
                                choice = Some(String::new());
                            }
                            for option in &options {
                                if ui.selectable_label(false, option).clicked() {
                                    choice = Some(option.clone());
                                }
                            }
                        });
                });
                if let Some(value) = choice {
                    self.state.session.select_filter(dimension, &value);
                }
            }

            ui.separator();
            let label = self.state.session.kiosk().label();
            if ui.add_enabled(ready, egui::Button::new(label)).clicked() {
                self.toggle_kiosk();
            }
        });

        let status = if self.state.load_error.is_some() {
            LOAD_ERROR_STATUS.to_string()
        } else if self.state.is_ready() {
            self.state.session.status_text()
        } else {
            self.status.clone()
        };
        ui.label(RichText::new(status).color(Color32::from_gray(170)));
    }

    fn render_grid(&mut self, ui: &mut egui::Ui) {
        let len = self.state.session.catalog().filtered_len();
        let spacing = ui.spacing().item_spacing.x;
        let columns = ((ui.available_width() + spacing) / (CARD_SIZE.x + spacing))
            .floor()
            .max(1.0) as usize;
        let rows = len.div_ceil(columns);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, CARD_SIZE.y + 8.0, rows, |ui, range| {
                for row in range {
                    ui.horizontal(|ui| {
                        let start = row * columns;
                        for position in start..(start + columns).min(len) {
                            let card = {
                                let session = &self.state.session;
                                session
                                    .catalog()
                                    .filtered_get(position)
                                    .map(|r| CardView::from_record(r, session.image_root()))
                            };
                            if let Some(card) = card {
                                self.render_card(ui, position, &card);
                            }
                        }
                    });
                    ui.add_space(8.0);
                }
            });
    }

    fn render_card(&mut self, ui: &mut egui::Ui, position: usize, card: &CardView) {
        let frame = egui::Frame::none()
            .fill(Color32::from_rgb(36, 33, 30))
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(50)))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(10.0));

        let inner = frame.show(ui, |ui| {
            ui.set_width(CARD_SIZE.x - 20.0);
            ui.set_height(CARD_SIZE.y - 20.0);
            ui.vertical(|ui| {
                if let Some(texture) = self.ready_texture(&card.cover_src, ImageSize::Card) {
                    ui.add(egui::Image::new(&texture).fit_to_exact_size(CARD_IMAGE_SIZE));
                } else {
                    let text = if self.texture_failed(&card.cover_src, ImageSize::Card) {
                        placeholder_text(CARD_PLACEHOLDER)
                    } else {
                        "...".to_string()
                    };
                    image_placeholder(ui, CARD_IMAGE_SIZE, text, egui::Sense::hover());
                }

                ui.label(
                    RichText::new(&card.inventory_tag)
                        .color(Color32::from_rgb(196, 140, 80))
                        .size(11.0),
                );
                ui.label(RichText::new(&card.name).strong().size(15.0));
                if !card.formula.is_empty() {
                    ui.label(RichText::new(&card.formula).italics().size(12.0));
                }
                ui.label(RichText::new(format!("Origen: {}", card.origin)).size(12.0));
                ui.label(RichText::new(format!("Clase: {}", card.class)).size(12.0));
            });
        });

        let response = inner.response.interact(egui::Sense::click());
        if response.clicked() {
            self.open_record(position);
        }
    }

    fn render_detail(&mut self, ctx: &egui::Context) {
        let Some(detail) = self.state.session.detail().map(|d| d.view.clone()) else {
            return;
        };

        let fading = self.state.is_fading();
        let opacity = ctx.animate_bool_with_time(
            egui::Id::new("detail_fade"),
            !fading,
            kiosk_fade().as_secs_f32(),
        );

        let mut open = true;
        egui::Window::new(RichText::new(&detail.title).strong())
            .id(egui::Id::new("detail"))
            .collapsible(false)
            .resizable(true)
            .default_width(900.0)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.set_opacity(opacity);
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| self.render_gallery(ui));
                    ui.add_space(16.0);
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&detail.inventory_id)
                                .color(Color32::from_rgb(196, 140, 80)),
                        );
                        ui.heading(&detail.title);
                        if !detail.formula.is_empty() {
                            ui.label(RichText::new(&detail.formula).italics());
                        }
                        ui.separator();
                        egui::Grid::new("detail_fields")
                            .num_columns(2)
                            .striped(true)
                            .show(ui, |ui| {
                                for field in &detail.fields {
                                    ui.label(RichText::new(field.label).strong());
                                    ui.label(&field.value);
                                    ui.end_row();
                                }
                            });
                        ui.separator();
                        ui.label(RichText::new("Notas").strong());
                        ui.label(&detail.notes);
                    });
                });
            });

        if !open {
            self.state.session.close_detail();
        }
    }

    fn render_gallery(&mut self, ui: &mut egui::Ui) {
        let gallery = self.state.session.gallery();
        let generation = gallery.generation();
        let main_src = gallery.main_src().to_string();
        let thumbnails = gallery.thumbnails().to_vec();
        let active = gallery.active();

        // 代替画像もクリックで全画面に開く
        let response = if main_src == DETAIL_PLACEHOLDER {
            Some(image_placeholder(
                ui,
                MAIN_IMAGE_SIZE,
                placeholder_text(DETAIL_PLACEHOLDER),
                egui::Sense::click(),
            ))
        } else if let Some(texture) = self.ready_texture(&main_src, ImageSize::Full) {
            Some(ui.add(
                egui::Image::new(&texture)
                    .max_size(MAIN_IMAGE_SIZE)
                    .sense(egui::Sense::click()),
            ))
        } else if self.texture_failed(&main_src, ImageSize::Full) {
            self.state.session.main_image_failed(generation);
            Some(image_placeholder(
                ui,
                MAIN_IMAGE_SIZE,
                placeholder_text(DETAIL_PLACEHOLDER),
                egui::Sense::click(),
            ))
        } else {
            image_placeholder(ui, MAIN_IMAGE_SIZE, "...", egui::Sense::hover());
            None
        };
        if let Some(response) = response {
            if response.on_hover_cursor(egui::CursorIcon::ZoomIn).clicked() {
                self.state.session.open_fullscreen();
            }
        }

        ui.horizontal(|ui| {
            for (position, thumb) in thumbnails.iter().enumerate() {
                let Some(texture) = self.ready_texture(&thumb.src, ImageSize::Card) else {
                    image_placeholder(ui, THUMB_SIZE, "", egui::Sense::hover());
                    continue;
                };
                let button = egui::ImageButton::new(
                    egui::Image::new(&texture).fit_to_exact_size(THUMB_SIZE),
                )
                .selected(active == Some(position));
                if ui
                    .add(button)
                    .on_hover_text(format!("Vista {}", thumb.index))
                    .clicked()
                {
                    self.state.session.select_thumbnail(position);
                }
            }
        });
    }

    fn render_fullscreen(&mut self, ctx: &egui::Context, src: &str) {
        let texture = self.ready_texture(src, ImageSize::Full);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let response = ui.interact(
                    rect,
                    egui::Id::new("fullscreen_viewer"),
                    egui::Sense::click_and_drag(),
                );

                // ホイール上で拡大（ブラウザの deltaY と符号が逆）
                if response.hovered() {
                    let scroll = ui.input(|i| i.raw_scroll_delta.y);
                    if scroll != 0.0 {
                        self.state.session.zoom_wheel(-f64::from(scroll));
                    }
                }
                if response.drag_started() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.state
                            .session
                            .begin_drag(f64::from(pos.x), f64::from(pos.y));
                    }
                }
                if response.dragged() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.state
                            .session
                            .drag_to(f64::from(pos.x), f64::from(pos.y));
                    }
                }
                if response.drag_stopped() {
                    self.state.session.end_drag();
                }
                if response.double_clicked() {
                    self.state.session.reset_zoom();
                }

                match &texture {
                    Some(texture) => {
                        let zoom = self.state.session.zoom();
                        let fitted = fit_within(texture.size_vec2(), rect.size() * 0.9);
                        let scaled = fitted * zoom.scale as f32;
                        let center = rect.center()
                            + egui::vec2(zoom.offset_x as f32, zoom.offset_y as f32);
                        ui.painter().image(
                            texture.id(),
                            egui::Rect::from_center_size(center, scaled),
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            Color32::WHITE,
                        );
                    }
                    None => {
                        ui.painter().text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            placeholder_text(DETAIL_PLACEHOLDER),
                            egui::FontId::proportional(18.0),
                            Color32::from_gray(160),
                        );
                    }
                }

                let close_rect = egui::Rect::from_min_size(
                    rect.right_top() + egui::vec2(-48.0, 12.0),
                    egui::vec2(36.0, 36.0),
                );
                let close = ui.put(
                    close_rect,
                    egui::Button::new(RichText::new("×").size(24.0).color(Color32::WHITE))
                        .frame(false),
                );
                if close.clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    self.state.session.close_fullscreen();
                }
            });
    }
}

/// 代替画像の表示文言（URLの text= 部分）
fn placeholder_text(url: &str) -> String {
    url.rsplit("text=").next().unwrap_or(url).replace('+', " ")
}

fn image_placeholder(
    ui: &mut egui::Ui,
    size: egui::Vec2,
    text: impl Into<String>,
    sense: egui::Sense,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, sense);
    ui.painter()
        .rect_filled(rect, egui::Rounding::same(4.0), Color32::from_gray(45));
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text.into(),
        egui::FontId::proportional(13.0),
        Color32::from_gray(150),
    );
    response
}

/// 縦横比を保って bounds に収まる大きさ
fn fit_within(image: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return bounds;
    }
    let ratio = (bounds.x / image.x).min(bounds.y / image.y);
    image * ratio
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_messages();
        self.process_decoded(ctx);
        self.drive_kiosk(ctx, Instant::now());

        let loading = self
            .textures
            .values()
            .any(|slot| matches!(slot, TextureSlot::Loading));
        if loading || self.probes_inflight > 0 {
            ctx.request_repaint();
        }

        if let Some(src) = self.state.session.fullscreen().map(str::to_string) {
            self.render_fullscreen(ctx, &src);
            return;
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Archivo", |ui| {
                    if ui.button("Abrir catálogo...").clicked() {
                        self.open_json();
                        ui.close_menu();
                    }
                });
                ui.separator();
                ui.heading("Colección de Minerales");
            });
            ui.add_space(4.0);
            self.render_controls(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.is_ready() {
                self.render_grid(ui);
            }
        });

        self.render_detail(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_text() {
        assert_eq!(placeholder_text(CARD_PLACEHOLDER), "Sin Imagen");
        assert_eq!(placeholder_text(DETAIL_PLACEHOLDER), "Imagen no disponible");
    }

    #[test]
    fn test_fit_within_keeps_ratio() {
        let fitted = fit_within(egui::vec2(800.0, 400.0), egui::vec2(400.0, 400.0));
        assert_eq!(fitted, egui::vec2(400.0, 200.0));
    }

    #[test]
    fn test_load_failure_leaves_app_unwired() {
        let app = DesktopApp::with_dataset(Path::new("/nonexistent/catalogo.json"));
        assert!(!app.state.is_ready());
        assert_eq!(app.status, LOAD_ERROR_STATUS);
    }

    #[test]
    fn test_kiosk_refused_on_empty_set() {
        let mut app = DesktopApp::default();
        app.toggle_kiosk();
        assert!(!app.state.session.kiosk().is_active());
    }
}

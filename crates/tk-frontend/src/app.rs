//! Demo application: three cubes, a translate gizmo and a debug view

use glam::{Mat4, Vec3};
use tk_core::GizmoConfig;
use tk_gizmo::{Camera, FrameResult, Gui, InteractionState, Space, ViewportFocus};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::input::viewport_state;
use crate::paint::{paint_markers, to_color32};

/// Settings file read at startup and written by "Save settings"
const CONFIG_PATH: &str = "tk.ron";

/// An object in the demo scene
struct SceneObject {
    id: Uuid,
    name: String,
    matrix: Mat4,
}

/// A camera with its gizmo frame driver
struct ViewportPane {
    camera: Camera,
    gui: Gui<Uuid>,
}

impl ViewportPane {
    fn new(config: &GizmoConfig, eye: Vec3, gaze_distance: f32) -> Self {
        let mut camera = Camera::new(&config.camera).with_eye(eye, gaze_distance);
        camera.look_at(Vec3::ZERO);
        Self {
            camera,
            gui: Gui::new(config.style.clone()),
        }
    }

    /// Allocate the viewport, navigate and start the gizmo frame
    fn begin(&mut self, ui: &mut egui::Ui) -> (egui::Response, egui::Painter) {
        let available_size = ui.available_size();
        let (response, painter) =
            ui.allocate_painter(available_size, egui::Sense::click_and_drag());
        painter.rect_filled(response.rect, 0.0, egui::Color32::from_gray(30));

        let viewport = viewport_state(ui, &response);
        // navigation yields to an active drag
        let navigation = if self.gui.active_drag().is_some() {
            viewport.with_focus(ViewportFocus::None)
        } else {
            viewport
        };
        self.camera.mouse_input_turntable(&navigation);
        self.gui.begin(&self.camera, &viewport);
        (response, painter)
    }

    fn finish(&mut self, response: &egui::Response, painter: &egui::Painter) {
        let markers = self.gui.finish_markers();
        paint_markers(painter, response.rect.min, &markers);
    }
}

/// Main application
pub struct GizmoDemoApp {
    config: GizmoConfig,
    objects: Vec<SceneObject>,
    selected: Option<Uuid>,
    space: Space,
    main: ViewportPane,
    debug: ViewportPane,
    show_debug: bool,
    last_result: FrameResult<Uuid>,
}

impl GizmoDemoApp {
    /// Create a new app
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = match GizmoConfig::load(CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded settings from {}", CONFIG_PATH);
                config
            }
            Err(e) => {
                debug!("Using default settings: {}", e);
                GizmoConfig::default()
            }
        };
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let objects = [
            ("Cube A", Vec3::new(0.0, 0.0, 0.0)),
            ("Cube B", Vec3::new(2.0, 0.0, 0.0)),
            ("Cube C", Vec3::new(0.0, 2.0, 0.0)),
        ]
        .into_iter()
        .map(|(name, position)| SceneObject {
            id: Uuid::new_v4(),
            name: name.to_string(),
            matrix: Mat4::from_translation(position),
        })
        .collect();

        Self {
            main: ViewportPane::new(&config, Vec3::new(0.0, 1.0, 10.0), 10.0),
            debug: ViewportPane::new(&config, Vec3::new(0.0, 1.0, 20.0), 20.0),
            config,
            objects,
            selected: None,
            space: Space::World,
            show_debug: true,
            last_result: FrameResult::default(),
        }
    }

    fn set_dark_theme(&mut self, ctx: &egui::Context, dark: bool) {
        if dark {
            self.config.apply_dark_theme();
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            self.config.apply_light_theme();
            ctx.set_visuals(egui::Visuals::light());
        }
        self.main.gui.set_style(self.config.style.clone());
        self.debug.gui.set_style(self.config.style.clone());
    }

    fn fit_scene(&mut self) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for object in &self.objects {
            let center = object.matrix.w_axis.truncate();
            min = min.min(center - Vec3::splat(0.5));
            max = max.max(center + Vec3::splat(0.5));
        }
        if min.is_finite() && max.is_finite() {
            self.main.camera.fit(min, max);
        }
    }

    fn side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("scene").show(ctx, |ui| {
            ui.heading("Scene");
            for object in &self.objects {
                let selected = self.selected == Some(object.id);
                if ui.selectable_label(selected, &object.name).clicked() {
                    self.selected = Some(object.id);
                }
            }

            ui.separator();
            ui.label("Translate in:");
            ui.radio_value(&mut self.space, Space::World, "World");
            ui.radio_value(&mut self.space, Space::Local, "Local");

            ui.separator();
            ui.checkbox(&mut self.show_debug, "Debug view");
            if ui.button("Fit").clicked() {
                self.fit_scene();
            }
            let mut dark = ctx.style().visuals.dark_mode;
            if ui.checkbox(&mut dark, "Dark theme").changed() {
                self.set_dark_theme(ctx, dark);
            }
            if ui.button("Save settings").clicked() {
                match self.config.save(CONFIG_PATH) {
                    Ok(()) => info!("Saved settings to {}", CONFIG_PATH),
                    Err(e) => error!("Failed to save settings: {}", e),
                }
            }

            ui.separator();
            let status = match self.main.gui.state() {
                InteractionState::Idle => "idle".to_string(),
                InteractionState::Hovering(h) => format!("hovering {}", self.name_of(h)),
                InteractionState::Dragging(h) => format!("dragging {}", self.name_of(h)),
            };
            ui.label(status);
        });
    }

    fn name_of(&self, handle: Option<Uuid>) -> &str {
        handle
            .and_then(|id| self.objects.iter().find(|o| o.id == id))
            .map_or("-", |o| o.name.as_str())
    }

    fn main_viewport(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = self.main.begin(ui);

        for object in &self.objects {
            self.main.gui.cube(object.id, object.matrix);
        }
        if let Some(id) = self.selected
            && let Some(object) = self.objects.iter_mut().find(|o| o.id == id)
        {
            self.main.gui.translate(id, self.space, &mut object.matrix);
        }

        let result = self.main.gui.end();
        if response.clicked() && !result.dragging && self.selected != result.closest {
            debug!(selected = ?result.closest, "selection changed");
            self.selected = result.closest;
        }
        self.last_result = result;

        let hint = if result.dragging {
            "release to drop"
        } else {
            "left: select/drag  right: orbit  middle: pan  wheel: dolly"
        };
        painter.text(
            response.rect.left_top() + egui::vec2(8.0, 8.0),
            egui::Align2::LEFT_TOP,
            hint,
            egui::FontId::proportional(12.0),
            to_color32(self.config.style.default_color),
        );

        self.main.finish(&response, &painter);
    }

    fn debug_viewport(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = self.debug.begin(ui);
        for object in &self.objects {
            self.debug.gui.cube(object.id, object.matrix);
        }
        self.debug.gui.debug(&self.main.gui);
        self.debug.gui.end();
        self.debug.finish(&response, &painter);
    }
}

impl eframe::App for GizmoDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.side_panel(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.main_viewport(ui));

        if self.show_debug {
            let mut open = self.show_debug;
            egui::Window::new("Debug view")
                .open(&mut open)
                .default_size([360.0, 270.0])
                .show(ctx, |ui| self.debug_viewport(ui));
            self.show_debug = open;
        }

        // keep hover state fresh while dragging outside the widgets
        if self.last_result.dragging {
            ctx.request_repaint();
        }
    }
}

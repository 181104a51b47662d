use bevy::app::Plugin;
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts, EguiPlugin, EguiPrimaryContextPass,
    egui::{self, epaint::QuadraticBezierShape},
};
use pp_utils::{
    MEDICAL_TIMELINE, OverlayState, PageConfig, PatientStore, PortalConfig, VITALS, ViewportRect,
    stat_for,
};
use tracing::debug;

pub mod layout;

pub use layout::{
    AnchorSpec, CONNECTOR_LIFT_PX, Connector, OverlayLayout, PlacedCard, STAT_ANCHORS, layout,
    layout_with_lift,
};

const CARD_MIN_WIDTH: f32 = 150.0;
const HINT_BOTTOM_MARGIN: f32 = 22.0;

const INK: egui::Color32 = egui::Color32::from_rgb(8, 16, 40);
const MUTED: egui::Color32 = egui::Color32::from_rgb(88, 99, 118);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(79, 70, 229);

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut bevy::app::App) {
        app.add_systems(
            EguiPrimaryContextPass,
            (apply_light_visuals, dashboard_ui, stat_overlay_ui).chain(),
        )
        .add_plugins(EguiPlugin::default())
        .init_resource::<DashboardUiState>();
    }
}

#[derive(Resource, Default)]
pub struct DashboardUiState {
    pub show_timeline_notes: bool,
}

fn apply_light_visuals(mut contexts: EguiContexts, mut applied: Local<bool>) {
    if *applied {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    ctx.set_visuals(egui::Visuals::light());
    *applied = true;
}

fn glass_frame(padding: i8) -> egui::Frame {
    egui::Frame::NONE
        .fill(egui::Color32::from_white_alpha(26))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(64)))
        .corner_radius(14.0)
        .inner_margin(egui::Margin::same(padding))
}

fn side_column(
    ctx: &egui::Context,
    id: &'static str,
    pos: egui::Pos2,
    page: &PageConfig,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    egui::Area::new(egui::Id::new(id))
        .fixed_pos(pos)
        .show(ctx, |ui| {
            ui.set_width(page.side_column_width);
            add_contents(ui);
        });
}

fn dashboard_ui(
    mut contexts: EguiContexts,
    config: Res<PortalConfig>,
    patients: Res<PatientStore>,
    mut state: ResMut<DashboardUiState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let page = &config.page;
    let screen = ctx.screen_rect();

    side_column(
        ctx,
        "patient_column",
        egui::pos2(page.padding, page.padding),
        page,
        |ui| {
            patient_card(ui, &patients, &mut state);
            ui.add_space(page.gap);
            body_condition_card(ui, &patients);
        },
    );

    let right_x = (screen.width() - page.padding - page.side_column_width).max(0.0);
    side_column(
        ctx,
        "vitals_column",
        egui::pos2(right_x, page.padding),
        page,
        |ui| {
            vitals_card(ui);
            ui.add_space(page.gap);
            history_card(ui, state.show_timeline_notes);
        },
    );
}

fn patient_card(ui: &mut egui::Ui, patients: &PatientStore, state: &mut DashboardUiState) {
    let record = patients.current();
    let name = record
        .and_then(|r| r.get_str("name"))
        .unwrap_or("No patient loaded");
    let sex = record.and_then(|r| r.get_str("sex"));
    let age = record.and_then(|r| r.get("age")).and_then(|v| v.as_u64());

    glass_frame(18).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            let (avatar, _) =
                ui.allocate_exact_size(egui::vec2(56.0, 56.0), egui::Sense::hover());
            ui.painter()
                .rect_filled(avatar, 12.0, egui::Color32::from_white_alpha(153));
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(name).size(18.0).strong().color(INK));
                let detail = match (sex, age) {
                    (Some(sex), Some(age)) => format!("{sex} • {age} years"),
                    (Some(sex), None) => sex.to_string(),
                    (None, Some(age)) => format!("{age} years"),
                    (None, None) => String::new(),
                };
                ui.label(egui::RichText::new(detail).size(13.0).color(MUTED));
            });
        });
        ui.add_space(14.0);
        ui.horizontal(|ui| {
            let charts = egui::Button::new(
                egui::RichText::new("Open Charts").color(egui::Color32::WHITE),
            )
            .fill(ACCENT)
            .corner_radius(9.0);
            if ui.add(charts).clicked() {
                debug!("charts requested");
            }
            let timeline = egui::Button::new(egui::RichText::new("Timeline").color(INK))
                .fill(egui::Color32::TRANSPARENT)
                .corner_radius(9.0)
                .selected(state.show_timeline_notes);
            if ui.add(timeline).clicked() {
                state.show_timeline_notes = !state.show_timeline_notes;
            }
        });
    });
}

fn body_condition_card(ui: &mut egui::Ui, patients: &PatientStore) {
    let condition = patients
        .current()
        .and_then(|r| r.get("body_condition"))
        .and_then(|v| v.as_u64());

    glass_frame(18).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("Patient Body").size(13.0).color(MUTED));
        let value = condition.map_or_else(|| "--".to_string(), |c| format!("{c}%"));
        ui.label(egui::RichText::new(value).size(40.0).strong().color(INK));
        ui.label(egui::RichText::new("Health Body Condition").color(MUTED));
    });
}

fn vitals_card(ui: &mut egui::Ui) {
    glass_frame(18).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("Vitals").strong().color(INK));
        ui.add_space(12.0);
        egui::Grid::new("vitals_grid")
            .num_columns(2)
            .spacing(egui::vec2(10.0, 10.0))
            .show(ui, |ui| {
                for (i, vital) in VITALS.iter().enumerate() {
                    glass_frame(12).show(ui, |ui| {
                        ui.set_min_width(130.0);
                        ui.label(egui::RichText::new(vital.label).size(12.0).color(MUTED));
                        ui.label(egui::RichText::new(vital.value).size(18.0).strong().color(INK));
                    });
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    });
}

fn history_card(ui: &mut egui::Ui, show_notes: bool) {
    glass_frame(18).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("Medical History").strong().color(INK));
        ui.add_space(10.0);
        for entry in &MEDICAL_TIMELINE {
            ui.label(egui::RichText::new(entry.title).strong().color(INK));
            ui.label(egui::RichText::new(entry.date).size(12.0).color(MUTED));
            if show_notes {
                ui.label(egui::RichText::new(entry.note).size(12.0).italics().color(MUTED));
            }
            ui.add_space(8.0);
        }
    });
}

fn stat_overlay_ui(
    mut contexts: EguiContexts,
    overlay: Res<OverlayState>,
    rect: Res<ViewportRect>,
    config: Res<PortalConfig>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    if !rect.has_area() {
        return;
    }

    if !overlay.is_open() {
        egui::Area::new(egui::Id::new("model_hint"))
            .fixed_pos(egui::pos2(
                rect.left + rect.width / 2.0,
                rect.top + rect.height - HINT_BOTTOM_MARGIN,
            ))
            .pivot(egui::Align2::CENTER_BOTTOM)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_white_alpha(217))
                    .corner_radius(12.0)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new("Click the model to view organ stats")
                                .size(13.0)
                                .color(egui::Color32::from_rgb(33, 49, 74)),
                        );
                    });
            });
        return;
    }

    let geometry = layout_with_lift(&rect, &STAT_ANCHORS, config.overlay.connector_lift);
    let origin = geometry.origin();

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("stat_connectors"),
    ));
    let stroke = egui::Stroke::new(
        config.overlay.connector_width,
        egui::Color32::from_white_alpha(153),
    );
    for connector in &geometry.connectors {
        let c = connector.offset(origin);
        painter.add(QuadraticBezierShape::from_points_stroke(
            [
                egui::pos2(c.start.x, c.start.y),
                egui::pos2(c.control.x, c.control.y),
                egui::pos2(c.end.x, c.end.y),
            ],
            false,
            egui::Color32::TRANSPARENT,
            stroke,
        ));
    }

    for card in &geometry.cards {
        let Some(stat) = stat_for(card.id) else {
            continue;
        };
        let pos = card.position + origin;
        egui::Area::new(egui::Id::new(("stat_card", card.id)))
            .fixed_pos(egui::pos2(pos.x, pos.y))
            .pivot(egui::Align2::CENTER_CENTER)
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                glass_frame(14).show(ui, |ui| {
                    ui.set_min_width(CARD_MIN_WIDTH);
                    ui.label(egui::RichText::new(stat.title).size(12.0).color(MUTED));
                    ui.label(egui::RichText::new(stat.value).size(18.0).strong().color(INK));
                });
            });
    }
}

use eframe::egui::{self, RichText, Ui};

use crate::data::filter::{SiteFilter, ALL_SITES_LABEL, SLIDER_MARKS, SLIDER_MIN, SLIDER_STEP};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the site dropdown and the payload range controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Site dropdown ----
    ui.strong("Select Launch Site:");
    let mut chosen: Option<SiteFilter> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(state.selection.site.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.selection.site.is_all(), ALL_SITES_LABEL)
                .clicked()
            {
                chosen = Some(SiteFilter::All);
            }
            for site in state.dataset.sites() {
                let selected = !state.selection.site.is_all() && state.selection.site.matches(site);
                if ui.selectable_label(selected, site).clicked() {
                    chosen = Some(SiteFilter::Site(site.clone()));
                }
            }
        });
    if let Some(site) = chosen {
        log::debug!("site dropdown -> {site}");
        state.set_site(site);
    }

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range: two handles over the same domain ----
    ui.strong("Payload range (Kg):");
    let mut low = state.handles.low();
    let mut high = state.handles.high();
    let domain = SLIDER_MIN..=state.slider_max;

    let low_changed = ui
        .add(egui::Slider::new(&mut low, domain.clone()).step_by(SLIDER_STEP).text("min"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, domain).step_by(SLIDER_STEP).text("max"))
        .changed();

    let marks: Vec<String> = SLIDER_MARKS.iter().map(|m| format!("{m:.0}")).collect();
    ui.label(RichText::new(marks.join("  ·  ")).small().weak());

    if low_changed || high_changed {
        log::debug!("payload slider -> [{low}, {high}]");
        state.set_payload_range(low, high);
    }

    ui.add_space(8.0);
    if ui.button("Reset filters").clicked() {
        state.reset();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the dashboard title and menu bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Dashboard", |ui: &mut Ui| {
            if ui.button("Reset filters").clicked() {
                state.reset();
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in view",
            state.dataset.len(),
            state.visible_launches()
        ));
    });

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("SpaceX Launch Records Dashboard").strong());
    });
}

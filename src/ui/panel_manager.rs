//! Panel orchestration and layout management.
//!
//! Coordinates all UI panels (header, table, details, status) and manages
//! their layout and interaction coordination.

use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::ui::header::HeaderInteraction;
use crate::ui::table_panel::TablePanelInteraction;
use crate::ui::{details_panel, header, status_bar, table_panel};
use rlayertable::{RowEvent, ShellId};

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    OpenFileRequested(std::path::PathBuf),
    GenerateRequested(usize),
    AddRandomRequested,
    RemoveRandomRequested,
    RemoveSelectedRequested,
    SearchRequested,
    ClearSortRequested,
    CollapseToggled,
    /// A column header was clicked
    SortToggled(String),
    /// A row was clicked
    RowActivated { shell: ShellId, event: RowEvent },
    /// The table height handle was dragged or reset
    TableResized(Option<f32>),
}

impl From<HeaderInteraction> for PanelInteraction {
    fn from(interaction: HeaderInteraction) -> Self {
        match interaction {
            HeaderInteraction::OpenFileRequested(path) => Self::OpenFileRequested(path),
            HeaderInteraction::GenerateRequested(count) => Self::GenerateRequested(count),
            HeaderInteraction::AddRandomRequested => Self::AddRandomRequested,
            HeaderInteraction::RemoveRandomRequested => Self::RemoveRandomRequested,
            HeaderInteraction::RemoveSelectedRequested => Self::RemoveSelectedRequested,
            HeaderInteraction::SearchRequested => Self::SearchRequested,
            HeaderInteraction::ClearSortRequested => Self::ClearSortRequested,
            HeaderInteraction::CollapseToggled => Self::CollapseToggled,
        }
    }
}

impl From<TablePanelInteraction> for PanelInteraction {
    fn from(interaction: TablePanelInteraction) -> Self {
        match interaction {
            TablePanelInteraction::SortToggled(column) => Self::SortToggled(column),
            TablePanelInteraction::RowActivated { shell, event } => Self::RowActivated { shell, event },
            TablePanelInteraction::Resized(height) => Self::TableResized(height),
        }
    }
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    ///
    /// # Arguments
    /// * `ctx` - The egui context
    /// * `state` - Mutable reference to application state
    /// * `loader` - Background loader, for the loading indicator
    ///
    /// # Returns
    /// * `Option<PanelInteraction>` - The interaction the coordinator must handle
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        loader: &AsyncLoader,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(header_interaction.into());
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        // Left panel: the feature table
        let table_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(4))
            .fill(ctx.style().visuals.panel_fill);

        egui::SidePanel::left("table_panel")
            .default_width(ctx.content_rect().width() * state.layout.table_split_ratio())
            .resizable(true)
            .frame(table_frame)
            .show(ctx, |ui| {
                ui.heading("Features");
                ui.separator();

                let loading = if loader.is_loading() { loader.pending_path().map(|p| p.as_path()) } else { None };
                if let Some(table_interaction) = table_panel::render_table_panel(ui, state, loading) {
                    interaction = Some(table_interaction.into());
                }
            });

        // Right panel: properties of the selection
        let details_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(4))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default()
            .frame(details_frame)
            .show(ctx, |ui| {
                details_panel::render_details_panel(ui, state);
            });

        interaction
    }
}

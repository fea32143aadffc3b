pub mod activity_view;
pub mod dialog_task;
pub mod grid_view;
pub mod help_bar;
pub mod layout;
pub mod log_view;

use ratatui::Frame;

use crate::app::{App, EditSession};

/// Top-level render dispatch. Every panel is redrawn from `app` on each call.
pub fn render(f: &mut Frame, app: &App) {
    let panels = layout::compute_panels(f.area());

    if let Some(area) = panels.linear {
        activity_view::render(f, area, " Recent Linear Activity ", &app.linear_activity);
    }
    if let Some(area) = panels.git {
        activity_view::render(f, area, " Recent Git Activity ", &app.git_activity);
    }
    grid_view::render(f, panels.grid, app);
    log_view::render(f, panels.log, app);
    if let Some(area) = panels.help {
        help_bar::render(f, area);
    }

    if let EditSession::AddingTask { buffer } = &app.session {
        dialog_task::render(f, buffer);
    }
}

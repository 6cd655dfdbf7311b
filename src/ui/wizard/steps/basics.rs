//! Basic details step rendering

use crate::ui::wizard::WizardScreen;
use crate::wizard::Wizard;
use ratatui::{layout::Rect, Frame};

impl WizardScreen {
    pub(crate) fn render_basics_step(&mut self, frame: &mut Frame, area: Rect, wizard: &Wizard) {
        self.render_fields(frame, area, wizard);
    }
}

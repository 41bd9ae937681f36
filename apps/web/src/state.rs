use crate::session::SessionState;
use crate::ui::Page;

/// Everything a handler may touch, guarded by the controller's single lock.
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub session: SessionState,
    pub page: Page,
}

impl ClientState {
    /// Re-evaluates the Form Gate into the tailor button.
    pub fn refresh_form_gate(&mut self) {
        self.page.tailor_enabled = self.session.form_gate();
    }
}

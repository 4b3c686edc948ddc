use std::sync::Arc;

use crate::modules::timesheets::application::service::TimesheetService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TimesheetService>,
}

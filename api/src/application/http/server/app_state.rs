use std::sync::Arc;

use vitaplan_core::application::VitaplanService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: VitaplanService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: VitaplanService) -> Self {
        Self { args, service }
    }
}

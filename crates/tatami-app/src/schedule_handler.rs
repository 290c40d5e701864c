use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use tatami_core::error::CoreError;
use tatami_service::schedule::ScheduleService;

pub struct ScheduleServiceHandler {
    pub service: Arc<ScheduleService>,
}

#[async_trait]
impl salvo::Handler for ScheduleServiceHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        // Insert a reference to the schedule service into the depot
        depot.inject(Arc::clone(&self.service));
    }
}

/// ## Summary
/// Retrieves the schedule service from the depot.
///
/// ## Errors
/// Returns an error if the schedule service is not found in the depot.
pub fn get_schedule_from_depot(depot: &salvo::Depot) -> AppResult<Arc<ScheduleService>> {
    depot
        .obtain::<Arc<ScheduleService>>()
        .cloned()
        .map_err(|_err| {
            CoreError::InvariantViolation("Schedule service not found in depot").into()
        })
}

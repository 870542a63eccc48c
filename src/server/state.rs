use crate::forecast::ForecastDays;
use crate::service::ForecastService;

/// Shared server state. The memo caches inside the service lock themselves,
/// per map and only around a read or insert, so requests never queue behind
/// another request's upstream call.
pub struct AppState {
    service: ForecastService,
    pub default_days: ForecastDays,
}

impl AppState {
    pub fn new(service: ForecastService, default_days: ForecastDays) -> Self {
        Self {
            service,
            default_days,
        }
    }

    pub fn service(&self) -> &ForecastService {
        &self.service
    }
}

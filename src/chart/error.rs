use thiserror::Error;

use crate::locate::LocateError;
use crate::sky::ObserverError;
use crate::timeframe::TimeError;

/// Reasons a chart request is abandoned. No partial chart is produced.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Observer(#[from] ObserverError),
}

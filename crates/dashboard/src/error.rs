use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("No snapshot has been fetched yet; call refresh() first")]
    NotLoaded,
}

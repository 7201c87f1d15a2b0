use log::info;
use shared::data::VehicleData;

/// Structural stub: Australia has no free public vehicle lookup API.
/// It keeps the dispatch table total over the supported countries, and
/// a future NEVDIS integration slots in behind the same signature.
pub async fn fetch(_identifier: &str) -> Option<VehicleData> {
    info!("AU vehicle lookup requested, but no upstream integration exists.");
    None
}

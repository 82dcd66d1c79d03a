//! Turning raw search hits into displayable cards.

use crate::geo::distance_km;
use crate::models::{Coordinate, FacilityRecord, FacilityView};

/// Shown when the label's first component is empty.
pub const NAME_FALLBACK: &str = "Hospital";

/// Shown when no address can be derived from the label.
pub const ADDRESS_FALLBACK: &str = "Address not available";

/// Number of leading label components that make up the short address.
const ADDRESS_COMPONENTS: usize = 3;

/// Split a free-text display label into a short name and a short address.
///
/// The label is a comma-separated human-readable address with the most
/// specific component first. Name is the first component; address is the
/// first three components rejoined. Labels with fewer than three components
/// use whatever exists. This is a best-effort formatter over a plain comma
/// split; embedded commas inside a single logical field stay lossy.
#[must_use]
pub fn split_label(label: &str) -> (String, String) {
    let components: Vec<&str> = label.split(',').collect();

    let name = components
        .first()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .unwrap_or(NAME_FALLBACK)
        .to_string();

    let address = components
        .iter()
        .take(ADDRESS_COMPONENTS)
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let address = if address.is_empty() {
        ADDRESS_FALLBACK.to_string()
    } else {
        address
    };

    (name, address)
}

/// Build display cards for a search response, annotating each record with
/// its distance from the user.
///
/// Input order is preserved deliberately: results appear in the order the
/// search service returned them, with distance attached per item, not as a
/// sort key. An empty slice yields an empty vec, never an error.
#[must_use]
pub fn build_views(user: Coordinate, records: &[FacilityRecord]) -> Vec<FacilityView> {
    records
        .iter()
        .map(|record| {
            let (name, address) = split_label(&record.display_name);
            FacilityView {
                position: record.position,
                name,
                address,
                distance_km: distance_km(user, record.position),
            }
        })
        .collect()
}

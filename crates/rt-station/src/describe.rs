//! Human-readable station summary, for info panels.

use rt_core::TrainId;

use crate::Station;

/// Name, position and both membership sets of `station`.
///
/// ```text
/// Station: Gare du Palais (capacity 2)
/// Location: (46.817600, -71.213900)
/// Assigned trains:
///  - Train 4
/// Trains in station:
///  none
/// ```
pub fn describe_station(station: &Station) -> String {
    format!(
        "Station: {} (capacity {})\nLocation: {}\nAssigned trains:\n{}\nTrains in station:\n{}",
        station.name,
        station.capacity,
        station.pos,
        train_list(station.assigned()),
        train_list(station.in_station()),
    )
}

fn train_list(trains: &[TrainId]) -> String {
    if trains.is_empty() {
        return " none".to_owned();
    }
    trains
        .iter()
        .map(|t| format!(" - Train {}", t.0))
        .collect::<Vec<_>>()
        .join("\n")
}

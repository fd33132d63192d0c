//! The Quebec City rail network the demo runs on.
//!
//! 31 track points, 34 blocks, 10 stations holding 40 trains, and 17
//! routes (34 with their reverses).  Coordinates are WGS-84 degrees.

use std::io::Cursor;

use anyhow::Result;

use rt_core::{BlockId, GeoPoint, PointId, StationId, TrainId};
use rt_movement::{MemoryStore, Train};
use rt_route::load_routes_reader;
use rt_station::Station;
use rt_track::{Block, Point};

// ── Track ─────────────────────────────────────────────────────────────────────

/// `(id, lat, lon)`
const POINTS: &[(u32, f64, f64)] = &[
    ( 1, 46.842256, -71.204255),
    ( 2, 46.747842, -71.334879),
    ( 3, 46.749053, -71.337711),
    ( 4, 46.76423, -71.428566),
    ( 5, 46.786403, -71.235611),
    ( 6, 46.820117, -71.213773),
    ( 7, 46.822044, -71.216567),
    ( 8, 46.797511, -71.289502),
    ( 9, 46.800243, -71.287356),
    (10, 46.800625, -71.287764),
    (11, 46.790461, -71.232142),
    (12, 46.799669, -71.294171),
    (13, 46.830895, -71.213549),
    (14, 46.830998, -71.210308),
    (15, 46.828532, -71.223526),
    (16, 46.826829, -71.218849),
    (17, 46.747778, -71.339884),
    (18, 46.824097, -71.218491),
    (19, 46.796969, -71.320005),
    (20, 46.792849, -71.351264),
    (21, 46.751768, -71.31513),
    (22, 46.754179, -71.297888),
    (23, 46.792598, -71.228659),
    (24, 46.794831, -71.22396),
    (25, 46.836048, -71.19766),
    (26, 46.832995, -71.195107),
    (27, 46.823175, -71.197474),
    (28, 46.845702, -71.207624),
    (29, 46.802571, -71.284019),
    (30, 46.770815, -71.428995),
    (31, 46.750133, -71.290745),
];

/// `(id, [endpoint, endpoint], lat, lon)`
const BLOCKS: &[(u32, [u32; 2], f64, f64)] = &[
    ( 1, [19, 20], 46.79385, -71.34591),
    ( 2, [19, 12], 46.79831, -71.307474),
    ( 3, [12, 10], 46.800103, -71.291513),
    ( 4, [12,  8], 46.799643, -71.290609),
    ( 5, [ 8,  9], 46.799439, -71.288359),
    ( 6, [ 9, 11], 46.801149, -71.28113),
    ( 7, [11,  5], 46.788501, -71.23357),
    ( 8, [11, 23], 46.792441, -71.228921),
    ( 9, [10, 29], 46.801491, -71.285551),
    (10, [ 9, 29], 46.79831, -71.307474),
    (11, [29, 15], 46.824494, -71.256704),
    (12, [15, 16], 46.826927, -71.220531),
    (13, [15, 18], 46.825947, -71.220579),
    (14, [18, 16], 46.826274, -71.219592),
    (15, [18,  7], 46.823377, -71.217863),
    (16, [ 7,  6], 46.820183, -71.21435),
    (17, [ 6, 27], 46.820637, -71.209355),
    (18, [16, 13], 46.829571, -71.21474),
    (19, [13, 14], 46.831275, -71.211696),
    (20, [14, 25], 46.833609, -71.203122),
    (21, [14, 26], 46.830724, -71.200375),
    (22, [13,  1], 46.79831, -71.307474),
    (23, [16, 28], 46.840691, -71.212456),
    (24, [22,  5], 46.755228, -71.280914),
    (25, [21,  2], 46.749941, -71.326776),
    (26, [ 2, 17], 46.747471, -71.337484),
    (27, [ 2,  3], 46.748059, -71.337041),
    (28, [17,  3], 46.748129, -71.33818),
    (29, [ 3,  8], 46.782033, -71.319399),
    (30, [21, 22], 46.752576, -71.308737),
    (31, [20, 30], 46.774911, -71.378468),
    (32, [17,  4], 46.758048, -71.375443),
    (33, [23, 24], 46.794413, -71.224993),
    (34, [22, 31], 46.752794, -71.292397),
];

// ── Stations ──────────────────────────────────────────────────────────────────

struct StationSeed {
    id:         u32,
    name:       &'static str,
    lat:        f64,
    lon:        f64,
    capacity:   usize,
    assigned:   [u32; 2],
    in_station: [u32; 2],
}

const STATIONS: &[StationSeed] = &[
    StationSeed { id:  1, name: "Baie de Beauport", lat: 46.842256, lon: -71.204255, capacity: 2, assigned: [1, 2], in_station: [3, 4] },
    StationSeed { id:  2, name: "Port de Québec", lat: 46.823961, lon: -71.197774, capacity: 2, assigned: [5, 6], in_station: [7, 8] },
    StationSeed { id:  3, name: "Centre de distribution", lat: 46.789962, lon: -71.23208, capacity: 2, assigned: [9, 10], in_station: [11, 12] },
    StationSeed { id:  4, name: "Vers Charlevoix", lat: 46.845779, lon: -71.207817, capacity: 2, assigned: [13, 14], in_station: [15, 16] },
    StationSeed { id:  5, name: "Vers la Rive-Sud", lat: 46.748911, lon: -71.290278, capacity: 2, assigned: [17, 18], in_station: [19, 20] },
    StationSeed { id:  6, name: "Vers Gatineau", lat: 46.771591, lon: -71.428372, capacity: 2, assigned: [21, 22], in_station: [23, 24] },
    StationSeed { id:  7, name: "Vers le Nord", lat: 46.765369, lon: -71.432235, capacity: 2, assigned: [25, 26], in_station: [27, 28] },
    StationSeed { id:  8, name: "Gare du Palais", lat: 46.8174, lon: -71.2139, capacity: 2, assigned: [29, 30], in_station: [31, 32] },
    StationSeed { id:  9, name: "Gare Québec-Gatineau", lat: 46.795569, lon: -71.332752, capacity: 2, assigned: [33, 34], in_station: [35, 36] },
    StationSeed { id: 10, name: "Gare CN", lat: 46.753156, lon: -71.303381, capacity: 2, assigned: [37, 38], in_station: [39, 40] },
];

const TRAIN_COUNT: u32 = 40;

// ── Routes ────────────────────────────────────────────────────────────────────

/// Forward routes; each row also yields its reverse.
pub const ROUTES_CSV: &str = "\
name,start_station,end_station,block_ids\n\
Gare Québec-Gatineau vers Gatineau,9,6,1 31\n\
Gare Québec-Gatineau vers Gare CN,9,10,1 2 4 29 27 25 30\n\
Gare Québec-Gatineau vers le Nord,9,7,1 2 4 29 28 32\n\
Gare Québec-Gatineau vers Gare du Palais,9,8,1 2 3 9 11 13 15\n\
Gare Québec-Gatineau vers Port de Québec,9,2,1 2 3 9 11 13 15 16 17\n\
Gare Québec-Gatineau vers Baie de Beauport,9,1,1 2 3 9 11 12 18\n\
Gare Québec-Gatineau vers Charlevoix,9,4,1 2 3 9 11 12 28\n\
Gare Québec-Gatineau vers Centre de distribution,9,3,1 2 3 9 11 13 15 16 17\n\
Gare CN vers la Rive-Sud,10,5,30 34\n\
Gare CN vers le Nord,10,7,30 25 26 22 32\n\
Gare CN vers Centre de distribution,10,3,30 24 7\n\
Gare CN vers Gare du Palais,10,8,30 25 27 29 5 10 11 13 15\n\
Gare CN vers Port de Québec,10,2,30 25 27 29 5 10 11 13 15 16 17\n\
Gare CN vers Baie de Beauport,10,1,30 25 27 29 5 10 11 12 18\n\
Gare CN vers Charlevoix,10,4,30 25 27 29 5 10 11 12 23\n\
Gare du Palais vers Charlevoix,8,4,15 14 23\n\
Gare du Palais vers Baie de Beauport,8,1,15 14 18\n\
";

// ── Store ─────────────────────────────────────────────────────────────────────

/// A [`MemoryStore`] holding the whole network, with routes parsed from
/// `routes_csv` (use [`ROUTES_CSV`] for the built-in set).
pub fn seed_store(routes_csv: &str) -> Result<MemoryStore> {
    let points = POINTS
        .iter()
        .map(|&(id, lat, lon)| Point { id: PointId(id), pos: GeoPoint::new(lat, lon) });

    let blocks = BLOCKS.iter().map(|&(id, [a, b], lat, lon)| {
        Block::new(BlockId(id), vec![PointId(a), PointId(b)], GeoPoint::new(lat, lon))
    });

    let stations = STATIONS.iter().map(|s| {
        let assigned = s.assigned.map(TrainId);
        let in_station = s.in_station.map(TrainId);
        Station::new(StationId(s.id), s.name, GeoPoint::new(s.lat, s.lon), s.capacity)
            .with_members(&in_station, &assigned)
    });

    let trains = (1..=TRAIN_COUNT).map(|id| {
        let mut train = Train::new(TrainId(id));
        if let Some(s) = STATIONS.iter().find(|s| s.assigned.contains(&id) || s.in_station.contains(&id)) {
            train.pos = GeoPoint::new(s.lat, s.lon);
        }
        train
    });

    let routes = load_routes_reader(Cursor::new(routes_csv))?.all().to_vec();

    Ok(MemoryStore::new()
        .with_points(points)
        .with_blocks(blocks)
        .with_stations(stations)
        .with_routes(routes)
        .with_trains(trains))
}

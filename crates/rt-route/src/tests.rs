//! Unit tests for rt-route.

use std::io::Cursor;

use rt_core::{BlockId, RouteId, StationId};

use crate::{Route, RouteCatalog, RouteCatalogBuilder, RouteError, load_routes_csv, load_routes_reader};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn blocks(ids: &[u32]) -> Vec<BlockId> {
    ids.iter().map(|&b| BlockId(b)).collect()
}

/// S1 → S2, S1 → S3, S2 → S3, each with a generated reverse.
///
/// Ids: 1 = S1→S2, 2 = S2→S1, 3 = S1→S3, 4 = S3→S1, 5 = S2→S3, 6 = S3→S2.
fn catalog() -> RouteCatalog {
    let mut b = RouteCatalogBuilder::new();
    b.add_route_with_reverse("S1 to S2", Some(StationId(1)), Some(StationId(2)), blocks(&[1, 2])).unwrap();
    b.add_route_with_reverse("S1 to S3", Some(StationId(1)), Some(StationId(3)), blocks(&[1, 3, 4])).unwrap();
    b.add_route_with_reverse("S2 to S3", Some(StationId(2)), Some(StationId(3)), blocks(&[2, 5])).unwrap();
    b.build().unwrap()
}

const ROUTES_CSV: &str = "\
name,start_station,end_station,block_ids\n\
Gare CN to Rive-Sud,2,5,30 34\n\
Gare du Palais to Charlevoix, 3 , 6 , 15 14 23\n\
Spur,,4,7\n\
";

// ── Route ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use super::*;

    #[test]
    fn reversed_swaps_and_reverses() {
        let r = Route {
            id:        RouteId(1),
            name:      "North".into(),
            start:     Some(StationId(1)),
            end:       Some(StationId(2)),
            block_ids: blocks(&[1, 2, 3]),
        };
        let rev = r.reversed(RouteId(2));
        assert_eq!(rev.id, RouteId(2));
        assert_eq!(rev.name, "North (Reverse)");
        assert_eq!(rev.start, Some(StationId(2)));
        assert_eq!(rev.end, Some(StationId(1)));
        assert_eq!(rev.block_ids, blocks(&[3, 2, 1]));
    }
}

// ── RouteCatalog ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod route_catalog {
    use super::*;

    #[test]
    fn seeded_ids_are_sequential() {
        let c = catalog();
        let ids: Vec<u32> = c.all().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(c.len(), 6);
        assert_eq!(c.get(RouteId(4)).unwrap().name, "S1 to S3 (Reverse)");
        assert!(c.get(RouteId(40)).is_none());
    }

    #[test]
    fn route_between() {
        let c = catalog();
        assert_eq!(c.route_between(StationId(3), StationId(2)).unwrap().id, RouteId(6));
        assert!(c.route_between(StationId(1), StationId(9)).is_none());
    }

    #[test]
    fn first_unused_from_follows_catalog_order() {
        let c = catalog();
        let none_used = |_: RouteId| false;
        assert_eq!(c.first_unused_from(StationId(1), none_used).unwrap().id, RouteId(1));

        let used = [RouteId(1)];
        let r = c.first_unused_from(StationId(1), |id| used.contains(&id)).unwrap();
        assert_eq!(r.id, RouteId(3));

        let used = [RouteId(1), RouteId(3)];
        assert!(c.first_unused_from(StationId(1), |id| used.contains(&id)).is_none());
    }

    #[test]
    fn routes_from_station() {
        let c = catalog();
        let ids: Vec<RouteId> = c.routes_from(StationId(3)).map(|r| r.id).collect();
        assert_eq!(ids, vec![RouteId(4), RouteId(6)]);
    }

    #[test]
    fn explicit_ids_then_seeded_continue_after_max() {
        let mut b = RouteCatalogBuilder::new();
        b.add_route(Route {
            id:        RouteId(10),
            name:      "loaded".into(),
            start:     None,
            end:       None,
            block_ids: blocks(&[1]),
        });
        let (fwd, rev) = b.add_route_with_reverse("next", None, None, blocks(&[2])).unwrap();
        assert_eq!((fwd, rev), (RouteId(11), RouteId(12)));
    }

    #[test]
    fn seeding_after_the_last_id_fails() {
        let mut b = RouteCatalogBuilder::new();
        b.add_route(Route {
            id:        RouteId(u32::MAX),
            name:      "last".into(),
            start:     None,
            end:       None,
            block_ids: blocks(&[1]),
        });
        let err = b.add_route_with_reverse("next", None, None, blocks(&[2])).unwrap_err();
        assert!(matches!(err, RouteError::IdsExhausted(ref name) if name == "next"));
        assert_eq!(b.build().unwrap().len(), 1);
    }

    #[test]
    fn seeding_needs_two_free_ids() {
        let mut b = RouteCatalogBuilder::new();
        b.add_route(Route {
            id:        RouteId(u32::MAX - 1),
            name:      "almost last".into(),
            start:     None,
            end:       None,
            block_ids: blocks(&[1]),
        });
        assert!(matches!(
            b.add_route_with_reverse("next", None, None, blocks(&[2])),
            Err(RouteError::IdsExhausted(_))
        ));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let r = Route {
            id:        RouteId(1),
            name:      "a".into(),
            start:     None,
            end:       None,
            block_ids: vec![],
        };
        let result = RouteCatalog::from_routes([r.clone(), r]);
        assert!(matches!(result, Err(RouteError::Duplicate(RouteId(1)))));
    }

    #[test]
    fn empty_routes_are_kept() {
        let mut b = RouteCatalogBuilder::new();
        b.add_route_with_reverse("empty", Some(StationId(1)), Some(StationId(2)), vec![]).unwrap();
        let c = b.build().unwrap();
        assert!(c.get(RouteId(1)).unwrap().is_empty());
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;

    #[test]
    fn loads_rows_with_reverse() {
        let c = load_routes_reader(Cursor::new(ROUTES_CSV)).unwrap();
        assert_eq!(c.len(), 6);

        let fwd = c.get(RouteId(3)).unwrap();
        assert_eq!(fwd.name, "Gare du Palais to Charlevoix");
        assert_eq!(fwd.start, Some(StationId(3)));
        assert_eq!(fwd.end, Some(StationId(6)));
        assert_eq!(fwd.block_ids, blocks(&[15, 14, 23]));

        let rev = c.get(RouteId(4)).unwrap();
        assert_eq!(rev.name, "Gare du Palais to Charlevoix (Reverse)");
        assert_eq!(rev.block_ids, blocks(&[23, 14, 15]));
    }

    #[test]
    fn empty_station_cell_is_none() {
        let c = load_routes_reader(Cursor::new(ROUTES_CSV)).unwrap();
        let spur = c.get(RouteId(5)).unwrap();
        assert_eq!(spur.start, None);
        assert_eq!(spur.end, Some(StationId(4)));
    }

    #[test]
    fn bad_block_id_is_a_parse_error() {
        let csv = "name,start_station,end_station,block_ids\nBad,1,2,3 x 4\n";
        let err = load_routes_reader(Cursor::new(csv)).unwrap_err();
        match err {
            RouteError::Parse(msg) => assert!(msg.contains("\"x\""), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn bad_station_is_a_parse_error() {
        let csv = "name,start_station,end_station,block_ids\nBad,one,2,3\n";
        assert!(matches!(load_routes_reader(Cursor::new(csv)), Err(RouteError::Parse(_))));
    }

    #[test]
    fn from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.csv");
        std::fs::write(&path, ROUTES_CSV).unwrap();
        let c = load_routes_csv(&path).unwrap();
        assert_eq!(c.len(), 6);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_routes_csv(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(RouteError::Io(_))));
    }
}

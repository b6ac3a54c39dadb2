use routesmith::{
    Error,
    directions::{Directions, DirectionsProvider, Leg, RouteRequest, TravelMode},
    path::Path,
    shared::{Coordinate, Distance},
};

/// Pretends every hop is a straight line of 1.5 km.
struct StraightLines;

impl DirectionsProvider for StraightLines {
    async fn route(&self, request: &RouteRequest) -> Result<Directions, Error> {
        if request.mode == TravelMode::Transit {
            return Err(Error::DirectionsFailure("transit not supported".into()));
        }
        let mut polyline = vec![request.origin];
        polyline.extend(request.waypoints.iter().copied());
        polyline.push(request.destination);
        let legs = vec![
            Leg {
                distance: Distance::from_meters(1500.0)
            };
            polyline.len() - 1
        ];
        Ok(Directions { polyline, legs })
    }
}

fn clicked_path() -> Path {
    Path::new()
        .with(Coordinate::new(0.0, 0.0))
        .with(Coordinate::new(0.0, 0.5))
        .with(Coordinate::new(0.5, 0.5))
        .with(Coordinate::new(0.5, 1.0))
}

#[test]
fn request_splits_origin_stopovers_destination() {
    let request = RouteRequest::from_path(&clicked_path(), TravelMode::Walking).unwrap();
    assert_eq!(request.origin, Coordinate::new(0.0, 0.0));
    assert_eq!(request.destination, Coordinate::new(0.5, 1.0));
    assert_eq!(
        request.waypoints,
        vec![Coordinate::new(0.0, 0.5), Coordinate::new(0.5, 0.5)]
    );
}

#[tokio::test]
async fn directions_become_a_path() {
    let request = RouteRequest::from_path(&clicked_path(), TravelMode::Driving).unwrap();
    let directions = StraightLines.route(&request).await.unwrap();
    assert_eq!(directions.total_distance(), Distance::from_kilometers(4.5));

    let path = directions.into_path();
    assert_eq!(path, clicked_path());
    assert_eq!(path.finalize("d").unwrap().len(), 4);
}

#[tokio::test]
async fn provider_failures_surface_to_caller() {
    let request = RouteRequest::from_path(&clicked_path(), TravelMode::Transit).unwrap();
    assert!(matches!(
        StraightLines.route(&request).await,
        Err(Error::DirectionsFailure(_))
    ));
}

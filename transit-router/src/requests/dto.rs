//! JSON documents read from stdin and written to stdout.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::BusStats;
use crate::router::{ItemKind, Itinerary, RoutingSettings};

/// Input of the `make_base` command.
#[derive(Debug, Deserialize)]
pub struct MakeBaseInput {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,

    /// Falls back to [`RoutingSettings::default`] when absent
    #[serde(default)]
    pub routing_settings: RoutingSettings,

    pub serialization_settings: SerializationSettings,
}

/// Input of the `process_requests` command.
#[derive(Debug, Deserialize)]
pub struct ProcessRequestsInput {
    pub serialization_settings: SerializationSettings,

    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

/// Where the base file lives.
#[derive(Debug, Clone, Deserialize)]
pub struct SerializationSettings {
    pub file: PathBuf,
}

/// A network description entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        /// Road distances in meters from this stop to its neighbours
        #[serde(default)]
        road_distances: BTreeMap<String, u32>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

/// A query against a saved base.
#[derive(Debug, Clone, Deserialize)]
pub struct StatRequest {
    pub id: i64,

    #[serde(flatten)]
    pub query: StatQuery,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum StatQuery {
    Stop { name: String },
    Bus { name: String },
    Route { from: String, to: String },
    /// Any other request type, such as map rendering
    #[serde(other)]
    Unsupported,
}

/// Answer to one [`StatRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatResponse {
    pub request_id: i64,

    #[serde(flatten)]
    pub body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Stop {
        buses: Vec<String>,
    },
    Bus {
        curvature: f64,
        route_length: u64,
        stop_count: usize,
        unique_stop_count: usize,
    },
    Route {
        total_time: f64,
        items: Vec<RouteItem>,
    },
    Error {
        error_message: String,
    },
}

impl ResponseBody {
    pub const NOT_FOUND: &'static str = "not found";
    pub const UNSUPPORTED: &'static str = "unsupported request";

    pub fn not_found() -> Self {
        Self::Error {
            error_message: Self::NOT_FOUND.to_string(),
        }
    }

    pub fn unsupported() -> Self {
        Self::Error {
            error_message: Self::UNSUPPORTED.to_string(),
        }
    }
}

impl From<BusStats> for ResponseBody {
    fn from(stats: BusStats) -> Self {
        Self::Bus {
            curvature: stats.curvature,
            route_length: stats.route_length,
            stop_count: stats.stop_count,
            unique_stop_count: stats.unique_stop_count,
        }
    }
}

impl From<Itinerary> for ResponseBody {
    fn from(itinerary: Itinerary) -> Self {
        let items = itinerary
            .legs
            .into_iter()
            .map(|leg| match leg.kind {
                ItemKind::Wait => RouteItem::Wait {
                    stop_name: leg.name,
                    time: leg.duration,
                },
                ItemKind::Ride => RouteItem::Bus {
                    bus: leg.name,
                    span_count: leg.span_count,
                    time: leg.duration,
                },
            })
            .collect();

        Self::Route {
            total_time: itinerary.total_time,
            items,
        }
    }
}

/// One step of a route answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait { stop_name: String, time: f64 },
    Bus { bus: String, span_count: u32, time: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::ItineraryLeg;
    use serde_json::json;

    #[test]
    fn parse_base_requests() {
        let input: MakeBaseInput = serde_json::from_value(json!({
            "base_requests": [
                {
                    "type": "Stop",
                    "name": "Tolstopaltsevo",
                    "latitude": 55.611087,
                    "longitude": 37.20829,
                    "road_distances": {"Marushkino": 3900}
                },
                {
                    "type": "Bus",
                    "name": "750",
                    "stops": ["Tolstopaltsevo", "Marushkino"],
                    "is_roundtrip": false
                }
            ],
            "routing_settings": {"bus_wait_time": 6, "bus_velocity": 40},
            "render_settings": {"width": 200},
            "serialization_settings": {"file": "transport_catalogue.db"}
        }))
        .unwrap();

        assert_eq!(input.base_requests.len(), 2);
        match &input.base_requests[0] {
            BaseRequest::Stop {
                name,
                road_distances,
                ..
            } => {
                assert_eq!(name, "Tolstopaltsevo");
                assert_eq!(road_distances["Marushkino"], 3900);
            }
            other => panic!("expected stop, got {other:?}"),
        }
        assert!(matches!(
            &input.base_requests[1],
            BaseRequest::Bus { is_roundtrip: false, .. }
        ));
        assert_eq!(input.routing_settings, RoutingSettings::new(6.0, 40.0));
        assert_eq!(input.serialization_settings.file, PathBuf::from("transport_catalogue.db"));
    }

    #[test]
    fn stop_without_distances() {
        let req: BaseRequest = serde_json::from_value(json!({
            "type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0
        }))
        .unwrap();
        assert!(matches!(req, BaseRequest::Stop { road_distances, .. } if road_distances.is_empty()));
    }

    #[test]
    fn routing_settings_default_when_absent() {
        let input: MakeBaseInput = serde_json::from_value(json!({
            "serialization_settings": {"file": "base.db"}
        }))
        .unwrap();
        assert!(input.base_requests.is_empty());
        assert_eq!(input.routing_settings, RoutingSettings::default());
    }

    #[test]
    fn parse_stat_requests() {
        let input: ProcessRequestsInput = serde_json::from_value(json!({
            "serialization_settings": {"file": "base.db"},
            "stat_requests": [
                {"id": 1, "type": "Stop", "name": "A"},
                {"id": 2, "type": "Bus", "name": "14"},
                {"id": 3, "type": "Route", "from": "A", "to": "B"},
                {"id": 4, "type": "Map"}
            ]
        }))
        .unwrap();

        let queries: Vec<_> = input
            .stat_requests
            .iter()
            .map(|r| (r.id, r.query.clone()))
            .collect();
        assert_eq!(
            queries,
            vec![
                (1, StatQuery::Stop { name: "A".into() }),
                (2, StatQuery::Bus { name: "14".into() }),
                (
                    3,
                    StatQuery::Route {
                        from: "A".into(),
                        to: "B".into()
                    }
                ),
                (4, StatQuery::Unsupported),
            ]
        );
    }

    #[test]
    fn stat_request_requires_id() {
        let res = serde_json::from_value::<StatRequest>(json!({"type": "Stop", "name": "A"}));
        assert!(res.is_err());
    }

    #[test]
    fn serialize_stop_response() {
        let resp = StatResponse {
            request_id: 7,
            body: ResponseBody::Stop {
                buses: vec!["14".into(), "22".into()],
            },
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"request_id": 7, "buses": ["14", "22"]})
        );
    }

    #[test]
    fn serialize_bus_response() {
        let resp = StatResponse {
            request_id: 1,
            body: BusStats::new(5, 3, 4000, 2000.0).into(),
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "request_id": 1,
                "curvature": 2.0,
                "route_length": 4000,
                "stop_count": 5,
                "unique_stop_count": 3
            })
        );
    }

    #[test]
    fn serialize_route_response() {
        let itinerary = Itinerary {
            legs: vec![
                ItineraryLeg {
                    kind: ItemKind::Wait,
                    name: "A".into(),
                    span_count: 0,
                    duration: 2.0,
                },
                ItineraryLeg {
                    kind: ItemKind::Ride,
                    name: "14".into(),
                    span_count: 2,
                    duration: 3.5,
                },
            ],
            total_time: 5.5,
        };
        let resp = StatResponse {
            request_id: 3,
            body: itinerary.into(),
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "request_id": 3,
                "total_time": 5.5,
                "items": [
                    {"type": "Wait", "stop_name": "A", "time": 2.0},
                    {"type": "Bus", "bus": "14", "span_count": 2, "time": 3.5}
                ]
            })
        );
    }

    #[test]
    fn serialize_errors() {
        let resp = StatResponse {
            request_id: 9,
            body: ResponseBody::not_found(),
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"request_id": 9, "error_message": "not found"})
        );
        assert_eq!(
            serde_json::to_value(ResponseBody::unsupported()).unwrap(),
            json!({"error_message": "unsupported request"})
        );
    }
}

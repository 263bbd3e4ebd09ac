//! The two request flows: building a base and answering queries against it.

use std::io::{Read, Write};

use tracing::{info, warn};

use super::dto::{
    BaseRequest, MakeBaseInput, ProcessRequestsInput, ResponseBody, StatQuery, StatRequest,
    StatResponse,
};
use super::error::RequestError;
use crate::catalogue::TransportCatalogue;
use crate::domain::{Coordinates, DomainError};
use crate::persist::TransitBase;
use crate::router::TransportRouter;

/// Build a catalogue from base requests.
///
/// Requests are applied in three passes so their order in the input does
/// not matter: stops, then road distances, then buses.
pub fn build_catalogue(requests: &[BaseRequest]) -> Result<TransportCatalogue, DomainError> {
    let mut catalogue = TransportCatalogue::new();

    for request in requests {
        if let BaseRequest::Stop {
            name,
            latitude,
            longitude,
            ..
        } = request
        {
            catalogue.add_stop(name, Coordinates::new(*latitude, *longitude))?;
        }
    }

    for request in requests {
        if let BaseRequest::Stop {
            name,
            road_distances,
            ..
        } = request
        {
            for (to, meters) in road_distances {
                catalogue.set_distance(name, to, *meters)?;
            }
        }
    }

    for request in requests {
        if let BaseRequest::Bus {
            name,
            stops,
            is_roundtrip,
        } = request
        {
            catalogue.add_bus(name, stops, *is_roundtrip)?;
        }
    }

    Ok(catalogue)
}

/// Read a `make_base` document, build the router and save the base.
pub fn make_base<R: Read>(reader: R) -> Result<TransitBase, RequestError> {
    let input: MakeBaseInput = serde_json::from_reader(reader)?;

    let catalogue = build_catalogue(&input.base_requests)?;
    info!(
        stops = catalogue.stop_count(),
        buses = catalogue.bus_count(),
        "Catalogue built"
    );

    let router = TransportRouter::build(&catalogue, &input.routing_settings)?;
    let base = TransitBase::new(catalogue, router);
    base.save(&input.serialization_settings.file)?;
    Ok(base)
}

/// Read a `process_requests` document, load the base it names and write
/// the answers as a JSON array.
pub fn process_requests<R: Read, W: Write>(reader: R, mut writer: W) -> Result<(), RequestError> {
    let input: ProcessRequestsInput = serde_json::from_reader(reader)?;

    let base = TransitBase::load(&input.serialization_settings.file)?;
    let handler = RequestHandler::new(&base);
    let responses = handler.answer_all(&input.stat_requests);

    serde_json::to_writer_pretty(&mut writer, &responses)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Answers stat requests from a loaded base.
#[derive(Debug, Clone, Copy)]
pub struct RequestHandler<'a> {
    base: &'a TransitBase,
}

impl<'a> RequestHandler<'a> {
    pub fn new(base: &'a TransitBase) -> Self {
        Self { base }
    }

    /// Answer requests in order.
    pub fn answer_all(&self, requests: &[StatRequest]) -> Vec<StatResponse> {
        let responses: Vec<_> = requests.iter().map(|r| self.answer(r)).collect();
        info!(requests = responses.len(), "Stat requests answered");
        responses
    }

    pub fn answer(&self, request: &StatRequest) -> StatResponse {
        let body = match &request.query {
            StatQuery::Stop { name } => self.stop_info(name),
            StatQuery::Bus { name } => self.bus_info(name),
            StatQuery::Route { from, to } => self.route_info(from, to),
            StatQuery::Unsupported => {
                warn!(id = request.id, "Unsupported stat request");
                ResponseBody::unsupported()
            }
        };

        StatResponse {
            request_id: request.id,
            body,
        }
    }

    fn stop_info(&self, name: &str) -> ResponseBody {
        match self.base.catalogue.buses_at_stop(name) {
            Some(buses) => ResponseBody::Stop {
                buses: buses.iter().cloned().collect(),
            },
            None => ResponseBody::not_found(),
        }
    }

    fn bus_info(&self, name: &str) -> ResponseBody {
        self.base
            .catalogue
            .bus_stats(name)
            .map_or_else(ResponseBody::not_found, ResponseBody::from)
    }

    fn route_info(&self, from: &str, to: &str) -> ResponseBody {
        self.base
            .router
            .find_route(from, to)
            .map_or_else(ResponseBody::not_found, ResponseBody::from)
    }
}

//! Best-effort reverse geocoding.

use std::sync::Arc;

use serde::Deserialize;

use crate::foundation::error::{StampError, StampResult};
use crate::geo::GeoPoint;
use crate::model::AddressInfo;
use crate::net::{HttpClient, RetryPolicy, get_with_retry};

pub const NOMINATIM_REVERSE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Address lookup for a coordinate. Implementations never fail; an unknown or unreachable
/// address is `None`.
pub trait Geocoder: Send + Sync {
    fn reverse_geocode(&self, point: GeoPoint) -> Option<AddressInfo>;
}

/// Geocoder that never finds anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGeocoder;

impl Geocoder for NoGeocoder {
    fn reverse_geocode(&self, _point: GeoPoint) -> Option<AddressInfo> {
        None
    }
}

/// OpenStreetMap Nominatim reverse lookup.
#[derive(Clone)]
pub struct NominatimGeocoder {
    client: Arc<dyn HttpClient>,
    base_url: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for NominatimGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimGeocoder")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl NominatimGeocoder {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            base_url: NOMINATIM_REVERSE_URL.to_owned(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn request_url(&self, point: GeoPoint) -> String {
        format!(
            "{}?lat={}&lon={}&format=json&addressdetails=1&zoom=18",
            self.base_url, point.latitude, point.longitude
        )
    }

    /// Lookup that surfaces failures as [`StampError::Geocoding`].
    pub fn lookup(&self, point: GeoPoint) -> StampResult<Option<AddressInfo>> {
        let url = self.request_url(point);
        let body = get_with_retry(self.client.as_ref(), &url, self.retry)
            .map_err(|e| StampError::geocoding(format!("{url}: {e}")))?;
        parse_nominatim(&body)
    }
}

impl Geocoder for NominatimGeocoder {
    #[tracing::instrument(level = "debug", skip_all, fields(%point))]
    fn reverse_geocode(&self, point: GeoPoint) -> Option<AddressInfo> {
        match self.lookup(point) {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!(error = %e, "reverse geocoding failed, caption will omit the address");
                None
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct NominatimResponse {
    error: Option<serde_json::Value>,
    display_name: Option<String>,
    #[serde(default)]
    address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    road: Option<String>,
    pedestrian: Option<String>,
    footway: Option<String>,
    house_number: Option<String>,
    suburb: Option<String>,
    neighbourhood: Option<String>,
    district: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    state: Option<String>,
    country: Option<String>,
    postcode: Option<String>,
}

pub(crate) fn parse_nominatim(body: &[u8]) -> StampResult<Option<AddressInfo>> {
    let resp: NominatimResponse = serde_json::from_slice(body)
        .map_err(|e| StampError::geocoding(format!("nominatim JSON: {e}")))?;
    if resp.error.is_some() {
        return Ok(None);
    }
    let a = resp.address;
    Ok(Some(AddressInfo {
        street: a.road.or(a.pedestrian).or(a.footway),
        number: a.house_number,
        neighborhood: a.suburb.or(a.neighbourhood).or(a.district),
        city: a.city.or(a.town).or(a.village).or(a.municipality),
        state: a.state,
        country: a.country,
        postcode: a.postcode,
        display_name: resp.display_name,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/geocode/geocode.rs"]
mod tests;

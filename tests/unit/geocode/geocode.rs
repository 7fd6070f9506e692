use std::sync::Mutex;
use std::time::Duration;

use super::*;
use crate::net::{HttpError, TlsMode};

struct Canned {
    reply: Result<Vec<u8>, HttpError>,
    urls: Mutex<Vec<String>>,
}

impl HttpClient for Canned {
    fn get(&self, url: &str, _tls: TlsMode) -> Result<Vec<u8>, HttpError> {
        self.urls.lock().unwrap().push(url.to_owned());
        self.reply.clone()
    }
}

fn canned(reply: Result<&str, HttpError>) -> Arc<Canned> {
    Arc::new(Canned {
        reply: reply.map(|s| s.as_bytes().to_vec()),
        urls: Mutex::new(Vec::new()),
    })
}

const CURITIBA: &str = r#"{
  "display_name": "1299, Rua XV de Novembro, Centro, Curitiba, Paraná, 80060-000, Brasil",
  "address": {
    "house_number": "1299",
    "road": "Rua XV de Novembro",
    "neighbourhood": "Centro",
    "town": "Curitiba",
    "state": "Paraná",
    "postcode": "80060-000",
    "country": "Brasil"
  }
}"#;

const NO_RETRY: RetryPolicy = RetryPolicy {
    max_retries: 0,
    backoff: Duration::ZERO,
};

#[test]
fn nominatim_fields_are_mapped() {
    let client = canned(Ok(CURITIBA));
    let geo = NominatimGeocoder::new(client.clone()).with_retry(NO_RETRY);
    let addr = geo
        .reverse_geocode(GeoPoint::new(-25.4086, -49.2712))
        .unwrap();

    assert_eq!(addr.street.as_deref(), Some("Rua XV de Novembro"));
    assert_eq!(addr.number.as_deref(), Some("1299"));
    assert_eq!(addr.neighborhood.as_deref(), Some("Centro"));
    assert_eq!(addr.city.as_deref(), Some("Curitiba"));
    assert_eq!(addr.state.as_deref(), Some("Paraná"));
    assert_eq!(addr.country.as_deref(), Some("Brasil"));
    assert!(addr.display_name.unwrap().starts_with("1299"));

    let urls = client.urls.lock().unwrap();
    assert_eq!(
        urls.as_slice(),
        ["https://nominatim.openstreetmap.org/reverse?lat=-25.4086&lon=-49.2712&format=json&addressdetails=1&zoom=18"]
    );
}

#[test]
fn error_payload_means_no_address() {
    let geo = NominatimGeocoder::new(canned(Ok(r#"{"error":"Unable to geocode"}"#)));
    assert_eq!(geo.reverse_geocode(GeoPoint::new(0.0, 0.0)), None);
}

#[test]
fn failures_are_absorbed() {
    let geo = NominatimGeocoder::new(canned(Err(HttpError::Status(500)))).with_retry(NO_RETRY);
    assert!(matches!(
        geo.lookup(GeoPoint::new(1.0, 1.0)),
        Err(StampError::Geocoding(_))
    ));
    assert_eq!(geo.reverse_geocode(GeoPoint::new(1.0, 1.0)), None);

    let geo = NominatimGeocoder::new(canned(Ok("<html>"))).with_retry(NO_RETRY);
    assert_eq!(geo.reverse_geocode(GeoPoint::new(1.0, 1.0)), None);
}

#[test]
fn no_geocoder_finds_nothing() {
    assert_eq!(NoGeocoder.reverse_geocode(GeoPoint::new(1.0, 2.0)), None);
}

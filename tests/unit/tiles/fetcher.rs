use std::io::Cursor;
use std::sync::Mutex;

use super::*;
use crate::net::{HttpError, TlsMode};

struct FakeServer {
    status: Option<u16>,
    body: Vec<u8>,
    urls: Mutex<Vec<String>>,
}

impl HttpClient for FakeServer {
    fn get(&self, url: &str, _tls: TlsMode) -> Result<Vec<u8>, HttpError> {
        self.urls.lock().unwrap().push(url.to_owned());
        match self.status {
            Some(code) => Err(HttpError::Status(code)),
            None => Ok(self.body.clone()),
        }
    }
}

fn png_tile() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(256, 256, image::Rgba([30, 60, 90, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn server(status: Option<u16>, body: Vec<u8>) -> Arc<FakeServer> {
    Arc::new(FakeServer {
        status,
        body,
        urls: Mutex::new(Vec::new()),
    })
}

const TILE: TileCoordinate = TileCoordinate {
    x: 19295,
    y: 24640,
    zoom: 16,
};

#[test]
fn url_template_is_expanded() {
    let f = TileFetcher::new(server(None, Vec::new()), "https://tiles.test/{z}/{x}/{y}.png");
    assert_eq!(f.tile_url(TILE), "https://tiles.test/16/19295/24640.png");
}

#[test]
fn fetched_tile_is_decoded() {
    let srv = server(None, png_tile());
    let f = TileFetcher::new(srv.clone(), "t/{z}/{x}/{y}");
    let bmp = f.fetch(TILE).unwrap();
    assert_eq!((bmp.width(), bmp.height()), (256, 256));
    assert_eq!(bmp.pixel(0, 0), Some([30, 60, 90, 255]));
    assert_eq!(srv.urls.lock().unwrap().as_slice(), ["t/16/19295/24640"]);
}

#[test]
fn http_failure_names_the_url() {
    let f = TileFetcher::new(server(Some(503), Vec::new()), "t/{z}/{x}/{y}");
    match f.fetch(TILE) {
        Err(StampError::TileFetch { url, reason }) => {
            assert_eq!(url, "t/16/19295/24640");
            assert!(reason.contains("503"), "{reason}");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn undecodable_body_is_a_tile_failure() {
    let f = TileFetcher::new(server(None, b"<html>rate limited</html>".to_vec()), "t/{z}/{x}/{y}");
    assert!(matches!(f.fetch(TILE), Err(StampError::TileFetch { .. })));
}

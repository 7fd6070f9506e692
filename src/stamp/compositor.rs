use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::SvgRasterizer;
use crate::caption::layout_with_style;
use crate::codec;
use crate::compass::CompassRenderer;
use crate::foundation::core::Bitmap;
use crate::foundation::error::{StampError, StampResult};
use crate::geo::GeoPoint;
use crate::geocode::{Geocoder, NoGeocoder, NominatimGeocoder};
use crate::metadata::{ExifToolMetadata, MetadataProvider};
use crate::minimap::{MinimapComposer, PinMarker};
use crate::model::{AddressInfo, PhotoMetadata};
use crate::net::{HttpClient, ReqwestClient, RetryPolicy};
use crate::options::{InfoBarOptions, StampOptions, clamp_radius};
use crate::render::{
    TextAnchor, TextRun, TextStyle, blit_over, multiply_opacity, render_text, round_corners,
};
use crate::stamp::output::{default_output_path, write_atomic};
use crate::tiles::TileFetcher;

/// External collaborators a stamping run talks to.
#[derive(Clone)]
pub struct StampServices {
    pub metadata: Arc<dyn MetadataProvider>,
    pub geocoder: Arc<dyn Geocoder>,
    pub http: Arc<dyn HttpClient>,
    pub retry: RetryPolicy,
}

impl std::fmt::Debug for StampServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StampServices")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl StampServices {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        geocoder: Arc<dyn Geocoder>,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            metadata,
            geocoder,
            http,
            retry: RetryPolicy::default(),
        }
    }

    /// `exiftool` metadata, Nominatim geocoding and tiles over reqwest.
    pub fn online(metadata: Arc<dyn MetadataProvider>) -> StampResult<Self> {
        let http: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new()?);
        let geocoder = Arc::new(NominatimGeocoder::new(Arc::clone(&http)));
        Ok(Self::new(metadata, geocoder, http))
    }

    pub fn with_exiftool() -> StampResult<Self> {
        Self::online(Arc::new(ExifToolMetadata::default()))
    }

    pub fn without_geocoding(mut self) -> Self {
        self.geocoder = Arc::new(NoGeocoder);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Overlays ready to be merged onto the photo.
#[derive(Debug, Default)]
pub struct Overlays {
    pub minimap: Option<Bitmap>,
    pub compass: Option<Bitmap>,
    pub caption: Vec<String>,
}

/// One stamping run for one photo.
///
/// Construction validates the source and options and reads the photo's metadata; a photo without
/// GPS coordinates is rejected up front.
#[derive(Debug)]
pub struct StampCompositor {
    source: PathBuf,
    options: StampOptions,
    metadata: PhotoMetadata,
    location: GeoPoint,
    services: StampServices,
}

impl StampCompositor {
    pub fn new(
        source: impl Into<PathBuf>,
        options: StampOptions,
        services: StampServices,
    ) -> StampResult<Self> {
        let source = source.into();
        if !source.is_file() {
            return Err(StampError::file_not_found(source));
        }
        options.validate()?;
        let metadata = services.metadata.read(&source)?;
        let location = metadata
            .gps
            .ok_or_else(|| StampError::no_location(source.clone()))?;
        tracing::info!(source = %source.display(), %location, "read photo metadata");

        Ok(Self {
            source,
            options,
            metadata,
            location,
            services,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn options(&self) -> &StampOptions {
        &self.options
    }

    pub fn metadata(&self) -> &PhotoMetadata {
        &self.metadata
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn default_output_path(&self) -> PathBuf {
        default_output_path(&self.source)
    }

    /// Stamp the photo and write it to `output` (default `<stem>_stamped<ext>`), returning the
    /// path written.
    #[tracing::instrument(skip_all, fields(source = %self.source.display()))]
    pub fn stamp(&self, output: Option<&Path>) -> StampResult<PathBuf> {
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_output_path());

        let photo = codec::open_oriented(&self.source, self.metadata.orientation)?;
        let stamped = self.render(photo.bitmap)?;

        let format = codec::output_format(&output, photo.format);
        let bytes = codec::encode(&stamped, format, self.options.jpeg_quality)?;
        write_atomic(&output, &bytes)?;

        tracing::info!(output = %output.display(), ?format, "wrote stamped photo");
        Ok(output)
    }

    /// Build every enabled overlay and merge them onto `base`.
    pub fn render(&self, base: Bitmap) -> StampResult<Bitmap> {
        let rasterizer = SvgRasterizer::new(self.options.resolve_assets_dir());
        let opts = &self.options;

        let (address, minimap) = rayon::join(
            || self.lookup_address(),
            || {
                opts.show_minimap
                    .then(|| self.build_minimap(&rasterizer))
                    .transpose()
            },
        );
        let minimap = minimap?;

        let compass = if opts.show_compass {
            let renderer = CompassRenderer::from_assets(&rasterizer, &opts.compass);
            Some(renderer.render(
                &rasterizer,
                opts.compass.width,
                opts.compass.height,
                self.metadata.direction.as_ref(),
            )?)
        } else {
            None
        };

        let caption = if opts.show_info {
            layout_with_style(
                self.metadata.direction.as_ref(),
                address.as_ref(),
                self.metadata.datetime.as_deref(),
                base.is_landscape(),
                opts.info.date_style,
            )
        } else {
            Vec::new()
        };

        compose(
            base,
            Overlays {
                minimap,
                compass,
                caption,
            },
            opts,
            &rasterizer,
        )
    }

    fn lookup_address(&self) -> Option<AddressInfo> {
        if !(self.options.geocode && self.options.show_info) {
            return None;
        }
        self.services.geocoder.reverse_geocode(self.location)
    }

    fn build_minimap(&self, rasterizer: &SvgRasterizer) -> StampResult<Bitmap> {
        let mm = &self.options.minimap;
        let fetcher = TileFetcher::new(Arc::clone(&self.services.http), mm.tile_url.clone())
            .with_retry(self.services.retry);
        let composer =
            MinimapComposer::new(fetcher, PinMarker::from_assets(rasterizer), mm.fetch_threads);
        let size = mm.width.max(mm.height);
        let map = composer.compose(self.location, size, mm.zoom.get())?;
        codec::resize(&map, mm.width, mm.height)
    }
}

/// Merge `overlays` onto `base`: minimap bottom-left above the caption bar, compass top-left,
/// then the caption bar and its text along the bottom edge.
pub fn compose(
    base: Bitmap,
    overlays: Overlays,
    options: &StampOptions,
    rasterizer: &SvgRasterizer,
) -> StampResult<Bitmap> {
    let mut out = base;
    let (w, h) = (i64::from(out.width()), i64::from(out.height()));
    let margin = i64::from(options.margin);
    let info = &options.info;
    let bar_height = i64::from(info.bar_height(overlays.caption.len()));

    if let Some(mut minimap) = overlays.minimap {
        let radius = clamp_radius(
            options.minimap.border_radius,
            minimap.width(),
            minimap.height(),
        );
        round_corners(&mut minimap, radius)?;
        multiply_opacity(&mut minimap, options.minimap.opacity.get());

        let bottom = margin + bar_height + if bar_height > 0 { margin } else { 0 };
        let y = h - i64::from(minimap.height()) - bottom;
        blit_over(&mut out, &minimap, margin, y, 1.0);
    }

    if let Some(compass) = overlays.compass {
        blit_over(&mut out, &compass, margin, margin, 1.0);
    }

    let bar_width = w - 2 * margin;
    if bar_height > 0 && bar_width > 0 {
        let bar_w = bar_width as u32;
        let bar_h = bar_height as u32;
        let top = h - bar_height - margin;

        let fill = info.bg_color.with_opacity(info.bg_opacity.get()).to_premul();
        let mut bar = Bitmap::filled(bar_w, bar_h, fill)?;
        round_corners(&mut bar, clamp_radius(info.border_radius, bar_w, bar_h))?;
        blit_over(&mut out, &bar, margin, top, 1.0);

        let text = render_text(
            rasterizer,
            bar_w,
            bar_h,
            &caption_style(info),
            &caption_runs(&overlays.caption, info),
        )?;
        blit_over(&mut out, &text, margin, top, 1.0);
    }

    Ok(out)
}

fn caption_style(info: &InfoBarOptions) -> TextStyle {
    TextStyle {
        family: info.font_family.clone(),
        size: f64::from(info.font_size),
        color: info.font_color,
        bold: false,
    }
}

/// Text runs positioned relative to the bar's top-left corner.
pub fn caption_runs(lines: &[String], info: &InfoBarOptions) -> Vec<TextRun> {
    let lh = f64::from(info.line_height());
    let pad_v = f64::from(InfoBarOptions::PADDING_V);
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| TextRun {
            text: line.clone(),
            x: f64::from(InfoBarOptions::PADDING_H),
            baseline: pad_v + i as f64 * lh + lh - 3.0,
            anchor: TextAnchor::Start,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/stamp/compositor.rs"]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use photostamp::metadata::is_exiftool_on_path;
use photostamp::{
    Color, CompassStyle, Direction, ExifToolMetadata, GeoPoint, MetadataProvider, PhotoMetadata,
    StampCompositor, StampOptions, StampServices, StaticMetadata,
};

#[derive(Parser, Debug)]
#[command(name = "photostamp", version, about = "Stamp photos with a minimap, compass and caption")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stamp one photo.
    Stamp(StampArgs),
    /// Print the effective options as JSON.
    Options(OptionsArgs),
}

#[derive(Args, Debug)]
struct OptionsArgs {
    /// Options JSON to load and validate instead of the defaults.
    #[arg(long)]
    options: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StampArgs {
    /// Photo to stamp.
    file: PathBuf,

    /// Output path (default: `<name>_stamped.<ext>` beside the photo).
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Options JSON merged over the defaults before the flags below.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Latitude in decimal degrees; skips exiftool together with --lng.
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lng: Option<f64>,

    /// Camera heading in degrees (with --lat/--lng).
    #[arg(long, requires = "lat")]
    heading: Option<f64>,

    /// Heading reference: T (true north) or M (magnetic north).
    #[arg(long, default_value = "T")]
    heading_ref: String,

    /// Capture time, e.g. "2025:01:15 23:49:08" (with --lat/--lng).
    #[arg(long, requires = "lat")]
    datetime: Option<String>,

    #[arg(long)]
    no_compass: bool,
    #[arg(long)]
    no_minimap: bool,
    #[arg(long)]
    no_info: bool,
    /// Do not look up the street address.
    #[arg(long)]
    no_geocode: bool,

    #[arg(long)]
    minimap_width: Option<u32>,
    #[arg(long)]
    minimap_height: Option<u32>,
    #[arg(long)]
    minimap_zoom: Option<u8>,
    #[arg(long)]
    minimap_opacity: Option<f32>,
    #[arg(long)]
    minimap_border_radius: Option<u32>,
    /// Tile URL template with {z}, {x} and {y}.
    #[arg(long)]
    tile_url: Option<String>,

    #[arg(long)]
    compass_width: Option<u32>,
    #[arg(long)]
    compass_height: Option<u32>,
    /// Compass face: 1, 2 or 3.
    #[arg(long)]
    compass_style: Option<u8>,
    #[arg(long)]
    compass_arrow_color: Option<Color>,

    #[arg(long)]
    info_font_size: Option<u32>,
    #[arg(long)]
    info_font_color: Option<Color>,
    #[arg(long)]
    info_bg_color: Option<Color>,
    #[arg(long)]
    info_bg_opacity: Option<f32>,
    #[arg(long)]
    info_border_radius: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Stamp(args) => cmd_stamp(args),
        Command::Options(args) => cmd_options(args),
    }
}

fn load_options(path: Option<&Path>) -> anyhow::Result<StampOptions> {
    match path {
        Some(p) => StampOptions::from_json_file(p)
            .with_context(|| format!("load options '{}'", p.display())),
        None => Ok(StampOptions::default()),
    }
}

fn cmd_options(args: OptionsArgs) -> anyhow::Result<()> {
    let opts = load_options(args.options.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&opts)?);
    Ok(())
}

fn apply_flags(opts: &mut StampOptions, args: &StampArgs) -> anyhow::Result<()> {
    opts.show_compass &= !args.no_compass;
    opts.show_minimap &= !args.no_minimap;
    opts.show_info &= !args.no_info;
    opts.geocode &= !args.no_geocode;

    if let Some(v) = args.minimap_width {
        opts.minimap.width = v;
    }
    if let Some(v) = args.minimap_height {
        opts.minimap.height = v;
    }
    if let Some(v) = args.minimap_zoom {
        opts.set_minimap_zoom(v)?;
    }
    if let Some(v) = args.minimap_opacity {
        opts.set_minimap_opacity(v)?;
    }
    if let Some(v) = args.minimap_border_radius {
        opts.minimap.border_radius = v;
    }
    if let Some(v) = &args.tile_url {
        opts.minimap.tile_url = v.clone();
    }
    if let Some(v) = args.compass_width {
        opts.compass.width = v;
    }
    if let Some(v) = args.compass_height {
        opts.compass.height = v;
    }
    if let Some(v) = args.compass_style {
        opts.compass.style = CompassStyle::from_number(v);
    }
    if let Some(v) = args.compass_arrow_color {
        opts.compass.arrow_color = v;
    }
    if let Some(v) = args.info_font_size {
        opts.info.font_size = v;
    }
    if let Some(v) = args.info_font_color {
        opts.info.font_color = v;
    }
    if let Some(v) = args.info_bg_color {
        opts.info.bg_color = v;
    }
    if let Some(v) = args.info_bg_opacity {
        opts.set_info_bg_opacity(v)?;
    }
    if let Some(v) = args.info_border_radius {
        opts.info.border_radius = v;
    }
    opts.validate()?;
    Ok(())
}

fn metadata_provider(args: &StampArgs) -> anyhow::Result<Arc<dyn MetadataProvider>> {
    let provider: Arc<dyn MetadataProvider> = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Arc::new(StaticMetadata::new(PhotoMetadata {
            gps: Some(GeoPoint::new(lat, lng)),
            direction: args.heading.map(|h| {
                Direction::from_exif(h.rem_euclid(360.0), Some(args.heading_ref.as_str()))
            }),
            datetime: args.datetime.clone(),
            orientation: None,
        })),
        _ => {
            if !is_exiftool_on_path() {
                anyhow::bail!(
                    "exiftool not found on PATH; install it or pass --lat/--lng to stamp without it"
                );
            }
            Arc::new(ExifToolMetadata::default())
        }
    };
    Ok(provider)
}

fn cmd_stamp(args: StampArgs) -> anyhow::Result<()> {
    let mut opts = load_options(args.options.as_deref())?;
    apply_flags(&mut opts, &args)?;

    let services = StampServices::online(metadata_provider(&args)?)?;
    let services = if opts.geocode {
        services
    } else {
        services.without_geocoding()
    };

    let stamper = StampCompositor::new(&args.file, opts, services)?;
    let meta = stamper.metadata();
    eprintln!("location: {}", stamper.location());
    if let Some(d) = &meta.direction {
        eprintln!(
            "direction: {} ({})",
            photostamp::geo::format_direction(d.degrees),
            d.reference
        );
    }

    let out = stamper.stamp(args.out.as_deref())?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

//! PNG snapshot of a board
//!
//! Every tile becomes a square of [`SNAPSHOT_TILE_PIXELS`] pixels. Tracks are
//! drawn as a bar along their axis, tinted by their outermost decoration;
//! receptors show their four slots as coloured corners of the square, with
//! a green frame once marked.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::engine::marble::Marble;
use crate::io::configuration::SNAPSHOT_TILE_PIXELS;
use crate::io::error::{MarbleError, Result};
use crate::spatial::{Direction, Grid, Orientation};
use crate::tiles::{Decorator, Receptor, Tileable, Track};

const BACKGROUND: Rgb<u8> = Rgb([24, 24, 32]);
const RAIL: Rgb<u8> = Rgb([170, 170, 180]);
const NEXUS: Rgb<u8> = Rgb([96, 96, 120]);
const SPAWNER: Rgb<u8> = Rgb([140, 96, 160]);
const RECEPTOR: Rgb<u8> = Rgb([60, 60, 72]);
const MARKED: Rgb<u8> = Rgb([72, 200, 96]);
const ONE_WAY: Rgb<u8> = Rgb([232, 140, 40]);
const TELEPORTER: Rgb<u8> = Rgb([150, 80, 220]);
const DISPLAY: Rgb<u8> = Rgb([48, 48, 64]);

/// Render `grid` into an in-memory image
pub fn render_board(grid: &Grid) -> RgbImage {
    let size = SNAPSHOT_TILE_PIXELS;
    let mut img = RgbImage::from_pixel(
        grid.width() as u32 * size,
        grid.height() as u32 * size,
        BACKGROUND,
    );

    for tile in grid.tiles() {
        let origin = (
            tile.position().x as u32 * size,
            tile.position().y as u32 * size,
        );
        match tile.tileable() {
            Tileable::Empty => {}
            Tileable::Track(track) => draw_track(&mut img, origin, track),
            Tileable::Receptor(receptor) => draw_receptor(&mut img, origin, receptor),
            Tileable::Nexus(_) => fill(&mut img, origin, (0, 0), (size, size / 2), NEXUS),
            Tileable::SpawningNexus(_) => fill(&mut img, origin, (0, 0), (size, size / 2), SPAWNER),
            Tileable::Announcer(_) | Tileable::Timer(_) => {
                fill(&mut img, origin, (1, 1), (size - 2, size - 2), DISPLAY);
            }
        }
    }
    img
}

fn fill(
    img: &mut RgbImage,
    origin: (u32, u32),
    offset: (u32, u32),
    extent: (u32, u32),
    color: Rgb<u8>,
) {
    for dy in 0..extent.1 {
        for dx in 0..extent.0 {
            let (x, y) = (origin.0 + offset.0 + dx, origin.1 + offset.1 + dy);
            if x < img.width() && y < img.height() {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn marble_color(marble: &Marble) -> Rgb<u8> {
    Rgb(marble.marble_type().rgb())
}

fn draw_track(img: &mut RgbImage, origin: (u32, u32), track: &Track) {
    let size = SNAPSHOT_TILE_PIXELS;
    let rail = size / 4;
    let color = match track {
        Track::Horizontal | Track::Vertical => RAIL,
        Track::Decorated { decorator, .. } => match decorator {
            Decorator::Filter(filter) => Rgb(filter.rgb()),
            Decorator::OneWay(_) => ONE_WAY,
            Decorator::Teleporter(_) => TELEPORTER,
        },
    };
    let (offset, extent) = match track.orientation() {
        Orientation::Horizontal => ((0, (size - rail) / 2), (size, rail)),
        Orientation::Vertical => (((size - rail) / 2, 0), (rail, size)),
    };
    fill(img, origin, offset, extent, color);
}

fn draw_receptor(img: &mut RgbImage, origin: (u32, u32), receptor: &Receptor) {
    let size = SNAPSHOT_TILE_PIXELS;
    let frame = if receptor.is_marked() { MARKED } else { RECEPTOR };
    fill(img, origin, (0, 0), (size, size), frame);
    fill(img, origin, (1, 1), (size - 2, size - 2), RECEPTOR);

    let half = size / 2;
    let slot = half.saturating_sub(2).max(1);
    for direction in Direction::ALL {
        let Some(marble) = receptor.slot(direction) else {
            continue;
        };
        let offset = match direction {
            Direction::Top => ((size - slot) / 2, 1),
            Direction::Right => (size - slot - 1, (size - slot) / 2),
            Direction::Bottom => ((size - slot) / 2, size - slot - 1),
            Direction::Left => (1, (size - slot) / 2),
        };
        fill(img, origin, offset, (slot, slot), marble_color(marble));
    }
}

/// Write a snapshot of `grid` as a PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_board_png(grid: &Grid, output_path: &Path) -> Result<()> {
    let img = render_board(grid);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MarbleError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| MarbleError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    tracing::info!(path = %output_path.display(), "board snapshot written");
    Ok(())
}

//! Rendering helpers that turn a committed [`QrCode`] into pixels or text.
//!
//! Nothing here feeds back into encoding; every function only reads the
//! module grid through [`QrCode::get_module`].

use crate::error::Result;
use crate::qrcode::{QrCode, QrCodeEcc};

use image::{Rgba, RgbaImage};
use log::debug;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Corner rounding radius as a fraction of the module pitch.
const ROUND_FRACTION: f32 = 0.4;

/*---- Raster rendering ----*/

/// How a single dark module is drawn.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ModuleStyle {
    /// Full square cell.
    #[default]
    Square,
    /// Circle inscribed in the cell.
    Dot,
    /// Square with every corner rounded.
    Rounded,
    /// Neighbour-aware rounding: adjacent dark modules merge into smooth shapes.
    Blob,
}

/// Options for [`to_image`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RenderOptions {
    /// Requested image side in pixels. The actual side is the largest
    /// multiple of the module count that fits.
    pub size: u32,
    /// Width of the dark frame, in modules.
    pub border: u32,
    /// Light gap between the frame and the symbol, in modules.
    pub padding: u32,
    pub dark: Rgba<u8>,
    pub light: Rgba<u8>,
    /// Multiplies the alpha channel of both colours, clamped to [0, 1].
    pub opacity: f32,
    pub style: ModuleStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 1024,
            border: 1,
            padding: 1,
            dark: Rgba([0, 0, 0, 255]),
            light: Rgba([255, 255, 255, 255]),
            opacity: 1.0,
            style: ModuleStyle::Square,
        }
    }
}

/// What gets painted dark inside one cell.
#[derive(Clone, Copy, PartialEq, Debug)]
enum Shape {
    Full,
    Circle,
    /// Rounded corners, clockwise from top-left.
    Rounded([bool; 4]),
    /// Concave dark fills in the corners of a light cell, clockwise from top-left.
    Concave([bool; 4]),
}

/// Renders `qr` into an RGBA image.
///
/// Layout from the outside in: a `border`-module dark frame, a
/// `padding`-module light zone, then the symbol itself.
///
/// # Example
///
/// ```rust
/// use qrsymbol::helper::{to_image, RenderOptions};
/// use qrsymbol::qrcode::{QrCode, QrCodeEcc};
///
/// let qr = QrCode::encode_text("Hello, World!", QrCodeEcc::Medium).unwrap();
/// let img = to_image(&qr, &RenderOptions::default());
/// assert_eq!(img.width(), img.height());
/// ```
pub fn to_image(qr: &QrCode, options: &RenderOptions) -> RgbaImage {
    let count = qr.module_count() as u32;
    let total = count + 2 * options.border + 2 * options.padding;
    let pitch = (options.size / total).max(1);
    let side = pitch * total;
    let dark = with_opacity(options.dark, options.opacity);
    let light = with_opacity(options.light, options.opacity);

    let mut img = RgbaImage::from_pixel(side, side, light);
    let inset = options.border + options.padding;
    let far = total - options.border;
    for my in 0..total {
        for mx in 0..total {
            let in_frame = mx < options.border || my < options.border || mx >= far || my >= far;
            let shape = if in_frame {
                Some(Shape::Full)
            } else if (inset..inset + count).contains(&mx) && (inset..inset + count).contains(&my) {
                module_shape(qr, (mx - inset) as i32, (my - inset) as i32, options.style)
            } else {
                None
            };
            if let Some(shape) = shape {
                fill_cell(&mut img, mx * pitch, my * pitch, pitch, shape, dark);
            }
        }
    }
    img
}

fn with_opacity(color: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let Rgba([r, g, b, a]) = color;
    let alpha = (f32::from(a) * opacity.clamp(0.0, 1.0)).round() as u8;
    Rgba([r, g, b, alpha])
}

fn module_shape(qr: &QrCode, x: i32, y: i32, style: ModuleStyle) -> Option<Shape> {
    let dark = qr.get_module(x, y);
    match style {
        ModuleStyle::Square => dark.then_some(Shape::Full),
        ModuleStyle::Dot => dark.then_some(Shape::Circle),
        ModuleStyle::Rounded => dark.then_some(Shape::Rounded([true; 4])),
        ModuleStyle::Blob => {
            let at = |dx: i32, dy: i32| qr.get_module(x + dx, y + dy);
            let (up, right, down, left) = (at(0, -1), at(1, 0), at(0, 1), at(-1, 0));
            if dark {
                Some(Shape::Rounded([
                    !up && !left,
                    !up && !right,
                    !down && !right,
                    !down && !left,
                ]))
            } else {
                let fills = [
                    up && left && at(-1, -1),
                    up && right && at(1, -1),
                    down && right && at(1, 1),
                    down && left && at(-1, 1),
                ];
                fills.contains(&true).then_some(Shape::Concave(fills))
            }
        }
    }
}

fn fill_cell(img: &mut RgbaImage, x0: u32, y0: u32, pitch: u32, shape: Shape, color: Rgba<u8>) {
    for py in 0..pitch {
        for px in 0..pitch {
            if covers(shape, pitch, px, py) {
                img.put_pixel(x0 + px, y0 + py, color);
            }
        }
    }
}

/// Whether the pixel at `(px, py)` inside a cell is painted for `shape`.
fn covers(shape: Shape, pitch: u32, px: u32, py: u32) -> bool {
    let p = pitch as f32;
    let (u, v) = (px as f32 + 0.5, py as f32 + 0.5);
    let r = p * ROUND_FRACTION;
    match shape {
        Shape::Full => true,
        Shape::Circle => {
            let c = p / 2.0;
            (u - c).powi(2) + (v - c).powi(2) <= c * c
        }
        Shape::Rounded(corners) => {
            corner_region(u, v, p, r).map_or(true, |(i, dist2)| !corners[i] || dist2 <= r * r)
        }
        Shape::Concave(fills) => {
            corner_region(u, v, p, r).map_or(false, |(i, dist2)| fills[i] && dist2 > r * r)
        }
    }
}

/// Corner square a point falls in (clockwise from top-left) and its squared
/// distance to that corner's arc centre.
fn corner_region(u: f32, v: f32, p: f32, r: f32) -> Option<(usize, f32)> {
    let (left, right) = (u < r, u > p - r);
    let (top, bottom) = (v < r, v > p - r);
    let (index, cx, cy) = match (top, bottom, left, right) {
        (true, _, true, _) => (0, r, r),
        (true, _, _, true) => (1, p - r, r),
        (_, true, _, true) => (2, p - r, p - r),
        (_, true, true, _) => (3, r, p - r),
        _ => return None,
    };
    Some((index, (u - cx).powi(2) + (v - cy).powi(2)))
}

/*---- Text rendering ----*/

// Returns a string of SVG code for an image depicting
// the given QR Code, with the given number of border modules.
// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(qr: &QrCode, border: i32) -> String {
    assert!(border >= 0, "Border must be non-negative");
    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    let dimension = qr.size() + border * 2;
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
        dimension
    );
    result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
    result += "\t<path d=\"";
    let mut first = true;
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if qr.get_module(x, y) {
                if !first {
                    result += " ";
                }
                first = false;
                result += &format!("M{},{}h1v1h-1z", x + border, y + border);
            }
        }
    }
    result += "\" fill=\"#000000\"/>\n";
    result += "</svg>\n";
    result
}

/// Renders the symbol as text, two characters per module, with a light
/// quiet zone of `border` modules.
pub fn to_ascii_string(qr: &QrCode, border: i32) -> String {
    let mut result = String::new();
    for y in -border..qr.size() + border {
        for x in -border..qr.size() + border {
            result += if qr.get_module(x, y) { "██" } else { "  " };
        }
        result.push('\n');
    }
    result
}

/// Prints the given QrCode object to the console.
pub fn print_qr(qr: &QrCode) {
    println!("{}", to_ascii_string(qr, 4));
}

/*---- Files and one-shot helpers ----*/

/// Renders a QR Code and saves it as a PNG file.
///
/// # Arguments
///
/// * `qr` - The QR Code object to convert.
/// * `options` - Raster layout and styling.
/// * `directory_path` - Optional. Target directory, created if missing. Defaults to "generated".
/// * `filename` - Optional. File name, with or without the `.png` extension. Defaults to a timestamp.
///
/// # Errors
///
/// Returns an `image::ImageError` if the directory cannot be created or the image cannot be written.
pub fn qr_to_image_and_save(
    qr: &QrCode,
    options: &RenderOptions,
    directory_path: Option<&str>,
    filename: Option<&str>,
) -> std::result::Result<(), image::ImageError> {
    let img = to_image(qr, options);

    let directory_path = directory_path.unwrap_or("generated");
    let filename = match filename {
        Some(name) if name.ends_with(".png") => name.to_string(),
        Some(name) => format!("{}.png", name),
        None => {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default();
            format!("{}.png", millis)
        }
    };

    let directory = Path::new(directory_path);
    if !directory.exists() {
        fs::create_dir_all(directory)?;
    }

    let file_path = directory.join(filename);
    debug!("writing {}x{} image to {}", img.width(), img.height(), file_path.display());
    img.save(&file_path)
}

/// Encodes `content` and renders it to an in-memory image.
///
/// # Example
///
/// ```
/// use qrsymbol::helper::{generate_image_buffer, RenderOptions};
/// use qrsymbol::qrcode::QrCodeEcc;
///
/// let img = generate_image_buffer("Hello, World!", QrCodeEcc::Low, &RenderOptions::default()).unwrap();
/// ```
pub fn generate_image_buffer(content: &str, ecl: QrCodeEcc, options: &RenderOptions) -> Result<RgbaImage> {
    let qr = QrCode::encode_text(content, ecl)?;
    Ok(to_image(&qr, options))
}

/// Encodes `content` and returns it as SVG with a four-module quiet zone.
///
/// # Example
///
/// ```
/// use qrsymbol::helper::generate_svg_string;
/// use qrsymbol::qrcode::QrCodeEcc;
///
/// let svg_string = generate_svg_string("Hello, World!", QrCodeEcc::Low).unwrap();
/// assert!(svg_string.ends_with("</svg>\n"));
/// ```
pub fn generate_svg_string(content: &str, ecl: QrCodeEcc) -> Result<String> {
    let qr = QrCode::encode_text(content, ecl)?;
    Ok(to_svg_string(&qr, 4))
}

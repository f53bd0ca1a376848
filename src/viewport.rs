//! Viewport geometry: derives the on-screen tile side length (in pixels) that
//! represents a user's foveal viewport, used by the luminance analyzer to pick
//! its tile grid. See SPEC_FULL.md §4.1.

/// Default screen physical diagonal, in cm (15 inches).
pub const DEFAULT_SCREEN_DIAGONAL_CM: f64 = 15.0 * 2.54;
/// Default viewing distance, in cm (26 inches).
pub const DEFAULT_VIEW_DISTANCE_CM: f64 = 26.0 * 2.54;
/// Default viewport half-angle, in degrees.
pub const DEFAULT_VIEWPORT_ANGLE_DEG: f64 = 10.0;

/// Result of the viewport calculation: the fraction of the screen covered by
/// the circular viewport, the fraction covered by its inscribed square, and
/// the square's side length in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub circular_fraction: f64,
    pub square_fraction: f64,
    pub square_side_px: u32,
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Compute the viewport geometry for a screen of `resolution = (height, width)`
/// pixels, `screen_size_cm` diagonal, viewed from `view_distance_cm`, at a
/// viewport half-angle of `viewport_angle_deg`.
pub fn calc_viewport(
    resolution: (u32, u32),
    screen_size_cm: f64,
    view_distance_cm: f64,
    viewport_angle_deg: f64,
) -> Viewport {
    let (height, width) = resolution;

    let radius = view_distance_cm * (viewport_angle_deg * std::f64::consts::PI / 180.0).tan();
    let circle_area = std::f64::consts::PI * radius * radius;

    let divisor = gcd(height as u64, width as u64).max(1);
    let aspect_h = height as f64 / divisor as f64;
    let aspect_w = width as f64 / divisor as f64;
    let hypotenuse = (aspect_h * aspect_h + aspect_w * aspect_w).sqrt();

    let screen_h_cm = aspect_h / hypotenuse * screen_size_cm;
    let screen_w_cm = aspect_w / hypotenuse * screen_size_cm;
    let screen_area = screen_h_cm * screen_w_cm;

    let pixels_per_cm = height as f64 / screen_h_cm;
    let square_side_cm = std::f64::consts::SQRT_2 * radius;
    let square_side_px = (square_side_cm * pixels_per_cm).ceil().max(1.0) as u32;

    Viewport {
        circular_fraction: circle_area / screen_area,
        square_fraction: (square_side_cm * square_side_cm) / screen_area,
        square_side_px,
    }
}

/// Convenience wrapper using the WCAG-default screen/viewing assumptions
/// (SPEC_FULL.md §6), with the screen resolution taken from the decoded frame.
pub fn calc_viewport_default(resolution: (u32, u32)) -> Viewport {
    calc_viewport(
        resolution,
        DEFAULT_SCREEN_DIAGONAL_CM,
        DEFAULT_VIEW_DISTANCE_CM,
        DEFAULT_VIEWPORT_ANGLE_DEG,
    )
}

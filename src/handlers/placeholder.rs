use axum::{
    extract::{Path, rejection::PathRejection},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

const DEFAULT_WIDTH: u32 = 400;
const DEFAULT_HEIGHT: u32 = 300;
const MAX_DIMENSION: u32 = 4000;

/// Requested image size, after falling back per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderSize {
    pub width: u32,
    pub height: u32,
}

impl Default for PlaceholderSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl PlaceholderSize {
    /// Parse `800/600` or `800x600`. Anything unusable falls back to 400×300.
    pub fn from_path(raw: &str) -> Self {
        let mut segments = raw.split('/').filter(|s| !s.is_empty());
        let first = segments.next().unwrap_or_default();
        let (w, h) = match segments.next() {
            Some(second) => (first, second),
            None => first.split_once(['x', 'X', '×']).unwrap_or((first, "")),
        };
        Self {
            width: parse_dimension(w).unwrap_or(DEFAULT_WIDTH),
            height: parse_dimension(h).unwrap_or(DEFAULT_HEIGHT),
        }
    }

    pub fn label(&self) -> String {
        format!("{}×{}", self.width, self.height)
    }

    pub fn to_svg(&self) -> String {
        let Self { width, height } = *self;
        let font_size = (width.min(height) / 8).clamp(10, 96);
        format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
                "<rect width=\"100%\" height=\"100%\" fill=\"#e5e7eb\"/>",
                "<text x=\"50%\" y=\"50%\" dominant-baseline=\"middle\" text-anchor=\"middle\" ",
                "font-family=\"system-ui, sans-serif\" font-size=\"{fs}\" fill=\"#6b7280\">{label}</text>",
                "</svg>"
            ),
            w = width,
            h = height,
            fs = font_size,
            label = self.label(),
        )
    }
}

fn parse_dimension(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|v| (1..=MAX_DIMENSION).contains(v))
}

fn svg_response(size: PlaceholderSize) -> Response {
    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("image/svg+xml"),
            ),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=86400"),
            ),
        ],
        size.to_svg(),
    )
        .into_response()
}

/// GET /api/placeholder/{width}/{height}
///
/// A path that cannot be decoded (non-UTF-8 segments) serves the default size.
pub async fn placeholder(size: Result<Path<String>, PathRejection>) -> Response {
    let size = match size {
        Ok(Path(raw)) => PlaceholderSize::from_path(&raw),
        Err(rejection) => {
            debug!(%rejection, "undecodable placeholder path; serving default size");
            PlaceholderSize::default()
        }
    };
    svg_response(size)
}

/// GET /api/placeholder and /api/placeholder/
pub async fn placeholder_default() -> Response {
    svg_response(PlaceholderSize::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_segments_set_width_and_height() {
        let size = PlaceholderSize::from_path("800/600");
        assert_eq!(size, PlaceholderSize { width: 800, height: 600 });
        assert!(size.to_svg().contains("800×600"));
    }

    #[test]
    fn unparseable_segments_fall_back() {
        assert_eq!(PlaceholderSize::from_path("abc/def"), PlaceholderSize::default());
        assert_eq!(
            PlaceholderSize::from_path("640/zzz"),
            PlaceholderSize { width: 640, height: 300 }
        );
        assert_eq!(PlaceholderSize::from_path(""), PlaceholderSize::default());
    }

    #[test]
    fn single_segment_accepts_wxh() {
        assert_eq!(
            PlaceholderSize::from_path("1200x630"),
            PlaceholderSize { width: 1200, height: 630 }
        );
        assert_eq!(
            PlaceholderSize::from_path("320"),
            PlaceholderSize { width: 320, height: 300 }
        );
    }

    #[test]
    fn out_of_range_dimensions_fall_back() {
        assert_eq!(PlaceholderSize::from_path("0/0"), PlaceholderSize::default());
        assert_eq!(
            PlaceholderSize::from_path("99999/200"),
            PlaceholderSize { width: 400, height: 200 }
        );
    }
}

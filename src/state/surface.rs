use web_sys::HtmlCanvasElement;

use crate::model::Affine;

/// Something markers are drawn onto and pointer input comes from.
///
/// Both queries are live: placement changes on resize or page scroll, so
/// callers ask again every time.
pub trait Surface {
    /// Map from surface-local pixel coordinates to client (input event)
    /// coordinates. `None` until the surface is laid out.
    fn placement(&self) -> Option<Affine>;

    /// Drawable size in surface-local pixels. `None` while zero-sized.
    fn pixel_size(&self) -> Option<(f64, f64)>;
}

impl Surface for HtmlCanvasElement {
    fn placement(&self) -> Option<Affine> {
        if !self.is_connected() {
            return None;
        }
        let (w, h) = self.pixel_size()?;
        let rect = self.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        // CSS box may be stretched relative to the backing store
        Some(Affine {
            a: rect.width() / w,
            b: 0.0,
            c: 0.0,
            d: rect.height() / h,
            e: rect.left(),
            f: rect.top(),
        })
    }

    fn pixel_size(&self) -> Option<(f64, f64)> {
        let w = self.width() as f64;
        let h = self.height() as f64;
        (w > 0.0 && h > 0.0).then_some((w, h))
    }
}

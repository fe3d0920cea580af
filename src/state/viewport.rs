//! Pan/zoom view state: the logical → surface transform plus the drag anchor.
//!
//! Client coordinates are what input events carry. The surface placement maps
//! surface pixels to client coordinates, and the view transform maps logical
//! marker space to surface pixels, so a client point goes back to logical
//! space through both inverses.

use crate::error::{Result, ViewportError};
use crate::model::{Affine, MarkerStore, Point};
use crate::state::Surface;

/// Zoom bounds; far inside the range where the determinant stays representable.
pub const MIN_ZOOM: f64 = 1e-6;
pub const MAX_ZOOM: f64 = 1e6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Positive wheel delta (scrolling down) zooms out.
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y > 0.0 {
            ZoomDirection::Out
        } else {
            ZoomDirection::In
        }
    }

    pub fn factor(self, ratio: f64) -> f64 {
        match self {
            ZoomDirection::Out => ratio,
            ZoomDirection::In => 1.0 / ratio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Drag {
    #[default]
    Idle,
    /// Last client-space pointer position of an active drag.
    Dragging { anchor: Point },
}

/// Map a client-space point into logical space under `transform`.
pub fn screen_to_logical<S: Surface + ?Sized>(
    surface: &S,
    transform: Affine,
    client: Point,
) -> Result<Point> {
    let placement = surface.placement().ok_or(ViewportError::NotLaidOut)?;
    let local = placement.inverse()?.apply(client);
    Ok(transform.inverse()?.apply(local))
}

#[derive(Debug, Clone, Default)]
pub struct Viewport {
    transform: Affine,
    drag: Drag,
    initialized: bool,
}

impl Viewport {
    pub fn transform(&self) -> Affine {
        self.transform
    }

    #[cfg(test)]
    pub fn drag(&self) -> Drag {
        self.drag
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Put the logical origin at the center of the surface at unit scale.
    pub fn center_on_origin<S: Surface + ?Sized>(&mut self, surface: &S) -> Result<()> {
        let (w, h) = surface.pixel_size().ok_or(ViewportError::NotLaidOut)?;
        self.transform = Affine::translation(w / 2.0, h / 2.0);
        self.initialized = true;
        Ok(())
    }

    pub fn screen_to_logical<S: Surface + ?Sized>(&self, surface: &S, client: Point) -> Result<Point> {
        screen_to_logical(surface, self.transform, client)
    }

    /// Logical corners of the visible surface area: top-left, bottom-right.
    /// Either may be numerically larger on each axis.
    pub fn visible_corners<S: Surface + ?Sized>(&self, surface: &S) -> Result<(Point, Point)> {
        let (w, h) = surface.pixel_size().ok_or(ViewportError::NotLaidOut)?;
        let placement = surface.placement().ok_or(ViewportError::NotLaidOut)?;
        let top_left = self.screen_to_logical(surface, placement.apply(Point::ORIGIN))?;
        let bottom_right = self.screen_to_logical(surface, placement.apply(Point::new(w, h)))?;
        Ok((top_left, bottom_right))
    }

    /// Append a marker at a uniformly random logical point inside the visible
    /// area. `sample` yields values in `[0, 1)`.
    pub fn add_marker_in_view<S, F>(
        &self,
        surface: &S,
        markers: &mut MarkerStore,
        mut sample: F,
    ) -> Result<Point>
    where
        S: Surface + ?Sized,
        F: FnMut() -> f64,
    {
        let (p0, p1) = self.visible_corners(surface)?;
        let x = p0.x + sample() * (p1.x - p0.x);
        let y = p0.y + sample() * (p1.y - p0.y);
        let p = Point::new(x, y);
        markers.push(p);
        Ok(p)
    }

    pub fn begin_pan(&mut self, client: Point) {
        self.drag = Drag::Dragging { anchor: client };
    }

    /// Move the view so the logical point under the anchor follows the
    /// pointer. Returns `Ok(false)` when no drag is active.
    pub fn continue_pan<S: Surface + ?Sized>(&mut self, surface: &S, client: Point) -> Result<bool> {
        let Drag::Dragging { anchor } = self.drag else {
            return Ok(false);
        };
        let from = self.screen_to_logical(surface, anchor)?;
        let to = self.screen_to_logical(surface, client)?;
        self.transform = self.transform.translated(to.x - from.x, to.y - from.y);
        self.drag = Drag::Dragging { anchor: client };
        Ok(true)
    }

    pub fn end_pan(&mut self) {
        self.drag = Drag::Idle;
    }

    /// Scale by `ratio` (out) or `1 / ratio` (in) about the logical point
    /// under `client`. Returns `Ok(false)` and keeps the view when the step
    /// would leave `MIN_ZOOM..=MAX_ZOOM`.
    pub fn zoom<S: Surface + ?Sized>(
        &mut self,
        surface: &S,
        client: Point,
        direction: ZoomDirection,
        ratio: f64,
    ) -> Result<bool> {
        let pivot = self.screen_to_logical(surface, client)?;
        let next = self.transform.scaled_about(direction.factor(ratio), pivot);
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&next.scale_factor()) {
            return Ok(false);
        }
        self.transform = next;
        Ok(true)
    }

    /// Logical radius that renders as `screen_radius` client pixels under the
    /// current transform.
    pub fn marker_radius<S: Surface + ?Sized>(&self, surface: &S, screen_radius: f64) -> Result<f64> {
        let origin = self.screen_to_logical(surface, Point::ORIGIN)?;
        let probe = self.screen_to_logical(surface, Point::new(screen_radius, 0.0))?;
        Ok(origin.distance_to(probe))
    }

    /// Current magnification relative to the initial unit-scale view.
    pub fn zoom_level(&self) -> f64 {
        self.transform.scale_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::surface::fake::FakeSurface;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-9;

    fn assert_near(a: Point, b: Point) {
        assert!(a.distance_to(b) < EPS, "{a:?} != {b:?}");
    }

    fn centered(surface: &FakeSurface) -> Viewport {
        let mut vp = Viewport::default();
        vp.center_on_origin(surface).unwrap();
        vp
    }

    fn surfaces() -> Vec<FakeSurface> {
        vec![
            FakeSurface::at_origin(800.0, 600.0),
            FakeSurface::placed(640.0, 480.0, 30.0, 72.0, 1.0),
            FakeSurface::placed(1024.0, 768.0, 12.5, 40.0, 0.5),
        ]
    }

    #[test]
    fn initial_view_centers_origin() {
        let surface = FakeSurface::at_origin(800.0, 600.0);
        let vp = centered(&surface);
        assert!(vp.is_initialized());
        let p = vp.screen_to_logical(&surface, Point::new(400.0, 300.0)).unwrap();
        assert_near(p, Point::ORIGIN);
    }

    #[test]
    fn initial_view_centers_origin_on_offset_surface() {
        let surface = FakeSurface::placed(640.0, 480.0, 30.0, 72.0, 0.5);
        let vp = centered(&surface);
        let client_center = Point::new(30.0 + 160.0, 72.0 + 120.0);
        let p = vp.screen_to_logical(&surface, client_center).unwrap();
        assert_near(p, Point::ORIGIN);
    }

    #[test]
    fn logical_round_trip() {
        for surface in surfaces() {
            let mut vp = centered(&surface);
            vp.zoom(&surface, Point::new(120.0, 90.0), ZoomDirection::In, 0.9).unwrap();
            vp.begin_pan(Point::new(10.0, 10.0));
            vp.continue_pan(&surface, Point::new(57.0, -23.0)).unwrap();
            vp.end_pan();
            let placement = surface.placement().unwrap();
            for client in [
                Point::new(0.0, 0.0),
                Point::new(333.3, 17.0),
                Point::new(-50.0, 900.0),
            ] {
                let logical = vp.screen_to_logical(&surface, client).unwrap();
                let back = placement.apply(vp.transform().apply(logical));
                assert_near(back, client);
                assert_near(vp.screen_to_logical(&surface, back).unwrap(), logical);
            }
        }
    }

    #[test]
    fn zoom_keeps_pivot_under_pointer() {
        for surface in surfaces() {
            for direction in [ZoomDirection::In, ZoomDirection::Out] {
                let mut vp = centered(&surface);
                let client = Point::new(211.0, 143.0);
                let pivot = vp.screen_to_logical(&surface, client).unwrap();
                let before = vp.transform().apply(pivot);
                vp.zoom(&surface, client, direction, 0.9).unwrap();
                assert_near(vp.transform().apply(pivot), before);
                assert_near(vp.screen_to_logical(&surface, client).unwrap(), pivot);
            }
        }
    }

    #[test]
    fn two_zoom_outs_compound() {
        let surface = FakeSurface::at_origin(800.0, 600.0);
        let mut vp = centered(&surface);
        let client = Point::new(500.0, 120.0);
        vp.zoom(&surface, client, ZoomDirection::Out, 0.9).unwrap();
        vp.zoom(&surface, client, ZoomDirection::Out, 0.9).unwrap();
        assert!((vp.zoom_level() - 0.81).abs() < EPS);
        vp.zoom(&surface, client, ZoomDirection::In, 0.9).unwrap();
        assert!((vp.zoom_level() - 0.9).abs() < EPS);
    }

    #[test]
    fn zoom_stops_at_bounds_and_stays_invertible() {
        let surface = FakeSurface::at_origin(800.0, 600.0);
        let client = Point::new(300.0, 200.0);
        for (direction, back, bound) in [
            (ZoomDirection::Out, ZoomDirection::In, MIN_ZOOM),
            (ZoomDirection::In, ZoomDirection::Out, MAX_ZOOM),
        ] {
            let mut vp = centered(&surface);
            let mut applied = 0;
            for _ in 0..10_000 {
                if vp.zoom(&surface, client, direction, 0.9).unwrap() {
                    applied += 1;
                }
            }
            assert!(applied < 10_000);
            let level = vp.zoom_level();
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&level));
            assert!((level.ln() - bound.ln()).abs() < 0.9_f64.ln().abs() + 1e-9);
            assert!(vp.marker_radius(&surface, 5.0).is_ok());
            assert!(vp.zoom(&surface, client, back, 0.9).unwrap());
            assert!(vp.screen_to_logical(&surface, client).is_ok());
        }
    }

    #[test]
    fn pan_keeps_point_attached_to_pointer() {
        for surface in surfaces() {
            let mut vp = centered(&surface);
            vp.zoom(&surface, Point::new(40.0, 40.0), ZoomDirection::In, 0.8).unwrap();
            let a = Point::new(100.0, 80.0);
            let b = Point::new(160.0, 35.0);
            let grabbed = vp.screen_to_logical(&surface, a).unwrap();
            vp.begin_pan(a);
            assert!(vp.continue_pan(&surface, b).unwrap());
            assert_near(vp.screen_to_logical(&surface, b).unwrap(), grabbed);
            assert_eq!(vp.drag(), Drag::Dragging { anchor: b });
            assert!((vp.zoom_level() - 1.25).abs() < EPS);
        }
    }

    #[test]
    fn pan_is_noop_when_idle() {
        let surface = FakeSurface::at_origin(800.0, 600.0);
        let mut vp = centered(&surface);
        let before = vp.transform();
        assert!(!vp.continue_pan(&surface, Point::new(10.0, 10.0)).unwrap());
        assert_eq!(vp.transform(), before);

        vp.begin_pan(Point::new(0.0, 0.0));
        vp.end_pan();
        assert_eq!(vp.drag(), Drag::Idle);
        assert!(!vp.continue_pan(&surface, Point::new(99.0, 99.0)).unwrap());
        assert_eq!(vp.transform(), before);
    }

    #[test]
    fn begin_pan_leaves_transform_alone() {
        let surface = FakeSurface::at_origin(300.0, 200.0);
        let mut vp = centered(&surface);
        let before = vp.transform();
        vp.begin_pan(Point::new(12.0, 34.0));
        assert_eq!(vp.transform(), before);
        assert_eq!(vp.drag(), Drag::Dragging { anchor: Point::new(12.0, 34.0) });
    }

    fn assert_samples_inside(vp: &Viewport, surface: &FakeSurface) {
        let (p0, p1) = vp.visible_corners(surface).unwrap();
        let (x_lo, x_hi) = (p0.x.min(p1.x), p0.x.max(p1.x));
        let (y_lo, y_hi) = (p0.y.min(p1.y), p0.y.max(p1.y));
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut store = MarkerStore::default();
        for _ in 0..1000 {
            let p = vp
                .add_marker_in_view(surface, &mut store, || rng.random::<f64>())
                .unwrap();
            assert!(p.x >= x_lo - EPS && p.x <= x_hi + EPS, "x {} outside [{x_lo}, {x_hi}]", p.x);
            assert!(p.y >= y_lo - EPS && p.y <= y_hi + EPS, "y {} outside [{y_lo}, {y_hi}]", p.y);
        }
        assert_eq!(store.len(), 1000);
    }

    #[test]
    fn added_markers_stay_in_view() {
        for surface in surfaces() {
            let mut vp = centered(&surface);
            vp.zoom(&surface, Point::new(10.0, 400.0), ZoomDirection::Out, 0.9).unwrap();
            let (p0, p1) = vp.visible_corners(&surface).unwrap();
            assert!(p0.x < p1.x && p0.y < p1.y);
            assert_samples_inside(&vp, &surface);
        }
    }

    #[test]
    fn added_markers_stay_in_view_with_flipped_axes() {
        let surface = FakeSurface::at_origin(400.0, 300.0);
        let vp = Viewport {
            transform: Affine::translation(200.0, 150.0).multiply(Affine::scaling(-2.0, -0.5)),
            drag: Drag::Idle,
            initialized: true,
        };
        let (p0, p1) = vp.visible_corners(&surface).unwrap();
        assert!(p0.x > p1.x && p0.y > p1.y);
        assert_samples_inside(&vp, &surface);
    }

    #[test]
    fn markers_accumulate_in_call_order() {
        let surface = FakeSurface::at_origin(100.0, 100.0);
        let vp = centered(&surface);
        let mut store = MarkerStore::default();
        let mut seq = [0.0, 0.0, 0.5, 0.5, 0.25, 0.75].into_iter();
        let mut added = Vec::new();
        for _ in 0..3 {
            let p = vp
                .add_marker_in_view(&surface, &mut store, || seq.next().unwrap())
                .unwrap();
            added.push(p);
        }
        assert_eq!(store.len(), 3);
        assert_eq!(store.iter().copied().collect::<Vec<_>>(), added);
        assert_near(added[0], Point::new(-50.0, -50.0));
        assert_near(added[1], Point::ORIGIN);
        assert_near(added[2], Point::new(-25.0, 25.0));
    }

    #[test]
    fn marker_radius_is_constant_on_screen() {
        for surface in surfaces() {
            let css_scale = surface.placement().unwrap().scale_factor();
            let mut vp = centered(&surface);
            let on_screen =
                |vp: &Viewport| vp.marker_radius(&surface, 5.0).unwrap() * vp.zoom_level() * css_scale;
            assert!((on_screen(&vp) - 5.0).abs() < EPS);
            for direction in [ZoomDirection::In, ZoomDirection::In, ZoomDirection::Out] {
                vp.zoom(&surface, Point::new(77.0, 13.0), direction, 0.9).unwrap();
                assert!((on_screen(&vp) - 5.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn detached_surface_is_reported_and_state_kept() {
        let surface = FakeSurface::detached(800.0, 600.0);
        let mut vp = Viewport::default();
        assert_eq!(vp.center_on_origin(&FakeSurface::at_origin(0.0, 0.0)), Err(ViewportError::NotLaidOut));
        assert!(!vp.is_initialized());

        let before = vp.transform();
        assert_eq!(
            vp.screen_to_logical(&surface, Point::ORIGIN),
            Err(ViewportError::NotLaidOut)
        );
        assert_eq!(
            vp.zoom(&surface, Point::ORIGIN, ZoomDirection::In, 0.9),
            Err(ViewportError::NotLaidOut)
        );
        assert_eq!(vp.transform(), before);
        assert_eq!(vp.marker_radius(&surface, 5.0), Err(ViewportError::NotLaidOut));

        let mut store = MarkerStore::default();
        assert!(vp.add_marker_in_view(&surface, &mut store, || 0.5).is_err());
        assert!(store.is_empty());

        vp.begin_pan(Point::ORIGIN);
        assert!(vp.continue_pan(&surface, Point::new(5.0, 5.0)).is_err());
        assert_eq!(vp.drag(), Drag::Dragging { anchor: Point::ORIGIN });
        assert_eq!(vp.transform(), before);
    }

    #[test]
    fn wheel_delta_picks_direction() {
        assert_eq!(ZoomDirection::from_wheel_delta(120.0), ZoomDirection::Out);
        assert_eq!(ZoomDirection::from_wheel_delta(-3.0), ZoomDirection::In);
        assert!((ZoomDirection::In.factor(0.8) - 1.25).abs() < EPS);
        assert_eq!(ZoomDirection::Out.factor(0.8), 0.8);
    }
}

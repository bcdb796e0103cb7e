//! Pan and zoom of the chart content.
//!
//! A [`ZoomTransform`] maps chart coordinates to viewport coordinates as
//! `viewport = chart * k + (x, y)`. [`ZoomBehavior`] turns [`ZoomEvent`]s into
//! new transforms, clamping the scale to its extent and keeping the visible
//! area inside the viewport extent the way d3-zoom's default constraint does.

use dendra_core::geometry::{Bounds, Point};

/// Wheel delta multiplier for pixel-mode wheel events.
const WHEEL_DELTA: f32 = 0.002;

/// Uniform scale followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    k: f32,
    x: f32,
    y: f32,
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn new(k: f32, x: f32, y: f32) -> Self {
        Self { k, x, y }
    }

    pub fn k(&self) -> f32 {
        self.k
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Maps a chart point to the viewport.
    pub fn apply(&self, point: Point) -> Point {
        Point::new(point.x() * self.k + self.x, point.y() * self.k + self.y)
    }

    /// Maps a viewport point back to chart coordinates.
    pub fn invert(&self, point: Point) -> Point {
        Point::new(self.invert_x(point.x()), self.invert_y(point.y()))
    }

    fn invert_x(&self, x: f32) -> f32 {
        (x - self.x) / self.k
    }

    fn invert_y(&self, y: f32) -> f32 {
        (y - self.y) / self.k
    }

    /// Moves by `(dx, dy)` chart units, scaled by `k`.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            k: self.k,
            x: self.x + self.k * dx,
            y: self.y + self.k * dy,
        }
    }

    /// Value for an SVG `transform` attribute.
    pub fn to_svg_value(&self) -> String {
        format!("translate({},{}) scale({})", self.x, self.y, self.k)
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A discrete zoom input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomEvent {
    /// Mouse wheel at `pointer` (viewport coordinates); negative `delta_y` zooms in.
    Wheel { pointer: Point, delta_y: f32 },
    /// Pointer drag by a viewport-space offset.
    Drag { dx: f32, dy: f32 },
    /// Jump to an explicit transform.
    Transform(ZoomTransform),
}

/// Scale and translate limits for a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBehavior {
    min_scale: f32,
    max_scale: f32,
    extent: Bounds,
    translate_extent: Bounds,
}

impl ZoomBehavior {
    /// Zoom over the viewport `extent`; panning is confined to the same area.
    pub fn new(extent: Bounds, min_scale: f32, max_scale: f32) -> Self {
        Self {
            min_scale,
            max_scale,
            extent,
            translate_extent: extent,
        }
    }

    pub fn extent(&self) -> Bounds {
        self.extent
    }

    pub fn scale_extent(&self) -> (f32, f32) {
        (self.min_scale, self.max_scale)
    }

    fn clamp_scale(&self, k: f32) -> f32 {
        k.clamp(self.min_scale, self.max_scale)
    }

    /// Computes the transform that results from `event`.
    pub fn apply(&self, current: ZoomTransform, event: ZoomEvent) -> ZoomTransform {
        match event {
            ZoomEvent::Wheel { pointer, delta_y } => {
                let k = self.clamp_scale(current.k * 2.0_f32.powf(-delta_y * WHEEL_DELTA));
                if k == current.k {
                    return current;
                }
                // Keep the chart point under the pointer fixed
                let anchor = current.invert(pointer);
                self.constrain(ZoomTransform::new(
                    k,
                    pointer.x() - anchor.x() * k,
                    pointer.y() - anchor.y() * k,
                ))
            }
            ZoomEvent::Drag { dx, dy } => self.constrain(ZoomTransform::new(
                current.k,
                current.x + dx,
                current.y + dy,
            )),
            ZoomEvent::Transform(target) => self.constrain(ZoomTransform::new(
                self.clamp_scale(target.k),
                target.x,
                target.y,
            )),
        }
    }

    /// Shifts `transform` so the visible area stays within the translate extent.
    ///
    /// When the visible area is larger than the extent along an axis it is
    /// centered on that axis instead.
    pub fn constrain(&self, transform: ZoomTransform) -> ZoomTransform {
        let dx0 = transform.invert_x(self.extent.min_x()) - self.translate_extent.min_x();
        let dx1 = transform.invert_x(self.extent.max_x()) - self.translate_extent.max_x();
        let dy0 = transform.invert_y(self.extent.min_y()) - self.translate_extent.min_y();
        let dy1 = transform.invert_y(self.extent.max_y()) - self.translate_extent.max_y();
        transform.translate(axis_shift(dx0, dx1), axis_shift(dy0, dy1))
    }

    /// Transform with `current`'s scale that puts the center of `content`
    /// (chart coordinates) at the center of the viewport.
    pub fn centered_on(&self, current: ZoomTransform, content: Bounds) -> ZoomTransform {
        let target = self.extent.center();
        let center = content.center();
        ZoomTransform::new(
            current.k,
            target.x() - center.x() * current.k,
            target.y() - center.y() * current.k,
        )
    }
}

fn axis_shift(d0: f32, d1: f32) -> f32 {
    if d1 > d0 {
        return (d0 + d1) / 2.0;
    }
    let low = d0.min(0.0);
    if low != 0.0 { low } else { d1.max(0.0) }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use dendra_core::geometry::Size;

    use super::*;

    fn behavior() -> ZoomBehavior {
        let extent = Bounds::new_from_top_left(Point::new(-250.0, -270.0), Size::new(500.0, 500.0));
        ZoomBehavior::new(extent, 1.0, 8.0)
    }

    #[test]
    fn test_apply_and_invert() {
        let t = ZoomTransform::new(2.0, 10.0, -4.0);
        let p = Point::new(3.0, 5.0);
        let mapped = t.apply(p);
        assert_approx_eq!(f32, mapped.x(), 16.0);
        assert_approx_eq!(f32, mapped.y(), 6.0);
        assert_eq!(t.invert(mapped), p);
        assert_eq!(t.to_svg_value(), "translate(10,-4) scale(2)");
    }

    #[test]
    fn test_wheel_zooms_about_pointer() {
        let zoom = behavior();
        let pointer = Point::new(40.0, -20.0);
        let next = zoom.apply(
            ZoomTransform::IDENTITY,
            ZoomEvent::Wheel {
                pointer,
                delta_y: -500.0,
            },
        );
        assert_approx_eq!(f32, next.k(), 2.0, epsilon = 1e-5);
        let fixed = next.apply(ZoomTransform::IDENTITY.invert(pointer));
        assert_approx_eq!(f32, fixed.x(), pointer.x(), epsilon = 1e-3);
        assert_approx_eq!(f32, fixed.y(), pointer.y(), epsilon = 1e-3);
    }

    #[test]
    fn test_scale_is_clamped() {
        let zoom = behavior();
        let wheel_in = ZoomEvent::Wheel {
            pointer: Point::default(),
            delta_y: -10_000.0,
        };
        assert_approx_eq!(f32, zoom.apply(ZoomTransform::IDENTITY, wheel_in).k(), 8.0);

        let wheel_out = ZoomEvent::Wheel {
            pointer: Point::default(),
            delta_y: 10_000.0,
        };
        assert_eq!(zoom.apply(ZoomTransform::IDENTITY, wheel_out), ZoomTransform::IDENTITY);

        let explicit = zoom.apply(
            ZoomTransform::IDENTITY,
            ZoomEvent::Transform(ZoomTransform::new(0.25, 0.0, 0.0)),
        );
        assert_approx_eq!(f32, explicit.k(), 1.0);
    }

    #[test]
    fn test_drag_is_confined_to_extent() {
        let zoom = behavior();
        // At scale 1 the viewport exactly covers the extent, so nothing can move
        let unscaled = zoom.apply(ZoomTransform::IDENTITY, ZoomEvent::Drag { dx: 30.0, dy: 0.0 });
        assert!(unscaled.is_identity());

        let zoomed = ZoomTransform::new(2.0, 0.0, 0.0);
        let panned = zoom.apply(zoomed, ZoomEvent::Drag { dx: 100.0, dy: 0.0 });
        assert_approx_eq!(f32, panned.x(), 100.0);

        let too_far = zoom.apply(zoomed, ZoomEvent::Drag { dx: 400.0, dy: 0.0 });
        assert_approx_eq!(f32, too_far.x(), 250.0);
        assert_approx_eq!(f32, too_far.invert(Point::new(-250.0, 0.0)).x(), -250.0);
    }

    #[test]
    fn test_centered_on_keeps_scale() {
        let zoom = behavior();
        let content = Bounds::new_from_center(Point::new(30.0, 40.0), Size::new(10.0, 10.0));
        let current = ZoomTransform::new(3.0, 7.0, 7.0);
        let centered = zoom.centered_on(current, content);

        assert_approx_eq!(f32, centered.k(), 3.0);
        let on_screen = centered.apply(content.center());
        assert_approx_eq!(f32, on_screen.x(), zoom.extent().center().x(), epsilon = 1e-4);
        assert_approx_eq!(f32, on_screen.y(), zoom.extent().center().y(), epsilon = 1e-4);
    }
}

use anyhow::{Result, anyhow, bail};
use bytemuck::{cast_slice, try_cast_slice_mut};
use eogcal_core::{Marker, MarkerStyle, Point};
use std::time::{Duration, Instant};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

const SCREEN: [u8; 4] = [0, 0, 0, 255];

pub struct FrameStats {
    pub clear: Duration,
    pub marker: Duration,
    pub total: Duration,
    pub drawn: bool,
}

/// Draws the blinking bull's-eye fixation marker into an RGBA frame.
///
/// Both blink phases are rasterised once into opaque sprites; a frame is a
/// clear followed by at most one clipped row-by-row copy.
pub struct MarkerRenderer {
    width: u32,
    height: u32,
    style: MarkerStyle,
    position: Point,
    visible: bool,
    sprites: [Pixmap; 2],
}

impl MarkerRenderer {
    pub fn new(width: u32, height: u32, style: MarkerStyle) -> Result<Self> {
        let sprites = [
            render_sprite(&style, style.foreground, style.background)?,
            render_sprite(&style, style.background, style.foreground)?,
        ];
        Ok(Self {
            width,
            height,
            style,
            position: (width as f32 / 2.0, height as f32 / 2.0),
            visible: false,
            sprites,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Which sprite is on screen at `now`.
    fn phase(&self, now: Duration) -> usize {
        if self.style.blink_hz <= 0.0 {
            return 0;
        }
        let half_periods = now.as_secs_f64() * self.style.blink_hz as f64 * 2.0;
        (half_periods.floor() as u64 % 2) as usize
    }

    pub fn render_frame(&mut self, frame: &mut [u8], now: Duration) -> Result<FrameStats> {
        let start = Instant::now();
        let expected = self.width as usize * self.height as usize * 4;
        if frame.len() != expected {
            bail!(
                "frame holds {} bytes, {}x{} needs {}",
                frame.len(),
                self.width,
                self.height,
                expected
            );
        }

        let pixels: &mut [[u8; 4]] =
            try_cast_slice_mut(frame).map_err(|e| anyhow!("frame is not RGBA8: {e}"))?;
        pixels.fill(SCREEN);
        let clear = start.elapsed();

        let drawn = self.visible;
        if drawn {
            let sprite = &self.sprites[self.phase(now)];
            blit(pixels, self.width, self.height, sprite, self.position);
        }
        let total = start.elapsed();

        Ok(FrameStats {
            clear,
            marker: total - clear,
            total,
            drawn,
        })
    }
}

impl Marker for MarkerRenderer {
    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

fn render_sprite(style: &MarkerStyle, outer: [u8; 4], inner: [u8; 4]) -> Result<Pixmap> {
    let side = (style.radius * 2.0).ceil() as u32 + 2;
    let mut pm = Pixmap::new(side, side).ok_or_else(|| anyhow!("marker sprite of {side}px"))?;
    pm.fill(Color::from_rgba8(SCREEN[0], SCREEN[1], SCREEN[2], SCREEN[3]));

    let c = side as f32 / 2.0;
    for (radius, color) in [(style.radius, outer), (style.radius / 2.0, inner)] {
        let path = PathBuilder::from_circle(c, c, radius)
            .ok_or_else(|| anyhow!("degenerate marker radius {radius}"))?;
        let mut paint = Paint::default();
        paint.set_color_rgba8(color[0], color[1], color[2], 255);
        paint.anti_alias = true;
        pm.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
    Ok(pm)
}

fn blit(dst: &mut [[u8; 4]], width: u32, height: u32, sprite: &Pixmap, center: Point) {
    let side = sprite.width() as i64;
    let left = (center.0 - side as f32 / 2.0).round() as i64;
    let top = (center.1 - side as f32 / 2.0).round() as i64;
    let (w, h) = (width as i64, height as i64);

    let x0 = left.max(0);
    let x1 = (left + side).min(w);
    if x0 >= x1 {
        return;
    }
    let src: &[[u8; 4]] = cast_slice(sprite.data());

    for sy in 0..sprite.height() as i64 {
        let y = top + sy;
        if y < 0 || y >= h {
            continue;
        }
        let s = (sy * side + (x0 - left)) as usize;
        let d = (y * w + x0) as usize;
        let n = (x1 - x0) as usize;
        dst[d..d + n].copy_from_slice(&src[s..s + n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 200;
    const H: u32 = 100;

    fn style() -> MarkerStyle {
        MarkerStyle {
            radius: 10.0,
            foreground: [200, 0, 100, 255],
            background: [0, 60, 0, 255],
            blink_hz: 2.0,
        }
    }

    fn pixel(frame: &[u8], x: u32, y: u32) -> [u8; 4] {
        let i = ((y * W + x) * 4) as usize;
        [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
    }

    #[test]
    fn hidden_marker_leaves_black_frame() {
        let mut r = MarkerRenderer::new(W, H, style()).unwrap();
        let mut frame = vec![7u8; (W * H * 4) as usize];
        let stats = r.render_frame(&mut frame, Duration::ZERO).unwrap();
        assert!(!stats.drawn);
        assert!(frame.chunks(4).all(|p| p == SCREEN));
    }

    #[test]
    fn visible_marker_draws_rings_at_position() {
        let mut r = MarkerRenderer::new(W, H, style()).unwrap();
        r.set_position((50.0, 50.0));
        r.set_visible(true);
        let mut frame = vec![0u8; (W * H * 4) as usize];
        assert!(r.render_frame(&mut frame, Duration::ZERO).unwrap().drawn);

        // ring between r/2 and r is foreground, core is background
        assert_eq!(pixel(&frame, 57, 50), [200, 0, 100, 255]);
        assert_eq!(pixel(&frame, 50, 50), [0, 60, 0, 255]);
        assert_eq!(pixel(&frame, 80, 50), SCREEN);
    }

    #[test]
    fn blink_swaps_colours_every_half_period() {
        let mut r = MarkerRenderer::new(W, H, style()).unwrap();
        r.set_position((50.0, 50.0));
        r.set_visible(true);
        let mut frame = vec![0u8; (W * H * 4) as usize];
        r.render_frame(&mut frame, Duration::from_millis(300)).unwrap();
        assert_eq!(pixel(&frame, 57, 50), [0, 60, 0, 255]);
        assert_eq!(pixel(&frame, 50, 50), [200, 0, 100, 255]);
    }

    #[test]
    fn marker_off_the_edge_is_clipped() {
        let mut r = MarkerRenderer::new(W, H, style()).unwrap();
        let mut frame = vec![0u8; (W * H * 4) as usize];
        r.set_visible(true);
        for pos in [(0.0, 0.0), (W as f32, H as f32), (-100.0, 20.0), (500.0, 500.0)] {
            r.set_position(pos);
            r.render_frame(&mut frame, Duration::ZERO).unwrap();
        }
        r.set_position((0.0, 0.0));
        r.render_frame(&mut frame, Duration::ZERO).unwrap();
        assert_eq!(pixel(&frame, 0, 0), [0, 60, 0, 255]);
    }

    #[test]
    fn rejects_frame_of_wrong_size() {
        let mut r = MarkerRenderer::new(W, H, style()).unwrap();
        let mut frame = vec![0u8; 16];
        assert!(r.render_frame(&mut frame, Duration::ZERO).is_err());
        r.resize(2, 2);
        assert!(r.render_frame(&mut frame, Duration::ZERO).is_ok());
    }
}

use crate::config::HoughParams;
use crate::fit::fit_circle;
use lamp_base::Mask;

/// A detected circle in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// boundary points backing the circle
    pub support: u32,
}

impl Circle {
    fn dist2(&self, x: f32, y: f32) -> f32 {
        (self.x - x).powi(2) + (self.y - y).powi(2)
    }
}

// fixed-point precision of the voting rays
const SHIFT: u32 = 10;
const ONE: f32 = (1 << SHIFT) as f32;

// points within this distance of the estimated radius count as support
const INLIER_BAND: f64 = 1.0;

struct EdgePixel {
    x: usize,
    y: usize,
    // gradient direction, not normalized
    gx: f32,
    gy: f32,
}

struct Edges {
    pixels: Vec<EdgePixel>,
    // sub-pixel boundary positions, halfway to each background neighbour
    boundary: Vec<[f64; 2]>,
}

// 3x3 box sums with replicated borders; sobel on these is a 5x5 operator
// whose direction is steadier on staircase edges than plain 3x3 sobel
fn box_sums(mask: &Mask) -> Vec<i32> {
    let (w, h) = (mask.width() as i64, mask.height() as i64);
    let at = |x: i64, y: i64| mask.get(x.clamp(0, w - 1), y.clamp(0, h - 1)) as i32;
    let mut sums = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            let mut s = 0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    s += at(x + dx, y + dy);
                }
            }
            sums.push(s);
        }
    }
    sums
}

fn sobel(width: i64, height: i64, x: i64, y: i64, at: impl Fn(i64, i64) -> i32) -> (i32, i32) {
    let p = |dx: i64, dy: i64| at((x + dx).clamp(0, width - 1), (y + dy).clamp(0, height - 1));
    let gx = (p(1, -1) + 2 * p(1, 0) + p(1, 1)) - (p(-1, -1) + 2 * p(-1, 0) + p(-1, 1));
    let gy = (p(-1, 1) + 2 * p(0, 1) + p(1, 1)) - (p(-1, -1) + 2 * p(0, -1) + p(1, -1));
    (gx, gy)
}

fn collect_edges(mask: &Mask, edge_threshold: f32) -> Edges {
    let (w, h) = (mask.width() as i64, mask.height() as i64);
    let sums = box_sums(mask);
    let mut edges = Edges {
        pixels: Vec::new(),
        boundary: Vec::new(),
    };

    for y in 0..h {
        for x in 0..w {
            if !mask.is_set(x, y) {
                continue;
            }
            let background: Vec<(i64, i64)> = [(1, 0), (-1, 0), (0, 1), (0, -1)]
                .into_iter()
                .filter(|&(dx, dy)| {
                    let (nx, ny) = (x + dx, y + dy);
                    nx >= 0 && ny >= 0 && nx < w && ny < h && !mask.is_set(nx, ny)
                })
                .collect();
            if background.is_empty() {
                continue;
            }

            let (sx, sy) = sobel(w, h, x, y, |x, y| mask.get(x, y) as i32);
            if ((sx.abs() + sy.abs()) as f32) < edge_threshold {
                continue;
            }
            let (gx, gy) = sobel(w, h, x, y, |x, y| sums[(y * w + x) as usize]);
            if gx == 0 && gy == 0 {
                continue;
            }

            edges.pixels.push(EdgePixel {
                x: x as usize,
                y: y as usize,
                gx: gx as f32,
                gy: gy as f32,
            });
            for (dx, dy) in background {
                edges
                    .boundary
                    .push([x as f64 + dx as f64 * 0.5, y as f64 + dy as f64 * 0.5]);
            }
        }
    }
    edges
}

struct Accumulator {
    cols: usize,
    rows: usize,
    votes: Vec<u32>,
}

impl Accumulator {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            votes: vec![0; cols * rows],
        }
    }

    // every edge pixel votes along its gradient, both ways, once per radius
    fn cast(&mut self, edges: &[EdgePixel], params: &HoughParams) {
        let idp = 1.0 / params.dp();
        let (min_r, max_r) = (params.min_radius() as i64, params.max_radius() as i64);
        for e in edges {
            let mag = e.gx.hypot(e.gy);
            let sx = (e.gx * idp * ONE / mag).round() as i64;
            let sy = (e.gy * idp * ONE / mag).round() as i64;
            // start from the pixel center so the shift below rounds
            let x0 = ((e.x as f32 + 0.5) * idp * ONE).round() as i64;
            let y0 = ((e.y as f32 + 0.5) * idp * ONE).round() as i64;
            for (sx, sy) in [(sx, sy), (-sx, -sy)] {
                let (mut x1, mut y1) = (x0 + min_r * sx, y0 + min_r * sy);
                for _ in min_r..=max_r {
                    let (ax, ay) = (x1 >> SHIFT, y1 >> SHIFT);
                    if ax < 0 || ay < 0 || ax >= self.cols as i64 || ay >= self.rows as i64 {
                        break;
                    }
                    self.votes[ay as usize * self.cols + ax as usize] += 1;
                    x1 += sx;
                    y1 += sy;
                }
            }
        }
    }

    // 3x3 neighbourhood sums, so rays that miss the exact center by a pixel still count
    fn smoothed(&self) -> Vec<u32> {
        let mut out = vec![0; self.votes.len()];
        for y in 0..self.rows {
            for x in 0..self.cols {
                let mut s = 0;
                for ny in y.saturating_sub(1)..=(y + 1).min(self.rows - 1) {
                    for nx in x.saturating_sub(1)..=(x + 1).min(self.cols - 1) {
                        s += self.votes[ny * self.cols + nx];
                    }
                }
                out[y * self.cols + x] = s;
            }
        }
        out
    }

    /// Local maxima above `threshold` as (score, col, row), strongest first.
    fn peaks(&self, threshold: u32) -> Vec<(u32, usize, usize)> {
        let score = self.smoothed();
        let at = |x: usize, y: usize| score[y * self.cols + x];
        let mut peaks = Vec::new();
        for y in 0..self.rows {
            for x in 0..self.cols {
                let v = at(x, y);
                if v <= threshold {
                    continue;
                }
                let left = if x > 0 { at(x - 1, y) } else { 0 };
                let right = if x + 1 < self.cols { at(x + 1, y) } else { 0 };
                let up = if y > 0 { at(x, y - 1) } else { 0 };
                let down = if y + 1 < self.rows { at(x, y + 1) } else { 0 };
                // strict on one side only, so a two-cell plateau still yields a peak
                if v > left && v >= right && v > up && v >= down {
                    peaks.push((v, x, y));
                }
            }
        }
        peaks.sort_by(|a, b| b.0.cmp(&a.0).then(a.2.cmp(&b.2)).then(a.1.cmp(&b.1)));
        peaks
    }
}

fn inliers(boundary: &[[f64; 2]], cx: f64, cy: f64, radius: f64) -> Vec<[f64; 2]> {
    boundary
        .iter()
        .filter(|p| ((p[0] - cx).hypot(p[1] - cy) - radius).abs() <= INLIER_BAND)
        .copied()
        .collect()
}

// Pick the best supported radius around a candidate center, then refine
// center and radius with a least-squares fit on the supporting points.
fn estimate_circle(boundary: &[[f64; 2]], cx: f64, cy: f64, params: &HoughParams) -> Option<Circle> {
    // look slightly past the radius range so out-of-range circles are measured, then rejected
    let lo = (params.min_radius() as f64 - 2.0).max(0.0);
    let hi = params.max_radius() as f64 + 2.0;

    let mut histogram = vec![0u32; hi.ceil() as usize + 2];
    for p in boundary {
        let d = (p[0] - cx).hypot(p[1] - cy);
        if d >= lo && d <= hi {
            histogram[d.round() as usize] += 1;
        }
    }

    // support per unit of circumference, so small circles are not outvoted by big ones
    let (best, _) = histogram
        .iter()
        .enumerate()
        .skip(1)
        .filter(|&(_, &count)| count > 0)
        .map(|(r, &count)| (r, count as f64 / r as f64))
        .fold(None::<(usize, f64)>, |best, (r, score)| match best {
            Some((_, s)) if s >= score => best,
            _ => Some((r, score)),
        })?;

    let first = inliers(boundary, cx, cy, best as f64);
    let coarse = fit_circle(&first)?;
    let support = inliers(boundary, coarse.cx, coarse.cy, coarse.radius);
    let fine = fit_circle(&support)?;

    if support.len() as u32 <= params.accumulator_threshold() {
        return None;
    }
    let r = fine.radius.round();
    if r < params.min_radius() as f64 || r > params.max_radius() as f64 {
        return None;
    }

    Some(Circle {
        x: fine.cx as f32,
        y: fine.cy as f32,
        radius: fine.radius as f32,
        support: support.len() as u32,
    })
}

/// Hough gradient circle search on a binary mask.
///
/// Returns every accepted circle whose center is at least `min_dist` from
/// the others, strongest accumulator peak first. Empty or degenerate masks
/// give an empty list.
pub fn find_circles(mask: &Mask, params: &HoughParams) -> Vec<Circle> {
    let params = params.normalized();
    if mask.is_empty() || mask.count_set() == 0 {
        return Vec::new();
    }

    let edges = collect_edges(mask, params.edge_threshold());
    if edges.pixels.is_empty() {
        return Vec::new();
    }

    let dp = params.dp();
    let cols = ((mask.width() as f32 / dp).ceil() as usize).max(1);
    let rows = ((mask.height() as f32 / dp).ceil() as usize).max(1);
    let mut acc = Accumulator::new(cols, rows);
    acc.cast(&edges.pixels, &params);

    let peaks = acc.peaks(params.accumulator_threshold());
    let min_dist2 = params.min_dist() * params.min_dist();
    let mut circles: Vec<Circle> = Vec::new();

    for (score, ax, ay) in peaks {
        let cx = (ax as f32 + 0.5) * dp - 0.5;
        let cy = (ay as f32 + 0.5) * dp - 0.5;
        if circles.iter().any(|c| c.dist2(cx, cy) < min_dist2) {
            continue;
        }
        let Some(circle) = estimate_circle(&edges.boundary, cx as f64, cy as f64, &params) else {
            continue;
        };
        if circles.iter().any(|c| c.dist2(circle.x, circle.y) < min_dist2) {
            continue;
        }
        log::debug!(
            "circle at ({:.1}, {:.1}) r={:.1} votes={} support={}",
            circle.x,
            circle.y,
            circle.radius,
            score,
            circle.support
        );
        circles.push(circle);
    }

    circles
}

/// Largest raster the `cardmat-*` crates allocate, in pixels (one byte each).
pub const MAX_PIXELS: usize = 1 << 28;

/// `width * height`, or `None` on overflow or above [`MAX_PIXELS`].
#[inline]
pub fn pixel_count(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height).filter(|&n| n <= MAX_PIXELS)
}

/// Owned 8-bit grayscale raster, row-major, `0` = black.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Image of the given size with every pixel set to `fill`.
    pub fn new(width: usize, height: usize, fill: u8) -> Self {
        Self {
            width,
            height,
            data: vec![fill; width * height],
        }
    }

    /// Wrap an existing buffer. Returns `None` if `data.len() != width * height`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Set one pixel; out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    /// Fill the axis-aligned rectangle `[x0, x0+w) x [y0, y0+h)`, clipped to the image.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, w: usize, h: usize, value: u8) {
        let x_start = x0.clamp(0, self.width as i64) as usize;
        let y_start = y0.clamp(0, self.height as i64) as usize;
        let x_end = (x0 + w as i64).clamp(x_start as i64, self.width as i64) as usize;
        let y_end = (y0 + h as i64).clamp(y_start as i64, self.height as i64) as usize;
        for y in y_start..y_end {
            let row = y * self.width;
            self.data[row + x_start..row + x_end].fill(value);
        }
    }

    /// Nearest-neighbour upscale: every pixel becomes a `factor x factor` block.
    ///
    /// Returns `None` if the result would exceed [`MAX_PIXELS`].
    pub fn upscale_nearest(&self, factor: usize) -> Option<Self> {
        let width = self.width.checked_mul(factor)?;
        let height = self.height.checked_mul(factor)?;
        pixel_count(width, height)?;
        let mut out = Self::new(width, height, 0);
        for y in 0..out.height {
            let sy = y / factor;
            for x in 0..out.width {
                out.data[y * out.width + x] = self.data[sy * self.width + x / factor];
            }
        }
        Some(out)
    }
}

//! Simple containers to track RGBA8 images and copy them into each other.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageFormat {
    Rgba8,
}

impl ImageFormat {
    fn stride(&self) -> u32 {
        match self {
            ImageFormat::Rgba8 => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A tightly packed, row-major RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    size: (u32, u32),
    data: Vec<u8>,
    format: ImageFormat,
}

impl Image {
    /// Wraps a buffer of RGBA8 pixels. The buffer must hold exactly
    /// `width * height * 4` bytes.
    pub fn new_rgba8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Result<Self, ImageError> {
        let data = data.into();
        let format = ImageFormat::Rgba8;
        let expected = buffer_len(size, format);

        if data.len() != expected {
            return Err(ImageError::BufferSize {
                size,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { size, data, format })
    }

    pub fn new_empty_rgba8(size: (u32, u32)) -> Self {
        let format = ImageFormat::Rgba8;

        Self {
            size,
            data: vec![0; buffer_len(size, format)],
            format,
        }
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.1
    }

    /// The raw RGBA8 bytes, row by row with no padding.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Copies all of `other` into this image with its top-left corner at
    /// `pos`. Channels are copied as-is. `other` must fit inside this image at
    /// that position.
    pub fn blit(&mut self, other: &Image, pos: (u32, u32)) {
        assert!(self.format == ImageFormat::Rgba8 && other.format == ImageFormat::Rgba8);
        assert!(
            pos.0 + other.size.0 <= self.size.0 && pos.1 + other.size.1 <= self.size.1,
            "cannot blit a {}x{} image at {:?} into a {}x{} image",
            other.size.0,
            other.size.1,
            pos,
            self.size.0,
            self.size.1
        );

        if other.size.0 == 0 {
            return;
        }

        let stride = self.format.stride();

        let other_width_bytes = other.size.0 * stride;
        let other_rows = other.data.chunks_exact(other_width_bytes as usize);

        for (other_y, other_row) in other_rows.enumerate() {
            let self_y = pos.1 + other_y as u32;

            let start_px = pos.0 + self.size.0 * self_y;

            let start_in_bytes = (stride * start_px) as usize;
            let end_in_bytes = start_in_bytes + other_row.len();

            let self_row = &mut self.data[start_in_bytes..end_in_bytes];
            self_row.copy_from_slice(other_row);
        }
    }

    pub fn get_pixel(&self, pos: (u32, u32)) -> Pixel {
        let start = self.pixel_offset(pos);

        Pixel {
            r: self.data[start],
            g: self.data[start + 1],
            b: self.data[start + 2],
            a: self.data[start + 3],
        }
    }

    pub fn set_pixel(&mut self, pos: (u32, u32), pixel: Pixel) {
        let start = self.pixel_offset(pos);

        self.data[start] = pixel.r;
        self.data[start + 1] = pixel.g;
        self.data[start + 2] = pixel.b;
        self.data[start + 3] = pixel.a;
    }

    fn pixel_offset(&self, pos: (u32, u32)) -> usize {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        let stride = self.format.stride() as usize;
        stride * (pos.0 as usize + pos.1 as usize * self.size.0 as usize)
    }
}

fn buffer_len(size: (u32, u32), format: ImageFormat) -> usize {
    size.0 as usize * size.1 as usize * format.stride() as usize
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("an RGBA8 image of size {size:?} needs {expected} bytes of pixel data, but {actual} were given")]
    BufferSize {
        size: (u32, u32),
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    fn solid(size: (u32, u32), pixel: Pixel) -> Image {
        let data: Vec<u8> = (0..size.0 * size.1)
            .flat_map(|_| vec![pixel.r, pixel.g, pixel.b, pixel.a])
            .collect();

        Image::new_rgba8(size, data).unwrap()
    }

    #[test]
    fn wrong_buffer_size() {
        let err = Image::new_rgba8((2, 2), vec![0; 15]).unwrap_err();

        assert_eq!(
            err,
            ImageError::BufferSize {
                size: (2, 2),
                expected: 16,
                actual: 15,
            }
        );
    }

    #[test]
    fn blit_zero() {
        let source = Image::new_empty_rgba8((17, 20));
        let mut target = Image::new_empty_rgba8((17, 20));

        target.blit(&source, (0, 0));
    }

    #[test]
    fn blit_corner() {
        let red = Pixel::new(255, 0, 0, 255);
        let source = solid((4, 4), red);
        let mut target = Image::new_empty_rgba8((8, 8));

        target.blit(&source, (4, 4));

        assert_eq!(target.get_pixel((4, 4)), red);
        assert_eq!(target.get_pixel((7, 7)), red);
        assert_eq!(target.get_pixel((3, 4)), Pixel::new(0, 0, 0, 0));
        assert_eq!(target.get_pixel((4, 3)), Pixel::new(0, 0, 0, 0));
    }

    #[test]
    fn blit_preserves_rows() {
        let mut source = Image::new_empty_rgba8((2, 2));
        source.set_pixel((0, 0), Pixel::new(1, 2, 3, 4));
        source.set_pixel((1, 0), Pixel::new(5, 6, 7, 8));
        source.set_pixel((0, 1), Pixel::new(9, 10, 11, 12));
        source.set_pixel((1, 1), Pixel::new(13, 14, 15, 16));

        let mut target = Image::new_empty_rgba8((5, 3));
        target.blit(&source, (3, 1));

        assert_eq!(target.get_pixel((3, 1)), Pixel::new(1, 2, 3, 4));
        assert_eq!(target.get_pixel((4, 1)), Pixel::new(5, 6, 7, 8));
        assert_eq!(target.get_pixel((3, 2)), Pixel::new(9, 10, 11, 12));
        assert_eq!(target.get_pixel((4, 2)), Pixel::new(13, 14, 15, 16));
    }

    #[test]
    #[should_panic]
    fn blit_out_of_bounds() {
        let source = Image::new_empty_rgba8((4, 4));
        let mut target = Image::new_empty_rgba8((6, 6));

        target.blit(&source, (3, 0));
    }

    #[test]
    fn get_pixel() {
        let source = Image::new_empty_rgba8((4, 4));

        assert_eq!(source.get_pixel((0, 0)), Pixel::new(0, 0, 0, 0));
        assert_eq!(source.get_pixel((3, 3)), Pixel::new(0, 0, 0, 0));
    }

    #[test]
    fn set_pixel() {
        let mut source = Image::new_empty_rgba8((3, 3));

        source.set_pixel((0, 0), Pixel::new(1, 2, 3, 4));
        assert_eq!(source.get_pixel((0, 0)), Pixel::new(1, 2, 3, 4));

        source.set_pixel((2, 2), Pixel::new(5, 6, 7, 8));
        assert_eq!(source.get_pixel((2, 2)), Pixel::new(5, 6, 7, 8));

        assert_eq!(&source.data()[0..4], &[1, 2, 3, 4]);
        assert_eq!(&source.data()[(source.data().len() - 4)..], &[5, 6, 7, 8]);
    }
}

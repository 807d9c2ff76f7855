//! 3x5 bitmap digits for the in-game score

use super::pixels::{PixelBuf, Rgb};

const SHADOW: Rgb = Rgb(30, 30, 30);

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

/// Pixel width of `n` drawn at `size` pixels per font pixel
pub fn number_width(n: u32, size: i32) -> i32 {
    let len = n.to_string().len() as i32;
    (len * 4 - 1) * size
}

fn draw_digit(buf: &mut PixelBuf, x: i32, y: i32, d: u8, fg: Rgb, size: i32) {
    let glyph = &DIGITS[d as usize];
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32 * size;
                let py = y + row as i32 * size;
                buf.fill_rect(px + size, py + size, size, size, SHADOW);
            }
        }
    }
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                buf.fill_rect(x + col as i32 * size, y + row as i32 * size, size, size, fg);
            }
        }
    }
}

/// Draw `n` horizontally centered on `cx` with a drop shadow.
pub fn draw_number(buf: &mut PixelBuf, cx: i32, y: i32, n: u32, fg: Rgb, size: i32) {
    let size = size.max(1);
    let start_x = cx - number_width(n, size) / 2;
    for (i, ch) in n.to_string().bytes().enumerate() {
        draw_digit(buf, start_x + i as i32 * 4 * size, y, ch - b'0', fg, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb = Rgb(0, 0, 100);
    const FG: Rgb = Rgb(255, 255, 255);

    fn lit(buf: &PixelBuf) -> usize {
        (0..buf.height())
            .flat_map(|y| (0..buf.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| buf.get(x, y) == FG)
            .count()
    }

    #[test]
    fn one_is_seven_pixels() {
        let mut buf = PixelBuf::new(20, 10, BG);
        draw_number(&mut buf, 10, 1, 1, FG, 1);
        assert_eq!(lit(&buf), 7);
    }

    #[test]
    fn size_scales_area() {
        let mut buf = PixelBuf::new(40, 20, BG);
        draw_number(&mut buf, 20, 1, 8, FG, 2);
        assert_eq!(lit(&buf), 13 * 4);
        assert_eq!(number_width(8, 2), 6);
        assert_eq!(number_width(123, 1), 11);
    }
}
